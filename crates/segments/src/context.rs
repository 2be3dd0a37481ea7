//! Snapshot of the process environment a prompt is rendered in.

use std::collections::HashMap;
use std::env;
use std::path::{
    Path,
    PathBuf,
};

use chrono::{
    DateTime,
    Local,
};
use tracing::debug;

pub const DEFAULT_COLUMNS: usize = 80;

const SSH_CLIENT: &str = "SSH_CLIENT";
/// macOS user directories as mounted into a Linux VM by the host.
const HOST_USERS_DIR: &str = "/Users";
const DOCKERENV: &str = "/.dockerenv";

/// Where the shell is running, which decides the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentClass {
    Local,
    Ssh,
    /// A Linux VM on a macOS host.
    Orb,
}

impl EnvironmentClass {
    pub fn theme_key(self) -> &'static str {
        match self {
            Self::Local => crate::theme::LOCAL,
            Self::Ssh | Self::Orb => crate::theme::REMOTE,
        }
    }
}

/// Filesystem facts about the host, probed once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostMarkers {
    pub users_dir: bool,
    pub dockerenv: bool,
}

impl HostMarkers {
    pub fn probe() -> Self {
        Self {
            users_dir: Path::new(HOST_USERS_DIR).is_dir(),
            dockerenv: Path::new(DOCKERENV).exists(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PromptContext {
    pub cwd: PathBuf,
    pub home: Option<PathBuf>,
    pub user: String,
    pub hostname: String,
    pub vars: HashMap<String, String>,
    pub now: DateTime<Local>,
    pub columns: usize,
    pub markers: HostMarkers,
}

impl PromptContext {
    /// A context with nothing but a working directory and a width.
    pub fn new(cwd: impl Into<PathBuf>, columns: usize) -> Self {
        Self {
            cwd: cwd.into(),
            home: None,
            user: String::new(),
            hostname: String::new(),
            vars: HashMap::new(),
            now: Local::now(),
            columns,
            markers: HostMarkers::default(),
        }
    }

    pub fn from_process(columns: Option<usize>) -> Self {
        let vars: HashMap<String, String> = env::vars().collect();
        let cwd = env::current_dir()
            .ok()
            .or_else(|| vars.get("PWD").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));
        let user = vars.get("USER").cloned().unwrap_or_else(whoami::username);
        let hostname = whoami::fallible::hostname().unwrap_or_else(|err| {
            debug!(%err, "unable to read hostname");
            "localhost".to_string()
        });

        Self {
            cwd,
            home: dirs::home_dir(),
            user,
            hostname,
            columns: columns.unwrap_or_else(|| terminal_columns(&vars)),
            vars,
            now: Local::now(),
            markers: HostMarkers::probe(),
        }
    }

    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    /// A non-empty environment variable.
    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    pub fn environment_class(&self) -> EnvironmentClass {
        if self.var(SSH_CLIENT).is_some() {
            EnvironmentClass::Ssh
        } else if self.is_orb() {
            EnvironmentClass::Orb
        } else {
            EnvironmentClass::Local
        }
    }

    pub fn is_orb(&self) -> bool {
        self.markers.users_dir && self.home.as_deref().is_some_and(|home| home.starts_with("/home"))
    }

    /// Container runtime name when running inside one.
    pub fn container(&self) -> Option<String> {
        match self.var("container") {
            Some(name) => Some(name.to_string()),
            None if self.markers.dockerenv => Some("docker".to_string()),
            None => None,
        }
    }

    /// The working directory with `$HOME` shown as `~` and spaces escaped.
    pub fn display_path(&self) -> String {
        let shown = match self.home.as_deref().and_then(|home| self.cwd.strip_prefix(home).ok()) {
            Some(rest) if rest.as_os_str().is_empty() => "~".to_string(),
            Some(rest) => format!("~/{}", rest.display()),
            None => self.cwd.display().to_string(),
        };
        shown.replace(' ', r"\ ")
    }
}

/// Width of the controlling terminal, falling back to `$COLUMNS` and then 80.
pub fn terminal_columns(vars: &HashMap<String, String>) -> usize {
    match crossterm::terminal::size() {
        Ok((columns, _rows)) if columns > 0 => usize::from(columns),
        result => {
            if let Err(err) = result {
                debug!(%err, "unable to query terminal size");
            }
            vars.get("COLUMNS")
                .and_then(|c| c.parse().ok())
                .unwrap_or(DEFAULT_COLUMNS)
        },
    }
}
