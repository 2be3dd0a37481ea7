//! Optional `config.toml` with layout and path settings.

use std::fs;
use std::io;
use std::path::{
    Path,
    PathBuf,
};
use std::str::FromStr;

use segments::Segment;
use segments::composer::Layout;
use segments::snip::DEFAULT_POSITION;
use serde::Deserialize;
use tracing::{
    debug,
    warn,
};

const CONFIG_DIR: &str = "prompt";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub projects_file: Option<PathBuf>,
    pub left: Option<Vec<String>>,
    pub right: Option<Vec<String>>,
    pub last: Option<Vec<String>>,
    pub snip_position: Option<f64>,
    pub columns: Option<usize>,
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Read `path`, or the default location when `None`.
    ///
    /// A missing or malformed file yields the defaults so that the prompt
    /// still renders.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::default_path) else {
            return Self::default();
        };

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|err| {
                warn!(path = %path.display(), %err, "ignoring malformed config");
                Self::default()
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file");
                Self::default()
            },
            Err(err) => {
                warn!(path = %path.display(), %err, "unable to read config");
                Self::default()
            },
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn layout(&self) -> Layout {
        let default = Layout::default();
        Layout {
            left: segment_list(self.left.as_deref()).unwrap_or(default.left),
            right: segment_list(self.right.as_deref()).unwrap_or(default.right),
            last: segment_list(self.last.as_deref()).unwrap_or(default.last),
        }
    }

    pub fn snip_position(&self) -> f64 {
        match self.snip_position {
            Some(position) if (0.0..=1.0).contains(&position) => position,
            Some(position) => {
                warn!(position, "snip_position must be between 0 and 1");
                DEFAULT_POSITION
            },
            None => DEFAULT_POSITION,
        }
    }

    /// The projects file named here, with a leading `~` expanded.
    pub fn projects_file(&self) -> Option<PathBuf> {
        self.projects_file.as_deref().map(expand_home)
    }
}

fn segment_list(names: Option<&[String]>) -> Option<Vec<Segment>> {
    let names = names?;
    Some(
        names
            .iter()
            .filter_map(|name| match Segment::from_str(name) {
                Ok(segment) => Some(segment),
                Err(_) => {
                    warn!(name, "unknown segment in config");
                    None
                },
            })
            .collect(),
    )
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
