use std::env;
use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use clap::Subcommand;
use crossterm::style::Stylize;
use eyre::Result;
use segments::projects::CdTarget;
use segments::{
    ProjectEntry,
    ProjectError,
    ProjectStore,
};
use tracing::debug;

const NAME_COLUMN: usize = 15;

/// Project commands. `cd` prints shell code and is meant to be wrapped in a
/// shell function that `eval`s its output:
///
/// ```sh
/// cdd() { eval "$(prompt project cd "$1")"; }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ProjectSubcommand {
    /// Print a `cd` to a project, or to the root of the current one
    Cd {
        /// Case-insensitive prefix of a project name
        name: Option<String>,
    },
    /// Add a project, or change the color of an existing one
    Add {
        /// Project name, without whitespace
        name: String,
        /// An existing directory
        project_root: PathBuf,
        /// Named (red, blue, ...) or hex (#2e004c) color [default: random]
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Remove a project by its full name
    Remove { name: String },
    /// List all projects
    List,
}

impl ProjectSubcommand {
    pub fn execute(self, store_path: &Path, out: &mut impl Write) -> Result<ExitCode> {
        let mut store = ProjectStore::load(store_path)?;
        match self {
            Self::Cd { name } => cd(&store, name.as_deref(), out),
            Self::Add {
                name,
                project_root,
                color,
            } => match store.add(&name, &project_root, color.as_deref()) {
                Ok(upsert) => {
                    store.save()?;
                    if upsert.updated {
                        writeln!(out, "New color: {}", upsert.entry.color)?;
                    }
                    Ok(ExitCode::SUCCESS)
                },
                Err(err) => report(&err),
            },
            Self::Remove { name } => match store.remove(&name) {
                Ok(removed) => {
                    store.save()?;
                    debug!(name = %removed.name, "removed project");
                    Ok(ExitCode::SUCCESS)
                },
                Err(err) => report(&err),
            },
            Self::List => {
                for entry in store.list() {
                    writeln!(out, "{}", listing_line(entry))?;
                }
                Ok(ExitCode::SUCCESS)
            },
        }
    }
}

fn cd(store: &ProjectStore, name: Option<&str>, out: &mut impl Write) -> Result<ExitCode> {
    let cwd = env::current_dir().and_then(|dir| dir.canonicalize())?;
    match store.resolve_cd(name, &cwd) {
        CdTarget::Jump(path) => {
            writeln!(out, "cd {}", shell_quote(&path.display().to_string()))?;
            Ok(ExitCode::SUCCESS)
        },
        CdTarget::Choose(entries) => {
            writeln!(out, "{}", printf_listing(&entries))?;
            Ok(ExitCode::SUCCESS)
        },
        CdTarget::NoMatch(entries) => {
            writeln!(out, "{}", printf_listing(&entries))?;
            let message = format!("No project match for: {}", name.unwrap_or_default());
            writeln!(
                out,
                "printf \"\\n{} {}\\n\"",
                "Error:".bold().red(),
                printf_escape(&message).red()
            )?;
            Ok(ExitCode::FAILURE)
        },
    }
}

fn report(err: &ProjectError) -> Result<ExitCode> {
    eprintln!("{} {}", "Error:".bold().red(), err.to_string().red());
    Ok(ExitCode::FAILURE)
}

/// Name padded and bold, path with `~` for home and dimmed, red when the
/// directory is gone.
fn listing_line(entry: &ProjectEntry) -> String {
    format!("{}  {}", padded_name(entry).bold(), styled_path(entry, &shown_path(&entry.path)))
}

fn padded_name(entry: &ProjectEntry) -> String {
    format!("{:<NAME_COLUMN$}", entry.name)
}

fn styled_path(entry: &ProjectEntry, shown: &str) -> String {
    if entry.path.exists() {
        shown.dim().to_string()
    } else {
        shown.dim().red().to_string()
    }
}

fn shown_path(path: &Path) -> String {
    match dirs::home_dir().and_then(|home| path.strip_prefix(home).ok().map(Path::to_path_buf)) {
        Some(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Some(rest) => format!("~/{}", rest.display()),
        None => path.display().to_string(),
    }
}

fn printf_listing(entries: &[&ProjectEntry]) -> String {
    let body: String = entries
        .iter()
        .map(|entry| {
            let name = printf_escape(&padded_name(entry));
            let path = printf_escape(&shown_path(&entry.path));
            format!("{}  {}\\n", name.bold(), styled_path(entry, &path))
        })
        .collect();
    format!("printf \"{body}\"")
}

/// Escape `text` for a double-quoted `printf` format string.
fn printf_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str(r"\\\\"),
            '"' | '$' | '`' => {
                escaped.push('\\');
                escaped.push(c);
            },
            '%' => escaped.push_str("%%"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn shell_quote(text: &str) -> String {
    let safe = |c: char| c.is_ascii_alphanumeric() || "/._-+:,@".contains(c);
    if !text.is_empty() && text.chars().all(safe) {
        text.to_string()
    } else {
        format!("'{}'", text.replace('\'', r"'\''"))
    }
}
