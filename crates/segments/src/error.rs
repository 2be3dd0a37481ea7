use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("hex color must be 6 hex digits with an optional leading '#': {0:?}")]
    InvalidFormat(String),
    #[error("unknown color name: {0:?}")]
    UnknownName(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ThemeError {
    #[error("Theme \"{0}\" not found.")]
    UnknownTheme(String),
}

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid project name {0:?}: names must be non-empty and contain no whitespace")]
    InvalidName(String),
    #[error("\"{0}\" is not a named color ({names}) or hex color (#ffffff)", names = crate::projects::NAMED_COLORS.join(", "))]
    InvalidColor(String),
    #[error("No project named: {0}")]
    NotFound(String),
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),
}

impl ProjectError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
