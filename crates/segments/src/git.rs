use std::path::Path;

use crate::host::run_command;

const STATUS_ARGS: &[&str] = &["status", "--porcelain=v1", "--branch", "--untracked-files=no"];
const NO_COMMITS: &str = "No commits yet on ";

/// Branch and working tree state from `git status --porcelain=v1 --branch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitStatus {
    pub branch: String,
    pub clean: bool,
}

impl GitStatus {
    /// `None` outside a repository, in a repository without commits, or when
    /// git is not installed.
    pub fn detect(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        let output = run_command("git", STATUS_ARGS, path)?;
        Self::parse(&output)
    }

    pub fn parse(output: &str) -> Option<Self> {
        let mut lines = output.lines();
        // header: "## main...origin/main [ahead 1]"
        let header = lines.next()?.strip_prefix("## ")?;
        if header.starts_with(NO_COMMITS) {
            return None;
        }
        let branch = header.split("...").next().unwrap_or(header).trim();
        if branch.is_empty() {
            return None;
        }

        // every remaining "XY path" line is a staged or unstaged change
        let clean = !lines.any(|line| line.len() >= 2);

        Some(Self {
            branch: branch.to_string(),
            clean,
        })
    }
}
