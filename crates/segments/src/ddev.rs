use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::host::run_command;

/// Name of the directory that marks a DDEV project.
pub const DDEV_DIR: &str = ".ddev";

#[derive(Debug, Deserialize)]
struct Describe {
    raw: DescribeRaw,
}

#[derive(Debug, Deserialize)]
struct DescribeRaw {
    status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdevStatus {
    pub running: bool,
}

impl DdevStatus {
    pub fn detect(project_dir: &Path) -> Option<Self> {
        let output = run_command("ddev", &["describe", "--json-output"], project_dir)?;
        match Self::parse(&output) {
            Ok(status) => Some(status),
            Err(err) => {
                warn!(%err, "unreadable ddev describe output");
                None
            },
        }
    }

    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let describe: Describe = serde_json::from_str(json)?;
        Ok(Self {
            running: describe.raw.status == "running",
        })
    }
}
