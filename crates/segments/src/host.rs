//! Side-effecting collaborators of the renderer: subprocesses and filesystem
//! walks. The renderer only talks to them through [`Host`] so tests can
//! substitute canned answers.

use std::io::Read;
use std::path::{
    Path,
    PathBuf,
};
use std::process::{
    Command,
    Stdio,
};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::ddev::DdevStatus;
use crate::git::GitStatus;

/// Upper bound on any subprocess spawned while drawing a prompt.
pub const COMMAND_TIMEOUT_MS: u64 = 500;

pub trait Host {
    fn git_status(&self, cwd: &Path) -> Option<GitStatus>;

    fn ddev_status(&self, project_dir: &Path) -> Option<DdevStatus>;

    /// Run `kitten @ <args>`. Failures are ignored.
    fn kitten(&self, args: &[String]);
}

/// The real machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHost;

impl Host for SystemHost {
    fn git_status(&self, cwd: &Path) -> Option<GitStatus> {
        GitStatus::detect(cwd)
    }

    fn ddev_status(&self, project_dir: &Path) -> Option<DdevStatus> {
        DdevStatus::detect(project_dir)
    }

    fn kitten(&self, args: &[String]) {
        let mut full = vec!["@".to_string()];
        full.extend_from_slice(args);
        let full: Vec<&str> = full.iter().map(String::as_str).collect();
        if run_command("kitten", &full, Path::new(".")).is_none() {
            debug!(?args, "kitten produced no output");
        }
    }
}

/// Run `program` in `cwd` and return its trimmed stdout.
///
/// Returns `None` when the program is missing, exits non-zero, prints nothing
/// or takes longer than [`COMMAND_TIMEOUT_MS`].
pub fn run_command(program: &str, args: &[&str], cwd: &Path) -> Option<String> {
    let mut child = match Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => child,
        Err(err) => {
            debug!(%err, program, "command failed to start");
            return None;
        },
    };

    // drain stdout off-thread so a full pipe cannot stall the child
    let mut stdout = child.stdout.take()?;
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let read = stdout.read_to_end(&mut buf).map(|_| buf);
        tx.send(read).ok();
    });

    let stdout = match rx.recv_timeout(Duration::from_millis(COMMAND_TIMEOUT_MS)) {
        Ok(read) => read,
        Err(err) => {
            debug!(%err, program, "command timed out");
            if let Err(err) = child.kill() {
                debug!(%err, program, "failed to kill command");
            }
            child.wait().ok();
            return None;
        },
    };

    let status = child.wait().ok()?;
    match stdout {
        Ok(stdout) if status.success() => String::from_utf8(stdout)
            .ok()
            .map(|s| s.trim_end().to_string())
            .filter(|s| !s.is_empty()),
        Ok(_) => None,
        Err(err) => {
            debug!(%err, program, "failed to read command output");
            None
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    File,
}

/// Walk up from `start` looking for an entry named `target`.
///
/// The walk gives up at `stop_at` (typically the home directory, which is
/// not worth scanning) and never inspects the filesystem root.
pub fn find_upwards(start: &Path, target: &str, stop_at: Option<&Path>, kind: EntryKind) -> Option<PathBuf> {
    for dir in start.ancestors() {
        if dir.parent().is_none() || stop_at.is_some_and(|stop| dir == stop) {
            return None;
        }

        let candidate = dir.join(target);
        let found = match kind {
            EntryKind::Dir => candidate.is_dir(),
            EntryKind::File => candidate.is_file(),
        };
        if found {
            return Some(candidate);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::Instant;

    use super::*;

    #[test]
    fn test_missing_program_is_none() {
        assert_eq!(run_command("definitely-not-a-real-binary-xyz", &[], Path::new(".")), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_command_output_is_trimmed() {
        assert_eq!(run_command("echo", &["main"], Path::new(".")), Some("main".to_string()));
        assert_eq!(run_command("false", &[], Path::new(".")), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_slow_command_is_killed() {
        let started = Instant::now();
        assert_eq!(run_command("sleep", &["5"], Path::new(".")), None);
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[test]
    fn test_find_upwards() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a/b/c");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir(root.path().join("a/.ddev")).unwrap();
        fs::write(root.path().join("a/b/.git"), "gitdir: elsewhere").unwrap();

        assert_eq!(
            find_upwards(&nested, ".ddev", None, EntryKind::Dir),
            Some(root.path().join("a/.ddev"))
        );
        assert_eq!(
            find_upwards(&nested, ".git", None, EntryKind::File),
            Some(root.path().join("a/b/.git"))
        );
        // a file does not satisfy a directory search
        assert_eq!(find_upwards(&nested, ".git", Some(root.path()), EntryKind::Dir), None);
    }

    #[test]
    fn test_find_upwards_stops() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir(root.path().join(".ddev")).unwrap();

        let stop = root.path().join("a");
        assert_eq!(find_upwards(&nested, ".ddev", Some(&stop), EntryKind::Dir), None);
        assert!(find_upwards(&nested, ".ddev", None, EntryKind::Dir).is_some());
    }
}
