//! Flat-file registry of named project directories and their colors.
//!
//! The store is tab separated, one `name<TAB>path<TAB>color` entry per line.
//! Lines starting with `#` and blank lines are kept verbatim when the file is
//! rewritten.

use std::fmt::Write as _;
use std::fs;
use std::io::{
    self,
    Write,
};
use std::path::{
    Path,
    PathBuf,
};
use std::sync::LazyLock;

use regex::Regex;
use tempfile::NamedTempFile;
use tracing::{
    debug,
    warn,
};

use crate::color::{
    hex_to_rgb,
    random_project_color,
    scale_color,
};
use crate::error::ProjectError;

pub const DEFAULT_STORE: &str = ".prompt-projects";
pub const NAMED_COLORS: [&str; 8] = ["white", "red", "green", "yellow", "blue", "magenta", "cyan", "black"];
pub const DEFAULT_BACKGROUND: &str = "blue";
pub const DEFAULT_FOREGROUND: &str = "white";
/// How much brighter than its background a project name is drawn.
const FOREGROUND_SCALE: f64 = 3.0;

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}){1,2}$").expect("hex color pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEntry {
    pub name: String,
    pub path: PathBuf,
    pub color: String,
}

impl ProjectEntry {
    fn to_line(&self) -> String {
        format!("{}\t{}\t{}", self.name, self.path.display(), self.color)
    }
}

/// The project the current directory belongs to, with the colors to draw
/// its name in. An empty name means "not in a project".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMatch {
    pub name: String,
    pub background: String,
    pub foreground: String,
}

impl ProjectMatch {
    pub fn none() -> Self {
        Self {
            name: String::new(),
            background: DEFAULT_BACKGROUND.to_string(),
            foreground: DEFAULT_FOREGROUND.to_string(),
        }
    }

    fn for_entry(entry: &ProjectEntry) -> Self {
        let foreground = if hex_to_rgb(&entry.color).is_ok() {
            scale_color(&entry.color, FOREGROUND_SCALE)
        } else {
            DEFAULT_FOREGROUND.to_string()
        };
        Self {
            name: entry.name.clone(),
            background: entry.color.clone(),
            foreground,
        }
    }

    pub fn is_match(&self) -> bool {
        !self.name.is_empty()
    }
}

/// Read side of the registry used while rendering.
pub trait ProjectLookup {
    /// The first project, in store order, that is `cwd` or one of its
    /// ancestors.
    fn lookup(&self, cwd: &Path) -> ProjectMatch;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum StoreLine {
    Entry(ProjectEntry),
    Verbatim(String),
}

/// Result of [`ProjectStore::add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upsert {
    pub entry: ProjectEntry,
    pub updated: bool,
}

/// Where `project cd` should go.
#[derive(Debug, PartialEq, Eq)]
pub enum CdTarget<'a> {
    Jump(&'a Path),
    /// Several candidates, or no query and nothing to jump to.
    Choose(Vec<&'a ProjectEntry>),
    /// Nothing matched the query; carries every project for reference.
    NoMatch(Vec<&'a ProjectEntry>),
}

#[derive(Debug, Clone)]
pub struct ProjectStore {
    path: PathBuf,
    lines: Vec<StoreLine>,
}

impl ProjectStore {
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lines: Vec::new(),
        }
    }

    /// `~/.prompt-projects`, if there is a home directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(DEFAULT_STORE))
    }

    /// Read the store. A missing file is an empty registry.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ProjectError> {
        let path = path.into();
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Self::parse(path, &content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                warn!("No projects file found: {}", path.display());
                Ok(Self::empty(path))
            },
            Err(err) => Err(ProjectError::io(path, err)),
        }
    }

    /// [`ProjectStore::load`] for the prompt path, where any failure means an
    /// empty registry.
    pub fn load_or_empty(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::load(&path).unwrap_or_else(|err| {
            warn!(%err, "ignoring unreadable projects file");
            Self::empty(path)
        })
    }

    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Self {
        let lines = content
            .lines()
            .map(|line| {
                let line = line.trim_end_matches('\r');
                if line.trim().is_empty() || line.starts_with('#') {
                    return StoreLine::Verbatim(line.to_string());
                }
                let mut fields = line.split('\t');
                match (fields.next(), fields.next(), fields.next()) {
                    (Some(name), Some(path), Some(color)) if !name.is_empty() && !path.is_empty() => {
                        StoreLine::Entry(ProjectEntry {
                            name: name.to_string(),
                            path: PathBuf::from(path),
                            color: color.trim().to_string(),
                        })
                    },
                    _ => {
                        debug!(line, "skipping malformed project line");
                        StoreLine::Verbatim(line.to_string())
                    },
                }
            })
            .collect();

        Self {
            path: path.into(),
            lines,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries in file order.
    pub fn entries(&self) -> impl Iterator<Item = &ProjectEntry> {
        self.lines.iter().filter_map(|line| match line {
            StoreLine::Entry(entry) => Some(entry),
            StoreLine::Verbatim(_) => None,
        })
    }

    /// Entries sorted by path.
    pub fn list(&self) -> Vec<&ProjectEntry> {
        let mut entries: Vec<_> = self.entries().collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.color.cmp(&b.color)));
        entries
    }

    /// Entries whose name starts with `prefix`, ignoring case.
    pub fn filter(&self, prefix: &str) -> Vec<&ProjectEntry> {
        let prefix = prefix.to_lowercase();
        self.list()
            .into_iter()
            .filter(|entry| entry.name.to_lowercase().starts_with(&prefix))
            .collect()
    }

    pub fn resolve_cd(&self, query: Option<&str>, cwd: &Path) -> CdTarget<'_> {
        let Some(query) = query.filter(|q| !q.is_empty()) else {
            for entry in self.list() {
                if cwd == entry.path {
                    // already at a project root, the user probably wants another project
                    break;
                }
                if cwd.starts_with(&entry.path) {
                    return CdTarget::Jump(&entry.path);
                }
            }
            return CdTarget::Choose(self.list());
        };

        let mut matching = self.filter(query);
        match matching.len() {
            0 => CdTarget::NoMatch(self.list()),
            1 => CdTarget::Jump(&matching.remove(0).path),
            _ => CdTarget::Choose(matching),
        }
    }

    /// Insert a project, or update the path and color of an existing one.
    ///
    /// `root` must be an existing directory and is stored canonicalized. A
    /// random dark color is picked when none is given.
    pub fn add(&mut self, name: &str, root: &Path, color: Option<&str>) -> Result<Upsert, ProjectError> {
        validate_name(name)?;
        let color = match color {
            Some(color) => expand_short_hex(validate_color(color)?),
            None => random_project_color(),
        };
        let path = fs::canonicalize(root).map_err(|err| ProjectError::io(root, err))?;
        if !path.is_dir() {
            return Err(ProjectError::NotADirectory(path));
        }

        let entry = ProjectEntry {
            name: name.to_string(),
            path,
            color,
        };
        Ok(self.upsert(entry))
    }

    pub fn upsert(&mut self, entry: ProjectEntry) -> Upsert {
        for line in &mut self.lines {
            if let StoreLine::Entry(existing) = line {
                if existing.name == entry.name {
                    *existing = entry.clone();
                    return Upsert { entry, updated: true };
                }
            }
        }

        self.lines.push(StoreLine::Entry(entry.clone()));
        Upsert { entry, updated: false }
    }

    /// Remove the project with exactly this name.
    pub fn remove(&mut self, name: &str) -> Result<ProjectEntry, ProjectError> {
        let position = self
            .lines
            .iter()
            .position(|line| matches!(line, StoreLine::Entry(entry) if entry.name == name))
            .ok_or_else(|| ProjectError::NotFound(name.to_string()))?;

        match self.lines.remove(position) {
            StoreLine::Entry(entry) => Ok(entry),
            StoreLine::Verbatim(_) => Err(ProjectError::NotFound(name.to_string())),
        }
    }

    pub fn to_file_contents(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            let text = match line {
                StoreLine::Entry(entry) => entry.to_line(),
                StoreLine::Verbatim(text) => text.clone(),
            };
            let _ = writeln!(out, "{text}");
        }
        out
    }

    /// Rewrite the whole store through a temp file in the same directory.
    pub fn save(&self) -> Result<(), ProjectError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut file = NamedTempFile::new_in(&dir).map_err(|err| ProjectError::io(&dir, err))?;
        file.write_all(self.to_file_contents().as_bytes())
            .map_err(|err| ProjectError::io(file.path(), err))?;
        file.persist(&self.path)
            .map_err(|err| ProjectError::io(&self.path, err.error))?;

        debug!(path = %self.path.display(), "saved projects");
        Ok(())
    }
}

impl ProjectLookup for ProjectStore {
    fn lookup(&self, cwd: &Path) -> ProjectMatch {
        self.entries()
            .find(|entry| cwd.starts_with(&entry.path))
            .map_or_else(ProjectMatch::none, ProjectMatch::for_entry)
    }
}

pub fn validate_name(name: &str) -> Result<&str, ProjectError> {
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(ProjectError::InvalidName(name.to_string()));
    }
    Ok(name)
}

/// Accept one of [`NAMED_COLORS`] or a `#rgb` / `#rrggbb` hex color.
pub fn validate_color(color: &str) -> Result<&str, ProjectError> {
    if NAMED_COLORS.contains(&color) || HEX_COLOR.is_match(color) {
        Ok(color)
    } else {
        Err(ProjectError::InvalidColor(color.to_string()))
    }
}

/// `#abc` is stored as `#aabbcc` so it can be scaled and painted.
fn expand_short_hex(color: &str) -> String {
    match color.strip_prefix('#') {
        Some(digits) if digits.len() == 3 => format!("#{}", digits.chars().flat_map(|c| [c, c]).collect::<String>()),
        _ => color.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;

    const STORE: &str = "\
# name\tpath\tcolor
web\t/home/u/web\t#112233

api\t/home/u/api\tred
nested\t/home/u/web/inner\t#445566
";

    fn store() -> ProjectStore {
        ProjectStore::parse("/tmp/unused", STORE)
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let names: Vec<_> = store().entries().map(|e| e.name.clone()).collect();
        assert_eq!(names, vec!["web", "api", "nested"]);
    }

    #[test]
    fn test_lookup_nested_directory() {
        let found = store().lookup(Path::new("/home/u/web/src"));
        assert_eq!(found, ProjectMatch {
            name: "web".to_string(),
            background: "#112233".to_string(),
            foreground: scale_color("#112233", 3.0),
        });
        assert_eq!(found.foreground, "#336699");
    }

    #[test]
    fn test_lookup_first_match_in_file_order() {
        // "nested" is the longer prefix but "web" comes first in the file
        let found = store().lookup(Path::new("/home/u/web/inner/deeper"));
        assert_eq!(found.name, "web");
    }

    #[test]
    fn test_lookup_miss() {
        let found = store().lookup(Path::new("/home/u/other"));
        assert_eq!(found, ProjectMatch::none());
        assert!(!found.is_match());
        assert_eq!(found.background, "blue");
        assert_eq!(found.foreground, "white");

        // a shared string prefix is not a parent directory
        assert!(!store().lookup(Path::new("/home/u/website")).is_match());
    }

    #[test]
    fn test_lookup_named_color() {
        let found = store().lookup(Path::new("/home/u/api"));
        assert_eq!(found.background, "red");
        assert_eq!(found.foreground, DEFAULT_FOREGROUND);
    }

    #[test]
    fn test_list_sorted_by_path() {
        let names: Vec<_> = store().list().iter().map(|e| e.name.clone()).collect();
        assert_eq!(names, vec!["api", "web", "nested"]);
    }

    #[test]
    fn test_filter_is_case_insensitive_prefix() {
        let store = store();
        assert_eq!(store.filter("WE").len(), 1);
        assert_eq!(store.filter("n")[0].name, "nested");
        assert!(store.filter("x").is_empty());
        assert_eq!(store.filter("").len(), 3);
    }

    #[test]
    fn test_resolve_cd() {
        let store = store();
        let cwd = Path::new("/tmp");
        assert_eq!(store.resolve_cd(Some("api"), cwd), CdTarget::Jump(Path::new("/home/u/api")));
        assert!(matches!(store.resolve_cd(Some("zzz"), cwd), CdTarget::NoMatch(all) if all.len() == 3));

        let mut store = store;
        store.upsert(ProjectEntry {
            name: "webapp".to_string(),
            path: PathBuf::from("/srv/webapp"),
            color: "green".to_string(),
        });
        match store.resolve_cd(Some("web"), cwd) {
            CdTarget::Choose(entries) => {
                let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
                assert_eq!(names, vec!["web", "webapp"]);
            },
            other => panic!("expected a choice, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_cd_without_query() {
        let store = store();
        assert_eq!(
            store.resolve_cd(None, Path::new("/home/u/api/src")),
            CdTarget::Jump(Path::new("/home/u/api"))
        );
        assert!(matches!(store.resolve_cd(None, Path::new("/home/u/api")), CdTarget::Choose(_)));
        assert!(matches!(store.resolve_cd(Some(""), Path::new("/elsewhere")), CdTarget::Choose(_)));
    }

    #[test]
    fn test_upsert_updates_in_place() {
        let mut store = store();
        let result = store.upsert(ProjectEntry {
            name: "api".to_string(),
            path: PathBuf::from("/srv/api"),
            color: "#000000".to_string(),
        });
        assert!(result.updated);

        let entries: Vec<_> = store.entries().collect();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].path, PathBuf::from("/srv/api"));
        assert_eq!(entries[1].color, "#000000");
    }

    #[test]
    fn test_remove() {
        let mut store = store();
        assert_eq!(store.remove("api").unwrap().name, "api");
        assert!(matches!(store.remove("api"), Err(ProjectError::NotFound(_))));
        // exact names only
        assert!(matches!(store.remove("we"), Err(ProjectError::NotFound(_))));
        assert_eq!(store.entries().count(), 2);
    }

    #[test]
    fn test_round_trip_keeps_comments() {
        let store = store();
        assert_eq!(store.to_file_contents(), STORE);
    }

    #[test]
    fn test_add_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("proj");
        fs::create_dir(&project).unwrap();
        let store_path = dir.path().join("projects");

        let mut store = ProjectStore::load(&store_path).unwrap();
        let added = store.add("proj", &project, Some("#2e004c")).unwrap();
        assert!(!added.updated);
        store.save().unwrap();

        let mut reloaded = ProjectStore::load(&store_path).unwrap();
        let entry = reloaded.entries().next().unwrap().clone();
        assert_eq!(entry.name, "proj");
        assert_eq!(entry.path, fs::canonicalize(&project).unwrap());
        assert_eq!(entry.color, "#2e004c");

        let updated = reloaded.add("proj", &project, None).unwrap();
        assert!(updated.updated);
        assert!(hex_to_rgb(&updated.entry.color).is_ok());
    }

    #[test]
    fn test_add_validation() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ProjectStore::empty(dir.path().join("projects"));

        assert!(matches!(
            store.add("has space", dir.path(), None),
            Err(ProjectError::InvalidName(_))
        ));
        assert!(matches!(
            store.add("ok", dir.path(), Some("chartreuse")),
            Err(ProjectError::InvalidColor(_))
        ));
        assert!(matches!(
            store.add("ok", &dir.path().join("missing"), None),
            Err(ProjectError::Io { .. })
        ));

        let file = dir.path().join("file");
        fs::write(&file, "").unwrap();
        assert!(matches!(store.add("ok", &file, None), Err(ProjectError::NotADirectory(_))));
    }

    #[test]
    fn test_short_hex_is_expanded() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ProjectStore::empty(dir.path().join("projects"));

        let added = store.add("short", dir.path(), Some("#a1c")).unwrap();
        assert_eq!(added.entry.color, "#aa11cc");
        let added = store.add("named", dir.path(), Some("cyan")).unwrap();
        assert_eq!(added.entry.color, "cyan");
    }

    #[test]
    fn test_validate_color() {
        for ok in ["red", "black", "#fff", "#2e004c", "#ABCDEF"] {
            assert!(validate_color(ok).is_ok(), "{ok}");
        }
        for bad in ["Red", "#ffff", "2e004c", "#gggggg", ""] {
            assert!(validate_color(bad).is_err(), "{bad}");
        }
    }

    #[test]
    #[traced_test]
    fn test_missing_store_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProjectStore::load(dir.path().join("nope")).unwrap();
        assert_eq!(store.entries().count(), 0);
        assert!(logs_contain("No projects file found"));
    }
}
