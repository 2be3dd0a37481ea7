use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A home directory with an empty projects file location and no config.
struct Sandbox {
    home: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            home: tempfile::tempdir().unwrap(),
        }
    }

    fn home(&self) -> PathBuf {
        fs::canonicalize(self.home.path()).unwrap()
    }

    fn projects_file(&self) -> PathBuf {
        self.home().join(".prompt-projects")
    }

    fn dir(&self, name: &str) -> PathBuf {
        let dir = self.home().join(name);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[allow(deprecated)]
    fn prompt(&self, cwd: &Path) -> Command {
        let mut cmd = Command::cargo_bin("prompt").unwrap();
        cmd.env_clear()
            .current_dir(cwd)
            .env("HOME", self.home())
            .env("USER", "tester")
            .env("PROMPT_PROJECTS", self.projects_file())
            .env("PROMPT_CONFIG", self.home().join("absent.toml"))
            .env("PROMPT_COLUMNS", "120");
        cmd
    }
}

#[test]
fn version() {
    let sandbox = Sandbox::new();
    sandbox
        .prompt(&sandbox.home())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn ps1_at_home() {
    let sandbox = Sandbox::new();
    sandbox
        .prompt(&sandbox.home())
        .arg("ps1")
        .assert()
        .success()
        .stdout(predicate::str::contains("~"))
        .stdout(predicate::str::contains("tester@"))
        .stdout(predicate::str::contains("·"))
        .stdout(predicate::str::ends_with("\n❖ "));
}

#[test]
fn ps1_in_project() {
    let sandbox = Sandbox::new();
    let web = sandbox.dir("web");
    fs::write(
        sandbox.projects_file(),
        format!("# projects\nweb\t{}\t#112233\n", web.display()),
    )
    .unwrap();

    sandbox
        .prompt(&web)
        .arg("ps1")
        .assert()
        .success()
        .stdout(predicate::str::contains("web"))
        .stdout(predicate::str::contains("48;2;17;34;51"));
}

#[test]
fn ps1_with_narrow_terminal_and_custom_layout() {
    let sandbox = Sandbox::new();
    let deep = sandbox.dir("a/rather/deep/directory/tree/for/the/path/segment");
    let config = sandbox.home().join("config.toml");
    fs::write(&config, "left = [\"path\", \"filler\"]\nright = []\n").unwrap();

    sandbox
        .prompt(&deep)
        .env("PROMPT_CONFIG", &config)
        .env("PROMPT_COLUMNS", "30")
        .arg("ps1")
        .assert()
        .success()
        .stdout(predicate::str::contains("⏺"))
        .stdout(predicate::str::contains("segment"))
        .stdout(predicate::str::contains("tester@").not());
}

#[test]
fn project_lifecycle() {
    let sandbox = Sandbox::new();
    let web = sandbox.dir("web");
    let home = sandbox.home();

    sandbox
        .prompt(&home)
        .args(["project", "add", "web"])
        .arg(&web)
        .args(["--color", "#112233"])
        .assert()
        .success()
        .stdout("");
    let stored = fs::read_to_string(sandbox.projects_file()).unwrap();
    assert_eq!(stored, format!("web\t{}\t#112233\n", web.display()));

    sandbox
        .prompt(&home)
        .args(["project", "add", "web"])
        .arg(&web)
        .args(["-c", "green"])
        .assert()
        .success()
        .stdout("New color: green\n");

    sandbox
        .prompt(&home)
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("web"))
        .stdout(predicate::str::contains("~/web"));

    sandbox
        .prompt(&home)
        .args(["project", "cd", "WE"])
        .assert()
        .success()
        .stdout(format!("cd {}\n", web.display()));

    sandbox
        .prompt(&home)
        .args(["project", "remove", "web"])
        .assert()
        .success();
    assert_eq!(fs::read_to_string(sandbox.projects_file()).unwrap(), "");

    sandbox
        .prompt(&home)
        .args(["project", "remove", "web"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No project named: web"));
}

#[test]
fn project_cd_to_root_of_current_project() {
    let sandbox = Sandbox::new();
    let web = sandbox.dir("web");
    let src = sandbox.dir("web/src");
    fs::write(sandbox.projects_file(), format!("web\t{}\tred\n", web.display())).unwrap();

    sandbox
        .prompt(&src)
        .args(["project", "cd"])
        .assert()
        .success()
        .stdout(format!("cd {}\n", web.display()));

    // at the root already: list the projects instead
    sandbox
        .prompt(&web)
        .args(["project", "cd"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("printf \""));
}

#[test]
fn project_cd_without_match() {
    let sandbox = Sandbox::new();
    let web = sandbox.dir("web");
    fs::write(sandbox.projects_file(), format!("web\t{}\tred\n", web.display())).unwrap();

    sandbox
        .prompt(&sandbox.home())
        .args(["project", "cd", "api"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("printf \"\\n"))
        .stdout(predicate::str::contains("Error:"))
        .stdout(predicate::str::contains("No project match for: api"));
}

#[test]
fn project_cd_ambiguous() {
    let sandbox = Sandbox::new();
    let web = sandbox.dir("web");
    let website = sandbox.dir("website");
    let backend = sandbox.dir("backend");
    fs::write(
        sandbox.projects_file(),
        format!(
            "web\t{}\tred\nbackend\t{}\tblue\nwebsite\t{}\t#112233\n",
            web.display(),
            backend.display(),
            website.display()
        ),
    )
    .unwrap();

    sandbox
        .prompt(&sandbox.home())
        .args(["project", "cd", "we"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("printf \""))
        .stdout(predicate::str::contains("web"))
        .stdout(predicate::str::contains("website"))
        .stdout(predicate::str::contains("backend").not())
        .stdout(predicate::str::contains("cd ").not());
}

#[test]
fn project_add_rejects_bad_input() {
    let sandbox = Sandbox::new();
    let web = sandbox.dir("web");

    sandbox
        .prompt(&sandbox.home())
        .args(["project", "add", "web"])
        .arg(&web)
        .args(["-c", "chartreuse"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is not a named color"));

    sandbox
        .prompt(&sandbox.home())
        .args(["project", "add", "web"])
        .arg(sandbox.home().join("missing"))
        .assert()
        .code(1);

    assert!(!sandbox.projects_file().exists());
}

#[test]
fn themes_json() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .prompt(&sandbox.home())
        .args(["themes", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let themes: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let names: Vec<_> = themes
        .as_array()
        .unwrap()
        .iter()
        .map(|theme| theme["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Local", "Remote"]);
}
