mod project;
mod ps1;
mod themes;

use std::io::{
    self,
    Write,
};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{
    Parser,
    Subcommand,
};
use eyre::Result;
use segments::ProjectStore;
use segments::projects::DEFAULT_STORE;

use self::project::ProjectSubcommand;
use self::ps1::Ps1Args;
use self::themes::ThemesArgs;
use crate::config::Config;

/// Themed shell prompt and project teleporter
#[derive(Debug, Parser)]
#[command(name = "prompt", version)]
pub struct Cli {
    /// Config file [default: <config dir>/prompt/config.toml]
    #[arg(long, global = true, env = "PROMPT_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Projects file [default: ~/.prompt-projects]
    #[arg(long, global = true, env = "PROMPT_PROJECTS", value_name = "PATH")]
    pub projects_file: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, PartialEq, Subcommand)]
pub enum Command {
    /// Print the prompt line
    Ps1(Ps1Args),
    /// Show the built-in themes
    Themes(ThemesArgs),
    /// Manage and jump to projects
    #[command(subcommand)]
    Project(ProjectSubcommand),
}

impl Cli {
    pub fn execute(self) -> Result<ExitCode> {
        let config = Config::load(self.config.as_deref());
        let projects_file = self
            .projects_file
            .or_else(|| config.projects_file())
            .or_else(ProjectStore::default_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE));

        let mut stdout = io::stdout().lock();
        let code = match self.command {
            Command::Ps1(args) => args.execute(&config, &projects_file, &mut stdout)?,
            Command::Themes(args) => args.execute(&mut stdout)?,
            Command::Project(subcommand) => subcommand.execute(&projects_file, &mut stdout)?,
        };
        stdout.flush()?;
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("prompt").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["project", "list", "--projects-file", "/tmp/p"]);
        assert_eq!(cli.projects_file.as_deref(), Some(Path::new("/tmp/p")));
        assert_eq!(cli.command, Command::Project(ProjectSubcommand::List));
    }

    #[test]
    fn test_project_add_args() {
        let cli = parse(&["project", "add", "web", ".", "-c", "#112233"]);
        assert_eq!(
            cli.command,
            Command::Project(ProjectSubcommand::Add {
                name: "web".to_string(),
                project_root: PathBuf::from("."),
                color: Some("#112233".to_string()),
            })
        );
    }

    #[test]
    fn test_cd_name_is_optional() {
        let cli = parse(&["project", "cd"]);
        assert_eq!(cli.command, Command::Project(ProjectSubcommand::Cd { name: None }));
    }

    #[test]
    fn test_themes_json_flag() {
        let cli = parse(&["themes", "--json"]);
        assert_eq!(cli.command, Command::Themes(ThemesArgs { json: true }));
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
