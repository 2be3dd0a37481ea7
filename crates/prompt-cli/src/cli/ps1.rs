use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use clap::Args;
use eyre::Result;
use segments::{
    ProjectStore,
    PromptContext,
    SegmentRenderer,
    SystemHost,
    Theme,
    compose,
};
use tracing::debug;

use crate::config::Config;

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct Ps1Args {
    /// Terminal width [default: detected]
    #[arg(long, env = "PROMPT_COLUMNS")]
    pub columns: Option<usize>,
}

impl Ps1Args {
    /// Print the line without a trailing newline. Problems while rendering
    /// degrade the output instead of failing.
    pub fn execute(&self, config: &Config, projects_file: &Path, out: &mut impl Write) -> Result<ExitCode> {
        let ctx = PromptContext::from_process(self.columns.or(config.columns));
        let environment = ctx.environment_class();
        let theme = Theme::resolve(environment.theme_key());
        debug!(?environment, theme = %theme.name, columns = ctx.columns, "drawing prompt");

        let store = ProjectStore::load_or_empty(projects_file);
        let host = SystemHost;
        let renderer = SegmentRenderer::new(&ctx, theme, &store, &host).with_snip_position(config.snip_position());
        let composed = compose(renderer, &config.layout());

        write!(out, "{}", composed.line)?;
        Ok(ExitCode::SUCCESS)
    }
}
