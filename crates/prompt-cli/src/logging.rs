use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Filter directives, in `EnvFilter` syntax.
pub const LOG_ENV: &str = "PROMPT_LOG";
const DEFAULT_DIRECTIVE: &str = "error";

/// Log to stderr only. Stdout carries the prompt or shell commands to eval.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_err| EnvFilter::new(DEFAULT_DIRECTIVE));
    // a subscriber may already be set when running under a test harness
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
    {
        debug!(%err, "keeping the existing tracing subscriber");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice() {
        init();
        init();
        debug!("still logging");
    }
}
