use std::sync::LazyLock;

use regex::Regex;

static ESCAPES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)").unwrap());

/// `text` as the terminal shows it: SGR and OSC sequences removed.
pub fn visible(text: &str) -> String {
    ESCAPES.replace_all(text, "").into_owned()
}

#[test]
fn test_visible() {
    assert_eq!(visible("\x1b[38;5;1m⏺\x1b[39m"), "⏺");
    assert_eq!(visible("\x1b]8;;file:///tmp\x1b\\~/tmp\x1b]8;;\x1b\\"), "~/tmp");
    assert_eq!(visible("\x1b]1;web\x07web"), "web");
}
