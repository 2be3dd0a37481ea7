//! Shortening a path to a fixed width around a marker glyph.

use unicode_width::UnicodeWidthChar;

use crate::glyphs::width;

/// Where the marker sits in a shortened path, as a fraction of its length.
/// Closer to the front so the leaf directories stay visible.
pub const DEFAULT_POSITION: f64 = 0.25;

/// Split `text` into a head and tail that, with `marker` between them, fit
/// in `max_len` terminal columns.
///
/// Returns `(text, "")` when `text` already fits. The marker is placed at
/// column `round(max_len * position)` and pulled left when it would overhang
/// the end. Halves are cut on character boundaries, so the result is exactly
/// `max_len` wide unless a wide character straddles a cut, in which case it
/// is left out. When `max_len` is smaller than the marker both halves are
/// empty.
///
/// ```
/// use segments::snip::snip;
///
/// assert_eq!(snip("~/src/rust/project", 10, "…", 0.25), ("~/s".to_string(), "roject".to_string()));
/// assert_eq!(snip("~/src", 10, "…", 0.25), ("~/src".to_string(), String::new()));
/// ```
pub fn snip(text: &str, max_len: usize, marker: &str, position: f64) -> (String, String) {
    if width(text) <= max_len {
        return (text.to_string(), String::new());
    }

    let marker_len = width(marker);
    let wanted = (max_len as f64 * position.clamp(0.0, 1.0)).round() as usize;
    let split = wanted.min(max_len.saturating_sub(marker_len));
    let tail_len = max_len.saturating_sub(split + marker_len);

    let char_count = text.chars().count();
    let head_chars = chars_within(text.chars(), split);
    let tail_chars = chars_within(text.chars().rev(), tail_len);

    let head = text.chars().take(head_chars).collect();
    let tail = text.chars().skip(char_count - tail_chars).collect();
    (head, tail)
}

/// How many leading characters of `chars` fit in `columns`.
fn chars_within(chars: impl Iterator<Item = char>, columns: usize) -> usize {
    let mut used = 0;
    chars
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= columns
        })
        .count()
}
