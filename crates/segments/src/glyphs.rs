//! Marker glyphs used for path truncation, filler and status decorations.

use unicode_width::UnicodeWidthStr;

pub const UNICODE_ELLIPSIS: &str = "…";
pub const ASCII_ELLIPSIS: &str = "...";
pub const BAR: &str = "|";
pub const BARS: &str = "|||";
pub const LARGE_SQUARE: &str = "▉";
pub const SMALL_SQUARE: &str = "▮";
pub const UPPER_LEFT_SQUARE: &str = "▘";
pub const LARGE_DOT: &str = "⏺";
pub const MEDIUM_DOT: &str = "•";
pub const SMALL_DOT: &str = "·";
pub const THREE_SQUARES: &str = "▮▮▮";
pub const THREE_DOTS: &str = "●●●";
pub const TRIPLE_BAR: &str = "⦀";
pub const EX: &str = "╳";
pub const DIAGONAL: &str = "⧄";
pub const HR: &str = "─";

/// Every glyph with a short name, in display order.
pub const ALL: &[(&str, &str)] = &[
    ("unicode_ellipsis", UNICODE_ELLIPSIS),
    ("ascii_ellipsis", ASCII_ELLIPSIS),
    ("bar", BAR),
    ("bars", BARS),
    ("large_square", LARGE_SQUARE),
    ("small_square", SMALL_SQUARE),
    ("upper_left_square", UPPER_LEFT_SQUARE),
    ("large_dot", LARGE_DOT),
    ("medium_dot", MEDIUM_DOT),
    ("small_dot", SMALL_DOT),
    ("three_squares", THREE_SQUARES),
    ("three_dots", THREE_DOTS),
    ("triple_bar", TRIPLE_BAR),
    ("ex", EX),
    ("diagonal", DIAGONAL),
    ("hr", HR),
];

/// Display width of `text` in terminal columns. Wide (CJK) characters take
/// two columns, combining marks none.
pub fn width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}
