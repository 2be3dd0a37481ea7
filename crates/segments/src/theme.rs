//! Built-in themes, keyed by environment class.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::error;

use crate::error::ThemeError;
use crate::glyphs;
use crate::segment::Segment;
use crate::style::{
    ColorValue,
    Style,
};

pub const LOCAL: &str = "Local";
pub const REMOTE: &str = "Remote";

/// A glyph together with the style it is drawn in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Marker {
    pub glyph: String,
    pub style: Style,
}

impl Marker {
    fn new(glyph: &str, style: Style) -> Self {
        Self {
            glyph: glyph.to_string(),
            style,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub name: String,
    pub styles: BTreeMap<Segment, Style>,
    pub snip: Marker,
    pub filler: Marker,
}

fn rgb(r: u8, g: u8, b: u8) -> ColorValue {
    ColorValue::rgb(r, g, b)
}

fn named(name: &str) -> ColorValue {
    ColorValue::named(name)
}

impl Theme {
    /// Look up a built-in theme by key.
    pub fn named(key: &str) -> Result<Self, ThemeError> {
        match key {
            LOCAL => Ok(Self::local()),
            REMOTE => Ok(Self::remote()),
            other => Err(ThemeError::UnknownTheme(other.to_string())),
        }
    }

    /// Like [`Theme::named`], but an unknown key is logged and an empty theme
    /// is returned so rendering can carry on with segment defaults.
    pub fn resolve(key: &str) -> Self {
        Self::named(key).unwrap_or_else(|err| {
            error!(%err, "using an empty theme");
            Self::empty(key)
        })
    }

    pub fn all() -> Vec<Self> {
        vec![Self::local(), Self::remote()]
    }

    pub fn empty(name: &str) -> Self {
        Self {
            name: name.to_string(),
            styles: BTreeMap::new(),
            snip: Marker::new(glyphs::LARGE_SQUARE, Style::new()),
            filler: Marker::new(glyphs::HR, Style::new()),
        }
    }

    /// Style for `segment`, or the unstyled default.
    pub fn style(&self, segment: Segment) -> Style {
        self.styles.get(&segment).cloned().unwrap_or_default()
    }

    pub fn local() -> Self {
        let styles = BTreeMap::from([
            (Segment::Project, Style::new().fg(rgb(29, 135, 165)).bg(rgb(13, 58, 101))),
            (Segment::Ssh, Style::new().fg(named("white")).bg(named("red"))),
            (Segment::User, Style::new().fg(rgb(136, 183, 108))),
            (Segment::Path, Style::new().fg(rgb(93, 159, 222))),
            (Segment::Time, Style::new().fg(rgb(52, 90, 125))),
            (Segment::Pipenv, Style::new().fg(rgb(70, 204, 64)).bg(rgb(36, 135, 75))),
            (Segment::Branch, Style::new().fg(rgb(236, 199, 0))),
            (Segment::Virtual, Style::new().fg(rgb(70, 204, 64)).bg(rgb(25, 94, 52))),
            (Segment::Orb, Style::new().fg(rgb(204, 0, 0)).bg(rgb(66, 12, 5)).bold()),
            (Segment::Poetry, Style::new().fg(rgb(70, 204, 64)).bg(rgb(25, 94, 52))),
            (Segment::Nix, Style::new().fg(named("white"))),
            (Segment::Venv, Style::new().fg(rgb(239, 255, 0)).bg(rgb(90, 95, 2))),
            (Segment::Ddev, Style::new().fg(rgb(208, 127, 255))),
            (Segment::Filler, Style::new().fg(rgb(25, 61, 85))),
            // the prompt marker is never styled, this is informational only
            (Segment::Dollar, Style::new().fg(rgb(239, 41, 41))),
        ]);

        Self {
            name: LOCAL.to_string(),
            styles,
            snip: Marker::new(glyphs::LARGE_DOT, Style::new().fg(named("red"))),
            filler: Marker::new(glyphs::SMALL_DOT, Style::new()),
        }
    }

    pub fn remote() -> Self {
        let styles = BTreeMap::from([
            (Segment::Project, Style::new().fg(rgb(252, 175, 62)).bg(rgb(74, 70, 0))),
            (Segment::User, Style::new().fg(rgb(204, 0, 0)).italic()),
            (Segment::Path, Style::new().fg(rgb(252, 175, 62))),
            (Segment::Ssh, Style::new().fg(rgb(204, 0, 0)).bg(rgb(66, 12, 5))),
            (Segment::Time, Style::new().fg(named("red"))),
            (Segment::Pipenv, Style::new().fg(rgb(70, 204, 64)).bg(rgb(36, 135, 75))),
            (Segment::Branch, Style::new().fg(rgb(252, 175, 62))),
            (Segment::Virtual, Style::new().fg(rgb(70, 204, 64)).bg(rgb(25, 94, 52))),
            (Segment::Orb, Style::new().fg(rgb(204, 0, 0)).bg(rgb(66, 12, 5)).bold()),
            (Segment::Poetry, Style::new().fg(rgb(70, 204, 64)).bg(rgb(25, 94, 52))),
            (Segment::Nix, Style::new().fg(named("white"))),
            (Segment::Venv, Style::new().fg(rgb(239, 255, 0)).bg(rgb(90, 95, 2))),
            (Segment::Filler, Style::new().fg(rgb(65, 65, 65))),
            (Segment::Dollar, Style::new().fg(rgb(204, 0, 0)).bg(rgb(0, 0, 0))),
        ]);

        Self {
            name: REMOTE.to_string(),
            styles,
            snip: Marker::new(glyphs::LARGE_SQUARE, Style::new()),
            filler: Marker::new(glyphs::SMALL_DOT, Style::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::EnvironmentClass;

    #[test]
    fn test_theme_for_environment() {
        assert_eq!(Theme::resolve(EnvironmentClass::Local.theme_key()).name, LOCAL);
        assert_eq!(Theme::resolve(EnvironmentClass::Ssh.theme_key()).name, REMOTE);
        assert_eq!(Theme::resolve(EnvironmentClass::Orb.theme_key()).name, REMOTE);
    }

    #[test]
    fn test_unknown_theme() {
        assert_eq!(
            Theme::named("Solarized"),
            Err(ThemeError::UnknownTheme("Solarized".to_string()))
        );

        let theme = Theme::resolve("Solarized");
        assert!(theme.styles.is_empty());
        assert_eq!(theme.style(Segment::Path), Style::default());
        assert_eq!(theme.snip.glyph, glyphs::LARGE_SQUARE);
        assert_eq!(theme.filler.glyph, glyphs::HR);
    }

    #[test]
    fn test_markers() {
        let local = Theme::local();
        assert_eq!(local.snip.glyph, glyphs::LARGE_DOT);
        assert_eq!(local.snip.style.fg, Some(ColorValue::named("red")));
        assert_eq!(local.filler.glyph, glyphs::SMALL_DOT);
        assert_eq!(Theme::remote().snip.glyph, glyphs::LARGE_SQUARE);
    }

    #[test]
    fn test_path_is_never_bracketed() {
        for theme in Theme::all() {
            assert!(theme.style(Segment::Path).bg.is_none(), "{}", theme.name);
        }
    }

    #[test]
    fn test_serializes_segment_keys() {
        let json = serde_json::to_value(Theme::local()).unwrap();
        assert_eq!(json["name"], "Local");
        assert_eq!(json["styles"]["path"]["fg"], serde_json::json!([93, 159, 222]));
        assert_eq!(json["styles"]["ssh"]["bg"], "red");
        assert_eq!(json["snip"]["glyph"], glyphs::LARGE_DOT);
    }
}
