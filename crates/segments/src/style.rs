use crossterm::style::{
    Attribute,
    Color,
    ContentStyle,
};
use serde::Serialize;

use crate::color::hex_to_rgb;
use crate::error::ColorError;

/// A color as written in a theme or the project store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ColorValue {
    Named(String),
    Rgb(u8, u8, u8),
}

impl ColorValue {
    pub fn named(name: &str) -> Self {
        Self::Named(name.to_string())
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(r, g, b)
    }

    /// `#rrggbb` becomes an RGB triple, anything else is kept as a name and
    /// checked when it is painted. Blank input means "terminal default".
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        if value.starts_with('#') {
            if let Ok((r, g, b)) = hex_to_rgb(value) {
                return Some(Self::Rgb(r, g, b));
            }
        }
        Some(Self::Named(value.to_string()))
    }

    pub fn to_color(&self) -> Result<Color, ColorError> {
        match self {
            Self::Rgb(r, g, b) => Ok(Color::Rgb { r: *r, g: *g, b: *b }),
            Self::Named(name) => named_color(name),
        }
    }
}

fn named_color(name: &str) -> Result<Color, ColorError> {
    let color = match name.to_ascii_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::DarkRed,
        "green" => Color::DarkGreen,
        "yellow" => Color::DarkYellow,
        "blue" => Color::DarkBlue,
        "magenta" => Color::DarkMagenta,
        "cyan" => Color::DarkCyan,
        "white" => Color::Grey,
        "bright_black" | "grey" | "gray" => Color::DarkGrey,
        "bright_red" => Color::Red,
        "bright_green" => Color::Green,
        "bright_yellow" => Color::Yellow,
        "bright_blue" => Color::Blue,
        "bright_magenta" => Color::Magenta,
        "bright_cyan" => Color::Cyan,
        "bright_white" => Color::White,
        "reset" => Color::Reset,
        other => match other.parse::<u8>() {
            Ok(ansi) => Color::AnsiValue(ansi),
            Err(_) => return Err(ColorError::UnknownName(name.to_string())),
        },
    };
    Ok(color)
}

/// Visual attributes for one segment. Every field is optional: no color means
/// the terminal default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fg: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg: Option<ColorValue>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fg(mut self, color: ColorValue) -> Self {
        self.fg = Some(color);
        self
    }

    pub fn bg(mut self, color: ColorValue) -> Self {
        self.bg = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    fn content_style(&self) -> Result<ContentStyle, ColorError> {
        let mut content = ContentStyle::new();
        content.foreground_color = self.fg.as_ref().map(ColorValue::to_color).transpose()?;
        content.background_color = self.bg.as_ref().map(ColorValue::to_color).transpose()?;
        if self.bold {
            content.attributes.set(Attribute::Bold);
        }
        if self.italic {
            content.attributes.set(Attribute::Italic);
        }
        if self.underline {
            content.attributes.set(Attribute::Underlined);
        }
        Ok(content)
    }

    /// The same style with the foreground replaced by the background, used
    /// for brackets that should disappear into their own background.
    fn hidden(&self) -> Self {
        Self {
            fg: self.bg.clone(),
            ..self.clone()
        }
    }
}

/// Wrap `text` in the escape codes for `style`.
pub fn paint(text: &str, style: &Style) -> Result<String, ColorError> {
    if text.is_empty() {
        return Ok(String::new());
    }
    Ok(style.content_style()?.apply(text).to_string())
}

/// How a chunk is wrapped in `[` `]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brackets {
    None,
    /// Brackets painted in the background color so only the padding shows.
    Hidden,
    Visible,
}

/// Outcome of styling a chunk. `Plain` is the fallback used when the style
/// could not be applied; it still carries displayable text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Styled {
    Full(String),
    Plain(String),
}

impl Styled {
    pub fn is_plain(&self) -> bool {
        matches!(self, Self::Plain(_))
    }

    pub fn into_string(self) -> String {
        match self {
            Self::Full(s) | Self::Plain(s) => s,
        }
    }
}

/// Painted opening and closing brackets for `style`, empty for
/// [`Brackets::None`].
pub fn brackets(style: &Style, kind: Brackets) -> Result<(String, String), ColorError> {
    let bracket_style = match kind {
        Brackets::None => return Ok((String::new(), String::new())),
        Brackets::Hidden => style.hidden(),
        Brackets::Visible => style.clone(),
    };
    Ok((paint("[", &bracket_style)?, paint("]", &bracket_style)?))
}

/// Paint each part in its own style and wrap the result in brackets drawn
/// with `style`. Any color that cannot be applied turns the whole result
/// into [`Styled::Plain`].
pub fn style_parts(parts: &[(&str, &Style)], style: &Style, kind: Brackets) -> Styled {
    let painted = parts
        .iter()
        .map(|(text, part_style)| paint(text, part_style))
        .collect::<Result<String, _>>()
        .and_then(|body| {
            let (open, close) = brackets(style, kind)?;
            Ok(format!("{open}{body}{close}"))
        });

    match painted {
        Ok(text) => Styled::Full(text),
        Err(err) => {
            tracing::debug!(%err, "falling back to plain rendering");
            let body: String = parts.iter().map(|(text, _)| *text).collect();
            match kind {
                Brackets::None => Styled::Plain(body),
                Brackets::Hidden | Brackets::Visible => Styled::Plain(format!("[{body}]")),
            }
        },
    }
}

pub fn style_chunk(chunk: &str, style: &Style, kind: Brackets) -> Styled {
    style_parts(&[(chunk, style)], style, kind)
}
