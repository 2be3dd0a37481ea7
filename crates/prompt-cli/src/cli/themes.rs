use std::io::Write;
use std::process::ExitCode;

use clap::Args;
use crossterm::style::Stylize;
use eyre::Result;
use segments::color::rgb_to_hex;
use segments::glyphs;
use segments::style::{
    Brackets,
    style_chunk,
};
use segments::{
    ColorValue,
    Style,
    Theme,
};

const NAME_WIDTH: usize = 10;
const GLYPH_NAME_WIDTH: usize = 18;

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct ThemesArgs {
    /// Dump the themes as JSON
    #[arg(long)]
    pub json: bool,
}

impl ThemesArgs {
    pub fn execute(&self, out: &mut impl Write) -> Result<ExitCode> {
        let themes = Theme::all();
        if self.json {
            serde_json::to_writer_pretty(&mut *out, &themes)?;
            writeln!(out)?;
            return Ok(ExitCode::SUCCESS);
        }

        for theme in &themes {
            writeln!(out, "{}", theme.name.as_str().bold())?;
            for (segment, style) in &theme.styles {
                let name = format!("{:<NAME_WIDTH$}", segment.to_string());
                let sample = style_chunk(&name, style, Brackets::None).into_string();
                writeln!(out, "  {sample} {}", describe(style))?;
            }
            for (label, marker) in [("snip", &theme.snip), ("filler", &theme.filler)] {
                let glyph = style_chunk(&marker.glyph, &marker.style, Brackets::Visible).into_string();
                writeln!(out, "  {label:<NAME_WIDTH$} {glyph} {}", describe(&marker.style))?;
            }
            writeln!(out)?;
        }

        writeln!(out, "{}", "Glyphs".bold())?;
        for (name, glyph) in glyphs::ALL {
            writeln!(out, "  {name:<GLYPH_NAME_WIDTH$} {glyph}")?;
        }
        Ok(ExitCode::SUCCESS)
    }
}

fn color_text(color: &ColorValue) -> String {
    match color {
        ColorValue::Named(name) => name.clone(),
        ColorValue::Rgb(r, g, b) => rgb_to_hex((*r, *g, *b)),
    }
}

/// `fg=#1d87a5 bg=blue bold`
fn describe(style: &Style) -> String {
    let mut parts = Vec::new();
    if let Some(fg) = &style.fg {
        parts.push(format!("fg={}", color_text(fg)));
    }
    if let Some(bg) = &style.bg {
        parts.push(format!("bg={}", color_text(bg)));
    }
    for (set, attribute) in [(style.bold, "bold"), (style.italic, "italic"), (style.underline, "underline")] {
        if set {
            parts.push(attribute.to_string());
        }
    }
    parts.join(" ")
}
