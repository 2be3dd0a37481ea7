//! Escape sequences for hyperlinks and terminal tab titles and colors.
//!
//! Everything here is best effort: the worst outcome of a failure is a tab
//! that keeps its previous title or color.

use std::path::Path;

use url::Url;

use crate::color::{
    adjust_hue,
    hash_to_unit_float,
    hex_to_rgb,
    scale_color,
};
use crate::context::PromptContext;
use crate::host::{
    EntryKind,
    Host,
    find_upwards,
};
use crate::projects::ProjectMatch;

const BEL: &str = "\x07";
const ST: &str = "\x1b\\";
const ITERM_RESET_TAB: &str = "\x1b]6;1;bg;*;default\x07";
/// How far a worktree's tab color may drift from its project color.
const WORKTREE_SQUEEZE: f64 = 0.6;
const KITTY_BASE: &str = "#ffffff";

/// OSC 8: make `text` a link to `url`.
pub fn hyperlink(text: &str, url: &str) -> String {
    format!("\x1b]8;;{url}{ST}{text}\x1b]8;;{ST}")
}

pub fn file_url(path: &Path) -> String {
    Url::from_file_path(path).map_or_else(|()| format!("file://{}", path.display()), String::from)
}

/// OSC 1: set the tab title.
pub fn tab_title(title: &str) -> String {
    format!("\x1b]1;{title}{BEL}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalKind {
    Kitty,
    Iterm2,
    Other,
}

impl TerminalKind {
    pub fn detect(ctx: &PromptContext) -> Self {
        if ctx.var("KITTY_PID").is_some() {
            Self::Kitty
        } else if ctx.var("ITERM_SESSION_ID").is_some() {
            Self::Iterm2
        } else {
            Self::Other
        }
    }
}

/// Title and color the current tab after `project`.
///
/// iTerm2 is driven with escapes, which are returned. Kitty is driven through
/// `kitten @`, so nothing is returned for it.
pub fn tab_sequences(ctx: &PromptContext, project: &ProjectMatch, host: &dyn Host) -> String {
    match TerminalKind::detect(ctx) {
        TerminalKind::Iterm2 => iterm2_tab(ctx, project),
        TerminalKind::Kitty => {
            for args in kitty_commands(ctx, project) {
                host.kitten(&args);
            }
            String::new()
        },
        TerminalKind::Other => String::new(),
    }
}

fn iterm2_channels((r, g, b): (u8, u8, u8)) -> String {
    [("red", r), ("green", g), ("blue", b)]
        .iter()
        .map(|(channel, value)| format!("\x1b]6;1;bg;{channel};brightness;{value}{BEL}"))
        .collect()
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}

/// In a worktree checkout the `.git` entry is a file and the bare repository
/// lives next to the checkouts in `.bare`. Tabs of one worktree share a hue
/// shifted from the project color, seeded by the checkout's root.
pub fn iterm2_tab(ctx: &PromptContext, project: &ProjectMatch) -> String {
    if !project.is_match() {
        return format!("{}{ITERM_RESET_TAB}", tab_title(&basename(&ctx.cwd)));
    }

    let worktree_root = find_upwards(&ctx.cwd, ".git", None, EntryKind::File)
        .and_then(|git_file| git_file.parent().map(Path::to_path_buf))
        .filter(|_| !ctx.cwd.join(".bare").exists());
    let rgb = hex_to_rgb(&project.background).ok();

    match worktree_root {
        Some(root) => {
            let title = tab_title(&format!("{}\n{}", project.name, basename(&ctx.cwd)));
            let shift = hash_to_unit_float(&root.display().to_string()) * (1.0 - WORKTREE_SQUEEZE);
            let colors = rgb.map(|rgb| iterm2_channels(adjust_hue(rgb, shift)));
            format!("{title}{}", colors.unwrap_or_default())
        },
        None => format!(
            "{}{}",
            tab_title(&project.name),
            rgb.map(iterm2_channels).unwrap_or_default()
        ),
    }
}

/// Arguments for `kitten @ set-tab-title` and `kitten @ set-tab-color`.
pub fn kitty_commands(ctx: &PromptContext, project: &ProjectMatch) -> [Vec<String>; 2] {
    let (title, colors) = if project.is_match() {
        (project.name.clone(), [
            ("active_fg", scale_color(&project.foreground, 1.0)),
            ("active_bg", scale_color(&project.background, 1.0)),
            ("inactive_fg", scale_color(&project.foreground, 0.5)),
            ("inactive_bg", scale_color(&project.background, 0.5)),
        ])
    } else {
        let parts: Vec<_> = ctx.cwd.components().map(|c| c.as_os_str().to_string_lossy()).collect();
        let title = parts[parts.len().saturating_sub(2)..].join("/");
        (title, [
            ("active_fg", KITTY_BASE.to_string()),
            ("active_bg", scale_color(KITTY_BASE, 0.3)),
            ("inactive_fg", scale_color(KITTY_BASE, 0.4)),
            ("inactive_bg", scale_color(KITTY_BASE, 0.15)),
        ])
    };

    let title_cmd = vec!["set-tab-title".to_string(), title];
    let mut color_cmd = vec!["set-tab-color".to_string()];
    color_cmd.extend(colors.iter().map(|(key, value)| format!("{key}={value}")));
    [title_cmd, color_cmd]
}
