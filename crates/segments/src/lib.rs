//! Segment rendering engine for a single-line shell prompt.
//!
//! A prompt line is built from [`Segment`]s. Each segment is rendered by a
//! [`SegmentRenderer`] which records the unstyled width of everything it emits
//! in a [`Ledger`], so that the path can be truncated and the filler can pad
//! the line out to the terminal width. [`compose`] drives the renderer in the
//! order the ledger needs.

pub mod color;
pub mod composer;
pub mod context;
pub mod ddev;
pub mod error;
pub mod git;
pub mod glyphs;
pub mod host;
pub mod ledger;
pub mod projects;
pub mod renderer;
pub mod segment;
pub mod snip;
pub mod style;
pub mod terminal;
#[cfg(test)]
mod test_utils;
pub mod theme;

pub use composer::{
    ComposedLine,
    Layout,
    compose,
};
pub use context::{
    EnvironmentClass,
    PromptContext,
};
pub use error::{
    ColorError,
    ProjectError,
    ThemeError,
};
pub use host::{
    Host,
    SystemHost,
};
pub use ledger::Ledger;
pub use projects::{
    ProjectEntry,
    ProjectLookup,
    ProjectMatch,
    ProjectStore,
};
pub use renderer::{
    Decoration,
    RenderOptions,
    SegmentRenderer,
};
pub use segment::Segment;
pub use style::{
    ColorValue,
    Style,
    Styled,
};
pub use theme::Theme;
