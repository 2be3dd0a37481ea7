//! Assembles a full prompt line from three segment groups.

use tracing::trace;

use crate::ledger::Ledger;
use crate::renderer::SegmentRenderer;
use crate::segment::Segment;

/// Which segments go where on the line.
///
/// `left` is drawn first and usually ends with the filler, `right` follows
/// the filler, and `last` closes the line (normally the prompt marker).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub left: Vec<Segment>,
    pub right: Vec<Segment>,
    pub last: Vec<Segment>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            left: vec![
                Segment::Invisible,
                Segment::Orb,
                Segment::Poetry,
                Segment::Pipenv,
                Segment::Project,
                Segment::Branch,
                Segment::User,
                Segment::Venv,
                Segment::Nix,
                Segment::Ssh,
                Segment::Path,
                Segment::Filler,
            ],
            right: vec![Segment::Time],
            last: vec![Segment::Dollar],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedLine {
    pub line: String,
    pub ledger: Ledger,
}

/// Render `layout` into a single line.
///
/// The right group is rendered before the left one even though it is shown
/// after it: the filler sits in the left group and needs the right group's
/// width in the ledger already.
pub fn compose(mut renderer: SegmentRenderer<'_>, layout: &Layout) -> ComposedLine {
    let right = render_group(&mut renderer, &layout.right);
    let left = render_group(&mut renderer, &layout.left);
    let last = render_group(&mut renderer, &layout.last);

    let ledger = renderer.into_ledger();
    trace!(entries = ?ledger.entries(), consumed = ledger.consumed(), "composed prompt");
    ComposedLine {
        line: format!("{left} {right}{last}"),
        ledger,
    }
}

/// Render each segment and join the non-empty ones with a space. Zero-width
/// output is attached without one.
fn render_group(renderer: &mut SegmentRenderer<'_>, segments: &[Segment]) -> String {
    let mut group = String::new();
    let mut has_visible = false;
    for &segment in segments {
        let rendered = renderer.render_segment(segment);
        if rendered.is_empty() {
            continue;
        }
        if segment.is_zero_width() {
            group.push_str(&rendered);
            continue;
        }
        if has_visible {
            group.push(' ');
        }
        group.push_str(&rendered);
        has_visible = true;
    }
    group
}
