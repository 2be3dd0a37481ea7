//! Turns segments into styled text while keeping the width ledger.

use std::path::Path;

use tracing::debug;

use crate::context::PromptContext;
use crate::ddev::DDEV_DIR;
use crate::glyphs::{
    self,
    width,
};
use crate::host::{
    EntryKind,
    Host,
    find_upwards,
};
use crate::ledger::Ledger;
use crate::projects::{
    ProjectLookup,
    ProjectMatch,
};
use crate::segment::Segment;
use crate::snip::{
    DEFAULT_POSITION,
    snip,
};
use crate::style::{
    Brackets,
    ColorValue,
    Style,
    Styled,
    style_chunk,
    style_parts,
};
use crate::terminal;
use crate::theme::Theme;

/// Prompt marker. It starts a new line so the command is typed at column 0.
pub const DOLLAR: &str = "\n❖ ";
const TIME_FORMAT: &str = "%H:%M";
const BRACKET_WIDTH: usize = 2;

/// A glyph drawn right after a segment's text, e.g. a status dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
    pub glyph: String,
    pub style: Style,
}

impl Decoration {
    pub fn new(glyph: &str, style: Style) -> Self {
        Self {
            glyph: glyph.to_string(),
            style,
        }
    }

    /// A dot that is green when `ok` and red otherwise.
    pub fn status_dot(ok: bool) -> Self {
        let color = if ok { "green" } else { "red" };
        Self::new(glyphs::LARGE_DOT, Style::new().fg(ColorValue::named(color)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub suppress_brackets: bool,
    /// Joins exactly two chunks; drawn in the theme's snip style.
    pub split_marker: Option<String>,
    pub decoration: Option<Decoration>,
}

impl RenderOptions {
    pub fn no_brackets() -> Self {
        Self {
            suppress_brackets: true,
            ..Self::default()
        }
    }

    pub fn split(marker: &str) -> Self {
        Self {
            split_marker: Some(marker.to_string()),
            ..Self::default()
        }
    }

    pub fn decorated(decoration: Decoration) -> Self {
        Self {
            decoration: Some(decoration),
            ..Self::default()
        }
    }
}

/// Renders segments for one prompt line.
///
/// Every measured segment appends its unstyled width to the ledger, which is
/// what the path and filler segments size themselves from. A renderer is
/// used for exactly one line.
pub struct SegmentRenderer<'a> {
    ctx: &'a PromptContext,
    theme: Theme,
    projects: &'a dyn ProjectLookup,
    host: &'a dyn Host,
    ledger: Ledger,
    snip_position: f64,
    project: Option<ProjectMatch>,
}

impl<'a> SegmentRenderer<'a> {
    pub fn new(ctx: &'a PromptContext, theme: Theme, projects: &'a dyn ProjectLookup, host: &'a dyn Host) -> Self {
        Self {
            ctx,
            theme,
            projects,
            host,
            ledger: Ledger::new(),
            snip_position: DEFAULT_POSITION,
            project: None,
        }
    }

    pub fn with_snip_position(mut self, position: f64) -> Self {
        self.snip_position = position;
        self
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn into_ledger(self) -> Ledger {
        self.ledger
    }

    /// Style `chunks` as `segment` and record their width.
    ///
    /// Segments with a background are wrapped in brackets drawn in that
    /// background unless `suppress_brackets` is set. The prompt marker and the
    /// invisible segment pass through untouched and unmeasured. The project
    /// segment ignores `chunks` and draws the current project's name, or
    /// nothing (and records nothing) outside a project.
    pub fn render(&mut self, segment: Segment, chunks: &[&str], options: &RenderOptions) -> String {
        if !segment.is_measured() {
            return chunks.concat();
        }
        if segment == Segment::Project {
            return self.render_project(options);
        }

        let style = self.theme.style(segment);
        let kind = bracket_kind(&style, options.suppress_brackets);

        let styled = match (&options.split_marker, chunks) {
            (Some(marker), [head, tail]) => {
                let snip_style = self.snip_style(&style);
                self.ledger
                    .record(width(head) + width(marker) + width(tail) + bracket_width(kind));
                style_parts(
                    &[(*head, &style), (marker.as_str(), &snip_style), (*tail, &style)],
                    &style,
                    kind,
                )
            },
            _ => {
                let body = chunks.concat();
                self.ledger.record(width(&body) + bracket_width(kind));
                style_chunk(&body, &style, kind)
            },
        };
        let mut rendered = log_plain(segment, styled);

        if let Some(decoration) = &options.decoration {
            // the decoration hugs the text, so it does not add a separator
            self.ledger.record(width(&decoration.glyph).saturating_sub(1));
            rendered.push_str(&log_plain(
                segment,
                style_chunk(&decoration.glyph, &decoration.style, Brackets::None),
            ));
        }

        rendered
    }

    /// Render `segment` from the current environment.
    pub fn render_segment(&mut self, segment: Segment) -> String {
        let ctx = self.ctx;
        match segment {
            Segment::Project => self.render(segment, &[], &RenderOptions::default()),
            Segment::Branch => self.branch(),
            Segment::User => {
                let user = format!("{}@{}", ctx.user, ctx.hostname);
                self.render(segment, &[user.as_str()], &RenderOptions::default())
            },
            Segment::Time => {
                let now = ctx.now.format(TIME_FORMAT).to_string();
                self.render(segment, &[now.as_str()], &RenderOptions::default())
            },
            Segment::Path => self.path(),
            Segment::Filler => self.filler(),
            Segment::Dollar => self.render(segment, &[DOLLAR], &RenderOptions::no_brackets()),
            Segment::Venv => match (ctx.var("VIRTUAL_ENV"), ctx.var("POETRY_ACTIVE")) {
                (Some(venv), None) => {
                    let name = Path::new(venv)
                        .file_name()
                        .map_or_else(|| venv.to_string(), |n| n.to_string_lossy().into_owned());
                    self.render(segment, &[name.as_str()], &RenderOptions::default())
                },
                _ => String::new(),
            },
            Segment::Poetry => self.flag(segment, "POETRY_ACTIVE", "Poetry"),
            Segment::Pipenv => match ctx.var("PIPENV_ACTIVE") {
                Some(value) => self.render(segment, &[value], &RenderOptions::default()),
                None => String::new(),
            },
            Segment::Nix => self.flag(segment, "NIX_STORE", "Nix"),
            Segment::Ssh => self.flag(segment, "SSH_CLIENT", "ssh"),
            Segment::Orb if ctx.is_orb() => self.render(segment, &[glyphs::LARGE_DOT], &RenderOptions::default()),
            Segment::Orb => String::new(),
            Segment::Virtual => match ctx.container() {
                Some(name) => self.render(segment, &[name.as_str()], &RenderOptions::default()),
                None => String::new(),
            },
            Segment::Ddev => self.ddev(),
            Segment::Invisible => {
                let project = self.project();
                let escapes = terminal::tab_sequences(ctx, &project, self.host);
                self.render(segment, &[escapes.as_str()], &RenderOptions::default())
            },
        }
    }

    fn flag(&mut self, segment: Segment, var: &str, label: &str) -> String {
        if self.ctx.var(var).is_some() {
            self.render(segment, &[label], &RenderOptions::default())
        } else {
            String::new()
        }
    }

    fn project(&mut self) -> ProjectMatch {
        self.project
            .get_or_insert_with(|| self.projects.lookup(&self.ctx.cwd))
            .clone()
    }

    fn render_project(&mut self, options: &RenderOptions) -> String {
        let project = self.project();
        if !project.is_match() {
            return String::new();
        }

        let style = Style {
            fg: ColorValue::parse(&project.foreground),
            bg: ColorValue::parse(&project.background),
            ..self.theme.style(Segment::Project)
        };
        let kind = bracket_kind(&style, options.suppress_brackets);
        self.ledger.record(width(&project.name) + bracket_width(kind));
        log_plain(Segment::Project, style_chunk(&project.name, &style, kind))
    }

    /// The marker sits on the segment's background unless the theme gives it
    /// one of its own.
    fn snip_style(&self, segment_style: &Style) -> Style {
        let mut style = self.theme.snip.style.clone();
        if style.bg.is_none() {
            style.bg.clone_from(&segment_style.bg);
        }
        style
    }

    fn overhead(&self, segment: Segment) -> usize {
        bracket_width(bracket_kind(&self.theme.style(segment), false))
    }

    /// The working directory, shortened around the snip marker to whatever
    /// width is left and linked to its `file://` URL.
    fn path(&mut self) -> String {
        let display = self.ctx.display_path();
        let marker = self.theme.snip.glyph.clone();
        let budget = self
            .ledger
            .remaining(self.ctx.columns)
            .saturating_sub(width(&marker) + self.overhead(Segment::Path));
        let url = terminal::file_url(&self.ctx.cwd);

        if width(&display) <= budget {
            if width(&display) == 1 {
                // "~" or "/" look odd as links and are never styled
                self.ledger.record(1);
                return display;
            }
            let rendered = self.render(Segment::Path, &[display.as_str()], &RenderOptions::default());
            return terminal::hyperlink(&rendered, &url);
        }

        if budget < width(&marker) {
            debug!(budget, "no room left for the path");
            return String::new();
        }
        let (head, tail) = snip(&display, budget, &marker, self.snip_position);
        let rendered = self.render(Segment::Path, &[head.as_str(), tail.as_str()], &RenderOptions::split(&marker));
        terminal::hyperlink(&rendered, &url)
    }

    fn filler(&mut self) -> String {
        let glyph = self.theme.filler.glyph.clone();
        let available = self
            .ledger
            .remaining(self.ctx.columns)
            .saturating_sub(self.overhead(Segment::Filler));
        let count = (available / width(&glyph).max(1)).saturating_sub(1);
        if count == 0 {
            return String::new();
        }
        self.render(Segment::Filler, &[glyph.repeat(count).as_str()], &RenderOptions::default())
    }

    fn branch(&mut self) -> String {
        let Some(status) = self.host.git_status(&self.ctx.cwd) else {
            return String::new();
        };
        self.render(
            Segment::Branch,
            &[status.branch.as_str()],
            &RenderOptions::decorated(Decoration::status_dot(status.clean)),
        )
    }

    fn ddev(&mut self) -> String {
        let Some(project_dir) = find_upwards(&self.ctx.cwd, DDEV_DIR, self.ctx.home.as_deref(), EntryKind::Dir)
            .and_then(|ddev| ddev.parent().map(Path::to_path_buf))
        else {
            return String::new();
        };
        match self.host.ddev_status(&project_dir) {
            Some(status) => self.render(
                Segment::Ddev,
                &["DDev"],
                &RenderOptions::decorated(Decoration::status_dot(status.running)),
            ),
            None => String::new(),
        }
    }
}

fn bracket_kind(style: &Style, suppress: bool) -> Brackets {
    if suppress || style.bg.is_none() {
        Brackets::None
    } else {
        Brackets::Hidden
    }
}

fn bracket_width(kind: Brackets) -> usize {
    match kind {
        Brackets::None => 0,
        Brackets::Hidden | Brackets::Visible => BRACKET_WIDTH,
    }
}

fn log_plain(segment: Segment, styled: Styled) -> String {
    if styled.is_plain() {
        debug!(%segment, "segment rendered without styling");
    }
    styled.into_string()
}
