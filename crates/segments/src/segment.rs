use serde::Serialize;
use strum::{
    Display,
    EnumIter,
    EnumString,
};

/// One logical, independently themed piece of the prompt line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter, Serialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    /// Name of the registered project the current directory belongs to.
    #[strum(to_string = "project", serialize = "sink")]
    Project,
    Branch,
    User,
    Time,
    Path,
    Filler,
    /// Trailing prompt marker.
    Dollar,
    Venv,
    Poetry,
    Pipenv,
    Nix,
    Ssh,
    Orb,
    Virtual,
    Ddev,
    /// Zero-width terminal escapes (tab title and color).
    Invisible,
}

impl Segment {
    /// Whether the segment takes part in width accounting. The prompt marker
    /// sits after the cursor line and the invisible segment has no width.
    pub fn is_measured(self) -> bool {
        !matches!(self, Self::Dollar | Self::Invisible)
    }

    /// Zero-width output is joined to its neighbours without a separator.
    pub fn is_zero_width(self) -> bool {
        matches!(self, Self::Invisible)
    }
}
