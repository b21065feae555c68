//! User settings: tree layout and color theme.
//!
//! Two independent values persisted under their own keys and reloaded at
//! startup. Unknown persisted values fall back to the default rather than
//! failing the load.

use std::fmt;

/// How the tree view arranges its groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeLayout {
    /// Groups stacked top to bottom.
    #[default]
    Vertical,
    /// Groups laid out left to right.
    Horizontal,
    /// Groups arranged around the central node.
    Radial,
}

impl TreeLayout {
    /// Parse a stored layout value. Returns `None` for unknown values so
    /// the caller can fall back (with a log line) to the default.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "vertical" => Some(Self::Vertical),
            "horizontal" => Some(Self::Horizontal),
            "radial" => Some(Self::Radial),
            _ => None,
        }
    }

    /// The stored string value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
            Self::Radial => "radial",
        }
    }
}

impl fmt::Display for TreeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Color theme applied to the views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorTheme {
    /// The stock palette.
    #[default]
    Default,
    /// Warm sunset tones.
    Warm,
    /// Cool blue tones.
    Ocean,
    /// Muted green tones.
    Forest,
}

impl ColorTheme {
    /// Parse a stored theme value. Returns `None` for unknown values.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "default" => Some(Self::Default),
            "warm" => Some(Self::Warm),
            "ocean" => Some(Self::Ocean),
            "forest" => Some(Self::Forest),
            _ => None,
        }
    }

    /// The stored string value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Warm => "warm",
            Self::Ocean => "ocean",
            Self::Forest => "forest",
        }
    }
}

impl fmt::Display for ColorTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The pair of persisted settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settings {
    /// Tree view layout.
    pub layout: TreeLayout,
    /// Color theme.
    pub theme: ColorTheme,
}
