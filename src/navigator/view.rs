//! What the renderer gets for each visible line.

use serde::Serialize;

use crate::types::Event;

/// Number of distinct depth color classes; depth wraps around.
pub const COLOR_CLASSES: usize = 6;

/// Children state shown in front of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    Leaf,
    Expanded,
    Collapsed,
    /// A `Return` line closing an expanded or collapsed call.
    Closing,
}

impl Indicator {
    pub fn glyph(self) -> &'static str {
        match self {
            Indicator::Leaf => "─ ",
            Indicator::Expanded => "▾ ",
            Indicator::Collapsed => "▸ ",
            Indicator::Closing => "└ ",
        }
    }
}

/// One segment of the tree prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Connector {
    pub glyph: &'static str,
    /// Depth-derived color class in `0..COLOR_CLASSES`.
    pub color: usize,
}

impl Connector {
    pub fn for_level(level: usize) -> Self {
        Self {
            glyph: "│ ",
            color: color_class(level),
        }
    }
}

pub fn color_class(depth: usize) -> usize {
    depth % COLOR_CLASSES
}

/// A rendered-ready line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineView {
    /// Index of the node in the working tree.
    pub index: usize,
    pub depth: usize,
    pub event: Event,
    pub indicator: Indicator,
    /// One connector per enclosing level.
    pub connectors: Vec<Connector>,
    /// Color class of the node's own level.
    pub color: usize,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub selected: bool,
}

impl LineView {
    /// The full prefix (connectors and indicator) as plain text.
    pub fn prefix(&self) -> String {
        let mut prefix: String = self.connectors.iter().map(|c| c.glyph).collect();
        prefix.push_str(self.indicator.glyph());
        prefix
    }
}
