//! Editor Configuration
//!
//! Host differences are captured once, here, as a policy value; the
//! algorithms only ever read the resulting settings.

use serde::{Deserialize, Serialize};

/// What an otherwise empty block holds so it stays focusable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaceholderStyle {
    /// A trailing `<br>`
    LineBreak,
    /// A text node holding U+200B
    ZeroWidthSpace,
    /// Leave empty blocks empty
    None,
}

/// Which side wins for an element point sitting between two blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundaryBias {
    /// End of the preceding block
    Leading,
    /// Beginning of the following block
    Trailing,
}

/// Host engines with known selection conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostProfile {
    Gecko,
    WebKit,
    Trident,
}

/// Editor configuration options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Empty-block placeholder
    pub placeholder: PlaceholderStyle,

    /// Tie-break for points between blocks (list items, cells, paragraphs)
    pub boundary_bias: BoundaryBias,

    /// Tag used for synthesized blocks
    pub paragraph_tag: String,
}

impl EditorConfig {
    /// Settings matching a host engine's conventions
    pub fn for_host(host: HostProfile) -> Self {
        match host {
            HostProfile::Gecko => Self {
                placeholder: PlaceholderStyle::LineBreak,
                boundary_bias: BoundaryBias::Leading,
                ..Self::default()
            },
            HostProfile::WebKit => Self {
                placeholder: PlaceholderStyle::LineBreak,
                boundary_bias: BoundaryBias::Trailing,
                ..Self::default()
            },
            HostProfile::Trident => Self {
                placeholder: PlaceholderStyle::None,
                boundary_bias: BoundaryBias::Trailing,
                ..Self::default()
            },
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            placeholder: PlaceholderStyle::LineBreak,
            boundary_bias: BoundaryBias::Trailing,
            paragraph_tag: "p".to_string(),
        }
    }
}
