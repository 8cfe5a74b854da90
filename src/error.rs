//! Layout error type.
//!
//! A single error kind covers every validation failure on the layout path:
//! malformed size or spacer props, unexpected node kinds, non-finite or
//! negative numeric props. Layout is pure and deterministic, so there is no
//! retry path and no partial result: a failure anywhere in a subtree is fatal
//! to that subtree and surfaces unchanged to the top-level caller.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, LayoutError>;

// =============================================================================
// Error codes
// =============================================================================

/// Stable machine codes carried by [`LayoutError`].
///
/// The code identifies the failure family for programmatic handling;
/// the free-text detail is for humans and may change between releases.
pub mod code {
    /// Malformed width/height/min/max size prop.
    pub const SIZE_PROP: &str = "size-prop";
    /// Malformed spacer `size` prop.
    pub const SPACER_PROP: &str = "spacer-prop";
    /// Node kind this engine cannot lay out.
    pub const NODE_KIND: &str = "node-kind";
    /// NaN or infinite numeric prop.
    pub const NON_FINITE: &str = "non-finite";
    /// Malformed scroll offset prop.
    pub const SCROLL_PROP: &str = "scroll-prop";
    /// Malformed split panel constraint.
    pub const PANEL_PROP: &str = "panel-prop";
    /// Malformed gap/margin/padding spacing prop.
    pub const SPACING_PROP: &str = "spacing-prop";
}

// =============================================================================
// LayoutError
// =============================================================================

/// Invalid layout input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid layout input [{code}]: {detail}")]
pub struct LayoutError {
    /// Stable machine code, one of the [`code`] constants.
    pub code: &'static str,
    /// Human-readable description of the offending input.
    pub detail: String,
}

impl LayoutError {
    /// Create an error with an explicit code.
    pub fn new(code: &'static str, detail: impl Into<String>) -> Self {
        Self {
            code,
            detail: detail.into(),
        }
    }

    /// Malformed width/height/min/max prop.
    pub fn size_prop(detail: impl Into<String>) -> Self {
        Self::new(code::SIZE_PROP, detail)
    }

    /// Malformed spacer `size` prop.
    pub fn spacer_prop(detail: impl Into<String>) -> Self {
        Self::new(code::SPACER_PROP, detail)
    }

    /// Node kind the engine cannot lay out.
    pub fn node_kind(detail: impl Into<String>) -> Self {
        Self::new(code::NODE_KIND, detail)
    }

    /// NaN or infinite numeric prop.
    pub fn non_finite(detail: impl Into<String>) -> Self {
        Self::new(code::NON_FINITE, detail)
    }

    /// Malformed scroll offset prop.
    pub fn scroll_prop(detail: impl Into<String>) -> Self {
        Self::new(code::SCROLL_PROP, detail)
    }

    /// Malformed split panel constraint.
    pub fn panel_prop(detail: impl Into<String>) -> Self {
        Self::new(code::PANEL_PROP, detail)
    }

    /// Malformed gap/margin/padding prop.
    pub fn spacing_prop(detail: impl Into<String>) -> Self {
        Self::new(code::SPACING_PROP, detail)
    }
}
