//! Core prop enums for flexcell.
//!
//! These are the closed vocabularies a node's props draw from. Numeric
//! discriminants are stable so embedders bridging from untyped runtimes can
//! store them compactly.

// =============================================================================
// Flex Direction
// =============================================================================

/// Flex direction for container layout.
///
/// Determines which concrete axis is the main axis: `Row` places children
/// left to right, `Column` top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum FlexDirection {
    #[default]
    Column = 0,
    Row = 1,
}

impl FlexDirection {
    /// Check if this is the row direction.
    pub const fn is_row(&self) -> bool {
        matches!(self, Self::Row)
    }
}

// =============================================================================
// Justify Content
// =============================================================================

/// Justify content (main axis distribution of leftover space).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum JustifyContent {
    #[default]
    FlexStart = 0,
    Center = 1,
    FlexEnd = 2,
    SpaceBetween = 3,
    SpaceAround = 4,
    SpaceEvenly = 5,
}

// =============================================================================
// Align Items / Align Self
// =============================================================================

/// Align items (cross axis alignment of children).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum AlignItems {
    #[default]
    Stretch = 0,
    FlexStart = 1,
    Center = 2,
    FlexEnd = 3,
}

/// Align self (per-child override for align items).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum AlignSelf {
    #[default]
    Auto = 0,
    Stretch = 1,
    FlexStart = 2,
    Center = 3,
    FlexEnd = 4,
}

impl AlignSelf {
    /// Convert to AlignItems, returning None if Auto.
    pub const fn to_align_items(&self) -> Option<AlignItems> {
        match self {
            Self::Auto => None,
            Self::Stretch => Some(AlignItems::Stretch),
            Self::FlexStart => Some(AlignItems::FlexStart),
            Self::Center => Some(AlignItems::Center),
            Self::FlexEnd => Some(AlignItems::FlexEnd),
        }
    }

    /// Resolve against the parent's align-items value.
    pub const fn resolve(&self, parent: AlignItems) -> AlignItems {
        match self.to_align_items() {
            Some(align) => align,
            None => parent,
        }
    }
}

// =============================================================================
// Position
// =============================================================================

/// Positioning scheme for a child.
///
/// Absolute children are excluded from flow sizing and placed from their
/// inset offsets against the parent's content box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Position {
    #[default]
    Relative = 0,
    Absolute = 1,
}

// =============================================================================
// Overflow
// =============================================================================

/// Overflow behavior for container content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Overflow {
    /// Content may paint outside the box; no clipping metadata emitted.
    #[default]
    Visible = 0,
    /// Content is clipped to the box; scroll offsets still apply.
    Hidden = 1,
    /// Content scrolls within the box.
    Scroll = 2,
    /// Scrolls when content exceeds the box, otherwise plain.
    Auto = 3,
}

impl Overflow {
    /// Check if this overflow mode clips content to the box.
    pub const fn clips(&self) -> bool {
        matches!(self, Self::Hidden | Self::Scroll | Self::Auto)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_css_initial_values() {
        assert_eq!(FlexDirection::default(), FlexDirection::Column);
        assert_eq!(JustifyContent::default(), JustifyContent::FlexStart);
        assert_eq!(AlignItems::default(), AlignItems::Stretch);
        assert_eq!(AlignSelf::default(), AlignSelf::Auto);
        assert_eq!(Position::default(), Position::Relative);
        assert_eq!(Overflow::default(), Overflow::Visible);
    }

    #[test]
    fn test_align_self_auto_defers_to_parent() {
        assert_eq!(AlignSelf::Auto.resolve(AlignItems::Center), AlignItems::Center);
        assert_eq!(AlignSelf::FlexEnd.resolve(AlignItems::Center), AlignItems::FlexEnd);
    }

    #[test]
    fn test_overflow_clipping_modes() {
        assert!(!Overflow::Visible.clips());
        assert!(Overflow::Hidden.clips());
        assert!(Overflow::Scroll.clips());
        assert!(Overflow::Auto.clips());
    }
}
