//! Layout props: the declarative inputs a node carries.
//!
//! Props arrive from an external schema layer; this engine still re-checks
//! every numeric and percent-string value, since a malformed size silently
//! corrupts the whole solve. All checks live here so the algorithm code can
//! assume clean inputs.

use std::str::FromStr;

use crate::axis::Axis;
use crate::error::{LayoutError, Result};
use crate::numeric::max_or;
use crate::types::{AlignItems, AlignSelf, FlexDirection, JustifyContent, Overflow, Position};

// =============================================================================
// SizeValue
// =============================================================================

/// A declarative size: auto, absolute cells, or percent of the parent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SizeValue {
    /// Size from content (or uncapped, for max constraints).
    #[default]
    Auto,
    /// Absolute size in cells.
    Cells(i32),
    /// Percent of the parent's corresponding extent, 0-100.
    Percent(f32),
}

impl SizeValue {
    /// Check for Auto.
    pub const fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Check for a percent size.
    pub const fn is_percent(&self) -> bool {
        matches!(self, Self::Percent(_))
    }

    /// The raw percent value, if this is a percent size.
    pub const fn percent(&self) -> Option<f32> {
        match self {
            Self::Percent(p) => Some(*p),
            _ => None,
        }
    }

    /// Resolve to cells against a parent extent. Auto resolves to None.
    ///
    /// Percent values floor, so "33%" of 100 is 33 and never 34.
    pub fn resolve(&self, parent: i32) -> Option<i32> {
        match self {
            Self::Auto => None,
            Self::Cells(n) => Some((*n).max(0)),
            Self::Percent(p) => Some(((parent.max(0) as f32 * p / 100.0).floor() as i32).max(0)),
        }
    }

    /// Resolve with a fallback for Auto.
    pub fn resolve_or(&self, parent: i32, fallback: i32) -> i32 {
        self.resolve(parent).unwrap_or(fallback)
    }

    /// Resolve as a max constraint: Auto or a non-positive result means
    /// "uncapped" and substitutes `fallback`.
    pub fn resolve_max(&self, parent: i32, fallback: i32) -> i32 {
        let raw = match self {
            Self::Auto => f32::INFINITY,
            Self::Cells(n) => *n as f32,
            Self::Percent(p) => parent.max(0) as f32 * p / 100.0,
        };
        max_or(raw, fallback)
    }

    /// Numeric validity check. `what` names the prop for the error detail.
    pub fn validate(&self, what: &str) -> Result<()> {
        match self {
            Self::Auto => Ok(()),
            Self::Cells(n) => {
                if *n < 0 {
                    Err(LayoutError::size_prop(format!(
                        "{what} must be non-negative, got {n}"
                    )))
                } else {
                    Ok(())
                }
            }
            Self::Percent(p) => {
                if !p.is_finite() {
                    Err(LayoutError::non_finite(format!("{what} percent is {p}")))
                } else if *p < 0.0 {
                    Err(LayoutError::size_prop(format!(
                        "{what} percent must be non-negative, got {p}"
                    )))
                } else {
                    Ok(())
                }
            }
        }
    }
}

impl FromStr for SizeValue {
    type Err = LayoutError;

    /// Parse `"auto"`, `"12"`, or `"50%"`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }
        if let Some(pct) = s.strip_suffix('%') {
            let p: f32 = pct.trim().parse().map_err(|_| {
                LayoutError::size_prop(format!("unparseable percent size {s:?}"))
            })?;
            let value = Self::Percent(p);
            value.validate("size")?;
            return Ok(value);
        }
        let n: i32 = s
            .parse()
            .map_err(|_| LayoutError::size_prop(format!("unparseable size {s:?}")))?;
        let value = Self::Cells(n);
        value.validate("size")?;
        Ok(value)
    }
}

// =============================================================================
// Edges
// =============================================================================

/// Per-side spacing in cells (margin or padding).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Edges {
    /// The same amount on every side.
    pub const fn all(n: i32) -> Self {
        Self {
            top: n,
            right: n,
            bottom: n,
            left: n,
        }
    }

    /// Vertical amount on top/bottom, horizontal on left/right.
    pub const fn vh(vertical: i32, horizontal: i32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Combined left + right.
    #[inline]
    pub const fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// Combined top + bottom.
    #[inline]
    pub const fn vertical(&self) -> i32 {
        self.top + self.bottom
    }

    /// Leading edge along an axis (left for row, top for column).
    #[inline]
    pub const fn main_leading(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Row => self.left,
            Axis::Column => self.top,
        }
    }

    /// Trailing edge along an axis.
    #[inline]
    pub const fn main_trailing(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Row => self.right,
            Axis::Column => self.bottom,
        }
    }

    /// Leading edge across an axis.
    #[inline]
    pub const fn cross_leading(&self, axis: Axis) -> i32 {
        self.main_leading(axis.crossed())
    }

    /// Trailing edge across an axis.
    #[inline]
    pub const fn cross_trailing(&self, axis: Axis) -> i32 {
        self.main_trailing(axis.crossed())
    }

    /// Combined extent along an axis.
    #[inline]
    pub const fn main_sum(&self, axis: Axis) -> i32 {
        self.main_leading(axis) + self.main_trailing(axis)
    }

    /// Combined extent across an axis.
    #[inline]
    pub const fn cross_sum(&self, axis: Axis) -> i32 {
        self.main_sum(axis.crossed())
    }

    fn validate(&self, what: &str) -> Result<()> {
        for (side, v) in [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ] {
            if v < 0 {
                return Err(LayoutError::spacing_prop(format!(
                    "{what}.{side} must be non-negative, got {v}"
                )));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Panel constraints
// =============================================================================

/// Percent-weighted constraint for one split panel.
///
/// All three fields are percentages of the divisible extent, 0-100. An unset
/// `size` marks the panel for remainder completion.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanelConstraint {
    pub size: Option<f32>,
    pub min_size: Option<f32>,
    pub max_size: Option<f32>,
}

impl PanelConstraint {
    /// A panel asking for a fixed percent share.
    pub const fn percent(size: f32) -> Self {
        Self {
            size: Some(size),
            min_size: None,
            max_size: None,
        }
    }

    fn validate(&self, index: usize) -> Result<()> {
        for (name, field) in [
            ("size", self.size),
            ("minSize", self.min_size),
            ("maxSize", self.max_size),
        ] {
            if let Some(p) = field {
                if !p.is_finite() {
                    return Err(LayoutError::non_finite(format!(
                        "panel {index} {name} is {p}"
                    )));
                }
                if p < 0.0 {
                    return Err(LayoutError::panel_prop(format!(
                        "panel {index} {name} must be non-negative, got {p}"
                    )));
                }
            }
        }
        Ok(())
    }
}

// =============================================================================
// LayoutProps
// =============================================================================

/// Flat bag of every layout-relevant prop a node can carry.
///
/// Defaults match CSS initial values except `flex_shrink`, which defaults to
/// 0: any positive shrink (or a set basis) opts the container into full
/// basis/grow/shrink resolution.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutProps {
    // =========================================================================
    // CONTAINER
    // =========================================================================
    /// Main axis orientation.
    pub direction: FlexDirection,

    /// Wrap children onto multiple lines when the main axis fills up.
    pub wrap: bool,

    /// Main axis distribution of leftover space.
    pub justify_content: JustifyContent,

    /// Cross axis alignment of children.
    pub align_items: AlignItems,

    /// Cells between adjacent flow children, and between wrap lines.
    pub gap: i32,

    // =========================================================================
    // ITEM
    // =========================================================================
    /// Grow weight for leftover main-axis space (0 = rigid).
    pub flex: f32,

    /// Shrink weight when content overflows (default 0).
    pub flex_shrink: f32,

    /// Starting main-axis size before grow/shrink.
    pub flex_basis: SizeValue,

    /// Per-child override of the parent's align_items.
    pub align_self: AlignSelf,

    // =========================================================================
    // DIMENSIONS
    // =========================================================================
    pub width: SizeValue,
    pub height: SizeValue,
    pub min_width: SizeValue,
    pub max_width: SizeValue,
    pub min_height: SizeValue,
    pub max_height: SizeValue,

    // =========================================================================
    // SPACING
    // =========================================================================
    /// Space outside the node, consumed from the parent's flow.
    pub margin: Edges,

    /// Space inside the node, subtracted before children are placed.
    pub padding: Edges,

    // =========================================================================
    // POSITION
    // =========================================================================
    pub position: Position,

    /// Inset offsets for absolute positioning, in cells from the parent's
    /// content box. Negative offsets are allowed.
    pub top: Option<i32>,
    pub right: Option<i32>,
    pub bottom: Option<i32>,
    pub left: Option<i32>,

    // =========================================================================
    // OVERFLOW & SCROLL
    // =========================================================================
    pub overflow: Overflow,

    /// Requested horizontal scroll offset, clamped to content bounds.
    pub scroll_x: i32,

    /// Requested vertical scroll offset, clamped to content bounds.
    pub scroll_y: i32,

    // =========================================================================
    // KIND-SPECIFIC
    // =========================================================================
    /// Spacer extent along the parent's main axis.
    pub size: Option<i32>,

    /// Collection content width hint for scroll metadata.
    pub content_width: Option<i32>,

    /// Collection content height hint for scroll metadata.
    pub content_height: Option<i32>,

    /// Split panel constraints, index-aligned with the panel children.
    pub panels: Vec<PanelConstraint>,

    /// Cells reserved for each fixed divider between split panels.
    pub divider_size: i32,
}

impl LayoutProps {
    /// Props for a row container.
    pub fn row() -> Self {
        Self {
            direction: FlexDirection::Row,
            ..Self::default()
        }
    }

    /// Props for a column container.
    pub fn column() -> Self {
        Self::default()
    }

    /// The size prop along an axis.
    pub fn main_size(&self, axis: Axis) -> SizeValue {
        if axis.is_row() { self.width } else { self.height }
    }

    /// The size prop across an axis.
    pub fn cross_size(&self, axis: Axis) -> SizeValue {
        if axis.is_row() { self.height } else { self.width }
    }

    /// The min constraint along an axis.
    pub fn main_min(&self, axis: Axis) -> SizeValue {
        if axis.is_row() { self.min_width } else { self.min_height }
    }

    /// The max constraint along an axis.
    pub fn main_max(&self, axis: Axis) -> SizeValue {
        if axis.is_row() { self.max_width } else { self.max_height }
    }

    /// Check if this node is absolutely positioned.
    pub fn is_absolute(&self) -> bool {
        self.position == Position::Absolute
    }

    /// Validate every numeric prop.
    ///
    /// Negative flex weights pass validation; the distribution primitives
    /// clamp them to zero instead.
    pub fn validate(&self) -> Result<()> {
        self.width.validate("width")?;
        self.height.validate("height")?;
        self.min_width.validate("minWidth")?;
        self.max_width.validate("maxWidth")?;
        self.min_height.validate("minHeight")?;
        self.max_height.validate("maxHeight")?;
        self.flex_basis.validate("flexBasis")?;

        if !self.flex.is_finite() {
            return Err(LayoutError::non_finite(format!("flex is {}", self.flex)));
        }
        if !self.flex_shrink.is_finite() {
            return Err(LayoutError::non_finite(format!(
                "flexShrink is {}",
                self.flex_shrink
            )));
        }

        if self.gap < 0 {
            return Err(LayoutError::spacing_prop(format!(
                "gap must be non-negative, got {}",
                self.gap
            )));
        }
        self.margin.validate("margin")?;
        self.padding.validate("padding")?;

        if self.scroll_x < 0 || self.scroll_y < 0 {
            return Err(LayoutError::scroll_prop(format!(
                "scroll offsets must be non-negative, got ({}, {})",
                self.scroll_x, self.scroll_y
            )));
        }
        for (name, hint) in [
            ("contentWidth", self.content_width),
            ("contentHeight", self.content_height),
        ] {
            if let Some(v) = hint {
                if v < 0 {
                    return Err(LayoutError::scroll_prop(format!(
                        "{name} must be non-negative, got {v}"
                    )));
                }
            }
        }

        if let Some(size) = self.size {
            if size < 0 {
                return Err(LayoutError::spacer_prop(format!(
                    "spacer size must be non-negative, got {size}"
                )));
            }
        }

        if self.divider_size < 0 {
            return Err(LayoutError::panel_prop(format!(
                "dividerSize must be non-negative, got {}",
                self.divider_size
            )));
        }
        for (i, panel) in self.panels.iter().enumerate() {
            panel.validate(i)?;
        }

        Ok(())
    }
}
