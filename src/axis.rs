//! Main/cross axis abstraction.
//!
//! One stack algorithm serves both row and column containers by reading and
//! writing all geometry through an [`Axis`]. The two variants are the only
//! instances; code never owns per-node axis state.

use crate::geometry::Size;
use crate::types::FlexDirection;

/// Maps abstract main/cross extents onto concrete width/height and x/y.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Main axis horizontal: main = width/x, cross = height/y.
    Row,
    /// Main axis vertical: main = height/y, cross = width/x.
    Column,
}

impl Axis {
    /// Axis implied by a container's flex direction.
    pub const fn from_direction(direction: FlexDirection) -> Self {
        match direction {
            FlexDirection::Row => Self::Row,
            FlexDirection::Column => Self::Column,
        }
    }

    /// Check if the main axis is horizontal.
    pub const fn is_row(&self) -> bool {
        matches!(self, Self::Row)
    }

    /// The perpendicular axis.
    pub const fn crossed(&self) -> Axis {
        match self {
            Self::Row => Self::Column,
            Self::Column => Self::Row,
        }
    }

    /// Main-axis extent of a size.
    #[inline]
    pub const fn main_of(&self, size: Size) -> i32 {
        match self {
            Self::Row => size.width,
            Self::Column => size.height,
        }
    }

    /// Cross-axis extent of a size.
    #[inline]
    pub const fn cross_of(&self, size: Size) -> i32 {
        match self {
            Self::Row => size.height,
            Self::Column => size.width,
        }
    }

    /// Build a size from main/cross extents.
    #[inline]
    pub const fn size(&self, main: i32, cross: i32) -> Size {
        match self {
            Self::Row => Size {
                width: main,
                height: cross,
            },
            Self::Column => Size {
                width: cross,
                height: main,
            },
        }
    }

    /// Build an (x, y) point from main/cross coordinates.
    #[inline]
    pub const fn point(&self, main: i32, cross: i32) -> (i32, i32) {
        match self {
            Self::Row => (main, cross),
            Self::Column => (cross, main),
        }
    }
}
