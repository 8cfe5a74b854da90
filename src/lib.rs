//! # flexcell
//!
//! Flexbox layout resolution engine for terminal UIs.
//!
//! Resolves a props-carrying node tree into absolute integer cell
//! rectangles. Geometry is whole cells end to end: fractional space is
//! settled by largest-remainder distribution, so panes always sum exactly
//! to their container and never drift by a column.
//!
//! ## Architecture
//!
//! Two passes over the tree, both driven through [`driver::LayoutDriver`]
//! callbacks:
//!
//! ```text
//! Node tree → measure (desired sizes, bottom-up)
//!           → layout  (committed rects,  top-down) → LayoutTree
//! ```
//!
//! The measure pass asks every node how big it wants to be within offered
//! bounds; the layout pass resolves flex, percent and wrap constraints and
//! commits absolute rects, forcing each child to its allocation. Leaf
//! content measurement (text width, input height) stays outside the engine
//! behind [`driver::MeasureLeaf`].
//!
//! ## Modules
//!
//! - [`node`] - Node tree, kinds, and ids
//! - [`props`] - Declarative layout props and validation
//! - [`driver`] - Recursion traits and the standard [`driver::TreeWalker`]
//! - [`stack`] - The axis-generic flex algorithm
//! - [`tree`] - Resolved output rects and scroll state
//! - [`cache`] - Size memos and the dirty set for incremental passes

pub mod axis;
pub mod cache;
mod containers;
pub mod driver;
pub mod error;
pub mod flex;
pub mod geometry;
pub mod node;
pub mod numeric;
pub mod props;
pub mod stack;
pub mod tree;
pub mod types;

// Re-export the working surface
pub use axis::Axis;
pub use cache::{DirtySet, LayoutCache};
pub use driver::{LayoutDriver, LayoutHints, MeasureLeaf, TreeWalker};
pub use error::{LayoutError, Result};
pub use geometry::{Rect, Size};
pub use node::{Node, NodeId, NodeKind};
pub use props::{Edges, LayoutProps, PanelConstraint, SizeValue};
pub use stack::{measure_strategy_for, MeasureStrategy};
pub use tree::{LayoutTree, ScrollInfo};
pub use types::{AlignItems, AlignSelf, FlexDirection, JustifyContent, Overflow, Position};
