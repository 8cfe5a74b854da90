//! Specialized containers resolved outside the stack algorithm.
//!
//! Collections virtualize their rows and never produce child rects; splits
//! divide one axis by weighted constraints; overlays stack children in
//! paint order or float them over the tree.

pub(crate) mod collection;
pub(crate) mod overlay;
pub(crate) mod split;
