//! Spatial indexing.
//!
//! Point quadtree over inclusive axis-aligned rectangles.

mod quadtree;
mod rect;

pub use quadtree::{DataNode, Iter, QuadTreeNode, DEFAULT_CAPACITY};
pub use rect::{Point, Quadrant, Rect};
