//! Point quadtree library.
//!
//! This crate contains:
//! - Inclusive axis-aligned rectangle geometry
//! - `QuadTreeNode`, a recursively subdividing point index with range queries
//! - TOML-backed configuration and error types
//!
//! ```
//! use quadtree::{QuadTreeNode, Rect};
//! use glam::Vec2;
//!
//! let mut tree = QuadTreeNode::new(Rect::from_center(0.0, 0.0, 5.0, 5.0));
//! assert!(tree.insert_at(Vec2::new(1.0, 2.0), "a"));
//! assert!(!tree.insert_at(Vec2::new(100.0, 100.0), "far"));
//!
//! let found = tree.query_range(&Rect::from_center(1.0, 1.0, 1.0, 1.0));
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].data, "a");
//! ```

pub mod config;
mod error;
pub mod spatial;

pub use config::QuadTreeConfig;
pub use error::{ConfigError, InsertError};
pub use spatial::{DataNode, Point, QuadTreeNode, Quadrant, Rect, DEFAULT_CAPACITY};
