//! Error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::spatial::{Point, Rect};

/// Reasons an item can be refused by [`QuadTreeNode::try_insert`](crate::QuadTreeNode::try_insert).
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InsertError {
    /// The point lies outside the node's boundaries. This is an ordinary
    /// outcome for a root-level insert.
    #[error("Point ({}, {}) lies outside bounds {bounds}", .point.x, .point.y)]
    OutOfBounds { point: Point, bounds: Rect },

    /// Every child rejected a point already known to be inside the parent.
    /// Only reachable if the quadrants fail to tile their parent.
    #[error("No quadrant accepted in-bounds point ({}, {})", .point.x, .point.y)]
    Unplaced { point: Point },
}

/// Errors that can occur while loading or validating a tree configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Node capacity must be at least 1")]
    ZeroCapacity,

    #[error(
        "Root needs a finite center and a finite non-negative half extent, \
         got center ({center_x}, {center_y}) half extent ({half_width}, {half_height})"
    )]
    InvalidRoot {
        center_x: f32,
        center_y: f32,
        half_width: f32,
        half_height: f32,
    },
}
