//! Point quadtree.
//!
//! Each node owns a region and up to `capacity` points. When a leaf is full,
//! the next insert splits it into four quadrants once; the points already
//! stored stay on the split node and new points are routed into children.
//! Tree shape therefore depends on insertion order and is never rebalanced.

use std::fmt;
use std::num::NonZeroUsize;

use tracing::{debug, error, trace};

use super::rect::{Point, Quadrant, Rect};
use crate::config::QuadTreeConfig;
use crate::error::{ConfigError, InsertError};

/// Points a leaf may hold before it subdivides, unless configured otherwise.
pub const DEFAULT_CAPACITY: NonZeroUsize = NonZeroUsize::new(4).unwrap();

/// A payload tagged with its spatial key.
#[derive(Debug, Clone, PartialEq)]
pub struct DataNode<T> {
    pub point: Point,
    pub data: T,
}

impl<T> DataNode<T> {
    #[inline]
    pub fn new(point: Point, data: T) -> Self {
        Self { point, data }
    }
}

/// One cell of the spatial decomposition. The root node is the tree.
///
/// Children are created all at once and boxed together, so a node either
/// has all four quadrants or none.
pub struct QuadTreeNode<T> {
    boundaries: Rect,
    capacity: NonZeroUsize,
    /// Items stored directly at this node, in insertion order.
    points: Vec<DataNode<T>>,
    /// Quadrants laid out in [`Quadrant::ORDER`].
    children: Option<Box<[QuadTreeNode<T>; 4]>>,
}

impl<T> QuadTreeNode<T> {
    /// Create an empty leaf with [`DEFAULT_CAPACITY`].
    pub fn new(boundaries: Rect) -> Self {
        Self::with_capacity(boundaries, DEFAULT_CAPACITY)
    }

    /// Create an empty leaf that splits once it holds more than `capacity` points.
    pub fn with_capacity(boundaries: Rect, capacity: NonZeroUsize) -> Self {
        Self {
            boundaries,
            capacity,
            points: Vec::with_capacity(capacity.get()),
            children: None,
        }
    }

    /// Create an empty root from a validated configuration.
    pub fn from_config(config: &QuadTreeConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_capacity(config.root_bounds()?, config.capacity()?))
    }

    /// The region this node is responsible for.
    #[inline]
    pub fn boundaries(&self) -> Rect {
        self.boundaries
    }

    #[inline]
    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    /// Items stored directly at this node (not including children).
    #[inline]
    pub fn points(&self) -> &[DataNode<T>] {
        &self.points
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// All four children in [`Quadrant::ORDER`], or `None` for a leaf.
    #[inline]
    pub fn children(&self) -> Option<&[QuadTreeNode<T>; 4]> {
        self.children.as_deref()
    }

    /// The child covering `quadrant`, or `None` for a leaf.
    #[inline]
    pub fn child(&self, quadrant: Quadrant) -> Option<&QuadTreeNode<T>> {
        self.children().map(|children| &children[quadrant.index()])
    }

    /// Insert an item. Returns `false` if it was not stored.
    ///
    /// A point on this node's boundary is accepted.
    pub fn insert(&mut self, data: DataNode<T>) -> bool {
        self.try_insert(data).is_ok()
    }

    /// Shorthand for inserting `data` at `point`.
    pub fn insert_at(&mut self, point: Point, data: T) -> bool {
        self.insert(DataNode::new(point, data))
    }

    /// Insert an item, reporting why it was refused.
    ///
    /// On error the tree is unchanged and the item is dropped.
    pub fn try_insert(&mut self, data: DataNode<T>) -> Result<(), InsertError> {
        let point = data.point;
        match self.place(data) {
            Ok(()) => Ok(()),
            Err(_) if !self.boundaries.contains(point) => {
                debug!("Rejected point ({}, {}) outside {}", point.x, point.y, self.boundaries);
                Err(InsertError::OutOfBounds {
                    point,
                    bounds: self.boundaries,
                })
            }
            Err(_) => Err(InsertError::Unplaced { point }),
        }
    }

    /// Store `data` in this subtree, handing it back if no node accepts it.
    fn place(&mut self, mut data: DataNode<T>) -> Result<(), DataNode<T>> {
        if !self.boundaries.contains(data.point) {
            return Err(data);
        }

        if self.children.is_none() {
            if self.points.len() < self.capacity.get() {
                self.points.push(data);
                return Ok(());
            }
            self.subdivide();
        }

        let Some(children) = self.children.as_deref_mut() else {
            return Err(data);
        };
        for child in children.iter_mut() {
            match child.place(data) {
                Ok(()) => return Ok(()),
                Err(rejected) => data = rejected,
            }
        }

        error!(
            "Quadrants of {} rejected in-bounds point ({}, {})",
            self.boundaries, data.point.x, data.point.y
        );
        debug_assert!(false, "quadrants do not tile {}", self.boundaries);
        Err(data)
    }

    /// Split a leaf into four empty quadrants. Returns `false` if the node
    /// was already internal, in which case nothing changes.
    fn subdivide(&mut self) -> bool {
        if self.children.is_some() {
            return false;
        }

        let children = Quadrant::ORDER
            .map(|quadrant| Self::with_capacity(self.boundaries.quadrant(quadrant), self.capacity));
        self.children = Some(Box::new(children));

        trace!("Subdivided {} holding {} points", self.boundaries, self.points.len());
        true
    }

    /// All items whose point lies in `range`, edges included.
    ///
    /// Results are in pre-order: a node's own points first, then each child
    /// subtree in [`Quadrant::ORDER`].
    pub fn query_range(&self, range: &Rect) -> Vec<&DataNode<T>> {
        let mut results = Vec::new();
        self.query_range_into(range, &mut results);
        results
    }

    /// Like [`query_range`](Self::query_range) but appends to `results`.
    pub fn query_range_into<'a>(&'a self, range: &Rect, results: &mut Vec<&'a DataNode<T>>) {
        if !self.boundaries.intersects(range) {
            return;
        }

        results.extend(self.points.iter().filter(|item| range.contains(item.point)));

        if let Some(children) = self.children() {
            for child in children {
                child.query_range_into(range, results);
            }
        }
    }

    /// Number of items whose point lies in `range`, without collecting them.
    pub fn count_in_range(&self, range: &Rect) -> usize {
        if !self.boundaries.intersects(range) {
            return 0;
        }

        let here = self.points.iter().filter(|item| range.contains(item.point)).count();
        let below: usize = self
            .children()
            .map(|children| children.iter().map(|c| c.count_in_range(range)).sum())
            .unwrap_or(0);
        here + below
    }

    /// Iterate every stored item in the same order as a full-coverage query.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            stack: vec![self],
            current: Default::default(),
        }
    }

    /// Total number of items in this subtree.
    pub fn len(&self) -> usize {
        self.points.len()
            + self
                .children()
                .map(|children| children.iter().map(Self::len).sum())
                .unwrap_or(0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .map(|children| children.iter().map(Self::node_count).sum())
            .unwrap_or(0)
    }

    /// Levels in this subtree. A lone leaf has height 1.
    pub fn height(&self) -> usize {
        1 + self
            .children()
            .and_then(|children| children.iter().map(Self::height).max())
            .unwrap_or(0)
    }
}

impl<T> fmt::Debug for QuadTreeNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuadTreeNode")
            .field("boundaries", &self.boundaries)
            .field("capacity", &self.capacity)
            .field("points", &self.points.len())
            .field("items", &self.len())
            .field("leaf", &self.is_leaf())
            .finish()
    }
}

/// Pre-order iterator over the items of a subtree.
pub struct Iter<'a, T> {
    stack: Vec<&'a QuadTreeNode<T>>,
    current: std::slice::Iter<'a, DataNode<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a DataNode<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.current.next() {
                return Some(item);
            }
            let node = self.stack.pop()?;
            self.current = node.points.iter();
            if let Some(children) = node.children() {
                // Reversed so the first quadrant is popped first.
                self.stack.extend(children.iter().rev());
            }
        }
    }
}

impl<'a, T> IntoIterator for &'a QuadTreeNode<T> {
    type Item = &'a DataNode<T>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
