//! Axis-aligned rectangle and quadrant geometry.

use std::fmt;

use glam::Vec2;

/// A 2D point key. Coordinates are `f32`.
pub type Point = Vec2;

/// One of the four child regions produced by subdivision.
///
/// North is `+y`, east is `+x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    NorthWest,
    NorthEast,
    SouthEast,
    SouthWest,
}

impl Quadrant {
    /// Order used for both insertion attempts and query traversal.
    /// Child arrays are laid out in this order too.
    pub const ORDER: [Quadrant; 4] = [
        Quadrant::NorthWest,
        Quadrant::NorthEast,
        Quadrant::SouthEast,
        Quadrant::SouthWest,
    ];

    /// Position of this quadrant within [`Quadrant::ORDER`].
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Quadrant::NorthWest => 0,
            Quadrant::NorthEast => 1,
            Quadrant::SouthEast => 2,
            Quadrant::SouthWest => 3,
        }
    }

    /// Which side of the parent center this quadrant lies on, per axis.
    #[inline]
    pub const fn offset_sign(self) -> (f32, f32) {
        match self {
            Quadrant::NorthWest => (-1.0, 1.0),
            Quadrant::NorthEast => (1.0, 1.0),
            Quadrant::SouthEast => (1.0, -1.0),
            Quadrant::SouthWest => (-1.0, -1.0),
        }
    }
}

/// Axis-aligned rectangle.
///
/// Stored as its two corners so that quadrants share their parent's edges
/// bit for bit. All containment and overlap tests are inclusive: a point on
/// an edge belongs to every rectangle sharing that edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    min: Vec2,
    max: Vec2,
}

impl Rect {
    /// Create a rectangle from its center and half extent.
    ///
    /// Negative half extents are flipped to their absolute value.
    #[inline]
    pub fn new(center: Vec2, half_extent: Vec2) -> Self {
        let half_extent = half_extent.abs();
        Self {
            min: center - half_extent,
            max: center + half_extent,
        }
    }

    /// Create a rectangle from scalar center and half-width/half-height.
    #[inline]
    pub fn from_center(cx: f32, cy: f32, half_width: f32, half_height: f32) -> Self {
        Self::new(Vec2::new(cx, cy), Vec2::new(half_width, half_height))
    }

    /// Create the smallest rectangle spanning two opposite corners.
    #[inline]
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn half_extent(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    /// Lower-left corner.
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.min
    }

    /// Upper-right corner.
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.max
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Check if the point lies inside or on the edge of this rectangle.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Check if `other` lies entirely within this rectangle.
    #[inline]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }

    /// Check if two rectangles overlap. Touching edges count as overlap.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        !(other.max.x < self.min.x
            || other.min.x > self.max.x
            || other.max.y < self.min.y
            || other.min.y > self.max.y)
    }

    /// The child rectangle covering one quadrant of this rectangle.
    ///
    /// Children take their outer edges from this rectangle's corners and
    /// their inner edges from its center, so the four quadrants tile the
    /// parent exactly and only share their inner edges.
    pub fn quadrant(&self, quadrant: Quadrant) -> Rect {
        let center = self.center();
        let (sx, sy) = quadrant.offset_sign();
        let (min_x, max_x) = if sx < 0.0 {
            (self.min.x, center.x)
        } else {
            (center.x, self.max.x)
        };
        let (min_y, max_y) = if sy < 0.0 {
            (self.min.y, center.y)
        } else {
            (center.y, self.max.y)
        };
        Rect {
            min: Vec2::new(min_x, min_y),
            max: Vec2::new(max_x, max_y),
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[({}, {})..({}, {})]",
            self.min.x, self.min.y, self.max.x, self.max.y
        )
    }
}
