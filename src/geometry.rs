//! Geometry primitives: points, inclusive axis-aligned boundaries and the
//! distance functions the index prunes with.
//!
//! Coordinates follow screen conventions: the min corner of a [`Boundary`] is
//! its top-left, and y grows downward.

use serde::{Deserialize, Serialize};

use crate::error::{QuadtreeError, Result};

/// A location in the plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Point halfway between `self` and `other`.
    #[inline]
    pub fn midpoint(self, other: Self) -> Self {
        // Halve before adding so corners near f64::MAX do not overflow.
        Self::new(self.x / 2.0 + other.x / 2.0, self.y / 2.0 + other.y / 2.0)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Inclusive axis-aligned rectangle. All four edges belong to the boundary.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoundaryRepr", into = "BoundaryRepr")]
pub struct Boundary {
    top_left: Point,
    bottom_right: Point,
}

impl Boundary {
    /// Creates a boundary from its min (top-left) and max (bottom-right) corners.
    ///
    /// # Errors
    ///
    /// [`QuadtreeError::NonFiniteBoundary`] if a coordinate is NaN or infinite,
    /// [`QuadtreeError::InvertedBoundary`] if `top_left` lies past
    /// `bottom_right` on either axis.
    ///
    /// # Examples
    /// ```
    /// use quadtree_index::{Boundary, Point};
    ///
    /// let b = Boundary::new(Point::new(0.0, 0.0), Point::new(8.0, 8.0)).unwrap();
    /// assert!(b.contains(Point::new(8.0, 8.0)));
    /// assert!(Boundary::new(Point::new(1.0, 0.0), Point::new(0.0, 1.0)).is_err());
    /// ```
    pub fn new(top_left: Point, bottom_right: Point) -> Result<Self> {
        let coords = [top_left.x, top_left.y, bottom_right.x, bottom_right.y];
        if !coords.iter().all(|c| c.is_finite()) {
            return Err(QuadtreeError::NonFiniteBoundary);
        }
        if top_left.x > bottom_right.x || top_left.y > bottom_right.y {
            return Err(QuadtreeError::InvertedBoundary {
                min_x: top_left.x,
                min_y: top_left.y,
                max_x: bottom_right.x,
                max_y: bottom_right.y,
            });
        }
        Ok(Self { top_left, bottom_right })
    }

    /// Creates a boundary from `(x1, y1)`-`(x2, y2)` corner coordinates.
    ///
    /// # Errors
    ///
    /// Same as [`Boundary::new`].
    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self> {
        Self::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    /// Min corner.
    #[inline]
    pub fn top_left(&self) -> Point {
        self.top_left
    }

    /// Max corner.
    #[inline]
    pub fn bottom_right(&self) -> Point {
        self.bottom_right
    }

    /// Extent along x.
    #[inline]
    pub fn width(&self) -> f64 {
        self.bottom_right.x - self.top_left.x
    }

    /// Extent along y.
    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom_right.y - self.top_left.y
    }

    /// Center of the boundary; children of a subdivided node meet here.
    #[inline]
    pub fn midpoint(&self) -> Point {
        self.top_left.midpoint(self.bottom_right)
    }

    /// True iff `point` lies within the boundary, edges included.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.top_left.x
            && point.x <= self.bottom_right.x
            && point.y >= self.top_left.y
            && point.y <= self.bottom_right.y
    }

    /// True iff the two boundaries overlap or touch.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        !(other.top_left.x > self.bottom_right.x
            || other.bottom_right.x < self.top_left.x
            || other.top_left.y > self.bottom_right.y
            || other.bottom_right.y < self.top_left.y)
    }

    /// Shortest Euclidean distance from `point` to any point of the boundary,
    /// zero when the point is inside or on an edge.
    #[inline]
    pub fn distance_to(&self, point: Point) -> f64 {
        let dx = axis_distance(point.x, self.top_left.x, self.bottom_right.x);
        let dy = axis_distance(point.y, self.top_left.y, self.bottom_right.y);
        dx.hypot(dy)
    }

    /// The quarter of this boundary covering `quadrant`. The four quarters
    /// share edges at the midpoint and together cover the whole boundary.
    pub fn quadrant(&self, quadrant: Quadrant) -> Self {
        let mid = self.midpoint();
        let (tl, br) = (self.top_left, self.bottom_right);
        let (top_left, bottom_right) = match quadrant {
            Quadrant::TopLeft => (tl, mid),
            Quadrant::BottomLeft => (Point::new(tl.x, mid.y), Point::new(mid.x, br.y)),
            Quadrant::TopRight => (Point::new(mid.x, tl.y), Point::new(br.x, mid.y)),
            Quadrant::BottomRight => (mid, br),
        };
        // Midpoint of finite corners stays within them, so no validation is needed.
        Self { top_left, bottom_right }
    }
}

/// Unchecked serde shape of a [`Boundary`]; validated on the way in.
#[derive(Clone, Copy, Serialize, Deserialize)]
struct BoundaryRepr {
    top_left: Point,
    bottom_right: Point,
}

impl TryFrom<BoundaryRepr> for Boundary {
    type Error = QuadtreeError;

    fn try_from(repr: BoundaryRepr) -> Result<Self> {
        Self::new(repr.top_left, repr.bottom_right)
    }
}

impl From<Boundary> for BoundaryRepr {
    fn from(boundary: Boundary) -> Self {
        Self { top_left: boundary.top_left, bottom_right: boundary.bottom_right }
    }
}

/// Distance from `coordinate` to the `[min, max]` interval.
#[inline]
fn axis_distance(coordinate: f64, min: f64, max: f64) -> f64 {
    if coordinate < min {
        min - coordinate
    } else if coordinate > max {
        coordinate - max
    } else {
        0.0
    }
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(p1: Point, p2: Point) -> f64 {
    p1.distance(p2)
}

/// Shortest distance from `point` to `boundary`, zero inside. This is the
/// bound nearest-neighbor search prunes subtrees with.
#[inline]
pub fn distance_to_boundary(point: Point, boundary: &Boundary) -> f64 {
    boundary.distance_to(point)
}

/// One of the four children of a subdivided node.
///
/// Declaration order is the canonical child order used by insertion, range
/// search and traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Min x, min y.
    TopLeft,
    /// Min x, max y.
    BottomLeft,
    /// Max x, min y.
    TopRight,
    /// Max x, max y.
    BottomRight,
}

impl Quadrant {
    /// All quadrants in canonical order.
    pub const ALL: [Self; 4] = [Self::TopLeft, Self::BottomLeft, Self::TopRight, Self::BottomRight];

    /// Position of this quadrant in [`Quadrant::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::TopLeft => 0,
            Self::BottomLeft => 1,
            Self::TopRight => 2,
            Self::BottomRight => 3,
        }
    }

    /// Quadrant around `mid` that `point` falls in. Points on a midpoint line
    /// count as right / bottom.
    pub fn of(point: Point, mid: Point) -> Self {
        match (point.x < mid.x, point.y < mid.y) {
            (true, true) => Self::TopLeft,
            (true, false) => Self::BottomLeft,
            (false, true) => Self::TopRight,
            (false, false) => Self::BottomRight,
        }
    }

    /// Neighbour across the horizontal midline.
    #[inline]
    pub const fn flip_vertical(self) -> Self {
        match self {
            Self::TopLeft => Self::BottomLeft,
            Self::BottomLeft => Self::TopLeft,
            Self::TopRight => Self::BottomRight,
            Self::BottomRight => Self::TopRight,
        }
    }

    /// Neighbour across the vertical midline.
    #[inline]
    pub const fn flip_horizontal(self) -> Self {
        match self {
            Self::TopLeft => Self::TopRight,
            Self::BottomLeft => Self::BottomRight,
            Self::TopRight => Self::TopLeft,
            Self::BottomRight => Self::BottomLeft,
        }
    }

    /// Diagonally opposite quadrant.
    #[inline]
    pub const fn opposite(self) -> Self {
        self.flip_vertical().flip_horizontal()
    }

    /// Visiting order for nearest-neighbor search starting from `self`:
    /// itself, the neighbour in the same row, the neighbour in the same
    /// column, the diagonal.
    #[inline]
    pub const fn nearest_order(self) -> [Self; 4] {
        [self, self.flip_horizontal(), self.flip_vertical(), self.opposite()]
    }
}
