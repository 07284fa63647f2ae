//! Plane geometry primitives shared by the routing pipeline: points,
//! axis-aligned bounds, segments and the containment tests the heading
//! classifier and obstacle generation are built on.

use serde::{Deserialize, Serialize};

/// A point in the global scene plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Alias used where a value represents a direction rather than a position.
pub type Vector = Point;

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Multiplies both coordinates by the given factor
    pub fn scale(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Euclidean length of the vector from the origin to this point
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to another point
    pub fn distance_to(self, other: Point) -> f64 {
        self.sub_point(other).length()
    }

    /// Manhattan distance to another point
    pub fn manhattan_distance(self, other: Point) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Scales the point away from `origin` by `factor`
    pub fn scale_from(self, origin: Point, factor: f64) -> Self {
        origin.add_point(self.sub_point(origin).scale(factor))
    }

    /// Rotates the point around `center` by `angle` radians
    pub fn rotate_around(self, center: Point, angle: f64) -> Self {
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        let cos = angle.cos();
        let sin = angle.sin();
        Self {
            x: center.x + dx * cos - dy * sin,
            y: center.y + dx * sin + dy * cos,
        }
    }
}

/// 2-D cross product of two vectors.
pub fn cross(a: Vector, b: Vector) -> f64 {
    a.x * b.y - a.y * b.x
}

/// A rectangular bounding box with minimum and maximum coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Square bounds of half-extent `padding` centered on `point`
    pub fn around_point(point: Point, padding: f64) -> Self {
        Self {
            min_x: point.x - padding,
            min_y: point.y - padding,
            max_x: point.x + padding,
            max_y: point.y + padding,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point {
            x: (self.min_x + self.max_x) / 2.0,
            y: (self.min_y + self.max_y) / 2.0,
        }
    }

    /// Corners in top-left, top-right, bottom-right, bottom-left order
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
        ]
    }

    /// Merge two bounds to create a larger bounds that contains both
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Inclusive containment, boundary points count as inside
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Strict containment, boundary points are outside. The obstacle test of
    /// the router checks segment midpoints against interiors so routes may
    /// run along obstacle edges.
    pub fn interior_contains(&self, point: Point) -> bool {
        point.x > self.min_x && point.x < self.max_x && point.y > self.min_y && point.y < self.max_y
    }

    /// Whether any corner of one bounds lies inside the other
    pub fn overlaps(&self, other: &Self) -> bool {
        self.corners().iter().any(|c| other.contains_point(*c))
            || other.corners().iter().any(|c| self.contains_point(*c))
    }

    /// Grows the bounds by per-side offsets in up, right, down, left order
    pub fn expand(&self, offsets: [f64; 4]) -> Self {
        let [up, right, down, left] = offsets;
        Self {
            min_x: self.min_x - left,
            min_y: self.min_y - up,
            max_x: self.max_x + right,
            max_y: self.max_y + down,
        }
    }
}

/// An ordered pair of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: Point,
    pub end: Point,
}

impl LineSegment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Distance from `point` to the nearest point of the segment
    pub fn distance_to_point(&self, point: Point) -> f64 {
        let d = self.end.sub_point(self.start);
        let len_sq = d.x * d.x + d.y * d.y;
        if len_sq == 0.0 {
            return point.distance_to(self.start);
        }
        let t = ((point.x - self.start.x) * d.x + (point.y - self.start.y) * d.y) / len_sq;
        point.distance_to(self.start.add_point(d.scale(t.clamp(0.0, 1.0))))
    }
}

/// Intersection point of two segments, if they cross.
///
/// Parametric form: `t` scales the first segment's direction `r`, `u` scales
/// the second segment's direction `s`; both must land in `[0, 1]`. Collinear
/// and parallel pairs report no intersection.
pub fn segments_intersect_at(first: LineSegment, second: LineSegment) -> Option<Point> {
    let r = first.end.sub_point(first.start);
    let s = second.end.sub_point(second.start);
    let denominator = cross(r, s);
    if denominator == 0.0 {
        return None;
    }
    let offset = second.start.sub_point(first.start);
    let t = cross(offset, s) / denominator;
    let u = cross(offset, r) / denominator;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(first.start.add_point(r.scale(t)))
    } else {
        None
    }
}

/// Inclusive triangle containment via the same-side sign test.
pub fn triangle_contains(a: Point, b: Point, c: Point, point: Point) -> bool {
    let d1 = cross(point.sub_point(a), b.sub_point(a));
    let d2 = cross(point.sub_point(b), c.sub_point(b));
    let d3 = cross(point.sub_point(c), a.sub_point(c));
    let has_negative = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_positive = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_negative && has_positive)
}
