//! Headings are the four axis directions an arrow endpoint can face. The
//! classifier in this module decides which way a point on a shape's outline
//! points outward, which in turn decides where the route may leave or enter.

use std::str::FromStr;

use crate::element::{Element, ElementType};
use crate::geometry::{triangle_contains, Bounds, Point, Vector};

/// Factor by which the classifier triangles are scaled out from the shape
/// center so points just outside the outline still classify.
const SEARCH_CONE_MULTIPLIER: f64 = 2.0;

/// One of the four outward axis directions, y growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    Up,
    Right,
    Down,
    Left,
}

impl Heading {
    /// Component-wise negation
    pub fn reverse(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// Unit vector of the heading: UP is (0, -1)
    pub fn to_vector(self) -> Vector {
        match self {
            Self::Up => Vector::new(0.0, -1.0),
            Self::Right => Vector::new(1.0, 0.0),
            Self::Down => Vector::new(0.0, 1.0),
            Self::Left => Vector::new(-1.0, 0.0),
        }
    }

    /// Classifies a vector by its dominant axis; ties go to the x axis
    pub fn from_vector(vector: Vector) -> Self {
        if vector.x.abs() >= vector.y.abs() {
            if vector.x >= 0.0 {
                Self::Right
            } else {
                Self::Left
            }
        } else if vector.y > 0.0 {
            Self::Down
        } else {
            Self::Up
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Right | Self::Left)
    }
}

impl FromStr for Heading {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "right" => Ok(Self::Right),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            _ => Err("Invalid heading"),
        }
    }
}

/// Outward direction from the element's center through `point`.
///
/// `aabb` is the element's (already outward-offset) rotated bounding box; the
/// four classifier triangles are anchored at its center and scaled out so
/// boundary points resolve in up, right, down, left order.
pub fn heading_for_point_from_element(element: &Element, aabb: &Bounds, point: Point) -> Heading {
    let mid = aabb.center();

    if element.element_type == ElementType::Diamond {
        // Outside the axis-aligned extent on exactly one side the answer is
        // immediate; corner regions fall through to the triangle fan.
        let out_left = point.x < element.x;
        let out_right = point.x > element.x + element.width;
        let out_up = point.y < element.y;
        let out_down = point.y > element.y + element.height;
        match (out_left, out_right, out_up, out_down) {
            (true, false, false, false) => return Heading::Left,
            (false, true, false, false) => return Heading::Right,
            (false, false, true, false) => return Heading::Up,
            (false, false, false, true) => return Heading::Down,
            _ => {}
        }

        let tip = |x: f64, y: f64| {
            Point::new(x, y)
                .scale_from(mid, SEARCH_CONE_MULTIPLIER)
                .rotate_around(mid, element.angle)
        };
        let top = tip(element.x + element.width / 2.0, element.y);
        let right = tip(element.x + element.width, element.y + element.height / 2.0);
        let bottom = tip(element.x + element.width / 2.0, element.y + element.height);
        let left = tip(element.x, element.y + element.height / 2.0);

        if triangle_contains(top, right, mid, point) {
            heading_for_diamond_edge(top, right)
        } else if triangle_contains(right, bottom, mid, point) {
            heading_for_diamond_edge(right, bottom)
        } else if triangle_contains(bottom, left, mid, point) {
            heading_for_diamond_edge(bottom, left)
        } else {
            heading_for_diamond_edge(left, top)
        }
    } else {
        let corner = |p: Point| p.scale_from(mid, SEARCH_CONE_MULTIPLIER);
        let [top_left, top_right, bottom_right, bottom_left] = aabb.corners().map(corner);

        if triangle_contains(top_left, top_right, mid, point) {
            Heading::Up
        } else if triangle_contains(top_right, bottom_right, mid, point) {
            Heading::Right
        } else if triangle_contains(bottom_right, bottom_left, mid, point) {
            Heading::Down
        } else {
            Heading::Left
        }
    }
}

/// Heading faced by the outward side of a diamond edge running `a` to `b`.
/// The edge angle (degrees in [0, 360), y down) selects a quarter-turn
/// sector: [315, 45) maps to UP, [45, 135) to RIGHT, [135, 225) to DOWN,
/// the rest to LEFT.
fn heading_for_diamond_edge(a: Point, b: Point) -> Heading {
    let angle = (b.y - a.y).atan2(b.x - a.x).to_degrees().rem_euclid(360.0);
    if !(45.0..315.0).contains(&angle) {
        Heading::Up
    } else if angle < 135.0 {
        Heading::Right
    } else if angle < 225.0 {
        Heading::Down
    } else {
        Heading::Left
    }
}
