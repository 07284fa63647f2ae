//! Post-processing of a successful search: collapse collinear points and
//! convert the global polyline into the arrow-local update payload.

use crate::element::{ArrowUpdate, BindingUpdates};
use crate::geometry::Point;
use crate::heading::Heading;

/// Removes every middle point whose incoming and outgoing headings agree.
///
/// Starting from the first two points, each subsequent point either replaces
/// the previous one (same heading, still the same segment) or is appended (a
/// bend). Idempotent.
pub fn simplify(points: &[Point]) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }
    let mut result: Vec<Point> = points[..2].to_vec();
    for &point in &points[2..] {
        let before = result[result.len() - 2];
        let last = result[result.len() - 1];
        let incoming = Heading::from_vector(last.sub_point(before));
        let outgoing = Heading::from_vector(point.sub_point(last));
        if incoming == outgoing {
            *result.last_mut().expect("result holds two points") = point;
        } else {
            result.push(point);
        }
    }
    result
}

/// Translates a global polyline into arrow-local points anchored at the
/// first point and measures the local extent.
pub fn normalized_arrow_update(global: &[Point]) -> ArrowUpdate {
    let origin = global.first().copied().unwrap_or_default();
    let points: Vec<Point> = global.iter().map(|p| p.sub_point(origin)).collect();
    let (width, height) = size_from_points(&points);
    ArrowUpdate {
        points,
        x: origin.x,
        y: origin.y,
        width,
        height,
        angle: 0.0,
        roundness: None,
        bindings: BindingUpdates::default(),
    }
}

fn size_from_points(points: &[Point]) -> (f64, f64) {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for point in points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }
    if points.is_empty() {
        (0.0, 0.0)
    } else {
        (max_x - min_x, max_y - min_y)
    }
}
