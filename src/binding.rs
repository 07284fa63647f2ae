//! Binding collaborators: where on a shape's outline an arrow endpoint
//! lands, how far a point is from a shape, and which shape a dragged
//! endpoint is hovering. All rotation-aware; work happens in the element's
//! unrotated local frame and results are rotated back.

use crate::element::{Element, ElementType, FixedPointBinding};
use crate::geometry::{segments_intersect_at, Bounds, LineSegment, Point, Vector};
use crate::scene::SceneView;

/// Axis-aligned bounding box of the rotated element, grown by per-side
/// offsets in up, right, down, left order.
pub fn aabb_for_element(element: &Element, offsets: [f64; 4]) -> Bounds {
    let center = element.center();
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for corner in element.bounds().corners() {
        let rotated = corner.rotate_around(center, element.angle);
        min_x = min_x.min(rotated.x);
        min_y = min_y.min(rotated.y);
        max_x = max_x.max(rotated.x);
        max_y = max_y.max(rotated.y);
    }
    Bounds::new(min_x, min_y, max_x, max_y).expand(offsets)
}

/// Global position of a fixed-point binding on its element.
pub fn global_fixed_point(binding: &FixedPointBinding, element: &Element) -> Point {
    Point::new(
        element.x + element.width * binding.fixed_point.x,
        element.y + element.height * binding.fixed_point.y,
    )
    .rotate_around(element.center(), element.angle)
}

fn to_local(element: &Element, point: Point) -> Point {
    point.rotate_around(element.center(), -element.angle)
}

fn to_global(element: &Element, point: Point) -> Point {
    point.rotate_around(element.center(), element.angle)
}

fn diamond_segments(element: &Element) -> [LineSegment; 4] {
    let center = element.center();
    let top = Point::new(center.x, element.y);
    let right = Point::new(element.x + element.width, center.y);
    let bottom = Point::new(center.x, element.y + element.height);
    let left = Point::new(element.x, center.y);
    [
        LineSegment::new(top, right),
        LineSegment::new(right, bottom),
        LineSegment::new(bottom, left),
        LineSegment::new(left, top),
    ]
}

fn diamond_contains_local(element: &Element, local: Point) -> bool {
    let center = element.center();
    let half_w = element.width / 2.0;
    let half_h = element.height / 2.0;
    if half_w <= 0.0 || half_h <= 0.0 {
        return false;
    }
    (local.x - center.x).abs() / half_w + (local.y - center.y).abs() / half_h <= 1.0
}

/// Whether the (rotated) element's occupiable area contains the point.
pub fn element_contains(element: &Element, point: Point) -> bool {
    let local = to_local(element, point);
    match element.element_type {
        ElementType::Diamond => diamond_contains_local(element, local),
        ElementType::Ellipse => {
            let center = element.center();
            let rx = element.width / 2.0;
            let ry = element.height / 2.0;
            if rx <= 0.0 || ry <= 0.0 {
                return false;
            }
            let dx = (local.x - center.x) / rx;
            let dy = (local.y - center.y) / ry;
            dx * dx + dy * dy <= 1.0
        }
        _ => element.bounds().contains_point(local),
    }
}

/// Distance from `point` to the element's outline. Unlike
/// [`distance_to_element`] this is also meaningful for interior points.
pub fn outline_distance(element: &Element, point: Point) -> f64 {
    let local = to_local(element, point);
    match element.element_type {
        ElementType::Diamond => diamond_segments(element)
            .iter()
            .map(|segment| segment.distance_to_point(local))
            .fold(f64::INFINITY, f64::min),
        ElementType::Ellipse => {
            let center = element.center();
            let rx = element.width / 2.0;
            let ry = element.height / 2.0;
            if rx <= 0.0 || ry <= 0.0 {
                return local.distance_to(center);
            }
            let d = local.sub_point(center);
            let k = ((d.x / rx).powi(2) + (d.y / ry).powi(2)).sqrt();
            if k == 0.0 {
                return rx.min(ry);
            }
            local.distance_to(center.add_point(d.scale(1.0 / k)))
        }
        _ => {
            let bounds = element.bounds();
            if bounds.contains_point(local) {
                (local.x - bounds.min_x)
                    .min(bounds.max_x - local.x)
                    .min(local.y - bounds.min_y)
                    .min(bounds.max_y - local.y)
            } else {
                let dx = (bounds.min_x - local.x).max(local.x - bounds.max_x).max(0.0);
                let dy = (bounds.min_y - local.y).max(local.y - bounds.max_y).max(0.0);
                dx.hypot(dy)
            }
        }
    }
}

/// Distance from `point` to the element; zero anywhere inside.
pub fn distance_to_element(element: &Element, point: Point) -> f64 {
    if element_contains(element, point) {
        0.0
    } else {
        outline_distance(element, point)
    }
}

/// Projects `point` onto the element's outline along the ray from the
/// element center. When `point` sits on the center, the direction toward
/// `other_point` is used instead.
pub fn snap_to_element_outline(element: &Element, point: Point, other_point: Point) -> Point {
    let center = element.center();
    let local = to_local(element, point);
    let mut direction = local.sub_point(center);
    if direction.x == 0.0 && direction.y == 0.0 {
        direction = to_local(element, other_point).sub_point(center);
    }
    if direction.x == 0.0 && direction.y == 0.0 {
        return point;
    }

    let hit = match element.element_type {
        ElementType::Ellipse => {
            let rx = element.width / 2.0;
            let ry = element.height / 2.0;
            if rx <= 0.0 || ry <= 0.0 {
                center
            } else {
                let k = ((direction.x / rx).powi(2) + (direction.y / ry).powi(2)).sqrt();
                center.add_point(direction.scale(1.0 / k))
            }
        }
        ElementType::Diamond => {
            let reach = (element.width + element.height).max(1.0);
            let far = center.add_point(direction.scale(reach / direction.length()));
            let ray = LineSegment::new(center, far);
            diamond_segments(element)
                .iter()
                .filter_map(|segment| segments_intersect_at(ray, *segment))
                .min_by(|a, b| {
                    a.distance_to(center).total_cmp(&b.distance_to(center))
                })
                .unwrap_or(local)
        }
        _ => rect_boundary_toward(element, direction),
    };
    to_global(element, hit)
}

/// Ray/rectangle intersection in the local frame via the slab distances of
/// each edge; the smallest positive parameter wins.
fn rect_boundary_toward(element: &Element, direction: Vector) -> Point {
    let center = element.center();
    let half_w = element.width / 2.0;
    let half_h = element.height / 2.0;

    let t_left = if direction.x < -0.001 { -half_w / direction.x } else { f64::MAX };
    let t_right = if direction.x > 0.001 { half_w / direction.x } else { f64::MAX };
    let t_top = if direction.y < -0.001 { -half_h / direction.y } else { f64::MAX };
    let t_bottom = if direction.y > 0.001 { half_h / direction.y } else { f64::MAX };

    let t = t_left.min(t_right).min(t_top).min(t_bottom);
    if t == f64::MAX {
        center
    } else {
        center.add_point(direction.scale(t))
    }
}

/// Slides a rectanguloid bind point along its edge until it clears the
/// nearest corner by `clearance`.
pub fn avoid_rectangular_corner(element: &Element, point: Point, clearance: f64) -> Point {
    let center = element.center();
    let local = to_local(element, point);
    let bounds = element.bounds();

    for corner in bounds.corners() {
        if local.distance_to(corner) >= clearance {
            continue;
        }
        let along_x = if corner.x == bounds.min_x { clearance } else { -clearance };
        let along_y = if corner.y == bounds.min_y { clearance } else { -clearance };
        // slide along whichever edge the point already hugs
        let adjusted = if (local.x - corner.x).abs() >= (local.y - corner.y).abs() {
            Point::new(corner.x + along_x, corner.y)
        } else {
            Point::new(corner.x, corner.y + along_y)
        };
        return to_global(element, adjusted);
    }
    point
}

/// Snaps an outline point to the midpoint of its edge when it lies within
/// `tolerance` (a fraction of the perpendicular extent) of it.
pub fn snap_to_mid(element: &Element, point: Point, tolerance: f64) -> Point {
    const EDGE_BAND: f64 = 0.05;

    let center = element.center();
    let local = to_local(element, point);
    let bounds = element.bounds();
    let x_band = element.width * EDGE_BAND;
    let y_band = element.height * EDGE_BAND;

    let snapped = if local.x <= bounds.min_x + x_band
        && (local.y - center.y).abs() <= element.height * tolerance
    {
        Point::new(bounds.min_x, center.y)
    } else if local.x >= bounds.max_x - x_band
        && (local.y - center.y).abs() <= element.height * tolerance
    {
        Point::new(bounds.max_x, center.y)
    } else if local.y <= bounds.min_y + y_band
        && (local.x - center.x).abs() <= element.width * tolerance
    {
        Point::new(center.x, bounds.min_y)
    } else if local.y >= bounds.max_y - y_band
        && (local.x - center.x).abs() <= element.width * tolerance
    {
        Point::new(center.x, bounds.max_y)
    } else {
        local
    };
    to_global(element, snapped)
}

/// Hover zone around an element's outline, proportional to its size.
fn binding_gap(element: &Element) -> f64 {
    (element.width.min(element.height) * 0.25).clamp(4.0, 32.0)
}

/// Topmost bindable element whose binding zone contains `point`. With
/// `fully_inside`, points anywhere inside the shape hover it; otherwise only
/// the zone around the outline counts.
pub fn hovered_element_at<'a>(
    view: SceneView<'a>,
    point: Point,
    fully_inside: bool,
) -> Option<&'a Element> {
    let mut hit = None;
    for element in view.non_deleted_elements() {
        if !element.element_type.is_bindable() {
            continue;
        }
        let near = outline_distance(element, point) <= binding_gap(element);
        let hovered = if fully_inside {
            near || element_contains(element, point)
        } else {
            near
        };
        if hovered {
            hit = Some(element);
        }
    }
    hit
}
