//! The elbow-arrow routing entry point.
//!
//! A routing call resolves both endpoints to global points and outward
//! headings, builds two dynamic obstacle boxes and a sparse grid over the
//! significant coordinates, runs the Manhattan A* between the projected
//! dongle nodes, and writes the simplified polyline back onto the arrow as
//! one atomic update. On failure the arrow is left untouched and a single
//! diagnostic is logged.

pub mod astar;
pub mod grid;
pub mod heap;
pub mod obstacles;
pub mod post;

use log::{debug, trace, warn};

use crate::binding::{
    aabb_for_element, avoid_rectangular_corner, distance_to_element, global_fixed_point,
    hovered_element_at, snap_to_element_outline, snap_to_mid,
};
use crate::config::RoutingConfig;
use crate::element::{
    apply_arrow_update, ArrowElement, ArrowUpdate, BindingUpdates, Element, FixedPointBinding,
};
use crate::error::RouteError;
use crate::geometry::{Bounds, Point};
use crate::heading::{heading_for_point_from_element, Heading};
use crate::scene::SceneView;

use self::astar::astar;
use self::grid::{calculate_grid, dongle_position, point_to_grid_node};
use self::obstacles::generate_dynamic_aabbs;
use self::post::{normalized_arrow_update, simplify};

/// Options modulating a single routing call.
#[derive(Debug, Clone)]
pub struct RouteOptions {
    /// Bindings are re-evaluated from the hovered element at each endpoint
    pub is_dragging: bool,
    /// Suppresses hover binding while dragging
    pub disable_binding: bool,
    /// Whether the mutation sink should emit its change event
    pub inform_mutation: bool,
    pub config: RoutingConfig,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            is_dragging: false,
            disable_binding: false,
            inform_mutation: true,
            config: RoutingConfig::default(),
        }
    }
}

/// Routes `arrow` between the first and last of `next_points` (arrow-local,
/// optionally translated by `offset`) and applies the resulting update.
///
/// The scene is only read. When no route exists the arrow keeps its previous
/// points and a diagnostic is logged; there are no fatal outcomes.
pub fn route_elbow_arrow(
    arrow: &mut ArrowElement,
    view: SceneView<'_>,
    next_points: &[Point],
    offset: Option<Point>,
    other_updates: Option<BindingUpdates>,
    options: &RouteOptions,
) {
    match try_route(arrow, view, next_points, offset, options) {
        Ok(mut update) => {
            if let Some(bindings) = other_updates {
                update.bindings = bindings;
            }
            debug!(arrow = arrow.id.as_str(), points = update.points.len(); "elbow route applied");
            apply_arrow_update(arrow, update, options.inform_mutation);
        }
        Err(error) => {
            warn!(arrow = arrow.id.as_str(); "{error}");
        }
    }
}

fn try_route(
    arrow: &ArrowElement,
    view: SceneView<'_>,
    next_points: &[Point],
    offset: Option<Point>,
    options: &RouteOptions,
) -> Result<ArrowUpdate, RouteError> {
    let config = &options.config;
    let (first, last) = match (next_points.first(), next_points.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Err(RouteError::MissingEndpoints),
    };
    let translate = offset.unwrap_or_default();
    let origin = Point::new(arrow.x + translate.x, arrow.y + translate.y);
    let orig_start_global = origin.add_point(first);
    let orig_end_global = origin.add_point(last);

    let start_element = bound_element(view, arrow.start_binding.as_ref());
    let end_element = bound_element(view, arrow.end_binding.as_ref());

    let (hovered_start, hovered_end) = if options.is_dragging {
        if options.disable_binding {
            (None, None)
        } else {
            (
                hovered_element_at(view, orig_start_global, true),
                hovered_element_at(view, orig_end_global, true),
            )
        }
    } else {
        (start_element, end_element)
    };

    let start_global = resolve_endpoint(
        config,
        orig_start_global,
        orig_end_global,
        arrow.start_binding.as_ref().zip(start_element),
        hovered_start,
        options.is_dragging,
    );
    let end_global = resolve_endpoint(
        config,
        orig_end_global,
        orig_start_global,
        arrow.end_binding.as_ref().zip(end_element),
        hovered_end,
        options.is_dragging,
    );

    let start_heading = bind_point_heading(start_global, end_global, hovered_start, orig_start_global);
    let end_heading = bind_point_heading(end_global, start_global, hovered_end, orig_end_global);

    let start_region = match hovered_start {
        Some(element) => aabb_for_element(
            element,
            offset_from_heading(start_heading, config.bound_head_offset(), 1.0),
        ),
        None => Bounds::around_point(start_global, config.free_endpoint_padding),
    };
    let end_region = match hovered_end {
        Some(element) => aabb_for_element(
            element,
            offset_from_heading(end_heading, config.bound_head_offset(), 1.0),
        ),
        None => Bounds::around_point(end_global, config.free_endpoint_padding),
    };
    let common = start_region.merge(&end_region);

    // point-to-point arrows route tight, bound ones keep shape clearance
    let both_free = hovered_start.is_none() && hovered_end.is_none();
    let start_offsets = offset_from_heading(
        start_heading,
        if both_free {
            0.0
        } else {
            config.dynamic_head_offset(arrow.start_arrowhead.is_some())
        },
        config.base_padding,
    );
    let end_offsets = offset_from_heading(
        end_heading,
        if both_free {
            0.0
        } else {
            config.dynamic_head_offset(arrow.end_arrowhead.is_some())
        },
        config.base_padding,
    );

    let aabbs = generate_dynamic_aabbs(start_region, end_region, common, start_offsets, end_offsets);

    let start_dongle = dongle_position(&aabbs[0], start_heading, start_global);
    let end_dongle = dongle_position(&aabbs[1], end_heading, end_global);

    let mut grid = calculate_grid(
        &aabbs,
        start_dongle,
        start_heading,
        end_dongle,
        end_heading,
        &common,
    );

    // ban the true endpoints so the search cannot step into the shapes
    if let Some(index) = point_to_grid_node(end_global, &grid) {
        if hovered_end.is_some() {
            grid.data[index].closed = true;
        }
    }
    if let Some(index) = point_to_grid_node(start_global, &grid) {
        if arrow.start_binding.is_some() {
            grid.data[index].closed = true;
        }
    }

    let start_node = point_to_grid_node(start_dongle, &grid).ok_or(RouteError::OutsideGrid)?;
    let end_node = point_to_grid_node(end_dongle, &grid).ok_or(RouteError::OutsideGrid)?;

    // when each dongle sits inside the opposite box the corridor between the
    // boxes is gone and the search runs unobstructed instead
    let dongles_overlap = aabbs[1].interior_contains(start_dongle)
        && aabbs[0].interior_contains(end_dongle);
    let obstacles: &[Bounds] = if dongles_overlap { &[] } else { &aabbs };

    trace!(
        start:? = start_dongle,
        end:? = end_dongle,
        first:? = aabbs[0],
        second:? = aabbs[1],
        rows = grid.rows,
        cols = grid.cols,
        obstructed = !dongles_overlap;
        "routing grid prepared"
    );

    let path = astar(
        start_node,
        end_node,
        &mut grid,
        start_heading,
        end_heading,
        obstacles,
    )?;

    let mut points: Vec<Point> = Vec::with_capacity(path.len() + 2);
    points.push(start_global);
    points.extend(path.iter().map(|&index| grid.data[index].pos));
    points.push(end_global);

    Ok(normalized_arrow_update(&simplify(&points)))
}

/// Element a binding refers to, unless it was deleted or is not bindable;
/// a dangling binding degrades to an unbound endpoint.
fn bound_element<'a>(
    view: SceneView<'a>,
    binding: Option<&FixedPointBinding>,
) -> Option<&'a Element> {
    binding
        .and_then(|binding| view.element(&binding.element_id))
        .filter(|element| !element.is_deleted && element.element_type.is_bindable())
}

/// Resolves one raw endpoint to its global position: snap to the hovered
/// outline mid-drag, to the bound fixed point otherwise, else keep the raw
/// point.
fn resolve_endpoint(
    config: &RoutingConfig,
    raw: Point,
    other: Point,
    binding: Option<(&FixedPointBinding, &Element)>,
    hovered: Option<&Element>,
    is_dragging: bool,
) -> Point {
    if is_dragging {
        if let Some(element) = hovered {
            let point = if element.element_type.is_rectanguloid() {
                avoid_rectangular_corner(element, raw, config.corner_clearance)
            } else {
                raw
            };
            let point = snap_to_element_outline(element, point, other);
            return if element.element_type.is_rectanguloid() {
                snap_to_mid(element, point, config.mid_snap_tolerance)
            } else {
                point
            };
        }
        return raw;
    }
    if let Some((binding, element)) = binding {
        let fixed = global_fixed_point(binding, element);
        return if element.element_type.is_rectanguloid() {
            avoid_rectangular_corner(element, fixed, config.corner_clearance)
        } else {
            fixed
        };
    }
    raw
}

/// Outward heading of an endpoint: classified against the hovered element
/// when there is one, otherwise from the direction toward the other
/// endpoint. Total; every endpoint gets a heading.
fn bind_point_heading(
    point: Point,
    other_point: Point,
    hovered: Option<&Element>,
    orig_point: Point,
) -> Heading {
    match hovered {
        None => Heading::from_vector(other_point.sub_point(point)),
        Some(element) => {
            let distance = distance_to_element(element, orig_point);
            let aabb = aabb_for_element(element, [distance; 4]);
            heading_for_point_from_element(element, &aabb, point)
        }
    }
}

/// Per-side offsets in up, right, down, left order: `head` on the heading's
/// own side, `side` elsewhere.
fn offset_from_heading(heading: Heading, head: f64, side: f64) -> [f64; 4] {
    match heading {
        Heading::Up => [head, side, side, side],
        Heading::Right => [side, head, side, side],
        Heading::Down => [side, side, head, side],
        Heading::Left => [side, side, side, head],
    }
}
