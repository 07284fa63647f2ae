//! Dynamic obstacle generation. Each endpoint gets an axis-aligned box that
//! surrounds its region without enclosing the opposite endpoint; where
//! possible the two boxes split the plane into disjoint halves so the search
//! hugs them instead of wandering.

use log::trace;

use crate::geometry::{cross, Bounds, Vector};

/// Slack pushed onto the outer sides when the two endpoint regions overlap.
const OVERLAP_SLACK: f64 = 40.0;

/// Tolerance of the candidate-overlap test below.
const SPLIT_EPSILON: f64 = 1e-11;

/// Produces the two obstacle boxes for the endpoint regions `a` and `b`.
///
/// `common` is the merge of `a` and `b`; `start_offsets`/`end_offsets` are
/// per-side clamps in up, right, down, left order that keep each box
/// extending at least that far past its endpoint region.
pub fn generate_dynamic_aabbs(
    a: Bounds,
    b: Bounds,
    common: Bounds,
    start_offsets: [f64; 4],
    end_offsets: [f64; 4],
) -> [Bounds; 2] {
    if a.overlaps(&b) {
        let boxes = [
            expand_outer_sides(&a, &common),
            expand_outer_sides(&b, &common),
        ];
        trace!(first:? = boxes[0], second:? = boxes[1]; "overlapping endpoint regions");
        return boxes;
    }

    let first = candidate(&a, &b, &common, start_offsets);
    let second = candidate(&b, &a, &common, end_offsets);
    let c = first.merge(&second);

    // When the two candidates still overlap on both axes (a corner-touching
    // configuration), cut along the diagonal of `a`: whichever side of it
    // the second box's center falls picks a vertical split at the shared x
    // center or a horizontal split at the shared y center.
    if first.width() + second.width() > c.width() + SPLIT_EPSILON
        && first.height() + second.height() > c.height() + SPLIT_EPSILON
    {
        let end_center = second.center();
        let towards = |x: f64, y: f64| Vector::new(x - end_center.x, y - end_center.y);

        if b.min_x > a.max_x && a.min_y > b.max_y {
            // b is to the top-right of a
            let c_x = first.max_x + (second.min_x - first.max_x) / 2.0;
            let c_y = second.max_y + (first.min_y - second.max_y) / 2.0;
            let split = if cross(towards(a.max_x, a.min_y), towards(a.min_x, a.max_y)) > 0.0 {
                [
                    Bounds::new(first.min_x, first.min_y, c_x, first.max_y),
                    Bounds::new(c_x, second.min_y, second.max_x, second.max_y),
                ]
            } else {
                [
                    Bounds::new(first.min_x, c_y, first.max_x, first.max_y),
                    Bounds::new(second.min_x, second.min_y, second.max_x, c_y),
                ]
            };
            return split;
        } else if b.max_x < a.min_x && a.min_y > b.max_y {
            // b is to the top-left of a
            let c_x = second.max_x + (first.min_x - second.max_x) / 2.0;
            let c_y = second.max_y + (first.min_y - second.max_y) / 2.0;
            let split = if cross(towards(a.min_x, a.min_y), towards(a.max_x, a.max_y)) > 0.0 {
                [
                    Bounds::new(c_x, first.min_y, first.max_x, first.max_y),
                    Bounds::new(second.min_x, second.min_y, c_x, second.max_y),
                ]
            } else {
                [
                    Bounds::new(first.min_x, c_y, first.max_x, first.max_y),
                    Bounds::new(second.min_x, second.min_y, second.max_x, c_y),
                ]
            };
            return split;
        } else if a.max_x < b.min_x && a.max_y < b.min_y {
            // b is to the bottom-right of a
            let c_x = first.max_x + (second.min_x - first.max_x) / 2.0;
            let c_y = first.max_y + (second.min_y - first.max_y) / 2.0;
            let split = if cross(towards(a.max_x, a.max_y), towards(a.min_x, a.min_y)) > 0.0 {
                [
                    Bounds::new(first.min_x, first.min_y, first.max_x, c_y),
                    Bounds::new(second.min_x, c_y, second.max_x, second.max_y),
                ]
            } else {
                [
                    Bounds::new(first.min_x, first.min_y, c_x, first.max_y),
                    Bounds::new(c_x, second.min_y, second.max_x, second.max_y),
                ]
            };
            return split;
        } else {
            // b is to the bottom-left of a
            let c_x = second.max_x + (first.min_x - second.max_x) / 2.0;
            let c_y = first.max_y + (second.min_y - first.max_y) / 2.0;
            let split = if cross(towards(a.min_x, a.max_y), towards(a.max_x, a.min_y)) > 0.0 {
                [
                    Bounds::new(c_x, first.min_y, first.max_x, first.max_y),
                    Bounds::new(second.min_x, second.min_y, c_x, second.max_y),
                ]
            } else {
                [
                    Bounds::new(first.min_x, first.min_y, first.max_x, c_y),
                    Bounds::new(second.min_x, c_y, second.max_x, second.max_y),
                ]
            };
            return split;
        }
    }

    [first, second]
}

/// Pushes every side of `bounds` that coincides with the common bounds
/// outward by the overlap slack; inner sides stay put.
fn expand_outer_sides(bounds: &Bounds, common: &Bounds) -> Bounds {
    Bounds::new(
        if bounds.min_x == common.min_x {
            bounds.min_x - OVERLAP_SLACK
        } else {
            bounds.min_x
        },
        if bounds.min_y == common.min_y {
            bounds.min_y - OVERLAP_SLACK
        } else {
            bounds.min_y
        },
        if bounds.max_x == common.max_x {
            bounds.max_x + OVERLAP_SLACK
        } else {
            bounds.max_x
        },
        if bounds.max_y == common.max_y {
            bounds.max_y + OVERLAP_SLACK
        } else {
            bounds.max_y
        },
    )
}

/// One candidate box around `a`, shaped by where `b` lies.
///
/// Per coordinate: when the boxes are separated on that axis, meet `b`
/// halfway, clamped (only when they are also separated on the other axis) so
/// the box still extends at least the side offset past `a`. Otherwise stay
/// at `a`'s own edge, or at the common edge when `a` reaches it, offset
/// outward either way.
fn candidate(a: &Bounds, b: &Bounds, common: &Bounds, offsets: [f64; 4]) -> Bounds {
    let [up, right, down, left] = offsets;
    let separated_on_x = a.min_x > b.max_x || a.max_x < b.min_x;
    let separated_on_y = a.min_y > b.max_y || a.max_y < b.min_y;

    let min_x = if a.min_x > b.max_x {
        if separated_on_y {
            ((a.min_x + b.max_x) / 2.0).min(a.min_x - left)
        } else {
            (a.min_x + b.max_x) / 2.0
        }
    } else if a.min_x > b.min_x {
        a.min_x - left
    } else {
        common.min_x - left
    };

    let min_y = if a.min_y > b.max_y {
        if separated_on_x {
            ((a.min_y + b.max_y) / 2.0).min(a.min_y - up)
        } else {
            (a.min_y + b.max_y) / 2.0
        }
    } else if a.min_y > b.min_y {
        a.min_y - up
    } else {
        common.min_y - up
    };

    let max_x = if a.max_x < b.min_x {
        if separated_on_y {
            ((a.max_x + b.min_x) / 2.0).max(a.max_x + right)
        } else {
            (a.max_x + b.min_x) / 2.0
        }
    } else if a.max_x < b.max_x {
        a.max_x + right
    } else {
        common.max_x + right
    };

    let max_y = if a.max_y < b.min_y {
        if separated_on_x {
            ((a.max_y + b.min_y) / 2.0).max(a.max_y + down)
        } else {
            (a.max_y + b.min_y) / 2.0
        }
    } else if a.max_y < b.max_y {
        a.max_y + down
    } else {
        common.max_y + down
    };

    Bounds::new(min_x, min_y, max_x, max_y)
}
