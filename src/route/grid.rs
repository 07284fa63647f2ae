//! The routing grid: a sparse lattice over the significant x and y
//! coordinates of one routing call. Endpoints, obstacle edges and the common
//! bounds all land on grid lines, so every potential turn position exists as
//! a node.

use crate::geometry::{Bounds, Point};
use crate::heading::Heading;

/// A lattice point. `g`/`h`/`f` and the flags are A* search state; `parent`
/// is an index into the owning grid's node array.
#[derive(Debug, Clone)]
pub struct Node {
    pub pos: Point,
    /// (column, row) address
    pub addr: (usize, usize),
    pub g: f64,
    pub h: f64,
    pub f: f64,
    pub closed: bool,
    pub visited: bool,
    pub parent: Option<usize>,
}

/// Row-major grid of nodes; `data[row * cols + col]` addresses `(col, row)`.
#[derive(Debug)]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Node>,
}

impl Grid {
    pub fn node_at(&self, col: usize, row: usize) -> Option<&Node> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.data.get(row * self.cols + col)
    }

    /// Index of the 4-connected neighbor of `index` toward `direction`
    pub fn neighbor_index(&self, index: usize, direction: Heading) -> Option<usize> {
        let (col, row) = self.data[index].addr;
        let (col, row) = match direction {
            Heading::Up => (col, row.checked_sub(1)?),
            Heading::Right => (col + 1, row),
            Heading::Down => (col, row + 1),
            Heading::Left => (col.checked_sub(1)?, row),
        };
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(row * self.cols + col)
    }
}

/// Collects the significant coordinates and materializes the node lattice.
///
/// Each endpoint contributes the coordinate its heading travels along (its y
/// for horizontal headings, its x otherwise); every obstacle and the common
/// bounds contribute both edges on both axes.
pub fn calculate_grid(
    aabbs: &[Bounds],
    start: Point,
    start_heading: Heading,
    end: Point,
    end_heading: Heading,
    common: &Bounds,
) -> Grid {
    let mut xs: Vec<f64> = Vec::new();
    let mut ys: Vec<f64> = Vec::new();

    if start_heading.is_horizontal() {
        ys.push(start.y);
    } else {
        xs.push(start.x);
    }
    if end_heading.is_horizontal() {
        ys.push(end.y);
    } else {
        xs.push(end.x);
    }

    for aabb in aabbs {
        xs.push(aabb.min_x);
        xs.push(aabb.max_x);
        ys.push(aabb.min_y);
        ys.push(aabb.max_y);
    }
    xs.push(common.min_x);
    xs.push(common.max_x);
    ys.push(common.min_y);
    ys.push(common.max_y);

    xs.sort_by(f64::total_cmp);
    xs.dedup();
    ys.sort_by(f64::total_cmp);
    ys.dedup();

    let cols = xs.len();
    let data = ys
        .iter()
        .enumerate()
        .flat_map(|(row, &y)| {
            xs.iter().enumerate().map(move |(col, &x)| Node {
                pos: Point::new(x, y),
                addr: (col, row),
                g: 0.0,
                h: 0.0,
                f: 0.0,
                closed: false,
                visited: false,
                parent: None,
            })
        })
        .collect();

    Grid {
        rows: ys.len(),
        cols,
        data,
    }
}

/// Finds the node sitting exactly at `point`. Grid coordinates are copied,
/// never recomputed, so exact equality is the right comparison.
pub fn point_to_grid_node(point: Point, grid: &Grid) -> Option<usize> {
    grid.data
        .iter()
        .position(|node| node.pos.x == point.x && node.pos.y == point.y)
}

/// Projection of an endpoint onto the outer edge of its obstacle box along
/// the outward heading; the A* source and target.
pub fn dongle_position(bounds: &Bounds, heading: Heading, point: Point) -> Point {
    match heading {
        Heading::Up => Point::new(point.x, bounds.min_y),
        Heading::Right => Point::new(bounds.max_x, point.y),
        Heading::Down => Point::new(point.x, bounds.max_y),
        Heading::Left => Point::new(bounds.min_x, point.y),
    }
}
