//! Manhattan A* over the routing grid. Bends cost vastly more than length,
//! reversing is forbidden, and obstacle interiors are tested at segment
//! midpoints so routes may run along obstacle edges.

use crate::error::RouteError;
use crate::geometry::{Bounds, Point};
use crate::heading::Heading;

use super::grid::Grid;
use super::heap::MinHeap;

/// Neighbor expansion order; ties between equal-cost routes resolve in this
/// order, so symmetric detours bend upward first.
const NEIGHBOR_DIRECTIONS: [Heading; 4] = [
    Heading::Up,
    Heading::Right,
    Heading::Down,
    Heading::Left,
];

/// Searches the grid from `start` to `end`, leaving along `start_heading`
/// and entering against `end_heading`. Returns the node indices of the path
/// in start-to-end order.
pub fn astar(
    start: usize,
    end: usize,
    grid: &mut Grid,
    start_heading: Heading,
    end_heading: Heading,
    obstacles: &[Bounds],
) -> Result<Vec<usize>, RouteError> {
    let end_pos = grid.data[end].pos;
    let start_addr = grid.data[start].addr;
    let end_addr = grid.data[end].addr;
    let bend_multiplier = grid.data[start].pos.manhattan_distance(end_pos);
    let bend_cost = bend_multiplier.powi(3);
    let bend_estimate_weight = bend_multiplier.powi(2);

    let mut open = MinHeap::with_capacity(grid.data.len());
    open.push(start, 0.0);

    while let Some(current) = open.pop() {
        if grid.data[current].closed {
            continue;
        }
        if current == end {
            return Ok(backtrack(grid, start, end));
        }
        grid.data[current].closed = true;

        let (current_pos, current_g, previous_direction) = {
            let node = &grid.data[current];
            let direction = match node.parent {
                Some(parent) => Heading::from_vector(node.pos.sub_point(grid.data[parent].pos)),
                None => start_heading,
            };
            (node.pos, node.g, direction)
        };

        for direction in NEIGHBOR_DIRECTIONS {
            let Some(neighbor) = grid.neighbor_index(current, direction) else {
                continue;
            };
            let (neighbor_pos, neighbor_addr) = {
                let node = &grid.data[neighbor];
                if node.closed {
                    continue;
                }
                (node.pos, node.addr)
            };

            // midpoint test: edges may touch obstacle boundaries but not
            // cut through their interiors
            let half = current_pos.midpoint(neighbor_pos);
            if obstacles.iter().any(|aabb| aabb.interior_contains(half)) {
                continue;
            }

            // no reversing, no leaving the start against its heading, no
            // entering the end along its outward heading
            if direction == previous_direction.reverse() {
                continue;
            }
            if neighbor_addr == start_addr && direction == start_heading {
                continue;
            }
            if neighbor_addr == end_addr && direction == end_heading {
                continue;
            }

            let direction_change = direction != previous_direction;
            let g = current_g
                + current_pos.manhattan_distance(neighbor_pos)
                + if direction_change { bend_cost } else { 0.0 };

            let node = &mut grid.data[neighbor];
            if !node.visited || g < node.g {
                let was_visited = node.visited;
                let h = neighbor_pos.manhattan_distance(end_pos)
                    + f64::from(estimated_bends(neighbor_pos, end_pos, direction, end_heading))
                        * bend_estimate_weight;
                node.visited = true;
                node.parent = Some(current);
                node.g = g;
                node.h = h;
                node.f = g + h;
                let f = node.f;
                if was_visited {
                    open.rescore(neighbor, f);
                } else {
                    open.push(neighbor, f);
                }
            }
        }
    }

    Err(RouteError::NoRoute)
}

fn backtrack(grid: &Grid, start: usize, end: usize) -> Vec<usize> {
    let mut path = Vec::new();
    let mut current = end;
    while let Some(parent) = grid.data[current].parent {
        path.push(current);
        current = parent;
    }
    path.push(start);
    path.reverse();
    path
}

/// Minimum number of turns any legal orthogonal path must make from a node
/// left along `start_heading` to the end entered against `end_heading`,
/// given their relative position. Closed-form; weighs the A* heuristic.
fn estimated_bends(start: Point, end: Point, start_heading: Heading, end_heading: Heading) -> u32 {
    use Heading::{Down, Left, Right, Up};

    match end_heading {
        Right => match start_heading {
            Right => {
                if start.x >= end.x {
                    4
                } else if start.y == end.y {
                    0
                } else {
                    2
                }
            }
            Up => {
                if start.y > end.y && start.x < end.x {
                    1
                } else {
                    3
                }
            }
            Down => {
                if start.y < end.y && start.x < end.x {
                    1
                } else {
                    3
                }
            }
            Left => {
                if start.y == end.y {
                    4
                } else {
                    2
                }
            }
        },
        Left => match start_heading {
            Right => {
                if start.y == end.y {
                    4
                } else {
                    2
                }
            }
            Up => {
                if start.y > end.y && start.x > end.x {
                    1
                } else {
                    3
                }
            }
            Down => {
                if start.y < end.y && start.x > end.x {
                    1
                } else {
                    3
                }
            }
            Left => {
                if start.x <= end.x {
                    4
                } else if start.y == end.y {
                    0
                } else {
                    2
                }
            }
        },
        Up => match start_heading {
            Right => {
                if start.y > end.y && start.x < end.x {
                    1
                } else {
                    3
                }
            }
            Up => {
                if start.y >= end.y {
                    4
                } else if start.x == end.x {
                    0
                } else {
                    2
                }
            }
            Down => {
                if start.x == end.x {
                    4
                } else {
                    2
                }
            }
            Left => {
                if start.y > end.y && start.x > end.x {
                    1
                } else {
                    3
                }
            }
        },
        Down => match start_heading {
            Right => {
                if start.y < end.y && start.x < end.x {
                    1
                } else {
                    3
                }
            }
            Up => {
                if start.x == end.x {
                    4
                } else {
                    2
                }
            }
            Down => {
                if start.y <= end.y {
                    4
                } else if start.x == end.x {
                    0
                } else {
                    2
                }
            }
            Left => {
                if start.y < end.y && start.x > end.x {
                    1
                } else {
                    3
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::super::grid::{calculate_grid, point_to_grid_node};
    use super::*;

    fn heading_between(grid: &Grid, from: usize, to: usize) -> Heading {
        Heading::from_vector(grid.data[to].pos.sub_point(grid.data[from].pos))
    }

    #[test]
    fn test_estimated_bends_spot_checks() {
        use Heading::{Left, Right, Up};
        let p = Point::new;

        // aligned and facing the right way: straight shot
        assert_eq!(estimated_bends(p(0.0, 0.0), p(100.0, 0.0), Right, Right), 0);
        // overshot the target: full loop back
        assert_eq!(estimated_bends(p(100.0, 0.0), p(50.0, 0.0), Right, Right), 4);
        assert_eq!(estimated_bends(p(50.0, 0.0), p(50.0, 0.0), Right, Right), 4);
        // one corner suffices
        assert_eq!(estimated_bends(p(0.0, 10.0), p(50.0, 0.0), Up, Right), 1);
        // facing away along the same line
        assert_eq!(estimated_bends(p(0.0, 0.0), p(100.0, 0.0), Left, Right), 4);
        // vertical overshoot
        assert_eq!(estimated_bends(p(0.0, 0.0), p(0.0, 0.0), Up, Up), 4);
        assert_eq!(estimated_bends(p(0.0, -10.0), p(0.0, 0.0), Up, Up), 4);
        // vertical straight shot
        assert_eq!(estimated_bends(p(0.0, 10.0), p(0.0, 0.0), Up, Up), 0);
        // offset lane change
        assert_eq!(estimated_bends(p(0.0, 10.0), p(30.0, 0.0), Up, Up), 2);
    }

    #[test]
    fn test_straight_route_has_no_bends() {
        let common = Bounds::new(0.0, -10.0, 100.0, 10.0);
        let mut grid = calculate_grid(
            &[],
            Point::new(0.0, 0.0),
            Heading::Right,
            Point::new(100.0, 0.0),
            Heading::Left,
            &common,
        );
        let start = point_to_grid_node(Point::new(0.0, 0.0), &grid).unwrap();
        let end = point_to_grid_node(Point::new(100.0, 0.0), &grid).unwrap();

        let path = astar(start, end, &mut grid, Heading::Right, Heading::Left, &[]).unwrap();
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&end));
        for pair in path.windows(2) {
            assert_eq!(heading_between(&grid, pair[0], pair[1]), Heading::Right);
        }
    }

    #[test]
    fn test_degenerate_start_is_end() {
        let common = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let mut grid = calculate_grid(
            &[],
            Point::new(0.0, 0.0),
            Heading::Right,
            Point::new(0.0, 0.0),
            Heading::Left,
            &common,
        );
        let node = point_to_grid_node(Point::new(0.0, 0.0), &grid).unwrap();
        let path = astar(node, node, &mut grid, Heading::Right, Heading::Left, &[]).unwrap();
        assert_eq!(path, vec![node]);
    }

    #[test]
    fn test_obstacle_midpoints_are_avoided() {
        // an obstacle straddling the direct lane forces a detour around it
        let obstacle = Bounds::new(40.0, -20.0, 60.0, 20.0);
        let common = Bounds::new(0.0, -20.0, 100.0, 20.0);
        let mut grid = calculate_grid(
            &[obstacle],
            Point::new(0.0, 0.0),
            Heading::Right,
            Point::new(100.0, 0.0),
            Heading::Left,
            &common,
        );
        let start = point_to_grid_node(Point::new(0.0, 0.0), &grid).unwrap();
        let end = point_to_grid_node(Point::new(100.0, 0.0), &grid).unwrap();

        let path = astar(
            start,
            end,
            &mut grid,
            Heading::Right,
            Heading::Left,
            &[obstacle],
        )
        .unwrap();

        for pair in path.windows(2) {
            let mid = grid.data[pair[0]].pos.midpoint(grid.data[pair[1]].pos);
            assert!(
                !obstacle.interior_contains(mid),
                "segment midpoint {mid:?} crosses the obstacle"
            );
        }
    }

    #[test]
    fn test_reverse_facing_endpoints_loop_around() {
        // both endpoints face right but the end is behind the start
        let common = Bounds::new(-102.0, -2.0, 2.0, 2.0);
        let mut grid = calculate_grid(
            &[
                Bounds::new(-50.0, -2.0, 2.0, 2.0),
                Bounds::new(-102.0, -2.0, -50.0, 2.0),
            ],
            Point::new(2.0, 0.0),
            Heading::Right,
            Point::new(-50.0, 0.0),
            Heading::Right,
            &common,
        );
        let start = point_to_grid_node(Point::new(2.0, 0.0), &grid).unwrap();
        let end = point_to_grid_node(Point::new(-50.0, 0.0), &grid).unwrap();

        let obstacles = [
            Bounds::new(-50.0, -2.0, 2.0, 2.0),
            Bounds::new(-102.0, -2.0, -50.0, 2.0),
        ];
        let path = astar(
            start,
            end,
            &mut grid,
            Heading::Right,
            Heading::Right,
            &obstacles,
        )
        .unwrap();

        assert!(path.len() >= 4);
        // first hop keeps the start heading or turns, but never reverses
        let first_hop = heading_between(&grid, path[0], path[1]);
        assert_ne!(first_hop, Heading::Left);
        // ties bend upward first
        assert_eq!(first_hop, Heading::Up);
        // the end is entered from a direction other than its outward heading
        let last_hop = heading_between(&grid, path[path.len() - 2], path[path.len() - 1]);
        assert_ne!(last_hop, Heading::Right);
    }

    #[test]
    fn test_no_route_when_end_unreachable() {
        // the end may only be entered against its heading, but that lane is
        // the single column of the grid, so every approach is illegal
        let common = Bounds::new(0.0, 0.0, 0.0, 100.0);
        let mut grid = calculate_grid(
            &[],
            Point::new(0.0, 0.0),
            Heading::Up,
            Point::new(0.0, 100.0),
            Heading::Down,
            &common,
        );
        assert_eq!(grid.cols, 1);
        let start = point_to_grid_node(Point::new(0.0, 0.0), &grid).unwrap();
        let end = point_to_grid_node(Point::new(0.0, 100.0), &grid).unwrap();

        let result = astar(start, end, &mut grid, Heading::Up, Heading::Down, &[]);
        assert!(matches!(result, Err(RouteError::NoRoute)));
    }
}
