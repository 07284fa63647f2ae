//! End-to-end routing scenarios over the public API: free endpoints, bound
//! rectangles, overlapping shapes and diamond headings, plus the structural
//! invariants every emitted polyline must satisfy.

use cubit::binding::aabb_for_element;
use cubit::heading::heading_for_point_from_element;
use cubit::{
    route_elbow_arrow, ArrowElement, Element, ElementId, ElementType, FixedPointBinding, Heading,
    Point, RouteOptions, Scene,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn rectangle(id: &str, x: f64, y: f64, width: f64, height: f64) -> Element {
    Element::new(ElementId::new(id), ElementType::Rectangle, x, y, width, height)
}

fn free_arrow(x: f64, y: f64, points: Vec<Point>) -> ArrowElement {
    ArrowElement::new(ElementId::new("arrow"), x, y, points)
}

/// Global polyline of a routed arrow.
fn global_points(arrow: &ArrowElement) -> Vec<Point> {
    arrow
        .points
        .iter()
        .map(|p| p.add_point(Point::new(arrow.x, arrow.y)))
        .collect()
}

fn segment_headings(points: &[Point]) -> Vec<Heading> {
    points
        .windows(2)
        .map(|pair| Heading::from_vector(pair[1].sub_point(pair[0])))
        .collect()
}

fn bend_count(points: &[Point]) -> usize {
    segment_headings(points)
        .windows(2)
        .filter(|pair| pair[0] != pair[1])
        .count()
}

/// The structural invariants of any successful route.
fn assert_route_invariants(arrow: &ArrowElement, start_heading: Heading, end_heading: Heading) {
    let global = global_points(arrow);
    assert!(global.len() >= 2, "route must have at least two points");

    // every segment is axis-aligned and no two consecutive segments share a
    // heading
    for pair in global.windows(2) {
        let dx = pair[1].x - pair[0].x;
        let dy = pair[1].y - pair[0].y;
        assert!(
            (dx == 0.0) != (dy == 0.0),
            "segment {:?} -> {:?} is not axis-aligned",
            pair[0],
            pair[1]
        );
    }
    let headings = segment_headings(&global);
    for pair in headings.windows(2) {
        assert_ne!(pair[0], pair[1], "collinear points survived simplification");
    }

    // the route leaves along the start heading and enters against the end
    // heading
    assert_eq!(headings[0], start_heading, "first segment heading");
    assert_eq!(
        *headings.last().expect("route has segments"),
        end_heading.reverse(),
        "last segment heading"
    );

    // arrow-local normalization
    assert_eq!(arrow.points[0], Point::new(0.0, 0.0));
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (f64::MAX, f64::MAX, f64::MIN, f64::MIN);
    for p in &arrow.points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    assert_eq!(arrow.width, max_x - min_x, "width matches local extent");
    assert_eq!(arrow.height, max_y - min_y, "height matches local extent");
    assert_eq!(arrow.angle, 0.0);
    assert_eq!(arrow.roundness, None);
}

#[test]
fn two_free_points_on_the_same_row_link_straight() {
    init_logging();
    let scene = Scene::new();
    let points = vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)];
    let mut arrow = free_arrow(0.0, 0.0, points.clone());

    route_elbow_arrow(&mut arrow, scene.view(), &points, None, None, &RouteOptions::default());

    assert_eq!(
        global_points(&arrow),
        vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]
    );
    assert_route_invariants(&arrow, Heading::Right, Heading::Left);
}

#[test]
fn two_free_points_offset_bend_at_the_x_midpoint() {
    init_logging();
    let scene = Scene::new();
    let points = vec![Point::new(0.0, 0.0), Point::new(100.0, 50.0)];
    let mut arrow = free_arrow(0.0, 0.0, points.clone());

    route_elbow_arrow(&mut arrow, scene.view(), &points, None, None, &RouteOptions::default());

    assert_eq!(
        global_points(&arrow),
        vec![
            Point::new(0.0, 0.0),
            Point::new(50.0, 0.0),
            Point::new(50.0, 50.0),
            Point::new(100.0, 50.0),
        ]
    );
    assert_route_invariants(&arrow, Heading::Right, Heading::Left);
}

#[test]
fn reverse_facing_bound_endpoints_loop_around() {
    init_logging();
    // both endpoints exit rightward but the end shape sits to the left, so
    // the route has to swing around in a C
    let mut scene = Scene::new();
    scene.insert(rectangle("a", 0.0, 0.0, 50.0, 50.0));
    scene.insert(rectangle("b", -200.0, 0.0, 50.0, 50.0));

    let points = vec![Point::new(0.0, 0.0), Point::new(-200.0, 0.0)];
    let mut arrow = free_arrow(50.0, 25.0, points.clone());
    arrow.start_binding = Some(FixedPointBinding::new(
        ElementId::new("a"),
        Point::new(1.0, 0.5),
    ));
    arrow.end_binding = Some(FixedPointBinding::new(
        ElementId::new("b"),
        Point::new(1.0, 0.5),
    ));

    route_elbow_arrow(&mut arrow, scene.view(), &points, None, None, &RouteOptions::default());

    let global = global_points(&arrow);
    assert_route_invariants(&arrow, Heading::Right, Heading::Right);
    assert_eq!(bend_count(&global), 4, "a C-shaped loop has four bends");
    // ties between the two symmetric detours resolve upward
    let min_y = global.iter().map(|p| p.y).fold(f64::MAX, f64::min);
    assert!(min_y < 0.0, "the detour swings above the shapes, got {min_y}");
}

#[test]
fn bound_rectangles_link_with_a_single_elbow() {
    init_logging();
    let mut scene = Scene::new();
    scene.insert(rectangle("a", 0.0, 0.0, 50.0, 50.0));
    scene.insert(rectangle("b", 200.0, 200.0, 50.0, 50.0));

    let points = vec![Point::new(0.0, 0.0), Point::new(150.0, 200.0)];
    let mut arrow = free_arrow(50.0, 25.0, points.clone());
    arrow.start_binding = Some(FixedPointBinding::new(
        ElementId::new("a"),
        Point::new(1.0, 0.5),
    ));
    arrow.end_binding = Some(FixedPointBinding::new(
        ElementId::new("b"),
        Point::new(0.0, 0.5),
    ));

    route_elbow_arrow(&mut arrow, scene.view(), &points, None, None, &RouteOptions::default());

    let global = global_points(&arrow);
    assert_eq!(
        global,
        vec![
            Point::new(50.0, 25.0),
            Point::new(125.0, 25.0),
            Point::new(125.0, 225.0),
            Point::new(200.0, 225.0),
        ]
    );
    assert_route_invariants(&arrow, Heading::Right, Heading::Left);

    // the route never cuts through either shape
    let shapes = [
        (0.0, 0.0, 50.0, 50.0),
        (200.0, 200.0, 250.0, 250.0),
    ];
    for pair in global.windows(2) {
        let mid = pair[0].midpoint(pair[1]);
        for (min_x, min_y, max_x, max_y) in shapes {
            assert!(
                !(mid.x > min_x && mid.x < max_x && mid.y > min_y && mid.y < max_y),
                "segment midpoint {mid:?} crosses a bound shape"
            );
        }
    }
}

#[test]
fn overlapping_bound_rectangles_still_route() {
    init_logging();
    let mut scene = Scene::new();
    scene.insert(rectangle("a", 0.0, 0.0, 100.0, 100.0));
    scene.insert(rectangle("b", 50.0, 50.0, 100.0, 100.0));

    let points = vec![Point::new(0.0, 0.0), Point::new(-50.0, 50.0)];
    let mut arrow = free_arrow(100.0, 50.0, points.clone());
    arrow.start_binding = Some(FixedPointBinding::new(
        ElementId::new("a"),
        Point::new(1.0, 0.5),
    ));
    arrow.end_binding = Some(FixedPointBinding::new(
        ElementId::new("b"),
        Point::new(0.0, 0.5),
    ));

    route_elbow_arrow(&mut arrow, scene.view(), &points, None, None, &RouteOptions::default());

    let global = global_points(&arrow);
    assert_route_invariants(&arrow, Heading::Right, Heading::Left);
    assert!(
        bend_count(&global) >= 4,
        "overlapping endpoints force at least four bends, got {}",
        bend_count(&global)
    );
    // the route detours off the straight band between the endpoints
    let min_y = global.iter().map(|p| p.y).fold(f64::MAX, f64::min);
    let max_y = global.iter().map(|p| p.y).fold(f64::MIN, f64::max);
    assert!(min_y < 50.0 || max_y > 100.0);
}

#[test]
fn wide_diamond_upper_right_edge_classifies_up() {
    init_logging();
    // diamond centered at (100, 100) with half-extents 60 x 30; its
    // top-right edge runs shallow, so bind points on it exit upward
    let diamond = Element::new(
        ElementId::new("d"),
        ElementType::Diamond,
        40.0,
        70.0,
        120.0,
        60.0,
    );
    let aabb = aabb_for_element(&diamond, [0.0; 4]);
    assert_eq!(
        heading_for_point_from_element(&diamond, &aabb, Point::new(130.0, 85.0)),
        Heading::Up
    );
}

#[test]
fn diamond_binding_routes_out_of_the_top() {
    init_logging();
    let mut scene = Scene::new();
    let diamond = Element::new(
        ElementId::new("d"),
        ElementType::Diamond,
        40.0,
        70.0,
        120.0,
        60.0,
    );
    scene.insert(diamond);

    // bound at (130, 85) on the top-right edge: fixed point (0.75, 0.25)
    let points = vec![Point::new(0.0, 0.0), Point::new(170.0, -135.0)];
    let mut arrow = free_arrow(130.0, 85.0, points.clone());
    arrow.start_binding = Some(FixedPointBinding::new(
        ElementId::new("d"),
        Point::new(0.75, 0.25),
    ));

    route_elbow_arrow(&mut arrow, scene.view(), &points, None, None, &RouteOptions::default());

    // end point (300, -50) is up and to the right; the free end faces the
    // start, which lies below-left of it
    assert_route_invariants(&arrow, Heading::Up, Heading::Left);
}

#[test]
fn free_point_sweep_holds_invariants() {
    init_logging();
    let scene = Scene::new();
    let targets = [
        Point::new(140.0, 30.0),
        Point::new(-120.0, 40.0),
        Point::new(60.0, -180.0),
        Point::new(10.0, 200.0),
        Point::new(-90.0, -90.0),
    ];

    for target in targets {
        let points = vec![Point::new(0.0, 0.0), target];
        let mut arrow = free_arrow(0.0, 0.0, points.clone());
        route_elbow_arrow(&mut arrow, scene.view(), &points, None, None, &RouteOptions::default());

        let start_heading = Heading::from_vector(target);
        let end_heading = Heading::from_vector(Point::new(0.0, 0.0).sub_point(target));
        assert_route_invariants(&arrow, start_heading, end_heading);

        // the polyline really connects the endpoints
        let global = global_points(&arrow);
        assert_eq!(global[0], Point::new(0.0, 0.0));
        assert_eq!(*global.last().unwrap(), target);
    }
}

#[test]
fn dragging_binds_to_the_hovered_shape() {
    init_logging();
    let mut scene = Scene::new();
    scene.insert(rectangle("r", 200.0, -25.0, 80.0, 50.0));

    // the dragged end point sits just inside the shape's hover zone
    let points = vec![Point::new(0.0, 0.0), Point::new(195.0, 0.0)];
    let mut arrow = free_arrow(0.0, 0.0, points.clone());

    let options = RouteOptions {
        is_dragging: true,
        ..RouteOptions::default()
    };
    route_elbow_arrow(&mut arrow, scene.view(), &points, None, None, &options);

    let global = global_points(&arrow);
    // the end snapped onto the shape outline (its left edge, mid corridor)
    assert_eq!(*global.last().unwrap(), Point::new(200.0, 0.0));
    assert_route_invariants(&arrow, Heading::Right, Heading::Left);
}

#[test]
fn disable_binding_keeps_dragged_endpoints_free() {
    init_logging();
    let mut scene = Scene::new();
    scene.insert(rectangle("r", 200.0, -25.0, 80.0, 50.0));

    let points = vec![Point::new(0.0, 0.0), Point::new(195.0, 0.0)];
    let mut arrow = free_arrow(0.0, 0.0, points.clone());

    let options = RouteOptions {
        is_dragging: true,
        disable_binding: true,
        ..RouteOptions::default()
    };
    route_elbow_arrow(&mut arrow, scene.view(), &points, None, None, &options);

    let global = global_points(&arrow);
    assert_eq!(*global.last().unwrap(), Point::new(195.0, 0.0));
}
