//! Elbow-arrow routing for diagram editors.
//!
//! Given two arrow endpoints — free points in the plane or bindings onto
//! diagram shapes — the router produces an orthogonal polyline that leaves
//! and enters along the shapes' outward headings, avoids the two endpoint
//! shapes, and turns as few times as possible. The result is written back
//! onto the arrow element as a single atomic update.
//!
//! ```
//! use cubit::{route_elbow_arrow, ArrowElement, ElementId, Point, RouteOptions, Scene};
//!
//! let scene = Scene::new();
//! let points = vec![Point::new(0.0, 0.0), Point::new(100.0, 50.0)];
//! let mut arrow = ArrowElement::new(ElementId::new("a1"), 0.0, 0.0, points.clone());
//!
//! route_elbow_arrow(&mut arrow, scene.view(), &points, None, None, &RouteOptions::default());
//!
//! // one elbow at the midpoint of the x span
//! assert_eq!(arrow.points.len(), 4);
//! assert_eq!(arrow.points[0], Point::new(0.0, 0.0));
//! ```

pub mod binding;
pub mod config;
pub mod element;
pub mod error;
pub mod geometry;
pub mod heading;
pub mod route;
pub mod scene;

pub use config::RoutingConfig;
pub use element::{
    apply_arrow_update, ArrowElement, ArrowUpdate, Arrowhead, BindingUpdates, Element, ElementId,
    ElementType, FixedPointBinding,
};
pub use error::RouteError;
pub use geometry::{Bounds, LineSegment, Point, Vector};
pub use heading::Heading;
pub use route::{route_elbow_arrow, RouteOptions};
pub use scene::{Scene, SceneView};
