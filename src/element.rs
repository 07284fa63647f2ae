//! The element data model the router reads and writes: diagram shapes,
//! elbow arrows, fixed-point bindings and the atomic arrow update.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, Point};

/// Identifier of a scene element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Kind of a diagram shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Rectangle,
    Diamond,
    Ellipse,
    Image,
    Frame,
    Text,
    Arrow,
}

impl ElementType {
    /// Whether arrows may bind to this kind of element
    pub fn is_bindable(self) -> bool {
        !matches!(self, Self::Arrow)
    }

    /// Shapes whose occupiable area is rectangular, as opposed to the
    /// diamond and ellipse outlines
    pub fn is_rectanguloid(self) -> bool {
        matches!(self, Self::Rectangle | Self::Image | Self::Frame | Self::Text)
    }
}

/// A diagram shape as the router sees it. Rotation is about the geometric
/// center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Radians, clockwise in screen coordinates
    #[serde(default)]
    pub angle: f64,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub version: u64,
}

impl Element {
    pub fn new(
        id: ElementId,
        element_type: ElementType,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            id,
            element_type,
            x,
            y,
            width,
            height,
            angle: 0.0,
            is_deleted: false,
            version: 0,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Unrotated bounding box
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// Arrowhead kinds an elbow arrow can carry on either end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arrowhead {
    Arrow,
    Bar,
    Dot,
    Triangle,
    Diamond,
}

/// Association of an arrow endpoint with an element and a parameterized
/// point on the element's local box. `fixed_point` components are ratios in
/// `[0, 1]`; `focus` and `gap` are carried for the host's bind bookkeeping
/// and are not consumed by the router.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedPointBinding {
    pub element_id: ElementId,
    pub fixed_point: Point,
    #[serde(default)]
    pub focus: f64,
    #[serde(default)]
    pub gap: f64,
}

impl FixedPointBinding {
    pub fn new(element_id: ElementId, fixed_point: Point) -> Self {
        Self {
            element_id,
            fixed_point,
            focus: 0.0,
            gap: 0.0,
        }
    }
}

/// The arrow entity being routed. `points` are arrow-local with the first at
/// the arrow's `(x, y)` origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowElement {
    pub id: ElementId,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub angle: f64,
    pub points: Vec<Point>,
    #[serde(default)]
    pub start_binding: Option<FixedPointBinding>,
    #[serde(default)]
    pub end_binding: Option<FixedPointBinding>,
    #[serde(default)]
    pub start_arrowhead: Option<Arrowhead>,
    #[serde(default)]
    pub end_arrowhead: Option<Arrowhead>,
    #[serde(default)]
    pub roundness: Option<f64>,
    #[serde(default)]
    pub version: u64,
}

impl ArrowElement {
    pub fn new(id: ElementId, x: f64, y: f64, points: Vec<Point>) -> Self {
        Self {
            id,
            x,
            y,
            width: 0.0,
            height: 0.0,
            angle: 0.0,
            points,
            start_binding: None,
            end_binding: None,
            start_arrowhead: None,
            end_arrowhead: None,
            roundness: None,
            version: 0,
        }
    }
}

/// Binding changes merged into an update. The outer `Option` distinguishes
/// "leave untouched" from "overwrite" (possibly clearing the binding).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingUpdates {
    pub start_binding: Option<Option<FixedPointBinding>>,
    pub end_binding: Option<Option<FixedPointBinding>>,
}

/// The single atomic update a successful routing call writes onto the arrow.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowUpdate {
    pub points: Vec<Point>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub angle: f64,
    pub roundness: Option<f64>,
    pub bindings: BindingUpdates,
}

/// Mutation sink: applies `update` to the arrow in one write, bumps its
/// version and, when `inform_mutation` is set, emits the change event.
pub fn apply_arrow_update(arrow: &mut ArrowElement, update: ArrowUpdate, inform_mutation: bool) {
    arrow.points = update.points;
    arrow.x = update.x;
    arrow.y = update.y;
    arrow.width = update.width;
    arrow.height = update.height;
    arrow.angle = update.angle;
    arrow.roundness = update.roundness;
    if let Some(start_binding) = update.bindings.start_binding {
        arrow.start_binding = start_binding;
    }
    if let Some(end_binding) = update.bindings.end_binding {
        arrow.end_binding = end_binding;
    }
    arrow.version += 1;
    if inform_mutation {
        debug!(arrow = arrow.id.as_str(), version = arrow.version; "arrow points updated");
    }
}
