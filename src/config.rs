//! Routing tunables. The crate performs no file I/O itself; hosts embed
//! [`RoutingConfig`] in their own configuration and hand it to the router
//! through `RouteOptions`.

use serde::Deserialize;

/// Distances and tolerances of the elbow router, in scene units.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Clearance the dynamic obstacle boxes keep around bound shapes, and
    /// the slack added when the two endpoint regions overlap.
    pub base_padding: f64,
    /// Distance bound arrows keep from the element outline.
    pub fixed_binding_distance: f64,
    /// Half-extent of the obstacle square around a free endpoint.
    pub free_endpoint_padding: f64,
    /// Euclidean clearance bind points keep from rectangle corners.
    pub corner_clearance: f64,
    /// Fraction of an edge within which bind points snap to its midpoint.
    pub mid_snap_tolerance: f64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_padding: 40.0,
            fixed_binding_distance: 4.0,
            free_endpoint_padding: 2.0,
            corner_clearance: 8.0,
            mid_snap_tolerance: 0.05,
        }
    }
}

impl RoutingConfig {
    /// Outward expansion of a bound shape's raw obstacle box on the heading
    /// side.
    pub fn bound_head_offset(&self) -> f64 {
        4.0 * self.fixed_binding_distance
    }

    /// Heading-side padding of the dynamic obstacle boxes; arrowheads need
    /// extra room to render outside the shape.
    pub fn dynamic_head_offset(&self, has_arrowhead: bool) -> f64 {
        let clearance = if has_arrowhead { 6.0 } else { 2.0 };
        self.base_padding - clearance * self.fixed_binding_distance
    }
}
