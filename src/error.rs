use miette::Diagnostic;
use thiserror::Error;

/// Failures the routing pipeline can surface.
///
/// None of these are fatal: the public entry point logs the diagnostic and
/// leaves the arrow exactly as it was.
#[derive(Debug, Error, Diagnostic)]
pub enum RouteError {
    /// A* exhausted the open set without reaching the end node
    #[error("elbow arrow cannot find a route")]
    #[diagnostic(code(cubit::route::no_route))]
    NoRoute,

    /// The proposed point list was empty
    #[error("arrow routing needs at least one local point")]
    #[diagnostic(code(cubit::route::missing_endpoints))]
    MissingEndpoints,

    /// An endpoint projection fell off the routing grid
    #[error("routing endpoint does not lie on the grid")]
    #[diagnostic(code(cubit::route::outside_grid))]
    OutsideGrid,
}
