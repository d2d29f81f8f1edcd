//! Error types for grid construction and path queries.

use gridnav_geom::Vec2;
use thiserror::Error;

/// Rejected grid construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BuildError {
    /// Resolution must be finite and strictly positive.
    #[error("invalid resolution {0}: expected a finite value > 0")]
    InvalidResolution(f32),
    /// No explicit bounds were given and the obstacles enclose no area, or
    /// the explicit bounds are empty or non-finite.
    #[error("world bounds are empty")]
    EmptyBounds,
    /// The bounds and resolution round to zero cells along an axis.
    #[error("grid would be {width}x{height} cells; both dimensions must be at least 1")]
    EmptyGrid { width: usize, height: usize },
    /// The bounds and resolution produce more cells than a grid can index.
    #[error("grid would be {width}x{height} cells, which exceeds the addressable size")]
    TooLarge { width: usize, height: usize },
}

/// Why a path query produced no path.
///
/// These are ordinary outcomes of a query, not faults: the caller decides
/// whether to retry with other endpoints or fall back.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PathError {
    /// A query endpoint has a NaN or infinite coordinate.
    #[error("query point {0} is not finite")]
    NonFinitePoint(Vec2),
    /// Every cell of the grid is solid, so the endpoints cannot be snapped.
    #[error("grid has no walkable cell")]
    NoWalkableNode,
    /// The open set emptied before the goal was reached.
    #[error("goal unreachable after expanding {nodes_expanded} nodes")]
    Unreachable { nodes_expanded: usize },
    /// The configured iteration cap was hit before the goal was reached.
    #[error("search gave up after {limit} expansions")]
    IterationLimit { limit: usize },
}
