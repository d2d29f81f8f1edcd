//! Grid pathfinding over polygon obstacles.
//!
//! Obstacles are rasterized once into a [`NodeGrid`]; each query then runs
//! an A\* search over the grid's walkable cells and returns world-space
//! waypoints.
//!
//! - **Rasterization** ([`NodeGrid::rasterize`]): a cell is solid when its
//!   rectangle overlaps any obstacle polygon.
//! - **Search** ([`Pathfinder::find_path`], [`Pathfinder::find_path_detailed`]):
//!   8-connected moves costing [`CARDINAL_COST`] / [`DIAGONAL_COST`], a
//!   Manhattan heuristic, and ties broken by the order nodes entered the
//!   open set, so repeated queries return identical paths.
//!
//! A [`Pathfinder`] keeps its grid and scratch buffers between queries;
//! call [`Pathfinder::rebuild`] when the obstacles change.
//!
//! # Example
//!
//! ```
//! use gridnav_geom::{Polygon, Rect, Vec2};
//! use gridnav_paths::{GridConfig, Pathfinder};
//!
//! let wall = Polygon::from(Rect::new(2.0, 0.0, 1.0, 4.0));
//! let config = GridConfig::new(1.0).with_bounds(Rect::new(0.0, 0.0, 5.0, 5.0));
//! let mut finder = Pathfinder::build(&[wall], &config).unwrap();
//!
//! let path = finder.find_path(Vec2::new(0.5, 0.5), Vec2::new(4.5, 0.5)).unwrap();
//! // Goal first, start last.
//! assert_eq!(path.first(), Some(&Vec2::new(4.5, 0.5)));
//! assert_eq!(path.last(), Some(&Vec2::new(0.5, 0.5)));
//! ```

mod config;
mod distance;
mod error;
mod grid;
mod node;
mod pathfinder;
mod raster;

pub use config::{GridConfig, SearchConfig};
pub use distance::{CARDINAL_COST, DIAGONAL_COST, chebyshev, manhattan, step_cost};
pub use error::{BuildError, PathError};
pub use grid::NodeGrid;
pub use node::{Node, NodeStatus};
pub use pathfinder::{PathResult, Pathfinder};
pub use raster::obstacle_bounds;

/// Integer cell coordinate within a [`NodeGrid`].
pub type GridIndex = gridnav_geom::Point;
