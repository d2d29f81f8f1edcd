//! **gridnav-geom** — geometry primitives for grid navigation.
//!
//! This crate provides the types shared across the *gridnav* workspace:
//! integer cell coordinates ([`Point`], [`Range`]), continuous world-space
//! vectors and rectangles ([`Vec2`], [`Rect`]), and [`Polygon`] obstacles
//! with a separating-axis overlap test.

pub mod geom;
pub mod polygon;
pub mod rect;
pub mod vec2;

pub use geom::{Point, Range, RangeIter};
pub use polygon::{Polygon, Projection};
pub use rect::Rect;
pub use vec2::Vec2;
