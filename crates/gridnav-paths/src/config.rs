//! Grid construction and search settings.

use gridnav_geom::Rect;

/// Settings for rasterizing obstacles into a grid.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GridConfig {
    /// Cells per world unit along each axis.
    pub resolution: f32,
    /// World rectangle covered by the grid. When `None`, the union of the
    /// obstacle bounds is used.
    pub bounds: Option<Rect>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            resolution: 1.0,
            bounds: None,
        }
    }
}

impl GridConfig {
    pub fn new(resolution: f32) -> Self {
        Self {
            resolution,
            ..Self::default()
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }
}

/// Settings applied to every path query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SearchConfig {
    /// Maximum number of node expansions per query. `None` searches until
    /// the goal is found or the open set is empty.
    pub max_iterations: Option<usize>,
}

impl SearchConfig {
    pub fn with_max_iterations(mut self, limit: usize) -> Self {
        self.max_iterations = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let g = GridConfig::default();
        assert_eq!(g.resolution, 1.0);
        assert_eq!(g.bounds, None);
        assert_eq!(SearchConfig::default().max_iterations, None);
    }

    #[test]
    fn builders() {
        let r = Rect::new(0.0, 0.0, 4.0, 2.0);
        let g = GridConfig::new(4.0).with_bounds(r);
        assert_eq!(g.bounds, Some(r));
        assert_eq!(g.resolution, 4.0);
        assert_eq!(
            SearchConfig::default().with_max_iterations(7).max_iterations,
            Some(7)
        );
    }
}
