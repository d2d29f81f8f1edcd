//! Rasterization of polygon obstacles into a [`NodeGrid`].
//!
//! Every cell is tested as its own world rectangle, `rect.width / width` by
//! `rect.height / height`; the cell is solid when that rectangle overlaps any
//! obstacle under the separating-axis test. When the bounds are a whole
//! number of cells this is the square of side `1 / resolution`; otherwise
//! the rounded cells are slightly larger or smaller than that square and
//! the rectangle still covers each cell exactly. Runs once per obstacle set,
//! not per query.

use gridnav_geom::{Polygon, Rect};
use log::debug;

use crate::config::GridConfig;
use crate::error::BuildError;
use crate::grid::NodeGrid;

/// Union of the bounds of every obstacle.
pub fn obstacle_bounds(obstacles: &[Polygon]) -> Rect {
    let mut all = Polygon::default();
    for p in obstacles {
        all.extend_from(p);
    }
    all.bounds()
}

/// Grid dimensions for `rect` at `resolution`.
fn dimensions(rect: Rect, resolution: f32) -> Result<(usize, usize), BuildError> {
    let w = (rect.width * resolution).round();
    let h = (rect.height * resolution).round();
    // f32 → usize saturates; anything past i32 cannot be addressed by Point.
    let (wu, hu) = (w.max(0.0) as usize, h.max(0.0) as usize);
    if wu == 0 || hu == 0 {
        return Err(BuildError::EmptyGrid {
            width: wu,
            height: hu,
        });
    }
    let max = i32::MAX as usize;
    if wu > max || hu > max || wu.checked_mul(hu).is_none_or(|n| n > max) {
        return Err(BuildError::TooLarge {
            width: wu,
            height: hu,
        });
    }
    Ok((wu, hu))
}

impl NodeGrid {
    /// Rasterize `obstacles` into a new grid.
    ///
    /// The grid covers `config.bounds`, or the combined bounds of the
    /// obstacles when none are given, with
    /// `round(width * resolution) × round(height * resolution)` cells.
    pub fn rasterize(obstacles: &[Polygon], config: &GridConfig) -> Result<Self, BuildError> {
        let resolution = config.resolution;
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(BuildError::InvalidResolution(resolution));
        }
        let rect = config.bounds.unwrap_or_else(|| obstacle_bounds(obstacles));
        if rect.is_empty() || !(rect.min().is_finite() && rect.max().is_finite()) {
            return Err(BuildError::EmptyBounds);
        }
        let (width, height) = dimensions(rect, resolution)?;

        let boxes: Vec<Rect> = obstacles.iter().map(Polygon::bounds).collect();
        let grid = NodeGrid::from_cells(rect, width, height, |_, cell_box| {
            let cell = Polygon::from(cell_box);
            obstacles
                .iter()
                .zip(&boxes)
                .any(|(obstacle, b)| b.overlaps(cell_box) && cell.intersects(obstacle))
        });

        debug!(
            "rasterized {} obstacles into {}x{} grid over {} ({} solid)",
            obstacles.len(),
            width,
            height,
            rect,
            grid.solid_count()
        );
        Ok(grid)
    }
}
