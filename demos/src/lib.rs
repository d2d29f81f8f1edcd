//! Shared scenes and ASCII rendering for the terminal demos.
//!
//! Demonstrates: building a [`Pathfinder`] from polygon obstacles, querying
//! paths between world points, and drawing the walkability map with the
//! found path overlaid.

use gridnav_geom::{Point, Polygon, Rect, Vec2};
use gridnav_paths::{GridConfig, NodeGrid, PathResult, Pathfinder};
use rand::Rng;

pub const WORLD: Rect = Rect {
    x: 0.0,
    y: 0.0,
    width: 40.0,
    height: 20.0,
};

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Install a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
/// Library `log` records are forwarded through the subscriber's log bridge.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

// ---------------------------------------------------------------------------
// Scenes
// ---------------------------------------------------------------------------

/// Fixed layout: three staggered walls with alternating gaps and a
/// diamond-shaped pillar.
pub fn maze_obstacles() -> Vec<Polygon> {
    vec![
        Polygon::from(Rect::new(8.0, 0.0, 2.0, 15.0)),
        Polygon::from(Rect::new(18.0, 5.0, 2.0, 15.0)),
        Polygon::from(Rect::new(28.0, 0.0, 2.0, 15.0)),
        Polygon::new([
            Vec2::new(34.0, 13.0),
            Vec2::new(37.0, 16.0),
            Vec2::new(34.0, 19.0),
            Vec2::new(31.0, 16.0),
        ]),
    ]
}

/// `count` random convex obstacles inside `area`: axis-aligned boxes and
/// triangles, each a few units across.
pub fn scatter_obstacles(rng: &mut impl Rng, area: Rect, count: usize) -> Vec<Polygon> {
    (0..count)
        .map(|_| {
            let c = Vec2::new(
                rng.random_range(area.x..area.x + area.width),
                rng.random_range(area.y..area.y + area.height),
            );
            let r = rng.random_range(0.5..2.5);
            if rng.random_bool(0.5) {
                Polygon::square(c, 2.0 * r)
            } else {
                Polygon::new([
                    c + Vec2::new(0.0, -r),
                    c + Vec2::new(r, r),
                    c + Vec2::new(-r, r),
                ])
            }
        })
        .collect()
}

/// A uniformly random point inside `area`.
pub fn random_point(rng: &mut impl Rng, area: Rect) -> Vec2 {
    Vec2::new(
        rng.random_range(area.x..area.x + area.width),
        rng.random_range(area.y..area.y + area.height),
    )
}

pub fn build(obstacles: &[Polygon], resolution: f32) -> Result<Pathfinder, gridnav_paths::BuildError> {
    Pathfinder::build(obstacles, &GridConfig::new(resolution).with_bounds(WORLD))
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Draw `grid` as text: `#` solid, `.` open, `*` path, `S` start, `G` goal.
pub fn render(grid: &NodeGrid, path: Option<&PathResult>) -> String {
    let mut rows: Vec<Vec<char>> = grid
        .to_string()
        .lines()
        .map(|l| l.chars().collect())
        .collect();
    if let Some(path) = path {
        let mut mark = |p: Point, ch: char| {
            if let Some(c) = rows
                .get_mut(p.y as usize)
                .and_then(|row| row.get_mut(p.x as usize))
            {
                *c = ch;
            }
        };
        for &p in &path.cells {
            mark(p, '*');
        }
        if let Some(&goal) = path.cells.first() {
            mark(goal, 'G');
        }
        if let Some(&start) = path.cells.last() {
            mark(start, 'S');
        }
    }
    let mut out = String::with_capacity(grid.len() + grid.height());
    for row in rows {
        out.extend(row);
        out.push('\n');
    }
    out
}
