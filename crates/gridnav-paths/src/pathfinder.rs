use gridnav_geom::{Point, Polygon, Vec2};
use log::{debug, trace, warn};

use crate::config::{GridConfig, SearchConfig};
use crate::distance::step_cost;
use crate::error::{BuildError, PathError};
use crate::grid::NodeGrid;
use crate::node::NodeStatus;

/// A successful query: waypoints plus search metadata.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult {
    /// Cell centers from the goal back to the start.
    pub waypoints: Vec<Vec2>,
    /// Grid coordinates of the same cells, in the same order.
    pub cells: Vec<Point>,
    /// Accumulated step cost of the goal node.
    pub total_cost: i32,
    /// Nodes closed before the goal was taken from the open set.
    pub nodes_expanded: usize,
    /// Reconstruction met a parent cycle and stopped early. The waypoints
    /// are then only a suffix of a path and should not be trusted.
    pub truncated: bool,
}

impl PathResult {
    /// Waypoints in travel order, start first.
    pub fn forward(&self) -> Vec<Vec2> {
        self.waypoints.iter().rev().copied().collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}

/// Offsets visited by following parent links from a node.
#[derive(Debug, PartialEq)]
pub(crate) struct Trail {
    pub(crate) offsets: Vec<usize>,
    pub(crate) truncated: bool,
}

/// Follow parent links from `goal` until a node without a parent. Stops as
/// soon as a node repeats, so a corrupted parent chain cannot loop forever.
pub(crate) fn reconstruct(grid: &NodeGrid, goal: usize) -> Trail {
    let mut seen = vec![false; grid.len()];
    let mut offsets = Vec::new();
    let mut cur = Some(goal);
    while let Some(i) = cur {
        let Some(node) = grid.node_at(i) else {
            break;
        };
        if seen[i] {
            warn!(
                "parent cycle at {} after {} waypoints; path truncated",
                node.index(),
                offsets.len()
            );
            return Trail {
                offsets,
                truncated: true,
            };
        }
        seen[i] = true;
        offsets.push(i);
        cur = node.parent();
    }
    Trail {
        offsets,
        truncated: false,
    }
}

// ---------------------------------------------------------------------------
// Pathfinder
// ---------------------------------------------------------------------------

/// Owns a rasterized [`NodeGrid`] and answers path queries over it.
///
/// Queries take `&mut self`: the grid's per-node bookkeeping is rewritten by
/// every search, so one `Pathfinder` serves one query at a time. Scratch
/// buffers are kept between queries.
#[derive(Clone, Debug)]
pub struct Pathfinder {
    grid: NodeGrid,
    search: SearchConfig,
    nbuf: Vec<usize>,
}

impl Pathfinder {
    /// Rasterize `obstacles` and wrap the resulting grid.
    pub fn build(obstacles: &[Polygon], config: &GridConfig) -> Result<Self, BuildError> {
        NodeGrid::rasterize(obstacles, config).map(Self::from_grid)
    }

    /// Use an already rasterized grid.
    pub fn from_grid(grid: NodeGrid) -> Self {
        Self {
            grid,
            search: SearchConfig::default(),
            nbuf: Vec::with_capacity(8),
        }
    }

    pub fn with_search_config(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Replace the grid with a fresh rasterization of `obstacles`, dropping
    /// any state left by earlier searches. On error the current grid is kept.
    pub fn rebuild(&mut self, obstacles: &[Polygon], config: &GridConfig) -> Result<(), BuildError> {
        self.grid = NodeGrid::rasterize(obstacles, config)?;
        Ok(())
    }

    #[inline]
    pub fn grid(&self) -> &NodeGrid {
        &self.grid
    }

    /// Mutable access for driving the grid's search state by hand. The next
    /// query resets whatever is left.
    #[inline]
    pub fn grid_mut(&mut self) -> &mut NodeGrid {
        &mut self.grid
    }

    #[inline]
    pub fn search_config(&self) -> &SearchConfig {
        &self.search
    }

    pub fn set_search_config(&mut self, search: SearchConfig) {
        self.search = search;
    }

    /// The walkable cell nearest to `p`, as used for query endpoints.
    pub fn snap(&self, p: Vec2) -> Option<Point> {
        if !p.is_finite() {
            return None;
        }
        self.grid
            .nearest_walkable(p)
            .and_then(|i| self.grid.node_at(i))
            .map(|n| n.index())
    }

    /// Find a path between two world points.
    ///
    /// Waypoints run from the `end` side back to the `start` side; reverse
    /// them for travel order. Returns `None` when no path exists.
    pub fn find_path(&mut self, start: Vec2, end: Vec2) -> Option<Vec<Vec2>> {
        match self.find_path_detailed(start, end) {
            Ok(result) => Some(result.waypoints),
            Err(e) => {
                debug!("no path from {start} to {end}: {e}");
                None
            }
        }
    }

    /// Like [`find_path`](Self::find_path), reporting why a query failed and
    /// how much work it did.
    pub fn find_path_detailed(&mut self, start: Vec2, end: Vec2) -> Result<PathResult, PathError> {
        for p in [start, end] {
            if !p.is_finite() {
                return Err(PathError::NonFinitePoint(p));
            }
        }

        self.grid.reset();
        let start_idx = self
            .grid
            .nearest_walkable(start)
            .ok_or(PathError::NoWalkableNode)?;
        let goal_idx = self
            .grid
            .nearest_walkable(end)
            .ok_or(PathError::NoWalkableNode)?;
        trace!(
            "snapped {start} -> {}, {end} -> {}",
            self.grid.point(start_idx),
            self.grid.point(goal_idx)
        );

        self.grid.compute_heuristic(goal_idx);
        if let Some(n) = self.grid.node_at_mut(start_idx) {
            n.g = 0;
            n.parent = None;
        }
        self.grid.open(start_idx);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut expanded = 0usize;

        let outcome = loop {
            let Some(ci) = self.grid.next_to_expand() else {
                break Err(PathError::Unreachable {
                    nodes_expanded: expanded,
                });
            };

            // The goal is reported while still open.
            if ci == goal_idx {
                break Ok(());
            }

            if let Some(limit) = self.search.max_iterations {
                if expanded >= limit {
                    break Err(PathError::IterationLimit { limit });
                }
            }

            self.grid.close(ci);
            expanded += 1;
            let current_g = self.grid.node_at(ci).map_or(0, |n| n.g());
            let current_point = self.grid.point(ci);

            self.grid.neighbors(ci, &mut nbuf);
            for &ni in nbuf.iter() {
                let np = self.grid.point(ni);
                let tentative_g = current_g + step_cost(current_point, np);

                let Some(n) = self.grid.node_at_mut(ni) else {
                    continue;
                };
                let improves = match n.status {
                    NodeStatus::Unvisited => true,
                    NodeStatus::Open => tentative_g < n.g,
                    NodeStatus::Closed => false,
                };
                if !improves {
                    continue;
                }
                n.g = tentative_g;
                n.parent = Some(ci);
                self.grid.open(ni);
            }
        };

        self.nbuf = nbuf;

        if let Err(e) = outcome {
            debug!(
                "search {} -> {} failed: {e}",
                self.grid.point(start_idx),
                self.grid.point(goal_idx)
            );
            return Err(e);
        }

        let trail = reconstruct(&self.grid, goal_idx);
        let (waypoints, cells) = trail
            .offsets
            .iter()
            .filter_map(|&i| self.grid.node_at(i))
            .map(|n| (n.position(), n.index()))
            .unzip();
        let total_cost = self.grid.node_at(goal_idx).map_or(0, |n| n.g());

        debug!(
            "path {} -> {}: {} waypoints, cost {total_cost}, {expanded} nodes expanded",
            self.grid.point(start_idx),
            self.grid.point(goal_idx),
            trail.offsets.len()
        );

        Ok(PathResult {
            waypoints,
            cells,
            total_cost,
            nodes_expanded: expanded,
            truncated: trail.truncated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{CARDINAL_COST, DIAGONAL_COST, chebyshev};
    use gridnav_geom::Rect;

    fn open_field(w: f32, h: f32) -> Pathfinder {
        let cfg = GridConfig::new(1.0).with_bounds(Rect::new(0.0, 0.0, w, h));
        Pathfinder::build(&[], &cfg).unwrap()
    }

    fn center(x: i32, y: i32) -> Vec2 {
        Vec2::new(x as f32 + 0.5, y as f32 + 0.5)
    }

    /// Sum of step costs along the returned cells.
    fn cost_of(cells: &[Point]) -> i32 {
        cells.windows(2).map(|w| step_cost(w[0], w[1])).sum()
    }

    fn assert_valid(result: &PathResult, grid: &NodeGrid, start: Vec2, end: Vec2) {
        assert!(!result.truncated);
        assert_eq!(result.waypoints.len(), result.cells.len());
        for w in result.cells.windows(2) {
            assert!(w[0].is_adjacent(w[1]), "{} and {} are not adjacent", w[0], w[1]);
        }
        for c in &result.cells {
            assert!(!grid.is_solid(*c), "path crosses solid cell {c}");
        }
        let first = result.waypoints[0];
        let last = *result.waypoints.last().unwrap();
        assert!((first.x - end.x).abs() <= 1.0 && (first.y - end.y).abs() <= 1.0);
        assert!((last.x - start.x).abs() <= 1.0 && (last.y - start.y).abs() <= 1.0);
    }

    #[test]
    fn open_grid_paths_are_valid() {
        let mut pf = open_field(5.0, 5.0);
        let pairs = [
            ((0, 0), (4, 4)),
            ((4, 0), (0, 4)),
            ((2, 0), (2, 4)),
            ((0, 3), (4, 1)),
            ((1, 1), (3, 4)),
        ];
        for ((sx, sy), (ex, ey)) in pairs {
            let (start, end) = (center(sx, sy), center(ex, ey));
            let result = pf.find_path_detailed(start, end).unwrap();
            assert_valid(&result, pf.grid(), start, end);
            assert_eq!(result.cells[0], Point::new(ex, ey));
            assert_eq!(*result.cells.last().unwrap(), Point::new(sx, sy));
            // Octile distance is optimal on an open grid.
            let (dx, dy) = ((ex - sx).abs(), (ey - sy).abs());
            let diag = dx.min(dy);
            let straight = dx.max(dy) - diag;
            assert_eq!(result.total_cost, diag * DIAGONAL_COST + straight * CARDINAL_COST);
            assert_eq!(cost_of(&result.cells), result.total_cost);
        }
    }

    #[test]
    fn unsnapped_endpoints_land_within_a_cell() {
        let mut pf = open_field(5.0, 5.0);
        let (start, end) = (Vec2::new(0.1, 4.9), Vec2::new(4.2, 0.3));
        let path = pf.find_path(start, end).unwrap();
        assert_eq!(path[0], center(4, 0));
        assert_eq!(*path.last().unwrap(), center(0, 4));
    }

    #[test]
    fn three_by_three_diagonal_cost() {
        let mut pf = open_field(3.0, 3.0);
        let result = pf.find_path_detailed(center(0, 0), center(2, 2)).unwrap();
        assert!(
            result.total_cost == 2 * DIAGONAL_COST || result.total_cost == 4 * CARDINAL_COST,
            "cost {}",
            result.total_cost
        );
    }

    #[test]
    fn wall_makes_goal_unreachable() {
        let wall = Polygon::from(Rect::new(2.0, 0.0, 1.0, 5.0));
        let cfg = GridConfig::new(1.0).with_bounds(Rect::new(0.0, 0.0, 5.0, 5.0));
        let mut pf = Pathfinder::build(&[wall], &cfg).unwrap();
        assert_eq!(pf.grid().solid_count(), 5);
        assert!(pf.find_path(center(0, 2), center(4, 2)).is_none());
        let err = pf.find_path_detailed(center(0, 2), center(4, 2)).unwrap_err();
        // Every cell left of the wall gets expanded before giving up.
        assert_eq!(err, PathError::Unreachable { nodes_expanded: 10 });
    }

    #[test]
    fn path_goes_around_obstacle() {
        let block = Polygon::from(Rect::new(2.0, 0.0, 1.0, 4.0));
        let cfg = GridConfig::new(1.0).with_bounds(Rect::new(0.0, 0.0, 5.0, 5.0));
        let mut pf = Pathfinder::build(&[block], &cfg).unwrap();
        let (start, end) = (center(0, 0), center(4, 0));
        let result = pf.find_path_detailed(start, end).unwrap();
        assert_valid(&result, pf.grid(), start, end);
        assert!(result.cells.contains(&Point::new(2, 4)));
        assert_eq!(result.total_cost, cost_of(&result.cells));
    }

    #[test]
    fn fully_solid_grid_has_no_walkable_node() {
        let cover = Polygon::from(Rect::new(-1.0, -1.0, 10.0, 10.0));
        let cfg = GridConfig::new(1.0).with_bounds(Rect::new(0.0, 0.0, 3.0, 3.0));
        let mut pf = Pathfinder::build(&[cover], &cfg).unwrap();
        assert_eq!(pf.snap(Vec2::new(1.0, 1.0)), None);
        assert_eq!(
            pf.find_path_detailed(Vec2::ZERO, Vec2::new(2.0, 2.0)),
            Err(PathError::NoWalkableNode)
        );
    }

    #[test]
    fn endpoints_snap_off_solid_cells() {
        let pillar = Polygon::from(Rect::new(2.0, 2.0, 1.0, 1.0));
        let cfg = GridConfig::new(1.0).with_bounds(Rect::new(0.0, 0.0, 5.0, 5.0));
        let mut pf = Pathfinder::build(&[pillar], &cfg).unwrap();
        // The pillar's four open neighbours tie; scan order picks (2, 1).
        assert_eq!(pf.snap(center(2, 2)), Some(Point::new(2, 1)));
        let result = pf.find_path_detailed(center(0, 0), center(2, 2)).unwrap();
        assert_eq!(result.cells[0], Point::new(2, 1));
    }

    #[test]
    fn same_cell_is_a_single_waypoint() {
        let mut pf = open_field(4.0, 4.0);
        let result = pf
            .find_path_detailed(Vec2::new(1.2, 1.3), Vec2::new(1.8, 1.6))
            .unwrap();
        assert_eq!(result.waypoints, vec![center(1, 1)]);
        assert_eq!(result.total_cost, 0);
        assert_eq!(result.nodes_expanded, 0);
    }

    #[test]
    fn iteration_cap_fails_the_search() {
        let cfg = GridConfig::new(1.0).with_bounds(Rect::new(0.0, 0.0, 10.0, 1.0));
        let mut pf = Pathfinder::build(&[], &cfg)
            .unwrap()
            .with_search_config(SearchConfig::default().with_max_iterations(2));
        assert_eq!(
            pf.find_path_detailed(center(0, 0), center(9, 0)),
            Err(PathError::IterationLimit { limit: 2 })
        );
        pf.set_search_config(SearchConfig::default());
        assert_eq!(pf.find_path(center(0, 0), center(9, 0)).unwrap().len(), 10);
    }

    #[test]
    fn non_finite_points_are_rejected() {
        let mut pf = open_field(2.0, 2.0);
        let nan = Vec2::new(f32::NAN, 0.0);
        assert!(matches!(
            pf.find_path_detailed(nan, Vec2::ZERO),
            Err(PathError::NonFinitePoint(_))
        ));
        let inf = Vec2::new(1.0, f32::INFINITY);
        assert_eq!(
            pf.find_path_detailed(Vec2::ZERO, inf),
            Err(PathError::NonFinitePoint(inf))
        );
        assert_eq!(pf.snap(nan), None);
        assert!(pf.find_path(nan, nan).is_none());
    }

    #[test]
    fn repeated_queries_are_deterministic() {
        let pillar = Polygon::from(Rect::new(3.0, 1.0, 2.0, 5.0));
        let cfg = GridConfig::new(1.0).with_bounds(Rect::new(0.0, 0.0, 8.0, 8.0));
        let mut pf = Pathfinder::build(&[pillar], &cfg).unwrap();
        let (a, b) = (center(0, 3), center(7, 4));
        let first = pf.find_path_detailed(a, b).unwrap();
        // An unrelated query in between must not leak state.
        pf.find_path(center(7, 7), center(0, 0)).unwrap();
        let again = pf.find_path_detailed(a, b).unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn closed_nodes_keep_their_parents() {
        let mut pf = open_field(6.0, 6.0);
        let result = pf.find_path_detailed(center(0, 0), center(5, 5)).unwrap();
        assert_eq!(result.cells.len(), 6);
        let start = pf.grid().offset(Point::new(0, 0)).unwrap();
        for n in pf.grid().nodes() {
            if n.status() == NodeStatus::Closed && pf.grid().offset(n.index()) != Some(start) {
                assert!(n.parent().is_some(), "{} lost its parent", n.index());
            }
        }
    }

    #[test]
    fn reconstruction_stops_on_parent_cycle() {
        let mut pf = open_field(3.0, 3.0);
        let grid = &mut pf.grid;
        // 4 -> 1 -> 0 -> 1 -> ...
        grid.node_at_mut(4).unwrap().parent = Some(1);
        grid.node_at_mut(1).unwrap().parent = Some(0);
        grid.node_at_mut(0).unwrap().parent = Some(1);
        let trail = reconstruct(grid, 4);
        assert_eq!(
            trail,
            Trail {
                offsets: vec![4, 1, 0],
                truncated: true
            }
        );
        // Self-loop.
        grid.node_at_mut(8).unwrap().parent = Some(8);
        assert_eq!(reconstruct(grid, 8).offsets, vec![8]);
    }

    #[test]
    fn reconstruction_follows_chain_to_root() {
        let mut pf = open_field(3.0, 1.0);
        let grid = &mut pf.grid;
        grid.node_at_mut(2).unwrap().parent = Some(1);
        grid.node_at_mut(1).unwrap().parent = Some(0);
        let trail = reconstruct(grid, 2);
        assert_eq!(trail.offsets, vec![2, 1, 0]);
        assert!(!trail.truncated);
    }

    #[test]
    fn rebuild_replaces_grid() {
        let mut pf = open_field(3.0, 3.0);
        pf.find_path(center(0, 0), center(2, 2)).unwrap();
        let cfg = GridConfig::new(2.0).with_bounds(Rect::new(0.0, 0.0, 4.0, 1.0));
        pf.rebuild(&[], &cfg).unwrap();
        assert_eq!((pf.grid().width(), pf.grid().height()), (8, 2));
        assert_eq!(pf.grid().closed_len(), 0);
        // A rejected rebuild keeps the current grid.
        assert!(pf.rebuild(&[], &GridConfig::new(0.0)).is_err());
        assert_eq!(pf.grid().len(), 16);
    }

    #[test]
    fn forward_reverses_waypoints() {
        let mut pf = open_field(4.0, 1.0);
        let result = pf.find_path_detailed(center(0, 0), center(3, 0)).unwrap();
        let fwd = result.forward();
        assert_eq!(fwd.first(), Some(&center(0, 0)));
        assert_eq!(fwd.last(), Some(&center(3, 0)));
        assert_eq!(result.len(), 4);
        assert!(chebyshev(result.cells[0], result.cells[1]) == 1);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use gridnav_geom::Rect;

    #[test]
    fn path_result_round_trip() {
        let cfg = GridConfig::new(1.0).with_bounds(Rect::new(0.0, 0.0, 4.0, 4.0));
        let mut pf = Pathfinder::build(&[], &cfg).unwrap();
        let result = pf
            .find_path_detailed(Vec2::new(0.5, 0.5), Vec2::new(3.5, 2.5))
            .unwrap();
        let json = serde_json::to_string(&result).unwrap();
        let back: PathResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, back);
    }
}
