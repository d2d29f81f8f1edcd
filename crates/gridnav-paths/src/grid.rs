use std::collections::BinaryHeap;
use std::fmt;

use gridnav_geom::{Point, Range, Rect, Vec2};

use crate::distance;
use crate::node::{Node, NodeStatus};

// ---------------------------------------------------------------------------
// Open-set queue entry
// ---------------------------------------------------------------------------

/// Reference into the node array, ordered by `f` then by the order the node
/// was first opened, for use in `BinaryHeap`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct OpenEntry {
    pub(crate) idx: usize,
    pub(crate) f: i32,
    pub(crate) seq: u64,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first, and among
        // equal f the earliest-opened node.
        other.f.cmp(&self.f).then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// NodeGrid
// ---------------------------------------------------------------------------

/// Dense `width × height` array of [`Node`]s covering a world rectangle,
/// together with the open and closed sets of the current search.
///
/// Nodes are stored row-major; a node's flat offset is `y * width + x` and
/// is the identity used for parent links.
#[derive(Clone, Debug)]
pub struct NodeGrid {
    rng: Range,
    width: usize,
    bounds: Rect,
    nodes: Vec<Node>,
    // open set: lazily pruned heap plus a live count
    open: BinaryHeap<OpenEntry>,
    open_len: usize,
    closed: Vec<usize>,
    // every node that entered open or closed since the last reset
    touched: Vec<usize>,
    next_seq: u64,
}

impl NodeGrid {
    /// Build a grid of `width × height` cells tiling `bounds`. `solid` sees
    /// each cell's world rectangle and decides its walkability once, here.
    pub(crate) fn from_cells(
        bounds: Rect,
        width: usize,
        height: usize,
        mut solid: impl FnMut(Point, Rect) -> bool,
    ) -> Self {
        let rng = Range::with_size(width as i32, height as i32);
        let (sx, sy) = (bounds.width / width as f32, bounds.height / height as f32);
        let nodes = rng
            .iter()
            .map(|p| {
                let cell = Rect::new(
                    bounds.x + p.x as f32 * sx,
                    bounds.y + p.y as f32 * sy,
                    sx,
                    sy,
                );
                Node::new(p, cell.center(), solid(p, cell))
            })
            .collect();
        Self {
            rng,
            width,
            bounds,
            nodes,
            open: BinaryHeap::new(),
            open_len: 0,
            closed: Vec::new(),
            touched: Vec::new(),
            next_seq: 0,
        }
    }

    // -----------------------------------------------------------------------
    // Shape and lookup
    // -----------------------------------------------------------------------

    /// The grid rectangle, `[0, width) × [0, height)`.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.rng.height() as usize
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// World rectangle the grid was built over.
    #[inline]
    pub fn world_bounds(&self) -> Rect {
        self.bounds
    }

    /// Convert a `Point` to a flat offset. Returns `None` if out of range.
    #[inline]
    pub fn offset(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        Some(p.y as usize * self.width + p.x as usize)
    }

    /// Convert a flat offset back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, offset: usize) -> Point {
        Point::new((offset % self.width) as i32, (offset / self.width) as i32)
    }

    /// Node at grid coordinate `p`.
    #[inline]
    pub fn node(&self, p: Point) -> Option<&Node> {
        self.offset(p).map(|i| &self.nodes[i])
    }

    /// Node at flat offset `offset`.
    #[inline]
    pub fn node_at(&self, offset: usize) -> Option<&Node> {
        self.nodes.get(offset)
    }

    #[inline]
    pub(crate) fn node_at_mut(&mut self, offset: usize) -> Option<&mut Node> {
        self.nodes.get_mut(offset)
    }

    /// All nodes in row-major order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &Node> + '_ {
        self.nodes.iter()
    }

    /// Whether `p` is blocked. Out-of-range coordinates count as blocked.
    #[inline]
    pub fn is_solid(&self, p: Point) -> bool {
        self.node(p).is_none_or(Node::is_solid)
    }

    pub fn solid_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_solid()).count()
    }

    /// The cell whose area contains the world point `p`, if any.
    pub fn locate(&self, p: Vec2) -> Option<Point> {
        if !p.is_finite() || self.nodes.is_empty() {
            return None;
        }
        let u = (p.x - self.bounds.x) / self.bounds.width;
        let v = (p.y - self.bounds.y) / self.bounds.height;
        let cell = Point::new(
            (u * self.width as f32).floor() as i32,
            (v * self.height() as f32).floor() as i32,
        );
        self.rng.contains(cell).then_some(cell)
    }

    /// Offset of the non-solid node whose center is closest to `p`.
    ///
    /// Scans every node in row-major order; on equal distance the first one
    /// scanned wins. Returns `None` when every node is solid.
    pub fn nearest_walkable(&self, p: Vec2) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (i, n) in self.nodes.iter().enumerate() {
            if n.is_solid() {
                continue;
            }
            let d = n.position().distance_squared(p);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Offsets of the walkable 8-neighbours of `offset`, replacing the
    /// contents of `buf`.
    pub fn neighbors(&self, offset: usize, buf: &mut Vec<usize>) {
        buf.clear();
        if offset >= self.nodes.len() {
            return;
        }
        let p = self.point(offset);
        buf.extend(
            p.neighbors_8()
                .into_iter()
                .filter_map(|n| self.offset(n))
                .filter(|&i| !self.nodes[i].is_solid()),
        );
    }

    // -----------------------------------------------------------------------
    // Search state
    // -----------------------------------------------------------------------

    /// Return every node touched by the previous search to
    /// [`NodeStatus::Unvisited`] and empty the open and closed sets.
    pub fn reset(&mut self) {
        for &i in &self.touched {
            self.nodes[i].clear_search();
        }
        self.touched.clear();
        self.open.clear();
        self.open_len = 0;
        self.closed.clear();
        self.next_seq = 0;
    }

    /// Set every node's heuristic to its Manhattan distance from `goal`.
    pub fn compute_heuristic(&mut self, goal: usize) {
        let gp = self.point(goal);
        for n in &mut self.nodes {
            n.h = distance::manhattan(n.index(), gp);
        }
    }

    /// Add a node to the open set.
    ///
    /// Membership is idempotent: an already open node keeps its original
    /// insertion order and is only requeued when its `f` changed since it
    /// was last queued. Closed nodes are never reopened. Returns whether the
    /// node is open after the call.
    pub fn open(&mut self, offset: usize) -> bool {
        let Some(node) = self.nodes.get_mut(offset) else {
            return false;
        };
        match node.status {
            NodeStatus::Closed => return false,
            // Already queued at this priority.
            NodeStatus::Open if node.queued_f == node.f() => return true,
            NodeStatus::Open => {}
            NodeStatus::Unvisited => {
                node.status = NodeStatus::Open;
                node.open_seq = self.next_seq;
                self.next_seq += 1;
                self.open_len += 1;
                self.touched.push(offset);
            }
        }
        node.queued_f = node.f();
        self.open.push(OpenEntry {
            idx: offset,
            f: node.queued_f,
            seq: node.open_seq,
        });
        true
    }

    /// Move a node into the closed set, removing it from the open set if it
    /// was there. Idempotent.
    pub fn close(&mut self, offset: usize) {
        let Some(node) = self.nodes.get_mut(offset) else {
            return;
        };
        match node.status {
            NodeStatus::Closed => return,
            NodeStatus::Open => self.open_len -= 1,
            NodeStatus::Unvisited => self.touched.push(offset),
        }
        node.status = NodeStatus::Closed;
        self.closed.push(offset);
    }

    /// The open node with the smallest `f`, earliest-opened first on ties.
    /// The node stays open; `None` if the open set is empty.
    pub fn next_to_expand(&mut self) -> Option<usize> {
        while let Some(top) = self.open.peek() {
            let n = &self.nodes[top.idx];
            if n.status == NodeStatus::Open && n.f() == top.f {
                return Some(top.idx);
            }
            // Closed since queued, or superseded by a cheaper entry.
            self.open.pop();
        }
        None
    }

    #[inline]
    pub fn open_len(&self) -> usize {
        self.open_len
    }

    #[inline]
    pub fn closed_len(&self) -> usize {
        self.closed.len()
    }

    #[inline]
    pub fn is_open(&self, offset: usize) -> bool {
        self.nodes
            .get(offset)
            .is_some_and(|n| n.status == NodeStatus::Open)
    }

    #[inline]
    pub fn is_closed(&self, offset: usize) -> bool {
        self.nodes
            .get(offset)
            .is_some_and(|n| n.status == NodeStatus::Closed)
    }
}

/// Walkability map: `#` for solid cells, `.` for open ones, one row per line.
impl fmt::Display for NodeGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.nodes.chunks(self.width.max(1)) {
            for n in row {
                f.write_str(if n.is_solid() { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
