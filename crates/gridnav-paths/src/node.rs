use gridnav_geom::{Point, Vec2};

/// Search lifecycle of a node within one query.
///
/// A node only ever moves forward: `Unvisited → Open → Closed`. Only
/// [`NodeGrid::reset`](crate::NodeGrid::reset) returns it to `Unvisited`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeStatus {
    #[default]
    Unvisited,
    Open,
    Closed,
}

/// One grid cell: fixed placement and solidity, plus per-search bookkeeping.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    index: Point,
    position: Vec2,
    solid: bool,
    pub(crate) status: NodeStatus,
    pub(crate) g: i32,
    pub(crate) h: i32,
    pub(crate) parent: Option<usize>,
    /// Order in which the node entered the open set; breaks `f` ties.
    pub(crate) open_seq: u64,
    /// `f` of the node's newest open-set entry.
    pub(crate) queued_f: i32,
}

impl Node {
    pub(crate) fn new(index: Point, position: Vec2, solid: bool) -> Self {
        Self {
            index,
            position,
            solid,
            status: NodeStatus::Unvisited,
            g: 0,
            h: 0,
            parent: None,
            open_seq: 0,
            queued_f: 0,
        }
    }

    /// Grid coordinate of the cell.
    #[inline]
    pub fn index(&self) -> Point {
        self.index
    }

    /// World-space center of the cell.
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn is_solid(&self) -> bool {
        self.solid
    }

    #[inline]
    pub fn status(&self) -> NodeStatus {
        self.status
    }

    /// Cost accumulated from the start node. Meaningless while
    /// [`NodeStatus::Unvisited`].
    #[inline]
    pub fn g(&self) -> i32 {
        self.g
    }

    /// Heuristic estimate to the current goal.
    #[inline]
    pub fn h(&self) -> i32 {
        self.h
    }

    /// `g + h`, the priority used to pick the next node to expand.
    #[inline]
    pub fn f(&self) -> i32 {
        self.g + self.h
    }

    /// Flat offset of the node this one was reached from.
    #[inline]
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Drop all per-search state. `h` is left alone; every search
    /// recomputes it for all nodes before starting.
    pub(crate) fn clear_search(&mut self) {
        self.status = NodeStatus::Unvisited;
        self.g = 0;
        self.parent = None;
        self.open_seq = 0;
        self.queued_f = 0;
    }
}
