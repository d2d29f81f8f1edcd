use gridnav_geom::Point;

/// Cost of a horizontal or vertical step.
pub const CARDINAL_COST: i32 = 10;
/// Cost of a diagonal step, a fixed-point approximation of 10·√2.
pub const DIAGONAL_COST: i32 = 14;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Cost of stepping between two adjacent cells.
#[inline]
pub fn step_cost(from: Point, to: Point) -> i32 {
    if from.x != to.x && from.y != to.y {
        DIAGONAL_COST
    } else {
        CARDINAL_COST
    }
}
