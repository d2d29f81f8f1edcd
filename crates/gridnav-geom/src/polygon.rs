//! Polygons and the separating-axis overlap test.
//!
//! [`Polygon::intersects`] projects both shapes onto the edge normals of
//! each and reports an overlap when no projection pair is disjoint. The test
//! is exact for convex polygons and conservative for concave ones (a concave
//! pocket can be reported as overlapping).

use crate::rect::Rect;
use crate::vec2::Vec2;

/// An ordered sequence of world-space points. Consecutive points (and the
/// last/first pair) form the edges; winding does not matter.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    points: Vec<Vec2>,
}

impl Polygon {
    /// Create a polygon from its vertices.
    pub fn new(points: impl IntoIterator<Item = Vec2>) -> Self {
        Self {
            points: points.into_iter().collect(),
        }
    }

    /// A one-vertex polygon, used to test single points.
    pub fn point(p: Vec2) -> Self {
        Self { points: vec![p] }
    }

    /// Axis-aligned square of side `side` centred on `center`.
    pub fn square(center: Vec2, side: f32) -> Self {
        let h = side * 0.5;
        Self::new([
            Vec2::new(center.x - h, center.y - h),
            Vec2::new(center.x + h, center.y - h),
            Vec2::new(center.x + h, center.y + h),
            Vec2::new(center.x - h, center.y + h),
        ])
    }

    /// The four corners of `r` as a polygon.
    pub fn from_rect(r: Rect) -> Self {
        let (min, max) = (r.min(), r.max());
        Self::new([
            min,
            Vec2::new(max.x, min.y),
            max,
            Vec2::new(min.x, max.y),
        ])
    }

    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn push(&mut self, p: Vec2) {
        self.points.push(p);
    }

    /// Append every vertex of `other`. Used to merge obstacle sets before
    /// taking their combined bounds.
    pub fn extend_from(&mut self, other: &Polygon) {
        self.points.extend_from_slice(&other.points);
    }

    /// Return a copy shifted by `offset`.
    pub fn translate(&self, offset: Vec2) -> Self {
        Self::new(self.points.iter().map(|&p| p + offset))
    }

    /// Right perpendicular of edge `n` (from vertex `n` to `n + 1`, wrapping).
    /// `None` for an empty polygon.
    pub fn edge_normal(&self, n: usize) -> Option<Vec2> {
        let len = self.points.len();
        if len == 0 {
            return None;
        }
        Some((self.points[n % len] - self.points[(n + 1) % len]).perp_right())
    }

    /// Candidate separating axes: one per edge, skipping zero-length edges.
    /// Polygons with fewer than two vertices have none.
    fn axes(&self) -> impl Iterator<Item = Vec2> + '_ {
        let n = if self.points.len() > 1 { self.points.len() } else { 0 };
        (0..n)
            .filter_map(|i| self.edge_normal(i))
            .filter(|axis| axis.length_squared() > 0.0)
    }

    /// Separating-axis overlap test.
    ///
    /// Shapes that only touch along an edge or at a corner do not overlap.
    /// An empty polygon overlaps nothing.
    pub fn intersects(&self, other: &Polygon) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.axes()
            .chain(other.axes())
            .all(|axis| Projection::of(self, axis).overlaps(Projection::of(other, axis)))
    }

    /// Whether `p` lies strictly inside the polygon (convex exact).
    pub fn contains_point(&self, p: Vec2) -> bool {
        self.intersects(&Polygon::point(p))
    }

    /// Axis-aligned bounding rectangle, or the zero rectangle when empty.
    pub fn bounds(&self) -> Rect {
        if self.is_empty() {
            return Rect::default();
        }
        let xs = Projection::of(self, Vec2::X);
        let ys = Projection::of(self, Vec2::Y);
        Rect::new(xs.min, ys.min, xs.max - xs.min, ys.max - ys.min)
    }
}

impl From<Vec<Vec2>> for Polygon {
    fn from(points: Vec<Vec2>) -> Self {
        Self { points }
    }
}

impl From<Rect> for Polygon {
    fn from(r: Rect) -> Self {
        Self::from_rect(r)
    }
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// The interval a polygon covers when projected onto an axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    pub min: f32,
    pub max: f32,
}

impl Projection {
    /// Project every vertex of `poly` onto `axis`. The axis need not be
    /// normalized as long as both sides of a comparison use the same one.
    /// An empty polygon projects to the inverted interval `[+inf, -inf]`,
    /// which overlaps nothing.
    pub fn of(poly: &Polygon, axis: Vec2) -> Self {
        poly.points.iter().fold(
            Self {
                min: f32::INFINITY,
                max: f32::NEG_INFINITY,
            },
            |acc, &p| {
                let d = p.dot(axis);
                Self {
                    min: acc.min.min(d),
                    max: acc.max.max(d),
                }
            },
        )
    }

    /// Whether the open intervals overlap. Touching endpoints separate.
    #[inline]
    pub fn overlaps(self, other: Projection) -> bool {
        self.min < other.max && other.min < self.max
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.max - self.min
    }
}
