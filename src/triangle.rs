use std::fmt::{self, Display};

use crate::{
    geom,
    point::{DblPoint, IntPoint},
    polygon::Polygon,
};

/// Three integer points. The output unit of every triangulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Triangle {
    pub a: IntPoint,
    pub b: IntPoint,
    pub c: IntPoint,
}

impl Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.a, self.b, self.c)
    }
}

impl From<[IntPoint; 3]> for Triangle {
    fn from([a, b, c]: [IntPoint; 3]) -> Self {
        Self::new(a, b, c)
    }
}

impl Triangle {
    #[inline]
    pub const fn new(a: IntPoint, b: IntPoint, c: IntPoint) -> Self {
        Self { a, b, c }
    }

    #[inline]
    pub fn vertices(&self) -> [IntPoint; 3] {
        [self.a, self.b, self.c]
    }

    /// Mean of the three vertices.
    pub fn centroid(&self) -> DblPoint {
        DblPoint::new(
            (self.a.x as f64 + self.b.x as f64 + self.c.x as f64) / 3.0,
            (self.a.y as f64 + self.b.y as f64 + self.c.y as f64) / 3.0,
        )
    }

    /// Repeated or collinear vertices.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        geom::ccw(self.a, self.b, self.c) == 0
    }

    #[inline]
    pub fn is_ccw(&self) -> bool {
        geom::is_ccw(self.a, self.b, self.c)
    }

    /// Signed area: positive when the vertices run counter-clockwise.
    pub fn area(&self) -> f64 {
        let wide = |p: IntPoint| (p.x as i128, p.y as i128);
        let ((ax, ay), (bx, by), (cx, cy)) = (wide(self.a), wide(self.b), wide(self.c));
        let (ux, uy, vx, vy) = ((bx - ax) as f64, (by - ay) as f64, (cx - ax) as f64, (cy - ay) as f64);
        (ux * vy - uy * vx) / 2.0
    }

    #[inline]
    pub fn translate(&self, x: isize, y: isize) -> Triangle {
        Triangle::new(self.a.offset(x, y), self.b.offset(x, y), self.c.offset(x, y))
    }

    #[inline]
    pub fn translate_by(&self, p: IntPoint) -> Triangle {
        self.translate(p.x, p.y)
    }

    pub fn to_polygon(&self) -> Polygon {
        Polygon::from_triangle(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_triangles() {
        let p1 = IntPoint::new(-713, 52);
        let p2 = IntPoint::new(95, -408);
        assert!(Triangle::new(p1, p2, p1).is_degenerate());
        assert!(Triangle::new(p1, p1, p1).is_degenerate());
        assert!(Triangle::new(p1, p1.sum(p2), p1.sum(p2.invert())).is_degenerate());
        assert!(!Triangle::new(p1, p2, p1.offset(1, 0)).is_degenerate());
    }

    #[test]
    fn area_and_winding() {
        let t = Triangle::new(
            IntPoint::new(0, 0),
            IntPoint::new(4, 0),
            IntPoint::new(0, 3),
        );
        assert!(t.is_ccw());
        assert_eq!(t.area(), 6.0);
        let r = Triangle::new(t.a, t.c, t.b);
        assert!(!r.is_ccw());
        assert_eq!(r.area(), -6.0);
        assert_eq!(t.centroid(), DblPoint::new(4.0 / 3.0, 1.0));
        assert_eq!(
            t.translate(1, -1).vertices(),
            [IntPoint::new(1, -1), IntPoint::new(5, -1), IntPoint::new(1, 2)]
        );
        assert!(t.to_polygon().is_ccw());
    }

    #[test]
    fn extreme_co_ordinates() {
        let (lo, hi) = (isize::MIN, isize::MAX);
        let t = Triangle::new(IntPoint::new(lo, lo), IntPoint::new(hi, lo), IntPoint::new(lo, hi));
        let c = t.centroid();
        assert!(c.x.is_finite() && c.y.is_finite());
        assert!(c.x < 0.0 && c.x > lo as f64);
        assert!(t.area() > 0.0);
    }
}
