use std::{
    cmp::Ordering,
    fmt::{self, Debug, Display},
    hash::{Hash, Hasher},
};

use crate::{
    error::GeomErr,
    geom,
    memo::Memo,
    point::{DblPoint, IntPoint},
    rect::AxisBox,
    slope::{Intersection, Slope},
};

/// A directed line segment with integer end points.
///
/// Length, angle and bounding box are computed the first time they are asked
/// for. Equality and hashing only look at the end points.
#[derive(Clone)]
pub struct IntLine {
    start: IntPoint,
    end: IntPoint,
    length: Memo<f64>,
    angle: Memo<Result<f64, GeomErr>>,
    bounds: Memo<AxisBox>,
}

impl PartialEq for IntLine {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl Eq for IntLine {}

impl Hash for IntLine {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
    }
}

impl Debug for IntLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IntLine({}, {})", self.start, self.end)
    }
}

impl Display for IntLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.start, self.end)
    }
}

impl IntLine {
    pub fn new(start: IntPoint, end: IntPoint) -> Self {
        Self {
            start,
            end,
            length: Memo::new(),
            angle: Memo::new(),
            bounds: Memo::new(),
        }
    }

    #[inline]
    pub fn from_coords(sx: isize, sy: isize, ex: isize, ey: isize) -> Self {
        Self::new(IntPoint::new(sx, sy), IntPoint::new(ex, ey))
    }

    #[inline]
    pub fn start(&self) -> IntPoint {
        self.start
    }

    #[inline]
    pub fn end(&self) -> IntPoint {
        self.end
    }

    /// May be negative.
    #[inline]
    pub fn x_dist(&self) -> isize {
        self.end.x - self.start.x
    }

    /// May be negative.
    #[inline]
    pub fn y_dist(&self) -> isize {
        self.end.y - self.start.y
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        !self.is_degenerate() && self.start.x == self.end.x
    }

    #[inline]
    pub fn is_horizontal(&self) -> bool {
        !self.is_degenerate() && self.start.y == self.end.y
    }

    /// Horizontal or vertical.
    #[inline]
    pub fn is_perpendicular(&self) -> bool {
        self.is_horizontal() || self.is_vertical()
    }

    #[inline]
    pub fn is_parallel(&self, other: &IntLine) -> bool {
        self.slope() == other.slope()
    }

    pub fn equals_ignore_polarity(&self, other: &IntLine) -> bool {
        self == other || (self.start == other.end && self.end == other.start)
    }

    /// True if `p` lies on the segment, end points included.
    pub fn contains(&self, p: IntPoint) -> bool {
        if p == self.start || p == self.end {
            return true;
        }
        self.is_collinear(p) && self.bounding_box().contains(p, true)
    }

    /// True if this segment lies entirely within `other`, or equals it.
    pub fn is_section_of(&self, other: &IntLine) -> bool {
        other.is_collinear(self.start)
            && other.is_collinear(self.end)
            && other.bounding_box().contains(self.start, true)
            && other.bounding_box().contains(self.end, true)
    }

    /// Exact orientation tests against the line through this segment.
    ///
    /// These never fail: every point is collinear with a degenerate line,
    /// and none lies to its left or right. [`geom::on_relative_left_side`]
    /// reports a degenerate line as an error instead.
    #[inline]
    pub fn is_collinear(&self, p: IntPoint) -> bool {
        geom::ccw(self.start, self.end, p) == 0
    }

    #[inline]
    pub fn is_relative_left(&self, p: IntPoint) -> bool {
        geom::ccw(self.start, self.end, p) > 0
    }

    #[inline]
    pub fn is_relative_right(&self, p: IntPoint) -> bool {
        geom::ccw(self.start, self.end, p) < 0
    }

    #[inline]
    pub fn reverse(&self) -> IntLine {
        IntLine::new(self.end, self.start)
    }

    #[inline]
    pub fn translate(&self, x: isize, y: isize) -> IntLine {
        IntLine::new(self.start.offset(x, y), self.end.offset(x, y))
    }

    #[inline]
    pub fn to_dbl(&self) -> DblLine {
        DblLine::new(self.start.to_dbl(), self.end.to_dbl())
    }

    #[inline]
    pub fn midpoint_dbl(&self) -> DblPoint {
        geom::midpoint_dbl(self.start.to_dbl(), self.end.to_dbl())
    }

    pub fn length(&self) -> f64 {
        *self
            .length
            .get_or_init(|| geom::length(self.start, self.end))
    }

    /// See [`geom::angle`].
    pub fn angle(&self) -> Result<f64, GeomErr> {
        *self
            .angle
            .get_or_init(|| geom::angle(self.start, self.end))
    }

    #[inline]
    pub fn slope(&self) -> Slope {
        geom::slope_to(self.start, self.end)
    }

    /// The `c` in `y = m * x + c`. Vertical and degenerate lines have none.
    pub fn intercept(&self) -> Option<f64> {
        match self.slope() {
            Slope::Horizontal => Some(self.start.y as f64),
            Slope::Value(m) => {
                Some(self.start.y as f64 - self.start.x as f64 * m)
            }
            Slope::Vertical | Slope::Degenerate => None,
        }
    }

    /// The y co-ordinate where the unbounded line crosses `x`.
    pub fn y_for_x(&self, x: f64) -> Option<f64> {
        match self.slope() {
            Slope::Horizontal => Some(self.start.y as f64),
            Slope::Value(m) => self.intercept().map(|c| m * x + c),
            Slope::Vertical | Slope::Degenerate => None,
        }
    }

    pub fn bounding_box(&self) -> AxisBox {
        *self.bounds.get_or_init(|| {
            AxisBox::new(self.start.x, self.start.y, self.end.x, self.end.y)
        })
    }

    fn canonical_cmp(&self, other: &IntLine) -> Ordering {
        (self.start, self.end).cmp(&(other.start, other.end))
    }

    /// Where the two unbounded lines meet.
    ///
    /// The result does not depend on which line the method is called on.
    pub fn intersection(&self, other: &IntLine) -> Intersection {
        if self.is_degenerate() || other.is_degenerate() {
            return Intersection::Degenerate;
        }
        if self.is_parallel(other) {
            return Intersection::Parallel;
        }
        let (first, second) = match self.canonical_cmp(other) {
            Ordering::Greater => (other, self),
            _ => (self, other),
        };
        first.intersection_ordered(second)
    }

    fn intersection_ordered(&self, other: &IntLine) -> Intersection {
        let at_x = |x: isize, line: &IntLine| {
            line.y_for_x(x as f64)
                .map(|y| Intersection::Point(DblPoint::new(x as f64, y)))
        };
        let point = match (self.slope(), other.slope()) {
            (Slope::Vertical, _) => at_x(self.start.x, other),
            (_, Slope::Vertical) => at_x(other.start.x, self),
            (Slope::Horizontal, Slope::Value(m)) => {
                let y = self.start.y as f64;
                other.intercept().map(|c| {
                    Intersection::Point(DblPoint::new((y - c) / m, y))
                })
            }
            (Slope::Value(m), Slope::Horizontal) => {
                let y = other.start.y as f64;
                self.intercept().map(|c| {
                    Intersection::Point(DblPoint::new((y - c) / m, y))
                })
            }
            (Slope::Value(m1), Slope::Value(m2)) => self
                .intercept()
                .zip(other.intercept())
                .map(|(c1, c2)| {
                    Intersection::Point(geom::slope_intercept_intersection(
                        m1, c1, m2, c2,
                    ))
                }),
            _ => None,
        };
        point.unwrap_or(Intersection::Parallel)
    }

    /// The intersection rounded to the nearest integer point.
    #[inline]
    pub fn intersection_int(&self, other: &IntLine) -> Option<IntPoint> {
        self.intersection(other).point().map(DblPoint::to_int_rounded)
    }

    /// True if the two segments cross.
    ///
    /// With `include_touching` false the crossing must lie strictly inside
    /// both segments, so meeting at an end point does not count. Parallel
    /// segments never intersect, even when they overlap.
    pub fn intersects_segment(
        &self,
        other: &IntLine,
        include_touching: bool,
    ) -> bool {
        if self.is_degenerate() || other.is_degenerate() || self.is_parallel(other) {
            return false;
        }
        let this_side = geom::ccw(self.start, self.end, other.start)
            * geom::ccw(self.start, self.end, other.end);
        let other_side = geom::ccw(other.start, other.end, self.start)
            * geom::ccw(other.start, other.end, self.end);
        if include_touching {
            this_side <= 0 && other_side <= 0
        } else {
            this_side < 0 && other_side < 0
        }
    }
}

/// A directed line segment with floating-point end points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DblLine {
    pub start: DblPoint,
    pub end: DblPoint,
}

impl DblLine {
    #[inline]
    pub const fn new(start: DblPoint, end: DblPoint) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn x_dist(&self) -> f64 {
        self.end.x - self.start.x
    }

    #[inline]
    pub fn y_dist(&self) -> f64 {
        self.end.y - self.start.y
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        !self.is_degenerate() && self.start.x == self.end.x
    }

    #[inline]
    pub fn is_horizontal(&self) -> bool {
        !self.is_degenerate() && self.start.y == self.end.y
    }

    pub fn equals_ignore_polarity(&self, other: &DblLine) -> bool {
        self == other || (self.start == other.end && self.end == other.start)
    }

    #[inline]
    pub fn length(&self) -> f64 {
        geom::length_dbl(self.start, self.end)
    }

    #[inline]
    pub fn angle(&self) -> Result<f64, GeomErr> {
        geom::angle_dbl(self.start, self.end)
    }

    #[inline]
    pub fn midpoint(&self) -> DblPoint {
        geom::midpoint_dbl(self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(sx: isize, sy: isize, ex: isize, ey: isize) -> IntLine {
        IntLine::from_coords(sx, sy, ex, ey)
    }

    #[test]
    fn equality_and_polarity() {
        let l1 = line(12, 34, -21, 3);
        assert_eq!(l1, line(12, 34, -21, 3));
        assert_ne!(l1, line(12, 32, -21, 3));
        assert_ne!(l1, l1.reverse());
        assert!(l1.equals_ignore_polarity(&l1.reverse()));
        // a filled cache does not affect equality
        let _ = l1.length();
        assert_eq!(l1, line(12, 34, -21, 3));
    }

    #[test]
    fn contains_points() {
        let l = line(-6, -4, 15, 3);
        assert!(l.contains(l.start()));
        assert!(l.contains(l.end()));
        assert!(l.contains(IntPoint::new(-3, -3)));
        assert!(l.contains(IntPoint::new(12, 2)));
        let beyond = IntPoint::new(18, 4);
        assert!(l.is_collinear(beyond));
        assert!(!l.contains(beyond));
    }

    #[test]
    fn classification() {
        let dot = line(3, 3, 3, 3);
        let v = line(3, 3, 3, -8);
        let h = line(3, 3, 9, 3);
        let d = line(3, 3, 9, 4);
        assert!(dot.is_degenerate());
        assert!(!dot.is_vertical() && !dot.is_horizontal());
        assert!(!dot.is_perpendicular());
        assert!(v.is_vertical() && v.is_perpendicular());
        assert!(h.is_horizontal() && h.is_perpendicular());
        assert!(!d.is_perpendicular());
        assert!(v.is_parallel(&line(7, 0, 7, 1)));
        assert!(h.is_parallel(&line(0, -1, -5, -1)));
        assert!(d.is_parallel(&d.translate(32, -7004).reverse()));
        assert!(!d.is_parallel(&h));
    }

    #[test]
    fn lengths_and_angles() {
        assert_eq!(line(5, 6, 5, -2).length(), 8.0);
        let l = line(-2, -7, -26, -7);
        assert_eq!(l.angle(), Ok(geom::THREE_QUARTER_TURN));
        assert_eq!(l.angle(), geom::angle(l.start(), l.end()));
        assert_eq!(line(1, 1, 1, 1).angle(), Err(GeomErr::DegenerateLine));
    }

    #[test]
    fn left_right_or_collinear() {
        let l45 = line(0, 0, 31, 31);
        let left = IntPoint::new(93, 94);
        let right = IntPoint::new(93, 92);
        assert!(l45.is_relative_left(left));
        assert!(l45.is_relative_right(right));
        assert!(!l45.is_collinear(left));
        assert!(l45.reverse().is_relative_right(left));
        let up = line(0, 0, 0, 31);
        let on = IntPoint::new(0, 10);
        assert!(up.is_collinear(on));
        assert!(!up.is_relative_left(on) && !up.is_relative_right(on));
    }

    #[test]
    fn side_tests_on_a_degenerate_line() {
        let dot = line(4, 4, 4, 4);
        let p = IntPoint::new(-3, 9);
        assert!(dot.is_collinear(p));
        assert!(!dot.is_relative_left(p) && !dot.is_relative_right(p));
        assert_eq!(geom::on_relative_left_side(&dot, p), Err(GeomErr::DegenerateLine));
    }

    #[test]
    fn slope_and_intercept() {
        let l = line(2, 1, 6, 3);
        assert_eq!(l.slope(), Slope::Value(0.5));
        assert_eq!(l.intercept(), Some(0.0));
        assert_eq!(l.y_for_x(10.0), Some(5.0));
        assert_eq!(line(0, 4, 9, 4).intercept(), Some(4.0));
        assert_eq!(line(3, 0, 3, 9).intercept(), None);
    }

    #[test]
    fn intersections() {
        let a = line(0, 0, 10, 10);
        let b = line(0, 10, 10, 0);
        assert_eq!(a.intersection(&b), Intersection::Point(DblPoint::new(5.0, 5.0)));

        let v = line(3, -5, 3, 5);
        assert_eq!(v.intersection(&a), Intersection::Point(DblPoint::new(3.0, 3.0)));

        let h = line(0, 4, 10, 4);
        let c = line(0, 0, 10, 5);
        assert_eq!(h.intersection(&c), Intersection::Point(DblPoint::new(8.0, 4.0)));

        assert_eq!(a.intersection(&line(0, 1, 10, 11)), Intersection::Parallel);
        assert_eq!(a.intersection(&line(2, 2, 2, 2)), Intersection::Degenerate);
        assert_eq!(v.intersection_int(&c), Some(IntPoint::new(3, 2)));
    }

    #[test]
    fn intersection_is_symmetric() {
        let lines = [
            line(-517, 233, 871, -94),
            line(12, -880, -431, 702),
            line(640, 641, -3, 17),
            line(-999, 5, 998, 6),
            line(4, -100, 4, 100),
            line(-50, 7, 50, 7),
        ];
        for a in &lines {
            for b in &lines {
                assert_eq!(a.intersection(b), b.intersection(a), "{} x {}", a, b);
            }
        }
    }

    #[test]
    fn segment_intersection_and_touching() {
        let a = line(0, 0, 10, 10);
        let b = line(0, 10, 10, 0);
        assert!(a.intersects_segment(&b, true));
        assert!(a.intersects_segment(&b, false));

        // meeting at a corner
        let h = line(0, 0, 10, 0);
        let v = line(10, 0, 10, 10);
        assert!(h.intersects_segment(&v, true));
        assert!(!h.intersects_segment(&v, false));

        // crossing an axis-aligned segment in its interior
        let cross = line(5, -5, 5, 5);
        assert!(h.intersects_segment(&cross, false));

        // lines that meet beyond the end of one segment
        let short = line(0, 10, 4, 6);
        assert!(!a.intersects_segment(&short, true));

        assert!(!a.intersects_segment(&line(0, 1, 10, 11), true));
    }

    #[test]
    fn sections() {
        let l = line(0, 0, 12, 6);
        assert!(line(2, 1, 8, 4).is_section_of(&l));
        assert!(line(8, 4, 2, 1).is_section_of(&l));
        assert!(l.is_section_of(&l));
        assert!(!line(8, 4, 14, 7).is_section_of(&l));
        assert!(!line(2, 1, 8, 5).is_section_of(&l));
    }

    #[test]
    fn dbl_lines() {
        let l = line(1, 1, 1, 5).to_dbl();
        assert!(l.is_vertical());
        assert!(!l.is_horizontal());
        assert_eq!(l.length(), 4.0);
        assert_eq!(l.midpoint(), DblPoint::new(1.0, 3.0));
        assert_eq!(l.angle(), Ok(0.0));
        assert_eq!((l.x_dist(), l.y_dist()), (0.0, 4.0));
        let r = DblLine::new(l.end, l.start);
        assert!(l.equals_ignore_polarity(&r));
        assert_ne!(l, r);
    }
}
