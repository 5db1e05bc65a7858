use crate::point::{DblPoint, IntPoint};

/// An axis-aligned bounding box with integer co-ordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AxisBox {
    bottom_left: IntPoint,
    top_right: IntPoint,
}

impl AxisBox {
    /// Edges are normalised so that `right >= left` and `top >= bottom`.
    pub fn new(left: isize, bottom: isize, right: isize, top: isize) -> Self {
        Self {
            bottom_left: IntPoint::new(left.min(right), bottom.min(top)),
            top_right: IntPoint::new(left.max(right), bottom.max(top)),
        }
    }

    /// The smallest box containing every point, or `None` for no points.
    pub fn from_points<I: IntoIterator<Item = IntPoint>>(points: I) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (mut left, mut bottom, mut right, mut top) =
            (first.x, first.y, first.x, first.y);
        for p in points {
            left = left.min(p.x);
            bottom = bottom.min(p.y);
            right = right.max(p.x);
            top = top.max(p.y);
        }
        Some(Self::new(left, bottom, right, top))
    }

    #[inline]
    pub fn left(&self) -> isize {
        self.bottom_left.x
    }

    #[inline]
    pub fn right(&self) -> isize {
        self.top_right.x
    }

    #[inline]
    pub fn bottom(&self) -> isize {
        self.bottom_left.y
    }

    #[inline]
    pub fn top(&self) -> isize {
        self.top_right.y
    }

    #[inline]
    pub fn width(&self) -> isize {
        self.right() - self.left()
    }

    #[inline]
    pub fn height(&self) -> isize {
        self.top() - self.bottom()
    }

    /// Centre point, rounded down.
    #[inline]
    pub fn centre(&self) -> IntPoint {
        IntPoint::new(
            self.left() + self.width() / 2,
            self.bottom() + self.height() / 2,
        )
    }

    #[inline]
    pub fn contains(&self, p: IntPoint, edge_inclusive: bool) -> bool {
        self.contains_dbl(p.to_dbl(), edge_inclusive)
    }

    pub fn contains_dbl(&self, p: DblPoint, edge_inclusive: bool) -> bool {
        let (left, right) = (self.left() as f64, self.right() as f64);
        let (bottom, top) = (self.bottom() as f64, self.top() as f64);
        if edge_inclusive {
            p.x >= left && p.x <= right && p.y >= bottom && p.y <= top
        } else {
            p.x > left && p.x < right && p.y > bottom && p.y < top
        }
    }

    pub fn union(&self, other: &AxisBox) -> AxisBox {
        AxisBox::new(
            self.left().min(other.left()),
            self.bottom().min(other.bottom()),
            self.right().max(other.right()),
            self.top().max(other.top()),
        )
    }

    /// True if the boxes overlap or touch.
    pub fn intersects(&self, other: &AxisBox) -> bool {
        self.left() <= other.right()
            && other.left() <= self.right()
            && self.bottom() <= other.top()
            && other.bottom() <= self.top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalises_and_centres() {
        let b = AxisBox::new(10, 8, -2, 0);
        assert_eq!((b.left(), b.bottom(), b.right(), b.top()), (-2, 0, 10, 8));
        assert_eq!(b.centre(), IntPoint::new(4, 4));
    }

    #[test]
    fn containment_edges() {
        let b = AxisBox::new(0, 0, 10, 10);
        let on_edge = IntPoint::new(0, 5);
        assert!(b.contains(on_edge, true));
        assert!(!b.contains(on_edge, false));
        assert!(b.contains(IntPoint::new(5, 5), false));
        assert!(!b.contains(IntPoint::new(11, 5), true));
    }

    #[test]
    fn from_points_and_union() {
        let b = AxisBox::from_points([
            IntPoint::new(3, -1),
            IntPoint::new(-4, 6),
            IntPoint::new(1, 2),
        ]);
        assert_eq!(b, Some(AxisBox::new(-4, -1, 3, 6)));
        assert_eq!(AxisBox::from_points(Vec::new()), None);

        let u = AxisBox::new(0, 0, 1, 1).union(&AxisBox::new(5, -2, 6, 0));
        assert_eq!(u, AxisBox::new(0, -2, 6, 1));
        assert!(AxisBox::new(0, 0, 2, 2).intersects(&AxisBox::new(2, 2, 3, 3)));
        assert!(!AxisBox::new(0, 0, 2, 2).intersects(&AxisBox::new(3, 0, 4, 1)));
    }
}
