use std::cmp::Ordering;
use std::fmt::{self, Display};

use crate::geom;
use crate::slope::Slope;

/// A point with integer co-ordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IntPoint {
    pub x: isize,
    pub y: isize,
}

impl PartialOrd for IntPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IntPoint {
    /// Compares by y co-ordinate, breaking ties by x co-ordinate.
    fn cmp(&self, other: &Self) -> Ordering {
        match self.y.cmp(&other.y) {
            Ordering::Equal => self.x.cmp(&other.x),
            o => o,
        }
    }
}

impl From<(isize, isize)> for IntPoint {
    fn from((x, y): (isize, isize)) -> Self {
        Self::new(x, y)
    }
}

impl Display for IntPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl IntPoint {
    #[inline]
    pub const fn new(x: isize, y: isize) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn to_dbl(self) -> DblPoint {
        DblPoint::new(self.x as f64, self.y as f64)
    }

    #[inline]
    pub fn sum(self, other: IntPoint) -> IntPoint {
        self.offset(other.x, other.y)
    }

    #[inline]
    pub fn offset(self, x: isize, y: isize) -> IntPoint {
        IntPoint::new(self.x + x, self.y + y)
    }

    #[inline]
    pub fn reflect_x(self, x_mid: isize) -> IntPoint {
        IntPoint::new(x_mid - self.x, self.y)
    }

    #[inline]
    pub fn reflect_y(self, y_mid: isize) -> IntPoint {
        IntPoint::new(self.x, y_mid - self.y)
    }

    #[inline]
    pub fn invert(self) -> IntPoint {
        IntPoint::new(-self.x, -self.y)
    }

    /// Quarter turn clockwise about `centre`.
    pub fn rotate90(self, centre: IntPoint) -> IntPoint {
        IntPoint::new(
            centre.x + (self.y - centre.y),
            centre.y - (self.x - centre.x),
        )
    }

    #[inline]
    pub fn multiply(self, x: isize, y: isize) -> IntPoint {
        IntPoint::new(self.x * x, self.y * y)
    }

    #[inline]
    pub fn slope_to(self, other: IntPoint) -> Slope {
        geom::slope_to(self, other)
    }

    #[inline]
    pub fn distance_to(self, other: IntPoint) -> f64 {
        geom::length(self, other)
    }
}

/// A point with floating-point co-ordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DblPoint {
    pub x: f64,
    pub y: f64,
}

impl Display for DblPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

impl DblPoint {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Co-ordinates truncated towards zero.
    #[inline]
    pub fn to_int(self) -> IntPoint {
        IntPoint::new(self.x as isize, self.y as isize)
    }

    /// Co-ordinates rounded to the nearest integer.
    #[inline]
    pub fn to_int_rounded(self) -> IntPoint {
        IntPoint::new(self.x.round() as isize, self.y.round() as isize)
    }

    #[inline]
    pub fn distance_to(self, other: DblPoint) -> f64 {
        geom::length_dbl(self, other)
    }
}
