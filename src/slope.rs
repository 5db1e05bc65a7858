use crate::point::DblPoint;

/// The slope of a directed line, with the special cases made explicit.
///
/// Two slopes are equal when their tags match and, for `Value`, when the
/// ratios compare equal. Lines with equal slopes are parallel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Slope {
    /// Start and end are the same point.
    Degenerate,
    Horizontal,
    Vertical,
    /// `dy / dx` for a line which is neither horizontal nor vertical.
    Value(f64),
}

/// Outcome of intersecting two unbounded lines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Intersection {
    Point(DblPoint),
    /// The lines have equal slopes: they never meet, or they overlap.
    Parallel,
    /// At least one of the lines has zero length.
    Degenerate,
}

impl Intersection {
    #[inline]
    pub fn point(self) -> Option<DblPoint> {
        match self {
            Intersection::Point(p) => Some(p),
            _ => None,
        }
    }
}
