//! Scalar geometry on points.
//!
//! Angles are measured clockwise from "up": up is 0, right is a quarter turn,
//! down is a half turn and left is three quarters of a turn.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use itertools::Itertools;

use crate::{
    error::GeomErr,
    line::IntLine,
    point::{DblPoint, IntPoint},
    slope::Slope,
};

pub const QUARTER_TURN: f64 = FRAC_PI_2;
pub const HALF_TURN: f64 = PI;
pub const THREE_QUARTER_TURN: f64 = PI + FRAC_PI_2;
pub const FULL_TURN: f64 = TAU;

#[inline]
pub fn length(p1: IntPoint, p2: IntPoint) -> f64 {
    length_dbl(p1.to_dbl(), p2.to_dbl())
}

pub fn length_dbl(p1: DblPoint, p2: DblPoint) -> f64 {
    let adj = (p2.x - p1.x).abs();
    let opp = (p2.y - p1.y).abs();
    (adj * adj + opp * opp).sqrt()
}

#[inline]
pub fn angle(start: IntPoint, end: IntPoint) -> Result<f64, GeomErr> {
    angle_dbl(start.to_dbl(), end.to_dbl())
}

/// Direction of travel from `start` to `end`, in `[0, FULL_TURN)`.
///
/// The four axis directions are exact.
pub fn angle_dbl(start: DblPoint, end: DblPoint) -> Result<f64, GeomErr> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    if dx == 0.0 && dy == 0.0 {
        return Err(GeomErr::DegenerateLine);
    }
    if dx == 0.0 {
        return Ok(if dy > 0.0 { 0.0 } else { HALF_TURN });
    }
    if dy == 0.0 {
        return Ok(if dx > 0.0 {
            QUARTER_TURN
        } else {
            THREE_QUARTER_TURN
        });
    }
    let adj = dx.abs();
    let hyp = length_dbl(start, end);
    let a = (adj / hyp).asin();
    Ok(match (dx > 0.0, dy > 0.0) {
        (true, true) => a,
        (true, false) => HALF_TURN - a,
        (false, false) => HALF_TURN + a,
        (false, true) => FULL_TURN - a,
    })
}

/// Signed turn made at `b` when travelling `a -> b -> c`.
///
/// Left turns are positive and right turns negative. Going straight on is
/// zero.
pub fn angle_turned(
    a: IntPoint,
    b: IntPoint,
    c: IntPoint,
) -> Result<f64, GeomErr> {
    let mut ab = angle(a, b)?;
    let mut bc = angle(b, c)?;
    let on_left = ccw(a, b, c) > 0;
    if on_left && ab < bc {
        ab += FULL_TURN;
    }
    if !on_left && ab > bc {
        bc += FULL_TURN;
    }
    Ok(ab - bc)
}

/// The angle swept clockwise from `b -> a` round to `b -> c`, in
/// `[0, FULL_TURN)`.
pub fn angle_between(
    a: IntPoint,
    b: IntPoint,
    c: IntPoint,
) -> Result<f64, GeomErr> {
    let ba = angle(b, a)?;
    let mut bc = angle(b, c)?;
    if bc < ba {
        bc += FULL_TURN;
    }
    Ok(bc - ba)
}

pub fn slope_to(p1: IntPoint, p2: IntPoint) -> Slope {
    if p1 == p2 {
        Slope::Degenerate
    } else if p1.y == p2.y {
        Slope::Horizontal
    } else if p1.x == p2.x {
        Slope::Vertical
    } else {
        Slope::Value((p2.y as f64 - p1.y as f64) / (p2.x as f64 - p1.x as f64))
    }
}

/// Orientation of the triple: `1` counter-clockwise, `-1` clockwise, `0`
/// collinear.
pub fn ccw(a: IntPoint, b: IntPoint, c: IntPoint) -> i8 {
    let (ax, ay) = (a.x as i128, a.y as i128);
    let (bx, by) = (b.x as i128, b.y as i128);
    let (cx, cy) = (c.x as i128, c.y as i128);
    let area2 = (bx - ax) * (cy - ay) - (by - ay) * (cx - ax);
    area2.signum() as i8
}

#[inline]
pub fn is_ccw(a: IntPoint, b: IntPoint, c: IntPoint) -> bool {
    ccw(a, b, c) > 0
}

/// True if every distinct point lies on one line. Fewer than three distinct
/// points are always collinear.
pub fn collinear(points: &[IntPoint]) -> bool {
    let distinct = points.iter().copied().sorted().dedup().collect_vec();
    match distinct.as_slice() {
        [a, b, rest @ ..] => rest.iter().all(|&c| ccw(*a, *b, c) == 0),
        _ => true,
    }
}

/// Integer midpoint, rounded towards the smaller co-ordinate.
pub fn midpoint(p1: IntPoint, p2: IntPoint) -> IntPoint {
    let half = |a: isize, b: isize| {
        let (a, b) = (a as i128, b as i128);
        (a.min(b) + (a - b).abs() / 2) as isize
    };
    IntPoint::new(half(p1.x, p2.x), half(p1.y, p2.y))
}

pub fn midpoint_dbl(p1: DblPoint, p2: DblPoint) -> DblPoint {
    DblPoint::new((p1.x + p2.x) / 2.0, (p1.y + p2.y) / 2.0)
}

/// Whether `p` is on the left of `line`, looking along its direction.
///
/// Points on the line are not on the left.
pub fn on_relative_left_side(
    line: &IntLine,
    p: IntPoint,
) -> Result<bool, GeomErr> {
    let (start, end) = (line.start(), line.end());
    match line.slope() {
        Slope::Degenerate => Err(GeomErr::DegenerateLine),
        _ if ccw(start, end, p) == 0 => Ok(false),
        Slope::Vertical => Ok(if start.y < end.y {
            p.x < start.x
        } else {
            p.x > start.x
        }),
        _ => {
            let y = line
                .y_for_x(p.x as f64)
                .ok_or(GeomErr::DegenerateLine)?;
            let above = p.y as f64 > y;
            Ok(if end.x > start.x { above } else { !above })
        }
    }
}

/// Where `y = s1 * x + i1` meets `y = s2 * x + i2`. The slopes must differ.
pub fn slope_intercept_intersection(
    s1: f64,
    i1: f64,
    s2: f64,
    i2: f64,
) -> DblPoint {
    let x = (i2 - i1) / (s1 - s2);
    DblPoint::new(x, s1 * x + i1)
}

/// Point at `radius` from the origin in the direction `angle`.
pub fn circle_point(angle: f64, radius: f64) -> DblPoint {
    DblPoint::new(angle.sin() * radius, angle.cos() * radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn p(x: isize, y: isize) -> IntPoint {
        IntPoint::new(x, y)
    }

    #[test]
    fn axis_angles_are_exact() {
        let o = p(-2, -7);
        assert_eq!(angle(o, p(-2, 5)), Ok(0.0));
        assert_eq!(angle(o, p(9, -7)), Ok(QUARTER_TURN));
        assert_eq!(angle(o, p(-2, -20)), Ok(HALF_TURN));
        assert_eq!(angle(o, p(-26, -7)), Ok(THREE_QUARTER_TURN));
        assert_eq!(angle(o, o), Err(GeomErr::DegenerateLine));
    }

    #[test]
    fn diagonal_angles() {
        let cases = [
            ((0, 0), (31, 31), PI / 4.0),
            ((0, 0), (27, -27), 3.0 * PI / 4.0),
            ((2, 7), (-5, 0), 5.0 * PI / 4.0),
            ((2076, -371), (2063, -358), 7.0 * PI / 4.0),
        ];
        for ((x0, y0), (x1, y1), expected) in cases {
            let a = angle(p(x0, y0), p(x1, y1)).unwrap();
            assert!((a - expected).abs() < EPS, "{} vs {}", a, expected);
            assert!((0.0..FULL_TURN).contains(&a));
        }
    }

    #[test]
    fn turns_are_signed() {
        let left = angle_turned(p(0, 0), p(10, 0), p(10, 10)).unwrap();
        assert!((left - QUARTER_TURN).abs() < EPS);
        let right = angle_turned(p(0, 0), p(0, 10), p(10, 10)).unwrap();
        assert!((right + QUARTER_TURN).abs() < EPS);
        assert_eq!(angle_turned(p(0, 0), p(5, 5), p(10, 10)), Ok(0.0));
        assert!(angle_turned(p(0, 0), p(0, 0), p(1, 1)).is_err());
    }

    #[test]
    fn interior_angle() {
        let a = angle_between(p(0, 10), p(0, 0), p(10, 0)).unwrap();
        assert!((a - QUARTER_TURN).abs() < EPS);
        let b = angle_between(p(10, 0), p(0, 0), p(0, 10)).unwrap();
        assert!((b - THREE_QUARTER_TURN).abs() < EPS);
    }

    #[test]
    fn orientation() {
        assert_eq!(ccw(p(0, 0), p(10, 0), p(5, 5)), 1);
        assert_eq!(ccw(p(0, 0), p(5, 5), p(10, 0)), -1);
        assert_eq!(ccw(p(0, 0), p(5, 5), p(-3, -3)), 0);
        let big = isize::MAX / 2;
        assert_eq!(ccw(p(-big, -big), p(big, -big), p(0, big)), 1);
        assert!(collinear(&[p(1, 1), p(3, 3), p(1, 1), p(-4, -4)]));
        assert!(!collinear(&[p(1, 1), p(3, 3), p(3, 4)]));
        assert!(collinear(&[p(2, 2), p(2, 2)]));
    }

    #[test]
    fn slopes() {
        assert_eq!(slope_to(p(1, 1), p(1, 1)), Slope::Degenerate);
        assert_eq!(slope_to(p(1, 1), p(4, 1)), Slope::Horizontal);
        assert_eq!(slope_to(p(1, 1), p(1, -6)), Slope::Vertical);
        assert_eq!(slope_to(p(0, 0), p(4, -2)), Slope::Value(-0.5));
        let (lo, hi) = (isize::MIN, isize::MAX);
        assert_eq!(slope_to(p(lo, lo), p(hi, hi)), Slope::Value(1.0));
    }

    #[test]
    fn midpoints_round_down() {
        assert_eq!(midpoint(p(0, 0), p(5, -3)), p(2, -2));
        assert_eq!(midpoint(p(10, 4), p(2, 4)), p(6, 4));
        let (lo, hi) = (isize::MIN, isize::MAX);
        assert_eq!(midpoint(p(lo, hi), p(hi, hi)), p(-1, hi));
    }

    #[test]
    fn left_side() {
        let up = IntLine::new(p(0, 0), p(0, 10));
        assert_eq!(on_relative_left_side(&up, p(-1, 5)), Ok(true));
        assert_eq!(on_relative_left_side(&up, p(1, 5)), Ok(false));
        let west = IntLine::new(p(10, 2), p(0, 2));
        assert_eq!(on_relative_left_side(&west, p(5, 0)), Ok(true));
        assert_eq!(on_relative_left_side(&west, p(5, 2)), Ok(false));
        let dot = IntLine::new(p(3, 3), p(3, 3));
        assert_eq!(
            on_relative_left_side(&dot, p(0, 0)),
            Err(GeomErr::DegenerateLine)
        );
    }
}
