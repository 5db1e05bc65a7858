use std::fmt::{self, Debug, Display};

use itertools::Itertools;

use crate::{
    boolean::{self, BooleanOp},
    error::GeomErr,
    geom::{self, FULL_TURN},
    line::IntLine,
    memo::Memo,
    point::{DblPoint, IntPoint},
    rect::AxisBox,
    shape::Shape,
    triangle::Triangle,
    triangulate,
};

/// How close the sum of turns must come to a full turn for the winding to
/// be recognised.
pub const WINDING_EPSILON: f64 = 1e-10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WindingOrder {
    Clockwise,
    CounterClockwise,
    Invalid,
}

/// A closed polygon with integer vertices.
///
/// A well formed polygon winds counter-clockwise, has no self-intersections,
/// no repeated vertices and no vertex lying on another edge. Construction
/// only checks the vertex count, so the other conditions can be queried but
/// are not enforced.
#[derive(Clone)]
pub struct Polygon {
    vertices: Vec<IntPoint>,
    bounds: AxisBox,
    edges: Memo<Vec<IntLine>>,
    sum_of_angles: Memo<Result<f64, GeomErr>>,
    winding: Memo<WindingOrder>,
    convex: Memo<bool>,
}

impl Debug for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polygon[{}]", self.vertices.iter().join(", "))
    }
}

impl Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.vertices.iter().join(" "))
    }
}

impl PartialEq for Polygon {
    /// Same vertices in the same cyclic order, starting anywhere.
    fn eq(&self, other: &Self) -> bool {
        let n = self.num_vertices();
        if n != other.num_vertices() {
            return false;
        }
        (0..n).any(|offset| {
            (0..n).all(|i| self.vertices[i] == other.vertices[(i + offset) % n])
        })
    }
}

impl Eq for Polygon {}

impl Polygon {
    pub fn new(vertices: Vec<IntPoint>) -> Result<Self, GeomErr> {
        if vertices.len() < 3 {
            return Err(GeomErr::NotEnoughVertices {
                found: vertices.len(),
            });
        }
        Ok(Self::build(vertices))
    }

    pub fn from_coords(xs: &[isize], ys: &[isize]) -> Result<Self, GeomErr> {
        if xs.len() != ys.len() {
            return Err(GeomErr::MismatchedCoords {
                xs: xs.len(),
                ys: ys.len(),
            });
        }
        Self::new(
            xs.iter()
                .zip(ys.iter())
                .map(|(&x, &y)| IntPoint::new(x, y))
                .collect(),
        )
    }

    pub(crate) fn from_triangle(t: &Triangle) -> Self {
        Self::build(t.vertices().to_vec())
    }

    /// A regular polygon with `sides` vertices at `radius` from `centre`,
    /// wound counter-clockwise and starting straight up from the centre.
    pub fn regular(
        sides: usize,
        radius: f64,
        centre: IntPoint,
    ) -> Result<Self, GeomErr> {
        let step = FULL_TURN / sides as f64;
        let vertices = (0..sides)
            .map(|i| {
                geom::circle_point(FULL_TURN - step * i as f64, radius)
                    .to_int_rounded()
                    .sum(centre)
            })
            .collect_vec();
        Self::new(vertices)
    }

    /// Callers guarantee at least 3 vertices.
    fn build(vertices: Vec<IntPoint>) -> Self {
        let bounds = AxisBox::from_points(vertices.iter().copied())
            .unwrap_or_else(|| AxisBox::new(0, 0, 0, 0));
        Self {
            vertices,
            bounds,
            edges: Memo::new(),
            sum_of_angles: Memo::new(),
            winding: Memo::new(),
            convex: Memo::new(),
        }
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn vertices(&self) -> &[IntPoint] {
        &self.vertices
    }

    /// Maps any index, negative or past the end, onto `0..num_vertices()`.
    #[inline]
    pub fn wrap_index(&self, i: isize) -> usize {
        i.rem_euclid(self.num_vertices() as isize) as usize
    }

    #[inline]
    pub fn vertex(&self, i: isize) -> IntPoint {
        self.vertices[self.wrap_index(i)]
    }

    /// Edge `i` runs from vertex `i` to vertex `i + 1`.
    pub fn edges(&self) -> &[IntLine] {
        self.edges.get_or_init(|| {
            let n = self.num_vertices();
            (0..n)
                .map(|i| IntLine::new(self.vertices[i], self.vertices[(i + 1) % n]))
                .collect()
        })
    }

    #[inline]
    pub fn edge(&self, i: isize) -> &IntLine {
        &self.edges()[self.wrap_index(i)]
    }

    #[inline]
    pub fn bounding_box(&self) -> AxisBox {
        self.bounds
    }

    #[inline]
    pub fn centre(&self) -> IntPoint {
        self.bounds.centre()
    }

    /*---------------------------- GEOMETRY ----------------------------*/

    /// Sum of the turns made at every vertex. Fails if two consecutive
    /// vertices are equal.
    pub fn sum_of_angles(&self) -> Result<f64, GeomErr> {
        *self.sum_of_angles.get_or_init(|| {
            let n = self.num_vertices() as isize;
            (0..n).try_fold(0.0, |sum, i| {
                geom::angle_turned(self.vertex(i - 1), self.vertex(i), self.vertex(i + 1))
                    .map(|turn| sum + turn)
            })
        })
    }

    pub fn winding_order(&self) -> WindingOrder {
        *self.winding.get_or_init(|| match self.sum_of_angles() {
            Ok(sum) if (sum - FULL_TURN).abs() <= WINDING_EPSILON => {
                WindingOrder::CounterClockwise
            }
            Ok(sum) if (sum + FULL_TURN).abs() <= WINDING_EPSILON => {
                WindingOrder::Clockwise
            }
            _ => WindingOrder::Invalid,
        })
    }

    #[inline]
    pub fn is_ccw(&self) -> bool {
        self.winding_order() == WindingOrder::CounterClockwise
    }

    /// True if every vertex turns strictly left.
    pub fn is_convex(&self) -> bool {
        *self.convex.get_or_init(|| {
            let n = self.num_vertices() as isize;
            (0..n).all(|i| {
                matches!(
                    geom::angle_turned(self.vertex(i - 1), self.vertex(i), self.vertex(i + 1)),
                    Ok(turn) if turn > 0.0
                )
            })
        })
    }

    /// Signed area, positive for counter-clockwise winding.
    pub fn area(&self) -> f64 {
        let twice: i128 = self
            .edges()
            .iter()
            .map(|e| {
                let (a, b) = (e.start(), e.end());
                a.x as i128 * b.y as i128 - b.x as i128 * a.y as i128
            })
            .sum();
        twice as f64 / 2.0
    }

    /*--------------------------- CONTAINMENT --------------------------*/

    /// Points on an edge are contained only when `edge_inclusive` is set.
    pub fn contains_point(&self, p: IntPoint, edge_inclusive: bool) -> bool {
        if !self.bounds.contains(p, true) {
            return false;
        }
        if self.edges().iter().any(|e| e.contains(p)) {
            return edge_inclusive;
        }
        let (px, py) = (p.x as i128, p.y as i128);
        let mut inside = false;
        for e in self.edges() {
            let (a, b) = (e.start(), e.end());
            let (ax, ay) = (a.x as i128, a.y as i128);
            let (bx, by) = (b.x as i128, b.y as i128);
            if (ay > py) != (by > py) {
                // is p left of the crossing point at height py?
                let dy = by - ay;
                let lhs = (px - ax) * dy;
                let rhs = (py - ay) * (bx - ax);
                if (dy > 0 && lhs < rhs) || (dy < 0 && lhs > rhs) {
                    inside = !inside;
                }
            }
        }
        inside
    }

    pub fn contains_point_dbl(&self, p: DblPoint, edge_inclusive: bool) -> bool {
        if !self.bounds.contains_dbl(p, true) {
            return false;
        }
        let on_edge = self.edges().iter().any(|e| {
            let (a, b) = (e.start().to_dbl(), e.end().to_dbl());
            let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
            cross == 0.0 && e.bounding_box().contains_dbl(p, true)
        });
        if on_edge {
            return edge_inclusive;
        }
        let mut inside = false;
        for e in self.edges() {
            let (a, b) = (e.start().to_dbl(), e.end().to_dbl());
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// True if no part of `line` passes outside the polygon. Lines running
    /// along an edge count as contained.
    pub fn contains_line(&self, line: &IntLine) -> bool {
        if !self.contains_point(line.start(), true) || !self.contains_point(line.end(), true) {
            return false;
        }
        self.split_line_at_intersections(line)
            .iter()
            .all(|part| self.contains_point_dbl(part.midpoint_dbl(), true))
    }

    /// True if `line` crosses any edge. Meeting an edge at an end point does
    /// not count.
    pub fn intersects_exclude_vertices(&self, line: &IntLine) -> bool {
        self.edges().iter().any(|e| e.intersects_segment(line, false))
    }

    /// Cuts `line` wherever it meets an edge. The parts keep the line's
    /// direction and run from its start to its end.
    pub fn split_line_at_intersections(&self, line: &IntLine) -> Vec<IntLine> {
        let starts = split_points(line, self.edges());
        if starts.len() == 1 {
            return vec![line.clone()];
        }
        starts
            .iter()
            .copied()
            .chain(std::iter::once(line.end()))
            .tuple_windows()
            .map(|(a, b)| IntLine::new(a, b))
            .collect()
    }

    /*------------------------- TRIANGULATION --------------------------*/

    pub fn triangulation(&self) -> Vec<Triangle> {
        if self.is_convex() {
            self.triangulation_convex_fan()
        } else {
            self.triangulation_ear_clipping()
        }
    }

    /// Only correct for convex polygons.
    pub fn triangulation_convex_fan(&self) -> Vec<Triangle> {
        triangulate::convex_fan(&self.vertices)
    }

    pub fn triangulation_ear_clipping(&self) -> Vec<Triangle> {
        triangulate::ear_clipping(&self.vertices)
    }

    /*------------------------ TRANSFORMATIONS -------------------------*/

    fn map_vertices(&self, f: impl Fn(IntPoint) -> IntPoint) -> Polygon {
        Polygon::build(self.vertices.iter().map(|&v| f(v)).collect())
    }

    pub fn translate(&self, x: isize, y: isize) -> Polygon {
        self.map_vertices(|v| v.offset(x, y))
    }

    pub fn reverse_vertex_order(&self) -> Polygon {
        Polygon::build(self.vertices.iter().rev().copied().collect())
    }

    pub fn reflect_x(&self, x_mid: isize) -> Polygon {
        self.map_vertices(|v| v.reflect_x(x_mid))
    }

    pub fn reflect_y(&self, y_mid: isize) -> Polygon {
        self.map_vertices(|v| v.reflect_y(y_mid))
    }

    pub fn rotate90(&self, centre: IntPoint) -> Polygon {
        self.map_vertices(|v| v.rotate90(centre))
    }

    fn check_index(&self, index: usize) -> Result<(), GeomErr> {
        if index < self.num_vertices() {
            Ok(())
        } else {
            Err(GeomErr::IndexOutOfRange {
                index,
                len: self.num_vertices(),
            })
        }
    }

    pub fn set_vertex(&self, index: usize, p: IntPoint) -> Result<Polygon, GeomErr> {
        self.check_index(index)?;
        let mut vertices = self.vertices.clone();
        vertices[index] = p;
        Ok(Polygon::build(vertices))
    }

    /// Removes the vertex at `index`.
    pub fn clip_vertex(&self, index: usize) -> Result<Polygon, GeomErr> {
        self.check_index(index)?;
        let mut vertices = self.vertices.clone();
        vertices.remove(index);
        Polygon::new(vertices)
    }

    /// Inserts `p` so that it becomes vertex `index + 1`.
    pub fn add_vertex_after(&self, index: usize, p: IntPoint) -> Result<Polygon, GeomErr> {
        self.check_index(index)?;
        let mut vertices = self.vertices.clone();
        vertices.insert(index + 1, p);
        Ok(Polygon::build(vertices))
    }

    /*--------------------- BOOLEAN TRANSFORMATIONS --------------------*/

    /// `self` with `other` cut away.
    pub fn subtraction(&self, other: &Polygon) -> Vec<Shape> {
        boolean::apply(self, other, BooleanOp::Subtraction)
    }

    pub fn intersection(&self, other: &Polygon) -> Vec<Shape> {
        boolean::apply(self, other, BooleanOp::Intersection)
    }

    pub fn union(&self, other: &Polygon) -> Vec<Shape> {
        boolean::apply(self, other, BooleanOp::Union)
    }
}

/// The start of `line`, followed by every point where it meets one of
/// `edges`, rounded and ordered by distance from the start. The end of the
/// line is never included.
pub(crate) fn split_points(line: &IntLine, edges: &[IntLine]) -> Vec<IntPoint> {
    let start = line.start();
    let dist2 = |p: IntPoint| {
        let (dx, dy) = ((p.x - start.x) as i128, (p.y - start.y) as i128);
        dx * dx + dy * dy
    };
    std::iter::once(start)
        .chain(
            edges
                .iter()
                .filter(|e| line.intersects_segment(e, true))
                .filter_map(|e| line.intersection_int(e))
                .filter(|&p| p != line.end()),
        )
        .sorted_by_key(|&p| (dist2(p), p))
        .dedup()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(isize, isize)]) -> Vec<IntPoint> {
        coords.iter().map(|&c| IntPoint::from(c)).collect()
    }

    fn poly(coords: &[(isize, isize)]) -> Polygon {
        Polygon::new(pts(coords)).unwrap()
    }

    fn square() -> Polygon {
        poly(&[(0, 0), (10, 0), (10, 10), (0, 10)])
    }

    fn quad1() -> Polygon {
        poly(&[(1, -2), (9, -3), (-4, 12), (-2, -8)])
    }

    /// A concave polygon with a notch cut into its left side.
    fn poly1() -> Polygon {
        poly(&[
            (0, 0),
            (10, 0),
            (16, 6),
            (16, 10),
            (20, 10),
            (25, 15),
            (35, 35),
            (25, 35),
            (17, 19),
            (3, 19),
            (3, 16),
            (5, 16),
            (5, 12),
            (3, 12),
            (3, 4),
            (0, 4),
        ])
    }

    fn line(sx: isize, sy: isize, ex: isize, ey: isize) -> IntLine {
        IntLine::from_coords(sx, sy, ex, ey)
    }

    #[test]
    fn construction() {
        assert_eq!(
            Polygon::new(pts(&[(0, 0), (1, 1)])),
            Err(GeomErr::NotEnoughVertices { found: 2 })
        );
        assert_eq!(
            Polygon::from_coords(&[0, 1, 2], &[0, 1]),
            Err(GeomErr::MismatchedCoords { xs: 3, ys: 2 })
        );
        let p = Polygon::from_coords(&[0, 10, 10, 0], &[0, 0, 10, 10]).unwrap();
        assert_eq!(p, square());
        assert_eq!(p.bounding_box(), AxisBox::new(0, 0, 10, 10));
        assert_eq!(p.centre(), IntPoint::new(5, 5));
    }

    #[test]
    fn indices_wrap() {
        let p = square();
        assert_eq!(p.wrap_index(-1), 3);
        assert_eq!(p.wrap_index(-9), 3);
        assert_eq!(p.wrap_index(4), 0);
        assert_eq!(p.wrap_index(10), 2);
        assert_eq!(p.vertex(-1), IntPoint::new(0, 10));
        assert_eq!(*p.edge(3), line(0, 10, 0, 0));
        assert_eq!(p.edges().len(), 4);
    }

    #[test]
    fn equality_is_cyclic() {
        let q = quad1();
        let cycled = poly(&[(-4, 12), (-2, -8), (1, -2), (9, -3)]);
        assert_eq!(q, cycled);
        let reversed = q.reverse_vertex_order();
        assert_ne!(q, reversed);
        assert_eq!(q, reversed.reverse_vertex_order());
        assert_eq!(reversed.bounding_box(), q.bounding_box());
        assert_ne!(q, q.reflect_x(0));
        assert_ne!(square(), poly(&[(0, 0), (10, 0), (10, 10)]));
    }

    #[test]
    fn winding_and_angles() {
        let sq = square();
        assert_eq!(sq.winding_order(), WindingOrder::CounterClockwise);
        assert!((sq.sum_of_angles().unwrap() - FULL_TURN).abs() < 1e-12);
        assert!(sq.is_convex());
        assert_eq!(sq.area(), 100.0);

        let rev = sq.reverse_vertex_order();
        assert_eq!(rev.winding_order(), WindingOrder::Clockwise);
        assert!(!rev.is_convex());
        assert_eq!(rev.area(), -100.0);

        let p1 = poly1();
        assert!(p1.is_ccw());
        assert!(!p1.is_convex());

        let repeated = poly(&[(0, 0), (10, 0), (10, 0), (0, 10)]);
        assert_eq!(repeated.winding_order(), WindingOrder::Invalid);
        assert!(repeated.sum_of_angles().is_err());
        assert!(!repeated.is_convex());

        // self-intersecting bow tie turns both ways
        let bow = poly(&[(0, 0), (10, 10), (10, 0), (0, 10)]);
        assert_eq!(bow.winding_order(), WindingOrder::Invalid);
    }

    #[test]
    fn point_containment() {
        let sq = square();
        assert!(sq.contains_point(IntPoint::new(5, 5), false));
        assert!(sq.contains_point(IntPoint::new(0, 5), true));
        assert!(!sq.contains_point(IntPoint::new(0, 5), false));
        assert!(sq.contains_point(IntPoint::new(10, 10), true));
        assert!(!sq.contains_point(IntPoint::new(11, 5), true));

        let p1 = poly1();
        // inside the notch
        assert!(!p1.contains_point(IntPoint::new(4, 14), true));
        assert!(!p1.contains_point(IntPoint::new(2, 14), true));
        assert!(p1.contains_point(IntPoint::new(4, 17), false));
        assert!(p1.contains_point(IntPoint::new(11, 14), false));
        assert!(!p1.contains_point(IntPoint::new(18, 8), true));

        assert!(sq.contains_point_dbl(DblPoint::new(9.5, 0.5), false));
        assert!(sq.contains_point_dbl(DblPoint::new(10.0, 2.5), true));
        assert!(!sq.contains_point_dbl(DblPoint::new(10.0, 2.5), false));
    }

    #[test]
    fn line_splitting() {
        let p1 = poly1();
        assert_eq!(p1.split_line_at_intersections(&line(4, 20, 17, 22)).len(), 1);
        assert_eq!(p1.split_line_at_intersections(&line(4, 20, 17, 19)).len(), 1);
        assert_eq!(p1.split_line_at_intersections(&line(4, 20, 18, 21)).len(), 1);
        assert_eq!(p1.split_line_at_intersections(&line(6, 18, 16, 11)).len(), 1);

        let crossing = line(4, 20, 6, 18);
        let parts = p1.split_line_at_intersections(&crossing);
        assert_eq!(parts, vec![line(4, 20, 5, 19), line(5, 19, 6, 18)]);

        for i in 0..p1.num_vertices() as isize {
            let e = p1.edge(i);
            assert_eq!(p1.split_line_at_intersections(e), vec![e.clone()]);
        }
    }

    #[test]
    fn line_containment() {
        let p1 = poly1();
        assert!(!p1.contains_line(&line(36, 20, 41, 9)));
        assert!(!p1.contains_line(&line(5, 2, 41, 9)));
        assert!(!p1.contains_line(&line(4, 20, 17, 22)));
        assert!(!p1.contains_line(&line(4, 20, 6, 18)));
        assert!(p1.contains_line(&line(6, 18, 16, 11)));
        assert!(p1.contains_line(&line(6, 18, 16, 10)));
        assert!(p1.contains_line(p1.edge(4)));
        // both ends inside, but passing through the notch
        assert!(!p1.contains_line(&line(4, 17, 4, 5)));
        assert!(!p1.contains_line(&line(1, 14, 8, 14)));
    }

    #[test]
    fn crossing_edges() {
        let sq = square();
        assert!(sq.intersects_exclude_vertices(&line(-5, 5, 5, 5)));
        assert!(!sq.intersects_exclude_vertices(&line(0, 0, 10, 10)));
        assert!(!sq.intersects_exclude_vertices(&line(2, 2, 8, 3)));
    }

    #[test]
    fn convex_triangulation() {
        let sq = square();
        let tris = sq.triangulation();
        assert_eq!(
            tris,
            vec![
                Triangle::new(IntPoint::new(0, 0), IntPoint::new(10, 0), IntPoint::new(10, 10)),
                Triangle::new(IntPoint::new(0, 0), IntPoint::new(10, 10), IntPoint::new(0, 10)),
            ]
        );

        let hex = Polygon::regular(6, 20.0, IntPoint::new(3, -4)).unwrap();
        assert!(hex.is_convex());
        let tris = hex.triangulation();
        assert_eq!(tris.len(), 4);
        assert!(tris.iter().all(|t| t.is_ccw() && !t.is_degenerate()));
        let total: f64 = tris.iter().map(Triangle::area).sum();
        assert!((total - hex.area()).abs() < 1e-9);
    }

    #[test]
    fn concave_triangulation() {
        let p1 = poly1();
        let tris = p1.triangulation();
        assert_eq!(tris.len(), p1.num_vertices() - 2);
        assert!(tris.iter().all(|t| t.is_ccw()));
        let total: f64 = tris.iter().map(Triangle::area).sum();
        assert!((total - p1.area()).abs() < 1e-9);
        for t in &tris {
            assert!(p1.contains_point_dbl(t.centroid(), false), "{}", t);
        }
    }

    #[test]
    fn regular_polygon() {
        let diamond = Polygon::regular(4, 10.0, IntPoint::new(0, 0)).unwrap();
        assert_eq!(diamond, poly(&[(0, 10), (-10, 0), (0, -10), (10, 0)]));
        assert!(diamond.is_ccw());
        assert_eq!(
            Polygon::regular(2, 10.0, IntPoint::new(0, 0)),
            Err(GeomErr::NotEnoughVertices { found: 2 })
        );
    }

    #[test]
    fn vertex_edits() {
        let sq = square();
        assert_eq!(
            sq.translate(2, -1),
            poly(&[(2, -1), (12, -1), (12, 9), (2, 9)])
        );
        assert_eq!(
            sq.set_vertex(2, IntPoint::new(12, 12)).unwrap().vertex(2),
            IntPoint::new(12, 12)
        );
        let clipped = sq.clip_vertex(1).unwrap();
        assert_eq!(clipped, poly(&[(0, 0), (10, 10), (0, 10)]));
        assert_eq!(
            clipped.clip_vertex(0),
            Err(GeomErr::NotEnoughVertices { found: 2 })
        );
        let added = sq.add_vertex_after(1, IntPoint::new(12, 5)).unwrap();
        assert_eq!(added.vertex(2), IntPoint::new(12, 5));
        assert_eq!(added.num_vertices(), 5);
        assert_eq!(
            sq.set_vertex(4, IntPoint::new(0, 0)),
            Err(GeomErr::IndexOutOfRange { index: 4, len: 4 })
        );
        assert_eq!(
            sq.reflect_y(10),
            poly(&[(0, 10), (10, 10), (10, 0), (0, 0)])
        );
        let turned = sq.rotate90(IntPoint::new(0, 0));
        assert_eq!(turned, poly(&[(0, 0), (0, -10), (10, -10), (10, 0)]));
        assert!(turned.is_ccw());
    }
}
