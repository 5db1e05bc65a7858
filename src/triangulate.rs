//! Triangulation of simple polygons, and of polygons with holes by bridging
//! each hole into the outline first.

use itertools::Itertools;
use tracing::{debug, trace, warn};

use crate::{
    geom::{ccw, is_ccw},
    line::IntLine,
    point::IntPoint,
    polygon::Polygon,
    triangle::Triangle,
};

/// Fan out from the first vertex. Only correct for convex polygons.
pub fn convex_fan(vertices: &[IntPoint]) -> Vec<Triangle> {
    match vertices.split_first() {
        Some((&first, rest)) => rest
            .iter()
            .tuple_windows()
            .map(|(&b, &c)| Triangle::new(first, b, c))
            .collect(),
        None => Vec::new(),
    }
}

#[inline]
fn neighbours(ring: &[IntPoint], i: usize) -> (IntPoint, IntPoint, IntPoint) {
    let n = ring.len();
    (ring[(i + n - 1) % n], ring[i], ring[(i + 1) % n])
}

fn ring_edges(ring: &[IntPoint]) -> impl Iterator<Item = IntLine> + '_ {
    let n = ring.len();
    (0..n).map(move |j| IntLine::new(ring[j], ring[(j + 1) % n]))
}

/// Inside or on the boundary of the counter-clockwise triangle `abc`.
#[inline]
fn in_triangle(a: IntPoint, b: IntPoint, c: IntPoint, p: IntPoint) -> bool {
    ccw(a, b, p) >= 0 && ccw(b, c, p) >= 0 && ccw(c, a, p) >= 0
}

fn is_ear(ring: &[IntPoint], i: usize) -> bool {
    let (prev, cur, next) = neighbours(ring, i);
    if !is_ccw(prev, cur, next) {
        return false;
    }
    let diagonal = IntLine::new(next, prev);
    if ring_edges(ring).any(|e| e.intersects_segment(&diagonal, false)) {
        return false;
    }
    !ring
        .iter()
        .filter(|&&p| p != prev && p != cur && p != next)
        .any(|&p| in_triangle(prev, cur, next, p))
}

/// Repeatedly clips the first ear found, scanning from index 0.
///
/// The ring may repeat vertices, as a bridged polygon does. Vertices lying
/// straight between their neighbours are dropped once no ear is left.
pub fn ear_clipping(vertices: &[IntPoint]) -> Vec<Triangle> {
    let mut ring = vertices.to_vec();
    let mut triangles = Vec::with_capacity(ring.len().saturating_sub(2));
    while ring.len() >= 3 {
        if let Some(i) = (0..ring.len()).find(|&i| is_ear(&ring, i)) {
            let (a, b, c) = neighbours(&ring, i);
            trace!("clipping ear {} at {}", b, i);
            triangles.push(Triangle::new(a, b, c));
            ring.remove(i);
        } else if let Some(i) = (0..ring.len()).find(|&i| {
            let (a, b, c) = neighbours(&ring, i);
            ccw(a, b, c) == 0
        }) {
            trace!("dropping straight vertex {} at {}", ring[i], i);
            ring.remove(i);
        } else {
            warn!(
                "no ear found among {} vertices, clipping the first",
                ring.len()
            );
            let (a, b, c) = neighbours(&ring, 0);
            triangles.push(Triangle::new(a, b, c));
            ring.remove(0);
        }
    }
    debug!("ear clipping produced {} triangles", triangles.len());
    triangles
}

fn oriented(poly: &Polygon, ccw: bool) -> Vec<IntPoint> {
    let mut vertices = poly.vertices().to_vec();
    if (poly.area() > 0.0) != ccw {
        vertices.reverse();
    }
    vertices
}

/// True if nothing blocks the straight path from `from` to `to`.
fn bridge_is_clear(
    bridge: &IntLine,
    ring: &[IntPoint],
    outline: &Polygon,
    holes: &[Polygon],
) -> bool {
    let blocked_by = |p: IntPoint| {
        p != bridge.start() && p != bridge.end() && bridge.contains(p)
    };
    if ring_edges(ring).any(|e| e.intersects_segment(bridge, false)) {
        return false;
    }
    if ring.iter().any(|&p| blocked_by(p)) {
        return false;
    }
    for hole in holes {
        if hole.intersects_exclude_vertices(bridge) {
            return false;
        }
        if hole.vertices().iter().any(|&p| blocked_by(p)) {
            return false;
        }
    }
    let mid = bridge.midpoint_dbl();
    outline.contains_point_dbl(mid, false)
        && !holes.iter().any(|h| h.contains_point_dbl(mid, false))
}

/// Joins every hole to the outline by a pair of coincident edges, returning
/// one counter-clockwise ring which covers the outline minus the holes.
///
/// Holes are taken rightmost first. Each is joined from its rightmost vertex
/// to the nearest ring vertex it can see.
pub fn bridge_holes(outline: &Polygon, holes: &[Polygon]) -> Vec<IntPoint> {
    let mut ring = oriented(outline, true);
    let ordered = holes
        .iter()
        .sorted_by_key(|h| std::cmp::Reverse(h.bounding_box().right()))
        .collect_vec();
    for hole in ordered {
        let hole_ring = oriented(hole, false);
        let Some((mi, m)) = hole_ring
            .iter()
            .copied()
            .enumerate()
            .max_by_key(|&(_, p)| (p.x, p.y))
        else {
            continue;
        };
        let dist2 = |p: IntPoint| {
            let (dx, dy) = ((p.x - m.x) as i128, (p.y - m.y) as i128);
            dx * dx + dy * dy
        };
        let found = (0..ring.len())
            .filter(|&vi| ring[vi] != m)
            .sorted_by_key(|&vi| (dist2(ring[vi]), vi))
            .find(|&vi| {
                bridge_is_clear(&IntLine::new(m, ring[vi]), &ring, outline, holes)
            });
        match found {
            Some(vi) => {
                let v = ring[vi];
                debug!("bridging hole at {} to outline at {}", m, v);
                let spliced = ring[..=vi]
                    .iter()
                    .chain(hole_ring[mi..].iter())
                    .chain(hole_ring[..=mi].iter())
                    .chain(std::iter::once(&v))
                    .chain(ring[vi + 1..].iter())
                    .copied()
                    .collect_vec();
                ring = spliced;
            }
            None => warn!("hole at {} has no visible outline vertex", m),
        }
    }
    ring
}

/// Triangles covering `outline` but none of `holes`.
pub fn with_holes(outline: &Polygon, holes: &[Polygon]) -> Vec<Triangle> {
    if holes.is_empty() {
        return outline.triangulation();
    }
    ear_clipping(&bridge_holes(outline, holes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(coords: &[(isize, isize)]) -> Polygon {
        Polygon::new(coords.iter().map(|&c| IntPoint::from(c)).collect()).unwrap()
    }

    fn total_area(tris: &[Triangle]) -> f64 {
        tris.iter().map(Triangle::area).sum()
    }

    #[test]
    fn fan_of_too_few_vertices_is_empty() {
        assert!(convex_fan(&[]).is_empty());
        assert!(convex_fan(&[IntPoint::new(0, 0), IntPoint::new(1, 0)]).is_empty());
    }

    #[test]
    fn ear_clipping_an_arrow() {
        // concave at (5, 3)
        let arrow = poly(&[(0, 0), (5, 3), (10, 0), (5, 10)]);
        let tris = ear_clipping(arrow.vertices());
        assert_eq!(tris.len(), 2);
        assert!(tris.iter().all(Triangle::is_ccw));
        assert_eq!(total_area(&tris), arrow.area());
        let p = |x, y| IntPoint::new(x, y);
        assert_eq!(
            tris,
            vec![
                Triangle::new(p(5, 10), p(0, 0), p(5, 3)),
                Triangle::new(p(5, 10), p(5, 3), p(10, 0)),
            ]
        );
    }

    #[test]
    fn ear_may_not_touch_another_vertex() {
        // the notch tip (5, 5) lies on the diagonal of the corner at (0, 0)
        let dart = poly(&[(0, 0), (10, 0), (5, 5), (10, 10), (0, 10)]);
        let v = dart.vertices();
        let diagonal = IntLine::new(v[1], v[4]);
        assert!(is_ccw(v[4], v[0], v[1]));
        assert!(!ring_edges(v).any(|e| e.intersects_segment(&diagonal, false)));
        assert!(!is_ear(v, 0));

        let p = |x, y| IntPoint::new(x, y);
        let tris = ear_clipping(v);
        assert_eq!(
            tris,
            vec![
                Triangle::new(p(0, 0), p(10, 0), p(5, 5)),
                Triangle::new(p(0, 10), p(0, 0), p(5, 5)),
                Triangle::new(p(0, 10), p(5, 5), p(10, 10)),
            ]
        );
        assert_eq!(total_area(&tris), dart.area());
    }

    #[test]
    fn straight_vertices_are_dropped() {
        let sq = poly(&[(0, 0), (5, 0), (10, 0), (10, 10), (0, 10)]);
        let tris = ear_clipping(sq.vertices());
        assert_eq!(total_area(&tris), 100.0);
        assert!(tris.iter().all(|t| !t.is_degenerate()));
    }

    #[test]
    fn bridged_square_with_hole() {
        let outline = poly(&[(0, 0), (10, 0), (10, 10), (0, 10)]);
        let hole = poly(&[(4, 4), (4, 6), (6, 6), (6, 4)]);
        let ring = bridge_holes(&outline, &[hole.clone()]);
        assert_eq!(ring.len(), 4 + 4 + 2);

        let tris = with_holes(&outline, &[hole.clone()]);
        assert!(tris.iter().all(Triangle::is_ccw));
        assert_eq!(total_area(&tris), 96.0);
        for t in &tris {
            assert!(!hole.contains_point_dbl(t.centroid(), false), "{}", t);
        }
    }

    #[test]
    fn hole_winding_does_not_matter() {
        let outline = poly(&[(0, 0), (20, 0), (20, 10), (0, 10)]);
        let holes = [
            poly(&[(2, 2), (6, 2), (6, 6), (2, 6)]),
            poly(&[(12, 2), (12, 6), (16, 6), (16, 2)]),
        ];
        let tris = with_holes(&outline, &holes);
        assert_eq!(total_area(&tris), 200.0 - 16.0 - 16.0);
        for t in &tris {
            let c = t.centroid();
            assert!(holes.iter().all(|h| !h.contains_point_dbl(c, false)));
            assert!(outline.contains_point_dbl(c, false));
        }
    }
}
