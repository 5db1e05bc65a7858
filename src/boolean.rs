//! Boolean operations between two polygons.
//!
//! Both boundaries are split wherever they meet, so that the two split
//! polygons share every crossing point exactly. Each split edge is then
//! classified against the other polygon, the edges bounding the result are
//! selected, and the selection is walked as a graph to close the result's
//! loops. Counter-clockwise loops are outlines and clockwise loops holes.

use itertools::Itertools;
use tracing::{debug, trace, warn};

use crate::{
    dbg_edges, dbg_node, dbg_points,
    debug::COLOR_ORANGE,
    edge::EdgeId,
    emit_info, emit_info_span,
    geom::{angle_turned, ccw, HALF_TURN},
    geometry::{Geometry, Origin},
    line::IntLine,
    node::NodeId,
    point::IntPoint,
    polygon::{split_points, Polygon},
    shape::Shape,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BooleanOp {
    Subtraction,
    Intersection,
    Union,
}

/// Where a split edge lies relative to the other polygon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Classification {
    Outside,
    Inside,
    /// Runs along one of the other polygon's edges.
    Boundary { same_direction: bool },
}

/// A polygon split against its partner, with every split edge classified.
#[derive(Clone, Debug)]
pub struct ClassifiedPolygon {
    pub origin: Origin,
    pub split: Polygon,
    pub edges: Vec<(IntLine, Classification)>,
}

/// Every result of combining `a` with `b`.
#[derive(Clone, Debug, PartialEq)]
pub struct BooleanTransformation {
    /// `a` with `b` cut away.
    pub subtraction1: Vec<Shape>,
    /// `b` with `a` cut away.
    pub subtraction2: Vec<Shape>,
    pub intersection: Vec<Shape>,
    pub union: Vec<Shape>,
}

impl BooleanTransformation {
    pub fn new(a: &Polygon, b: &Polygon) -> Self {
        let _span = emit_info_span!("boolean_transformation", a = %a, b = %b).entered();
        let (ca, cb) = classify_pair(a, b);
        let transformation = Self {
            subtraction1: combine(BooleanOp::Subtraction, &ca, &cb),
            subtraction2: combine(BooleanOp::Subtraction, &cb, &ca),
            intersection: combine(BooleanOp::Intersection, &ca, &cb),
            union: combine(BooleanOp::Union, &ca, &cb),
        };
        emit_info!(
            sty: COLOR_ORANGE.bold(),
            fmt: "a-b: {}, b-a: {}, a&b: {}, a|b: {} shapes" |
            transformation.subtraction1.len(),
            transformation.subtraction2.len(),
            transformation.intersection.len(),
            transformation.union.len()
        );
        transformation
    }
}

/// The single result of `op` applied to `a` and `b`.
pub fn apply(a: &Polygon, b: &Polygon, op: BooleanOp) -> Vec<Shape> {
    let _span = emit_info_span!("boolean", op = ?op).entered();
    let (ca, cb) = classify_pair(a, b);
    combine(op, &ca, &cb)
}

fn counter_clockwise(poly: &Polygon) -> Polygon {
    if poly.area() < 0.0 {
        poly.reverse_vertex_order()
    } else {
        poly.clone()
    }
}

/// Vertices of `poly` with every point where its edges meet `other`'s
/// inserted in order along the boundary.
pub fn split_vertices(poly: &Polygon, other: &Polygon) -> Vec<IntPoint> {
    let mut points = poly
        .edges()
        .iter()
        .flat_map(|e| split_points(e, other.edges()))
        .dedup()
        .collect_vec();
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}

/// Falls back to the unsplit polygon if splitting collapsed it.
fn split_polygon(poly: &Polygon, other: &Polygon) -> Polygon {
    match Polygon::new(split_vertices(poly, other)) {
        Ok(split) => split,
        Err(e) => {
            warn!("split of {} collapsed ({}), keeping it whole", poly, e);
            poly.clone()
        }
    }
}

pub fn classify(edge: &IntLine, other: &Polygon) -> Classification {
    if let Some(along) = other.edges().iter().find(|o| edge.is_section_of(o)) {
        let (d, e) = (
            edge.end().sum(edge.start().invert()),
            along.end().sum(along.start().invert()),
        );
        let dot = d.x as i128 * e.x as i128 + d.y as i128 * e.y as i128;
        return Classification::Boundary {
            same_direction: dot > 0,
        };
    }
    if other.contains_point_dbl(edge.midpoint_dbl(), false) {
        Classification::Inside
    } else {
        Classification::Outside
    }
}

fn classify_polygon(split: Polygon, other: &Polygon, origin: Origin) -> ClassifiedPolygon {
    let edges = split
        .edges()
        .iter()
        .map(|e| {
            let class = classify(e, other);
            trace!("{:?} edge {} is {:?}", origin, e, class);
            (e.clone(), class)
        })
        .collect();
    ClassifiedPolygon {
        origin,
        split,
        edges,
    }
}

/// Orients both polygons counter-clockwise, splits each against the other
/// and classifies the split edges.
pub fn classify_pair(a: &Polygon, b: &Polygon) -> (ClassifiedPolygon, ClassifiedPolygon) {
    let (a, b) = (counter_clockwise(a), counter_clockwise(b));
    let (split_a, split_b) = (split_polygon(&a, &b), split_polygon(&b, &a));
    debug!(
        "split {} -> {} and {} -> {} vertices",
        a.num_vertices(),
        split_a.num_vertices(),
        b.num_vertices(),
        split_b.num_vertices()
    );
    let ca = classify_polygon(split_a, &split_b, Origin::A);
    let cb = classify_polygon(split_b, &ca.split, Origin::B);
    (ca, cb)
}

fn pick(
    cp: &ClassifiedPolygon,
    wanted: impl Fn(Classification) -> bool,
    reverse: bool,
) -> Vec<(IntLine, Origin)> {
    cp.edges
        .iter()
        .filter(|(_, class)| wanted(*class))
        .map(|(e, _)| (if reverse { e.reverse() } else { e.clone() }, cp.origin))
        .collect()
}

/// The directed edges which bound the result of `op` on `first` and
/// `second`, in that order.
pub fn select_edges(
    op: BooleanOp,
    first: &ClassifiedPolygon,
    second: &ClassifiedPolygon,
) -> Vec<(IntLine, Origin)> {
    use Classification::*;
    let (from_first, from_second) = match op {
        BooleanOp::Subtraction => (
            pick(first, |c| matches!(c, Outside | Boundary { same_direction: false }), false),
            pick(second, |c| c == Inside, true),
        ),
        BooleanOp::Union => (
            pick(first, |c| matches!(c, Outside | Boundary { same_direction: true }), false),
            pick(second, |c| c == Outside, false),
        ),
        BooleanOp::Intersection => (
            pick(first, |c| matches!(c, Inside | Boundary { same_direction: true }), false),
            pick(second, |c| c == Inside, false),
        ),
    };
    debug!(
        "{:?} keeps {} edges of {:?} and {} of {:?}",
        op,
        from_first.len(),
        first.origin,
        from_second.len(),
        second.origin
    );
    from_first.into_iter().chain(from_second).collect()
}

/// The unused edge out of `at` which turns furthest left after arriving
/// from `from`. Turning straight back is the last resort.
fn leftmost_turn(geometry: &Geometry, from: NodeId, at: NodeId) -> Option<EdgeId> {
    let (p, q) = (geometry.point(from), geometry.point(at));
    let turn = |e: EdgeId| {
        let r = geometry.point(geometry[e].target);
        if r == p {
            -HALF_TURN
        } else {
            angle_turned(p, q, r).unwrap_or(-HALF_TURN)
        }
    };
    geometry.unused_out_edges(at).max_by(|&x, &y| {
        turn(x)
            .total_cmp(&turn(y))
            .then(y.index().cmp(&x.index()))
    })
}

/// Walks the selected edges into closed loops of points.
///
/// Walks start preferably from an edge of `first` whose start lies outside
/// `second`.
pub fn traverse(
    selected: &[(IntLine, Origin)],
    first: &ClassifiedPolygon,
    second: &ClassifiedPolygon,
) -> Vec<Vec<IntPoint>> {
    let mut geometry = Geometry::new();
    let ids = selected
        .iter()
        .map(|(e, origin)| geometry.new_edge(e.start(), e.end(), *origin))
        .collect_vec();
    trace!("walking {:?}", dbg_edges!(&geometry));

    let outside_start = |id: EdgeId| {
        let edge = &geometry[id];
        edge.origin == first.origin
            && !second.split.contains_point(geometry.point(edge.source), true)
    };
    let order = ids
        .iter()
        .copied()
        .sorted_by_key(|&id| (!outside_start(id), id.index()))
        .collect_vec();

    let mut loops = Vec::new();
    for start in order {
        if geometry[start].is_used() {
            continue;
        }
        geometry[start].mark_used();
        let origin_node = geometry[start].source;
        let mut points = vec![geometry.point(origin_node)];
        let mut current = start;
        let closed = loop {
            let (from, at) = (geometry[current].source, geometry[current].target);
            if at == origin_node {
                break true;
            }
            points.push(geometry.point(at));
            match leftmost_turn(&geometry, from, at) {
                Some(next) => {
                    geometry[next].mark_used();
                    current = next;
                }
                None => {
                    warn!(
                        "walk from {} dead-ends at {:?}",
                        geometry.point(origin_node),
                        dbg_node!(&geometry, &geometry[at])
                    );
                    break false;
                }
            }
        };
        if closed {
            debug!("closed loop {:?}", dbg_points!(&points));
            loops.push(points);
        }
    }
    loops
}

/// Removes vertices lying straight between their neighbours, along with
/// zero-width spikes.
pub fn drop_straight_vertices(mut points: Vec<IntPoint>) -> Vec<IntPoint> {
    while points.len() >= 3 {
        let n = points.len();
        match (0..n).find(|&i| ccw(points[(i + n - 1) % n], points[i], points[(i + 1) % n]) == 0) {
            Some(i) => {
                points.remove(i);
            }
            None => break,
        }
    }
    points
}

/// Counter-clockwise loops become outlines. Each clockwise loop becomes a
/// hole of the smallest outline containing it.
pub fn assemble(loops: Vec<Vec<IntPoint>>) -> Vec<Shape> {
    let (mut outlines, mut holes) = (Vec::new(), Vec::new());
    for points in loops {
        match Polygon::new(drop_straight_vertices(points)) {
            Ok(poly) if poly.area() > 0.0 => outlines.push(poly),
            Ok(poly) => holes.push(poly),
            Err(e) => trace!("dropping loop: {}", e),
        }
    }
    let mut owned: Vec<Vec<Polygon>> = vec![Vec::new(); outlines.len()];
    for hole in holes {
        let owner = outlines
            .iter()
            .enumerate()
            .filter(|(_, o)| hole.vertices().iter().all(|&p| o.contains_point(p, true)))
            .min_by(|(_, x), (_, y)| x.area().total_cmp(&y.area()))
            .map(|(i, _)| i);
        match owner {
            Some(i) => owned[i].push(hole),
            None => warn!("hole {} lies in no outline", hole),
        }
    }
    outlines
        .into_iter()
        .zip(owned)
        .map(|(outline, holes)| Shape::with_holes(outline, holes))
        .collect()
}

pub fn combine(
    op: BooleanOp,
    first: &ClassifiedPolygon,
    second: &ClassifiedPolygon,
) -> Vec<Shape> {
    let selected = select_edges(op, first, second);
    let shapes = assemble(traverse(&selected, first, second));
    debug!("{:?} of {:?} and {:?} gives {} shapes", op, first.origin, second.origin, shapes.len());
    shapes
}
