use std::fmt::{self, Debug};

use itertools::Itertools;

use crate::{
    error::GeomErr,
    line::IntLine,
    memo::Memo,
    point::IntPoint,
    polygon::Polygon,
    rect::AxisBox,
    triangle::Triangle,
    triangulate,
};

/// Resolves a flattened vertex index into `(child, local index)`, given the
/// vertex count of each child in order.
pub(crate) fn locate_in(
    counts: impl IntoIterator<Item = usize>,
    index: usize,
) -> Result<(usize, usize), GeomErr> {
    let mut local = index;
    let mut len = 0;
    for (child, count) in counts.into_iter().enumerate() {
        if local < count {
            return Ok((child, local));
        }
        local -= count;
        len += count;
    }
    Err(GeomErr::IndexOutOfRange { index, len })
}

/// An outline polygon with zero or more holes cut out of it.
#[derive(Clone)]
pub struct Shape {
    polygons: Vec<Polygon>,
    vertices: Memo<Vec<IntPoint>>,
    edges: Memo<Vec<IntLine>>,
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.polygons == other.polygons
    }
}

impl Eq for Shape {}

impl Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shape(outline: {:?}", self.outline())?;
        if self.is_perforated() {
            write!(f, ", holes: [{}]", self.holes().iter().map(|h| format!("{:?}", h)).join(", "))?;
        }
        write!(f, ")")
    }
}

impl From<Polygon> for Shape {
    fn from(outline: Polygon) -> Self {
        Shape::from_outline(outline)
    }
}

impl Shape {
    /// The first polygon is the outline, the rest are holes.
    pub fn new(polygons: Vec<Polygon>) -> Result<Self, GeomErr> {
        if polygons.is_empty() {
            return Err(GeomErr::EmptyShape);
        }
        Ok(Self::build(polygons))
    }

    pub fn from_outline(outline: Polygon) -> Self {
        Self::build(vec![outline])
    }

    pub fn with_holes(outline: Polygon, holes: Vec<Polygon>) -> Self {
        Self::build(std::iter::once(outline).chain(holes).collect())
    }

    fn build(polygons: Vec<Polygon>) -> Self {
        Self {
            polygons,
            vertices: Memo::new(),
            edges: Memo::new(),
        }
    }

    #[inline]
    pub fn outline(&self) -> &Polygon {
        &self.polygons[0]
    }

    #[inline]
    pub fn holes(&self) -> &[Polygon] {
        &self.polygons[1..]
    }

    #[inline]
    pub fn num_holes(&self) -> usize {
        self.polygons.len() - 1
    }

    #[inline]
    pub fn hole(&self, i: usize) -> Option<&Polygon> {
        self.holes().get(i)
    }

    /// Outline first, then the holes.
    #[inline]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    #[inline]
    pub fn is_perforated(&self) -> bool {
        self.polygons.len() > 1
    }

    /// Vertices of every polygon, outline first.
    pub fn vertices(&self) -> &[IntPoint] {
        self.vertices.get_or_init(|| {
            self.polygons
                .iter()
                .flat_map(|p| p.vertices().iter().copied())
                .collect()
        })
    }

    pub fn edges(&self) -> &[IntLine] {
        self.edges.get_or_init(|| {
            self.polygons
                .iter()
                .flat_map(|p| p.edges().iter().cloned())
                .collect()
        })
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices().len()
    }

    #[inline]
    pub fn vertex(&self, i: usize) -> Option<IntPoint> {
        self.vertices().get(i).copied()
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges().len()
    }

    #[inline]
    pub fn edge(&self, i: usize) -> Option<&IntLine> {
        self.edges().get(i)
    }

    #[inline]
    pub fn bounding_box(&self) -> AxisBox {
        self.outline().bounding_box()
    }

    #[inline]
    pub fn centre(&self) -> IntPoint {
        self.bounding_box().centre()
    }

    /// A point on a hole's edge is outside the shape exactly when a point
    /// on the outline's edge is, so edges are treated alike everywhere.
    pub fn contains(&self, p: IntPoint, edge_inclusive: bool) -> bool {
        self.outline().contains_point(p, edge_inclusive)
            && !self
                .holes()
                .iter()
                .any(|h| h.contains_point(p, !edge_inclusive))
    }

    /// Outline area less the area of each hole, whatever their windings.
    pub fn area(&self) -> f64 {
        self.outline().area().abs()
            - self.holes().iter().map(|h| h.area().abs()).sum::<f64>()
    }

    /// Which polygon a flattened vertex index falls in, and where.
    pub fn locate(&self, index: usize) -> Result<(usize, usize), GeomErr> {
        locate_in(self.polygons.iter().map(Polygon::num_vertices), index)
    }

    fn map_polygons(&self, f: impl Fn(&Polygon) -> Polygon) -> Shape {
        Shape::build(self.polygons.iter().map(f).collect())
    }

    fn edit_polygon(
        &self,
        index: usize,
        f: impl FnOnce(&Polygon, usize) -> Result<Polygon, GeomErr>,
    ) -> Result<Shape, GeomErr> {
        let (poly, local) = self.locate(index)?;
        let mut polygons = self.polygons.clone();
        polygons[poly] = f(&self.polygons[poly], local)?;
        Ok(Shape::build(polygons))
    }

    pub fn translate(&self, x: isize, y: isize) -> Shape {
        self.map_polygons(|p| p.translate(x, y))
    }

    pub fn reflect_x(&self, x_mid: isize) -> Shape {
        self.map_polygons(|p| p.reflect_x(x_mid))
    }

    pub fn reflect_y(&self, y_mid: isize) -> Shape {
        self.map_polygons(|p| p.reflect_y(y_mid))
    }

    pub fn rotate90(&self, centre: IntPoint) -> Shape {
        self.map_polygons(|p| p.rotate90(centre))
    }

    pub fn set_vertex(&self, index: usize, p: IntPoint) -> Result<Shape, GeomErr> {
        self.edit_polygon(index, |poly, i| poly.set_vertex(i, p))
    }

    pub fn clip_vertex(&self, index: usize) -> Result<Shape, GeomErr> {
        self.edit_polygon(index, |poly, i| poly.clip_vertex(i))
    }

    pub fn add_vertex_after(&self, index: usize, p: IntPoint) -> Result<Shape, GeomErr> {
        self.edit_polygon(index, |poly, i| poly.add_vertex_after(i, p))
    }

    /// Triangles covering the shape, leaving the holes uncovered.
    pub fn triangulate(&self) -> Vec<Triangle> {
        triangulate::with_holes(self.outline(), self.holes())
    }
}
