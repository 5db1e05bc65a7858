use std::fmt::{self, Debug};

use itertools::Itertools;

use crate::{
    boolean::BooleanTransformation,
    error::GeomErr,
    line::IntLine,
    memo::Memo,
    point::IntPoint,
    polygon::Polygon,
    rect::AxisBox,
    shape::{locate_in, Shape},
    triangle::Triangle,
};

/// A set of shapes which are expected not to overlap or touch.
#[derive(Clone, Default)]
pub struct ShapeGroup {
    shapes: Vec<Shape>,
    vertices: Memo<Vec<IntPoint>>,
    edges: Memo<Vec<IntLine>>,
    bounds: Memo<Option<AxisBox>>,
}

impl PartialEq for ShapeGroup {
    fn eq(&self, other: &Self) -> bool {
        self.shapes == other.shapes
    }
}

impl Eq for ShapeGroup {}

impl Debug for ShapeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ShapeGroup[{}]",
            self.shapes.iter().map(|s| format!("{:?}", s)).join(", ")
        )
    }
}

impl From<Vec<Shape>> for ShapeGroup {
    fn from(shapes: Vec<Shape>) -> Self {
        ShapeGroup::new(shapes)
    }
}

impl ShapeGroup {
    pub fn new(shapes: Vec<Shape>) -> Self {
        Self {
            shapes,
            vertices: Memo::new(),
            edges: Memo::new(),
            bounds: Memo::new(),
        }
    }

    pub fn from_shape(shape: Shape) -> Self {
        Self::new(vec![shape])
    }

    pub fn from_polygon(outline: Polygon) -> Self {
        Self::from_shape(Shape::from_outline(outline))
    }

    #[inline]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    #[inline]
    pub fn num_shapes(&self) -> usize {
        self.shapes.len()
    }

    #[inline]
    pub fn shape(&self, i: usize) -> Option<&Shape> {
        self.shapes.get(i)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn vertices(&self) -> &[IntPoint] {
        self.vertices.get_or_init(|| {
            self.shapes
                .iter()
                .flat_map(|s| s.vertices().iter().copied())
                .collect()
        })
    }

    pub fn edges(&self) -> &[IntLine] {
        self.edges.get_or_init(|| {
            self.shapes
                .iter()
                .flat_map(|s| s.edges().iter().cloned())
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

    /// Union of the members' boxes. An empty group has none.
    pub fn bounding_box(&self) -> Option<AxisBox> {
        *self.bounds.get_or_init(|| {
            self.shapes
                .iter()
                .map(Shape::bounding_box)
                .reduce(|a, b| a.union(&b))
        })
    }

    pub fn centre(&self) -> Option<IntPoint> {
        self.bounding_box().map(|b| b.centre())
    }

    pub fn contains(&self, p: IntPoint, edge_inclusive: bool) -> bool {
        self.shapes.iter().any(|s| s.contains(p, edge_inclusive))
    }

    pub fn locate(&self, index: usize) -> Result<(usize, usize), GeomErr> {
        locate_in(self.shapes.iter().map(Shape::num_vertices), index)
    }

    fn map_shapes(&self, f: impl Fn(&Shape) -> Shape) -> ShapeGroup {
        ShapeGroup::new(self.shapes.iter().map(f).collect())
    }

    fn edit_shape(
        &self,
        index: usize,
        f: impl FnOnce(&Shape, usize) -> Result<Shape, GeomErr>,
    ) -> Result<ShapeGroup, GeomErr> {
        let (shape, local) = self.locate(index)?;
        let mut shapes = self.shapes.clone();
        shapes[shape] = f(&self.shapes[shape], local)?;
        Ok(ShapeGroup::new(shapes))
    }

    pub fn translate(&self, x: isize, y: isize) -> ShapeGroup {
        self.map_shapes(|s| s.translate(x, y))
    }

    pub fn reflect_x(&self, x_mid: isize) -> ShapeGroup {
        self.map_shapes(|s| s.reflect_x(x_mid))
    }

    pub fn reflect_y(&self, y_mid: isize) -> ShapeGroup {
        self.map_shapes(|s| s.reflect_y(y_mid))
    }

    pub fn rotate90(&self, centre: IntPoint) -> ShapeGroup {
        self.map_shapes(|s| s.rotate90(centre))
    }

    pub fn set_vertex(&self, index: usize, p: IntPoint) -> Result<ShapeGroup, GeomErr> {
        self.edit_shape(index, |s, i| s.set_vertex(i, p))
    }

    pub fn clip_vertex(&self, index: usize) -> Result<ShapeGroup, GeomErr> {
        self.edit_shape(index, |s, i| s.clip_vertex(i))
    }

    pub fn add_vertex_after(&self, index: usize, p: IntPoint) -> Result<ShapeGroup, GeomErr> {
        self.edit_shape(index, |s, i| s.add_vertex_after(i, p))
    }

    pub fn triangulate(&self) -> Vec<Triangle> {
        self.shapes.iter().flat_map(Shape::triangulate).collect()
    }

    /// All four boolean combinations of the two groups' first outlines.
    /// `None` if either group is empty.
    pub fn boolean(&self, other: &ShapeGroup) -> Option<ShapeGroupBoolean> {
        let a = self.shapes.first()?.outline();
        let b = other.shapes.first()?.outline();
        Some(ShapeGroupBoolean::from(BooleanTransformation::new(a, b)))
    }
}

/// The results of [`ShapeGroup::boolean`].
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeGroupBoolean {
    pub subtraction1: ShapeGroup,
    pub subtraction2: ShapeGroup,
    pub intersection: ShapeGroup,
    pub union: ShapeGroup,
}

impl From<BooleanTransformation> for ShapeGroupBoolean {
    fn from(t: BooleanTransformation) -> Self {
        let BooleanTransformation {
            subtraction1,
            subtraction2,
            intersection,
            union,
        } = t;
        Self {
            subtraction1: subtraction1.into(),
            subtraction2: subtraction2.into(),
            intersection: intersection.into(),
            union: union.into(),
        }
    }
}
