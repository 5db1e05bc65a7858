//! Integer 2D geometry: points, lines, polygons, shapes with holes, boolean
//! operations between polygons and a grid-of-tiles representation.

pub mod boolean;
pub mod debug;
pub mod edge;
pub mod error;
pub mod geom;
pub mod geometry;
pub mod line;
pub mod memo;
pub mod node;
pub mod point;
pub mod polygon;
pub mod rect;
pub mod shape;
pub mod shape_group;
pub mod slope;
pub mod tile;
pub mod tile_edges;
pub mod tiled_shape;
pub mod triangle;
pub mod triangulate;

pub use boolean::{BooleanOp, BooleanTransformation};
pub use error::GeomErr;
pub use line::{DblLine, IntLine};
pub use point::{DblPoint, IntPoint};
pub use polygon::{Polygon, WindingOrder};
pub use rect::AxisBox;
pub use shape::Shape;
pub use shape_group::{ShapeGroup, ShapeGroupBoolean};
pub use slope::{Intersection, Slope};
pub use tile::Tile;
pub use tiled_shape::TiledShape;
pub use triangle::Triangle;
