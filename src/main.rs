use poly_geom::{
    dbg_polygon,
    debug::{COLOR_BLUE, COLOR_GREEN},
    emit_info, info_label, BooleanTransformation, GeomErr, IntLine, IntPoint, Polygon,
    Shape, ShapeGroup, TiledShape,
};
use tracing::info;

fn square(x: isize, y: isize, size: isize) -> Result<Polygon, GeomErr> {
    Polygon::new(
        [(x, y), (x + size, y), (x + size, y + size), (x, y + size)]
            .into_iter()
            .map(IntPoint::from)
            .collect(),
    )
}

pub fn main() -> Result<(), GeomErr> {
    tracing_subscriber::fmt()
        .pretty()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let notched = Polygon::from_coords(
        &[0, 12, 12, 6, 6, 0],
        &[0, 0, 10, 10, 4, 4],
    )?;
    info!("{} {:?}", info_label!("polygon"), dbg_polygon!(&notched));
    info!(
        "{} convex: {}, area: {}, angles: {:?}",
        info_label!("queries"),
        notched.is_convex(),
        notched.area(),
        notched.sum_of_angles()
    );
    let probe = IntLine::from_coords(-2, 7, 14, 7);
    info!(
        "{} {} splits into {:?}",
        info_label!("split"),
        probe,
        notched.split_line_at_intersections(&probe)
    );
    for t in notched.triangulation() {
        emit_info!(sty: COLOR_GREEN, fmt: "triangle {}" | t);
    }

    let framed = Shape::with_holes(square(0, 0, 10)?, vec![square(3, 3, 4)?]);
    info!(
        "{} area {} in {} triangles, contains (5, 5): {}",
        info_label!("shape"),
        framed.area(),
        framed.triangulate().len(),
        framed.contains(IntPoint::new(5, 5), true)
    );

    let t = BooleanTransformation::new(&square(0, 0, 10)?, &square(5, 5, 10)?);
    for (label, shapes) in [
        ("a-b", &t.subtraction1),
        ("b-a", &t.subtraction2),
        ("a&b", &t.intersection),
        ("a|b", &t.union),
    ] {
        emit_info!(sty: COLOR_BLUE, fmt: "{}: {:?}" | label, shapes);
    }

    let group = ShapeGroup::new(vec![framed, Shape::from_outline(square(20, 0, 5)?)]);
    info!(
        "{} {} shapes, {} vertices, bounds {:?}",
        info_label!("group"),
        group.num_shapes(),
        group.num_vertices(),
        group.bounding_box()
    );

    let tiles = TiledShape::from_symbols(3, "lxr xxx exi")?;
    info!(
        "{} {} lines, {} facets",
        info_label!("tiles"),
        tiles.lines().len(),
        tiles.triangulation().len()
    );
    Ok(())
}
