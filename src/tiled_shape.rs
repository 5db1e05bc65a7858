use std::fmt::{self, Debug};

use itertools::Itertools;
use tracing::trace;

use crate::{
    error::GeomErr,
    line::IntLine,
    memo::Memo,
    point::IntPoint,
    tile::{Tile, UNIT_SIZE},
    tile_edges::TileEdgeMap,
    triangle::Triangle,
};

/// A square grid of tiles.
///
/// Tiles are stored row by row from the top row down. `position` is the
/// grid co-ordinate of the bottom left tile, so a tile's grid co-ordinates
/// count up and right from there.
#[derive(Clone)]
pub struct TiledShape {
    dim: usize,
    position: IntPoint,
    tiles: Vec<Tile>,
    triangles: Memo<Vec<Triangle>>,
}

impl PartialEq for TiledShape {
    fn eq(&self, other: &Self) -> bool {
        self.dim == other.dim && self.position == other.position && self.tiles == other.tiles
    }
}

impl Eq for TiledShape {}

impl Debug for TiledShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TiledShape[{}x{} @ {}]({})",
            self.dim,
            self.dim,
            self.position,
            self.tiles.iter().map(|t| t.num_edges()).join("")
        )
    }
}

impl TiledShape {
    pub fn new(dim: usize, tiles: Vec<Tile>) -> Result<Self, GeomErr> {
        let expected = dim.checked_mul(dim).ok_or(GeomErr::GridTooLarge { dim })?;
        if tiles.len() != expected {
            return Err(GeomErr::TileCountMismatch {
                expected,
                found: tiles.len(),
            });
        }
        Ok(Self::build(dim, tiles, IntPoint::new(0, 0)))
    }

    /// Tiles from their symbols, ignoring whitespace.
    pub fn from_symbols(dim: usize, symbols: &str) -> Result<Self, GeomErr> {
        let tiles = symbols
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(Tile::from_symbol)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(dim, tiles)
    }

    fn build(dim: usize, tiles: Vec<Tile>, position: IntPoint) -> Self {
        Self {
            dim,
            position,
            tiles,
            triangles: Memo::new(),
        }
    }

    pub fn with_position(self, position: IntPoint) -> Self {
        Self::build(self.dim, self.tiles, position)
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn position(&self) -> IntPoint {
        self.position
    }

    #[inline]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn translate(&self, x: isize, y: isize) -> TiledShape {
        Self::build(self.dim, self.tiles.clone(), self.position.offset(x, y))
    }

    /// Grid co-ordinates of the tile stored at `i`.
    #[inline]
    fn grid_coords(&self, i: usize) -> IntPoint {
        let dim = self.dim as isize;
        let i = i as isize;
        self.position.offset(i % dim, dim - 1 - i / dim)
    }

    /// The tile at grid co-ordinates `(x, y)`. Outside the grid every tile
    /// is empty.
    pub fn tile_at(&self, x: isize, y: isize) -> Tile {
        let dim = self.dim as isize;
        let (xp, yp) = (x - self.position.x, y - self.position.y);
        if xp < 0 || yp < 0 || xp >= dim || yp >= dim {
            return Tile::EMPTY;
        }
        self.tiles[((dim - 1 - yp) * dim + xp) as usize]
    }

    fn combine(&self, other: &TiledShape, f: impl Fn(&Tile, &Tile) -> Tile) -> TiledShape {
        let tiles = self
            .tiles
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let p = self.grid_coords(i);
                f(t, &other.tile_at(p.x, p.y))
            })
            .collect();
        Self::build(self.dim, tiles, self.position)
    }

    /// Tile by tile, matched on grid position. The result keeps this grid.
    pub fn subtract(&self, other: &TiledShape) -> TiledShape {
        self.combine(other, Tile::subtract)
    }

    pub fn intersect(&self, other: &TiledShape) -> TiledShape {
        self.combine(other, Tile::intersect)
    }

    pub fn union(&self, other: &TiledShape) -> TiledShape {
        self.combine(other, Tile::union)
    }

    #[inline]
    fn neighbour(&self, i: usize, dx: isize, dy: isize) -> Tile {
        let p = self.grid_coords(i);
        self.tile_at(p.x + dx, p.y + dy)
    }

    /// Every line of the shape, in no particular order: the outer boundary
    /// and the lines between facets. Sides shared with a neighbour are
    /// left out.
    pub fn lines(&self) -> Vec<IntLine> {
        let lines = (0..self.tiles.len())
            .flat_map(|i| {
                let mut map = TileEdgeMap::new(self.tiles[i]);
                map.subtract_left(self.neighbour(i, -1, 0));
                map.subtract_right(self.neighbour(i, 1, 0));
                map.subtract_above(self.neighbour(i, 0, 1));
                map.subtract_below(self.neighbour(i, 0, -1));
                let p = self.grid_coords(i);
                map.edges()
                    .into_iter()
                    .map(move |e| e.translate(p.x * UNIT_SIZE, p.y * UNIT_SIZE))
            })
            .collect_vec();
        trace!("{} lines from {} tiles", lines.len(), self.tiles.len());
        lines
    }

    /// Every tile's facets, placed in world co-ordinates.
    pub fn triangulation(&self) -> &[Triangle] {
        self.triangles.get_or_init(|| {
            self.tiles
                .iter()
                .enumerate()
                .flat_map(|(i, t)| {
                    let p = self.grid_coords(i).multiply(UNIT_SIZE, UNIT_SIZE);
                    t.facets().into_iter().map(move |f| f.translate_by(p))
                })
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rounded() -> TiledShape {
        TiledShape::from_symbols(3, "lxr xxx exi").unwrap()
    }

    #[test]
    fn construction() {
        assert_eq!(
            TiledShape::new(2, vec![Tile::SQUARE; 3]),
            Err(GeomErr::TileCountMismatch { expected: 4, found: 3 })
        );
        assert_eq!(
            TiledShape::new(usize::MAX, vec![Tile::SQUARE]),
            Err(GeomErr::GridTooLarge { dim: usize::MAX })
        );
        assert_eq!(
            TiledShape::from_symbols(1, "q"),
            Err(GeomErr::UnknownTileSymbol('q'))
        );
        let s = rounded();
        assert_eq!(s.dimension(), 3);
        assert_eq!(s.position(), IntPoint::new(0, 0));
        assert_eq!(s.tiles().len(), 9);
    }

    #[test]
    fn grid_lookup() {
        let s = rounded();
        assert_eq!(s.tile_at(0, 2), Tile::TOP_LEFT);
        assert_eq!(s.tile_at(2, 2), Tile::TOP_RIGHT);
        assert_eq!(s.tile_at(0, 0), Tile::BOT_LEFT);
        assert_eq!(s.tile_at(2, 0), Tile::BOT_RIGHT);
        assert_eq!(s.tile_at(1, 1), Tile::SQUARE);
        assert_eq!(s.tile_at(3, 1), Tile::EMPTY);
        assert_eq!(s.tile_at(-1, 1), Tile::EMPTY);

        let moved = s.translate(5, -2);
        assert_eq!(moved.position(), IntPoint::new(5, -2));
        assert_eq!(moved.tile_at(5, 0), Tile::TOP_LEFT);
        assert_eq!(moved.tile_at(0, 2), Tile::EMPTY);
    }

    #[test]
    fn rounded_square_outline() {
        let lines = rounded().lines();
        assert_eq!(lines.len(), 8);
        let diagonals = [
            IntLine::from_coords(0, 4, 2, 6),
            IntLine::from_coords(4, 6, 6, 4),
            IntLine::from_coords(0, 2, 2, 0),
            IntLine::from_coords(4, 0, 6, 2),
        ];
        for d in &diagonals {
            assert!(lines.iter().any(|l| l.equals_ignore_polarity(d)), "{}", d);
        }
        assert_eq!(lines.iter().filter(|l| l.is_horizontal() || l.is_vertical()).count(), 4);
    }

    #[test]
    fn lone_square_and_position() {
        let s = TiledShape::from_symbols(1, "x").unwrap();
        assert_eq!(s.lines().len(), 4);
        let moved = s.with_position(IntPoint::new(3, 1));
        assert!(moved
            .lines()
            .contains(&IntLine::from_coords(6, 2, 8, 2)));
    }

    #[test]
    fn triangulation_covers_the_tiles() {
        let s = rounded();
        let tris = s.triangulation();
        assert_eq!(tris.len(), 14);
        assert!(tris.iter().all(Triangle::is_ccw));
        let area: f64 = tris.iter().map(Triangle::area).sum();
        assert_eq!(area, 5.0 * 4.0 + 4.0 * 2.0);
        assert!(tris.contains(&Triangle::new(
            IntPoint::new(2, 4),
            IntPoint::new(2, 6),
            IntPoint::new(0, 4)
        )));
    }

    #[test]
    fn tile_algebra_by_position() {
        let block = TiledShape::from_symbols(2, "xx xx").unwrap();
        let corner = TiledShape::from_symbols(1, "x").unwrap().with_position(IntPoint::new(1, 1));
        assert_eq!(block.subtract(&corner).tiles(), &[Tile::SQUARE, Tile::EMPTY, Tile::SQUARE, Tile::SQUARE]);
        assert_eq!(block.intersect(&corner).tiles(), &[Tile::EMPTY, Tile::SQUARE, Tile::EMPTY, Tile::EMPTY]);
        let far = corner.translate(5, 5);
        assert_eq!(block.union(&far), block);
        assert_eq!(block.subtract(&far), block);
    }
}
