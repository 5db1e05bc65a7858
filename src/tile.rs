use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{error::GeomErr, point::IntPoint, triangle::Triangle};

/// Side length of a tile. A tile is 2 units across so that its centre has
/// integer co-ordinates.
pub const UNIT_SIZE: isize = 2;

pub const CENTRE: IntPoint = IntPoint::new(1, 1);
pub const TOP_LEFT: IntPoint = IntPoint::new(0, 2);
pub const BOT_LEFT: IntPoint = IntPoint::new(0, 0);
pub const BOT_RIGHT: IntPoint = IntPoint::new(2, 0);
pub const TOP_RIGHT: IntPoint = IntPoint::new(2, 2);

const FACET_TOP: Triangle = Triangle::new(CENTRE, TOP_RIGHT, TOP_LEFT);
const FACET_BOT: Triangle = Triangle::new(CENTRE, BOT_LEFT, BOT_RIGHT);
const FACET_LEFT: Triangle = Triangle::new(CENTRE, TOP_LEFT, BOT_LEFT);
const FACET_RIGHT: Triangle = Triangle::new(CENTRE, BOT_RIGHT, TOP_RIGHT);
const FACET_TOP_LEFT: Triangle = Triangle::new(TOP_LEFT, BOT_LEFT, TOP_RIGHT);
const FACET_BOT_LEFT: Triangle = Triangle::new(BOT_LEFT, BOT_RIGHT, TOP_LEFT);
const FACET_TOP_RIGHT: Triangle = Triangle::new(TOP_RIGHT, TOP_LEFT, BOT_RIGHT);
const FACET_BOT_RIGHT: Triangle = Triangle::new(BOT_RIGHT, TOP_RIGHT, BOT_LEFT);

lazy_static! {
    static ref SYMBOLS: HashMap<char, Tile> = [
        ('.', Tile::EMPTY),
        ('x', Tile::SQUARE),
        ('l', Tile::TOP_LEFT),
        ('r', Tile::TOP_RIGHT),
        ('e', Tile::BOT_LEFT),
        ('i', Tile::BOT_RIGHT),
    ]
    .into_iter()
    .collect();
}

/// A square cell of a tiled shape, described by which of its four sides
/// are present.
///
/// The corner tiles are named for the corner of a shape they round off, so
/// `TOP_LEFT` keeps its bottom and right sides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Tile {
    pub top: bool,
    pub bot: bool,
    pub left: bool,
    pub right: bool,
}

impl Tile {
    pub const EMPTY: Tile = Tile::new(false, false, false, false);
    pub const SQUARE: Tile = Tile::new(true, true, true, true);
    pub const TOP_LEFT: Tile = Tile::new(false, true, false, true);
    pub const TOP_RIGHT: Tile = Tile::new(false, true, true, false);
    pub const BOT_LEFT: Tile = Tile::new(true, false, false, true);
    pub const BOT_RIGHT: Tile = Tile::new(true, false, true, false);

    pub const fn new(top: bool, bot: bool, left: bool, right: bool) -> Self {
        Self {
            top,
            bot,
            left,
            right,
        }
    }

    /// One of `. x l r e i`.
    pub fn from_symbol(c: char) -> Result<Tile, GeomErr> {
        SYMBOLS.get(&c).copied().ok_or(GeomErr::UnknownTileSymbol(c))
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        [self.top, self.bot, self.left, self.right]
            .into_iter()
            .filter(|&b| b)
            .count()
    }

    /// Two opposite sides and nothing else.
    #[inline]
    pub fn is_through(&self) -> bool {
        self.num_edges() == 2 && self.top == self.bot
    }

    pub fn num_facets(&self) -> usize {
        match self.num_edges() {
            n if n % 2 == 1 => n,
            2 if self.is_through() => 0,
            n => n / 2,
        }
    }

    /// Triangles covering the tile, in tile-local co-ordinates.
    pub fn facets(&self) -> Vec<Triangle> {
        let n = self.num_edges();
        if n == 4 {
            return vec![FACET_TOP_LEFT, FACET_BOT_RIGHT];
        }
        let candidates = if n % 2 == 1 {
            [
                (self.top, FACET_TOP),
                (self.bot, FACET_BOT),
                (self.left, FACET_LEFT),
                (self.right, FACET_RIGHT),
            ]
        } else {
            [
                (self.top && self.left, FACET_TOP_LEFT),
                (self.top && self.right, FACET_TOP_RIGHT),
                (self.bot && self.left, FACET_BOT_LEFT),
                (self.bot && self.right, FACET_BOT_RIGHT),
            ]
        };
        candidates
            .into_iter()
            .filter_map(|(present, facet)| present.then_some(facet))
            .collect()
    }

    pub fn subtract(&self, other: &Tile) -> Tile {
        Tile::new(
            self.top && !other.top,
            self.bot && !other.bot,
            self.left && !other.left,
            self.right && !other.right,
        )
    }

    pub fn intersect(&self, other: &Tile) -> Tile {
        Tile::new(
            self.top && other.top,
            self.bot && other.bot,
            self.left && other.left,
            self.right && other.right,
        )
    }

    pub fn union(&self, other: &Tile) -> Tile {
        Tile::new(
            self.top || other.top,
            self.bot || other.bot,
            self.left || other.left,
            self.right || other.right,
        )
    }
}
