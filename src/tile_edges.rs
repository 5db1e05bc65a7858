use crate::{
    line::IntLine,
    tile::{Tile, BOT_LEFT, BOT_RIGHT, CENTRE, TOP_LEFT, TOP_RIGHT},
};

/// The lines drawn for one tile: its present sides plus the internal lines
/// separating its facets.
///
/// Internal lines are fixed by the tile the map was made from. Subtracting
/// a neighbour only ever removes sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileEdgeMap {
    tile: Tile,
    radial_top_left: bool,
    radial_bot_left: bool,
    radial_top_right: bool,
    radial_bot_right: bool,
    diag_tl_br: bool,
    diag_bl_tr: bool,
}

impl TileEdgeMap {
    pub fn new(tile: Tile) -> Self {
        let mut map = Self {
            tile,
            radial_top_left: false,
            radial_bot_left: false,
            radial_top_right: false,
            radial_bot_right: false,
            diag_tl_br: false,
            diag_bl_tr: false,
        };
        match tile.num_edges() {
            3 => {
                map.radial_top_left = true;
                map.radial_bot_left = true;
                map.radial_top_right = true;
                map.radial_bot_right = true;
            }
            2 => {
                if (tile.top && tile.right) || (tile.bot && tile.left) {
                    map.diag_tl_br = true;
                } else {
                    map.diag_bl_tr = true;
                }
            }
            1 => {
                map.radial_top_left = tile.top || tile.left;
                map.radial_top_right = tile.top || tile.right;
                map.radial_bot_left = tile.bot || tile.left;
                map.radial_bot_right = tile.bot || tile.right;
            }
            _ => {}
        }
        map
    }

    #[inline]
    pub fn tile(&self) -> Tile {
        self.tile
    }

    /// Sides first (top, bottom, left, right), then internal lines.
    pub fn edges(&self) -> Vec<IntLine> {
        let t = self.tile;
        [
            (t.top, TOP_RIGHT, TOP_LEFT),
            (t.bot, BOT_LEFT, BOT_RIGHT),
            (t.left, TOP_LEFT, BOT_LEFT),
            (t.right, BOT_RIGHT, TOP_RIGHT),
            (self.radial_top_left, TOP_LEFT, CENTRE),
            (self.radial_top_right, TOP_RIGHT, CENTRE),
            (self.radial_bot_left, BOT_LEFT, CENTRE),
            (self.radial_bot_right, BOT_RIGHT, CENTRE),
            (self.diag_bl_tr, BOT_LEFT, TOP_RIGHT),
            (self.diag_tl_br, TOP_LEFT, BOT_RIGHT),
        ]
        .into_iter()
        .filter(|&(present, _, _)| present)
        .map(|(_, a, b)| IntLine::new(a, b))
        .collect()
    }

    /// Drops the top side if the tile above has a bottom side.
    pub fn subtract_above(&mut self, above: Tile) {
        self.tile.top &= !above.bot;
    }

    pub fn subtract_below(&mut self, below: Tile) {
        self.tile.bot &= !below.top;
    }

    pub fn subtract_left(&mut self, left: Tile) {
        self.tile.left &= !left.right;
    }

    pub fn subtract_right(&mut self, right: Tile) {
        self.tile.right &= !right.left;
    }
}
