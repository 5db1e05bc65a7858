use std::{error::Error, fmt::Display};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeomErr {
    /// A polygon needs at least 3 vertices.
    NotEnoughVertices { found: usize },
    MismatchedCoords { xs: usize, ys: usize },
    /// The line has zero length, so it has no direction.
    DegenerateLine,
    IndexOutOfRange { index: usize, len: usize },
    EmptyShape,
    UnknownTileSymbol(char),
    TileCountMismatch { expected: usize, found: usize },
    /// The tile count of a `dim` x `dim` grid does not fit in a `usize`.
    GridTooLarge { dim: usize },
}

impl Display for GeomErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeomErr::NotEnoughVertices { found } => write!(
                f,
                "must have at least 3 vertices, only supplied {}",
                found
            ),
            GeomErr::MismatchedCoords { xs, ys } => write!(
                f,
                "x and y co-ordinate lists must be the same length \
                (xs: {}, ys: {})",
                xs, ys
            ),
            GeomErr::IndexOutOfRange { index, len } => {
                write!(f, "index {} out of range for length {}", index, len)
            }
            GeomErr::UnknownTileSymbol(c) => {
                write!(f, "tile symbol '{}' not recognised", c)
            }
            GeomErr::TileCountMismatch { expected, found } => write!(
                f,
                "expected {} tiles, found {}",
                expected, found
            ),
            GeomErr::GridTooLarge { dim } => {
                write!(f, "a {}x{} tile grid is too large", dim, dim)
            }
            other => write!(f, "{:?}", other),
        }
    }
}

impl Error for GeomErr {}
