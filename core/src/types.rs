use core::fmt;
use core::str::FromStr;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Single coordinate axis used for grid rows, columns and positions.
pub type Coord = u8;

/// Count type used for cell totals.
pub type CellCount = u16;

/// Grid size as `(rows, cols)`.
pub type Coord2 = (Coord, Coord);

/// Columns are named by a single letter, so no grid is wider than this.
pub const MAX_COLS: Coord = 26;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// A cell position on the grid, doubling as the record of a single click.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub row: Coord,
    pub col: Coord,
}

impl Pos {
    /// Position checked against a grid of `size`.
    pub fn new(row: Coord, col: Coord, size: Coord2) -> Result<Self> {
        if row < size.0 && col < size.1 {
            Ok(Self { row, col })
        } else {
            Err(PuzzleError::InvalidCoords { row, col })
        }
    }

    pub(crate) const fn new_unchecked(row: Coord, col: Coord) -> Self {
        Self { row, col }
    }

    /// Neighbor one step towards `dir`, if it stays inside `size`.
    pub fn step(self, dir: Direction, size: Coord2) -> Option<Self> {
        apply_delta(self, dir.delta(), size)
    }

    /// Cardinal direction from `self` towards `target`, when both share a row or a column.
    pub fn direction_to(self, target: Pos) -> Option<Direction> {
        use core::cmp::Ordering::*;
        match (target.row.cmp(&self.row), target.col.cmp(&self.col)) {
            (Less, Equal) => Some(Direction::Up),
            (Greater, Equal) => Some(Direction::Down),
            (Equal, Less) => Some(Direction::Left),
            (Equal, Greater) => Some(Direction::Right),
            _ => None,
        }
    }
}

impl ToNdIndex for Pos {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.row.into(), self.col.into()]
    }
}

/// Renders as a column letter followed by the 1-based row, e.g. `B3`.
impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row = u16::from(self.row) + 1;
        match b'A'.checked_add(self.col).filter(u8::is_ascii_uppercase) {
            Some(letter) => write!(f, "{}{row}", char::from(letter)),
            None => write!(f, "({},{row})", self.col),
        }
    }
}

impl FromStr for Pos {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || PuzzleError::InvalidMove(s.into());
        let s = s.trim();
        let mut chars = s.chars();
        let letter = chars.next().ok_or_else(invalid)?;
        if !letter.is_ascii_uppercase() {
            return Err(invalid());
        }
        let row: u16 = chars.as_str().parse().map_err(|_| invalid())?;
        if row == 0 || row > u16::from(Coord::MAX) {
            return Err(invalid());
        }
        Ok(Self {
            row: (row - 1) as Coord,
            col: letter as Coord - b'A',
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    pub const fn delta(self) -> (isize, isize) {
        use Direction::*;
        match self {
            Up => (-1, 0),
            Right => (0, 1),
            Down => (1, 0),
            Left => (0, -1),
        }
    }

    /// Position in the rotation cycle up → right → down → left.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// The facing a rotating filler takes after a click.
    pub const fn rotated(self) -> Self {
        use Direction::*;
        match self {
            Up => Right,
            Right => Down,
            Down => Left,
            Left => Up,
        }
    }

    /// Clicks of a rotating filler facing `self` before it fills towards `target`, the filling
    /// click included.
    pub const fn clicks_to_face(self, target: Direction) -> u32 {
        ((target.index() + 4 - self.index()) % 4) as u32 + 1
    }
}

/// Which cells around a center a [`NeighborIter`] visits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Neighborhood {
    /// The four edge-adjacent cells.
    Orthogonal,
    /// The 3×3 block, center included.
    Square,
}

impl Neighborhood {
    const fn displacements(self) -> &'static [(isize, isize)] {
        match self {
            Self::Orthogonal => &ORTHOGONAL,
            Self::Square => &SQUARE,
        }
    }
}

const ORTHOGONAL: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

const SQUARE: [(isize, isize); 9] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 0),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `pos`, returning a value only when it remains in bounds.
fn apply_delta(pos: Pos, delta: (isize, isize), bounds: Coord2) -> Option<Pos> {
    let (dr, dc) = delta;
    let (max_row, max_col) = bounds;

    let row = pos.row.checked_add_signed(dr.try_into().ok()?)?;
    if row >= max_row {
        return None;
    }

    let col = pos.col.checked_add_signed(dc.try_into().ok()?)?;
    if col >= max_col {
        return None;
    }

    Some(Pos { row, col })
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, center: Pos, kind: Neighborhood) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, center: Pos, kind: Neighborhood) -> NeighborIter {
        let dim = self.dim();
        let size = (dim.0.try_into().unwrap(), dim.1.try_into().unwrap());
        NeighborIter::new(center, size, kind)
    }
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Pos,
    bounds: Coord2,
    displacements: &'static [(isize, isize)],
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Pos, bounds: Coord2, kind: Neighborhood) -> Self {
        Self {
            center,
            bounds,
            displacements: kind.displacements(),
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Pos;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *self.displacements.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
    }
}
