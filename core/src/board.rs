use alloc::string::String;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::Index;

use ndarray::Array2;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Grid every level is laid out on unless a caller asks for another one.
pub const DEFAULT_GRID: Coord2 = (8, 6);

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ClickOutcome {
    NoChange,
    Changed,
}

impl ClickOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }

    const fn from_changed(changed: bool) -> Self {
        if changed {
            Self::Changed
        } else {
            Self::NoChange
        }
    }
}

/// A puzzle position: the cell grid plus the clicks that produced it.
///
/// Boards are plain values. Search branches clone them and never share one mutably.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    history: MoveSequence,
    has_bombs: bool,
    only_reachable_from: Array2<Option<Pos>>,
}

impl Board {
    pub fn from_level(level: &LevelData) -> Result<Self> {
        Self::from_level_in(level, DEFAULT_GRID)
    }

    /// Lays `level` out on a `grid`-sized board, filling the unused rows and columns with walls.
    pub fn from_level_in(level: &LevelData, grid: Coord2) -> Result<Self> {
        level.validate()?;
        if level.rows > grid.0 || level.cols > grid.1 {
            return Err(PuzzleError::LevelTooLarge {
                rows: level.rows,
                cols: level.cols,
                max_rows: grid.0,
                max_cols: grid.1,
            });
        }

        let mut cells = Array2::from_elem(grid.to_nd_index(), Cell::WALL);
        let cols = usize::from(level.cols);
        for (index, cell) in level.parsed_cells().enumerate() {
            cells[[index / cols, index % cols]] = cell?;
        }

        Self::from_cells(cells)
    }

    pub fn from_cells(cells: Array2<Cell>) -> Result<Self> {
        let (rows, cols) = cells.dim();
        if cols > usize::from(MAX_COLS) {
            return Err(PuzzleError::TooManyColumns {
                cols,
                max: MAX_COLS,
            });
        }
        if rows > usize::from(Coord::MAX) {
            return Err(PuzzleError::InvalidCoords {
                row: Coord::MAX,
                col: 0,
            });
        }

        let mut board = Self {
            only_reachable_from: Array2::from_elem(cells.dim(), None),
            has_bombs: cells.iter().any(|cell| cell.mechanism == Mechanism::Bomb),
            history: MoveSequence::new(),
            cells,
        };

        if let Some(pos) = board
            .positions()
            .find(|&pos| board[pos].is_clickable() && board[pos].color.is_none())
        {
            return Err(PuzzleError::UncoloredTrigger { pos });
        }

        board.only_reachable_from = TriggerMap::build(&board).only_reachable_from();
        Ok(board)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn cell(&self, pos: Pos) -> Cell {
        self.cells[pos.to_nd_index()]
    }

    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    pub fn history(&self) -> &MoveSequence {
        &self.history
    }

    pub fn moves_made(&self) -> usize {
        self.history.len()
    }

    pub fn has_bombs(&self) -> bool {
        self.has_bombs
    }

    /// The only trigger able to fix the cell at `pos`, when there is exactly one.
    pub fn only_reachable_from(&self, pos: Pos) -> Option<Pos> {
        self.only_reachable_from[pos.to_nd_index()]
    }

    /// Every grid position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<> {
        let (rows, cols) = self.size();
        (0..rows).flat_map(move |row| (0..cols).map(move |col| Pos::new_unchecked(row, col)))
    }

    /// Positions that can currently be clicked, row-major.
    pub fn triggers(&self) -> impl Iterator<Item = Pos> + '_ {
        self.positions().filter(|&pos| self[pos].is_clickable())
    }

    pub fn is_solved(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_correct())
    }

    /// Content hash of the cell grid. Equal grids hash equal, the move history does not take part.
    pub fn structural_hash(&self) -> u64 {
        let mut hasher = FxHasher::default();
        for cell in self.cells.iter() {
            cell.hash(&mut hasher);
        }
        hasher.finish()
    }

    /// Records the click and applies the mechanism at `pos`.
    ///
    /// A click on something that is not clickable is recorded but changes nothing.
    pub fn click(&mut self, pos: Pos) -> Result<ClickOutcome> {
        use Mechanism::*;

        let size = self.size();
        let pos = Pos::new(pos.row, pos.col, size)?;
        self.history.push(pos)?;

        let cell = self.cell(pos);
        let Some(paint) = cell.color else {
            return Ok(ClickOutcome::NoChange);
        };

        let changed = match cell.mechanism {
            Filler(dir) => self.fill(pos, dir, paint),
            Rotating(dir) => {
                self.fill(pos, dir, paint);
                self.cells[pos.to_nd_index()].mechanism = Rotating(dir.rotated());
                true
            }
            Flood => self.flood_toggle(pos, paint),
            Bomb => self.bomb(pos, paint),
            Neutral | Paint(_) | Wall => false,
        };

        Ok(ClickOutcome::from_changed(changed))
    }

    /// Applies every move of `moves` in order.
    pub fn replay(&mut self, moves: &[Pos]) -> Result<()> {
        for &pos in moves {
            self.click(pos)?;
        }
        Ok(())
    }

    /// Fills a run of neutral cells, or clears a run of this paint, starting next to `origin`.
    fn fill(&mut self, origin: Pos, dir: Direction, paint: Paint) -> bool {
        let size = self.size();
        let Some(mut pos) = origin.step(dir, size) else {
            return false;
        };

        let (from, to) = match self.cell(pos).mechanism {
            Mechanism::Paint(current) if current == paint => {
                (Mechanism::Paint(paint), Mechanism::Neutral)
            }
            Mechanism::Neutral => (Mechanism::Neutral, Mechanism::Paint(paint)),
            _ => return false,
        };

        loop {
            let cell = &mut self.cells[pos.to_nd_index()];
            if cell.mechanism != from {
                break;
            }
            cell.mechanism = to;

            match pos.step(dir, size) {
                Some(next) => pos = next,
                None => break,
            }
        }
        true
    }

    /// Floods outwards from the four neighbors of `origin`, undoing a previous flood if nothing was
    /// filled.
    fn flood_toggle(&mut self, origin: Pos, paint: Paint) -> bool {
        self.flood(origin, Mechanism::Neutral, Mechanism::Paint(paint))
            || self.flood(origin, Mechanism::Paint(paint), Mechanism::Neutral)
    }

    fn flood(&mut self, origin: Pos, from: Mechanism, to: Mechanism) -> bool {
        let mut to_visit: SmallVec<[Pos; 32]> = self
            .cells
            .iter_neighbors(origin, Neighborhood::Orthogonal)
            .collect();
        let mut changed = false;

        while let Some(pos) = to_visit.pop() {
            let cell = &mut self.cells[pos.to_nd_index()];
            if cell.mechanism != from {
                continue;
            }
            cell.mechanism = to;
            changed = true;
            to_visit.extend(self.cells.iter_neighbors(pos, Neighborhood::Orthogonal));
        }

        changed
    }

    /// Paints the 3×3 block around `center`, walls excepted.
    fn bomb(&mut self, center: Pos, paint: Paint) -> bool {
        let mut changed = false;
        for pos in self.cells.iter_neighbors(center, Neighborhood::Square) {
            let cell = &mut self.cells[pos.to_nd_index()];
            if cell.mechanism == Mechanism::Wall || cell.mechanism == Mechanism::Paint(paint) {
                continue;
            }
            cell.mechanism = Mechanism::Paint(paint);
            changed = true;
        }
        changed
    }

    /// Color rows, a blank line, then mechanism rows.
    pub fn describe(&self) -> String {
        let (rows, cols) = self.cells.dim();
        let mut description = String::with_capacity(2 * rows * (cols + 1) + 1);
        for row in self.cells.rows() {
            description.extend(row.iter().map(|cell| cell.color_code()));
            description.push('\n');
        }
        description.push('\n');
        for row in self.cells.rows() {
            description.extend(row.iter().map(|cell| cell.mechanism.code()));
            description.push('\n');
        }
        description
    }
}

impl Index<Pos> for Board {
    type Output = Cell;

    fn index(&self, pos: Pos) -> &Self::Output {
        &self.cells[pos.to_nd_index()]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
