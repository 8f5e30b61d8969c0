use alloc::string::String;

use serde::{Deserialize, Serialize};

use crate::*;

/// Level sizes found in the level files, keyed by cell count.
const KNOWN_SIZES: [(usize, Coord2); 2] = [(30, (6, 5)), (48, (8, 6))];

/// A puzzle descriptor: one color code and one mechanism code per cell, row-major.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelData {
    pub number: u32,
    pub rows: Coord,
    pub cols: Coord,
    pub color: String,
    pub mechanism: String,
    #[serde(default)]
    pub solution: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

impl LevelData {
    /// Descriptor with an explicit size. Whitespace inside the code strings is ignored.
    pub fn new(number: u32, (rows, cols): Coord2, color: &str, mechanism: &str) -> Result<Self> {
        let level = Self {
            number,
            rows,
            cols,
            color: strip_whitespace(color),
            mechanism: strip_whitespace(mechanism),
            solution: None,
            author: None,
        };
        level.validate()?;
        Ok(level)
    }

    /// Descriptor whose size follows from its cell count.
    pub fn with_inferred_size(number: u32, color: &str, mechanism: &str) -> Result<Self> {
        let color = strip_whitespace(color);
        let size = Self::infer_size(color.chars().count())?;
        Self::new(number, size, &color, mechanism)
    }

    pub fn infer_size(cells: usize) -> Result<Coord2> {
        KNOWN_SIZES
            .iter()
            .find(|(count, _)| *count == cells)
            .map(|&(_, size)| size)
            .ok_or(PuzzleError::UnknownSize(cells))
    }

    pub fn with_solution(mut self, solution: Option<&str>) -> Self {
        self.solution = solution.map(strip_whitespace);
        self
    }

    pub fn with_author(mut self, author: Option<&str>) -> Self {
        self.author = author.map(String::from);
        self
    }

    pub fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    /// Checks string lengths and every code, without building a board.
    pub fn validate(&self) -> Result<()> {
        let expected = usize::from(self.total_cells());
        let color = self.color.chars().count();
        let mechanism = self.mechanism.chars().count();
        if color != expected || mechanism != expected {
            return Err(PuzzleError::LengthMismatch {
                expected,
                color,
                mechanism,
            });
        }

        for (index, (color, mechanism)) in self.cells().enumerate() {
            let color = parse_color(color, index)?;
            let mechanism = parse_mechanism(mechanism, index)?;
            if color.is_none() && mechanism.is_clickable() {
                let cols = usize::from(self.cols);
                let pos = Pos::new_unchecked((index / cols) as Coord, (index % cols) as Coord);
                return Err(PuzzleError::UncoloredTrigger { pos });
            }
        }
        Ok(())
    }

    /// Parsed cells in row-major order.
    pub(crate) fn parsed_cells(&self) -> impl Iterator<Item = Result<Cell>> + '_ {
        self.cells().enumerate().map(|(index, (color, mechanism))| {
            let color = parse_color(color, index)?;
            Ok(Cell::new(color, parse_mechanism(mechanism, index)?))
        })
    }

    fn cells(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.color.chars().zip(self.mechanism.chars())
    }
}

fn parse_color(code: char, index: usize) -> Result<Option<Paint>> {
    match code {
        '0' => Ok(None),
        _ => Paint::from_code(code)
            .map(Some)
            .ok_or(PuzzleError::UnknownColor { code, index }),
    }
}

fn parse_mechanism(code: char, index: usize) -> Result<Mechanism> {
    Mechanism::from_code(code)
        .ok_or(PuzzleError::UnknownMechanism { code, index })
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_both_file_sizes() {
        assert_eq!(LevelData::infer_size(30), Ok((6, 5)));
        assert_eq!(LevelData::infer_size(48), Ok((8, 6)));
        assert_eq!(
            LevelData::infer_size(12),
            Err(PuzzleError::UnknownSize(12))
        );
    }

    #[test]
    fn whitespace_is_ignored() {
        let level = LevelData::new(1, (2, 2), "rr\n  00", " R0\n0X ").unwrap();
        assert_eq!(level.color, "rr00");
        assert_eq!(level.mechanism, "R00X");
    }

    #[test]
    fn rejects_length_mismatch() {
        assert_eq!(
            LevelData::new(1, (1, 3), "rr", "R00"),
            Err(PuzzleError::LengthMismatch {
                expected: 3,
                color: 2,
                mechanism: 3,
            })
        );
    }

    #[test]
    fn rejects_unknown_codes() {
        assert_eq!(
            LevelData::new(1, (1, 2), "rz", "R0"),
            Err(PuzzleError::UnknownColor {
                code: 'z',
                index: 1,
            })
        );
        assert_eq!(
            LevelData::new(1, (1, 2), "rr", "Q0"),
            Err(PuzzleError::UnknownMechanism {
                code: 'Q',
                index: 0,
            })
        );
    }

    #[test]
    fn rejects_uncolored_trigger() {
        assert_eq!(
            LevelData::new(1, (1, 2), "r0", "0F"),
            Err(PuzzleError::UncoloredTrigger {
                pos: Pos::new_unchecked(0, 1),
            })
        );
    }
}
