use core::fmt;
use core::ops::Deref;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Longest move sequence a board can record.
pub const MAX_DEPTH: usize = 30;

/// Clicks in the order they were made, bounded by [`MAX_DEPTH`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSequence {
    moves: SmallVec<[Pos; MAX_DEPTH]>,
}

impl MoveSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pos: Pos) -> Result<()> {
        if self.moves.len() >= MAX_DEPTH {
            return Err(PuzzleError::HistoryFull);
        }
        self.moves.push(pos);
        Ok(())
    }
}

impl Deref for MoveSequence {
    type Target = [Pos];

    fn deref(&self) -> &Self::Target {
        &self.moves
    }
}

/// Comma-joined positions in click order, e.g. `A1,C4,B2`.
impl fmt::Display for MoveSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pos) in self.moves.iter().enumerate() {
            if i != 0 {
                f.write_str(",")?;
            }
            write!(f, "{pos}")?;
        }
        Ok(())
    }
}

impl FromStr for MoveSequence {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self> {
        let mut sequence = Self::new();
        if s.trim().is_empty() {
            return Ok(sequence);
        }
        for part in s.split(',') {
            sequence.push(part.parse()?)?;
        }
        Ok(sequence)
    }
}
