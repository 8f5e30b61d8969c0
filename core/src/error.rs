use alloc::string::String;
use thiserror::Error;

use crate::{Coord, Pos};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error(
        "Descriptor holds {color} color codes and {mechanism} mechanism codes, expected {expected}"
    )]
    LengthMismatch {
        expected: usize,
        color: usize,
        mechanism: usize,
    },
    #[error("Unknown color code {code:?} at cell {index}")]
    UnknownColor { code: char, index: usize },
    #[error("Unknown mechanism code {code:?} at cell {index}")]
    UnknownMechanism { code: char, index: usize },
    #[error("Clickable cell {pos} has no paint color")]
    UncoloredTrigger { pos: Pos },
    #[error("Level of {rows}x{cols} does not fit the {max_rows}x{max_cols} grid")]
    LevelTooLarge {
        rows: Coord,
        cols: Coord,
        max_rows: Coord,
        max_cols: Coord,
    },
    #[error("Cannot infer the size of a level with {0} cells")]
    UnknownSize(usize),
    #[error("Grid of {cols} columns is wider than the {max} that can be named")]
    TooManyColumns { cols: usize, max: Coord },
    #[error("Invalid coordinates ({row}, {col})")]
    InvalidCoords { row: Coord, col: Coord },
    #[error("Invalid move {0:?}")]
    InvalidMove(String),
    #[error("Move history is full")]
    HistoryFull,
    #[error("Invalid search configuration: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = core::result::Result<T, PuzzleError>;
