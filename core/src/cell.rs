use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::*;

/// Intrinsic paint colors a cell can ask for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Paint {
    Red,
    Green,
    Blue,
    Orange,
    Purple,
}

impl Paint {
    pub const ALL: [Paint; 5] = [Self::Red, Self::Green, Self::Blue, Self::Orange, Self::Purple];

    pub const fn code(self) -> char {
        use Paint::*;
        match self {
            Red => 'r',
            Green => 'g',
            Blue => 'b',
            Orange => 'o',
            Purple => 'd',
        }
    }

    pub const fn from_code(code: char) -> Option<Self> {
        use Paint::*;
        match code {
            'r' => Some(Red),
            'g' => Some(Green),
            'b' => Some(Blue),
            'o' => Some(Orange),
            'd' => Some(Purple),
            _ => None,
        }
    }

    pub const fn flag(self) -> PaintSet {
        use Paint::*;
        match self {
            Red => PaintSet::RED,
            Green => PaintSet::GREEN,
            Blue => PaintSet::BLUE,
            Orange => PaintSet::ORANGE,
            Purple => PaintSet::PURPLE,
        }
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PaintSet: u8 {
        const RED    = 1;
        const GREEN  = 1 << 1;
        const BLUE   = 1 << 2;
        const ORANGE = 1 << 3;
        const PURPLE = 1 << 4;
    }
}

/// What currently occupies a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mechanism {
    /// Empty, waiting for paint.
    #[default]
    Neutral,
    Paint(Paint),
    Filler(Direction),
    Rotating(Direction),
    Flood,
    Bomb,
    Wall,
}

impl Mechanism {
    pub const fn code(self) -> char {
        use Direction::*;
        use Mechanism::*;
        match self {
            Neutral => '0',
            Paint(paint) => paint.code(),
            Filler(Up) => 'U',
            Filler(Right) => 'R',
            Filler(Down) => 'D',
            Filler(Left) => 'L',
            Rotating(Up) => 'w',
            Rotating(Right) => 'x',
            Rotating(Down) => 's',
            Rotating(Left) => 'a',
            Flood => 'F',
            Bomb => 'B',
            Wall => 'X',
        }
    }

    pub const fn from_code(code: char) -> Option<Self> {
        use Direction::*;
        use Mechanism::*;
        Some(match code {
            '0' => Neutral,
            'U' => Filler(Up),
            'R' => Filler(Right),
            'D' => Filler(Down),
            'L' => Filler(Left),
            'w' => Rotating(Up),
            'x' => Rotating(Right),
            's' => Rotating(Down),
            'a' => Rotating(Left),
            'F' => Flood,
            'B' => Bomb,
            'X' => Wall,
            _ => match crate::Paint::from_code(code) {
                Some(paint) => Paint(paint),
                None => return None,
            },
        })
    }

    pub const fn is_clickable(self) -> bool {
        use Mechanism::*;
        match self {
            Filler(_) | Rotating(_) | Flood | Bomb => true,
            Neutral | Paint(_) | Wall => false,
        }
    }
}

/// A grid cell: a fixed intrinsic color and the mechanism sitting on it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub color: Option<Paint>,
    pub mechanism: Mechanism,
}

impl Cell {
    pub const WALL: Cell = Cell {
        color: None,
        mechanism: Mechanism::Wall,
    };

    pub const fn new(color: Option<Paint>, mechanism: Mechanism) -> Self {
        Self { color, mechanism }
    }

    pub const fn is_clickable(self) -> bool {
        self.mechanism.is_clickable()
    }

    /// Uncolored cells are always correct. A painted cell is correct when the paint matches, and
    /// any other mechanism counts as correct unless it is the neutral one.
    pub fn is_correct(self) -> bool {
        match (self.color, self.mechanism) {
            (None, _) => true,
            (Some(color), Mechanism::Paint(paint)) => paint == color,
            (Some(_), mechanism) => mechanism != Mechanism::Neutral,
        }
    }

    pub const fn color_code(self) -> char {
        match self.color {
            Some(paint) => paint.code(),
            None => '0',
        }
    }
}
