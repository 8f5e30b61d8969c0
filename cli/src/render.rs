use std::fmt::Write;

use recolor_core::*;

const RESET: &str = "\x1b[0m";

fn background(paint: Option<Paint>) -> &'static str {
    match paint {
        Some(Paint::Red) => "\x1b[41m",
        Some(Paint::Green) => "\x1b[42m",
        Some(Paint::Orange) => "\x1b[43m",
        Some(Paint::Blue) => "\x1b[44m",
        Some(Paint::Purple) => "\x1b[45m",
        None => "\x1b[40m",
    }
}

fn foreground(paint: Paint) -> &'static str {
    match paint {
        Paint::Red => "\x1b[31m",
        Paint::Green => "\x1b[32m",
        Paint::Orange => "\x1b[33m",
        Paint::Blue => "\x1b[34m",
        Paint::Purple => "\x1b[35m",
    }
}

fn arrow(dir: Direction) -> char {
    match dir {
        Direction::Up => '↑',
        Direction::Right => '→',
        Direction::Down => '↓',
        Direction::Left => '←',
    }
}

/// Three terminal columns per cell: the background shows the color the cell wants, the glyph what
/// sits on it.
pub fn render(board: &Board) -> String {
    let mut out = String::new();
    for row in board.cells().rows() {
        for cell in row {
            out.push_str(RESET);
            let (tint, glyph) = match cell.mechanism {
                Mechanism::Wall => {
                    out.push_str(background(None));
                    out.push_str("   ");
                    continue;
                }
                Mechanism::Paint(paint) if Some(paint) == cell.color => ("", '□'),
                Mechanism::Paint(paint) => (foreground(paint), '■'),
                Mechanism::Neutral => ("\x1b[30m", '■'),
                Mechanism::Filler(dir) | Mechanism::Rotating(dir) => ("", arrow(dir)),
                Mechanism::Flood => ("", '○'),
                Mechanism::Bomb => ("", '▲'),
            };
            let _ = write!(out, "{} {tint}{glyph} ", background(cell.color));
        }
        out.push_str(RESET);
        out.push('\n');
    }
    out
}
