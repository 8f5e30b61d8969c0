//! Solver for "click to recolor" grid puzzles.
//!
//! A [`LevelData`] describes a level as two code strings, [`Board`] plays it, and the [`Solver`]s
//! search for the shortest sequence of clicks that leaves every cell correctly colored.

#![no_std]

extern crate alloc;

pub use analysis::*;
pub use board::*;
pub use cache::*;
pub use cell::*;
pub use config::*;
pub use error::*;
pub use level::*;
pub use moves::*;
pub use solver::*;
pub use types::*;

mod analysis;
mod board;
mod cache;
mod cell;
mod config;
mod error;
mod level;
mod moves;
mod solver;
mod types;
