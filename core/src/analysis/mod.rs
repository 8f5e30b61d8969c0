pub use heuristic::*;
pub use reachability::*;

mod heuristic;
mod reachability;
