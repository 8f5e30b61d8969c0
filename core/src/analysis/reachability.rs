use ndarray::Array2;
use smallvec::SmallVec;

use crate::*;

/// For every cell, the triggers whose click could paint it with its own color.
///
/// This is an optimistic approximation: rays run until a wall regardless of what currently sits on
/// them, and a flood is assumed to reach every cell of its color anywhere on the board.
#[derive(Clone, Debug)]
pub struct TriggerMap {
    reached_by: Array2<SmallVec<[Pos; 4]>>,
}

impl TriggerMap {
    pub fn build(board: &Board) -> Self {
        let size = board.size();
        let mut map = Self {
            reached_by: Array2::from_elem(size.to_nd_index(), SmallVec::new()),
        };

        for trigger in board.triggers() {
            let cell = board[trigger];
            let Some(paint) = cell.color else {
                continue;
            };

            match cell.mechanism {
                Mechanism::Filler(dir) => map.add_ray(board, trigger, dir, paint),
                Mechanism::Rotating(_) => {
                    for dir in Direction::ALL {
                        map.add_ray(board, trigger, dir, paint);
                    }
                }
                Mechanism::Flood => {
                    for pos in board.positions() {
                        if board[pos].color == Some(paint) {
                            map.add(pos, trigger);
                        }
                    }
                }
                Mechanism::Bomb => {
                    for pos in board.cells().iter_neighbors(trigger, Neighborhood::Square) {
                        if board[pos].mechanism != Mechanism::Wall {
                            map.add(pos, trigger);
                        }
                    }
                }
                Mechanism::Neutral | Mechanism::Paint(_) | Mechanism::Wall => {}
            }
        }

        map
    }

    fn add_ray(&mut self, board: &Board, trigger: Pos, dir: Direction, paint: Paint) {
        let size = board.size();
        let mut next = trigger.step(dir, size);
        while let Some(pos) = next {
            let cell = board[pos];
            if cell.mechanism == Mechanism::Wall {
                break;
            }
            if cell.color == Some(paint) {
                self.add(pos, trigger);
            }
            next = pos.step(dir, size);
        }
    }

    fn add(&mut self, target: Pos, trigger: Pos) {
        let triggers = &mut self.reached_by[target.to_nd_index()];
        if !triggers.contains(&trigger) {
            triggers.push(trigger);
        }
    }

    pub fn triggers_of(&self, target: Pos) -> &[Pos] {
        &self.reached_by[target.to_nd_index()]
    }

    /// The lone trigger of every cell reached by exactly one.
    pub fn only_reachable_from(&self) -> Array2<Option<Pos>> {
        self.reached_by.map(|triggers| match triggers.as_slice() {
            [only] => Some(*only),
            _ => None,
        })
    }
}
