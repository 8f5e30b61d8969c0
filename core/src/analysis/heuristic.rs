use smallvec::SmallVec;

use crate::*;

/// Admissible estimate of the clicks still needed to solve `board`.
///
/// * every trigger that is the only way to fix some incorrect cell costs at least one click, and a
///   rotating one costs the turns needed to face its farthest-off dependent;
/// * every color some neutral cell still needs and that no such trigger already covers costs one
///   click;
/// * without bombs, every wrong paint on the board needs its own clearing click first.
pub fn lower_bound(board: &Board) -> u32 {
    let mut needed = PaintSet::empty();
    let mut handled = PaintSet::empty();
    let mut removal = PaintSet::empty();
    let mut trigger_costs: SmallVec<[(Pos, u32); 16]> = SmallVec::new();

    for pos in board.positions() {
        let cell = board[pos];
        if cell.is_correct() {
            continue;
        }
        let Some(color) = cell.color else {
            continue;
        };

        match cell.mechanism {
            Mechanism::Neutral => needed |= color.flag(),
            Mechanism::Paint(wrong) => removal |= wrong.flag(),
            _ => {}
        }

        if let Some(trigger) = board.only_reachable_from(pos) {
            handled |= color.flag();
            let cost = match board[trigger].mechanism {
                Mechanism::Rotating(facing) => rotation_cost(trigger, pos, facing),
                _ => 1,
            };
            match trigger_costs.iter_mut().find(|(at, _)| *at == trigger) {
                Some((_, known_cost)) => *known_cost = (*known_cost).max(cost),
                None => trigger_costs.push((trigger, cost)),
            }
        }
    }

    let mut total: u32 = trigger_costs.iter().map(|&(_, cost)| cost).sum();
    total += (needed - handled).bits().count_ones();

    if !board.has_bombs() {
        // a rotating trigger's turning clicks can double as the clearing click for its own color
        let relief = trigger_costs
            .iter()
            .filter(|&&(_, cost)| cost > 1)
            .filter_map(|&(trigger, _)| board[trigger].color)
            .fold(PaintSet::empty(), |set, paint| set | paint.flag());
        total += (removal - relief).bits().count_ones();
    }

    total
}

fn rotation_cost(trigger: Pos, target: Pos, facing: Direction) -> u32 {
    trigger
        .direction_to(target)
        .map_or(1, |dir| facing.clicks_to_face(dir))
}
