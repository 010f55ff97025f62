//! Knight jumps and single king steps.

use super::Candidate;
use crate::{Effect, NormalizedBoard};
use chess_core::{Action, Delta, Position};

pub(crate) fn step_actions(
    view: &NormalizedBoard<'_>,
    from: Position,
    steps: &[Delta],
) -> Vec<Candidate> {
    steps
        .iter()
        .filter_map(|&step| from + step)
        .filter(|&to| !view.is_allied(to))
        .map(|to| (Action::new(from, to), Effect::relocate(from, to)))
        .collect()
}

pub(crate) fn step_attacks(from: Position, steps: &[Delta]) -> Vec<Position> {
    steps.iter().filter_map(|&step| from + step).collect()
}
