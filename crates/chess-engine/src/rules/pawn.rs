//! Pawn pushes, captures, en passant and promotion.

use super::Candidate;
use crate::{Effect, NormalizedBoard};
use chess_core::{Action, Delta, Position, Rank};

/// The two diagonal squares in front of a pawn.
pub(crate) fn pawn_attacks(view: &NormalizedBoard<'_>, from: Position) -> Vec<Position> {
    let forward = view.forward();
    [Delta::new(-1, 0), Delta::new(1, 0)]
        .into_iter()
        .filter_map(|side| from + (forward + side))
        .collect()
}

/// Pseudo-legal pawn actions.
///
/// `en_passant` is the square a pawn just skipped over with a double step, if
/// any; a pawn diagonally adjacent to it may capture onto it.
pub(crate) fn pawn_actions(
    view: &NormalizedBoard<'_>,
    from: Position,
    en_passant: Option<Position>,
) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    let color = view.perspective();
    let forward = view.forward();

    if let Some(one) = from + forward {
        if view.is_empty(one) {
            push_advance(view, from, one, &mut candidates);

            if from.y == color.pawn_rank() {
                if let Some(two) = one + forward {
                    if view.is_empty(two) {
                        candidates.push((Action::new(from, two), Effect::relocate(from, two)));
                    }
                }
            }
        }
    }

    for to in pawn_attacks(view, from) {
        if view.is_adversary(to) {
            push_advance(view, from, to, &mut candidates);
        } else if Some(to) == en_passant && view.is_empty(to) {
            let victim = Position::new(to.x, from.y);
            let is_pawn = view
                .piece(victim)
                .is_some_and(|p| p.rank == Rank::Pawn && view.is_adversary(victim));
            if is_pawn {
                let effect = Effect::all([Effect::relocate(from, to), Effect::Remove(victim)]);
                candidates.push((Action::new(from, to), effect));
            }
        }
    }

    candidates
}

/// Adds a plain move, or the four promotions when `to` is on the last rank.
fn push_advance(
    view: &NormalizedBoard<'_>,
    from: Position,
    to: Position,
    candidates: &mut Vec<Candidate>,
) {
    let Some(pawn) = view.piece(from) else {
        return;
    };
    if to.y != view.perspective().promotion_rank() {
        candidates.push((Action::new(from, to), Effect::relocate(from, to)));
        return;
    }
    for rank in Rank::PROMOTIONS {
        let effect = Effect::all([
            Effect::relocate(from, to),
            Effect::Replace(to, pawn.promoted(rank)),
        ]);
        candidates.push((Action::promote(from, to, rank), effect));
    }
}
