//! Bishop, rook and queen rays.

use super::Candidate;
use crate::normalized::Side;
use crate::{Effect, NormalizedBoard};
use chess_core::{Action, Delta, Position, BOARD_SIZE};

/// Walks each direction until the edge or the first piece.
///
/// An adversary blocker is included as a capture, an allied one is not.
pub(crate) fn ray_actions(
    view: &NormalizedBoard<'_>,
    from: Position,
    directions: &[Delta],
) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for &direction in directions {
        for distance in 1..BOARD_SIZE {
            let Some(to) = from + direction * distance else {
                break;
            };
            match view.side(to) {
                None => candidates.push((Action::new(from, to), Effect::relocate(from, to))),
                Some(Side::Adversary) => {
                    candidates.push((Action::new(from, to), Effect::relocate(from, to)));
                    break;
                }
                Some(Side::Allied) => break,
            }
        }
    }
    candidates
}

/// Squares seen along each direction, up to and including the first piece.
pub(crate) fn ray_attacks(
    view: &NormalizedBoard<'_>,
    from: Position,
    directions: &[Delta],
) -> Vec<Position> {
    let mut attacked = Vec::new();
    for &direction in directions {
        for distance in 1..BOARD_SIZE {
            let Some(to) = from + direction * distance else {
                break;
            };
            attacked.push(to);
            if view.piece(to).is_some() {
                break;
            }
        }
    }
    attacked
}
