//! Castling.

use super::Candidate;
use crate::movegen::is_attacked;
use crate::{Effect, Game};
use chess_core::{king_home, Action, CastlingSide, Color, Position, Rank};

/// Returns true if the piece of `color` and `rank` standing on `home` has
/// been there, by identity, on every board since the game began.
pub(crate) fn stayed_home(game: &Game, home: Position, color: Color, rank: Rank) -> bool {
    game.board().get(home).is_some_and(|piece| {
        piece.color == color && piece.rank == rank && game.unmoved_at(home) == Some(piece.id)
    })
}

/// Castling candidates for the king on `from`.
pub(crate) fn castling_actions(game: &Game, from: Position) -> Vec<Candidate> {
    let color = game.next_player();
    let board = game.board();
    let enemy = color.opposite();

    if from != king_home(color) || !stayed_home(game, from, color, Rank::King) {
        return Vec::new();
    }
    if is_attacked(board, from, enemy) {
        return Vec::new();
    }

    let mut candidates = Vec::new();
    for side in CastlingSide::ALL {
        if !game.origin_castling().has(color, side) {
            continue;
        }
        let rook_home = side.rook_home(color);
        if !stayed_home(game, rook_home, color, Rank::Rook) {
            continue;
        }

        let step = side.direction();
        let between_empty = (1..(rook_home.x - from.x).abs())
            .filter_map(|distance| from + step * distance)
            .all(|square| board.get(square).is_none());
        if !between_empty {
            continue;
        }

        let (Some(transit), Some(target)) = (from + step, from + step * 2) else {
            continue;
        };
        if is_attacked(board, transit, enemy) || is_attacked(board, target, enemy) {
            continue;
        }

        let effect = Effect::all([
            Effect::relocate(from, target),
            Effect::relocate(rook_home, transit),
        ]);
        candidates.push((Action::new(from, target), effect));
    }
    candidates
}
