//! Attack detection.
//!
//! These functions only use [`RuleSet::attacks`], never the action
//! generators, so they are safe to call from inside move generation.

use crate::rules::{RuleSet, StandardChess};
use crate::NormalizedBoard;
use chess_core::{Board, Color, Position};

/// Returns true if any piece of color `by` attacks `target`.
pub fn is_attacked(board: &Board, target: Position, by: Color) -> bool {
    let view = NormalizedBoard::new(board, by);
    board
        .pieces_of(by)
        .any(|(from, piece)| StandardChess.attacks(piece.rank, &view, from).contains(&target))
}

/// Returns true if the king of `color` is attacked.
///
/// A board without such a king is never in check.
pub fn is_king_attacked(board: &Board, color: Color) -> bool {
    board
        .king_position(color)
        .is_some_and(|king| is_attacked(board, king, color.opposite()))
}
