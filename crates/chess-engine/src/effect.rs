//! Board transformations produced by actions.

use chess_core::{Board, Delta, Piece, Position};

/// A composable transformation of a [`Board`].
///
/// Every rule resolves an [`Action`](chess_core::Action) to an effect; the
/// game applies it to get the next board. Effects never fail: writes that
/// fall off the board are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Empties a square.
    Remove(Position),
    /// Puts a piece on a square, replacing whatever was there.
    Replace(Position, Piece),
    /// Moves the piece on `from` by `delta`, capturing anything at the target.
    Move { from: Position, delta: Delta },
    /// Applies each effect in order.
    All(Vec<Effect>),
}

impl Effect {
    /// Moves the piece on `from` to `to`.
    #[inline]
    pub fn relocate(from: Position, to: Position) -> Self {
        Effect::Move {
            from,
            delta: to - from,
        }
    }

    pub fn all(effects: impl IntoIterator<Item = Effect>) -> Self {
        Effect::All(effects.into_iter().collect())
    }

    /// Returns the board after this effect.
    pub fn apply(&self, board: &Board) -> Board {
        match self {
            Effect::Remove(at) => board.set(*at, None),
            Effect::Replace(at, piece) => board.set(*at, Some(*piece)),
            Effect::Move { from, delta } => {
                let (Some(piece), Some(to)) = (board.get(*from), *from + *delta) else {
                    return board.clone();
                };
                board.set(*from, None).set(to, Some(piece))
            }
            Effect::All(effects) => effects
                .iter()
                .fold(board.clone(), |acc, effect| effect.apply(&acc)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Color, PieceIdentifier, Rank};

    fn piece(rank: Rank, color: Color, id: u32) -> Piece {
        Piece::new(color, rank, PieceIdentifier::new(id))
    }

    #[test]
    fn move_relocates_and_captures() {
        let a1 = Position::new(0, 0);
        let a8 = Position::new(0, 7);
        let board = Board::empty()
            .set(a1, Some(piece(Rank::Rook, Color::White, 0)))
            .set(a8, Some(piece(Rank::Rook, Color::Black, 1)));
        let after = Effect::relocate(a1, a8).apply(&board);
        assert_eq!(after.get(a1), None);
        assert_eq!(after.get(a8), Some(piece(Rank::Rook, Color::White, 0)));
        assert_eq!(after.len(), 1);
    }

    #[test]
    fn move_from_empty_square_is_noop() {
        let board = Board::empty();
        let effect = Effect::Move {
            from: Position::new(3, 3),
            delta: Delta::new(1, 1),
        };
        assert_eq!(effect.apply(&board), board);
    }

    #[test]
    fn move_off_board_is_noop() {
        let h1 = Position::new(7, 0);
        let board = Board::empty().set(h1, Some(piece(Rank::King, Color::White, 0)));
        let effect = Effect::Move {
            from: h1,
            delta: Delta::new(1, 0),
        };
        assert_eq!(effect.apply(&board), board);
    }

    #[test]
    fn composite_applies_in_order() {
        let e7 = Position::new(4, 6);
        let e8 = Position::new(4, 7);
        let pawn = piece(Rank::Pawn, Color::White, 5);
        let board = Board::empty().set(e7, Some(pawn));
        let promote = Effect::all([
            Effect::relocate(e7, e8),
            Effect::Replace(e8, pawn.promoted(Rank::Queen)),
        ]);
        let after = promote.apply(&board);
        assert_eq!(after.get(e7), None);
        assert_eq!(after.get(e8), Some(pawn.promoted(Rank::Queen)));
    }

    #[test]
    fn remove_clears_square() {
        let d4 = Position::new(3, 3);
        let board = Board::empty().set(d4, Some(piece(Rank::Knight, Color::Black, 2)));
        assert!(Effect::Remove(d4).apply(&board).is_empty());
        assert_eq!(Effect::Remove(Position::new(9, 9)).apply(&board), board);
    }
}
