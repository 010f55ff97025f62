//! Perspective-relative view of a board.
//!
//! Rules are written once, from the point of view of "my pieces" versus
//! "their pieces". A [`NormalizedBoard`] borrows the absolute board and tags
//! each piece relative to the perspective color; nothing is copied.

use chess_core::{Board, Color, Delta, Piece, Position};

/// Which side a piece belongs to, relative to the perspective color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Allied,
    Adversary,
}

/// A board seen from one player's side.
#[derive(Debug, Clone, Copy)]
pub struct NormalizedBoard<'a> {
    board: &'a Board,
    perspective: Color,
}

impl<'a> NormalizedBoard<'a> {
    #[inline]
    pub fn new(board: &'a Board, perspective: Color) -> Self {
        NormalizedBoard { board, perspective }
    }

    #[inline]
    pub fn board(&self) -> &'a Board {
        self.board
    }

    #[inline]
    pub fn perspective(&self) -> Color {
        self.perspective
    }

    /// The same board seen from the other side.
    #[inline]
    pub fn flipped(&self) -> Self {
        NormalizedBoard::new(self.board, self.perspective.opposite())
    }

    /// Returns the side owning the piece at `position`, if any.
    #[inline]
    pub fn side(&self, position: Position) -> Option<Side> {
        self.board.get(position).map(|piece| self.side_of(piece))
    }

    #[inline]
    pub fn side_of(&self, piece: Piece) -> Side {
        if piece.color == self.perspective {
            Side::Allied
        } else {
            Side::Adversary
        }
    }

    #[inline]
    pub fn piece(&self, position: Position) -> Option<Piece> {
        self.board.get(position)
    }

    /// True for an in-bounds square with no piece on it.
    #[inline]
    pub fn is_empty(&self, position: Position) -> bool {
        position.in_bounds() && self.board.get(position).is_none()
    }

    #[inline]
    pub fn is_adversary(&self, position: Position) -> bool {
        self.side(position) == Some(Side::Adversary)
    }

    #[inline]
    pub fn is_allied(&self, position: Position) -> bool {
        self.side(position) == Some(Side::Allied)
    }

    /// The direction allied pawns advance in.
    #[inline]
    pub fn forward(&self) -> Delta {
        Delta::new(0, self.perspective.pawn_direction())
    }

    /// Allied pieces with their positions.
    pub fn allied(&self) -> impl Iterator<Item = (Position, Piece)> + 'a {
        self.board.pieces_of(self.perspective)
    }
}
