//! Chess piece representation.

use crate::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The six kinds of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Rank {
    /// The kinds a pawn may promote to, strongest first.
    pub const PROMOTIONS: [Rank; 4] = [Rank::Queen, Rank::Rook, Rank::Bishop, Rank::Knight];

    /// Returns the lowercase letter used by FEN and UCI.
    pub const fn letter(self) -> char {
        match self {
            Rank::Pawn => 'p',
            Rank::Knight => 'n',
            Rank::Bishop => 'b',
            Rank::Rook => 'r',
            Rank::Queen => 'q',
            Rank::King => 'k',
        }
    }

    /// Parses a piece letter in either case.
    pub const fn from_letter(c: char) -> Option<Rank> {
        match c.to_ascii_lowercase() {
            'p' => Some(Rank::Pawn),
            'n' => Some(Rank::Knight),
            'b' => Some(Rank::Bishop),
            'r' => Some(Rank::Rook),
            'q' => Some(Rank::Queen),
            'k' => Some(Rank::King),
            _ => None,
        }
    }

    /// Returns the FEN character for this piece with the given color.
    pub const fn to_fen_char(self, color: Color) -> char {
        let c = self.letter();
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parses a FEN character into a piece kind and color.
    pub const fn from_fen_char(c: char) -> Option<(Rank, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        match Rank::from_letter(c) {
            Some(rank) => Some((rank, color)),
            None => None,
        }
    }

    /// Returns true for a kind a pawn can promote to.
    #[inline]
    pub const fn is_promotion_target(self) -> bool {
        matches!(self, Rank::Queen | Rank::Rook | Rank::Bishop | Rank::Knight)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rank::Pawn => "Pawn",
            Rank::Knight => "Knight",
            Rank::Bishop => "Bishop",
            Rank::Rook => "Rook",
            Rank::Queen => "Queen",
            Rank::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// Stable identity of a single piece.
///
/// Two white pawns are otherwise indistinguishable; the identifier follows a
/// piece across moves (and across promotion) so a renderer can animate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceIdentifier(u32);

impl PieceIdentifier {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        PieceIdentifier(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Hands out identifiers in increasing order.
#[derive(Debug, Clone, Default)]
pub struct IdentifierAllocator {
    next: u32,
}

impl IdentifierAllocator {
    pub const fn new() -> Self {
        IdentifierAllocator { next: 0 }
    }

    /// Returns a fresh identifier.
    pub fn allocate(&mut self) -> PieceIdentifier {
        let id = PieceIdentifier(self.next);
        self.next += 1;
        id
    }
}

/// A piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub rank: Rank,
    pub id: PieceIdentifier,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, rank: Rank, id: PieceIdentifier) -> Self {
        Piece { color, rank, id }
    }

    /// The same piece (same identity) changed into another kind.
    #[inline]
    pub const fn promoted(self, rank: Rank) -> Self {
        Piece { rank, ..self }
    }

    #[inline]
    pub const fn to_fen_char(self) -> char {
        self.rank.to_fen_char(self.color)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.rank)
    }
}
