//! Player color representation.

use serde::{Deserialize, Serialize};

/// Represents the two players in chess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Both colors, White first.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Returns the opposite color.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Returns the pawn direction along `y` (+1 for White, -1 for Black).
    #[inline]
    pub const fn pawn_direction(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Returns the home rank of the pieces (0 for White, 7 for Black).
    #[inline]
    pub const fn back_rank(self) -> i32 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Returns the rank pawns start on (1 for White, 6 for Black).
    #[inline]
    pub const fn pawn_rank(self) -> i32 {
        self.back_rank() + self.pawn_direction()
    }

    /// Returns the rank on which this color's pawns promote.
    #[inline]
    pub const fn promotion_rank(self) -> i32 {
        self.opposite().back_rank()
    }

    /// Returns the FEN side-to-move letter.
    #[inline]
    pub const fn to_fen_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    /// Parses a FEN side-to-move letter.
    #[inline]
    pub const fn from_fen_char(c: char) -> Option<Self> {
        match c {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}
