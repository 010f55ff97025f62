//! Castling sides and rights.

use crate::{Color, Delta, Position};
use serde::{Deserialize, Serialize};

/// Which rook the king castles with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

impl CastlingSide {
    pub const ALL: [CastlingSide; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];

    /// File of the rook before castling.
    #[inline]
    pub const fn rook_file(self) -> i32 {
        match self {
            CastlingSide::KingSide => 7,
            CastlingSide::QueenSide => 0,
        }
    }

    /// Unit step from the king toward the rook.
    #[inline]
    pub const fn direction(self) -> Delta {
        match self {
            CastlingSide::KingSide => Delta::new(1, 0),
            CastlingSide::QueenSide => Delta::new(-1, 0),
        }
    }

    /// Home square of the castling rook.
    #[inline]
    pub const fn rook_home(self, color: Color) -> Position {
        Position::new(self.rook_file(), color.back_rank())
    }

    /// Classifies a king displacement, if it is a castling step.
    pub const fn from_king_delta(delta: Delta) -> Option<CastlingSide> {
        match (delta.dx, delta.dy) {
            (2, 0) => Some(CastlingSide::KingSide),
            (-2, 0) => Some(CastlingSide::QueenSide),
            _ => None,
        }
    }
}

/// File of both kings before castling.
pub const KING_FILE: i32 = 4;

/// Home square of the king of the given color.
#[inline]
pub const fn king_home(color: Color) -> Position {
    Position::new(KING_FILE, color.back_rank())
}

/// Castling rights flags, as written in the third FEN field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    const fn flag(color: Color, side: CastlingSide) -> u8 {
        match (color, side) {
            (Color::White, CastlingSide::KingSide) => 0b0001,
            (Color::White, CastlingSide::QueenSide) => 0b0010,
            (Color::Black, CastlingSide::KingSide) => 0b0100,
            (Color::Black, CastlingSide::QueenSide) => 0b1000,
        }
    }

    /// Returns true if `color` may castle on `side`.
    #[inline]
    pub const fn has(self, color: Color, side: CastlingSide) -> bool {
        self.0 & Self::flag(color, side) != 0
    }

    /// Returns these rights with one flag added.
    #[inline]
    #[must_use]
    pub const fn with(self, color: Color, side: CastlingSide) -> Self {
        CastlingRights(self.0 | Self::flag(color, side))
    }

    /// Returns these rights with one flag removed.
    #[inline]
    #[must_use]
    pub const fn without(self, color: Color, side: CastlingSide) -> Self {
        CastlingRights(self.0 & !Self::flag(color, side))
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Parses the FEN castling field (`KQkq` subset or `-`).
    pub fn from_fen(field: &str) -> Option<Self> {
        if field == "-" {
            return Some(Self::NONE);
        }
        if field.is_empty() {
            return None;
        }
        field.chars().try_fold(Self::NONE, |rights, c| {
            let (color, side) = match c {
                'K' => (Color::White, CastlingSide::KingSide),
                'Q' => (Color::White, CastlingSide::QueenSide),
                'k' => (Color::Black, CastlingSide::KingSide),
                'q' => (Color::Black, CastlingSide::QueenSide),
                _ => return None,
            };
            Some(rights.with(color, side))
        })
    }

    /// Writes the FEN castling field.
    pub fn to_fen(self) -> String {
        if self.is_empty() {
            return "-".to_string();
        }
        let mut field = String::with_capacity(4);
        for (color, side, c) in [
            (Color::White, CastlingSide::KingSide, 'K'),
            (Color::White, CastlingSide::QueenSide, 'Q'),
            (Color::Black, CastlingSide::KingSide, 'k'),
            (Color::Black, CastlingSide::QueenSide, 'q'),
        ] {
            if self.has(color, side) {
                field.push(c);
            }
        }
        field
    }
}
