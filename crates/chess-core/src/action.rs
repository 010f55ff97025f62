//! Action representation.

use crate::{Delta, Position, Rank};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single ply as seen by callers: where a piece starts, where it lands, and
/// what a promoting pawn turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Move { from: Position, to: Position },
    Promote { from: Position, to: Position, rank: Rank },
}

impl Action {
    #[inline]
    pub const fn new(from: Position, to: Position) -> Self {
        Action::Move { from, to }
    }

    /// A move described by its origin and displacement.
    ///
    /// Returns `None` if the destination leaves the board.
    pub fn step(from: Position, delta: Delta) -> Option<Self> {
        (from + delta).map(|to| Action::Move { from, to })
    }

    #[inline]
    pub const fn promote(from: Position, to: Position, rank: Rank) -> Self {
        Action::Promote { from, to, rank }
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Position {
        match self {
            Action::Move { from, .. } | Action::Promote { from, .. } => from,
        }
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Position {
        match self {
            Action::Move { to, .. } | Action::Promote { to, .. } => to,
        }
    }

    /// Returns the displacement of the moving piece.
    #[inline]
    pub fn delta(self) -> Delta {
        self.to() - self.from()
    }

    /// Returns the promotion kind if this is a promotion.
    #[inline]
    pub const fn promotion(self) -> Option<Rank> {
        match self {
            Action::Move { .. } => None,
            Action::Promote { rank, .. } => Some(rank),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(rank) = self.promotion() {
            write!(f, "{}", rank.letter())?;
        }
        Ok(())
    }
}
