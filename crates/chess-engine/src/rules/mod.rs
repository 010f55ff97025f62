//! Per-rank move generation.
//!
//! The [`RuleSet`] trait describes what a piece of a given [`Rank`] threatens
//! and which actions it may take. [`StandardChess`] implements it with one
//! `match` over the rank; the helpers in the submodules do the walking.
//!
//! Rules produce *pseudo-legal* candidates: they do not check whether the
//! mover's own king is left attacked. [`Game`] filters those out.

mod castling;
mod pawn;
mod sliding;
mod standard;
mod stepping;

pub use standard::StandardChess;

pub(crate) use castling::stayed_home;

use crate::{Effect, Game, NormalizedBoard};
use chess_core::{Action, Position, Rank, Setup};

/// An action together with the board transformation it resolves to.
pub type Candidate = (Action, Effect);

/// Movement rules for every piece kind.
pub trait RuleSet {
    /// Returns the setup a new game starts from.
    fn initial_setup(&self) -> Setup;

    /// Squares threatened by a piece of `rank` standing on `from`.
    ///
    /// Used for king safety only. Implementations must not consult check
    /// detection or castling, which would recurse back into this method.
    fn attacks(&self, rank: Rank, view: &NormalizedBoard<'_>, from: Position) -> Vec<Position>;

    /// Pseudo-legal actions for the allied piece of `rank` on `from`.
    ///
    /// `game` supplies the board (seen from the side to move) and the history
    /// needed for castling and en passant.
    fn actions(&self, rank: Rank, game: &Game, from: Position) -> Vec<Candidate>;
}
