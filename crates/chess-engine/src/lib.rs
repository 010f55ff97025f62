//! Immutable chess rules engine.
//!
//! This crate provides:
//! - [`Game`] - the game state machine with full history
//! - [`NextStep`] - continue / checkmate / stalemate, with the transition function
//! - [`Effect`] - composable board transformations
//! - [`NormalizedBoard`] - a board seen as allied versus adversary pieces
//! - [`RuleSet`] and [`StandardChess`] - per-rank move generation
//! - Attack and check detection
//!
//! # Architecture
//!
//! Nothing is mutated after construction. A [`Game`] holds a persistent
//! [`Board`](chess_core::Board) and a shared link to its parent, so every
//! earlier position stays available for castling and en passant checks and
//! games can be read from several threads without locking.
//!
//! # Example
//!
//! ```
//! use chess_core::{Action, Color, Position};
//! use chess_engine::{Game, NextStep};
//!
//! let game = Game::create();
//! let e2 = Position::from_algebraic("e2").unwrap();
//! let e4 = Position::from_algebraic("e4").unwrap();
//!
//! let after = match game.next_step() {
//!     NextStep::MovePiece(step) => step.apply(Action::new(e2, e4)),
//!     _ => unreachable!(),
//! };
//! assert_eq!(after.next_player(), Color::Black);
//! ```

mod effect;
mod game;
pub mod movegen;
mod normalized;
pub mod rules;

pub use effect::Effect;
pub use game::{Game, MovePiece, NextStep, Outcome};
pub use movegen::{is_attacked, is_king_attacked};
pub use normalized::{NormalizedBoard, Side};
pub use rules::{Candidate, RuleSet, StandardChess};
