//! Chess notation codecs.
//!
//! This crate converts between [`chess_engine::Game`] values and text:
//! - [`uci`] - `e2e4 e7e5` move lists
//! - [`algebraic`] - long algebraic tokens such as `Ng1-f3` and `e7-e8=Q+`
//! - [`record`] - whole games with an optional FEN header
//! - [`voice`] - permissive spoken-move transcripts
//!
//! FEN itself lives in `chess-core` as [`chess_core::Setup`].
//!
//! All grammars are built from the combinators in [`parser`]. Strict codecs
//! require exactly one reading and report [`NotationError`] otherwise; the
//! voice codec keeps every reading and lets the game decide.
//!
//! # Example
//!
//! ```
//! use chess_engine::Game;
//! use chess_notation::{record, uci, voice};
//!
//! let game = uci::play(&Game::create(), "e2e4 e7e5").unwrap();
//! let action = voice::interpret(&game, "knight to f three").unwrap();
//! let game = game.play(action);
//! assert_eq!(record::serialize(&game), "1. e2-e4 e7-e5 2. Ng1-f3");
//! ```

pub mod algebraic;
mod config;
mod error;
pub mod grammar;
pub mod parser;
pub mod record;
pub mod uci;
pub mod voice;

pub use config::{ConfigError, PieceWords, VoiceConfig};
pub use error::NotationError;
pub use voice::VoiceInterpreter;
