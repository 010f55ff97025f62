//! Core types for chess.
//!
//! This crate provides the value types shared by the engine and the notation
//! codecs:
//! - [`Position`] and [`Delta`] for board coordinates
//! - [`Piece`], [`Rank`], [`Color`] and [`PieceIdentifier`] for pieces
//! - [`Board`], an immutable square-to-piece mapping
//! - [`Action`] for a single ply
//! - FEN parsing and serialization through [`Setup`]

mod action;
mod board;
mod castling;
mod color;
mod fen;
mod piece;
mod position;

pub use action::Action;
pub use board::{standard_board, Board, BoardBuilder, BACK_RANK};
pub use castling::{king_home, CastlingRights, CastlingSide, KING_FILE};
pub use color::Color;
pub use fen::{FenError, Setup};
pub use piece::{IdentifierAllocator, Piece, PieceIdentifier, Rank};
pub use position::{Delta, Position, BOARD_SIZE};
