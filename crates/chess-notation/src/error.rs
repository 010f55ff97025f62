use chess_core::FenError;
use thiserror::Error;

/// Errors returned by the strict notation codecs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("malformed {kind}: '{input}'")]
    Malformed { kind: &'static str, input: String },

    #[error("ambiguous {kind}: '{input}' has {count} readings")]
    Ambiguous {
        kind: &'static str,
        input: String,
        count: usize,
    },

    #[error("illegal action '{action}' at ply {ply}")]
    IllegalAction { action: String, ply: usize },

    #[error(transparent)]
    Fen(#[from] FenError),
}
