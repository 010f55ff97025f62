//! UCI move strings: `e2e4`, `e7e8q`, space separated.

use crate::grammar::{promotion_letter, square};
use crate::parser::{parse_unique, sep_by, whitespace, Parser};
use crate::NotationError;
use chess_core::Action;
use chess_engine::Game;

fn uci_move<'a>() -> Parser<'a, Action> {
    square()
        .then(square())
        .then(promotion_letter(false).optional())
        .map(|((from, to), promotion)| match promotion {
            Some(rank) => Action::promote(from, to, rank),
            None => Action::new(from, to),
        })
}

/// Decodes a single UCI move.
pub fn decode_move(input: &str) -> Result<Action, NotationError> {
    parse_unique(&uci_move(), input.trim(), "UCI move")
}

/// Decodes a whitespace separated list of UCI moves.
///
/// An empty or blank input decodes to no moves.
pub fn decode(input: &str) -> Result<Vec<Action>, NotationError> {
    parse_unique(&sep_by(uci_move(), whitespace()), input.trim(), "UCI move list")
}

pub fn encode(action: Action) -> String {
    action.to_string()
}

/// Encodes `actions` as a space separated move list.
pub fn encode_all(actions: &[Action]) -> String {
    actions
        .iter()
        .map(|&action| encode(action))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Plays a UCI move list from `game`.
///
/// # Errors
///
/// Fails on malformed input or on the first move that is not legal where it
/// is played.
pub fn play(game: &Game, moves: &str) -> Result<Game, NotationError> {
    decode(moves)?
        .into_iter()
        .try_fold(game.clone(), |game, action| {
            game.try_play(action)
                .ok_or_else(|| NotationError::IllegalAction {
                    action: encode(action),
                    ply: game.ply_count(),
                })
        })
}
