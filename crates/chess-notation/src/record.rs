//! Game records: an optional FEN header followed by numbered moves.
//!
//! ```text
//! [FEN "7k/8/6KP/8/8/8/8/8 w - - 0 1"]
//!
//! 1. h6-h7
//! ```
//!
//! The header is written only when the game did not start from the standard
//! position. Moves are long algebraic tokens; reading also accepts move
//! numbers glued to the token (`1.e2-e4`) and a trailing result marker.

use crate::algebraic::{self, notate};
use crate::parser::{char_where, literal, many1, take_while, Parser};
use crate::NotationError;
use chess_core::{Action, Color, Setup};
use chess_engine::Game;

const RESULTS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

fn header<'a>() -> Parser<'a, &'a str> {
    take_while(|c| c != '"')
        .preceded_by(literal("[FEN \""))
        .skip(literal("\"]"))
}

fn move_number<'a>() -> Parser<'a, ()> {
    many1(char_where(|c| c.is_ascii_digit()))
        .then(many1(char_where(|c| c == '.')))
        .map(|_| ())
}

/// Writes `game` as a record.
pub fn serialize(game: &Game) -> String {
    let root = game.root();
    let root_fen = root.to_fen();

    let mut plies: Vec<(&Game, Action, &Game)> = Vec::new();
    let mut current = game;
    while let Some((parent, action)) = current.previous() {
        plies.push((parent, action, current));
        current = parent;
    }
    plies.reverse();

    let mut tokens = Vec::with_capacity(plies.len() * 3 / 2 + 1);
    for (index, (before, action, after)) in plies.into_iter().enumerate() {
        let number = before.fullmove_number();
        match before.next_player() {
            Color::White => tokens.push(format!("{}.", number)),
            Color::Black if index == 0 => tokens.push(format!("{}...", number)),
            Color::Black => {}
        }
        tokens.push(notate(before, action, after));
    }
    let moves = tokens.join(" ");

    if root_fen == Setup::STARTPOS {
        moves
    } else if moves.is_empty() {
        format!("[FEN \"{}\"]\n", root_fen)
    } else {
        format!("[FEN \"{}\"]\n\n{}", root_fen, moves)
    }
}

/// Rebuilds a game by replaying a record.
///
/// # Errors
///
/// Fails on an invalid FEN header, a malformed token, or a move that is not
/// legal where it appears.
pub fn deserialize(record: &str) -> Result<Game, NotationError> {
    let record = record.trim();
    let (mut game, body) = match header().parse(record).into_iter().next() {
        Some((rest, fen)) => (Game::from_fen(fen)?, rest),
        None => (Game::create(), record),
    };

    for word in body.split_whitespace() {
        let word = move_number()
            .parse(word)
            .into_iter()
            .map(|(rest, ())| rest)
            .min_by_key(|rest| rest.len())
            .unwrap_or(word);
        if word.is_empty() || RESULTS.contains(&word) {
            continue;
        }
        let action = algebraic::decode(&game, word)?;
        game = game.play(action);
    }
    Ok(game)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uci;
    use chess_core::Position;
    use chess_engine::Outcome;

    const FOOLS_MATE: &str = "f2f3 e7e5 g2g4 d8h4";

    #[test]
    fn fools_mate_round_trip() {
        let game = uci::play(&Game::create(), FOOLS_MATE).unwrap();
        let text = serialize(&game);
        assert_eq!(text, "1. f2-f3 e7-e5 2. g2-g4 Qd8-h4#");

        let restored = deserialize(&text).unwrap();
        assert_eq!(restored.board(), game.board());
        assert_eq!(restored.moves(), game.moves());
        assert_eq!(
            restored.outcome(),
            Outcome::Checkmate {
                winner: Color::Black
            }
        );
    }

    #[test]
    fn stalemate_round_trip_keeps_the_header() {
        let game = Game::from_fen("7k/8/6KP/8/8/8/8/8 w - - 0 1")
            .unwrap()
            .play(Action::new(Position::new(7, 5), Position::new(7, 6)));
        let text = serialize(&game);
        assert_eq!(text, "[FEN \"7k/8/6KP/8/8/8/8/8 w - - 0 1\"]\n\n1. h6-h7");

        let restored = deserialize(&text).unwrap();
        assert_eq!(restored.board(), game.board());
        assert_eq!(restored.outcome(), Outcome::Stalemate);
    }

    #[test]
    fn black_to_move_first() {
        let game = Game::from_fen("4k3/8/8/8/8/8/4P3/4K3 b - - 0 7").unwrap();
        let game = uci::play(&game, "e8d8 e2e4").unwrap();
        let text = serialize(&game);
        assert!(text.ends_with("7... Ke8-d8 8. e2-e4"), "{text}");
        assert_eq!(deserialize(&text).unwrap().board(), game.board());
    }

    #[test]
    fn empty_games() {
        assert_eq!(serialize(&Game::create()), "");
        assert_eq!(deserialize("").unwrap().board(), Game::create().board());

        let fen = "4k3/8/8/8/8/8/8/4K3 w - - 0 1";
        let text = serialize(&Game::from_fen(fen).unwrap());
        assert_eq!(deserialize(&text).unwrap().to_fen(), fen);
    }

    #[test]
    fn lenient_reading() {
        let game = deserialize("1.e2-e4 e7-e5\n2.Ng1-f3 1-0").unwrap();
        assert_eq!(game.ply_count(), 3);
    }

    #[test]
    fn reading_errors() {
        assert!(matches!(
            deserialize("1. e2-e5"),
            Err(NotationError::IllegalAction { ply: 0, .. })
        ));
        assert!(matches!(
            deserialize("1. e2e4"),
            Err(NotationError::Malformed { .. })
        ));
        assert!(matches!(
            deserialize("[FEN \"not a fen\"]\n\n1. e2-e4"),
            Err(NotationError::Fen(_))
        ));
    }
}
