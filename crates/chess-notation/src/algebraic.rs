//! Long algebraic notation: `e2-e4`, `Ng1xf3`, `e7-e8=Q+`.
//!
//! Every token names the moving piece (none for pawns), both squares, whether
//! it captures, an optional promotion and an optional check mark. Castling is
//! written as the king's move, `Ke1-g1`.

use crate::grammar::{piece_letter, promotion_letter, square};
use crate::parser::{char_where, literal, parse_unique, Parser};
use crate::NotationError;
use chess_core::{Action, Position, Rank};
use chess_engine::{Game, Outcome};

/// Check mark suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Annotation {
    Check,
    Checkmate,
}

/// One decoded algebraic token, before it is checked against a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    pub rank: Rank,
    pub from: Position,
    pub to: Position,
    pub capture: bool,
    pub promotion: Option<Rank>,
    pub annotation: Option<Annotation>,
}

impl Token {
    pub fn action(&self) -> Action {
        match self.promotion {
            Some(rank) => Action::promote(self.from, self.to, rank),
            None => Action::new(self.from, self.to),
        }
    }
}

fn token<'a>() -> Parser<'a, Token> {
    let rank = piece_letter().or_else(Rank::Pawn);
    let separator = char_where(|c| c == '-' || c == 'x').map(|c| c == 'x');
    let promotion = promotion_letter(true).preceded_by(literal("=")).optional();
    let annotation = char_where(|c| c == '+' || c == '#')
        .map(|c| match c {
            '#' => Annotation::Checkmate,
            _ => Annotation::Check,
        })
        .optional();

    rank.then(square())
        .then(separator)
        .then(square())
        .then(promotion)
        .then(annotation)
        .map(
            |(((((rank, from), capture), to), promotion), annotation)| Token {
                rank,
                from,
                to,
                capture,
                promotion,
                annotation,
            },
        )
}

/// Decodes a token without consulting a game.
pub fn decode_token(input: &str) -> Result<Token, NotationError> {
    parse_unique(&token(), input.trim(), "algebraic move")
}

/// Decodes a token and checks it against `game`.
///
/// The named piece must stand on the source square and the action must be
/// legal. Capture and check marks are not verified.
pub fn decode(game: &Game, input: &str) -> Result<Action, NotationError> {
    let token = decode_token(input)?;
    let action = token.action();
    let piece_matches = game
        .board()
        .get(token.from)
        .is_some_and(|piece| piece.rank == token.rank);
    if !piece_matches || !game.is_legal(action) {
        return Err(NotationError::IllegalAction {
            action: input.trim().to_string(),
            ply: game.ply_count(),
        });
    }
    Ok(action)
}

/// Encodes a legal `action` played from `game`.
pub fn encode(game: &Game, action: Action) -> Result<String, NotationError> {
    let after = game
        .try_play(action)
        .ok_or_else(|| NotationError::IllegalAction {
            action: action.to_string(),
            ply: game.ply_count(),
        })?;
    Ok(notate(game, action, &after))
}

/// Writes the token for `action`, which led from `before` to `after`.
pub(crate) fn notate(before: &Game, action: Action, after: &Game) -> String {
    let board = before.board();
    let rank = board
        .get(action.from())
        .map_or(Rank::Pawn, |piece| piece.rank);
    let en_passant = rank == Rank::Pawn && action.from().x != action.to().x;
    let capture = board.get(action.to()).is_some() || en_passant;

    let mut text = String::with_capacity(8);
    if rank != Rank::Pawn {
        text.push(rank.letter().to_ascii_uppercase());
    }
    text.push_str(&action.from().to_algebraic());
    text.push(if capture { 'x' } else { '-' });
    text.push_str(&action.to().to_algebraic());
    if let Some(promotion) = action.promotion() {
        text.push('=');
        text.push(promotion.letter().to_ascii_uppercase());
    }
    match after.outcome() {
        Outcome::Checkmate { .. } => text.push('#'),
        _ if after.is_check() => text.push('+'),
        _ => {}
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Position {
        Position::from_algebraic(s).unwrap()
    }

    #[test]
    fn decode_pawn_and_piece_tokens() {
        let token = decode_token("e2-e4").unwrap();
        assert_eq!(token.rank, Rank::Pawn);
        assert_eq!(token.action(), Action::new(sq("e2"), sq("e4")));
        assert!(!token.capture);

        let token = decode_token("Ng1xf3+").unwrap();
        assert_eq!(token.rank, Rank::Knight);
        assert!(token.capture);
        assert_eq!(token.annotation, Some(Annotation::Check));
    }

    #[test]
    fn decode_promotion_token() {
        let token = decode_token("a7-a8=N#").unwrap();
        assert_eq!(token.action(), Action::promote(sq("a7"), sq("a8"), Rank::Knight));
        assert_eq!(token.annotation, Some(Annotation::Checkmate));
    }

    #[test]
    fn malformed_tokens() {
        for input in ["e2e4", "Pe2-e4", "e2-e9", "Ke1-g1=Q=", "a7-a8=K", "e2~e4", ""] {
            assert!(decode_token(input).is_err(), "{input}");
        }
    }

    #[test]
    fn decode_checks_the_game() {
        let game = Game::create();
        assert_eq!(
            decode(&game, "Ng1-f3").unwrap(),
            Action::new(sq("g1"), sq("f3"))
        );
        // Wrong piece letter for the square.
        assert!(decode(&game, "Bg1-f3").is_err());
        assert!(matches!(
            decode(&game, "e2-e5"),
            Err(NotationError::IllegalAction { ply: 0, .. })
        ));
    }

    #[test]
    fn encode_marks_captures_and_checks() {
        let game = Game::create()
            .play(Action::new(sq("e2"), sq("e4")))
            .play(Action::new(sq("d7"), sq("d5")));
        assert_eq!(
            encode(&game, Action::new(sq("e4"), sq("d5"))).unwrap(),
            "e4xd5"
        );
        assert_eq!(
            encode(&game, Action::new(sq("f1"), sq("b5"))).unwrap(),
            "Bf1-b5+"
        );
        assert!(encode(&game, Action::new(sq("e4"), sq("e5"))).is_ok());
        assert!(encode(&game, Action::new(sq("e4"), sq("e6"))).is_err());
    }

    #[test]
    fn encode_mate_and_en_passant() {
        let game = Game::create()
            .play(Action::new(sq("f2"), sq("f3")))
            .play(Action::new(sq("e7"), sq("e5")))
            .play(Action::new(sq("g2"), sq("g4")));
        assert_eq!(
            encode(&game, Action::new(sq("d8"), sq("h4"))).unwrap(),
            "Qd8-h4#"
        );

        let game = Game::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        assert_eq!(
            encode(&game, Action::new(sq("e5"), sq("d6"))).unwrap(),
            "e5xd6"
        );
    }

    #[test]
    fn castling_is_the_king_move() {
        let game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let action = decode(&game, "Ke1-g1").unwrap();
        assert_eq!(encode(&game, action).unwrap(), "Ke1-g1");
    }
}
