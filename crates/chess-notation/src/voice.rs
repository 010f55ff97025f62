//! Spoken move input.
//!
//! Transcripts from a speech recognizer are lossy: "knight to f three" may
//! arrive as "night two f 3". The grammar here keeps every reading of a
//! transcript, then keeps the legal actions of the current game that agree
//! with at least one reading. Input is accepted only when exactly one
//! distinct action remains.
//!
//! Understood forms, with every word drawn from a [`VoiceConfig`] table:
//!
//! - `[piece] [square] [to | takes] square [[promote to] piece]`
//! - `castle [kingside | queenside]`, or the side first
//!
//! A promotion without a named piece is a queen.

use crate::config::VoiceConfig;
use crate::parser::{choice, literal, Parser};
use chess_core::{Action, CastlingSide, Position, Rank};
use chess_engine::Game;
use std::sync::OnceLock;
use tracing::{debug, trace};

/// Lowercases `transcript`, turns punctuation into spaces and splits letters
/// from digits, so `"E2-e4!"` becomes `"e 2 e 4"`.
pub fn normalize(transcript: &str) -> String {
    let lowered = transcript.to_lowercase();
    let mut words = Vec::new();
    for chunk in lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|chunk| !chunk.is_empty())
    {
        let mut start = 0;
        let mut previous_digit = None;
        for (index, c) in chunk.char_indices() {
            let digit = c.is_ascii_digit();
            if previous_digit.is_some_and(|previous| previous != digit) {
                words.push(&chunk[start..index]);
                start = index;
            }
            previous_digit = Some(digit);
        }
        words.push(&chunk[start..]);
    }
    words.join(" ")
}

/// One reading of a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Utterance {
    Move {
        piece: Option<Rank>,
        from: Option<Position>,
        capture: bool,
        to: Position,
        promotion: Option<Rank>,
    },
    Castle(Option<CastlingSide>),
}

/// Config tables with every spelling normalized.
#[derive(Debug, Clone)]
struct Vocabulary {
    pieces: Vec<(Rank, Vec<String>)>,
    files: Vec<(i32, Vec<String>)>,
    ranks: Vec<(i32, Vec<String>)>,
    moves: Vec<String>,
    captures: Vec<String>,
    promotions: Vec<String>,
    castles: Vec<String>,
    sides: Vec<(CastlingSide, Vec<String>)>,
}

fn spellings(list: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = list
        .iter()
        .map(|word| normalize(word))
        .filter(|word| !word.is_empty())
        .collect();
    normalized.dedup();
    normalized
}

fn indexed(tables: &[Vec<String>]) -> Vec<(i32, Vec<String>)> {
    tables
        .iter()
        .enumerate()
        .map(|(index, list)| (index as i32, spellings(list)))
        .collect()
}

impl Vocabulary {
    fn new(config: &VoiceConfig) -> Self {
        let pieces = &config.pieces;
        Vocabulary {
            pieces: vec![
                (Rank::Pawn, spellings(&pieces.pawn)),
                (Rank::Knight, spellings(&pieces.knight)),
                (Rank::Bishop, spellings(&pieces.bishop)),
                (Rank::Rook, spellings(&pieces.rook)),
                (Rank::Queen, spellings(&pieces.queen)),
                (Rank::King, spellings(&pieces.king)),
            ],
            files: indexed(&config.files),
            ranks: indexed(&config.ranks),
            moves: spellings(&config.moves),
            captures: spellings(&config.captures),
            promotions: spellings(&config.promotions),
            castles: spellings(&config.castles),
            sides: vec![
                (CastlingSide::KingSide, spellings(&config.kingside)),
                (CastlingSide::QueenSide, spellings(&config.queenside)),
            ],
        }
    }
}

/// Succeeds at a word boundary and consumes the following space.
fn boundary<'a>() -> Parser<'a, ()> {
    Parser::new(|input: &'a str| {
        if input.is_empty() {
            vec![(input, ())]
        } else if let Some(rest) = input.strip_prefix(' ') {
            vec![(rest, ())]
        } else {
            Vec::new()
        }
    })
}

/// Any of `spellings` as whole words.
fn word<'a>(spellings: &'a [String]) -> Parser<'a, ()> {
    choice(
        spellings
            .iter()
            .map(|spelling| literal(spelling.as_str()).skip(boundary()).map(|_| ())),
    )
}

fn keyed<'a, K: Copy + 'a>(entries: &'a [(K, Vec<String>)]) -> Parser<'a, K> {
    choice(
        entries
            .iter()
            .map(|(key, list)| {
                let key = *key;
                word(list).map(move |_| key)
            }),
    )
}

fn square<'a>(vocabulary: &'a Vocabulary) -> Parser<'a, Position> {
    keyed(&vocabulary.files)
        .then(keyed(&vocabulary.ranks))
        .map(|(x, y)| Position::new(x, y))
}

fn movement<'a>(vocabulary: &'a Vocabulary) -> Parser<'a, Utterance> {
    let separator = word(&vocabulary.captures)
        .map(|_| true)
        .or(word(&vocabulary.moves).map(|_| false));
    let promotion = keyed(&vocabulary.pieces)
        .preceded_by(word(&vocabulary.promotions).maybe())
        .optional();

    keyed(&vocabulary.pieces)
        .optional()
        .then(square(vocabulary).maybe())
        .then(separator.maybe())
        .then(square(vocabulary))
        .then(promotion)
        .map(|((((piece, from), separator), to), promotion)| Utterance::Move {
            piece,
            from,
            capture: separator.unwrap_or(false),
            to,
            promotion,
        })
}

fn castle<'a>(vocabulary: &'a Vocabulary) -> Parser<'a, Utterance> {
    let side = keyed(&vocabulary.sides);
    let castle_first = side
        .clone()
        .optional()
        .preceded_by(word(&vocabulary.castles))
        .map(Utterance::Castle);
    let side_first = side
        .skip(word(&vocabulary.castles))
        .map(|side| Utterance::Castle(Some(side)));
    castle_first.or(side_first)
}

fn utterance<'a>(vocabulary: &'a Vocabulary) -> Parser<'a, Utterance> {
    movement(vocabulary).or(castle(vocabulary)).check_finished()
}

fn is_capture(game: &Game, action: Action, rank: Rank) -> bool {
    game.board().get(action.to()).is_some()
        || (rank == Rank::Pawn && action.from().x != action.to().x)
}

fn agrees(game: &Game, reading: Utterance, action: Action) -> bool {
    let Some(piece) = game.board().get(action.from()) else {
        return false;
    };
    match reading {
        Utterance::Move {
            piece: spoken,
            from,
            capture,
            to,
            promotion,
        } => {
            let promotion_agrees = match action.promotion() {
                Some(rank) => rank == promotion.unwrap_or(Rank::Queen),
                None => promotion.is_none(),
            };
            action.to() == to
                && from.map_or(true, |from| from == action.from())
                && spoken.map_or(true, |rank| rank == piece.rank)
                && (!capture || is_capture(game, action, piece.rank))
                && promotion_agrees
        }
        Utterance::Castle(side) => {
            piece.rank == Rank::King
                && CastlingSide::from_king_delta(action.delta())
                    .is_some_and(|castled| side.map_or(true, |side| side == castled))
        }
    }
}

/// Interprets transcripts against a fixed vocabulary.
#[derive(Debug, Clone)]
pub struct VoiceInterpreter {
    vocabulary: Vocabulary,
}

impl Default for VoiceInterpreter {
    fn default() -> Self {
        Self::new(&VoiceConfig::default())
    }
}

impl VoiceInterpreter {
    pub fn new(config: &VoiceConfig) -> Self {
        VoiceInterpreter {
            vocabulary: Vocabulary::new(config),
        }
    }

    /// Every legal action that agrees with some reading of `transcript`.
    pub fn candidates(&self, game: &Game, transcript: &str) -> Vec<Action> {
        let normalized = normalize(transcript);
        let readings = utterance(&self.vocabulary).complete(&normalized);
        trace!(%normalized, readings = readings.len(), "parsed voice input");
        if readings.is_empty() {
            return Vec::new();
        }

        let mut found = Vec::new();
        for action in game.all_actions() {
            if readings.iter().any(|&reading| agrees(game, reading, action)) {
                found.push(action);
            }
        }
        found
    }

    /// The single legal action meant by `transcript`, if there is one.
    pub fn interpret(&self, game: &Game, transcript: &str) -> Option<Action> {
        let candidates = self.candidates(game, transcript);
        match candidates.as_slice() {
            [action] => Some(*action),
            [] => {
                debug!(transcript, "voice input matches no legal action");
                None
            }
            _ => {
                debug!(
                    transcript,
                    candidates = candidates.len(),
                    "ambiguous voice input"
                );
                None
            }
        }
    }
}

/// Interprets `transcript` with the built-in vocabulary.
pub fn interpret(game: &Game, transcript: &str) -> Option<Action> {
    static DEFAULT: OnceLock<VoiceInterpreter> = OnceLock::new();
    DEFAULT
        .get_or_init(VoiceInterpreter::default)
        .interpret(game, transcript)
}

/// Interprets `transcript` with the vocabulary of `config`.
pub fn interpret_with(game: &Game, transcript: &str, config: &VoiceConfig) -> Option<Action> {
    VoiceInterpreter::new(config).interpret(game, transcript)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Position {
        Position::from_algebraic(s).unwrap()
    }

    fn mv(from: &str, to: &str) -> Action {
        Action::new(sq(from), sq(to))
    }

    #[test]
    fn normalization() {
        assert_eq!(normalize("E2-e4!"), "e 2 e 4");
        assert_eq!(normalize("  Knight   to F3. "), "knight to f 3");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn plain_moves() {
        let game = Game::create();
        assert_eq!(interpret(&game, "pawn e2 to e4"), Some(mv("e2", "e4")));
        assert_eq!(interpret(&game, "e2 e4"), Some(mv("e2", "e4")));
        assert_eq!(interpret(&game, "e4"), Some(mv("e2", "e4")));
        assert_eq!(interpret(&game, "knight to f3"), Some(mv("g1", "f3")));
    }

    #[test]
    fn homophones() {
        let game = Game::create();
        assert_eq!(interpret(&game, "night to f three"), Some(mv("g1", "f3")));
        assert_eq!(interpret(&game, "pawn echo two to echo four"), Some(mv("e2", "e4")));
        assert_eq!(interpret(&game, "pond dee for"), Some(mv("d2", "d4")));
    }

    #[test]
    fn nonsense_and_illegal_input() {
        let game = Game::create();
        assert_eq!(interpret(&game, ""), None);
        assert_eq!(interpret(&game, "hello there"), None);
        assert_eq!(interpret(&game, "king to e2"), None);
        assert_eq!(interpret(&game, "pawn e2 takes e4"), None);
    }

    #[test]
    fn ambiguity_is_rejected() {
        let game = Game::from_fen("4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1").unwrap();
        assert_eq!(interpret(&game, "knight to d2"), None);
        assert_eq!(
            VoiceInterpreter::default().candidates(&game, "knight to d2").len(),
            2
        );
        assert_eq!(interpret(&game, "knight b1 to d2"), Some(mv("b1", "d2")));
    }

    #[test]
    fn captures() {
        let game = Game::create()
            .play(mv("e2", "e4"))
            .play(mv("d7", "d5"));
        assert_eq!(interpret(&game, "pawn takes d5"), Some(mv("e4", "d5")));
        assert_eq!(interpret(&game, "e takes d 5"), None);
        assert_eq!(interpret(&game, "e4 takes d5"), Some(mv("e4", "d5")));
    }

    #[test]
    fn promotions() {
        let game = Game::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
        assert_eq!(
            interpret(&game, "a7 to a8"),
            Some(Action::promote(sq("a7"), sq("a8"), Rank::Queen))
        );
        assert_eq!(
            interpret(&game, "a seven to a eight promote to knight"),
            Some(Action::promote(sq("a7"), sq("a8"), Rank::Knight))
        );
        assert_eq!(
            interpret(&game, "a8 rook"),
            Some(Action::promote(sq("a7"), sq("a8"), Rank::Rook))
        );
    }

    #[test]
    fn castling_phrases() {
        let game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        assert_eq!(interpret(&game, "castle short"), Some(mv("e1", "g1")));
        assert_eq!(interpret(&game, "castle kingside"), Some(mv("e1", "g1")));
        assert_eq!(interpret(&game, "queen side castle"), Some(mv("e1", "c1")));
        assert_eq!(interpret(&game, "king to g1"), Some(mv("e1", "g1")));
        // Both sides are open.
        assert_eq!(interpret(&game, "castle"), None);
    }

    #[test]
    fn custom_vocabulary() {
        let config = VoiceConfig::from_toml_str(
            r#"
            [pieces]
            knight = ["horsey"]
            "#,
        )
        .unwrap();
        let game = Game::create();
        assert_eq!(
            interpret_with(&game, "horsey to f3", &config),
            Some(mv("g1", "f3"))
        );
        assert_eq!(interpret_with(&game, "knight to f3", &config), None);
    }
}
