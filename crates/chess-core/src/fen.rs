//! FEN (Forsyth-Edwards Notation) parsing and serialization.

use crate::{Board, CastlingRights, Color, Position, Rank};
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// A position as described by a FEN string.
///
/// Piece identifiers are allocated in reading order, rank 8 first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setup {
    pub board: Board,
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Position>,
    /// Plies since the last pawn move or capture.
    pub halfmove_clock: u32,
    /// Starts at 1 and increments after Black's move.
    pub fullmove_number: u32,
}

impl Setup {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// The standard starting position.
    pub fn standard() -> Self {
        Setup {
            board: crate::standard_board(),
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() != 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let board = Self::parse_piece_placement(parts[0])?;

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = CastlingRights::from_fen(parts[2])
            .ok_or_else(|| FenError::InvalidCastlingRights(parts[2].to_string()))?;

        let en_passant = Self::parse_en_passant(parts[3], side_to_move)?;

        let halfmove_clock = parts[4]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidHalfmoveClock(parts[4].to_string()))?;

        let fullmove_number = parts[5]
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| FenError::InvalidFullmoveNumber(parts[5].to_string()))?;

        Ok(Setup {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    fn parse_piece_placement(placement: &str) -> Result<Board, FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut placed: Vec<(Position, Color, Rank)> = Vec::with_capacity(32);
        for (i, rank) in ranks.iter().enumerate() {
            let y = 7 - i as i32;
            let mut x = 0i32;
            for c in rank.chars() {
                if let Some(run) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    x += run as i32;
                } else if let Some((kind, color)) = Rank::from_fen_char(c) {
                    placed.push((Position::new(x, y), color, kind));
                    x += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        8 - i
                    )));
                }
                if x > 8 {
                    break;
                }
            }
            if x != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    8 - i,
                    x
                )));
            }
        }

        Ok(Board::build(|b| {
            for (at, color, kind) in placed {
                b.place(at, color, kind);
            }
        }))
    }

    /// The target must lie behind a pawn the opponent just pushed two squares.
    fn parse_en_passant(ep: &str, side_to_move: Color) -> Result<Option<Position>, FenError> {
        if ep == "-" {
            return Ok(None);
        }
        let mover = side_to_move.opposite();
        let skipped = mover.pawn_rank() + mover.pawn_direction();
        match Position::from_algebraic(ep) {
            Some(square) if square.y == skipped => Ok(Some(square)),
            _ => Err(FenError::InvalidEnPassantSquare(ep.to_string())),
        }
    }

    /// Writes only the piece placement field.
    pub fn placement_to_fen(board: &Board) -> String {
        let mut fen = String::new();
        for y in (0..8).rev() {
            let mut empty_count = 0;
            for x in 0..8 {
                match board.get(Position::new(x, y)) {
                    Some(piece) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(piece.to_fen_char());
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if y > 0 {
                fen.push('/');
            }
        }
        fen
    }

    /// Converts the setup back to a FEN string.
    pub fn to_fen(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            Self::placement_to_fen(&self.board),
            self.side_to_move.to_fen_char(),
            self.castling.to_fen(),
            self.en_passant
                .map_or_else(|| "-".to_string(), |p| p.to_algebraic()),
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

impl Default for Setup {
    fn default() -> Self {
        Self::standard()
    }
}
