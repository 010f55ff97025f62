//! Grammars shared by the strict notations.

use crate::parser::{char_where, Parser};
use chess_core::{Position, Rank};

/// A file letter `a`-`h`, as a zero-based column.
pub fn file<'a>() -> Parser<'a, i32> {
    char_where(|c| matches!(c, 'a'..='h')).map(|c| (c as u8 - b'a') as i32)
}

/// A rank digit `1`-`8`, as a zero-based row.
pub fn rank<'a>() -> Parser<'a, i32> {
    char_where(|c| matches!(c, '1'..='8')).map(|c| (c as u8 - b'1') as i32)
}

/// A square such as `e4`.
pub fn square<'a>() -> Parser<'a, Position> {
    file().then(rank()).map(|(x, y)| Position::new(x, y))
}

/// An uppercase piece letter other than the pawn's.
pub fn piece_letter<'a>() -> Parser<'a, Rank> {
    char_where(|c| matches!(c, 'K' | 'Q' | 'R' | 'B' | 'N')).filter_map(Rank::from_letter)
}

/// A promotion target letter in the given case.
pub fn promotion_letter<'a>(uppercase: bool) -> Parser<'a, Rank> {
    char_where(move |c| c.is_ascii_uppercase() == uppercase)
        .filter_map(Rank::from_letter)
        .filter(|rank| rank.is_promotion_target())
}
