//! Board coordinates and displacement vectors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Number of files and ranks on the board.
pub const BOARD_SIZE: i32 = 8;

/// A coordinate on the board.
///
/// `x` is the file (`a` = 0 through `h` = 7) and `y` the rank (`1` = 0
/// through `8` = 7). A `Position` may lie outside the board; use
/// [`Position::in_bounds`] to check.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Returns true if both coordinates are in `[0, 8)`.
    #[inline]
    pub const fn in_bounds(self) -> bool {
        self.x >= 0 && self.x < BOARD_SIZE && self.y >= 0 && self.y < BOARD_SIZE
    }

    /// All 64 in-bounds positions, rank by rank starting from `a1`.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|y| (0..BOARD_SIZE).map(move |x| Position::new(x, y)))
    }

    /// Index into a 64-cell array, or `None` when out of bounds.
    #[inline]
    pub const fn index(self) -> Option<usize> {
        if self.in_bounds() {
            Some((self.y * BOARD_SIZE + self.x) as usize)
        } else {
            None
        }
    }

    /// Inverse of [`Position::index`].
    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < 64 {
            Some(Position::new(index as i32 % BOARD_SIZE, index as i32 / BOARD_SIZE))
        } else {
            None
        }
    }

    /// Adds a delta, returning `None` if the result leaves the board.
    #[inline]
    pub fn offset(self, delta: Delta) -> Option<Position> {
        let target = Position::new(
            self.x.checked_add(delta.dx)?,
            self.y.checked_add(delta.dy)?,
        );
        target.in_bounds().then_some(target)
    }

    /// Creates a position from a file letter (`a`-`h`) and rank digit (`1`-`8`).
    pub const fn from_chars(file: char, rank: char) -> Option<Self> {
        let file = file.to_ascii_lowercase();
        if !matches!(file, 'a'..='h') || !matches!(rank, '1'..='8') {
            return None;
        }
        Some(Position::new(
            (file as u8 - b'a') as i32,
            (rank as u8 - b'1') as i32,
        ))
    }

    /// Parses a square in algebraic notation (e.g., "e4").
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Self::from_chars(file, rank)
    }

    /// Returns the file letter, or `None` when out of bounds.
    pub fn file_char(self) -> Option<char> {
        self.in_bounds().then(|| (b'a' + self.x as u8) as char)
    }

    /// Returns the rank digit, or `None` when out of bounds.
    pub fn rank_char(self) -> Option<char> {
        self.in_bounds().then(|| (b'1' + self.y as u8) as char)
    }

    /// Returns the algebraic notation for this position.
    ///
    /// Out-of-bounds positions render as their raw coordinates.
    pub fn to_algebraic(self) -> String {
        match (self.file_char(), self.rank_char()) {
            (Some(file), Some(rank)) => format!("{}{}", file, rank),
            _ => format!("({}, {})", self.x, self.y),
        }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({})", self.to_algebraic())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

impl Add<Delta> for Position {
    type Output = Option<Position>;

    #[inline]
    fn add(self, delta: Delta) -> Option<Position> {
        self.offset(delta)
    }
}

/// Saturates at the `i32` limits.
impl Sub for Position {
    type Output = Delta;

    #[inline]
    fn sub(self, rhs: Position) -> Delta {
        Delta::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

/// A displacement between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Delta {
    pub dx: i32,
    pub dy: i32,
}

impl Delta {
    #[inline]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Delta { dx, dy }
    }

    /// Component-wise sign, e.g. the unit step of a castling move.
    #[inline]
    pub const fn signum(self) -> Delta {
        Delta::new(self.dx.signum(), self.dy.signum())
    }

    /// The four rook directions.
    pub const ORTHOGONAL: [Delta; 4] = [
        Delta::new(1, 0),
        Delta::new(-1, 0),
        Delta::new(0, 1),
        Delta::new(0, -1),
    ];

    /// The four bishop directions.
    pub const DIAGONAL: [Delta; 4] = [
        Delta::new(1, 1),
        Delta::new(1, -1),
        Delta::new(-1, 1),
        Delta::new(-1, -1),
    ];

    /// The eight king steps.
    pub const KING: [Delta; 8] = [
        Delta::new(1, 0),
        Delta::new(-1, 0),
        Delta::new(0, 1),
        Delta::new(0, -1),
        Delta::new(1, 1),
        Delta::new(1, -1),
        Delta::new(-1, 1),
        Delta::new(-1, -1),
    ];

    /// The eight knight jumps.
    pub const KNIGHT: [Delta; 8] = [
        Delta::new(1, 2),
        Delta::new(2, 1),
        Delta::new(2, -1),
        Delta::new(1, -2),
        Delta::new(-1, -2),
        Delta::new(-2, -1),
        Delta::new(-2, 1),
        Delta::new(-1, 2),
    ];
}

// Delta arithmetic saturates; a saturated delta never lands on the board.

impl Mul<i32> for Delta {
    type Output = Delta;

    #[inline]
    fn mul(self, rhs: i32) -> Delta {
        Delta::new(self.dx.saturating_mul(rhs), self.dy.saturating_mul(rhs))
    }
}

impl Neg for Delta {
    type Output = Delta;

    #[inline]
    fn neg(self) -> Delta {
        Delta::new(self.dx.saturating_neg(), self.dy.saturating_neg())
    }
}

impl Add for Delta {
    type Output = Delta;

    #[inline]
    fn add(self, rhs: Delta) -> Delta {
        Delta::new(self.dx.saturating_add(rhs.dx), self.dy.saturating_add(rhs.dy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn all_positions() {
        let all: Vec<Position> = Position::all().collect();
        assert_eq!(all.len(), 64);
        assert!(all.iter().all(|p| p.in_bounds()));
        assert_eq!(all[0], Position::new(0, 0));
        assert_eq!(all[63], Position::new(7, 7));
    }

    #[test]
    fn add_delta() {
        assert_eq!(
            Position::new(0, 0) + Delta::new(1, 2),
            Some(Position::new(1, 2))
        );
        assert_eq!(Position::new(0, 0) + Delta::new(-1, -2), None);
        assert_eq!(Position::new(7, 7) + Delta::new(1, 0), None);
    }

    #[test]
    fn from_algebraic() {
        assert_eq!(Position::from_algebraic("a1"), Some(Position::new(0, 0)));
        assert_eq!(Position::from_algebraic("e4"), Some(Position::new(4, 3)));
        assert_eq!(Position::from_algebraic("H8"), Some(Position::new(7, 7)));
        assert_eq!(Position::from_algebraic("i1"), None);
        assert_eq!(Position::from_algebraic("a9"), None);
        assert_eq!(Position::from_algebraic("a10"), None);
        assert_eq!(Position::from_algebraic(""), None);
    }

    #[test]
    fn to_algebraic() {
        assert_eq!(Position::new(4, 3).to_algebraic(), "e4");
        assert_eq!(Position::new(7, 7).to_string(), "h8");
        assert_eq!(Position::new(8, 0).to_algebraic(), "(8, 0)");
    }

    #[test]
    fn index_roundtrip_on_board() {
        for p in Position::all() {
            let idx = p.index().unwrap();
            assert_eq!(Position::from_index(idx), Some(p));
        }
        assert_eq!(Position::new(-1, 3).index(), None);
        assert_eq!(Position::from_index(64), None);
    }

    #[test]
    fn delta_arithmetic() {
        let d = Delta::new(-3, 0);
        assert_eq!(d.signum(), Delta::new(-1, 0));
        assert_eq!(d.signum() * 2, Delta::new(-2, 0));
        assert_eq!(-d, Delta::new(3, 0));
        assert_eq!(Position::new(6, 0) - Position::new(4, 0), Delta::new(2, 0));
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        assert_eq!(Position::new(i32::MIN, 0) + Delta::new(i32::MIN, 0), None);
        assert_eq!(Position::new(0, i32::MAX) + Delta::new(0, 1), None);
        assert_eq!(Position::new(i32::MAX, 0) + Delta::new(i32::MIN, 0), None);
        assert_eq!(Position::new(0, 0) + Delta::new(i32::MAX, i32::MAX), None);
        assert_eq!(Delta::new(i32::MAX, 1) * 2, Delta::new(i32::MAX, 2));
        assert_eq!(-Delta::new(i32::MIN, 0), Delta::new(i32::MAX, 0));
        assert_eq!(
            Position::new(i32::MIN, 0) - Position::new(1, 0),
            Delta::new(i32::MIN, 0)
        );
    }

    proptest! {
        #[test]
        fn out_of_bounds_positions_are_rejected(x in -20i32..20, y in -20i32..20) {
            let p = Position::new(x, y);
            let expected = (0..8).contains(&x) && (0..8).contains(&y);
            prop_assert_eq!(p.in_bounds(), expected);
            prop_assert_eq!(p.index().is_some(), expected);
        }

        #[test]
        fn offset_stays_on_board(x in 0i32..8, y in 0i32..8, dx in -9i32..9, dy in -9i32..9) {
            let p = Position::new(x, y);
            match p + Delta::new(dx, dy) {
                Some(q) => {
                    prop_assert!(q.in_bounds());
                    prop_assert_eq!(q - p, Delta::new(dx, dy));
                }
                None => prop_assert!(!Position::new(x + dx, y + dy).in_bounds()),
            }
        }

        #[test]
        fn offset_never_overflows(x in any::<i32>(), y in any::<i32>(), dx in any::<i32>(), dy in any::<i32>()) {
            let p = Position::new(x, y);
            let expected = x
                .checked_add(dx)
                .zip(y.checked_add(dy))
                .map(|(x, y)| Position::new(x, y))
                .filter(|q| q.in_bounds());
            prop_assert_eq!(p + Delta::new(dx, dy), expected);
        }
    }
}
