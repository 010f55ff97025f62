//! Persistent board representation.
//!
//! A [`Board`] is an immutable mapping from in-bounds [`Position`]s to
//! [`Piece`]s. Every write returns a new board; the cells are shared behind an
//! [`Arc`] and only copied when a shared board is written to, so older boards
//! stay valid and cheap to keep around in a game's history.

use crate::{Color, IdentifierAllocator, Piece, Position, Rank};
use std::fmt;
use std::sync::Arc;

type Cells = [Option<Piece>; 64];

/// An immutable 8x8 board.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: Arc<Cells>,
}

impl Board {
    /// Creates a board with no pieces.
    pub fn empty() -> Self {
        Board {
            cells: Arc::new([None; 64]),
        }
    }

    /// Builds a board by letting `populate` place pieces.
    ///
    /// Writes to out-of-bounds positions are dropped.
    pub fn build<F>(populate: F) -> Self
    where
        F: FnOnce(&mut BoardBuilder),
    {
        let mut builder = BoardBuilder::new();
        populate(&mut builder);
        builder.finish()
    }

    /// Returns the piece at `position`, or `None` for empty or off-board squares.
    #[inline]
    pub fn get(&self, position: Position) -> Option<Piece> {
        position.index().and_then(|i| self.cells[i])
    }

    /// Returns a board with `position` set to `piece` (`None` empties it).
    ///
    /// Off-board positions leave the board unchanged.
    #[must_use]
    pub fn set(&self, position: Position, piece: Option<Piece>) -> Board {
        let Some(index) = position.index() else {
            return self.clone();
        };
        if self.cells[index] == piece {
            return self.clone();
        }
        let mut board = self.clone();
        Arc::make_mut(&mut board.cells)[index] = piece;
        board
    }

    /// Iterates occupied squares in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, cell)| {
            let piece = (*cell)?;
            Position::from_index(i).map(|p| (p, piece))
        })
    }

    /// Iterates the pieces of one color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.iter().filter(move |(_, piece)| piece.color == color)
    }

    /// Finds the king of the given color.
    pub fn king_position(&self, color: Color) -> Option<Position> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.rank == Rank::King)
            .map(|(p, _)| p)
    }

    /// Number of occupied squares.
    pub fn len(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_none())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..8).rev() {
            for x in 0..8 {
                let c = self
                    .get(Position::new(x, y))
                    .map_or('.', |piece| piece.to_fen_char());
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Mutable staging area used by [`Board::build`].
#[derive(Debug)]
pub struct BoardBuilder {
    cells: Cells,
    ids: IdentifierAllocator,
}

impl BoardBuilder {
    fn new() -> Self {
        BoardBuilder {
            cells: [None; 64],
            ids: IdentifierAllocator::new(),
        }
    }

    /// Places a new piece with a freshly allocated identifier.
    pub fn place(&mut self, position: Position, color: Color, rank: Rank) -> &mut Self {
        let piece = Piece::new(color, rank, self.ids.allocate());
        self.set(position, Some(piece))
    }

    /// Writes a piece as-is. Out-of-bounds writes are dropped.
    pub fn set(&mut self, position: Position, piece: Option<Piece>) -> &mut Self {
        if let Some(index) = position.index() {
            self.cells[index] = piece;
        }
        self
    }

    fn finish(self) -> Board {
        Board {
            cells: Arc::new(self.cells),
        }
    }
}

/// Piece kinds on the home rank, file `a` to `h`.
pub const BACK_RANK: [Rank; 8] = [
    Rank::Rook,
    Rank::Knight,
    Rank::Bishop,
    Rank::Queen,
    Rank::King,
    Rank::Bishop,
    Rank::Knight,
    Rank::Rook,
];

/// The standard starting setup.
///
/// Identifiers are allocated in FEN reading order (rank 8 to rank 1, file `a`
/// to `h`), so this board equals the one parsed from the starting FEN.
pub fn standard_board() -> Board {
    Board::build(|b| {
        for y in (0..8).rev() {
            for (x, back) in BACK_RANK.iter().enumerate() {
                let placed = match y {
                    7 => Some((Color::Black, *back)),
                    6 => Some((Color::Black, Rank::Pawn)),
                    1 => Some((Color::White, Rank::Pawn)),
                    0 => Some((Color::White, *back)),
                    _ => None,
                };
                if let Some((color, rank)) = placed {
                    b.place(Position::new(x as i32, y), color, rank);
                }
            }
        }
    })
}
