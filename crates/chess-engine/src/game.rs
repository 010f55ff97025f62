//! Immutable game state machine.
//!
//! A [`Game`] is a value: the current [`Board`], the side to move, and a
//! shared link to the game it came from together with the [`Action`] that was
//! played. Playing a legal action returns a new `Game`; an illegal one hands
//! back the unchanged game, so callers find out by polling
//! [`Game::next_step`] rather than by matching on errors.

use crate::movegen::is_king_attacked;
use crate::rules::{stayed_home, Candidate, RuleSet, StandardChess};
use crate::NormalizedBoard;
use chess_core::{
    king_home, Action, Board, CastlingRights, CastlingSide, Color, FenError, PieceIdentifier,
    Position, Rank, Setup,
};
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::{debug, trace};

/// How the game stands for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The side to move has at least one legal action.
    Continue,
    /// The side to move is in check with no legal action.
    Checkmate { winner: Color },
    /// The side to move is not in check but has no legal action.
    Stalemate,
}

/// What happens next, with the transition function while play continues.
#[derive(Debug, Clone, Copy)]
pub enum NextStep<'a> {
    MovePiece(MovePiece<'a>),
    Checkmate { winner: Color },
    Stalemate,
}

impl NextStep<'_> {
    /// Returns the plain outcome without the borrowed game.
    pub fn outcome(&self) -> Outcome {
        match self {
            NextStep::MovePiece(_) => Outcome::Continue,
            NextStep::Checkmate { winner } => Outcome::Checkmate { winner: *winner },
            NextStep::Stalemate => Outcome::Stalemate,
        }
    }
}

/// A pending ply: whose turn it is and how to make it.
#[derive(Clone, Copy)]
pub struct MovePiece<'a> {
    game: &'a Game,
}

impl<'a> MovePiece<'a> {
    /// The color that moves next.
    pub fn turn(&self) -> Color {
        self.game.next_player
    }

    /// Plays `action`, returning the unchanged game if it is not legal.
    pub fn apply(&self, action: Action) -> Game {
        self.game.play(action)
    }

    /// Legal actions from `from`.
    pub fn actions(&self, from: Position) -> impl Iterator<Item = Action> + 'a {
        self.game.actions(from)
    }
}

impl fmt::Debug for MovePiece<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MovePiece").field("turn", &self.turn()).finish()
    }
}

/// The parent game and the action that led from it.
#[derive(Debug)]
struct Ply {
    game: Game,
    action: Action,
}

/// Facts about the starting position that the history cannot reconstruct.
#[derive(Debug)]
struct Origin {
    castling: CastlingRights,
    en_passant: Option<Position>,
}

/// Squares castling depends on: each king's home and its rooks' homes.
const CASTLING_HOMES: [Position; 6] = [
    king_home(Color::White),
    CastlingSide::KingSide.rook_home(Color::White),
    CastlingSide::QueenSide.rook_home(Color::White),
    king_home(Color::Black),
    CastlingSide::KingSide.rook_home(Color::Black),
    CastlingSide::QueenSide.rook_home(Color::Black),
];

/// For each castling home square, the piece that has stood on it on every
/// board since the game began.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Unmoved([Option<PieceIdentifier>; 6]);

impl Unmoved {
    fn scan(board: &Board) -> Self {
        Unmoved(CASTLING_HOMES.map(|home| board.get(home).map(|piece| piece.id)))
    }

    /// Drops every piece that is no longer on its home square in `board`.
    fn after(self, board: &Board) -> Self {
        let mut ids = self.0;
        for (id, home) in ids.iter_mut().zip(CASTLING_HOMES) {
            if board.get(home).map(|piece| piece.id) != *id {
                *id = None;
            }
        }
        Unmoved(ids)
    }

    fn at(&self, home: Position) -> Option<PieceIdentifier> {
        CASTLING_HOMES
            .iter()
            .position(|&square| square == home)
            .and_then(|index| self.0[index])
    }
}

/// A chess game: current board, side to move and full history.
///
/// Cloning is cheap; boards and history are shared.
#[derive(Clone)]
pub struct Game {
    board: Board,
    next_player: Color,
    previous: Option<Arc<Ply>>,
    origin: Arc<Origin>,
    unmoved: Unmoved,
    halfmove_clock: u32,
    fullmove_number: u32,
    outcome: OnceLock<Outcome>,
}

impl Drop for Game {
    // Unlinks the history one ply at a time; the default drop would recurse
    // once per ply.
    fn drop(&mut self) {
        let mut next = self.previous.take();
        while let Some(mut ply) = next.and_then(Arc::into_inner) {
            next = ply.game.previous.take();
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::create()
    }
}

impl Game {
    /// Creates a new game with the standard starting position.
    pub fn create() -> Self {
        Self::from_setup(StandardChess.initial_setup())
    }

    /// Creates a game from an arbitrary setup.
    pub fn from_setup(setup: Setup) -> Self {
        Game {
            unmoved: Unmoved::scan(&setup.board),
            board: setup.board,
            next_player: setup.side_to_move,
            previous: None,
            origin: Arc::new(Origin {
                castling: setup.castling,
                en_passant: setup.en_passant,
            }),
            halfmove_clock: setup.halfmove_clock,
            fullmove_number: setup.fullmove_number,
            outcome: OnceLock::new(),
        }
    }

    /// Creates a game from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Setup::parse(fen).map(Self::from_setup)
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the color to move.
    pub fn next_player(&self) -> Color {
        self.next_player
    }

    /// The current board seen from the side to move.
    pub fn view(&self) -> NormalizedBoard<'_> {
        NormalizedBoard::new(&self.board, self.next_player)
    }

    /// The game before the last action, with that action.
    pub fn previous(&self) -> Option<(&Game, Action)> {
        self.previous.as_deref().map(|ply| (&ply.game, ply.action))
    }

    /// The parent game, if any.
    pub fn parent(&self) -> Option<&Game> {
        self.previous.as_deref().map(|ply| &ply.game)
    }

    /// Walks back through `(parent, action)` pairs, most recent first.
    pub fn history(&self) -> impl Iterator<Item = (&Game, Action)> + '_ {
        std::iter::successors(self.previous(), |&(game, _)| game.previous())
    }

    /// Every board from the current one back to the starting one.
    pub fn boards(&self) -> impl Iterator<Item = &Board> + '_ {
        std::iter::successors(Some(self), |&game| game.parent()).map(|game| &game.board)
    }

    /// Actions played since the starting position, in order.
    pub fn moves(&self) -> Vec<Action> {
        let mut moves: Vec<Action> = self.history().map(|(_, action)| action).collect();
        moves.reverse();
        moves
    }

    /// The game this one descends from.
    pub fn root(&self) -> &Game {
        let mut game = self;
        while let Some(parent) = game.parent() {
            game = parent;
        }
        game
    }

    /// Number of plies played since the starting position.
    pub fn ply_count(&self) -> usize {
        self.history().count()
    }

    /// Plies since the last pawn move or capture.
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Starts at 1 and increments after Black's move.
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        is_king_attacked(&self.board, self.next_player)
    }

    /// The square a pawn just skipped with a double step, if any.
    pub fn en_passant_target(&self) -> Option<Position> {
        let Some((_, action)) = self.previous() else {
            return self.origin.en_passant;
        };
        let moved = self.board.get(action.to())?;
        let delta = action.delta();
        if moved.rank != Rank::Pawn || delta.dx != 0 || delta.dy.abs() != 2 {
            return None;
        }
        Some(Position::new(action.from().x, action.from().y + delta.dy / 2))
    }

    /// The piece that has never left `home`, if `home` is a castling square.
    pub(crate) fn unmoved_at(&self, home: Position) -> Option<PieceIdentifier> {
        self.unmoved.at(home)
    }

    /// Castling rights granted by the starting position.
    pub(crate) fn origin_castling(&self) -> CastlingRights {
        self.origin.castling
    }

    /// Castling rights still available, as written in FEN.
    ///
    /// A right survives while it was granted at the start and neither the
    /// king nor that rook has left its home square.
    pub fn castling_rights(&self) -> CastlingRights {
        let mut rights = CastlingRights::NONE;
        for color in Color::ALL {
            if !stayed_home(self, king_home(color), color, Rank::King) {
                continue;
            }
            for side in CastlingSide::ALL {
                if self.origin.castling.has(color, side)
                    && stayed_home(self, side.rook_home(color), color, Rank::Rook)
                {
                    rights = rights.with(color, side);
                }
            }
        }
        rights
    }

    /// Legal actions with their effects for the piece on `from`.
    fn legal_candidates(&self, from: Position) -> Vec<Candidate> {
        let Some(piece) = self.board.get(from) else {
            return Vec::new();
        };
        if piece.color != self.next_player {
            return Vec::new();
        }
        StandardChess
            .actions(piece.rank, self, from)
            .into_iter()
            .filter(|(_, effect)| !is_king_attacked(&effect.apply(&self.board), self.next_player))
            .collect()
    }

    /// Legal actions for the piece on `from`.
    ///
    /// Empty for empty squares and for pieces of the side not to move.
    pub fn actions(&self, from: Position) -> impl Iterator<Item = Action> {
        self.legal_candidates(from)
            .into_iter()
            .map(|(action, _)| action)
    }

    /// Every legal action for the side to move.
    pub fn all_actions(&self) -> Vec<Action> {
        self.board
            .pieces_of(self.next_player)
            .flat_map(|(from, _)| self.actions(from))
            .collect()
    }

    /// Returns true if `action` is legal here.
    pub fn is_legal(&self, action: Action) -> bool {
        self.actions(action.from()).any(|a| a == action)
    }

    /// Plays `action`, or returns `None` if it is not legal.
    pub fn try_play(&self, action: Action) -> Option<Game> {
        let (_, effect) = self
            .legal_candidates(action.from())
            .into_iter()
            .find(|(candidate, _)| *candidate == action)?;
        let board = effect.apply(&self.board);
        Some(self.advance(action, board))
    }

    /// Plays `action`; an illegal action returns this game unchanged.
    pub fn play(&self, action: Action) -> Game {
        match self.try_play(action) {
            Some(next) => next,
            None => {
                debug!(%action, turn = %self.next_player, "rejected illegal action");
                self.clone()
            }
        }
    }

    fn advance(&self, action: Action, board: Board) -> Game {
        let moved_pawn = self
            .board
            .get(action.from())
            .is_some_and(|piece| piece.rank == Rank::Pawn);
        let captured = board.len() < self.board.len();
        let halfmove_clock = if moved_pawn || captured {
            0
        } else {
            self.halfmove_clock + 1
        };
        let fullmove_number = match self.next_player {
            Color::White => self.fullmove_number,
            Color::Black => self.fullmove_number + 1,
        };

        Game {
            unmoved: self.unmoved.after(&board),
            board,
            next_player: self.next_player.opposite(),
            previous: Some(Arc::new(Ply {
                game: self.clone(),
                action,
            })),
            origin: Arc::clone(&self.origin),
            halfmove_clock,
            fullmove_number,
            outcome: OnceLock::new(),
        }
    }

    /// Returns the outcome for the side to move, computed once.
    pub fn outcome(&self) -> Outcome {
        *self.outcome.get_or_init(|| {
            let stuck = self
                .board
                .pieces_of(self.next_player)
                .all(|(from, _)| self.legal_candidates(from).is_empty());
            let outcome = if !stuck {
                Outcome::Continue
            } else if self.is_check() {
                Outcome::Checkmate {
                    winner: self.next_player.opposite(),
                }
            } else {
                Outcome::Stalemate
            };
            trace!(?outcome, turn = %self.next_player, "computed outcome");
            outcome
        })
    }

    /// What happens next.
    pub fn next_step(&self) -> NextStep<'_> {
        match self.outcome() {
            Outcome::Continue => NextStep::MovePiece(MovePiece { game: self }),
            Outcome::Checkmate { winner } => NextStep::Checkmate { winner },
            Outcome::Stalemate => NextStep::Stalemate,
        }
    }

    /// Returns true once the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.outcome() != Outcome::Continue
    }

    /// The current position as a FEN setup.
    pub fn to_setup(&self) -> Setup {
        Setup {
            board: self.board.clone(),
            side_to_move: self.next_player,
            castling: self.castling_rights(),
            en_passant: self.en_passant_target(),
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
    }

    /// Returns the current position as a FEN string.
    pub fn to_fen(&self) -> String {
        self.to_setup().to_fen()
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("fen", &self.to_fen())
            .field("plies", &self.ply_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Delta;

    fn sq(s: &str) -> Position {
        Position::from_algebraic(s).unwrap()
    }

    fn mv(from: &str, to: &str) -> Action {
        Action::new(sq(from), sq(to))
    }

    #[test]
    fn new_game() {
        let game = Game::create();
        assert_eq!(game.ply_count(), 0);
        assert!(!game.is_game_over());
        assert!(!game.is_check());
        assert_eq!(game.all_actions().len(), 20);
        match game.next_step() {
            NextStep::MovePiece(step) => assert_eq!(step.turn(), Color::White),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn pawn_move_flips_turn() {
        let game = Game::create();
        let next = match game.next_step() {
            NextStep::MovePiece(step) => step.apply(mv("e2", "e4")),
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(next.next_player(), Color::Black);
        assert_eq!(next.ply_count(), 1);
        assert_eq!(next.previous().map(|(_, a)| a), Some(mv("e2", "e4")));
        assert_eq!(
            next.to_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
    }

    #[test]
    fn illegal_actions_leave_the_game_unchanged() {
        let game = Game::create();
        for action in [
            mv("e2", "e5"),
            mv("e4", "e5"),
            mv("e7", "e5"),
            mv("a1", "a3"),
        ] {
            let after = game.play(action);
            assert_eq!(after.board(), game.board());
            assert_eq!(after.next_player(), Color::White);
            assert_eq!(after.ply_count(), 0);
            assert!(game.try_play(action).is_none());
        }
    }

    #[test]
    fn previous_games_stay_valid() {
        let start = Game::create();
        let after = start.play(mv("g1", "f3"));
        assert_eq!(start.board().get(sq("g1")).map(|p| p.rank), Some(Rank::Knight));
        assert_eq!(after.board().get(sq("g1")), None);
        assert_eq!(after.parent().map(|g| g.board()), Some(start.board()));
        assert_eq!(after.boards().count(), 2);
    }

    #[test]
    fn checkmate_fools_mate() {
        let moves = [
            (sq("f2"), Delta::new(0, 1)),
            (sq("e7"), Delta::new(0, -2)),
            (sq("g2"), Delta::new(0, 2)),
            (sq("d8"), Delta::new(4, -4)),
        ];
        let game = moves.iter().fold(Game::create(), |game, (from, delta)| {
            game.play(Action::step(*from, *delta).unwrap())
        });
        assert_eq!(game.ply_count(), 4);
        assert!(game.is_check());
        assert!(matches!(
            game.next_step(),
            NextStep::Checkmate {
                winner: Color::Black
            }
        ));
        assert!(game.all_actions().is_empty());
    }

    #[test]
    fn two_rook_mate() {
        // The king escapes by taking the undefended b7 rook.
        let game = Game::from_fen("k7/1R6/8/8/8/8/8/R6K b - - 0 1").unwrap();
        assert_eq!(game.outcome(), Outcome::Continue);

        let game = Game::from_fen("k6R/7R/8/8/8/8/8/7K b - - 0 1").unwrap();
        assert_eq!(
            game.outcome(),
            Outcome::Checkmate {
                winner: Color::White
            }
        );
    }

    #[test]
    fn king_and_pawn_stalemate() {
        let game = Game::from_fen("7k/7P/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(!game.is_check());
        assert!(matches!(game.next_step(), NextStep::Stalemate));
    }

    #[test]
    fn stalemate_reached_by_play() {
        let game = Game::from_fen("7k/8/6KP/8/8/8/8/8 w - - 0 1").unwrap();
        let game = game.play(mv("h6", "h7"));
        assert_eq!(game.ply_count(), 1);
        assert_eq!(game.outcome(), Outcome::Stalemate);
    }

    #[test]
    fn cannot_leave_king_in_check() {
        // The e-file bishop is pinned against the king.
        let game = Game::from_fen("4r2k/8/8/8/8/8/4B3/4K3 w - - 0 1").unwrap();
        assert_eq!(game.actions(sq("e2")).count(), 0);
        let after = game.play(mv("e2", "d3"));
        assert_eq!(after.ply_count(), 0);
    }

    #[test]
    fn must_answer_check() {
        let game = Game::from_fen("4k3/8/8/8/8/8/3P4/r3K3 w - - 0 1").unwrap();
        assert!(game.is_check());
        assert!(game.actions(sq("d2")).next().is_none());
        let king: Vec<Action> = game.actions(sq("e1")).collect();
        assert!(king.iter().all(|a| a.to().y == 1));
    }

    #[test]
    fn opponent_pieces_have_no_actions() {
        let game = Game::create();
        assert_eq!(game.actions(sq("e7")).count(), 0);
        assert_eq!(game.actions(sq("e4")).count(), 0);
        assert_eq!(game.actions(Position::new(9, 9)).count(), 0);
    }

    #[test]
    fn en_passant_after_double_step() {
        let game = Game::create()
            .play(mv("e2", "e4"))
            .play(mv("a7", "a6"))
            .play(mv("e4", "e5"))
            .play(mv("d7", "d5"));
        assert_eq!(game.en_passant_target(), Some(sq("d6")));
        let captured = game.play(mv("e5", "d6"));
        assert_eq!(captured.ply_count(), 5);
        assert_eq!(captured.board().get(sq("d5")), None);
        assert_eq!(captured.halfmove_clock(), 0);

        // One ply later the chance is gone.
        let later = game.play(mv("h2", "h3")).play(mv("h7", "h6"));
        assert_eq!(later.en_passant_target(), None);
        assert!(!later.is_legal(mv("e5", "d6")));
    }

    #[test]
    fn en_passant_from_fen() {
        let game =
            Game::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3")
                .unwrap();
        assert!(game.is_legal(mv("e5", "f6")));
        assert!(!game.is_legal(mv("e5", "d6")));
    }

    #[test]
    fn promotion_keeps_identifier() {
        let game = Game::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let pawn = game.board().get(sq("a7")).unwrap();
        let actions: Vec<Action> = game.actions(sq("a7")).collect();
        assert_eq!(actions.len(), 4);
        let promoted = game.play(Action::promote(sq("a7"), sq("a8"), Rank::Queen));
        let queen = promoted.board().get(sq("a8")).unwrap();
        assert_eq!(queen.rank, Rank::Queen);
        assert_eq!(queen.id, pawn.id);
        // A bare move onto the last rank is not a legal action.
        assert_eq!(game.play(mv("a7", "a8")).ply_count(), 0);
    }

    #[test]
    fn counters_follow_play() {
        let game = Game::create()
            .play(mv("g1", "f3"))
            .play(mv("g8", "f6"))
            .play(mv("f3", "g1"));
        assert_eq!(game.halfmove_clock(), 3);
        assert_eq!(game.fullmove_number(), 2);
        assert_eq!(game.moves(), vec![mv("g1", "f3"), mv("g8", "f6"), mv("f3", "g1")]);
        assert_eq!(game.root().ply_count(), 0);
    }

    #[test]
    fn castling_rights_track_moved_pieces() {
        let game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        assert_eq!(game.castling_rights(), CastlingRights::ALL);
        let game = game.play(mv("h1", "h2")).play(mv("a8", "a7"));
        assert_eq!(game.castling_rights().to_fen(), "Qk");
        // Moving back does not restore the right.
        let game = game.play(mv("h2", "h1"));
        assert_eq!(game.castling_rights().to_fen(), "Qk");
    }

    #[test]
    fn fen_roundtrip_through_game() {
        for fen in [
            Setup::STARTPOS,
            "r3k2r/8/8/8/8/8/8/R3K2R w Kq - 3 20",
            "7k/8/6KP/8/8/8/8/8 w - - 0 1",
        ] {
            assert_eq!(Game::from_fen(fen).unwrap().to_fen(), fen);
        }
    }

    const KNIGHT_SHUFFLE: &str = "1n2k3/8/8/8/8/8/8/1N2K3 w - - 0 1";

    fn shuffle(game: &Game, plies: usize) -> Game {
        let cycle = [mv("b1", "c3"), mv("b8", "c6"), mv("c3", "b1"), mv("c6", "b8")];
        let mut game = game.clone();
        for ply in 0..plies {
            game = game.play(cycle[ply % cycle.len()]);
        }
        game
    }

    #[test]
    fn long_history_drops_on_a_small_stack() {
        let game = shuffle(&Game::from_fen(KNIGHT_SHUFFLE).unwrap(), 100_000);
        assert_eq!(game.ply_count(), 100_000);
        std::thread::Builder::new()
            .stack_size(2 << 20)
            .spawn(move || drop(game))
            .unwrap()
            .join()
            .unwrap();
    }

    #[test]
    fn dropping_a_branch_keeps_the_shared_history() {
        let trunk = shuffle(&Game::from_fen(KNIGHT_SHUFFLE).unwrap(), 8);
        let branch = shuffle(&trunk, 4);
        drop(branch);
        assert_eq!(trunk.ply_count(), 8);
        assert_eq!(trunk.boards().count(), 9);
        assert_eq!(trunk.root().to_fen(), KNIGHT_SHUFFLE);
    }

    #[test]
    fn rights_follow_identity_not_occupancy() {
        // The a1 rook is captured and the a3 rook recaptures onto a1: a white
        // rook is home again, but not the original one.
        let game = Game::from_fen("4k3/8/8/8/8/R7/1b6/R3K3 b Q - 0 1").unwrap();
        assert_eq!(game.castling_rights().to_fen(), "Q");
        let game = game
            .play(mv("b2", "a1"))
            .play(mv("a3", "a1"))
            .play(mv("e8", "e7"));
        assert_eq!(game.ply_count(), 3);
        assert_eq!(game.castling_rights(), CastlingRights::NONE);
        assert!(!game.is_legal(mv("e1", "c1")));
    }
}
