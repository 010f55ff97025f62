//! Standard chess rules implementation.

use super::castling::castling_actions;
use super::pawn::{pawn_actions, pawn_attacks};
use super::sliding::{ray_actions, ray_attacks};
use super::stepping::{step_actions, step_attacks};
use super::{Candidate, RuleSet};
use crate::{Game, NormalizedBoard};
use chess_core::{Delta, Position, Rank, Setup};

const QUEEN_DIRECTIONS: [Delta; 8] = Delta::KING;

/// Standard chess rules (FIDE movement).
///
/// - Sliding bishops, rooks and queens
/// - Knight jumps and king steps
/// - Pawn single and double pushes, captures, en passant and promotion
/// - Castling on both sides
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardChess;

impl RuleSet for StandardChess {
    fn initial_setup(&self) -> Setup {
        Setup::standard()
    }

    fn attacks(&self, rank: Rank, view: &NormalizedBoard<'_>, from: Position) -> Vec<Position> {
        match rank {
            Rank::Pawn => pawn_attacks(view, from),
            Rank::Knight => step_attacks(from, &Delta::KNIGHT),
            Rank::Bishop => ray_attacks(view, from, &Delta::DIAGONAL),
            Rank::Rook => ray_attacks(view, from, &Delta::ORTHOGONAL),
            Rank::Queen => ray_attacks(view, from, &QUEEN_DIRECTIONS),
            Rank::King => step_attacks(from, &Delta::KING),
        }
    }

    fn actions(&self, rank: Rank, game: &Game, from: Position) -> Vec<Candidate> {
        let view = game.view();
        match rank {
            Rank::Pawn => pawn_actions(&view, from, game.en_passant_target()),
            Rank::Knight => step_actions(&view, from, &Delta::KNIGHT),
            Rank::Bishop => ray_actions(&view, from, &Delta::DIAGONAL),
            Rank::Rook => ray_actions(&view, from, &Delta::ORTHOGONAL),
            Rank::Queen => ray_actions(&view, from, &QUEEN_DIRECTIONS),
            Rank::King => {
                let mut candidates = step_actions(&view, from, &Delta::KING);
                candidates.extend(castling_actions(game, from));
                candidates
            }
        }
    }
}
