//! Game-end detection after a committed turn.
//!
//! Checked in order: goal, elimination, immobilization. The side that just
//! moved is the opposite of `side_to_move`. When both sides reach goal (or
//! both lose their last rabbit) in the same turn, the mover wins; this
//! follows the official rule rather than checking the opponent's goal first.
//! Nothing is decided while the setup turns are still pending.

use serde::{Deserialize, Serialize};

use crate::game_state::arimaa_rules::goal_rank;
use crate::game_state::arimaa_types::{Color, PieceKind};
use crate::game_state::board::Board;
use crate::game_state::game_state::GameState;
use crate::move_generation::step_generator::generate_steps;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VictoryReason {
    Goal,
    Elimination,
    Immobilization,
}

impl VictoryReason {
    /// One-letter result code: `g`, `e` or `m`.
    pub const fn code(self) -> char {
        match self {
            VictoryReason::Goal => 'g',
            VictoryReason::Elimination => 'e',
            VictoryReason::Immobilization => 'm',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Victory {
    pub winner: Color,
    pub reason: VictoryReason,
}

impl Victory {
    /// `1` if `color` won, `-1` if it lost.
    pub fn result_for(&self, color: Color) -> i8 {
        if self.winner == color {
            1
        } else {
            -1
        }
    }
}

pub fn rabbit_at_goal(board: &Board, color: Color) -> bool {
    let rank = goal_rank(color);
    board
        .occupied()
        .any(|(square, piece)| {
            piece.color == color && piece.kind == PieceKind::Rabbit && square.rank() == rank
        })
}

#[inline]
pub fn has_rabbits(board: &Board, color: Color) -> bool {
    board.count(color, PieceKind::Rabbit) > 0
}

/// Evaluate the position at the start of `side_to_move`'s turn.
pub fn evaluate_victory(game_state: &GameState) -> Option<Victory> {
    if game_state.in_setup() {
        return None;
    }
    let board = &game_state.board;
    let opponent = game_state.side_to_move;
    let mover = opponent.opposite();

    if rabbit_at_goal(board, mover) {
        return Some(Victory {
            winner: mover,
            reason: VictoryReason::Goal,
        });
    }
    if rabbit_at_goal(board, opponent) {
        return Some(Victory {
            winner: opponent,
            reason: VictoryReason::Goal,
        });
    }

    if !has_rabbits(board, opponent) {
        return Some(Victory {
            winner: mover,
            reason: VictoryReason::Elimination,
        });
    }
    if !has_rabbits(board, mover) {
        return Some(Victory {
            winner: opponent,
            reason: VictoryReason::Elimination,
        });
    }

    if generate_steps(game_state).is_empty() {
        return Some(Victory {
            winner: mover,
            reason: VictoryReason::Immobilization,
        });
    }

    None
}

/// `(result, reason)` from the perspective of the side that just moved:
/// `1` won, `-1` lost, `0` undecided.
pub fn result_for_last_mover(game_state: &GameState) -> (i8, Option<VictoryReason>) {
    match game_state.outcome.or_else(|| evaluate_victory(game_state)) {
        Some(victory) => (
            victory.result_for(game_state.side_to_move.opposite()),
            Some(victory.reason),
        ),
        None => (0, None),
    }
}
