//! Step-tree perft.
//!
//! Counts the positions reached by exactly `depth` legal steps within the
//! current turn, using the same apply/undo backtracking as move generation.
//! The turn is never completed, so `depth` is capped at the steps left.

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_step_apply::{apply_step_request, undo_step};
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError};
use crate::move_generation::step_generator::generate_steps;
use crate::move_generation::turn_control::can_complete_move;
use crate::utils::step_notation::StepRequest;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    /// Leaves whose final step triggered at least one trap capture.
    pub captures: usize,
    /// Leaves whose final step pushed an opponent piece.
    pub pushes: usize,
    /// Leaves at which the turn could be committed.
    pub completable: usize,
}

pub fn perft_steps(game_state: &GameState, depth: u8) -> MoveGenResult<PerftCounts> {
    let mut scratch = game_state.clone();
    scratch.redo_stack.clear();

    let depth = depth.min(scratch.steps_left);
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut counts = PerftCounts::default();
    perft_recurse(&mut scratch, depth, &mut counts)?;
    Ok(counts)
}

fn perft_recurse(game_state: &mut GameState, depth: u8, counts: &mut PerftCounts) -> MoveGenResult<()> {
    for step in generate_steps(game_state) {
        let outcome = apply_step_request(
            game_state,
            StepRequest {
                piece: step.piece,
                from: step.from,
                direction: step.direction,
            },
        )
        .map_err(|e| MoveGenerationError::InvalidState(format!("perft step {step} failed: {e}")))?;

        if depth == 1 {
            counts.nodes += 1;
            if !outcome.captures.is_empty() {
                counts.captures += 1;
            }
            if outcome.step.is_some_and(|applied| applied.is_push) {
                counts.pushes += 1;
            }
            if can_complete_move(game_state).is_ok() {
                counts.completable += 1;
            }
        } else {
            perft_recurse(game_state, depth - 1, counts)?;
        }

        undo_step(game_state);
    }
    Ok(())
}
