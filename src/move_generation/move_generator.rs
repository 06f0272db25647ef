//! Whole-move generation.
//!
//! A move is every step sequence of up to `steps_left` steps after which the
//! turn may be completed. The search applies each legal step to a scratch
//! copy of the game, records the sequence when it is completable, recurses,
//! and undoes the step before trying the next sibling.

use thiserror::Error;
use tracing::{instrument, trace};

use crate::game_state::board::Board;
use crate::game_state::game_state::GameState;
use crate::game_state::step::Step;
use crate::move_generation::legal_step_apply::{apply_step_request, undo_step};
use crate::move_generation::step_generator::generate_steps;
use crate::move_generation::turn_control::can_complete_move;
use crate::utils::step_notation::StepRequest;

pub type MoveGenResult<T> = Result<T, MoveGenerationError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveGenerationError {
    #[error("move search exceeded the node limit of {0}")]
    NodeLimitExceeded(usize),
    #[error("invalid game state: {0}")]
    InvalidState(String),
}

/// Caller-imposed bounds on the backtracking search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveSearchLimits {
    /// Deepest step count explored; never more than the steps left.
    pub max_depth: Option<u8>,
    /// Steps applied before the search gives up.
    pub max_nodes: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMove {
    /// Steps in play order, trap captures included.
    pub steps: Vec<Step>,
    pub position_after: Board,
}

impl GeneratedMove {
    pub fn notation(&self) -> String {
        self.steps
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub trait MoveGenerator: Send + Sync {
    fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<GeneratedMove>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LegalMoveGenerator {
    pub limits: MoveSearchLimits,
}

impl LegalMoveGenerator {
    pub fn new(limits: MoveSearchLimits) -> Self {
        Self { limits }
    }
}

impl MoveGenerator for LegalMoveGenerator {
    #[instrument(level = "trace", skip_all, fields(side = %game_state.side_to_move))]
    fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<GeneratedMove>> {
        if game_state.in_setup() {
            return Err(MoveGenerationError::InvalidState(
                "setup is not finished".to_owned(),
            ));
        }
        if game_state.is_game_over() {
            return Err(MoveGenerationError::InvalidState(
                "game is over".to_owned(),
            ));
        }

        let mut scratch = game_state.clone();
        scratch.redo_stack.clear();

        let depth = match self.limits.max_depth {
            Some(max_depth) => max_depth.min(scratch.steps_left),
            None => scratch.steps_left,
        };

        let mut search = MoveSearch {
            limits: self.limits,
            nodes: 0,
            found: Vec::new(),
        };
        search.recurse(&mut scratch, depth)?;

        trace!(
            nodes = search.nodes,
            moves = search.found.len(),
            depth,
            "generated moves"
        );
        Ok(search.found)
    }
}

struct MoveSearch {
    limits: MoveSearchLimits,
    nodes: usize,
    found: Vec<GeneratedMove>,
}

impl MoveSearch {
    fn recurse(&mut self, game_state: &mut GameState, depth: u8) -> MoveGenResult<()> {
        if depth == 0 {
            return Ok(());
        }

        for step in generate_steps(game_state) {
            self.nodes += 1;
            if let Some(max_nodes) = self.limits.max_nodes {
                if self.nodes > max_nodes {
                    return Err(MoveGenerationError::NodeLimitExceeded(max_nodes));
                }
            }

            apply_step_request(
                game_state,
                StepRequest {
                    piece: step.piece,
                    from: step.from,
                    direction: step.direction,
                },
            )
            .map_err(|e| {
                MoveGenerationError::InvalidState(format!("generated step {step} failed: {e}"))
            })?;

            if can_complete_move(game_state).is_ok() {
                self.found.push(GeneratedMove {
                    steps: game_state.ongoing_move.clone(),
                    position_after: game_state.board,
                });
            }

            self.recurse(game_state, depth - 1)?;
            undo_step(game_state);
        }
        Ok(())
    }
}

/// Every completable move from the current position, without limits.
pub fn generate_moves(game_state: &GameState) -> MoveGenResult<Vec<GeneratedMove>> {
    LegalMoveGenerator::default().generate_legal_moves(game_state)
}
