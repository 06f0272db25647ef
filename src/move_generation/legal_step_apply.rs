//! Step engine: validate, apply, undo and redo single steps.
//!
//! Applying a step moves one piece, resolves trap captures (appending
//! capture steps to the ongoing move) and spends one step of the turn
//! budget. Undo removes the last player step together with the captures it
//! caused and parks it on the redo stack.

use tracing::debug;

use crate::errors::ArimaaError;
use crate::game_state::arimaa_types::{Direction, PieceKind};
use crate::game_state::game_state::GameState;
use crate::game_state::step::{Step, StepOutcome};
use crate::move_generation::legal_step_checks::{
    can_be_pulled, can_be_pushed, is_frozen, unsupported_trap_pieces,
};
use crate::utils::step_notation::{parse_move, parse_step, StepRequest};

/// Apply a step given in notation (`Ed4n`).
pub fn apply_step(game_state: &mut GameState, step: &str) -> Result<StepOutcome, ArimaaError> {
    let request = parse_step(step)?;
    apply_step_request(game_state, request)
}

pub fn apply_step_request(
    game_state: &mut GameState,
    request: StepRequest,
) -> Result<StepOutcome, ArimaaError> {
    // Capture tokens are engine output; resubmitting one changes nothing.
    if request.direction == Direction::Capture {
        return Ok(StepOutcome {
            steps_left: game_state.steps_left,
            step: None,
            captures: Vec::new(),
        });
    }

    ensure_stepping_allowed(game_state)?;
    let step = validate_step(game_state, request)?;
    Ok(commit_step(game_state, step))
}

/// Apply every step of a move string in order. Notation errors are reported
/// before anything moves; a rule violation stops at the offending step and
/// leaves the earlier steps applied.
pub fn apply_move_string(
    game_state: &mut GameState,
    move_string: &str,
) -> Result<Vec<StepOutcome>, ArimaaError> {
    let requests = parse_move(move_string)?;
    let mut outcomes = Vec::with_capacity(requests.len());
    for request in requests {
        outcomes.push(apply_step_request(game_state, request)?);
    }
    Ok(outcomes)
}

/// Take back the last player step and any captures it caused.
/// Returns `None` when no step has been made this turn.
pub fn undo_step(game_state: &mut GameState) -> Option<Step> {
    let mut last = game_state.ongoing_move.pop()?;
    while last.is_capture() {
        game_state.board.restore(last.from, last.piece);
        last = game_state.ongoing_move.pop()?;
    }

    game_state.board.remove(last.to);
    game_state.board.restore(last.from, last.piece);
    game_state.steps_left += 1;
    game_state.redo_stack.push(last);

    debug!(step = %last, steps_left = game_state.steps_left, "undid step");
    Some(last)
}

/// Replay the most recently undone step. `Ok(None)` when nothing is parked.
pub fn redo_step(game_state: &mut GameState) -> Result<Option<StepOutcome>, ArimaaError> {
    let Some(top) = game_state.redo_stack.last().copied() else {
        return Ok(None);
    };
    apply_step(game_state, &top.to_string()).map(Some)
}

fn ensure_stepping_allowed(game_state: &GameState) -> Result<(), ArimaaError> {
    if game_state.is_game_over() {
        return Err(ArimaaError::StateError("Game is over".to_owned()));
    }
    if game_state.in_setup() {
        return Err(ArimaaError::StateError(
            "Setup must be completed before moving".to_owned(),
        ));
    }
    Ok(())
}

fn validate_step(game_state: &GameState, request: StepRequest) -> Result<Step, ArimaaError> {
    let StepRequest {
        piece,
        from,
        direction,
    } = request;
    let board = &game_state.board;
    let side = game_state.side_to_move;

    if game_state.steps_left == 0 {
        return Err(ArimaaError::IllegalStep("No steps left".to_owned()));
    }
    if board.piece_at(from) != Some(piece) {
        return Err(ArimaaError::IllegalStep(format!("No {piece} on {from}")));
    }
    let to = from
        .offset(direction)
        .ok_or_else(|| ArimaaError::IllegalStep(format!("{piece}{from} cannot leave the board")))?;

    if piece.color == side
        && piece.kind == PieceKind::Rabbit
        && direction == Direction::rabbit_backward(piece.color)
    {
        return Err(ArimaaError::IllegalStep(
            "Rabbits cannot move backward".to_owned(),
        ));
    }

    let plain = Step {
        piece,
        from,
        direction,
        to,
        is_push: false,
        completes_push: false,
    };

    if let Some(pending) = game_state.pending_push() {
        let completes = piece.color == side
            && to == pending.from
            && piece.is_stronger_than(pending.piece)
            && !is_frozen(board, from);
        if !completes || !board.is_empty_square(to) {
            return Err(ArimaaError::IllegalStep(format!(
                "Push of {} must be completed into {}",
                pending.piece, pending.from
            )));
        }
        return Ok(Step {
            completes_push: true,
            ..plain
        });
    }

    if !board.is_empty_square(to) {
        return Err(ArimaaError::IllegalStep(format!("{to} is occupied")));
    }

    if piece.color == side {
        if is_frozen(board, from) {
            return Err(ArimaaError::IllegalStep(format!("{piece} on {from} is frozen")));
        }
        return Ok(plain);
    }

    let pull_target = game_state.last_player_step().map(|previous| previous.from);
    if pull_target == Some(to) && can_be_pulled(game_state, from) {
        return Ok(plain);
    }

    if can_be_pushed(game_state, from) {
        if game_state.steps_left < 2 {
            return Err(ArimaaError::IllegalStep(
                "Not enough steps left to push".to_owned(),
            ));
        }
        return Ok(Step {
            is_push: true,
            ..plain
        });
    }

    Err(ArimaaError::IllegalStep(format!(
        "{piece} on {from} can't be pushed or pulled"
    )))
}

fn commit_step(game_state: &mut GameState, step: Step) -> StepOutcome {
    game_state.board.remove(step.from);
    game_state.board.restore(step.to, step.piece);
    game_state.ongoing_move.push(step);

    let mut captures = Vec::new();
    for (trap, piece) in unsupported_trap_pieces(&game_state.board) {
        game_state.board.remove(trap);
        let capture = Step::capture(piece, trap);
        game_state.ongoing_move.push(capture);
        captures.push(capture);
        debug!(capture = %capture, "trap capture");
    }

    game_state.steps_left -= 1;

    match game_state.redo_stack.last() {
        Some(top) if top.same_action(&step) => {
            game_state.redo_stack.pop();
        }
        Some(_) => game_state.redo_stack.clear(),
        None => {}
    }

    debug!(
        step = %step,
        push = step.is_push,
        steps_left = game_state.steps_left,
        "applied step"
    );

    StepOutcome {
        steps_left: game_state.steps_left,
        step: Some(step),
        captures,
    }
}
