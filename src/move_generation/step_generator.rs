//! Single-step generation.
//!
//! Enumerates every step the side to move may take next, square by square
//! in a1..h8 order and N, S, E, W within a square. The flags on generated
//! steps match what the step engine records when the step is applied.

use crate::game_state::arimaa_types::{Direction, Piece, PieceKind, Square, MOVEMENT_DIRECTIONS};
use crate::game_state::game_state::GameState;
use crate::game_state::step::Step;
use crate::move_generation::legal_step_checks::{can_be_pulled, can_be_pushed, is_frozen};

pub fn generate_steps(game_state: &GameState) -> Vec<Step> {
    let mut steps = Vec::with_capacity(64);
    if game_state.steps_left == 0 || game_state.in_setup() || game_state.is_game_over() {
        return steps;
    }
    for square in Square::all() {
        generate_steps_for_square(game_state, square, &mut steps);
    }
    steps
}

/// Steps starting from `square`, appended to `out`.
pub fn generate_steps_for_square(game_state: &GameState, square: Square, out: &mut Vec<Step>) {
    let board = &game_state.board;
    let Some(piece) = board.piece_at(square) else {
        return;
    };
    if game_state.steps_left == 0 {
        return;
    }
    let side = game_state.side_to_move;

    if let Some(pending) = game_state.pending_push() {
        if piece.color == side
            && piece.is_stronger_than(pending.piece)
            && board.is_empty_square(pending.from)
            && !is_frozen(board, square)
        {
            if let Some(direction) = square.direction_to(pending.from) {
                out.push(Step {
                    piece,
                    from: square,
                    direction,
                    to: pending.from,
                    is_push: false,
                    completes_push: true,
                });
            }
        }
        return;
    }

    if piece.color == side {
        if is_frozen(board, square) {
            return;
        }
        for direction in MOVEMENT_DIRECTIONS {
            if piece.kind == PieceKind::Rabbit && direction == Direction::rabbit_backward(side) {
                continue;
            }
            if let Some(to) = empty_target(game_state, square, direction) {
                out.push(plain_step(piece, square, direction, to));
            }
        }
        return;
    }

    let pull_target = game_state
        .last_player_step()
        .map(|previous| previous.from)
        .filter(|_| can_be_pulled(game_state, square));

    if game_state.steps_left >= 2 && can_be_pushed(game_state, square) {
        for direction in MOVEMENT_DIRECTIONS {
            if let Some(to) = empty_target(game_state, square, direction) {
                out.push(Step {
                    is_push: pull_target != Some(to),
                    ..plain_step(piece, square, direction, to)
                });
            }
        }
    } else if let Some(to) = pull_target {
        if board.is_empty_square(to) {
            if let Some(direction) = square.direction_to(to) {
                out.push(plain_step(piece, square, direction, to));
            }
        }
    }
}

fn empty_target(game_state: &GameState, square: Square, direction: Direction) -> Option<Square> {
    square
        .offset(direction)
        .filter(|to| game_state.board.is_empty_square(*to))
}

fn plain_step(piece: Piece, from: Square, direction: Direction, to: Square) -> Step {
    Step {
        piece,
        from,
        direction,
        to,
        is_push: false,
        completes_push: false,
    }
}
