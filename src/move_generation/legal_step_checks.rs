//! Freeze, push, pull and trap-support predicates.
//!
//! All of these read the current board (plus the side to move and the last
//! player step) and are recomputed on every call; the board changes between
//! steps, so nothing is cached.

use crate::game_state::arimaa_rules::TRAP_SQUARES;
use crate::game_state::arimaa_types::{Color, Piece, Square};
use crate::game_state::board::Board;
use crate::game_state::game_state::GameState;

#[inline]
pub fn has_friendly_neighbor(board: &Board, square: Square, color: Color) -> bool {
    square
        .neighbors()
        .any(|neighbor| board.owner_of(neighbor) == Some(color))
}

/// A piece is frozen when a strictly stronger enemy touches it and no
/// friendly piece does. Empty squares are never frozen.
pub fn is_frozen(board: &Board, square: Square) -> bool {
    let Some(piece) = board.piece_at(square) else {
        return false;
    };

    let mut stronger_enemy = false;
    for neighbor in square.neighbors() {
        let Some(other) = board.piece_at(neighbor) else {
            continue;
        };
        if other.color == piece.color {
            return false;
        }
        if other.is_stronger_than(piece) {
            stronger_enemy = true;
        }
    }

    stronger_enemy
}

/// The opponent piece on `square` has a strictly stronger, unfrozen
/// neighbour belonging to the side to move.
pub fn can_be_pushed(game_state: &GameState, square: Square) -> bool {
    let Some(target) = game_state.board.piece_at(square) else {
        return false;
    };
    if target.color == game_state.side_to_move {
        return false;
    }

    square
        .neighbors()
        .any(|neighbor| is_push_attacker(&game_state.board, neighbor, target))
}

fn is_push_attacker(board: &Board, square: Square, target: Piece) -> bool {
    match board.piece_at(square) {
        Some(attacker) => {
            attacker.color != target.color
                && attacker.is_stronger_than(target)
                && !is_frozen(board, square)
        }
        None => false,
    }
}

/// The opponent piece on `square` may follow the previous step into the
/// square it vacated.
///
/// Requires a previous own-piece step that did not just complete a push,
/// whose origin touches `square`, made by a strictly stronger piece.
pub fn can_be_pulled(game_state: &GameState, square: Square) -> bool {
    let Some(target) = game_state.board.piece_at(square) else {
        return false;
    };
    if target.color == game_state.side_to_move {
        return false;
    }

    let Some(previous) = game_state.last_player_step() else {
        return false;
    };
    if previous.completes_push || previous.is_push {
        return false;
    }
    if previous.piece.color != game_state.side_to_move {
        return false;
    }
    if !previous.from.is_adjacent(square) {
        return false;
    }

    previous.piece.is_stronger_than(target)
}

/// Trap occupants left without a same-color neighbour, in trap order.
pub fn unsupported_trap_pieces(board: &Board) -> Vec<(Square, Piece)> {
    TRAP_SQUARES
        .iter()
        .filter_map(|trap| {
            let piece = board.piece_at(*trap)?;
            (!has_friendly_neighbor(board, *trap, piece.color)).then_some((*trap, piece))
        })
        .collect()
}
