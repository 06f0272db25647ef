//! Turn controller: completion legality, committing turns, and setup.

use std::mem;

use tracing::{info, instrument};

use crate::errors::{ArimaaError, TurnBlocker};
use crate::game_state::arimaa_rules::STEPS_PER_TURN;
use crate::game_state::game_state::GameState;
use crate::game_state::step::{TurnKind, TurnRecord};
use crate::move_generation::legal_step_apply::apply_step_request;
use crate::move_generation::move_generator::GeneratedMove;
use crate::move_generation::victory_checks::{evaluate_victory, Victory};
use crate::utils::step_notation::{parse_setup, StepRequest};

/// A committed turn and the game result it produced, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCompletion {
    pub turn: TurnRecord,
    pub victory: Option<Victory>,
}

/// Check whether the ongoing move may be committed.
///
/// Blockers are reported in a fixed order: no steps, unchanged position,
/// dangling push, then a third occurrence of the position. Only the side
/// producing the repeated position is refused.
pub fn can_complete_move(game_state: &GameState) -> Result<(), ArimaaError> {
    if game_state.is_game_over() {
        return Err(ArimaaError::StateError("Game is over".to_owned()));
    }
    if game_state.in_setup() {
        return Err(ArimaaError::StateError(
            "Setup must be completed before moving".to_owned(),
        ));
    }
    if game_state.ongoing_move.is_empty() {
        return Err(TurnBlocker::NoSteps.into());
    }
    if game_state.position_history.last() == Some(&game_state.board) {
        return Err(TurnBlocker::PositionUnchanged.into());
    }
    if game_state.pending_push().is_some() {
        return Err(TurnBlocker::IncompletePush.into());
    }
    let occurrences = game_state
        .position_history
        .iter()
        .filter(|snapshot| **snapshot == game_state.board)
        .count();
    if occurrences >= 2 {
        return Err(TurnBlocker::ThreefoldRepetition.into());
    }
    Ok(())
}

/// Commit the ongoing move, hand the turn over and evaluate the result.
pub fn complete_move(game_state: &mut GameState) -> Result<MoveCompletion, ArimaaError> {
    can_complete_move(game_state)?;

    let turn = TurnRecord {
        halfmove: game_state.halfmove_number,
        color: game_state.side_to_move,
        kind: TurnKind::Steps(mem::take(&mut game_state.ongoing_move)),
    };
    commit_turn(game_state, turn.clone());

    let victory = evaluate_victory(game_state);
    game_state.outcome = victory;

    info!(
        turn = %turn.label(),
        moves = %turn.notation(),
        position = %game_state.get_position(),
        "committed turn"
    );
    if let Some(victory) = victory {
        info!(winner = %victory.winner, reason = ?victory.reason, "game over");
    }

    Ok(MoveCompletion { turn, victory })
}

/// Place one side's pieces during the two opening half-moves.
///
/// Placements skip the movement rules, but a rejected list (wrong color,
/// occupied or repeated square) leaves the game untouched.
#[instrument(level = "debug", skip(game_state), fields(side = %game_state.side_to_move))]
pub fn setup(game_state: &mut GameState, setup_string: &str) -> Result<TurnRecord, ArimaaError> {
    if !game_state.in_setup() {
        return Err(ArimaaError::StateError(
            "Setup not possible after the first move".to_owned(),
        ));
    }

    let placements = parse_setup(setup_string)?;
    let mut board = game_state.board;
    for placement in &placements {
        if placement.piece.color != game_state.side_to_move {
            return Err(ArimaaError::InvalidInput(format!(
                "{placement} does not belong to {}",
                game_state.side_to_move
            )));
        }
        board.place(placement.square, placement.piece)?;
    }
    game_state.board = board;

    let turn = TurnRecord {
        halfmove: game_state.halfmove_number,
        color: game_state.side_to_move,
        kind: TurnKind::Setup(placements),
    };
    commit_turn(game_state, turn.clone());

    info!(turn = %turn.label(), pieces = %turn.notation(), "committed setup");
    Ok(turn)
}

/// Play the rest of a generated move and commit it. The move must extend
/// whatever has already been stepped this turn.
pub fn play_generated_move(
    game_state: &mut GameState,
    generated: &GeneratedMove,
) -> Result<MoveCompletion, ArimaaError> {
    let played = game_state.ongoing_move.len();
    if generated.steps.get(..played) != Some(game_state.ongoing_move.as_slice()) {
        return Err(ArimaaError::StateError(
            "Generated move does not extend the ongoing move".to_owned(),
        ));
    }
    for step in generated.steps[played..].iter().filter(|step| !step.is_capture()) {
        apply_step_request(
            game_state,
            StepRequest {
                piece: step.piece,
                from: step.from,
                direction: step.direction,
            },
        )?;
    }
    complete_move(game_state)
}

fn commit_turn(game_state: &mut GameState, turn: TurnRecord) {
    game_state.position_history.push(game_state.board);
    game_state.side_to_move = game_state.side_to_move.opposite();
    game_state.steps_left = STEPS_PER_TURN;
    game_state.move_history.push(turn);
    game_state.ongoing_move.clear();
    game_state.redo_stack.clear();
    game_state.halfmove_number += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::arimaa_rules::{EMPTY_POSITION, STANDARD_GOLD_SETUP, STANDARD_SILVER_SETUP};
    use crate::game_state::arimaa_types::Color;
    use crate::move_generation::legal_step_apply::{apply_move_string, apply_step, undo_step};

    fn game(position: &str) -> GameState {
        GameState::from_position(position).expect("test position should parse")
    }

    #[test]
    fn completion_blockers_in_priority_order() {
        let mut game = game("r7/8/8/8/8/8/3r4/R2M4");
        assert_eq!(
            can_complete_move(&game),
            Err(ArimaaError::IncompleteTurn(TurnBlocker::NoSteps))
        );

        apply_move_string(&mut game, "Ra1e Rb1w").expect("there and back");
        assert_eq!(
            can_complete_move(&game),
            Err(ArimaaError::IncompleteTurn(TurnBlocker::PositionUnchanged))
        );

        apply_step(&mut game, "rd2e").expect("camel pushes the rabbit");
        assert_eq!(
            can_complete_move(&game),
            Err(ArimaaError::IncompleteTurn(TurnBlocker::IncompletePush))
        );

        apply_step(&mut game, "Md1n").expect("camel follows");
        assert_eq!(can_complete_move(&game), Ok(()));
    }

    #[test]
    fn complete_move_hands_over_the_turn() {
        let mut game = game("r7/8/8/8/8/8/8/R7");
        apply_step(&mut game, "Ra1n").expect("step");
        let completion = complete_move(&mut game).expect("move completes");

        assert_eq!(completion.turn.notation(), "Ra1n");
        assert_eq!(completion.turn.label(), "2g");
        assert_eq!(completion.victory, None);
        assert_eq!(game.side_to_move, Color::Silver);
        assert_eq!(game.steps_left, 4);
        assert_eq!(game.halfmove_number, 3);
        assert_eq!(game.position_history.len(), 2);
        assert_eq!(game.move_history.len(), 1);
        assert!(game.ongoing_move.is_empty());
        assert!(game.redo_stack.is_empty());
    }

    #[test]
    fn third_occurrence_is_refused_for_the_mover() {
        let mut game = game("r7/8/8/8/8/8/8/R7");
        // gold shuffles east/west, silver shuffles east/west
        for moves in ["Ra1e", "ra8e", "Rb1w", "rb8w", "Ra1e", "ra8e", "Rb1w"] {
            apply_move_string(&mut game, moves).expect("shuffle step");
            complete_move(&mut game).expect("shuffle completes");
        }
        // the start position is now on record twice
        apply_step(&mut game, "rb8w").expect("silver steps back");
        assert_eq!(
            can_complete_move(&game),
            Err(ArimaaError::IncompleteTurn(TurnBlocker::ThreefoldRepetition))
        );

        undo_step(&mut game).expect("undo");
        apply_step(&mut game, "rb8s").expect("different step");
        assert_eq!(can_complete_move(&game), Ok(()));
    }

    #[test]
    fn setup_turns_then_refusal() {
        let mut game = GameState::new_empty();
        let gold = setup(&mut game, STANDARD_GOLD_SETUP).expect("gold setup");
        assert_eq!(gold.label(), "1g");
        assert_eq!(game.side_to_move, Color::Silver);
        assert_eq!(game.halfmove_number, 1);

        setup(&mut game, STANDARD_SILVER_SETUP).expect("silver setup");
        assert_eq!(game.side_to_move, Color::Gold);
        assert_eq!(game.halfmove_number, 2);
        assert_eq!(game.position_history.len(), 2);

        let err = setup(&mut game, "Ra3").expect_err("setup is over");
        assert_eq!(
            err,
            ArimaaError::StateError("Setup not possible after the first move".to_owned())
        );
    }

    #[test]
    fn rejected_setup_leaves_state_intact() {
        let mut game = GameState::new_empty();
        assert!(matches!(
            setup(&mut game, "Ra1 ra2"),
            Err(ArimaaError::InvalidInput(_))
        ));
        assert!(matches!(
            setup(&mut game, "Ra1 Ca1"),
            Err(ArimaaError::InvalidInput(_))
        ));
        assert_eq!(game.get_position(), EMPTY_POSITION);
        assert_eq!(game.halfmove_number, 0);
        assert!(game.move_history.is_empty());
    }
}
