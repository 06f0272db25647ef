//! JSON reply payloads.
//!
//! Steps and moves travel in their string notation; everything else is a
//! plain value. Absent fields are omitted rather than sent as `null`.

use serde::Serialize;

use crate::errors::ArimaaError;
use crate::game_state::arimaa_types::Color;
use crate::game_state::game_state::GameState;
use crate::game_state::step::{Step, StepOutcome, TurnRecord};
use crate::move_generation::turn_control::MoveCompletion;
use crate::move_generation::victory_checks::{Victory, VictoryReason};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepPayload {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps_left: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub captures: Vec<String>,
}

impl StepPayload {
    pub fn from_outcome(outcome: &StepOutcome) -> Self {
        Self {
            success: true,
            reason: None,
            steps_left: Some(outcome.steps_left),
            step: outcome.step.as_ref().map(ToString::to_string),
            captures: notations(&outcome.captures),
        }
    }

    /// Undo reply: the step taken back, or a bare success when there was
    /// nothing to undo.
    pub fn from_undo(undone: Option<Step>, steps_left: u8) -> Self {
        Self {
            success: true,
            reason: None,
            steps_left: Some(steps_left),
            step: undone.as_ref().map(ToString::to_string),
            captures: Vec::new(),
        }
    }

    /// Bare `{"success":true}`.
    pub fn acknowledged() -> Self {
        Self {
            success: true,
            reason: None,
            steps_left: None,
            step: None,
            captures: Vec::new(),
        }
    }

    pub fn failure(error: &ArimaaError, steps_left: Option<u8>) -> Self {
        Self::rejected(error.reason(), steps_left)
    }

    pub fn rejected(reason: impl Into<String>, steps_left: Option<u8>) -> Self {
        Self {
            success: false,
            reason: Some(reason.into()),
            steps_left,
            step: None,
            captures: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VictoryPayload {
    /// `1` won, `-1` lost, `0` undecided, for the side that just moved.
    pub result: i8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<char>,
}

impl VictoryPayload {
    pub fn new(result: i8, reason: Option<VictoryReason>) -> Self {
        Self {
            result,
            reason: reason.map(VictoryReason::code),
        }
    }

    /// Result of a finished game from `mover`'s side.
    pub fn for_mover(victory: &Victory, mover: Color) -> Self {
        Self::new(victory.result_for(mover), Some(victory.reason))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnPayload {
    pub success: bool,
    pub turn: String,
    pub moves: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub victory: Option<VictoryPayload>,
}

impl TurnPayload {
    pub fn from_turn(turn: &TurnRecord) -> Self {
        Self {
            success: true,
            turn: turn.label(),
            moves: turn.notation(),
            victory: None,
        }
    }

    pub fn from_completion(completion: &MoveCompletion) -> Self {
        Self {
            success: true,
            turn: completion.turn.label(),
            moves: completion.turn.notation(),
            victory: completion
                .victory
                .as_ref()
                .map(|victory| VictoryPayload::for_mover(victory, completion.turn.color)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPayload {
    pub success: bool,
    pub count: usize,
    pub items: Vec<String>,
}

impl ListPayload {
    pub fn new(items: Vec<String>) -> Self {
        Self {
            success: true,
            count: items.len(),
            items,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionPayload {
    pub success: bool,
    pub position: String,
    pub side_to_move: String,
    pub halfmove: u16,
    pub steps_left: u8,
    pub ongoing_move: Vec<String>,
    pub game_over: bool,
}

impl PositionPayload {
    pub fn from_game(game_state: &GameState) -> Self {
        Self {
            success: true,
            position: game_state.get_position(),
            side_to_move: game_state.side_to_move.to_string(),
            halfmove: game_state.halfmove_number,
            steps_left: game_state.steps_left,
            ongoing_move: notations(&game_state.ongoing_move),
            game_over: game_state.is_game_over(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordPayload {
    pub success: bool,
    pub record: String,
}

fn notations(steps: &[Step]) -> Vec<String> {
    steps.iter().map(ToString::to_string).collect()
}
