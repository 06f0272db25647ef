//! The game aggregate.
//!
//! `GameState` owns the board, side to move, the step budget of the turn in
//! progress, the ongoing move, committed history and the redo buffer. It is
//! an ordinary value: callers own one per game and mutate it through the
//! step engine and turn controller. Nothing here is shared or locked.

use crate::errors::ArimaaError;
use crate::game_state::arimaa_rules::{SETUP_HALFMOVES, STEPS_PER_TURN};
use crate::game_state::arimaa_types::Color;
use crate::game_state::board::Board;
use crate::game_state::step::{Step, TurnRecord};
use crate::move_generation::victory_checks::Victory;
use crate::utils::position_generator::generate_position;
use crate::utils::position_parser::{parse_position, parse_position_lenient};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub side_to_move: Color,

    // --- Turn counters ---
    pub halfmove_number: u16,
    pub steps_left: u8,

    // --- Turn in progress ---
    pub ongoing_move: Vec<Step>,
    /// Steps most recently undone, top of stack last.
    pub redo_stack: Vec<Step>,

    // --- Committed history ---
    pub move_history: Vec<TurnRecord>,
    /// Board snapshot at every committed turn boundary.
    pub position_history: Vec<Board>,

    pub outcome: Option<Victory>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            board: Board::new_empty(),
            side_to_move: Color::Gold,

            halfmove_number: 0,
            steps_left: STEPS_PER_TURN,

            ongoing_move: Vec::new(),
            redo_stack: Vec::new(),

            move_history: Vec::new(),
            position_history: Vec::new(),

            outcome: None,
        }
    }
}

impl GameState {
    /// Empty board, Gold to place its pieces.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Preset position with the setup phase treated as done, Gold to move.
    pub fn from_position(position: &str) -> Result<Self, ArimaaError> {
        Ok(Self::from_board(parse_position(position)?))
    }

    /// Like `from_position`, through the separator-tolerant import parser.
    pub fn import_position(position: &str) -> Result<Self, ArimaaError> {
        Ok(Self::from_board(parse_position_lenient(position)?))
    }

    fn from_board(board: Board) -> Self {
        Self {
            board,
            halfmove_number: SETUP_HALFMOVES,
            position_history: vec![board],
            ..Self::default()
        }
    }

    #[inline]
    pub fn get_position(&self) -> String {
        generate_position(&self.board)
    }

    #[inline]
    pub fn in_setup(&self) -> bool {
        self.halfmove_number < SETUP_HALFMOVES
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Most recent step that is not an automatic capture.
    #[inline]
    pub fn last_player_step(&self) -> Option<&Step> {
        self.ongoing_move.iter().rev().find(|step| !step.is_capture())
    }

    /// The last player step is a push that the attacker has not followed yet.
    #[inline]
    pub fn pending_push(&self) -> Option<&Step> {
        self.last_player_step().filter(|step| step.is_push)
    }
}
