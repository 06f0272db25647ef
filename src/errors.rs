//! Errors reported by the rules engine.
//!
//! Every failure is recoverable and describes why a request was refused:
//! malformed notation, a step the rules forbid, a turn that cannot yet be
//! committed, or a request that does not fit the game phase. Undo and redo
//! with nothing to replay are not errors; they return `None`.

use thiserror::Error;

/// Why the ongoing move cannot be committed, in checking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TurnBlocker {
    #[error("No steps taken")]
    NoSteps,
    #[error("Position hasn't changed")]
    PositionUnchanged,
    #[error("Incomplete push")]
    IncompletePush,
    #[error("Three-fold repetition")]
    ThreefoldRepetition,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArimaaError {
    /// Malformed step, move, setup or position string.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Well-formed step that the rules do not allow right now.
    #[error("illegal step: {0}")]
    IllegalStep(String),

    #[error("incomplete turn: {0}")]
    IncompleteTurn(#[from] TurnBlocker),

    /// Request that does not fit the game phase (setup after the opening,
    /// steps before setup, anything after the game ended).
    #[error("state error: {0}")]
    StateError(String),
}

impl ArimaaError {
    /// Bare reason text, without the category prefix.
    pub fn reason(&self) -> String {
        match self {
            ArimaaError::InvalidInput(msg)
            | ArimaaError::IllegalStep(msg)
            | ArimaaError::StateError(msg) => msg.clone(),
            ArimaaError::IncompleteTurn(blocker) => blocker.to_string(),
        }
    }
}
