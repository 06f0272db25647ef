//! Step, placement and turn records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game_state::arimaa_types::{Color, Direction, Piece, Square};

/// One atomic relocation, or an engine-emitted capture on a trap square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Step {
    pub piece: Piece,
    pub from: Square,
    pub direction: Direction,
    /// `from` offset by `direction`; equal to `from` for captures.
    pub to: Square,
    /// An opponent piece was pushed; the attacker still has to follow.
    pub is_push: bool,
    /// This step is the attacker filling the square a pushed piece left.
    pub completes_push: bool,
}

impl Step {
    pub fn capture(piece: Piece, square: Square) -> Self {
        Self {
            piece,
            from: square,
            direction: Direction::Capture,
            to: square,
            is_push: false,
            completes_push: false,
        }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.direction == Direction::Capture
    }

    /// Same piece, origin and direction, ignoring push bookkeeping.
    #[inline]
    pub fn same_action(&self, other: &Step) -> bool {
        self.piece == other.piece && self.from == other.from && self.direction == other.direction
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.piece, self.from, self.direction.to_char())
    }
}

/// A setup-turn placement, written `Ra1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub piece: Piece,
    pub square: Square,
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.piece, self.square)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnKind {
    Setup(Vec<Placement>),
    Steps(Vec<Step>),
}

/// A committed half-move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub halfmove: u16,
    pub color: Color,
    pub kind: TurnKind,
}

impl TurnRecord {
    /// Move-list label: `1g`, `1s`, `2g`, ...
    pub fn label(&self) -> String {
        format!("{}{}", self.halfmove / 2 + 1, self.color.record_char())
    }

    /// Space-separated tokens, captures included.
    pub fn notation(&self) -> String {
        match &self.kind {
            TurnKind::Setup(placements) => placements
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" "),
            TurnKind::Steps(steps) => steps
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// Result of a successful step application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    pub steps_left: u8,
    /// `None` when a capture token was submitted and ignored.
    pub step: Option<Step>,
    pub captures: Vec<Step>,
}
