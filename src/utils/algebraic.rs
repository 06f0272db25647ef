//! Square conversions for coordinate notation.
//!
//! Converts between human-readable coordinates (e.g., `d4`) and validated
//! squares. Anything outside `a1..h8` is reported instead of being clamped.

use crate::errors::ArimaaError;
use crate::game_state::arimaa_types::Square;

/// Convert coordinate notation (for example: "d4") to a square.
#[inline]
pub fn algebraic_to_square(square: &str) -> Result<Square, ArimaaError> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ArimaaError::InvalidInput(format!(
            "Invalid square: {square}"
        )));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(ArimaaError::InvalidInput(format!(
            "Invalid file: {}",
            file as char
        )));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(ArimaaError::InvalidInput(format!(
            "Invalid rank: {}",
            rank as char
        )));
    }

    Square::from_file_rank(file - b'a', rank - b'1')
        .ok_or_else(|| ArimaaError::InvalidInput(format!("Invalid square: {square}")))
}
