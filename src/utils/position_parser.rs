//! Position-string parser.
//!
//! Builds a board from the rank-by-rank, run-length-encoded position string
//! (rank 8 first, `/` between ranks, digits for runs of empty squares).
//! `parse_position` is strict. `parse_position_lenient` first normalises
//! the slash layout produced by older board-diagram tools and is meant only
//! for importing an initial position.

use crate::errors::ArimaaError;
use crate::game_state::arimaa_types::{Piece, Square};
use crate::game_state::board::Board;

pub fn parse_position(position: &str) -> Result<Board, ArimaaError> {
    let ranks: Vec<&str> = position.split('/').collect();
    if ranks.len() != 8 {
        return Err(ArimaaError::InvalidInput(format!(
            "Board layout must contain 8 ranks, got {}",
            ranks.len()
        )));
    }

    let mut board = Board::new_empty();

    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7u8.saturating_sub(rank_idx as u8);
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ArimaaError::InvalidInput(format!(
                        "Invalid empty-square count '{ch}'"
                    )));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(ArimaaError::InvalidInput(format!(
                        "Rank {} has too many files",
                        board_rank + 1
                    )));
                }
                continue;
            }

            let piece = Piece::from_char(ch).ok_or_else(|| {
                ArimaaError::InvalidInput(format!("Invalid piece character '{ch}' in board layout"))
            })?;

            let square = Square::from_file_rank(file, board_rank).ok_or_else(|| {
                ArimaaError::InvalidInput(format!("Rank {} has too many files", board_rank + 1))
            })?;
            board.place(square, piece)?;
            file += 1;
        }

        if file != 8 {
            return Err(ArimaaError::InvalidInput(format!(
                "Rank {} does not sum to 8 files",
                board_rank + 1
            )));
        }
    }

    Ok(board)
}

/// Strip leading/trailing slashes and collapse doubled separators, then
/// parse strictly.
pub fn parse_position_lenient(position: &str) -> Result<Board, ArimaaError> {
    parse_position(&normalize_separators(position))
}

fn normalize_separators(position: &str) -> String {
    position
        .trim()
        .split('/')
        .filter(|rank| !rank.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}
