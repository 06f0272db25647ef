//! Step, placement and move string grammar.
//!
//! A step is `<Piece><file><rank><dir>` (`Ed4n`, `rc6x`), a placement is
//! `<Piece><file><rank>` (`Ra1`), and a move or setup is a whitespace
//! separated list of either.

use crate::errors::ArimaaError;
use crate::game_state::arimaa_types::{Direction, Piece, Square};
use crate::game_state::step::Placement;
use crate::utils::algebraic::algebraic_to_square;

/// A parsed step submission, before any legality checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRequest {
    pub piece: Piece,
    pub from: Square,
    pub direction: Direction,
}

pub fn parse_step(step: &str) -> Result<StepRequest, ArimaaError> {
    let step = step.trim();
    if step.len() != 4 || !step.is_ascii() {
        return Err(ArimaaError::InvalidInput(format!("Invalid step: {step}")));
    }

    let (piece, from) = parse_piece_and_square(&step[0..3])?;
    let dir_char = step[3..4].chars().next().unwrap_or_default();
    let direction = Direction::from_char(dir_char).ok_or_else(|| {
        ArimaaError::InvalidInput(format!("Invalid direction '{dir_char}' in step {step}"))
    })?;

    Ok(StepRequest {
        piece,
        from,
        direction,
    })
}

pub fn parse_placement(placement: &str) -> Result<Placement, ArimaaError> {
    let placement = placement.trim();
    if placement.len() != 3 || !placement.is_ascii() {
        return Err(ArimaaError::InvalidInput(format!(
            "Invalid placement: {placement}"
        )));
    }
    let (piece, square) = parse_piece_and_square(placement)?;
    Ok(Placement { piece, square })
}

pub fn parse_setup(setup: &str) -> Result<Vec<Placement>, ArimaaError> {
    let placements = setup
        .split_whitespace()
        .map(parse_placement)
        .collect::<Result<Vec<_>, _>>()?;
    if placements.is_empty() {
        return Err(ArimaaError::InvalidInput("Setup contains no placements".to_owned()));
    }
    Ok(placements)
}

pub fn parse_move(move_string: &str) -> Result<Vec<StepRequest>, ArimaaError> {
    move_string.split_whitespace().map(parse_step).collect()
}

fn parse_piece_and_square(token: &str) -> Result<(Piece, Square), ArimaaError> {
    let piece_char = token.chars().next().unwrap_or_default();
    let piece = Piece::from_char(piece_char).ok_or_else(|| {
        ArimaaError::InvalidInput(format!("Invalid piece '{piece_char}' in {token}"))
    })?;
    let square = algebraic_to_square(&token[1..3])?;
    Ok((piece, square))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::arimaa_types::{Color, PieceKind};

    #[test]
    fn parses_step_tokens() {
        let request = parse_step("Ed4n").expect("step should parse");
        assert_eq!(request.piece, Piece::new(Color::Gold, PieceKind::Elephant));
        assert_eq!(request.from.to_string(), "d4");
        assert_eq!(request.direction, Direction::North);

        let capture = parse_step("rc6x").expect("capture token should parse");
        assert_eq!(capture.piece, Piece::new(Color::Silver, PieceKind::Rabbit));
        assert_eq!(capture.direction, Direction::Capture);
    }

    #[test]
    fn rejects_malformed_steps() {
        assert!(parse_step("Ed4").is_err());
        assert!(parse_step("Ed4q").is_err());
        assert!(parse_step("Xd4n").is_err());
        assert!(parse_step("Ei4n").is_err());
        assert!(parse_step("Ed9n").is_err());
        assert!(parse_step("Éd4").is_err());
    }

    #[test]
    fn parses_setup_lists() {
        let placements = parse_setup("Ra1 Rb1  Ee2\n").expect("setup should parse");
        assert_eq!(placements.len(), 3);
        assert_eq!(placements[2].to_string(), "Ee2");

        assert!(parse_setup("").is_err());
        assert!(parse_setup("Ra1 Rb").is_err());
    }

    #[test]
    fn parses_move_strings() {
        let steps = parse_move("Ra2n Ra3n Ra4e").expect("move should parse");
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[2].direction, Direction::East);
        assert!(parse_move("Ra2n bogus").is_err());
    }
}
