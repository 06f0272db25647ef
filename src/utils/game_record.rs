//! Game record read/write in move-list form.
//!
//! One committed turn per line, labelled with the move number and side:
//!
//! ```text
//! 1g Ra1 Rb1 Rc1 ...
//! 1s ra8 rb8 rc8 ...
//! 2g Ee2n Ee3n Cc2n Cc3x
//! ```
//!
//! Older records label the sides `w` and `b`; both spellings are read.
//! Capture tokens are written for reference and skipped on replay since the
//! engine recomputes them.

use crate::errors::ArimaaError;
use crate::game_state::arimaa_types::Color;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_step_apply::apply_move_string;
use crate::move_generation::turn_control::{complete_move, setup};

pub fn write_game_record(game_state: &GameState) -> String {
    let mut out = String::new();
    for turn in &game_state.move_history {
        out.push_str(&turn.label());
        out.push(' ');
        out.push_str(&turn.notation());
        out.push('\n');
    }
    out
}

/// Replay a record from an empty board, setups first.
pub fn read_game_record(record: &str) -> Result<GameState, ArimaaError> {
    replay_game_record(GameState::new_empty(), record)
}

/// Replay a record on top of `game_state`. Lines holding only a label (the
/// turn that was never played) are skipped.
pub fn replay_game_record(mut game_state: GameState, record: &str) -> Result<GameState, ArimaaError> {
    for (line_number, line) in record.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (label, body) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let (number, color) = parse_turn_label(label)?;

        let expected_number = game_state.halfmove_number / 2 + 1;
        if number != expected_number || color != game_state.side_to_move {
            return Err(ArimaaError::InvalidInput(format!(
                "line {}: expected turn {}{}, found {label}",
                line_number + 1,
                expected_number,
                game_state.side_to_move.record_char()
            )));
        }

        let body = body.trim();
        if body.is_empty() {
            continue;
        }

        if game_state.in_setup() {
            setup(&mut game_state, body)?;
        } else {
            apply_move_string(&mut game_state, body)?;
            complete_move(&mut game_state)?;
        }
    }
    Ok(game_state)
}

fn parse_turn_label(label: &str) -> Result<(u16, Color), ArimaaError> {
    let invalid = || ArimaaError::InvalidInput(format!("Invalid turn label: {label}"));

    let side = label.chars().last().ok_or_else(invalid)?;
    let color = match side {
        'g' | 'w' => Color::Gold,
        's' | 'b' => Color::Silver,
        _ => return Err(invalid()),
    };
    let number = label[..label.len() - side.len_utf8()]
        .parse::<u16>()
        .map_err(|_| invalid())?;
    Ok((number, color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::arimaa_rules::{
        STANDARD_GOLD_SETUP, STANDARD_OPENING_POSITION, STANDARD_SILVER_SETUP,
    };
    use crate::move_generation::victory_checks::VictoryReason;

    fn opening_record() -> String {
        format!("1g {STANDARD_GOLD_SETUP}\n1s {STANDARD_SILVER_SETUP}\n")
    }

    #[test]
    fn replays_setups_and_moves() {
        let record = format!("{}2g Ee2n Ee3n Ee4n\n2s ed7s ed6s\n3g\n", opening_record());
        let game = read_game_record(&record).expect("record should replay");

        assert_eq!(game.halfmove_number, 4);
        assert_eq!(game.side_to_move, Color::Gold);
        assert_eq!(game.move_history.len(), 4);
        assert_eq!(game.get_position(), "rrrrrrrr/hdc1mcdh/8/3eE3/8/8/HDCM1CDH/RRRRRRRR");
    }

    #[test]
    fn write_then_read_reproduces_the_game() {
        let record = format!(
            "{}2g Cc2n Cc3x Ee2n\n2s ed7s ed6s ed5s\n",
            opening_record()
        );
        let game = read_game_record(&record).expect("record should replay");
        let written = write_game_record(&game);
        assert_eq!(written, record);

        let again = read_game_record(&written).expect("written record should replay");
        assert_eq!(again.board, game.board);
    }

    #[test]
    fn accepts_white_black_labels() {
        let record = format!("1w {STANDARD_GOLD_SETUP}\n1b {STANDARD_SILVER_SETUP}\n");
        let game = read_game_record(&record).expect("w/b labels");
        assert_eq!(game.get_position(), STANDARD_OPENING_POSITION);
    }

    #[test]
    fn rejects_out_of_order_labels() {
        let record = format!("1s {STANDARD_SILVER_SETUP}\n");
        assert!(matches!(
            read_game_record(&record),
            Err(ArimaaError::InvalidInput(_))
        ));
        assert!(matches!(
            read_game_record("one Ra1"),
            Err(ArimaaError::InvalidInput(_))
        ));
    }

    #[test]
    fn replay_on_a_preset_board_records_the_result() {
        let start = GameState::from_position("r7/1R6/8/8/8/8/8/8").expect("preset");
        let game = replay_game_record(start, "2g Rb7n\n").expect("record should replay");
        let outcome = game.outcome.expect("game is decided");
        assert_eq!(outcome.winner, Color::Gold);
        assert_eq!(outcome.reason, VictoryReason::Goal);
    }
}
