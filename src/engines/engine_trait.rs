//! Engine abstraction used by the command loop.
//!
//! An engine picks one complete move for the side to move. Strategies are
//! swapped at runtime behind this trait.

use crate::game_state::game_state::GameState;
use crate::move_generation::move_generator::GeneratedMove;

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<GeneratedMove>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, _name: &str, _value: &str) -> Result<(), String> {
        Ok(())
    }

    /// `best_move` is `None` when no move can be completed.
    fn choose_move(&mut self, game_state: &GameState) -> Result<EngineOutput, String>;
}
