//! Uniform random-move engine.
//!
//! Picks any completable move with equal probability. Used for self-play
//! tests and as the `go` reply of the command loop.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::game_state::game_state::GameState;
use crate::move_generation::move_generator::{LegalMoveGenerator, MoveGenerator, MoveSearchLimits};

pub struct RandomEngine {
    move_generator: LegalMoveGenerator,
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            move_generator: LegalMoveGenerator::default(),
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Reproducible choices for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            move_generator: LegalMoveGenerator::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn with_limits(mut self, limits: MoveSearchLimits) -> Self {
        self.move_generator = LegalMoveGenerator::new(limits);
        self
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "PlumArimaa Random"
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), String> {
        match name.to_ascii_lowercase().as_str() {
            "maxnodes" => {
                let max_nodes = value
                    .parse::<usize>()
                    .map_err(|_| format!("invalid MaxNodes value: {value}"))?;
                self.move_generator.limits.max_nodes = (max_nodes > 0).then_some(max_nodes);
                Ok(())
            }
            "seed" => {
                let seed = value
                    .parse::<u64>()
                    .map_err(|_| format!("invalid Seed value: {value}"))?;
                self.rng = StdRng::seed_from_u64(seed);
                Ok(())
            }
            _ => Err(format!("unknown option: {name}")),
        }
    }

    fn choose_move(&mut self, game_state: &GameState) -> Result<EngineOutput, String> {
        let legal_moves = self
            .move_generator
            .generate_legal_moves(game_state)
            .map_err(|e| e.to_string())?;

        let mut out = EngineOutput::default();
        out.info_lines
            .push(format!("random_engine legal_moves {}", legal_moves.len()));

        out.best_move = legal_moves.as_slice().choose(&mut self.rng).cloned();
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::turn_control::play_generated_move;
    use crate::utils::game_record::write_game_record;

    const RABBIT_RACE: &str = "rr4rr/8/8/8/8/8/8/RR4RR";

    fn self_play(seed: u64, max_turns: usize) -> GameState {
        let mut game = GameState::from_position(RABBIT_RACE).expect("test position should parse");
        let mut engine = RandomEngine::with_seed(seed);
        for _ in 0..max_turns {
            if game.is_game_over() {
                break;
            }
            let output = engine.choose_move(&game).expect("engine should not fail");
            let Some(chosen) = output.best_move else {
                break;
            };
            play_generated_move(&mut game, &chosen).expect("generated moves are playable");
            assert_eq!(game.board, chosen.position_after);
        }
        game
    }

    #[test]
    fn seeded_self_play_is_reproducible() {
        let first = self_play(7, 12);
        let second = self_play(7, 12);
        assert_eq!(write_game_record(&first), write_game_record(&second));
        assert_eq!(first.board, second.board);
        assert!(!first.move_history.is_empty());
    }

    #[test]
    fn options_are_validated() {
        let elephant = GameState::from_position("8/8/8/8/3E4/8/8/8").expect("test position");
        let mut engine = RandomEngine::with_seed(1);
        engine.set_option("MaxNodes", "10").expect("valid node cap");
        assert!(engine.choose_move(&elephant).is_err());
        engine.set_option("MaxNodes", "0").expect("zero clears the cap");
        let output = engine.choose_move(&elephant).expect("uncapped search succeeds");
        assert!(output.best_move.is_some());
        assert!(engine.set_option("Seed", "abc").is_err());
        assert!(engine.set_option("Hash", "16").is_err());
    }

    #[test]
    fn no_move_during_setup_is_an_error() {
        let mut engine = RandomEngine::with_seed(3);
        assert!(engine.choose_move(&GameState::new_empty()).is_err());
    }
}
