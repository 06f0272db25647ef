//! Crate root module declarations for the Plum Arimaa rules engine.
//!
//! Exposes the board model, the step engine and turn controller, move
//! generation, engines, the stdio protocol and notation helpers so the
//! binary, tests and benches share stable module paths.

pub mod errors;

pub mod game_state {
    pub mod arimaa_rules;
    pub mod arimaa_types;
    pub mod board;
    pub mod game_state;
    pub mod step;
}

pub mod move_generation {
    pub mod legal_step_apply;
    pub mod legal_step_checks;
    pub mod move_generator;
    pub mod perft;
    pub mod step_generator;
    pub mod turn_control;
    pub mod victory_checks;
}

pub mod engines {
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod protocol {
    pub mod command_loop;
}

pub mod utils {
    pub mod algebraic;
    pub mod game_record;
    pub mod payloads;
    pub mod position_generator;
    pub mod position_parser;
    pub mod step_notation;
}
