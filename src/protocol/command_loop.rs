//! Line-oriented stdio front-end.
//!
//! Reads one command per line, drives a single game and answers every
//! command (except `quit`) with one JSON line on stdout.
//!
//! ```text
//! newgame | position <pos> | setup <placements> | step <steps>
//! undo | redo | complete | steps | moves | show | result | record
//! go | setoption name <Name> value <v> | quit
//! ```

use std::env;
use std::io::{self, BufRead, Write};

use serde::Serialize;
use tracing::{debug, warn};

use crate::engines::engine_random::RandomEngine;
use crate::engines::engine_trait::Engine;
use crate::errors::ArimaaError;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_step_apply::{apply_move_string, redo_step, undo_step};
use crate::move_generation::move_generator::{LegalMoveGenerator, MoveGenerator, MoveSearchLimits};
use crate::move_generation::step_generator::generate_steps;
use crate::move_generation::turn_control::{complete_move, play_generated_move, setup};
use crate::move_generation::victory_checks::result_for_last_mover;
use crate::utils::game_record::write_game_record;
use crate::utils::payloads::{
    ListPayload, PositionPayload, RecordPayload, StepPayload, TurnPayload, VictoryPayload,
};

/// Initial node cap for `moves` and `go`.
pub const MAX_NODES_ENV: &str = "ARIMAA_MAX_NODES";

pub fn run_stdio_loop() -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut protocol = ProtocolState::from_env();

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = protocol.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

pub struct ProtocolState {
    game_state: GameState,
    engine: Box<dyn Engine>,
    limits: MoveSearchLimits,
}

impl Default for ProtocolState {
    fn default() -> Self {
        Self::new(MoveSearchLimits::default())
    }
}

impl ProtocolState {
    pub fn new(limits: MoveSearchLimits) -> Self {
        Self {
            game_state: GameState::new_empty(),
            engine: build_engine(limits),
            limits,
        }
    }

    pub fn from_env() -> Self {
        let max_nodes = match env::var(MAX_NODES_ENV) {
            Ok(raw) => match raw.trim().parse::<usize>() {
                Ok(0) => None,
                Ok(n) => Some(n),
                Err(_) => {
                    warn!(value = %raw, "ignoring invalid {MAX_NODES_ENV}");
                    None
                }
            },
            Err(_) => None,
        };
        Self::new(MoveSearchLimits {
            max_depth: None,
            max_nodes,
        })
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    /// Handle one line. Returns `true` once the loop should stop.
    pub fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let (cmd, rest) = trimmed
            .split_once(char::is_whitespace)
            .map(|(cmd, rest)| (cmd, rest.trim()))
            .unwrap_or((trimmed, ""));
        debug!(cmd, args = rest, "command");

        let steps_left = Some(self.game_state.steps_left);
        match cmd {
            "newgame" => {
                self.game_state = GameState::new_empty();
                self.engine.new_game();
                reply(out, &PositionPayload::from_game(&self.game_state))?;
            }
            "position" => match GameState::import_position(rest) {
                Ok(game_state) => {
                    self.game_state = game_state;
                    self.engine.new_game();
                    reply(out, &PositionPayload::from_game(&self.game_state))?;
                }
                Err(err) => reply(out, &StepPayload::failure(&err, None))?,
            },
            "setup" => match setup(&mut self.game_state, rest) {
                Ok(turn) => reply(out, &TurnPayload::from_turn(&turn))?,
                Err(err) => reply(out, &StepPayload::failure(&err, None))?,
            },
            "step" => self.handle_step(rest, out)?,
            "undo" => {
                let undone = undo_step(&mut self.game_state);
                reply(
                    out,
                    &StepPayload::from_undo(undone, self.game_state.steps_left),
                )?;
            }
            "redo" => match redo_step(&mut self.game_state) {
                Ok(Some(outcome)) => reply(out, &StepPayload::from_outcome(&outcome))?,
                Ok(None) => reply(
                    out,
                    &StepPayload::from_undo(None, self.game_state.steps_left),
                )?,
                Err(err) => reply(out, &StepPayload::failure(&err, steps_left))?,
            },
            "complete" => match complete_move(&mut self.game_state) {
                Ok(completion) => reply(out, &TurnPayload::from_completion(&completion))?,
                Err(err) => reply(out, &StepPayload::failure(&err, steps_left))?,
            },
            "steps" => {
                let steps = generate_steps(&self.game_state)
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                reply(out, &ListPayload::new(steps))?;
            }
            "moves" => {
                let generator = LegalMoveGenerator::new(self.limits);
                match generator.generate_legal_moves(&self.game_state) {
                    Ok(moves) => reply(
                        out,
                        &ListPayload::new(moves.iter().map(|mv| mv.notation()).collect()),
                    )?,
                    Err(err) => reply(out, &StepPayload::rejected(err.to_string(), steps_left))?,
                }
            }
            "show" => reply(out, &PositionPayload::from_game(&self.game_state))?,
            "result" => {
                let payload = if self.game_state.in_setup() {
                    VictoryPayload::new(0, None)
                } else {
                    let (result, reason) = result_for_last_mover(&self.game_state);
                    VictoryPayload::new(result, reason)
                };
                reply(out, &payload)?;
            }
            "record" => reply(
                out,
                &RecordPayload {
                    success: true,
                    record: write_game_record(&self.game_state),
                },
            )?,
            "go" => self.handle_go(out)?,
            "setoption" => match self.handle_setoption(rest) {
                Ok(()) => reply(out, &StepPayload::acknowledged())?,
                Err(reason) => reply(out, &StepPayload::rejected(reason, None))?,
            },
            "quit" => return Ok(true),
            _ => {
                let err = ArimaaError::InvalidInput(format!("Unknown command: {cmd}"));
                reply(out, &StepPayload::failure(&err, None))?;
            }
        }

        Ok(false)
    }

    fn handle_step(&mut self, move_string: &str, out: &mut impl Write) -> io::Result<()> {
        match apply_move_string(&mut self.game_state, move_string) {
            Ok(outcomes) => {
                let Some(last) = outcomes.last() else {
                    let err = ArimaaError::InvalidInput("No step given".to_owned());
                    return reply(out, &StepPayload::failure(&err, Some(self.game_state.steps_left)));
                };
                let mut payload = StepPayload::from_outcome(last);
                payload.captures = outcomes
                    .iter()
                    .flat_map(|outcome| outcome.captures.iter().map(ToString::to_string))
                    .collect();
                reply(out, &payload)
            }
            Err(err) => reply(
                out,
                &StepPayload::failure(&err, Some(self.game_state.steps_left)),
            ),
        }
    }

    fn handle_go(&mut self, out: &mut impl Write) -> io::Result<()> {
        let output = match self.engine.choose_move(&self.game_state) {
            Ok(output) => output,
            Err(reason) => return reply(out, &StepPayload::rejected(reason, None)),
        };
        for line in &output.info_lines {
            debug!(engine = self.engine.name(), "{line}");
        }

        let Some(chosen) = output.best_move else {
            return reply(out, &StepPayload::rejected("No legal move", None));
        };
        match play_generated_move(&mut self.game_state, &chosen) {
            Ok(completion) => reply(out, &TurnPayload::from_completion(&completion)),
            Err(err) => reply(out, &StepPayload::failure(&err, None)),
        }
    }

    fn handle_setoption(&mut self, args: &str) -> Result<(), String> {
        let mut name_tokens = Vec::<&str>::new();
        let mut value_tokens = Vec::<&str>::new();
        let mut mode = "";

        for tok in args.split_whitespace() {
            match tok {
                "name" => mode = "name",
                "value" => mode = "value",
                _ if mode == "name" => name_tokens.push(tok),
                _ if mode == "value" => value_tokens.push(tok),
                _ => {}
            }
        }

        let name = name_tokens.join(" ");
        let value = value_tokens.join(" ");

        if name.eq_ignore_ascii_case("MaxNodes") {
            let parsed = value
                .parse::<usize>()
                .map_err(|_| format!("invalid MaxNodes value '{value}'"))?;
            self.limits.max_nodes = (parsed > 0).then_some(parsed);
        }
        self.engine.set_option(&name, &value)
    }
}

fn build_engine(limits: MoveSearchLimits) -> Box<dyn Engine> {
    Box::new(RandomEngine::new().with_limits(limits))
}

fn reply(out: &mut impl Write, payload: &impl Serialize) -> io::Result<()> {
    serde_json::to_writer(&mut *out, payload)?;
    writeln!(out)
}
