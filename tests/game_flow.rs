use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use plum_arimaa::errors::{ArimaaError, TurnBlocker};
use plum_arimaa::game_state::arimaa_rules::{
    EMPTY_POSITION, STANDARD_GOLD_SETUP, STANDARD_OPENING_POSITION, STANDARD_SILVER_SETUP,
};
use plum_arimaa::game_state::arimaa_types::{Color, Piece, PieceKind, Square};
use plum_arimaa::game_state::game_state::GameState;
use plum_arimaa::move_generation::legal_step_apply::{apply_step, undo_step};
use plum_arimaa::move_generation::legal_step_checks::{can_be_pushed, is_frozen};
use plum_arimaa::move_generation::move_generator::generate_moves;
use plum_arimaa::move_generation::step_generator::generate_steps;
use plum_arimaa::move_generation::turn_control::{can_complete_move, complete_move, setup};
use plum_arimaa::utils::algebraic::algebraic_to_square;
use plum_arimaa::utils::position_generator::generate_position;
use plum_arimaa::utils::position_parser::parse_position;

fn sq(name: &str) -> Square {
    algebraic_to_square(name).expect("test square should parse")
}

fn game(position: &str) -> GameState {
    GameState::from_position(position).expect("test position should parse")
}

#[test]
fn two_setups_then_setup_is_refused() {
    let mut game = GameState::new_empty();

    setup(&mut game, STANDARD_GOLD_SETUP).expect("gold setup at halfmove 0");
    assert_eq!(game.side_to_move, Color::Silver);
    assert_eq!(game.halfmove_number, 1);

    setup(&mut game, STANDARD_SILVER_SETUP).expect("silver setup at halfmove 1");
    assert_eq!(game.side_to_move, Color::Gold);
    assert_eq!(game.halfmove_number, 2);
    assert_eq!(game.get_position(), STANDARD_OPENING_POSITION);

    let err = setup(&mut game, "Ra3").expect_err("no third setup");
    assert_eq!(
        err,
        ArimaaError::StateError("Setup not possible after the first move".to_owned())
    );
}

#[test]
fn equal_strength_never_freezes() {
    let mut elephant = game("8/8/8/8/3E4/8/8/8");
    assert!(!is_frozen(&elephant.board, sq("d4")));

    elephant
        .board
        .place(sq("d5"), Piece::new(Color::Silver, PieceKind::Elephant))
        .expect("d5 is empty");
    assert!(!is_frozen(&elephant.board, sq("d4")));

    // a weaker gold piece next to the silver elephant is frozen...
    let mut camel = game("8/8/8/3e4/3M4/8/8/8");
    assert!(is_frozen(&camel.board, sq("d4")));

    // ...until a friend stands beside it
    camel
        .board
        .place(sq("c4"), Piece::new(Color::Gold, PieceKind::Rabbit))
        .expect("c4 is empty");
    assert!(!is_frozen(&camel.board, sq("d4")));
}

#[test]
fn push_must_be_completed_before_the_turn_ends() {
    let mut game = game("8/8/8/8/3r4/3M4/8/8");
    assert!(can_be_pushed(&game, sq("d4")));

    let push = apply_step(&mut game, "rd4e").expect("rabbit is pushed to e4");
    assert!(push.step.expect("step recorded").is_push);
    assert_eq!(
        can_complete_move(&game),
        Err(ArimaaError::IncompleteTurn(TurnBlocker::IncompletePush))
    );

    apply_step(&mut game, "Md3n").expect("camel follows into d4");
    complete_move(&mut game).expect("turn completes");
    assert_eq!(game.get_position(), "8/8/8/8/3Mr3/8/8/8");
}

#[test]
fn returning_to_the_start_is_not_a_move() {
    let mut game = game("r7/8/8/8/3E4/8/8/R7");
    apply_step(&mut game, "Ed4n").expect("step away");
    apply_step(&mut game, "Ed5s").expect("step back");

    let err = complete_move(&mut game).expect_err("position unchanged");
    assert_eq!(err.reason(), "Position hasn't changed");
}

#[test]
fn trap_capture_is_recorded_immediately() {
    let mut game = game("8/8/8/8/8/8/5H2/8");
    let outcome = apply_step(&mut game, "Hf2n").expect("horse steps onto f3");
    assert_eq!(outcome.captures.len(), 1);
    assert_eq!(
        game.ongoing_move.last().map(ToString::to_string),
        Some("Hf3x".to_owned())
    );
    assert_eq!(game.get_position(), EMPTY_POSITION);
}

#[test]
fn undo_is_the_inverse_of_any_step_sequence() {
    let positions = [
        STANDARD_OPENING_POSITION,
        "8/2r5/8/1rEr4/2M5/3d4/2R5/8",
        "8/8/8/3r4/2rMr3/3R4/8/8",
        "r1r5/8/1c2d3/2H2E2/8/1D2h3/8/R1R5",
    ];

    for position in positions {
        for seed in 0..16u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut game = game(position);
            let before = game.clone();

            let mut applied = 0;
            for _ in 0..4 {
                let steps = generate_steps(&game);
                let Some(step) = steps.choose(&mut rng) else {
                    break;
                };
                apply_step(&mut game, &step.to_string()).expect("generated steps are legal");
                applied += 1;
            }

            for _ in 0..applied {
                undo_step(&mut game).expect("a step to undo");
            }
            assert_eq!(game.board, before.board, "{position} seed {seed}");
            assert_eq!(game.steps_left, before.steps_left);
            assert!(game.ongoing_move.is_empty());
        }
    }
}

#[test]
fn opening_moves_replay_and_unwind() {
    let start = game(STANDARD_OPENING_POSITION);
    let moves = generate_moves(&start).expect("opening generation succeeds");
    assert!(!moves.is_empty());

    for generated in &moves {
        let mut game = start.clone();
        let mut applied = 0;
        for step in generated.steps.iter().filter(|step| !step.is_capture()) {
            apply_step(&mut game, &step.to_string()).expect("generated step replays");
            applied += 1;
        }
        assert_eq!(game.board, generated.position_after);
        assert!(can_complete_move(&game).is_ok());

        for _ in 0..applied {
            undo_step(&mut game).expect("a step to undo");
        }
        assert_eq!(game.board, start.board, "{}", generated.notation());
        assert_eq!(game.steps_left, 4);
    }
}

#[test]
fn reachable_boards_round_trip_through_position_strings() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut game = game("r1r5/8/1c2d3/2H2E2/8/1D2h3/8/R1R5");

    for _ in 0..12 {
        let board_text = generate_position(&game.board);
        assert_eq!(
            parse_position(&board_text).expect("serialized boards parse"),
            game.board
        );

        let steps = generate_steps(&game);
        let Some(step) = steps.choose(&mut rng) else {
            break;
        };
        apply_step(&mut game, &step.to_string()).expect("generated steps are legal");
        if can_complete_move(&game).is_ok() {
            complete_move(&mut game).expect("completable turn commits");
            if game.is_game_over() {
                break;
            }
        } else if game.steps_left == 0 {
            break;
        }
    }
}

#[test]
fn lenient_import_accepts_stray_separators() {
    let game = GameState::import_position("/rrrrrrrr/hdcemcdh//8/8/8/8/HDCMECDH/RRRRRRRR/")
        .expect("lenient import");
    assert_eq!(game.get_position(), STANDARD_OPENING_POSITION);
    assert!(GameState::from_position("/rrrrrrrr/hdcemcdh/8/8/8/8/HDCMECDH/RRRRRRRR/").is_err());
}
