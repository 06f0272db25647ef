//! Canonical Arimaa rule constants.
//!
//! Trap squares, the per-turn step budget, goal ranks and a pair of
//! conventional opening setups used to initialise and test game state.

use crate::game_state::arimaa_types::{Color, Square};

/// Non-capture steps available in one turn.
pub const STEPS_PER_TURN: u8 = 4;

/// Number of half-moves spent on the two placement turns.
pub const SETUP_HALFMOVES: u16 = 2;

/// c3, f3, c6, f6.
pub const TRAP_SQUARES: [Square; 4] = [trap(2, 2), trap(5, 2), trap(2, 5), trap(5, 5)];

const fn trap(file: u8, rank: u8) -> Square {
    match Square::from_file_rank(file, rank) {
        Some(square) => square,
        None => panic!("trap square must be on the board"),
    }
}

/// Board with no pieces, in position-string form.
pub const EMPTY_POSITION: &str = "8/8/8/8/8/8/8/8";

/// Conventional Gold opening: rabbits on rank 1, officers on rank 2.
pub const STANDARD_GOLD_SETUP: &str =
    "Ra1 Rb1 Rc1 Rd1 Re1 Rf1 Rg1 Rh1 Ha2 Db2 Cc2 Md2 Ee2 Cf2 Dg2 Hh2";

/// Conventional Silver opening, mirrored onto ranks 7-8.
pub const STANDARD_SILVER_SETUP: &str =
    "ra8 rb8 rc8 rd8 re8 rf8 rg8 rh8 ha7 db7 cc7 ed7 me7 cf7 dg7 hh7";

/// Position after both standard setups, Gold to move.
pub const STANDARD_OPENING_POSITION: &str =
    "rrrrrrrr/hdcemcdh/8/8/8/8/HDCMECDH/RRRRRRRR";

#[inline]
pub fn is_trap(square: Square) -> bool {
    TRAP_SQUARES.contains(&square)
}

/// Zero-based rank a rabbit of `color` must reach to win.
#[inline]
pub const fn goal_rank(color: Color) -> u8 {
    match color {
        Color::Gold => 7,
        Color::Silver => 0,
    }
}
