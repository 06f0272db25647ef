use crate::game_state::arimaa_types::Square;
use crate::game_state::board::Board;

pub fn generate_position(board: &Board) -> String {
    let mut out = String::new();

    for rank in (0..8u8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8u8 {
            let piece = Square::from_file_rank(file, rank).and_then(|sq| board.piece_at(sq));
            if let Some(piece) = piece {
                if empty_count > 0 {
                    out.push(char::from(b'0' + empty_count));
                    empty_count = 0;
                }
                out.push(piece.to_char());
            } else {
                empty_count += 1;
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if rank > 0 {
            out.push('/');
        }
    }

    out
}
