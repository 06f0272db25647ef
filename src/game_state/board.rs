//! Fixed-size board arena keyed by validated squares.
//!
//! The board is a total mapping from the 64 squares to an optional piece.
//! Two pieces can never share a square because every write goes through
//! `place`, which refuses occupied squares.

use crate::errors::ArimaaError;
use crate::game_state::arimaa_types::{Color, Piece, PieceKind, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; Square::COUNT],
}

impl Default for Board {
    fn default() -> Self {
        Self {
            squares: [None; Square::COUNT],
        }
    }
}

impl Board {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    #[inline]
    pub fn owner_of(&self, square: Square) -> Option<Color> {
        self.piece_at(square).map(|piece| piece.color)
    }

    #[inline]
    pub fn is_empty_square(&self, square: Square) -> bool {
        self.squares[square.index()].is_none()
    }

    /// Put `piece` on an empty square.
    pub fn place(&mut self, square: Square, piece: Piece) -> Result<(), ArimaaError> {
        let slot = &mut self.squares[square.index()];
        if let Some(existing) = slot {
            return Err(ArimaaError::InvalidInput(format!(
                "Square {square} is already occupied by {existing}"
            )));
        }
        *slot = Some(piece);
        Ok(())
    }

    /// Clear a square, returning whatever stood there.
    #[inline]
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.index()].take()
    }

    /// Put a piece back on a square emptied by the step being undone.
    /// Undo replays history in reverse, so the square is known to be free.
    #[inline]
    pub(crate) fn restore(&mut self, square: Square, piece: Piece) {
        self.squares[square.index()] = Some(piece);
    }

    /// Occupied squares in a1..h8 order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
    }

    pub fn count(&self, color: Color, kind: PieceKind) -> usize {
        self.occupied()
            .filter(|(_, piece)| piece.color == color && piece.kind == kind)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("test square should parse")
    }

    #[test]
    fn place_refuses_occupied_square() {
        let mut board = Board::new_empty();
        let camel = Piece::new(Color::Gold, PieceKind::Camel);
        board.place(sq("d4"), camel).expect("empty square accepts a piece");

        let err = board
            .place(sq("d4"), Piece::new(Color::Silver, PieceKind::Cat))
            .expect_err("occupied square must be refused");
        assert!(matches!(err, ArimaaError::InvalidInput(_)));
        assert_eq!(board.piece_at(sq("d4")), Some(camel));
    }

    #[test]
    fn remove_returns_previous_occupant() {
        let mut board = Board::new_empty();
        let dog = Piece::new(Color::Silver, PieceKind::Dog);
        board.place(sq("h8"), dog).expect("place dog");

        assert_eq!(board.remove(sq("h8")), Some(dog));
        assert_eq!(board.remove(sq("h8")), None);
        assert_eq!(board, Board::new_empty());
    }

    #[test]
    fn counts_pieces_by_color_and_kind() {
        let mut board = Board::new_empty();
        board.place(sq("a1"), Piece::new(Color::Gold, PieceKind::Rabbit)).expect("a1");
        board.place(sq("b1"), Piece::new(Color::Gold, PieceKind::Rabbit)).expect("b1");
        board.place(sq("a8"), Piece::new(Color::Silver, PieceKind::Rabbit)).expect("a8");

        assert_eq!(board.count(Color::Gold, PieceKind::Rabbit), 2);
        assert_eq!(board.count(Color::Silver, PieceKind::Rabbit), 1);
        assert_eq!(board.owner_of(sq("a8")), Some(Color::Silver));
        assert_eq!(board.owner_of(sq("c3")), None);
    }
}
