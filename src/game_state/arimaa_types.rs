//! Core value types for the Arimaa rules engine.
//!
//! Colors, piece kinds, pieces, validated squares and step directions. All
//! of them are small `Copy` values with exhaustive matches so rule code can
//! branch on them without string tags.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Side to move. Gold sets up on ranks 1-2 and moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Gold,
    Silver,
}

impl Color {
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Gold => Color::Silver,
            Color::Silver => Color::Gold,
        }
    }

    /// Move-list suffix used in game records (`g` / `s`).
    #[inline]
    pub const fn record_char(self) -> char {
        match self {
            Color::Gold => 'g',
            Color::Silver => 's',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Gold => write!(f, "gold"),
            Color::Silver => write!(f, "silver"),
        }
    }
}

/// Piece kind in strength order; the derived `Ord` is the strength order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Rabbit,
    Cat,
    Dog,
    Horse,
    Camel,
    Elephant,
}

impl PieceKind {
    /// Upper-case notation letter (`R C D H M E`).
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Rabbit => 'R',
            PieceKind::Cat => 'C',
            PieceKind::Dog => 'D',
            PieceKind::Horse => 'H',
            PieceKind::Camel => 'M',
            PieceKind::Elephant => 'E',
        }
    }

    pub fn from_letter(ch: char) -> Option<Self> {
        match ch.to_ascii_uppercase() {
            'R' => Some(PieceKind::Rabbit),
            'C' => Some(PieceKind::Cat),
            'D' => Some(PieceKind::Dog),
            'H' => Some(PieceKind::Horse),
            'M' => Some(PieceKind::Camel),
            'E' => Some(PieceKind::Elephant),
            _ => None,
        }
    }
}

/// A colored piece. Empty squares are `None` on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Strictly stronger than `other`; equal strength never qualifies.
    #[inline]
    pub fn is_stronger_than(self, other: Piece) -> bool {
        self.kind > other.kind
    }

    /// Notation character: Gold upper case, Silver lower case.
    #[inline]
    pub fn to_char(self) -> char {
        let letter = self.kind.letter();
        match self.color {
            Color::Gold => letter,
            Color::Silver => letter.to_ascii_lowercase(),
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        let color = if ch.is_ascii_uppercase() {
            Color::Gold
        } else if ch.is_ascii_lowercase() {
            Color::Silver
        } else {
            return None;
        };
        PieceKind::from_letter(ch).map(|kind| Piece::new(color, kind))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// One of the 64 playable squares, `0 == a1`, `7 == h1`, `63 == h8`.
///
/// Only constructible through the checked factories, so every `Square` in
/// circulation addresses the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Square(u8);

impl Square {
    pub const COUNT: usize = 64;

    #[inline]
    pub const fn new(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Self(index))
        } else {
            None
        }
    }

    /// File and rank are zero-based (`a` = 0, rank 1 = 0).
    #[inline]
    pub const fn from_file_rank(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Self(rank * 8 + file))
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    /// Neighbour in `direction`, or `None` off the edge (and for `Capture`).
    #[inline]
    pub const fn offset(self, direction: Direction) -> Option<Self> {
        let file = self.file();
        let rank = self.rank();
        match direction {
            Direction::North if rank < 7 => Some(Self(self.0 + 8)),
            Direction::South if rank > 0 => Some(Self(self.0 - 8)),
            Direction::East if file < 7 => Some(Self(self.0 + 1)),
            Direction::West if file > 0 => Some(Self(self.0 - 1)),
            _ => None,
        }
    }

    /// Orthogonal neighbours in N, S, E, W order.
    pub fn neighbors(self) -> impl Iterator<Item = Square> {
        MOVEMENT_DIRECTIONS
            .into_iter()
            .filter_map(move |direction| self.offset(direction))
    }

    #[inline]
    pub fn is_adjacent(self, other: Square) -> bool {
        self.file().abs_diff(other.file()) + self.rank().abs_diff(other.rank()) == 1
    }

    /// Direction leading from `self` to the adjacent square `to`.
    pub fn direction_to(self, to: Square) -> Option<Direction> {
        MOVEMENT_DIRECTIONS
            .into_iter()
            .find(|direction| self.offset(*direction) == Some(to))
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0u8..64).map(Square)
    }
}

impl TryFrom<u8> for Square {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Square::new(value).ok_or_else(|| format!("Square index out of bounds: {value}"))
    }
}

impl From<Square> for u8 {
    fn from(square: Square) -> Self {
        square.0
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file_char = char::from(b'a' + self.file());
        let rank_char = char::from(b'1' + self.rank());
        write!(f, "{file_char}{rank_char}")
    }
}

/// Step direction. `Capture` is engine-emitted only and never moves a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Capture,
}

pub const MOVEMENT_DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::South,
    Direction::East,
    Direction::West,
];

impl Direction {
    #[inline]
    pub const fn to_char(self) -> char {
        match self {
            Direction::North => 'n',
            Direction::South => 's',
            Direction::East => 'e',
            Direction::West => 'w',
            Direction::Capture => 'x',
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'n' => Some(Direction::North),
            's' => Some(Direction::South),
            'e' => Some(Direction::East),
            'w' => Some(Direction::West),
            'x' => Some(Direction::Capture),
            _ => None,
        }
    }

    /// The direction a rabbit of `color` may never step in.
    #[inline]
    pub const fn rabbit_backward(color: Color) -> Direction {
        match color {
            Color::Gold => Direction::South,
            Color::Silver => Direction::North,
        }
    }
}
