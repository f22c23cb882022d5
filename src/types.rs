// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use num_traits::{FromPrimitive, ToPrimitive};
use std::fmt::{self, Display, Write};

// TableIndex is a trait for all types that can serve as an index into a table.
// It is common to use these types as indices into tables, so this trait allows
// any type implementing To and FromPrimitive to be used as table indices.
pub trait TableIndex {
    fn as_index(self) -> usize;
    fn from_index(idx: usize) -> Self;
}

impl<T> TableIndex for T
where
    T: FromPrimitive + ToPrimitive,
{
    fn as_index(self) -> usize {
        self.to_u32().unwrap() as usize
    }

    fn from_index(idx: usize) -> T {
        <T as FromPrimitive>::from_u64(idx as u64).unwrap()
    }
}

/// A square on the board, addressed by `(rank, file)`.
///
/// Rank 0 is Black's home rank (algebraic rank 8) and rank 7 is White's home
/// rank (algebraic rank 1). File 0 is the a-file. A `Square` is always on the
/// board; asking for one that isn't is a bug in the caller.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    rank: u8,
    file: u8,
}

impl Square {
    pub fn new(rank: u8, file: u8) -> Square {
        assert!(
            rank < 8 && file < 8,
            "square out of range: [{}, {}]",
            rank,
            file
        );
        Square { rank, file }
    }

    pub fn rank(self) -> u8 {
        self.rank
    }

    pub fn file(self) -> u8 {
        self.file
    }

    /// The square `dir` away from this one, or `None` if that falls off the board.
    pub fn offset(self, dir: Direction) -> Option<Square> {
        let rank = self.rank as i8 + dir.rank;
        let file = self.file as i8 + dir.file;
        if (0..8).contains(&rank) && (0..8).contains(&file) {
            Some(Square::new(rank as u8, file as u8))
        } else {
            None
        }
    }

    pub fn index(self) -> usize {
        (self.rank * 8 + self.file) as usize
    }

    pub fn from_index(idx: usize) -> Square {
        assert!(idx < 64, "square index out of range: {}", idx);
        Square::new((idx / 8) as u8, (idx % 8) as u8)
    }

    /// Iterates over all 64 squares, rank by rank.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square::from_index)
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char((b'a' + self.file) as char)?;
        f.write_char((b'8' - self.rank) as char)
    }
}

/// A `(Δrank, Δfile)` step across the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Direction {
    pub rank: i8,
    pub file: i8,
}

impl Direction {
    pub const fn new(rank: i8, file: i8) -> Direction {
        Direction { rank, file }
    }

    pub fn negate(self) -> Direction {
        Direction::new(-self.rank, -self.file)
    }

    /// The displacement that takes `from` to `to`.
    pub fn between(from: Square, to: Square) -> Direction {
        Direction::new(
            to.rank() as i8 - from.rank() as i8,
            to.file() as i8 - from.file() as i8,
        )
    }

    /// If `from` and `to` share a rank, file or diagonal, the unit step
    /// leading from one to the other.
    pub fn unit_between(from: Square, to: Square) -> Option<Direction> {
        let delta = Direction::between(from, to);
        if delta.rank == 0 && delta.file == 0 {
            return None;
        }

        if delta.rank != 0 && delta.file != 0 && delta.rank.abs() != delta.file.abs() {
            return None;
        }

        Some(Direction::new(delta.rank.signum(), delta.file.signum()))
    }
}

pub const ORTHOGONALS: [Direction; 2] = [Direction::new(1, 0), Direction::new(0, 1)];
pub const DIAGONALS: [Direction; 2] = [Direction::new(1, 1), Direction::new(-1, 1)];
pub const KNIGHT_JUMPS: [Direction; 4] = [
    Direction::new(2, 1),
    Direction::new(1, 2),
    Direction::new(-2, 1),
    Direction::new(-1, 2),
];

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn toggle(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }

    /// The rank holding this color's king and rooks at the start of a game.
    pub fn home_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// The rank this color's pawns start on.
    pub fn pawn_rank(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// The rank this color's pawns promote on.
    pub fn promotion_rank(self) -> u8 {
        self.toggle().home_rank()
    }

    /// The rank delta of a single forward pawn step.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub static COLORS: [Color; 2] = [Color::White, Color::Black];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        }
    }

    pub fn from_name(name: &str) -> Option<PieceKind> {
        PIECE_KINDS.iter().cloned().find(|kind| kind.name() == name)
    }
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        f.write_char(chr)
    }
}

pub static PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];
