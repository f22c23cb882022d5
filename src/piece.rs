// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The piece model. A `Piece` is plain data: what it is, whose it is and
//! where it stands. Everything a piece can *do* comes from a capability
//! table keyed by its kind.
use arrayvec::ArrayVec;
use std::fmt::{self, Write};

use crate::types::{Color, Direction, PieceKind, Square, TableIndex};
use crate::types::{DIAGONALS, KNIGHT_JUMPS, ORTHOGONALS, PIECE_KINDS};

pub type DirectionVec = ArrayVec<[Direction; 8]>;

/// What a kind of piece is able to do.
pub struct Capability {
    /// Direction vectors, closed under negation for everything but the pawn.
    /// The pawn entry is the forward step for White; Black mirrors it.
    pub directions: DirectionVec,
    pub max_steps: u8,
    pub promotable: bool,
    pub value: u32,
}

struct CapabilityTable {
    table: [Capability; 6],
}

impl CapabilityTable {
    pub fn new() -> CapabilityTable {
        fn symmetric(halves: &[&[Direction]]) -> DirectionVec {
            let mut dirs = DirectionVec::new();
            for half in halves {
                for &dir in half.iter() {
                    dirs.push(dir);
                    dirs.push(dir.negate());
                }
            }

            dirs
        }

        let entry = |kind: PieceKind| match kind {
            PieceKind::Pawn => Capability {
                directions: [Direction::new(Color::White.forward(), 0)]
                    .iter()
                    .cloned()
                    .collect(),
                max_steps: 1,
                promotable: false,
                value: 1,
            },
            PieceKind::Knight => Capability {
                directions: symmetric(&[&KNIGHT_JUMPS[..]]),
                max_steps: 1,
                promotable: true,
                value: 3,
            },
            PieceKind::Bishop => Capability {
                directions: symmetric(&[&DIAGONALS[..]]),
                max_steps: 7,
                promotable: true,
                value: 3,
            },
            PieceKind::Rook => Capability {
                directions: symmetric(&[&ORTHOGONALS[..]]),
                max_steps: 7,
                promotable: true,
                value: 5,
            },
            PieceKind::Queen => Capability {
                directions: symmetric(&[&ORTHOGONALS[..], &DIAGONALS[..]]),
                max_steps: 7,
                promotable: true,
                value: 9,
            },
            PieceKind::King => Capability {
                directions: symmetric(&[&ORTHOGONALS[..], &DIAGONALS[..]]),
                max_steps: 1,
                promotable: false,
                value: 100,
            },
        };

        CapabilityTable {
            table: [
                entry(PIECE_KINDS[0]),
                entry(PIECE_KINDS[1]),
                entry(PIECE_KINDS[2]),
                entry(PIECE_KINDS[3]),
                entry(PIECE_KINDS[4]),
                entry(PIECE_KINDS[5]),
            ],
        }
    }

    pub fn get(&self, kind: PieceKind) -> &Capability {
        &self.table[kind.as_index()]
    }
}

lazy_static! {
    static ref CAPABILITIES: CapabilityTable = CapabilityTable::new();
}

pub fn capability(kind: PieceKind) -> &'static Capability {
    CAPABILITIES.get(kind)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub location: Square,
    pub has_moved: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color, location: Square) -> Piece {
        Piece {
            kind,
            color,
            location,
            has_moved: false,
        }
    }

    /// This piece's direction vectors, oriented for its color.
    pub fn directions(&self) -> DirectionVec {
        let dirs = &capability(self.kind).directions;
        match (self.kind, self.color) {
            (PieceKind::Pawn, Color::Black) => dirs.iter().map(|d| d.negate()).collect(),
            _ => dirs.clone(),
        }
    }

    /// The two diagonal steps a pawn captures along.
    pub fn pawn_captures(&self) -> [Direction; 2] {
        debug_assert_eq!(self.kind, PieceKind::Pawn);
        let forward = self.color.forward();
        [Direction::new(forward, -1), Direction::new(forward, 1)]
    }

    pub fn max_steps(&self) -> u8 {
        capability(self.kind).max_steps
    }

    pub fn value(&self) -> u32 {
        capability(self.kind).value
    }

    pub fn is_sliding(&self) -> bool {
        match self.kind {
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => true,
            _ => false,
        }
    }

    /// Whether a pawn standing on `square` is due for promotion.
    pub fn promotes_on(&self, square: Square) -> bool {
        self.kind == PieceKind::Pawn && square.rank() == self.color.promotion_rank()
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = self.kind.to_string().chars().next().unwrap_or('?');
        let chr = match self.color {
            Color::White => chr.to_ascii_uppercase(),
            Color::Black => chr,
        };

        f.write_char(chr)
    }
}
