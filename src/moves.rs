// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `moves` module contains the definition of a validated `Move`. Moves
//! are produced by the rule engine and consumed by `Board::commit`; they
//! carry enough information to apply every side effect of the move (the
//! castling rook, the pawn captured in passing, the promoted piece).
use std::fmt::{self, Write};

use crate::piece::capability;
use crate::types::{PieceKind, Square};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MoveCategory {
    Normal,
    Castle,
    EnPassant,
    Promotion,
}

impl fmt::Display for MoveCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            MoveCategory::Normal => "normal",
            MoveCategory::Castle => "castle",
            MoveCategory::EnPassant => "en passant",
            MoveCategory::Promotion => "promotion",
        };
        f.write_str(name)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub origin: Square,
    pub destination: Square,
    pub category: MoveCategory,
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub fn normal(origin: Square, destination: Square) -> Move {
        Move {
            origin,
            destination,
            category: MoveCategory::Normal,
            promotion: None,
        }
    }

    /// A castle, encoded as the king's start and stop squares.
    pub fn castle(origin: Square, destination: Square) -> Move {
        Move {
            category: MoveCategory::Castle,
            ..Move::normal(origin, destination)
        }
    }

    pub fn en_passant(origin: Square, destination: Square) -> Move {
        Move {
            category: MoveCategory::EnPassant,
            ..Move::normal(origin, destination)
        }
    }

    pub fn promotion(origin: Square, destination: Square, promoted: PieceKind) -> Move {
        assert!(
            capability(promoted).promotable,
            "invalid promotion piece: {:?}",
            promoted
        );
        Move {
            category: MoveCategory::Promotion,
            promotion: Some(promoted),
            ..Move::normal(origin, destination)
        }
    }

    pub fn is_castle(&self) -> bool {
        self.category == MoveCategory::Castle
    }

    pub fn is_en_passant(&self) -> bool {
        self.category == MoveCategory::EnPassant
    }

    pub fn is_promotion(&self) -> bool {
        self.category == MoveCategory::Promotion
    }

    /// For a castle, where the companion rook starts and where it ends up.
    /// The rook always lands on the square the king passed over.
    pub fn rook_relocation(&self) -> Option<(Square, Square)> {
        if !self.is_castle() {
            return None;
        }

        let rank = self.origin.rank();
        if self.destination.file() > self.origin.file() {
            Some((Square::new(rank, 7), Square::new(rank, self.destination.file() - 1)))
        } else {
            Some((Square::new(rank, 0), Square::new(rank, self.destination.file() + 1)))
        }
    }

    /// For an en passant capture, the square of the pawn being taken. It sits
    /// beside the origin, on the destination's file.
    pub fn en_passant_capture(&self) -> Option<Square> {
        if !self.is_en_passant() {
            return None;
        }

        Some(Square::new(self.origin.rank(), self.destination.file()))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.origin, self.destination)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind)?;
        }

        Ok(())
    }
}
