// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Decoding of the coordinate notation players type in: a square (`e2`,
//! optionally prefixed with a piece letter as in `Pe2`) or a move (`e2e4`,
//! `e2-e4`, `e7e8q`).
use std::error::Error;
use std::fmt;

use regex::Regex;

use crate::piece::capability;
use crate::types::{PieceKind, Square, PIECE_KINDS};

lazy_static! {
    static ref SQUARE: Regex = Regex::new(r"^(?i)[pnbrqk]?([a-h])([1-8])$").unwrap();
    static ref MOVE: Regex =
        Regex::new(r"^(?i)([a-h][1-8])\s*-?\s*([a-h][1-8])\s*=?([a-z])?$").unwrap();
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NotationError {
    Malformed,
    UnknownPromotion(char),
}

impl fmt::Display for NotationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NotationError::Malformed => f.write_str("not a square or move in coordinate notation"),
            NotationError::UnknownPromotion(c) => write!(f, "cannot promote to '{}'", c),
        }
    }
}

impl Error for NotationError {}

/// A move as the player asked for it. Whether it is legal is for the rule
/// engine to decide.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveRequest {
    pub origin: Square,
    pub destination: Square,
    pub promotion: Option<PieceKind>,
}

/// Parses `e2` or `Pe2`. The piece letter, if present, is ignored.
pub fn parse_square(input: &str) -> Result<Square, NotationError> {
    let caps = SQUARE
        .captures(input.trim())
        .ok_or(NotationError::Malformed)?;
    Ok(square_from(&caps[1], &caps[2]))
}

pub fn parse_move(input: &str) -> Result<MoveRequest, NotationError> {
    let caps = MOVE.captures(input.trim()).ok_or(NotationError::Malformed)?;
    let origin = parse_square(&caps[1])?;
    let destination = parse_square(&caps[2])?;
    let promotion = match caps.get(3) {
        Some(m) => {
            let letter = m.as_str().chars().next().ok_or(NotationError::Malformed)?;
            Some(promotion_from(letter)?)
        }
        None => None,
    };

    Ok(MoveRequest {
        origin,
        destination,
        promotion,
    })
}

fn square_from(file: &str, rank: &str) -> Square {
    let file = file.to_ascii_lowercase().as_bytes()[0] - b'a';
    let rank = rank.as_bytes()[0] - b'0';
    // Algebraic rank 8 is Black's home row, row 0.
    Square::new(8 - rank, file)
}

fn promotion_from(letter: char) -> Result<PieceKind, NotationError> {
    let lower = letter.to_ascii_lowercase();
    PIECE_KINDS
        .iter()
        .cloned()
        .find(|kind| kind.to_string().starts_with(lower) && capability(*kind).promotable)
        .ok_or(NotationError::UnknownPromotion(letter))
}
