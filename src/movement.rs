// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Ray generation. Pure board geometry: nothing in here knows which squares
//! are occupied.
use crate::bitboard::Bitboard;
use crate::types::{Direction, Square};

/// Walks outward from an origin square along one direction, one step at a
/// time, until it either runs off the board or has taken `max_steps` steps.
pub struct Ray {
    cursor: Square,
    direction: Direction,
    remaining: u8,
}

impl Iterator for Ray {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.remaining == 0 {
            return None;
        }

        match self.cursor.offset(self.direction) {
            Some(next) => {
                self.cursor = next;
                self.remaining -= 1;
                Some(next)
            }
            None => {
                // Off the edge; nothing further along this direction is on the board either.
                self.remaining = 0;
                None
            }
        }
    }
}

/// The squares along `direction` from `origin`, nearest first.
pub fn ray(origin: Square, direction: Direction, max_steps: u8) -> Ray {
    Ray {
        cursor: origin,
        direction,
        remaining: max_steps,
    }
}

/// Every square reachable from `origin` by scaling one of `directions` by
/// 1..=`max_steps`.
pub fn rays(origin: Square, directions: &[Direction], max_steps: u8) -> Bitboard {
    let mut board = Bitboard::none();
    for &dir in directions {
        for sq in ray(origin, dir, max_steps) {
            board.set(sq);
        }
    }

    board
}
