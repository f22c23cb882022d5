// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A chess rule engine: board state, legal moves per piece, check, checkmate
//! and stalemate detection, and the special moves (castling, en passant,
//! promotion). `Game` is the place to start.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

mod bitboard;
mod board;
mod game;
pub mod layout;
pub mod movement;
mod moves;
pub mod notation;
mod piece;
pub mod spectator;
mod types;
pub mod validator;

pub use bitboard::{Bitboard, BitboardIterator};
pub use board::{Board, SquareContents};
pub use game::{Game, Phase, SelectionError};
pub use layout::{Layout, LayoutError};
pub use moves::{Move, MoveCategory};
pub use notation::{MoveRequest, NotationError};
pub use piece::{capability, Capability, Piece};
pub use types::{Color, Direction, PieceKind, Square};
pub use validator::{CheckState, GameResult, MoveValidator, Rejection};
