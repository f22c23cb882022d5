// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `Game` is the entry point for anything driving a game of chess: it
//! owns the live board, remembers the board as it stood before the last move
//! (for en passant), tracks whose turn it is, and walks each ply through
//! piece selection and destination choice.
use std::error::Error;
use std::fmt;

use crate::bitboard::Bitboard;
use crate::board::{Board, SquareContents};
use crate::moves::{Move, MoveCategory};
use crate::piece::Piece;
use crate::types::{Color, PieceKind, Square};
use crate::validator::{CheckState, GameResult, MoveValidator, Rejection};

/// Why a square could not be selected as the piece to move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectionError {
    Empty,
    Hostile,
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SelectionError::Empty => f.write_str("there is no piece on that square"),
            SelectionError::Hostile => f.write_str("that piece belongs to your opponent"),
        }
    }
}

impl Error for SelectionError {}

/// Where the current ply stands. A rejected destination leaves the ply
/// waiting for another destination for the same piece; a committed move
/// hands the next ply to the other side. Moving a piece that was not
/// selected first selects it on the way.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    SelectingPiece,
    AwaitingDestination {
        piece: Piece,
        destinations: Bitboard,
    },
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    previous: Option<Board>,
    last_move: Option<Move>,
    side_to_move: Color,
    phase: Phase,
}

impl Game {
    /// A new game from the standard starting position, White to move.
    pub fn new() -> Game {
        Game::from_parts(Board::from_start_position(), None, None, Color::White)
    }

    /// A game resumed from an arbitrary board. `previous` is the board before
    /// `last_move` was played, if known.
    pub fn from_parts(
        board: Board,
        previous: Option<Board>,
        last_move: Option<Move>,
        side_to_move: Color,
    ) -> Game {
        Game {
            board,
            previous,
            last_move,
            side_to_move,
            phase: Phase::SelectingPiece,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn previous_board(&self) -> Option<&Board> {
        self.previous.as_ref()
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn validator(&self) -> MoveValidator {
        MoveValidator::new(&self.board, self.previous.as_ref())
    }
}

//
// Ply state machine
//

impl Game {
    pub fn classify_square(&self, square: Square, asking: Color) -> SquareContents {
        self.board.classify_square(square, asking)
    }

    /// Picks up the piece on `square` for the side to move and computes where
    /// it may go.
    pub fn select_piece(&mut self, square: Square) -> Result<Piece, SelectionError> {
        match self.board.classify_square(square, self.side_to_move) {
            SquareContents::Empty => Err(SelectionError::Empty),
            SquareContents::Hostile(_) => Err(SelectionError::Hostile),
            SquareContents::Friendly(piece) => {
                let destinations = self.validator().legal_destinations(&piece);
                debug!("selected {} on {}", piece, square);
                self.phase = Phase::AwaitingDestination {
                    piece,
                    destinations,
                };
                Ok(piece)
            }
        }
    }

    /// The destinations of whatever piece stands on `square`, before the
    /// self-check test. Empty for an empty square.
    pub fn legal_destinations(&self, square: Square) -> Bitboard {
        match self.board.piece_at(square) {
            Some(piece) => self.validator().legal_destinations(&piece),
            None => Bitboard::none(),
        }
    }

    /// Moves `piece` to `destination`, promoting to a queen if the move
    /// reaches the last rank.
    pub fn attempt_move(
        &mut self,
        piece: &Piece,
        destination: Square,
    ) -> Result<MoveCategory, Rejection> {
        self.attempt_move_promoting(piece, destination, PieceKind::Queen)
    }

    pub fn attempt_move_promoting(
        &mut self,
        piece: &Piece,
        destination: Square,
        promotion: PieceKind,
    ) -> Result<MoveCategory, Rejection> {
        if piece.color != self.side_to_move {
            return Err(Rejection::OutOfTurn);
        }

        if !self.is_selected(piece.location) {
            if let Err(err) = self.select_piece(piece.location) {
                panic!("invalid move: {} ({})", piece.location, err);
            }
        }

        let mov = match self.validator().validate(piece, destination, Some(promotion)) {
            Ok(mov) => mov,
            Err(rejection) => {
                debug!("{}{} rejected: {}", piece.location, destination, rejection);
                return Err(rejection);
            }
        };

        self.commit(mov);
        Ok(mov.category)
    }

    fn is_selected(&self, square: Square) -> bool {
        match self.phase {
            Phase::AwaitingDestination { piece, .. } => piece.location == square,
            Phase::SelectingPiece => false,
        }
    }

    fn commit(&mut self, mov: Move) {
        let mover = self.side_to_move;
        self.previous = Some(self.board.snapshot());
        let captured = self.board.commit(&mov);
        self.last_move = Some(mov);
        self.side_to_move = mover.toggle();
        self.phase = Phase::SelectingPiece;

        match captured {
            Some(taken) => info!("{} plays {} ({}), taking {}", mover, mov, mov.category, taken),
            None => info!("{} plays {} ({})", mover, mov, mov.category),
        }

        match self.check_state(self.side_to_move) {
            CheckState::Checkmate(color) => info!("checkmate, {} loses", color),
            CheckState::Check(color) => info!("{} is in check", color),
            CheckState::Stalemate => info!("stalemate"),
            CheckState::Ongoing => {}
        }
    }
}

//
// Position queries
//

impl Game {
    pub fn is_in_check(&self, color: Color) -> bool {
        self.validator().in_check(color)
    }

    pub fn check_state(&self, color: Color) -> CheckState {
        self.validator().check_state(color)
    }

    pub fn game_result(&self, color: Color) -> GameResult {
        self.validator().game_result(color)
    }

    /// Every fully legal move available to the side to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        let validator = self.validator();
        self.board
            .pieces(self.side_to_move)
            .flat_map(|piece| validator.moves_for(&piece))
            .collect()
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        write!(f, "{} to move", self.side_to_move)
    }
}
