// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The rule engine. `MoveValidator` borrows a board (and, for en passant,
//! the board as it stood before the opponent's last move) and answers every
//! legality question about it: where a piece may go, whether a king is in
//! check, whether the game is over, and whether a proposed move is allowed.
//!
//! The validator never mutates the board it is given. Every "what if"
//! question is answered on a snapshot.
use std::error::Error;
use std::fmt;

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::movement;
use crate::moves::Move;
use crate::piece::{capability, Piece};
use crate::spectator;
use crate::types::{Color, Direction, PieceKind, Square};

/// Why a proposed move was turned down. Rejections are ordinary outcomes:
/// the caller re-prompts and the board is untouched.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// The destination is not among the piece's legal destinations.
    NotInMoveset,
    /// The destination holds one of the mover's own pieces.
    FriendlyOccupied,
    /// The move would leave the mover's king in check.
    SelfCheck,
    /// A castle whose king or rook has moved, or whose path is occupied or attacked.
    CastlingBlocked,
    /// A diagonal pawn move into an empty square with nothing to take in passing.
    EnPassantUnavailable,
    /// The piece belongs to the side not on move.
    OutOfTurn,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            Rejection::NotInMoveset => "that piece cannot move there",
            Rejection::FriendlyOccupied => "that square is occupied by your own piece",
            Rejection::SelfCheck => "that move would leave your king in check",
            Rejection::CastlingBlocked => "castling is not allowed here",
            Rejection::EnPassantUnavailable => "there is no pawn to capture en passant",
            Rejection::OutOfTurn => "it is not that piece's turn",
        };
        f.write_str(msg)
    }
}

impl Error for Rejection {}

/// Where a side stands, from its own point of view.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CheckState {
    Ongoing,
    Check(Color),
    Checkmate(Color),
    Stalemate,
}

/// Whether the game has ended. `Checkmate` carries the side that was mated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    Ongoing,
    Checkmate(Color),
    Stalemate,
}

pub struct MoveValidator<'a> {
    board: &'a Board,
    past: Option<&'a Board>,
}

impl<'a> MoveValidator<'a> {
    /// `past` is the board before the opponent's last move. Without it, no
    /// en passant capture is ever available.
    pub fn new(board: &'a Board, past: Option<&'a Board>) -> MoveValidator<'a> {
        MoveValidator { board, past }
    }
}

//
// Move generation
//

impl<'a> MoveValidator<'a> {
    /// The squares `piece` may move to, before the self-check test. Sliders
    /// stop at the first occupied square (kept only if it holds an enemy).
    /// Knights and kings take their raw jump sets. Kings also get any
    /// castling destination currently open to them.
    pub fn legal_destinations(&self, piece: &Piece) -> Bitboard {
        match piece.kind {
            PieceKind::Pawn => self.pawn_destinations(piece),
            PieceKind::Knight => {
                movement::rays(piece.location, &piece.directions(), piece.max_steps())
            }
            PieceKind::King => {
                movement::rays(piece.location, &piece.directions(), piece.max_steps())
                    | self.castling_destinations(piece)
            }
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => self.unblocked_path(piece),
        }
    }

    fn unblocked_path(&self, piece: &Piece) -> Bitboard {
        let mut destinations = Bitboard::none();
        for &dir in piece.directions().iter() {
            for sq in movement::ray(piece.location, dir, piece.max_steps()) {
                match self.board.piece_at(sq) {
                    None => destinations.set(sq),
                    Some(other) => {
                        if other.color != piece.color {
                            destinations.set(sq);
                        }

                        break;
                    }
                }
            }
        }

        destinations
    }

    fn pawn_destinations(&self, pawn: &Piece) -> Bitboard {
        let mut destinations = Bitboard::none();

        // Forward moves never capture. A pawn still on its starting rank may
        // go two squares if both are empty.
        let steps = if pawn.location.rank() == pawn.color.pawn_rank() {
            2
        } else {
            1
        };
        for sq in movement::ray(pawn.location, pawn.directions()[0], steps) {
            if !self.board.is_empty(sq) {
                break;
            }

            destinations.set(sq);
        }

        // Diagonal moves must capture, either directly or in passing.
        for &dir in pawn.pawn_captures().iter() {
            let sq = match pawn.location.offset(dir) {
                Some(sq) => sq,
                None => continue,
            };

            match self.board.piece_at(sq) {
                Some(other) if other.color != pawn.color => destinations.set(sq),
                None if self.en_passant(pawn, sq).is_ok() => destinations.set(sq),
                _ => {}
            }
        }

        destinations
    }

    fn castling_destinations(&self, king: &Piece) -> Bitboard {
        let mut destinations = Bitboard::none();
        if king.has_moved {
            return destinations;
        }

        let rank = king.location.rank();
        for &file in &[2, 6] {
            let sq = Square::new(rank, file);
            if self.castling(king, sq).is_ok() {
                destinations.set(sq);
            }
        }

        destinations
    }
}

//
// Check detection
//

impl<'a> MoveValidator<'a> {
    /// Pieces of color `by` with a clear line onto `target`.
    pub fn attackers(&self, target: Square, by: Color) -> Vec<Piece> {
        spectator::candidate_attackers(self.board, target, by)
            .into_iter()
            .filter(|piece| self.has_clear_line(piece, target))
            .collect()
    }

    pub fn is_attacked(&self, target: Square, by: Color) -> bool {
        !self.attackers(target, by).is_empty()
    }

    /// The enemy pieces currently giving check to `color`'s king.
    pub fn checkers(&self, color: Color) -> Vec<Piece> {
        let king = self.board.king(color);
        self.attackers(king.location, color.toggle())
    }

    pub fn in_check(&self, color: Color) -> bool {
        !self.checkers(color).is_empty()
    }

    /// Whether nothing stands between `piece` and `target`. Only sliders can
    /// be blocked; the scanner has already confirmed the geometry.
    fn has_clear_line(&self, piece: &Piece, target: Square) -> bool {
        if !piece.is_sliding() {
            return true;
        }

        let dir = match Direction::unit_between(piece.location, target) {
            Some(dir) => dir,
            None => return false,
        };

        for sq in movement::ray(piece.location, dir, piece.max_steps()) {
            if sq == target {
                return true;
            }

            if !self.board.is_empty(sq) {
                return false;
            }
        }

        false
    }
}

//
// Move validation
//

impl<'a> MoveValidator<'a> {
    /// Classifies and validates a proposed move. On success the returned
    /// `Move` describes everything `Board::commit` has to do. A pawn reaching
    /// the last rank becomes `promotion`, or a queen if none is given.
    pub fn validate(
        &self,
        piece: &Piece,
        destination: Square,
        promotion: Option<PieceKind>,
    ) -> Result<Move, Rejection> {
        let piece = self.on_board(piece);
        if destination == piece.location {
            return Err(Rejection::NotInMoveset);
        }

        let delta = Direction::between(piece.location, destination);
        if piece.kind == PieceKind::King && delta.rank == 0 && delta.file.abs() == 2 {
            self.castling(&piece, destination)?;
            let mov = Move::castle(piece.location, destination);
            self.ensure_king_safe(piece.color, &mov)?;
            return Ok(mov);
        }

        if let Some(other) = self.board.piece_at(destination) {
            if other.color == piece.color {
                return Err(Rejection::FriendlyOccupied);
            }
        }

        if piece.kind == PieceKind::Pawn
            && piece.pawn_captures().contains(&delta)
            && self.board.is_empty(destination)
        {
            self.en_passant(&piece, destination)?;
            let mov = Move::en_passant(piece.location, destination);
            self.ensure_king_safe(piece.color, &mov)?;
            return Ok(mov);
        }

        if !self.legal_destinations(&piece).test(destination) {
            return Err(Rejection::NotInMoveset);
        }

        let mov = if piece.promotes_on(destination) {
            let kind = promotion.unwrap_or(PieceKind::Queen);
            if !capability(kind).promotable {
                debug!("pawn may not promote to {:?}", kind);
                return Err(Rejection::NotInMoveset);
            }

            Move::promotion(piece.location, destination, kind)
        } else {
            Move::normal(piece.location, destination)
        };

        self.ensure_king_safe(piece.color, &mov)?;
        Ok(mov)
    }

    /// Checks the castling preconditions for moving `king` to `destination`.
    /// On success, returns where the companion rook starts and where it lands.
    pub fn castling(
        &self,
        king: &Piece,
        destination: Square,
    ) -> Result<(Square, Square), Rejection> {
        let blocked = Err(Rejection::CastlingBlocked);
        if king.kind != PieceKind::King || king.has_moved {
            return blocked;
        }

        let home = king.color.home_rank();
        let origin = king.location;
        if origin.rank() != home || destination.rank() != home || origin.file() != 4 {
            return blocked;
        }

        let rook_file = match destination.file() {
            6 => 7,
            2 => 0,
            _ => return blocked,
        };

        match self.board.piece_at(Square::new(home, rook_file)) {
            Some(rook)
                if rook.kind == PieceKind::Rook && rook.color == king.color && !rook.has_moved => {}
            _ => {
                debug!("castle to {} blocked: no unmoved rook", destination);
                return blocked;
            }
        }

        let (low, high) = if rook_file > origin.file() {
            (origin.file() + 1, rook_file)
        } else {
            (rook_file + 1, origin.file())
        };
        if (low..high).any(|file| !self.board.is_empty(Square::new(home, file))) {
            debug!("castle to {} blocked: path occupied", destination);
            return blocked;
        }

        // The king may not start in, pass through, or land on an attacked square.
        let (low, high) = if destination.file() > origin.file() {
            (origin.file(), destination.file())
        } else {
            (destination.file(), origin.file())
        };
        let enemy = king.color.toggle();
        if (low..=high).any(|file| self.is_attacked(Square::new(home, file), enemy)) {
            debug!("castle to {} blocked: path attacked", destination);
            return blocked;
        }

        let rook_destination = if rook_file == 7 {
            destination.file() - 1
        } else {
            destination.file() + 1
        };
        Ok((Square::new(home, rook_file), Square::new(home, rook_destination)))
    }

    /// Checks whether `pawn` may capture en passant by moving to
    /// `destination`. The enemy pawn beside it must have arrived there with a
    /// double step on the opponent's last move, which is read off the past
    /// board. On success, returns the square of the pawn being taken.
    pub fn en_passant(&self, pawn: &Piece, destination: Square) -> Result<Square, Rejection> {
        let unavailable = Err(Rejection::EnPassantUnavailable);
        if pawn.kind != PieceKind::Pawn || !self.board.is_empty(destination) {
            return unavailable;
        }

        let delta = Direction::between(pawn.location, destination);
        if !pawn.pawn_captures().contains(&delta) {
            return unavailable;
        }

        let enemy = pawn.color.toggle();
        let victim_square = Square::new(pawn.location.rank(), destination.file());
        match self.board.piece_at(victim_square) {
            Some(victim) if victim.kind == PieceKind::Pawn && victim.color == enemy => {}
            _ => return unavailable,
        }

        let start = Square::new(enemy.pawn_rank(), destination.file());
        if victim_square.rank() as i8 != start.rank() as i8 + 2 * enemy.forward() {
            return unavailable;
        }

        let past = match self.past {
            Some(past) => past,
            None => return unavailable,
        };

        let was_on_start = match past.piece_at(start) {
            Some(p) => p.kind == PieceKind::Pawn && p.color == enemy,
            None => false,
        };
        if !was_on_start || !past.is_empty(victim_square) || !self.board.is_empty(start) {
            return unavailable;
        }

        Ok(victim_square)
    }

    /// Plays `mov` on a snapshot and rejects it if `color`'s king ends up in check.
    fn ensure_king_safe(&self, color: Color, mov: &Move) -> Result<(), Rejection> {
        let mut hypothetical = self.board.snapshot();
        hypothetical.commit(mov);
        if MoveValidator::new(&hypothetical, None).in_check(color) {
            trace!("{} rejected: leaves {} king in check", mov, color);
            return Err(Rejection::SelfCheck);
        }

        Ok(())
    }

    /// The board's own copy of `piece`. Asking about a piece that isn't
    /// where it says it is is a bug.
    fn on_board(&self, piece: &Piece) -> Piece {
        match self.board.piece_at(piece.location) {
            Some(current) if current.kind == piece.kind && current.color == piece.color => current,
            _ => panic!(
                "invalid move: no {:?} {:?} at {}",
                piece.color, piece.kind, piece.location
            ),
        }
    }

    /// Every fully legal move for `piece`. Promotions are listed once, as a queen.
    pub fn moves_for(&self, piece: &Piece) -> Vec<Move> {
        self.legal_destinations(piece)
            .iter()
            .filter_map(|dest| self.validate(piece, dest, None).ok())
            .collect()
    }
}

//
// Terminal states
//

impl<'a> MoveValidator<'a> {
    /// Whether the king of `color` has a destination it can move to safely.
    pub fn king_has_safe_move(&self, color: Color) -> bool {
        let king = self.board.king(color);
        self.legal_destinations(&king)
            .iter()
            .any(|dest| self.validate(&king, dest, None).is_ok())
    }

    /// Checkmate: in check, no safe king move, and the check can be neither
    /// captured nor blocked. A double check can only be answered by the king.
    pub fn is_checkmate(&self, color: Color) -> bool {
        let checkers = self.checkers(color);
        if checkers.is_empty() {
            return false;
        }

        if self.king_has_safe_move(color) {
            return false;
        }

        if checkers.len() > 1 {
            return true;
        }

        let checker = checkers[0];
        let king = self.board.king(color);
        let targets = interception_squares(&checker, king.location);
        for piece in self.board.pieces(color) {
            if piece.kind == PieceKind::King {
                continue;
            }

            for dest in self.legal_destinations(&piece).iter() {
                let captures_in_passing = piece.kind == PieceKind::Pawn
                    && dest.file() != piece.location.file()
                    && self.board.is_empty(dest)
                    && Square::new(piece.location.rank(), dest.file()) == checker.location;
                if !targets.test(dest) && !captures_in_passing {
                    continue;
                }

                if self.validate(&piece, dest, None).is_ok() {
                    debug!("{} answers check from {}", piece.location, checker.location);
                    return false;
                }
            }
        }

        true
    }

    /// Stalemate: not in check, yet nothing of `color`'s has a legal move.
    pub fn is_stalemate(&self, color: Color) -> bool {
        if self.in_check(color) || self.king_has_safe_move(color) {
            return false;
        }

        self.board
            .pieces(color)
            .filter(|piece| piece.kind != PieceKind::King)
            .all(|piece| self.moves_for(&piece).is_empty())
    }

    pub fn check_state(&self, color: Color) -> CheckState {
        if self.in_check(color) {
            if self.is_checkmate(color) {
                CheckState::Checkmate(color)
            } else {
                CheckState::Check(color)
            }
        } else if self.is_stalemate(color) {
            CheckState::Stalemate
        } else {
            CheckState::Ongoing
        }
    }

    /// The result of the game with `color` to move.
    pub fn game_result(&self, color: Color) -> GameResult {
        match self.check_state(color) {
            CheckState::Checkmate(color) => GameResult::Checkmate(color),
            CheckState::Stalemate => GameResult::Stalemate,
            CheckState::Check(_) | CheckState::Ongoing => GameResult::Ongoing,
        }
    }
}

/// The squares on which a check from `checker` can be answered without
/// moving the king: the checker's own square, plus everything between a
/// sliding checker and the king.
pub fn interception_squares(checker: &Piece, king: Square) -> Bitboard {
    let mut squares = Bitboard::none();
    squares.set(checker.location);
    if !checker.is_sliding() {
        return squares;
    }

    if let Some(dir) = Direction::unit_between(checker.location, king) {
        for sq in movement::ray(checker.location, dir, checker.max_steps()) {
            if sq == king {
                break;
            }

            squares.set(sq);
        }
    }

    squares
}
