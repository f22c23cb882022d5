// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use crate::bitboard::Bitboard;
use crate::moves::Move;
use crate::piece::{capability, Piece};
use crate::types::{Color, PieceKind, Square, COLORS};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// What a player finds when they look at a square.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SquareContents {
    Empty,
    Friendly(Piece),
    Hostile(Piece),
}

/// The authoritative 8x8 grid. Every piece's `location` matches the cell it
/// sits in. The board applies moves mechanically; deciding whether a move is
/// allowed is the validator's job.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

//
// Board state getters
//

impl Board {
    pub fn new() -> Board {
        Board {
            cells: [[None; 8]; 8],
        }
    }

    pub fn from_start_position() -> Board {
        let mut board = Board::new();
        board.place_starting_position();
        board
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.cells[square.rank() as usize][square.file() as usize]
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    pub fn classify_square(&self, square: Square, asking: Color) -> SquareContents {
        match self.piece_at(square) {
            None => SquareContents::Empty,
            Some(piece) if piece.color == asking => SquareContents::Friendly(piece),
            Some(piece) => SquareContents::Hostile(piece),
        }
    }

    /// The set of occupied squares.
    pub fn occupancy(&self) -> Bitboard {
        self.all_pieces().map(|piece| piece.location).collect()
    }

    pub fn all_pieces<'a>(&'a self) -> impl Iterator<Item = Piece> + 'a {
        self.cells
            .iter()
            .flat_map(|rank| rank.iter())
            .filter_map(|&cell| cell)
    }

    pub fn pieces<'a>(&'a self, color: Color) -> impl Iterator<Item = Piece> + 'a {
        self.all_pieces().filter(move |piece| piece.color == color)
    }

    /// The king of the given color. A board without exactly one such king is
    /// not a chess position, and asking for it is a bug.
    pub fn king(&self, color: Color) -> Piece {
        let mut kings = self
            .pieces(color)
            .filter(|piece| piece.kind == PieceKind::King);
        let king = kings
            .next()
            .unwrap_or_else(|| panic!("invalid board: no {} king", color));
        assert!(
            kings.next().is_none(),
            "invalid board: more than one {} king",
            color
        );
        king
    }

    /// Number of kings of each color, indexed by `Color`.
    pub fn king_counts(&self) -> [usize; 2] {
        let mut counts = [0; 2];
        for &color in COLORS.iter() {
            counts[color as usize] = self
                .pieces(color)
                .filter(|piece| piece.kind == PieceKind::King)
                .count();
        }

        counts
    }

    /// An independent copy for hypothetical evaluation. Nothing done to the
    /// snapshot is visible on `self`.
    pub fn snapshot(&self) -> Board {
        self.clone()
    }
}

//
// Move application and board manipulation
//

impl Board {
    pub fn place_starting_position(&mut self) {
        for &color in COLORS.iter() {
            for (file, &kind) in BACK_RANK.iter().enumerate() {
                let square = Square::new(color.home_rank(), file as u8);
                self.put(Piece::new(kind, color, square));
            }

            for file in 0..8 {
                let square = Square::new(color.pawn_rank(), file);
                self.put(Piece::new(PieceKind::Pawn, color, square));
            }
        }
    }

    pub fn add_piece(&mut self, kind: PieceKind, color: Color, square: Square) -> Result<(), ()> {
        if self.piece_at(square).is_some() {
            return Err(());
        }

        self.put(Piece::new(kind, color, square));
        Ok(())
    }

    /// Like `add_piece`, for a position whose history is unknown: the piece
    /// counts as moved unless it stands on one of its starting squares.
    pub fn restore_piece(
        &mut self,
        kind: PieceKind,
        color: Color,
        square: Square,
    ) -> Result<(), ()> {
        if self.piece_at(square).is_some() {
            return Err(());
        }

        let mut piece = Piece::new(kind, color, square);
        piece.has_moved = !is_starting_square(kind, color, square);
        self.put(piece);
        Ok(())
    }

    /// Takes the piece off `square`, if there is one.
    pub fn remove_piece(&mut self, square: Square) -> Option<Piece> {
        self.cells[square.rank() as usize][square.file() as usize].take()
    }

    /// Moves the piece on `origin` to `destination`, evicting whatever stood
    /// there. Returns the evicted piece.
    pub fn apply_move(&mut self, origin: Square, destination: Square) -> Option<Piece> {
        let mut piece = self
            .remove_piece(origin)
            .unwrap_or_else(|| panic!("invalid move: no piece at source square {}", origin));
        let captured = self.remove_piece(destination);
        piece.location = destination;
        piece.has_moved = true;
        self.put(piece);
        captured
    }

    /// The rook half of a castle. The king half goes through `apply_move`.
    pub fn apply_castle(&mut self, rook_origin: Square, rook_destination: Square) {
        let rook = self
            .piece_at(rook_origin)
            .expect("invalid move: castle without rook");
        assert_eq!(rook.kind, PieceKind::Rook, "invalid move: castle without rook");
        assert!(
            self.is_empty(rook_destination),
            "invalid move: piece at rook target square"
        );
        self.apply_move(rook_origin, rook_destination);
    }

    /// Clears the square of a pawn captured in passing.
    pub fn remove_captured_en_passant(&mut self, square: Square) -> Piece {
        self.remove_piece(square)
            .expect("invalid move: no piece at capture target")
    }

    /// Replaces the pawn on `square` with a new piece of `kind`.
    pub fn promote(&mut self, square: Square, kind: PieceKind) {
        let pawn = self
            .piece_at(square)
            .expect("invalid promotion: no piece at square");
        assert_eq!(pawn.kind, PieceKind::Pawn, "invalid promotion: not a pawn");
        assert!(
            capability(kind).promotable,
            "invalid promotion piece: {:?}",
            kind
        );

        let mut promoted = Piece::new(kind, pawn.color, square);
        promoted.has_moved = true;
        self.cells[square.rank() as usize][square.file() as usize] = Some(promoted);
    }

    /// Applies every part of a validated move. Returns the captured piece, if
    /// any.
    pub fn commit(&mut self, mov: &Move) -> Option<Piece> {
        let mut captured = self.apply_move(mov.origin, mov.destination);
        if let Some((rook_origin, rook_destination)) = mov.rook_relocation() {
            self.apply_castle(rook_origin, rook_destination);
        }

        if let Some(square) = mov.en_passant_capture() {
            captured = Some(self.remove_captured_en_passant(square));
        }

        if let Some(kind) = mov.promotion {
            self.promote(mov.destination, kind);
        }

        captured
    }

    fn put(&mut self, piece: Piece) {
        let square = piece.location;
        self.cells[square.rank() as usize][square.file() as usize] = Some(piece);
    }
}

/// Whether a piece of this kind and color occupies `square` in the starting
/// position.
pub fn is_starting_square(kind: PieceKind, color: Color, square: Square) -> bool {
    match kind {
        PieceKind::Pawn => square.rank() == color.pawn_rank(),
        _ => square.rank() == color.home_rank() && BACK_RANK[square.file() as usize] == kind,
    }
}

//
// Trait implementations
//

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rank in 0..8 {
            for file in 0..8 {
                if let Some(piece) = self.piece_at(Square::new(rank, file)) {
                    write!(f, " {} ", piece)?;
                } else {
                    write!(f, " . ")?;
                }
            }

            writeln!(f, "| {}", 8 - rank)?;
        }

        for _ in 0..8 {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for file in b'a'..=b'h' {
            write!(f, " {} ", file as char)?;
        }

        writeln!(f)?;
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}
