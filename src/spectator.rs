// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The attacker scanner. Given a target square it reports every piece that
//! is *lined up* with it: on its rank, its file, either diagonal, or a knight
//! jump away. That is a cheap superset of the real attackers; the rule engine
//! narrows it down with `is_actually_attacking` and then checks obstruction.
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::movement;
use crate::piece::{capability, Piece};
use crate::types::{Color, Direction, PieceKind, Square, DIAGONALS, KNIGHT_JUMPS};

struct LineTable {
    table: [Bitboard; 64],
}

impl LineTable {
    pub fn new() -> LineTable {
        let mut lt = LineTable {
            table: [Bitboard::none(); 64],
        };

        let knight_jumps: Vec<Direction> = KNIGHT_JUMPS
            .iter()
            .flat_map(|&dir| vec![dir, dir.negate()])
            .collect();
        let diagonals: Vec<Direction> = DIAGONALS
            .iter()
            .flat_map(|&dir| vec![dir, dir.negate()])
            .collect();

        for sq in Square::all() {
            let mut board = Bitboard::rank_mask(sq.rank()) | Bitboard::file_mask(sq.file());
            board |= movement::rays(sq, &diagonals, 7);
            board |= movement::rays(sq, &knight_jumps, 1);
            board.unset(sq);
            lt.table[sq.index()] = board;
        }

        lt
    }

    pub fn lines(&self, sq: Square) -> Bitboard {
        self.table[sq.index()]
    }
}

lazy_static! {
    static ref LINE_TABLE: LineTable = LineTable::new();
}

/// The squares sharing a rank, file or diagonal with `square`, or a knight
/// jump away from it.
pub fn lines_through(square: Square) -> Bitboard {
    LINE_TABLE.lines(square)
}

/// Every piece lined up with `target`, of either color, ignoring whether
/// anything stands in between.
pub fn attackers_of(board: &Board, target: Square) -> Vec<Piece> {
    (lines_through(target) & board.occupancy())
        .iter()
        .filter_map(|sq| board.piece_at(sq))
        .collect()
}

/// Pieces of `color` that could hit `target` if nothing were in the way.
pub fn candidate_attackers(board: &Board, target: Square, color: Color) -> Vec<Piece> {
    attackers_of(board, target)
        .into_iter()
        .filter(|piece| piece.color == color && is_actually_attacking(piece, target))
        .collect()
}

/// Whether `piece` hits `target` by its own movement rules, ignoring
/// obstruction. Alignment alone is not enough: pawns only strike one step
/// diagonally forward, kings only next door, and a slider only along its own
/// directions.
pub fn is_actually_attacking(piece: &Piece, target: Square) -> bool {
    let delta = Direction::between(piece.location, target);
    if delta.rank == 0 && delta.file == 0 {
        return false;
    }

    match piece.kind {
        PieceKind::Pawn => piece.pawn_captures().contains(&delta),
        PieceKind::King => delta.rank.abs() <= 1 && delta.file.abs() <= 1,
        PieceKind::Knight => capability(PieceKind::Knight).directions.contains(&delta),
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            match Direction::unit_between(piece.location, target) {
                Some(unit) => capability(piece.kind).directions.contains(&unit),
                None => false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(pieces: &[(PieceKind, Color, (u8, u8))]) -> Board {
        let mut board = Board::new();
        for &(kind, color, (rank, file)) in pieces {
            board
                .add_piece(kind, color, Square::new(rank, file))
                .unwrap();
        }
        board
    }

    #[test]
    fn lines_from_corner() {
        let lines = lines_through(Square::new(0, 0));
        // 7 on the rank, 7 on the file, 7 on the diagonal, 2 knight jumps.
        assert_eq!(23, lines.count());
        assert!(!lines.test(Square::new(0, 0)));
    }

    #[test]
    fn target_locking_candidates() {
        let board = board_with(&[
            (PieceKind::King, Color::White, (0, 0)),
            (PieceKind::Knight, Color::Black, (3, 4)),
            (PieceKind::Queen, Color::Black, (5, 1)),
            (PieceKind::Rook, Color::Black, (5, 2)),
            (PieceKind::Queen, Color::White, (5, 5)),
            (PieceKind::Rook, Color::White, (5, 6)),
        ]);

        let target = Square::new(5, 5);
        let mut found: Vec<_> = candidate_attackers(&board, target, Color::Black)
            .into_iter()
            .map(|piece| piece.location)
            .collect();
        found.sort();
        assert_eq!(
            vec![Square::new(3, 4), Square::new(5, 1), Square::new(5, 2)],
            found
        );

        assert!(candidate_attackers(&board, Square::new(0, 0), Color::Black).is_empty());
    }

    #[test]
    fn scanner_includes_both_colors() {
        let board = board_with(&[
            (PieceKind::Rook, Color::White, (4, 0)),
            (PieceKind::Bishop, Color::Black, (1, 1)),
            (PieceKind::Pawn, Color::Black, (6, 1)),
        ]);
        let found = attackers_of(&board, Square::new(4, 4));
        assert_eq!(2, found.len());
    }

    #[test]
    fn pawns_attack_forward_diagonals_only() {
        let white = Piece::new(PieceKind::Pawn, Color::White, Square::new(4, 4));
        assert!(is_actually_attacking(&white, Square::new(3, 3)));
        assert!(is_actually_attacking(&white, Square::new(3, 5)));
        assert!(!is_actually_attacking(&white, Square::new(3, 4)));
        assert!(!is_actually_attacking(&white, Square::new(5, 5)));

        let black = Piece::new(PieceKind::Pawn, Color::Black, Square::new(4, 4));
        assert!(is_actually_attacking(&black, Square::new(5, 3)));
        assert!(!is_actually_attacking(&black, Square::new(3, 3)));
    }

    #[test]
    fn kings_attack_adjacent_only() {
        let king = Piece::new(PieceKind::King, Color::White, Square::new(4, 4));
        assert!(is_actually_attacking(&king, Square::new(3, 3)));
        assert!(is_actually_attacking(&king, Square::new(4, 5)));
        assert!(!is_actually_attacking(&king, Square::new(4, 6)));
        assert!(!is_actually_attacking(&king, Square::new(2, 2)));
    }

    #[test]
    fn sliders_follow_their_own_lines() {
        let rook = Piece::new(PieceKind::Rook, Color::White, Square::new(4, 4));
        assert!(is_actually_attacking(&rook, Square::new(4, 0)));
        assert!(!is_actually_attacking(&rook, Square::new(2, 2)));

        let bishop = Piece::new(PieceKind::Bishop, Color::White, Square::new(4, 4));
        assert!(is_actually_attacking(&bishop, Square::new(2, 2)));
        assert!(!is_actually_attacking(&bishop, Square::new(4, 0)));
        assert!(!is_actually_attacking(&bishop, Square::new(2, 3)));
    }
}
