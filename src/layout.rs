// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Saved games. A layout is eight rows of eight cells, each either `null` or
//! a `"<Kind>:<color>"` string such as `"Rook:black"`, together with the side
//! to move and the last move played. Row 0 is Black's home rank.
//!
//! The history of a saved game is not kept. On load, a piece counts as moved
//! unless it stands on one of its starting squares, and the board before the
//! last move is rebuilt by walking that move's piece back to its origin,
//! which is all en passant needs.
use std::error::Error;
use std::fmt;

use crate::board::Board;
use crate::game::Game;
use crate::moves::Move;
use crate::types::{Color, PieceKind, Square, COLORS};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    Json(String),
    RowCount(usize),
    CellCount(usize),
    UnknownCell(String),
    KingCount(Color, usize),
    LastMove,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LayoutError::Json(msg) => write!(f, "malformed layout: {}", msg),
            LayoutError::RowCount(n) => write!(f, "expected 8 rows, found {}", n),
            LayoutError::CellCount(row) => write!(f, "row {} does not have 8 cells", row),
            LayoutError::UnknownCell(cell) => write!(f, "unknown piece '{}'", cell),
            LayoutError::KingCount(color, n) => {
                write!(f, "expected one {} king, found {}", color, n)
            }
            LayoutError::LastMove => f.write_str("last move does not match the board"),
        }
    }
}

impl Error for LayoutError {}

impl From<serde_json::Error> for LayoutError {
    fn from(err: serde_json::Error) -> LayoutError {
        LayoutError::Json(err.to_string())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedMove {
    pub origin: [u8; 2],
    pub destination: [u8; 2],
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub rows: Vec<Vec<Option<String>>>,
    pub side_to_move: Color,
    #[serde(default)]
    pub last_move: Option<SavedMove>,
}

impl Layout {
    pub fn from_game(game: &Game) -> Layout {
        let board = game.board();
        let rows = (0..8)
            .map(|rank| {
                (0..8)
                    .map(|file| {
                        board
                            .piece_at(Square::new(rank, file))
                            .map(|piece| format!("{}:{}", piece.kind.name(), piece.color))
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        let last_move = game.last_move().map(|mov| SavedMove {
            origin: [mov.origin.rank(), mov.origin.file()],
            destination: [mov.destination.rank(), mov.destination.file()],
        });

        Layout {
            rows,
            side_to_move: game.side_to_move(),
            last_move,
        }
    }

    pub fn into_game(self) -> Result<Game, LayoutError> {
        if self.rows.len() != 8 {
            return Err(LayoutError::RowCount(self.rows.len()));
        }

        let mut board = Board::new();
        for (rank, row) in self.rows.iter().enumerate() {
            if row.len() != 8 {
                return Err(LayoutError::CellCount(rank));
            }

            for (file, cell) in row.iter().enumerate() {
                if let Some(cell) = cell {
                    let (kind, color) = parse_cell(cell)?;
                    let square = Square::new(rank as u8, file as u8);
                    board
                        .restore_piece(kind, color, square)
                        .map_err(|_| LayoutError::UnknownCell(cell.clone()))?;
                }
            }
        }

        let counts = board.king_counts();
        for &color in COLORS.iter() {
            if counts[color as usize] != 1 {
                return Err(LayoutError::KingCount(color, counts[color as usize]));
            }
        }

        let (previous, last_move) = match self.last_move {
            Some(saved) => {
                let (previous, mov) = rewind(&board, saved, self.side_to_move.toggle())?;
                (Some(previous), Some(mov))
            }
            None => (None, None),
        };

        debug!(
            "loaded layout with {} pieces, {} to move",
            board.occupancy().count(),
            self.side_to_move
        );
        Ok(Game::from_parts(board, previous, last_move, self.side_to_move))
    }
}

pub fn to_json(game: &Game) -> Result<String, LayoutError> {
    Ok(serde_json::to_string_pretty(&Layout::from_game(game))?)
}

pub fn from_json(json: &str) -> Result<Game, LayoutError> {
    let layout: Layout = serde_json::from_str(json)?;
    layout.into_game()
}

fn parse_cell(cell: &str) -> Result<(PieceKind, Color), LayoutError> {
    let unknown = || LayoutError::UnknownCell(cell.to_owned());
    let mut parts = cell.splitn(2, ':');
    let kind = parts
        .next()
        .and_then(PieceKind::from_name)
        .ok_or_else(unknown)?;
    let color = match parts.next() {
        Some("white") => Color::White,
        Some("black") => Color::Black,
        _ => return Err(unknown()),
    };

    Ok((kind, color))
}

/// Rebuilds the board as it stood before `saved` was played by `mover`.
fn rewind(board: &Board, saved: SavedMove, mover: Color) -> Result<(Board, Move), LayoutError> {
    let square = |coords: [u8; 2]| {
        if coords[0] < 8 && coords[1] < 8 {
            Ok(Square::new(coords[0], coords[1]))
        } else {
            Err(LayoutError::LastMove)
        }
    };
    let origin = square(saved.origin)?;
    let destination = square(saved.destination)?;

    let piece = board.piece_at(destination).ok_or(LayoutError::LastMove)?;
    if piece.color != mover || !board.is_empty(origin) {
        return Err(LayoutError::LastMove);
    }

    let mut previous = board.snapshot();
    previous.remove_piece(destination);
    previous
        .restore_piece(piece.kind, piece.color, origin)
        .map_err(|_| LayoutError::LastMove)?;
    Ok((previous, Move::normal(origin, destination)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells() {
        assert_eq!(
            Ok((PieceKind::Rook, Color::Black)),
            parse_cell("Rook:black")
        );
        assert_eq!(
            Err(LayoutError::UnknownCell("Rook".to_owned())),
            parse_cell("Rook")
        );
        assert_eq!(
            Err(LayoutError::UnknownCell("Dragon:white".to_owned())),
            parse_cell("Dragon:white")
        );
        assert_eq!(
            Err(LayoutError::UnknownCell("Pawn:green".to_owned())),
            parse_cell("Pawn:green")
        );
    }

    #[test]
    fn starting_layout() {
        let layout = Layout::from_game(&Game::new());
        assert_eq!(8, layout.rows.len());
        assert_eq!(Some("Rook:black".to_owned()), layout.rows[0][0]);
        assert_eq!(Some("King:white".to_owned()), layout.rows[7][4]);
        assert_eq!(None, layout.rows[4][4]);
        assert_eq!(Color::White, layout.side_to_move);
        assert_eq!(None, layout.last_move);
    }

    #[test]
    fn wrong_shapes() {
        let mut layout = Layout::from_game(&Game::new());
        layout.rows[3].pop();
        assert_eq!(Err(LayoutError::CellCount(3)), layout.into_game().map(|_| ()));

        let mut layout = Layout::from_game(&Game::new());
        layout.rows.pop();
        assert_eq!(Err(LayoutError::RowCount(7)), layout.into_game().map(|_| ()));
    }

    #[test]
    fn missing_king() {
        let mut layout = Layout::from_game(&Game::new());
        layout.rows[0][4] = None;
        assert_eq!(
            Err(LayoutError::KingCount(Color::Black, 0)),
            layout.into_game().map(|_| ())
        );
    }

    #[test]
    fn bad_json() {
        match from_json("{\"rows\": 3}") {
            Err(LayoutError::Json(_)) => {}
            other => panic!("unexpected {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn last_move_must_match_board() {
        let mut layout = Layout::from_game(&Game::new());
        layout.side_to_move = Color::Black;
        layout.last_move = Some(SavedMove {
            origin: [6, 4],
            destination: [4, 4],
        });
        assert_eq!(Err(LayoutError::LastMove), layout.into_game().map(|_| ()));
    }
}
