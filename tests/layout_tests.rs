// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use chess_rules::{layout, notation};
use chess_rules::{Board, Color, Game, LayoutError, MoveCategory, PieceKind, Rejection, Square};

fn sq(text: &str) -> Square {
    notation::parse_square(text).unwrap()
}

fn play(game: &mut Game, text: &str) -> Result<MoveCategory, Rejection> {
    let request = notation::parse_move(text).unwrap();
    let piece = game.select_piece(request.origin).unwrap();
    game.attempt_move(&piece, request.destination)
}

fn inventory(board: &Board) -> Vec<(PieceKind, Color, Square)> {
    let mut pieces: Vec<_> = board
        .all_pieces()
        .map(|piece| (piece.kind, piece.color, piece.location))
        .collect();
    pieces.sort_by_key(|&(_, _, location)| location);
    pieces
}

#[test]
fn starting_position_round_trip() {
    let game = Game::new();
    let json = layout::to_json(&game).unwrap();
    let loaded = layout::from_json(&json).unwrap();

    assert_eq!(inventory(game.board()), inventory(loaded.board()));
    assert_eq!(Color::White, loaded.side_to_move());
    assert_eq!(None, loaded.last_move());
    assert_eq!(game.board(), loaded.board());
}

#[test]
fn mid_game_round_trip() {
    let mut game = Game::new();
    for mov in &["e2e4", "d7d5", "e4d5", "g8f6"] {
        play(&mut game, mov).unwrap();
    }

    let loaded = layout::from_json(&layout::to_json(&game).unwrap()).unwrap();
    assert_eq!(inventory(game.board()), inventory(loaded.board()));
    assert_eq!(Color::White, loaded.side_to_move());
    assert_eq!(game.last_move(), loaded.last_move());
}

#[test]
fn en_passant_survives_reload() {
    let mut game = Game::new();
    for mov in &["e2e4", "a7a6", "e4e5", "d7d5"] {
        play(&mut game, mov).unwrap();
    }

    let mut loaded = layout::from_json(&layout::to_json(&game).unwrap()).unwrap();
    assert_eq!(Ok(MoveCategory::EnPassant), play(&mut loaded, "e5d6"));
    assert!(loaded.board().is_empty(sq("d5")));
}

#[test]
fn hand_written_layout() {
    let json = r#"{
        "rows": [
            [null, null, null, null, "King:black", null, null, null],
            [null, null, null, null, null, null, null, null],
            [null, null, null, null, null, null, null, null],
            [null, null, null, null, null, null, null, null],
            [null, null, null, null, null, null, null, null],
            [null, null, null, null, null, null, null, null],
            [null, null, null, null, null, null, null, null],
            [null, null, null, null, "King:white", null, null, "Rook:white"]
        ],
        "side_to_move": "white"
    }"#;
    let mut game = layout::from_json(json).unwrap();
    assert_eq!(3, game.board().occupancy().count());

    // pieces on their home squares count as unmoved, so castling is open.
    assert_eq!(Ok(MoveCategory::Castle), play(&mut game, "e1g1"));
}

#[test]
fn moved_rook_cannot_castle_after_reload() {
    let json = r#"{
        "rows": [
            [null, null, null, null, "King:black", null, null, null],
            [null, null, null, null, null, null, null, null],
            [null, null, null, null, null, null, null, null],
            [null, null, null, null, null, null, null, null],
            [null, null, null, null, null, null, null, null],
            [null, null, null, null, null, null, null, null],
            [null, null, null, null, null, null, null, "Rook:white"],
            [null, null, null, null, "King:white", null, null, null]
        ],
        "side_to_move": "white"
    }"#;
    let mut game = layout::from_json(json).unwrap();
    play(&mut game, "h2h1").unwrap();
    play(&mut game, "e8d8").unwrap();
    assert_eq!(Err(Rejection::CastlingBlocked), play(&mut game, "e1g1"));
}

#[test]
fn two_white_kings() {
    let json = r#"{
        "rows": [
            [null, null, null, null, "King:black", null, null, null],
            [null, null, null, null, null, null, null, null],
            [null, null, null, null, null, null, null, null],
            [null, null, null, null, null, null, null, null],
            [null, null, null, null, null, null, null, null],
            [null, null, null, null, null, null, null, null],
            [null, null, null, null, null, null, null, null],
            ["King:white", null, null, null, "King:white", null, null, null]
        ],
        "side_to_move": "black"
    }"#;
    assert_eq!(
        Some(LayoutError::KingCount(Color::White, 2)),
        layout::from_json(json).err()
    );
}

#[test]
fn unknown_piece() {
    let json = r#"{
        "rows": [
            [null, null, null, null, "King:black", null, null, null],
            [null, null, null, null, null, null, null, null],
            [null, null, null, null, null, null, null, null],
            [null, null, null, null, "Archbishop:black", null, null, null],
            [null, null, null, null, null, null, null, null],
            [null, null, null, null, null, null, null, null],
            [null, null, null, null, null, null, null, null],
            [null, null, null, null, "King:white", null, null, null]
        ],
        "side_to_move": "white"
    }"#;
    assert_eq!(
        Some(LayoutError::UnknownCell("Archbishop:black".to_owned())),
        layout::from_json(json).err()
    );
}
