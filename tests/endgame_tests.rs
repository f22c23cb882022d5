// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use chess_rules::notation;
use chess_rules::{
    Board, CheckState, Color, Game, GameResult, MoveCategory, PieceKind, Rejection, Square,
};

fn sq(text: &str) -> Square {
    notation::parse_square(text).unwrap()
}

fn board_with(pieces: &[(PieceKind, Color, &str)]) -> Board {
    let mut board = Board::new();
    for &(kind, color, square) in pieces {
        board.add_piece(kind, color, sq(square)).unwrap();
    }
    board
}

fn play(game: &mut Game, text: &str) -> Result<MoveCategory, Rejection> {
    let request = notation::parse_move(text).unwrap();
    let piece = game.select_piece(request.origin).unwrap();
    match request.promotion {
        Some(kind) => game.attempt_move_promoting(&piece, request.destination, kind),
        None => game.attempt_move(&piece, request.destination),
    }
}

#[test]
fn fools_mate() {
    let mut game = Game::new();
    for mov in &["f2f3", "e7e5", "g2g4", "d8h4"] {
        assert!(play(&mut game, mov).is_ok(), "{} refused", mov);
    }

    // white is checkmated
    assert!(game.is_in_check(Color::White));
    assert_eq!(CheckState::Checkmate(Color::White), game.check_state(Color::White));
    assert_eq!(GameResult::Checkmate(Color::White), game.game_result(Color::White));
    assert!(game.legal_moves().is_empty());
}

#[test]
fn queen_and_knight_mate() {
    let mut board = Board::new();
    board
        .add_piece(PieceKind::King, Color::White, Square::new(7, 6))
        .unwrap();
    board
        .add_piece(PieceKind::Queen, Color::Black, Square::new(6, 6))
        .unwrap();
    board
        .add_piece(PieceKind::Knight, Color::Black, Square::new(4, 5))
        .unwrap();
    board
        .add_piece(PieceKind::King, Color::Black, Square::new(0, 0))
        .unwrap();
    let game = Game::from_parts(board.clone(), None, None, Color::White);
    assert_eq!(GameResult::Checkmate(Color::White), game.game_result(Color::White));

    // with the knight elsewhere, the king simply takes the queen.
    board.remove_piece(Square::new(4, 5));
    board
        .add_piece(PieceKind::Knight, Color::Black, Square::new(4, 1))
        .unwrap();
    let game = Game::from_parts(board, None, None, Color::White);
    assert_eq!(GameResult::Ongoing, game.game_result(Color::White));
    assert_eq!(CheckState::Check(Color::White), game.check_state(Color::White));
}

#[test]
fn rooks_and_queen_stalemate() {
    let mut board = Board::new();
    for &(kind, rank, file) in &[
        (PieceKind::Rook, 0, 5),
        (PieceKind::Rook, 0, 7),
        (PieceKind::Queen, 6, 3),
        (PieceKind::King, 0, 0),
    ] {
        board
            .add_piece(kind, Color::Black, Square::new(rank, file))
            .unwrap();
    }
    board
        .add_piece(PieceKind::King, Color::White, Square::new(7, 6))
        .unwrap();

    let game = Game::from_parts(board, None, None, Color::White);
    assert!(!game.is_in_check(Color::White));
    assert_eq!(GameResult::Stalemate, game.game_result(Color::White));
}

#[test]
fn stalemate_smoke() {
    let board = board_with(&[
        (PieceKind::King, Color::Black, "h8"),
        (PieceKind::King, Color::White, "f7"),
        (PieceKind::Queen, Color::White, "g6"),
    ]);
    let game = Game::from_parts(board, None, None, Color::Black);

    // black's turn to move. black is not in check but black has no legal moves.
    assert!(!game.is_in_check(Color::Black));
    assert_eq!(CheckState::Stalemate, game.check_state(Color::Black));
    assert!(game.legal_moves().is_empty());
}

#[test]
fn stalemate_needs_every_piece_stuck() {
    let board = board_with(&[
        (PieceKind::King, Color::Black, "h8"),
        (PieceKind::Pawn, Color::Black, "a5"),
        (PieceKind::King, Color::White, "f7"),
        (PieceKind::Queen, Color::White, "g6"),
    ]);
    let game = Game::from_parts(board, None, None, Color::Black);

    // the pawn can still move, so the game goes on.
    assert_eq!(GameResult::Ongoing, game.game_result(Color::Black));
    assert_eq!(1, game.legal_moves().len());
}

#[test]
fn back_rank_mate() {
    let board = board_with(&[
        (PieceKind::King, Color::Black, "g8"),
        (PieceKind::Pawn, Color::Black, "f7"),
        (PieceKind::Pawn, Color::Black, "g7"),
        (PieceKind::Pawn, Color::Black, "h7"),
        (PieceKind::Rook, Color::White, "a8"),
        (PieceKind::King, Color::White, "e1"),
    ]);
    let game = Game::from_parts(board, None, None, Color::Black);
    assert_eq!(CheckState::Checkmate(Color::Black), game.check_state(Color::Black));
}

#[test]
fn back_rank_check_can_be_blocked() {
    let board = board_with(&[
        (PieceKind::King, Color::Black, "g8"),
        (PieceKind::Pawn, Color::Black, "f7"),
        (PieceKind::Pawn, Color::Black, "g7"),
        (PieceKind::Pawn, Color::Black, "h7"),
        (PieceKind::Bishop, Color::Black, "d6"),
        (PieceKind::Rook, Color::White, "a8"),
        (PieceKind::King, Color::White, "e1"),
    ]);
    let mut game = Game::from_parts(board, None, None, Color::Black);
    assert_eq!(CheckState::Check(Color::Black), game.check_state(Color::Black));

    // the bishop drops back to f8.
    assert_eq!(Ok(MoveCategory::Normal), play(&mut game, "d6f8"));
    assert!(!game.is_in_check(Color::Black));
}

#[test]
fn pinned_blocker_cannot_save_the_king() {
    let pieces = [
        (PieceKind::King, Color::Black, "h8"),
        (PieceKind::Bishop, Color::Black, "g7"),
        (PieceKind::Pawn, Color::Black, "h7"),
        (PieceKind::Rook, Color::White, "a8"),
        (PieceKind::King, Color::White, "e1"),
    ];

    // the bishop can drop back to f8 and block.
    let game = Game::from_parts(board_with(&pieces), None, None, Color::Black);
    assert_eq!(CheckState::Check(Color::Black), game.check_state(Color::Black));

    // unless it is pinned to the king along the long diagonal.
    let mut board = board_with(&pieces);
    board
        .add_piece(PieceKind::Bishop, Color::White, sq("e5"))
        .unwrap();
    let mut game = Game::from_parts(board, None, None, Color::Black);
    assert_eq!(CheckState::Checkmate(Color::Black), game.check_state(Color::Black));
    assert_eq!(Err(Rejection::SelfCheck), play(&mut game, "g7f8"));
}

#[test]
fn checking_pawn_taken_en_passant() {
    let board = board_with(&[
        (PieceKind::King, Color::Black, "h5"),
        (PieceKind::Pawn, Color::Black, "h4"),
        (PieceKind::Pawn, Color::White, "g2"),
        (PieceKind::Knight, Color::White, "e4"),
        (PieceKind::Rook, Color::White, "a6"),
        (PieceKind::King, Color::White, "f3"),
    ]);
    let mut game = Game::from_parts(board, None, None, Color::White);

    // the double step gives check and every king move is covered.
    assert_eq!(Ok(MoveCategory::Normal), play(&mut game, "g2g4"));
    assert!(game.is_in_check(Color::Black));
    assert_eq!(CheckState::Check(Color::Black), game.check_state(Color::Black));

    // taking the pawn in passing is the only way out.
    let moves = game.legal_moves();
    assert_eq!(1, moves.len());
    assert_eq!(MoveCategory::EnPassant, moves[0].category);
    assert_eq!(Ok(MoveCategory::EnPassant), play(&mut game, "h4g3"));
    assert!(game.board().is_empty(sq("g4")));
    assert!(!game.is_in_check(Color::Black));
}
