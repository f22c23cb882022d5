// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;

use std::fs;
use std::process;

use chess_rules::{layout, notation, CheckState, Game, GameResult};
use clap::{App, Arg, ArgMatches, SubCommand};

fn layout_arg() -> Arg<'static, 'static> {
    Arg::with_name("layout")
        .help("Saved game to start from instead of the starting position")
        .value_name("FILE")
        .short("-l")
        .long("--layout")
        .takes_value(true)
}

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .subcommand(
            SubCommand::with_name("moves")
                .about("List where the piece on a square may move")
                .arg(
                    Arg::with_name("SQUARE")
                        .help("Square of the piece, e.g. e2")
                        .required(true)
                        .index(1),
                )
                .arg(layout_arg()),
        )
        .subcommand(
            SubCommand::with_name("play")
                .about("Play a sequence of moves, e.g. e2e4 e7e5")
                .arg(
                    Arg::with_name("MOVES")
                        .help("Moves in coordinate notation")
                        .required(true)
                        .multiple(true)
                        .index(1),
                )
                .arg(layout_arg())
                .arg(
                    Arg::with_name("save")
                        .help("Where to save the game afterwards")
                        .value_name("FILE")
                        .short("-s")
                        .long("--save")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("status")
                .about("Show the board and whether the side to move is in check")
                .arg(layout_arg()),
        )
        .get_matches();

    let result = match matches.subcommand() {
        ("moves", Some(matches)) => run_moves(matches),
        ("play", Some(matches)) => run_play(matches),
        ("status", Some(matches)) => run_status(matches),
        _ => {
            println!("{}", matches.usage());
            Ok(())
        }
    };

    if let Err(msg) = result {
        eprintln!("error: {}", msg);
        process::exit(1);
    }
}

fn load_game(matches: &ArgMatches) -> Result<Game, String> {
    match matches.value_of("layout") {
        Some(path) => {
            let json = fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?;
            layout::from_json(&json).map_err(|e| format!("{}: {}", path, e))
        }
        None => Ok(Game::new()),
    }
}

fn run_moves(matches: &ArgMatches) -> Result<(), String> {
    let game = load_game(matches)?;
    let square = notation::parse_square(matches.value_of("SQUARE").unwrap_or_default())
        .map_err(|e| e.to_string())?;
    let piece = match game.board().piece_at(square) {
        Some(piece) => piece,
        None => return Err(format!("no piece on {}", square)),
    };

    let validator = chess_rules::MoveValidator::new(game.board(), game.previous_board());
    let moves = validator.moves_for(&piece);
    println!(
        "{} {} on {} (worth {}):",
        piece.color,
        piece.kind.name(),
        square,
        piece.value()
    );
    for mov in &moves {
        println!("  {} ({})", mov.destination, mov.category);
    }

    if moves.is_empty() {
        println!("  no legal moves");
    }

    Ok(())
}

fn run_play(matches: &ArgMatches) -> Result<(), String> {
    let mut game = load_game(matches)?;
    for text in matches.values_of("MOVES").into_iter().flatten() {
        let request = notation::parse_move(text).map_err(|e| format!("{}: {}", text, e))?;
        let piece = game
            .select_piece(request.origin)
            .map_err(|e| format!("{}: {}", text, e))?;
        let outcome = match request.promotion {
            Some(kind) => game.attempt_move_promoting(&piece, request.destination, kind),
            None => game.attempt_move(&piece, request.destination),
        };

        let category = outcome.map_err(|e| format!("{}: {}", text, e))?;
        println!("{} ({})", text, category);
        if game.game_result(game.side_to_move()) != GameResult::Ongoing {
            break;
        }
    }

    print_status(&game);
    if let Some(path) = matches.value_of("save") {
        let json = layout::to_json(&game).map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| format!("{}: {}", path, e))?;
        println!("saved to {}", path);
    }

    Ok(())
}

fn run_status(matches: &ArgMatches) -> Result<(), String> {
    let game = load_game(matches)?;
    print_status(&game);
    Ok(())
}

fn print_status(game: &Game) {
    println!();
    println!("{}", game.board());
    let side = game.side_to_move();
    match game.check_state(side) {
        CheckState::Checkmate(color) => println!("checkmate: {} loses", color),
        CheckState::Check(color) => println!("{} to move, in check", color),
        CheckState::Stalemate => println!("stalemate"),
        CheckState::Ongoing => println!("{} to move", side),
    }
}
