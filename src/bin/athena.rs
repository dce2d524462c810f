// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;

use std::io::{self, BufRead, Write};
use std::process;
use std::time::Instant;

use athena::eval::PieceSquareEvaluator;
use athena::search::Searcher;
use athena::{perft, MoveGenerator, MoveVec, Position};
use clap::{App, Arg, ArgMatches, SubCommand};

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about("Chess engine with a fixed-depth alpha-beta search")
        .subcommand(
            SubCommand::with_name("perft")
                .about("PERFT analysis of board positions")
                .arg(
                    Arg::with_name("FEN")
                        .help("FEN string for a board position")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::with_name("depth")
                        .help("Depth of move tree to search")
                        .value_name("DEPTH")
                        .short("-d")
                        .long("--depth")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("evaluate")
                .about("Search a board position for its best move")
                .arg(
                    Arg::with_name("FEN")
                        .help("FEN string for a board position")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::with_name("depth")
                        .help("Depth of move tree to search")
                        .value_name("DEPTH")
                        .short("-d")
                        .long("--depth")
                        .takes_value(true),
                ),
        )
        .get_matches();

    if let Some(matches) = matches.subcommand_matches("perft") {
        run_perft(matches);
    }

    if let Some(matches) = matches.subcommand_matches("evaluate") {
        run_evaluate(matches);
    }

    run_interactive();
}

fn run_perft(matches: &ArgMatches) -> ! {
    let fen = matches.value_of("FEN").unwrap();
    let depth = value_t_or_exit!(matches, "depth", u32);
    let pos = parse_fen_or_exit(fen);

    println!("fen:   {}", fen);
    println!("depth: {}", depth);
    println!();
    println!("{}", pos);
    for i in 1..=depth {
        let start = Instant::now();
        let results = perft(&pos, i);
        let duration = start.elapsed();
        let ms = duration.as_secs() * 1000 + u64::from(duration.subsec_millis());
        println!("perft({}) = {} ({} ms)", i, results, ms);
    }

    process::exit(0);
}

fn run_evaluate(matches: &ArgMatches) -> ! {
    let fen = matches.value_of("FEN").unwrap();
    let depth = value_t_or_exit!(matches, "depth", u32);
    let mut pos = parse_fen_or_exit(fen);

    println!("fen:   {}", fen);
    println!("depth: {}", depth);
    println!();
    println!("{}", pos);
    search_and_report(&mut pos, depth);
    process::exit(0);
}

/// The default mode from the original engine: prompt for a FEN string
/// (empty means the starting position) and a depth, list the legal
/// moves, then search and report.
fn run_interactive() -> ! {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    print!("Enter FEN notation (empty for the starting position): ");
    io::stdout().flush().unwrap();
    let fen = lines.next().unwrap_or_else(|| Ok(String::new())).unwrap();
    let mut pos = if fen.trim().is_empty() {
        Position::from_start_position()
    } else {
        parse_fen_or_exit(fen.trim())
    };

    print!("Enter max depth: ");
    io::stdout().flush().unwrap();
    let depth_line = lines.next().unwrap_or_else(|| Ok(String::new())).unwrap();
    let depth: u32 = match depth_line.trim().parse() {
        Ok(depth) => depth,
        Err(_) => {
            eprintln!("invalid depth: {}", depth_line.trim());
            process::exit(1);
        }
    };

    println!();
    println!("{}", pos);

    let generator = MoveGenerator::new();
    let mut moves = MoveVec::new();
    generator.generate_moves(&mut pos, &mut moves);
    println!("{} legal moves:", moves.len());
    for mov in &moves {
        println!("  {}", mov);
    }
    println!();

    search_and_report(&mut pos, depth);
    process::exit(0);
}

fn search_and_report(pos: &mut Position, depth: u32) {
    let start = Instant::now();
    let mut searcher: Searcher<PieceSquareEvaluator> = Searcher::new(depth);
    let result = searcher.search(pos);
    let duration = start.elapsed();

    println!(
        "searched {} nodes in {}.{:03} seconds",
        result.nodes_searched,
        duration.as_secs(),
        duration.subsec_millis()
    );
    match result.best_move {
        Some(mov) => {
            println!("------------------");
            println!("{}  (score {:.4})", mov, result.score);
            println!("------------------");
        }
        None => println!("no legal moves from this position"),
    }

    let variation: Vec<String> = searcher
        .principal_variation()
        .iter()
        .filter_map(|m| m.map(|mov| mov.to_string()))
        .collect();
    if !variation.is_empty() {
        println!("principal variation:");
        for line in variation {
            println!("  {}", line);
        }
    }
}

fn parse_fen_or_exit(fen: &str) -> Position {
    match Position::from_fen(fen) {
        Ok(pos) => pos,
        Err(err) => {
            eprintln!("invalid FEN: {}", err);
            process::exit(1);
        }
    }
}
