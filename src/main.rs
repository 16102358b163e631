// src/main.rs

use std::io::{self, Write};

use anyhow::Result;

use sable::api::{self, Promotion};
use sable::game::defs::{Side, Square, ENGINE_IS_WHITE};
use sable::game::moves::MoveGen;
use sable::search::search::Search;

fn main() -> Result<()> {
    let mut pos = api::new_position();
    let mut generator = MoveGen::new();
    let mut search = Search::new();

    println!(
        "You play {}; the engine plays {}.",
        if ENGINE_IS_WHITE { "Black" } else { "White" },
        if ENGINE_IS_WHITE { "White" } else { "Black" },
    );
    println!("{pos}");

    loop {
        let side = if pos.engine_to_move { Side::Engine } else { Side::Player };

        generator.generate(&pos, side);
        if generator.sorted_moves().is_empty() {
            if api::king_in_check(&pos, side) {
                match side {
                    Side::Engine => println!("Checkmate. You win!"),
                    Side::Player => println!("Checkmate. The engine wins."),
                }
            } else {
                println!("Stalemate.");
            }
            break;
        }

        if side == Side::Engine {
            let mv = api::request_engine_move(&mut search, &mut pos)
                .expect("the engine had legal moves");
            println!("Engine plays {mv}.");
            println!("{pos}");
            if api::king_in_check(&pos, Side::Player) {
                println!("Check!");
            }
            continue;
        }

        let line = input("Your move (e.g. e2e4, e7e8q): ")?;
        let Some((from, to, promotion)) = parse_move(&line) else {
            eprintln!("Could not read '{line}'.");
            continue;
        };
        if !api::apply_player_move(&mut generator, &mut pos, from, to, promotion) {
            eprintln!("Illegal move: {line}");
            continue;
        }
        println!("{pos}");
        if api::king_in_check(&pos, Side::Engine) {
            println!("Check!");
        }
    }

    Ok(())
}

fn input(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buffer = String::new();
    io::stdin().read_line(&mut buffer)?;
    Ok(buffer.trim().to_string())
}

/// Accept exactly 4 (e2e4) or 5 (e7e8q) characters in standard coordinates,
/// the optional fifth naming the promotion piece.
fn parse_move(text: &str) -> Option<(Square, Square, Option<Promotion>)> {
    let bytes = text.as_bytes();
    if bytes.len() != 4 && bytes.len() != 5 {
        return None;
    }
    let from = square_from_coords(bytes[0], bytes[1])?;
    let to = square_from_coords(bytes[2], bytes[3])?;
    let promotion = if bytes.len() == 5 {
        Some(match bytes[4].to_ascii_lowercase() {
            b'q' => Promotion::Queen,
            b'r' => Promotion::Rook,
            b'b' => Promotion::Bishop,
            b'n' => Promotion::Knight,
            _ => return None,
        })
    } else {
        None
    };
    Some((from, to, promotion))
}

fn square_from_coords(file: u8, rank: u8) -> Option<Square> {
    let file = match file {
        b'a'..=b'h' => file - b'a',
        b'A'..=b'H' => file - b'A',
        _ => return None,
    };
    let rank = match rank {
        b'1'..=b'8' => rank - b'1',
        _ => return None,
    };
    Some(Square::from_file_rank(file, rank))
}
