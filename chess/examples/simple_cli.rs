// Simple command-line application to play chess

use sanchess::{
    board::PrettyStyle,
    moves::{san, Make, Text},
    pgn, Color, Engine,
};
use std::io::{self, BufRead, Write};

const HELP: &str = "\
Enter a move in SAN (Nf3, exd5, O-O, e8=Q) or in coordinates (g1f3, e7e8q, e2 e4).
Commands:
  moves    list legal moves
  undo     take back the last move
  draw     offer a draw, or accept the opponent's offer
  decline  decline the opponent's draw offer
  resign   resign the game
  help     show this message";

fn main() {
    let mut stdin = io::stdin().lock();

    let mut engine = Engine::new();

    loop {
        if engine.is_over() {
            println!("Game finished: {}", engine.result());
            if let Some(reason) = engine.reason() {
                println!("Reason: {}", reason);
            }
            println!("Notation:");
            println!("{}", pgn::Writer::new().movetext(&engine).unwrap());
            break;
        }

        println!("{}", engine.board().pretty(PrettyStyle::Ascii));
        let side = match engine.side() {
            Color::White => "White",
            Color::Black => "Black",
        };
        if engine.is_check() {
            println!("{} is in check", side);
        }
        if let Some(offer) = engine.draw_offer() {
            println!("{} offers a draw", offer.name());
        }
        print!("{} move: ", side);
        io::stdout().flush().unwrap();
        let mut s = String::new();
        if stdin.read_line(&mut s).unwrap() == 0 {
            break;
        }
        let s = s.trim();

        let res = match s {
            "help" => {
                println!("{}", HELP);
                Ok(())
            }
            "moves" => {
                let moves: Vec<String> = engine
                    .legal_moves()
                    .iter()
                    .map(|mv| san::encode(&engine, mv))
                    .collect();
                println!("{}", moves.join(" "));
                Ok(())
            }
            "undo" => engine.undo().map(|mv| println!("Undone {}", mv)),
            "draw" => engine.request_draw(engine.side()).map(|_| ()),
            "decline" => engine.decline_draw(),
            "resign" => engine.resign(),
            _ => Text(s).find(&engine).and_then(|mv| {
                let notation = engine.san_with_suffix(&mv)?;
                engine.execute(mv)?;
                println!("Played {}", notation);
                Ok(())
            }),
        };
        if let Err(e) = res {
            println!("Error: {}", e);
        }

        println!();
    }
}
