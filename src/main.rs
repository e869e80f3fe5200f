//! Command-line driver for the touchdown tablebase: generate, inspect, and
//! play from a solved database.
//!
//! This binary is a thin shell over [`touchdown`]'s public API. It is not
//! part of the core solver and is deliberately unambitious: argument parsing
//! is a plain match over `std::env::args()`, in the same spirit as the
//! library's own teacher crate drives its CLI without an argument-parsing
//! dependency.

use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use touchdown::board::{Board, Outcome, TerminalValue};
use touchdown::index::{is_valid_index, INITIAL_INDEX};
use touchdown::solver::Solver;
use touchdown::tablebase::TableBase;

fn main() -> ExitCode {
    flexi_logger::Logger::try_with_env_or_str("info")
        .and_then(|logger| logger.start())
        .ok();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let mut args = env::args().skip(1);
    let command = args.next().ok_or_else(usage_error)?;

    match command.as_str() {
        "generate" => {
            let path = args.next().ok_or_else(usage_error)?;
            let known_path = args
                .next()
                .map(PathBuf::from)
                .unwrap_or_else(|| env::temp_dir().join("touchdown.known"));
            generate(&path, &known_path)
        }
        "dump" => {
            let path = args.next().ok_or_else(usage_error)?;
            let idx = parse_index(&args.next().ok_or_else(usage_error)?)?;
            dump(&path, idx)
        }
        "summarize" => {
            let path = args.next().ok_or_else(usage_error)?;
            summarize(&path)
        }
        "play" => {
            let path = args.next().ok_or_else(usage_error)?;
            play(&path)
        }
        _ => Err(usage_error()),
    }
}

fn usage_error() -> anyhow::Error {
    anyhow!(
        "usage: touchdown <generate|dump|summarize|play> <tablebase-path> [args]\n\
         \n\
         generate <path> [known-path]   solve the game and write the value tablebase\n\
         dump <path> <index>            print the board at an index and its value\n\
         summarize <path>               count WIN/LOSS/unknown entries in a tablebase\n\
         play <path>                    play the greedy best line from the initial position"
    )
}

fn parse_index(s: &str) -> Result<u32> {
    let s = s.trim();
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16)
    } else {
        s.parse::<u32>()
    };
    parsed.with_context(|| format!("could not parse '{s}' as an index"))
}

fn generate(path: &str, known_path: &Path) -> Result<()> {
    log::info!("generating tablebase at {path} (known file: {})", known_path.display());

    let value = TableBase::create(path)?;
    let known = TableBase::create(known_path)?;
    let mut solver = Solver::new(value, known);

    let progress = ProgressBar::new_spinner();
    progress.set_style(ProgressStyle::default_spinner().template("{spinner} pass {msg}"));

    loop {
        let updated = solver.pass();
        progress.set_message(&solver.pass_count.to_string());
        progress.tick();
        if !updated {
            break;
        }
    }
    progress.finish_with_message(&format!("converged after {} passes", solver.pass_count));

    Ok(())
}

fn dump(path: &str, idx: u32) -> Result<()> {
    if !is_valid_index(idx) {
        println!("{idx:#x} is not a valid index");
        return Ok(());
    }

    let board = Board::decode(idx);
    println!("{}", render_board(&board));
    println!("short: {}", render_short(&board));

    let tb = TableBase::open_existing(path)?;
    println!("value: {}", if tb.read_bit(idx) { "WIN" } else { "LOSS" });
    Ok(())
}

fn summarize(path: &str) -> Result<()> {
    let tb = TableBase::open_existing(path)?;

    let mut wins = 0u64;
    let mut losses = 0u64;
    let mut invalid = 0u64;
    let mut illegal = 0u64;

    for idx in 0u32..(1 << 24) {
        if !is_valid_index(idx) {
            invalid += 1;
            continue;
        }
        let board = Board::decode(idx);
        if matches!(board.classify(), Outcome::Terminal(TerminalValue::Win)) {
            illegal += 1;
            continue;
        }
        if tb.read_bit(idx) {
            wins += 1;
        } else {
            losses += 1;
        }
    }

    println!("invalid indices:       {invalid}");
    println!("illegal positions:     {illegal}");
    println!("legal WIN positions:   {wins}");
    println!("legal LOSS positions:  {losses}");
    Ok(())
}

fn play(path: &str) -> Result<()> {
    let tb = TableBase::open_existing(path)?;
    let mut board = Board::decode(INITIAL_INDEX);
    let mut ply = 0;

    loop {
        println!("ply {ply}:\n{}", render_board(&board));
        match board.classify() {
            Outcome::Terminal(TerminalValue::Win) => {
                println!("side to move wins (terminal)");
                break;
            }
            Outcome::Terminal(TerminalValue::Loss) => {
                println!("side to move loses (terminal)");
                break;
            }
            Outcome::NonTerminal(nt) => {
                let successors = nt.legal_moves();
                if successors.is_empty() {
                    println!("side to move has no legal moves: loses");
                    break;
                }

                // greedily pick a successor that is LOSS for the opponent if
                // the current side wins, otherwise any successor is as good
                // as any other against optimal play
                let we_win = tb.read_bit(board.encode());
                let mut chosen = None;
                for successor in successors.iter() {
                    let opponent_wins = tb.read_bit(successor.encode());
                    if we_win && !opponent_wins {
                        chosen = Some(successor);
                        break;
                    }
                    if !we_win {
                        chosen = Some(successor);
                    }
                }

                board = chosen.ok_or_else(|| anyhow!("no successor found for a non-terminal board"))?;
                ply += 1;
            }
        }

        if ply > 64 {
            return Err(anyhow!("greedy playback did not terminate within 64 plies"));
        }
    }

    Ok(())
}

fn render_board(board: &Board) -> String {
    let position = board.position();
    let occ = position as u16;
    let own = (position >> 16) as u16;
    let mut out = String::new();
    for row in 0..4 {
        for col in 0..4 {
            let square = row * 4 + col;
            let mask = 1u16 << square;
            let ch = if own & mask != 0 {
                'X'
            } else if occ & mask != 0 {
                'O'
            } else {
                '.'
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

fn render_short(board: &Board) -> String {
    let position = board.position();
    let occ = position as u16;
    let own = (position >> 16) as u16;
    let mut out = String::new();
    for square in 0..16 {
        let mask = 1u16 << square;
        let ch = if own & mask != 0 {
            'X'
        } else if occ & mask != 0 {
            'O'
        } else {
            '.'
        };
        out.push(ch);
        if square % 4 == 3 {
            out.push(' ');
        }
    }
    out
}
