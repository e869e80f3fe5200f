//! End-to-end exercise of the public API: decode the starting position,
//! solve the full index space into a tablebase on disk, and read the result
//! back through the same interface a caller of the library would use.

use touchdown::board::{Board, Outcome, TerminalValue};
use touchdown::index::{is_valid_index, INITIAL_INDEX};
use touchdown::solver::Solver;
use touchdown::tablebase::TableBase;

fn temp_tablebase_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "touchdown-integration-{}-{}.tb",
        name,
        std::process::id()
    ))
}

#[test]
fn initial_position_decodes_to_a_nonterminal_board() {
    assert!(is_valid_index(INITIAL_INDEX));

    let board = Board::decode(INITIAL_INDEX);
    assert_eq!(board.encode(), INITIAL_INDEX);

    match board.classify() {
        Outcome::NonTerminal(nt) => {
            // four own pawns on the back rank, each can only step straight ahead
            assert_eq!(nt.legal_moves().len(), 4);
        }
        Outcome::Terminal(_) => panic!("initial position should not be terminal"),
    }
}

#[test]
fn full_solve_writes_a_tablebase_readable_from_a_fresh_handle() {
    let value_path = temp_tablebase_path("value");
    let known_path = temp_tablebase_path("known");

    let value = TableBase::create(&value_path).unwrap();
    let known = TableBase::create(&known_path).unwrap();
    let solver = Solver::new(value, known);
    let solved = solver.solve();
    solved.flush().unwrap();
    drop(solved);

    // re-open as a fresh handle, the way the CLI's `dump`/`summarize`/`play`
    // subcommands do, rather than reusing the handle the solver wrote through
    let tablebase = TableBase::open_existing(&value_path).unwrap();

    // the reference result: the first player to move from the starting
    // position loses with best play
    assert!(!tablebase.read_bit(INITIAL_INDEX));

    // a board with no pawns left for the side to move is an immediate loss,
    // and every terminal position the solver could reach is classified
    let board = Board::decode(0x0000_000F);
    assert!(matches!(board.classify(), Outcome::Terminal(TerminalValue::Loss)));

    std::fs::remove_file(&value_path).ok();
    std::fs::remove_file(&known_path).ok();
}
