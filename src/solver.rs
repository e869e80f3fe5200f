//! The retrograde fixed-point solver
//!
//! [`Solver::solve`] classifies every index in `[0, 2^24)` as WIN or LOSS for
//! the side to move, by repeatedly sweeping the index space and resolving
//! any position whose successors (or whose terminal status) are already
//! decided, until a full sweep makes no further progress.

use log::{debug, info};
use std::time::Instant;

use crate::board::{Board, Outcome, TerminalValue};
use crate::index::is_valid_index;
use crate::tablebase::{TableBase, INDEX_COUNT};

/// Drives retrograde classification of the entire touchdown index space
///
/// Holds the two tablebases the classification recurrence reads and writes:
/// `value[i]` (meaningful once `known[i]` is set) and `known[i]`.
pub struct Solver {
    value: TableBase,
    known: TableBase,
    /// Number of full passes performed so far (for diagnostics only)
    pub pass_count: usize,
}

impl Solver {
    /// Creates a solver over a fresh value tablebase and a fresh known
    /// tablebase
    pub fn new(value: TableBase, known: TableBase) -> Self {
        Self {
            value,
            known,
            pass_count: 0,
        }
    }

    /// Classifies every index, returning the populated value tablebase
    ///
    /// Consumes `self` because, once converged, the `known` tablebase has no
    /// further use to the caller: only `value` is the deliverable.
    pub fn solve(mut self) -> TableBase {
        loop {
            let pass_start = Instant::now();
            let updated = self.pass();
            self.pass_count += 1;
            info!(
                "pass {} complete in {:.2?} (updated = {})",
                self.pass_count,
                pass_start.elapsed(),
                updated
            );
            if !updated {
                break;
            }
        }
        self.value
    }

    /// Performs one sweep over the full index space, returning whether any
    /// index transitioned from unknown to known during the sweep
    ///
    /// Exposed publicly so a caller (such as the CLI's `generate` command)
    /// can drive the loop itself and render its own progress between
    /// passes, instead of only getting the all-at-once [`Solver::solve`].
    pub fn pass(&mut self) -> bool {
        let mut updated = false;
        let mut resolved_this_pass = 0usize;

        for idx in 0..INDEX_COUNT as u32 {
            if self.known.read_bit(idx) {
                continue;
            }

            if let Some(value) = self.classify(idx) {
                self.known.set_bit(idx, true);
                self.value.set_bit(idx, value);
                updated = true;
                resolved_this_pass += 1;
            }
        }

        debug!("resolved {} previously-unknown indices this pass", resolved_this_pass);
        updated
    }

    /// Attempts to classify a single index against the current state of the
    /// `known`/`value` tablebases
    ///
    /// Returns `Some(true)` for WIN, `Some(false)` for LOSS, or `None` if the
    /// index cannot yet be classified (at least one successor is still
    /// unknown, and no successor is a known LOSS for the opponent).
    fn classify(&self, idx: u32) -> Option<bool> {
        if !is_valid_index(idx) {
            // invalid indices are sentinel WINs so the recurrence never tips
            // toward LOSS because of a board that does not really exist
            return Some(true);
        }

        let board = Board::decode(idx);
        match board.classify() {
            Outcome::Terminal(TerminalValue::Win) => Some(true),
            Outcome::Terminal(TerminalValue::Loss) => Some(false),
            Outcome::NonTerminal(nt) => {
                let successors = nt.legal_moves();
                if successors.is_empty() {
                    // no legal move: the side to move has lost
                    return Some(false);
                }

                let mut all_known = true;
                for successor in successors.iter() {
                    let child_idx = successor.encode();
                    if !self.known.read_bit(child_idx) {
                        all_known = false;
                        continue;
                    }
                    if !self.value.read_bit(child_idx) {
                        // a successor is LOSS for the opponent: we win by
                        // playing into it, regardless of any other
                        // still-unknown successor
                        return Some(true);
                    }
                }

                if all_known {
                    // every successor is known and WIN for the opponent
                    Some(false)
                } else {
                    None
                }
            }
        }
    }
}
