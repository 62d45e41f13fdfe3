//! Random playouts.
//!
//! A playout plays uniformly random legal turns until the game is decided or
//! a turn limit is reached. Used by the `random` strategy, the self-play demo
//! and the property tests.

use crate::board::{Board, Outcome};
use crate::turn::Turn;

/// Pick a uniformly random legal turn. `None` if there is none.
pub fn random_turn(board: &Board, rng: &mut fastrand::Rng) -> Option<Turn> {
    let turns = board.possible_turns();
    if turns.is_empty() {
        return None;
    }
    Some(turns[rng.usize(..turns.len())])
}

/// Play random turns until the game is over, no turn is left, or
/// `max_turns` turns have been played.
///
/// Returns the outcome at the point play stopped and the number of turns
/// played.
pub fn playout(board: &mut Board, rng: &mut fastrand::Rng, max_turns: usize) -> (Outcome, usize) {
    let mut played = 0;
    while played < max_turns {
        let outcome = board.outcome();
        if outcome.is_over() {
            return (outcome, played);
        }
        let Some(turn) = random_turn(board, rng) else {
            break;
        };
        board.apply_turn(&turn);
        played += 1;
    }
    (board.outcome(), played)
}
