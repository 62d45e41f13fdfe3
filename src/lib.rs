//! Sutran-Rust: rules engine and game-tree search for Sutran.
//!
//! Sutran is a two-player game on a small rectangular board. Each side has
//! pawns and knights; a turn is a pass, a reinforcement from reserve onto the
//! home row, or up to three pieces moving at once. A piece can only be
//! captured while it is outnumbered around its own tile, and a capture removes
//! the attacker as well.
//!
//! ## Modules
//!
//! - [`constants`] - Classical setup, evaluation weights, search limits
//! - [`config`] - Board and army size
//! - [`piece`] - Sides, unit kinds and movement rules
//! - [`turn`] - Turns and their text form
//! - [`board`] - Game state, turn generation and execution, outcome, evaluation
//! - [`search`] - Alpha-beta and principal variation search
//! - [`playout`] - Random turns and random self-play
//! - [`record`] - Position summaries and game logs
//! - [`protocol`] - Text command protocol for front ends
//!
//! ## Example
//!
//! ```
//! use sutran_rust::board::Board;
//! use sutran_rust::search::choose_turn;
//!
//! // Classical 9x7 game
//! let mut board = Board::default();
//!
//! // Ask the engine for a reply and play it
//! let result = choose_turn(&board, 1).unwrap();
//! board.apply_turn(&result.turn);
//! println!("{}: {}", result.turn, board.summary());
//! ```

pub mod board;
pub mod config;
pub mod constants;
pub mod piece;
pub mod playout;
pub mod protocol;
pub mod record;
pub mod search;
pub mod turn;
