//! Constants for board defaults, evaluation weights, and search limits.
//!
//! The board itself is sized at runtime (see [`crate::config::GameConfig`]);
//! the values here are the classical setup and the tuning of the engine.

// =============================================================================
// Classical Setup
// =============================================================================

/// Default board width (files).
pub const DEFAULT_WIDTH: i32 = 9;

/// Default board height (ranks).
pub const DEFAULT_HEIGHT: i32 = 7;

/// Pawns per side, on the board and in reserve together.
pub const DEFAULT_PAWNS: u32 = 10;

/// Knights per side, on the board and in reserve together.
pub const DEFAULT_KNIGHTS: u32 = 6;

/// Number of knight columns on each flank of the home row.
pub const DEFAULT_FLANKING: i32 = 2;

/// Largest supported board dimension (files are lettered `a`..=`z`).
pub const MAX_DIMENSION: i32 = 26;

// =============================================================================
// Turn Rules
// =============================================================================

/// Most pieces that may relocate in a single turn.
pub const MAX_STEPS: usize = 3;

/// Consecutive passes after which passing is no longer offered.
pub const PASS_LIMIT: u8 = 2;

/// Occurrences of one position summary that make the game a draw.
pub const REPETITION_LIMIT: usize = 3;

/// A side whose live pieces plus reserves drop below this loses.
pub const MIN_MATERIAL: u32 = 4;

// =============================================================================
// Evaluation Weights
// =============================================================================

/// Static value of a pawn on the board.
pub const PAWN_VALUE: f64 = 1.0;

/// Static value of a knight on the board.
pub const KNIGHT_VALUE: f64 = 3.0;

/// Value of a pawn held in reserve.
pub const PAWN_RESERVE_VALUE: f64 = 1.0;

/// Value of a knight held in reserve.
pub const KNIGHT_RESERVE_VALUE: f64 = 3.0;

/// Value credited per pawn captured.
pub const PAWN_CAPTURE_VALUE: f64 = 0.8;

/// Value credited per knight captured.
pub const KNIGHT_CAPTURE_VALUE: f64 = 2.5;

/// Bonus per tile of distance from the nearest edges.
pub const CENTER_POSITION_VALUE: f64 = 0.1;

/// Bonus per legal destination (mobility).
pub const MOVE_VALUE: f64 = 0.01;

/// Magnitude of a decided game. Positive favours White.
pub const WIN_SCORE: f64 = 1000.0;

// =============================================================================
// Search Parameters
// =============================================================================

/// Rough node budget used to derive a depth when none is requested.
pub const NODE_BUDGET: f64 = 10_000.0;

/// Progress report period (number of root turns between reports).
pub const REPORT_PERIOD: usize = 100;

/// Width of the scout window in principal variation search.
pub const SCOUT_WINDOW: f64 = 1e-6;
