//! Game records: parsing position summaries and saving/loading game logs.
//!
//! A game log is the board history, one [`Board::summary`] per line. Loading
//! rebuilds the position from the last line and restores the whole history,
//! so repetition counting continues where the saved game stopped. Capture
//! tallies are not part of a summary and restart at zero.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::board::Board;
use crate::constants::{MAX_DIMENSION, PASS_LIMIT};
use crate::piece::{Kind, Side};

/// Malformed position summary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SummaryError {
    #[error("missing board layout")]
    MissingLayout,

    #[error("unexpected character '{0}' in board layout")]
    BadSymbol(char),

    #[error("row {row} is {len} tiles wide, expected {width}")]
    RaggedRow { row: usize, len: i32, width: i32 },

    #[error("board of {width}x{height} is not supported")]
    BadDimensions { width: i32, height: i32 },

    #[error("expected 6 counters after the layout, found {0}")]
    FieldCount(usize),

    #[error("invalid counter: {0}")]
    BadCounter(String),
}

impl Board {
    /// Rebuild a board from one summary line. History starts empty.
    pub fn from_summary(summary: &str) -> Result<Board, SummaryError> {
        let summary = summary.trim();
        let rest = summary.strip_prefix('[').ok_or(SummaryError::MissingLayout)?;
        let (layout, counters) = rest.split_once(']').ok_or(SummaryError::MissingLayout)?;

        let too_big = |len: usize, height: usize| SummaryError::BadDimensions {
            width: i32::try_from(len).unwrap_or(i32::MAX),
            height: i32::try_from(height).unwrap_or(i32::MAX),
        };
        let limit = MAX_DIMENSION as usize;

        let mut rows: Vec<Vec<Option<(Side, Kind)>>> = Vec::new();
        for line in layout.split('/') {
            if rows.len() >= limit {
                return Err(too_big(0, rows.len() + 1));
            }
            let mut row = Vec::new();
            let mut run = 0usize;
            for c in line.chars() {
                if let Some(d) = c.to_digit(10) {
                    run = run
                        .checked_mul(10)
                        .and_then(|r| r.checked_add(d as usize))
                        .filter(|&r| row.len() + r <= limit)
                        .ok_or_else(|| too_big(usize::MAX, rows.len() + 1))?;
                    continue;
                }
                if row.len() + run >= limit {
                    return Err(too_big(row.len() + run + 1, rows.len() + 1));
                }
                row.extend(std::iter::repeat_n(None, run));
                run = 0;
                let kind = Kind::from_letter(c).ok_or(SummaryError::BadSymbol(c))?;
                let side = if c.is_ascii_uppercase() { Side::White } else { Side::Black };
                row.push(Some((side, kind)));
            }
            row.extend(std::iter::repeat_n(None, run));
            rows.push(row);
        }

        let width = rows[0].len() as i32;
        let height = rows.len() as i32;
        if !(1..=MAX_DIMENSION).contains(&width) || !(1..=MAX_DIMENSION).contains(&height) {
            return Err(SummaryError::BadDimensions { width, height });
        }

        let mut board = Board::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            if row.len() as i32 != width {
                return Err(SummaryError::RaggedRow {
                    row: y,
                    len: row.len() as i32,
                    width,
                });
            }
            for (x, cell) in row.iter().enumerate() {
                if let Some((side, kind)) = *cell {
                    board.place(side, kind, x as i32, y as i32);
                }
            }
        }

        let fields: Vec<&str> = counters.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(SummaryError::FieldCount(fields.len()));
        }
        let mut values = [0u32; 6];
        for (value, field) in values.iter_mut().zip(&fields) {
            *value = field
                .parse()
                .map_err(|_| SummaryError::BadCounter(field.to_string()))?;
        }
        if values[0] > PASS_LIMIT as u32 || values[5] > 1 {
            return Err(SummaryError::BadCounter(counters.trim().to_string()));
        }

        board.set_pass_counter(values[0] as u8);
        board.set_reserves(Side::White, values[1], values[2]);
        board.set_reserves(Side::Black, values[3], values[4]);
        board.set_side_to_move(if values[5] == 1 { Side::White } else { Side::Black });
        Ok(board)
    }
}

impl FromStr for Board {
    type Err = SummaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::from_summary(s)
    }
}

/// Write the game log of `board` to `path`.
pub fn save_game(board: &Board, path: &Path) -> Result<()> {
    let mut log = String::new();
    for line in board.history() {
        log.push_str(line);
        log.push('\n');
    }
    fs::write(path, log).with_context(|| format!("failed to write {}", path.display()))
}

/// Read a game log written by [`save_game`].
pub fn load_game(path: &Path) -> Result<Board> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    let last = lines
        .last()
        .with_context(|| format!("{} holds no positions", path.display()))?;

    let mut board = Board::from_summary(last)
        .with_context(|| format!("bad position on line {} of {}", lines.len(), path.display()))?;
    for line in &lines {
        board.push_history(line);
    }
    Ok(board)
}
