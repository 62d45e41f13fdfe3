//! Turns: one ply for the side to move.
//!
//! A turn is a pass, a reinforcement from reserve, or up to
//! [`MAX_STEPS`] piece relocations played simultaneously.
//!
//! Text form used by the protocol and in logs:
//! - `pass`
//! - `P@c7` / `K@c7` - place a pawn / knight from reserve on c7
//! - `c7-c6 d7-d6` - one to three steps, separated by spaces
//!
//! Files are letters starting at `a` (x = 0), ranks start at 1 (y = 0).

use std::fmt;
use std::str::FromStr;

use crate::constants::{MAX_DIMENSION, MAX_STEPS};
use crate::piece::Kind;

/// A tile on the board as `(x, y)`.
pub type Tile = (i32, i32);

/// Format a tile as `<file><rank>`, e.g. `(2, 6)` -> `c7`.
pub fn str_tile((x, y): Tile) -> String {
    match u8::try_from(x) {
        Ok(f) if x < MAX_DIMENSION => format!("{}{}", (b'a' + f) as char, y + 1),
        _ => format!("?{}", y + 1),
    }
}

/// Parse a tile in `<file><rank>` form. Returns `None` if malformed.
pub fn parse_tile(s: &str) -> Option<Tile> {
    let mut chars = s.chars();
    let file = chars.next()?.to_ascii_lowercase();
    if !file.is_ascii_lowercase() {
        return None;
    }
    let rank: i32 = chars.as_str().parse().ok()?;
    if !(1..=MAX_DIMENSION).contains(&rank) {
        return None;
    }
    Some(((file as u8 - b'a') as i32, rank - 1))
}

/// A single relocation (or capture) of one piece.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Step {
    pub from: Tile,
    pub to: Tile,
}

impl Step {
    pub fn new(from: Tile, to: Tile) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", str_tile(self.from), str_tile(self.to))
    }
}

/// One ply. Immutable once built.
#[derive(Copy, Clone, Debug)]
pub enum Turn {
    Pass,
    Reinforce {
        kind: Kind,
        to: Tile,
    },
    Move {
        steps: [Step; MAX_STEPS],
        len: u8,
    },
}

impl Turn {
    /// Build a move turn from 1..=3 steps.
    pub fn moves(list: &[Step]) -> Option<Turn> {
        if list.is_empty() || list.len() > MAX_STEPS {
            return None;
        }
        let mut steps = [list[0]; MAX_STEPS];
        steps[..list.len()].copy_from_slice(list);
        Some(Turn::Move {
            steps,
            len: list.len() as u8,
        })
    }

    pub fn single(step: Step) -> Turn {
        Turn::Move {
            steps: [step; MAX_STEPS],
            len: 1,
        }
    }

    /// The relocations of a move turn; empty for pass and reinforcement.
    pub fn steps(&self) -> &[Step] {
        match self {
            Turn::Move { steps, len } => &steps[..*len as usize],
            _ => &[],
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Turn::Pass)
    }

    /// Compare two turns ignoring the order of their steps.
    pub fn same_as(&self, other: &Turn) -> bool {
        match (self, other) {
            (Turn::Move { .. }, Turn::Move { .. }) => {
                let mut a = self.steps().to_vec();
                let mut b = other.steps().to_vec();
                a.sort();
                b.sort();
                a == b
            }
            _ => self == other,
        }
    }
}

// Unused step slots are padding and take no part in equality.
impl PartialEq for Turn {
    fn eq(&self, other: &Turn) -> bool {
        match (self, other) {
            (Turn::Pass, Turn::Pass) => true,
            (Turn::Reinforce { kind: a, to: p }, Turn::Reinforce { kind: b, to: q }) => {
                a == b && p == q
            }
            (Turn::Move { .. }, Turn::Move { .. }) => self.steps() == other.steps(),
            _ => false,
        }
    }
}

impl Eq for Turn {}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Turn::Pass => write!(f, "pass"),
            Turn::Reinforce { kind, to } => write!(f, "{}@{}", kind.letter(), str_tile(*to)),
            Turn::Move { .. } => {
                for (i, step) in self.steps().iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{step}")?;
                }
                Ok(())
            }
        }
    }
}

/// Malformed turn text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TurnParseError {
    #[error("empty turn")]
    Empty,

    #[error("invalid tile: {0}")]
    Tile(String),

    #[error("invalid unit kind: {0}")]
    Kind(String),

    #[error("invalid step: {0}")]
    Step(String),

    #[error("a turn moves at most {MAX_STEPS} pieces (got {0})")]
    TooManySteps(usize),
}

impl FromStr for Turn {
    type Err = TurnParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TurnParseError::Empty);
        }
        if s.eq_ignore_ascii_case("pass") {
            return Ok(Turn::Pass);
        }

        if let Some((kind, tile)) = s.split_once('@') {
            let mut letters = kind.chars();
            let kind = match (letters.next(), letters.next()) {
                (Some(c), None) => Kind::from_letter(c),
                _ => None,
            }
            .ok_or_else(|| TurnParseError::Kind(kind.to_string()))?;
            let to = parse_tile(tile).ok_or_else(|| TurnParseError::Tile(tile.to_string()))?;
            return Ok(Turn::Reinforce { kind, to });
        }

        let parts: Vec<&str> = s.split_whitespace().collect();
        if parts.len() > MAX_STEPS {
            return Err(TurnParseError::TooManySteps(parts.len()));
        }
        let mut steps = Vec::with_capacity(parts.len());
        for part in parts {
            let (from, to) = part
                .split_once('-')
                .ok_or_else(|| TurnParseError::Step(part.to_string()))?;
            let from = parse_tile(from).ok_or_else(|| TurnParseError::Tile(from.to_string()))?;
            let to = parse_tile(to).ok_or_else(|| TurnParseError::Tile(to.to_string()))?;
            steps.push(Step::new(from, to));
        }
        Turn::moves(&steps).ok_or(TurnParseError::Empty)
    }
}
