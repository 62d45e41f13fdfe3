//! Pieces and their movement rules.
//!
//! A piece only knows its side, kind and tile. Every rule that depends on the
//! surroundings (blocking, capture eligibility, mobility) takes the owning
//! [`Board`] as an argument, so pieces never hold references into a board.
//!
//! Movement rules:
//! - A pawn steps one tile along a rank or file.
//! - A knight moves up to Manhattan distance two: one or two tiles along a
//!   rank or file, or one tile diagonally.
//! - Skirmish rule: a piece may not slip past an enemy. Tiles flanking the
//!   source across the direction of travel must not hold an enemy, and a
//!   two-tile knight move needs an empty middle tile with no enemy beside it.
//! - A piece may only be captured while it is outnumbered in its own 3x3
//!   neighbourhood.

use std::fmt;

use crate::board::Board;
use crate::constants::{CENTER_POSITION_VALUE, KNIGHT_VALUE, MOVE_VALUE, PAWN_VALUE};
use crate::turn::{Step, Tile};

/// One of the two players.
///
/// White moves first, owns the last rank and is written in upper case.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Index into per-side counter arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }

    /// `+1.0` for White, `-1.0` for Black. Scores are always from White's view.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Side::White => 1.0,
            Side::Black => -1.0,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "white"),
            Side::Black => write!(f, "black"),
        }
    }
}

/// Unit kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Pawn,
    Knight,
}

impl Kind {
    pub const ALL: [Kind; 2] = [Kind::Pawn, Kind::Knight];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Kind::Pawn => 0,
            Kind::Knight => 1,
        }
    }

    /// Largest Manhattan distance this kind may travel.
    #[inline]
    pub fn reach(self) -> i32 {
        match self {
            Kind::Pawn => 1,
            Kind::Knight => 2,
        }
    }

    pub fn value(self) -> f64 {
        match self {
            Kind::Pawn => PAWN_VALUE,
            Kind::Knight => KNIGHT_VALUE,
        }
    }

    /// Upper-case letter used in summaries and turn text.
    pub fn letter(self) -> char {
        match self {
            Kind::Pawn => 'P',
            Kind::Knight => 'K',
        }
    }

    pub fn from_letter(c: char) -> Option<Kind> {
        match c.to_ascii_uppercase() {
            'P' => Some(Kind::Pawn),
            'K' => Some(Kind::Knight),
            _ => None,
        }
    }
}

/// A piece on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    pub side: Side,
    pub kind: Kind,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    pub fn new(side: Side, kind: Kind, x: i32, y: i32) -> Self {
        Self { side, kind, x, y }
    }

    #[inline]
    pub fn tile(&self) -> Tile {
        (self.x, self.y)
    }

    /// Summary character: upper case for White, lower case for Black.
    pub fn symbol(&self) -> char {
        let c = self.kind.letter();
        match self.side {
            Side::White => c,
            Side::Black => c.to_ascii_lowercase(),
        }
    }

    #[inline]
    fn enemy_at(&self, board: &Board, x: i32, y: i32) -> bool {
        board.piece_at(x, y).is_some_and(|p| p.side != self.side)
    }

    /// Check whether this piece may move to `(nx, ny)`.
    ///
    /// With `may_capture` an occupied destination is accepted when it holds
    /// an enemy that is currently capture-eligible.
    pub fn is_legal_move(&self, board: &Board, nx: i32, ny: i32, may_capture: bool) -> bool {
        if !board.in_bounds(nx, ny) {
            return false;
        }
        if nx == self.x && ny == self.y {
            return false;
        }
        let target = board.piece_at(nx, ny);
        if target.is_some() && !may_capture {
            return false;
        }

        let (x, y) = (self.x, self.y);
        let dx = nx - x;
        let dy = ny - y;

        if dx.abs() + dy.abs() > self.kind.reach() {
            return false;
        }

        if self.kind == Kind::Knight {
            // Two tiles straight: the middle tile must be free and unflanked.
            if dx.abs() == 2 {
                let mx = x + dx.signum();
                if !board.is_empty(mx, y) {
                    return false;
                }
                if self.enemy_at(board, mx, y + 1) || self.enemy_at(board, mx, y - 1) {
                    return false;
                }
            } else if dy.abs() == 2 {
                let my = y + dy.signum();
                if !board.is_empty(x, my) {
                    return false;
                }
                if self.enemy_at(board, x + 1, my) || self.enemy_at(board, x - 1, my) {
                    return false;
                }
            }

            if dx != 0 && dy == 0 {
                if self.enemy_at(board, x, y + 1) || self.enemy_at(board, x, y - 1) {
                    return false;
                }
            } else if dy != 0 && dx == 0 {
                if self.enemy_at(board, x + 1, y) || self.enemy_at(board, x - 1, y) {
                    return false;
                }
            } else if dx != 0 && dy != 0 {
                if self.enemy_at(board, x + dx, y) || self.enemy_at(board, x, y + dy) {
                    return false;
                }
            }
        }

        if dx.abs() == 1 {
            if self.enemy_at(board, x, y + 1) || self.enemy_at(board, x, y - 1) {
                return false;
            }
        } else if dy.abs() == 1 {
            if self.enemy_at(board, x + 1, y) || self.enemy_at(board, x - 1, y) {
                return false;
            }
        }

        if let Some(other) = target {
            if other.side == self.side {
                return false;
            }
            if !other.can_capture(board) {
                return false;
            }
        }

        true
    }

    /// Check whether this piece is outnumbered in its 3x3 neighbourhood
    /// (itself included), which makes it capturable.
    pub fn can_capture(&self, board: &Board) -> bool {
        let mut allies = 0;
        let mut enemies = 0;
        for i in -1..=1 {
            for j in -1..=1 {
                if let Some(p) = board.piece_at(self.x + i, self.y + j) {
                    if p.side == self.side {
                        allies += 1;
                    } else {
                        enemies += 1;
                    }
                }
            }
        }
        enemies > allies
    }

    /// Destinations within the 5x5 neighbourhood accepted by
    /// [`is_legal_move`](Self::is_legal_move), scanned file by file.
    pub fn legal_moves(&self, board: &Board, may_capture: bool) -> Vec<Step> {
        let mut steps = Vec::new();
        self.for_each_destination(board, may_capture, |to| {
            steps.push(Step::new(self.tile(), to));
            true
        });
        steps
    }

    /// Number of legal destinations, without allocating.
    pub fn count_legal_moves(&self, board: &Board, may_capture: bool) -> usize {
        let mut count = 0;
        self.for_each_destination(board, may_capture, |_| {
            count += 1;
            true
        });
        count
    }

    /// Check whether this piece has at least one legal destination.
    pub fn has_legal_move(&self, board: &Board, may_capture: bool) -> bool {
        let mut found = false;
        self.for_each_destination(board, may_capture, |_| {
            found = true;
            false
        });
        found
    }

    /// Visit legal destinations in scan order until `visit` returns `false`.
    fn for_each_destination(
        &self,
        board: &Board,
        may_capture: bool,
        mut visit: impl FnMut(Tile) -> bool,
    ) {
        for i in -2..=2 {
            for j in -2..=2 {
                let to = (self.x + i, self.y + j);
                if self.is_legal_move(board, to.0, to.1, may_capture) && !visit(to) {
                    return;
                }
            }
        }
    }

    /// Static value: material, mobility and distance from the edges.
    pub fn evaluate(&self, board: &Board) -> f64 {
        let base = self.kind.value();
        let mobility = MOVE_VALUE * self.count_legal_moves(board, true) as f64;
        let center = (self.x.min(board.width() - 1 - self.x)
            + self.y.min(board.height() - 1 - self.y)) as f64;
        base + mobility + CENTER_POSITION_VALUE * center
    }
}
