//! Board state, turn generation and turn execution.
//!
//! The board owns its pieces in an ordered arena (`pieces`) with a tile index
//! (`tiles`) for constant-time lookups. Cloning a board deep-copies both, so
//! search nodes never alias their parent.
//!
//! White starts on the last rank and moves first; Black starts on rank 1.
//! Scores are always from White's point of view.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::GameConfig;
use crate::constants::{
    KNIGHT_CAPTURE_VALUE, KNIGHT_RESERVE_VALUE, MAX_STEPS, MIN_MATERIAL, PASS_LIMIT,
    PAWN_CAPTURE_VALUE, PAWN_RESERVE_VALUE, REPETITION_LIMIT, WIN_SCORE,
};
use crate::piece::{Kind, Piece, Side};
use crate::turn::{str_tile, Step, Turn};

/// Result of [`Board::outcome`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Undecided,
    Draw,
    WhiteWins,
    BlackWins,
}

impl Outcome {
    fn win_for(side: Side) -> Outcome {
        match side {
            Side::White => Outcome::WhiteWins,
            Side::Black => Outcome::BlackWins,
        }
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            Outcome::WhiteWins => Some(Side::White),
            Outcome::BlackWins => Some(Side::Black),
            _ => None,
        }
    }

    /// Check whether the game is over (win or draw).
    pub fn is_over(self) -> bool {
        self != Outcome::Undecided
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Undecided => write!(f, "undecided"),
            Outcome::Draw => write!(f, "draw"),
            Outcome::WhiteWins => write!(f, "white wins"),
            Outcome::BlackWins => write!(f, "black wins"),
        }
    }
}

/// The authoritative game state.
#[derive(Clone, Debug)]
pub struct Board {
    width: i32,
    height: i32,
    /// Live pieces in creation order; this order drives turn enumeration.
    pieces: Vec<Piece>,
    /// Index into `pieces` for every tile, row-major.
    tiles: Vec<Option<u16>>,
    /// Units in reserve, `[side][kind]`.
    reserves: [[u32; 2]; 2],
    /// Units captured by each side, `[side][kind]`.
    captures: [[u32; 2]; 2],
    /// Consecutive passes, capped at [`PASS_LIMIT`].
    pass_counter: u8,
    turn: Side,
    /// Summary after every applied turn.
    history: Vec<Arc<str>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl Board {
    /// An empty board: no pieces, no reserves, White to move.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            pieces: Vec::new(),
            tiles: vec![None; (width * height) as usize],
            reserves: [[0; 2]; 2],
            captures: [[0; 2]; 2],
            pass_counter: 0,
            turn: Side::White,
            history: Vec::new(),
        }
    }

    /// A board set up for a new game. The config is assumed valid.
    pub fn from_config(config: &GameConfig) -> Self {
        let mut board = Board::new(config.width, config.height);
        board.new_game(config.pawns, config.knights, config.flanking);
        board
    }

    /// Reset to the starting position.
    ///
    /// Each home row gets knights on the `flanking` outer files and pawns in
    /// between; what is left of the army goes to reserve. Passing is not
    /// permitted on the first turn.
    pub fn new_game(&mut self, pawns: u32, knights: u32, flanking: i32) {
        self.clear();
        let (top, bottom) = (0, self.height - 1);

        for x in flanking..self.width - flanking {
            self.place(Side::Black, Kind::Pawn, x, top);
            self.place(Side::White, Kind::Pawn, x, bottom);
        }
        for x in 0..flanking {
            self.place(Side::Black, Kind::Knight, x, top);
            self.place(Side::Black, Kind::Knight, self.width - x - 1, top);
            self.place(Side::White, Kind::Knight, x, bottom);
            self.place(Side::White, Kind::Knight, self.width - x - 1, bottom);
        }

        let config = GameConfig {
            width: self.width,
            height: self.height,
            pawns,
            knights,
            flanking,
        };
        for side in [Side::White, Side::Black] {
            self.set_reserves(side, config.reserve_pawns(), config.reserve_knights());
        }
        self.captures = [[0; 2]; 2];
        self.pass_counter = PASS_LIMIT;
        self.turn = Side::White;
        self.history.clear();
    }

    /// Remove every piece. Counters and history are left alone.
    pub fn clear(&mut self) {
        self.pieces.clear();
        self.tiles.fill(None);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    #[inline]
    fn idx(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    fn index_at(&self, x: i32, y: i32) -> Option<usize> {
        if !self.in_bounds(x, y) {
            return None;
        }
        self.tiles[self.idx(x, y)].map(usize::from)
    }

    /// The piece on `(x, y)`, if any. Out-of-bounds tiles are empty.
    #[inline]
    pub fn piece_at(&self, x: i32, y: i32) -> Option<&Piece> {
        self.index_at(x, y).map(|i| &self.pieces[i])
    }

    #[inline]
    pub fn is_empty(&self, x: i32, y: i32) -> bool {
        self.index_at(x, y).is_none()
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Side to move.
    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.turn
    }

    pub fn pass_counter(&self) -> u8 {
        self.pass_counter
    }

    pub fn reserve(&self, side: Side, kind: Kind) -> u32 {
        self.reserves[side.index()][kind.index()]
    }

    pub fn captured(&self, side: Side, kind: Kind) -> u32 {
        self.captures[side.index()][kind.index()]
    }

    /// Summaries of every position reached since the game began.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &str> {
        self.history.iter().map(|s| &**s)
    }

    /// The rank a side reinforces onto.
    pub fn home_row(&self, side: Side) -> i32 {
        match side {
            Side::White => self.height - 1,
            Side::Black => 0,
        }
    }

    fn live_pieces(&self, side: Side) -> u32 {
        self.pieces.iter().filter(|p| p.side == side).count() as u32
    }

    // =========================================================================
    // Setup
    // =========================================================================

    /// Put a piece on an empty in-bounds tile. Returns `false` otherwise.
    pub fn place(&mut self, side: Side, kind: Kind, x: i32, y: i32) -> bool {
        if !self.in_bounds(x, y) || !self.is_empty(x, y) {
            return false;
        }
        let i = self.idx(x, y);
        self.tiles[i] = Some(self.pieces.len() as u16);
        self.pieces.push(Piece::new(side, kind, x, y));
        true
    }

    pub fn set_reserves(&mut self, side: Side, pawns: u32, knights: u32) {
        self.reserves[side.index()] = [pawns, knights];
    }

    pub fn set_side_to_move(&mut self, side: Side) {
        self.turn = side;
    }

    pub fn set_pass_counter(&mut self, passes: u8) {
        self.pass_counter = passes.min(PASS_LIMIT);
    }

    pub(crate) fn push_history(&mut self, summary: &str) {
        self.history.push(Arc::from(summary));
    }

    /// Remove one piece, keeping the creation order of the rest.
    fn remove_piece(&mut self, index: usize) {
        self.pieces.remove(index);
        self.reindex();
    }

    fn reindex(&mut self) {
        self.tiles.fill(None);
        for (i, p) in self.pieces.iter().enumerate() {
            let t = (p.y * self.width + p.x) as usize;
            self.tiles[t] = Some(i as u16);
        }
    }

    // =========================================================================
    // Turn Generation
    // =========================================================================

    /// Every legal turn for the side to move.
    ///
    /// Order: pass, captures, reinforcements, then multi-piece moves. Search
    /// keeps the first of equally scored turns, so this order is the
    /// tie-break.
    pub fn possible_turns(&self) -> Vec<Turn> {
        self.turns_for(self.turn)
    }

    fn turns_for(&self, side: Side) -> Vec<Turn> {
        let mut turns = Vec::new();

        if self.pass_counter < PASS_LIMIT {
            turns.push(Turn::Pass);
        }

        // Captures are always single-piece turns.
        for p in self.pieces.iter().filter(|p| p.side == side) {
            for step in p.legal_moves(self, true) {
                if self.piece_at(step.to.0, step.to.1).is_some() {
                    turns.push(Turn::single(step));
                }
            }
        }

        let home = self.home_row(side);
        for x in 0..self.width {
            if !self.is_empty(x, home) {
                continue;
            }
            for kind in Kind::ALL {
                if self.reserve(side, kind) > 0 {
                    turns.push(Turn::Reinforce { kind, to: (x, home) });
                }
            }
        }

        // Up to three pieces relocate at once. Piece i pairs only with lower
        // indices so each combination is produced exactly once.
        let own: Vec<Vec<Step>> = self
            .pieces
            .iter()
            .map(|p| {
                if p.side == side {
                    p.legal_moves(self, false)
                } else {
                    Vec::new()
                }
            })
            .collect();

        for i in 0..self.pieces.len() {
            if self.pieces[i].side != side {
                continue;
            }
            for j in 0..i {
                if self.pieces[j].side != side {
                    continue;
                }
                for k in 0..j {
                    if self.pieces[k].side != side {
                        continue;
                    }
                    for &m in &own[i] {
                        for &n in &own[j] {
                            if m.to == n.to {
                                continue;
                            }
                            for &l in &own[k] {
                                if m.to == l.to || n.to == l.to {
                                    continue;
                                }
                                turns.push(Turn::Move {
                                    steps: [m, n, l],
                                    len: 3,
                                });
                            }
                        }
                    }
                }

                for &m in &own[i] {
                    for &n in &own[j] {
                        if m.to == n.to {
                            continue;
                        }
                        turns.push(Turn::Move {
                            steps: [m, n, n],
                            len: 2,
                        });
                    }
                }
            }

            for &m in &own[i] {
                turns.push(Turn::single(m));
            }
        }

        turns
    }

    /// Check whether `side` has at least one legal turn, without building the
    /// turn list.
    fn has_any_turn(&self, side: Side) -> bool {
        if self.pass_counter < PASS_LIMIT {
            return true;
        }
        let home = self.home_row(side);
        if Kind::ALL.iter().any(|&k| self.reserve(side, k) > 0)
            && (0..self.width).any(|x| self.is_empty(x, home))
        {
            return true;
        }
        self.pieces
            .iter()
            .filter(|p| p.side == side)
            .any(|p| p.has_legal_move(self, true))
    }

    // =========================================================================
    // Turn Execution
    // =========================================================================

    /// Apply a turn for the side to move.
    ///
    /// The turn is trusted to come from [`possible_turns`](Self::possible_turns);
    /// bindings that do not fit the board are skipped. A capture removes both
    /// the attacker and the captured piece and credits the mover with both
    /// kinds.
    ///
    /// Returns `false` if nothing happened: a pass while passing is already
    /// at its limit, or a reinforcement or move that fits nothing on the
    /// board, leaves the board untouched and the same side to move.
    pub fn apply_turn(&mut self, turn: &Turn) -> bool {
        let side = self.turn;
        let mut moved = false;

        match *turn {
            Turn::Pass => {}
            Turn::Reinforce { kind, to } => {
                if self.reserve(side, kind) > 0
                    && to.1 == self.home_row(side)
                    && self.place(side, kind, to.0, to.1)
                {
                    self.reserves[side.index()][kind.index()] -= 1;
                    tracing::debug!(%side, to = %str_tile(to), "reinforcements arriving");
                    moved = true;
                }
            }
            Turn::Move { .. } => {
                for step in turn.steps().iter().take(MAX_STEPS) {
                    moved |= self.apply_step(side, step);
                }
            }
        }

        if moved {
            self.pass_counter = 0;
        } else if turn.is_pass() && self.pass_counter < PASS_LIMIT {
            self.pass_counter += 1;
        } else {
            return false;
        }

        self.turn = side.opponent();
        let summary = self.summary();
        self.push_history(&summary);
        true
    }

    fn apply_step(&mut self, side: Side, step: &Step) -> bool {
        let Some(mover) = self.index_at(step.from.0, step.from.1) else {
            return false;
        };
        if self.pieces[mover].side != side || !self.in_bounds(step.to.0, step.to.1) {
            return false;
        }

        match self.index_at(step.to.0, step.to.1) {
            Some(target) if self.pieces[target].side == side => false,
            Some(target) => {
                let counts = &mut self.captures[side.index()];
                counts[self.pieces[mover].kind.index()] += 1;
                counts[self.pieces[target].kind.index()] += 1;
                let (hi, lo) = (mover.max(target), mover.min(target));
                self.pieces.remove(hi);
                self.remove_piece(lo);
                true
            }
            None => {
                let from = self.idx(step.from.0, step.from.1);
                let to = self.idx(step.to.0, step.to.1);
                self.tiles[from] = None;
                self.tiles[to] = Some(mover as u16);
                let p = &mut self.pieces[mover];
                p.x = step.to.0;
                p.y = step.to.1;
                true
            }
        }
    }

    /// A copy of this board with `turn` applied.
    pub fn successor(&self, turn: &Turn) -> Board {
        let mut next = self.clone();
        next.apply_turn(turn);
        next
    }

    // =========================================================================
    // Outcome and Evaluation
    // =========================================================================

    /// Decide whether the game is over.
    ///
    /// 1. A summary seen [`REPETITION_LIMIT`] times is a draw.
    /// 2. A side with no pieces on the board, or fewer than [`MIN_MATERIAL`]
    ///    units on the board and in reserve together, loses.
    /// 3. A side with no legal turn loses.
    pub fn outcome(&self) -> Outcome {
        let mut seen: HashMap<&str, usize> = HashMap::with_capacity(self.history.len());
        for line in &self.history {
            let count = seen.entry(&**line).or_insert(0);
            *count += 1;
            if *count >= REPETITION_LIMIT {
                return Outcome::Draw;
            }
        }

        for side in [Side::White, Side::Black] {
            let live = self.live_pieces(side);
            let reserve: u32 = Kind::ALL.iter().map(|&k| self.reserve(side, k)).sum();
            if live == 0 || live + reserve < MIN_MATERIAL {
                return Outcome::win_for(side.opponent());
            }
        }

        let mut outcome = Outcome::Undecided;
        if !self.has_any_turn(Side::White) {
            outcome = Outcome::BlackWins;
        }
        if !self.has_any_turn(Side::Black) {
            outcome = Outcome::WhiteWins;
        }
        outcome
    }

    /// Heuristic score, positive when White is better.
    ///
    /// Decided games score [`WIN_SCORE`] for the winner and zero for a draw.
    pub fn evaluate(&self) -> f64 {
        match self.outcome() {
            Outcome::Draw => return 0.0,
            Outcome::WhiteWins => return WIN_SCORE,
            Outcome::BlackWins => return -WIN_SCORE,
            Outcome::Undecided => {}
        }

        let (w, b) = (Side::White.index(), Side::Black.index());
        let (pawn, knight) = (Kind::Pawn.index(), Kind::Knight.index());

        let reserve = |kind: usize| self.reserves[w][kind] as f64 - self.reserves[b][kind] as f64;
        let captured = |kind: usize| self.captures[w][kind] as f64 - self.captures[b][kind] as f64;

        let mut score = PAWN_RESERVE_VALUE * reserve(pawn) + KNIGHT_RESERVE_VALUE * reserve(knight);
        score += PAWN_CAPTURE_VALUE * captured(pawn) + KNIGHT_CAPTURE_VALUE * captured(knight);

        for p in &self.pieces {
            score += p.side.sign() * p.evaluate(self);
        }
        score
    }

    // =========================================================================
    // Summary
    // =========================================================================

    /// Canonical position string, used for repetition and memoization.
    ///
    /// `[<rows>] <passes> <white pawns> <white knights> <black pawns> <black knights> <turn>`
    ///
    /// Rows run from rank 1 and are separated by `/`; digits count empty
    /// tiles, `K`/`P` are White and `k`/`p` Black. The turn is `1` for White.
    pub fn summary(&self) -> String {
        let mut result = String::with_capacity((self.width * self.height) as usize + 24);
        result.push('[');

        for y in 0..self.height {
            let mut empty = 0;
            for x in 0..self.width {
                match self.piece_at(x, y) {
                    None => empty += 1,
                    Some(p) => {
                        if empty > 0 {
                            result.push_str(&empty.to_string());
                            empty = 0;
                        }
                        result.push(p.symbol());
                    }
                }
            }
            if empty > 0 {
                result.push_str(&empty.to_string());
            }
            if y < self.height - 1 {
                result.push('/');
            }
        }

        result.push(']');
        let (w, b) = (Side::White.index(), Side::Black.index());
        let fields = [
            self.pass_counter as u32,
            self.reserves[w][0],
            self.reserves[w][1],
            self.reserves[b][0],
            self.reserves[b][1],
            (self.turn == Side::White) as u32,
        ];
        for value in fields {
            result.push(' ');
            result.push_str(&value.to_string());
        }
        result
    }

    /// Fingerprint of [`summary`](Self::summary).
    pub fn hash(&self) -> u64 {
        use std::hash::{DefaultHasher, Hash, Hasher};
        let mut hasher = DefaultHasher::new();
        self.summary().hash(&mut hasher);
        hasher.finish()
    }

    /// The same position turned 180 degrees with the sides swapped.
    ///
    /// Reserves, captures, pass counter and side to move follow the swap.
    /// History is not carried over.
    pub fn rotated(&self) -> Board {
        let mut board = Board::new(self.width, self.height);
        for p in &self.pieces {
            board.place(
                p.side.opponent(),
                p.kind,
                self.width - 1 - p.x,
                self.height - 1 - p.y,
            );
        }
        board.reserves = [self.reserves[1], self.reserves[0]];
        board.captures = [self.captures[1], self.captures[0]];
        board.pass_counter = self.pass_counter;
        board.turn = self.turn.opponent();
        board
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            write!(f, "{:>2} ", y + 1)?;
            for x in 0..self.width {
                let ch = self.piece_at(x, y).map(|p| p.symbol()).unwrap_or('.');
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for x in 0..self.width {
            write!(f, "{} ", (b'a' + x as u8) as char)?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classical() -> Board {
        Board::default()
    }

    #[test]
    fn test_new_game_layout() {
        let board = classical();
        assert_eq!(board.pieces().len(), 18);
        assert_eq!(board.reserve(Side::White, Kind::Pawn), 5);
        assert_eq!(board.reserve(Side::White, Kind::Knight), 2);
        assert_eq!(board.reserve(Side::Black, Kind::Pawn), 5);
        assert_eq!(board.reserve(Side::Black, Kind::Knight), 2);
        assert_eq!(board.pass_counter(), PASS_LIMIT);
        assert_eq!(board.side_to_move(), Side::White);
        assert_eq!(board.history().len(), 0);
        assert_eq!(board.piece_at(0, 6).map(|p| p.symbol()), Some('K'));
        assert_eq!(board.piece_at(4, 0).map(|p| p.symbol()), Some('p'));
    }

    #[test]
    fn test_new_game_summary() {
        assert_eq!(
            classical().summary(),
            "[kkpppppkk/9/9/9/9/9/KKPPPPPKK] 2 5 2 5 2 1"
        );
    }

    #[test]
    fn test_opening_turns() {
        let board = classical();
        let turns = board.possible_turns();
        assert!(!turns.iter().any(Turn::is_pass));
        // Every home tile is occupied, so no reinforcement either.
        assert!(!turns.iter().any(|t| matches!(t, Turn::Reinforce { .. })));
        assert!(turns.iter().any(|t| t.steps().len() == 3));
    }

    #[test]
    fn test_move_resets_pass_counter() {
        let mut board = classical();
        let turn = Turn::single(Step::new((4, 6), (4, 5)));
        assert!(board.possible_turns().contains(&turn));
        assert!(board.apply_turn(&turn));
        assert_eq!(board.pass_counter(), 0);
        assert_eq!(board.side_to_move(), Side::Black);
        assert_eq!(board.history().len(), 1);
        assert!(board.possible_turns().contains(&Turn::Pass));
    }

    #[test]
    fn test_pass_at_limit_is_noop() {
        let mut board = classical();
        let before = board.summary();
        assert!(!board.apply_turn(&Turn::Pass));
        assert_eq!(board.summary(), before);
        assert_eq!(board.history().len(), 0);
    }

    #[test]
    fn test_passes_count_up_to_limit() {
        let mut board = classical();
        board.set_pass_counter(0);
        assert!(board.apply_turn(&Turn::Pass));
        assert!(board.apply_turn(&Turn::Pass));
        assert_eq!(board.pass_counter(), 2);
        assert!(!board.possible_turns().contains(&Turn::Pass));
    }

    #[test]
    fn test_rejected_turn_changes_nothing() {
        let mut board = Board::new(5, 4);
        board.place(Side::White, Kind::Pawn, 0, 3);
        board.place(Side::Black, Kind::Pawn, 0, 0);
        board.set_reserves(Side::White, 0, 1);
        let before = board.summary();

        let rejected = [
            // No pawn in reserve.
            Turn::Reinforce {
                kind: Kind::Pawn,
                to: (1, 3),
            },
            // Not the home row.
            Turn::Reinforce {
                kind: Kind::Knight,
                to: (1, 2),
            },
            // Tile taken.
            Turn::Reinforce {
                kind: Kind::Knight,
                to: (0, 3),
            },
            // Nothing on the source tile.
            Turn::single(Step::new((2, 2), (2, 1))),
            // Not the mover's piece.
            Turn::single(Step::new((0, 0), (1, 0))),
        ];
        for turn in &rejected {
            assert!(!board.apply_turn(turn), "{turn}");
            assert_eq!(board.summary(), before, "{turn}");
            assert_eq!(board.history().len(), 0);
        }
        assert_eq!(board.side_to_move(), Side::White);
        assert_eq!(board.pass_counter(), 0);
    }

    #[test]
    fn test_reinforce() {
        let mut board = Board::new(5, 4);
        board.place(Side::White, Kind::Pawn, 0, 3);
        board.place(Side::Black, Kind::Pawn, 0, 0);
        board.set_reserves(Side::White, 1, 1);
        board.set_pass_counter(1);

        let turns = board.possible_turns();
        let reinforcements: Vec<&Turn> = turns
            .iter()
            .filter(|t| matches!(t, Turn::Reinforce { .. }))
            .collect();
        // Four free home tiles, two kinds each, pawn offered first.
        assert_eq!(reinforcements.len(), 8);
        assert_eq!(
            *reinforcements[0],
            Turn::Reinforce {
                kind: Kind::Pawn,
                to: (1, 3)
            }
        );

        let knight = Turn::Reinforce {
            kind: Kind::Knight,
            to: (2, 3),
        };
        assert!(board.apply_turn(&knight));
        assert_eq!(board.reserve(Side::White, Kind::Knight), 0);
        assert_eq!(board.piece_at(2, 3).map(|p| p.kind), Some(Kind::Knight));
        assert_eq!(board.pass_counter(), 0);
    }

    #[test]
    fn test_capture_removes_both_pieces() {
        let mut board = Board::new(7, 5);
        board.place(Side::White, Kind::Knight, 2, 2);
        board.place(Side::White, Kind::Pawn, 4, 2);
        board.place(Side::Black, Kind::Pawn, 3, 2);
        board.place(Side::Black, Kind::Pawn, 0, 0);

        let capture = Turn::single(Step::new((2, 2), (3, 2)));
        assert!(board.possible_turns().contains(&capture));
        assert!(board.apply_turn(&capture));

        assert!(board.is_empty(2, 2));
        assert!(board.is_empty(3, 2));
        assert_eq!(board.pieces().len(), 2);
        assert_eq!(board.captured(Side::White, Kind::Knight), 1);
        assert_eq!(board.captured(Side::White, Kind::Pawn), 1);
        assert_eq!(board.piece_at(4, 2).map(|p| p.kind), Some(Kind::Pawn));
        assert_eq!(board.piece_at(0, 0).map(|p| p.side), Some(Side::Black));
    }

    #[test]
    fn test_three_piece_move() {
        let mut board = classical();
        let turn = Turn::moves(&[
            Step::new((4, 6), (4, 5)),
            Step::new((3, 6), (3, 5)),
            Step::new((2, 6), (2, 5)),
        ])
        .unwrap();
        assert!(board.possible_turns().iter().any(|t| t.same_as(&turn)));
        board.apply_turn(&turn);
        assert_eq!(
            board.summary(),
            "[kkpppppkk/9/9/9/9/2PPP4/KK3PPKK] 0 5 2 5 2 0"
        );
    }

    #[test]
    fn test_insufficient_material_loses() {
        let mut board = Board::new(5, 5);
        board.place(Side::White, Kind::Pawn, 0, 4);
        board.place(Side::White, Kind::Pawn, 1, 4);
        board.place(Side::White, Kind::Pawn, 2, 4);
        for x in 0..4 {
            board.place(Side::Black, Kind::Pawn, x, 0);
        }
        assert_eq!(board.outcome(), Outcome::BlackWins);
        assert_eq!(board.evaluate(), -WIN_SCORE);
    }

    #[test]
    fn test_no_pieces_loses_despite_reserves() {
        let mut board = Board::new(5, 5);
        board.set_reserves(Side::Black, 5, 5);
        for x in 0..4 {
            board.place(Side::White, Kind::Pawn, x, 4);
        }
        assert_eq!(board.outcome(), Outcome::WhiteWins);
    }

    #[test]
    fn test_rotated_summary() {
        let board = classical();
        assert_eq!(board.rotated().summary(), "[kkpppppkk/9/9/9/9/9/KKPPPPPKK] 2 5 2 5 2 0");
    }
}
