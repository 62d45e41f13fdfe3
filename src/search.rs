//! Game-tree search.
//!
//! This module implements depth-limited adversarial search over [`Board`]s:
//! - [`alpha_beta`]: minimax with alpha-beta cutoffs and a memo table
//! - [`principal_variation`]: the negamax formulation with scout windows
//! - [`minimax`]: plain, unpruned minimax (reference for the two above)
//!
//! The root drivers ([`choose_turn`], [`choose_turn_pvs`]) walk the turns of
//! the current position themselves and keep the first best-scoring one, so
//! ties are broken by [`Board::possible_turns`] order. Every node owns a
//! fresh successor board which is dropped once its score is known.

use std::collections::HashMap;
use std::time::Instant;

use crate::board::Board;
use crate::constants::{NODE_BUDGET, REPORT_PERIOD, SCOUT_WINDOW};
use crate::piece::Side;
use crate::playout::random_turn;
use crate::turn::Turn;

/// Scores of positions already searched during one root search.
///
/// Entries are keyed by the position fingerprint together with the remaining
/// depth, and only exact scores (strictly inside the window they were
/// searched with) are stored. A score found at one depth is never reused at
/// another, and a cutoff bound is never mistaken for a value.
///
/// The table only grows. It must not outlive the root search that created it:
/// positions with different histories share a fingerprint, and repetition
/// draws depend on history.
#[derive(Debug, Default)]
pub struct MemoTable {
    scores: HashMap<(u64, u32), f64>,
    hits: u64,
}

impl MemoTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Number of lookups answered from the table.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    fn get(&mut self, hash: u64, depth: u32) -> Option<f64> {
        let found = self.scores.get(&(hash, depth)).copied();
        if found.is_some() {
            self.hits += 1;
        }
        found
    }

    fn insert(&mut self, hash: u64, depth: u32, score: f64) {
        self.scores.insert((hash, depth), score);
    }
}

/// Score of a successor searched with window `(alpha, beta)`, through the memo.
fn child_score(child: &Board, depth: u32, alpha: f64, beta: f64, memo: &mut MemoTable) -> f64 {
    let hash = child.hash();
    if let Some(score) = memo.get(hash, depth) {
        return score;
    }
    let score = alpha_beta(child, depth, alpha, beta, memo);
    if alpha < score && score < beta {
        memo.insert(hash, depth, score);
    }
    score
}

/// Minimax with alpha-beta pruning. White maximises, Black minimises.
///
/// Stops at depth 0 or when the side to move has no turn, returning
/// [`Board::evaluate`].
pub fn alpha_beta(
    board: &Board,
    depth: u32,
    mut alpha: f64,
    mut beta: f64,
    memo: &mut MemoTable,
) -> f64 {
    let turns = board.possible_turns();
    if depth == 0 || turns.is_empty() {
        return board.evaluate();
    }

    if board.side_to_move() == Side::White {
        let mut val = f64::NEG_INFINITY;
        for turn in &turns {
            let child = board.successor(turn);
            let score = child_score(&child, depth - 1, alpha, beta, memo);
            val = val.max(score);
            alpha = alpha.max(val);
            if alpha >= beta {
                break;
            }
        }
        val
    } else {
        let mut val = f64::INFINITY;
        for turn in &turns {
            let child = board.successor(turn);
            let score = child_score(&child, depth - 1, alpha, beta, memo);
            val = val.min(score);
            beta = beta.min(val);
            if alpha >= beta {
                break;
            }
        }
        val
    }
}

/// Principal variation search in negamax form.
///
/// `color` is `+1.0` when White is to move and `-1.0` otherwise; the result
/// is from the mover's point of view. The first turn is searched with the
/// full window, the rest with a scout window that is widened again when a
/// score lands strictly inside `(alpha, beta)`.
pub fn principal_variation(
    board: &Board,
    depth: u32,
    mut alpha: f64,
    beta: f64,
    color: f64,
) -> f64 {
    let turns = board.possible_turns();
    if depth == 0 || turns.is_empty() {
        return color * board.evaluate();
    }

    for (i, turn) in turns.iter().enumerate() {
        let child = board.successor(turn);
        let mut score;
        if i == 0 {
            score = -principal_variation(&child, depth - 1, -beta, -alpha, -color);
        } else {
            score = -principal_variation(&child, depth - 1, -alpha - SCOUT_WINDOW, -alpha, -color);
            if alpha < score && score < beta {
                score = -principal_variation(&child, depth - 1, -beta, -score, -color);
            }
        }
        alpha = alpha.max(score);
        if alpha >= beta {
            break;
        }
    }

    alpha
}

/// Full-width minimax with no pruning and no memo.
pub fn minimax(board: &Board, depth: u32) -> f64 {
    let turns = board.possible_turns();
    if depth == 0 || turns.is_empty() {
        return board.evaluate();
    }

    let scores = turns.iter().map(|t| minimax(&board.successor(t), depth - 1));
    if board.side_to_move() == Side::White {
        scores.fold(f64::NEG_INFINITY, f64::max)
    } else {
        scores.fold(f64::INFINITY, f64::min)
    }
}

/// Depth that keeps a search near [`NODE_BUDGET`] nodes for the given
/// branching factor. Never below 1.
pub fn auto_depth(branching: usize) -> u32 {
    if branching == 0 {
        return 1;
    }
    let depth = (NODE_BUDGET / branching as f64).log10().floor();
    if depth < 1.0 { 1 } else { depth as u32 }
}

/// A turn chosen by a root search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub turn: Turn,
    /// Position of `turn` in [`Board::possible_turns`].
    pub index: usize,
    /// Score of `turn`, from White's point of view.
    pub score: f64,
    /// Depth actually searched.
    pub depth: u32,
    /// Memo entries created during the search.
    pub memo_entries: usize,
}

fn resolve_depth(requested: u32, branching: usize) -> u32 {
    if requested == 0 { auto_depth(branching) } else { requested }
}

/// Pick a turn with alpha-beta search. `depth == 0` derives the depth from
/// the branching factor.
///
/// Returns `None` when there is no legal turn.
pub fn choose_turn(board: &Board, depth: u32) -> Option<SearchResult> {
    let turns = board.possible_turns();
    if turns.is_empty() {
        return None;
    }
    let depth = resolve_depth(depth, turns.len());
    let start = Instant::now();
    tracing::info!(turns = turns.len(), depth, "searching");

    let maximize = board.side_to_move() == Side::White;
    let mut alpha = f64::NEG_INFINITY;
    let mut beta = f64::INFINITY;
    let mut val = if maximize { f64::NEG_INFINITY } else { f64::INFINITY };
    let mut best = 0;
    let mut memo = MemoTable::new();

    for (j, turn) in turns.iter().enumerate() {
        let child = board.successor(turn);
        let score = child_score(&child, depth - 1, alpha, beta, &mut memo);

        if j > 0 && j % REPORT_PERIOD == 0 {
            let elapsed = start.elapsed().as_secs_f64();
            let remaining = elapsed * (turns.len() - j) as f64 / j as f64;
            tracing::debug!(
                "[{j}/{}] {remaining:.1} s left ({} hashes)",
                turns.len(),
                memo.len()
            );
        }

        if maximize {
            if score > val {
                val = score;
                best = j;
            }
            alpha = alpha.max(val);
        } else {
            if score < val {
                val = score;
                best = j;
            }
            beta = beta.min(val);
        }
        if alpha >= beta {
            break;
        }
    }

    tracing::info!(
        seconds = start.elapsed().as_secs_f64(),
        hashes = memo.len(),
        hits = memo.hits(),
        "search finished"
    );

    Some(SearchResult {
        turn: turns[best],
        index: best,
        score: val,
        depth,
        memo_entries: memo.len(),
    })
}

/// Pick a turn with principal variation search.
pub fn choose_turn_pvs(board: &Board, depth: u32) -> Option<SearchResult> {
    let turns = board.possible_turns();
    if turns.is_empty() {
        return None;
    }
    let depth = resolve_depth(depth, turns.len());
    let color = board.side_to_move().sign();
    tracing::info!(turns = turns.len(), depth, "searching (pvs)");

    let mut alpha = f64::NEG_INFINITY;
    let beta = f64::INFINITY;
    let mut best = 0;
    for (j, turn) in turns.iter().enumerate() {
        let child = board.successor(turn);
        let score = -principal_variation(&child, depth - 1, -beta, -alpha, -color);
        if score > alpha {
            alpha = score;
            best = j;
        }
    }

    Some(SearchResult {
        turn: turns[best],
        index: best,
        score: color * alpha,
        depth,
        memo_entries: 0,
    })
}

/// Search for a turn and play it. Returns what was played.
pub fn compute_turn(board: &mut Board, depth: u32) -> Option<SearchResult> {
    let result = choose_turn(board, depth)?;
    tracing::info!(turn = %result.turn, score = result.score, "playing");
    board.apply_turn(&result.turn);
    Some(result)
}

impl Board {
    /// Let the engine play one turn for the side to move.
    ///
    /// See [`compute_turn`].
    pub fn compute_turn(&mut self, depth: u32) -> Option<SearchResult> {
        compute_turn(self, depth)
    }
}

/// How the engine picks its turns.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Strategy {
    #[default]
    AlphaBeta,
    PrincipalVariation,
    Random,
}

impl Strategy {
    pub fn name(self) -> &'static str {
        match self {
            Strategy::AlphaBeta => "alphabeta",
            Strategy::PrincipalVariation => "pvs",
            Strategy::Random => "random",
        }
    }

    pub fn from_name(name: &str) -> Option<Strategy> {
        match name.to_ascii_lowercase().as_str() {
            "alphabeta" | "ab" => Some(Strategy::AlphaBeta),
            "pvs" | "principal" => Some(Strategy::PrincipalVariation),
            "random" => Some(Strategy::Random),
            _ => None,
        }
    }

    /// Pick a turn without playing it.
    pub fn choose(
        self,
        board: &Board,
        depth: u32,
        rng: &mut fastrand::Rng,
    ) -> Option<SearchResult> {
        match self {
            Strategy::AlphaBeta => choose_turn(board, depth),
            Strategy::PrincipalVariation => choose_turn_pvs(board, depth),
            Strategy::Random => {
                let turn = random_turn(board, rng)?;
                let index = board.possible_turns().iter().position(|t| *t == turn)?;
                Some(SearchResult {
                    turn,
                    index,
                    score: board.successor(&turn).evaluate(),
                    depth: 0,
                    memo_entries: 0,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Outcome;
    use crate::constants::WIN_SCORE;
    use crate::piece::Kind;
    use crate::turn::Step;

    /// Two pieces a side on a small board, so full trees stay small.
    fn skirmish() -> Board {
        let mut board = Board::new(5, 4);
        board.place(Side::White, Kind::Pawn, 1, 3);
        board.place(Side::White, Kind::Knight, 3, 3);
        board.place(Side::Black, Kind::Pawn, 3, 0);
        board.place(Side::Black, Kind::Knight, 1, 0);
        board.set_reserves(Side::White, 2, 0);
        board.set_reserves(Side::Black, 2, 0);
        board
    }

    /// White can win at once by capturing the outnumbered pawn on d3.
    fn winning_capture() -> Board {
        let mut board = Board::new(7, 5);
        board.place(Side::White, Kind::Pawn, 2, 2);
        board.place(Side::White, Kind::Pawn, 4, 2);
        board.place(Side::White, Kind::Pawn, 0, 4);
        board.place(Side::White, Kind::Pawn, 6, 4);
        board.place(Side::Black, Kind::Pawn, 3, 2);
        board.place(Side::Black, Kind::Pawn, 0, 0);
        board.place(Side::Black, Kind::Pawn, 3, 0);
        board.place(Side::Black, Kind::Pawn, 6, 0);
        board.set_reserves(Side::White, 1, 0);
        board
    }

    #[test]
    fn test_auto_depth() {
        assert_eq!(auto_depth(0), 1);
        assert_eq!(auto_depth(10), 3);
        assert_eq!(auto_depth(100), 2);
        assert_eq!(auto_depth(5000), 1);
        assert_eq!(auto_depth(50_000), 1);
    }

    #[test]
    fn test_depth_zero_is_static_evaluation() {
        let board = skirmish();
        let mut memo = MemoTable::new();
        let score = alpha_beta(&board, 0, f64::NEG_INFINITY, f64::INFINITY, &mut memo);
        assert_eq!(score, board.evaluate());
        assert!(memo.is_empty());
    }

    #[test]
    fn test_alpha_beta_matches_minimax() {
        let board = skirmish();
        for depth in 1..=2 {
            let mut memo = MemoTable::new();
            let pruned = alpha_beta(&board, depth, f64::NEG_INFINITY, f64::INFINITY, &mut memo);
            let full = minimax(&board, depth);
            assert!((pruned - full).abs() < 1e-9, "depth {depth}: {pruned} != {full}");
        }
    }

    #[test]
    fn test_memo_is_keyed_by_depth() {
        let mut memo = MemoTable::new();
        memo.insert(42, 2, 1.5);
        assert_eq!(memo.get(42, 1), None);
        assert_eq!(memo.get(42, 3), None);
        assert_eq!(memo.hits(), 0);
        assert_eq!(memo.get(42, 2), Some(1.5));
        assert_eq!(memo.hits(), 1);
    }

    #[test]
    fn test_memo_stores_only_exact_scores() {
        let board = skirmish();
        let eval = board.evaluate();
        let mut memo = MemoTable::new();

        // Fails low: the score is only an upper bound for this window.
        assert_eq!(child_score(&board, 0, eval + 1.0, eval + 2.0, &mut memo), eval);
        assert!(memo.is_empty());
        // Fails high.
        assert_eq!(child_score(&board, 0, eval - 2.0, eval - 1.0, &mut memo), eval);
        assert!(memo.is_empty());

        assert_eq!(child_score(&board, 0, f64::NEG_INFINITY, f64::INFINITY, &mut memo), eval);
        assert_eq!(memo.len(), 1);
        assert_eq!(child_score(&board, 0, eval + 1.0, eval + 2.0, &mut memo), eval);
        assert_eq!(memo.hits(), 1);
    }

    #[test]
    fn test_alpha_beta_reuses_transpositions() {
        let board = skirmish();
        let mut memo = MemoTable::new();
        let pruned = alpha_beta(&board, 3, f64::NEG_INFINITY, f64::INFINITY, &mut memo);
        let full = minimax(&board, 3);
        assert!((pruned - full).abs() < 1e-9, "{pruned} != {full}");
        assert!(memo.hits() > 0);
    }

    #[test]
    fn test_principal_variation_matches_minimax() {
        let mut board = skirmish();
        for depth in 1..=2 {
            let color = board.side_to_move().sign();
            let window = (f64::NEG_INFINITY, f64::INFINITY);
            let pvs = color * principal_variation(&board, depth, window.0, window.1, color);
            let full = minimax(&board, depth);
            assert!((pvs - full).abs() < 1e-9, "depth {depth}: {pvs} != {full}");
        }

        board.set_side_to_move(Side::Black);
        let pvs = -principal_variation(&board, 2, f64::NEG_INFINITY, f64::INFINITY, -1.0);
        assert!((pvs - minimax(&board, 2)).abs() < 1e-9);
    }

    #[test]
    fn test_root_drivers_agree_on_score() {
        let board = skirmish();
        let ab = choose_turn(&board, 2).unwrap();
        let pvs = choose_turn_pvs(&board, 2).unwrap();
        assert!((ab.score - pvs.score).abs() < 1e-9);
        assert!((ab.score - minimax(&board, 2)).abs() < 1e-9);
        assert_eq!(board.possible_turns()[ab.index], ab.turn);
    }

    #[test]
    fn test_compute_turn_takes_winning_capture() {
        let mut board = winning_capture();
        let result = board.compute_turn(1).unwrap();
        assert_eq!(result.score, WIN_SCORE);
        assert_eq!(result.turn.steps().len(), 1);
        assert_eq!(result.turn.steps()[0].to, (3, 2));
        assert_eq!(board.outcome(), Outcome::WhiteWins);
        assert_eq!(board.side_to_move(), Side::Black);
    }

    #[test]
    fn test_first_of_equal_turns_wins() {
        let board = winning_capture();
        let result = choose_turn(&board, 1).unwrap();
        let first_capture = board
            .possible_turns()
            .iter()
            .position(|t| t.steps().first().is_some_and(|s| s.to == (3, 2)))
            .unwrap();
        assert_eq!(result.index, first_capture);
        assert_eq!(result.turn.steps()[0], Step::new((2, 2), (3, 2)));
    }

    #[test]
    fn test_no_turns_gives_none() {
        let mut board = Board::new(3, 3);
        board.set_pass_counter(2);
        assert!(choose_turn(&board, 2).is_none());
        assert!(board.compute_turn(2).is_none());
    }

    #[test]
    fn test_random_strategy_plays_legal_turn() {
        let board = skirmish();
        let mut rng = fastrand::Rng::with_seed(7);
        let result = Strategy::Random.choose(&board, 0, &mut rng).unwrap();
        assert_eq!(board.possible_turns()[result.index], result.turn);
    }

    #[test]
    fn test_strategy_names() {
        for s in [Strategy::AlphaBeta, Strategy::PrincipalVariation, Strategy::Random] {
            assert_eq!(Strategy::from_name(s.name()), Some(s));
        }
        assert_eq!(Strategy::from_name("mcts"), None);
    }
}
