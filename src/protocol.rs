//! Line-oriented text protocol for driving the engine.
//!
//! The protocol follows the shape of GTP: one command per line, an optional
//! numeric id in front, and a response of `=<id> <message>` on success or
//! `?<id> <message>` on failure, followed by a blank line. A front end uses it
//! to list legal turns, submit the player's turn and ask the engine for its
//! reply.
//!
//! ## Supported Commands
//!
//! - `name` / `version` - Engine identification
//! - `list_commands` / `known_command <cmd>` - Command discovery
//! - `quit` - Exit the loop
//! - `new_game` - Reset to the starting position
//! - `clear` - Remove every piece from the board
//! - `show` - Print the board and its summary
//! - `turns` - List legal turns for the side to move
//! - `play <turn>` - Play a turn, e.g. `play e7-e6 d7-d6` or `play pass`
//! - `genmove [depth]` - Let the engine choose and play a turn
//! - `depth [n]` - Show or set the search depth (0 = automatic)
//! - `strategy [name]` - Show or set the strategy (`alphabeta`, `pvs`, `random`)
//! - `evaluate` - Static evaluation of the position
//! - `outcome` - Whether the game is decided
//! - `history` - Summaries of every position so far
//! - `save <path>` / `load <path>` - Write or read the game log

use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::board::Board;
use crate::config::GameConfig;
use crate::record::{load_game, save_game};
use crate::search::Strategy;
use crate::turn::Turn;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "clear",
    "depth",
    "evaluate",
    "genmove",
    "history",
    "known_command",
    "list_commands",
    "load",
    "name",
    "new_game",
    "outcome",
    "play",
    "quit",
    "save",
    "show",
    "strategy",
    "turns",
    "version",
];

/// Protocol engine state.
pub struct Engine {
    /// Current game position
    board: Board,
    /// Setup used by `new_game`
    config: GameConfig,
    /// Search depth for `genmove` (0 = automatic)
    depth: u32,
    strategy: Strategy,
    rng: fastrand::Rng,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Engine {
    /// Create an engine with a fresh game. The config is assumed valid.
    pub fn new(config: GameConfig) -> Self {
        Self {
            board: Board::from_config(&config),
            config,
            depth: 0,
            strategy: Strategy::default(),
            rng: fastrand::Rng::new(),
        }
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Run the command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let (command, args) = match command_line.split_once(char::is_whitespace) {
                Some((c, rest)) => (c.to_lowercase(), rest.trim()),
                None => (command_line.to_lowercase(), ""),
            };
            if command.is_empty() {
                continue;
            }

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(stdout, "{prefix}{id_str} {message}\n")?;
            stdout.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command id from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Execute one command and return (success, response).
    pub fn execute(&mut self, command: &str, args: &str) -> (bool, String) {
        match command {
            "name" => (true, "sutran-rust".to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let known = KNOWN_COMMANDS.contains(&args.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "new_game" => {
                self.board = Board::from_config(&self.config);
                (true, String::new())
            }

            "clear" => {
                self.board.clear();
                (true, String::new())
            }

            "show" => (true, format!("\n{}{}", self.board, self.board.summary())),

            "turns" => {
                let turns = self.board.possible_turns();
                let mut lines = vec![format!("{} turns", turns.len())];
                lines.extend(turns.iter().map(|t| t.to_string()));
                (true, lines.join("\n"))
            }

            "play" => {
                let turn: Turn = match args.parse() {
                    Ok(t) => t,
                    Err(e) => return (false, e.to_string()),
                };
                // Match against the legal set, which also fixes the step order.
                let legal = self.board.possible_turns();
                match legal.iter().find(|t| t.same_as(&turn)) {
                    Some(t) => {
                        self.board.apply_turn(t);
                        (true, String::new())
                    }
                    None => (false, "illegal turn".to_string()),
                }
            }

            "genmove" => {
                let depth = if args.is_empty() {
                    self.depth
                } else {
                    match args.parse::<u32>() {
                        Ok(d) => d,
                        Err(_) => return (false, "invalid depth".to_string()),
                    }
                };
                match self.strategy.choose(&self.board, depth, &mut self.rng) {
                    Some(result) => {
                        self.board.apply_turn(&result.turn);
                        (true, result.turn.to_string())
                    }
                    None => (false, "no legal turn".to_string()),
                }
            }

            "depth" => {
                if args.is_empty() {
                    return (true, self.depth.to_string());
                }
                match args.parse::<u32>() {
                    Ok(d) => {
                        self.depth = d;
                        (true, String::new())
                    }
                    Err(_) => (false, "invalid depth".to_string()),
                }
            }

            "strategy" => {
                if args.is_empty() {
                    return (true, self.strategy.name().to_string());
                }
                match Strategy::from_name(args) {
                    Some(s) => {
                        self.strategy = s;
                        (true, String::new())
                    }
                    None => (false, format!("unknown strategy: {args}")),
                }
            }

            "evaluate" => (true, format!("{:.2}", self.board.evaluate())),

            "outcome" => (true, self.board.outcome().to_string()),

            "history" => (true, self.board.history().collect::<Vec<_>>().join("\n")),

            "save" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                match save_game(&self.board, Path::new(args)) {
                    Ok(()) => (true, String::new()),
                    Err(e) => (false, format!("{e:#}")),
                }
            }

            "load" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                match load_game(Path::new(args)) {
                    Ok(board) => {
                        self.board = board;
                        (true, String::new())
                    }
                    Err(e) => (false, format!("{e:#}")),
                }
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Side;

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = Engine::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = Engine::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_name_command() {
        let mut engine = Engine::default();
        let (success, response) = engine.execute("name", "");
        assert!(success);
        assert_eq!(response, "sutran-rust");
    }

    #[test]
    fn test_known_command() {
        let mut engine = Engine::default();

        let (success, response) = engine.execute("known_command", "genmove");
        assert!(success);
        assert_eq!(response, "true");

        let (success, response) = engine.execute("known_command", "komi");
        assert!(success);
        assert_eq!(response, "false");
    }

    #[test]
    fn test_play_accepts_any_step_order() {
        let mut engine = Engine::default();
        let (success, _) = engine.execute("play", "e7-e6 c7-c6");
        assert!(success);
        assert_eq!(engine.board().side_to_move(), Side::Black);
        assert_eq!(engine.board().pass_counter(), 0);
    }

    #[test]
    fn test_play_rejects_illegal_turns() {
        let mut engine = Engine::default();
        // Passing is not allowed on the first turn.
        let (success, response) = engine.execute("play", "pass");
        assert!(!success);
        assert_eq!(response, "illegal turn");

        let (success, _) = engine.execute("play", "e7-e4");
        assert!(!success);

        let (success, _) = engine.execute("play", "garbage");
        assert!(!success);
    }

    #[test]
    fn test_depth_and_strategy() {
        let mut engine = Engine::default();
        assert_eq!(engine.execute("depth", ""), (true, "0".to_string()));
        assert!(engine.execute("depth", "2").0);
        assert_eq!(engine.execute("depth", ""), (true, "2".to_string()));
        assert!(!engine.execute("depth", "deep").0);

        assert!(engine.execute("strategy", "random").0);
        assert_eq!(engine.execute("strategy", ""), (true, "random".to_string()));
        assert!(!engine.execute("strategy", "mcts").0);
    }

    #[test]
    fn test_genmove_random_plays_a_turn() {
        let mut engine = Engine::default().with_strategy(Strategy::Random);
        let (success, response) = engine.execute("genmove", "");
        assert!(success);
        assert!(response.parse::<Turn>().is_ok());
        assert_eq!(engine.board().history().len(), 1);
    }

    #[test]
    fn test_new_game_and_clear() {
        let mut engine = Engine::default();
        assert!(engine.execute("play", "e7-e6").0);
        assert!(engine.execute("clear", "").0);
        assert!(engine.board().pieces().is_empty());
        assert!(engine.execute("new_game", "").0);
        assert_eq!(engine.board().pieces().len(), 18);
        assert_eq!(engine.board().history().len(), 0);
    }

    #[test]
    fn test_unknown_command() {
        let mut engine = Engine::default();
        let (success, response) = engine.execute("komi", "7.5");
        assert!(!success);
        assert_eq!(response, "unknown command: komi");
    }
}
