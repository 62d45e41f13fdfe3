//! Sutran-Rust: rules engine and computer opponent for Sutran.
//!
//! ## Usage
//!
//! - `sutran-rust` - Show a demo
//! - `sutran-rust protocol` - Start the text protocol on stdin/stdout
//! - `sutran-rust demo --turns 6` - Let the engine play itself
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `info`).

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use sutran_rust::board::Board;
use sutran_rust::config::GameConfig;
use sutran_rust::constants::{
    DEFAULT_FLANKING, DEFAULT_HEIGHT, DEFAULT_KNIGHTS, DEFAULT_PAWNS, DEFAULT_WIDTH,
};
use sutran_rust::protocol::Engine;
use sutran_rust::search::Strategy;

/// Sutran-Rust: a Sutran engine with alpha-beta search
#[derive(Parser)]
#[command(name = "sutran-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    game: GameArgs,

    /// Search depth; 0 picks one from the number of legal turns
    #[arg(long, global = true, default_value_t = 0)]
    depth: u32,

    /// How the engine chooses its turns
    #[arg(long, global = true, value_enum, default_value_t = StrategyArg::Alphabeta)]
    strategy: StrategyArg,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct GameArgs {
    /// Board width
    #[arg(long, global = true, default_value_t = DEFAULT_WIDTH)]
    width: i32,

    /// Board height
    #[arg(long, global = true, default_value_t = DEFAULT_HEIGHT)]
    height: i32,

    /// Pawns per side
    #[arg(long, global = true, default_value_t = DEFAULT_PAWNS)]
    pawns: u32,

    /// Knights per side
    #[arg(long, global = true, default_value_t = DEFAULT_KNIGHTS)]
    knights: u32,

    /// Knight columns on each flank
    #[arg(long, global = true, default_value_t = DEFAULT_FLANKING)]
    flanking: i32,
}

impl From<&GameArgs> for GameConfig {
    fn from(args: &GameArgs) -> Self {
        GameConfig {
            width: args.width,
            height: args.height,
            pawns: args.pawns,
            knights: args.knights,
            flanking: args.flanking,
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
enum StrategyArg {
    Alphabeta,
    Pvs,
    Random,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Alphabeta => Strategy::AlphaBeta,
            StrategyArg::Pvs => Strategy::PrincipalVariation,
            StrategyArg::Random => Strategy::Random,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start the text protocol for use with a front end
    Protocol,
    /// Let the engine play against itself
    Demo {
        /// Number of turns to play
        #[arg(long, default_value_t = 4)]
        turns: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = GameConfig::from(&cli.game);
    config.validate()?;
    let strategy = Strategy::from(cli.strategy);

    match cli.command {
        Some(Commands::Protocol) => {
            let mut engine = Engine::new(config)
                .with_depth(cli.depth)
                .with_strategy(strategy);
            engine.run()?;
        }
        Some(Commands::Demo { turns }) => run_demo(&config, strategy, cli.depth, turns),
        None => run_demo(&config, strategy, cli.depth, 4),
    }
    Ok(())
}

fn run_demo(config: &GameConfig, strategy: Strategy, depth: u32, turns: usize) {
    println!("Sutran-Rust: Sutran Engine\n");

    let mut board = Board::from_config(config);
    let mut rng = fastrand::Rng::new();
    println!("{board}{}\n", board.summary());

    for n in 1..=turns {
        let outcome = board.outcome();
        if outcome.is_over() {
            println!("Game over: {outcome}");
            break;
        }
        let side = board.side_to_move();
        let Some(result) = strategy.choose(&board, depth, &mut rng) else {
            println!("{side} has no legal turn");
            break;
        };
        board.apply_turn(&result.turn);

        println!("{n}. {side}: {} (depth {})", result.turn, result.depth);
        println!("Current evaluation: {:.1}", board.evaluate());
        println!("{board}{}\n", board.summary());
    }
}
