use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use konane_core::arena::{play_n_games, Competitor};
use konane_core::engine::config::{EngineConfig, SearchAlgorithm};
use konane_core::logic::board::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use konane_core::player::{FixedFirstPlayer, Player, RandomPlayer, SearchPlayer};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod human;
mod render;

use human::HumanPlayer;
use render::ConsoleObserver;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PlayerKind {
    /// Always the first legal move
    Simple,
    /// A random legal move
    Random,
    /// Moves typed at the terminal
    Human,
    /// Full-width minimax search
    Minimax,
    /// Minimax with alpha-beta pruning
    Alphabeta,
}

#[derive(Parser, Debug)]
#[command(name = "konane", version, about = "Play Konane (Hawaiian checkers) in the terminal")]
struct Args {
    /// Board side length
    #[arg(long, default_value_t = 8)]
    size: usize,

    /// Number of games; players alternate moving first
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// Player who moves first in the first game
    #[arg(long, value_enum, default_value_t = PlayerKind::Human)]
    first: PlayerKind,

    /// The other player
    #[arg(long, value_enum, default_value_t = PlayerKind::Alphabeta)]
    second: PlayerKind,

    /// Search depth for both search players
    #[arg(long)]
    depth: Option<u8>,

    /// Search depth for the first player, overriding --depth
    #[arg(long)]
    first_depth: Option<u8>,

    /// Search depth for the second player, overriding --depth
    #[arg(long)]
    second_depth: Option<u8>,

    /// Engine configuration JSON used as the default for search players
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed for random players
    #[arg(long)]
    seed: Option<u64>,

    /// Print every position and move
    #[arg(long)]
    show: bool,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    EngineConfig::load_from_json(&json)
        .with_context(|| format!("invalid config {}", path.display()))
}

fn build_player(
    kind: PlayerKind,
    base: &EngineConfig,
    depth: Option<u8>,
    seed: Option<u64>,
) -> Box<dyn Player> {
    let search = |algorithm| {
        let config = EngineConfig::new(depth.unwrap_or(base.depth_limit), algorithm);
        Box::new(SearchPlayer::from_config(&config)) as Box<dyn Player>
    };
    match kind {
        PlayerKind::Simple => Box::new(FixedFirstPlayer::new()),
        PlayerKind::Random => Box::new(seed.map_or_else(RandomPlayer::new, RandomPlayer::with_seed)),
        PlayerKind::Human => Box::new(HumanPlayer::stdio()),
        PlayerKind::Minimax => search(SearchAlgorithm::Minimax),
        PlayerKind::Alphabeta => search(SearchAlgorithm::AlphaBeta),
    }
}

/// Per-player depth flags win over `--depth`, which wins over the config file.
fn build_competitors(args: &Args, base: &EngineConfig) -> (Competitor, Competitor) {
    let first = build_player(args.first, base, args.first_depth.or(args.depth), args.seed);
    let second = build_player(
        args.second,
        base,
        args.second_depth.or(args.depth),
        args.seed.map(|s| s.wrapping_add(1)),
    );
    (Competitor::new(first), Competitor::new(second))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&args.size) {
        bail!(
            "board size must be between {MIN_BOARD_SIZE} and {MAX_BOARD_SIZE}, got {}",
            args.size
        );
    }

    let base = load_config(args.config.as_deref())?;
    tracing::debug!(?base, "engine defaults");

    let (mut a, mut b) = build_competitors(&args, &base);
    tracing::info!(
        "{} vs {} on {}x{}, {} game(s)",
        a.record.name,
        b.record.name,
        args.size,
        args.size,
        args.games
    );

    let mut observer = ConsoleObserver::new(std::io::stdout(), args.show);
    play_n_games(args.size, args.games, &mut a, &mut b, &mut observer);

    tracing::info!("{} game(s) played", a.record.games());
    println!("{}", a.record);
    println!("{}", b.record);
    Ok(())
}
