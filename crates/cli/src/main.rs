//! Command line driver: runs seeded autoplay games and prints one JSON summary per game.

use anyhow::Context;
use clap::Parser;
use koehandel_autoplay::{
    run_autoplay, save_report, save_trace, AutoplayConfig, AutoplayResult, RunStatus,
};
use koehandel_data::load_game_config_or_default;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "koehandel")]
#[command(about = "Seeded simulations of the animal auction and trading game")]
struct Args {
    /// Number of seated players
    #[arg(short, long, default_value = "4")]
    players: u64,

    /// Seed of the first game; game n uses seed + n
    #[arg(long, default_value_t = AutoplayConfig::default().seed)]
    seed: u64,

    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Step budget per game
    #[arg(long, default_value_t = AutoplayConfig::default().max_steps)]
    max_steps: u32,

    /// Largest bid raise the policy considers
    #[arg(long, default_value_t = AutoplayConfig::default().max_bid_raise)]
    max_bid_raise: u32,

    /// Rules file (JSON); built-in rules when omitted
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Write the full step trace as JSON
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Write a readable step report
    #[arg(long)]
    report: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct GameSummary<'a> {
    game: u32,
    seed: u64,
    status: &'a RunStatus,
    steps: u32,
    auctions: usize,
    trades: usize,
    donkey_drops: u8,
    winner: Option<&'a str>,
    scores: Vec<(&'a str, Option<u32>)>,
}

impl<'a> GameSummary<'a> {
    fn new(game: u32, result: &'a AutoplayResult) -> Self {
        Self {
            game,
            seed: result.seed,
            status: &result.status,
            steps: result.summary.steps,
            auctions: result.summary.auctions,
            trades: result.summary.trades,
            donkey_drops: result.summary.donkey_drops,
            winner: result.winner().map(|standing| standing.name.as_str()),
            scores: result
                .standings
                .iter()
                .map(|standing| (standing.name.as_str(), standing.score))
                .collect(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let rules = load_game_config_or_default(args.rules.as_deref())?;
    info!(games = args.games, players = args.players, "starting simulations");

    for game in 0..args.games {
        let config = AutoplayConfig {
            seed: args.seed.wrapping_add(u64::from(game)),
            players: args.players,
            max_steps: args.max_steps,
            max_bid_raise: args.max_bid_raise,
        };
        let result = run_autoplay(&config, rules.clone())
            .with_context(|| format!("simulate game {game} (seed {})", config.seed))?;

        if let Some(path) = args.trace.as_deref() {
            let path = numbered(path, game, args.games);
            save_trace(&path, &result).with_context(|| format!("write {}", path.display()))?;
        }
        if let Some(path) = args.report.as_deref() {
            let path = numbered(path, game, args.games);
            save_report(&path, &result).with_context(|| format!("write {}", path.display()))?;
        }

        let line = serde_json::to_string(&GameSummary::new(game, &result))?;
        println!("{line}");
    }
    Ok(())
}

/// `trace.json` becomes `trace-3.json` when more than one game is written.
fn numbered(path: &Path, game: u32, games: u32) -> PathBuf {
    if games <= 1 {
        return path.to_path_buf();
    }
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "trace".to_string());
    let name = match path.extension() {
        Some(ext) => format!("{stem}-{game}.{}", ext.to_string_lossy()),
        None => format!("{stem}-{game}"),
    };
    path.with_file_name(name)
}
