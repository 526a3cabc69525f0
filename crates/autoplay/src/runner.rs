use crate::{
    AutoplayConfig, AutoplayError, AutoplayResult, FinalStanding, RunStatus, Simulator,
    StepRecord, SummaryStats,
};
use koehandel_core::{ActionKind, GameConfig, GameState, RngState};
use tracing::{debug, info};

/// Keeps the policy stream apart from the engine's own shuffle stream.
const POLICY_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Plays one seeded game to the end (or `max_steps`), picking uniformly among the
/// legal actions at every step.
pub fn run_autoplay(
    config: &AutoplayConfig,
    rules: GameConfig,
) -> Result<AutoplayResult, AutoplayError> {
    let mut sim = Simulator::setup(config, rules)?;
    let mut policy = RngState::from_seed(config.seed ^ POLICY_SALT);
    let mut records: Vec<StepRecord> = Vec::new();
    let mut total_events = 0;
    let mut status = None;

    for step in 0..config.max_steps {
        if sim.game.state() == GameState::Finished {
            status = Some(RunStatus::Finished);
            break;
        }
        let candidates = sim.legal_actions(config);
        let Some(action) = policy.choose(&candidates).cloned() else {
            status = Some(RunStatus::NoLegalAction);
            break;
        };

        let deck_before = deck_len(&sim);
        let event_count = sim.apply_action(&action)?;
        total_events += event_count;
        debug!(step, action = %action.stable_key(), event_count, "autoplay step");
        records.push(StepRecord {
            step,
            label: action.short_label(),
            action,
            deck_before,
            deck_after: deck_len(&sim),
            state_after: sim.game.state(),
            event_count,
        });
    }

    let status = match status {
        Some(status) => status,
        None if sim.game.state() == GameState::Finished => RunStatus::Finished,
        None => RunStatus::MaxSteps,
    };
    let standings = sim
        .game
        .players()
        .iter()
        .map(|player| FinalStanding {
            player: player.id,
            name: player.name.clone(),
            cash: player.wallet.total(),
            herd: player.herd_counts(),
            score: player.score,
        })
        .collect();
    let history = sim.game.history();
    let summary = SummaryStats {
        steps: sim.steps(),
        events: total_events,
        auctions: history
            .iter()
            .filter(|action| action.kind() == ActionKind::Auction)
            .count(),
        trades: history
            .iter()
            .filter(|action| action.kind() == ActionKind::Trade)
            .count(),
        donkey_drops: sim.game.donkey_drops(),
    };
    info!(
        seed = config.seed,
        ?status,
        steps = summary.steps,
        auctions = summary.auctions,
        trades = summary.trades,
        "autoplay finished"
    );

    Ok(AutoplayResult {
        seed: config.seed,
        status,
        standings,
        steps: records,
        summary,
    })
}

fn deck_len(sim: &Simulator) -> usize {
    sim.game.deck().map_or(0, |deck| deck.len())
}
