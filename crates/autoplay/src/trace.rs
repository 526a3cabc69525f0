use crate::{AutoAction, AutoplayError};
use koehandel_core::{Animal, GameState, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum RunStatus {
    Finished,
    MaxSteps,
    NoLegalAction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: u32,
    pub action: AutoAction,
    pub label: String,
    pub deck_before: usize,
    pub deck_after: usize,
    pub state_after: GameState,
    pub event_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FinalStanding {
    pub player: PlayerId,
    pub name: String,
    pub cash: u32,
    pub herd: BTreeMap<Animal, usize>,
    pub score: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryStats {
    pub steps: u32,
    pub events: usize,
    pub auctions: usize,
    pub trades: usize,
    pub donkey_drops: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoplayResult {
    pub seed: u64,
    pub status: RunStatus,
    pub standings: Vec<FinalStanding>,
    pub steps: Vec<StepRecord>,
    pub summary: SummaryStats,
}

impl AutoplayResult {
    /// Highest score first; ties keep seat order.
    pub fn winner(&self) -> Option<&FinalStanding> {
        let best = self.standings.iter().filter_map(|s| s.score).max()?;
        self.standings.iter().find(|s| s.score == Some(best))
    }

    pub fn to_text_report(&self) -> String {
        let mut lines = vec![
            format!("seed: {}", self.seed),
            format!("status: {}", run_status_label(&self.status)),
            format!(
                "summary: steps={} events={} auctions={} trades={} donkeys={}",
                self.summary.steps,
                self.summary.events,
                self.summary.auctions,
                self.summary.trades,
                self.summary.donkey_drops
            ),
            String::new(),
            "standings:".to_string(),
        ];
        for standing in &self.standings {
            let score = standing
                .score
                .map_or_else(|| "-".to_string(), |score| score.to_string());
            lines.push(format!(
                "  {:<12} score={score:>6} cash={:>5} herd={:?}",
                standing.name, standing.cash, standing.herd
            ));
        }
        lines.push(String::new());
        lines.push("steps:".to_string());
        for step in &self.steps {
            lines.push(format!(
                "  step {:>5} | {} | deck {} -> {} | events {}",
                step.step, step.label, step.deck_before, step.deck_after, step.event_count
            ));
        }
        lines.join("\n")
    }
}

fn run_status_label(status: &RunStatus) -> &'static str {
    match status {
        RunStatus::Finished => "finished",
        RunStatus::MaxSteps => "max steps reached",
        RunStatus::NoLegalAction => "no legal action",
    }
}

pub fn save_trace(path: &Path, result: &AutoplayResult) -> Result<(), AutoplayError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = serde_json::to_string_pretty(result)?;
    fs::write(path, body)?;
    Ok(())
}

pub fn save_report(path: &Path, result: &AutoplayResult) -> Result<(), AutoplayError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, result.to_text_report())?;
    Ok(())
}
