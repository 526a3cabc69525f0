use anyhow::Context;
use koehandel_core::GameConfig;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub const RULES_FILE: &str = "rules.json";

/// Reads table rules from `path`. A directory is searched for `rules.json`.
pub fn load_game_config(path: &Path) -> anyhow::Result<GameConfig> {
    let file = if path.is_dir() {
        path.join(RULES_FILE)
    } else {
        path.to_path_buf()
    };
    let config: GameConfig = load_json(&file)?;
    config
        .validate()
        .with_context(|| format!("validate {}", file.display()))?;
    Ok(config)
}

/// Parses rules from a JSON string. Omitted fields keep their defaults.
pub fn parse_game_config(raw: &str) -> anyhow::Result<GameConfig> {
    let config: GameConfig = serde_json::from_str(raw).context("parse rules")?;
    config.validate().context("validate rules")?;
    Ok(config)
}

/// Rules from `path` when given, the built-in defaults otherwise.
pub fn load_game_config_or_default(path: Option<&Path>) -> anyhow::Result<GameConfig> {
    match path {
        Some(path) => load_game_config(path),
        None => Ok(GameConfig::default()),
    }
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}
