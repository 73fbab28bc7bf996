//! Configuration loading for the binary.
//!
//! The file is optional TOML; missing keys keep their defaults. Values from the
//! command line win over the file.

use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};

use crate::core::{GameConfig, ScoringRule};
use crate::types::{MAX_BOARD_DIM, MIN_BOARD_DIM};

/// Read `path` (if any) into a validated [`GameConfig`].
pub fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))?
        }
        None => GameConfig::default(),
    };
    validate(&config)?;
    Ok(config)
}

/// Reject values the game loop cannot run with.
pub fn validate(config: &GameConfig) -> Result<()> {
    ensure!(config.drop_interval_ms > 0, "drop_interval_ms must be greater than 0");
    ensure!(
        config.soft_drop_interval_ms > 0,
        "soft_drop_interval_ms must be greater than 0"
    );
    ensure!(config.frame_ms > 0, "frame_ms must be greater than 0");
    for (name, value) in [("board_width", config.board_width), ("board_height", config.board_height)] {
        ensure!(
            (MIN_BOARD_DIM..=MAX_BOARD_DIM).contains(&value),
            "{name} must be between {MIN_BOARD_DIM} and {MAX_BOARD_DIM}, got {value}"
        );
    }
    Ok(())
}

/// Apply command line overrides on top of a loaded config.
pub fn apply_overrides(config: &mut GameConfig, seed: Option<u32>, scoring: Option<ScoringRule>) {
    if seed.is_some() {
        config.seed = seed;
    }
    if let Some(scoring) = scoring {
        config.scoring = scoring;
    }
}
