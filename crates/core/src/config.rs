//! Game configuration.
//!
//! Plain data with serde defaults so a partial TOML table fills in the rest.
//! Reading files and validating ranges is left to the binary.

use serde::Deserialize;

use crate::scoring::ScoringRule;
use crate::types::{BASE_DROP_MS, BOARD_HEIGHT, BOARD_WIDTH, SOFT_DROP_INTERVAL_MS, TICK_MS};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Fixed RNG seed; `None` lets the caller pick one.
    pub seed: Option<u32>,
    pub scoring: ScoringRule,
    /// Gravity interval in milliseconds
    pub drop_interval_ms: u32,
    /// Gravity interval while soft drop is held
    pub soft_drop_interval_ms: u32,
    /// Game loop frame interval
    pub frame_ms: u32,
    pub board_width: u8,
    pub board_height: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            scoring: ScoringRule::default(),
            drop_interval_ms: BASE_DROP_MS,
            soft_drop_interval_ms: SOFT_DROP_INTERVAL_MS,
            frame_ms: TICK_MS,
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
        }
    }
}
