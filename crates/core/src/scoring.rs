//! Scoring module - points for rows cleared by a single landing
//!
//! Two rules exist and a game uses exactly one of them:
//!
//! - [`ScoringRule::Doubling`] (default): the first row cleared in a pass is
//!   worth `LINE_CLEAR_BASE`, each further row in the same pass is worth twice
//!   the previous one, so `k` rows award `base * (2^k - 1)`.
//! - [`ScoringRule::Flat`]: every row is worth `LINE_CLEAR_BASE`.

use serde::Deserialize;

use crate::types::LINE_CLEAR_BASE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringRule {
    #[default]
    Doubling,
    Flat,
}

impl ScoringRule {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "doubling" => Some(ScoringRule::Doubling),
            "flat" => Some(ScoringRule::Flat),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringRule::Doubling => "doubling",
            ScoringRule::Flat => "flat",
        }
    }
}

/// Points for clearing `lines` rows in one landing.
pub fn line_clear_score(rule: ScoringRule, lines: usize) -> u32 {
    match rule {
        ScoringRule::Doubling => (0..lines).fold(0u32, |total, i| {
            let step = 1u32.checked_shl(i as u32).unwrap_or(u32::MAX);
            total.saturating_add(LINE_CLEAR_BASE.saturating_mul(step))
        }),
        ScoringRule::Flat => LINE_CLEAR_BASE.saturating_mul(lines as u32),
    }
}
