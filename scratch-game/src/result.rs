//! Outcome of a single round.
use serde::Serialize;

use crate::evaluator::MatchSet;
use crate::matrix::Grid;

/// Result document for one play. Field names are part of the output format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameResult {
    pub matrix: Grid,
    pub reward: f64,
    pub applied_winning_combinations: MatchSet,
    /// Effective bonus symbols found on a winning grid, each followed by `,`.
    /// `None` when no combination matched.
    pub applied_bonus_symbol: Option<String>,
}

impl GameResult {
    #[must_use]
    pub fn is_win(&self) -> bool {
        !self.applied_winning_combinations.is_empty()
    }

    /// Bonus symbols listed in the annotation, in grid scan order.
    pub fn applied_bonus_symbols(&self) -> impl Iterator<Item = &str> + '_ {
        self.applied_bonus_symbol
            .as_deref()
            .unwrap_or_default()
            .split_terminator(crate::constants::BONUS_ANNOTATION_SEPARATOR)
    }

    /// Serialize to compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to indented JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
