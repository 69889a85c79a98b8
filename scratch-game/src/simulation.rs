//! Batch play for return-to-player estimates.
use hmac::{Hmac, Mac};
use indexmap::IndexMap;
use serde::Serialize;
use sha2::Sha256;

use crate::engine::{GameEngine, PlayError, validate_bet};
use crate::numbers::{ratio, u64_to_f64};

/// Derive the seed for one round of a batch.
///
/// Every round gets an independent stream, so a single round can be replayed
/// with [`GameEngine::play_seeded`] without playing the rounds before it.
#[must_use]
pub fn derive_round_seed(seed: u64, round: u64) -> u64 {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(&seed.to_le_bytes()).expect("64-bit seed is valid key");
    mac.update(&round.to_le_bytes());
    let digest = mac.finalize().into_bytes();
    let seed_bytes: [u8; 8] = digest[..8].try_into().expect("digest slice length");
    u64::from_le_bytes(seed_bytes)
}

/// Aggregate statistics for a batch of rounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub seed: u64,
    pub rounds: u64,
    pub bet: f64,
    pub total_bet: f64,
    pub total_reward: f64,
    pub rtp: f64,
    pub hit_rate: f64,
    pub winning_rounds: u64,
    pub bonus_rounds: u64,
    pub max_reward: f64,
    /// Rounds on which each combination matched at least once, in first-hit order.
    pub pattern_hits: IndexMap<String, u64>,
}

impl SimulationSummary {
    fn finish(mut self) -> Self {
        self.rtp = ratio(self.total_reward, self.total_bet);
        self.hit_rate = ratio(u64_to_f64(self.winning_rounds), u64_to_f64(self.rounds));
        self
    }
}

/// Play `rounds` independent rounds of `bet` and summarize them.
///
/// # Errors
///
/// Returns [`PlayError::InvalidBet`] unless `bet` is positive and finite.
pub fn simulate(
    engine: &GameEngine,
    bet: f64,
    rounds: u64,
    seed: u64,
) -> Result<SimulationSummary, PlayError> {
    validate_bet(bet)?;
    let mut summary = SimulationSummary {
        seed,
        ..SimulationSummary::default()
    };
    if rounds == 0 {
        return Ok(summary);
    }
    summary.bet = bet;

    for round in 0..rounds {
        let result = engine.play_seeded(bet, derive_round_seed(seed, round))?;
        summary.rounds += 1;
        summary.total_bet += bet;
        summary.total_reward += result.reward;
        summary.max_reward = summary.max_reward.max(result.reward);
        if result.is_win() {
            summary.winning_rounds += 1;
        }
        if result.applied_bonus_symbols().next().is_some() {
            summary.bonus_rounds += 1;
        }

        let mut counted: Vec<&str> = Vec::new();
        for name in result.applied_winning_combinations.combination_names() {
            if counted.contains(&name) {
                continue;
            }
            counted.push(name);
            *summary.pattern_hits.entry(name.to_string()).or_default() += 1;
        }
    }

    log::info!(
        "simulated {} rounds: total reward {} on total bet {}",
        summary.rounds,
        summary.total_reward,
        summary.total_bet
    );
    Ok(summary.finish())
}
