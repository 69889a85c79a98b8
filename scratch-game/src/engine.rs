//! Game engine: validated rules and single-round play.
//!
//! [`GameEngine`] resolves a configuration once and plays any number of rounds
//! against it. Bets are checked before any random draw.
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;

use crate::combinations::CombinationCatalog;
use crate::config::{ConfigError, ConfigLoader, GameConfig};
use crate::evaluator::{CombinationEvaluator, MatchSet};
use crate::matrix::{Grid, MatrixGenerator};
use crate::probability::ProbabilitySelector;
use crate::result::GameResult;
use crate::reward::RewardCalculator;
use crate::symbols::SymbolCatalog;

/// Errors raised for an individual play.
#[derive(Debug, Error, PartialEq)]
pub enum PlayError {
    #[error("betting amount must be a positive number (got {bet})")]
    InvalidBet { bet: f64 },
}

/// Validated, read-only game rules plus the components that play them.
///
/// The engine holds no random state: every play takes the caller's RNG, so
/// one engine can serve any number of concurrent plays.
#[derive(Debug, Clone, PartialEq)]
pub struct GameEngine {
    rows: usize,
    columns: usize,
    symbols: SymbolCatalog,
    combinations: CombinationCatalog,
    generator: MatrixGenerator,
}

impl GameEngine {
    /// Resolve and validate a configuration document.
    ///
    /// # Errors
    ///
    /// Returns the first configuration problem found: non-positive grid
    /// dimensions, invalid symbols, invalid probability tables, or
    /// malformed win combinations.
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        let invalid_dimensions = || ConfigError::InvalidDimensions {
            rows: config.rows,
            columns: config.columns,
        };
        let rows = usize::try_from(config.rows)
            .ok()
            .filter(|rows| *rows > 0)
            .ok_or_else(invalid_dimensions)?;
        let columns = usize::try_from(config.columns)
            .ok()
            .filter(|columns| *columns > 0)
            .ok_or_else(invalid_dimensions)?;

        let symbols = SymbolCatalog::from_defs(&config.symbols)?;
        let selector =
            ProbabilitySelector::from_config(&config.probabilities, &symbols, rows, columns)?;
        let combinations = CombinationCatalog::from_defs(&config.win_combinations, rows, columns)?;
        log::debug!(
            "game engine ready: {rows}x{columns} grid, {} symbols, {} win combinations",
            symbols.len(),
            combinations.len()
        );

        Ok(Self {
            rows,
            columns,
            symbols,
            combinations,
            generator: MatrixGenerator::new(rows, columns, selector),
        })
    }

    /// Load configuration through `loader` and build the engine from it.
    ///
    /// # Errors
    ///
    /// Returns the loader's error, or a configuration error converted into it.
    pub fn from_loader<L: ConfigLoader>(loader: &L) -> Result<Self, L::Error> {
        let config = loader.load_config()?;
        Ok(Self::new(&config)?)
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    #[must_use]
    pub const fn symbols(&self) -> &SymbolCatalog {
        &self.symbols
    }

    #[must_use]
    pub const fn combinations(&self) -> &CombinationCatalog {
        &self.combinations
    }

    #[must_use]
    pub const fn generator(&self) -> &MatrixGenerator {
        &self.generator
    }

    #[must_use]
    pub const fn evaluator(&self) -> CombinationEvaluator<'_> {
        CombinationEvaluator::new(&self.symbols, &self.combinations)
    }

    #[must_use]
    pub const fn calculator(&self) -> RewardCalculator<'_> {
        RewardCalculator::new(&self.symbols, &self.combinations)
    }

    /// Play one round with the caller's random source.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::InvalidBet`] unless `bet` is positive and finite.
    pub fn play<R: Rng + ?Sized>(&self, bet: f64, rng: &mut R) -> Result<GameResult, PlayError> {
        validate_bet(bet)?;
        let grid = self.generator.generate(rng);
        self.settle(grid, bet)
    }

    /// Play one round with a ChaCha stream seeded from `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::InvalidBet`] unless `bet` is positive and finite.
    pub fn play_seeded(&self, bet: f64, seed: u64) -> Result<GameResult, PlayError> {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        self.play(bet, &mut rng)
    }

    #[must_use]
    pub fn evaluate(&self, grid: &Grid) -> MatchSet {
        self.evaluator().evaluate(grid)
    }

    /// Evaluate an already generated grid and price it.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::InvalidBet`] unless `bet` is positive and finite.
    pub fn settle(&self, grid: Grid, bet: f64) -> Result<GameResult, PlayError> {
        validate_bet(bet)?;
        let matches = self.evaluate(&grid);
        let calculator = self.calculator();
        let reward = calculator.calculate(&grid, bet, &matches);
        let applied_bonus_symbol = calculator.bonus_annotation(&grid, &matches);
        log::debug!(
            "round settled: {} winning symbol(s), reward {reward}",
            matches.len()
        );
        Ok(GameResult {
            matrix: grid,
            reward,
            applied_winning_combinations: matches,
            applied_bonus_symbol,
        })
    }
}

pub(crate) fn validate_bet(bet: f64) -> Result<(), PlayError> {
    if bet.is_finite() && bet > 0.0 {
        Ok(())
    } else {
        Err(PlayError::InvalidBet { bet })
    }
}
