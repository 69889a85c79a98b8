//! Scratch Game Engine
//!
//! Platform-agnostic core for a scratch card game: weighted grid generation,
//! win combination detection and reward calculation, driven by a JSON
//! configuration document. This crate performs no I/O beyond optional
//! configuration loading and holds no global random state.

pub mod combinations;
pub mod config;
pub mod constants;
pub mod engine;
pub mod evaluator;
pub mod matrix;
pub mod numbers;
pub mod probability;
pub mod result;
pub mod reward;
pub mod simulation;
pub mod symbols;

// Re-export commonly used types
pub use combinations::{CombinationCatalog, Coord, ParseCoordError, WinCombination, WinCondition};
pub use config::{
    BonusProbability, CellProbability, ConfigError, ConfigLoader, GameConfig, JsonFileLoader,
    LoadError, Probabilities, SymbolDef, WinCombinationDef, load_config,
};
pub use engine::{GameEngine, PlayError};
pub use evaluator::{CombinationEvaluator, MatchSet};
pub use matrix::{BonusPlacement, GeneratedGrid, Grid, MatrixGenerator};
pub use probability::{ProbabilitySelector, WeightTable};
pub use result::GameResult;
pub use reward::RewardCalculator;
pub use simulation::{SimulationSummary, derive_round_seed, simulate};
pub use symbols::{BonusImpact, Symbol, SymbolCatalog};
