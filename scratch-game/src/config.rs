//! Configuration document for a scratch game and the errors raised while
//! loading or validating it.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants::DEFAULT_GRID_DIMENSION;

/// Raw game configuration as it appears in the JSON document.
///
/// Ordered maps keep declaration order, which pins the weighted draw order
/// and the order win combinations are evaluated in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "GameConfig::default_dimension")]
    pub columns: i64,
    #[serde(default = "GameConfig::default_dimension")]
    pub rows: i64,
    #[serde(default)]
    pub symbols: IndexMap<String, SymbolDef>,
    #[serde(default)]
    pub probabilities: Probabilities,
    #[serde(default)]
    pub win_combinations: IndexMap<String, WinCombinationDef>,
}

impl GameConfig {
    const fn default_dimension() -> i64 {
        DEFAULT_GRID_DIMENSION
    }

    /// Parse a configuration document from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or does not match the document shape.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// A symbol entry. `type` decides which of the optional fields are consulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolDef {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward_multiplier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Probabilities {
    #[serde(default)]
    pub standard_symbols: Vec<CellProbability>,
    #[serde(default)]
    pub bonus_symbols: BonusProbability,
}

/// Weight table bound to one grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellProbability {
    #[serde(default)]
    pub column: i64,
    #[serde(default)]
    pub row: i64,
    #[serde(default)]
    pub symbols: IndexMap<String, u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BonusProbability {
    #[serde(default)]
    pub symbols: IndexMap<String, u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinCombinationDef {
    pub reward_multiplier: f64,
    pub when: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub covered_areas: Vec<Vec<String>>,
}

/// Errors raised when configuration invariants are violated.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("grid dimensions must be positive (rows {rows}, columns {columns})")]
    InvalidDimensions { rows: i64, columns: i64 },
    #[error("symbol {symbol} has unknown type {kind:?}")]
    UnknownSymbolType { symbol: String, kind: String },
    #[error("symbol {symbol} is missing {field}")]
    MissingSymbolField { symbol: String, field: &'static str },
    #[error("{owner}: {field} must be a finite non-negative number (got {value})")]
    InvalidNumber {
        owner: String,
        field: &'static str,
        value: f64,
    },
    #[error("no standard symbol probabilities configured")]
    NoStandardProbabilities,
    #[error("probability table {table} has zero total weight")]
    ZeroWeightTable { table: String },
    #[error("probability table {table} references unknown symbol {symbol}")]
    UnknownSymbol { table: String, symbol: String },
    #[error("win combination {combination}: {reason}")]
    MalformedCombination {
        combination: String,
        reason: &'static str,
    },
    #[error("win combination {combination}: malformed coordinate {coord:?}")]
    MalformedCoordinate { combination: String, coord: String },
    #[error("win combination {combination}: coordinate {coord} outside the {rows}x{columns} grid")]
    CoordinateOutOfRange {
        combination: String,
        coord: String,
        rows: usize,
        columns: usize,
    },
}

/// Errors raised while reading a configuration document from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read config {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Read and parse a configuration document.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read and
/// [`LoadError::Parse`] if it is not a valid configuration document.
pub fn load_config(path: impl AsRef<Path>) -> Result<GameConfig, LoadError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded config {} ({} bytes)", path.display(), json.len());
    GameConfig::from_json(&json).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Source of game configuration.
/// Platform-specific front ends provide their own implementation.
pub trait ConfigLoader {
    type Error: std::error::Error + From<ConfigError> + Send + Sync + 'static;

    /// Load the configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or parsed.
    fn load_config(&self) -> Result<GameConfig, Self::Error>;
}

/// Loads configuration from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileLoader {
    path: PathBuf,
}

impl JsonFileLoader {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigLoader for JsonFileLoader {
    type Error = LoadError;

    fn load_config(&self) -> Result<GameConfig, Self::Error> {
        load_config(&self.path)
    }
}
