//! Win combination catalog.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config::{ConfigError, WinCombinationDef};
use crate::constants::{COORD_SEPARATOR, WHEN_LINEAR_SYMBOLS, WHEN_SAME_SYMBOLS};

/// Grid coordinate written as `row:column` in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub column: usize,
}

impl Coord {
    #[must_use]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected `row:column`, got {0:?}")]
pub struct ParseCoordError(String);

impl FromStr for Coord {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCoordError(s.to_string());
        let (row, column) = s.trim().split_once(COORD_SEPARATOR).ok_or_else(err)?;
        let row = row.trim().parse().map_err(|_| err())?;
        let column = column.trim().parse().map_err(|_| err())?;
        Ok(Self { row, column })
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{COORD_SEPARATOR}{}", self.row, self.column)
    }
}

/// What a win combination checks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WinCondition {
    /// At least `count` occurrences of one standard symbol anywhere on the grid.
    SameSymbols { count: usize },
    /// Every coordinate of an area holds the same standard symbol.
    LinearSymbols { areas: Vec<Vec<Coord>> },
    /// Any other `when`; never matches.
    Unsupported { when: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct WinCombination {
    pub name: String,
    pub reward_multiplier: f64,
    pub group: Option<String>,
    pub condition: WinCondition,
}

impl WinCombination {
    /// Resolve a raw combination against the grid extents.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-finite or negative multiplier, a
    /// `same_symbols` entry without a positive `count`, a `linear_symbols`
    /// entry without areas (or with an empty area), and malformed or
    /// out-of-grid coordinates.
    pub fn from_def(
        name: &str,
        def: &WinCombinationDef,
        rows: usize,
        columns: usize,
    ) -> Result<Self, ConfigError> {
        if !def.reward_multiplier.is_finite() || def.reward_multiplier < 0.0 {
            return Err(ConfigError::InvalidNumber {
                owner: format!("win combination {name}"),
                field: "reward_multiplier",
                value: def.reward_multiplier,
            });
        }
        let condition = match def.when.as_str() {
            WHEN_SAME_SYMBOLS => {
                let count = def.count.filter(|count| *count > 0).ok_or_else(|| {
                    ConfigError::MalformedCombination {
                        combination: name.to_string(),
                        reason: "same_symbols requires a positive count",
                    }
                })?;
                WinCondition::SameSymbols {
                    count: count as usize,
                }
            }
            WHEN_LINEAR_SYMBOLS => WinCondition::LinearSymbols {
                areas: parse_areas(name, &def.covered_areas, rows, columns)?,
            },
            other => {
                log::debug!("win combination {name} uses unsupported condition {other:?}");
                WinCondition::Unsupported {
                    when: other.to_string(),
                }
            }
        };
        Ok(Self {
            name: name.to_string(),
            reward_multiplier: def.reward_multiplier,
            group: def.group.clone(),
            condition,
        })
    }
}

fn parse_areas(
    name: &str,
    covered_areas: &[Vec<String>],
    rows: usize,
    columns: usize,
) -> Result<Vec<Vec<Coord>>, ConfigError> {
    if covered_areas.is_empty() {
        return Err(ConfigError::MalformedCombination {
            combination: name.to_string(),
            reason: "linear_symbols requires covered_areas",
        });
    }
    covered_areas
        .iter()
        .map(|area| {
            if area.is_empty() {
                return Err(ConfigError::MalformedCombination {
                    combination: name.to_string(),
                    reason: "covered area must list at least one coordinate",
                });
            }
            area.iter()
                .map(|raw| parse_coord(name, raw, rows, columns))
                .collect()
        })
        .collect()
}

fn parse_coord(name: &str, raw: &str, rows: usize, columns: usize) -> Result<Coord, ConfigError> {
    let coord: Coord = raw.parse().map_err(|_| ConfigError::MalformedCoordinate {
        combination: name.to_string(),
        coord: raw.to_string(),
    })?;
    if coord.row >= rows || coord.column >= columns {
        return Err(ConfigError::CoordinateOutOfRange {
            combination: name.to_string(),
            coord: raw.to_string(),
            rows,
            columns,
        });
    }
    Ok(coord)
}

/// All configured win combinations, in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CombinationCatalog {
    combinations: IndexMap<String, WinCombination>,
}

impl CombinationCatalog {
    /// Resolve every raw combination.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] raised by [`WinCombination::from_def`].
    pub fn from_defs(
        defs: &IndexMap<String, WinCombinationDef>,
        rows: usize,
        columns: usize,
    ) -> Result<Self, ConfigError> {
        defs.iter()
            .map(|(name, def)| {
                WinCombination::from_def(name, def, rows, columns)
                    .map(|combination| (name.clone(), combination))
            })
            .collect::<Result<IndexMap<_, _>, _>>()
            .map(|combinations| Self { combinations })
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&WinCombination> {
        self.combinations.get(name)
    }

    #[must_use]
    pub fn reward_multiplier(&self, name: &str) -> Option<f64> {
        self.get(name).map(|combination| combination.reward_multiplier)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WinCombination> + '_ {
        self.combinations.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }
}

impl FromIterator<WinCombination> for CombinationCatalog {
    fn from_iter<I: IntoIterator<Item = WinCombination>>(iter: I) -> Self {
        Self {
            combinations: iter
                .into_iter()
                .map(|combination| (combination.name.clone(), combination))
                .collect(),
        }
    }
}
