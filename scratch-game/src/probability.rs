//! Weighted symbol selection.
//!
//! Tables are walked in declaration order: a roll `r` in `[0, total)` picks
//! the first symbol whose cumulative weight exceeds `r`.
use indexmap::IndexMap;
use rand::Rng;
use std::collections::HashMap;

use crate::config::{ConfigError, Probabilities};
use crate::constants::BONUS_TABLE_LABEL;
use crate::numbers::u64_to_f64;
use crate::symbols::SymbolCatalog;

/// Validated weight table with a positive total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightTable {
    entries: Vec<(String, u32)>,
    total: u64,
}

impl WeightTable {
    /// Build a table from declared weights.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroWeightTable`] when the weights sum to zero
    /// (including an empty table).
    pub fn new(label: &str, weights: &IndexMap<String, u32>) -> Result<Self, ConfigError> {
        let entries: Vec<(String, u32)> = weights
            .iter()
            .map(|(symbol, weight)| (symbol.clone(), *weight))
            .collect();
        let total: u64 = entries.iter().map(|(_, weight)| u64::from(*weight)).sum();
        if total == 0 {
            return Err(ConfigError::ZeroWeightTable {
                table: label.to_string(),
            });
        }
        Ok(Self { entries, total })
    }

    /// Draw a symbol.
    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        let roll = rng.gen_range(0..self.total);
        let mut cursor = 0_u64;
        for (symbol, weight) in &self.entries {
            cursor = cursor.saturating_add(u64::from(*weight));
            if roll < cursor {
                log::trace!("weighted draw {roll}/{} -> {symbol}", self.total);
                return symbol;
            }
        }
        // Unreachable while `total` is the exact sum of the weights.
        self.entries.first().map_or("", |(symbol, _)| symbol.as_str())
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(symbol, _)| symbol.as_str())
    }

    /// Probability of drawing `symbol`, `0.0` when it is not in the table.
    #[must_use]
    pub fn probability_of(&self, symbol: &str) -> f64 {
        let weight: u64 = self
            .entries
            .iter()
            .filter(|(name, _)| name == symbol)
            .map(|(_, weight)| u64::from(*weight))
            .sum();
        u64_to_f64(weight) / u64_to_f64(self.total)
    }

    fn ensure_known(&self, label: &str, catalog: &SymbolCatalog) -> Result<(), ConfigError> {
        match self.symbols().find(|symbol| !catalog.contains(symbol)) {
            Some(symbol) => Err(ConfigError::UnknownSymbol {
                table: label.to_string(),
                symbol: symbol.to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// Per-cell standard tables plus the shared bonus table.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilitySelector {
    cells: HashMap<(usize, usize), WeightTable>,
    fallback: WeightTable,
    bonus: WeightTable,
}

impl ProbabilitySelector {
    /// Validate every configured table and index the standard ones by cell.
    ///
    /// The first standard table doubles as the fallback for unlisted cells.
    /// When a cell is listed more than once the first entry wins.
    ///
    /// # Errors
    ///
    /// Returns an error when no standard table is configured, when any table
    /// has zero total weight, or when a table names a symbol outside the catalog.
    pub fn from_config(
        probabilities: &Probabilities,
        catalog: &SymbolCatalog,
        rows: usize,
        columns: usize,
    ) -> Result<Self, ConfigError> {
        let mut fallback = None;
        let mut cells = HashMap::new();
        for (idx, cell) in probabilities.standard_symbols.iter().enumerate() {
            let label = format!(
                "standard_symbols[{idx}] (row {}, column {})",
                cell.row, cell.column
            );
            let table = WeightTable::new(&label, &cell.symbols)?;
            table.ensure_known(&label, catalog)?;
            if fallback.is_none() {
                fallback = Some(table.clone());
            }
            let (Ok(row), Ok(column)) = (usize::try_from(cell.row), usize::try_from(cell.column))
            else {
                log::warn!("ignoring {label}: cell is outside the {rows}x{columns} grid");
                continue;
            };
            if row >= rows || column >= columns {
                log::warn!("ignoring {label}: cell is outside the {rows}x{columns} grid");
                continue;
            }
            if cells.contains_key(&(row, column)) {
                log::warn!("ignoring {label}: cell already has a probability table");
                continue;
            }
            cells.insert((row, column), table);
        }
        let fallback = fallback.ok_or(ConfigError::NoStandardProbabilities)?;

        let bonus = WeightTable::new(BONUS_TABLE_LABEL, &probabilities.bonus_symbols.symbols)?;
        bonus.ensure_known(BONUS_TABLE_LABEL, catalog)?;

        Ok(Self {
            cells,
            fallback,
            bonus,
        })
    }

    /// Table used for `(row, column)`: the exact cell entry, else the fallback.
    #[must_use]
    pub fn table_for(&self, row: usize, column: usize) -> &WeightTable {
        self.cells.get(&(row, column)).unwrap_or(&self.fallback)
    }

    #[must_use]
    pub const fn bonus_table(&self) -> &WeightTable {
        &self.bonus
    }

    pub fn standard_symbol<R: Rng + ?Sized>(&self, row: usize, column: usize, rng: &mut R) -> &str {
        self.table_for(row, column).select(rng)
    }

    pub fn bonus_symbol<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        self.bonus.select(rng)
    }
}
