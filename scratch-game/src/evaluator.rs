//! Win combination detection.
use indexmap::IndexMap;
use serde::Serialize;

use crate::combinations::{CombinationCatalog, Coord, WinCondition};
use crate::matrix::Grid;
use crate::symbols::SymbolCatalog;

/// Matched standard symbol -> names of the combinations it satisfied.
///
/// Symbols keep the order they were first matched in; each symbol's list
/// keeps the order its combinations were found in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MatchSet(IndexMap<String, Vec<String>>);

impl MatchSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, symbol: &str, combination: &str) {
        self.0
            .entry(symbol.to_string())
            .or_default()
            .push(combination.to_string());
    }

    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&[String]> {
        self.0.get(symbol).map(Vec::as_slice)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.0
            .iter()
            .map(|(symbol, combinations)| (symbol.as_str(), combinations.as_slice()))
    }

    /// Every combination name across all symbols, in match order.
    pub fn combination_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.values().flatten().map(String::as_str)
    }
}

impl<S, C> FromIterator<(S, C)> for MatchSet
where
    S: AsRef<str>,
    C: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (S, C)>>(iter: I) -> Self {
        let mut matches = Self::new();
        for (symbol, combination) in iter {
            matches.record(symbol.as_ref(), combination.as_ref());
        }
        matches
    }
}

/// Checks a grid against every configured win combination.
#[derive(Debug, Clone, Copy)]
pub struct CombinationEvaluator<'a> {
    symbols: &'a SymbolCatalog,
    combinations: &'a CombinationCatalog,
}

impl<'a> CombinationEvaluator<'a> {
    #[must_use]
    pub const fn new(symbols: &'a SymbolCatalog, combinations: &'a CombinationCatalog) -> Self {
        Self {
            symbols,
            combinations,
        }
    }

    /// Evaluate combinations in configuration order and merge the hits by symbol.
    #[must_use]
    pub fn evaluate(&self, grid: &Grid) -> MatchSet {
        let mut matches = MatchSet::new();
        for combination in self.combinations.iter() {
            let hits = match &combination.condition {
                WinCondition::SameSymbols { count } => self.same_symbols(grid, *count),
                WinCondition::LinearSymbols { areas } => self.linear_symbols(grid, areas),
                WinCondition::Unsupported { .. } => Vec::new(),
            };
            for symbol in hits {
                log::debug!("{symbol} matched {}", combination.name);
                matches.record(symbol, &combination.name);
            }
        }
        matches
    }

    /// Standard symbols occurring at least `count` times anywhere on the grid,
    /// in row-major order of first appearance.
    fn same_symbols<'g>(&self, grid: &'g Grid, count: usize) -> Vec<&'g str> {
        let mut tally: IndexMap<&str, usize> = IndexMap::new();
        for symbol in grid.iter() {
            *tally.entry(symbol).or_default() += 1;
        }
        tally
            .into_iter()
            .filter(|(symbol, seen)| *seen >= count && self.symbols.is_standard(symbol))
            .map(|(symbol, _)| symbol)
            .collect()
    }

    /// One entry per area whose cells all hold the same standard symbol.
    fn linear_symbols<'g>(&self, grid: &'g Grid, areas: &[Vec<Coord>]) -> Vec<&'g str> {
        areas
            .iter()
            .filter_map(|area| uniform_symbol(grid, area))
            .filter(|symbol| self.symbols.is_standard(symbol))
            .collect()
    }
}

fn uniform_symbol<'g>(grid: &'g Grid, area: &[Coord]) -> Option<&'g str> {
    let (first, rest) = area.split_first()?;
    let symbol = grid.symbol_at(*first)?;
    rest.iter()
        .all(|coord| grid.symbol_at(*coord) == Some(symbol))
        .then_some(symbol)
}
