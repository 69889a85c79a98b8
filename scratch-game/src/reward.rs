//! Reward calculation: per-symbol base payout, multiplicative combination
//! stacking, then bonus symbol effects from every cell of the grid.
use crate::combinations::CombinationCatalog;
use crate::constants::{BONUS_ANNOTATION_SEPARATOR, MISS_SYMBOL};
use crate::evaluator::MatchSet;
use crate::matrix::Grid;
use crate::symbols::{BonusImpact, SymbolCatalog};

#[derive(Debug, Clone, Copy)]
pub struct RewardCalculator<'a> {
    symbols: &'a SymbolCatalog,
    combinations: &'a CombinationCatalog,
}

impl<'a> RewardCalculator<'a> {
    #[must_use]
    pub const fn new(symbols: &'a SymbolCatalog, combinations: &'a CombinationCatalog) -> Self {
        Self {
            symbols,
            combinations,
        }
    }

    /// Final reward for a round.
    #[must_use]
    pub fn calculate(&self, grid: &Grid, bet: f64, matches: &MatchSet) -> f64 {
        if matches.is_empty() {
            return 0.0;
        }
        let total = self.winnings(bet, matches);
        self.apply_bonus_symbols(grid, total)
    }

    /// Sum over matched standard symbols of `bet * symbol multiplier`, each
    /// multiplied by every matched combination's multiplier.
    ///
    /// Symbols missing from the catalog or not standard, and unknown
    /// combination names, contribute nothing.
    #[must_use]
    pub fn winnings(&self, bet: f64, matches: &MatchSet) -> f64 {
        matches
            .iter()
            .filter_map(|(symbol, combinations)| {
                let base = bet * self.symbols.standard_multiplier(symbol)?;
                Some(
                    combinations
                        .iter()
                        .filter_map(|name| self.combinations.reward_multiplier(name))
                        .fold(base, |reward, multiplier| reward * multiplier),
                )
            })
            .sum()
    }

    /// Apply every bonus symbol occurrence on the grid in row-major order.
    /// A non-positive reward is returned untouched.
    #[must_use]
    pub fn apply_bonus_symbols(&self, grid: &Grid, reward: f64) -> f64 {
        if reward <= 0.0 {
            return reward;
        }
        self.bonus_impacts(grid)
            .fold(reward, |current, (symbol, impact)| {
                let next = impact.apply(current);
                log::debug!("bonus {symbol}: {current} -> {next}");
                next
            })
    }

    /// Bonus annotation for the result document: every bonus occurrence in
    /// scan order except `MISS`, each followed by a separator. `None` when
    /// nothing matched.
    ///
    /// Only the symbol name is checked; a bonus symbol's impact does not
    /// decide whether it is listed.
    #[must_use]
    pub fn bonus_annotation(&self, grid: &Grid, matches: &MatchSet) -> Option<String> {
        if matches.is_empty() {
            return None;
        }
        Some(
            self.bonus_impacts(grid)
                .filter(|(symbol, _)| *symbol != MISS_SYMBOL)
                .map(|(symbol, _)| format!("{symbol}{BONUS_ANNOTATION_SEPARATOR}"))
                .collect(),
        )
    }

    fn bonus_impacts<'g>(
        &self,
        grid: &'g Grid,
    ) -> impl Iterator<Item = (&'g str, BonusImpact)> {
        let symbols = self.symbols;
        grid.iter()
            .filter_map(move |symbol| symbols.bonus_impact(symbol).map(|impact| (symbol, impact)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinations::{WinCombination, WinCondition};
    use crate::symbols::Symbol;

    fn symbols() -> SymbolCatalog {
        [
            (
                "A".to_string(),
                Symbol::Standard {
                    reward_multiplier: 2.0,
                },
            ),
            (
                "B".to_string(),
                Symbol::Standard {
                    reward_multiplier: 1.5,
                },
            ),
            (
                "10x".to_string(),
                Symbol::Bonus(BonusImpact::MultiplyReward(10.0)),
            ),
            (
                "+50".to_string(),
                Symbol::Bonus(BonusImpact::ExtraBonus(50.0)),
            ),
            ("MISS".to_string(), Symbol::Bonus(BonusImpact::NoEffect)),
        ]
        .into_iter()
        .collect()
    }

    fn combination(name: &str, reward_multiplier: f64) -> WinCombination {
        WinCombination {
            name: name.to_string(),
            reward_multiplier,
            group: None,
            condition: WinCondition::SameSymbols { count: 3 },
        }
    }

    fn combinations() -> CombinationCatalog {
        [
            combination("x5", 5.0),
            combination("x2", 2.0),
            combination("x1_5", 1.5),
        ]
        .into_iter()
        .collect()
    }

    fn plain_grid() -> Grid {
        Grid::from_rows([["A", "B", "A"], ["B", "A", "B"], ["A", "B", "A"]]).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn empty_matches_pay_nothing() {
        let symbols = symbols();
        let combinations = combinations();
        let calc = RewardCalculator::new(&symbols, &combinations);
        let grid = Grid::from_rows([["10x", "+50", "10x"]]).unwrap();
        assert_close(calc.calculate(&grid, 100.0, &MatchSet::new()), 0.0);
        assert_eq!(calc.bonus_annotation(&grid, &MatchSet::new()), None);
    }

    #[test]
    fn base_times_single_combination() {
        let symbols = symbols();
        let combinations = combinations();
        let calc = RewardCalculator::new(&symbols, &combinations);
        let matches: MatchSet = [("A", "x5")].into_iter().collect();
        assert_close(calc.winnings(10.0, &matches), 100.0);
        assert_close(calc.calculate(&plain_grid(), 10.0, &matches), 100.0);
    }

    #[test]
    fn combinations_stack_multiplicatively_and_symbols_sum() {
        let symbols = symbols();
        let combinations = combinations();
        let calc = RewardCalculator::new(&symbols, &combinations);
        let matches: MatchSet = [("A", "x5"), ("A", "x2"), ("B", "x1_5")].into_iter().collect();
        // A: 10 * 2 * 5 * 2 = 200, B: 10 * 1.5 * 1.5 = 22.5
        assert_close(calc.winnings(10.0, &matches), 222.5);
    }

    #[test]
    fn lookup_misses_contribute_zero() {
        let symbols = symbols();
        let combinations = combinations();
        let calc = RewardCalculator::new(&symbols, &combinations);
        let matches: MatchSet = [("ghost", "x5"), ("10x", "x5"), ("A", "unknown")]
            .into_iter()
            .collect();
        // Only A counts, and its unknown combination adds no multiplier.
        assert_close(calc.winnings(10.0, &matches), 20.0);
    }

    #[test]
    fn extra_bonus_applies_per_occurrence() {
        let symbols = symbols();
        let combinations = combinations();
        let calc = RewardCalculator::new(&symbols, &combinations);
        let grid = Grid::from_rows([["+50", "A", "+50"]]).unwrap();
        assert_close(calc.apply_bonus_symbols(&grid, 100.0), 200.0);
    }

    #[test]
    fn bonus_skipped_when_total_is_zero() {
        let symbols: SymbolCatalog = [
            (
                "DEAD".to_string(),
                Symbol::Standard {
                    reward_multiplier: 0.0,
                },
            ),
            (
                "+50".to_string(),
                Symbol::Bonus(BonusImpact::ExtraBonus(50.0)),
            ),
        ]
        .into_iter()
        .collect();
        let combinations = combinations();
        let calc = RewardCalculator::new(&symbols, &combinations);
        let grid = Grid::from_rows([["DEAD", "+50", "+50"]]).unwrap();
        let matches: MatchSet = [("DEAD", "x5")].into_iter().collect();
        assert_close(calc.calculate(&grid, 10.0, &matches), 0.0);
        assert_close(calc.apply_bonus_symbols(&grid, 0.0), 0.0);
    }

    #[test]
    fn bonus_effects_apply_in_scan_order() {
        let symbols = symbols();
        let combinations = combinations();
        let calc = RewardCalculator::new(&symbols, &combinations);
        let add_then_multiply = Grid::from_rows([["+50", "10x"]]).unwrap();
        let multiply_then_add = Grid::from_rows([["10x", "+50"]]).unwrap();
        assert_close(calc.apply_bonus_symbols(&add_then_multiply, 100.0), 1500.0);
        assert_close(calc.apply_bonus_symbols(&multiply_then_add, 100.0), 1050.0);
    }

    #[test]
    fn bonus_cells_outside_winning_areas_still_apply() {
        let symbols = symbols();
        let combinations = combinations();
        let calc = RewardCalculator::new(&symbols, &combinations);
        let grid =
            Grid::from_rows([["A", "A", "A"], ["B", "MISS", "B"], ["B", "B", "10x"]]).unwrap();
        let matches: MatchSet = [("A", "x5")].into_iter().collect();
        assert_close(calc.calculate(&grid, 1.0, &matches), 100.0);
    }

    #[test]
    fn annotation_lists_bonus_symbols_except_miss_with_trailing_separator() {
        let symbols = symbols();
        let combinations = combinations();
        let calc = RewardCalculator::new(&symbols, &combinations);
        let grid =
            Grid::from_rows([["10x", "MISS", "A"], ["A", "+50", "A"], ["10x", "B", "B"]]).unwrap();
        let matches: MatchSet = [("A", "x5")].into_iter().collect();
        assert_eq!(
            calc.bonus_annotation(&grid, &matches).as_deref(),
            Some("10x,+50,10x,")
        );
    }

    #[test]
    fn annotation_is_empty_string_for_win_without_bonus() {
        let symbols = symbols();
        let combinations = combinations();
        let calc = RewardCalculator::new(&symbols, &combinations);
        let matches: MatchSet = [("A", "x5")].into_iter().collect();
        assert_eq!(
            calc.bonus_annotation(&plain_grid(), &matches).as_deref(),
            Some("")
        );
    }

    #[test]
    fn annotation_filters_by_name_not_impact() {
        let symbols: SymbolCatalog = [
            (
                "A".to_string(),
                Symbol::Standard {
                    reward_multiplier: 2.0,
                },
            ),
            ("BLANK".to_string(), Symbol::Bonus(BonusImpact::NoEffect)),
            (
                "MISS".to_string(),
                Symbol::Bonus(BonusImpact::MultiplyReward(3.0)),
            ),
        ]
        .into_iter()
        .collect();
        let combinations = combinations();
        let calc = RewardCalculator::new(&symbols, &combinations);
        let grid =
            Grid::from_rows([["A", "A", "A"], ["A", "BLANK", "A"], ["A", "MISS", "A"]]).unwrap();
        let matches: MatchSet = [("A", "x1_5")].into_iter().collect();
        // 10 * 2 * 1.5 = 30, BLANK leaves it alone, MISS triples it.
        assert_close(calc.calculate(&grid, 10.0, &matches), 90.0);
        assert_eq!(
            calc.bonus_annotation(&grid, &matches).as_deref(),
            Some("BLANK,")
        );
    }
}
