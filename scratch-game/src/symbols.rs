//! Symbol catalog resolved from configuration.
//!
//! Raw `type` / `impact` strings are resolved once here so evaluation code
//! only ever matches on [`Symbol`] and [`BonusImpact`].
use indexmap::IndexMap;
use serde::Serialize;

use crate::config::{ConfigError, SymbolDef};
use crate::constants::{
    IMPACT_EXTRA_BONUS, IMPACT_MULTIPLY_REWARD, SYMBOL_TYPE_BONUS, SYMBOL_TYPE_STANDARD,
};

/// Effect a bonus symbol has on an already computed reward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusImpact {
    /// Multiply the reward by the factor.
    MultiplyReward(f64),
    /// Add a flat amount to the reward.
    ExtraBonus(f64),
    /// Occupies a cell but leaves the reward untouched (`MISS`).
    NoEffect,
}

impl BonusImpact {
    #[must_use]
    pub fn apply(self, reward: f64) -> f64 {
        match self {
            Self::MultiplyReward(factor) => reward * factor,
            Self::ExtraBonus(extra) => reward + extra,
            Self::NoEffect => reward,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbol {
    Standard { reward_multiplier: f64 },
    Bonus(BonusImpact),
}

impl Symbol {
    /// Resolve a raw symbol entry.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown `type`, for a standard symbol without a
    /// multiplier, or for a bonus impact whose required value is absent.
    pub fn from_def(name: &str, def: &SymbolDef) -> Result<Self, ConfigError> {
        match def.kind.as_str() {
            SYMBOL_TYPE_STANDARD => {
                let reward_multiplier =
                    required_number(name, "reward_multiplier", def.reward_multiplier)?;
                Ok(Self::Standard { reward_multiplier })
            }
            SYMBOL_TYPE_BONUS => {
                let impact = match def.impact.as_deref() {
                    Some(IMPACT_MULTIPLY_REWARD) => BonusImpact::MultiplyReward(required_number(
                        name,
                        "reward_multiplier",
                        def.reward_multiplier,
                    )?),
                    Some(IMPACT_EXTRA_BONUS) => {
                        let extra = def.extra.ok_or_else(|| ConfigError::MissingSymbolField {
                            symbol: name.to_string(),
                            field: "extra",
                        })?;
                        if !extra.is_finite() {
                            return Err(ConfigError::InvalidNumber {
                                owner: format!("symbol {name}"),
                                field: "extra",
                                value: extra,
                            });
                        }
                        BonusImpact::ExtraBonus(extra)
                    }
                    _ => BonusImpact::NoEffect,
                };
                Ok(Self::Bonus(impact))
            }
            other => Err(ConfigError::UnknownSymbolType {
                symbol: name.to_string(),
                kind: other.to_string(),
            }),
        }
    }

    #[must_use]
    pub const fn is_standard(&self) -> bool {
        matches!(self, Self::Standard { .. })
    }

    #[must_use]
    pub const fn is_bonus(&self) -> bool {
        matches!(self, Self::Bonus(_))
    }

    #[must_use]
    pub const fn standard_multiplier(&self) -> Option<f64> {
        match self {
            Self::Standard { reward_multiplier } => Some(*reward_multiplier),
            Self::Bonus(_) => None,
        }
    }

    #[must_use]
    pub const fn bonus_impact(&self) -> Option<BonusImpact> {
        match self {
            Self::Bonus(impact) => Some(*impact),
            Self::Standard { .. } => None,
        }
    }
}

fn required_number(
    symbol: &str,
    field: &'static str,
    value: Option<f64>,
) -> Result<f64, ConfigError> {
    let value = value.ok_or_else(|| ConfigError::MissingSymbolField {
        symbol: symbol.to_string(),
        field,
    })?;
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidNumber {
            owner: format!("symbol {symbol}"),
            field,
            value,
        });
    }
    Ok(value)
}

/// All configured symbols, in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SymbolCatalog {
    symbols: IndexMap<String, Symbol>,
}

impl SymbolCatalog {
    /// Resolve every raw symbol entry.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] raised by [`Symbol::from_def`].
    pub fn from_defs(defs: &IndexMap<String, SymbolDef>) -> Result<Self, ConfigError> {
        defs.iter()
            .map(|(name, def)| Symbol::from_def(name, def).map(|symbol| (name.clone(), symbol)))
            .collect::<Result<IndexMap<_, _>, _>>()
            .map(|symbols| Self { symbols })
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Symbol> {
        self.symbols.get(name).copied()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    #[must_use]
    pub fn is_standard(&self, name: &str) -> bool {
        self.get(name).is_some_and(|symbol| symbol.is_standard())
    }

    #[must_use]
    pub fn standard_multiplier(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(|symbol| symbol.standard_multiplier())
    }

    #[must_use]
    pub fn bonus_impact(&self, name: &str) -> Option<BonusImpact> {
        self.get(name).and_then(|symbol| symbol.bonus_impact())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Symbol)> + '_ {
        self.symbols
            .iter()
            .map(|(name, symbol)| (name.as_str(), *symbol))
    }
}

impl FromIterator<(String, Symbol)> for SymbolCatalog {
    fn from_iter<I: IntoIterator<Item = (String, Symbol)>>(iter: I) -> Self {
        Self {
            symbols: iter.into_iter().collect(),
        }
    }
}
