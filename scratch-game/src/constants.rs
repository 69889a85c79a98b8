//! Shared constants for grid generation and result formatting.

/// Grid dimension used when the configuration omits `rows` or `columns`.
pub const DEFAULT_GRID_DIMENSION: i64 = 3;

/// Bonus overlay count is drawn from `0..BONUS_OVERLAY_LIMIT`.
pub const BONUS_OVERLAY_LIMIT: usize = 3;

/// Separator between row and column in a covered-area coordinate (`"1:2"`).
pub const COORD_SEPARATOR: char = ':';

/// Appended after every symbol in the applied bonus annotation, including the last.
pub const BONUS_ANNOTATION_SEPARATOR: &str = ",";

/// Bonus symbol name never listed in the applied bonus annotation.
pub const MISS_SYMBOL: &str = "MISS";

/// Symbol `type` value for standard symbols.
pub const SYMBOL_TYPE_STANDARD: &str = "standard";

/// Symbol `type` value for bonus symbols.
pub const SYMBOL_TYPE_BONUS: &str = "bonus";

pub const IMPACT_MULTIPLY_REWARD: &str = "multiply_reward";
pub const IMPACT_EXTRA_BONUS: &str = "extra_bonus";

pub const WHEN_SAME_SYMBOLS: &str = "same_symbols";
pub const WHEN_LINEAR_SYMBOLS: &str = "linear_symbols";

/// Label used for the bonus weight table in errors and logs.
pub const BONUS_TABLE_LABEL: &str = "bonus_symbols";
