//! Grid representation and random grid generation.
use rand::Rng;
use serde::Serialize;

use crate::combinations::Coord;
use crate::constants::BONUS_OVERLAY_LIMIT;
use crate::probability::ProbabilitySelector;

/// A fully populated `rows x columns` grid of symbol names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Grid {
    cells: Vec<Vec<String>>,
}

impl Grid {
    /// Build a grid from explicit rows.
    ///
    /// Returns `None` when there are no rows, no columns, or rows of differing length.
    #[must_use]
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Option<Self>
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cells: Vec<Vec<String>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        let width = cells.first().map(Vec::len)?;
        if width == 0 || cells.iter().any(|row| row.len() != width) {
            return None;
        }
        Some(Self { cells })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<&str> {
        self.cells
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
    }

    #[must_use]
    pub fn symbol_at(&self, coord: Coord) -> Option<&str> {
        self.get(coord.row, coord.column)
    }

    /// Every cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.cells.iter().flatten().map(String::as_str)
    }

    #[must_use]
    pub fn as_rows(&self) -> &[Vec<String>] {
        &self.cells
    }

    fn set(&mut self, row: usize, column: usize, symbol: &str) {
        if let Some(cell) = self.cells.get_mut(row).and_then(|cells| cells.get_mut(column)) {
            symbol.clone_into(cell);
        }
    }
}

/// One bonus symbol written over a generated cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BonusPlacement {
    pub row: usize,
    pub column: usize,
    pub symbol: String,
}

/// A generated grid together with the bonus overlays drawn for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedGrid {
    pub grid: Grid,
    pub bonus_placements: Vec<BonusPlacement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatrixGenerator {
    rows: usize,
    columns: usize,
    selector: ProbabilitySelector,
}

impl MatrixGenerator {
    #[must_use]
    pub const fn new(rows: usize, columns: usize, selector: ProbabilitySelector) -> Self {
        Self {
            rows,
            columns,
            selector,
        }
    }

    #[must_use]
    pub const fn selector(&self) -> &ProbabilitySelector {
        &self.selector
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Grid {
        self.generate_traced(rng).grid
    }

    /// Fill every cell with a standard draw, then overwrite 0-2 random cells
    /// with bonus draws. Placement is with replacement; the last draw wins.
    pub fn generate_traced<R: Rng + ?Sized>(&self, rng: &mut R) -> GeneratedGrid {
        let cells = (0..self.rows)
            .map(|row| {
                (0..self.columns)
                    .map(|column| self.selector.standard_symbol(row, column, rng).to_string())
                    .collect()
            })
            .collect();
        let mut grid = Grid { cells };

        let overlays = rng.gen_range(0..BONUS_OVERLAY_LIMIT);
        let mut bonus_placements = Vec::with_capacity(overlays);
        for _ in 0..overlays {
            let row = rng.gen_range(0..self.rows);
            let column = rng.gen_range(0..self.columns);
            let symbol = self.selector.bonus_symbol(rng);
            grid.set(row, column, symbol);
            bonus_placements.push(BonusPlacement {
                row,
                column,
                symbol: symbol.to_string(),
            });
        }
        log::debug!(
            "generated {}x{} grid with {} bonus overlay(s)",
            self.rows,
            self.columns,
            bonus_placements.len()
        );

        GeneratedGrid {
            grid,
            bonus_placements,
        }
    }
}
