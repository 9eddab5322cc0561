//! Cell data structures for the spreadsheet grid.
//!
//! This module provides the core data types for representing cells:
//! - [`CellState`] - Whether a cell's formula has been computed yet
//! - [`Cell`] - A postfix formula plus its memoized result
//! - [`Grid`] - Fixed-size, row-major storage for cells
//!
//! The grid is loaded from text lines. The header holds two positive integers,
//! `cols rows`: the width first, then the height. It is followed by one formula
//! per cell in row-major order. Each row holds `cols` cells and blank lines are
//! skipped.

use rust_decimal::Decimal;
use tracing::info;

use super::cell_ref::CellRef;
use crate::error::{EngineError, ReferenceFault, Result};

/// Evaluation state of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    Pending,
    Computed(Decimal),
}

/// A cell in the spreadsheet grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    formula: String,
    state: CellState,
}

impl Cell {
    pub fn new(formula: &str) -> Cell {
        Cell {
            formula: formula.trim().to_string(),
            state: CellState::Pending,
        }
    }

    pub fn formula(&self) -> &str {
        &self.formula
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    /// The computed value, or None while the cell is still pending.
    pub fn value(&self) -> Option<Decimal> {
        match self.state {
            CellState::Computed(value) => Some(value),
            CellState::Pending => None,
        }
    }

    pub fn is_computed(&self) -> bool {
        matches!(self.state, CellState::Computed(_))
    }

    /// Record the result. A cell is resolved at most once per run.
    pub(crate) fn resolve(&mut self, value: Decimal) {
        debug_assert!(!self.is_computed(), "cell resolved twice");
        self.state = CellState::Computed(value);
    }
}

/// Fixed-size grid of cells, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Build a grid from formulas given in row-major order.
    pub fn new<I, S>(rows: usize, cols: usize, formulas: I) -> Result<Grid>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if rows == 0 || cols == 0 {
            return Err(EngineError::GridDimension(format!(
                "both dimensions must be positive, got {cols} columns and {rows} rows"
            )));
        }
        let expected = rows.checked_mul(cols).ok_or_else(|| {
            EngineError::GridDimension(format!("{cols} x {rows} cells is too large"))
        })?;

        let cells: Vec<Cell> = formulas
            .into_iter()
            .map(|formula| Cell::new(formula.as_ref()))
            .collect();
        if cells.len() != expected {
            return Err(EngineError::CellCountMismatch {
                expected,
                found: cells.len(),
            });
        }

        Ok(Grid { rows, cols, cells })
    }

    /// Load a grid from text lines: a `cols rows` header, then one formula per
    /// non-blank line.
    pub fn load<I, S>(lines: I) -> Result<Grid>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lines = lines.into_iter();
        let header = lines
            .next()
            .ok_or_else(|| EngineError::GridDimension("missing header line".to_string()))?;
        let (rows, cols) = parse_dimensions(header.as_ref())?;

        let formulas: Vec<String> = lines
            .filter(|line| !line.as_ref().trim().is_empty())
            .map(|line| line.as_ref().to_string())
            .collect();

        let grid = Grid::new(rows, cols, formulas)?;
        info!(rows, cols, "loaded grid");
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, at: &CellRef) -> bool {
        at.row < self.rows && at.col < self.cols
    }

    /// Check that a reference lies inside the grid.
    pub fn check_bounds(&self, at: &CellRef) -> std::result::Result<(), ReferenceFault> {
        if self.contains(at) {
            Ok(())
        } else {
            Err(ReferenceFault::OutOfBounds {
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    pub fn get(&self, at: &CellRef) -> Option<&Cell> {
        self.index_of(at).map(|i| &self.cells[i])
    }

    pub(crate) fn get_mut(&mut self, at: &CellRef) -> Option<&mut Cell> {
        self.index_of(at).map(|i| &mut self.cells[i])
    }

    /// Every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = CellRef> + use<> {
        let cols = self.cols;
        (0..self.cells.len()).map(move |i| CellRef::new(i / cols, i % cols))
    }

    /// Every cell with its position, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellRef, &Cell)> {
        self.positions().zip(self.cells.iter())
    }

    fn index_of(&self, at: &CellRef) -> Option<usize> {
        self.contains(at).then(|| at.row * self.cols + at.col)
    }
}

/// Parse the `cols rows` header into `(rows, cols)`.
pub fn parse_dimensions(line: &str) -> Result<(usize, usize)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [cols, rows] = tokens.as_slice() else {
        return Err(EngineError::GridDimension(format!(
            "expected '<cols> <rows>', got {:?}",
            line.trim()
        )));
    };

    let parse = |token: &str| -> Result<usize> {
        match token.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(EngineError::GridDimension(format!(
                "'{token}' is not a positive integer"
            ))),
        }
    };

    Ok((parse(*rows)?, parse(*cols)?))
}
