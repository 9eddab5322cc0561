//! Circular dependency detection for formula cells.
//!
//! The evaluator resolves references depth-first. Each cell whose formula is
//! currently running sits on an [`EvaluationPath`]. Reaching a cell that is
//! already on the path means the references loop back on themselves (e.g. A1
//! references B1, B1 references C1, C1 references A1).

use std::collections::HashSet;

use super::CellRef;

/// The chain of cells currently being evaluated, outermost first.
///
/// Cells are pushed before their formula runs and popped once it succeeds.
/// A cell referenced from two different branches (a diamond) is never on the
/// path twice at the same time, so only real cycles are reported.
#[derive(Debug, Default, Clone)]
pub struct EvaluationPath {
    stack: Vec<CellRef>,
    visiting: HashSet<CellRef>,
}

impl EvaluationPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, cell: &CellRef) -> bool {
        self.visiting.contains(cell)
    }

    /// Enter a cell. Returns false, leaving the path untouched, if the cell
    /// is already being evaluated.
    pub fn push(&mut self, cell: CellRef) -> bool {
        if !self.visiting.insert(cell) {
            return false;
        }
        self.stack.push(cell);
        true
    }

    /// Leave the innermost cell.
    pub fn pop(&mut self) -> Option<CellRef> {
        let cell = self.stack.pop()?;
        self.visiting.remove(&cell);
        Some(cell)
    }

    /// The cells on the path in traversal order.
    pub fn cells(&self) -> &[CellRef] {
        &self.stack
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}
