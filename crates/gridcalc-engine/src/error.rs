//! Error types for the Gridcalc engine.

use thiserror::Error;

use crate::engine::CellRef;

/// Errors raised while loading or evaluating a grid.
///
/// Every variant is fatal to the run: the evaluator never recovers per cell,
/// it hands the first failure back to the caller unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid grid dimensions: {0}")]
    GridDimension(String),

    #[error("The input doesn't match the number of cells: expected {expected}, found {found}")]
    CellCountMismatch { expected: usize, found: usize },

    #[error("Invalid reference '{token}' in {cell}: {fault}")]
    Reference {
        cell: CellRef,
        token: String,
        fault: ReferenceFault,
    },

    #[error("Malformed formula in {cell}: {message}")]
    FormulaSyntax { cell: CellRef, message: String },

    #[error("Arithmetic error in {cell}: {fault}")]
    Arithmetic { cell: CellRef, fault: ArithmeticFault },

    #[error("Cyclic dependency detected: {}", format_cycle(.path, .cell))]
    CyclicDependency { cell: CellRef, path: Vec<CellRef> },
}

/// Why a reference token could not be resolved to a cell.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceFault {
    #[error("expected a single letter A-Z followed by a positive row number")]
    Malformed,

    #[error("outside the {rows}x{cols} grid")]
    OutOfBounds { rows: usize, cols: usize },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticFault {
    #[error("division by zero")]
    DivisionByZero,

    #[error("result exceeds the decimal range")]
    Overflow,
}

/// Render a cycle as `A1 -> B1 -> A1`.
fn format_cycle(path: &[CellRef], closing: &CellRef) -> String {
    path.iter()
        .chain(std::iter::once(closing))
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message_lists_path_and_closing_cell() {
        let err = EngineError::CyclicDependency {
            cell: CellRef::new(0, 0),
            path: vec![CellRef::new(0, 0), CellRef::new(1, 0)],
        };
        assert_eq!(err.to_string(), "Cyclic dependency detected: A1 -> A2 -> A1");
    }

    #[test]
    fn test_reference_message_names_token_and_cell() {
        let err = EngineError::Reference {
            cell: CellRef::new(0, 1),
            token: "C9".to_string(),
            fault: ReferenceFault::OutOfBounds { rows: 2, cols: 2 },
        };
        assert_eq!(err.to_string(), "Invalid reference 'C9' in B1: outside the 2x2 grid");
    }
}
