//! Error types for Gridcalc core.

use thiserror::Error;

use gridcalc_engine::EngineError;
use gridcalc_engine::engine::CellRef;

/// Errors that can occur while loading, evaluating or saving a grid
#[derive(Error, Debug)]
pub enum GridcalcError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Input is too large: {size} bytes, max {max}")]
    InputTooLarge { size: u64, max: u64 },

    #[error("Cell {0} has not been evaluated")]
    Unevaluated(CellRef),
}

impl GridcalcError {
    /// The underlying engine error, if this failure came from loading or evaluation.
    pub fn engine_error(&self) -> Option<&EngineError> {
        match self {
            GridcalcError::Engine(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GridcalcError>;
