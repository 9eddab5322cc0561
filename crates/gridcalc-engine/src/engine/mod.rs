//! Spreadsheet engine API.
//!
//! This module provides the core computation engine for the spreadsheet:
//!
//! - [`Cell`], [`CellState`], [`Grid`] - Data structures for cell storage
//! - [`CellRef`] - Cell reference parsing (A1 notation ↔ row/col indices)
//! - [`Token`], [`Operator`] - Postfix formula tokenization
//! - [`EvaluationPath`] - Circular dependency detection
//! - [`Evaluator`], [`evaluate_all`] - Memoized, on-demand formula evaluation
//! - [`format_value`] - Format values for output

mod cell;
mod cell_ref;
mod cycle;
mod eval;
mod format;
mod token;

pub use cell::{Cell, CellState, Grid, parse_dimensions};
pub use cell_ref::CellRef;
pub use cycle::EvaluationPath;
pub use eval::{EvalStats, Evaluator, evaluate_all};
pub use format::{FRACTION_DIGITS, format_value};
pub use token::{Operator, Token, is_numeric_literal, parse_literal, tokenize};

pub use crate::error::{ArithmeticFault, ReferenceFault};
pub use rust_decimal::Decimal;
