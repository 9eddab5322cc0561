//! Postfix formula evaluation.
//!
//! Cells are evaluated lazily: a formula pulls the cells it references on
//! demand, so the order of evaluation follows the dependency graph rather than
//! the order cells are visited. Each cell's result is memoized in the grid the
//! first time it is computed, and an [`EvaluationPath`] tracks the active call
//! chain so cycles are reported instead of looping forever.
//!
//! Dependencies are followed with an explicit work stack of [`Frame`]s rather
//! than native recursion, so chain length is limited by heap, not thread stack.

use rust_decimal::Decimal;
use tracing::{debug, info, trace};

use super::cycle::EvaluationPath;
use super::token::{Token, parse_literal};
use super::{CellRef, Grid};
use crate::error::{EngineError, Result};

/// Counters collected while evaluating a grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvalStats {
    /// Formulas actually run. Each cell is run at most once.
    pub formulas_evaluated: usize,
    /// Lookups answered from an already computed cell.
    pub memo_hits: usize,
}

/// A formula part-way through evaluation.
struct Frame {
    cell: CellRef,
    formula: String,
    /// Byte offset of the next unread token.
    cursor: usize,
    operands: Vec<Decimal>,
}

/// What a frame needs next.
enum Step {
    /// The value of another cell.
    Descend(CellRef),
    /// Nothing: the formula is finished.
    Done(Decimal),
}

impl Frame {
    fn new(cell: CellRef, formula: String) -> Self {
        Frame {
            cell,
            formula,
            cursor: 0,
            operands: Vec::new(),
        }
    }

    /// Byte span of the next whitespace-separated token, advancing the cursor.
    fn next_span(&mut self) -> Option<(usize, usize)> {
        let rest = &self.formula[self.cursor..];
        let start = self.cursor + rest.find(|c: char| !c.is_whitespace())?;
        let token = &self.formula[start..];
        let end = start + token.find(char::is_whitespace).unwrap_or(token.len());
        self.cursor = end;
        Some((start, end))
    }

    /// Run tokens until a reference needs resolving or the formula ends.
    fn advance(&mut self, grid: &Grid) -> Result<Step> {
        let at = self.cell;
        while let Some((start, end)) = self.next_span() {
            match Token::classify(&self.formula[start..end]) {
                Token::Literal(text) => {
                    let value = parse_literal(text).ok_or_else(|| {
                        syntax_error(at, format!("numeric literal '{text}' is out of range"))
                    })?;
                    self.operands.push(value);
                }
                Token::Operator(op) => {
                    let (Some(rhs), Some(lhs)) = (self.operands.pop(), self.operands.pop())
                    else {
                        return Err(syntax_error(
                            at,
                            format!("operator '{op}' needs two operands"),
                        ));
                    };
                    let value = op
                        .apply(lhs, rhs)
                        .map_err(|fault| EngineError::Arithmetic { cell: at, fault })?;
                    self.operands.push(value);
                }
                Token::Reference(text) => {
                    return resolve_reference(grid, at, text).map(Step::Descend);
                }
                Token::Unrecognized(text) => {
                    return Err(syntax_error(at, format!("unrecognized token '{text}'")));
                }
            }
        }

        match self.operands.as_slice() {
            [value] => Ok(Step::Done(*value)),
            [] => Err(syntax_error(at, "formula produced no value".to_string())),
            rest => Err(syntax_error(
                at,
                format!("{} values left on the stack, expected 1", rest.len()),
            )),
        }
    }
}

/// Evaluates cells of a grid, memoizing results in place.
pub struct Evaluator<'g> {
    grid: &'g mut Grid,
    stats: EvalStats,
}

impl<'g> Evaluator<'g> {
    pub fn new(grid: &'g mut Grid) -> Self {
        Evaluator {
            grid,
            stats: EvalStats::default(),
        }
    }

    pub fn stats(&self) -> EvalStats {
        self.stats
    }

    /// Evaluate every cell in row-major order. Stops at the first error.
    pub fn evaluate_all(mut self) -> Result<EvalStats> {
        for at in self.grid.positions() {
            let mut path = EvaluationPath::new();
            self.evaluate(at, &mut path)?;
        }
        info!(
            cells = self.grid.len(),
            formulas = self.stats.formulas_evaluated,
            memo_hits = self.stats.memo_hits,
            "evaluated grid"
        );
        Ok(self.stats)
    }

    /// Evaluate one cell, pulling in any cells it references.
    ///
    /// On success `path` is left as it was on entry. On error the path keeps
    /// the chain that led to the failure.
    pub fn evaluate(&mut self, at: CellRef, path: &mut EvaluationPath) -> Result<Decimal> {
        self.grid
            .check_bounds(&at)
            .map_err(|fault| EngineError::Reference {
                cell: at,
                token: at.to_string(),
                fault,
            })?;
        if let Some(value) = self.memoized(at) {
            return Ok(value);
        }

        let mut stack = vec![self.enter(at, path)?];
        let mut result = Decimal::ZERO;

        while let Some(frame) = stack.last_mut() {
            match frame.advance(self.grid)? {
                Step::Descend(target) => match self.memoized(target) {
                    Some(value) => frame.operands.push(value),
                    None => {
                        let next = self.enter(target, path)?;
                        stack.push(next);
                    }
                },
                Step::Done(value) => {
                    let cell = frame.cell;
                    if let Some(resolved) = self.grid.get_mut(&cell) {
                        resolved.resolve(value);
                    }
                    self.stats.formulas_evaluated += 1;
                    path.pop();
                    stack.pop();
                    if let Some(parent) = stack.last_mut() {
                        parent.operands.push(value);
                    }
                    result = value;
                }
            }
        }

        Ok(result)
    }

    /// The value of an already computed cell.
    fn memoized(&mut self, at: CellRef) -> Option<Decimal> {
        let value = self.grid.get(&at)?.value()?;
        self.stats.memo_hits += 1;
        trace!(cell = %at, "memoized");
        Some(value)
    }

    /// Put a pending cell on the path and open a frame for its formula.
    fn enter(&self, at: CellRef, path: &mut EvaluationPath) -> Result<Frame> {
        if !path.push(at) {
            return Err(EngineError::CyclicDependency {
                cell: at,
                path: path.cells().to_vec(),
            });
        }
        let formula = self
            .grid
            .get(&at)
            .map(|cell| cell.formula().to_string())
            .unwrap_or_default();
        debug!(cell = %at, formula = %formula, depth = path.len(), "evaluating");
        Ok(Frame::new(at, formula))
    }
}

fn resolve_reference(grid: &Grid, at: CellRef, token: &str) -> Result<CellRef> {
    let reference_error = |fault| EngineError::Reference {
        cell: at,
        token: token.to_string(),
        fault,
    };
    let target: CellRef = token.parse().map_err(reference_error)?;
    grid.check_bounds(&target).map_err(reference_error)?;
    Ok(target)
}

fn syntax_error(cell: CellRef, message: String) -> EngineError {
    EngineError::FormulaSyntax { cell, message }
}

/// Evaluate every cell of the grid.
pub fn evaluate_all(grid: &mut Grid) -> Result<EvalStats> {
    Evaluator::new(grid).evaluate_all()
}
