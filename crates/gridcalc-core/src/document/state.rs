use crate::error::Result;
use crate::storage::write_results_content;
use gridcalc_engine::engine::{EvalStats, Grid, evaluate_all};
use std::path::PathBuf;

/// UI-agnostic document state: a loaded grid plus where it came from.
#[derive(Debug, Clone)]
pub struct Document {
    /// The spreadsheet grid
    pub grid: Grid,
    /// File the grid was loaded from, if any
    pub file_path: Option<PathBuf>,
    /// Set once the whole grid has been evaluated
    pub stats: Option<EvalStats>,
}

impl Document {
    /// Wrap an already loaded grid.
    pub fn new(grid: Grid) -> Self {
        Document {
            grid,
            file_path: None,
            stats: None,
        }
    }

    /// Build a document from input lines (header first).
    pub fn from_lines<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Document::new(Grid::load(lines)?))
    }

    /// Evaluate every cell. A second call returns the stats of the first run.
    pub fn evaluate(&mut self) -> Result<EvalStats> {
        if let Some(stats) = self.stats {
            return Ok(stats);
        }
        let stats = evaluate_all(&mut self.grid)?;
        self.stats = Some(stats);
        Ok(stats)
    }

    pub fn is_evaluated(&self) -> bool {
        self.stats.is_some()
    }

    /// Render the evaluated grid as output text.
    pub fn render(&self) -> Result<String> {
        write_results_content(&self.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridcalcError;
    use gridcalc_engine::EngineError;

    #[test]
    fn test_evaluate_and_render() {
        let mut doc = Document::from_lines(["2 1", "B1 1 +", "41"]).unwrap();
        assert!(!doc.is_evaluated());
        let stats = doc.evaluate().unwrap();
        assert_eq!(stats.formulas_evaluated, 2);
        assert_eq!(doc.render().unwrap(), "2 1\n42.00000\n41.00000\n");
    }

    #[test]
    fn test_evaluate_twice_is_a_no_op() {
        let mut doc = Document::from_lines(["1 1", "2 2 *"]).unwrap();
        let first = doc.evaluate().unwrap();
        assert_eq!(doc.evaluate().unwrap(), first);
    }

    #[test]
    fn test_render_before_evaluate_fails() {
        let doc = Document::from_lines(["1 1", "2"]).unwrap();
        assert!(matches!(doc.render(), Err(GridcalcError::Unevaluated(_))));
    }

    #[test]
    fn test_failed_evaluation_leaves_document_unevaluated() {
        let mut doc = Document::from_lines(["1 1", "A1"]).unwrap();
        let err = doc.evaluate().unwrap_err();
        assert!(matches!(
            err.engine_error(),
            Some(EngineError::CyclicDependency { .. })
        ));
        assert!(!doc.is_evaluated());
    }
}
