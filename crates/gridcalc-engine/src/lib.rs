//! gridcalc_engine - Postfix formula engine for fixed-size grids.

pub mod engine;
pub mod error;

pub use error::{EngineError, Result};

#[cfg(test)]
mod tests {
    use crate::engine::*;
    use crate::error::EngineError;
    use pretty_assertions::assert_eq;

    fn evaluated(lines: &[&str]) -> Vec<String> {
        let mut grid = Grid::load(lines).unwrap();
        evaluate_all(&mut grid).unwrap();
        grid.iter()
            .map(|(_, cell)| format_value(cell.value().unwrap()))
            .collect()
    }

    #[test]
    fn test_literal_grid_round_trip() {
        assert_eq!(
            evaluated(&["2 2", "1", "2.5", "-3", "0"]),
            vec!["1.00000", "2.50000", "-3.00000", "0.00000"]
        );
    }

    #[test]
    fn test_mixed_grid() {
        let lines = [
            "3 2",
            "A2",
            "4 5 *",
            "A1",
            "B1 B2 *",
            "3",
            "39 B1 B2 * /",
        ];
        assert_eq!(
            evaluated(&lines),
            vec!["60.00000", "20.00000", "60.00000", "60.00000", "3.00000", "0.65000"]
        );
    }

    #[test]
    fn test_load_then_cycle() {
        let mut grid = Grid::load(["2 1", "B1", "A1"]).unwrap();
        let err = evaluate_all(&mut grid).unwrap_err();
        assert!(matches!(err, EngineError::CyclicDependency { .. }));
        assert_eq!(err.to_string(), "Cyclic dependency detected: A1 -> B1 -> A1");
    }
}
