//! Parser for grid input text.
//!
//! The first line holds `cols rows`, the remaining non-blank lines hold one
//! postfix formula per cell in row-major order.

use crate::error::{GridcalcError, Result};
use gridcalc_engine::engine::Grid;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Largest input accepted from a file or stream.
pub const MAX_INPUT_BYTES: u64 = 64 * 1_048_576; // 64 MiB

/// Parse an input file and return a Grid
pub fn parse_grid(path: &Path) -> Result<Grid> {
    let meta = fs::metadata(path)?;
    if meta.len() > MAX_INPUT_BYTES {
        return Err(GridcalcError::InputTooLarge {
            size: meta.len(),
            max: MAX_INPUT_BYTES,
        });
    }
    debug!(path = %path.display(), bytes = meta.len(), "reading grid");
    let content = fs::read_to_string(path)?;
    parse_grid_content(&content)
}

/// Parse grid input from any reader (e.g. stdin).
pub fn parse_grid_reader<R: Read>(reader: R) -> Result<Grid> {
    let mut content = String::new();
    let read = reader.take(MAX_INPUT_BYTES + 1).read_to_string(&mut content)?;
    if read as u64 > MAX_INPUT_BYTES {
        return Err(GridcalcError::InputTooLarge {
            size: read as u64,
            max: MAX_INPUT_BYTES,
        });
    }
    parse_grid_content(&content)
}

/// Parse grid input from a string
pub fn parse_grid_content(content: &str) -> Result<Grid> {
    Ok(Grid::load(content.lines())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridcalc_engine::EngineError;
    use gridcalc_engine::engine::CellRef;
    use std::io::Write;

    #[test]
    fn test_parse_content() {
        let content = "2 2\nA2\n1 2 +\n\n4\nB1 A2 *\n";
        let grid = parse_grid_content(content).unwrap();
        assert_eq!((grid.rows(), grid.cols()), (2, 2));
        assert_eq!(grid.get(&CellRef::new(1, 1)).unwrap().formula(), "B1 A2 *");
    }

    #[test]
    fn test_parse_crlf() {
        let grid = parse_grid_content("1 2\r\n3\r\n\r\n4\r\n").unwrap();
        assert_eq!(grid.get(&CellRef::new(1, 0)).unwrap().formula(), "4");
    }

    #[test]
    fn test_empty_input_is_dimension_error() {
        assert!(matches!(
            parse_grid_content(""),
            Err(GridcalcError::Engine(EngineError::GridDimension(_)))
        ));
    }

    #[test]
    fn test_count_mismatch_is_reported() {
        assert!(matches!(
            parse_grid_content("2 2\n1\n2\n3\n"),
            Err(GridcalcError::Engine(EngineError::CellCountMismatch {
                expected: 4,
                found: 3
            }))
        ));
    }

    #[test]
    fn test_parse_reader() {
        let grid = parse_grid_reader("1 1\n42\n".as_bytes()).unwrap();
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "3 1\n1\n2\n3").unwrap();
        let grid = parse_grid(file.path()).unwrap();
        assert_eq!((grid.rows(), grid.cols()), (1, 3));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = parse_grid(&dir.path().join("missing.txt"));
        assert!(matches!(result, Err(GridcalcError::Io(_))));
    }
}
