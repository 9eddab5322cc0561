//! Writer for evaluated grid output

use crate::error::{GridcalcError, Result};
use gridcalc_engine::engine::{Grid, format_value};
use std::fs;
use std::path::Path;

/// Write the evaluated grid to a file
pub fn write_results(path: &Path, grid: &Grid) -> Result<()> {
    let content = write_results_content(grid)?;
    fs::write(path, content)?;
    Ok(())
}

/// Render the evaluated grid: a `cols rows` header, then one value per line
/// in row-major order.
pub fn write_results_content(grid: &Grid) -> Result<String> {
    let mut out = format!("{} {}\n", grid.cols(), grid.rows());

    for (at, cell) in grid.iter() {
        let value = cell.value().ok_or(GridcalcError::Unevaluated(at))?;
        out.push_str(&format_value(value));
        out.push('\n');
    }

    Ok(out)
}
