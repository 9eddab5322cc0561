use super::Document;
use crate::error::Result;
use crate::storage::{parse_grid, parse_grid_reader, write_results};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

impl Document {
    /// Load a grid from an input file.
    pub fn open(path: &Path) -> Result<Self> {
        let grid = parse_grid(path)?;
        info!(path = %path.display(), cells = grid.len(), "opened grid");
        Ok(Document {
            file_path: Some(path.to_path_buf()),
            ..Document::new(grid)
        })
    }

    /// Load a grid from a reader such as stdin.
    pub fn read_from<R: Read>(reader: R) -> Result<Self> {
        Ok(Document::new(parse_grid_reader(reader)?))
    }

    /// Write the evaluated grid to `path`. Nothing is written if any cell
    /// is still unevaluated.
    pub fn save_results(&self, path: &Path) -> Result<PathBuf> {
        write_results(path, &self.grid)?;
        info!(path = %path.display(), "wrote results");
        Ok(path.to_path_buf())
    }
}
