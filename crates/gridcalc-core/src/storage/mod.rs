//! Text storage for grids: formula input and evaluated output.

mod parser;
mod writer;

pub use parser::{MAX_INPUT_BYTES, parse_grid, parse_grid_content, parse_grid_reader};
pub use writer::{write_results, write_results_content};
