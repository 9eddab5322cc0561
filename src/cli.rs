//! Command-line arguments.

use clap::{ArgAction, Parser};
use std::fmt;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gridcalc")]
#[command(
    version,
    about = "Evaluate a grid of postfix (RPN) cell formulas",
    long_about = "Evaluate a grid of postfix (RPN) cell formulas.\n\n\
        The input starts with a '<cols> <rows>' line, followed by one formula per cell in \
        row-major order. Formulas may use numbers, + - * / and references such as A1 \
        (column letter, 1-based row number)."
)]
pub struct Cli {
    /// Input file ('-' reads stdin)
    #[arg(default_value = "input.txt", conflicts_with = "cells")]
    pub input: PathBuf,

    /// Grid size as "<cols> <rows>" when formulas are given with --cell
    #[arg(long, value_name = "COLS ROWS", requires = "cells")]
    pub size: Option<String>,

    /// Cell formula in row-major order (repeatable)
    #[arg(
        long = "cell",
        value_name = "FORMULA",
        requires = "size",
        allow_hyphen_values = true
    )]
    pub cells: Vec<String>,

    /// Also write the results to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Don't print the results to stdout
    #[arg(short, long, requires = "output")]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Where the grid text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Stdin,
    /// Header line followed by the cell formulas.
    Lines(Vec<String>),
}

impl Cli {
    pub fn input_source(&self) -> InputSource {
        if let Some(size) = &self.size {
            let mut lines = Vec::with_capacity(self.cells.len() + 1);
            lines.push(size.clone());
            lines.extend(self.cells.iter().cloned());
            return InputSource::Lines(lines);
        }
        if self.input.as_os_str() == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(self.input.clone())
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::File(path) => write!(f, "'{}'", path.display()),
            InputSource::Stdin => f.write_str("stdin"),
            InputSource::Lines(_) => f.write_str("command-line cells"),
        }
    }
}
