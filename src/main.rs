//! Gridcalc - evaluate a grid of postfix cell formulas

mod cli;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use gridcalc_core::Document;
use tracing_subscriber::EnvFilter;

use cli::{Cli, InputSource};

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load(source: &InputSource) -> Result<Document> {
    let doc = match source {
        InputSource::File(path) => Document::open(path)
            .with_context(|| format!("Failed to load '{}'", path.display()))?,
        InputSource::Stdin => {
            Document::read_from(io::stdin().lock()).context("Failed to load grid from stdin")?
        }
        InputSource::Lines(lines) => {
            Document::from_lines(lines).context("Failed to load grid from arguments")?
        }
    };
    Ok(doc)
}

fn run(cli: &Cli) -> Result<()> {
    let source = cli.input_source();
    let mut doc = load(&source)?;

    let stats = doc
        .evaluate()
        .with_context(|| format!("Failed to evaluate {}", source))?;
    tracing::info!(
        formulas = stats.formulas_evaluated,
        memo_hits = stats.memo_hits,
        "evaluation finished"
    );

    let rendered = doc.render()?;

    if let Some(output_path) = &cli.output {
        doc.save_results(output_path)
            .with_context(|| format!("Failed to write '{}'", output_path.display()))?;
    }

    if !cli.quiet {
        print_results(&rendered)?;
    }

    Ok(())
}

/// Write the rendered grid to stdout. A reader that goes away early (`| head`)
/// is not an error.
fn print_results(rendered: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match stdout
        .write_all(rendered.as_bytes())
        .and_then(|()| stdout.flush())
    {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            tracing::debug!("stdout closed before all results were written");
            Ok(())
        }
        result => result.context("Failed to write results to stdout"),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
