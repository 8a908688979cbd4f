//! Autocoref CLI
//!
//! Single-command entry point: resolve the run identity, bootstrap the
//! run directory, persist the config record, and hand off to the
//! training engine.
//!
//! # Usage
//!
//! ```bash
//! # Train on ontonotes with default hyperparameters
//! autocoref
//!
//! # Litbank cross-validation fold 3
//! autocoref --dataset litbank --cross_val_split 3
//!
//! # Resume from an existing run directory
//! autocoref --model_dir ../models/previous_run --eval
//! ```

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use autocoref::config::{Cli, FsProbe};
use autocoref::experiment::Experiment;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(opts: Cli) -> autocoref::Result<()> {
    let config = autocoref::setup_run(opts, &FsProbe)?;
    Experiment::new(config).run()
}
