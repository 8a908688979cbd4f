//! Run resolution pipeline
//!
//! Ties the pieces together in dependency order: significant options,
//! run name, directory bootstrap, data paths, config record. The result
//! is the [`ExperimentConfig`] the training engine consumes.

use tracing::info;

use crate::bootstrap::bootstrap_run;
use crate::config::{resolve_significant, Cli, PathProbe, SIGNIFICANT_OPTS};
use crate::error::Result;
use crate::experiment::ExperimentConfig;
use crate::identity::encode_run_name;
use crate::paths::resolve_data_paths;
use crate::record::write_config_record;

/// Resolve a parsed invocation into a bootstrapped, recorded run.
///
/// Idempotent apart from last-writer-wins on the config record: the
/// directory tree is created with create-if-missing semantics, so
/// re-invoking after a failure (or resuming via `--model_dir`) is safe.
pub fn setup_run(opts: Cli, probe: &dyn PathProbe) -> Result<ExperimentConfig> {
    let defaults = Cli::defaults();
    let significant = resolve_significant(&opts, &defaults, SIGNIFICANT_OPTS, probe)?;
    let run_name = encode_run_name(opts.dataset, &significant);

    let dirs = bootstrap_run(&opts.base_model_dir, &run_name, opts.model_dir.as_deref())?;
    info!("Model directory: {}", dirs.run_dir.display());

    let data = resolve_data_paths(
        opts.dataset,
        &opts.base_data_dir,
        opts.data_dir.as_deref(),
        opts.cross_val_split,
    );
    info!("Data directory: {}", data.data_dir.display());

    write_config_record(&dirs.run_dir, &significant)?;

    Ok(ExperimentConfig::from_parts(opts, run_name, dirs, data))
}
