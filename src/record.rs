//! Persisted config record
//!
//! The resolved significant options are written to a plain-text `config`
//! file inside the run directory, one `key: value` line per option in
//! sorted order. The record is a stable, diffable artifact meant for
//! human inspection; rewriting it truncates any prior content so a rerun
//! with different options never leaves stale lines behind.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::SignificantOpts;
use crate::error::{Error, Result};

/// File name of the config record inside the run directory
pub const CONFIG_FILE_NAME: &str = "config";

/// Write the config record for a run, overwriting any prior record.
///
/// Each line is also emitted to the informational log. Returns the path
/// of the written record.
pub fn write_config_record(run_dir: &Path, opts: &SignificantOpts) -> Result<PathBuf> {
    let path = run_dir.join(CONFIG_FILE_NAME);

    let mut contents = String::new();
    for (key, value) in opts.sorted_entries() {
        info!("{key}: {value}");
        contents.push_str(&format!("{key}: {value}\n"));
    }

    fs::write(&path, contents).map_err(|source| Error::WriteRecord {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
