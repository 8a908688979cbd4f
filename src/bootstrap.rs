//! Run directory bootstrap
//!
//! Materializes the directory tree a run depends on: the run directory
//! itself, its `best_models` subdirectory for the best checkpoints, and a
//! `logs` subdirectory for summaries. Creation is idempotent, so a rerun
//! after a failure picks up where the layout already is.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Subdirectory holding the best checkpoints of a run
pub const BEST_MODEL_DIR_NAME: &str = "best_models";

/// Subdirectory holding training logs and summaries
pub const LOG_DIR_NAME: &str = "logs";

/// Resolved run directory layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDirs {
    pub run_dir: PathBuf,
    pub best_model_dir: PathBuf,
    pub log_dir: PathBuf,
}

/// Compute and materialize the run directory layout.
///
/// Without an override the run directory is `<base>/<run_name>` and is
/// created along with its `best_models` subdirectory, intermediate
/// parents included. An explicit `model_dir` is assumed to hold a prior
/// run and is not created; its `best_models` subdirectory is used when
/// present, otherwise the run directory itself serves as the checkpoint
/// location (flat legacy layout). The `logs` subdirectory is created in
/// both modes.
pub fn bootstrap_run(
    base_model_dir: &Path,
    run_name: &str,
    model_dir: Option<&Path>,
) -> Result<RunDirs> {
    let (run_dir, best_model_dir) = match model_dir {
        None => {
            let run_dir = base_model_dir.join(run_name);
            let best_model_dir = run_dir.join(BEST_MODEL_DIR_NAME);
            create_dir(&run_dir)?;
            create_dir(&best_model_dir)?;
            (run_dir, best_model_dir)
        }
        Some(dir) => {
            let run_dir = dir.to_path_buf();
            let best_model_dir = run_dir.join(BEST_MODEL_DIR_NAME);
            let best_model_dir = if best_model_dir.is_dir() {
                best_model_dir
            } else {
                run_dir.clone()
            };
            (run_dir, best_model_dir)
        }
    };

    let log_dir = run_dir.join(LOG_DIR_NAME);
    create_dir(&log_dir)?;

    Ok(RunDirs {
        run_dir,
        best_model_dir,
        log_dir,
    })
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| Error::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_creates_layout() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dirs = bootstrap_run(temp_dir.path(), "longformer_ontonotes_", None).unwrap();

        assert_eq!(dirs.run_dir, temp_dir.path().join("longformer_ontonotes_"));
        assert_eq!(dirs.best_model_dir, dirs.run_dir.join("best_models"));
        assert_eq!(dirs.log_dir, dirs.run_dir.join("logs"));
        assert!(dirs.run_dir.is_dir());
        assert!(dirs.best_model_dir.is_dir());
        assert!(dirs.log_dir.is_dir());
    }

    #[test]
    fn test_bootstrap_is_idempotent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let first = bootstrap_run(temp_dir.path(), "run", None).unwrap();
        let second = bootstrap_run(temp_dir.path(), "run", None).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_bootstrap_creates_missing_parents() {
        let temp_dir = tempfile::tempdir().unwrap();
        let base = temp_dir.path().join("nested").join("models");
        let dirs = bootstrap_run(&base, "run", None).unwrap();
        assert!(dirs.best_model_dir.is_dir());
    }

    #[test]
    fn test_override_with_best_models_subdir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let prior = temp_dir.path().join("prior_run");
        fs::create_dir_all(prior.join("best_models")).unwrap();

        let dirs = bootstrap_run(temp_dir.path(), "ignored", Some(&prior)).unwrap();
        assert_eq!(dirs.run_dir, prior);
        assert_eq!(dirs.best_model_dir, prior.join("best_models"));
    }

    #[test]
    fn test_override_falls_back_to_flat_layout() {
        let temp_dir = tempfile::tempdir().unwrap();
        let prior = temp_dir.path().join("flat_run");
        fs::create_dir_all(&prior).unwrap();

        let dirs = bootstrap_run(temp_dir.path(), "ignored", Some(&prior)).unwrap();
        assert_eq!(dirs.best_model_dir, prior);
        // best_models was not conjured into existence
        assert!(!prior.join("best_models").exists());
    }

    #[test]
    fn test_override_still_creates_log_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let prior = temp_dir.path().join("prior_run");
        fs::create_dir_all(&prior).unwrap();

        let dirs = bootstrap_run(temp_dir.path(), "ignored", Some(&prior)).unwrap();
        assert!(dirs.log_dir.is_dir());
    }

    #[test]
    fn test_create_failure_reports_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let occupied = temp_dir.path().join("occupied");
        fs::write(&occupied, b"a plain file").unwrap();

        let err = bootstrap_run(&occupied, "run", None).unwrap_err();
        assert!(matches!(err, crate::Error::CreateDir { .. }));
        assert!(err.to_string().contains("occupied"));
    }
}
