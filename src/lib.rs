//! # Autocoref: Run Identity & Bootstrap
//!
//! Autocoref derives a deterministic, reproducible run identity for a
//! coreference training/evaluation job from its hyperparameters, then
//! bootstraps the directory layout and persisted configuration record
//! the job depends on before handing off to the training engine.
//!
//! ## Architecture
//!
//! - **config**: CLI surface and significant-option resolution
//! - **identity**: canonical run name encoding
//! - **paths**: dataset-specific data/reference directory rules
//! - **bootstrap**: idempotent run directory creation
//! - **record**: persisted, human-readable config record
//! - **setup**: the resolution pipeline
//! - **experiment**: handoff boundary to the training engine

pub mod bootstrap;
pub mod config;
pub mod experiment;
pub mod identity;
pub mod paths;
pub mod record;
pub mod setup;

pub mod error;

// Re-export commonly used types
pub use error::{Error, Result};
pub use experiment::{Experiment, ExperimentConfig};
pub use identity::encode_run_name;
pub use paths::{resolve_data_paths, DataPaths, Dataset};
pub use setup::setup_run;
