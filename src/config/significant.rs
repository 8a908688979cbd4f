//! Significant-option resolution
//!
//! A run's identity is derived from the subset of hyperparameters that
//! deviate from their defaults, restricted to a fixed allow-list of
//! options that actually change model behavior or data split. The
//! allow-list is a single versioned constant; drift between it and the
//! option table is reported at startup rather than surfacing later as a
//! run-name mismatch.

use std::path::Path;

use super::cli::{Cli, OptValue};
use crate::error::{Error, Result};
use crate::paths::Dataset;

/// Options considered identity-relevant.
///
/// Encoder, mention model, memory, and training-schedule hyperparameters
/// whose values change what gets trained. Everything else (bookkeeping,
/// eval-time knobs, cluster plumbing) is excluded from the run name.
pub const SIGNIFICANT_OPTS: &[&str] = &[
    // Encoder params
    "model_size",
    "max_segment_len",
    // Mention model
    "ment_emb",
    "max_span_width",
    "top_span_ratio",
    // Memory params
    "mem_type",
    "entity_rep",
    "mlp_size",
    // Weights & sampling
    "dropout_rate",
    "seed",
    "init_lr",
    "max_epochs",
    "label_smoothing_wt",
    "ment_loss",
    "num_train_docs",
    "sim_func",
    "fine_tune_lr",
    "doc_class",
];

/// Filesystem existence check used by the resolver.
///
/// The `singleton` extra couples run identity to whether the singleton
/// mentions file is actually present on disk. Routing that check through
/// a trait keeps the resolver deterministic under test.
pub trait PathProbe {
    fn exists(&self, path: &Path) -> bool;
}

/// Probe backed by the real filesystem
pub struct FsProbe;

impl PathProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Options that deviate from their defaults, plus conditional extras.
///
/// Insertion order is preserved for display; identity derivation and the
/// config record both go through [`SignificantOpts::sorted_entries`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignificantOpts {
    entries: Vec<(&'static str, OptValue)>,
}

impl SignificantOpts {
    /// Insert an entry, replacing any previous value for the same name.
    pub fn insert(&mut self, name: &'static str, value: OptValue) {
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&OptValue> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &OptValue)> {
        self.entries.iter().map(|(name, value)| (*name, value))
    }

    /// Entries sorted by name (lexicographic, case-sensitive).
    pub fn sorted_entries(&self) -> Vec<(&'static str, &OptValue)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(name, value)| (*name, value))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolve the significant-option set for a configuration.
///
/// Each allow-listed option is included iff its value differs from the
/// default table's. Two conditional extras sit outside the difference
/// check:
///
/// - `singleton`: included iff a singleton mentions file was supplied
///   and `probe` reports it present; the value is the file name, not the
///   full path. This is the one impure input to an otherwise pure
///   derivation.
/// - `cross_val_split`: included for litbank unconditionally, default
///   split or not, since the split selects the training fold there.
///
/// Fails if an allow-listed name has no entry in either table.
pub fn resolve_significant(
    opts: &Cli,
    defaults: &Cli,
    allow_list: &[&'static str],
    probe: &dyn PathProbe,
) -> Result<SignificantOpts> {
    let table = opts.option_table();
    let default_table = defaults.option_table();

    let mut resolved = SignificantOpts::default();
    for &name in allow_list {
        let value = table.get(name).ok_or(Error::MissingDefault(name))?;
        let default = default_table.get(name).ok_or(Error::MissingDefault(name))?;
        if value != default {
            resolved.insert(name, value.clone());
        }
    }

    if let Some(singleton_file) = &opts.singleton_file {
        if probe.exists(singleton_file) {
            if let Some(file_name) = singleton_file.file_name() {
                resolved.insert(
                    "singleton",
                    OptValue::Str(file_name.to_string_lossy().into_owned()),
                );
            }
        }
    }

    if opts.dataset == Dataset::Litbank {
        resolved.insert(
            "cross_val_split",
            OptValue::Int(i64::from(opts.cross_val_split)),
        );
    }

    Ok(resolved)
}
