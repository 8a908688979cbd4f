//! Run name encoding
//!
//! The run name is the canonical identifier of a configuration: encoder
//! tag, dataset, then every significant option rendered as `key_value`
//! and joined with underscores. Entries are sorted by key first, so two
//! configurations with the same significant options always encode to the
//! same name regardless of the order the options were collected in.

use crate::config::SignificantOpts;
use crate::paths::Dataset;

/// Document encoder tag prefixed to every run name
pub const ENCODER_TAG: &str = "longformer";

/// Encode the deterministic run name for a configuration.
///
/// Pure; an empty option set yields the bare `<tag>_<dataset>_` name.
pub fn encode_run_name(dataset: Dataset, opts: &SignificantOpts) -> String {
    let parts: Vec<String> = opts
        .sorted_entries()
        .into_iter()
        .map(|(key, value)| format!("{key}_{value}"))
        .collect();
    format!("{}_{}_{}", ENCODER_TAG, dataset, parts.join("_"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OptValue;

    #[test]
    fn test_empty_opts_yield_bare_name() {
        let opts = SignificantOpts::default();
        assert_eq!(encode_run_name(Dataset::Ontonotes, &opts), "longformer_ontonotes_");
    }

    #[test]
    fn test_entries_sorted_by_key() {
        let mut opts = SignificantOpts::default();
        opts.insert("seed", OptValue::Int(7));
        opts.insert("dropout_rate", OptValue::Float(0.5));
        assert_eq!(
            encode_run_name(Dataset::Litbank, &opts),
            "longformer_litbank_dropout_rate_0.5_seed_7"
        );
    }

    #[test]
    fn test_insertion_order_irrelevant() {
        let mut forward = SignificantOpts::default();
        forward.insert("mem_type", OptValue::Str("learned".to_string()));
        forward.insert("max_epochs", OptValue::Int(40));

        let mut backward = SignificantOpts::default();
        backward.insert("max_epochs", OptValue::Int(40));
        backward.insert("mem_type", OptValue::Str("learned".to_string()));

        assert_eq!(
            encode_run_name(Dataset::Preco, &forward),
            encode_run_name(Dataset::Preco, &backward)
        );
    }

    #[test]
    fn test_value_rendering() {
        let mut opts = SignificantOpts::default();
        opts.insert("init_lr", OptValue::Float(3e-4));
        assert_eq!(
            encode_run_name(Dataset::Ontonotes, &opts),
            "longformer_ontonotes_init_lr_0.0003"
        );

        let mut opts = SignificantOpts::default();
        opts.insert("singleton", OptValue::Str("singletons.jsonl".to_string()));
        assert_eq!(
            encode_run_name(Dataset::Wikicoref, &opts),
            "longformer_wikicoref_singleton_singletons.jsonl"
        );
    }
}
