//! End-to-end tests for run resolution and bootstrap

use std::fs;

use autocoref::config::{parse_args, Cli, FsProbe};
use autocoref::{setup_run, Dataset};

fn parse_with_base(temp: &tempfile::TempDir, args: &[&str]) -> Cli {
    let base_model_dir = temp.path().join("models");
    let base_data_dir = temp.path().join("data");
    let owned: Vec<String> = ["autocoref"]
        .into_iter()
        .map(String::from)
        .chain([
            "--base_model_dir".to_string(),
            base_model_dir.display().to_string(),
            "--base_data_dir".to_string(),
            base_data_dir.display().to_string(),
        ])
        .chain(args.iter().map(|s| s.to_string()))
        .collect();
    parse_args(owned).unwrap()
}

#[test]
fn test_default_run_produces_contracted_layout() {
    let temp = tempfile::tempdir().unwrap();
    let config = setup_run(parse_with_base(&temp, &[]), &FsProbe).unwrap();

    assert_eq!(config.run_name, "longformer_ontonotes_");
    assert_eq!(config.dataset, Dataset::Ontonotes);

    let run_dir = temp.path().join("models").join("longformer_ontonotes_");
    assert_eq!(config.paths.model_dir, run_dir);
    assert!(run_dir.join("best_models").is_dir());
    assert!(run_dir.join("logs").is_dir());
    assert!(run_dir.join("config").is_file());

    // All-default run: the record carries no lines
    assert_eq!(fs::read_to_string(run_dir.join("config")).unwrap(), "");

    assert_eq!(
        config.paths.data_dir,
        temp.path().join("data").join("ontonotes").join("independent")
    );
    assert_eq!(
        config.paths.conll_data_dir,
        Some(temp.path().join("data").join("ontonotes").join("conll"))
    );
}

#[test]
fn test_argument_order_does_not_change_identity() {
    let temp_a = tempfile::tempdir().unwrap();
    let temp_b = tempfile::tempdir().unwrap();

    let forward = setup_run(
        parse_with_base(&temp_a, &["--seed", "7", "--dropout_rate", "0.5"]),
        &FsProbe,
    )
    .unwrap();
    let backward = setup_run(
        parse_with_base(&temp_b, &["--dropout_rate", "0.5", "--seed", "7"]),
        &FsProbe,
    )
    .unwrap();

    assert_eq!(forward.run_name, backward.run_name);
    assert_eq!(
        forward.run_name,
        "longformer_ontonotes_dropout_rate_0.5_seed_7"
    );
}

#[test]
fn test_rerun_with_same_options_is_idempotent() {
    let temp = tempfile::tempdir().unwrap();
    let first = setup_run(parse_with_base(&temp, &["--seed", "7"]), &FsProbe).unwrap();
    let second = setup_run(parse_with_base(&temp, &["--seed", "7"]), &FsProbe).unwrap();
    assert_eq!(first.paths.model_dir, second.paths.model_dir);
    assert_eq!(first.paths.best_model_dir, second.paths.best_model_dir);
}

#[test]
fn test_litbank_identity_includes_default_split() {
    let temp = tempfile::tempdir().unwrap();
    let config = setup_run(parse_with_base(&temp, &["--dataset", "litbank"]), &FsProbe).unwrap();

    assert_eq!(config.run_name, "longformer_litbank_cross_val_split_0");
    assert_eq!(
        config.paths.data_dir,
        temp.path()
            .join("data")
            .join("litbank")
            .join("independent")
            .join("0")
    );
    let record = fs::read_to_string(config.paths.model_dir.join("config")).unwrap();
    assert_eq!(record, "cross_val_split: 0\n");
}

#[test]
fn test_singleton_identity_tracks_file_existence() {
    let temp = tempfile::tempdir().unwrap();
    let singleton = temp.path().join("singletons.jsonl");
    fs::write(&singleton, b"{}\n").unwrap();

    let args = ["--singleton_file".to_string(), singleton.display().to_string()];
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    let config = setup_run(parse_with_base(&temp, &args), &FsProbe).unwrap();
    assert_eq!(
        config.run_name,
        "longformer_ontonotes_singleton_singletons.jsonl"
    );

    // Deleting the file before a second resolution removes the key
    fs::remove_file(&singleton).unwrap();
    let config = setup_run(parse_with_base(&temp, &args), &FsProbe).unwrap();
    assert_eq!(config.run_name, "longformer_ontonotes_");
}

#[test]
fn test_config_record_rewrite_drops_stale_lines() {
    let temp = tempfile::tempdir().unwrap();
    let first = setup_run(
        parse_with_base(&temp, &["--model_size", "base", "--seed", "11"]),
        &FsProbe,
    )
    .unwrap();
    let record = fs::read_to_string(first.paths.model_dir.join("config")).unwrap();
    assert_eq!(record, "model_size: base\nseed: 11\n");

    // Same run directory, different options: resume via override and
    // verify the record is replaced wholesale
    let run_dir = first.paths.model_dir.display().to_string();
    let second = setup_run(
        parse_with_base(&temp, &["--model_dir", &run_dir, "--seed", "13"]),
        &FsProbe,
    )
    .unwrap();
    let record = fs::read_to_string(second.paths.model_dir.join("config")).unwrap();
    assert_eq!(record, "seed: 13\n");
}

#[test]
fn test_model_dir_override_resumes_prior_layout() {
    let temp = tempfile::tempdir().unwrap();
    let prior = temp.path().join("prior_run");
    fs::create_dir_all(prior.join("best_models")).unwrap();

    let prior_arg = prior.display().to_string();
    let config = setup_run(
        parse_with_base(&temp, &["--model_dir", &prior_arg]),
        &FsProbe,
    )
    .unwrap();

    assert_eq!(config.paths.model_dir, prior);
    assert_eq!(config.paths.best_model_dir, prior.join("best_models"));
    assert!(prior.join("logs").is_dir());
}

#[test]
fn test_model_dir_override_flat_legacy_layout() {
    let temp = tempfile::tempdir().unwrap();
    let prior = temp.path().join("flat_run");
    fs::create_dir_all(&prior).unwrap();

    let prior_arg = prior.display().to_string();
    let config = setup_run(
        parse_with_base(&temp, &["--model_dir", &prior_arg]),
        &FsProbe,
    )
    .unwrap();

    assert_eq!(config.paths.best_model_dir, prior);
}

#[test]
fn test_resolved_config_serializes_for_downstream_capture() {
    let temp = tempfile::tempdir().unwrap();
    let config = setup_run(
        parse_with_base(&temp, &["--dataset", "litbank", "--mem_type", "learned"]),
        &FsProbe,
    )
    .unwrap();

    let json = serde_json::to_string_pretty(&config).unwrap();
    assert!(json.contains("\"run_name\""));
    assert!(json.contains("litbank"));
    assert!(json.contains("\"mem_type\": \"learned\""));
}
