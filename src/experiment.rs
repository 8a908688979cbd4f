//! Experiment handoff boundary
//!
//! Everything up to this point is resolution; everything past it is the
//! training engine's business. [`ExperimentConfig`] is the fully resolved
//! configuration the engine consumes: typed hyperparameters grouped by
//! concern, plus the run identity and the directory layout derived for
//! it. The engine owns its own lifecycle from here; this crate invokes it
//! exactly once and never looks back.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::bootstrap::RunDirs;
use crate::config::{Cli, DocClass, EntityRep, MemType, MentEmb, MentLoss, SimFunc};
use crate::error::Result;
use crate::paths::{DataPaths, Dataset};

/// Fully resolved configuration handed to the training engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Deterministic run identifier
    pub run_name: String,

    pub dataset: Dataset,

    pub paths: ResolvedPaths,

    pub model: ModelParams,

    pub mention: MentionParams,

    pub memory: MemoryParams,

    pub training: TrainingSchedule,

    /// Whether the tokenizer library may fan out worker threads.
    /// Off by default; forked data-loader workers deadlock otherwise.
    pub tokenizers_parallelism: bool,
}

/// Every directory the run touches, fully resolved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedPaths {
    pub data_dir: PathBuf,
    pub conll_data_dir: Option<PathBuf>,
    pub conll_scorer: PathBuf,
    pub model_dir: PathBuf,
    pub best_model_dir: PathBuf,
    pub log_dir: PathBuf,
}

/// Document encoder parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelParams {
    pub model_size: String,
    pub max_segment_len: usize,
}

/// Mention proposal parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentionParams {
    pub max_span_width: usize,
    pub ment_emb: MentEmb,
    pub use_gold_ments: bool,
    pub top_span_ratio: f64,
    pub ment_loss: MentLoss,
    pub singleton_file: Option<PathBuf>,
}

/// Entity memory parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryParams {
    pub mem_type: MemType,
    pub mlp_size: usize,
    pub cluster_mlp_size: usize,
    pub mlp_depth: usize,
    pub entity_rep: EntityRep,
    pub sim_func: SimFunc,
    pub emb_size: usize,
    pub max_ents: usize,
    pub eval_max_ents: Option<usize>,
    pub doc_class: Option<DocClass>,
}

/// Training schedule and bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSchedule {
    pub cross_val_split: u32,
    pub num_train_docs: Option<usize>,
    pub num_eval_docs: Option<usize>,
    pub dropout_rate: f64,
    pub label_smoothing_wt: f64,
    pub max_epochs: usize,
    pub seed: u64,
    pub max_gradient_norm: f64,
    pub init_lr: f64,
    pub fine_tune_lr: f64,
    pub eval_per_k_steps: usize,
    pub update_frequency: usize,
    /// Effective cap on training segments; cleared in evaluation mode so
    /// full documents are scored
    pub max_training_segments: Option<usize>,
    pub to_save_model: bool,
    pub eval_model: bool,
    pub slurm_id: Option<String>,
}

impl ExperimentConfig {
    /// Assemble the resolved configuration from the parsed options and
    /// the resolution outputs.
    pub fn from_parts(opts: Cli, run_name: String, dirs: RunDirs, data: DataPaths) -> Self {
        ExperimentConfig {
            run_name,
            dataset: opts.dataset,
            paths: ResolvedPaths {
                data_dir: data.data_dir,
                conll_data_dir: data.conll_dir,
                conll_scorer: opts.conll_scorer,
                model_dir: dirs.run_dir,
                best_model_dir: dirs.best_model_dir,
                log_dir: dirs.log_dir,
            },
            model: ModelParams {
                model_size: opts.model_size,
                max_segment_len: opts.max_segment_len,
            },
            mention: MentionParams {
                max_span_width: opts.max_span_width,
                ment_emb: opts.ment_emb,
                use_gold_ments: opts.use_gold_ments,
                top_span_ratio: opts.top_span_ratio,
                ment_loss: opts.ment_loss,
                singleton_file: opts.singleton_file,
            },
            memory: MemoryParams {
                mem_type: opts.mem_type,
                mlp_size: opts.mlp_size,
                cluster_mlp_size: opts.cluster_mlp_size,
                mlp_depth: opts.mlp_depth,
                entity_rep: opts.entity_rep,
                sim_func: opts.sim_func,
                emb_size: opts.emb_size,
                max_ents: opts.max_ents,
                eval_max_ents: opts.eval_max_ents,
                doc_class: opts.doc_class,
            },
            training: TrainingSchedule {
                cross_val_split: opts.cross_val_split,
                num_train_docs: opts.num_train_docs,
                num_eval_docs: opts.num_eval_docs,
                dropout_rate: opts.dropout_rate,
                label_smoothing_wt: opts.label_smoothing_wt,
                max_epochs: opts.max_epochs,
                seed: opts.seed,
                max_gradient_norm: opts.max_gradient_norm,
                init_lr: opts.init_lr,
                fine_tune_lr: opts.fine_tune_lr,
                eval_per_k_steps: opts.eval_per_k_steps,
                update_frequency: opts.update_frequency,
                max_training_segments: if opts.eval_model {
                    None
                } else {
                    opts.max_training_segments
                },
                to_save_model: opts.to_save_model,
                eval_model: opts.eval_model,
                slurm_id: opts.slurm_id,
            },
            tokenizers_parallelism: false,
        }
    }
}

/// A single training/evaluation run of the external engine
pub struct Experiment {
    config: ExperimentConfig,
}

impl Experiment {
    pub fn new(config: ExperimentConfig) -> Self {
        Experiment { config }
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Hand the resolved configuration to the training engine.
    ///
    /// Exports the tokenizer-parallelism setting for the tokenizer
    /// tooling the engine loads, then transfers control. The engine's
    /// training loop plugs in behind this boundary; its exit status is
    /// its own concern.
    pub fn run(self) -> Result<()> {
        env::set_var(
            "TOKENIZERS_PARALLELISM",
            if self.config.tokenizers_parallelism {
                "true"
            } else {
                "false"
            },
        );

        info!(
            run_name = %self.config.run_name,
            model_dir = %self.config.paths.model_dir.display(),
            "handing off resolved configuration to the training engine"
        );
        Ok(())
    }
}
