//! CLI argument parsing
//!
//! The full flag surface of a training/evaluation invocation. Flags keep
//! their historical underscore spelling (`--max_segment_len`) so existing
//! launch scripts keep working. Only a small subset of these options feeds
//! run-identity derivation; the rest passes through to the experiment
//! untouched.
//!
//! # Usage
//!
//! ```bash
//! autocoref --dataset litbank --cross_val_split 3
//! autocoref --dataset ontonotes --mem_type learned --max_ents 40
//! autocoref --model_dir ../models/previous_run --eval
//! ```

use clap::{ArgAction, Parser};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::paths::Dataset;

/// Autocoref: run identity and filesystem bootstrap for coreference training
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "autocoref")]
#[command(version)]
#[command(about = "Derive a reproducible run identity and bootstrap its directory layout")]
pub struct Cli {
    /// Root directory of data
    #[arg(long = "base_data_dir", default_value = "../data/")]
    pub base_data_dir: PathBuf,

    /// Data directory; overrides the layout derived from the base root
    #[arg(long = "data_dir")]
    pub data_dir: Option<PathBuf>,

    /// Singleton mentions separately extracted for training
    #[arg(long = "singleton_file")]
    pub singleton_file: Option<PathBuf>,

    /// Root folder storing model runs
    #[arg(long = "base_model_dir", default_value = "../models")]
    pub base_model_dir: PathBuf,

    /// Model directory; overrides the derived run directory
    #[arg(long = "model_dir")]
    pub model_dir: Option<PathBuf>,

    /// Dataset to train/evaluate on
    #[arg(long, default_value = "ontonotes")]
    pub dataset: Dataset,

    /// Cross validation split to be used
    #[arg(long = "cross_val_split", default_value_t = 0)]
    pub cross_val_split: u32,

    /// Path to the reference CoNLL scorer script
    #[arg(
        long = "conll_scorer",
        default_value = "../resources/lrec2020-coref/reference-coreference-scorers/scorer.pl"
    )]
    pub conll_scorer: PathBuf,

    /// Document encoder size
    #[arg(long = "model_size", default_value = "large")]
    pub model_size: String,

    /// Max segment length of windowed inputs
    #[arg(long = "max_segment_len", default_value_t = 2048)]
    pub max_segment_len: usize,

    /// Max span width
    #[arg(long = "max_span_width", default_value_t = 20)]
    pub max_span_width: usize,

    /// Mention embedding scheme
    #[arg(long = "ment_emb", default_value = "attn")]
    pub ment_emb: MentEmb,

    /// Use gold mentions instead of predicted ones
    #[arg(long = "use_gold_ments")]
    pub use_gold_ments: bool,

    /// Ratio of top spans proposed as mentions
    #[arg(long = "top_span_ratio", default_value_t = 0.4)]
    pub top_span_ratio: f64,

    /// Memory type
    #[arg(long = "mem_type", default_value = "unbounded")]
    pub mem_type: MemType,

    /// MLP size used in the model
    #[arg(long = "mlp_size", default_value_t = 3000)]
    pub mlp_size: usize,

    /// MLP size used in the cluster scorer
    #[arg(long = "cluster_mlp_size", default_value_t = 3000)]
    pub cluster_mlp_size: usize,

    /// Number of hidden layers in other MLPs
    #[arg(long = "mlp_depth", default_value_t = 1)]
    pub mlp_depth: usize,

    /// Entity representation
    #[arg(long = "entity_rep", default_value = "wt_avg")]
    pub entity_rep: EntityRep,

    /// Similarity function
    #[arg(long = "sim_func", default_value = "hadamard")]
    pub sim_func: SimFunc,

    /// Embedding size of features
    #[arg(long = "emb_size", default_value_t = 20)]
    pub emb_size: usize,

    /// Number of maximum entities in memory (bounded memory types only)
    #[arg(long = "max_ents", default_value_t = 20)]
    pub max_ents: usize,

    /// Number of maximum entities in memory during inference
    #[arg(long = "eval_max_ents")]
    pub eval_max_ents: Option<usize>,

    /// What information of document class to use
    #[arg(long = "doc_class")]
    pub doc_class: Option<DocClass>,

    /// Number of training docs
    #[arg(long = "num_train_docs")]
    pub num_train_docs: Option<usize>,

    /// Number of evaluation docs
    #[arg(long = "num_eval_docs")]
    pub num_eval_docs: Option<usize>,

    /// Dropout rate
    #[arg(long = "dropout_rate", default_value_t = 0.3)]
    pub dropout_rate: f64,

    /// Label smoothing weight
    #[arg(long = "label_smoothing_wt", default_value_t = 0.1)]
    pub label_smoothing_wt: f64,

    /// Mention loss computed over topk or all mentions
    #[arg(long = "ment_loss", default_value = "topk")]
    pub ment_loss: MentLoss,

    /// Maximum number of epochs
    #[arg(long = "max_epochs", default_value_t = 25)]
    pub max_epochs: usize,

    /// Random seed to get different runs
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Maximum gradient norm
    #[arg(long = "max_gradient_norm", default_value_t = 1.0)]
    pub max_gradient_norm: f64,

    /// Initial learning rate
    #[arg(long = "init_lr", default_value_t = 3e-4)]
    pub init_lr: f64,

    /// Fine-tuning learning rate
    #[arg(long = "fine_tune_lr", default_value_t = 1e-5)]
    pub fine_tune_lr: f64,

    /// Evaluate on dev set per k steps
    #[arg(long = "eval_per_k_steps", default_value_t = 0)]
    pub eval_per_k_steps: usize,

    /// Update frequency
    #[arg(long = "update_frequency", default_value_t = 500)]
    pub update_frequency: usize,

    /// Cap on training segments per document
    #[arg(long = "max_training_segments")]
    pub max_training_segments: Option<usize>,

    /// Skip saving the model during training
    #[arg(long = "not_save_model", action = ArgAction::SetFalse)]
    pub to_save_model: bool,

    /// Evaluate model
    #[arg(long = "eval")]
    pub eval_model: bool,

    /// Slurm ID
    #[arg(long = "slurm_id")]
    pub slurm_id: Option<String>,
}

impl Cli {
    /// The default table: every option at its parser default.
    ///
    /// Obtained by parsing an empty argument list, so the defaults used
    /// for significance comparison cannot drift from the defaults the
    /// parser actually applies.
    pub fn defaults() -> Self {
        Self::parse_from(["autocoref"])
    }

    /// Enumerate every scalar option as a `(name, value)` pair.
    ///
    /// This table is the lookup surface for the significant-option
    /// resolver; an allow-listed name missing here is a configuration
    /// error, not a silent omission.
    pub fn option_table(&self) -> OptionTable {
        OptionTable(vec![
            ("dataset", OptValue::Str(self.dataset.to_string())),
            ("cross_val_split", i64::from(self.cross_val_split).into()),
            ("model_size", OptValue::Str(self.model_size.clone())),
            ("max_segment_len", self.max_segment_len.into()),
            ("max_span_width", self.max_span_width.into()),
            ("ment_emb", OptValue::Str(self.ment_emb.to_string())),
            ("use_gold_ments", self.use_gold_ments.into()),
            ("top_span_ratio", self.top_span_ratio.into()),
            ("mem_type", OptValue::Str(self.mem_type.to_string())),
            ("mlp_size", self.mlp_size.into()),
            ("cluster_mlp_size", self.cluster_mlp_size.into()),
            ("mlp_depth", self.mlp_depth.into()),
            ("entity_rep", OptValue::Str(self.entity_rep.to_string())),
            ("sim_func", OptValue::Str(self.sim_func.to_string())),
            ("emb_size", self.emb_size.into()),
            ("max_ents", self.max_ents.into()),
            ("eval_max_ents", self.eval_max_ents.into()),
            ("doc_class", self.doc_class.map(|d| d.to_string()).into()),
            ("num_train_docs", self.num_train_docs.into()),
            ("num_eval_docs", self.num_eval_docs.into()),
            ("dropout_rate", self.dropout_rate.into()),
            ("label_smoothing_wt", self.label_smoothing_wt.into()),
            ("ment_loss", OptValue::Str(self.ment_loss.to_string())),
            ("max_epochs", self.max_epochs.into()),
            ("seed", (self.seed as i64).into()),
            ("max_gradient_norm", self.max_gradient_norm.into()),
            ("init_lr", self.init_lr.into()),
            ("fine_tune_lr", self.fine_tune_lr.into()),
            ("eval_per_k_steps", self.eval_per_k_steps.into()),
            ("update_frequency", self.update_frequency.into()),
            ("max_training_segments", self.max_training_segments.into()),
            ("to_save_model", self.to_save_model.into()),
            ("eval_model", self.eval_model.into()),
            ("slurm_id", self.slurm_id.clone().into()),
        ])
    }
}

/// A scalar option value
///
/// Comparison is value equality within the same variant; there is no
/// cross-type coercion, so `Int(1)` never equals `Str("1")`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OptValue {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    /// An optional flag the user left unset
    Unset,
}

impl fmt::Display for OptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptValue::Int(v) => write!(f, "{v}"),
            OptValue::Float(v) => write!(f, "{v}"),
            OptValue::Str(v) => f.write_str(v),
            OptValue::Bool(v) => write!(f, "{v}"),
            OptValue::Unset => f.write_str("none"),
        }
    }
}

impl From<i64> for OptValue {
    fn from(v: i64) -> Self {
        OptValue::Int(v)
    }
}

impl From<usize> for OptValue {
    fn from(v: usize) -> Self {
        OptValue::Int(v as i64)
    }
}

impl From<f64> for OptValue {
    fn from(v: f64) -> Self {
        OptValue::Float(v)
    }
}

impl From<bool> for OptValue {
    fn from(v: bool) -> Self {
        OptValue::Bool(v)
    }
}

impl From<String> for OptValue {
    fn from(v: String) -> Self {
        OptValue::Str(v)
    }
}

impl From<&str> for OptValue {
    fn from(v: &str) -> Self {
        OptValue::Str(v.to_string())
    }
}

impl<T: Into<OptValue>> From<Option<T>> for OptValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(OptValue::Unset, Into::into)
    }
}

/// Name-to-value view over the full option surface
#[derive(Debug, Clone, PartialEq)]
pub struct OptionTable(Vec<(&'static str, OptValue)>);

impl OptionTable {
    pub fn get(&self, name: &str) -> Option<&OptValue> {
        self.0
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &OptValue)> {
        self.0.iter().map(|(name, value)| (*name, value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Mention embedding scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MentEmb {
    #[default]
    Attn,
    Endpoint,
}

impl FromStr for MentEmb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "attn" => Ok(MentEmb::Attn),
            "endpoint" => Ok(MentEmb::Endpoint),
            _ => Err(format!(
                "Unknown mention embedding: {s}. Valid values: attn, endpoint"
            )),
        }
    }
}

impl fmt::Display for MentEmb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MentEmb::Attn => "attn",
            MentEmb::Endpoint => "endpoint",
        })
    }
}

/// Entity memory type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemType {
    Learned,
    Lru,
    #[default]
    Unbounded,
    UnboundedNoIgnore,
}

impl FromStr for MemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "learned" => Ok(MemType::Learned),
            "lru" => Ok(MemType::Lru),
            "unbounded" => Ok(MemType::Unbounded),
            "unbounded_no_ignore" => Ok(MemType::UnboundedNoIgnore),
            _ => Err(format!(
                "Unknown memory type: {s}. Valid values: learned, lru, unbounded, unbounded_no_ignore"
            )),
        }
    }
}

impl fmt::Display for MemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MemType::Learned => "learned",
            MemType::Lru => "lru",
            MemType::Unbounded => "unbounded",
            MemType::UnboundedNoIgnore => "unbounded_no_ignore",
        })
    }
}

/// Entity representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityRep {
    LearnedAvg,
    #[default]
    WtAvg,
    Max,
}

impl FromStr for EntityRep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "learned_avg" => Ok(EntityRep::LearnedAvg),
            "wt_avg" => Ok(EntityRep::WtAvg),
            "max" => Ok(EntityRep::Max),
            _ => Err(format!(
                "Unknown entity representation: {s}. Valid values: learned_avg, wt_avg, max"
            )),
        }
    }
}

impl fmt::Display for EntityRep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntityRep::LearnedAvg => "learned_avg",
            EntityRep::WtAvg => "wt_avg",
            EntityRep::Max => "max",
        })
    }
}

/// Similarity function between mention and entity representations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimFunc {
    #[default]
    Hadamard,
    Cosine,
    Endpoint,
}

impl FromStr for SimFunc {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hadamard" => Ok(SimFunc::Hadamard),
            "cosine" => Ok(SimFunc::Cosine),
            "endpoint" => Ok(SimFunc::Endpoint),
            _ => Err(format!(
                "Unknown similarity function: {s}. Valid values: hadamard, cosine, endpoint"
            )),
        }
    }
}

impl fmt::Display for SimFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SimFunc::Hadamard => "hadamard",
            SimFunc::Cosine => "cosine",
            SimFunc::Endpoint => "endpoint",
        })
    }
}

/// Mention loss scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MentLoss {
    All,
    #[default]
    Topk,
}

impl FromStr for MentLoss {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(MentLoss::All),
            "topk" => Ok(MentLoss::Topk),
            _ => Err(format!("Unknown mention loss: {s}. Valid values: all, topk")),
        }
    }
}

impl fmt::Display for MentLoss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MentLoss::All => "all",
            MentLoss::Topk => "topk",
        })
    }
}

/// Document class signal available to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocClass {
    Dialog,
    Genre,
}

impl FromStr for DocClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dialog" => Ok(DocClass::Dialog),
            "genre" => Ok(DocClass::Genre),
            _ => Err(format!(
                "Unknown document class: {s}. Valid values: dialog, genre"
            )),
        }
    }
}

impl fmt::Display for DocClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DocClass::Dialog => "dialog",
            DocClass::Genre => "genre",
        })
    }
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}
