//! Dataset identifiers and data directory resolution
//!
//! Each dataset stores its windowed input documents and (where one exists)
//! its CoNLL-formatted reference data under a dataset-specific layout. The
//! resolver is a pure path computation; it never checks that the resulting
//! directories exist.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::Error;

/// Supported coreference datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    Litbank,
    #[default]
    Ontonotes,
    Preco,
    Quizbowl,
    Wikicoref,
}

impl FromStr for Dataset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "litbank" => Ok(Dataset::Litbank),
            "ontonotes" => Ok(Dataset::Ontonotes),
            "preco" => Ok(Dataset::Preco),
            "quizbowl" => Ok(Dataset::Quizbowl),
            "wikicoref" => Ok(Dataset::Wikicoref),
            _ => Err(Error::UnknownDataset(s.to_string())),
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dataset::Litbank => "litbank",
            Dataset::Ontonotes => "ontonotes",
            Dataset::Preco => "preco",
            Dataset::Quizbowl => "quizbowl",
            Dataset::Wikicoref => "wikicoref",
        };
        f.write_str(name)
    }
}

/// Resolved input and reference directories for a dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPaths {
    /// Directory holding the windowed input documents
    pub data_dir: PathBuf,

    /// Directory holding CoNLL reference data for the external scorer,
    /// absent for datasets without a CoNLL rendering
    pub conll_dir: Option<PathBuf>,
}

/// Resolve the data and CoNLL reference directories for a dataset.
///
/// Without an explicit `data_dir`, layouts hang off `base_data_dir`:
/// litbank adds `independent/<split>` and `conll/<split>` segments below
/// the dataset directory, ontonotes the same without the split. An
/// explicit `data_dir` is taken to already include the dataset segment;
/// the CoNLL directory is then derived from its parent. Datasets without
/// a CoNLL rendering resolve to the given directory verbatim.
pub fn resolve_data_paths(
    dataset: Dataset,
    base_data_dir: &Path,
    data_dir: Option<&Path>,
    cross_val_split: u32,
) -> DataPaths {
    match data_dir {
        None => match dataset {
            Dataset::Litbank => {
                let root = base_data_dir.join(dataset.to_string());
                DataPaths {
                    data_dir: root.join("independent").join(cross_val_split.to_string()),
                    conll_dir: Some(root.join("conll").join(cross_val_split.to_string())),
                }
            }
            Dataset::Ontonotes => {
                let root = base_data_dir.join(dataset.to_string());
                DataPaths {
                    data_dir: root.join("independent"),
                    conll_dir: Some(root.join("conll")),
                }
            }
            _ => DataPaths {
                data_dir: base_data_dir.to_path_buf(),
                conll_dir: None,
            },
        },
        Some(dir) => {
            // Parent of the override, ignoring any trailing separator.
            let parent = dir.parent().map(Path::to_path_buf).unwrap_or_default();
            match dataset {
                Dataset::Litbank => DataPaths {
                    data_dir: dir.join(cross_val_split.to_string()),
                    conll_dir: Some(parent.join("conll").join(cross_val_split.to_string())),
                },
                Dataset::Ontonotes => DataPaths {
                    data_dir: dir.to_path_buf(),
                    conll_dir: Some(parent.join("conll")),
                },
                _ => DataPaths {
                    data_dir: dir.to_path_buf(),
                    conll_dir: None,
                },
            }
        }
    }
}
