//! Error types for Autocoref

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown dataset: {0}. Valid datasets: litbank, ontonotes, preco, quizbowl, wikicoref")]
    UnknownDataset(String),

    #[error("Significant option '{0}' has no entry in the default table")]
    MissingDefault(&'static str),

    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config record {}: {source}", path.display())]
    WriteRecord {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
