use std::path::PathBuf;

use thiserror::Error;

use crate::classification::NewsClass;
use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read corpus {path}: {source}")]
    Corpus {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Training corpus is empty")]
    EmptyCorpus,

    #[error("No vocabulary terms survived normalization of the training documents")]
    EmptyVocabulary,

    #[error("Training data contains only the {0} class; both classes are required")]
    SingleClass(NewsClass),

    #[error("Class {class} has {count} sample(s); a stratified split needs at least 2")]
    InsufficientSamples { class: NewsClass, count: usize },

    #[error("Failed to access model artifact {path}: {source}")]
    ArtifactIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Model artifact {path} is corrupt: {source}")]
    ArtifactFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Model artifacts are inconsistent: {0}")]
    InconsistentArtifacts(String),

    #[error("Feature dimension mismatch: model expects {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Failed to register metrics: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("Failed to bind to address {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}
