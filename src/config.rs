use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;

use crate::classification::model::LogisticParams;
use crate::classification::vectorizer::VectorizerParams;
use crate::training::TrainingParams;

/// Default HTTP port for the web form.
pub const DEFAULT_HTTP_PORT: u16 = 8080;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value}")]
    OutOfRange {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("{0} cannot be empty")]
    Empty(&'static str),
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log output format
    #[arg(long, env = "RUST_LOG_FORMAT", default_value = "json", global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fit the vectorizer and classifier from the labelled corpora
    Train(TrainConfig),
    /// Serve the prediction form over HTTP
    Serve(ServeConfig),
    /// Classify a single text and print the verdict
    Predict(PredictConfig),
    /// Probe a running server (for container health checks)
    Healthcheck(HealthcheckConfig),
}

#[derive(Args, Debug, Clone)]
pub struct TrainConfig {
    /// CSV corpus of genuine articles (columns: title, text)
    #[arg(long, env = "TRUE_CORPUS_PATH", default_value = "data/true.csv")]
    pub true_corpus: PathBuf,

    /// CSV corpus of fabricated articles (columns: title, text)
    #[arg(long, env = "FAKE_CORPUS_PATH", default_value = "data/fake.csv")]
    pub fake_corpus: PathBuf,

    /// Directory receiving the fitted artifacts
    #[arg(long, env = "MODEL_DIR", default_value = "model")]
    pub model_dir: PathBuf,

    /// Fraction of documents held out for evaluation
    #[arg(long, default_value = "0.2")]
    pub test_size: f64,

    /// Seed for shuffling and splitting
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Vocabulary cap
    #[arg(long, default_value = "5000")]
    pub max_features: usize,

    /// Largest n-gram size (unigrams are always included)
    #[arg(long, default_value = "2")]
    pub max_ngram: usize,

    /// Optimizer iteration cap
    #[arg(long, default_value = "1000")]
    pub max_iter: usize,

    /// Inverse L2 regularization strength (C)
    #[arg(long, default_value = "1.0")]
    pub regularization: f64,
}

impl TrainConfig {
    /// Validates the settings and returns an error if invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_path("true_corpus", &self.true_corpus)?;
        validate_path("fake_corpus", &self.fake_corpus)?;
        validate_path("model_dir", &self.model_dir)?;
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(ConfigError::OutOfRange {
                name: "test_size",
                expected: "strictly between 0 and 1",
                value: self.test_size.to_string(),
            });
        }
        validate_positive("max_features", self.max_features)?;
        validate_positive("max_ngram", self.max_ngram)?;
        validate_positive("max_iter", self.max_iter)?;
        if !(self.regularization.is_finite() && self.regularization > 0.0) {
            return Err(ConfigError::OutOfRange {
                name: "regularization",
                expected: "a positive finite number",
                value: self.regularization.to_string(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn training_params(&self) -> TrainingParams {
        TrainingParams {
            test_size: self.test_size,
            seed: self.seed,
            vectorizer: VectorizerParams::new(self.max_features, 1..=self.max_ngram),
            model: LogisticParams {
                c: self.regularization,
                max_iter: self.max_iter,
                ..LogisticParams::default()
            },
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ServeConfig {
    /// Directory holding the fitted artifacts
    #[arg(long, env = "MODEL_DIR", default_value = "model")]
    pub model_dir: PathBuf,

    /// Interface to bind
    #[arg(long, env = "HTTP_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// HTTP port
    #[arg(long, env = "HTTP_PORT", default_value_t = DEFAULT_HTTP_PORT)]
    pub port: u16,
}

impl ServeConfig {
    /// Validates the settings and returns an error if invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_path("model_dir", &self.model_dir)?;
        if self.host.trim().is_empty() {
            return Err(ConfigError::Empty("host"));
        }
        validate_port(self.port)
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host.trim(), self.port)
    }
}

#[derive(Args, Debug, Clone)]
pub struct PredictConfig {
    /// Directory holding the fitted artifacts
    #[arg(long, env = "MODEL_DIR", default_value = "model")]
    pub model_dir: PathBuf,

    /// Text to classify; read from stdin when omitted
    #[arg(long)]
    pub text: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct HealthcheckConfig {
    /// Port of the running server
    #[arg(long, env = "HTTP_PORT", default_value_t = DEFAULT_HTTP_PORT)]
    pub port: u16,
}

fn validate_path(name: &'static str, path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::Empty(name));
    }
    Ok(())
}

fn validate_positive(name: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::OutOfRange {
            name,
            expected: "greater than 0",
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Validates that the port is in valid range (1-65535).
fn validate_port(port: u16) -> Result<(), ConfigError> {
    if port == 0 {
        return Err(ConfigError::OutOfRange {
            name: "port",
            expected: "between 1 and 65535",
            value: port.to_string(),
        });
    }
    Ok(())
}
