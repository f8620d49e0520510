//! Persistence of fitted artifacts as JSON blobs.
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::classification::model::LogisticRegression;
use crate::classification::vectorizer::TfidfVectorizer;
use crate::error::DetectorError;
use crate::training::TrainingReport;

pub const VECTORIZER_FILE: &str = "vectorizer.json";
pub const MODEL_FILE: &str = "fake_news_model.json";
pub const REPORT_FILE: &str = "training_report.json";

/// Where fitted artifacts live between training and serving.
pub trait ModelStore: Send + Sync {
    fn load_vectorizer(&self) -> Result<TfidfVectorizer, DetectorError>;
    fn load_classifier(&self) -> Result<LogisticRegression, DetectorError>;
    fn save_vectorizer(&self, vectorizer: &TfidfVectorizer) -> Result<(), DetectorError>;
    fn save_classifier(&self, model: &LogisticRegression) -> Result<(), DetectorError>;
    fn save_report(&self, report: &TrainingReport) -> Result<(), DetectorError>;
}

#[derive(Debug, Clone)]
pub struct FileModelStore {
    root: PathBuf,
}

impl FileModelStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read<T: DeserializeOwned>(&self, file: &str) -> Result<T, DetectorError> {
        let path = self.root.join(file);
        let handle = fs::File::open(&path).map_err(|source| DetectorError::ArtifactIo {
            path: path.clone(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(handle))
            .map_err(|source| DetectorError::ArtifactFormat { path, source })
    }

    fn write<T: Serialize>(&self, file: &str, value: &T) -> Result<(), DetectorError> {
        fs::create_dir_all(&self.root).map_err(|source| DetectorError::ArtifactIo {
            path: self.root.clone(),
            source,
        })?;
        let path = self.root.join(file);
        let io_error = |source| DetectorError::ArtifactIo {
            path: path.clone(),
            source,
        };
        let handle = fs::File::create(&path).map_err(io_error)?;
        let mut writer = BufWriter::new(handle);
        serde_json::to_writer(&mut writer, value).map_err(|source| {
            DetectorError::ArtifactFormat {
                path: path.clone(),
                source,
            }
        })?;
        writer.flush().map_err(io_error)?;
        info!(path = %path.display(), "Wrote model artifact");
        Ok(())
    }
}

impl ModelStore for FileModelStore {
    fn load_vectorizer(&self) -> Result<TfidfVectorizer, DetectorError> {
        self.read(VECTORIZER_FILE)
    }

    fn load_classifier(&self) -> Result<LogisticRegression, DetectorError> {
        self.read(MODEL_FILE)
    }

    fn save_vectorizer(&self, vectorizer: &TfidfVectorizer) -> Result<(), DetectorError> {
        self.write(VECTORIZER_FILE, vectorizer)
    }

    fn save_classifier(&self, model: &LogisticRegression) -> Result<(), DetectorError> {
        self.write(MODEL_FILE, model)
    }

    fn save_report(&self, report: &TrainingReport) -> Result<(), DetectorError> {
        self.write(REPORT_FILE, report)
    }
}
