//! High-level news classification API.
use std::fmt;

use serde::{Deserialize, Serialize};

pub mod decision;
pub mod lemmatizer;
pub mod model;
pub mod normalizer;
pub mod optimizer;
pub mod stopwords;
pub mod vectorizer;

use decision::{Label, decide};
use model::{LogisticRegression, Prediction};
use normalizer::TextNormalizer;
use vectorizer::TfidfVectorizer;

use crate::error::DetectorError;
use crate::store::ModelStore;

/// Training target. Articles from the trusted corpus are `Real`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsClass {
    Fake = 0,
    Real = 1,
}

impl NewsClass {
    pub const ALL: [NewsClass; 2] = [NewsClass::Fake, NewsClass::Real];

    /// `+1` for real, `-1` for fake.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            NewsClass::Real => 1.0,
            NewsClass::Fake => -1.0,
        }
    }
}

impl fmt::Display for NewsClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NewsClass::Fake => f.write_str("fake"),
            NewsClass::Real => f.write_str("real"),
        }
    }
}

/// Outcome of classifying one text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Verdict {
    pub label: Label,
    pub confidence_pct: f64,
    pub probabilities: Prediction,
}

/// Normalizer, fitted vectorizer and fitted model bundled for inference.
#[derive(Debug, Clone)]
pub struct NewsClassifier {
    normalizer: TextNormalizer,
    vectorizer: TfidfVectorizer,
    model: LogisticRegression,
}

impl NewsClassifier {
    /// Pairs a vectorizer with a model, rejecting mismatched feature spaces.
    pub fn new(
        vectorizer: TfidfVectorizer,
        model: LogisticRegression,
    ) -> Result<Self, DetectorError> {
        if vectorizer.num_features() != model.num_features() {
            return Err(DetectorError::InconsistentArtifacts(format!(
                "vectorizer has {} features but the model has {} weights",
                vectorizer.num_features(),
                model.num_features()
            )));
        }
        Ok(Self {
            normalizer: TextNormalizer::new(),
            vectorizer,
            model,
        })
    }

    pub fn from_store(store: &dyn ModelStore) -> Result<Self, DetectorError> {
        let vectorizer = store.load_vectorizer()?;
        let model = store.load_classifier()?;
        Self::new(vectorizer, model)
    }

    pub fn predict(&self, raw: &str) -> Result<Prediction, DetectorError> {
        let cleaned = self.normalizer.normalize(raw);
        let features = self.vectorizer.transform_one(&cleaned);
        self.model.predict_proba(&features)
    }

    pub fn classify(&self, raw: &str) -> Result<Verdict, DetectorError> {
        let probabilities = self.predict(raw)?;
        let decision = decide(probabilities.real());
        Ok(Verdict {
            label: decision.label,
            confidence_pct: decision.confidence_pct,
            probabilities,
        })
    }

    #[must_use]
    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    #[must_use]
    pub fn model(&self) -> &LogisticRegression {
        &self.model
    }
}
