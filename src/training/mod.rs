//! Offline training pipeline: corpora in, fitted artifacts and report out.
use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

pub mod corpus;
pub mod evaluation;
pub mod split;

pub use corpus::{Article, LabeledDocument, labeled_documents, load_articles};
pub use evaluation::EvaluationReport;
pub use split::{Split, stratified_split};

use crate::classification::model::{FitSummary, LogisticParams, LogisticRegression};
use crate::classification::normalizer::TextNormalizer;
use crate::classification::vectorizer::{TfidfVectorizer, VectorizerParams};
use crate::classification::{NewsClass, NewsClassifier};
use crate::config::TrainConfig;
use crate::error::DetectorError;
use crate::store::{FileModelStore, ModelStore};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingParams {
    /// Fraction of each class held out for evaluation.
    pub test_size: f64,
    pub seed: u64,
    pub vectorizer: VectorizerParams,
    pub model: LogisticParams,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            test_size: 0.2,
            seed: 42,
            vectorizer: VectorizerParams::default(),
            model: LogisticParams::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub trained_at: DateTime<Utc>,
    pub real_documents: usize,
    pub fake_documents: usize,
    pub train_documents: usize,
    pub test_documents: usize,
    pub vocabulary_size: usize,
    pub params: TrainingParams,
    pub optimizer: FitSummary,
    pub evaluation: EvaluationReport,
}

#[derive(Debug)]
pub struct TrainingOutcome {
    pub classifier: NewsClassifier,
    pub report: TrainingReport,
}

/// Shuffles, normalizes, splits, fits and evaluates.
pub fn train_from_documents(
    mut documents: Vec<LabeledDocument>,
    params: &TrainingParams,
) -> Result<TrainingOutcome, DetectorError> {
    if documents.is_empty() {
        return Err(DetectorError::EmptyCorpus);
    }
    let real_documents = documents
        .iter()
        .filter(|doc| doc.label == NewsClass::Real)
        .count();
    let fake_documents = documents.len() - real_documents;
    if fake_documents == 0 {
        return Err(DetectorError::SingleClass(NewsClass::Real));
    }
    if real_documents == 0 {
        return Err(DetectorError::SingleClass(NewsClass::Fake));
    }

    let mut rng = StdRng::seed_from_u64(params.seed);
    documents.shuffle(&mut rng);

    let normalizer = TextNormalizer::new();
    let cleaned: Vec<String> = documents
        .par_iter()
        .map(|doc| normalizer.normalize(&doc.content))
        .collect();
    let labels: Vec<NewsClass> = documents.iter().map(|doc| doc.label).collect();
    info!(
        documents = cleaned.len(),
        real_documents, fake_documents, "Normalized training corpus"
    );

    let split = stratified_split(&labels, params.test_size, params.seed)?;
    let select_texts = |indices: &[usize]| {
        indices
            .iter()
            .map(|&i| cleaned[i].as_str())
            .collect::<Vec<_>>()
    };
    let select_labels = |indices: &[usize]| {
        indices
            .iter()
            .map(|&i| labels[i])
            .collect::<Vec<NewsClass>>()
    };
    let train_labels = select_labels(&split.train);
    let test_labels = select_labels(&split.test);

    let (vectorizer, train_rows) =
        TfidfVectorizer::fit_transform(&select_texts(&split.train), params.vectorizer.clone());
    if vectorizer.num_features() == 0 {
        return Err(DetectorError::EmptyVocabulary);
    }
    let test_rows = vectorizer.transform(&select_texts(&split.test));
    info!(
        vocabulary_size = vectorizer.num_features(),
        train_documents = train_rows.len(),
        test_documents = test_rows.len(),
        "Fitted vectorizer"
    );

    let (model, optimizer) = LogisticRegression::fit(&train_rows, &train_labels, &params.model)?;
    let predicted = test_rows
        .iter()
        .map(|row| model.predict_class(row))
        .collect::<Result<Vec<_>, _>>()?;
    let evaluation = EvaluationReport::from_predictions(&test_labels, &predicted);
    info!(
        accuracy = evaluation.accuracy,
        iterations = optimizer.iterations,
        converged = optimizer.converged,
        "Model accuracy: {:.4}",
        evaluation.accuracy
    );

    let report = TrainingReport {
        trained_at: Utc::now(),
        real_documents,
        fake_documents,
        train_documents: train_rows.len(),
        test_documents: test_rows.len(),
        vocabulary_size: vectorizer.num_features(),
        params: params.clone(),
        optimizer,
        evaluation,
    };
    let classifier = NewsClassifier::new(vectorizer, model)?;
    Ok(TrainingOutcome { classifier, report })
}

/// Loads both corpora, trains, and writes the artifacts and report.
pub fn run(config: &TrainConfig) -> Result<TrainingReport, DetectorError> {
    config.validate()?;
    let mut documents = labeled_documents(load_articles(&config.true_corpus)?, NewsClass::Real);
    documents.extend(labeled_documents(
        load_articles(&config.fake_corpus)?,
        NewsClass::Fake,
    ));

    let outcome = train_from_documents(documents, &config.training_params())?;
    let store = FileModelStore::new(&config.model_dir);
    store.save_vectorizer(outcome.classifier.vectorizer())?;
    store.save_classifier(outcome.classifier.model())?;
    store.save_report(&outcome.report)?;
    info!(model_dir = %config.model_dir.display(), "Training artifacts saved");
    Ok(outcome.report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use tracing_test::traced_test;

    const REAL_PHRASES: [&str; 4] = [
        "senate budget vote",
        "central bank interest rate",
        "united nations food price",
        "officials said report tuesday",
    ];
    const FAKE_PHRASES: [&str; 4] = [
        "shocking alien secret",
        "miracle cure doctor hate",
        "celebrity conspiracy exposed",
        "you wont believe truth",
    ];

    fn documents(per_class: usize) -> Vec<LabeledDocument> {
        let mut docs = Vec::new();
        for i in 0..per_class {
            for (phrases, label) in [
                (REAL_PHRASES, NewsClass::Real),
                (FAKE_PHRASES, NewsClass::Fake),
            ] {
                docs.push(LabeledDocument {
                    content: format!("{} {}", phrases[i % 4], phrases[(i / 4) % 4]),
                    label,
                });
            }
        }
        docs
    }

    #[test]
    fn trains_and_evaluates_disjoint_vocabularies() {
        let outcome = train_from_documents(documents(20), &TrainingParams::default()).unwrap();
        let report = &outcome.report;
        assert_eq!(report.real_documents, 20);
        assert_eq!(report.fake_documents, 20);
        assert_eq!(report.test_documents, 8);
        assert_eq!(report.train_documents, 32);
        assert!(report.optimizer.converged);
        assert!((report.evaluation.accuracy - 1.0).abs() < 1e-12);

        let prediction = outcome.classifier.predict("Shocking alien secret").unwrap();
        assert!(prediction.fake() > 0.5);
    }

    #[traced_test]
    #[test]
    fn logs_held_out_accuracy() {
        train_from_documents(documents(12), &TrainingParams::default()).unwrap();
        assert!(logs_contain("Model accuracy:"));
        assert!(logs_contain("Fitted vectorizer"));
    }

    #[test]
    fn empty_corpus_is_rejected() {
        let err = train_from_documents(Vec::new(), &TrainingParams::default()).unwrap_err();
        assert!(matches!(err, DetectorError::EmptyCorpus));
    }

    #[test]
    fn single_class_corpus_is_rejected() {
        let docs: Vec<_> = documents(5)
            .into_iter()
            .filter(|doc| doc.label == NewsClass::Real)
            .collect();
        let err = train_from_documents(docs, &TrainingParams::default()).unwrap_err();
        assert!(matches!(err, DetectorError::SingleClass(NewsClass::Real)));
    }

    #[test]
    fn stopword_only_corpus_has_no_vocabulary() {
        let docs = (0..6)
            .flat_map(|_| {
                [
                    LabeledDocument {
                        content: "The and of it was".to_string(),
                        label: NewsClass::Real,
                    },
                    LabeledDocument {
                        content: "42 !!! ... 2017".to_string(),
                        label: NewsClass::Fake,
                    },
                ]
            })
            .collect();
        let err = train_from_documents(docs, &TrainingParams::default()).unwrap_err();
        assert!(matches!(err, DetectorError::EmptyVocabulary));
    }

    #[test]
    fn run_rejects_corpus_without_text_columns() {
        let dir = TempDir::new().unwrap();
        let mut csv = String::from("headline,body\n");
        for i in 0..20 {
            csv.push_str(&format!("headline {i},body {i}\n"));
        }
        let true_corpus = dir.path().join("true.csv");
        let fake_corpus = dir.path().join("fake.csv");
        fs::write(&true_corpus, &csv).unwrap();
        fs::write(&fake_corpus, &csv).unwrap();
        let config = TrainConfig {
            true_corpus,
            fake_corpus,
            model_dir: dir.path().join("model"),
            test_size: 0.2,
            seed: 42,
            max_features: 100,
            max_ngram: 2,
            max_iter: 100,
            regularization: 1.0,
        };

        let err = run(&config).unwrap_err();
        assert!(matches!(err, DetectorError::Corpus { .. }), "{err}");
        assert!(!config.model_dir.exists());
    }

    #[test]
    fn run_writes_artifacts_and_report() {
        let dir = TempDir::new().unwrap();
        let write_corpus = |name: &str, phrases: [&str; 4]| {
            let mut csv = String::from("title,text,subject\n");
            for i in 0..12 {
                csv.push_str(&format!("{},{},news\n", phrases[i % 4], phrases[(i + 1) % 4]));
            }
            let path = dir.path().join(name);
            fs::write(&path, csv).unwrap();
            path
        };
        let config = TrainConfig {
            true_corpus: write_corpus("true.csv", REAL_PHRASES),
            fake_corpus: write_corpus("fake.csv", FAKE_PHRASES),
            model_dir: dir.path().join("model"),
            test_size: 0.25,
            seed: 7,
            max_features: 100,
            max_ngram: 2,
            max_iter: 200,
            regularization: 1.0,
        };

        let report = run(&config).unwrap();
        assert_eq!(report.real_documents, 12);
        assert_eq!(report.test_documents, 6);
        assert!(report.vocabulary_size <= 100);
        for file in ["vectorizer.json", "fake_news_model.json", "training_report.json"] {
            assert!(config.model_dir.join(file).is_file(), "{file} missing");
        }

        let store = FileModelStore::new(&config.model_dir);
        let classifier = NewsClassifier::from_store(&store).unwrap();
        assert_eq!(classifier.vectorizer().num_features(), report.vocabulary_size);
    }

    #[test]
    fn run_rejects_invalid_config() {
        let config = TrainConfig {
            true_corpus: "true.csv".into(),
            fake_corpus: "fake.csv".into(),
            model_dir: "model".into(),
            test_size: 1.5,
            seed: 42,
            max_features: 10,
            max_ngram: 2,
            max_iter: 10,
            regularization: 1.0,
        };
        assert!(matches!(run(&config).unwrap_err(), DetectorError::Config(_)));
    }
}
