//! TF-IDF over word n-grams with a frequency-capped vocabulary.
use std::collections::{HashMap, HashSet};
use std::ops::RangeInclusive;
use std::sync::LazyLock;

use rayon::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sprs::CsVec;
use tracing::debug;

/// Sparse, L2-normalised TF-IDF encoding of one document.
pub type FeatureVector = CsVec<f64>;

pub const DEFAULT_MAX_FEATURES: usize = 5000;

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("compile word pattern"));

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorizerParams {
    /// Vocabulary cap; the most frequent terms across the corpus are kept.
    max_features: usize,
    /// Inclusive n-gram sizes, e.g. `(1, 2)` for unigrams and bigrams.
    ngram_range: (usize, usize),
}

impl VectorizerParams {
    #[must_use]
    pub fn new(max_features: usize, ngram_range: RangeInclusive<usize>) -> Self {
        let min_n = (*ngram_range.start()).max(1);
        let max_n = (*ngram_range.end()).max(min_n);
        Self {
            max_features,
            ngram_range: (min_n, max_n),
        }
    }

    #[must_use]
    pub fn max_features(&self) -> usize {
        self.max_features
    }

    #[must_use]
    pub fn ngram_range(&self) -> (usize, usize) {
        self.ngram_range
    }
}

impl Default for VectorizerParams {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FEATURES, 1..=2)
    }
}

/// Persisted form of a fitted vectorizer; validated on load.
#[derive(Serialize, Deserialize)]
struct VectorizerArtifact {
    params: VectorizerParams,
    terms: Vec<String>,
    idf: Vec<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "VectorizerArtifact", into = "VectorizerArtifact")]
pub struct TfidfVectorizer {
    params: VectorizerParams,
    /// Feature index per term; indices follow the alphabetical order of `terms`.
    vocabulary: HashMap<String, usize>,
    terms: Vec<String>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn fit<T: AsRef<str> + Sync>(documents: &[T], params: VectorizerParams) -> Self {
        Self::fit_transform(documents, params).0
    }

    /// Fits the vocabulary and IDF table, then encodes the same documents
    /// without analyzing them twice.
    pub fn fit_transform<T: AsRef<str> + Sync>(
        documents: &[T],
        params: VectorizerParams,
    ) -> (Self, Vec<FeatureVector>) {
        debug!(num_documents = documents.len(), "Fitting TfidfVectorizer");
        let counts: Vec<HashMap<String, usize>> = documents
            .par_iter()
            .map(|doc| count_ngrams(doc.as_ref(), params.ngram_range))
            .collect();

        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        let mut term_freq: HashMap<&str, usize> = HashMap::new();
        for doc_counts in &counts {
            for (term, &count) in doc_counts {
                *doc_freq.entry(term.as_str()).or_insert(0) += 1;
                *term_freq.entry(term.as_str()).or_insert(0) += count;
            }
        }
        let distinct_terms = term_freq.len();

        let mut ranked: Vec<(&str, usize)> = term_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(params.max_features);

        let mut terms: Vec<String> = ranked.into_iter().map(|(term, _)| term.to_string()).collect();
        terms.sort();

        #[allow(clippy::cast_precision_loss)]
        let n_docs = documents.len() as f64;
        let idf = terms
            .iter()
            .map(|term| {
                let df = doc_freq.get(term.as_str()).copied().unwrap_or(0);
                #[allow(clippy::cast_precision_loss)]
                let df = df as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let vectorizer = Self::from_parts(params, terms, idf);
        debug!(
            distinct_terms,
            vocabulary_size = vectorizer.num_features(),
            "TfidfVectorizer fitting complete"
        );

        let encoded = counts
            .par_iter()
            .map(|doc_counts| vectorizer.encode(doc_counts))
            .collect();
        (vectorizer, encoded)
    }

    pub fn transform<T: AsRef<str> + Sync>(&self, documents: &[T]) -> Vec<FeatureVector> {
        documents
            .par_iter()
            .map(|doc| self.transform_one(doc.as_ref()))
            .collect()
    }

    /// Encodes one document; terms outside the vocabulary contribute nothing.
    #[must_use]
    pub fn transform_one(&self, document: &str) -> FeatureVector {
        self.encode(&count_ngrams(document, self.params.ngram_range))
    }

    #[must_use]
    pub fn num_features(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    #[must_use]
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    #[must_use]
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    #[must_use]
    pub fn params(&self) -> &VectorizerParams {
        &self.params
    }

    fn from_parts(params: VectorizerParams, terms: Vec<String>, idf: Vec<f64>) -> Self {
        let vocabulary = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();
        Self {
            params,
            vocabulary,
            terms,
            idf,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn encode(&self, counts: &HashMap<String, usize>) -> FeatureVector {
        let mut entries: Vec<(usize, f64)> = counts
            .iter()
            .filter_map(|(term, &count)| {
                self.vocabulary
                    .get(term)
                    .map(|&idx| (idx, count as f64 * self.idf[idx]))
            })
            .collect();
        entries.sort_unstable_by_key(|(idx, _)| *idx);

        let norm = entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        let (indices, data): (Vec<usize>, Vec<f64>) = entries
            .into_iter()
            .map(|(idx, value)| (idx, if norm > 0.0 { value / norm } else { value }))
            .unzip();
        CsVec::new(self.num_features(), indices, data)
    }
}

impl TryFrom<VectorizerArtifact> for TfidfVectorizer {
    type Error = String;

    fn try_from(artifact: VectorizerArtifact) -> Result<Self, Self::Error> {
        if artifact.terms.len() != artifact.idf.len() {
            return Err(format!(
                "vocabulary has {} terms but {} idf weights",
                artifact.terms.len(),
                artifact.idf.len()
            ));
        }
        let (min_n, max_n) = artifact.params.ngram_range;
        if min_n == 0 || max_n < min_n {
            return Err(format!("invalid ngram_range ({min_n}, {max_n})"));
        }
        if artifact.terms.len() > artifact.params.max_features {
            return Err(format!(
                "vocabulary has {} terms, above max_features {}",
                artifact.terms.len(),
                artifact.params.max_features
            ));
        }
        let mut seen = HashSet::with_capacity(artifact.terms.len());
        if let Some(duplicate) = artifact.terms.iter().find(|term| !seen.insert(term.as_str())) {
            return Err(format!("duplicate vocabulary term {duplicate:?}"));
        }
        if artifact.idf.iter().any(|w| !w.is_finite() || *w <= 0.0) {
            return Err("idf weights must be positive and finite".to_string());
        }
        Ok(Self::from_parts(artifact.params, artifact.terms, artifact.idf))
    }
}

impl From<TfidfVectorizer> for VectorizerArtifact {
    fn from(vectorizer: TfidfVectorizer) -> Self {
        Self {
            params: vectorizer.params,
            terms: vectorizer.terms,
            idf: vectorizer.idf,
        }
    }
}

/// Counts word n-grams (tokens of two or more word characters).
fn count_ngrams(text: &str, (min_n, max_n): (usize, usize)) -> HashMap<String, usize> {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = WORD_RE.find_iter(&lowered).map(|m| m.as_str()).collect();
    let mut counts = HashMap::new();
    for n in min_n..=max_n {
        for window in tokens.windows(n) {
            *counts.entry(window.join(" ")).or_insert(0) += 1;
        }
    }
    counts
}
