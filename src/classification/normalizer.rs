//! Raw article text to cleaned token string.
use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use super::lemmatizer::lemmatize;
use super::stopwords::is_stopword;

#[derive(Debug, Clone)]
pub struct TextNormalizer {
    url_re: Regex,
    non_alpha_re: Regex,
}

impl TextNormalizer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            url_re: Regex::new(r"http\S+|www\S+").expect("compile url pattern"),
            non_alpha_re: Regex::new(r"[^a-z\s]").expect("compile non-alpha pattern"),
        }
    }

    /// Strips accents, lowercases, removes URLs and non-letters, drops
    /// stopwords and lemmatizes.
    ///
    /// Total: any input, including the empty string, yields a (possibly
    /// empty) string of lowercase ASCII words separated by single spaces.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        // Decompose so accented letters keep their base ("é" -> "e").
        let lowered = raw
            .nfd()
            .filter(|c| !is_combining_mark(*c))
            .collect::<String>()
            .to_lowercase();
        let without_urls = self.url_re.replace_all(&lowered, "");
        let letters = self.non_alpha_re.replace_all(&without_urls, "");
        // Stripping can splice a new "http..." run together ("ht-tp" -> "http").
        let letters = self.url_re.replace_all(&letters, "");

        letters
            .split_whitespace()
            .filter(|token| !is_stopword(token))
            .map(lemmatize)
            .filter(|lemma| !is_stopword(lemma))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
