use fake_news_detector::classification::normalizer::TextNormalizer;
use fake_news_detector::classification::stopwords::is_stopword;
use fake_news_detector::classification::vectorizer::{TfidfVectorizer, VectorizerParams};
use proptest::prelude::*;

fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<String>(),
        "[A-Za-z0-9 .,!?'\\-]{0,80}",
        "(the|news|aliens|www\\.x\\.com|http://a\\.b|ht|tp|prices|and|of) {0,3}"
            .prop_map(|s| s.repeat(3)),
    ]
}

proptest! {
    #[test]
    fn output_is_lowercase_words_separated_by_single_spaces(raw in text_strategy()) {
        let cleaned = TextNormalizer::new().normalize(&raw);
        prop_assert!(cleaned.chars().all(|c| c.is_ascii_lowercase() || c == ' '));
        prop_assert!(!cleaned.starts_with(' '));
        prop_assert!(!cleaned.ends_with(' '));
        prop_assert!(!cleaned.contains("  "));
    }

    #[test]
    fn output_has_no_stopwords(raw in text_strategy()) {
        let cleaned = TextNormalizer::new().normalize(&raw);
        for token in cleaned.split(' ').filter(|t| !t.is_empty()) {
            prop_assert!(!is_stopword(token), "stopword {} in {:?}", token, cleaned);
        }
    }

    #[test]
    fn normalize_is_idempotent(raw in text_strategy()) {
        let normalizer = TextNormalizer::new();
        let once = normalizer.normalize(&raw);
        prop_assert_eq!(normalizer.normalize(&once), once);
    }

    #[test]
    fn transformed_vectors_have_at_most_unit_norm(docs in prop::collection::vec("[a-z ]{0,40}", 1..8), probe in "[a-z ]{0,40}") {
        let vectorizer = TfidfVectorizer::fit(&docs, VectorizerParams::default());
        let vector = vectorizer.transform_one(&probe);
        let norm = vector.data().iter().map(|v| v * v).sum::<f64>().sqrt();
        prop_assert!(norm <= 1.0 + 1e-9);
        prop_assert_eq!(vector.dim(), vectorizer.num_features());
    }
}
