//! Noun lemmatization: irregular plurals, invariant words and suffix rules.
//!
//! Every lemma produced here is a fixed point (`lemmatize(lemmatize(w)) ==
//! lemmatize(w)`), which keeps the normalizer idempotent.
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

const IRREGULAR_PLURALS: [(&str, &str); 40] = [
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
    ("mice", "mouse"),
    ("oxen", "ox"),
    ("lives", "life"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("halves", "half"),
    ("shelves", "shelf"),
    ("thieves", "thief"),
    ("wolves", "wolf"),
    ("analyses", "analysis"),
    ("crises", "crisis"),
    ("bases", "basis"),
    ("theses", "thesis"),
    ("hypotheses", "hypothesis"),
    ("diagnoses", "diagnosis"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("data", "datum"),
    ("media", "medium"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("appendices", "appendix"),
    ("movies", "movie"),
    ("cookies", "cookie"),
    ("businesswomen", "businesswoman"),
    ("businessmen", "businessman"),
    ("congressmen", "congressman"),
    ("spokesmen", "spokesman"),
    ("spokeswomen", "spokeswoman"),
    ("policemen", "policeman"),
    ("chairmen", "chairman"),
    ("gentlemen", "gentleman"),
    ("heroes", "hero"),
];

const INVARIANT: [&str; 36] = [
    "news",
    "series",
    "species",
    "means",
    "politics",
    "economics",
    "physics",
    "mathematics",
    "ethics",
    "athletics",
    "statistics",
    "logistics",
    "electronics",
    "olympics",
    "lens",
    "chaos",
    "always",
    "perhaps",
    "sometimes",
    "various",
    "whereas",
    "towards",
    "afterwards",
    "besides",
    "nevertheless",
    "thanks",
    "christmas",
    "texas",
    "kansas",
    "arkansas",
    "vegas",
    "angeles",
    "mars",
    "paris",
    "wales",
    "headquarters",
];

static IRREGULAR: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| IRREGULAR_PLURALS.iter().copied().collect());

static INVARIANT_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| INVARIANT.iter().copied().collect());

/// Reduces a lowercase ASCII token to its noun base form.
#[must_use]
pub fn lemmatize(word: &str) -> Cow<'_, str> {
    if let Some(base) = IRREGULAR.get(word) {
        return Cow::Borrowed(base);
    }
    let candidate = apply_suffix_rules(word);
    // A rule may expose an irregular form ("mens" -> "men").
    match IRREGULAR.get(candidate.as_ref()) {
        Some(base) => Cow::Borrowed(base),
        None => candidate,
    }
}

fn apply_suffix_rules(word: &str) -> Cow<'_, str> {
    if word.len() <= 3 || INVARIANT_SET.contains(word) {
        return Cow::Borrowed(word);
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return Cow::Borrowed(word);
    }
    if let Some(stem) = word.strip_suffix("ies") {
        if word.len() > 4 {
            return Cow::Owned(format!("{stem}y"));
        }
        return Cow::Borrowed(&word[..word.len() - 1]);
    }
    if word.ends_with("sses") || word.ends_with("shes") || word.ends_with("xes") {
        return Cow::Borrowed(&word[..word.len() - 2]);
    }
    if let Some(stem) = word.strip_suffix("ches")
        && stem.chars().last().is_some_and(|c| !is_vowel(c))
    {
        return Cow::Borrowed(&word[..word.len() - 2]);
    }
    match word.strip_suffix('s') {
        Some(stem) => Cow::Borrowed(stem),
        None => Cow::Borrowed(word),
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("aliens", "alien")]
    #[case("prices", "price")]
    #[case("citizens", "citizen")]
    #[case("stories", "story")]
    #[case("lies", "lie")]
    #[case("classes", "class")]
    #[case("crashes", "crash")]
    #[case("boxes", "box")]
    #[case("churches", "church")]
    #[case("headaches", "headache")]
    #[case("women", "woman")]
    #[case("children", "child")]
    #[case("mens", "man")]
    #[case("news", "news")]
    #[case("virus", "virus")]
    #[case("analysis", "analysis")]
    #[case("business", "business")]
    #[case("gas", "gas")]
    #[case("government", "government")]
    fn lemmatizes_nouns(#[case] word: &str, #[case] expected: &str) {
        assert_eq!(lemmatize(word), expected);
    }

    #[test]
    fn lemmas_are_fixed_points() {
        let words = IRREGULAR_PLURALS
            .iter()
            .flat_map(|(plural, base)| [*plural, *base])
            .chain(INVARIANT)
            .chain([
                "aliens", "stories", "classes", "boxes", "churches", "beaches", "hours",
                "specimens", "quizzes", "taxes", "wishes", "costs", "reports",
            ]);
        for word in words {
            let once = lemmatize(word).into_owned();
            let twice = lemmatize(&once).into_owned();
            assert_eq!(once, twice, "lemma of {word} is not stable");
        }
    }

    #[test]
    fn irregular_bases_are_not_keys() {
        for (_, base) in IRREGULAR_PLURALS {
            assert!(!IRREGULAR.contains_key(base), "{base} maps again");
        }
    }
}
