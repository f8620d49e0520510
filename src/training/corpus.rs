//! CSV corpus loading.
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::classification::NewsClass;
use crate::error::DetectorError;

/// One corpus row. Both `title` and `text` columns are required; any other
/// columns are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Article {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledDocument {
    pub content: String,
    pub label: NewsClass,
}

pub fn load_articles(path: &Path) -> Result<Vec<Article>, DetectorError> {
    let corpus_error = |source| DetectorError::Corpus {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(corpus_error)?;
    let articles = reader
        .deserialize::<Article>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(corpus_error)?;
    info!(path = %path.display(), articles = articles.len(), "Loaded corpus");
    Ok(articles)
}

/// Joins title and body as `title + " " + text`.
#[must_use]
pub fn labeled_documents(articles: Vec<Article>, label: NewsClass) -> Vec<LabeledDocument> {
    articles
        .into_iter()
        .map(|article| LabeledDocument {
            content: format!("{} {}", article.title, article.text),
            label,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_title_and_text_ignoring_extra_columns() {
        let file = csv_file(
            "title,text,subject,date\n\
             \"Senate passes bill\",\"The vote was 60-40, officials said.\",politics,2017-12-01\n\
             Short,Body,news,2017-12-02\n",
        );
        let articles = load_articles(file.path()).unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title, "Senate passes bill");
        assert_eq!(articles[0].text, "The vote was 60-40, officials said.");
    }

    #[test]
    fn missing_text_columns_are_rejected() {
        let file = csv_file("headline,body\nAliens land,On the lawn\nSenate votes,On the bill\n");
        let err = load_articles(file.path()).unwrap_err();
        assert!(matches!(err, DetectorError::Corpus { .. }));
        assert!(err.to_string().contains("title"), "{err}");
    }

    #[test]
    fn empty_fields_are_kept_as_empty_strings() {
        let file = csv_file("title,text\n,Body only\nTitle only,\n");
        let articles = load_articles(file.path()).unwrap();
        assert_eq!(articles[0].title, "");
        assert_eq!(articles[1].text, "");
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_articles(Path::new("/nonexistent/true.csv")).unwrap_err();
        assert!(matches!(err, DetectorError::Corpus { .. }));
        assert!(err.to_string().contains("/nonexistent/true.csv"));
    }

    #[test]
    fn documents_join_title_and_text() {
        let docs = labeled_documents(
            vec![Article {
                title: "Aliens land".to_string(),
                text: "on the lawn".to_string(),
            }],
            NewsClass::Fake,
        );
        assert_eq!(docs[0].content, "Aliens land on the lawn");
        assert_eq!(docs[0].label, NewsClass::Fake);
    }
}
