#![allow(dead_code)]

use fake_news_detector::classification::NewsClass;
use fake_news_detector::training::{LabeledDocument, TrainingParams, train_from_documents};
use fake_news_detector::NewsClassifier;

pub const REAL_PHRASES: [&str; 8] = [
    "The United Nations said on Tuesday that global food prices declined slightly",
    "driven by lower cereal and vegetable oil costs",
    "according to a report released by the Food and Agriculture Organization",
    "Reuters reported the central bank kept interest rates unchanged",
    "Lawmakers in the Senate voted on the budget bill on Wednesday",
    "officials said the trade agreement would be signed in June",
    "the ministry of finance published quarterly growth figures",
    "analysts expect inflation to ease later this year",
];

pub const FAKE_PHRASES: [&str; 8] = [
    "BREAKING: aliens land on White House lawn",
    "Shocking secret revealed! Government hiding truth from citizens!!!",
    "miracle cure that doctors hate exposed",
    "you won't believe what this celebrity said",
    "share before they delete this video",
    "insiders claim the election was rigged by lizard people",
    "mainstream media silent about secret plot",
    "wake up sheeple the truth is out there",
];

pub const UN_REPORT: &str = "The United Nations said on Tuesday that global food prices declined slightly in June, driven by lower cereal and vegetable oil costs, according to a report released by the Food and Agriculture Organization.";
pub const ALIEN_HEADLINE: &str = "BREAKING: aliens land on white house lawn!!!";

/// Article `i` of a class: one phrase as title, two more as body.
pub fn article(phrases: &[&str; 8], i: usize) -> (String, String) {
    let title = phrases[i % 8].to_string();
    let text = format!("{} {}", phrases[(i * 3 + 1) % 8], phrases[(i * 5 + 2) % 8]);
    (title, text)
}

pub fn corpus(per_class: usize) -> Vec<LabeledDocument> {
    let mut docs = Vec::with_capacity(per_class * 2);
    for i in 0..per_class {
        for (phrases, label) in [
            (&REAL_PHRASES, NewsClass::Real),
            (&FAKE_PHRASES, NewsClass::Fake),
        ] {
            let (title, text) = article(phrases, i);
            docs.push(LabeledDocument {
                content: format!("{title} {text}"),
                label,
            });
        }
    }
    docs
}

/// CSV text with the usual `title,text,subject,date` header.
pub fn corpus_csv(phrases: &[&str; 8], rows: usize) -> String {
    let mut csv = String::from("title,text,subject,date\n");
    for i in 0..rows {
        let (title, text) = article(phrases, i);
        csv.push_str(&format!(
            "\"{}\",\"{}\",news,2017-12-{:02}\n",
            title.replace('"', "\"\""),
            text.replace('"', "\"\""),
            i % 28 + 1
        ));
    }
    csv
}

pub fn trained_classifier() -> NewsClassifier {
    train_from_documents(corpus(80), &TrainingParams::default())
        .expect("training on the synthetic corpus")
        .classifier
}
