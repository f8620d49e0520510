//! Probability-to-verdict thresholds.
use std::fmt;

use serde::{Deserialize, Serialize};

/// `p(real)` at or above this is labelled REAL.
pub const REAL_THRESHOLD: f64 = 0.6;
/// `p(real)` at or below this is labelled FAKE.
pub const FAKE_THRESHOLD: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    Real,
    Fake,
    Uncertain,
}

impl Label {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Label::Real => "REAL",
            Label::Fake => "FAKE",
            Label::Uncertain => "UNCERTAIN",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Decision {
    pub label: Label,
    /// `max(p, 1 - p)` as a percentage rounded to two decimals.
    pub confidence_pct: f64,
}

#[must_use]
pub fn decide(prob_real: f64) -> Decision {
    let label = if prob_real >= REAL_THRESHOLD {
        Label::Real
    } else if prob_real <= FAKE_THRESHOLD {
        Label::Fake
    } else {
        Label::Uncertain
    };
    let confidence = prob_real.max(1.0 - prob_real) * 100.0;
    Decision {
        label,
        confidence_pct: (confidence * 100.0).round() / 100.0,
    }
}
