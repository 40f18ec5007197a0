//! Sentiment labels and the threshold policy that maps scores onto them.

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default lower bound for a positive label.
pub const DEFAULT_POSITIVE_THRESHOLD: f32 = 0.10;
/// Default upper bound for a negative label.
pub const DEFAULT_NEGATIVE_THRESHOLD: f32 = -0.10;

/// A discrete sentiment classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// Score at or below the negative threshold.
    Negative,
    /// Score strictly between the two thresholds.
    Neutral,
    /// Score at or above the positive threshold.
    Positive,
}

impl Label {
    /// All labels in the fixed (alphabetical) order used by model artifacts.
    pub const ALL: [Label; 3] = [Label::Negative, Label::Neutral, Label::Positive];

    /// Position of this label in [`Label::ALL`].
    pub fn index(self) -> usize {
        match self {
            Label::Negative => 0,
            Label::Neutral => 1,
            Label::Positive => 2,
        }
    }

    /// The lowercase string form.
    pub fn as_str(self) -> &'static str {
        match self {
            Label::Negative => "negative",
            Label::Neutral => "neutral",
            Label::Positive => "positive",
        }
    }

    /// Label a score with the default thresholds.
    pub fn from_score(score: f32) -> Self {
        label_from_score(score, &Thresholds::default())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "negative" => Ok(Label::Negative),
            "neutral" => Ok(Label::Neutral),
            "positive" => Ok(Label::Positive),
            other => Err(PipelineError::Dataset(format!(
                "Unknown label '{other}'. Expected one of: negative, neutral, positive"
            ))),
        }
    }
}

/// The two cutoffs converting a score into a [`Label`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Scores `>=` this are positive.
    pub positive: f32,
    /// Scores `<=` this are negative.
    pub negative: f32,
}

impl Thresholds {
    /// Create validated thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] if either value is not finite, lies
    /// outside `[-1, 1]`, or `positive < negative`.
    pub fn new(positive: f32, negative: f32) -> Result<Self> {
        let thresholds = Self { positive, negative };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Check the invariants of an existing value (e.g. one deserialized from config).
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("positive", self.positive), ("negative", self.negative)] {
            if !value.is_finite() || !(-1.0..=1.0).contains(&value) {
                return Err(PipelineError::Config(format!(
                    "thresholds.{name} = {value} must be a finite value in [-1, 1]"
                )));
            }
        }
        if self.positive < self.negative {
            return Err(PipelineError::Config(format!(
                "thresholds.positive ({}) must not be below thresholds.negative ({})",
                self.positive, self.negative
            )));
        }
        Ok(())
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            positive: DEFAULT_POSITIVE_THRESHOLD,
            negative: DEFAULT_NEGATIVE_THRESHOLD,
        }
    }
}

/// Map a score onto a label.
///
/// Ties at either threshold go to the outer label; neutral is the open
/// interval between them. Scores outside `[-1, 1]` are compared as-is and NaN
/// is neutral.
pub fn label_from_score(score: f32, thresholds: &Thresholds) -> Label {
    if score >= thresholds.positive {
        Label::Positive
    } else if score <= thresholds.negative {
        Label::Negative
    } else {
        Label::Neutral
    }
}
