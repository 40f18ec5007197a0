//! Offline training: TSV in, validated [`ModelArtifact`] out.
//!
//! ```rust,no_run
//! use candle_sentiment::training::{load_tsv, train, TrainingOptions};
//!
//! # fn main() -> candle_sentiment::error::Result<()> {
//! let dataset = load_tsv("data/train.tsv")?;
//! let (artifact, report) = train(&dataset, &TrainingOptions::default())?;
//! println!("{report}");
//! artifact.save("models/sentiment.json")?;
//! # Ok(())
//! # }
//! ```

pub mod dataset;
pub mod logistic;
pub mod metrics;

use candle_core::Device;
use std::fmt;
use tracing::info;

pub use dataset::{load_tsv, Dataset, Example};
pub use logistic::LogisticOptions;

use crate::error::{PipelineError, Result};
use crate::label::Label;
use crate::models::artifact::ModelArtifact;
use crate::models::linear::LinearModel;
use crate::models::vectorizer::{TfIdfVectorizer, VectorizerOptions, MAX_NGRAM};

/// Everything [`train`] can be tuned with.
#[derive(Debug, Clone)]
pub struct TrainingOptions {
    pub vectorizer: VectorizerOptions,
    pub logistic: LogisticOptions,
    /// Every n-th example of each label is held out; `5` gives a 20% split.
    pub validation_every: usize,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self {
            vectorizer: VectorizerOptions::default(),
            logistic: LogisticOptions::default(),
            validation_every: 5,
        }
    }
}

impl TrainingOptions {
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        if self.logistic.epochs == 0 {
            errors.push("epochs must be at least 1".to_string());
        }
        if !(self.logistic.learning_rate.is_finite() && self.logistic.learning_rate > 0.0) {
            errors.push(format!(
                "learning_rate = {} must be a positive number",
                self.logistic.learning_rate
            ));
        }
        if !(self.logistic.weight_decay.is_finite() && self.logistic.weight_decay >= 0.0) {
            errors.push(format!(
                "weight_decay = {} must be non-negative",
                self.logistic.weight_decay
            ));
        }
        let (min_n, max_n) = self.vectorizer.ngram_range;
        if min_n == 0 || min_n > max_n || max_n > MAX_NGRAM {
            errors.push(format!(
                "ngram_range = ({min_n}, {max_n}) must satisfy 1 <= min <= max <= {MAX_NGRAM}"
            ));
        }
        if self.vectorizer.max_features == 0 {
            errors.push("max_features must be at least 1".to_string());
        }
        if !(self.vectorizer.max_df > 0.0 && self.vectorizer.max_df <= 1.0) {
            errors.push(format!(
                "max_df = {} must be in (0, 1]",
                self.vectorizer.max_df
            ));
        }
        if self.validation_every == 1 {
            errors.push("validation_every = 1 would hold out every example".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(PipelineError::Config(format!(
                "Invalid training options: {}",
                errors.join("; ")
            )))
        }
    }
}

/// Sizes and validation metrics of a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    pub train_size: usize,
    pub validation_size: usize,
    pub vocabulary_size: usize,
    pub accuracy: f32,
    pub macro_f1: f32,
}

impl fmt::Display for TrainingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Validation: Accuracy={:.3}, Macro-F1={:.3}",
            self.accuracy, self.macro_f1
        )
    }
}

/// Fit a vectorizer and classifier on `dataset` and score the held-out split.
///
/// When the split leaves nothing to validate on (tiny datasets), metrics are
/// computed on the training examples instead.
pub fn train(
    dataset: &Dataset,
    options: &TrainingOptions,
) -> Result<(ModelArtifact, TrainingReport)> {
    options.validate()?;
    if dataset.is_empty() {
        return Err(PipelineError::Dataset("Training set is empty".into()));
    }

    let (train_set, validation_set) = dataset.split_stratified(options.validation_every);
    let distinct = train_set.label_counts().iter().filter(|&&c| c > 0).count();
    if distinct < 2 {
        return Err(PipelineError::Dataset(
            "Training needs examples of at least two labels".into(),
        ));
    }
    info!(
        train = train_set.len(),
        validation = validation_set.len(),
        "Split dataset"
    );

    let texts = train_set.texts();
    let vectorizer = TfIdfVectorizer::fit(texts.as_slice(), &options.vectorizer)?;
    let n_features = vectorizer.n_features();
    let features: Vec<f32> = texts
        .iter()
        .flat_map(|text| vectorizer.transform(text))
        .collect();
    info!(vocabulary = n_features, "Fitted vectorizer");

    let device = Device::Cpu;
    let classifier = logistic::fit(
        features,
        &train_set.labels(),
        n_features,
        &options.logistic,
        &device,
    )?;
    let artifact = ModelArtifact::new(vectorizer, classifier);

    let model = LinearModel::from_artifact(artifact.clone(), &device)?;
    let eval_set = if validation_set.is_empty() {
        &train_set
    } else {
        &validation_set
    };
    let predicted: Vec<Label> = model
        .predict_proba_batch(&eval_set.texts())?
        .iter()
        .map(|p| p.argmax())
        .collect();
    let truth = eval_set.labels();

    let report = TrainingReport {
        train_size: train_set.len(),
        validation_size: validation_set.len(),
        vocabulary_size: n_features,
        accuracy: metrics::accuracy(&truth, &predicted),
        macro_f1: metrics::macro_f1(&truth, &predicted),
    };
    info!(
        accuracy = report.accuracy,
        macro_f1 = report.macro_f1,
        "Training finished"
    );
    Ok((artifact, report))
}
