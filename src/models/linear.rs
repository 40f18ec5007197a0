use candle_core::{Device, Tensor, D};
use candle_nn::ops::softmax;
use tracing::debug;

use super::artifact::ModelArtifact;
use super::vectorizer::TfIdfVectorizer;
use crate::error::{PipelineError, Result};
use crate::label::Label;
use crate::pipelines::sentiment::model::SentimentModel;
use crate::text::clamp_unit;

/// Class probabilities in [`Label::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelScores {
    pub negative: f32,
    pub neutral: f32,
    pub positive: f32,
}

impl LabelScores {
    fn from_row(row: &[f32]) -> Result<Self> {
        match row {
            [negative, neutral, positive] => Ok(Self {
                negative: *negative,
                neutral: *neutral,
                positive: *positive,
            }),
            _ => Err(PipelineError::Unexpected(format!(
                "Expected 3 class probabilities, got {}",
                row.len()
            ))),
        }
    }

    pub fn get(&self, label: Label) -> f32 {
        match label {
            Label::Negative => self.negative,
            Label::Neutral => self.neutral,
            Label::Positive => self.positive,
        }
    }

    /// Signed polarity: `P(positive) - P(negative)`, clamped to `[-1, 1]`.
    ///
    /// Zero for a uniform distribution, approaching ±1 at full confidence.
    pub fn polarity(&self) -> f32 {
        clamp_unit(self.positive - self.negative)
    }

    /// The most probable label. Informational only; pipelines label by polarity.
    pub fn argmax(&self) -> Label {
        Label::ALL
            .into_iter()
            .fold(Label::Negative, |best, l| {
                if self.get(l) > self.get(best) {
                    l
                } else {
                    best
                }
            })
    }
}

/// TF-IDF features fed through a softmax classifier.
#[derive(Debug, Clone)]
pub struct LinearModel {
    version: String,
    vectorizer: TfIdfVectorizer,
    // (n_features, n_labels), contiguous
    weight_t: Tensor,
    bias: Tensor,
    device: Device,
}

impl LinearModel {
    /// Materialize a validated artifact on `device`.
    pub fn from_artifact(artifact: ModelArtifact, device: &Device) -> Result<Self> {
        artifact.validate()?;
        let n_features = artifact.vectorizer.n_features();
        let n_labels = Label::ALL.len();

        let flat: Vec<f32> = artifact.classifier.weights.into_iter().flatten().collect();
        let weight_t = Tensor::from_vec(flat, (n_labels, n_features), device)?
            .t()?
            .contiguous()?;
        let bias = Tensor::from_vec(artifact.classifier.bias, n_labels, device)?;

        Ok(Self {
            version: artifact.version,
            vectorizer: artifact.vectorizer,
            weight_t,
            bias,
            device: device.clone(),
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn predict_proba(&self, text: &str) -> Result<LabelScores> {
        self.predict_proba_batch(&[text])?
            .pop()
            .ok_or_else(|| PipelineError::Unexpected("No probabilities returned".into()))
    }

    /// Vectorize every text, then run one batched forward pass.
    pub fn predict_proba_batch(&self, texts: &[&str]) -> Result<Vec<LabelScores>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }
        let n_features = self.vectorizer.n_features();
        let features: Vec<f32> = texts
            .iter()
            .flat_map(|text| self.vectorizer.transform(text))
            .collect();

        let x = Tensor::from_vec(features, (texts.len(), n_features), &self.device)?;
        let logits = x.matmul(&self.weight_t)?.broadcast_add(&self.bias)?;
        let probs = softmax(&logits, D::Minus1)?.to_vec2::<f32>()?;

        probs.iter().map(|row| LabelScores::from_row(row)).collect()
    }
}

/// Score `text` with a loaded model: `P(positive) - P(negative)`.
pub fn analyze_ml(model: &LinearModel, text: &str) -> Result<f32> {
    let probs = model.predict_proba(text)?;
    debug!(?probs, "linear model probabilities");
    Ok(probs.polarity())
}

impl SentimentModel for LinearModel {
    fn name(&self) -> &str {
        "linear"
    }

    fn score(&self, text: &str) -> Result<f32> {
        analyze_ml(self, text)
    }

    fn score_batch(&self, texts: &[&str]) -> Result<Vec<Result<f32>>> {
        Ok(self
            .predict_proba_batch(texts)?
            .into_iter()
            .map(|p| Ok(p.polarity()))
            .collect())
    }
}
