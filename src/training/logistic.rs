//! Multinomial logistic regression fitted with candle autograd.

use candle_core::{DType, Device, Tensor, Var, D};
use candle_nn::{AdamW, Optimizer, ParamsAdamW};
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::label::Label;
use crate::models::artifact::LinearClassifier;

/// Optimizer settings for [`fit`].
#[derive(Debug, Clone, Copy)]
pub struct LogisticOptions {
    pub epochs: usize,
    pub learning_rate: f64,
    pub weight_decay: f64,
}

impl Default for LogisticOptions {
    fn default() -> Self {
        Self {
            epochs: 300,
            learning_rate: 0.1,
            weight_decay: 1e-4,
        }
    }
}

/// Per-sample weights that give every present label the same total weight.
fn balanced_weights(labels: &[Label]) -> Vec<f32> {
    let mut counts = [0usize; 3];
    for l in labels {
        counts[l.index()] += 1;
    }
    let present = counts.iter().filter(|&&c| c > 0).count().max(1);
    let n = labels.len() as f32;
    labels
        .iter()
        .map(|l| n / (present as f32 * counts[l.index()] as f32))
        .collect()
}

/// Fit weights on row-major `features` (`labels.len()` rows of `n_features`).
///
/// Full-batch AdamW on class-balanced negative log-likelihood, starting from
/// zero weights so the result is deterministic.
pub fn fit(
    features: Vec<f32>,
    labels: &[Label],
    n_features: usize,
    options: &LogisticOptions,
    device: &Device,
) -> Result<LinearClassifier> {
    let n_rows = labels.len();
    if n_rows == 0 || n_features == 0 {
        return Err(PipelineError::Training(
            "Cannot fit a classifier without samples or features".into(),
        ));
    }
    if features.len() != n_rows * n_features {
        return Err(PipelineError::Training(format!(
            "Feature matrix has {} values, expected {n_rows} x {n_features}",
            features.len()
        )));
    }
    let n_labels = Label::ALL.len();

    let x = Tensor::from_vec(features, (n_rows, n_features), device)?;
    let targets: Vec<u32> = labels.iter().map(|l| l.index() as u32).collect();
    let y = Tensor::from_vec(targets, (n_rows, 1), device)?;
    let sample_weights = balanced_weights(labels);
    let weight_sum: f32 = sample_weights.iter().sum();
    let sample_weights = Tensor::from_vec(sample_weights, n_rows, device)?;

    let w = Var::zeros((n_features, n_labels), DType::F32, device)?;
    let b = Var::zeros(n_labels, DType::F32, device)?;
    let params = ParamsAdamW {
        lr: options.learning_rate,
        weight_decay: options.weight_decay,
        ..Default::default()
    };
    let mut optimizer = AdamW::new(vec![w.clone(), b.clone()], params)?;

    for epoch in 0..options.epochs {
        let logits = x.matmul(w.as_tensor())?.broadcast_add(b.as_tensor())?;
        let log_probs = candle_nn::ops::log_softmax(&logits, D::Minus1)?;
        let picked = log_probs.gather(&y, 1)?.squeeze(1)?;
        let loss = (picked * &sample_weights)?
            .sum_all()?
            .affine(-1.0 / weight_sum as f64, 0.0)?;

        optimizer.backward_step(&loss)?;

        if epoch % 50 == 0 || epoch + 1 == options.epochs {
            let value = loss.to_scalar::<f32>()?;
            if !value.is_finite() {
                return Err(PipelineError::Training(format!(
                    "Loss diverged at epoch {epoch}"
                )));
            }
            debug!(epoch, loss = value, "Logistic regression step");
        }
    }

    let weights = w.as_tensor().t()?.contiguous()?.to_vec2::<f32>()?;
    let bias = b.as_tensor().to_vec1::<f32>()?;
    Ok(LinearClassifier { weights, bias })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_weights_equalize_classes() {
        let labels = [Label::Positive, Label::Positive, Label::Positive, Label::Negative];
        let w = balanced_weights(&labels);
        let pos: f32 = w[..3].iter().sum();
        assert!((pos - w[3]).abs() < 1e-6);
    }

    #[test]
    fn separates_linearly_separable_data() {
        // feature 0 marks negative, 1 neutral, 2 positive
        let features = vec![
            1.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, //
            0.0, 0.0, 1.0, //
            1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0,
        ];
        let labels = [
            Label::Negative,
            Label::Neutral,
            Label::Positive,
            Label::Negative,
            Label::Positive,
        ];
        let options = LogisticOptions {
            epochs: 200,
            ..LogisticOptions::default()
        };
        let clf = fit(features, &labels, 3, &options, &Device::Cpu).unwrap();
        assert_eq!(clf.weights.len(), 3);
        assert_eq!(clf.bias.len(), 3);
        for (feature, label) in [(0, Label::Negative), (1, Label::Neutral), (2, Label::Positive)] {
            let best = (0..3)
                .max_by(|&a, &c| {
                    let sa = clf.weights[a][feature] + clf.bias[a];
                    let sc = clf.weights[c][feature] + clf.bias[c];
                    sa.total_cmp(&sc)
                })
                .unwrap();
            assert_eq!(best, label.index());
        }
    }

    #[test]
    fn rejects_shape_mismatch() {
        let err = fit(
            vec![1.0; 5],
            &[Label::Positive; 2],
            3,
            &LogisticOptions::default(),
            &Device::Cpu,
        );
        assert!(matches!(err, Err(PipelineError::Training(_))));
    }
}
