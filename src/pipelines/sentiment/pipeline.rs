use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::label::{label_from_score, Label, Thresholds};
use crate::pipelines::cache::{StrategyCache, StrategyState};
use crate::pipelines::stats::PipelineStats;

// ============ Output types ============

/// A sentiment prediction: the label and the score it was derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Label after applying the pipeline thresholds.
    pub label: Label,
    /// Polarity score, `-1.0` (negative) to `1.0` (positive).
    pub score: f32,
}

/// Single-text output from `run()`.
#[derive(Debug)]
pub struct Output {
    /// Sentiment prediction.
    pub prediction: Prediction,
    /// Execution statistics.
    pub stats: PipelineStats,
}

/// Single result in batch output.
#[derive(Debug)]
pub struct BatchResult {
    /// Input text.
    pub text: String,
    /// Prediction or error for this input.
    pub prediction: Result<Prediction>,
}

/// Batch output from `run()`.
#[derive(Debug)]
pub struct BatchOutput {
    /// Results for each input.
    pub results: Vec<BatchResult>,
    /// Execution statistics.
    pub stats: PipelineStats,
}

// ============ Input trait for type-based dispatch ============

#[doc(hidden)]
pub trait SentimentInput<'a> {
    /// Output type for `.run()`.
    type Output;

    #[doc(hidden)]
    fn into_texts(self) -> Vec<&'a str>;
    #[doc(hidden)]
    fn convert_output(
        texts: Vec<&'a str>,
        predictions: Vec<Result<Prediction>>,
        stats: PipelineStats,
    ) -> Result<Self::Output>;
}

impl<'a> SentimentInput<'a> for &'a str {
    type Output = Output;

    fn into_texts(self) -> Vec<&'a str> {
        vec![self]
    }

    fn convert_output(
        _texts: Vec<&'a str>,
        mut predictions: Vec<Result<Prediction>>,
        stats: PipelineStats,
    ) -> Result<Self::Output> {
        let prediction = predictions
            .pop()
            .ok_or_else(|| PipelineError::Unexpected("No predictions returned".into()))??;
        Ok(Output { prediction, stats })
    }
}

impl<'a> SentimentInput<'a> for &'a [&'a str] {
    type Output = BatchOutput;

    fn into_texts(self) -> Vec<&'a str> {
        self.to_vec()
    }

    fn convert_output(
        texts: Vec<&'a str>,
        predictions: Vec<Result<Prediction>>,
        stats: PipelineStats,
    ) -> Result<Self::Output> {
        Ok(batch_output(texts, predictions, stats))
    }
}

impl<'a, const N: usize> SentimentInput<'a> for &'a [&'a str; N] {
    type Output = BatchOutput;

    fn into_texts(self) -> Vec<&'a str> {
        self.as_slice().to_vec()
    }

    fn convert_output(
        texts: Vec<&'a str>,
        predictions: Vec<Result<Prediction>>,
        stats: PipelineStats,
    ) -> Result<Self::Output> {
        Ok(batch_output(texts, predictions, stats))
    }
}

fn batch_output(
    texts: Vec<&str>,
    predictions: Vec<Result<Prediction>>,
    stats: PipelineStats,
) -> BatchOutput {
    let results = texts
        .into_iter()
        .zip(predictions)
        .map(|(text, prediction)| BatchResult {
            text: text.to_string(),
            prediction,
        })
        .collect();
    BatchOutput { results, stats }
}

// ============ Pipeline ============

/// Classifies text sentiment (positive, negative, neutral).
///
/// Construct with [`SentimentPipelineBuilder`](super::SentimentPipelineBuilder).
/// The scoring strategy is chosen on the first call and then fixed for the
/// lifetime of the pipeline; see [`state`](Self::state).
///
/// # Examples
///
/// ```rust,no_run
/// # use candle_sentiment::sentiment::SentimentPipelineBuilder;
/// # fn main() -> candle_sentiment::error::Result<()> {
/// let pipeline = SentimentPipelineBuilder::new().build()?;
///
/// println!("{}", pipeline.analyze("I love this product!")?);
///
/// // Batch - results include input text
/// let output = pipeline.run(&["Great!", "Terrible."])?;
/// for r in output.results {
///     println!("{} → {}", r.text, r.prediction?.label);
/// }
/// # Ok(())
/// # }
/// ```
pub struct SentimentPipeline {
    pub(crate) thresholds: Thresholds,
    pub(crate) strategy: StrategyCache,
}

impl SentimentPipeline {
    /// Classify `text`.
    pub fn analyze(&self, text: &str) -> Result<Label> {
        let score = self.analyze_score(text)?;
        Ok(label_from_score(score, &self.thresholds))
    }

    /// Polarity score of `text` from the active strategy.
    pub fn analyze_score(&self, text: &str) -> Result<f32> {
        let resolved = self.strategy.get();
        let score = resolved.model.score(text)?;
        debug!(strategy = %resolved.state, score, "Scored text");
        Ok(score)
    }

    /// Analyze text sentiment.
    ///
    /// Single input → [`Output`], batch → [`BatchOutput`].
    pub fn run<'a, I: SentimentInput<'a>>(&self, input: I) -> Result<I::Output> {
        let stats_builder = PipelineStats::start();
        let texts = input.into_texts();
        let item_count = texts.len();

        let resolved = self.strategy.get();
        let scores = resolved.model.score_batch(&texts)?;
        if scores.len() != item_count {
            return Err(PipelineError::Unexpected(format!(
                "Model '{}' returned {} scores for {item_count} texts",
                resolved.model.name(),
                scores.len()
            )));
        }

        let predictions: Vec<Result<Prediction>> = scores
            .into_iter()
            .map(|result| {
                result.map(|score| Prediction {
                    label: label_from_score(score, &self.thresholds),
                    score,
                })
            })
            .collect();

        I::convert_output(
            texts,
            predictions,
            stats_builder.finish(item_count, resolved.state),
        )
    }

    /// Active strategy, or [`StrategyState::Uninitialized`] before the first call.
    pub fn state(&self) -> StrategyState {
        self.strategy.state()
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }
}
