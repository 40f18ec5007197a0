use crate::error::Result;

/// The scoring contract shared by every strategy.
///
/// Implementations turn text into a polarity score in `[-1, 1]`. Labels are
/// never produced here; the pipeline applies its thresholds to the score so
/// every strategy is judged by the same policy.
pub trait SentimentModel: Send + Sync {
    /// Short identifier used in logs and health output.
    fn name(&self) -> &str;

    fn score(&self, text: &str) -> Result<f32>;

    /// Score a batch of inputs, returning one result per item.
    fn score_batch(&self, texts: &[&str]) -> Result<Vec<Result<f32>>> {
        Ok(texts.iter().map(|text| self.score(text)).collect())
    }
}
