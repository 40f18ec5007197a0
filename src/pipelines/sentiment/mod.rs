//! Sentiment analysis pipeline.
//!
//! Classify text as `positive`, `negative`, or `neutral`. Scores come from a
//! trained TF-IDF/logistic-regression model when its artifact can be loaded,
//! and from a rule-based lexicon otherwise. Both are mapped onto labels by the
//! same thresholds.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use candle_sentiment::sentiment::SentimentPipelineBuilder;
//!
//! # fn main() -> candle_sentiment::error::Result<()> {
//! let pipeline = SentimentPipelineBuilder::new().build()?;
//!
//! let output = pipeline.run("I absolutely love this product!")?;
//! println!("sentiment: {} (score: {:.3})", output.prediction.label, output.prediction.score);
//! # Ok(())
//! # }
//! ```
//!
//! # Batch Inference
//!
//! ```rust,no_run
//! # use candle_sentiment::sentiment::SentimentPipelineBuilder;
//! # fn main() -> candle_sentiment::error::Result<()> {
//! # let pipeline = SentimentPipelineBuilder::new().build()?;
//! let reviews = &[
//!     "Best purchase I've ever made!",
//!     "Terrible quality, very disappointed.",
//!     "It's okay, nothing special.",
//! ];
//!
//! let output = pipeline.run(reviews)?;
//!
//! for r in output.results {
//!     let p = r.prediction?;
//!     println!("{}: {} ({:.3})", r.text, p.label, p.score);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Custom strategies
//!
//! Any [`SentimentModel`] can replace both built-in strategies through
//! [`SentimentPipelineBuilder::custom`].

pub(crate) mod builder;
pub(crate) mod model;
pub(crate) mod pipeline;

pub use crate::label::{Label, Thresholds};
pub use crate::pipelines::cache::StrategyState;
pub use crate::pipelines::stats::PipelineStats;
pub use builder::SentimentPipelineBuilder;
pub use model::SentimentModel;
pub use pipeline::{BatchOutput, BatchResult, Output, Prediction, SentimentPipeline};

#[doc(hidden)]
pub use pipeline::SentimentInput;
