//! Three-way sentiment classification on [Candle](https://github.com/huggingface/candle).
//!
//! Text is scored by a trained TF-IDF + logistic-regression model when one is
//! available, and by a rule-based lexicon otherwise. Either way the score is
//! mapped onto `positive`, `negative` or `neutral` by one threshold policy.
//!
//! ```rust,no_run
//! use candle_sentiment::sentiment::{Label, SentimentPipelineBuilder};
//!
//! # fn main() -> candle_sentiment::error::Result<()> {
//! let pipeline = SentimentPipelineBuilder::new().build()?;
//! assert_eq!(pipeline.analyze("I love pizza!")?, Label::Positive);
//! # Ok(())
//! # }
//! ```

// ============ Internal API ============

pub(crate) mod pipelines;

// ============ Public API ============

pub mod config;
pub mod error;
pub mod label;
pub mod loaders;
pub mod logging;
pub mod models;
pub mod server;
pub mod text;
pub mod training;

pub use error::{PipelineError, Result};
pub use label::{label_from_score, Label, Thresholds};
pub use models::{analyze_fallback, analyze_ml};
pub use pipelines::sentiment;
pub use pipelines::utils::DeviceRequest;
