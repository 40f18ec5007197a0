use std::path::PathBuf;
use std::sync::Arc;

use super::model::SentimentModel;
use super::pipeline::SentimentPipeline;
use crate::config::SentimentConfig;
use crate::error::{PipelineError, Result};
use crate::label::Thresholds;
use crate::loaders::{default_model_path, ArtifactLoader, FileArtifactLoader};
use crate::models::lexicon::{Lexicon, LexiconModel, LexiconOptions};
use crate::pipelines::cache::StrategyCache;
use crate::pipelines::utils::DeviceRequest;

/// Builder for [`SentimentPipeline`].
///
/// `build()` validates settings but never touches the filesystem; the model
/// artifact is loaded lazily on the first scoring call.
///
/// # Examples
///
/// ```rust,no_run
/// # use candle_sentiment::sentiment::SentimentPipelineBuilder;
/// # use candle_sentiment::label::Thresholds;
/// # fn main() -> candle_sentiment::error::Result<()> {
/// let pipeline = SentimentPipelineBuilder::new()
///     .model_path("models/sentiment.json")
///     .thresholds(Thresholds::new(0.2, -0.2)?)
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct SentimentPipelineBuilder {
    model_path: PathBuf,
    thresholds: Thresholds,
    lexicon: Option<Arc<Lexicon>>,
    lexicon_options: LexiconOptions,
    loader: Arc<dyn ArtifactLoader>,
    custom: Option<Arc<dyn SentimentModel>>,
    device_request: DeviceRequest,
}

impl Default for SentimentPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentPipelineBuilder {
    pub fn new() -> Self {
        Self {
            model_path: default_model_path(),
            thresholds: Thresholds::default(),
            lexicon: None,
            lexicon_options: LexiconOptions::default(),
            loader: Arc::new(FileArtifactLoader),
            custom: None,
            device_request: DeviceRequest::default(),
        }
    }

    /// Start from a loaded configuration.
    pub fn from_config(config: &SentimentConfig) -> Self {
        Self::new()
            .model_path(config.model_path.clone())
            .thresholds(config.thresholds)
            .lexicon_options(config.lexicon)
    }

    /// Artifact location handed to the loader.
    pub fn model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = path.into();
        self
    }

    pub fn thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Word lists for the fallback strategy. Defaults to the built-in lexicon.
    pub fn lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = Some(Arc::new(lexicon));
        self
    }

    pub fn lexicon_options(mut self, options: LexiconOptions) -> Self {
        self.lexicon_options = options;
        self
    }

    /// Replace the filesystem loader.
    pub fn loader(mut self, loader: impl ArtifactLoader + 'static) -> Self {
        self.loader = Arc::new(loader);
        self
    }

    /// Score with `model` instead of the trained model or the lexicon.
    pub fn custom(mut self, model: impl SentimentModel + 'static) -> Self {
        self.custom = Some(Arc::new(model));
        self
    }

    /// Run the trained model on CPU (default).
    pub fn cpu(mut self) -> Self {
        self.device_request = DeviceRequest::Cpu;
        self
    }

    /// Run the trained model on a specific CUDA GPU.
    ///
    /// Needs the `cuda` feature; without it `build` returns a device error.
    pub fn cuda(mut self, index: usize) -> Self {
        self.device_request = DeviceRequest::Cuda(index);
        self
    }

    /// Builds the pipeline with configured settings.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] for invalid thresholds or lexicon
    /// options, and [`PipelineError::Device`] if the requested device is
    /// unavailable.
    pub fn build(self) -> Result<SentimentPipeline> {
        self.thresholds.validate()?;
        self.lexicon_options.validate().map_err(|errors| {
            PipelineError::Config(format!(
                "Invalid lexicon options: {}",
                errors.join("; ")
            ))
        })?;

        let strategy = match self.custom {
            Some(model) => StrategyCache::custom(model),
            None => {
                let device = self.device_request.resolve()?;
                let lexicon = self.lexicon.unwrap_or_else(Lexicon::shared);
                let fallback = Arc::new(LexiconModel::new(lexicon, self.lexicon_options));
                StrategyCache::lazy(self.loader, self.model_path, device, fallback)
            }
        };

        Ok(SentimentPipeline {
            thresholds: self.thresholds,
            strategy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipelines::cache::StrategyState;

    #[test]
    fn build_does_not_resolve() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = SentimentPipelineBuilder::new()
            .model_path(dir.path().join("absent.json"))
            .build()
            .unwrap();
        assert_eq!(pipeline.state(), StrategyState::Uninitialized);
    }

    #[test]
    fn invalid_thresholds_fail_build() {
        let result = SentimentPipelineBuilder::new()
            .thresholds(Thresholds {
                positive: -0.2,
                negative: 0.2,
            })
            .build();
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }

    #[test]
    fn invalid_options_fail_build() {
        let result = SentimentPipelineBuilder::new()
            .lexicon_options(LexiconOptions {
                booster: f32::NAN,
                ..LexiconOptions::default()
            })
            .build();
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }

    #[cfg(not(feature = "cuda"))]
    #[test]
    fn cuda_request_fails_at_build_without_feature() {
        let result = SentimentPipelineBuilder::new().cuda(0).build();
        assert!(matches!(result, Err(PipelineError::Device(_))));
    }
}
