//! Lazily resolved scoring strategy with a one-way latch.
//!
//! The first scoring call decides, once, whether the pipeline runs on a trained
//! model or on the lexicon fallback. The decision is never revisited: a failed
//! load is not retried and a successful one is never reloaded.

use candle_core::Device;
use once_cell::sync::OnceCell;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::Result;
use crate::loaders::ArtifactLoader;
use crate::models::linear::LinearModel;
use crate::pipelines::sentiment::model::SentimentModel;

/// Which strategy a pipeline is scoring with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyState {
    /// No scoring call has happened yet.
    Uninitialized,
    /// A trained model artifact was loaded.
    ModelLoaded,
    /// Loading failed; the lexicon fallback is in use.
    ModelAbsent,
    /// A caller-supplied model replaced both built-in strategies.
    Custom,
}

impl StrategyState {
    pub fn as_str(self) -> &'static str {
        match self {
            StrategyState::Uninitialized => "uninitialized",
            StrategyState::ModelLoaded => "model",
            StrategyState::ModelAbsent => "fallback",
            StrategyState::Custom => "custom",
        }
    }
}

impl fmt::Display for StrategyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The latched strategy.
#[derive(Clone)]
pub(crate) struct Resolved {
    pub(crate) model: Arc<dyn SentimentModel>,
    pub(crate) state: StrategyState,
}

struct ArtifactSource {
    loader: Arc<dyn ArtifactLoader>,
    path: PathBuf,
    device: Device,
}

/// Per-pipeline strategy cache.
pub(crate) struct StrategyCache {
    cell: OnceCell<Resolved>,
    source: Option<ArtifactSource>,
    fallback: Arc<dyn SentimentModel>,
}

impl StrategyCache {
    /// A cache that will try `loader` on first use and fall back otherwise.
    pub(crate) fn lazy(
        loader: Arc<dyn ArtifactLoader>,
        path: PathBuf,
        device: Device,
        fallback: Arc<dyn SentimentModel>,
    ) -> Self {
        Self {
            cell: OnceCell::new(),
            source: Some(ArtifactSource {
                loader,
                path,
                device,
            }),
            fallback,
        }
    }

    /// A cache already latched to a caller-supplied model.
    pub(crate) fn custom(model: Arc<dyn SentimentModel>) -> Self {
        Self {
            cell: OnceCell::with_value(Resolved {
                model: Arc::clone(&model),
                state: StrategyState::Custom,
            }),
            source: None,
            fallback: model,
        }
    }

    /// Resolve on first call; every later call returns the same strategy.
    pub(crate) fn get(&self) -> &Resolved {
        self.cell.get_or_init(|| self.resolve())
    }

    pub(crate) fn state(&self) -> StrategyState {
        self.cell
            .get()
            .map(|r| r.state)
            .unwrap_or(StrategyState::Uninitialized)
    }

    fn resolve(&self) -> Resolved {
        let Some(source) = &self.source else {
            return self.absent();
        };

        match Self::load(source) {
            Ok(model) => {
                info!(
                    path = %source.path.display(),
                    version = model.version(),
                    "Loaded sentiment model"
                );
                Resolved {
                    model: Arc::new(model),
                    state: StrategyState::ModelLoaded,
                }
            }
            Err(e) => {
                warn!(
                    path = %source.path.display(),
                    error = %e,
                    "Sentiment model unavailable, using lexicon fallback"
                );
                self.absent()
            }
        }
    }

    fn load(source: &ArtifactSource) -> Result<LinearModel> {
        let artifact = source.loader.load(&source.path)?;
        LinearModel::from_artifact(artifact, &source.device)
    }

    fn absent(&self) -> Resolved {
        Resolved {
            model: Arc::clone(&self.fallback),
            state: StrategyState::ModelAbsent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::models::artifact::ModelArtifact;
    use crate::models::lexicon::LexiconModel;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingLoader {
        calls: AtomicUsize,
    }

    impl ArtifactLoader for FailingLoader {
        fn load(&self, _path: &Path) -> Result<ModelArtifact> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(PipelineError::ModelLoad("nope".into()))
        }
    }

    #[test]
    fn failed_load_latches_fallback() {
        let loader = Arc::new(FailingLoader {
            calls: AtomicUsize::new(0),
        });
        let cache = StrategyCache::lazy(
            loader.clone(),
            PathBuf::from("missing.json"),
            Device::Cpu,
            Arc::new(LexiconModel::default()),
        );
        assert_eq!(cache.state(), StrategyState::Uninitialized);

        for _ in 0..5 {
            assert_eq!(cache.get().state, StrategyState::ModelAbsent);
        }
        assert_eq!(cache.state(), StrategyState::ModelAbsent);
        assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.get().model.name(), "lexicon");
    }

    #[test]
    fn custom_is_latched_immediately() {
        let cache = StrategyCache::custom(Arc::new(LexiconModel::default()));
        assert_eq!(cache.state(), StrategyState::Custom);
        assert_eq!(cache.get().state, StrategyState::Custom);
    }

    #[test]
    fn state_strings() {
        assert_eq!(StrategyState::ModelLoaded.to_string(), "model");
        assert_eq!(StrategyState::ModelAbsent.to_string(), "fallback");
    }
}
