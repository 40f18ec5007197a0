//! Model artifact loading.
//!
//! Pipelines never read artifacts themselves; they go through an
//! [`ArtifactLoader`]. The default [`FileArtifactLoader`] reads a JSON artifact
//! from disk, and tests or embedders can substitute their own source.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::artifact::ModelArtifact;

/// Default artifact location, relative to the working directory.
pub const DEFAULT_MODEL_PATH: &str = "models/sentiment.json";

/// Source of model artifacts.
///
/// A pipeline calls `load` at most once, on its first scoring call.
pub trait ArtifactLoader: Send + Sync {
    /// Load and validate the artifact at `path`.
    fn load(&self, path: &Path) -> Result<ModelArtifact>;
}

/// Reads artifacts from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileArtifactLoader;

impl ArtifactLoader for FileArtifactLoader {
    fn load(&self, path: &Path) -> Result<ModelArtifact> {
        ModelArtifact::load(path)
    }
}

pub(crate) fn default_model_path() -> PathBuf {
    PathBuf::from(DEFAULT_MODEL_PATH)
}
