//! On-disk model artifact: fitted vectorizer, classifier weights and metadata.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

use super::vectorizer::TfIdfVectorizer;
use crate::error::{PipelineError, Result};
use crate::label::Label;

/// Artifact format version written by this crate.
pub const ARTIFACT_VERSION: &str = "v1";

/// Weights of a multinomial logistic regression, one row per label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearClassifier {
    pub weights: Vec<Vec<f32>>,
    pub bias: Vec<f32>,
}

/// Serialized bundle consumed by [`LinearModel`](super::linear::LinearModel).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub version: String,
    pub labels: Vec<Label>,
    pub vectorizer: TfIdfVectorizer,
    pub classifier: LinearClassifier,
}

impl ModelArtifact {
    pub fn new(vectorizer: TfIdfVectorizer, classifier: LinearClassifier) -> Self {
        Self {
            version: ARTIFACT_VERSION.to_string(),
            labels: Label::ALL.to_vec(),
            vectorizer,
            classifier,
        }
    }

    /// Parse and validate an artifact from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let artifact: ModelArtifact = serde_json::from_str(json)?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Read, parse and validate an artifact file.
    ///
    /// Either the whole artifact is returned or an error; nothing partial.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::ModelLoad(format!(
                "Failed to read model artifact '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_json(&content).map_err(|e| match e {
            PipelineError::Schema(msg) => {
                PipelineError::Schema(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })
    }

    /// Write the artifact as JSON, replacing `path` atomically.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.validate()?;
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => std::path::PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let file_name = path
            .file_name()
            .ok_or_else(|| {
                PipelineError::Unexpected(format!(
                    "Artifact path '{}' has no file name",
                    path.display()
                ))
            })?
            .to_string_lossy();
        let tmp = dir.join(format!(".{file_name}.tmp"));

        {
            let mut file = std::fs::File::create(&tmp)?;
            serde_json::to_writer(&mut file, self)?;
            file.flush()?;
            file.sync_all()?;
        }
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Check version, label order and tensor shapes.
    pub fn validate(&self) -> Result<()> {
        if self.version != ARTIFACT_VERSION {
            return Err(PipelineError::Schema(format!(
                "Unsupported artifact version '{}', expected '{ARTIFACT_VERSION}'",
                self.version
            )));
        }
        if self.labels.as_slice() != Label::ALL.as_slice() {
            return Err(PipelineError::Schema(format!(
                "Artifact labels {:?} do not match expected order [negative, neutral, positive]",
                self.labels
            )));
        }

        self.vectorizer.validate()?;

        let n_features = self.vectorizer.n_features();
        let classifier = &self.classifier;
        if classifier.weights.len() != Label::ALL.len() {
            return Err(PipelineError::Schema(format!(
                "classifier has {} weight rows, expected {}",
                classifier.weights.len(),
                Label::ALL.len()
            )));
        }
        if let Some(row) = classifier.weights.iter().find(|r| r.len() != n_features) {
            return Err(PipelineError::Schema(format!(
                "classifier weight row has {} columns but the vectorizer has {n_features} features",
                row.len()
            )));
        }
        if classifier.bias.len() != Label::ALL.len() {
            return Err(PipelineError::Schema(format!(
                "classifier bias has {} entries, expected {}",
                classifier.bias.len(),
                Label::ALL.len()
            )));
        }
        let finite = classifier
            .weights
            .iter()
            .flatten()
            .chain(&classifier.bias)
            .all(|w| w.is_finite());
        if !finite {
            return Err(PipelineError::Schema(
                "classifier contains non-finite weights".into(),
            ));
        }
        Ok(())
    }
}
