//! TOML configuration.
//!
//! Every field is optional; omitted values take their defaults. A loaded
//! config is always validated, and validation reports every violation at once
//! so a bad file can be fixed in one pass.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, Result};
use crate::label::Thresholds;
use crate::loaders::default_model_path;
use crate::models::lexicon::LexiconOptions;

/// HTTP adapter settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Top-level configuration.
///
/// ```toml
/// model_path = "models/sentiment.json"
///
/// [thresholds]
/// positive = 0.10
/// negative = -0.10
///
/// [lexicon]
/// booster = 1.5
///
/// [server]
/// port = 8000
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SentimentConfig {
    /// Location of the trained model artifact.
    pub model_path: PathBuf,
    pub thresholds: Thresholds,
    pub lexicon: LexiconOptions,
    pub server: ServerConfig,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            thresholds: Thresholds::default(),
            lexicon: LexiconOptions::default(),
            server: ServerConfig::default(),
        }
    }
}

impl SentimentConfig {
    /// Read, parse and validate a TOML file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!(
                "Failed to read configuration '{}': {e}",
                path.display()
            ))
        })?;
        Self::load_from_str(&content).map_err(|e| match e {
            PipelineError::Config(msg) => {
                PipelineError::Config(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Parse and validate TOML content.
    pub fn load_from_str(content: &str) -> Result<Self> {
        let config: SentimentConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field, reporting all violations together.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.model_path.as_os_str().is_empty() {
            errors.push("model_path must not be empty".to_string());
        }
        if let Err(e) = self.thresholds.validate() {
            errors.push(e.to_string());
        }
        if let Err(lexicon_errors) = self.lexicon.validate() {
            errors.extend(lexicon_errors);
        }
        if self.server.host.trim().is_empty() {
            errors.push("server.host must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PipelineError::Config(format!(
                "Invalid configuration: {}",
                errors.join("; ")
            )))
        }
    }
}
