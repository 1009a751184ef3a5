//! Field configuration
//!
//! Hosts that keep per-field settings in config files (YAML) can
//! deserialize a `FieldConfig` and apply it to a `TokenField` in one step.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::buffer::TextBufferMut;
use crate::field::TokenField;
use crate::tokenizer::{SingleCharTokenizer, DEFAULT_SEPARATOR};

/// Configuration for a delimited multi-token field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Separator character between tokens
    #[serde(default = "default_separator")]
    pub separator: char,

    /// Minimum active-token length before suggestions are queried
    #[serde(default = "default_threshold")]
    pub threshold: usize,
}

fn default_separator() -> char {
    DEFAULT_SEPARATOR
}

fn default_threshold() -> usize {
    1
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            threshold: default_threshold(),
        }
    }
}

impl FieldConfig {
    /// Parse a config from YAML
    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse field config")
    }

    /// Load a config file from disk
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read field config at {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Load a config file from disk, or return defaults if missing or
    /// unparseable
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Field config not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Falling back to field config defaults: {:#}", e);
                Self::default()
            }
        }
    }

    /// The tokenizer this config describes
    pub fn tokenizer(&self) -> SingleCharTokenizer {
        SingleCharTokenizer::new(self.separator)
    }

    /// Apply separator and threshold to a field
    pub fn configure<B: TextBufferMut>(&self, field: &mut TokenField<B>) {
        field.set_tokenizer(Some(Box::new(self.tokenizer())));
        field.set_threshold(self.threshold);
    }
}
