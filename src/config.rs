/// Run configuration for the `babble` tool, loaded from RON.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// How to read the corpus and how much to generate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BabbleConfig {
    /// Zero-indexed CSV column holding the tweet text.
    pub column: usize,
    /// Number of sequences to generate.
    pub count: usize,
    /// PRNG seed; entropy when absent.
    pub seed: Option<u64>,
    /// Walks shorter than this are discarded and retried.
    pub min_words: usize,
    /// Retry budget per generated sequence.
    pub max_attempts: usize,
}

impl Default for BabbleConfig {
    fn default() -> Self {
        Self {
            column: 1,
            count: 10,
            seed: None,
            min_words: 1,
            max_attempts: 100,
        }
    }
}

impl BabbleConfig {
    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        let config: BabbleConfig = ron::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_ron(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
