/// The babble pipeline: training data → model → filtered, formatted output.
///
/// Wires together corpus loading, model training, seeded walks, and the
/// retry loop that discards walks which are too short.

use std::io::BufRead;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{BabbleConfig, ConfigError};
use crate::core::generator::RandomNumberGenerator;
use crate::core::markov::{MarkovError, SequenceModel};
use crate::text::files::open_reader;
use crate::text::tweet::csv_to_training_data;
use crate::text::TextError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("markov error: {0}")]
    Markov(#[from] MarkovError),
    #[error("text error: {0}")]
    Text(#[from] TextError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("no training data: the model is empty")]
    EmptyModel,
    #[error("generation failed after {0} attempts")]
    GenerationFailed(usize),
}

/// A trained model plus the generator and limits used to sample it.
/// Built via `Babbler::builder()`.
#[derive(Debug)]
pub struct Babbler {
    model: SequenceModel,
    generator: RandomNumberGenerator,
    min_words: usize,
    max_attempts: usize,
}

/// Builder for constructing a `Babbler`.
#[derive(Debug, Default)]
pub struct BabblerBuilder {
    model: Option<SequenceModel>,
    sequences: Vec<Vec<String>>,
    seed: Option<u64>,
    min_words: Option<usize>,
    max_attempts: Option<usize>,
}

impl Babbler {
    pub fn builder() -> BabblerBuilder {
        BabblerBuilder::default()
    }

    pub fn model(&self) -> &SequenceModel {
        &self.model
    }

    /// One walk with at least `min_words` tokens.
    pub fn babble(&mut self) -> Result<Vec<String>, PipelineError> {
        for attempt in 1..=self.max_attempts {
            let words = self.model.generate(&mut self.generator)?;
            if words.len() >= self.min_words {
                debug!(attempt, len = words.len(), "accepted walk");
                return Ok(words);
            }
        }
        warn!(
            attempts = self.max_attempts,
            min_words = self.min_words,
            "no walk was long enough"
        );
        Err(PipelineError::GenerationFailed(self.max_attempts))
    }

    /// `count` walks, each rendered as a sentence.
    pub fn babble_sentences(&mut self, count: usize) -> Result<Vec<String>, PipelineError> {
        (0..count)
            .map(|_| self.babble().map(|words| format_sentence(&words)))
            .collect()
    }
}

impl BabblerBuilder {
    /// Start from an already trained model.
    pub fn with_model(mut self, model: SequenceModel) -> Self {
        self.model = Some(model);
        self
    }

    /// Extra sequences to train on at build time.
    pub fn with_sequences(mut self, sequences: Vec<Vec<String>>) -> Self {
        self.sequences.extend(sequences);
        self
    }

    /// Parse CSV tweet data from `reader` into training sequences.
    pub fn with_csv<R: BufRead>(mut self, reader: R, column: usize) -> Result<Self, PipelineError> {
        let sequences = csv_to_training_data(reader, column)?;
        info!(sequences = sequences.len(), column, "parsed training data");
        self.sequences.extend(sequences);
        Ok(self)
    }

    /// Read CSV tweet data from a file.
    pub fn with_csv_file(self, path: &Path, column: usize) -> Result<Self, PipelineError> {
        let reader = open_reader(path)?;
        self.with_csv(reader, column)
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn min_words(mut self, min_words: usize) -> Self {
        self.min_words = Some(min_words);
        self
    }

    pub fn max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Take seed and limits from a config, keeping values already set.
    pub fn config(mut self, config: &BabbleConfig) -> Self {
        self.seed = self.seed.or(config.seed);
        self.min_words = self.min_words.or(Some(config.min_words));
        self.max_attempts = self.max_attempts.or(Some(config.max_attempts));
        self
    }

    pub fn build(self) -> Result<Babbler, PipelineError> {
        let defaults = BabbleConfig::default();
        let mut model = self.model.unwrap_or_default();
        for sequence in &self.sequences {
            model.train(sequence)?;
        }
        if model.is_empty() {
            return Err(PipelineError::EmptyModel);
        }

        let generator = match self.seed {
            Some(seed) => RandomNumberGenerator::seeded(seed),
            None => RandomNumberGenerator::from_entropy(),
        };
        let max_attempts = self.max_attempts.unwrap_or(defaults.max_attempts);
        if max_attempts == 0 {
            return Err(ConfigError::Invalid("max_attempts must be at least 1".to_string()).into());
        }

        info!(
            start_tokens = model.start_distribution().total(),
            tokens = model.tokens().len(),
            "model ready"
        );
        Ok(Babbler {
            model,
            generator,
            min_words: self.min_words.unwrap_or(defaults.min_words),
            max_attempts,
        })
    }
}

/// Join words with spaces and close with a period.
pub fn format_sentence<S: AsRef<str>>(words: &[S]) -> String {
    let mut sentence = words
        .iter()
        .map(|w| w.as_ref())
        .collect::<Vec<_>>()
        .join(" ");
    sentence.push('.');
    sentence
}
