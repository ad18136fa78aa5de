/// Bigram Markov model — training, replayable walks, and walk reconstruction.

use rustc_hash::FxHashMap;
use std::fmt;
use std::iter::FusedIterator;
use thiserror::Error;
use tracing::{debug, trace};

use crate::core::distribution::WeightedDistribution;
use crate::core::generator::{GeneratorError, NumberGenerator, RandomNumberGenerator};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkovError {
    #[error("training sequence contains the end marker at position {position}")]
    EndMarkerInSequence { position: usize },
    #[error("the end marker cannot be recorded as a predecessor")]
    EndMarkerAsPredecessor,
    #[error("generator chose index {index} after '{token}', which has only {total} successors")]
    InvalidIndex {
        token: String,
        index: usize,
        total: usize,
    },
    #[error("target walk is empty")]
    EmptyTarget,
    #[error("'{0}' never starts a training sequence")]
    NotAStartToken(String),
    #[error("'{token}' never follows '{from}'")]
    Unreachable { from: String, token: String },
    #[error("generator error: {0}")]
    Generator(#[from] GeneratorError),
}

/// Sentinel recorded after the last token of every training sequence.
pub const END_TOKEN: &str = "<END>";

/// A first-order Markov chain over string tokens.
#[derive(Debug, Clone, Default)]
pub struct SequenceModel {
    /// How often each token opened a training sequence.
    start_tokens: WeightedDistribution<String>,
    /// For every token seen before something else, what came next.
    bigrams: FxHashMap<String, WeightedDistribution<String>>,
}

impl SequenceModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a model by training on each sequence in turn.
    pub fn from_sequences<I, S>(sequences: I) -> Result<Self, MarkovError>
    where
        I: IntoIterator,
        I::Item: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut model = Self::new();
        let mut trained = 0usize;
        for sequence in sequences {
            model.train(sequence.as_ref())?;
            trained += 1;
        }
        debug!(
            sequences = trained,
            tokens = model.bigrams.len(),
            "model built"
        );
        Ok(model)
    }

    /// Add one sequence's observations to the model.
    ///
    /// Records the first token as a start token, every adjacent pair as a
    /// bigram, and a closing bigram from the last token to [`END_TOKEN`].
    /// An empty sequence is a no-op. A sequence containing the end marker
    /// is rejected and leaves the model untouched.
    pub fn train<S: AsRef<str>>(&mut self, sequence: &[S]) -> Result<(), MarkovError> {
        let Some((first, rest)) = sequence.split_first() else {
            return Ok(());
        };
        if let Some(position) = sequence.iter().position(|t| t.as_ref() == END_TOKEN) {
            return Err(MarkovError::EndMarkerInSequence { position });
        }

        let mut prev = first.as_ref();
        self.start_tokens.record(prev.to_string());
        for token in rest {
            let token = token.as_ref();
            self.add_bigram(prev, token);
            prev = token;
        }
        self.add_bigram(prev, END_TOKEN);

        trace!(len = sequence.len(), "trained sequence");
        Ok(())
    }

    /// Record a single `first -> second` observation.
    pub fn record_bigram(&mut self, first: &str, second: &str) -> Result<(), MarkovError> {
        if first == END_TOKEN {
            return Err(MarkovError::EndMarkerAsPredecessor);
        }
        self.add_bigram(first, second);
        Ok(())
    }

    fn add_bigram(&mut self, first: &str, second: &str) {
        match self.bigrams.get_mut(first) {
            Some(dist) => dist.record(second.to_string()),
            None => {
                let mut dist = WeightedDistribution::new();
                dist.record(second.to_string());
                self.bigrams.insert(first.to_string(), dist);
            }
        }
    }

    pub fn start_distribution(&self) -> &WeightedDistribution<String> {
        &self.start_tokens
    }

    /// Successor distribution of `token`, if it was ever followed by anything.
    pub fn successors(&self, token: &str) -> Option<&WeightedDistribution<String>> {
        self.bigrams.get(token)
    }

    /// Tokens with a successor distribution, sorted.
    pub fn tokens(&self) -> Vec<&str> {
        let mut tokens: Vec<&str> = self.bigrams.keys().map(String::as_str).collect();
        tokens.sort_unstable();
        tokens
    }

    /// True when no sequence has been trained, so every walk is empty.
    ///
    /// Bigrams added only through [`record_bigram`](Self::record_bigram) do
    /// not count: without a start token there is nowhere to begin a walk.
    pub fn is_empty(&self) -> bool {
        self.start_tokens.is_empty()
    }

    /// Walk the chain, taking every choice from `generator`.
    pub fn walk<G: NumberGenerator>(&self, generator: G) -> Walk<'_, G> {
        Walk {
            model: self,
            generator,
            state: WalkState::NotStarted,
        }
    }

    /// Walk the chain with an entropy-seeded generator.
    pub fn random_walk(&self) -> Walk<'_, RandomNumberGenerator> {
        self.walk(RandomNumberGenerator::from_entropy())
    }

    /// Run a walk to completion and collect its tokens.
    pub fn generate<G: NumberGenerator>(&self, generator: G) -> Result<Vec<String>, MarkovError> {
        self.walk(generator)
            .map(|token| token.map(str::to_string))
            .collect()
    }

    /// Indices that make a [`ListReplayGenerator`] walk reproduce `tokens`.
    ///
    /// The end marker is appended when `tokens` does not already end with it,
    /// so the result has one more index than there are real tokens.
    ///
    /// [`ListReplayGenerator`]: crate::core::generator::ListReplayGenerator
    pub fn reverse_walk_indices<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> Result<Vec<usize>, MarkovError> {
        let Some((first, rest)) = tokens.split_first() else {
            return Err(MarkovError::EmptyTarget);
        };
        let first = first.as_ref();

        let mut indices = Vec::with_capacity(tokens.len() + 1);
        indices.push(
            self.start_tokens
                .index_of(first)
                .ok_or_else(|| MarkovError::NotAStartToken(first.to_string()))?,
        );

        let mut targets: Vec<&str> = rest.iter().map(|t| t.as_ref()).collect();
        if tokens.last().map(|t| t.as_ref()) != Some(END_TOKEN) {
            targets.push(END_TOKEN);
        }

        let mut prev = first;
        for token in targets {
            let index = self
                .bigrams
                .get(prev)
                .and_then(|dist| dist.index_of(token))
                .ok_or_else(|| MarkovError::Unreachable {
                    from: prev.to_string(),
                    token: token.to_string(),
                })?;
            indices.push(index);
            prev = token;
        }
        Ok(indices)
    }
}

impl fmt::Display for SequenceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "startTokens: {}", self.start_tokens)?;
        writeln!(f, "bigramFrequencies:")?;
        for token in self.tokens() {
            writeln!(f, "\"{}\":\t{}", token, self.bigrams[token])?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkState<'a> {
    NotStarted,
    InProgress(&'a str),
    Exhausted,
}

/// A lazy walk through a [`SequenceModel`].
///
/// Yields tokens until the end marker is chosen or a token has no recorded
/// successors. The end marker itself is never yielded. A bad index from the
/// generator yields a single error and ends the walk.
#[derive(Debug)]
pub struct Walk<'a, G> {
    model: &'a SequenceModel,
    generator: G,
    state: WalkState<'a>,
}

impl<'a, G: NumberGenerator> Walk<'a, G> {
    fn start(&mut self) -> Result<WalkState<'a>, MarkovError> {
        let model = self.model;
        let starts = &model.start_tokens;
        if starts.is_empty() {
            debug!("walk over an empty model");
            return Ok(WalkState::Exhausted);
        }
        let index = self.generator.next(starts.total())?;
        match starts.pick(index) {
            Ok(token) => Ok(WalkState::InProgress(token.as_str())),
            Err(_) => {
                debug!(index, total = starts.total(), "start index out of range");
                Ok(WalkState::Exhausted)
            }
        }
    }

    fn advance(&mut self, current: &'a str) -> Result<WalkState<'a>, MarkovError> {
        let model = self.model;
        let Some(dist) = model.bigrams.get(current) else {
            debug!(token = current, "walk reached a dead end");
            return Ok(WalkState::Exhausted);
        };
        let index = self.generator.next(dist.total())?;
        let next = dist.pick(index).map_err(|_| MarkovError::InvalidIndex {
            token: current.to_string(),
            index,
            total: dist.total(),
        })?;
        if next == END_TOKEN {
            Ok(WalkState::Exhausted)
        } else {
            Ok(WalkState::InProgress(next.as_str()))
        }
    }
}

impl<'a, G: NumberGenerator> Iterator for Walk<'a, G> {
    type Item = Result<&'a str, MarkovError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == WalkState::NotStarted {
            self.state = match self.start() {
                Ok(state) => state,
                Err(e) => {
                    self.state = WalkState::Exhausted;
                    return Some(Err(e));
                }
            };
        }

        let WalkState::InProgress(current) = self.state else {
            return None;
        };
        match self.advance(current) {
            Ok(state) => {
                self.state = state;
                Some(Ok(current))
            }
            Err(e) => {
                self.state = WalkState::Exhausted;
                Some(Err(e))
            }
        }
    }
}

impl<G: NumberGenerator> FusedIterator for Walk<'_, G> {}
