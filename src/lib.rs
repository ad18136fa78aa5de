//! Babble Engine — bigram Markov chains over short token sequences.
//!
//! Trains a first-order model from tweet-like text and generates new
//! sequences by weighted random walks. Every walk is driven by an index
//! source, so any output can be replayed exactly from its index list.

pub mod config;
pub mod core;
pub mod text;

pub use crate::core::distribution::WeightedDistribution;
pub use crate::core::generator::{ListReplayGenerator, NumberGenerator, RandomNumberGenerator};
pub use crate::core::markov::{SequenceModel, Walk, END_TOKEN};
