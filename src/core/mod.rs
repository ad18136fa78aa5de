pub mod distribution;
pub mod generator;
pub mod markov;
pub mod pipeline;
