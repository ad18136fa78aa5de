//! Text pipeline — turns raw CSV tweet dumps into token sequences and
//! writes generated output back out.

pub mod files;
pub mod tweet;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),
    #[error("expected a file but found a directory: {0}")]
    IsDirectory(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
