//! Error type shared by every stage of passphrase generation.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PassphraseError {
    #[error("Word file not found: {name} (tried: {})", display_paths(.tried))]
    SourceNotFound { name: String, tried: Vec<PathBuf> },
    #[error("Failed to read word file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Provided arguments result in a zero-length word list")]
    EmptyWordlist,
    #[error("Invalid word length range: min {min}, max {max}")]
    InvalidRange { min: usize, max: usize },
    #[error("Invalid valid-chars pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("Number of words must be at least 1")]
    InvalidWordCount,
    #[error("No words found starting with {0}")]
    NoWordsForLetter(char),
    #[error(
        "System does not support a cryptographically secure random number generator ({0}); \
         set PWD_ALLOW_WEAK_RNG or pass --allow-weak-rng to continue anyway"
    )]
    InsecureRandomUnavailable(String),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, PassphraseError>;
