//! Memorable passphrase generation library
//!
//! This library builds a candidate word set from word-list files, draws
//! words with a cryptographically secure random source (optionally
//! spelling an acrostic), and renders them with a case method and
//! delimiter policy.
//!
//! # Features
//!
//! - `async` (default): Enables channel-based emission with cancellation support
//! - `tracing`: Enables logging via tracing crate
//! - `cli`: Builds the `pwd-passphrase` binary
//!
//! # Environment Variables
//!
//! - `PWD_WORDLIST_DIR`: Directory holding bundled word lists
//!   (default: the `assets/wordlists` directory shipped with this crate)
//! - `PWD_ALLOW_WEAK_RNG`: Allow a weak random generator when the
//!   operating system cannot provide a secure one
//!
//! # Example
//!
//! ```rust,no_run
//! use pwd_passphrase::{build, generate, report, GenerationConfig};
//! use secrecy::ExposeSecret;
//!
//! let words = build(&["common-en"], 5, 9, "[a-z]").expect("Failed to load word list");
//!
//! let config = GenerationConfig {
//!     acrostic: Some("hello".to_string()),
//!     ..GenerationConfig::default()
//! };
//!
//! println!("{}", report(&words, &config).expect("Acrostic not coverable"));
//! let generated = generate(&words, &config).expect("Generation failed");
//! if let Some(warning) = generated.warning() {
//!     eprintln!("{}", warning);
//! }
//! println!("{}", generated.output.expose_secret());
//! ```

mod entropy;
mod error;
mod format;
mod generator;
mod rng;
mod selector;
mod wordlist;

// Public API
pub use entropy::{acrostic_entropy, report, uniform_entropy, EntropyReport};
pub use error::{PassphraseError, Result};
pub use format::{
    format, join, set_case, CaseMethod, DelimiterPolicy, Formatter, ParseCaseError,
    DEFAULT_DELIMITERS,
};
pub use generator::{
    emit_passphrases, generate, render_passphrases, GenerationConfig, Generated,
    PassphraseGenerator, DEFAULT_NUMWORDS,
};
pub use rng::{RandomSource, RngPolicy, SystemRandom, ALLOW_WEAK_RNG_ENV, WEAK_RNG_WARNING};
pub use selector::{fold_letter, LetterPartition, Selector};
pub use wordlist::{
    build, get_wordlist_dir, locate_wordfile, split_sources, wordfile_candidates, LengthBounds,
    WordSet, BUNDLED_WORDLIST_DIR, DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH, DEFAULT_VALID_CHARS,
    DEFAULT_WORDFILE, SYSTEM_WORDFILES, WORDLIST_DIR_ENV,
};

#[cfg(feature = "async")]
pub use generator::emit_passphrases_tx;
