//! Word list management module
//!
//! Locates word files, filters their lines by length and character
//! pattern, and collects the survivors into a deduplicated [`WordSet`].

use regex::Regex;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::{PassphraseError, Result};

/// Environment variable overriding the bundled word list directory.
pub const WORDLIST_DIR_ENV: &str = "PWD_WORDLIST_DIR";

/// Bundled list used when no source is named.
pub const DEFAULT_WORDFILE: &str = "common-en";

/// Word lists shipped with the crate, independent of the working directory.
pub const BUNDLED_WORDLIST_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/wordlists");

/// System dictionaries tried, in order, after the bundled default.
pub const SYSTEM_WORDFILES: [&str; 4] = [
    "/usr/share/cracklib/cracklib-small",
    "/usr/share/dict/cracklib-small",
    "/usr/dict/words",
    "/usr/share/dict/words",
];

pub const DEFAULT_MIN_LENGTH: usize = 5;
pub const DEFAULT_MAX_LENGTH: usize = 9;
pub const DEFAULT_VALID_CHARS: &str = ".";

/// Deduplicated candidate words.
///
/// Members are kept sorted so that indexing is stable for a given input;
/// equality is plain set membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSet {
    words: Vec<String>,
}

impl WordSet {
    /// Builds a set from arbitrary words, dropping duplicates and blanks.
    /// No length or pattern filtering is applied.
    ///
    /// Returns [`PassphraseError::EmptyWordlist`] if nothing remains.
    #[cfg(test)]
    pub(crate) fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = words
            .into_iter()
            .map(Into::into)
            .filter(|w| !w.is_empty())
            .collect();
        Self::from_set(set)
    }

    fn from_set(set: BTreeSet<String>) -> Result<Self> {
        if set.is_empty() {
            return Err(PassphraseError::EmptyWordlist);
        }
        Ok(Self {
            words: set.into_iter().collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words
            .binary_search_by(|w| w.as_str().cmp(word))
            .is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub(crate) fn get(&self, index: usize) -> &str {
        &self.words[index]
    }
}

/// Inclusive word length bounds, counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    min: usize,
    max: usize,
}

impl LengthBounds {
    /// Validates and reconciles a length range.
    ///
    /// An inverted range raises `max` to `min`, keeping the stricter bound.
    /// A zero `min` is rejected since empty words never match.
    pub fn new(min: usize, max: usize) -> Result<Self> {
        if min == 0 {
            return Err(PassphraseError::InvalidRange { min, max });
        }
        if min > max {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                "Maximum word length ({}) less than minimum ({}). Setting maximum equal to minimum.",
                max,
                min
            );
            return Ok(Self { min, max: min });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }
}

/// Compiles the whole-word matcher `^(?:valid_chars){min,max}$`.
pub fn word_matcher(valid_chars: &str, bounds: LengthBounds) -> Result<Regex> {
    let pattern = format!("^(?:{}){{{},{}}}$", valid_chars, bounds.min, bounds.max);
    Ok(Regex::new(&pattern)?)
}

/// Returns the bundled word list directory.
///
/// Priority:
/// 1. Environment variable `PWD_WORDLIST_DIR`
/// 2. [`BUNDLED_WORDLIST_DIR`]
pub fn get_wordlist_dir() -> PathBuf {
    std::env::var(WORDLIST_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(BUNDLED_WORDLIST_DIR))
}

/// Expands a leading `~` to the current user's home directory.
fn expand_home(name: &str) -> PathBuf {
    if name == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = name.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(name)
}

/// Ordered list of paths tried for a word file.
///
/// For a named file:
/// 1. `<wordlist dir>/<name>`
/// 2. `<name>` with `~` expanded
///
/// With no name:
/// 1. `<wordlist dir>/common-en`
/// 2. the [`SYSTEM_WORDFILES`], in order
pub fn wordfile_candidates(name: Option<&str>) -> Vec<PathBuf> {
    let dir = get_wordlist_dir();
    match name {
        Some(name) => vec![dir.join(name), expand_home(name)],
        None => std::iter::once(dir.join(DEFAULT_WORDFILE))
            .chain(SYSTEM_WORDFILES.iter().map(PathBuf::from))
            .collect(),
    }
}

/// Resolves a word file, first existing regular file wins.
///
/// # Errors
///
/// [`PassphraseError::SourceNotFound`] with every path tried.
pub fn locate_wordfile(name: Option<&str>) -> Result<PathBuf> {
    let tried = wordfile_candidates(name);
    if let Some(found) = tried.iter().find(|p| p.is_file()) {
        #[cfg(feature = "tracing")]
        tracing::debug!("Resolved word file {:?} to {:?}", name, found);
        return Ok(found.clone());
    }

    #[cfg(feature = "tracing")]
    tracing::error!("Word file not found: {:?}", name);
    Err(PassphraseError::SourceNotFound {
        name: name.unwrap_or(DEFAULT_WORDFILE).to_string(),
        tried,
    })
}

/// Adds every matching trimmed line of `path` to `words`.
fn collect_matching(path: &Path, matcher: &Regex, words: &mut BTreeSet<String>) -> Result<usize> {
    let content = std::fs::read_to_string(path).map_err(|source| PassphraseError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let before = words.len();
    words.extend(
        content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && matcher.is_match(l))
            .map(str::to_owned),
    );
    Ok(words.len() - before)
}

/// Builds the candidate word set from one or more sources.
///
/// An empty `sources` slice uses the default resolution chain. Each source
/// name is resolved with [`locate_wordfile`]; the results are unioned.
///
/// # Errors
///
/// Returns error if:
/// - a named source cannot be located
/// - a file cannot be read
/// - the bounds or pattern are invalid
/// - no word survives the filters
pub fn build<S: AsRef<str>>(
    sources: &[S],
    min_length: usize,
    max_length: usize,
    valid_chars: &str,
) -> Result<WordSet> {
    let bounds = LengthBounds::new(min_length, max_length)?;
    let matcher = word_matcher(valid_chars, bounds)?;

    let paths = if sources.is_empty() {
        vec![locate_wordfile(None)?]
    } else {
        sources
            .iter()
            .map(|s| locate_wordfile(Some(s.as_ref())))
            .collect::<Result<Vec<_>>>()?
    };

    let mut words = BTreeSet::new();
    for path in &paths {
        let _added = collect_matching(path, &matcher, &mut words)?;
        #[cfg(feature = "tracing")]
        tracing::info!("Word list: {} new words from {:?}", _added, path);
    }

    if words.is_empty() {
        #[cfg(feature = "tracing")]
        tracing::error!("Word list is empty after filtering {} source(s)", paths.len());
        return Err(PassphraseError::EmptyWordlist);
    }

    WordSet::from_set(words)
}

/// Splits a comma-separated source list, skipping empty entries.
pub fn split_sources(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}
