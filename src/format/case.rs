//! Case transforms applied to selected words.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;

use crate::rng::RandomSource;

/// How the case of each word is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaseMethod {
    /// Every word lowercased.
    #[default]
    Lower,
    /// Every word uppercased.
    Upper,
    /// First character of every word uppercased, the rest left alone.
    Capitalize,
    /// Even positions uppercased, odd positions lowercased.
    Alternating,
    /// Each word uppercased or lowercased on a fair coin flip.
    Random,
}

impl CaseMethod {
    /// Every accepted name, aliases included.
    pub const NAMES: [&'static str; 6] =
        ["alternating", "upper", "lower", "random", "first", "capitalize"];
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown case method '{0}' (expected one of: {names})", names = CaseMethod::NAMES.join(", "))]
pub struct ParseCaseError(String);

impl FromStr for CaseMethod {
    type Err = ParseCaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lower" => Ok(CaseMethod::Lower),
            "upper" => Ok(CaseMethod::Upper),
            "first" | "capitalize" => Ok(CaseMethod::Capitalize),
            "alternating" => Ok(CaseMethod::Alternating),
            "random" => Ok(CaseMethod::Random),
            _ => Err(ParseCaseError(s.to_string())),
        }
    }
}

impl fmt::Display for CaseMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CaseMethod::Lower => "lower",
            CaseMethod::Upper => "upper",
            CaseMethod::Capitalize => "capitalize",
            CaseMethod::Alternating => "alternating",
            CaseMethod::Random => "random",
        };
        f.write_str(name)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Coin flip derived from the word alone.
fn seeded_flip(word: &str) -> bool {
    let mut hasher = DefaultHasher::new();
    word.hash(&mut hasher);
    StdRng::seed_from_u64(hasher.finish()).random_bool(0.5)
}

/// Returns `words` with `method` applied.
///
/// With `deterministic` set, the `random` method seeds each coin flip from
/// the word's content so a word always gets the same case. Other methods
/// ignore both `deterministic` and `rng`.
pub fn set_case<R: RandomSource>(
    words: &[String],
    method: CaseMethod,
    deterministic: bool,
    rng: &mut R,
) -> Vec<String> {
    match method {
        CaseMethod::Lower => words.iter().map(|w| w.to_lowercase()).collect(),
        CaseMethod::Upper => words.iter().map(|w| w.to_uppercase()).collect(),
        CaseMethod::Capitalize => words.iter().map(|w| capitalize(w)).collect(),
        CaseMethod::Alternating => words
            .iter()
            .enumerate()
            .map(|(i, w)| {
                if i % 2 == 0 {
                    w.to_uppercase()
                } else {
                    w.to_lowercase()
                }
            })
            .collect(),
        CaseMethod::Random => words
            .iter()
            .map(|w| {
                let lower = w.to_lowercase();
                let upper = if deterministic {
                    seeded_flip(&lower)
                } else {
                    rng.flip()
                };
                if upper { lower.to_uppercase() } else { lower }
            })
            .collect(),
    }
}
