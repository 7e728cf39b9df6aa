//! Passphrase rendering
//!
//! Each submodule handles one step of turning selected words into the
//! final string: case transform first, then delimiter join.

mod case;
mod delimiter;

pub use case::{set_case, CaseMethod, ParseCaseError};
pub use delimiter::{join, DelimiterPolicy, DEFAULT_DELIMITERS};

use crate::rng::RandomSource;

/// Applies `case` to `words` and joins them under `delimiter`.
pub fn format<R: RandomSource>(
    words: &[String],
    case: CaseMethod,
    delimiter: &DelimiterPolicy,
    rng: &mut R,
) -> String {
    Formatter::new(case, delimiter.clone()).format(words, rng)
}

/// Reusable rendering settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatter {
    pub case: CaseMethod,
    pub delimiter: DelimiterPolicy,
    /// Seeds the `random` case coin flip from each word's content.
    pub deterministic_case: bool,
}

impl Formatter {
    pub fn new(case: CaseMethod, delimiter: DelimiterPolicy) -> Self {
        Self {
            case,
            delimiter,
            deterministic_case: false,
        }
    }

    pub fn format<R: RandomSource>(&self, words: &[String], rng: &mut R) -> String {
        let cased = set_case(words, self.case, self.deterministic_case, rng);
        join(&cased, &self.delimiter, rng)
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(CaseMethod::default(), DelimiterPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRandom;

    fn owned(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_format_upper_fixed() {
        let mut rng = ScriptedRandom::new(&[0]);
        let out = format(
            &owned(&["correct", "horse", "battery"]),
            CaseMethod::Upper,
            &DelimiterPolicy::Fixed("-".into()),
            &mut rng,
        );
        assert_eq!(out, "CORRECT-HORSE-BATTERY");
    }

    #[test]
    fn test_format_alternating_random_delimiters() {
        let mut rng = ScriptedRandom::new(&[1, 2, 0]);
        let formatter = Formatter::new(
            CaseMethod::Alternating,
            DelimiterPolicy::Random(owned(&["", "!", "#"])),
        );
        let out = formatter.format(&owned(&["Staple", "Horse"]), &mut rng);
        assert_eq!(out, "!STAPLE#horse");
    }

    #[test]
    fn test_default_formatter() {
        let formatter = Formatter::default();
        assert_eq!(formatter.case, CaseMethod::Lower);
        assert_eq!(formatter.delimiter, DelimiterPolicy::Fixed(" ".into()));
        assert!(!formatter.deterministic_case);

        let mut rng = ScriptedRandom::new(&[0]);
        assert_eq!(formatter.format(&owned(&["A", "B"]), &mut rng), "a b");
    }
}
