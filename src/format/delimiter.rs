//! Delimiter policies joining cased words into one string.

use crate::rng::RandomSource;

/// Candidates used by random delimiters when none are configured.
pub const DEFAULT_DELIMITERS: [&str; 21] = [
    "", "!", "@", "#", "$", "%", "^", "&", "*", "(", ")", "0", "1", "2", "3", "4", "5", "6", "7",
    "8", "9",
];

/// What goes between (and possibly around) the words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelimiterPolicy {
    /// The same string between every adjacent pair, nothing outside.
    Fixed(String),
    /// A fresh choice at every insertion point, including before the first
    /// and after the last word.
    Random(Vec<String>),
}

impl DelimiterPolicy {
    /// Random delimiters drawn from [`DEFAULT_DELIMITERS`].
    pub fn random_default() -> Self {
        DelimiterPolicy::Random(DEFAULT_DELIMITERS.iter().map(|d| d.to_string()).collect())
    }

    /// Random delimiters, one candidate per character of `valid` plus the
    /// empty string. An empty `valid` falls back to the defaults.
    pub fn random_from_chars(valid: &str) -> Self {
        if valid.is_empty() {
            return Self::random_default();
        }
        let mut candidates: Vec<String> = valid.chars().map(String::from).collect();
        candidates.push(String::new());
        DelimiterPolicy::Random(candidates)
    }
}

impl Default for DelimiterPolicy {
    fn default() -> Self {
        DelimiterPolicy::Fixed(" ".to_string())
    }
}

/// Joins `words` according to `policy`.
///
/// Fixed mode places `n - 1` separators. Random mode places `n + 1`, so an
/// empty word list still yields one (possibly empty) delimiter. An empty
/// candidate list behaves as the empty string.
pub fn join<R: RandomSource>(words: &[String], policy: &DelimiterPolicy, rng: &mut R) -> String {
    match policy {
        DelimiterPolicy::Fixed(delimiter) => words.join(delimiter),
        DelimiterPolicy::Random(candidates) => {
            let mut out = String::new();
            for word in words {
                out.push_str(choose_delimiter(candidates, rng));
                out.push_str(word);
            }
            out.push_str(choose_delimiter(candidates, rng));
            out
        }
    }
}

fn choose_delimiter<'a, R: RandomSource>(candidates: &'a [String], rng: &mut R) -> &'a str {
    if candidates.is_empty() {
        return "";
    }
    &candidates[rng.pick(candidates.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRandom;

    fn owned(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_fixed_join() {
        let mut rng = ScriptedRandom::new(&[0]);
        let policy = DelimiterPolicy::Fixed("_".into());
        assert_eq!(join(&owned(&["a", "b", "c"]), &policy, &mut rng), "a_b_c");
        assert_eq!(join(&owned(&["solo"]), &policy, &mut rng), "solo");
        assert_eq!(join(&[], &policy, &mut rng), "");
    }

    #[test]
    fn test_random_join_has_outer_delimiters() {
        let mut rng = ScriptedRandom::new(&[1, 2, 3, 4]);
        let policy = DelimiterPolicy::Random(owned(&["", "!", "@", "#", "$"]));
        assert_eq!(join(&owned(&["a", "b", "c"]), &policy, &mut rng), "!a@b#c$");
    }

    #[test]
    fn test_random_join_empty_input() {
        let mut rng = ScriptedRandom::new(&[1]);
        let policy = DelimiterPolicy::Random(owned(&["", "%"]));
        assert_eq!(join(&[], &policy, &mut rng), "%");
    }

    #[test]
    fn test_random_join_without_candidates() {
        let mut rng = ScriptedRandom::new(&[0]);
        let policy = DelimiterPolicy::Random(Vec::new());
        assert_eq!(join(&owned(&["a", "b"]), &policy, &mut rng), "ab");
    }

    #[test]
    fn test_random_from_chars() {
        assert_eq!(
            DelimiterPolicy::random_from_chars("^&*"),
            DelimiterPolicy::Random(owned(&["^", "&", "*", ""]))
        );
        assert_eq!(DelimiterPolicy::random_from_chars(""), DelimiterPolicy::random_default());
    }

    #[test]
    fn test_default_set_includes_empty() {
        match DelimiterPolicy::random_default() {
            DelimiterPolicy::Random(set) => {
                assert_eq!(set.len(), 21);
                assert!(set.contains(&String::new()));
            }
            DelimiterPolicy::Fixed(_) => panic!("Expected random policy"),
        }
    }
}
