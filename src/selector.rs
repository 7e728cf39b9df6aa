//! Word selection: uniform draws and acrostic-constrained draws.

use std::collections::HashMap;

use crate::error::{PassphraseError, Result};
use crate::rng::RandomSource;
use crate::wordlist::WordSet;

/// Folds a character for acrostic matching.
pub fn fold_letter(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Words grouped by their case-folded first character.
///
/// Built for a specific acrostic: every letter of it is guaranteed to map
/// to a non-empty bucket.
#[derive(Debug, Clone)]
pub struct LetterPartition {
    buckets: HashMap<char, Vec<String>>,
}

impl LetterPartition {
    /// Groups `words` by first letter and checks that `acrostic` is coverable.
    ///
    /// # Errors
    ///
    /// [`PassphraseError::NoWordsForLetter`] naming the first acrostic
    /// letter without candidates.
    pub fn for_acrostic(words: &WordSet, acrostic: &str) -> Result<Self> {
        let mut buckets: HashMap<char, Vec<String>> = HashMap::new();
        for word in words.iter() {
            if let Some(first) = word.chars().next() {
                buckets
                    .entry(fold_letter(first))
                    .or_default()
                    .push(word.to_owned());
            }
        }

        if let Some(missing) = acrostic
            .chars()
            .find(|c| !buckets.contains_key(&fold_letter(*c)))
        {
            #[cfg(feature = "tracing")]
            tracing::error!("No words found starting with {}", missing);
            return Err(PassphraseError::NoWordsForLetter(missing));
        }

        Ok(Self { buckets })
    }

    /// Candidates for `letter`, empty if none.
    pub fn bucket(&self, letter: char) -> &[String] {
        self.buckets
            .get(&fold_letter(letter))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Folded letters with at least one candidate.
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.buckets.keys().copied()
    }
}

/// Draws words with an injected random source.
///
/// Every draw is independent and with replacement, so one passphrase may
/// contain the same word twice.
#[derive(Debug)]
pub struct Selector<R: RandomSource> {
    rng: R,
}

impl<R: RandomSource> Selector<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draws `n` words uniformly from `words`.
    pub fn choose(&mut self, words: &WordSet, n: usize) -> Result<Vec<String>> {
        if n == 0 {
            return Err(PassphraseError::InvalidWordCount);
        }
        Ok((0..n)
            .map(|_| words.get(self.rng.pick(words.len())).to_owned())
            .collect())
    }

    /// Draws one word per acrostic letter, in order.
    pub fn choose_acrostic(
        &mut self,
        partition: &LetterPartition,
        acrostic: &str,
    ) -> Result<Vec<String>> {
        let mut chosen = Vec::with_capacity(acrostic.chars().count());
        for letter in acrostic.chars() {
            let bucket = partition.bucket(letter);
            if bucket.is_empty() {
                return Err(PassphraseError::NoWordsForLetter(letter));
            }
            chosen.push(bucket[self.rng.pick(bucket.len())].clone());
        }
        Ok(chosen)
    }

    /// Access to the random source, shared with the formatter.
    pub fn rng(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn is_secure(&self) -> bool {
        self.rng.is_secure()
    }
}
