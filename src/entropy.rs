//! Entropy accounting for generated passphrases.
//!
//! All figures assume every candidate is equally likely to be drawn, which
//! holds when a secure [`RandomSource`](crate::rng::RandomSource) is used.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::{PassphraseError, Result};
use crate::generator::GenerationConfig;
use crate::selector::{fold_letter, LetterPartition};
use crate::wordlist::WordSet;

/// Advisory entropy figures for one passphrase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntropyReport {
    /// Candidate words that can appear in the passphrase.
    pub word_count: usize,
    /// Words per passphrase.
    pub numwords: usize,
    /// Average bits contributed by each word.
    pub bits_per_word: f64,
    pub total_bits: f64,
}

/// Entropy of `numwords` independent draws from `word_count` candidates.
pub fn uniform_entropy(word_count: usize, numwords: usize) -> EntropyReport {
    let bits_per_word = (word_count as f64).log2();
    EntropyReport {
        word_count,
        numwords,
        bits_per_word,
        total_bits: bits_per_word * numwords as f64,
    }
}

/// Entropy of one draw per acrostic letter from that letter's bucket.
///
/// Each letter contributes `log2(|bucket|)`; a repeated letter counts once
/// per occurrence.
pub fn acrostic_entropy(partition: &LetterPartition, acrostic: &str) -> EntropyReport {
    let numwords = acrostic.chars().count();
    let total_bits: f64 = acrostic
        .chars()
        .map(|c| (partition.bucket(c).len() as f64).log2())
        .sum();

    let letters: BTreeSet<char> = acrostic.chars().map(fold_letter).collect();
    let word_count = letters.iter().map(|c| partition.bucket(*c).len()).sum();

    let bits_per_word = if numwords == 0 {
        0.0
    } else {
        total_bits / numwords as f64
    };

    EntropyReport {
        word_count,
        numwords,
        bits_per_word,
        total_bits,
    }
}

/// Entropy report for passphrases generated from `words` under `config`.
///
/// # Errors
///
/// Fails like generation would: [`PassphraseError::InvalidWordCount`] for
/// zero words or an empty acrostic, and
/// [`PassphraseError::NoWordsForLetter`] when a letter has no candidates.
pub fn report(words: &WordSet, config: &GenerationConfig) -> Result<EntropyReport> {
    if config.words_per_passphrase() == 0 {
        return Err(PassphraseError::InvalidWordCount);
    }
    match config.acrostic.as_deref() {
        Some(acrostic) => {
            let partition = LetterPartition::for_acrostic(words, acrostic)?;
            Ok(acrostic_entropy(&partition, acrostic))
        }
        None => Ok(uniform_entropy(words.len(), config.numwords)),
    }
}

impl fmt::Display for EntropyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "With the current options, your word list contains {} words.",
            self.word_count
        )?;
        writeln!(
            f,
            "A {} word password from this list will have roughly {} ({:.2} * {}) bits of entropy,",
            self.numwords,
            self.total_bits as u64,
            self.bits_per_word,
            self.numwords
        )?;
        write!(f, "assuming truly random word selection.")
    }
}
