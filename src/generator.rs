//! Passphrase generator - ties selection and formatting together.

use secrecy::SecretString;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::error::{PassphraseError, Result};
use crate::format::{CaseMethod, DelimiterPolicy, Formatter};
use crate::rng::{RandomSource, RngPolicy, SystemRandom, WEAK_RNG_WARNING};
use crate::selector::{LetterPartition, Selector};
use crate::wordlist::WordSet;

pub const DEFAULT_NUMWORDS: usize = 6;

/// Settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Words per passphrase; ignored when `acrostic` is set.
    pub numwords: usize,
    pub acrostic: Option<String>,
    pub delimiter: DelimiterPolicy,
    pub case: CaseMethod,
    /// Passphrases to emit.
    pub count: usize,
    /// Accept/reject prompting, handled by the caller.
    pub interactive: bool,
    /// Written after each emitted passphrase by [`render_passphrases`].
    pub separator: String,
    /// Seeds the `random` case method from word content.
    pub testing: bool,
    pub rng_policy: RngPolicy,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            numwords: DEFAULT_NUMWORDS,
            acrostic: None,
            delimiter: DelimiterPolicy::default(),
            case: CaseMethod::default(),
            count: 1,
            interactive: false,
            separator: "\n".to_string(),
            testing: false,
            rng_policy: RngPolicy::default(),
        }
    }
}

impl GenerationConfig {
    /// Words per passphrase, derived from the acrostic when present.
    pub fn words_per_passphrase(&self) -> usize {
        match &self.acrostic {
            Some(acrostic) => acrostic.chars().count(),
            None => self.numwords,
        }
    }

    pub fn formatter(&self) -> Formatter {
        Formatter {
            case: self.case,
            delimiter: self.delimiter.clone(),
            deterministic_case: self.testing,
        }
    }
}

/// Word source resolved once per run.
enum Pool<'a> {
    Uniform(&'a WordSet, usize),
    Acrostic(LetterPartition, &'a str),
}

impl<'a> Pool<'a> {
    fn prepare(words: &'a WordSet, config: &'a GenerationConfig) -> Result<Self> {
        match config.acrostic.as_deref() {
            Some("") => Err(PassphraseError::InvalidWordCount),
            Some(acrostic) => Ok(Pool::Acrostic(
                LetterPartition::for_acrostic(words, acrostic)?,
                acrostic,
            )),
            None if config.numwords == 0 => Err(PassphraseError::InvalidWordCount),
            None => Ok(Pool::Uniform(words, config.numwords)),
        }
    }
}

/// Output of a generation run and the strength of the source behind it.
#[derive(Debug)]
pub struct Generated<T> {
    pub output: T,
    /// `false` when the weak fallback generator was used.
    pub secure: bool,
}

impl<T> Generated<T> {
    /// The warning callers must surface when `output` is not secure.
    pub fn warning(&self) -> Option<&'static str> {
        (!self.secure).then_some(WEAK_RNG_WARNING)
    }

    pub fn into_inner(self) -> T {
        self.output
    }
}

/// Generates passphrases from a word set with an injected random source.
pub struct PassphraseGenerator<R: RandomSource> {
    selector: Selector<R>,
}

impl<R: RandomSource> PassphraseGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            selector: Selector::new(rng),
        }
    }

    pub fn is_secure(&self) -> bool {
        self.selector.is_secure()
    }

    /// Tags `output` with this generator's security, logging when it is weak.
    pub(crate) fn finish<T>(&self, output: T) -> Generated<T> {
        let secure = self.is_secure();
        if !secure {
            #[cfg(feature = "tracing")]
            tracing::warn!("{}", WEAK_RNG_WARNING);
        }
        Generated { output, secure }
    }

    fn generate_from(&mut self, pool: &Pool<'_>, formatter: &Formatter) -> Result<SecretString> {
        let words = match pool {
            Pool::Uniform(words, n) => self.selector.choose(words, *n)?,
            Pool::Acrostic(partition, acrostic) => {
                self.selector.choose_acrostic(partition, acrostic)?
            }
        };
        let rendered = formatter.format(&words, self.selector.rng());
        Ok(SecretString::new(rendered.into()))
    }

    /// Generates a single passphrase.
    pub fn generate(&mut self, words: &WordSet, config: &GenerationConfig) -> Result<SecretString> {
        let pool = Pool::prepare(words, config)?;
        self.generate_from(&pool, &config.formatter())
    }

    /// Generates `config.count` passphrases, partitioning the word set once.
    pub fn emit(&mut self, words: &WordSet, config: &GenerationConfig) -> Result<Vec<SecretString>> {
        let pool = Pool::prepare(words, config)?;
        let formatter = config.formatter();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Generating {} passphrase(s) of {} words",
            config.count,
            config.words_per_passphrase()
        );

        (0..config.count)
            .map(|_| self.generate_from(&pool, &formatter))
            .collect()
    }
}

/// Acquires the system random source under the configured policy.
fn system_generator(config: &GenerationConfig) -> Result<PassphraseGenerator<SystemRandom>> {
    let rng = SystemRandom::acquire(config.rng_policy)?;
    Ok(PassphraseGenerator::new(rng))
}

/// Generates one passphrase using the system random source.
///
/// # Arguments
/// * `words` - Candidate words
/// * `config` - Generation settings
///
/// # Returns
/// The rendered passphrase, kept secret, with a `secure` flag that is
/// `false` only when `config.rng_policy` let the weak generator in.
pub fn generate(words: &WordSet, config: &GenerationConfig) -> Result<Generated<SecretString>> {
    let mut generator = system_generator(config)?;
    let passphrase = generator.generate(words, config)?;
    Ok(generator.finish(passphrase))
}

/// Generates `config.count` passphrases using the system random source.
pub fn emit_passphrases(
    words: &WordSet,
    config: &GenerationConfig,
) -> Result<Generated<Vec<SecretString>>> {
    let mut generator = system_generator(config)?;
    let passphrases = generator.emit(words, config)?;
    Ok(generator.finish(passphrases))
}

/// Concatenates passphrases, writing `separator` after each one.
pub fn render_passphrases(passphrases: &[SecretString], separator: &str) -> SecretString {
    use secrecy::ExposeSecret;

    let mut out = String::new();
    for passphrase in passphrases {
        out.push_str(passphrase.expose_secret());
        out.push_str(separator);
    }
    SecretString::new(out.into())
}

/// Async version that sends each passphrase via channel.
///
/// Stops early, without error, when `token` is cancelled or the receiver
/// is dropped. Returns the number of passphrases sent.
#[cfg(feature = "async")]
pub async fn emit_passphrases_tx(
    words: &WordSet,
    config: &GenerationConfig,
    token: CancellationToken,
    tx: mpsc::Sender<SecretString>,
) -> Result<Generated<usize>> {
    let mut generator = system_generator(config)?;
    let pool = Pool::prepare(words, config)?;
    let formatter = config.formatter();

    #[cfg(feature = "tracing")]
    tracing::info!("passphrase emission is about to start...");

    let mut sent = 0;
    for _ in 0..config.count {
        if token.is_cancelled() {
            #[cfg(feature = "tracing")]
            tracing::info!("Passphrase emission cancelled after {}", sent);
            break;
        }

        let passphrase = generator.generate_from(&pool, &formatter)?;
        if let Err(_e) = tx.send(passphrase).await {
            #[cfg(feature = "tracing")]
            tracing::error!("Failed to send passphrase: {}", _e);
            break;
        }
        sent += 1;
    }

    Ok(generator.finish(sent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRandom;
    use secrecy::ExposeSecret;

    fn fruit() -> WordSet {
        WordSet::from_words(["apple", "banana", "cherry", "damson", "elder", "fig"]).unwrap()
    }

    #[test]
    fn test_generate_default_shape() {
        let words = fruit();
        let generated = generate(&words, &GenerationConfig::default()).unwrap();
        assert!(generated.secure);
        assert_eq!(generated.warning(), None);
        let passphrase = generated.into_inner();
        let parts: Vec<&str> = passphrase.expose_secret().split(' ').collect();
        assert_eq!(parts.len(), DEFAULT_NUMWORDS);
        assert!(parts.iter().all(|w| words.contains(w)));
    }

    #[test]
    fn test_generate_scripted() {
        let config = GenerationConfig {
            numwords: 3,
            delimiter: DelimiterPolicy::Fixed("_".into()),
            case: CaseMethod::Capitalize,
            ..GenerationConfig::default()
        };
        let mut generator = PassphraseGenerator::new(ScriptedRandom::new(&[5, 0, 2]));
        let passphrase = generator.generate(&fruit(), &config).unwrap();
        assert_eq!(passphrase.expose_secret(), "Fig_Apple_Cherry");
    }

    #[test]
    fn test_generate_acrostic() {
        let words = WordSet::from_words(["face", "amazing", "captain", "exactly", "banana"]).unwrap();
        let config = GenerationConfig {
            acrostic: Some("face".to_string()),
            case: CaseMethod::Upper,
            delimiter: DelimiterPolicy::Fixed("-".into()),
            ..GenerationConfig::default()
        };
        let passphrase = generate(&words, &config).unwrap().output;
        assert_eq!(passphrase.expose_secret(), "FACE-AMAZING-CAPTAIN-EXACTLY");
    }

    #[test]
    fn test_generate_acrostic_missing_letter() {
        let config = GenerationConfig {
            acrostic: Some("fig".to_string()),
            ..GenerationConfig::default()
        };
        let result = generate(&fruit(), &config);
        assert!(matches!(result, Err(PassphraseError::NoWordsForLetter('i'))));
    }

    #[test]
    fn test_generate_zero_words() {
        let config = GenerationConfig {
            numwords: 0,
            ..GenerationConfig::default()
        };
        assert!(matches!(
            generate(&fruit(), &config),
            Err(PassphraseError::InvalidWordCount)
        ));
    }

    #[test]
    fn test_generate_empty_acrostic() {
        let config = GenerationConfig {
            acrostic: Some(String::new()),
            ..GenerationConfig::default()
        };
        assert!(matches!(
            generate(&fruit(), &config),
            Err(PassphraseError::InvalidWordCount)
        ));
        assert!(matches!(
            emit_passphrases(&fruit(), &config),
            Err(PassphraseError::InvalidWordCount)
        ));
    }

    #[test]
    fn test_emit_count() {
        let config = GenerationConfig {
            count: 4,
            numwords: 2,
            ..GenerationConfig::default()
        };
        let passphrases = emit_passphrases(&fruit(), &config).unwrap().output;
        assert_eq!(passphrases.len(), 4);
        for p in &passphrases {
            assert_eq!(p.expose_secret().split(' ').count(), 2);
        }
    }

    #[test]
    fn test_render_passphrases_separator() {
        let list = vec![SecretString::new("one two".into()), SecretString::new("three four".into())];
        assert_eq!(render_passphrases(&list, "!@#$%").expose_secret(), "one two!@#$%three four!@#$%");
        assert_eq!(render_passphrases(&list, "").expose_secret(), "one twothree four");
    }

    #[test]
    fn test_words_per_passphrase() {
        let mut config = GenerationConfig::default();
        assert_eq!(config.words_per_passphrase(), DEFAULT_NUMWORDS);
        config.acrostic = Some("héllo".to_string());
        assert_eq!(config.words_per_passphrase(), 5);
    }

    #[test]
    fn test_scripted_source_is_secure() {
        let generator = PassphraseGenerator::new(ScriptedRandom::new(&[0]));
        assert!(generator.is_secure());
    }

    #[test]
    fn test_weak_source_is_reported() {
        let rng = SystemRandom::fallback(RngPolicy { allow_weak: true }, "no entropy".into())
            .expect("weak fallback allowed");
        let mut generator = PassphraseGenerator::new(rng);
        assert!(!generator.is_secure());

        let passphrases = generator.emit(&fruit(), &GenerationConfig::default()).unwrap();
        let generated = generator.finish(passphrases);
        assert!(!generated.secure);
        assert_eq!(generated.warning(), Some(WEAK_RNG_WARNING));
        assert_eq!(generated.output.len(), 1);
    }
}
