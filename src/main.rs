//! Passphrase generator - command line front end
//!
//! Parses flags into a [`GenerationConfig`], builds the word set, and
//! prints passphrases. Errors go to stderr with exit status 1.

use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::Parser;
use pwd_passphrase::{
    build, render_passphrases, report, split_sources, CaseMethod, DelimiterPolicy,
    GenerationConfig, PassphraseGenerator, RngPolicy, SystemRandom, WordSet, DEFAULT_NUMWORDS,
    WEAK_RNG_WARNING,
};
use secrecy::{ExposeSecret, SecretString};
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pwd-passphrase")]
#[command(about = "Generate memorable multi-word passphrases")]
struct Args {
    /// Word file(s) to draw from, comma separated (bundled name or path)
    #[arg(short, long, env = "PWD_WORDFILE")]
    wordfile: Option<String>,

    /// Minimum word length
    #[arg(long = "min", default_value_t = pwd_passphrase::DEFAULT_MIN_LENGTH)]
    min_length: usize,

    /// Maximum word length
    #[arg(long = "max", default_value_t = pwd_passphrase::DEFAULT_MAX_LENGTH)]
    max_length: usize,

    /// Number of words per passphrase
    #[arg(short, long, default_value_t = DEFAULT_NUMWORDS, conflicts_with = "acrostic")]
    numwords: usize,

    /// Spell ACROSTIC with the first letters of the words
    #[arg(short, long)]
    acrostic: Option<String>,

    /// Ask to accept each passphrase, generating until one is accepted
    #[arg(short, long)]
    interactive: bool,

    /// Only use words matching this one-character pattern (e.g. '[a-z]')
    #[arg(short, long, default_value = pwd_passphrase::DEFAULT_VALID_CHARS)]
    valid_chars: String,

    /// Report entropy for the current options
    #[arg(short = 'V', long)]
    verbose: bool,

    /// Number of passphrases to generate
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Separate words within a passphrase with DELIM
    #[arg(short, long, default_value = " ")]
    delimiter: String,

    /// Use randomized delimiters between and around words
    #[arg(short = 'R', long)]
    random_delimiters: bool,

    /// Characters allowed as random delimiters (e.g. '^&*')
    #[arg(short = 'D', long, default_value = "")]
    valid_delimiters: String,

    /// Separate generated passphrases with SEP
    #[arg(short, long, default_value = "\n")]
    separator: String,

    /// Case method applied to every word
    #[arg(
        short = 'C',
        long,
        default_value = "lower",
        value_parser = PossibleValuesParser::new(CaseMethod::NAMES)
            .try_map(|name| name.parse::<CaseMethod>()),
    )]
    case: CaseMethod,

    /// Allow a weak random generator if no secure one is available
    #[arg(long)]
    allow_weak_rng: bool,
}

impl Args {
    fn config(&self) -> GenerationConfig {
        let delimiter = if self.random_delimiters {
            DelimiterPolicy::random_from_chars(&self.valid_delimiters)
        } else {
            DelimiterPolicy::Fixed(self.delimiter.clone())
        };

        GenerationConfig {
            numwords: self.numwords,
            acrostic: self.acrostic.clone().filter(|a| !a.is_empty()),
            delimiter,
            case: self.case,
            count: self.count,
            interactive: self.interactive,
            separator: self.separator.clone(),
            testing: false,
            rng_policy: RngPolicy::from_env().with_flag(self.allow_weak_rng),
        }
    }

    fn sources(&self) -> Vec<String> {
        self.wordfile
            .as_deref()
            .map(split_sources)
            .unwrap_or_default()
    }
}

/// Reads one trimmed line, `None` on EOF.
fn prompt(message: &str) -> io::Result<Option<String>> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", message)?;
    stdout.flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        println!();
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Asks for a word count; blank keeps `default`.
fn ask_numwords(default: usize) -> Result<Option<usize>, Box<dyn Error>> {
    let answer = match prompt(&format!("Enter number of words (default {}):\n", default))? {
        Some(answer) => answer,
        None => return Ok(None),
    };
    if answer.is_empty() {
        return Ok(Some(default));
    }
    match answer.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(Some(n)),
        _ => Err("Please enter a positive integer".into()),
    }
}

/// Generates until the user accepts, `None` if input ends first.
fn accept_loop(
    generator: &mut PassphraseGenerator<SystemRandom>,
    words: &WordSet,
    config: &GenerationConfig,
) -> Result<Option<SecretString>, Box<dyn Error>> {
    loop {
        let passphrase = generator.generate(words, config)?;
        println!("Generated: {}", passphrase.expose_secret());
        match prompt("Accept? [yN] ")? {
            Some(answer) if matches!(answer.to_lowercase().as_str(), "y" | "yes") => {
                return Ok(Some(passphrase));
            }
            Some(_) => continue,
            None => return Ok(None),
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut config = args.config();
    let sources = args.sources();
    let words = build(&sources, args.min_length, args.max_length, &args.valid_chars)?;

    if config.interactive && config.acrostic.is_none() {
        match ask_numwords(config.numwords)? {
            Some(n) => config.numwords = n,
            None => return Ok(()),
        }
    }

    if args.verbose {
        println!("{}\n", report(&words, &config)?);
    }

    let rng = SystemRandom::acquire(config.rng_policy)?;
    if !rng.is_secure() {
        eprintln!("{}", WEAK_RNG_WARNING);
    }
    let mut generator = PassphraseGenerator::new(rng);

    let passphrases = if config.interactive {
        let mut accepted = Vec::with_capacity(config.count);
        for _ in 0..config.count {
            match accept_loop(&mut generator, &words, &config)? {
                Some(passphrase) => accepted.push(passphrase),
                None => break,
            }
        }
        accepted
    } else {
        generator.emit(&words, &config)?
    };

    let output = render_passphrases(&passphrases, &config.separator);
    let mut stdout = io::stdout();
    stdout.write_all(output.expose_secret().as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("Exiting after error: {:?}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
