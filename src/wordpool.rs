//! Dictionary loading and random word selection.
//!
//! A dictionary is a count header followed by one word per line:
//!
//! ```text
//! 3
//! CHAT
//! CHIEN   trailing text on a line is ignored
//! OISEAU
//! ```

use log::{debug, info, warn};
use rand::Rng;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

/// Longest word kept from a dictionary; longer tokens are cut down to this.
pub const MAX_WORD_LEN: usize = 50;

/// Errors raised while building a [`WordPool`].
#[derive(Debug)]
pub enum LoadError {
    /// The dictionary could not be opened or read.
    SourceUnavailable { origin: String, source: io::Error },
    /// Storage for the declared number of words could not be reserved.
    OutOfMemory { requested: usize },
    /// The first token is missing or is not an unsigned integer.
    MalformedHeader { found: String },
    /// The header declares zero words.
    Empty,
    /// The header declares more words than the dictionary holds.
    MissingWords { declared: usize, found: usize },
    /// A word contains something other than ASCII letters.
    InvalidWord { line: usize, word: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceUnavailable { origin, source } => {
                write!(f, "cannot read dictionary '{origin}': {source}")
            }
            Self::OutOfMemory { requested } => {
                write!(f, "not enough memory to hold {requested} words")
            }
            Self::MalformedHeader { found } if found.is_empty() => {
                write!(f, "dictionary is missing its word count header")
            }
            Self::MalformedHeader { found } => {
                write!(f, "dictionary header '{found}' is not a word count")
            }
            Self::Empty => write!(f, "dictionary declares no words"),
            Self::MissingWords { declared, found } => {
                write!(f, "dictionary declares {declared} words but only {found} were found")
            }
            Self::InvalidWord { line, word } => {
                write!(f, "line {line}: '{word}' must contain only letters A-Z")
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SourceUnavailable { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// The candidate words for a game, immutable once loaded and never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPool {
    words: Vec<String>,
}

impl WordPool {
    /// Load a dictionary file. The file is closed before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::SourceUnavailable`] if the file cannot be opened
    /// or read, and the other [`LoadError`] variants for malformed content.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let origin = path.as_ref().display().to_string();
        let file = File::open(path.as_ref()).map_err(unavailable(&origin))?;
        let pool = Self::parse(BufReader::new(file), &origin)?;
        info!("Loaded {} words from {origin}", pool.len());
        Ok(pool)
    }

    /// Parse a dictionary from any buffered reader.
    ///
    /// # Errors
    ///
    /// Same as [`WordPool::load`].
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, LoadError> {
        Self::parse(reader, "<reader>")
    }

    fn parse<R: BufRead>(reader: R, origin: &str) -> Result<Self, LoadError> {
        let mut records = reader
            .lines()
            .enumerate()
            .map(|(index, line)| line.map(|text| (index + 1, text)));

        let declared = loop {
            let Some(record) = records.next() else {
                return Err(LoadError::MalformedHeader {
                    found: String::new(),
                });
            };
            let (_, line) = record.map_err(unavailable(origin))?;
            if let Some(token) = first_token(&line) {
                break token
                    .parse::<u32>()
                    .map_err(|_| LoadError::MalformedHeader {
                        found: token.to_string(),
                    })?;
            }
        };
        if declared == 0 {
            return Err(LoadError::Empty);
        }

        let declared = declared as usize;
        let mut words = Vec::new();
        words
            .try_reserve_exact(declared)
            .map_err(|_| LoadError::OutOfMemory {
                requested: declared,
            })?;

        for record in records {
            if words.len() == declared {
                break;
            }
            let (line_no, line) = record.map_err(unavailable(origin))?;
            let Some(token) = first_token(&line) else {
                continue;
            };
            words.push(checked_word(token, line_no)?);
        }

        if words.len() < declared {
            return Err(LoadError::MissingWords {
                declared,
                found: words.len(),
            });
        }
        debug!("Parsed {declared} words from {origin}");
        Ok(Self { words })
    }

    /// Pick a word uniformly at random. The pool is left untouched.
    pub fn pick_random<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        let index = rng.random_range(0..self.words.len());
        debug!("Picked word #{index} of {}", self.words.len());
        &self.words[index]
    }

    /// Number of words, equal to the count declared in the header.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always `false`: loading refuses empty dictionaries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words in dictionary order, as written in the file.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Exact, case-sensitive membership test.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }
}

impl FromStr for WordPool {
    type Err = LoadError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        Self::from_reader(data.as_bytes())
    }
}

fn unavailable(origin: &str) -> impl Fn(io::Error) -> LoadError + '_ {
    move |source| LoadError::SourceUnavailable {
        origin: origin.to_string(),
        source,
    }
}

fn first_token(line: &str) -> Option<&str> {
    line.split_whitespace().next()
}

fn checked_word(token: &str, line: usize) -> Result<String, LoadError> {
    let word: String = token.chars().take(MAX_WORD_LEN).collect();
    if word.len() < token.len() {
        warn!("line {line}: word longer than {MAX_WORD_LEN} characters was truncated");
    }
    if !word.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(LoadError::InvalidWord {
            line,
            word: token.to_string(),
        });
    }
    Ok(word)
}
