//! State of a single round: the hidden word, the revealed mask and the
//! attempts left.

use crate::wordpool::MAX_WORD_LEN;
use std::fmt;

/// Wrong guesses allowed per round.
pub const MAX_ATTEMPTS: u32 = 10;

/// Shown in the mask for letters not yet found.
pub const PLACEHOLDER: char = '*';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The letter occurs at least once in the word. No attempt is used.
    Hit,
    /// The letter does not occur. One attempt is used.
    Miss,
    /// The round was already decided; nothing changed.
    RoundOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    InProgress,
    Won,
    Lost,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundReport {
    Won { word: String, attempts_used: u32 },
    Lost { word: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    EmptyTarget,
    TargetTooLong { len: usize },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTarget => write!(f, "the word to guess is empty"),
            Self::TargetTooLong { len } => write!(
                f,
                "the word to guess has {len} characters, at most {MAX_WORD_LEN} are allowed"
            ),
        }
    }
}

impl std::error::Error for SessionError {}

/// One round of the game.
///
/// Prior guesses are not remembered: guessing a wrong letter twice costs two
/// attempts, while guessing a found letter again is a free `Hit`.
#[derive(Debug, Clone)]
pub struct GuessSession {
    target: Vec<char>,
    revealed: Vec<char>,
    attempts_remaining: u32,
}

impl GuessSession {
    /// Start a round. The target is compared in uppercase.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the target is empty or longer than
    /// [`MAX_WORD_LEN`] characters.
    pub fn new(target: &str) -> Result<Self, SessionError> {
        let target: Vec<char> = target.chars().map(|c| c.to_ascii_uppercase()).collect();
        if target.is_empty() {
            return Err(SessionError::EmptyTarget);
        }
        if target.len() > MAX_WORD_LEN {
            return Err(SessionError::TargetTooLong { len: target.len() });
        }
        let revealed = vec![PLACEHOLDER; target.len()];
        Ok(Self {
            target,
            revealed,
            attempts_remaining: MAX_ATTEMPTS,
        })
    }

    /// Reveal every position holding `letter`, or use up an attempt if there
    /// is none.
    pub fn apply_guess(&mut self, letter: char) -> GuessOutcome {
        if self.state() != SessionState::InProgress {
            return GuessOutcome::RoundOver;
        }
        let letter = letter.to_ascii_uppercase();
        let mut hit = false;
        for (shown, &actual) in self.revealed.iter_mut().zip(&self.target) {
            if actual == letter {
                *shown = actual;
                hit = true;
            }
        }
        if hit {
            GuessOutcome::Hit
        } else {
            self.attempts_remaining -= 1;
            GuessOutcome::Miss
        }
    }

    /// A fully revealed word wins even if no attempts are left.
    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.revealed == self.target {
            SessionState::Won
        } else if self.attempts_remaining == 0 {
            SessionState::Lost
        } else {
            SessionState::InProgress
        }
    }

    /// Outcome of a finished round; `None` while it is still in progress.
    #[must_use]
    pub fn report(&self) -> Option<RoundReport> {
        match self.state() {
            SessionState::InProgress => None,
            SessionState::Won => Some(RoundReport::Won {
                word: self.target(),
                attempts_used: self.attempts_used(),
            }),
            SessionState::Lost => Some(RoundReport::Lost {
                word: self.target(),
            }),
        }
    }

    /// Wrong guesses still allowed before the round is lost.
    #[must_use]
    pub fn attempts_remaining(&self) -> u32 {
        self.attempts_remaining
    }

    /// Wrong guesses made so far.
    #[must_use]
    pub fn attempts_used(&self) -> u32 {
        MAX_ATTEMPTS - self.attempts_remaining
    }

    /// The word to guess, uppercased.
    #[must_use]
    pub fn target(&self) -> String {
        self.target.iter().collect()
    }

    /// The mask, with [`PLACEHOLDER`] for letters not yet found.
    #[must_use]
    pub fn revealed(&self) -> &[char] {
        &self.revealed
    }

    #[must_use]
    pub fn revealed_pattern(&self) -> String {
        self.revealed.iter().collect()
    }
}

impl fmt::Display for GuessSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.revealed {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}
