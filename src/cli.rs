use crate::game_state::{GameInterface, GameSummary, ReplayChoice, UserAction};
use crate::session::{GuessSession, RoundReport};
use clap::Parser;
use log::{debug, warn};
use std::fmt;
use std::io::{BufRead, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Dictionary used when nothing else is configured, relative to the working
/// directory.
pub const DEFAULT_DICTIONARY: &str = "rsc/dico.dic";

/// Hangman: guess the hidden word one letter at a time
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Dictionary file: a word count on the first line, then one word per line
    #[arg(short = 'd', long = "dictionary", env = "HANGMAN_DICTIONARY")]
    pub dictionary: Option<PathBuf>,

    /// Seed for the word picker, to replay the same sequence of words
    #[arg(short = 's', long = "seed")]
    pub seed: Option<u64>,

    /// Play in the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Dictionary to load: the explicit option (or `HANGMAN_DICTIONARY`),
    /// then [`DEFAULT_DICTIONARY`] if it exists, then the per-user data
    /// directory. Falls back to [`DEFAULT_DICTIONARY`] so a missing file is
    /// reported against the documented location.
    #[must_use]
    pub fn dictionary_path(&self) -> PathBuf {
        resolve_dictionary(
            self.dictionary.as_deref(),
            Path::new(DEFAULT_DICTIONARY),
            user_dictionary_path(),
        )
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// `<data dir>/hangman/dico.dic`, e.g. `~/.local/share/hangman/dico.dic`.
#[must_use]
pub fn user_dictionary_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("hangman").join("dico.dic"))
}

fn resolve_dictionary(explicit: Option<&Path>, local: &Path, user: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if local.is_file() {
        return local.to_path_buf();
    }
    if let Some(path) = user
        && path.is_file()
    {
        debug!("Using dictionary from data directory: {}", path.display());
        return path;
    }
    local.to_path_buf()
}

// UI Input/Output functions

fn plural(count: u32) -> &'static str {
    if count == 1 { "" } else { "s" }
}

/// "guess" or "guesses", shared by every front-end's win message.
#[must_use]
pub fn guesses(count: u32) -> &'static str {
    if count == 1 { "guess" } else { "guesses" }
}

/// First character of the line if it is a letter; the rest is discarded.
fn parse_letter(line: &str) -> Option<char> {
    line.trim()
        .chars()
        .next()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
}

/// Leading integer of the line, like `scanf("%d")`: `"1abc"` reads as 1.
fn parse_replay(line: &str) -> Option<ReplayChoice> {
    let line = line.trim_start();
    let sign_len = usize::from(line.starts_with(['+', '-']));
    let digits = line[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(line.len() - sign_len);
    match line[..sign_len + digits].parse::<i64>() {
        Ok(1) => Some(ReplayChoice::PlayAgain),
        Ok(2) => Some(ReplayChoice::Quit),
        _ => None,
    }
}

/// Line-oriented implementation of [`GameInterface`] over any reader and
/// writer, normally stdin and stdout.
pub struct CliInterface<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn say(&mut self, args: fmt::Arguments<'_>) {
        let result = self
            .writer
            .write_fmt(args)
            .and_then(|()| self.writer.flush());
        if let Err(e) = result {
            warn!("Failed to write to terminal: {e}");
        }
    }

    /// `None` only at end of input. Bytes that are not UTF-8 are replaced,
    /// so the line fails validation and the prompt repeats.
    fn read_line(&mut self) -> Option<String> {
        let mut input = Vec::new();
        loop {
            match self.reader.read_until(b'\n', &mut input) {
                Ok(0) if input.is_empty() => {
                    debug!("Input closed");
                    return None;
                }
                Ok(_) => return Some(String::from_utf8_lossy(&input).into_owned()),
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    warn!("Failed to read input: {e}");
                    return None;
                }
            }
        }
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn display_round_start(&mut self, round: u32, session: &GuessSession) {
        self.say(format_args!(
            "\n=== Round {round}: a word of {} letters ===\n",
            session.revealed().len()
        ));
    }

    fn read_letter(&mut self, session: &GuessSession) -> UserAction {
        let attempts = session.attempts_remaining();
        self.say(format_args!(
            "\nYou have {attempts} attempt{} left.\nThe word is {session}.\nEnter a letter: ",
            plural(attempts)
        ));
        loop {
            let Some(line) = self.read_line() else {
                return UserAction::Exit;
            };
            if let Some(letter) = parse_letter(&line) {
                return UserAction::Guess(letter);
            }
            self.say(format_args!("Invalid input, please enter a letter: "));
        }
    }

    fn display_hit(&mut self, letter: char, _session: &GuessSession) {
        self.say(format_args!("Well done, {letter} is in the word.\n"));
    }

    fn display_miss(&mut self, letter: char, _session: &GuessSession) {
        self.say(format_args!("Sorry, {letter} is not in the word.\n"));
    }

    fn display_report(&mut self, report: &RoundReport) {
        match report {
            RoundReport::Won {
                word,
                attempts_used,
            } => self.say(format_args!(
                "You won with {attempts_used} wrong {}, the word was indeed {word}.\n",
                guesses(*attempts_used)
            )),
            RoundReport::Lost { word } => {
                self.say(format_args!("You lost. The word was {word}.\n"));
            }
        }
    }

    fn read_replay(&mut self) -> ReplayChoice {
        loop {
            self.say(format_args!("\nPlay again?\n1. Continue\n2. Quit\n"));
            let Some(line) = self.read_line() else {
                return ReplayChoice::Quit;
            };
            if let Some(choice) = parse_replay(&line) {
                return choice;
            }
        }
    }

    fn display_goodbye(&mut self, summary: &GameSummary) {
        if summary.rounds() == 0 {
            self.say(format_args!("\nGoodbye.\n"));
        } else {
            self.say(format_args!(
                "\nThanks for playing: {} won, {} lost.\n",
                summary.wins, summary.losses
            ));
        }
    }
}
