//! TUI (Terminal User Interface) module for the hangman game
//!
//! Full-screen implementation of [`GameInterface`] using Ratatui.
//!
//! # State Machine
//! - `Guessing` → `RoundOver` → back to `Guessing` when the player replays
//! - Terminal state: `Leaving`

use crate::cli::guesses;
use crate::game_state::{GameInterface, GameSummary, ReplayChoice, UserAction};
use crate::session::{GuessSession, MAX_ATTEMPTS, PLACEHOLDER, RoundReport};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const HIDDEN_STYLE: Style = Style::new().fg(Color::White).bg(Color::DarkGray);
const FOUND_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Green);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    Guessing,
    RoundOver,
    Leaving,
}

/// Letters tried this round, for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TriedLetter {
    letter: char,
    hit: bool,
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    state: TuiState,
    round: u32,
    pattern: &'a [char],
    attempts_remaining: u32,
    tried: &'a [TriedLetter],
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    state: TuiState,
    round: u32,
    pattern: Vec<char>,
    attempts_remaining: u32,
    tried: Vec<TriedLetter>,
    message: String,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            state: TuiState::Guessing,
            round: 0,
            pattern: Vec::new(),
            attempts_remaining: MAX_ATTEMPTS,
            tried: Vec::new(),
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            state: self.state,
            round: self.round,
            pattern: &self.pattern,
            attempts_remaining: self.attempts_remaining,
            tried: &self.tried,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(5), // Word
                Constraint::Length(3), // Attempts gauge
                Constraint::Min(6),    // Info panel
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0], ctx.round);
        Self::render_word(f, chunks[1], ctx.pattern);
        Self::render_attempts(f, chunks[2], ctx.attempts_remaining);
        Self::render_info(f, chunks[3], ctx.tried, ctx.message, ctx.error_message);
        Self::render_status(f, chunks[4], ctx.status);
        Self::render_instructions(f, chunks[5], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect, round: u32) {
        let text = if round == 0 {
            "HANGMAN".to_string()
        } else {
            format!("HANGMAN - Round {round}")
        };
        let title = Paragraph::new(text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_word(f: &mut Frame, area: Rect, pattern: &[char]) {
        let mut spans = vec![Span::raw("  ")];
        for &c in pattern {
            let style = if c == PLACEHOLDER {
                HIDDEN_STYLE
            } else {
                FOUND_STYLE
            };
            let shown = if c == PLACEHOLDER { ' ' } else { c };
            spans.push(Span::styled(format!(" {shown} "), style));
            spans.push(Span::raw(" "));
        }

        let paragraph = Paragraph::new(vec![Line::from(""), Line::from(spans)])
            .block(Block::default().title("Word").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_attempts(f: &mut Frame, area: Rect, attempts_remaining: u32) {
        let ratio = f64::from(attempts_remaining) / f64::from(MAX_ATTEMPTS);
        let color = match attempts_remaining {
            0..=2 => Color::Red,
            3..=5 => Color::Yellow,
            _ => Color::Green,
        };
        let gauge = Gauge::default()
            .block(Block::default().title("Attempts left").borders(Borders::ALL))
            .gauge_style(Style::default().fg(color))
            .ratio(ratio.clamp(0.0, 1.0))
            .label(format!("{attempts_remaining} / {MAX_ATTEMPTS}"));
        f.render_widget(gauge, area);
    }

    fn render_info(
        f: &mut Frame,
        area: Rect,
        tried: &[TriedLetter],
        message: &str,
        error_message: &str,
    ) {
        let mut lines = Vec::new();

        if !tried.is_empty() {
            let mut spans = vec![Span::styled("Tried: ", HEADER_STYLE)];
            for t in tried {
                let style = if t.hit { SUCCESS_STYLE } else { ERROR_STYLE };
                spans.push(Span::styled(t.letter.to_string(), style));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
            lines.push(Line::from(""));
        }

        if !message.is_empty() {
            lines.push(Line::from(vec![Span::styled(message, MESSAGE_STYLE)]));
        }

        if !error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::Guessing => "Type a letter to guess | ESC: Quit",
            TuiState::RoundOver => "1 / ENTER: Play again | 2 / ESC: Quit",
            TuiState::Leaving => "Goodbye!",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    /// Wait briefly for a key press. Non-key events, key releases and
    /// garbage characters from terminal escape sequences yield `None`.
    fn poll_key() -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        let key = match event::read()? {
            Event::Key(key) => key,
            other => {
                debug_log!("poll_key() - Ignoring non-key event: {:?}", other);
                return Ok(None);
            }
        };
        if key.kind != event::KeyEventKind::Press {
            return Ok(None);
        }
        if let KeyCode::Char(c) = key.code
            && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
        {
            debug_log!("poll_key() - Ignoring invalid character: {:?}", c);
            return Ok(None);
        }
        if key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
        {
            debug_log!("poll_key() - Ignoring key with modifier: {:?}", key.modifiers);
            return Ok(None);
        }
        Ok(Some(key))
    }

    /// `Err` carries the message shown for a rejected key.
    fn handle_guess_key(key: KeyEvent) -> Result<Option<UserAction>, String> {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                let letter = c.to_ascii_uppercase();
                info_log!("handle_guess_key() - Guessing '{}'", letter);
                Ok(Some(UserAction::Guess(letter)))
            }
            KeyCode::Esc => Ok(Some(UserAction::Exit)),
            KeyCode::Char(c) => Err(format!("Only letters are allowed! ('{c}' is not a letter)")),
            _ => Ok(None),
        }
    }

    fn handle_replay_key(key: KeyEvent) -> Option<ReplayChoice> {
        match key.code {
            KeyCode::Char('1') | KeyCode::Enter => Some(ReplayChoice::PlayAgain),
            KeyCode::Char('2') | KeyCode::Esc => Some(ReplayChoice::Quit),
            _ => None,
        }
    }

    fn report_message(report: &RoundReport) -> String {
        match report {
            RoundReport::Won {
                word,
                attempts_used,
            } => format!(
                "✓ You won with {attempts_used} wrong {}! The word was {word}.",
                guesses(*attempts_used)
            ),
            RoundReport::Lost { word } => format!("✗ You lost. The word was {word}."),
        }
    }

    fn record_letter(&mut self, letter: char, hit: bool, session: &GuessSession) {
        if !self.tried.iter().any(|t| t.letter == letter) {
            self.tried.push(TriedLetter { letter, hit });
        }
        self.pattern = session.revealed().to_vec();
        self.attempts_remaining = session.attempts_remaining();
    }
}

impl GameInterface for TuiInterface {
    fn display_round_start(&mut self, round: u32, session: &GuessSession) {
        self.state = TuiState::Guessing;
        self.round = round;
        self.pattern = session.revealed().to_vec();
        self.attempts_remaining = session.attempts_remaining();
        self.tried.clear();
        self.message = format!("New word of {} letters", self.pattern.len());
        self.error_message.clear();
        self.status = "Guess a letter".to_string();
        self.draw_or_log();
    }

    fn read_letter(&mut self, _session: &GuessSession) -> UserAction {
        loop {
            if self.draw().is_err() {
                info_log!("read_letter() - Draw failed, returning Exit");
                return UserAction::Exit;
            }
            match Self::poll_key() {
                Ok(Some(key)) => match Self::handle_guess_key(key) {
                    Ok(Some(action)) => {
                        self.error_message.clear();
                        return action;
                    }
                    Ok(None) => {}
                    Err(message) => self.error_message = message,
                },
                Ok(None) => {}
                Err(_e) => {
                    info_log!("read_letter() - Error handling input, returning Exit");
                    return UserAction::Exit;
                }
            }
        }
    }

    fn display_hit(&mut self, letter: char, session: &GuessSession) {
        self.record_letter(letter, true, session);
        self.message = format!("Well done, {letter} is in the word.");
        self.status = "Guess a letter".to_string();
        self.draw_or_log();
    }

    fn display_miss(&mut self, letter: char, session: &GuessSession) {
        self.record_letter(letter, false, session);
        self.message = format!("Sorry, {letter} is not in the word.");
        self.status = "Guess a letter".to_string();
        self.draw_or_log();
    }

    fn display_report(&mut self, report: &RoundReport) {
        self.state = TuiState::RoundOver;
        match report {
            RoundReport::Won {
                word,
                attempts_used,
            } => {
                self.pattern = word.chars().collect();
                self.status = format!(
                    "Round won with {attempts_used} wrong {}",
                    guesses(*attempts_used)
                );
            }
            RoundReport::Lost { .. } => {
                self.status = "Round lost".to_string();
            }
        }
        self.message = Self::report_message(report);
        self.draw_or_log();
    }

    fn read_replay(&mut self) -> ReplayChoice {
        loop {
            if self.draw().is_err() {
                return ReplayChoice::Quit;
            }
            match Self::poll_key() {
                Ok(Some(key)) => {
                    if let Some(choice) = Self::handle_replay_key(key) {
                        info_log!("read_replay() - Choice: {:?}", choice);
                        return choice;
                    }
                }
                Ok(None) => {}
                Err(_e) => return ReplayChoice::Quit,
            }
        }
    }

    fn display_goodbye(&mut self, summary: &GameSummary) {
        self.state = TuiState::Leaving;
        self.message = format!("{} won, {} lost.", summary.wins, summary.losses);
        self.status = "Exiting...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn render(ctx: &RenderContext) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        terminal
            .draw(|f| TuiInterface::render_static(f, ctx))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_guess_key_letters_uppercased() {
        assert_eq!(
            TuiInterface::handle_guess_key(key(KeyCode::Char('e'))),
            Ok(Some(UserAction::Guess('E')))
        );
        assert_eq!(
            TuiInterface::handle_guess_key(key(KeyCode::Char('Q'))),
            Ok(Some(UserAction::Guess('Q')))
        );
    }

    #[test]
    fn test_guess_key_rejects_non_letters() {
        let result = TuiInterface::handle_guess_key(key(KeyCode::Char('3')));
        assert!(result.unwrap_err().contains("'3'"));
    }

    #[test]
    fn test_guess_key_escape_exits() {
        assert_eq!(
            TuiInterface::handle_guess_key(key(KeyCode::Esc)),
            Ok(Some(UserAction::Exit))
        );
        assert_eq!(TuiInterface::handle_guess_key(key(KeyCode::Left)), Ok(None));
    }

    #[test]
    fn test_report_message_wording() {
        let one = TuiInterface::report_message(&RoundReport::Won {
            word: "CAT".to_string(),
            attempts_used: 1,
        });
        assert_eq!(one, "✓ You won with 1 wrong guess! The word was CAT.");

        let none = TuiInterface::report_message(&RoundReport::Won {
            word: "CAT".to_string(),
            attempts_used: 0,
        });
        assert!(none.contains("0 wrong guesses!"));

        let lost = TuiInterface::report_message(&RoundReport::Lost {
            word: "DOG".to_string(),
        });
        assert_eq!(lost, "✗ You lost. The word was DOG.");
    }

    #[test]
    fn test_replay_keys() {
        assert_eq!(
            TuiInterface::handle_replay_key(key(KeyCode::Char('1'))),
            Some(ReplayChoice::PlayAgain)
        );
        assert_eq!(
            TuiInterface::handle_replay_key(key(KeyCode::Enter)),
            Some(ReplayChoice::PlayAgain)
        );
        assert_eq!(
            TuiInterface::handle_replay_key(key(KeyCode::Char('2'))),
            Some(ReplayChoice::Quit)
        );
        assert_eq!(
            TuiInterface::handle_replay_key(key(KeyCode::Esc)),
            Some(ReplayChoice::Quit)
        );
        assert_eq!(TuiInterface::handle_replay_key(key(KeyCode::Char('3'))), None);
    }

    #[test]
    fn test_render_shows_round_state() {
        let tried = [
            TriedLetter {
                letter: 'A',
                hit: true,
            },
            TriedLetter {
                letter: 'Z',
                hit: false,
            },
        ];
        let pattern: Vec<char> = "*A*".chars().collect();
        let screen = render(&RenderContext {
            state: TuiState::Guessing,
            round: 2,
            pattern: &pattern,
            attempts_remaining: 9,
            tried: &tried,
            message: "Sorry, Z is not in the word.",
            error_message: "",
            status: "Guess a letter",
        });

        assert!(screen.contains("HANGMAN - Round 2"));
        assert!(screen.contains(" A "));
        assert!(screen.contains("9 / 10"));
        assert!(screen.contains("Tried: A Z"));
        assert!(screen.contains("Sorry, Z is not in the word."));
        assert!(screen.contains("ESC: Quit"));
    }

    #[test]
    fn test_render_round_over_instructions() {
        let screen = render(&RenderContext {
            state: TuiState::RoundOver,
            round: 1,
            pattern: &[],
            attempts_remaining: 0,
            tried: &[],
            message: "",
            error_message: "",
            status: "",
        });
        assert!(screen.contains("Play again"));
        assert!(screen.contains("Ready"));
    }
}
