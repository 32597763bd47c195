// Library interface for the hangman game
// This allows integration tests to access internal modules

pub mod cli;
pub mod game_state;
pub mod logging;
pub mod session;
pub mod tui;
pub mod wordpool;

// Re-export commonly used items for easier testing
pub use game_state::{GameInterface, GameSummary, ReplayChoice, UserAction, game_loop};
pub use session::{GuessOutcome, GuessSession, RoundReport, SessionState};
pub use wordpool::{LoadError, WordPool};
