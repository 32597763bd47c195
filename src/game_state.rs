use crate::session::{GuessOutcome, GuessSession, RoundReport};
use crate::wordpool::WordPool;
use log::{error, info};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Guess(char),
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayChoice {
    PlayAgain,
    Quit,
}

/// Rounds finished during one run of [`game_loop`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameSummary {
    pub wins: u32,
    pub losses: u32,
}

impl GameSummary {
    #[must_use]
    pub fn rounds(&self) -> u32 {
        self.wins + self.losses
    }
}

/// Trait for game interfaces (CLI or TUI).
/// Input validation happens behind this trait; the loop only ever sees
/// letters or an exit request.
pub trait GameInterface {
    fn display_round_start(&mut self, round: u32, session: &GuessSession);
    fn read_letter(&mut self, session: &GuessSession) -> UserAction;
    fn display_hit(&mut self, letter: char, session: &GuessSession);
    fn display_miss(&mut self, letter: char, session: &GuessSession);
    fn display_report(&mut self, report: &RoundReport);
    fn read_replay(&mut self) -> ReplayChoice;
    fn display_goodbye(&mut self, summary: &GameSummary);
}

/// Play rounds drawn from `pool` until the player declines a replay or
/// closes the input.
pub fn game_loop<I, R>(pool: &WordPool, interface: &mut I, rng: &mut R) -> GameSummary
where
    I: GameInterface + ?Sized,
    R: Rng + ?Sized,
{
    let mut summary = GameSummary::default();

    loop {
        let word = pool.pick_random(rng);
        let mut session = match GuessSession::new(word) {
            Ok(session) => session,
            Err(e) => {
                error!("Cannot start a round with '{word}': {e}");
                break;
            }
        };

        let round = summary.rounds() + 1;
        info!("Round {round} started with a {} letter word", word.len());
        interface.display_round_start(round, &session);

        let Some(report) = play_round(&mut session, interface) else {
            info!("Round {round} abandoned");
            break;
        };
        match report {
            RoundReport::Won { attempts_used, .. } => {
                info!("Round {round} won after {attempts_used} wrong guesses");
                summary.wins += 1;
            }
            RoundReport::Lost { .. } => {
                info!("Round {round} lost");
                summary.losses += 1;
            }
        }
        interface.display_report(&report);

        if interface.read_replay() == ReplayChoice::Quit {
            break;
        }
    }

    interface.display_goodbye(&summary);
    summary
}

/// Returns `None` when the player exits mid-round.
fn play_round<I: GameInterface + ?Sized>(
    session: &mut GuessSession,
    interface: &mut I,
) -> Option<RoundReport> {
    loop {
        if let Some(report) = session.report() {
            return Some(report);
        }

        let letter = match interface.read_letter(session) {
            UserAction::Guess(letter) => letter.to_ascii_uppercase(),
            UserAction::Exit => return None,
        };

        match session.apply_guess(letter) {
            GuessOutcome::Hit => interface.display_hit(letter, session),
            GuessOutcome::Miss => interface.display_miss(letter, session),
            GuessOutcome::RoundOver => {}
        }
    }
}
