use anyhow::{Context, Result};
use hangman::cli::{CliInterface, parse_cli};
use hangman::tui::TuiInterface;
use hangman::{WordPool, game_loop, logging};
use log::{error, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;

fn main() -> Result<()> {
    let cli = parse_cli();
    logging::init(cli.verbose);

    let path = cli.dictionary_path();
    let pool = match WordPool::load(&path) {
        Ok(pool) => pool,
        Err(e) => {
            // Nothing to play without words, but this is not a crash.
            error!("Failed to load dictionary: {e}");
            eprintln!("Error loading dictionary: {e}");
            return Ok(());
        }
    };

    let mut rng = match cli.seed {
        Some(seed) => {
            info!("Seeding word picker with {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };

    let summary = if cli.tui {
        let mut interface = TuiInterface::new().context("failed to set up the terminal")?;
        game_loop(&pool, &mut interface, &mut rng)
    } else {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock(), io::stdout());
        game_loop(&pool, &mut interface, &mut rng)
    };

    info!(
        "Played {} rounds: {} won, {} lost",
        summary.rounds(),
        summary.wins,
        summary.losses
    );
    Ok(())
}
