// Integration tests for the hangman game
// These tests drive the whole flow: dictionary file -> word pool -> game loop -> console output

use hangman::cli::CliInterface;
use hangman::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{Cursor, Write};
use tempfile::NamedTempFile;

fn dictionary_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn play(pool: &WordPool, input: &str, seed: u64) -> (GameSummary, String) {
    let mut interface = CliInterface::new(Cursor::new(input), Vec::new());
    let mut rng = StdRng::seed_from_u64(seed);
    let summary = game_loop(pool, &mut interface, &mut rng);
    let output = String::from_utf8(interface.into_writer()).unwrap();
    (summary, output)
}

#[test]
fn test_end_to_end_win_from_file() {
    let file = dictionary_file("1\nCAT\n");
    let pool = WordPool::load(file.path()).unwrap();

    let (summary, output) = play(&pool, "a\nz\nc\nt\n2\n", 1);

    assert_eq!(summary, GameSummary { wins: 1, losses: 0 });
    assert!(output.contains("The word is ***."));
    assert!(output.contains("Well done, A is in the word."));
    assert!(output.contains("Sorry, Z is not in the word."));
    assert!(output.contains("You have 9 attempts left."));
    assert!(output.contains("The word is CA*."));
    assert!(output.contains("You won with 1 wrong guess, the word was indeed CAT."));
    assert!(output.contains("Thanks for playing: 1 won, 0 lost."));
}

#[test]
fn test_end_to_end_loss() {
    let pool: WordPool = "1\nDOG\n".parse().unwrap();
    let input = "q\nw\nx\ny\nz\nj\nk\nv\nf\nh\n2\n";

    let (summary, output) = play(&pool, input, 2);

    assert_eq!(summary, GameSummary { wins: 0, losses: 1 });
    assert!(output.contains("You have 1 attempt left."));
    assert!(output.contains("You lost. The word was DOG."));
}

#[test]
fn test_invalid_input_costs_nothing() {
    let pool: WordPool = "1\nOK\n".parse().unwrap();
    let input = "1\n?\n\n  \no\nk\n2\n";

    let (summary, output) = play(&pool, input, 3);

    assert_eq!(summary.wins, 1);
    assert_eq!(output.matches("Invalid input").count(), 4);
    assert!(output.contains("You won with 0 wrong guesses"));
}

#[test]
fn test_repeated_wrong_letter_costs_twice() {
    let pool: WordPool = "1\nOK\n".parse().unwrap();
    let input = "z\nz\no\no\nk\n2\n";

    let (_, output) = play(&pool, input, 4);

    assert!(output.contains("You have 8 attempts left."));
    assert!(output.contains("You won with 2 wrong guesses"));
}

#[test]
fn test_win_on_what_would_be_the_losing_guess() {
    let pool: WordPool = "1\nAB\n".parse().unwrap();
    // One hit, nine misses, then the last letter with a single attempt left.
    let input = "a\nc\nd\ne\nf\ng\nh\ni\nj\nk\nb\n2\n";

    let (summary, output) = play(&pool, input, 5);

    assert_eq!(summary, GameSummary { wins: 1, losses: 0 });
    assert!(output.contains("You won with 9 wrong guesses"));
}

#[test]
fn test_multiple_rounds_with_replay() {
    let pool: WordPool = "2\nAB\nBA\n".parse().unwrap();
    // Both words are found by guessing A then B, whichever is drawn.
    let input = "a\nb\n3\n1\na\nb\n1\nb\na\n2\n";

    let (summary, output) = play(&pool, input, 6);

    assert_eq!(summary, GameSummary { wins: 3, losses: 0 });
    assert!(output.contains("=== Round 3"));
    assert_eq!(output.matches("Play again?").count(), 4);
}

#[test]
fn test_input_closed_mid_round() {
    let pool: WordPool = "1\nPENDU\n".parse().unwrap();

    let (summary, output) = play(&pool, "p\ne\n", 7);

    assert_eq!(summary.rounds(), 0);
    assert!(!output.contains("You won"));
    assert!(!output.contains("You lost"));
    assert!(output.contains("Goodbye."));
}

#[test]
fn test_input_closed_at_replay_prompt() {
    let pool: WordPool = "1\nA\n".parse().unwrap();

    let (summary, output) = play(&pool, "a\n", 8);

    assert_eq!(summary.rounds(), 1);
    assert!(output.contains("Play again?"));
}

#[test]
fn test_same_seed_same_words() {
    let pool: WordPool = "6\nUN\nDEUX\nTROIS\nQUATRE\nCINQ\nSIX\n".parse().unwrap();
    let mut first = StdRng::seed_from_u64(2024);
    let mut second = StdRng::seed_from_u64(2024);
    for _ in 0..20 {
        assert_eq!(pool.pick_random(&mut first), pool.pick_random(&mut second));
    }
}

#[test]
fn test_picked_words_come_from_the_file() {
    let file = dictionary_file("4\nsoleil\nLune  la nuit\nEtoile\nCOMETE\n");
    let pool = WordPool::load(file.path()).unwrap();
    let expected = ["soleil", "Lune", "Etoile", "COMETE"];
    assert_eq!(pool.words(), expected);

    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..50 {
        let word = pool.pick_random(&mut rng);
        assert!(expected.contains(&word));
        let session = GuessSession::new(word).unwrap();
        assert_eq!(session.target(), word.to_ascii_uppercase());
    }
}

#[test]
fn test_short_dictionary_is_rejected() {
    let file = dictionary_file("3\nUN\nDEUX\n");
    match WordPool::load(file.path()) {
        Err(LoadError::MissingWords { declared, found }) => {
            assert_eq!(declared, 3);
            assert_eq!(found, 2);
        }
        other => panic!("Expected MissingWords, got {other:?}"),
    }
}

#[test]
fn test_bundled_dictionary_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/rsc/dico.dic");
    let pool = WordPool::load(path).unwrap();
    assert_eq!(pool.len(), 24);
    assert!(pool.words().iter().all(|w| GuessSession::new(w).is_ok()));
}

#[test]
fn test_non_utf8_lines_are_rejected_not_fatal() {
    let pool: WordPool = "1\nCAT\n".parse().unwrap();
    let mut interface = CliInterface::new(
        Cursor::new(&b"\xff\nc\na\nt\n1\n\xe9\nc\na\nt\n2\n"[..]),
        Vec::new(),
    );
    let mut rng = StdRng::seed_from_u64(9);

    let summary = game_loop(&pool, &mut interface, &mut rng);

    assert_eq!(summary, GameSummary { wins: 2, losses: 0 });
    let output = String::from_utf8(interface.into_writer()).unwrap();
    assert_eq!(output.matches("Invalid input").count(), 2);
}
