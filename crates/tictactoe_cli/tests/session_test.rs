//! Scripted interactive sessions.

use std::io::Cursor;
use std::time::{Duration, Instant};
use tictactoe_cli::{Console, GameArgs, PlayConfig, Renderer, Session};
use tictactoe_engine::{OpponentKind, Outcome, Player};

type TestConsole = Console<Cursor<Vec<u8>>, Vec<u8>>;

fn quiet_config(opponent: Option<OpponentKind>, human_side: Option<Player>) -> PlayConfig {
    let mut config = PlayConfig::default();
    config.apply(&GameArgs {
        opponent,
        human_side,
        seed: Some(21),
        think_delay_ms: Some(0),
        no_color: true,
        ..GameArgs::default()
    });
    config
}

fn session(input: &str, config: PlayConfig) -> Session<Cursor<Vec<u8>>, Vec<u8>> {
    let console: TestConsole = Console::new(
        Cursor::new(input.as_bytes().to_vec()),
        Vec::new(),
        Renderer::new(false),
    );
    Session::new(console, config)
}

fn output(session: Session<Cursor<Vec<u8>>, Vec<u8>>) -> String {
    String::from_utf8(session.into_console().output().clone()).unwrap()
}

#[test]
fn test_two_humans_play_to_a_win() {
    // X takes the top row while O plays the middle row.
    let mut s = session("1\n0\n3\n1\n4\n2\nn\n", quiet_config(None, None));
    s.run_menu().unwrap();
    let out = output(s);
    assert!(out.contains("TIC TAC TOE GAME"));
    assert!(out.contains("Your turn (O)"));
    assert!(out.contains("X makes move to position 2"));
    assert!(out.contains(" X WINS! "));
    assert!(out.contains("Thanks for playing!"));
}

#[test]
fn test_invalid_menu_choice_reprompts() {
    let mut s = session("7\n4\n", quiet_config(None, None));
    s.run_menu().unwrap();
    let out = output(s);
    assert!(out.contains("Invalid choice. Please try again."));
    assert_eq!(out.matches("Choose game mode:").count(), 2);
}

#[test]
fn test_end_of_input_quits_menu() {
    let mut s = session("", quiet_config(None, None));
    s.run_menu().unwrap();
    assert!(output(s).contains("Thanks for playing!"));
}

#[test]
fn test_human_cannot_beat_optimal() {
    // Trying the cells in order always finds a free one.
    let mut s = session(
        "0\n1\n2\n3\n4\n5\n6\n7\n8\n",
        quiet_config(Some(OpponentKind::Optimal), None),
    );
    let outcome = s.play_match(OpponentKind::Optimal).unwrap();
    let outcome = outcome.expect("game finishes");
    assert!(!outcome.is_loss_for(Player::O));
}

#[test]
fn test_computer_opens_when_human_plays_o() {
    let mut s = session(
        "0\n1\n2\n3\n4\n5\n6\n7\n8\n",
        quiet_config(Some(OpponentKind::Random), Some(Player::O)),
    );
    let outcome = s.play_match(OpponentKind::Random).unwrap();
    assert!(outcome.is_some());
    let out = output(s);
    let first_move = out.find("X makes move").unwrap();
    let first_prompt = out.find("Your turn (O)").unwrap();
    assert!(first_move < first_prompt);
}

#[test]
fn test_leaving_mid_game() {
    let mut s = session("4\nq\n", quiet_config(Some(OpponentKind::Human), None));
    assert_eq!(s.play_match(OpponentKind::Human).unwrap(), None);
}

#[test]
fn test_play_again_loops_fixed_opponent() {
    let mut s = session(
        "0\n3\n1\n4\n2\ny\nq\n",
        quiet_config(Some(OpponentKind::Human), None),
    );
    s.run_fixed(OpponentKind::Human).unwrap();
    let out = output(s);
    assert_eq!(out.matches("Available positions:").count(), 2);
    assert!(out.contains("Thanks for playing!"));
}

#[test]
fn test_draw_banner() {
    // X O X / X O O / O X X
    let mut s = session("0\n1\n2\n4\n3\n5\n7\n6\n8\n", quiet_config(None, None));
    assert_eq!(s.play_match(OpponentKind::Human).unwrap(), Some(Outcome::Draw));
    assert!(output(s).contains("IT'S A TIE!"));
}

#[test]
fn test_menu_lists_every_opponent() {
    let mut s = session("4\n", quiet_config(None, None));
    s.run_menu().unwrap();
    let out = output(s);
    assert!(out.contains("1. Player vs Player"));
    assert!(out.contains("2. Player vs Computer (Easy)"));
    assert!(out.contains("3. Player vs Computer (Impossible)"));
    assert!(out.contains("4. Quit"));
    assert!(out.contains("Enter your choice (1-4): "));
}

#[test]
fn test_interactive_menu_clears_before_banner() {
    let console: TestConsole = Console::new(
        Cursor::new(b"4\n".to_vec()),
        Vec::new(),
        Renderer::new(false),
    )
    .clearing();
    let mut s = Session::new(console, quiet_config(None, None));
    s.run_menu().unwrap();
    let out = output(s);
    assert!(out.starts_with("\x1b[2J"));
    let banner = out.find("TIC TAC TOE GAME").unwrap();
    assert_eq!(out[..banner].matches("\x1b[2J").count(), 1);
}

#[test]
fn test_computer_pauses_before_each_of_its_moves() {
    // O answers 0 with 4, blocks at 2, then wins at 6: three computer moves,
    // the last of which ends the game.
    let mut config = quiet_config(Some(OpponentKind::Optimal), Some(Player::X));
    config.apply(&GameArgs {
        think_delay_ms: Some(40),
        ..GameArgs::default()
    });
    let mut s = session("0\n1\n3\nn\n", config);

    let started = Instant::now();
    let outcome = s.play_match(OpponentKind::Optimal).unwrap();
    let elapsed = started.elapsed();

    assert_eq!(outcome, Some(Outcome::Winner(Player::O)));
    assert!(elapsed >= Duration::from_millis(120), "paused only {:?}", elapsed);
    let out = output(s);
    assert!(out.contains("O makes move to position 6"));
}
