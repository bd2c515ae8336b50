// Integration tests for the rosco game
// These tests verify that all modules work together correctly

use chrono::Duration;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rosco::bank::EMBEDDED_BANK;
use rosco::cli::CliInterface;
use rosco::*;
use std::io::Cursor;

const FRANCE_BANK: &str = "letra,definicion,concepto,tipo_letra\n\
    A,capital of France,Paris,empieza\n\
    B,opposite of hot,cold,empieza\n";

fn session_from(data: &str, time_limit: Option<u32>) -> Session<ManualClock, StdRng> {
    let pool = load_pool_from_str(data).unwrap();
    Session::new(
        pool,
        SessionConfig { time_limit },
        ManualClock::default(),
        StdRng::seed_from_u64(2024),
    )
    .unwrap()
}

#[test]
fn test_end_to_end_scenario_with_pass() {
    // Bank with A and B: answer A correctly with an accent, pass B,
    // then answer B wrong. Final score is 1 / 2.
    let mut session = session_from(FRANCE_BANK, Some(150));

    let feedback = session.submit_answer("parís").unwrap();
    assert_eq!(feedback.outcome(), Outcome::Correct);
    assert_eq!(session.state().score(), 1);

    session.pass().unwrap();
    assert_eq!(session.state().cursor(), 2);
    let remaining: Vec<char> = session.state().remaining().iter().map(|q| q.letter).collect();
    assert_eq!(remaining, vec!['B']);

    let feedback = session.submit_answer("warm").unwrap();
    assert_eq!(
        feedback,
        TurnFeedback::Incorrect {
            letter: 'B',
            expected: "cold".to_string()
        }
    );

    let summary = session.summary().unwrap();
    assert_eq!(summary.termination_reason, TerminationReason::Exhausted);
    assert_eq!(summary.score_line(), "1 / 2");
    let last = summary.entries.last().unwrap();
    assert_eq!(last.expected_answer, "cold");
    assert_eq!(last.given_display(), "warm");
}

#[test]
fn test_cli_game_loop_full_game() {
    // Drive the whole loop through the line interface
    let mut session = session_from(FRANCE_BANK, None);
    let input = "Paris\npass\n\ncold\nexit\n";
    let mut interface = CliInterface::new(Cursor::new(input));

    game_loop(&mut session, &mut interface).unwrap();

    assert!(session.state().is_exhausted());
    assert_eq!(session.state().score(), 2);
    assert_eq!(session.state().status('B'), Some(LetterStatus::Correct));
}

#[test]
fn test_cli_game_loop_end_of_input_exits() {
    // Running out of input mid-game ends the loop without panicking
    let mut session = session_from(FRANCE_BANK, None);
    let mut interface = CliInterface::new(Cursor::new("paris\n"));

    game_loop(&mut session, &mut interface).unwrap();

    assert_eq!(session.state().score(), 1);
    assert!(!session.state().is_exhausted());
}

#[test]
fn test_cli_game_loop_restart() {
    // Finish a game, play again, answer one question and leave
    let mut session = session_from(FRANCE_BANK, None);
    let input = "lyon\nhot\nrestart\nparis\nexit\n";
    let mut interface = CliInterface::new(Cursor::new(input));

    game_loop(&mut session, &mut interface).unwrap();

    assert_eq!(session.state().score(), 1);
    assert_eq!(session.state().answer_log().len(), 1);
    assert_eq!(session.state().status('B'), Some(LetterStatus::Pending));
}

#[test]
fn test_timeout_terminates_with_questions_left() {
    // Limit 10, elapsed 11: the game is over whatever is still queued
    let session = session_from(FRANCE_BANK, Some(10));
    session.clock().advance(Duration::seconds(11));

    assert!(session.timer().unwrap().is_expired(session.clock().now()));
    assert_eq!(session.termination(), Some(TerminationReason::TimedOut));
    assert_eq!(session.state().remaining().len(), 2);
}

#[test]
fn test_cli_game_loop_after_timeout_only_accepts_restart_or_exit() {
    let mut session = session_from(FRANCE_BANK, Some(10));
    session.clock().advance(Duration::seconds(60));
    let input = "paris\npass\nexit\n";
    let mut interface = CliInterface::new(Cursor::new(input));

    game_loop(&mut session, &mut interface).unwrap();

    assert_eq!(session.state().score(), 0);
    assert!(session.state().answer_log().is_empty());
}

#[test]
fn test_empty_bank_cannot_start() {
    let result = load("".as_bytes(), &mut StdRng::seed_from_u64(1));
    assert!(matches!(result, Err(DataError::Empty)));

    let error = GameError::from(load_pool_from_str("").unwrap_err());
    assert!(error.to_string().starts_with("cannot start game"));
}

#[test]
fn test_embedded_bank_full_game_all_passes_then_answers() {
    // Pass every letter once, then answer each with its own expected
    // answer: every letter ends correct and nothing is left passed
    let mut session = session_from(EMBEDDED_BANK, None);
    let total = session.state().total_questions();

    for _ in 0..total {
        session.pass().unwrap();
    }
    assert_eq!(session.state().score(), 0);
    assert!(
        session
            .state()
            .statuses()
            .all(|(_, s)| s == LetterStatus::Passed)
    );

    while let Some(question) = session.state().current().cloned() {
        session.submit_answer(&question.answer.to_uppercase()).unwrap();
    }

    let summary = session.summary().unwrap();
    assert_eq!(summary.final_score, total);
    assert_eq!(summary.total_questions, total);
    assert_eq!(summary.entries.len(), total * 2);
    assert!(
        session
            .state()
            .statuses()
            .all(|(_, s)| s == LetterStatus::Correct)
    );
}

#[test]
fn test_reset_draws_from_pool_and_clears_state() {
    // After a reset every letter of the bank is pending again
    let data = "letra,definicion,concepto,tipo_letra\n\
        A,first,alpha,empieza\n\
        A,second,apple,empieza\n\
        B,only,beta,empieza\n\
        C,only,gamma,contiene\n";
    let mut session = session_from(data, Some(300));
    session.submit_answer("x").unwrap();
    session.pass().unwrap();
    session.clock().advance(Duration::seconds(100));

    session.reset().unwrap();

    let letters: Vec<char> = session.state().statuses().map(|(l, _)| l).collect();
    assert_eq!(letters, vec!['A', 'B', 'C']);
    assert!(
        session
            .state()
            .statuses()
            .all(|(_, s)| s == LetterStatus::Pending)
    );
    assert_eq!(session.state().score(), 0);
    assert_eq!(session.remaining_seconds(), Some(300));
    let answer = &session.state().queue()[0].answer;
    assert!(answer == "alpha" || answer == "apple");
}

#[test]
fn test_match_rule_only_changes_phrasing() {
    // A "contiene" question is checked exactly like an "empieza" one
    let data = "letra,definicion,concepto,tipo_letra\n\
        Q,value that splits ordered data,cuantil,contiene\n";
    let mut session = session_from(data, None);
    let view = session.turn_view().unwrap();
    assert_eq!(view.phrasing, "Contains the letter Q");

    let feedback = session.submit_answer("Cuantil").unwrap();
    assert_eq!(feedback.outcome(), Outcome::Correct);
}

#[test]
fn test_normalize_properties() {
    assert_eq!(normalize("Árbol-2!"), normalize("arbol2"));
    for text in ["Árbol-2!", "  K-Means ", "Ñandú", ""] {
        let once = normalize(text);
        assert_eq!(normalize(&once), once);
    }
}
