use crate::game_state::{LetterStatus, TurnFeedback};
use crate::session::{GameInterface, SessionConfig, TurnView, UserAction};
use crate::summary::Summary;
use crate::timer::{DEFAULT_TIME_LIMIT_SECS, format_remaining};
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;

/// Letters per row when drawing the rosco.
pub const ROSCO_ROW_LENGTH: usize = 13;

/// Rosco trivia game: one clue per letter, answer or pass before time runs out
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a question bank CSV with columns letra,definicion,concepto,tipo_letra
    #[arg(short = 'i', long = "input")]
    pub bank_path: Option<PathBuf>,

    /// Seconds per game
    #[arg(
        short = 't',
        long = "time-limit",
        default_value_t = DEFAULT_TIME_LIMIT_SECS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub time_limit: u32,

    /// Play until every letter is answered, without a timer
    #[arg(long = "no-timer")]
    pub no_timer: bool,

    /// Seed for question selection, for repeatable games
    #[arg(long)]
    pub seed: Option<u64>,

    /// Use the line-oriented interface instead of the full-screen one
    #[arg(long)]
    pub plain: bool,

    /// Write log output to this file
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            time_limit: (!self.no_timer).then_some(self.time_limit),
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

fn status_marker(status: LetterStatus) -> char {
    match status {
        LetterStatus::Pending => '·',
        LetterStatus::Correct => '+',
        LetterStatus::Incorrect => 'x',
        LetterStatus::Passed => '>',
    }
}

/// Draw the rosco as lines of `letter+marker` cells.
pub fn render_rosco(statuses: &[(char, LetterStatus)]) -> Vec<String> {
    statuses
        .chunks(ROSCO_ROW_LENGTH)
        .map(|row| {
            row.iter()
                .map(|&(letter, status)| format!("{letter}{}", status_marker(status)))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Prefix that submits the rest of the line as an answer, even when it is a
/// command word such as `pass`.
pub const LITERAL_ANSWER_PREFIX: char = '=';

/// Map one line of input to an action. Blank lines are not an action.
pub fn parse_action(input: &str) -> Option<UserAction> {
    let input = input.trim();
    if let Some(answer) = input.strip_prefix(LITERAL_ANSWER_PREFIX) {
        let answer = answer.trim();
        return (!answer.is_empty()).then(|| UserAction::Answer(answer.to_string()));
    }
    match input.to_lowercase().as_str() {
        "" => None,
        "exit" | "quit" => Some(UserAction::Exit),
        "pass" | "pasapalabra" => Some(UserAction::Pass),
        "restart" | "again" => Some(UserAction::Restart),
        _ => Some(UserAction::Answer(input.to_string())),
    }
}

pub fn read_action<R: BufRead>(reader: &mut R) -> Option<UserAction> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        // End of input ends the session
        Ok(0) | Err(_) => return Some(UserAction::Exit),
        Ok(_) => {}
    }

    let action = parse_action(&input);
    if action.is_none() {
        println!("Type an answer, 'pass', 'restart' or 'exit' ('=pass' answers \"pass\").");
    }
    action
}

pub fn display_turn(view: &TurnView) {
    println!();
    for line in render_rosco(&view.statuses) {
        println!("  {line}");
    }
    match view.remaining_seconds {
        Some(seconds) => println!(
            "Score {} / {} | Time left {}",
            view.score,
            view.total_questions,
            format_remaining(seconds)
        ),
        None => println!("Score {} / {}", view.score, view.total_questions),
    }
    println!("{}:", view.phrasing);
    println!("  {}", view.clue);
    println!("Your answer ('pass' to defer, 'exit' to quit, '=' before a command word to answer it):");
}

pub fn display_feedback(feedback: &TurnFeedback) {
    println!("{}: {}", feedback.letter(), feedback.message());
}

pub fn display_summary(summary: &Summary) {
    println!();
    println!("Game over: {}.", summary.termination_reason.describe());
    for line in render_rosco(&summary.statuses) {
        println!("  {line}");
    }
    println!("Final score: {}", summary.score_line());
    for entry in &summary.entries {
        println!(
            "  {} | {} | given: {} | expected: {} | {}",
            entry.letter,
            entry.clue,
            entry.given_display(),
            entry.expected_answer,
            entry.outcome.label()
        );
    }
    println!("Type 'restart' to play again or 'exit' to quit.");
}

pub fn display_exit_message() {
    println!("Exiting.");
}

/// CLI implementation of the GameInterface trait
/// This struct wraps a BufRead reader and implements the game interface for CLI interaction
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_turn(&mut self, view: &TurnView) {
        display_turn(view);
    }

    fn read_action(&mut self) -> Option<UserAction> {
        read_action(&mut self.reader)
    }

    fn display_feedback(&mut self, feedback: &TurnFeedback) {
        display_feedback(feedback);
    }

    fn display_summary(&mut self, summary: &Summary) {
        display_summary(summary);
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_cli_defaults() {
        let cli = Cli::parse_from(["rosco"]);
        assert_eq!(cli.bank_path, None);
        assert_eq!(cli.time_limit, 150);
        assert!(!cli.no_timer);
        assert!(!cli.plain);
        assert_eq!(cli.session_config().time_limit, Some(150));
    }

    #[test]
    fn test_parse_cli_with_options() {
        let cli = Cli::parse_from([
            "rosco",
            "-i",
            "bank.csv",
            "--time-limit",
            "300",
            "--seed",
            "9",
            "--plain",
        ]);
        assert_eq!(cli.bank_path, Some(PathBuf::from("bank.csv")));
        assert_eq!(cli.seed, Some(9));
        assert!(cli.plain);
        assert_eq!(cli.session_config().time_limit, Some(300));
    }

    #[test]
    fn test_parse_cli_no_timer() {
        let cli = Cli::parse_from(["rosco", "--no-timer"]);
        assert_eq!(cli.session_config().time_limit, None);
    }

    #[test]
    fn test_parse_cli_rejects_zero_limit() {
        assert!(Cli::try_parse_from(["rosco", "-t", "0"]).is_err());
    }

    #[test]
    fn test_parse_action() {
        assert_eq!(
            parse_action("  Parí s "),
            Some(UserAction::Answer("Parí s".to_string()))
        );
        assert_eq!(parse_action("PASS"), Some(UserAction::Pass));
        assert_eq!(parse_action("pasapalabra"), Some(UserAction::Pass));
        assert_eq!(parse_action("exit\n"), Some(UserAction::Exit));
        assert_eq!(parse_action("Again"), Some(UserAction::Restart));
        assert_eq!(parse_action("   "), None);
    }

    #[test]
    fn test_parse_action_literal_answer_prefix() {
        // A command word can still be given as an answer
        assert_eq!(
            parse_action("=pass"),
            Some(UserAction::Answer("pass".to_string()))
        );
        assert_eq!(
            parse_action(" = Again \n"),
            Some(UserAction::Answer("Again".to_string()))
        );
        assert_eq!(parse_action("="), None);
    }

    #[test]
    fn test_read_action_answer() {
        let mut reader = Cursor::new("cold\n");
        assert_eq!(
            read_action(&mut reader),
            Some(UserAction::Answer("cold".to_string()))
        );
    }

    #[test]
    fn test_read_action_blank_line_is_invalid() {
        let mut reader = Cursor::new("\npass\n");
        assert_eq!(read_action(&mut reader), None);
        assert_eq!(read_action(&mut reader), Some(UserAction::Pass));
    }

    #[test]
    fn test_read_action_end_of_input_exits() {
        let mut reader = Cursor::new("");
        assert_eq!(read_action(&mut reader), Some(UserAction::Exit));
    }

    #[test]
    fn test_render_rosco_wraps_rows() {
        let statuses: Vec<(char, LetterStatus)> = ('A'..='O')
            .map(|letter| (letter, LetterStatus::Pending))
            .collect();
        let lines = render_rosco(&statuses);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("A· B·"));
        assert_eq!(lines[1], "N· O·");
    }

    #[test]
    fn test_render_rosco_markers() {
        let lines = render_rosco(&[
            ('A', LetterStatus::Correct),
            ('B', LetterStatus::Incorrect),
            ('C', LetterStatus::Passed),
            ('D', LetterStatus::Pending),
        ]);
        assert_eq!(lines, vec!["A+ Bx C> D·".to_string()]);
    }
}
