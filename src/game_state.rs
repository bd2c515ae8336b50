//! Game state and turn engine for a single rosco.
//!
//! # State Machine
//! Each letter moves `Pending` → `Correct` | `Incorrect`, or
//! `Pending` → `Passed` → ... → `Correct` | `Incorrect`. A pass appends the
//! current question to the back of the queue, so a passed letter stays
//! playable until it receives a real answer. The game is exhausted once the
//! cursor reaches the end of the queue.

use crate::bank::Question;
use crate::normalize::answers_match;
use crate::{debug_log, info_log};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LetterStatus {
    Pending,
    Correct,
    Incorrect,
    Passed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
    Passed,
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Incorrect => "incorrect",
            Self::Passed => "passed",
        }
    }
}

/// A turn command issued when it cannot be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidState {
    #[error("no questions remain")]
    Exhausted,
    #[error("time is up")]
    TimedOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerLogEntry {
    pub letter: char,
    pub clue: String,
    pub expected_answer: String,
    /// Trimmed text the player gave; `None` for a pass.
    pub given_answer: Option<String>,
    pub outcome: Outcome,
}

impl AnswerLogEntry {
    pub const PASSED_MARKER: &'static str = "(passed)";

    pub fn given_display(&self) -> &str {
        self.given_answer.as_deref().unwrap_or(Self::PASSED_MARKER)
    }
}

/// Result of one turn, for user feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnFeedback {
    Correct { letter: char },
    Incorrect { letter: char, expected: String },
    Passed { letter: char },
}

impl TurnFeedback {
    pub fn letter(&self) -> char {
        match self {
            Self::Correct { letter } | Self::Incorrect { letter, .. } | Self::Passed { letter } => {
                *letter
            }
        }
    }

    pub fn outcome(&self) -> Outcome {
        match self {
            Self::Correct { .. } => Outcome::Correct,
            Self::Incorrect { .. } => Outcome::Incorrect,
            Self::Passed { .. } => Outcome::Passed,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Correct { .. } => "Correct!".to_string(),
            Self::Incorrect { expected, .. } => format!("Incorrect. The answer was: {expected}"),
            Self::Passed { letter } => format!("Pasapalabra! {letter} moved to the end"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameState {
    queue: Vec<Question>,
    cursor: usize,
    score: usize,
    status_by_letter: BTreeMap<char, LetterStatus>,
    answer_log: Vec<AnswerLogEntry>,
}

impl GameState {
    /// Start a game over `questions`, one per letter. Every letter begins
    /// `Pending`.
    pub fn new(questions: Vec<Question>) -> Self {
        let status_by_letter = questions
            .iter()
            .map(|q| (q.letter, LetterStatus::Pending))
            .collect();
        info_log!("GameState::new() - {} questions queued", questions.len());
        Self {
            queue: questions,
            cursor: 0,
            score: 0,
            status_by_letter,
            answer_log: Vec::new(),
        }
    }

    /// Discard all progress and start over with a fresh set of questions.
    pub fn reset(&mut self, questions: Vec<Question>) {
        *self = Self::new(questions);
    }

    pub fn current(&self) -> Option<&Question> {
        self.queue.get(self.cursor)
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.queue.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn queue(&self) -> &[Question] {
        &self.queue
    }

    /// Questions still to be played, in order, including deferred ones.
    pub fn remaining(&self) -> &[Question] {
        &self.queue[self.cursor..]
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// Number of distinct letters in play.
    pub fn total_questions(&self) -> usize {
        self.status_by_letter.len()
    }

    pub fn status(&self, letter: char) -> Option<LetterStatus> {
        self.status_by_letter.get(&letter).copied()
    }

    /// Every letter with its status, ascending by letter.
    pub fn statuses(&self) -> impl Iterator<Item = (char, LetterStatus)> + '_ {
        self.status_by_letter.iter().map(|(&l, &s)| (l, s))
    }

    pub fn answer_log(&self) -> &[AnswerLogEntry] {
        &self.answer_log
    }

    /// Check `text` against the current question and advance.
    ///
    /// Matching is full equality of canonical forms; the question's match
    /// rule plays no part in it.
    pub fn submit_answer(&mut self, text: &str) -> Result<TurnFeedback, InvalidState> {
        let question = self.current().ok_or(InvalidState::Exhausted)?;
        let letter = question.letter;
        let given = text.trim().to_string();

        let feedback = if answers_match(&given, &question.answer) {
            TurnFeedback::Correct { letter }
        } else {
            TurnFeedback::Incorrect {
                letter,
                expected: question.answer.clone(),
            }
        };
        let entry = AnswerLogEntry {
            letter,
            clue: question.clue.clone(),
            expected_answer: question.answer.clone(),
            given_answer: Some(given),
            outcome: feedback.outcome(),
        };

        match feedback {
            TurnFeedback::Correct { .. } => {
                self.score += 1;
                self.set_status(letter, LetterStatus::Correct);
            }
            _ => self.set_status(letter, LetterStatus::Incorrect),
        }
        self.answer_log.push(entry);
        self.cursor += 1;
        debug_log!(
            "submit_answer() - {} -> {:?}, score {}",
            letter,
            feedback.outcome(),
            self.score
        );
        Ok(feedback)
    }

    /// Defer the current question to the back of the queue and advance.
    pub fn pass(&mut self) -> Result<TurnFeedback, InvalidState> {
        let question = self.current().cloned().ok_or(InvalidState::Exhausted)?;
        let letter = question.letter;

        self.set_status(letter, LetterStatus::Passed);
        self.answer_log.push(AnswerLogEntry {
            letter,
            clue: question.clue.clone(),
            expected_answer: question.answer.clone(),
            given_answer: None,
            outcome: Outcome::Passed,
        });
        self.queue.push(question);
        self.cursor += 1;
        debug_log!(
            "pass() - {} deferred, {} questions remain",
            letter,
            self.remaining().len()
        );
        Ok(TurnFeedback::Passed { letter })
    }

    fn set_status(&mut self, letter: char, status: LetterStatus) {
        if let Some(slot) = self.status_by_letter.get_mut(&letter) {
            *slot = status;
        }
    }
}
