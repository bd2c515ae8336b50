use crate::game_state::{AnswerLogEntry, GameState, LetterStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    Exhausted,
    TimedOut,
}

impl TerminationReason {
    pub fn describe(self) -> &'static str {
        match self {
            Self::Exhausted => "all letters answered",
            Self::TimedOut => "time is up",
        }
    }
}

/// End-of-game tally. Same shape whichever way the game ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub final_score: usize,
    pub total_questions: usize,
    pub entries: Vec<AnswerLogEntry>,
    /// Final status of every letter, in rosco order.
    pub statuses: Vec<(char, LetterStatus)>,
    pub termination_reason: TerminationReason,
}

impl Summary {
    /// `"X / N"`, with N the number of distinct letters.
    pub fn score_line(&self) -> String {
        format!("{} / {}", self.final_score, self.total_questions)
    }
}

pub fn summarize(state: &GameState, termination_reason: TerminationReason) -> Summary {
    Summary {
        final_score: state.score(),
        total_questions: state.total_questions(),
        entries: state.answer_log().to_vec(),
        statuses: state.statuses().collect(),
        termination_reason,
    }
}
