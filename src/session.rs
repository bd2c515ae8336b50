use crate::bank::{DataError, QuestionPool};
use crate::game_state::{GameState, InvalidState, LetterStatus, TurnFeedback};
use crate::summary::{Summary, TerminationReason, summarize};
use crate::timer::{Clock, DEFAULT_TIME_LIMIT_SECS, SystemClock, Timer};
use crate::{debug_log, info_log};
use rand::Rng;
use rand::rngs::StdRng;
use thiserror::Error;

/// Failures that stop the driver. Rejected turn commands are not among
/// them: the game loop logs those and keeps going.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("cannot start game: {0}")]
    Data(#[from] DataError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Seconds per game, or `None` to play until every letter is answered.
    pub time_limit: Option<u32>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            time_limit: Some(DEFAULT_TIME_LIMIT_SECS),
        }
    }
}

/// What a front end needs to show the current turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnView {
    pub letter: char,
    pub phrasing: String,
    pub clue: String,
    pub statuses: Vec<(char, LetterStatus)>,
    pub score: usize,
    pub total_questions: usize,
    pub remaining_seconds: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Answer(String),
    Pass,
    Restart,
    Exit,
}

/// A front end the game loop can drive.
///
/// `read_action` may return `None` when nothing complete was entered yet;
/// the loop then recomputes the remaining time and asks again, so the
/// interface decides how often the timer is refreshed.
pub trait GameInterface {
    fn display_turn(&mut self, view: &TurnView);
    fn read_action(&mut self) -> Option<UserAction>;
    fn display_feedback(&mut self, feedback: &TurnFeedback);
    fn display_summary(&mut self, summary: &Summary);
    fn display_exit_message(&mut self);
}

/// One player's game: the question pool, a random source for drawing
/// questions, the clock, and the current state.
pub struct Session<C: Clock = SystemClock, R: Rng = StdRng> {
    pool: QuestionPool,
    rng: R,
    clock: C,
    config: SessionConfig,
    state: GameState,
    timer: Option<Timer>,
}

impl<C: Clock, R: Rng> Session<C, R> {
    pub fn new(
        pool: QuestionPool,
        config: SessionConfig,
        clock: C,
        mut rng: R,
    ) -> Result<Self, DataError> {
        let questions = pool.draw(&mut rng)?;
        let timer = config
            .time_limit
            .map(|limit| Timer::start(clock.now(), limit));
        Ok(Self {
            pool,
            rng,
            clock,
            config,
            state: GameState::new(questions),
            timer,
        })
    }

    /// Draw a new set of questions, clear score, statuses and log, and
    /// restart the timer.
    pub fn reset(&mut self) -> Result<(), DataError> {
        let questions = self.pool.draw(&mut self.rng)?;
        self.state.reset(questions);
        self.timer = self
            .config
            .time_limit
            .map(|limit| Timer::start(self.clock.now(), limit));
        log::info!("New game started with {} letters", self.state.total_questions());
        Ok(())
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn timer(&self) -> Option<&Timer> {
        self.timer.as_ref()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn remaining_seconds(&self) -> Option<i64> {
        self.timer
            .map(|timer| timer.remaining_seconds(self.clock.now()))
    }

    pub fn is_timed_out(&self) -> bool {
        self.timer
            .is_some_and(|timer| timer.is_expired(self.clock.now()))
    }

    pub fn termination(&self) -> Option<TerminationReason> {
        if self.state.is_exhausted() {
            Some(TerminationReason::Exhausted)
        } else if self.is_timed_out() {
            Some(TerminationReason::TimedOut)
        } else {
            None
        }
    }

    pub fn submit_answer(&mut self, text: &str) -> Result<TurnFeedback, InvalidState> {
        self.ensure_time_left()?;
        self.state.submit_answer(text)
    }

    pub fn pass(&mut self) -> Result<TurnFeedback, InvalidState> {
        self.ensure_time_left()?;
        self.state.pass()
    }

    /// The final tally, once the game has ended.
    pub fn summary(&self) -> Option<Summary> {
        self.termination()
            .map(|reason| summarize(&self.state, reason))
    }

    pub fn turn_view(&self) -> Option<TurnView> {
        let question = self.state.current()?;
        Some(TurnView {
            letter: question.letter,
            phrasing: question.phrasing(),
            clue: question.clue.clone(),
            statuses: self.state.statuses().collect(),
            score: self.state.score(),
            total_questions: self.state.total_questions(),
            remaining_seconds: self.remaining_seconds(),
        })
    }

    fn ensure_time_left(&self) -> Result<(), InvalidState> {
        if self.is_timed_out() {
            Err(InvalidState::TimedOut)
        } else {
            Ok(())
        }
    }
}

/// Run turns until the player exits. The summary is shown whenever the game
/// ends; from there only restart and exit are accepted.
pub fn game_loop<C, R, I>(session: &mut Session<C, R>, interface: &mut I) -> Result<(), GameError>
where
    C: Clock,
    R: Rng,
    I: GameInterface + ?Sized,
{
    let mut summary_shown = false;

    loop {
        if let Some(summary) = session.summary() {
            if !summary_shown {
                info_log!(
                    "game_loop() - game over ({:?}), score {}",
                    summary.termination_reason,
                    summary.score_line()
                );
                interface.display_summary(&summary);
                summary_shown = true;
            }
            match interface.read_action() {
                Some(UserAction::Restart) => {
                    session.reset()?;
                    summary_shown = false;
                }
                Some(UserAction::Exit) => {
                    interface.display_exit_message();
                    return Ok(());
                }
                Some(action) => {
                    debug_log!("game_loop() - ignoring {:?} after game end", action);
                }
                None => {}
            }
            continue;
        }

        if let Some(view) = session.turn_view() {
            interface.display_turn(&view);
        }

        let Some(action) = interface.read_action() else {
            continue;
        };

        let result = match action {
            UserAction::Answer(text) => session.submit_answer(&text),
            UserAction::Pass => session.pass(),
            UserAction::Restart => {
                session.reset()?;
                continue;
            }
            UserAction::Exit => {
                interface.display_exit_message();
                return Ok(());
            }
        };

        match result {
            Ok(feedback) => interface.display_feedback(&feedback),
            Err(e) => log::warn!("Ignoring turn command: {e}"),
        }
    }
}
