// Library interface for the rosco game
// This allows integration tests to access internal modules

pub mod bank;
pub mod cli;
pub mod game_state;
pub mod logging;
pub mod normalize;
pub mod session;
pub mod summary;
pub mod timer;
pub mod tui;

// Re-export commonly used items for easier testing
pub use bank::{DataError, MatchRule, Question, QuestionPool, load, load_pool_from_str};
pub use game_state::{AnswerLogEntry, GameState, InvalidState, LetterStatus, Outcome, TurnFeedback};
pub use normalize::normalize;
pub use session::{GameError, GameInterface, Session, SessionConfig, UserAction, game_loop};
pub use summary::{Summary, TerminationReason, summarize};
pub use timer::{Clock, ManualClock, SystemClock, Timer};
