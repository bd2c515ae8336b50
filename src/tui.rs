//! TUI (Terminal User Interface) module for the rosco game
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Architecture
//! - `TuiInterface`: renders the rosco, the current clue and the summary, and
//!   turns key presses into `UserAction`s for the game loop.
//!
//! # Timer refresh
//! `read_action` draws, then waits at most `EVENT_POLL_TIMEOUT_MS` for a key.
//! Returning `None` on a quiet poll lets the game loop recompute the
//! remaining time, so the countdown on screen updates without any
//! background thread.
//!
//! # State Machine
//! - `Playing` → `GameOver` when a summary is displayed
//! - `GameOver` → `Playing` when the next turn is displayed after a restart

use crate::cli::ROSCO_ROW_LENGTH;
use crate::game_state::{LetterStatus, Outcome, TurnFeedback};
use crate::session::{GameInterface, TurnView, UserAction};
use crate::summary::Summary;
use crate::timer::format_remaining;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
};
use std::io;

const EVENT_POLL_TIMEOUT_MS: u64 = 250;
const LOW_TIME_WARNING_SECS: i64 = 10;
const ORANGE: Color = Color::Rgb(255, 165, 0);

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const FAILURE_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
const DEFERRED_STYLE: Style = Style::new().fg(ORANGE).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

/// Background and foreground for a letter in the rosco.
fn status_colors(status: LetterStatus) -> (Color, Color) {
    match status {
        LetterStatus::Pending => (Color::DarkGray, Color::White),
        LetterStatus::Correct => (Color::Green, Color::Black),
        LetterStatus::Incorrect => (Color::Red, Color::White),
        LetterStatus::Passed => (ORANGE, Color::Black),
    }
}

fn outcome_style(outcome: Outcome) -> Style {
    match outcome {
        Outcome::Correct => SUCCESS_STYLE,
        Outcome::Incorrect => FAILURE_STYLE,
        Outcome::Passed => DEFERRED_STYLE,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    Playing,
    GameOver,
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    state: TuiState,
    view: Option<&'a TurnView>,
    summary: Option<&'a Summary>,
    current_input: &'a str,
    message: &'a str,
    message_style: Style,
    error_message: &'a str,
    status: &'a str,
}

/// Text around the answer box. All of it belongs to the game in progress.
struct Prompt {
    input: String,
    message: String,
    message_style: Style,
    error_message: String,
}

impl Prompt {
    fn new() -> Self {
        Self {
            input: String::new(),
            message: String::new(),
            message_style: MESSAGE_STYLE,
            error_message: String::new(),
        }
    }

    fn clear(&mut self) {
        *self = Self::new();
    }

    /// A restart starts the next game with an empty prompt.
    fn note_action(&mut self, action: &UserAction) {
        if *action == UserAction::Restart {
            self.clear();
        }
    }

    fn show_feedback(&mut self, feedback: &TurnFeedback) {
        self.message = feedback.message();
        self.message_style = outcome_style(feedback.outcome());
        self.input.clear();
    }
}

/// Apply a key press while a question is on screen. `Err` carries a message
/// for the player.
fn playing_key_action(
    input: &mut String,
    key: KeyEvent,
) -> Result<Option<UserAction>, &'static str> {
    let has_ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let has_alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('r' | 'R') if has_ctrl => Ok(Some(UserAction::Restart)),
        KeyCode::Char('c') if has_ctrl => Ok(Some(UserAction::Exit)),
        KeyCode::Char(c) if !has_ctrl && !has_alt && !c.is_control() && c != '\u{FFFD}' => {
            input.push(c);
            Ok(None)
        }
        KeyCode::Backspace => {
            input.pop();
            Ok(None)
        }
        KeyCode::Enter if input.trim().is_empty() => {
            Err("Type an answer, or press TAB to pass")
        }
        KeyCode::Enter => {
            let answer = std::mem::take(input);
            Ok(Some(UserAction::Answer(answer)))
        }
        KeyCode::Tab => {
            input.clear();
            Ok(Some(UserAction::Pass))
        }
        KeyCode::Esc => Ok(Some(UserAction::Exit)),
        _ => Ok(None),
    }
}

fn game_over_key_action(key: KeyEvent) -> Option<UserAction> {
    match key.code {
        KeyCode::Char('n' | 'N' | 'r' | 'R') => Some(UserAction::Restart),
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(UserAction::Exit),
        _ => None,
    }
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    state: TuiState,
    view: Option<TurnView>,
    summary: Option<Summary>,
    prompt: Prompt,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            state: TuiState::Playing,
            view: None,
            summary: None,
            prompt: Prompt::new(),
            status: "Ready".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    /// Draw the current UI state to the terminal.
    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            state: self.state,
            view: self.view.as_ref(),
            summary: self.summary.as_ref(),
            current_input: &self.prompt.input,
            message: &self.prompt.message,
            message_style: self.prompt.message_style,
            error_message: &self.prompt.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Render the complete UI layout using the provided context.
    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title and timer
                Constraint::Length(5), // Rosco, up to three rows
                Constraint::Min(8),    // Clue or summary
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        let remaining = ctx
            .view
            .filter(|_| ctx.state == TuiState::Playing)
            .and_then(|v| v.remaining_seconds);
        Self::render_title(f, chunks[0], remaining);
        // The last turn view predates the final answer; after the game the
        // summary carries the letters' final statuses
        match (ctx.state, ctx.summary, ctx.view) {
            (TuiState::GameOver, Some(summary), _) => {
                Self::render_rosco(f, chunks[1], &summary.statuses, None);
            }
            (_, _, Some(view)) => {
                Self::render_rosco(f, chunks[1], &view.statuses, Some(view.letter));
            }
            _ => {}
        }
        match (ctx.state, ctx.summary) {
            (TuiState::GameOver, Some(summary)) => Self::render_summary(f, chunks[2], summary),
            _ => Self::render_clue(f, chunks[2], ctx),
        }
        Self::render_status(f, chunks[3], ctx.status);
        Self::render_instructions(f, chunks[4], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect, remaining: Option<i64>) {
        let mut spans = vec![Span::styled("PASAPALABRA - ROSCO", HEADER_STYLE)];
        if let Some(seconds) = remaining {
            let style = if seconds <= LOW_TIME_WARNING_SECS {
                FAILURE_STYLE
            } else {
                MESSAGE_STYLE
            };
            spans.push(Span::raw("    "));
            spans.push(Span::styled(
                format!("Time left {}", format_remaining(seconds)),
                style,
            ));
        }
        let title = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_rosco(
        f: &mut Frame,
        area: Rect,
        statuses: &[(char, LetterStatus)],
        current: Option<char>,
    ) {
        let lines: Vec<Line> = statuses
            .chunks(ROSCO_ROW_LENGTH)
            .map(|row| {
                let mut spans = vec![Span::raw(" ")];
                for &(letter, status) in row {
                    let (bg_color, fg_color) = status_colors(status);
                    let mut style = Style::default().fg(fg_color).bg(bg_color);
                    if current == Some(letter) {
                        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                    }
                    spans.push(Span::styled(format!(" {letter} "), style));
                    spans.push(Span::raw(" "));
                }
                Line::from(spans)
            })
            .collect();

        let paragraph =
            Paragraph::new(lines).block(Block::default().title("Rosco").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_clue(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        if let Some(view) = ctx.view {
            lines.push(Line::from(vec![Span::styled(
                format!("{}:", view.phrasing),
                HEADER_STYLE,
            )]));
            lines.push(Line::from(view.clue.clone()));
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::raw("Your answer: "),
                Span::styled(
                    format!("{}_", ctx.current_input),
                    Style::default().fg(Color::White).bg(Color::DarkGray),
                ),
            ]));
            lines.push(Line::from(""));
        }

        if !ctx.message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.message, ctx.message_style)]));
        }

        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Clue").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_summary(f: &mut Frame, area: Rect, summary: &Summary) {
        let header = Row::new(vec!["Letter", "Clue", "Given", "Expected", "Outcome"]).style(HEADER_STYLE);
        let rows = summary.entries.iter().map(|entry| {
            Row::new(vec![
                Cell::from(entry.letter.to_string()),
                Cell::from(entry.clue.clone()),
                Cell::from(entry.given_display().to_string()),
                Cell::from(entry.expected_answer.clone()),
                Cell::from(entry.outcome.label()).style(outcome_style(entry.outcome)),
            ])
        });
        let widths = [
            Constraint::Length(6),
            Constraint::Percentage(46),
            Constraint::Percentage(18),
            Constraint::Percentage(18),
            Constraint::Length(10),
        ];
        let title = format!(
            "Game over: {} | Final score {}",
            summary.termination_reason.describe(),
            summary.score_line()
        );
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().title(title).borders(Borders::ALL));
        f.render_widget(table, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::Playing => "Type your answer | ENTER: Submit | TAB: Pasapalabra | CTRL+R: Restart | ESC: Quit",
            TuiState::GameOver => "N: Play again | ESC: Quit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            // Quiet tick: let the game loop refresh the timer
            return Ok(None);
        }

        let Event::Key(key) = event::read()? else {
            debug_log!("handle_input() - Ignoring non-key event");
            return Ok(None);
        };

        // Only process Press events, ignore Release and Repeat to avoid double input
        if key.kind != event::KeyEventKind::Press {
            return Ok(None);
        }

        debug_log!(
            "handle_input() - Key event received: code={:?}, modifiers={:?}",
            key.code,
            key.modifiers
        );
        match self.state {
            TuiState::Playing => match playing_key_action(&mut self.prompt.input, key) {
                Ok(action) => {
                    self.prompt.error_message.clear();
                    Ok(action)
                }
                Err(error) => {
                    self.prompt.error_message = error.to_string();
                    Ok(None)
                }
            },
            TuiState::GameOver => Ok(game_over_key_action(key)),
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_turn(&mut self, view: &TurnView) {
        if self.state == TuiState::GameOver {
            // First turn after a restart
            self.state = TuiState::Playing;
            self.summary = None;
            self.prompt.clear();
        }
        self.status = format!(
            "Score {} / {} | Letter {}",
            view.score, view.total_questions, view.letter
        );
        self.view = Some(view.clone());
    }

    fn read_action(&mut self) -> Option<UserAction> {
        self.draw_or_log();
        match self.handle_input() {
            Ok(action) => {
                if let Some(ref action) = action {
                    info_log!("read_action() - Action received: {:?}", action);
                    self.prompt.note_action(action);
                }
                action
            }
            Err(e) => {
                debug_log!("read_action() - Input error: {}", e);
                Some(UserAction::Exit)
            }
        }
    }

    fn display_feedback(&mut self, feedback: &TurnFeedback) {
        self.prompt.show_feedback(feedback);
    }

    fn display_summary(&mut self, summary: &Summary) {
        self.state = TuiState::GameOver;
        self.summary = Some(summary.clone());
        self.status = format!("Game over - Final score {}", summary.score_line());
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.prompt.message = "Exiting...".to_string();
        self.prompt.message_style = MESSAGE_STYLE;
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
