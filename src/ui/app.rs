//! Main TUI application state and logic

use super::panes::{
    render_loops_pane, render_source_pane, render_status_bar, render_tape_pane,
    render_terminal_pane, LoopsRenderData, SourceRenderData, SourceScrollState, StatusRenderData,
    TapeScrollState,
};
use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::loader::SourceLocation;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Terminal,
    Tape,
    Loops,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> terminal -> tape -> loops)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Terminal,
            FocusedPane::Terminal => FocusedPane::Tape,
            FocusedPane::Tape => FocusedPane::Loops,
            FocusedPane::Loops => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Loops,
            FocusedPane::Terminal => FocusedPane::Source,
            FocusedPane::Tape => FocusedPane::Terminal,
            FocusedPane::Loops => FocusedPane::Tape,
        }
    }
}

/// A fatal error that ended the recorded run
#[derive(Debug, Clone)]
pub struct ErrorState {
    pub message: String,
    /// Source position of the failing instruction, when it has one
    pub location: Option<SourceLocation>,
}

impl From<&RuntimeError> for ErrorState {
    fn from(error: &RuntimeError) -> Self {
        ErrorState {
            message: error.to_string(),
            location: error.location().map(|l| l.source),
        }
    }
}

/// The main application state
pub struct App {
    /// Interpreter holding the recorded history
    pub interpreter: Interpreter,

    /// The source code being executed
    pub source_code: String,

    /// Error that stopped recording, shown on the last snapshot
    pub error_state: Option<ErrorState>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll state
    pub source_scroll: SourceScrollState,
    pub tape_scroll: TapeScrollState,
    pub loops_scroll: usize,
    /// None follows the newest output
    pub terminal_scroll: Option<usize>,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app over a recorded interpreter
    pub fn new(interpreter: Interpreter, source_code: String, error: Option<&RuntimeError>) -> Self {
        let error_state = error.map(ErrorState::from);
        let status_message = match &error_state {
            Some(_) => "Recording stopped by an error (press ↵ to see it)".to_string(),
            None => String::from("Ready!"),
        };

        App {
            interpreter,
            source_code,
            error_state,
            focused_pane: FocusedPane::Source,
            source_scroll: SourceScrollState::default(),
            tape_scroll: TapeScrollState::default(),
            loops_scroll: 0,
            terminal_scroll: None,
            should_quit: false,
            status_message,
            is_playing: false,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Handle auto-play mode
            if self.is_playing && self.last_play_time.elapsed() >= Duration::from_millis(250) {
                if self.interpreter.step_forward().is_ok() {
                    self.status_message = "Playing...".to_string();
                    self.terminal_scroll = None;
                } else {
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Whether the last recorded snapshot is on screen
    fn at_last_snapshot(&self) -> bool {
        self.interpreter.history_position() + 1 >= self.interpreter.total_snapshots()
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // 4 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(pane_area);

        // Left column: Source (top) | Terminal (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        // Right column: Tape (top) | Machine (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[1]);

        // The error belongs to the step after the last snapshot
        let at_end = self.at_last_snapshot();
        let error = self.error_state.as_ref().filter(|_| at_end);

        render_source_pane(
            frame,
            left_rows[0],
            SourceRenderData {
                source_code: &self.source_code,
                table: self.interpreter.table(),
                current: self.interpreter.current_location(),
                error: error.and_then(|e| e.location),
            },
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        render_terminal_pane(
            frame,
            left_rows[1],
            self.interpreter.terminal(),
            self.focused_pane == FocusedPane::Terminal,
            &mut self.terminal_scroll,
        );

        render_tape_pane(
            frame,
            right_rows[0],
            self.interpreter.tape(),
            self.interpreter.register(),
            self.focused_pane == FocusedPane::Tape,
            &mut self.tape_scroll,
        );

        render_loops_pane(
            frame,
            right_rows[1],
            LoopsRenderData {
                machine: self.interpreter.machine(),
                program: self.interpreter.program(),
                ip: self.interpreter.ip(),
                cycles: self.interpreter.cycles(),
                halted: self.interpreter.is_halted(),
            },
            self.focused_pane == FocusedPane::Loops,
            &mut self.loops_scroll,
        );

        let message = match error {
            Some(e) => e.message.as_str(),
            None => self.status_message.as_str(),
        };
        render_status_bar(
            frame,
            status_area,
            StatusRenderData {
                message,
                current_step: self.interpreter.history_position(),
                total_steps: self.interpreter.total_snapshots(),
                has_error: error.is_some(),
                is_playing: self.is_playing,
            },
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c as usize - '0' as usize;
                let stepped = (0..n)
                    .take_while(|_| self.interpreter.step_forward().is_ok())
                    .count();
                self.status_message = format!("Stepped forward {} step(s)", stepped);
                self.terminal_scroll = None;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.step_backward();
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.step_forward();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Tape => {
                    self.tape_scroll.offset = self.tape_scroll.offset.saturating_sub(1);
                }
                FocusedPane::Loops => {
                    self.loops_scroll = self.loops_scroll.saturating_sub(1);
                }
                FocusedPane::Terminal => {
                    // The first press pins the view at the newest output
                    let offset = self.terminal_scroll.unwrap_or(usize::MAX);
                    self.terminal_scroll = Some(offset.saturating_sub(1));
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling down makes the current line move up visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Tape => {
                    self.tape_scroll.offset = self.tape_scroll.offset.saturating_add(1);
                }
                FocusedPane::Loops => {
                    self.loops_scroll = self.loops_scroll.saturating_add(1);
                }
                FocusedPane::Terminal => {
                    if let Some(offset) = self.terminal_scroll {
                        self.terminal_scroll = Some(offset.saturating_add(1));
                    }
                }
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        self.last_play_time = Instant::now()
                            .checked_sub(Duration::from_secs(1))
                            .unwrap_or(Instant::now());
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.status_message = match self.interpreter.fast_forward_to_end() {
                    Ok(()) => "Jumped to end".to_string(),
                    Err(e) => format!("Cannot jump to end: {}", e),
                };
                self.terminal_scroll = None;
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.status_message = match self.interpreter.rewind_to_start() {
                    Ok(()) => "Jumped to start".to_string(),
                    Err(e) => format!("Cannot jump to start: {}", e),
                };
                self.terminal_scroll = None;
            }
            _ => {}
        }
    }

    /// Step forward in execution
    fn step_forward(&mut self) {
        match self.interpreter.step_forward() {
            Ok(()) => {
                self.status_message = "Stepped forward".to_string();
                self.terminal_scroll = None;
            }
            Err(RuntimeError::HistoryOperationFailed { message }) => {
                self.status_message = format!("Cannot step forward: {}", message);
            }
            Err(e) => {
                self.status_message = format!("Error: {}", e);
            }
        }
    }

    /// Step backward in execution
    fn step_backward(&mut self) {
        match self.interpreter.step_backward() {
            Ok(()) => {
                self.status_message = "Stepped backward".to_string();
                self.terminal_scroll = None;
            }
            Err(RuntimeError::HistoryOperationFailed { message }) => {
                self.status_message = format!("Cannot step backward: {}", message);
            }
            Err(e) => {
                self.status_message = format!("Error: {}", e);
            }
        }
    }
}
