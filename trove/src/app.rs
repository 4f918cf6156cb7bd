//! Main application state and logic.

use tokio::sync::mpsc;
use trove_core::{Landmark, Waypoint, NOTES_UNAVAILABLE};

use crate::audio::AmbientAudio;
use crate::ui::theme::GameTheme;
use crate::worker::{WorkerRequest, WorkerResponse};

/// Which screen is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Name entry, shown until a login is accepted.
    #[default]
    Login,
    /// The hunt: log, map, and hotkeys.
    Game,
}

/// Kind of a log entry, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    /// Story text from the expedition.
    Story,
    /// Bookkeeping lines (restored history, hints).
    System,
    /// Validation and step failures.
    Error,
}

/// A single entry in the message log.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub content: String,
    pub kind: LogKind,
}

/// Main application state.
pub struct App {
    // Channel communication with the expedition worker
    pub request_tx: mpsc::Sender<WorkerRequest>,
    pub response_rx: mpsc::Receiver<WorkerResponse>,

    // UI state
    pub screen: Screen,
    pub theme: GameTheme,

    // Message log
    pub log: Vec<LogEntry>,
    pub log_scroll: usize,
    pub scroll_locked_to_bottom: bool,

    // Name input
    input_buffer: String,
    cursor_position: usize,

    // Map snapshot, updated per step
    pub player_name: String,
    pub hunter: Option<Waypoint>,
    pub landmark: Option<Landmark>,
    pub waypoints: Vec<Waypoint>,

    // Status
    status_message: Option<String>,
    pub run_in_progress: bool,
    pub should_quit: bool,

    pub audio: AmbientAudio,
}

impl App {
    /// Create the application with channel endpoints, the location notes
    /// (or their load error), and the audio controller.
    pub fn new(
        request_tx: mpsc::Sender<WorkerRequest>,
        response_rx: mpsc::Receiver<WorkerResponse>,
        notes: Result<Vec<String>, std::io::Error>,
        audio: AmbientAudio,
    ) -> Self {
        let mut app = Self {
            request_tx,
            response_rx,
            screen: Screen::default(),
            theme: GameTheme::default(),
            log: Vec::new(),
            log_scroll: 0,
            scroll_locked_to_bottom: true,
            input_buffer: String::new(),
            cursor_position: 0,
            player_name: String::new(),
            hunter: None,
            landmark: None,
            waypoints: Vec::new(),
            status_message: None,
            run_in_progress: false,
            should_quit: false,
            audio,
        };

        match notes {
            Ok(lines) => {
                for line in lines {
                    app.add_log(line, LogKind::Story);
                }
            }
            Err(e) => {
                tracing::warn!("location notes unavailable: {e}");
                app.add_log(NOTES_UNAVAILABLE.to_string(), LogKind::Error);
            }
        }

        app
    }

    /// Append a log entry, following the bottom unless the user scrolled
    /// away.
    pub fn add_log(&mut self, content: String, kind: LogKind) {
        self.log.push(LogEntry { content, kind });
        if self.scroll_locked_to_bottom {
            self.scroll_to_bottom();
        }
    }

    /// Apply a worker update to the UI state.
    pub fn handle_response(&mut self, response: WorkerResponse) {
        match response {
            WorkerResponse::Restored { history } => {
                if history.is_empty() {
                    self.add_log("No saved progress found.".to_string(), LogKind::System);
                } else {
                    self.add_log("Restored progress:".to_string(), LogKind::System);
                    for (i, entry) in history.iter().enumerate() {
                        self.add_log(format!("Step {}: {entry}", i + 1), LogKind::System);
                    }
                }
            }
            WorkerResponse::LoggedIn { name, welcome } => {
                self.player_name = name;
                self.screen = Screen::Game;
                self.add_log(welcome, LogKind::Story);
                self.audio.play();
                self.clear_status();
            }
            WorkerResponse::LoginFailed { message } => {
                self.add_log(message, LogKind::Error);
            }
            WorkerResponse::Step(outcome) => {
                self.add_log(outcome.message, LogKind::Story);
                self.hunter = Some(outcome.waypoint);
                self.landmark = outcome.landmark;
                self.waypoints.push(outcome.waypoint);
            }
            WorkerResponse::RunFinished { message } => {
                self.add_log(message, LogKind::Story);
                self.run_in_progress = false;
                self.set_status("Expedition complete");
            }
            WorkerResponse::RunFailed { error, consolation } => {
                self.add_log(error, LogKind::Error);
                self.add_log(consolation, LogKind::Story);
                self.run_in_progress = false;
                self.set_status("Expedition failed");
            }
            WorkerResponse::Cleared => {
                self.log.clear();
                self.log_scroll = 0;
                self.scroll_locked_to_bottom = true;
                self.waypoints.clear();
                self.hunter = None;
                self.landmark = None;
                self.run_in_progress = false;
                self.audio.stop();
                self.add_log("Progress cleared.".to_string(), LogKind::System);
            }
            WorkerResponse::Rejected { message } => {
                self.run_in_progress = false;
                self.set_status(message);
            }
        }
    }

    /// Submit the name input to the worker.
    pub fn submit_name(&mut self) {
        let name = std::mem::take(&mut self.input_buffer);
        self.cursor_position = 0;
        if self
            .request_tx
            .try_send(WorkerRequest::Login(name))
            .is_err()
        {
            self.set_status("Busy, please try again");
        }
    }

    /// Trigger a run, unless one is already underway.
    pub fn start_run(&mut self) {
        if self.run_in_progress {
            self.set_status("An expedition is already underway");
            return;
        }
        if self.request_tx.try_send(WorkerRequest::Start).is_ok() {
            self.run_in_progress = true;
            self.set_status("Expedition underway...");
        } else {
            self.set_status("Busy, please try again");
        }
    }

    /// Ask the worker to wipe progress.
    pub fn clear_progress(&mut self) {
        if self.request_tx.try_send(WorkerRequest::Clear).is_err() {
            self.set_status("Busy, please try again");
        }
    }

    // =========================================================================
    // Log scrolling
    // =========================================================================

    /// Scroll the log to the bottom and lock it there.
    pub fn scroll_to_bottom(&mut self) {
        // The widget caps this to the actual maximum.
        self.log_scroll = usize::MAX / 2;
        self.scroll_locked_to_bottom = true;
    }

    /// Conservative estimate of the maximum scroll offset.
    fn estimate_max_scroll(&self) -> usize {
        const ESTIMATED_WIDTH: usize = 60;
        const ESTIMATED_VISIBLE_HEIGHT: usize = 20;

        let estimated_lines: usize = self
            .log
            .iter()
            .map(|item| {
                item.content
                    .lines()
                    .map(|line| (line.len() / ESTIMATED_WIDTH).max(1))
                    .sum::<usize>()
            })
            .sum();

        estimated_lines.saturating_sub(ESTIMATED_VISIBLE_HEIGHT)
    }

    /// Scroll the log up, unlocking it from the bottom.
    pub fn scroll_up(&mut self, lines: usize) {
        let max_scroll = self.estimate_max_scroll();
        if self.log_scroll > max_scroll {
            self.log_scroll = max_scroll;
        }
        self.log_scroll = self.log_scroll.saturating_sub(lines);
        self.scroll_locked_to_bottom = false;
    }

    /// Scroll the log down.
    pub fn scroll_down(&mut self, lines: usize) {
        self.log_scroll = self.log_scroll.saturating_add(lines);
        let max_scroll = self.estimate_max_scroll();
        self.log_scroll = self.log_scroll.min(max_scroll + 100);
    }

    // =========================================================================
    // Name input editing (unicode-safe)
    // =========================================================================

    /// Handle a typed character.
    pub fn type_char(&mut self, c: char) {
        let byte_pos = self
            .input_buffer
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.input_buffer.len());
        self.input_buffer.insert(byte_pos, c);
        self.cursor_position += 1;
    }

    /// Handle backspace.
    pub fn backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            if let Some((byte_pos, ch)) = self.input_buffer.char_indices().nth(self.cursor_position)
            {
                self.input_buffer
                    .replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
            }
        }
    }

    /// Move cursor left.
    pub fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn cursor_right(&mut self) {
        let char_count = self.input_buffer.chars().count();
        self.cursor_position = (self.cursor_position + 1).min(char_count);
    }

    /// Move cursor to start.
    pub fn cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    /// Move cursor to end.
    pub fn cursor_end(&mut self) {
        self.cursor_position = self.input_buffer.chars().count();
    }

    // =========================================================================
    // Getters and setters
    // =========================================================================

    /// Current name input content.
    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    /// Current cursor position, in characters.
    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Current status message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Set the status message.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message.
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}
