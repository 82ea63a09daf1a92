//! Application state and event handling.
//!
//! This module implements the Elm Architecture pattern for state management,
//! with a centralized App struct holding all application state. The guide is
//! fetched once; day switching and scrolling only re-read what is already
//! in memory.

#![allow(dead_code)]

use std::time::Instant;

use chrono::{NaiveDate, Timelike, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api::GuideMessage;
use crate::config::Config;
use crate::grid::{self, GridState};
use crate::models::{Channel, Program};
use crate::timeutil;

/// Approximate grid width in cells, used when centering the viewport
const GRID_VIEWPORT_CELLS: u16 = 96;

/// Log entry for the console area
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: Instant,
    pub message: String,
    pub level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            timestamp: Instant::now(),
            message: message.into(),
            level: LogLevel::Info,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            timestamp: Instant::now(),
            message: message.into(),
            level: LogLevel::Success,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            timestamp: Instant::now(),
            message: message.into(),
            level: LogLevel::Warning,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            timestamp: Instant::now(),
            message: message.into(),
            level: LogLevel::Error,
        }
    }
}

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,

    /// Show help overlay
    pub show_help: bool,

    /// Whether the one-shot fetch is still in flight
    pub is_loading: bool,

    /// Fatal load error, shown instead of the grid
    pub load_error: Option<String>,

    /// Channels in first-appearance order
    pub channels: Vec<Channel>,

    /// Every program from the feed, across all days
    pub programs: Vec<Program>,

    /// Seven consecutive local dates starting today
    pub week: Vec<NaiveDate>,

    /// Local date at startup, anchoring the 7-day window
    pub today: NaiveDate,

    /// Index into `week` for the day being shown
    pub selected_day: usize,

    /// Grid widget state
    pub grid: GridState,

    /// Log messages
    pub logs: Vec<LogEntry>,
    /// Maximum number of log entries to keep
    max_logs: usize,

    /// Frame counter for the loading spinner
    pub frame_count: u64,
}

impl App {
    /// Create a new application instance
    pub fn new(config: &Config) -> Self {
        let week = timeutil::week_dates();
        let today = week
            .first()
            .copied()
            .unwrap_or_else(|| chrono::Local::now().date_naive());

        let mut app = Self {
            should_quit: false,
            show_help: false,
            is_loading: true,
            load_error: None,
            channels: Vec::new(),
            programs: Vec::new(),
            week,
            today,
            selected_day: 0,
            grid: GridState::default(),
            logs: Vec::new(),
            max_logs: 100,
            frame_count: 0,
        };

        app.log(LogEntry::info("EPG TUI initialized"));
        app.log(LogEntry::info(format!(
            "Fetching guide from {}",
            config.guide_url
        )));
        if config.api_key.is_none() {
            app.log(LogEntry::warning(
                "EPG_API_KEY is not set, requesting without a key",
            ));
        }
        app
    }

    /// Add a log entry
    pub fn log(&mut self, entry: LogEntry) {
        self.logs.push(entry);
        if self.logs.len() > self.max_logs {
            self.logs.remove(0);
        }
    }

    /// Handle the fetch task's result
    pub fn handle_api_message(&mut self, message: GuideMessage) {
        match message {
            GuideMessage::Loaded(guide) => {
                let channel_count = guide.channels.len();
                let program_count = guide.programs.len();

                self.channels = guide.channels;
                self.programs = guide.programs;
                self.load_error = None;
                self.is_loading = false;
                self.grid.selected_channel = 0;
                self.grid.selected_program = None;

                self.log(LogEntry::success(format!(
                    "Loaded {} channels, {} programs",
                    channel_count, program_count
                )));
                if guide.skipped_records > 0 {
                    self.log(LogEntry::warning(format!(
                        "Skipped {} malformed program records",
                        guide.skipped_records
                    )));
                }

                self.center_on_now();
            }
            GuideMessage::Failed(error) => {
                // The previous guide, if any, stays on screen untouched
                self.is_loading = false;
                self.log(LogEntry::error(format!("Guide load failed: {}", error)));
                self.load_error = Some(error);
            }
        }
    }

    /// The local date currently shown
    pub fn selected_date(&self) -> NaiveDate {
        self.week
            .get(self.selected_day)
            .copied()
            .unwrap_or(self.today)
    }

    /// Programs whose start falls on the selected local day
    pub fn day_programs(&self) -> Vec<&Program> {
        let selected = Some(self.selected_date());
        self.programs
            .iter()
            .filter(|p| timeutil::same_day(timeutil::local_day(&p.start), selected))
            .collect()
    }

    /// Current UTC hour when the shown day is the current local date,
    /// for the now marker
    pub fn now_hour(&self) -> Option<f64> {
        if self.selected_date() == current_local_date() {
            Some(current_utc_hour())
        } else {
            None
        }
    }

    fn day_changed(&mut self) {
        self.grid.selected_program = None;
    }

    /// Step to the next day, stopping at the end of the week
    pub fn next_day(&mut self) {
        if self.selected_day + 1 < self.week.len() {
            self.selected_day += 1;
            self.day_changed();
        }
    }

    /// Step to the previous day, stopping at today
    pub fn previous_day(&mut self) {
        if self.selected_day > 0 {
            self.selected_day -= 1;
            self.day_changed();
        }
    }

    /// Jump straight to a day by index; out-of-range picks are ignored
    pub fn select_day(&mut self, index: usize) {
        if index < self.week.len() && index != self.selected_day {
            self.selected_day = index;
            self.day_changed();
        }
    }

    /// Jump back to today
    pub fn jump_today(&mut self) {
        if self.selected_day != 0 {
            self.selected_day = 0;
            self.day_changed();
        }
    }

    /// Scroll so the current time sits mid-viewport (current date only)
    pub fn center_on_now(&mut self) {
        if self.selected_date() == current_local_date() {
            self.grid.center_on_hour(current_utc_hour(), GRID_VIEWPORT_CELLS);
        }
    }

    /// Move the program cursor right within the selected channel's day
    pub fn select_next_program(&mut self) {
        self.move_program_cursor(1);
    }

    /// Move the program cursor left within the selected channel's day
    pub fn select_previous_program(&mut self) {
        self.move_program_cursor(-1);
    }

    fn move_program_cursor(&mut self, step: i64) {
        let Some(channel) = self.channels.get(self.grid.selected_channel) else {
            return;
        };
        let channel_id = channel.id.clone();

        let day = self.day_programs();
        let list = grid::channel_programs(&day, &channel_id);
        if list.is_empty() {
            self.grid.selected_program = None;
            return;
        }

        let total = list.len();
        let next = match self.grid.selected_program {
            Some(i) => (i as i64 + step).rem_euclid(total as i64) as usize,
            None => 0,
        };
        let hour = list.get(next).map(|p| timeutil::utc_fractional_hour(&p.start));

        self.grid.selected_program = Some(next);
        if let Some(hour) = hour {
            self.grid.center_on_hour(hour, GRID_VIEWPORT_CELLS);
        }
    }

    /// Handle key events
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Help overlay swallows everything except its dismiss keys
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter) {
                self.show_help = false;
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            KeyCode::Left => {
                let amount = if key.modifiers.contains(KeyModifiers::SHIFT) {
                    6.0
                } else {
                    1.0
                };
                self.grid.scroll_left(amount);
            }
            KeyCode::Right => {
                let amount = if key.modifiers.contains(KeyModifiers::SHIFT) {
                    6.0
                } else {
                    1.0
                };
                self.grid.scroll_right(amount);
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.grid.select_next_channel(self.channels.len());
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.grid.select_previous_channel(self.channels.len());
            }
            KeyCode::Char('h') => {
                self.select_previous_program();
            }
            KeyCode::Char('l') => {
                self.select_next_program();
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.grid.zoom_in();
            }
            KeyCode::Char('-') => {
                self.grid.zoom_out();
            }
            KeyCode::Char('[') => {
                self.previous_day();
            }
            KeyCode::Char(']') => {
                self.next_day();
            }
            KeyCode::Char('t') => {
                self.jump_today();
            }
            KeyCode::Char('c') => {
                self.center_on_now();
            }
            KeyCode::Char(c @ '1'..='7') => {
                self.select_day(c as usize - '1' as usize);
            }
            KeyCode::Home => {
                self.grid.scroll_hours = 0.0;
            }
            _ => {}
        }
    }

    /// Advance the frame counter (called every tick)
    pub fn tick(&mut self) {
        self.frame_count = self.frame_count.wrapping_add(1);
    }

    /// Get the status bar text
    pub fn status_text(&self) -> String {
        let loading = if self.is_loading { " [Loading...]" } else { "" };

        format!(
            "{} channels | {} programs{} | {} | {} cells/h | ?: Help | q: Quit",
            self.channels.len(),
            self.programs.len(),
            loading,
            self.selected_date().format("%a %d %b"),
            self.grid.cells_per_hour
        )
    }
}

fn current_utc_hour() -> f64 {
    let now = Utc::now();
    now.hour() as f64 + now.minute() as f64 / 60.0 + now.second() as f64 / 3600.0
}

fn current_local_date() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::NormalizedGuide;
    use chrono::{Duration, Local, TimeZone};

    fn test_config() -> Config {
        Config {
            guide_url: "http://example.test/allEpg".to_string(),
            api_key: None,
        }
    }

    fn channel(id: &str) -> Channel {
        Channel {
            id: id.to_string(),
            name: format!("Channel {}", id),
            logo_url: None,
        }
    }

    fn program_on(id: &str, channel_id: &str, date: NaiveDate) -> Program {
        let start = Local
            .from_local_datetime(&date.and_hms_opt(12, 0, 0).unwrap())
            .single()
            .unwrap();
        let end = start + Duration::minutes(30);
        Program {
            id: id.to_string(),
            title: Some(format!("Show {}", id)),
            start: start.to_rfc3339(),
            end: end.to_rfc3339(),
            channel_id: channel_id.to_string(),
            description: None,
        }
    }

    fn loaded_guide(app: &App) -> NormalizedGuide {
        NormalizedGuide {
            channels: vec![channel("c1")],
            programs: vec![
                program_on("p1", "c1", app.today),
                program_on("p2", "c1", app.today + Duration::days(1)),
            ],
            skipped_records: 0,
        }
    }

    #[test]
    fn test_loaded_guide_replaces_collections() {
        let mut app = App::new(&test_config());
        assert!(app.is_loading);

        let guide = loaded_guide(&app);
        app.handle_api_message(GuideMessage::Loaded(guide));

        assert!(!app.is_loading);
        assert!(app.load_error.is_none());
        assert_eq!(app.channels.len(), 1);
        assert_eq!(app.programs.len(), 2);
    }

    #[test]
    fn test_failed_load_preserves_existing_guide() {
        let mut app = App::new(&test_config());
        let guide = loaded_guide(&app);
        app.handle_api_message(GuideMessage::Loaded(guide));

        app.handle_api_message(GuideMessage::Failed("API error: 500".to_string()));

        assert_eq!(app.channels.len(), 1);
        assert_eq!(app.programs.len(), 2);
        assert_eq!(app.load_error.as_deref(), Some("API error: 500"));
        assert!(!app.is_loading);
    }

    #[test]
    fn test_skipped_records_are_logged_as_warning() {
        let mut app = App::new(&test_config());
        let mut guide = loaded_guide(&app);
        guide.skipped_records = 3;
        app.handle_api_message(GuideMessage::Loaded(guide));

        assert!(app
            .logs
            .iter()
            .any(|e| e.level == LogLevel::Warning && e.message.contains("Skipped 3")));
    }

    #[test]
    fn test_day_filter_matches_local_day() {
        let mut app = App::new(&test_config());
        let guide = loaded_guide(&app);
        app.handle_api_message(GuideMessage::Loaded(guide));

        let today: Vec<&str> = app.day_programs().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(today, vec!["p1"]);

        app.next_day();
        let tomorrow: Vec<&str> = app.day_programs().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(tomorrow, vec!["p2"]);
    }

    #[test]
    fn test_day_stepping_clamps_to_week() {
        let mut app = App::new(&test_config());
        for _ in 0..10 {
            app.next_day();
        }
        assert_eq!(app.selected_day, 6);
        for _ in 0..10 {
            app.previous_day();
        }
        assert_eq!(app.selected_day, 0);
    }

    #[test]
    fn test_day_pick_out_of_range_is_ignored() {
        let mut app = App::new(&test_config());
        app.select_day(4);
        assert_eq!(app.selected_day, 4);
        app.select_day(9);
        assert_eq!(app.selected_day, 4);
        app.jump_today();
        assert_eq!(app.selected_day, 0);
    }

    #[test]
    fn test_changing_day_clears_program_cursor() {
        let mut app = App::new(&test_config());
        let guide = loaded_guide(&app);
        app.handle_api_message(GuideMessage::Loaded(guide));

        app.select_next_program();
        assert_eq!(app.grid.selected_program, Some(0));
        app.next_day();
        assert!(app.grid.selected_program.is_none());
    }

    #[test]
    fn test_now_marker_only_on_today() {
        let mut app = App::new(&test_config());
        assert!(app.now_hour().is_some());
        app.next_day();
        assert!(app.now_hour().is_none());
    }

    #[test]
    fn test_now_marker_tracks_the_current_date() {
        // A process that has been running since yesterday
        let mut app = App::new(&test_config());
        let yesterday = Local::now().date_naive() - Duration::days(1);
        app.today = yesterday;
        app.week = timeutil::week_from(yesterday);

        assert!(app.now_hour().is_none());

        app.select_day(1);
        assert!(app.now_hour().is_some());
    }

    #[test]
    fn test_center_on_now_only_acts_on_the_current_date() {
        let mut app = App::new(&test_config());
        let yesterday = Local::now().date_naive() - Duration::days(1);
        app.today = yesterday;
        app.week = timeutil::week_from(yesterday);

        app.grid.scroll_hours = 5.0;
        app.center_on_now();
        assert_eq!(app.grid.scroll_hours, 5.0);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new(&test_config());
        app.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(app.should_quit);

        let mut app = App::new(&test_config());
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);

        let mut app = App::new(&test_config());
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE));
        assert!(!app.should_quit);
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let mut app = App::new(&test_config());
        app.handle_key(KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE));
        assert!(app.show_help);

        app.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(!app.should_quit);
        assert!(app.show_help);

        app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert!(!app.show_help);
    }
}
