//! UI-specific state (ephemeral)

use std::collections::VecDeque;

use convpdf_core::ThemePreference;

/// Technical log capacity
pub const MAX_LOG_ENTRIES: usize = 200;

/// UI-specific state that doesn't need to be persisted
#[derive(Clone)]
pub struct UiState {
    /// Current theme (dark/light)
    pub theme: Theme,

    /// Technical log visibility
    pub technical_log_expanded: bool,

    /// Settings section visibility
    pub settings_expanded: bool,

    /// Technical log entries (max 200)
    pub technical_log: VecDeque<LogEntry>,

    /// Endpoint text being edited in settings
    pub endpoint_input: String,

    /// Output directory text being edited in settings
    pub output_dir_input: String,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            theme: Theme::Dark,
            technical_log_expanded: true,
            settings_expanded: false,
            technical_log: VecDeque::with_capacity(MAX_LOG_ENTRIES),
            endpoint_input: String::new(),
            output_dir_input: String::new(),
        }
    }

    /// Add a log entry, dropping the oldest beyond capacity
    pub fn add_log_entry(&mut self, entry: LogEntry) {
        if self.technical_log.len() >= MAX_LOG_ENTRIES {
            self.technical_log.pop_front();
        }
        self.technical_log.push_back(entry);
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

/// Theme selection
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Theme {
    Dark,
    Light,
}

impl From<ThemePreference> for Theme {
    fn from(value: ThemePreference) -> Self {
        match value {
            ThemePreference::Dark => Theme::Dark,
            ThemePreference::Light => Theme::Light,
        }
    }
}

impl From<Theme> for ThemePreference {
    fn from(value: Theme) -> Self {
        match value {
            Theme::Dark => ThemePreference::Dark,
            Theme::Light => ThemePreference::Light,
        }
    }
}

/// Technical log entry
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
}

/// Log level for coloring
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}
