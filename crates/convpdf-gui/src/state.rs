//! Application state management for the convpdf GUI

use convpdf_core::{
    Converter, FileConfig, FileDescriptor, Notice, Session, apply_env_overrides, load_config,
    save_config,
};
use tracing::warn;

/// Main application state (domain/persistent)
pub struct AppState {
    /// Configuration as loaded (plus environment overrides)
    pub config: FileConfig,

    /// Selector and client built from `config`; `None` when it is unusable
    pub converter: Option<Converter>,

    /// Why `converter` could not be built
    pub setup_error: Option<String>,

    /// Selected file and upload state
    pub session: Session,

    /// A pick is being resolved in the background
    pub resolving_pick: bool,

    /// Alert waiting to be acknowledged
    pub notice: Option<Notice>,
}

impl AppState {
    /// Load config from disk. Returns the state plus load warnings for the log.
    pub fn load() -> (Self, Vec<String>) {
        let load = load_config();
        let mut warnings = load.warnings;
        let mut config = load.config;
        apply_env_overrides(&mut config, &mut warnings);

        for warning in &warnings {
            warn!("{warning}");
        }

        (Self::with_config(config), warnings)
    }

    pub fn with_config(config: FileConfig) -> Self {
        let mut state = Self {
            config,
            converter: None,
            setup_error: None,
            session: Session::new(),
            resolving_pick: false,
            notice: None,
        };
        state.rebuild_converter();
        state
    }

    /// Rebuild the converter after the config changed.
    pub fn rebuild_converter(&mut self) {
        match Converter::from_config(&self.config) {
            Ok(converter) => {
                self.converter = Some(converter);
                self.setup_error = None;
            }
            Err(err) => {
                self.converter = None;
                self.setup_error = Some(err.to_string());
            }
        }
    }

    /// Save configuration to disk
    pub fn save_config(&self) -> Result<(), String> {
        save_config(&self.config).map_err(|e| e.to_string())
    }

    /// Store a resolved pick. The previous attempt's result no longer
    /// describes the selection, so the status returns to idle.
    pub fn apply_pick(&mut self, descriptor: Option<FileDescriptor>) {
        self.resolving_pick = false;
        self.session.reset();
        self.session.apply_selection(descriptor);
    }

    /// Whether the pick button should accept clicks.
    pub fn can_pick(&self) -> bool {
        !self.resolving_pick && !self.session.is_busy()
    }

    /// Whether the convert button should accept clicks.
    pub fn can_convert(&self) -> bool {
        self.converter.is_some() && !self.resolving_pick && !self.session.is_busy()
    }
}
