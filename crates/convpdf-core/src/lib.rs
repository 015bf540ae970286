//! Core library crate: file selection, data URI handling and the
//! convert-to-pdf HTTP client shared by the CLI and GUI.

pub mod client;
pub mod config;
pub mod data_uri;
pub mod descriptor;
pub mod error;
pub mod logging;
pub mod runtime;
pub mod selector;
pub mod session;

pub use client::{ConversionClient, ConversionReport};
pub use config::{
    ConfigError, ConfigLoadResult, ConfigSource, FileConfig, ThemePreference, UiPreferences,
    apply_env_overrides, config_directory, config_path, load_config, save_config,
};
pub use descriptor::FileDescriptor;
pub use error::{ConvertError, PickerError, SelectError, SetupError};
pub use runtime::Converter;
pub use selector::{FilePicker, FileSelector, PickResult, PickedResource};
pub use session::{ConversionState, Notice, NoticeLevel, Session, UploadRejected};
