use std::io;
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

use crate::data_uri::DataUriError;

/// The file chooser itself could not be shown or returned garbage.
#[derive(Debug, Error)]
#[error("file picker failed: {0}")]
pub struct PickerError(pub String);

impl PickerError {
    pub fn new<T: Into<String>>(message: T) -> Self {
        PickerError(message.into())
    }
}

/// Turning a picked resource into a [`crate::FileDescriptor`] failed.
#[derive(Debug, Error)]
pub enum SelectError {
    #[error(transparent)]
    Picker(#[from] PickerError),
    #[error("malformed data URI: {0}")]
    MalformedDataUri(#[from] DataUriError),
    #[error("failed to write scratch file {path}: {source}")]
    Scratch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot access {path}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{0} is not a regular file")]
    NotAFile(PathBuf),
}

/// A conversion attempt ended without a saved PDF.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("no file selected")]
    NoFileSelected,
    #[error("failed to read {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP error! status: {}, message: {body}", .status.as_u16())]
    Http { status: StatusCode, body: String },
    #[error("failed to write {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The configuration could not be turned into a working client.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
