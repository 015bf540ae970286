//! Per-screen conversion state: what is selected, whether an upload is in
//! flight, and what to tell the user when it ends.

use std::fmt;

use thiserror::Error;
use tracing::{info, warn};

use crate::client::ConversionReport;
use crate::descriptor::FileDescriptor;
use crate::error::ConvertError;

/// Lifecycle of one upload attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConversionState {
    #[default]
    Idle,
    Sending,
    Succeeded(ConversionReport),
    Failed(String),
}

impl ConversionState {
    pub fn is_busy(&self) -> bool {
        matches!(self, ConversionState::Sending)
    }
}

/// Why an upload trigger was ignored before any network traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UploadRejected {
    #[error("no file selected")]
    NoFileSelected,
    #[error("an upload is already in progress")]
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A user-facing alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: &'static str,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: "Success",
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: "Error",
            message: message.into(),
        }
    }

    pub fn no_file_selected() -> Self {
        Self::error("Please select a file first")
    }

    pub fn for_result(result: &Result<ConversionReport, ConvertError>) -> Self {
        match result {
            Ok(report) => {
                Self::success(format!("PDF file saved to: {}", report.output_path.display()))
            }
            Err(ConvertError::NoFileSelected) => Self::no_file_selected(),
            Err(err) => Self::error(format!("Failed to upload file: {err}")),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    selected: Option<FileDescriptor>,
    state: ConversionState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&FileDescriptor> {
        self.selected.as_ref()
    }

    pub fn state(&self) -> &ConversionState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    /// Replace the selection with a fresh pick result. `None` (cancel or
    /// failure) clears it.
    pub fn apply_selection(&mut self, descriptor: Option<FileDescriptor>) {
        match &descriptor {
            Some(d) => info!(name = d.display_name(), "Selection updated"),
            None => info!("Selection cleared"),
        }
        self.selected = descriptor;
    }

    /// Gate an upload trigger. On success the session is `Sending` and the
    /// caller owns the returned descriptor for the request.
    pub fn begin_upload(&mut self) -> Result<FileDescriptor, UploadRejected> {
        if self.state.is_busy() {
            warn!("Upload already in progress; ignoring trigger");
            return Err(UploadRejected::Busy);
        }
        let descriptor = self.selected.clone().ok_or_else(|| {
            warn!("Upload requested with no file selected");
            UploadRejected::NoFileSelected
        })?;
        self.state = ConversionState::Sending;
        Ok(descriptor)
    }

    /// Record the attempt's outcome and produce the alert to show.
    pub fn finish_upload(&mut self, result: &Result<ConversionReport, ConvertError>) -> Notice {
        self.state = match result {
            Ok(report) => ConversionState::Succeeded(report.clone()),
            Err(err) => ConversionState::Failed(err.to_string()),
        };
        Notice::for_result(result)
    }

    /// Back to `Idle`, keeping the selection.
    pub fn reset(&mut self) {
        if !self.state.is_busy() {
            self.state = ConversionState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use std::path::PathBuf;

    fn descriptor() -> FileDescriptor {
        FileDescriptor::new("/tmp/in.docx", Some("in.docx"), None)
    }

    #[test]
    fn upload_without_selection_is_rejected() {
        let mut session = Session::new();
        assert_eq!(session.begin_upload(), Err(UploadRejected::NoFileSelected));
        assert_eq!(session.state(), &ConversionState::Idle);
    }

    #[test]
    fn cancelled_pick_clears_previous_selection() {
        let mut session = Session::new();
        session.apply_selection(Some(descriptor()));
        session.apply_selection(None);
        assert!(session.selected().is_none());
        assert_eq!(session.begin_upload(), Err(UploadRejected::NoFileSelected));
    }

    #[test]
    fn second_trigger_while_sending_is_busy() {
        let mut session = Session::new();
        session.apply_selection(Some(descriptor()));
        assert_eq!(session.begin_upload(), Ok(descriptor()));
        assert!(session.is_busy());
        assert_eq!(session.begin_upload(), Err(UploadRejected::Busy));
    }

    #[test]
    fn finishing_moves_to_terminal_state_and_allows_retrigger() {
        let mut session = Session::new();
        session.apply_selection(Some(descriptor()));
        session.begin_upload().unwrap();

        let failure = Err(ConvertError::Http {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "bad file".to_string(),
        });
        let notice = session.finish_upload(&failure);
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.message.contains("500"));
        assert!(notice.message.contains("bad file"));
        assert!(matches!(session.state(), ConversionState::Failed(_)));

        assert!(session.begin_upload().is_ok());
        let report = ConversionReport {
            output_path: PathBuf::from("/docs/converted_file.pdf"),
            bytes_written: 3,
            status: StatusCode::OK,
        };
        let notice = session.finish_upload(&Ok(report.clone()));
        assert_eq!(notice.title, "Success");
        assert_eq!(notice.message, "PDF file saved to: /docs/converted_file.pdf");
        assert_eq!(session.state(), &ConversionState::Succeeded(report));

        session.reset();
        assert_eq!(session.state(), &ConversionState::Idle);
        assert!(session.selected().is_some());
    }

    #[test]
    fn no_selection_notice_text() {
        let notice = Notice::for_result(&Err(ConvertError::NoFileSelected));
        assert_eq!(notice.to_string(), "Error: Please select a file first");
    }
}
