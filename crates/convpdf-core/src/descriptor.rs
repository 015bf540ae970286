use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Content type used when neither the picker nor the file name tell us anything.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Display name used when a resource carries no usable name at all.
pub const FALLBACK_FILE_NAME: &str = "unknown_file";

/// A user-selected file, normalised so downstream code only ever sees a
/// filesystem path with a non-empty name and content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    source: PathBuf,
    display_name: String,
    content_type: String,
}

impl FileDescriptor {
    /// Build a descriptor, filling in the name and content type when missing.
    ///
    /// The name falls back to the last path component and then to
    /// [`FALLBACK_FILE_NAME`]. The content type falls back to a guess from the
    /// name's extension and then to [`DEFAULT_CONTENT_TYPE`].
    pub fn new(
        source: impl Into<PathBuf>,
        display_name: Option<&str>,
        content_type: Option<&str>,
    ) -> Self {
        let source = source.into();
        let display_name = non_empty(display_name)
            .map(str::to_string)
            .or_else(|| file_name_of(&source))
            .unwrap_or_else(|| FALLBACK_FILE_NAME.to_string());
        let content_type = non_empty(content_type)
            .map(str::to_string)
            .unwrap_or_else(|| guess_content_type(&display_name));

        Self {
            source,
            display_name,
            content_type,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }
}

/// Guess a MIME type from a file name's extension.
pub fn guess_content_type(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn file_name_of(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_supplied_metadata() {
        let d = FileDescriptor::new("/tmp/a.bin", Some("report.docx"), Some("application/x-test"));
        assert_eq!(d.display_name(), "report.docx");
        assert_eq!(d.content_type(), "application/x-test");
        assert_eq!(d.source(), Path::new("/tmp/a.bin"));
    }

    #[test]
    fn name_falls_back_to_path_component() {
        let d = FileDescriptor::new("/tmp/notes.txt", None, None);
        assert_eq!(d.display_name(), "notes.txt");
        assert_eq!(d.content_type(), "text/plain");
    }

    #[test]
    fn blank_name_is_treated_as_missing() {
        let d = FileDescriptor::new("/tmp/slides.pptx", Some("   "), Some(""));
        assert_eq!(d.display_name(), "slides.pptx");
        assert!(!d.content_type().is_empty());
    }

    #[test]
    fn name_falls_back_to_placeholder() {
        let d = FileDescriptor::new("/", None, None);
        assert_eq!(d.display_name(), FALLBACK_FILE_NAME);
        assert_eq!(d.content_type(), DEFAULT_CONTENT_TYPE);
    }

    #[test]
    fn unknown_extension_defaults_to_octet_stream() {
        let d = FileDescriptor::new("/tmp/blob.zzzunknown", None, None);
        assert_eq!(d.content_type(), DEFAULT_CONTENT_TYPE);
    }
}
