//! File selection: run a picker, normalise whatever it hands back into a
//! [`FileDescriptor`] backed by a real file on disk.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::data_uri::{self, DataUri};
use crate::descriptor::{DEFAULT_CONTENT_TYPE, FileDescriptor};
use crate::error::{PickerError, SelectError};

const SCRATCH_DIR_NAME: &str = "convpdf";

/// Raw result of a pick: a path or an inline `data:` URI plus whatever
/// metadata the chooser reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickedResource {
    pub location: String,
    pub name: Option<String>,
    pub mime_type: Option<String>,
}

impl PickedResource {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self {
            location: path.to_string_lossy().into_owned(),
            name: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            mime_type: None,
        }
    }
}

/// Outcome of showing a chooser. `Ok(None)` means the user cancelled.
pub type PickResult = Result<Option<PickedResource>, PickerError>;

/// Something that can ask the user for one file.
pub trait FilePicker {
    fn pick(&self) -> PickResult;
}

impl<F> FilePicker for F
where
    F: Fn() -> PickResult,
{
    fn pick(&self) -> PickResult {
        self()
    }
}

/// Default location for materialised data URIs.
pub fn default_scratch_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(SCRATCH_DIR_NAME)
}

#[derive(Debug, Clone)]
pub struct FileSelector {
    scratch_dir: PathBuf,
}

impl Default for FileSelector {
    fn default() -> Self {
        Self::new(default_scratch_dir())
    }
}

impl FileSelector {
    pub fn new(scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            scratch_dir: scratch_dir.into(),
        }
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    /// Run `picker` and resolve its result. Cancellation and every failure
    /// yield `None`; failures are logged.
    pub async fn pick<P: FilePicker + ?Sized>(&self, picker: &P) -> Option<FileDescriptor> {
        info!("Picking document");
        self.select(picker.pick()).await
    }

    /// Resolve a pick result obtained elsewhere (e.g. a dialog run on the UI
    /// thread). Same error policy as [`FileSelector::pick`].
    pub async fn select(&self, picked: PickResult) -> Option<FileDescriptor> {
        let resource = match picked {
            Ok(Some(resource)) => resource,
            Ok(None) => {
                info!("Picker cancelled or returned no file");
                return None;
            }
            Err(err) => {
                warn!(error = %err, "Error picking document");
                return None;
            }
        };

        match self.resolve(resource).await {
            Ok(descriptor) => {
                info!(
                    path = %descriptor.source().display(),
                    name = descriptor.display_name(),
                    mime = descriptor.content_type(),
                    "Selected file"
                );
                Some(descriptor)
            }
            Err(err) => {
                warn!(error = %err, "Error resolving picked document");
                None
            }
        }
    }

    /// Turn a picked resource into a descriptor, materialising data URIs.
    pub async fn resolve(&self, resource: PickedResource) -> Result<FileDescriptor, SelectError> {
        debug!(
            resource = %serde_json::to_string(&resource).unwrap_or_default(),
            "Resolving picked resource"
        );

        if data_uri::is_data_uri(&resource.location) {
            return self.materialise_data_uri(&resource).await;
        }

        let path = PathBuf::from(&resource.location);
        let metadata = fs::metadata(&path)
            .await
            .map_err(|source| SelectError::Metadata {
                path: path.clone(),
                source,
            })?;
        if !metadata.is_file() {
            return Err(SelectError::NotAFile(path));
        }
        debug!(size = metadata.len(), "File info resolved");

        Ok(FileDescriptor::new(
            path,
            resource.name.as_deref(),
            resource.mime_type.as_deref(),
        ))
    }

    async fn materialise_data_uri(
        &self,
        resource: &PickedResource,
    ) -> Result<FileDescriptor, SelectError> {
        info!("Detected data URI");
        let uri = DataUri::parse(&resource.location)?;

        let content_type = uri
            .media_type()
            .or(resource.mime_type.as_deref().filter(|m| !m.trim().is_empty()))
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        let name = match resource.name.as_deref().and_then(scratch_file_name) {
            Some(name) => name,
            None => {
                let name = data_uri::synthesize_file_name(&content_type, Utc::now());
                debug!(name = %name, "Generated file name");
                name
            }
        };

        let bytes = uri.decode()?;
        let path = self.scratch_dir.join(&name);
        fs::create_dir_all(&self.scratch_dir)
            .await
            .map_err(|source| SelectError::Scratch {
                path: self.scratch_dir.clone(),
                source,
            })?;
        fs::write(&path, &bytes)
            .await
            .map_err(|source| SelectError::Scratch {
                path: path.clone(),
                source,
            })?;
        info!(path = %path.display(), bytes = bytes.len(), "Saved data URI to scratch file");

        Ok(FileDescriptor::new(path, Some(&name), Some(&content_type)))
    }
}

/// Reduce a picker-supplied name to a bare file name safe to join onto the
/// scratch directory.
fn scratch_file_name(name: &str) -> Option<String> {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if base.is_empty() || base == "." || base == ".." {
        None
    } else {
        Some(base.to_string())
    }
}
