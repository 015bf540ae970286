//! HTTP client for the remote `convert-to-pdf` service.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use reqwest::multipart::{Form, Part};
use reqwest::{StatusCode, Url};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::descriptor::{DEFAULT_CONTENT_TYPE, FileDescriptor};
use crate::error::ConvertError;

/// Multipart field carrying the uploaded file.
pub const FILE_FIELD: &str = "file";

/// What a successful conversion produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub output_path: PathBuf,
    pub bytes_written: u64,
    pub status: StatusCode,
}

#[derive(Debug, Clone)]
pub struct ConversionClient {
    http: reqwest::Client,
    endpoint: Url,
    output_path: PathBuf,
}

impl ConversionClient {
    /// Client without a request timeout; a hung server stalls the attempt.
    pub fn new(endpoint: Url, output_path: impl Into<PathBuf>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            output_path: output_path.into(),
        }
    }

    pub fn with_timeout(
        endpoint: Url,
        output_path: impl Into<PathBuf>,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            endpoint,
            output_path: output_path.into(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Upload the selected file and save the returned PDF, replacing any
    /// previous output. With no selection nothing is sent.
    pub async fn convert(
        &self,
        descriptor: Option<&FileDescriptor>,
    ) -> Result<ConversionReport, ConvertError> {
        let Some(descriptor) = descriptor else {
            warn!("No file selected");
            return Err(ConvertError::NoFileSelected);
        };
        info!(name = descriptor.display_name(), "Preparing to upload file");

        let bytes = fs::read(descriptor.source())
            .await
            .map_err(|source| ConvertError::ReadInput {
                path: descriptor.source().to_path_buf(),
                source,
            })?;
        let size = bytes.len();

        let content_type = match descriptor.content_type().parse::<mime_guess::Mime>() {
            Ok(_) => descriptor.content_type(),
            Err(_) => {
                warn!(
                    mime = descriptor.content_type(),
                    "Unparseable content type, sending as binary"
                );
                DEFAULT_CONTENT_TYPE
            }
        };

        // reqwest owns the boundary and the multipart Content-Type header.
        let part = Part::bytes(bytes)
            .file_name(descriptor.display_name().to_string())
            .mime_str(content_type)?;
        let form = Form::new().part(FILE_FIELD, part);
        debug!(bytes = size, "Multipart form created");

        info!(endpoint = %self.endpoint, "Sending request to server");
        let started = Instant::now();
        let response = self
            .http
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;
        let status = response.status();
        info!(
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Response received"
        );

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => {
                    warn!(status = status.as_u16(), error = %err, "Failed to read error body");
                    format!("<unreadable response body: {err}>")
                }
            };
            warn!(status = status.as_u16(), body = %body, "Conversion rejected");
            return Err(ConvertError::Http { status, body });
        }

        let pdf = response.bytes().await?;
        debug!(bytes = pdf.len(), "Payload received");
        self.write_output(&pdf).await?;
        info!(path = %self.output_path.display(), "File saved");

        Ok(ConversionReport {
            output_path: self.output_path.clone(),
            bytes_written: pdf.len() as u64,
            status,
        })
    }

    async fn write_output(&self, pdf: &[u8]) -> Result<(), ConvertError> {
        let to_error = |source: std::io::Error| ConvertError::WriteOutput {
            path: self.output_path.clone(),
            source,
        };
        if let Some(parent) = self.output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(to_error)?;
        }

        // The previous PDF stays intact until the new one is complete.
        let partial = partial_path(&self.output_path);
        let written = match fs::write(&partial, pdf).await {
            Ok(()) => fs::rename(&partial, &self.output_path).await,
            Err(err) => Err(err),
        };
        if let Err(err) = written {
            if let Err(cleanup) = fs::remove_file(&partial).await {
                debug!(path = %partial.display(), error = %cleanup, "No partial output to remove");
            }
            return Err(to_error(err));
        }
        Ok(())
    }
}

/// Sibling of `output` used while a download is being written.
fn partial_path(output: &Path) -> PathBuf {
    let mut name = output
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    output.with_file_name(name)
}
