//! Glue between configuration, the selector and the client.

use tracing::{info, warn};

use crate::client::ConversionClient;
use crate::config::FileConfig;
use crate::error::SetupError;
use crate::selector::{FileSelector, default_scratch_dir};
use crate::session::{Notice, Session, UploadRejected};

/// Everything one screen (or one CLI run) needs to pick and convert.
#[derive(Debug, Clone)]
pub struct Converter {
    pub selector: FileSelector,
    pub client: ConversionClient,
}

impl Converter {
    pub fn from_config(config: &FileConfig) -> Result<Self, SetupError> {
        let endpoint = config.endpoint_url()?;
        let output_path = config.output_path();
        info!(
            endpoint = %endpoint,
            output = %output_path.display(),
            timeout_secs = config.request_timeout_secs,
            "Converter configured"
        );
        let client =
            ConversionClient::with_timeout(endpoint, output_path, config.request_timeout())?;
        Ok(Self {
            selector: FileSelector::new(default_scratch_dir()),
            client,
        })
    }

    pub fn new(selector: FileSelector, client: ConversionClient) -> Self {
        Self { selector, client }
    }

    /// Upload the session's current selection, honouring the busy flag.
    pub async fn convert_selected(&self, session: &mut Session) -> Notice {
        let descriptor = match session.begin_upload() {
            Ok(descriptor) => descriptor,
            Err(UploadRejected::NoFileSelected) => return Notice::no_file_selected(),
            Err(rejected @ UploadRejected::Busy) => {
                warn!("{rejected}");
                return Notice::error(format!("Failed to upload file: {rejected}"));
            }
        };
        let result = self.client.convert(Some(&descriptor)).await;
        session.finish_upload(&result)
    }
}
