use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};
use convpdf_core::FileConfig;

/// Top-level CLI entrypoint.
#[derive(Parser, Debug, Clone)]
#[command(version, about = "Upload a file to a convert-to-pdf service and save the PDF", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub convert: ConvertArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Supported subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Configuration management subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration and where it is stored.
    Show,
    /// Persist the conversion endpoint URL.
    SetEndpoint {
        #[arg(value_name = "URL", value_hint = ValueHint::Url)]
        url: String,
    },
    /// Persist the directory converted PDFs are written to.
    SetOutputDir {
        #[arg(value_name = "DIR", value_hint = ValueHint::DirPath)]
        dir: String,
    },
    /// Restore the default configuration.
    Reset,
}

/// Arguments for the default convert flow.
#[derive(Debug, Clone, Args, Default)]
pub struct ConvertArgs {
    /// File to convert: a filesystem path or an inline `data:` URI.
    #[arg(value_name = "INPUT", value_hint = ValueHint::FilePath)]
    pub input: Option<String>,

    /// Conversion endpoint (overrides config and CONVPDF_ENDPOINT).
    #[arg(long, value_name = "URL", value_hint = ValueHint::Url)]
    pub endpoint: Option<String>,

    /// Where to write the PDF (default: <documents>/converted_file.pdf).
    #[arg(short, long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// File name to report to the server.
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Content type to report to the server.
    #[arg(long = "mime", value_name = "TYPE")]
    pub mime_type: Option<String>,

    /// Give up on the request after this many seconds.
    #[arg(long = "timeout", value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,
}

impl ConvertArgs {
    /// True when any conversion flag or the input was given.
    pub fn is_set(&self) -> bool {
        self.input.is_some()
            || self.endpoint.is_some()
            || self.output.is_some()
            || self.name.is_some()
            || self.mime_type.is_some()
            || self.timeout_secs.is_some()
    }

    /// Layer command line overrides on top of the loaded configuration.
    pub fn apply_to(&self, config: &mut FileConfig) {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.trim().to_string();
        }
        if let Some(secs) = self.timeout_secs {
            config.request_timeout_secs = Some(secs);
        }
        if let Some(output) = &self.output {
            if let Some(file_name) = output.file_name() {
                config.output_file_name = file_name.to_string_lossy().into_owned();
            }
            let dir = output
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_else(|| ".".to_string());
            config.output_dir = Some(dir);
        }
    }
}
