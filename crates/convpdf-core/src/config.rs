use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

const CONFIG_DIR_NAME: &str = "convpdf";
const CONFIG_FILE_NAME: &str = "config.toml";
const CURRENT_SCHEMA_VERSION: u32 = 1;
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/convert-to-pdf";
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "converted_file.pdf";
pub const ENDPOINT_ENV_VAR: &str = "CONVPDF_ENDPOINT";

/// Result returned by [`load_config`], capturing the source and any non-fatal issues.
#[derive(Debug, Clone)]
pub struct ConfigLoadResult {
    pub config: FileConfig,
    pub warnings: Vec<String>,
    pub source: ConfigSource,
}

/// Indicates where the configuration was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// No persisted configuration was found or usable; defaults were synthesized.
    Default,
    /// Configuration was read from `config.toml`.
    File,
}

/// Errors that can occur when persisting configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML serialization error: {0}")]
    Ser(#[from] toml::ser::Error),
    #[error("invalid endpoint URL '{value}': {source}")]
    Endpoint {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("endpoint URL '{value}' must use http or https, not '{scheme}'")]
    EndpointScheme { value: String, scheme: String },
}

/// Disk-backed configuration schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default = "FileConfig::schema_version")]
    pub schema_version: u32,
    #[serde(default = "FileConfig::default_endpoint")]
    pub endpoint: String,
    /// Directory the converted PDF is written to; `~` and `$VARS` are expanded.
    #[serde(default)]
    pub output_dir: Option<String>,
    #[serde(default = "FileConfig::default_output_file_name")]
    pub output_file_name: String,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub ui: UiPreferences,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            endpoint: Self::default_endpoint(),
            output_dir: None,
            output_file_name: Self::default_output_file_name(),
            request_timeout_secs: None,
            ui: UiPreferences::default(),
        }
    }
}

impl FileConfig {
    const fn schema_version() -> u32 {
        CURRENT_SCHEMA_VERSION
    }

    fn default_endpoint() -> String {
        DEFAULT_ENDPOINT.to_string()
    }

    fn default_output_file_name() -> String {
        DEFAULT_OUTPUT_FILE_NAME.to_string()
    }

    /// Parsed endpoint. [`load_config`] guarantees this succeeds for loaded configs.
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        parse_endpoint(&self.endpoint)
    }

    /// Where the converted PDF lands: `<output_dir>/<output_file_name>`,
    /// defaulting to the user's documents directory.
    pub fn output_path(&self) -> PathBuf {
        let dir = self
            .output_dir
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(|d| {
                shellexpand::full(d)
                    .map(|expanded| PathBuf::from(expanded.into_owned()))
                    .unwrap_or_else(|_| PathBuf::from(d))
            })
            .unwrap_or_else(default_output_dir);
        dir.join(&self.output_file_name)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiPreferences {
    #[serde(default)]
    pub theme: ThemePreference,
    #[serde(default = "UiPreferences::default_show_technical_log")]
    pub show_technical_log: bool,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            theme: ThemePreference::default(),
            show_technical_log: Self::default_show_technical_log(),
        }
    }
}

impl UiPreferences {
    const fn default_show_technical_log() -> bool {
        true
    }
}

/// Path to the configuration directory.
pub fn config_directory() -> PathBuf {
    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// Path to `config.toml`.
pub fn config_path() -> PathBuf {
    config_directory().join(CONFIG_FILE_NAME)
}

/// Documents directory, falling back to home and then the working directory.
pub fn default_output_dir() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn parse_endpoint(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim()).map_err(|source| ConfigError::Endpoint {
        value: value.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ConfigError::EndpointScheme {
            value: value.to_string(),
            scheme: scheme.to_string(),
        }),
    }
}

/// Load the configuration from the default location, falling back to defaults.
pub fn load_config() -> ConfigLoadResult {
    load_config_from(&config_path())
}

/// Load the configuration from `path`, falling back to defaults.
pub fn load_config_from(path: &std::path::Path) -> ConfigLoadResult {
    let mut warnings = Vec::new();

    if path.exists() {
        match fs::read_to_string(path) {
            Ok(raw) => match toml::from_str::<FileConfig>(&raw) {
                Ok(cfg) => {
                    let (cfg, mut sanitize_warnings) = sanitize_config(cfg);
                    warnings.append(&mut sanitize_warnings);
                    return ConfigLoadResult {
                        config: cfg,
                        warnings,
                        source: ConfigSource::File,
                    };
                }
                Err(err) => {
                    warnings.push(format!(
                        "Failed to parse {} as TOML: {}. Falling back to defaults.",
                        CONFIG_FILE_NAME, err
                    ));
                }
            },
            Err(err) => {
                warnings.push(format!(
                    "Failed to read {}: {}. Falling back to defaults.",
                    CONFIG_FILE_NAME, err
                ));
            }
        }
    }

    ConfigLoadResult {
        config: FileConfig::default(),
        warnings,
        source: ConfigSource::Default,
    }
}

/// Persist the configuration to the default location.
pub fn save_config(config: &FileConfig) -> Result<(), ConfigError> {
    save_config_to(config, &config_path())
}

/// Persist the configuration to `path`, rejecting an unusable endpoint.
pub fn save_config_to(config: &FileConfig, path: &std::path::Path) -> Result<(), ConfigError> {
    parse_endpoint(&config.endpoint)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(config)?;
    fs::write(path, serialized)?;
    Ok(())
}

/// Apply `CONVPDF_ENDPOINT`, if set, on top of a loaded configuration.
pub fn apply_env_overrides(config: &mut FileConfig, warnings: &mut Vec<String>) {
    apply_endpoint_override(config, env::var(ENDPOINT_ENV_VAR).ok(), warnings);
}

fn apply_endpoint_override(
    config: &mut FileConfig,
    value: Option<String>,
    warnings: &mut Vec<String>,
) {
    let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
        return;
    };
    match parse_endpoint(&value) {
        Ok(url) => config.endpoint = url.to_string(),
        Err(err) => warnings.push(format!("Ignoring {ENDPOINT_ENV_VAR}: {err}")),
    }
}

fn sanitize_config(mut config: FileConfig) -> (FileConfig, Vec<String>) {
    let mut warnings = Vec::new();

    if config.schema_version != CURRENT_SCHEMA_VERSION {
        warnings.push(format!(
            "Unsupported schema_version {}; treating as {}.",
            config.schema_version, CURRENT_SCHEMA_VERSION
        ));
        config.schema_version = CURRENT_SCHEMA_VERSION;
    }

    if let Err(err) = parse_endpoint(&config.endpoint) {
        warnings.push(format!("{err}; using {DEFAULT_ENDPOINT}."));
        config.endpoint = FileConfig::default_endpoint();
    }

    let file_name = config.output_file_name.trim();
    if matches!(file_name, "" | "." | "..") || file_name.contains(['/', '\\']) {
        warnings.push(format!(
            "output_file_name '{}' is not a plain file name; using {}.",
            config.output_file_name, DEFAULT_OUTPUT_FILE_NAME
        ));
        config.output_file_name = FileConfig::default_output_file_name();
    }

    if config.request_timeout_secs == Some(0) {
        warnings.push("request_timeout_secs = 0 is not a usable timeout; ignoring it.".to_string());
        config.request_timeout_secs = None;
    }

    (config, warnings)
}
