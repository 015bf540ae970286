//! Command line front end for convpdf.

pub mod cli_args;

use std::path::Path;

use clap::Parser;
use cli_args::{Cli, Command, ConfigCommand, ConvertArgs};
use convpdf_core::logging::{LoggingDestination, init_logging};
use convpdf_core::{
    Converter, FileConfig, FilePicker, NoticeLevel, PickResult, PickedResource, Session,
    apply_env_overrides, config_path, load_config, save_config,
};

/// The unified binary runs the CLI whenever it was given any argument.
pub fn should_run_cli_mode() -> bool {
    std::env::args_os().len() > 1
}

/// Parse the process arguments and run.
pub async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    if let Err(err) = init_logging(LoggingDestination::FileAndStderr) {
        eprintln!("Warning: logging unavailable: {err}");
    }
    dispatch(cli).await
}

pub async fn dispatch(cli: Cli) -> Result<(), String> {
    match cli.command {
        Some(Command::Config(cmd)) => {
            if cli.convert.is_set() {
                return Err(
                    "Conversion arguments cannot be combined with config commands.".into(),
                );
            }
            handle_config_command(cmd)
        }
        None => run_convert(cli.convert).await,
    }
}

/// Picks whatever was named on the command line. No input means "cancelled".
#[derive(Debug, Clone)]
pub struct ArgumentPicker {
    input: Option<String>,
    name: Option<String>,
    mime_type: Option<String>,
}

impl ArgumentPicker {
    pub fn new(args: &ConvertArgs) -> Self {
        Self {
            input: args.input.clone(),
            name: args.name.clone(),
            mime_type: args.mime_type.clone(),
        }
    }
}

impl FilePicker for ArgumentPicker {
    fn pick(&self) -> PickResult {
        let Some(input) = self.input.as_deref().map(str::trim).filter(|i| !i.is_empty()) else {
            return Ok(None);
        };
        let mut resource = if convpdf_core::data_uri::is_data_uri(input) {
            PickedResource {
                location: input.to_string(),
                name: None,
                mime_type: None,
            }
        } else {
            PickedResource::from_path(Path::new(input))
        };
        if self.name.is_some() {
            resource.name = self.name.clone();
        }
        resource.mime_type = self.mime_type.clone();
        Ok(Some(resource))
    }
}

async fn run_convert(args: ConvertArgs) -> Result<(), String> {
    if args.input.is_none() {
        return Err("No input given. Pass a file path or data: URI (see --help).".into());
    }

    let load = load_config();
    let mut warnings = load.warnings;
    let mut config = load.config;
    apply_env_overrides(&mut config, &mut warnings);
    args.apply_to(&mut config);

    for warning in warnings {
        eprintln!("Warning: {warning}");
    }

    let converter = Converter::from_config(&config).map_err(|err| err.to_string())?;
    let picked = ArgumentPicker::new(&args)
        .pick()
        .map_err(|err| err.to_string())?
        .ok_or("No input given.")?;
    let location = picked.location.clone();
    let descriptor = converter
        .selector
        .resolve(picked)
        .await
        .map_err(|err| format!("Cannot use {}: {err}", abbreviate(&location)))?;

    let mut session = Session::new();
    session.apply_selection(Some(descriptor));
    let notice = converter.convert_selected(&mut session).await;

    match notice.level {
        NoticeLevel::Success => {
            println!("{}", notice.message);
            Ok(())
        }
        NoticeLevel::Error => Err(notice.message),
    }
}

/// Keep data URIs readable in error messages.
fn abbreviate(location: &str) -> String {
    const MAX: usize = 48;
    if location.chars().count() <= MAX {
        location.to_string()
    } else {
        let head: String = location.chars().take(MAX).collect();
        format!("{head}...")
    }
}

fn handle_config_command(command: ConfigCommand) -> Result<(), String> {
    let load = load_config();
    for warning in load.warnings {
        eprintln!("Warning: {warning}");
    }
    let mut config = load.config;

    match command {
        ConfigCommand::Show => {
            let rendered = toml::to_string_pretty(&config).map_err(|err| err.to_string())?;
            println!("# {}", config_path().display());
            print!("{rendered}");
            println!("# output file: {}", config.output_path().display());
            Ok(())
        }
        ConfigCommand::SetEndpoint { url } => {
            config.endpoint = url.trim().to_string();
            save_config(&config).map_err(|err| err.to_string())?;
            println!("Endpoint set to {}", config.endpoint);
            Ok(())
        }
        ConfigCommand::SetOutputDir { dir } => {
            config.output_dir = Some(dir.trim().to_string()).filter(|d| !d.is_empty());
            save_config(&config).map_err(|err| err.to_string())?;
            println!("PDFs will be written to {}", config.output_path().display());
            Ok(())
        }
        ConfigCommand::Reset => {
            save_config(&FileConfig::default()).map_err(|err| err.to_string())?;
            println!("Configuration reset to defaults.");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(input: &str) -> ConvertArgs {
        ConvertArgs {
            input: Some(input.to_string()),
            ..ConvertArgs::default()
        }
    }

    #[test]
    fn argument_picker_passes_path_through() {
        let picked = ArgumentPicker::new(&args("/tmp/slides.pptx"))
            .pick()
            .unwrap()
            .unwrap();
        assert_eq!(picked.location, "/tmp/slides.pptx");
        assert_eq!(picked.name.as_deref(), Some("slides.pptx"));
        assert_eq!(picked.mime_type, None);
    }

    #[test]
    fn argument_picker_leaves_data_uri_unnamed() {
        let picked = ArgumentPicker::new(&args("data:image/png;base64,AAAA"))
            .pick()
            .unwrap()
            .unwrap();
        assert_eq!(picked.name, None);
    }

    #[test]
    fn argument_picker_applies_overrides() {
        let mut a = args("/tmp/blob");
        a.name = Some("scan.tiff".into());
        a.mime_type = Some("image/tiff".into());
        let picked = ArgumentPicker::new(&a).pick().unwrap().unwrap();
        assert_eq!(picked.name.as_deref(), Some("scan.tiff"));
        assert_eq!(picked.mime_type.as_deref(), Some("image/tiff"));
    }

    #[test]
    fn long_locations_are_abbreviated() {
        let uri = format!("data:text/plain;base64,{}", "A".repeat(200));
        let short = abbreviate(&uri);
        assert!(short.ends_with("..."));
        assert_eq!(short.chars().count(), 51);
        assert_eq!(abbreviate("/tmp/a.txt"), "/tmp/a.txt");
    }

    #[test]
    fn blank_input_counts_as_cancel() {
        assert_eq!(ArgumentPicker::new(&args("  ")).pick().unwrap(), None);
    }
}
