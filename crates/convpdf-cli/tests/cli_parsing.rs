use std::path::PathBuf;

use clap::Parser;
use convpdf_cli::cli_args::{Cli, Command, ConfigCommand};
use convpdf_core::FileConfig;

// Integration tests for argument parsing and how flags layer over the
// persisted configuration.

#[test]
fn test_plain_input_parses() {
    let cli = Cli::try_parse_from(["convpdf-cli", "report.docx"]).unwrap();
    assert_eq!(cli.convert.input.as_deref(), Some("report.docx"));
    assert!(cli.command.is_none());
    assert!(cli.convert.is_set());
}

#[test]
fn test_no_arguments_is_unset() {
    let cli = Cli::try_parse_from(["convpdf-cli"]).unwrap();
    assert!(!cli.convert.is_set());
    assert!(cli.command.is_none());
}

#[test]
fn test_all_convert_flags() {
    let cli = Cli::try_parse_from([
        "convpdf-cli",
        "data:image/png;base64,AAAA",
        "--endpoint",
        "http://192.168.1.6:8000/convert-to-pdf",
        "-o",
        "/tmp/out/result.pdf",
        "--name",
        "scan.png",
        "--mime",
        "image/png",
        "--timeout",
        "30",
    ])
    .unwrap();

    let args = cli.convert;
    assert_eq!(args.input.as_deref(), Some("data:image/png;base64,AAAA"));
    assert_eq!(
        args.endpoint.as_deref(),
        Some("http://192.168.1.6:8000/convert-to-pdf")
    );
    assert_eq!(args.output, Some(PathBuf::from("/tmp/out/result.pdf")));
    assert_eq!(args.name.as_deref(), Some("scan.png"));
    assert_eq!(args.mime_type.as_deref(), Some("image/png"));
    assert_eq!(args.timeout_secs, Some(30));
}

#[test]
fn test_zero_timeout_rejected() {
    assert!(Cli::try_parse_from(["convpdf-cli", "a.txt", "--timeout", "0"]).is_err());
}

#[test]
fn test_config_subcommands() {
    let cli = Cli::try_parse_from(["convpdf-cli", "config", "show"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Command::Config(ConfigCommand::Show))
    ));
    assert!(!cli.convert.is_set());

    let cli = Cli::try_parse_from([
        "convpdf-cli",
        "config",
        "set-endpoint",
        "http://10.0.0.2:8000/convert-to-pdf",
    ])
    .unwrap();
    match cli.command {
        Some(Command::Config(ConfigCommand::SetEndpoint { url })) => {
            assert_eq!(url, "http://10.0.0.2:8000/convert-to-pdf")
        }
        other => panic!("unexpected command {other:?}"),
    }

    let cli = Cli::try_parse_from(["convpdf-cli", "config", "set-output-dir", "~/PDFs"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Command::Config(ConfigCommand::SetOutputDir { ref dir })) if dir == "~/PDFs"
    ));
}

#[test]
fn test_overrides_layer_onto_config() {
    let cli = Cli::try_parse_from([
        "convpdf-cli",
        "in.txt",
        "--endpoint",
        " https://pdf.example.com/convert-to-pdf ",
        "--output",
        "/srv/out/final.pdf",
        "--timeout",
        "12",
    ])
    .unwrap();

    let mut config = FileConfig::default();
    cli.convert.apply_to(&mut config);

    assert_eq!(config.endpoint, "https://pdf.example.com/convert-to-pdf");
    assert_eq!(config.request_timeout_secs, Some(12));
    assert_eq!(config.output_dir.as_deref(), Some("/srv/out"));
    assert_eq!(config.output_file_name, "final.pdf");
    assert_eq!(config.output_path(), PathBuf::from("/srv/out/final.pdf"));
}

#[test]
fn test_bare_output_name_lands_in_working_dir() {
    let cli = Cli::try_parse_from(["convpdf-cli", "in.txt", "-o", "mine.pdf"]).unwrap();
    let mut config = FileConfig::default();
    cli.convert.apply_to(&mut config);
    assert_eq!(config.output_path(), PathBuf::from("./mine.pdf"));
}

#[test]
fn test_no_overrides_keep_config() {
    let cli = Cli::try_parse_from(["convpdf-cli", "in.txt"]).unwrap();
    let mut config = FileConfig::default();
    cli.convert.apply_to(&mut config);
    assert_eq!(config, FileConfig::default());
}

#[test]
fn test_non_http_endpoint_flag_fails_setup() {
    let cli = Cli::try_parse_from([
        "convpdf-cli",
        "report.docx",
        "--endpoint",
        "ftp://10.0.0.5/convert-to-pdf",
    ])
    .unwrap();
    let mut config = FileConfig::default();
    cli.convert.apply_to(&mut config);
    let err = convpdf_core::Converter::from_config(&config).unwrap_err();
    assert!(err.to_string().contains("http or https"), "{err}");
}
