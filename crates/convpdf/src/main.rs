//! Main entry point for convpdf
//!
//! - CLI mode: any command-line argument
//! - GUI mode: no arguments

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    if convpdf_cli::should_run_cli_mode() {
        convpdf_cli::run().await.map_err(|e| anyhow::anyhow!(e))?;
    } else if let Err(e) = convpdf_gui::run() {
        eprintln!("GUI error: {e:#}");
        std::process::exit(1);
    }

    Ok(())
}
