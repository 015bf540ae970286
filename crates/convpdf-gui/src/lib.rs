//! convpdf GUI using eframe/egui
//!
//! A single screen: pick a document, convert it, save the PDF.

pub mod app;
pub mod async_bridge;
pub mod dialogs;
pub mod processor;
pub mod state;
pub mod ui_state;
pub mod widgets;

use anyhow::Context as _;
use convpdf_core::logging::{LoggingDestination, init_logging};

/// Main entry point for the GUI
pub fn run() -> anyhow::Result<()> {
    if let Err(err) = init_logging(LoggingDestination::FileOnly) {
        eprintln!("Warning: logging unavailable: {err}");
    }

    let bridge = async_bridge::AsyncBridge::new().context("failed to start background runtime")?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 640.0])
            .with_min_inner_size([480.0, 420.0])
            .with_resizable(true)
            .with_title("convpdf"),
        ..Default::default()
    };

    eframe::run_native(
        "convpdf",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::ConvpdfApp::new(cc, bridge)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;

    tracing::info!("GUI closed");
    Ok(())
}
