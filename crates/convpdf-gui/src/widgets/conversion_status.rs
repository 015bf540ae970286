//! Upload status widget

use convpdf_core::ConversionState;

/// What the status area asks the app to do after rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    None,
    OpenPdf,
}

/// Render the current upload state
pub fn render(ui: &mut egui::Ui, state: &ConversionState) -> StatusAction {
    let mut action = StatusAction::None;
    match state {
        ConversionState::Sending => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Uploading and converting...");
            });
            ui.add(egui::ProgressBar::new(f32::NAN));
        }
        ConversionState::Succeeded(report) => {
            ui.vertical(|ui| {
                ui.colored_label(egui::Color32::GREEN, "✓ PDF saved");
                ui.label(report.output_path.display().to_string());
                ui.label(format!(
                    "{} bytes, HTTP {}",
                    report.bytes_written,
                    report.status.as_u16()
                ));
                if ui.button("Open PDF").clicked() {
                    action = StatusAction::OpenPdf;
                }
            });
        }
        ConversionState::Failed(message) => {
            ui.vertical(|ui| {
                ui.colored_label(egui::Color32::RED, "✗ Upload failed");
                ui.label(message);
            });
        }
        ConversionState::Idle => {}
    }
    action
}
