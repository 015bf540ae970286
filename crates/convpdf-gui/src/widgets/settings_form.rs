//! Endpoint and output settings

use crate::dialogs;
use crate::state::AppState;
use crate::ui_state::UiState;

/// What the settings form asks the app to do after rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    None,
    /// Edits were copied into the config; rebuild the converter.
    Apply,
    /// Apply and persist.
    Save,
}

/// Render the settings form
pub fn render(ui: &mut egui::Ui, state: &AppState, ui_state: &mut UiState) -> SettingsAction {
    let mut action = SettingsAction::None;
    let locked = state.session.is_busy();

    ui.add_enabled_ui(!locked, |ui| {
        egui::Grid::new("settings_grid")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Endpoint:")
                    .on_hover_text("URL that accepts the multipart upload and returns a PDF");
                ui.add(
                    egui::TextEdit::singleline(&mut ui_state.endpoint_input)
                        .desired_width(420.0),
                );
                ui.end_row();

                ui.label("Output folder:");
                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut ui_state.output_dir_input)
                            .hint_text("Documents folder")
                            .desired_width(340.0),
                    );
                    if ui.button("Browse...").clicked() {
                        if let Some(dir) = dialogs::pick_output_directory() {
                            ui_state.output_dir_input = dir.display().to_string();
                        }
                    }
                });
                ui.end_row();

                ui.label("Saves to:");
                ui.monospace(state.config.output_path().display().to_string());
                ui.end_row();
            });

        ui.horizontal(|ui| {
            if ui.button("Apply").clicked() {
                action = SettingsAction::Apply;
            }
            if ui.button("Save").clicked() {
                action = SettingsAction::Save;
            }
        });
    });

    if let Some(err) = &state.setup_error {
        ui.colored_label(egui::Color32::RED, format!("Configuration error: {err}"));
    }

    action
}

/// Copy the edit buffers into `state.config`.
pub fn apply_inputs(state: &mut AppState, ui_state: &UiState) {
    state.config.endpoint = ui_state.endpoint_input.trim().to_string();
    let dir = ui_state.output_dir_input.trim();
    state.config.output_dir = (!dir.is_empty()).then(|| dir.to_string());
}

/// Fill the edit buffers from `state.config`.
pub fn load_inputs(state: &AppState, ui_state: &mut UiState) {
    ui_state.endpoint_input = state.config.endpoint.clone();
    ui_state.output_dir_input = state.config.output_dir.clone().unwrap_or_default();
}
