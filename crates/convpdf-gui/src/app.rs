//! Main application structure for the convpdf GUI

use crate::async_bridge::{AppEvent, AsyncBridge};
use crate::dialogs;
use crate::processor;
use crate::state::AppState;
use crate::ui_state::{LogEntry, LogLevel, Theme, UiState};
use crate::widgets;
use crate::widgets::conversion_status::StatusAction;
use crate::widgets::settings_form::SettingsAction;
use chrono::Local;
use convpdf_core::{
    ConversionReport, ConvertError, FileDescriptor, Notice, NoticeLevel, UploadRejected,
};
use std::time::Duration;

/// Main application struct implementing eframe::App
pub struct ConvpdfApp {
    /// Domain state
    state: AppState,

    /// UI state
    ui_state: UiState,

    /// Async runtime bridge
    async_bridge: AsyncBridge,

    /// Last config save time
    last_save: std::time::Instant,

    /// Config dirty flag
    config_dirty: bool,
}

impl ConvpdfApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, async_bridge: AsyncBridge) -> Self {
        let (state, warnings) = AppState::load();
        let mut ui_state = UiState::new();
        ui_state.theme = state.config.ui.theme.into();
        ui_state.technical_log_expanded = state.config.ui.show_technical_log;
        widgets::settings_form::load_inputs(&state, &mut ui_state);

        let mut app = Self {
            state,
            ui_state,
            async_bridge,
            last_save: std::time::Instant::now(),
            config_dirty: false,
        };

        app.add_log(LogLevel::Info, "Application started");
        for warning in warnings {
            app.add_log(LogLevel::Warning, warning);
        }
        if let Some(path) = convpdf_core::logging::current_log_path() {
            app.add_log(LogLevel::Info, format!("Log file: {}", path.display()));
        }
        app.log_setup();

        app
    }

    /// Add a log entry
    fn add_log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.ui_state.add_log_entry(LogEntry {
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            level,
            message: message.into(),
        });
    }

    fn log_setup(&mut self) {
        match (&self.state.converter, &self.state.setup_error) {
            (Some(converter), _) => {
                let message = format!(
                    "Endpoint: {} | output: {}",
                    converter.client.endpoint(),
                    converter.client.output_path().display()
                );
                self.add_log(LogLevel::Info, message);
            }
            (None, Some(err)) => {
                let message = format!("Configuration error: {err}");
                self.add_log(LogLevel::Error, message);
            }
            (None, None) => {}
        }
    }

    /// Apply theme to egui context
    fn apply_theme(&self, ctx: &egui::Context) {
        let visuals = match self.ui_state.theme {
            Theme::Dark => egui::Visuals::dark(),
            Theme::Light => egui::Visuals::light(),
        };
        ctx.set_visuals(visuals);
    }

    /// Auto-save configuration if dirty and enough time has passed
    fn handle_auto_save(&mut self) {
        if self.config_dirty && self.last_save.elapsed() > Duration::from_millis(300) {
            if let Err(e) = self.state.save_config() {
                self.add_log(LogLevel::Error, format!("Failed to save config: {e}"));
            }
            self.config_dirty = false;
            self.last_save = std::time::Instant::now();
        }
    }

    /// Open the picker and resolve the result in the background.
    fn start_pick(&mut self, ctx: &egui::Context) {
        let selector = self
            .state
            .converter
            .as_ref()
            .map(|converter| converter.selector.clone())
            .unwrap_or_default();

        // The native dialog is modal and must run on the UI thread.
        let picked = dialogs::pick_document();
        match &picked {
            Ok(Some(resource)) => {
                let message = format!("Picked: {}", abbreviate(&resource.location));
                self.add_log(LogLevel::Info, message);
            }
            Ok(None) => self.add_log(LogLevel::Info, "Selection cancelled"),
            Err(err) => self.add_log(LogLevel::Error, format!("File picker failed: {err}")),
        }

        self.state.resolving_pick = true;
        processor::start_selection(&self.async_bridge, selector, picked, ctx.clone());
    }

    /// Upload the selected file in the background.
    fn start_upload(&mut self, ctx: &egui::Context) {
        let Some(client) = self.state.converter.as_ref().map(|c| c.client.clone()) else {
            return;
        };

        match self.state.session.begin_upload() {
            Ok(descriptor) => {
                self.add_log(
                    LogLevel::Info,
                    format!("Uploading {} to {}", descriptor.display_name(), client.endpoint()),
                );
                processor::start_upload(&self.async_bridge, client, descriptor, ctx.clone());
            }
            Err(UploadRejected::NoFileSelected) => {
                self.add_log(LogLevel::Warning, "Upload requested with no file selected");
                self.state.notice = Some(Notice::no_file_selected());
            }
            Err(UploadRejected::Busy) => {
                self.add_log(LogLevel::Warning, "Upload already in progress");
            }
        }
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SelectionResolved(descriptor) => self.handle_selection(descriptor),
            AppEvent::UploadFinished(result) => self.handle_upload_result(result),
        }
    }

    fn handle_selection(&mut self, descriptor: Option<FileDescriptor>) {
        match &descriptor {
            Some(descriptor) => {
                let details = serde_json::to_string(descriptor)
                    .unwrap_or_else(|_| descriptor.display_name().to_string());
                self.add_log(LogLevel::Info, format!("Selected file: {details}"));
            }
            None => self.add_log(LogLevel::Info, "No file selected"),
        }
        self.state.apply_pick(descriptor);
    }

    fn handle_upload_result(&mut self, result: Result<ConversionReport, ConvertError>) {
        match &result {
            Ok(report) => self.add_log(
                LogLevel::Info,
                format!(
                    "Saved {} bytes to {}",
                    report.bytes_written,
                    report.output_path.display()
                ),
            ),
            Err(err) => self.add_log(LogLevel::Error, format!("Upload failed: {err}")),
        }
        let notice = self.state.session.finish_upload(&result);
        self.state.notice = Some(notice);
    }

    fn apply_settings(&mut self, persist: bool) {
        widgets::settings_form::apply_inputs(&mut self.state, &self.ui_state);
        self.state.rebuild_converter();
        self.log_setup();

        if !persist {
            return;
        }
        if self.state.setup_error.is_some() {
            self.add_log(LogLevel::Warning, "Invalid settings were not saved");
            return;
        }
        match self.state.save_config() {
            Ok(()) => self.add_log(LogLevel::Info, "Configuration saved"),
            Err(e) => self.add_log(LogLevel::Error, format!("Failed to save: {e}")),
        }
    }

    fn open_output(&mut self) {
        let convpdf_core::ConversionState::Succeeded(report) = self.state.session.state() else {
            return;
        };
        let path = report.output_path.clone();
        if let Err(e) = open::that(&path) {
            self.add_log(
                LogLevel::Error,
                format!("Failed to open {}: {e}", path.display()),
            );
        }
    }

    /// Render the top panel with title and theme toggle
    fn render_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("convpdf");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let theme_label = match self.ui_state.theme {
                        Theme::Dark => "☀ Light",
                        Theme::Light => "🌙 Dark",
                    };
                    if ui.button(theme_label).clicked() {
                        self.ui_state.theme = match self.ui_state.theme {
                            Theme::Dark => Theme::Light,
                            Theme::Light => Theme::Dark,
                        };
                        self.state.config.ui.theme = self.ui_state.theme.into();
                        self.config_dirty = true;
                    }
                });
            });
        });
    }

    /// Render the main UI content
    fn render_main_ui(&mut self, ui: &mut egui::Ui) {
        let ctx = ui.ctx().clone();
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.group(|ui| {
                    ui.set_min_width(ui.available_width());
                    ui.heading("Document");
                    self.render_selection(ui, &ctx);
                });

                ui.add_space(16.0);

                ui.separator();
                self.render_upload_section(ui, &ctx);
                ui.separator();

                ui.add_space(8.0);

                if !matches!(
                    self.state.session.state(),
                    convpdf_core::ConversionState::Idle
                ) {
                    let mut action = StatusAction::None;
                    ui.group(|ui| {
                        ui.set_min_width(ui.available_width());
                        action = widgets::conversion_status::render(ui, self.state.session.state());
                    });
                    if action == StatusAction::OpenPdf {
                        self.open_output();
                    }
                    ui.add_space(8.0);
                }

                let settings_response = egui::CollapsingHeader::new("Settings")
                    .default_open(self.ui_state.settings_expanded || self.state.setup_error.is_some())
                    .show(ui, |ui| {
                        widgets::settings_form::render(ui, &self.state, &mut self.ui_state)
                    });
                if settings_response.header_response.clicked() {
                    self.ui_state.settings_expanded = !self.ui_state.settings_expanded;
                }
                match settings_response.body_returned {
                    Some(SettingsAction::Apply) => self.apply_settings(false),
                    Some(SettingsAction::Save) => self.apply_settings(true),
                    Some(SettingsAction::None) | None => {}
                }

                ui.add_space(8.0);

                let log_response = egui::CollapsingHeader::new("Technical Log")
                    .default_open(self.ui_state.technical_log_expanded)
                    .show(ui, |ui| {
                        widgets::technical_log::render(ui, &mut self.ui_state);
                    });
                if log_response.header_response.clicked() {
                    self.ui_state.technical_log_expanded = !self.ui_state.technical_log_expanded;
                    self.state.config.ui.show_technical_log = self.ui_state.technical_log_expanded;
                    self.config_dirty = true;
                }
            });
    }

    fn render_selection(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            let pick = ui.add_enabled(self.state.can_pick(), egui::Button::new("📂 Pick Document"));
            if pick.clicked() {
                self.start_pick(ctx);
            }
            if self.state.resolving_pick {
                ui.spinner();
            }
        });

        ui.add_space(4.0);

        match self.state.session.selected() {
            Some(descriptor) => {
                ui.label(format!("Selected File: {}", descriptor.display_name()));
                ui.small(format!(
                    "{} | {}",
                    descriptor.content_type(),
                    descriptor.source().display()
                ));
            }
            None => {
                ui.weak("No file selected");
            }
        }
    }

    fn render_upload_section(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        if self.state.session.is_busy() {
            ui.label(egui::RichText::new("⏳ Converting...").size(18.0));
            return;
        }

        let button_size = egui::vec2(ui.available_width(), 60.0);
        let button = egui::Button::new(egui::RichText::new("Convert and Download PDF").size(24.0))
            .fill(egui::Color32::from_rgb(0, 150, 0))
            .min_size(button_size);

        if ui.add_enabled(self.state.can_convert(), button).clicked() {
            self.start_upload(ctx);
        }
    }

    /// Modal-style alert for the latest notice.
    fn render_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = &self.state.notice else {
            return;
        };

        let color = match notice.level {
            NoticeLevel::Success => egui::Color32::GREEN,
            NoticeLevel::Error => egui::Color32::RED,
        };
        let mut dismissed = false;
        egui::Window::new(notice.title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.colored_label(color, &notice.message);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.state.notice = None;
        }
    }
}

/// Shorten long locations (data URIs) for display.
fn abbreviate(location: &str) -> String {
    const MAX: usize = 64;
    match location.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &location[..cut]),
        None => location.to_string(),
    }
}

impl eframe::App for ConvpdfApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_theme(ctx);

        // Collect first; handlers need &mut self.
        let mut events = Vec::new();
        self.async_bridge.poll_events(|event| events.push(event));
        for event in events {
            self.handle_event(event);
        }

        self.render_top_panel(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_main_ui(ui);
        });

        self.render_notice(ctx);

        self.handle_auto_save();
    }
}

#[cfg(test)]
mod tests {
    use super::abbreviate;

    #[test]
    fn abbreviate_keeps_short_paths() {
        assert_eq!(abbreviate("/tmp/a.txt"), "/tmp/a.txt");
    }

    #[test]
    fn abbreviate_cuts_data_uris() {
        let uri = format!("data:text/plain;base64,{}", "A".repeat(200));
        let short = abbreviate(&uri);
        assert!(short.ends_with("..."));
        assert_eq!(short.chars().count(), 67);
    }
}
