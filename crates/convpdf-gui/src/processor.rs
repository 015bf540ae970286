//! Background jobs for the conversion screen

use crate::async_bridge::{AppEvent, AsyncBridge};
use convpdf_core::{ConversionClient, FileDescriptor, FileSelector, PickResult};

/// Resolve a dialog result (metadata lookup, data URI materialisation) off
/// the UI thread.
pub fn start_selection(
    bridge: &AsyncBridge,
    selector: FileSelector,
    picked: PickResult,
    ctx: egui::Context,
) {
    bridge.spawn(
        async move { AppEvent::SelectionResolved(selector.select(picked).await) },
        move || ctx.request_repaint(),
    );
}

/// Upload `descriptor` and save the PDF. The caller has already moved the
/// session to `Sending`.
pub fn start_upload(
    bridge: &AsyncBridge,
    client: ConversionClient,
    descriptor: FileDescriptor,
    ctx: egui::Context,
) {
    bridge.spawn(
        async move { AppEvent::UploadFinished(client.convert(Some(&descriptor)).await) },
        move || ctx.request_repaint(),
    );
}
