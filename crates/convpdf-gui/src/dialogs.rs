//! File and folder dialog utilities

use std::path::PathBuf;

use convpdf_core::{PickResult, PickedResource};

/// Open the document picker. Every file type is accepted.
pub fn pick_document() -> PickResult {
    Ok(rfd::FileDialog::new()
        .set_title("Select a file to convert")
        .pick_file()
        .map(PickedResource::from_path))
}

/// Pick output directory
pub fn pick_output_directory() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Select Output Directory")
        .pick_folder()
}
