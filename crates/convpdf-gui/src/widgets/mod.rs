//! UI widgets for the convpdf GUI

pub mod conversion_status;
pub mod settings_form;
pub mod technical_log;
