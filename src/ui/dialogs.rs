/// Native dialogs via rfd
///
/// File pickers for open/save and blocking message boxes for errors and
/// the OCR startup warning.
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use std::path::PathBuf;

use crate::pipeline::SavePrompt;
use crate::state::data::ExportFormat;

/// Extensions offered by the open dialog
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "tif", "tiff"];

/// Show the native open dialog filtered to scan images
pub fn pick_image() -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Open scanned document")
        .add_filter("Image Files", &IMAGE_EXTENSIONS[..]);

    if let Some(dir) = dirs::document_dir() {
        dialog = dialog.set_directory(dir);
    }

    dialog.pick_file()
}

/// Save prompt backed by the native save dialog
#[derive(Debug, Clone, Copy, Default)]
pub struct DialogPrompt;

impl SavePrompt for DialogPrompt {
    fn save_path(&self, suggested_name: &str, format: ExportFormat) -> Option<PathBuf> {
        let mut dialog = FileDialog::new()
            .set_title("Save as")
            .set_file_name(suggested_name)
            .add_filter(format.filter_name(), &[format.extension()][..]);

        if let Some(dir) = dirs::document_dir() {
            dialog = dialog.set_directory(dir);
        }

        dialog.save_file()
    }
}

pub fn show_error(title: &str, message: &str) {
    show(MessageLevel::Error, title, message);
}

pub fn show_warning(title: &str, message: &str) {
    show(MessageLevel::Warning, title, message);
}

fn show(level: MessageLevel, title: &str, message: &str) {
    MessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}
