/// Presentation helpers for the iced shell
///
/// - Preview thumbnails for the Original/Modified panels (preview.rs)
/// - Native file and message dialogs (dialogs.rs)

pub mod dialogs;
pub mod preview;
