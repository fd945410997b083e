/// State management module
///
/// This module handles all application state, including:
/// - The loaded document and its working copy (document.rs)
/// - Shared data structures (data.rs)
/// - Toolbar selections passed into each operation (settings.rs)

pub mod data;
pub mod document;
pub mod settings;
