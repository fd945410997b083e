use clap::Parser;
use iced::widget::image::Handle;
use iced::widget::{button, column, container, image, pick_list, row, text, Column, Row};
use iced::{event, window, Alignment, Element, Event, Length, Subscription, Task, Theme};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use document_cleaner::cli::Cli;
use document_cleaner::ui::dialogs::{self, DialogPrompt};
use document_cleaner::ui::preview::preview_handle;
use document_cleaner::{
    Cleaner, CleanerError, CleanupSettings, DeskewLevel, ExportFormat, ExportOutcome, OcrAvailability,
    OcrLanguage, SourceReference, SystemRunner, ThresholdLevel, ToolConfig, TransformOutcome,
};

/// Main application state
struct DocumentCleaner {
    /// Document session, scratch workspace and tool runner
    cleaner: Cleaner,
    /// Current toolbar selections, passed into every operation
    settings: CleanupSettings,
    /// Thumbnail of the loaded original
    original: Option<Handle>,
    /// Thumbnail of the working copy
    modified: Option<Handle>,
    /// Status line under the panels
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    Open,
    Reload,
    Threshold,
    Deskew,
    Crop,
    SaveJpg,
    SavePdf,
    SavePdfOcr,
    ThresholdSelected(ThresholdLevel),
    DeskewSelected(DeskewLevel),
    LanguageSelected(OcrLanguage),
    /// A file was dropped onto the window
    FileDropped(PathBuf),
}

impl DocumentCleaner {
    /// Create the application, probe OCR once and preload the CLI image
    fn new(tools: ToolConfig, preload: Option<PathBuf>) -> (Self, Task<Message>) {
        let mut cleaner = Cleaner::new(tools, SystemRunner);

        // OCR support is decided here for the whole session
        if let OcrAvailability::Unavailable(reason) = cleaner.check_ocr() {
            dialogs::show_warning(reason.title(), &reason.to_string());
        }

        let mut app = DocumentCleaner {
            cleaner,
            settings: CleanupSettings::new(),
            original: None,
            modified: None,
            status: "Open an image or drop one onto the window.".to_string(),
        };

        if let Some(path) = preload {
            app.open(SourceReference::Opened(path));
        }

        (app, Task::none())
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Open => {
                if let Some(path) = dialogs::pick_image() {
                    self.open(SourceReference::Opened(path));
                }
            }
            Message::FileDropped(path) => self.open(SourceReference::Dropped(path)),
            Message::Reload => {
                if self.cleaner.session().document().is_some() {
                    self.cleaner.reload();
                    self.refresh_modified();
                    self.status = "Reloaded original.".to_string();
                }
            }
            Message::Threshold => {
                let result = self.cleaner.apply_threshold(&self.settings);
                self.finish_transform("Threshold", result);
            }
            Message::Deskew => {
                let result = self.cleaner.apply_deskew(&self.settings);
                self.finish_transform("Deskew", result);
            }
            Message::Crop => {
                let result = self.cleaner.apply_crop();
                self.finish_transform("Crop", result);
            }
            Message::SaveJpg => {
                let result = self.cleaner.export_image(ExportFormat::Jpeg, &DialogPrompt);
                self.finish_export(result);
            }
            Message::SavePdf => {
                let result = self.cleaner.export_image(ExportFormat::Pdf, &DialogPrompt);
                self.finish_export(result);
            }
            Message::SavePdfOcr => {
                let result = self.cleaner.export_with_ocr(&self.settings, &DialogPrompt);
                self.finish_export(result);
            }
            Message::ThresholdSelected(level) => self.settings.threshold = level,
            Message::DeskewSelected(level) => self.settings.deskew = level,
            Message::LanguageSelected(language) => self.settings.ocr_language = language,
        }

        Task::none()
    }

    /// Load a document; on failure keep whatever was shown before
    fn open(&mut self, source: SourceReference) {
        let path = source.path().to_path_buf();
        match self.cleaner.load(source) {
            Ok(()) => {
                self.original = self
                    .cleaner
                    .session()
                    .document()
                    .map(|doc| preview_handle(&doc.image));
                self.refresh_modified();
                self.status = format!("Opened {}", path.display());
            }
            Err(err) => self.report("Error opening image", &err),
        }
    }

    fn refresh_modified(&mut self) {
        self.modified = self.cleaner.session().working().map(preview_handle);
    }

    fn finish_transform(&mut self, name: &str, result: Result<TransformOutcome, CleanerError>) {
        match result {
            Ok(TransformOutcome::Applied) => {
                self.refresh_modified();
                self.status = format!("{} applied.", name);
            }
            Ok(TransformOutcome::NoDocument) => {}
            Err(err) => self.report(&format!("{} failed", name), &err),
        }
    }

    fn finish_export(&mut self, result: Result<ExportOutcome, CleanerError>) {
        match result {
            Ok(ExportOutcome::Written(target)) => {
                self.status = match target.sidecar {
                    Some(sidecar) => format!(
                        "Saved {} and {}",
                        target.path.display(),
                        sidecar.display()
                    ),
                    None => format!("Saved {}", target.path.display()),
                };
            }
            Ok(ExportOutcome::Cancelled | ExportOutcome::Skipped) => {}
            Err(err) => self.report("Export failed", &err),
        }
    }

    fn report(&mut self, title: &str, err: &CleanerError) {
        error!("{}: {}", title, err);
        self.status = format!("{}: {}", title, err);
        dialogs::show_error(title, &err.to_string());
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let ocr_ready = self.cleaner.ocr().is_available();

        let buttons: Row<Message> = row![
            button("Open img").on_press(Message::Open),
            button("Reload img").on_press(Message::Reload),
            button("Threshold").on_press(Message::Threshold),
            button("Deskew").on_press(Message::Deskew),
            button("Crop").on_press(Message::Crop),
            button("Save JPG").on_press(Message::SaveJpg),
            button("Save PDF").on_press(Message::SavePdf),
            button("Save PDF + OCR").on_press_maybe(ocr_ready.then_some(Message::SavePdfOcr)),
        ]
        .spacing(10);

        // The language picker is disabled together with OCR export
        let language: Element<Message> = if ocr_ready {
            pick_list(
                OcrLanguage::REQUIRED,
                Some(self.settings.ocr_language),
                Message::LanguageSelected,
            )
            .into()
        } else {
            text(self.settings.ocr_language.to_string()).into()
        };

        let settings: Row<Message> = row![
            text("Threshold:"),
            pick_list(
                ThresholdLevel::ALL,
                Some(self.settings.threshold),
                Message::ThresholdSelected,
            ),
            text("Deskew:"),
            pick_list(
                DeskewLevel::ALL,
                Some(self.settings.deskew),
                Message::DeskewSelected,
            ),
            text("OCR language:"),
            language,
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let panels: Row<Message> = row![
            panel("Original", self.original.as_ref()),
            panel("Modified", self.modified.as_ref()),
        ]
        .spacing(10);

        let content: Column<Message> = column![buttons, settings, panels, text(&self.status).size(14)]
            .spacing(15)
            .padding(20)
            .align_x(Alignment::Center);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .into()
    }

    /// Files dropped on the window arrive as window events
    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

/// One labelled preview panel
fn panel<'a>(label: &'a str, handle: Option<&Handle>) -> Element<'a, Message> {
    let body: Element<'a, Message> = match handle {
        Some(handle) => image(handle.clone()).into(),
        None => text("No image").size(14).into(),
    };

    column![text(label).size(18), body]
        .spacing(5)
        .align_x(Alignment::Center)
        .into()
}

fn init_tracing(filter: Option<&str>) {
    let filter = filter
        .map(EnvFilter::new)
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> iced::Result {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    let tools = ToolConfig::from_env().with_scratch_dir(cli.scratch_dir.clone());
    info!(
        "🧹 Document Image Cleaner starting (convert: {}, scratch: {})",
        tools.convert,
        tools.scratch_dir.display()
    );

    let preload = cli.image;
    iced::application(
        "Document Image Cleaner",
        DocumentCleaner::update,
        DocumentCleaner::view,
    )
    .subscription(DocumentCleaner::subscription)
    .theme(DocumentCleaner::theme)
    .centered()
    .run_with(move || DocumentCleaner::new(tools, preload))
}
