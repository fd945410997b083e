//! Load → threshold → export, with convert replaced by an in-process stand-in.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use document_cleaner::tools::{Invocation, ScratchSlot, ToolOutput};
use document_cleaner::{
    Cleaner, CleanupSettings, ExportFormat, ExportOutcome, SavePrompt, SourceReference,
    ThresholdLevel, ToolConfig, ToolRunner, TransformOutcome,
};
use image::{GrayImage, Luma, Rgba, RgbaImage};

/// Binarizes at the cutoff given on the command line, like `-threshold N%`
#[derive(Default)]
struct ThresholdingConvert {
    seen: RefCell<Vec<String>>,
}

impl ToolRunner for ThresholdingConvert {
    fn run(&self, invocation: &Invocation) -> io::Result<ToolOutput> {
        self.seen.borrow_mut().push(invocation.to_string());

        let args: Vec<String> = invocation
            .arguments()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        let cutoff = args
            .iter()
            .position(|a| a == "-threshold")
            .and_then(|i| args.get(i + 1))
            .and_then(|p| p.trim_end_matches('%').parse::<u32>().ok())
            .ok_or_else(|| io::Error::other("only -threshold is supported here"))?;

        let input = image::open(&args[0]).map_err(io::Error::other)?.to_luma8();
        let limit = (255 * cutoff / 100) as u8;
        let output = GrayImage::from_fn(input.width(), input.height(), |x, y| {
            if input.get_pixel(x, y)[0] > limit {
                Luma([255])
            } else {
                Luma([0])
            }
        });
        output.save(&args[args.len() - 1]).map_err(io::Error::other)?;

        Ok(ToolOutput {
            code: Some(0),
            stdout: Vec::new(),
            stderr: Vec::new(),
        })
    }
}

struct SaveTo(PathBuf);

impl SavePrompt for SaveTo {
    fn save_path(&self, _suggested_name: &str, _format: ExportFormat) -> Option<PathBuf> {
        Some(self.0.clone())
    }
}

fn write_scan(path: &Path) {
    // Dark text strip on a light, partially transparent page
    RgbaImage::from_fn(64, 32, |_, y| {
        if (12..20).contains(&y) {
            Rgba([40, 40, 40, 255])
        } else {
            Rgba([220, 215, 200, 200])
        }
    })
    .save(path)
    .unwrap();
}

#[test]
fn test_load_threshold_export_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let scan = dir.path().join("scan.png");
    write_scan(&scan);

    let tools = ToolConfig::default().with_scratch_dir(Some(dir.path().to_path_buf()));
    let mut cleaner = Cleaner::new(tools, ThresholdingConvert::default());
    cleaner.load(SourceReference::Opened(scan)).unwrap();

    let settings = CleanupSettings {
        threshold: ThresholdLevel::P60,
        ..CleanupSettings::new()
    };
    assert_eq!(cleaner.apply_threshold(&settings).unwrap(), TransformOutcome::Applied);

    let working = cleaner.session().working().unwrap().to_luma8();
    assert!(working.pixels().all(|p| p[0] == 0 || p[0] == 255));
    assert_eq!(working.get_pixel(0, 15), &Luma([0]));
    assert_eq!(working.get_pixel(0, 0), &Luma([255]));

    for slot in ScratchSlot::ALL {
        assert!(!dir.path().join(slot.file_name()).exists(), "{:?} left behind", slot);
    }

    let out = dir.path().join("cleaned.pdf");
    assert_eq!(cleaner.suggested_name("pdf"), "scan.pdf");
    let outcome = cleaner
        .export_image(ExportFormat::Pdf, &SaveTo(out.clone()))
        .unwrap();
    assert!(matches!(outcome, ExportOutcome::Written(ref target) if target.path == out));

    let bytes = fs::read(&out).unwrap();
    assert!(!bytes.is_empty());
    assert!(bytes.starts_with(b"%PDF"));

    let seen = cleaner.runner().seen.borrow();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].contains("-threshold 60% -background white -flatten"));
}

#[test]
fn test_dropped_document_gets_timestamped_name() {
    let dir = tempfile::tempdir().unwrap();
    let scan = dir.path().join("scan.png");
    write_scan(&scan);

    let tools = ToolConfig::default().with_scratch_dir(Some(dir.path().to_path_buf()));
    let mut cleaner = Cleaner::new(tools, ThresholdingConvert::default());
    cleaner.load(SourceReference::Dropped(scan)).unwrap();

    let name = cleaner.suggested_name("jpg");
    let pattern = regex::Regex::new(r"^\d{12}_document-cleaner\.jpg$").unwrap();
    assert!(pattern.is_match(&name), "unexpected name {name}");

    let out = dir.path().join(&name);
    let outcome = cleaner
        .export_image(ExportFormat::Jpeg, &SaveTo(out.clone()))
        .unwrap();
    assert!(matches!(outcome, ExportOutcome::Written(_)));
    assert_eq!(image::open(&out).unwrap().width(), 64);
}
