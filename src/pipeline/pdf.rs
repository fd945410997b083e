//! Single-page PDF export of the working image using `printpdf` 0.8.
//!
//! The page is sized to the image at the requested resolution, so a
//! 1240×1754 scan at 150 DPI becomes an A4 page with no margins.

use std::fs;
use std::path::Path;

use image::DynamicImage;
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info};

use crate::error::Result;

/// Resolution used by the "Save PDF" button
pub const EXPORT_DPI: f32 = 150.0;

const MM_PER_INCH: f32 = 25.4;

/// Encode `image` as a one-page PDF held in memory
pub fn encode_image_pdf(image: &DynamicImage, title: &str, dpi: f32) -> Vec<u8> {
    let width = image.width() as usize;
    let height = image.height() as usize;

    let raw = RawImage {
        pixels: RawImageData::U8(image.to_rgb8().into_raw()),
        width,
        height,
        data_format: RawImageFormat::RGB8,
        tag: Vec::new(),
    };

    let mut doc = PdfDocument::new(title);
    let xobject_id = doc.add_image(&raw);

    let page_w = Mm(width as f32 / dpi * MM_PER_INCH);
    let page_h = Mm(height as f32 / dpi * MM_PER_INCH);

    let ops = vec![Op::UseXobject {
        id: xobject_id,
        transform: XObjectTransform {
            translate_x: Some(Pt(0.0)),
            translate_y: Some(Pt(0.0)),
            scale_x: Some(1.0),
            scale_y: Some(1.0),
            dpi: Some(dpi),
            rotate: None,
        },
    }];

    doc.with_pages(vec![PdfPage::new(page_w, page_h, ops)]);
    debug!(width, height, dpi, "image placed on page");

    let mut warnings: Vec<PdfWarnMsg> = Vec::new();
    doc.save(&PdfSaveOptions::default(), &mut warnings)
}

/// Encode and write straight to `path`
pub fn write_image_pdf(image: &DynamicImage, path: &Path, dpi: f32) -> Result<()> {
    let title = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Document".to_string());

    let bytes = encode_image_pdf(image, &title, dpi);
    fs::write(path, &bytes)?;
    info!("Wrote PDF to {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}
