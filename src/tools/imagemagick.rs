//! Argument builders for ImageMagick's `convert`.

use std::path::Path;

use super::invoker::Invocation;
use crate::state::data::{TransformKind, TransformRequest};
use crate::state::settings::{DeskewLevel, ThresholdLevel};

/// Appended to every transform so PDF/JPEG exports never see an alpha channel
const FLATTEN_ON_WHITE: [&str; 3] = ["-background", "white", "-flatten"];

/// Operation-specific arguments for one transform
pub fn operation_args(request: &TransformRequest) -> Vec<String> {
    match request.kind {
        TransformKind::Threshold => {
            let cutoff = request
                .parameter_arg()
                .unwrap_or_else(|| ThresholdLevel::default().to_string());
            vec!["-colorspace".into(), "Gray".into(), "-threshold".into(), cutoff]
        }
        TransformKind::Deskew => {
            let sensitivity = request
                .parameter_arg()
                .unwrap_or_else(|| DeskewLevel::default().to_string());
            vec!["-deskew".into(), sensitivity]
        }
        TransformKind::Crop => vec!["-trim".into(), "+repage".into()],
    }
}

/// `convert <input> [op args] -background white -flatten <output>`
pub fn transform(program: &str, input: &Path, request: &TransformRequest, output: &Path) -> Invocation {
    Invocation::new(program)
        .arg(input)
        .args(operation_args(request))
        .args(FLATTEN_ON_WHITE)
        .arg(output)
}

/// `convert <image> <pdf>`, used before OCR
pub fn image_to_pdf(program: &str, image: &Path, pdf: &Path) -> Invocation {
    Invocation::new(program).arg(image).arg(pdf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_command() {
        let inv = transform(
            "convert",
            Path::new("_temp_input.png"),
            &TransformRequest::threshold(ThresholdLevel::P60),
            Path::new("_temp_output.png"),
        );
        assert_eq!(
            inv.to_string(),
            "convert _temp_input.png -colorspace Gray -threshold 60% -background white -flatten _temp_output.png"
        );
    }

    #[test]
    fn test_deskew_command() {
        let inv = transform(
            "magick",
            Path::new("in.png"),
            &TransformRequest::deskew(DeskewLevel::P30),
            Path::new("out.png"),
        );
        assert_eq!(
            inv.to_string(),
            "magick in.png -deskew 30% -background white -flatten out.png"
        );
    }

    #[test]
    fn test_crop_command() {
        let inv = transform(
            "convert",
            Path::new("in.png"),
            &TransformRequest::crop(),
            Path::new("out.png"),
        );
        assert_eq!(
            inv.to_string(),
            "convert in.png -trim +repage -background white -flatten out.png"
        );
    }

    #[test]
    fn test_missing_parameter_uses_toolbar_default() {
        let request = TransformRequest {
            kind: TransformKind::Threshold,
            parameter: None,
        };
        assert_eq!(operation_args(&request).last().map(String::as_str), Some("60%"));
    }

    #[test]
    fn test_pdf_conversion_command() {
        let inv = image_to_pdf("convert", Path::new("_ocr_input.png"), Path::new("_ocr_base.pdf"));
        assert_eq!(inv.to_string(), "convert _ocr_input.png _ocr_base.pdf");
    }
}
