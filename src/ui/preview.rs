use iced::widget::image::Handle;
use image::{DynamicImage, RgbaImage};

/// Longest edge of the preview panels, in pixels
pub const PREVIEW_MAX: u32 = 800;

/// Scale `image` down to fit the preview panel. Small images are shown as-is.
pub fn thumbnail(image: &DynamicImage) -> RgbaImage {
    if image.width() <= PREVIEW_MAX && image.height() <= PREVIEW_MAX {
        image.to_rgba8()
    } else {
        image.thumbnail(PREVIEW_MAX, PREVIEW_MAX).to_rgba8()
    }
}

/// Build an iced image handle for one of the two panels
pub fn preview_handle(image: &DynamicImage) -> Handle {
    let thumb = thumbnail(image);
    Handle::from_rgba(thumb.width(), thumb.height(), thumb.into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_large_scan_is_bounded() {
        let scan = DynamicImage::new_luma8(2480, 3508);
        let thumb = thumbnail(&scan);
        assert!(thumb.width() <= PREVIEW_MAX);
        assert_eq!(thumb.height(), PREVIEW_MAX);
    }

    #[test]
    fn test_small_image_is_not_upscaled() {
        let small = DynamicImage::new_rgb8(120, 90);
        let thumb = thumbnail(&small);
        assert_eq!((thumb.width(), thumb.height()), (120, 90));
    }
}
