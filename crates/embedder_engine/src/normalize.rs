use std::io::Cursor;

use image::{imageops::FilterType, ImageFormat};

/// Physical sizing of embedded images. The target pixel width is
/// `target_width_inches * dpi`; height follows the source aspect ratio.
#[derive(Debug, Clone)]
pub struct NormalizeSettings {
    pub target_width_inches: f64,
    pub dpi: u32,
}

impl Default for NormalizeSettings {
    fn default() -> Self {
        Self {
            target_width_inches: 1.0,
            dpi: 300,
        }
    }
}

impl NormalizeSettings {
    pub fn target_width_px(&self) -> u32 {
        (self.target_width_inches * f64::from(self.dpi)).round() as u32
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("source image has zero width")]
    InvalidDimensions,
    #[error("failed to encode png: {0}")]
    Encode(#[source] image::ImageError),
}

/// Decode raw bytes, resample to the target physical width preserving the
/// aspect ratio, and re-encode as PNG.
///
/// Deterministic for identical input bytes and settings.
pub fn normalize(raw: &[u8], settings: &NormalizeSettings) -> Result<Vec<u8>, NormalizeError> {
    let src = image::load_from_memory(raw).map_err(NormalizeError::Decode)?;
    let (src_w, src_h) = (src.width(), src.height());
    if src_w == 0 {
        return Err(NormalizeError::InvalidDimensions);
    }

    let target_w = settings.target_width_px();
    let target_h =
        ((f64::from(src_h) * f64::from(target_w)) / f64::from(src_w)).round() as u32;
    // A degenerate ultra-wide source would round to zero rows; keep one.
    let target_h = target_h.max(1);

    let resized = src.resize_exact(target_w, target_h, FilterType::CatmullRom);
    let mut buf = Vec::new();
    resized
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(NormalizeError::Encode)?;
    Ok(buf)
}
