use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::surface::CanvasSurface;

/// Name offered to the user when saving the exported image.
pub const EXPORT_FILE_NAME: &str = "qrcode.png";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("nothing has been rendered yet")]
    NoSurface,
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Encodes whatever is currently painted on `surface` as PNG.
pub fn export_png(surface: &CanvasSurface) -> Result<Vec<u8>, ExportError> {
    let pixels = surface.pixels().ok_or(ExportError::NoSurface)?;

    let mut out = Vec::new();
    PngEncoder::new(&mut out).write_image(
        pixels.as_raw(),
        pixels.width(),
        pixels.height(),
        ExtendedColorType::Rgba8,
    )?;

    log::info!(
        "Exported {}x{} canvas as {} PNG bytes",
        pixels.width(),
        pixels.height(),
        out.len()
    );
    Ok(out)
}
