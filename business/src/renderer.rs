//! Paints QR symbols and composites the optional logo.
//!
//! Symbol encoding is done by the `qrcode` crate; this module only rasterizes
//! the module matrix onto a `width × width` canvas and layers the logo on top.

use image::{RgbaImage, imageops};
use qrcode::{Color, QrCode};

use crate::config::QrConfig;
use crate::request::EncodingRequest;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("nothing to encode, the text is empty")]
    EmptyText,
    #[error("could not encode text: {0}")]
    Encode(String),
}

impl From<qrcode::types::QrError> for RenderError {
    fn from(e: qrcode::types::QrError) -> Self {
        Self::Encode(e.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: QrConfig,
}

impl Renderer {
    pub fn new(config: QrConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &QrConfig {
        &self.config
    }

    /// Encodes `text` with the fixed version and error-correction level.
    pub fn encode(&self, text: &str) -> Result<QrCode, RenderError> {
        if text.is_empty() {
            return Err(RenderError::EmptyText);
        }
        let code = QrCode::with_version(text.as_bytes(), self.config.qr_version(), self.config.ec_level)?;
        Ok(code)
    }

    /// Renders the request, then layers `logo` over the center if given.
    pub fn render(
        &self,
        request: &EncodingRequest,
        logo: Option<&RgbaImage>,
    ) -> Result<RgbaImage, RenderError> {
        let mut canvas = self.render_base(request)?;
        if let Some(logo) = logo {
            self.overlay_logo(&mut canvas, logo);
        }
        Ok(canvas)
    }

    /// Rasterizes the plain symbol without any overlay.
    pub fn render_base(&self, request: &EncodingRequest) -> Result<RgbaImage, RenderError> {
        let code = self.encode(&request.text)?;
        let modules = code.width();
        let colors = code.to_colors();

        let width = self.config.width;
        let scale = f64::from(width) / (modules as f64 + 2.0 * f64::from(self.config.margin));
        let quiet = (f64::from(self.config.margin) * scale).floor() as u32;
        let symbol_end = width.saturating_sub(quiet);

        let dark = request.foreground.to_rgba();
        let light = request.background.to_rgba();

        let module_at = |p: u32| -> usize {
            let idx = (f64::from(p - quiet) / scale).floor() as usize;
            idx.min(modules - 1)
        };

        let canvas = RgbaImage::from_fn(width, width, |x, y| {
            let in_symbol = x >= quiet && y >= quiet && x < symbol_end && y < symbol_end;
            if !in_symbol {
                return light;
            }
            match colors[module_at(y) * modules + module_at(x)] {
                Color::Dark => dark,
                Color::Light => light,
            }
        });

        log::debug!(
            "Rendered {modules}x{modules} symbol for {} chars at {width}px",
            request.text.len()
        );
        Ok(canvas)
    }

    /// Scales `logo` to the overlay square and draws it over the canvas center.
    pub fn overlay_logo(&self, canvas: &mut RgbaImage, logo: &RgbaImage) {
        let scaled = self.scale_logo(logo);
        let (x, y) = self.config.logo_origin();
        imageops::overlay(canvas, &scaled, x, y);
    }

    pub fn scale_logo(&self, logo: &RgbaImage) -> RgbaImage {
        let size = self.config.logo_size;
        imageops::resize(logo, size, size, imageops::FilterType::Triangle)
    }
}
