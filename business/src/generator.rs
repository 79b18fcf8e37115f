//! The generator page state and its render/export lifecycle.
//!
//! ```text
//!  Idle ──mount──▶ Rendered ◀──────────────┐
//!                     │ edit                │ decode done
//!                     ▼                     │
//!                  Editing ──generate──▶ Rendering
//! ```
//!
//! Edits only touch the in-memory request. The surface changes exclusively
//! through [`QrGenerator::generate`] and, when a logo decode is in flight,
//! through [`QrGenerator::poll`] picking up its result. A render that
//! completes after further edits leaves the generator in `Editing`.

use std::sync::Arc;

use image::RgbaImage;

use crate::color::HexColor;
use crate::config::QrConfig;
use crate::exporter::{self, ExportError};
use crate::logo::{LogoDecodeTask, LogoError, LogoImage};
use crate::renderer::{RenderError, Renderer};
use crate::request::EncodingRequest;
use crate::surface::CanvasSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing rendered yet.
    Idle,
    /// Inputs changed since the last completed render attempt.
    Editing,
    /// A logo decode is pending; the surface updates once it resolves.
    Rendering,
    /// The surface shows the request of the last generate call.
    Rendered,
}

/// Failure of the last generate call, shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("{0}; the QR code was rendered without it")]
    Logo(LogoError),
}

#[derive(Debug)]
struct PendingRender {
    task: LogoDecodeTask,
    request: EncodingRequest,
}

/// Bitmap of the last successfully decoded logo.
struct DecodedLogo {
    bytes: Arc<[u8]>,
    bitmap: RgbaImage,
}

impl std::fmt::Debug for DecodedLogo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedLogo")
            .field("dimensions", &self.bitmap.dimensions())
            .finish()
    }
}

#[derive(Debug)]
pub struct QrGenerator {
    renderer: Renderer,
    request: EncodingRequest,
    logo: Option<LogoImage>,
    surface: CanvasSurface,
    show_advanced: bool,
    phase: Phase,
    last_error: Option<GenerateError>,
    pending: Option<PendingRender>,
    decoded_logo: Option<DecodedLogo>,
    edited_since_generate: bool,
    mounted: bool,
}

impl Default for QrGenerator {
    fn default() -> Self {
        Self::new(QrConfig::default())
    }
}

impl QrGenerator {
    pub fn new(config: QrConfig) -> Self {
        Self {
            renderer: Renderer::new(config),
            request: EncodingRequest::default(),
            logo: None,
            surface: CanvasSurface::new(),
            show_advanced: true,
            phase: Phase::Idle,
            last_error: None,
            pending: None,
            decoded_logo: None,
            edited_since_generate: false,
            mounted: false,
        }
    }

    /// Renders the current (default) request once; later calls do nothing.
    pub fn mount(&mut self) {
        if !self.mounted {
            self.mounted = true;
            log::info!("Rendering initial QR code for {:?}", self.request.text);
            self.generate();
        }
    }

    pub fn config(&self) -> &QrConfig {
        self.renderer.config()
    }

    pub fn request(&self) -> &EncodingRequest {
        &self.request
    }

    pub fn logo(&self) -> Option<&LogoImage> {
        self.logo.as_ref()
    }

    pub fn surface(&self) -> &CanvasSurface {
        &self.surface
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn last_error(&self) -> Option<&GenerateError> {
        self.last_error.as_ref()
    }

    pub fn show_advanced(&self) -> bool {
        self.show_advanced
    }

    pub fn is_rendering(&self) -> bool {
        self.pending.is_some()
    }

    /// Download is offered only once something has been painted.
    pub fn can_download(&self) -> bool {
        self.surface.is_painted()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.request.text = text.into();
        self.mark_edited();
    }

    pub fn set_foreground(&mut self, color: HexColor) {
        self.request.foreground = color;
        self.mark_edited();
    }

    pub fn set_background(&mut self, color: HexColor) {
        self.request.background = color;
        self.mark_edited();
    }

    pub fn set_logo(&mut self, logo: LogoImage) {
        log::debug!("Logo selected: {logo:?}");
        self.logo = Some(logo);
        self.decoded_logo = None;
        self.mark_edited();
    }

    pub fn clear_logo(&mut self) {
        if self.logo.take().is_some() {
            self.decoded_logo = None;
            self.mark_edited();
        }
    }

    pub fn set_show_advanced(&mut self, show: bool) {
        self.show_advanced = show;
    }

    pub fn toggle_advanced(&mut self) {
        self.show_advanced = !self.show_advanced;
    }

    /// Starts a render of the current request.
    ///
    /// Without a logo, or with a logo already decoded, the surface is
    /// repainted before this returns. Otherwise the decode runs in the
    /// background and [`Self::poll`] finishes the job. A pending decode of the
    /// same logo is joined and renders this request instead; a pending decode
    /// of another logo is abandoned.
    pub fn generate(&mut self) {
        self.last_error = None;
        self.edited_since_generate = false;
        let request = self.request.clone();

        let Some(logo) = self.logo.clone() else {
            self.pending = None;
            self.phase = Phase::Rendering;
            let result = self.renderer.render(&request, None);
            self.finish(result.map_err(GenerateError::from));
            return;
        };

        if let Some(decoded) = &self.decoded_logo
            && Arc::ptr_eq(&decoded.bytes, &logo.bytes)
        {
            log::debug!("Reusing decoded logo {:?}", logo.name);
            self.pending = None;
            self.phase = Phase::Rendering;
            let result = self.composite(&request, &decoded.bitmap);
            self.finish(result);
            return;
        }

        let joinable = self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.task.is_for(&logo));
        if joinable && let Some(pending) = &mut self.pending {
            log::debug!("Joining pending decode of {:?}", logo.name);
            pending.request = request;
        } else {
            if self.pending.is_some() {
                log::debug!("Abandoning pending decode for a different logo");
            }
            log::debug!("Decoding logo {:?}", logo.name);
            self.pending = Some(PendingRender {
                task: LogoDecodeTask::spawn(&logo),
                request,
            });
        }
        self.phase = Phase::Rendering;
    }

    /// Completes a pending logo render if its decode has finished.
    ///
    /// Returns `true` when the surface or the error state changed.
    pub fn poll(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        let Some(decoded) = pending.task.try_take() else {
            self.pending = Some(pending);
            return false;
        };

        let result = match decoded {
            Ok(bitmap) => {
                let result = self.composite(&pending.request, &bitmap);
                self.decoded_logo = Some(DecodedLogo {
                    bytes: Arc::clone(pending.task.bytes()),
                    bitmap,
                });
                result
            }
            Err(e) => {
                log::warn!("Logo decode failed: {e}");
                match self.renderer.render(&pending.request, None) {
                    Ok(plain) => {
                        self.paint(plain);
                        Err(GenerateError::Logo(e))
                    }
                    Err(render_err) => Err(render_err.into()),
                }
            }
        };
        self.finish(result);
        true
    }

    /// PNG bytes of whatever is currently painted.
    pub fn export_png(&self) -> Result<Vec<u8>, ExportError> {
        exporter::export_png(&self.surface)
    }

    fn composite(
        &self,
        request: &EncodingRequest,
        logo: &RgbaImage,
    ) -> Result<RgbaImage, GenerateError> {
        Ok(self.renderer.render(request, Some(logo))?)
    }

    fn finish(&mut self, result: Result<RgbaImage, GenerateError>) {
        // Inputs changed while a decode was pending: the canvas is behind them.
        let settled = if self.edited_since_generate {
            Phase::Editing
        } else {
            Phase::Rendered
        };
        match result {
            Ok(image) => {
                self.paint(image);
                self.phase = settled;
            }
            Err(GenerateError::Logo(e)) => {
                // The plain fallback was painted already.
                self.last_error = Some(GenerateError::Logo(e));
                self.phase = settled;
            }
            Err(e) => {
                log::warn!("Render failed: {e}");
                self.last_error = Some(e);
                self.phase = Phase::Editing;
            }
        }
    }

    fn paint(&mut self, image: RgbaImage) {
        self.surface.paint(image);
        log::debug!("Canvas repainted, revision {}", self.surface.revision());
    }

    fn mark_edited(&mut self) {
        self.edited_since_generate = true;
        if self.phase != Phase::Rendering {
            self.phase = Phase::Editing;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{png_bytes, settle, solid_logo};

    fn mounted() -> QrGenerator {
        let mut generator = QrGenerator::default();
        generator.mount();
        generator
    }

    fn red_logo() -> LogoImage {
        LogoImage::new("red.png", png_bytes(&solid_logo(16, 16, [255, 0, 0, 255])))
    }

    #[test]
    fn test_starts_idle_with_defaults() {
        let generator = QrGenerator::default();
        assert_eq!(generator.phase(), Phase::Idle);
        assert_eq!(generator.request().text, "https://cameronlucas.dev");
        assert_eq!(generator.request().foreground.to_hex(), "#555555");
        assert_eq!(generator.request().background.to_hex(), "#ffffff");
        assert!(generator.show_advanced());
        assert!(!generator.can_download());
    }

    #[test]
    fn test_mount_renders_once() {
        let mut generator = mounted();
        assert_eq!(generator.phase(), Phase::Rendered);
        assert_eq!(generator.surface().revision(), 1);
        assert!(generator.can_download());

        generator.mount();
        assert_eq!(generator.surface().revision(), 1);
    }

    #[test]
    fn test_edits_do_not_repaint() {
        let mut generator = mounted();
        let before = generator.surface().pixels().cloned();

        generator.set_text("https://example.com");
        generator.set_foreground(HexColor::rgb(0, 0, 0));
        generator.set_background(HexColor::rgb(0xff, 0xee, 0xdd));

        assert_eq!(generator.phase(), Phase::Editing);
        assert_eq!(generator.surface().revision(), 1);
        assert_eq!(generator.surface().pixels().cloned(), before);
    }

    #[test]
    fn test_download_exports_painted_canvas_not_edited_inputs() {
        let mut generator = mounted();
        let exported_before = generator.export_png().unwrap();

        generator.set_text("something else entirely");
        let exported_after = generator.export_png().unwrap();
        assert_eq!(exported_before, exported_after);
    }

    #[test]
    fn test_generate_applies_edits() {
        let mut generator = mounted();
        let before = generator.surface().pixels().cloned();

        generator.set_text("https://example.com");
        generator.generate();

        assert_eq!(generator.phase(), Phase::Rendered);
        assert_eq!(generator.surface().revision(), 2);
        assert_ne!(generator.surface().pixels().cloned(), before);
    }

    #[test]
    fn test_toggle_advanced_does_not_affect_pixels() {
        let mut generator = mounted();
        generator.generate();
        let shown = generator.surface().pixels().cloned();

        generator.toggle_advanced();
        assert!(!generator.show_advanced());
        assert_eq!(generator.phase(), Phase::Rendered);
        generator.generate();
        assert_eq!(generator.surface().pixels().cloned(), shown);
    }

    #[test]
    fn test_encode_failure_is_reported_and_canvas_kept() {
        let mut generator = mounted();
        let before = generator.surface().pixels().cloned();

        generator.set_text("x".repeat(1000));
        generator.generate();

        assert!(matches!(
            generator.last_error(),
            Some(GenerateError::Render(RenderError::Encode(_)))
        ));
        assert_eq!(generator.phase(), Phase::Editing);
        assert_eq!(generator.surface().pixels().cloned(), before);
        assert!(generator.can_download());
    }

    #[test]
    fn test_encode_failure_before_any_render_keeps_download_disabled() {
        let mut generator = QrGenerator::default();
        generator.set_text("");
        generator.mount();
        assert_eq!(
            generator.last_error(),
            Some(&GenerateError::Render(RenderError::EmptyText))
        );
        assert!(!generator.can_download());
        assert!(matches!(generator.export_png(), Err(ExportError::NoSurface)));
    }

    #[test]
    fn test_successful_generate_clears_previous_error() {
        let mut generator = mounted();
        generator.set_text("");
        generator.generate();
        assert!(generator.last_error().is_some());

        generator.set_text("ok");
        generator.generate();
        assert!(generator.last_error().is_none());
    }

    #[test]
    fn test_logo_render_waits_for_decode() {
        let mut generator = mounted();
        generator.set_logo(red_logo());
        generator.generate();
        assert!(generator.is_rendering());
        assert_eq!(generator.phase(), Phase::Rendering);

        settle(&mut generator);

        assert_eq!(generator.phase(), Phase::Rendered);
        assert!(generator.last_error().is_none());
        let pixels = generator.surface().pixels().unwrap();
        assert_eq!(pixels.get_pixel(150, 150).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_edits_during_decode_do_not_leak_into_render() {
        let mut generator = mounted();
        let expected = Renderer::default()
            .render(
                &EncodingRequest::default(),
                Some(&solid_logo(16, 16, [255, 0, 0, 255])),
            )
            .unwrap();

        generator.set_logo(red_logo());
        generator.generate();
        generator.set_text("typed while decoding");
        assert_eq!(generator.phase(), Phase::Rendering);
        settle(&mut generator);

        assert_eq!(generator.surface().pixels(), Some(&expected));
    }

    #[test]
    fn test_render_finishing_after_edits_leaves_editing() {
        let mut generator = mounted();
        generator.set_logo(red_logo());
        generator.generate();
        generator.set_text("edited while decoding");
        settle(&mut generator);

        assert_eq!(generator.phase(), Phase::Editing);
        assert!(generator.last_error().is_none());

        generator.generate();
        assert_eq!(generator.phase(), Phase::Rendered);
    }

    #[test]
    fn test_decoded_logo_is_reused() {
        let mut generator = mounted();
        generator.set_logo(red_logo());
        generator.generate();
        settle(&mut generator);

        generator.set_text("https://example.com");
        generator.generate();

        // Same bytes, so no second decode is needed.
        assert!(!generator.is_rendering());
        assert_eq!(generator.phase(), Phase::Rendered);
        let expected = Renderer::default()
            .render(
                &EncodingRequest::new("https://example.com"),
                Some(&solid_logo(16, 16, [255, 0, 0, 255])),
            )
            .unwrap();
        assert_eq!(generator.surface().pixels(), Some(&expected));
    }

    #[test]
    fn test_new_logo_invalidates_decoded_bitmap() {
        let mut generator = mounted();
        generator.set_logo(red_logo());
        generator.generate();
        settle(&mut generator);

        generator.set_logo(LogoImage::new(
            "blue.png",
            png_bytes(&solid_logo(16, 16, [0, 0, 255, 255])),
        ));
        generator.generate();
        assert!(generator.is_rendering());
        settle(&mut generator);

        let pixels = generator.surface().pixels().unwrap();
        assert_eq!(pixels.get_pixel(150, 150).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_repeated_generate_joins_pending_decode() {
        let mut generator = mounted();
        generator.set_logo(red_logo());
        generator.generate();
        generator.set_text("https://example.com");
        generator.generate();
        assert!(generator.is_rendering());

        settle(&mut generator);

        assert_eq!(generator.phase(), Phase::Rendered);
        let expected = Renderer::default()
            .render(
                &EncodingRequest::new("https://example.com"),
                Some(&solid_logo(16, 16, [255, 0, 0, 255])),
            )
            .unwrap();
        assert_eq!(generator.surface().pixels(), Some(&expected));
    }

    #[test]
    fn test_undecodable_logo_reports_error_and_falls_back() {
        let mut generator = mounted();
        generator.set_text("https://example.com");
        generator.set_logo(LogoImage::new("huge.png", vec![0u8; 4096]));
        generator.generate();
        settle(&mut generator);

        assert!(matches!(
            generator.last_error(),
            Some(GenerateError::Logo(LogoError::Decode(_)))
        ));
        assert_eq!(generator.phase(), Phase::Rendered);

        let plain = Renderer::default()
            .render(&EncodingRequest::new("https://example.com"), None)
            .unwrap();
        assert_eq!(generator.surface().pixels(), Some(&plain));
    }

    #[test]
    fn test_newer_generate_supersedes_pending_decode() {
        let mut generator = mounted();
        generator.set_logo(red_logo());
        generator.generate();

        generator.clear_logo();
        generator.set_text("https://example.com");
        generator.generate();
        assert!(!generator.is_rendering());
        let revision = generator.surface().revision();

        // Nothing left to pick up from the abandoned decode.
        std::thread::sleep(std::time::Duration::from_millis(50));
        assert!(!generator.poll());
        assert_eq!(generator.surface().revision(), revision);

        let plain = Renderer::default()
            .render(&EncodingRequest::new("https://example.com"), None)
            .unwrap();
        assert_eq!(generator.surface().pixels(), Some(&plain));
    }

    #[test]
    fn test_poll_without_pending_is_noop() {
        let mut generator = mounted();
        assert!(!generator.poll());
    }
}
