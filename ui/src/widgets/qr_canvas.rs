//! Displays the generator's canvas surface as an egui texture.
//!
//! The texture is re-uploaded only when the surface revision changes, so
//! idle frames cost nothing beyond drawing the existing texture.

use egui::{ColorImage, Context, Response, TextureHandle, TextureOptions, Ui, Vec2};
use qrnexus_business::CanvasSurface;

/// Texture mirror of the canvas surface.
#[derive(Default)]
pub struct CanvasTexture {
    texture: Option<TextureHandle>,
    revision: u64,
}

impl std::fmt::Debug for CanvasTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasTexture")
            .field("uploaded", &self.texture.is_some())
            .field("revision", &self.revision)
            .finish()
    }
}

impl CanvasTexture {
    /// Uploads the surface if it changed since the last call.
    pub fn sync(&mut self, ctx: &Context, surface: &CanvasSurface) -> Option<&TextureHandle> {
        if let Some(pixels) = surface.pixels()
            && (self.texture.is_none() || self.revision != surface.revision())
        {
            let size = [pixels.width() as usize, pixels.height() as usize];
            let image = ColorImage::from_rgba_unmultiplied(size, pixels.as_raw());
            match &mut self.texture {
                Some(texture) => texture.set(image, TextureOptions::NEAREST),
                None => {
                    self.texture = Some(ctx.load_texture("qr_canvas", image, TextureOptions::NEAREST));
                }
            }
            self.revision = surface.revision();
            log::trace!("Uploaded canvas texture revision {}", self.revision);
        }
        self.texture.as_ref()
    }

    /// Surface revision currently shown.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// Draws the canvas at its native pixel size, or a placeholder of `fallback_side`.
pub fn qr_canvas(
    ui: &mut Ui,
    texture: &mut CanvasTexture,
    surface: &CanvasSurface,
    fallback_side: f32,
) -> Response {
    match texture.sync(ui.ctx(), surface) {
        Some(handle) => {
            let size = Vec2::new(handle.size()[0] as f32, handle.size()[1] as f32);
            ui.add(egui::Image::new((handle.id(), size)).alt_text("QR code"))
        }
        None => {
            let (rect, response) =
                ui.allocate_exact_size(Vec2::splat(fallback_side), egui::Sense::hover());
            ui.painter()
                .rect_filled(rect, 0.0, ui.visuals().extreme_bg_color);
            response
        }
    }
}
