use image::RgbaImage;

/// The single pixel buffer the generator paints into.
///
/// Every paint replaces the whole buffer and bumps `revision`, which lets the
/// view re-upload its texture only when something changed.
#[derive(Debug, Default)]
pub struct CanvasSurface {
    pixels: Option<RgbaImage>,
    revision: u64,
}

impl CanvasSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paint(&mut self, image: RgbaImage) {
        self.pixels = Some(image);
        self.revision += 1;
    }

    /// `None` until the first successful paint.
    pub fn pixels(&self) -> Option<&RgbaImage> {
        self.pixels.as_ref()
    }

    pub fn is_painted(&self) -> bool {
        self.pixels.is_some()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.pixels.as_ref().map(|p| p.dimensions())
    }
}
