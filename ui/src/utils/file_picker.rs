//! File picker for choosing the logo image.
//!
//! This module provides trait-based abstractions for file picker operations,
//! enabling mock implementations for testing without relying on system dialogs.
//!
//! # Platform Support
//!
//! - **Native (Windows, macOS, Linux)**: blocking native dialog via `rfd`.
//! - **Web (WASM)**: the browser file input via `rfd::AsyncFileDialog`; the
//!   selection arrives on a later frame.
//!
//! The picked file is kept as raw bytes. Decoding only happens when the user
//! generates a QR code, so an unreadable image is reported at that point.

#[cfg(not(target_arch = "wasm32"))]
use anyhow::Context as _;
use qrnexus_business::LogoImage;

/// File extensions offered in the picker filter.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "webp", "ico", "tiff", "tif",
];

/// Trait for logo picker operations, enabling mock implementations for testing.
pub trait LogoPicker {
    /// Opens the picker. The selection is delivered through [`LogoPicker::take_picked`].
    fn open(&mut self);

    /// Returns the next picked logo, or the error raised while reading it.
    fn take_picked(&mut self) -> Option<anyhow::Result<LogoImage>>;
}

/// Default picker backed by the system file dialog.
pub struct SystemLogoPicker {
    sender: flume::Sender<anyhow::Result<LogoImage>>,
    receiver: flume::Receiver<anyhow::Result<LogoImage>>,
}

impl Default for SystemLogoPicker {
    fn default() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self { sender, receiver }
    }
}

impl LogoPicker for SystemLogoPicker {
    #[cfg(not(target_arch = "wasm32"))]
    fn open(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Image", IMAGE_EXTENSIONS)
            .set_title("Select a logo")
            .pick_file()
        else {
            log::debug!("Logo selection cancelled");
            return;
        };

        log::info!("User selected logo: {}", path.display());
        if self.sender.send(load_logo_from_path(&path)).is_err() {
            log::warn!("Logo picker receiver dropped");
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn open(&mut self) {
        let sender = self.sender.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let Some(handle) = rfd::AsyncFileDialog::new()
                .add_filter("Image", IMAGE_EXTENSIONS)
                .pick_file()
                .await
            else {
                log::debug!("Logo selection cancelled");
                return;
            };
            let bytes = handle.read().await;
            log::info!("User selected logo {} ({} bytes)", handle.file_name(), bytes.len());
            if sender
                .send(Ok(LogoImage::new(handle.file_name(), bytes)))
                .is_err()
            {
                log::warn!("Logo picker receiver dropped");
            }
        });
    }

    fn take_picked(&mut self) -> Option<anyhow::Result<LogoImage>> {
        self.receiver.try_recv().ok()
    }
}

/// Reads a logo file without decoding it.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_logo_from_path(path: &std::path::Path) -> anyhow::Result<LogoImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    log::debug!("Read {} bytes from {}", bytes.len(), path.display());

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "logo".to_owned());
    Ok(LogoImage::new(name, bytes))
}
