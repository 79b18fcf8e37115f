//! Fixed rendering configuration.
//!
//! The canvas width and the logo overlay size are coupled: the overlay is
//! placed at `canvas/2 - logo/2` on both axes, so changing one of them without
//! the other moves the logo off-center. [`QrConfig::validate`] is run once at
//! startup to reject combinations that cannot be composited.

use qrcode::{EcLevel, Version};

/// Pixel width (and height) of the rendered canvas.
pub const QR_WIDTH: u32 = 300;

/// Quiet zone around the symbol, in modules.
pub const QR_MARGIN: u32 = 1;

/// Fixed symbol version; 57×57 modules.
pub const QR_VERSION: i16 = 10;

/// Side length of the square logo overlay in pixels.
pub const LOGO_SIZE: u32 = 128;

/// Errors raised when the coupled constants do not fit together.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("canvas width must be positive")]
    EmptyCanvas,
    #[error("logo overlay {logo}px does not fit on a {canvas}px canvas")]
    LogoLargerThanCanvas { logo: u32, canvas: u32 },
    #[error("canvas width {width}px is smaller than the {required}px needed for one pixel per module")]
    CanvasTooSmall { width: u32, required: u32 },
}

/// Rendering parameters handed to the encoder and the compositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrConfig {
    pub width: u32,
    pub margin: u32,
    pub version: i16,
    pub ec_level: EcLevel,
    pub logo_size: u32,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            width: QR_WIDTH,
            margin: QR_MARGIN,
            version: QR_VERSION,
            // A central logo occludes modules; only level H reliably tolerates it.
            ec_level: EcLevel::H,
            logo_size: LOGO_SIZE,
        }
    }
}

impl QrConfig {
    pub fn qr_version(&self) -> Version {
        Version::Normal(self.version)
    }

    /// Number of modules per side for the configured version.
    pub fn modules(&self) -> u32 {
        // Normal versions grow by four modules per step starting at 21.
        17 + 4 * u32::from(self.version.unsigned_abs())
    }

    /// Top-left corner of the logo overlay on the canvas.
    pub fn logo_origin(&self) -> (i64, i64) {
        let center = i64::from(self.width) / 2;
        let half = i64::from(self.logo_size) / 2;
        (center - half, center - half)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::EmptyCanvas);
        }
        if self.logo_size > self.width {
            return Err(ConfigError::LogoLargerThanCanvas {
                logo: self.logo_size,
                canvas: self.width,
            });
        }
        let required = self.modules() + 2 * self.margin;
        if self.width < required {
            return Err(ConfigError::CanvasTooSmall {
                width: self.width,
                required,
            });
        }
        Ok(())
    }
}
