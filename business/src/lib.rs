//! Core of the qrNexus generator: encoding requests, rendering, logo
//! compositing and PNG export, independent of any UI toolkit.

mod color;
mod config;
mod exporter;
mod generator;
mod logo;
mod renderer;
mod request;
mod surface;
mod test_utils;

pub use color::{ColorParseError, HexColor};
pub use config::{ConfigError, LOGO_SIZE, QR_MARGIN, QR_VERSION, QR_WIDTH, QrConfig};
pub use exporter::{EXPORT_FILE_NAME, ExportError, export_png};
pub use generator::{GenerateError, Phase, QrGenerator};
pub use logo::{LogoDecodeTask, LogoError, LogoImage, decode_logo};
pub use renderer::{RenderError, Renderer};
pub use request::{DEFAULT_BACKGROUND, DEFAULT_FOREGROUND, DEFAULT_TEXT, EncodingRequest};
pub use surface::CanvasSurface;
