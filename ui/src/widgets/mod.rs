mod color_picker;
mod env_version;
mod error_banner;
mod qr_canvas;

pub use color_picker::{ColorPickerState, block_color_picker};
pub use env_version::env_version;
pub use error_banner::error_banner;
pub use qr_canvas::{CanvasTexture, qr_canvas};
