//! Shared color constants for the UI.

use egui::Color32;

/// Green used by the download button.
pub const COLOR_GREEN: Color32 = Color32::from_rgb(34, 197, 94);

/// Red for error messages.
pub const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);

/// Blue accent for the title, generate button and options toggle.
pub const COLOR_BLUE: Color32 = Color32::from_rgb(59, 130, 246);

/// Swatches offered by the block color pickers, in display order.
pub const PICKER_SWATCHES: [&str; 9] = [
    "#d9e3f0", "#f47373", "#697689", "#37d67a", "#2ccce4", "#555555", "#dce775", "#ff8a65",
    "#ba68c8",
];

/// Converts a parsed hex color into an egui color.
pub fn to_color32(color: qrnexus_business::HexColor) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}
