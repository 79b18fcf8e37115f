use egui::{Response, RichText, Ui};

use crate::utils::colors::COLOR_RED;

/// Inline message for the last failed action.
pub fn error_banner(ui: &mut Ui, message: &str) -> Response {
    egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(1.0, COLOR_RED))
        .show(ui, |ui| {
            ui.label(RichText::new(format!("⚠ {message}")).color(COLOR_RED));
        })
        .response
}
