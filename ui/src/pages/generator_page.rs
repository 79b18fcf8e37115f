//! The generator page: canvas and download on the left, inputs on the right.

use egui::{Button, Color32, Response, RichText, TextEdit, Ui};

use crate::state::State;
use crate::utils::colors::{COLOR_BLUE, COLOR_GREEN};
use crate::widgets;

const SIDE_COLUMN_WIDTH: f32 = 320.0;

/// Renders the whole generator page.
pub fn generator_page(state: &mut State, ui: &mut Ui) -> Response {
    ui.horizontal_top(|ui| {
        ui.allocate_ui(egui::vec2(SIDE_COLUMN_WIDTH, ui.available_height()), |ui| {
            canvas_column(state, ui);
        });
        ui.separator();
        ui.vertical(|ui| {
            form_column(state, ui);
        });
    })
    .response
}

fn canvas_column(state: &mut State, ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.label(RichText::new("Scan Me").italics().size(28.0).color(COLOR_BLUE));
        ui.add_space(8.0);

        let side = state.generator.config().width as f32;
        widgets::qr_canvas(ui, &mut state.canvas, state.generator.surface(), side);

        ui.add_space(8.0);
        let download = Button::new(RichText::new("Download").color(Color32::WHITE))
            .fill(COLOR_GREEN)
            .min_size(egui::vec2(side, 32.0));
        let response = ui
            .add_enabled(state.generator.can_download(), download)
            .on_disabled_hover_text("Generate a QR code first");
        if response.clicked() {
            state.download();
        }
    });
}

fn form_column(state: &mut State, ui: &mut Ui) {
    ui.heading(RichText::new("qrNexus").size(32.0));
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        let mut text = state.generator.request().text.clone();
        let input = ui.add(
            TextEdit::singleline(&mut text)
                .hint_text("Website URL...")
                .desired_width(ui.available_width() - 160.0),
        );
        if input.changed() {
            state.generator.set_text(text);
        }

        let generate = Button::new(RichText::new("Generate QR Code").color(COLOR_BLUE))
            .stroke(egui::Stroke::new(1.0, COLOR_BLUE));
        if ui.add(generate).clicked() {
            state.generate();
        }
        if state.generator.is_rendering() {
            ui.spinner();
        }
    });

    if let Some(message) = state.error_message() {
        ui.add_space(6.0);
        widgets::error_banner(ui, &message);
    }

    ui.add_space(6.0);
    ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
        let chevron = if state.generator.show_advanced() { "⏶" } else { "⏷" };
        let toggle = Button::new(RichText::new(format!("Advanced Options {chevron}")).color(COLOR_BLUE))
            .frame(false);
        if ui.add(toggle).clicked() {
            state.generator.toggle_advanced();
        }
    });

    if state.generator.show_advanced() {
        advanced_options(state, ui);
    }
}

fn advanced_options(state: &mut State, ui: &mut Ui) {
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.label("Logo/Image:");
            ui.label(RichText::new("128px by 128px").small().weak());
        });

        if ui.button("Choose file…").clicked() {
            state.open_logo_picker();
        }

        let logo_name = state.generator.logo().map(|logo| logo.name.clone());
        match logo_name {
            Some(name) => {
                ui.label(name);
                if ui.button("Remove logo").clicked() {
                    state.generator.clear_logo();
                }
            }
            None => {
                ui.label(RichText::new("No file chosen").weak());
            }
        }
    });

    ui.add_space(12.0);
    ui.horizontal_top(|ui| {
        if let Some(color) =
            widgets::block_color_picker(ui, "QR Code Color", &mut state.foreground_picker)
        {
            state.generator.set_foreground(color);
        }
        ui.add_space(24.0);
        if let Some(color) =
            widgets::block_color_picker(ui, "Background Color", &mut state.background_picker)
        {
            state.generator.set_background(color);
        }
    });
}
