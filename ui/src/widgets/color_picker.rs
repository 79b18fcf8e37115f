//! Block style color picker: a preview block, a swatch grid and a hex field.
//!
//! A selection is only reported once it is complete, i.e. when a swatch is
//! clicked or the hex field is left (focus lost or Enter) holding a valid
//! color. Partial input while typing is never emitted.

use egui::{Button, Color32, RichText, Sense, TextEdit, Ui, Vec2};
use qrnexus_business::HexColor;

use crate::utils::colors::{COLOR_RED, PICKER_SWATCHES, to_color32};

const PREVIEW_SIZE: Vec2 = Vec2::new(170.0, 60.0);
const SWATCH_SIZE: f32 = 22.0;
const SWATCHES_PER_ROW: usize = 5;

/// Per-picker UI state.
#[derive(Debug, Clone)]
pub struct ColorPickerState {
    committed: HexColor,
    hex_input: String,
    invalid: bool,
}

impl ColorPickerState {
    pub fn new(initial: HexColor) -> Self {
        Self {
            committed: initial,
            hex_input: initial.to_hex(),
            invalid: false,
        }
    }

    pub fn color(&self) -> HexColor {
        self.committed
    }

    pub fn hex_input(&self) -> &str {
        &self.hex_input
    }

    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    /// Commits a swatch selection.
    pub fn select(&mut self, color: HexColor) -> HexColor {
        self.committed = color;
        self.hex_input = color.to_hex();
        self.invalid = false;
        color
    }

    pub fn set_hex_input(&mut self, input: impl Into<String>) {
        self.hex_input = input.into();
    }

    /// Tries to commit the typed hex value.
    ///
    /// Returns the new color only if it parsed and differs from the current one.
    pub fn commit_input(&mut self) -> Option<HexColor> {
        match self.hex_input.parse::<HexColor>() {
            Ok(color) => {
                self.invalid = false;
                let changed = color != self.committed;
                self.select(color);
                changed.then_some(color)
            }
            Err(e) => {
                log::debug!("Rejected color input: {e}");
                self.invalid = true;
                None
            }
        }
    }
}

/// Renders the picker. Returns the color when a selection completes.
pub fn block_color_picker(ui: &mut Ui, title: &str, state: &mut ColorPickerState) -> Option<HexColor> {
    let mut completed = None;

    ui.vertical(|ui| {
        ui.label(title);
        ui.add_space(4.0);

        let (rect, _) = ui.allocate_exact_size(PREVIEW_SIZE, Sense::hover());
        let fill = to_color32(state.committed);
        ui.painter().rect_filled(rect, 6.0, fill);
        ui.painter().text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            state.committed.to_hex(),
            egui::FontId::monospace(14.0),
            contrast_text(fill),
        );

        ui.add_space(4.0);
        for row in PICKER_SWATCHES.chunks(SWATCHES_PER_ROW) {
            ui.horizontal(|ui| {
                for hex in row {
                    let Ok(color) = hex.parse::<HexColor>() else {
                        continue;
                    };
                    let swatch = Button::new("")
                        .fill(to_color32(color))
                        .min_size(Vec2::splat(SWATCH_SIZE));
                    if ui.add(swatch).on_hover_text(*hex).clicked() {
                        completed = Some(state.select(color));
                    }
                }
            });
        }

        ui.horizontal(|ui| {
            ui.label("#");
            let mut input = state.hex_input.trim_start_matches('#').to_owned();
            let response = ui.add(
                TextEdit::singleline(&mut input)
                    .desired_width(80.0)
                    .char_limit(8)
                    .font(egui::TextStyle::Monospace),
            );
            if response.changed() {
                state.set_hex_input(format!("#{input}"));
            }
            if response.lost_focus()
                && let Some(color) = state.commit_input()
            {
                completed = Some(color);
            }
        });

        if state.invalid {
            ui.label(RichText::new("Not a hex color").color(COLOR_RED).small());
        }
    });

    completed
}

fn contrast_text(fill: Color32) -> Color32 {
    let luma = 0.299 * f32::from(fill.r()) + 0.587 * f32::from(fill.g()) + 0.114 * f32::from(fill.b());
    if luma > 150.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}
