use crate::{pages, state::State, widgets};

const AUTHOR_URL: &str = "https://cameronlucas.dev";

pub struct QrNexusApp {
    pub state: State,
}

impl QrNexusApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self { state }
    }
}

impl eframe::App for QrNexusApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Pick up logo selections and finished decodes before drawing
        self.state.poll(ctx);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("qrNexus").size(20.0).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    widgets::env_version(ui);
                });
            });
        });

        egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
            made_with_love(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                pages::generator_page(&mut self.state, ui);
            });
        });
    }
}

fn made_with_love(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            ui.label("Made with ");
            ui.colored_label(crate::utils::colors::COLOR_RED, "♥");
            ui.label(" by ");
            ui.hyperlink_to("Cameron Lucas", AUTHOR_URL);
        });
    });
}
