use egui::{Color32, Response, Ui};
use qrnexus_utils::version_info;

/// Displays the release channel and version, e.g. `stable:0.1.0`.
pub fn env_version(ui: &mut Ui) -> Response {
    let display_text = version_info::format_version();
    let (channel, _) = version_info::channel_info();

    let color = match channel {
        "nightly" => Color32::from_rgb(255, 165, 0), // Orange
        _ => Color32::GRAY,
    };

    ui.colored_label(color, display_text)
        .on_hover_text(format!("commit {}", version_info::build_commit()))
}
