use std::time::Duration;

use qrnexus_business::{EXPORT_FILE_NAME, QrConfig, QrGenerator};

use crate::utils::download::{DownloadSink, SaveOutcome, SystemDownloadSink};
use crate::utils::file_picker::{LogoPicker, SystemLogoPicker};
use crate::widgets::{CanvasTexture, ColorPickerState};

/// How often to poll while a logo decode is in flight.
const DECODE_POLL_INTERVAL: Duration = Duration::from_millis(16);

/// The main application state.
///
/// Owns the generator and everything the page needs around it. All changes
/// to the request go through the generator's setters.
pub struct State {
    pub generator: QrGenerator,
    pub canvas: CanvasTexture,
    pub foreground_picker: ColorPickerState,
    pub background_picker: ColorPickerState,
    /// Failure of a picker or download action, shown next to render errors.
    pub notice: Option<String>,
    logo_picker: Box<dyn LogoPicker>,
    download_sink: Box<dyn DownloadSink>,
}

impl Default for State {
    fn default() -> Self {
        Self::with_config(QrConfig::default())
    }
}

impl State {
    /// State backed by the system file dialog and download target.
    pub fn with_config(config: QrConfig) -> Self {
        Self::new(
            config,
            Box::new(SystemLogoPicker::default()),
            Box::new(SystemDownloadSink),
        )
    }

    /// Creates the state and renders the default request once.
    pub fn new(
        config: QrConfig,
        logo_picker: Box<dyn LogoPicker>,
        download_sink: Box<dyn DownloadSink>,
    ) -> Self {
        let mut generator = QrGenerator::new(config);
        generator.mount();

        let request = generator.request();
        let foreground_picker = ColorPickerState::new(request.foreground);
        let background_picker = ColorPickerState::new(request.background);

        Self {
            generator,
            canvas: CanvasTexture::default(),
            foreground_picker,
            background_picker,
            notice: None,
            logo_picker,
            download_sink,
        }
    }

    /// State wired to caller supplied picker and sink, for tests.
    pub fn test(logo_picker: Box<dyn LogoPicker>, download_sink: Box<dyn DownloadSink>) -> Self {
        Self::new(QrConfig::default(), logo_picker, download_sink)
    }

    /// Drains background results; call once per frame.
    pub fn poll(&mut self, ctx: &egui::Context) {
        if let Some(picked) = self.logo_picker.take_picked() {
            match picked {
                Ok(logo) => {
                    self.notice = None;
                    self.generator.set_logo(logo);
                }
                Err(e) => {
                    log::warn!("Logo selection failed: {e:#}");
                    self.notice = Some(format!("Could not load logo: {e:#}"));
                }
            }
        }

        if self.generator.poll() {
            ctx.request_repaint();
        }
        if self.generator.is_rendering() {
            ctx.request_repaint_after(DECODE_POLL_INTERVAL);
        }
    }

    pub fn generate(&mut self) {
        self.notice = None;
        self.generator.generate();
    }

    pub fn open_logo_picker(&mut self) {
        self.logo_picker.open();
    }

    /// Exports the painted canvas and hands it to the download sink.
    pub fn download(&mut self) {
        let bytes = match self.generator.export_png() {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Export failed: {e}");
                self.notice = Some(format!("Download failed: {e}"));
                return;
            }
        };

        match self.download_sink.save(EXPORT_FILE_NAME, &bytes) {
            Ok(SaveOutcome::Cancelled) => {}
            Ok(outcome) => {
                log::debug!("Download finished: {outcome:?}");
                self.notice = None;
            }
            Err(e) => {
                log::warn!("Download failed: {e:#}");
                self.notice = Some(format!("Download failed: {e:#}"));
            }
        }
    }

    /// Message to show in the error banner, if any.
    pub fn error_message(&self) -> Option<String> {
        self.generator
            .last_error()
            .map(ToString::to_string)
            .or_else(|| self.notice.clone())
    }
}
