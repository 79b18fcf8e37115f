#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use egui_kittest::Harness;
use image::{ExtendedColorType, ImageEncoder as _, Rgba, RgbaImage};
use qrnexus_business::LogoImage;
use qrnexus_ui::pages::generator_page;
use qrnexus_ui::state::State;
use qrnexus_ui::utils::download::{DownloadSink, SaveOutcome};
use qrnexus_ui::utils::file_picker::LogoPicker;

/// Frames to run after an interaction so egui can process it.
pub const UI_PROPAGATION_FRAMES: usize = 5;

/// Large enough for both columns with the advanced options open.
pub const PAGE_SIZE: egui::Vec2 = egui::Vec2::new(1000.0, 900.0);

/// Files handed to the mock download sink.
pub type SavedFiles = Arc<Mutex<Vec<(String, Vec<u8>)>>>;

/// Picker that yields a fixed logo each time it is opened.
pub struct MockLogoPicker {
    logo: Option<LogoImage>,
    picked: Option<LogoImage>,
}

impl MockLogoPicker {
    pub fn with_logo(logo: LogoImage) -> Self {
        Self {
            logo: Some(logo),
            picked: None,
        }
    }

    pub fn cancelled() -> Self {
        Self {
            logo: None,
            picked: None,
        }
    }
}

impl LogoPicker for MockLogoPicker {
    fn open(&mut self) {
        self.picked = self.logo.clone();
    }

    fn take_picked(&mut self) -> Option<anyhow::Result<LogoImage>> {
        self.picked.take().map(Ok)
    }
}

/// Sink that records saves, or fails every save when `fail` is set.
pub struct MockDownloadSink {
    saved: SavedFiles,
    fail: bool,
}

impl MockDownloadSink {
    /// A sink that records into its own buffer.
    pub fn recording() -> Self {
        Self {
            saved: SavedFiles::default(),
            fail: false,
        }
    }
}

impl DownloadSink for MockDownloadSink {
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> anyhow::Result<SaveOutcome> {
        if self.fail {
            anyhow::bail!("disk full");
        }
        self.saved
            .lock()
            .expect("saved files lock")
            .push((file_name.to_owned(), bytes.to_vec()));
        Ok(SaveOutcome::Saved(file_name.to_owned()))
    }
}

pub struct TestCtx<'a> {
    harness: Harness<'a, State>,
    saved: SavedFiles,
}

impl<'a> TestCtx<'a> {
    pub fn new(picker: MockLogoPicker) -> Self {
        Self::build(picker, false)
    }

    pub fn with_failing_sink() -> Self {
        Self::build(MockLogoPicker::cancelled(), true)
    }

    fn build(picker: MockLogoPicker, fail: bool) -> Self {
        let saved = SavedFiles::default();
        let sink = MockDownloadSink {
            saved: Arc::clone(&saved),
            fail,
        };
        let state = State::test(Box::new(picker), Box::new(sink));
        let harness = Harness::builder().with_size(PAGE_SIZE).build_ui_state(
            |ui, state: &mut State| {
                state.poll(ui.ctx());
                generator_page(state, ui);
            },
            state,
        );
        Self { harness, saved }
    }

    pub fn harness_mut(&mut self) -> &mut Harness<'a, State> {
        &mut self.harness
    }

    pub fn harness(&self) -> &Harness<'a, State> {
        &self.harness
    }

    pub fn saved(&self) -> Vec<(String, Vec<u8>)> {
        self.saved.lock().expect("saved files lock").clone()
    }

    pub fn step_frames(&mut self) {
        for _ in 0..UI_PROPAGATION_FRAMES {
            self.harness.step();
        }
    }

    /// Steps until no logo decode is pending.
    pub fn wait_for_render(&mut self) {
        self.step_frames();
        let deadline = Instant::now() + Duration::from_secs(5);
        while self.harness.state().generator.is_rendering() {
            assert!(Instant::now() < deadline, "logo render did not finish in time");
            std::thread::sleep(Duration::from_millis(5));
            self.harness.step();
        }
        self.step_frames();
    }
}

pub fn red_logo() -> LogoImage {
    let img = RgbaImage::from_pixel(32, 32, Rgba([255, 0, 0, 255]));
    let mut png = Vec::new();
    image::codecs::png::PngEncoder::new(&mut png)
        .write_image(img.as_raw(), 32, 32, ExtendedColorType::Rgba8)
        .expect("Failed to encode test PNG");
    LogoImage::new("red.png", png)
}
