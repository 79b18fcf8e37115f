//! Hands exported PNG bytes to the platform as a file download.
//!
//! - **Native**: a save dialog with the file name preselected, then a plain write.
//! - **Web (WASM)**: an object URL on a temporary `<a download>` element, the
//!   browser decides where the file goes.

#[cfg(not(target_arch = "wasm32"))]
use anyhow::Context as _;

/// What happened to a download request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Written to the given location.
    Saved(String),
    /// Handed to the browser.
    Started,
    /// The user dismissed the save dialog.
    Cancelled,
}

/// Trait for download targets, enabling mock implementations for testing.
pub trait DownloadSink {
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> anyhow::Result<SaveOutcome>;
}

#[derive(Debug, Default)]
pub struct SystemDownloadSink;

#[cfg(not(target_arch = "wasm32"))]
impl DownloadSink for SystemDownloadSink {
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> anyhow::Result<SaveOutcome> {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Save QR code")
            .set_file_name(file_name)
            .add_filter("PNG image", &["png"])
            .save_file()
        else {
            log::debug!("Save dialog cancelled");
            return Ok(SaveOutcome::Cancelled);
        };

        std::fs::write(&path, bytes)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("Saved {} bytes to {}", bytes.len(), path.display());
        Ok(SaveOutcome::Saved(path.display().to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
impl DownloadSink for SystemDownloadSink {
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> anyhow::Result<SaveOutcome> {
        use wasm_bindgen::JsCast as _;
        use web_sys::js_sys::{Array, Uint8Array};
        use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

        fn js_err(e: wasm_bindgen::JsValue) -> anyhow::Error {
            anyhow::anyhow!("browser refused the download: {e:?}")
        }

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| anyhow::anyhow!("no document to attach the download to"))?;

        let parts = Array::of1(&Uint8Array::from(bytes));
        let props = BlobPropertyBag::new();
        props.set_type("image/png");
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &props).map_err(js_err)?;
        let url = Url::create_object_url_with_blob(&blob).map_err(js_err)?;

        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(js_err)?
            .dyn_into()
            .map_err(|_| anyhow::anyhow!("created element is not an anchor"))?;
        anchor.set_href(&url);
        anchor.set_download(file_name);
        anchor.click();

        Url::revoke_object_url(&url).map_err(js_err)?;
        log::info!("Started browser download of {file_name} ({} bytes)", bytes.len());
        Ok(SaveOutcome::Started)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock sink that remembers what it was asked to save.
    #[derive(Default)]
    struct RecordingSink {
        saved: Vec<(String, usize)>,
    }

    impl DownloadSink for RecordingSink {
        fn save(&mut self, file_name: &str, bytes: &[u8]) -> anyhow::Result<SaveOutcome> {
            self.saved.push((file_name.to_owned(), bytes.len()));
            Ok(SaveOutcome::Saved(file_name.to_owned()))
        }
    }

    #[test]
    fn test_recording_sink() {
        let mut sink = RecordingSink::default();
        let outcome = sink.save("qrcode.png", &[1, 2, 3]).unwrap();
        assert_eq!(outcome, SaveOutcome::Saved("qrcode.png".to_owned()));
        assert_eq!(sink.saved, vec![("qrcode.png".to_owned(), 3)]);
    }

    #[test]
    fn test_download_sink_trait_is_object_safe() {
        fn _accept_sink(_sink: &mut dyn DownloadSink) {}
        let mut sink = RecordingSink::default();
        _accept_sink(&mut sink);
    }
}
