//! User supplied logo images and their asynchronous decoding.
//!
//! A logo is kept as the raw bytes the user selected. Decoding happens only
//! when a render is requested, off the UI thread on native targets; the result
//! travels back over a channel and is picked up by [`LogoDecodeTask::try_take`].

use std::fmt;
use std::sync::Arc;

use image::RgbaImage;

/// Errors that can occur while turning logo bytes into a bitmap.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LogoError {
    #[error("logo file is empty")]
    Empty,
    #[error("logo could not be decoded: {0}")]
    Decode(String),
    #[error("logo decoder stopped before producing a result")]
    WorkerLost,
}

/// Raw, still encoded, logo bytes as picked by the user.
#[derive(Clone, PartialEq, Eq)]
pub struct LogoImage {
    pub name: String,
    pub bytes: Arc<[u8]>,
}

impl fmt::Debug for LogoImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogoImage")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl LogoImage {
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Decodes any format the `image` crate recognizes into RGBA8.
pub fn decode_logo(bytes: &[u8]) -> Result<RgbaImage, LogoError> {
    if bytes.is_empty() {
        return Err(LogoError::Empty);
    }

    let decoded = image::load_from_memory(bytes).map_err(|e| LogoError::Decode(e.to_string()))?;
    let rgba = decoded.to_rgba8();
    log::debug!(
        "Decoded logo: {}x{} from {} bytes",
        rgba.width(),
        rgba.height(),
        bytes.len()
    );
    Ok(rgba)
}

type DecodeResult = Result<RgbaImage, LogoError>;

/// A logo decode in flight.
///
/// Remembers which bytes it is decoding so a render of the same logo can
/// join it instead of starting another decode.
#[derive(Debug)]
pub struct LogoDecodeTask {
    bytes: Arc<[u8]>,
    receiver: flume::Receiver<DecodeResult>,
}

impl LogoDecodeTask {
    pub fn spawn(logo: &LogoImage) -> Self {
        let (sender, receiver) = flume::bounded(1);
        let bytes = Arc::clone(&logo.bytes);
        let name = logo.name.clone();

        let job = {
            let bytes = Arc::clone(&bytes);
            move || {
                if sender.send(decode_logo(&bytes)).is_err() {
                    log::debug!("Decode of {name:?} finished after it was abandoned");
                }
            }
        };

        // A failed spawn drops the sender, which surfaces as `WorkerLost`.
        #[cfg(not(target_arch = "wasm32"))]
        if let Err(e) = std::thread::Builder::new()
            .name("logo-decode".to_owned())
            .spawn(job)
        {
            log::warn!("Could not spawn logo decoder thread: {e}");
        }

        #[cfg(target_arch = "wasm32")]
        job();

        Self { bytes, receiver }
    }

    /// Whether this task decodes exactly the bytes held by `logo`.
    pub fn is_for(&self, logo: &LogoImage) -> bool {
        Arc::ptr_eq(&self.bytes, &logo.bytes)
    }

    pub fn bytes(&self) -> &Arc<[u8]> {
        &self.bytes
    }

    /// Returns the decode result once it is available, without blocking.
    pub fn try_take(&self) -> Option<DecodeResult> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(flume::TryRecvError::Empty) => None,
            Err(flume::TryRecvError::Disconnected) => Some(Err(LogoError::WorkerLost)),
        }
    }

    /// Blocks until the decode result is available or `timeout` elapses.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn wait(&self, timeout: std::time::Duration) -> Option<DecodeResult> {
        match self.receiver.recv_timeout(timeout) {
            Ok(result) => Some(result),
            Err(flume::RecvTimeoutError::Timeout) => None,
            Err(flume::RecvTimeoutError::Disconnected) => Some(Err(LogoError::WorkerLost)),
        }
    }
}
