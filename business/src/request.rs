use crate::color::HexColor;

pub const DEFAULT_TEXT: &str = "https://cameronlucas.dev";
pub const DEFAULT_FOREGROUND: HexColor = HexColor::rgb(0x55, 0x55, 0x55);
pub const DEFAULT_BACKGROUND: HexColor = HexColor::rgb(0xff, 0xff, 0xff);

/// What the next render should encode and in which colors.
///
/// Edited freely while the user types or picks colors; only read when a
/// render is triggered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingRequest {
    pub text: String,
    /// Color of dark modules.
    pub foreground: HexColor,
    /// Color of light modules and the quiet zone.
    pub background: HexColor,
}

impl Default for EncodingRequest {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.to_owned(),
            foreground: DEFAULT_FOREGROUND,
            background: DEFAULT_BACKGROUND,
        }
    }
}

impl EncodingRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}
