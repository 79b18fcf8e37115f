//! Hex color values emitted by the color pickers.

use std::fmt;
use std::str::FromStr;

use image::Rgba;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid hex color: {0:?}")]
pub struct ColorParseError(pub String);

/// An sRGB color parsed from `#rgb`, `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl HexColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, self.a])
    }

    /// Lowercase `#rrggbb`, with the alpha pair appended only when not opaque.
    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl FromStr for HexColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_owned());
        let digits = s.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if !digits.is_ascii() {
            return Err(err());
        }

        let nibble = |c: u8| (c as char).to_digit(16).map(|d| d as u8);
        let bytes = digits.as_bytes();
        match bytes.len() {
            3 => {
                let mut out = [0u8; 3];
                for (slot, &c) in out.iter_mut().zip(bytes) {
                    let n = nibble(c).ok_or_else(err)?;
                    *slot = n << 4 | n;
                }
                Ok(Self::rgb(out[0], out[1], out[2]))
            }
            6 | 8 => {
                let mut out = [255u8; 4];
                for (slot, pair) in out.iter_mut().zip(bytes.chunks_exact(2)) {
                    let hi = nibble(pair[0]).ok_or_else(err)?;
                    let lo = nibble(pair[1]).ok_or_else(err)?;
                    *slot = hi << 4 | lo;
                }
                Ok(Self {
                    r: out[0],
                    g: out[1],
                    b: out[2],
                    a: out[3],
                })
            }
            _ => Err(err()),
        }
    }
}
