//! Helpers shared by the unit tests of this crate.
//!
//! Canvases are checked two ways: by sampling the center pixel of every
//! module against the encoder's matrix, and by scanning them with `rqrr`.

#![cfg(test)]

use std::time::{Duration, Instant};

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use qrcode::Color;

use crate::color::HexColor;
use crate::config::QrConfig;
use crate::generator::QrGenerator;

pub fn solid_logo(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(rgba))
}

pub fn png_bytes(img: &RgbaImage) -> Vec<u8> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgba8)
        .expect("Failed to encode test PNG");
    out
}

/// Reads the module grid back from a rendered canvas.
pub fn read_modules(img: &RgbaImage, config: &QrConfig, foreground: HexColor) -> Vec<Color> {
    let modules = config.modules();
    let scale = f64::from(config.width) / f64::from(modules + 2 * config.margin);
    let quiet = (f64::from(config.margin) * scale).floor();
    let center = |i: u32| (quiet + (f64::from(i) + 0.5) * scale).floor() as u32;
    let dark = foreground.to_rgba();

    let mut out = Vec::with_capacity((modules * modules) as usize);
    for y in 0..modules {
        for x in 0..modules {
            let color = if *img.get_pixel(center(x), center(y)) == dark {
                Color::Dark
            } else {
                Color::Light
            };
            out.push(color);
        }
    }
    out
}

/// Scans `img` like a reader would and returns the payload of the first symbol.
pub fn scan(img: &RgbaImage) -> Option<String> {
    let luma = image::DynamicImage::ImageRgba8(img.clone()).to_luma8();
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        luma.width() as usize,
        luma.height() as usize,
        |x, y| luma.get_pixel(x as u32, y as u32).0[0],
    );
    let grids = prepared.detect_grids();
    let (_, content) = grids.first()?.decode().ok()?;
    Some(content)
}

/// Polls the generator until no logo decode is pending.
pub fn settle(generator: &mut QrGenerator) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while generator.is_rendering() {
        generator.poll();
        assert!(Instant::now() < deadline, "logo decode did not finish in time");
        std::thread::sleep(Duration::from_millis(2));
    }
}
