//! egui front end of qrNexus, a small QR code generator with logo overlay
//! and PNG download. Runs natively through eframe and in the browser as wasm.

#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod pages;
pub mod state;
pub mod utils;
pub mod widgets;

pub use app::QrNexusApp;
