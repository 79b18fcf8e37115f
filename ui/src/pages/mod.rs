//! Pages module for the application.
//!
//! qrNexus has a single route, the generator page.

mod generator_page;

pub use generator_page::generator_page;
