pub mod colors;
pub mod download;
pub mod file_picker;
