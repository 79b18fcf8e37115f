//! Shared utilities for the qrNexus workspace.
//!
//! Currently only build information stamped in by `build.rs`.

pub mod version_info;
