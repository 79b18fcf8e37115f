//! Version information for the application, populated at build time.
//!
//! Display format:
//! - Stable: `stable:{version}`
//! - Nightly (`nightly` feature): `nightly:{date}`

/// Build date in RFC3339 format.
pub fn build_date() -> &'static str {
    env!("BUILD_DATE")
}

/// Short git commit hash, or `unknown` outside a checkout.
pub fn build_commit() -> &'static str {
    env!("BUILD_COMMIT")
}

pub fn build_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Returns `(channel, info)` for the current build.
pub fn channel_info() -> (&'static str, &'static str) {
    if cfg!(feature = "nightly") {
        ("nightly", build_date())
    } else {
        ("stable", build_version())
    }
}

/// Formats the channel and version as `{channel}:{info}`.
pub fn format_version() -> String {
    let (channel, info) = channel_info();
    // BUILD_DATE is ASCII RFC3339, keep only the date part
    if channel == "nightly" && info.len() >= 10 && info.is_ascii() {
        format!("{channel}:{}", &info[..10])
    } else {
        format!("{channel}:{info}")
    }
}

/// One-line description used in startup logs.
pub fn startup_banner() -> String {
    format!("qrNexus {} ({})", format_version(), build_commit())
}
