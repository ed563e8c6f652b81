//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `default_level` is applied to the
/// crate and the given binary target.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "chat_relay={default_level},{}={default_level},tower_http=info",
            bin_name.replace('-', "_")
        ))
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
