//! Tracing subscriber initialization.

use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// `level` is an `EnvFilter` directive string (e.g. `info` or
/// `shorturl=debug,tower_http=info`); an unparsable value falls back to `info`.
/// `format` selects between human-readable `text` and structured `json` output.
///
/// Must be called once, before any log is emitted.
pub fn init(level: &str, format: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
