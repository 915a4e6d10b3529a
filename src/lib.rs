pub mod app;
pub mod config;
mod error;
pub mod mailchimp_client;
pub mod web;

// re-export
pub use app::{App, AppState};
pub use error::{Error, Result};
pub use mailchimp_client::MailchimpClient;
pub use web::serve;

use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

/// Tracing setup for debug builds: compact output, no timestamps, logs span close events.
/// Falls back to `debug` if `RUST_LOG` isn't set.
pub fn init_dbg_tracing() {
    tracing_subscriber::fmt()
        .without_time()
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .compact()
        .init();
}

/// Tracing setup for release builds.
/// Falls back to `info` if `RUST_LOG` isn't set.
pub fn init_production_tracing() {
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
