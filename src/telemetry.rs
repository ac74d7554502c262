use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogFormat;

/// Initialize structured logging.
///
/// `RUST_LOG` drives the filter; without it the crate logs at debug and
/// everything else at info.
pub fn init(format: LogFormat) {
    let filter_layer = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,healthcare_assistant_ui=debug"));

    let registry = tracing_subscriber::registry().with(filter_layer);

    match format {
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_line_number(true)
                    .compact(),
            )
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .json()
                    .with_current_span(true),
            )
            .init(),
    }
}
