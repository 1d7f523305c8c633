//! Structured logging initialization.
//!
//! JSON or pretty output, filtered by `RUST_LOG` when set and by the
//! configured level otherwise.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format, selected by `log_format` in the server config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    /// One JSON object per event, carrying the request span's `request_id`.
    Json,
}

impl LogFormat {
    /// Parses a `log_format` value. Anything but `json` selects pretty output.
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, LogFormat::Json)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

/// Installs the global subscriber for the server process.
///
/// `level` applies to the showcase crates only; `tower_http` request traces
/// stay at debug.
///
/// ```rust,no_run
/// use showcase_server::observability::{init_logging, LogFormat};
///
/// init_logging("info", LogFormat::Json);
/// ```
pub fn init_logging(level: &str, format: LogFormat) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level).into());
    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_target(true),
            )
            .init(),
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).init(),
    }

    tracing::info!(level = %level, format = format.as_str(), "Logging initialized");
}

/// Filter directives used when `RUST_LOG` is not set.
fn default_filter(level: &str) -> String {
    format!("showcase={level},tower_http=debug,axum::rejection=trace")
}
