use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_LOG_FORMAT: &str = "json";

pub fn init(log_format: &str, log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let recognized = normalize_log_format(log_format);
    let format = recognized.unwrap_or(DEFAULT_LOG_FORMAT);

    if format == "json" {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true)
                    .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339()),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_target(false).compact())
            .init();
    }

    if recognized.is_none() {
        tracing::warn!(
            requested_format = %log_format,
            fallback_format = DEFAULT_LOG_FORMAT,
            valid_formats = "json, pretty",
            "Unrecognized log format, falling back to default"
        );
    }

    tracing::debug!(
        log_format = format,
        log_level = log_level,
        "Logging system initialized"
    );
}

/// Maps user-facing format names onto the two supported layers
fn normalize_log_format(format: &str) -> Option<&'static str> {
    match format.to_lowercase().as_str() {
        "json" => Some("json"),
        "pretty" | "compact" | "text" => Some("pretty"),
        _ => None,
    }
}
