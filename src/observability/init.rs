//! Tracing initialization and subscriber setup.
//!
//! Builds the subscriber pipeline used by the binary and by embedders that
//! want the crate's defaults:
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer (stderr)
//!                           └→ OpenTelemetry layer → SDK tracer provider
//! ```
//!
//! The OpenTelemetry layer gives every span a trace and span id, which the
//! HTTP service forwards as `traceparent`.

use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name reported in the OpenTelemetry resource.
const SERVICE_NAME: &str = "gadget-catalog";

/// Resolves the filter directive: `RUST_LOG`, then `config.trace_level`,
/// then `"info"`.
fn env_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config.trace_level.as_deref().unwrap_or("info");
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
    })
}

/// Installs the global tracing subscriber.
///
/// Idempotent: if a global subscriber is already set, this is a no-op.
///
/// # Example
///
/// ```rust
/// use gadget_catalog::{observability::init_tracing, Config};
///
/// init_tracing(&Config {
///     trace_level: Some("debug".to_string()),
///     ..Config::default()
/// });
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        SERVICE_NAME,
    )]);

    let provider = TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .build();
    let tracer = provider.tracer(SERVICE_NAME);
    opentelemetry::global::set_tracer_provider(provider);

    let subscriber = tracing_subscriber::registry()
        .with(env_filter(config))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(OpenTelemetryLayer::new(tracer));

    if subscriber.try_init().is_ok() {
        tracing::debug!(service = SERVICE_NAME, "tracing initialized");
    }
}
