//! Tracing setup and trace context propagation.
//!
//! # Configuration
//!
//! The filter level is taken from:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` in [`Config`](crate::Config)
//! 3. Default: `"info"`
//!
//! # Usage
//!
//! ```rust
//! use gadget_catalog::observability::init_tracing;
//! use gadget_catalog::Config;
//!
//! init_tracing(&Config::default());
//! tracing::info!("catalog starting");
//! ```
//!
//! # Modules
//!
//! - `init`: Subscriber pipeline with an OpenTelemetry layer
//! - `context`: [`TraceContext`] capture and `traceparent` encoding

mod context;
mod init;

pub use context::TraceContext;
pub use init::init_tracing;
