//! Trace context capture and W3C `traceparent` encoding.
//!
//! Commands issued through the coordinator capture the OpenTelemetry context
//! of the span they were issued from, and the HTTP service forwards it to the
//! backend so server-side spans can join the client's trace.

use serde::{Deserialize, Serialize};

/// Trace and parent span ids of the span a command was issued from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as 32 lowercase hex digits.
    pub trace_id: String,

    /// Span ID of the issuing span as 16 lowercase hex digits.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the context of the current tracing span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span
    /// context is invalid.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Rebuilds an OpenTelemetry context with this span as remote parent.
    ///
    /// Returns `None` if either id is not valid hex.
    #[must_use]
    pub fn to_otel_context(&self) -> Option<opentelemetry::Context> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(opentelemetry::Context::new().with_remote_span_context(span_context))
    }

    /// Encodes the context as a W3C `traceparent` header value (sampled).
    #[must_use]
    pub fn traceparent(&self) -> String {
        format!("00-{}-{}-01", self.trace_id, self.parent_span_id)
    }

    /// Parses a `traceparent` header value.
    ///
    /// Only version `00` is accepted; all-zero ids are rejected.
    #[must_use]
    pub fn from_traceparent(value: &str) -> Option<Self> {
        let mut parts = value.trim().split('-');
        let (version, trace_id, span_id, flags) =
            (parts.next()?, parts.next()?, parts.next()?, parts.next()?);

        let is_hex = |s: &str, len: usize| {
            s.len() == len && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        };
        let is_zero = |s: &str| s.bytes().all(|b| b == b'0');

        if parts.next().is_some()
            || version != "00"
            || !is_hex(trace_id, 32)
            || !is_hex(span_id, 16)
            || !is_hex(flags, 2)
            || is_zero(trace_id)
            || is_zero(span_id)
        {
            return None;
        }

        Some(Self {
            trace_id: trace_id.to_string(),
            parent_span_id: span_id.to_string(),
        })
    }
}
