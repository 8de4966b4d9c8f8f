//! Async operation coordinator.
//!
//! Issues remote calls through a [`GadgetService`](crate::service::GadgetService)
//! and drives the matching status slot in the [`Store`](crate::app::Store)
//! through pending and then success or error. Commands carry the trace
//! context of their issuer so each operation span joins the caller's trace.
//!
//! # Architecture
//!
//! - `messages`: [`Command`] protocol with trace context capture
//! - `handler`: [`Coordinator`] lifecycle runner

pub mod handler;
pub mod messages;

pub use handler::Coordinator;
pub use messages::Command;
