//! Operation lifecycle runner.
//!
//! [`Coordinator`] turns a [`Command`] into a remote call wrapped in the
//! store's begin/complete/fail lifecycle:
//!
//! 1. `begin_operation(kind)` marks the slot pending
//! 2. the matching [`GadgetService`] method is awaited
//! 3. success commits the outcome with `complete_operation`
//! 4. failure is normalized to an [`OperationError`] and recorded with
//!    `fail_operation`
//!
//! The awaited result mirrors the store: `run` returns `Err` exactly when the
//! slot ends in the error state. Callers that only watch the store can drop
//! the result.
//!
//! Concurrent commands of the same kind are neither de-duplicated nor
//! cancelled. Each one commits when it resolves, so the last to resolve
//! determines both the slot and the data.

use super::messages::Command;
use crate::app::{OperationOutcome, Store};
use crate::domain::error::Result;
use crate::domain::OperationError;
use crate::service::GadgetService;
use std::sync::Arc;
use tracing::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Runs remote operations against a service and commits them into a store.
#[derive(Debug)]
pub struct Coordinator<S> {
    service: Arc<S>,
    store: Store,
}

impl<S> Clone for Coordinator<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            store: self.store.clone(),
        }
    }
}

impl<S: GadgetService> Coordinator<S> {
    #[must_use]
    pub const fn new(service: Arc<S>, store: Store) -> Self {
        Self { service, store }
    }

    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    #[must_use]
    pub const fn service(&self) -> &Arc<S> {
        &self.service
    }

    /// Calls the service method matching `command`.
    async fn execute(&self, command: &Command) -> Result<OperationOutcome> {
        match command {
            Command::FetchAll { .. } => {
                let gadgets = self.service.list_gadgets().await?;
                Ok(OperationOutcome::FetchedAll(gadgets))
            }
            Command::FetchById { id, .. } => {
                let gadget = self.service.get_gadget(id).await?;
                Ok(OperationOutcome::FetchedOne(gadget))
            }
            Command::Create { input, .. } => {
                let gadget = self.service.create_gadget(input).await?;
                Ok(OperationOutcome::Created(gadget))
            }
            Command::Update { id, input, .. } => {
                let gadget = self.service.update_gadget(id, input).await?;
                Ok(OperationOutcome::Updated(gadget))
            }
            Command::Delete { id, .. } => {
                self.service.delete_gadget(id).await?;
                Ok(OperationOutcome::Deleted { id: id.clone() })
            }
        }
    }

    /// Runs one command through the full lifecycle.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`OperationError`] that was recorded in the
    /// store when the remote call fails.
    pub async fn run(&self, command: Command) -> std::result::Result<OperationOutcome, OperationError> {
        let kind = command.kind();

        let span = tracing::debug_span!("run_operation", operation = %kind);
        if let Some(parent) = command.trace_context().and_then(|ctx| ctx.to_otel_context()) {
            span.set_parent(parent);
        }

        self.store.begin_operation(kind);

        match self.execute(&command).instrument(span.clone()).await {
            Ok(outcome) => {
                self.store.complete_operation(outcome.clone());
                span.in_scope(|| tracing::debug!(operation = %kind, "operation succeeded"));
                Ok(outcome)
            }
            Err(err) => {
                let error = OperationError::from(&err);
                self.store.fail_operation(kind, &error);
                span.in_scope(|| {
                    tracing::error!(
                        operation = %kind,
                        error_kind = ?error.kind,
                        error = %error.message,
                        "operation failed"
                    );
                });
                Err(error)
            }
        }
    }

    /// Loads the full collection.
    ///
    /// # Errors
    ///
    /// See [`Coordinator::run`].
    pub async fn fetch_all(&self) -> std::result::Result<OperationOutcome, OperationError> {
        self.run(Command::fetch_all()).await
    }

    /// Loads one gadget into the detail view.
    ///
    /// # Errors
    ///
    /// See [`Coordinator::run`].
    pub async fn fetch_by_id(
        &self,
        id: impl Into<String>,
    ) -> std::result::Result<OperationOutcome, OperationError> {
        self.run(Command::fetch_by_id(id.into())).await
    }

    /// Creates a gadget.
    ///
    /// # Errors
    ///
    /// See [`Coordinator::run`].
    pub async fn create(
        &self,
        input: crate::domain::GadgetInput,
    ) -> std::result::Result<OperationOutcome, OperationError> {
        self.run(Command::create(input)).await
    }

    /// Replaces a gadget's fields.
    ///
    /// # Errors
    ///
    /// See [`Coordinator::run`].
    pub async fn update(
        &self,
        id: impl Into<String>,
        input: crate::domain::GadgetInput,
    ) -> std::result::Result<OperationOutcome, OperationError> {
        self.run(Command::update(id.into(), input)).await
    }

    /// Deletes a gadget.
    ///
    /// # Errors
    ///
    /// See [`Coordinator::run`].
    pub async fn delete(
        &self,
        id: impl Into<String>,
    ) -> std::result::Result<OperationOutcome, OperationError> {
        self.run(Command::delete(id.into())).await
    }
}
