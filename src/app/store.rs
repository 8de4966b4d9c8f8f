//! Shared handle to the catalog state.
//!
//! [`Store`] is the explicitly constructed owner of one [`CatalogState`]. It
//! is cheap to clone; every clone refers to the same state. The coordinator
//! and the view layer each hold a clone, so there is no global instance.
//!
//! Each transition runs under a single lock acquisition, which is what makes
//! it atomic for readers: a snapshot taken through [`Store::snapshot`] or
//! [`Store::read`] either sees a transition fully applied or not at all. The
//! lock is never held across an `.await`.

use super::actions::OperationOutcome;
use super::state::CatalogState;
use super::status::OperationKind;
use crate::domain::OperationError;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shared, cloneable handle to the catalog state.
#[derive(Debug, Clone, Default)]
pub struct Store {
    inner: Arc<Mutex<CatalogState>>,
}

impl Store {
    /// Creates a store holding the initial state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CatalogState> {
        // Transitions are total, so a panic elsewhere cannot leave the state
        // half-written; keep serving it.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn begin_operation(&self, kind: OperationKind) {
        self.lock().begin_operation(kind);
    }

    pub fn complete_operation(&self, outcome: OperationOutcome) {
        self.lock().complete_operation(outcome);
    }

    pub fn fail_operation(&self, kind: OperationKind, error: &OperationError) {
        self.lock().fail_operation(kind, error);
    }

    pub fn set_search_filter(&self, text: impl Into<String>) {
        self.lock().set_search_filter(text);
    }

    /// Runs `f` against the current state under the lock.
    pub fn read<T>(&self, f: impl FnOnce(&CatalogState) -> T) -> T {
        f(&self.lock())
    }

    /// Returns a consistent copy of the current state.
    ///
    /// The collection is shared with the store, so this does not copy gadgets.
    #[must_use]
    pub fn snapshot(&self) -> CatalogState {
        self.lock().clone()
    }
}
