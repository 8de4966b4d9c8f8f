//! Catalog state and its transitions.
//!
//! [`CatalogState`] is the single source of truth for everything the
//! rendering layer shows: the gadget collection, the gadget open in the detail
//! view, one status slot per operation kind, the search text, and the last
//! error message. It is only ever changed through the four transitions on this
//! type; the fields are readable but private to the crate.
//!
//! # Merge Policies
//!
//! | Outcome        | Effect on state                                   |
//! |----------------|---------------------------------------------------|
//! | `FetchedAll`   | collection replaced wholesale                     |
//! | `FetchedOne`   | single-gadget view replaced                       |
//! | `Created`      | gadget appended to the collection                 |
//! | `Updated`      | element with the same id replaced in place        |
//! | `Deleted`      | element with the given id removed                 |
//!
//! An update whose id is not in the collection leaves the collection as it
//! was. Only the status slot and the last error change.
//!
//! # Collection Identity
//!
//! The collection lives behind an [`Arc`]. Every transition that changes its
//! contents installs a fresh `Arc`; transitions that leave it alone keep the
//! old one. Selectors rely on this to memoize by pointer identity.
//!
//! # Example
//!
//! ```rust
//! use gadget_catalog::app::{CatalogState, OperationKind, OperationOutcome, OperationStatus};
//!
//! let mut state = CatalogState::new();
//! state.begin_operation(OperationKind::FetchAll);
//! state.complete_operation(OperationOutcome::FetchedAll(vec![]));
//! assert_eq!(state.status(OperationKind::FetchAll), OperationStatus::Success);
//! ```

use super::actions::OperationOutcome;
use super::status::{OperationKind, OperationStatus, StatusBoard};
use crate::domain::{Gadget, OperationError};
use std::sync::Arc;

/// Central catalog state container.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    /// Gadgets in server response order.
    pub(crate) gadgets: Arc<Vec<Gadget>>,

    /// Gadget shown in the detail view.
    ///
    /// Kept while a newer fetch-by-id is pending so the previous record stays
    /// visible.
    pub(crate) single_gadget: Option<Gadget>,

    /// One lifecycle slot per operation kind.
    pub(crate) statuses: StatusBoard,

    /// Free-text search query, stored verbatim.
    pub(crate) search_filter: String,

    /// Message of the most recent failure, cleared by any success.
    pub(crate) last_error: Option<String>,
}

impl CatalogState {
    /// Creates the initial state: empty collection, no detail gadget, every
    /// status idle, empty filter, no error.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn gadgets(&self) -> &Arc<Vec<Gadget>> {
        &self.gadgets
    }

    #[must_use]
    pub const fn single_gadget(&self) -> Option<&Gadget> {
        self.single_gadget.as_ref()
    }

    #[must_use]
    pub const fn statuses(&self) -> &StatusBoard {
        &self.statuses
    }

    #[must_use]
    pub const fn status(&self, kind: OperationKind) -> OperationStatus {
        self.statuses.get(kind)
    }

    #[must_use]
    pub fn search_filter(&self) -> &str {
        &self.search_filter
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Marks `kind` as in flight. Nothing else changes.
    pub fn begin_operation(&mut self, kind: OperationKind) {
        tracing::trace!(operation = %kind, "operation pending");
        self.statuses.set(kind, OperationStatus::Pending);
    }

    /// Commits a successful outcome: marks its kind successful, applies the
    /// kind's merge policy, and clears the last error.
    pub fn complete_operation(&mut self, outcome: OperationOutcome) {
        let kind = outcome.kind();

        match outcome {
            OperationOutcome::FetchedAll(gadgets) => {
                self.gadgets = Arc::new(gadgets);
            }
            OperationOutcome::FetchedOne(gadget) => {
                self.single_gadget = Some(gadget);
            }
            OperationOutcome::Created(gadget) => {
                let mut gadgets = Vec::with_capacity(self.gadgets.len() + 1);
                gadgets.extend(self.gadgets.iter().cloned());
                gadgets.push(gadget);
                self.gadgets = Arc::new(gadgets);
            }
            OperationOutcome::Updated(gadget) => {
                if let Some(index) = self.gadgets.iter().position(|g| g.id == gadget.id) {
                    let mut gadgets = self.gadgets.as_ref().clone();
                    gadgets[index] = gadget;
                    self.gadgets = Arc::new(gadgets);
                } else {
                    tracing::debug!(gadget_id = %gadget.id, "updated gadget not in collection, ignoring");
                }
            }
            OperationOutcome::Deleted { id } => {
                if self.gadgets.iter().any(|g| g.id == id) {
                    let gadgets = self.gadgets.iter().filter(|g| g.id != id).cloned().collect();
                    self.gadgets = Arc::new(gadgets);
                }
            }
        }

        self.statuses.set(kind, OperationStatus::Success);
        self.last_error = None;

        tracing::debug!(
            operation = %kind,
            collection_len = self.gadgets.len(),
            "operation committed"
        );
    }

    /// Records a failure for `kind`. The collection is left untouched.
    pub fn fail_operation(&mut self, kind: OperationKind, error: &OperationError) {
        self.statuses.set(kind, OperationStatus::Error);
        self.last_error = Some(error.message.clone());

        tracing::debug!(operation = %kind, error = %error.message, "operation failed");
    }

    /// Replaces the search text verbatim.
    pub fn set_search_filter(&mut self, text: impl Into<String>) {
        self.search_filter = text.into();
    }
}
