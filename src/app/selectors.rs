//! Memoized projections over the catalog state.
//!
//! Selectors are the only read path from the store to the rendering layer.
//! Each one is a pure function of a few state fields plus a one-entry cache:
//!
//! - [`Selectors::filtered_gadgets`] is keyed on the identity of the
//!   collection `Arc` and the filter text.
//! - [`Selectors::combined_status`] is keyed on the five status values.
//!
//! When the key matches the previous call the cached `Arc` is returned as is,
//! so consumers can use [`Arc::ptr_eq`] to skip work on unrelated changes.
//!
//! # Example
//!
//! ```rust
//! use gadget_catalog::app::{CatalogState, Selectors};
//! use std::sync::Arc;
//!
//! let selectors = Selectors::new();
//! let state = CatalogState::new();
//! let a = selectors.filtered_gadgets(&state);
//! let b = selectors.filtered_gadgets(&state);
//! assert!(Arc::ptr_eq(&a, &b));
//! ```

use super::state::CatalogState;
use super::status::StatusBoard;
use crate::domain::Gadget;
#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Filters `gadgets` by case-insensitive substring match on name, brand or
/// description.
///
/// An empty filter returns the collection itself. Otherwise the result keeps
/// collection order.
#[must_use]
pub fn filter_gadgets(gadgets: &Arc<Vec<Gadget>>, filter: &str) -> Arc<Vec<Gadget>> {
    if filter.is_empty() {
        return Arc::clone(gadgets);
    }

    let needle = filter.to_lowercase();
    Arc::new(
        gadgets
            .iter()
            .filter(|gadget| gadget.matches(&needle))
            .cloned()
            .collect(),
    )
}

#[derive(Debug)]
struct FilteredEntry {
    source: Arc<Vec<Gadget>>,
    filter: String,
    result: Arc<Vec<Gadget>>,
}

#[derive(Debug)]
struct StatusEntry {
    board: StatusBoard,
    result: Arc<StatusBoard>,
}

/// One-entry memo caches for the catalog's derived views.
#[derive(Debug, Default)]
pub struct Selectors {
    filtered: Mutex<Option<FilteredEntry>>,
    combined: Mutex<Option<StatusEntry>>,
    #[cfg(test)]
    filter_runs: AtomicUsize,
    #[cfg(test)]
    status_runs: AtomicUsize,
}

impl Selectors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gadgets matching the state's search filter, in collection order.
    pub fn filtered_gadgets(&self, state: &CatalogState) -> Arc<Vec<Gadget>> {
        let mut cache = self.filtered.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(entry) = cache.as_ref() {
            if Arc::ptr_eq(&entry.source, &state.gadgets) && entry.filter == state.search_filter {
                return Arc::clone(&entry.result);
            }
        }

        let _span = tracing::trace_span!(
            "filtered_gadgets",
            total = state.gadgets.len(),
            filter_len = state.search_filter.len()
        )
        .entered();

        let result = filter_gadgets(&state.gadgets, &state.search_filter);
        #[cfg(test)]
        self.filter_runs.fetch_add(1, Ordering::Relaxed);

        *cache = Some(FilteredEntry {
            source: Arc::clone(&state.gadgets),
            filter: state.search_filter.clone(),
            result: Arc::clone(&result),
        });
        result
    }

    /// The five operation statuses as one value.
    pub fn combined_status(&self, state: &CatalogState) -> Arc<StatusBoard> {
        let mut cache = self.combined.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(entry) = cache.as_ref() {
            if entry.board == state.statuses {
                return Arc::clone(&entry.result);
            }
        }

        let result = Arc::new(state.statuses);
        #[cfg(test)]
        self.status_runs.fetch_add(1, Ordering::Relaxed);
        *cache = Some(StatusEntry {
            board: state.statuses,
            result: Arc::clone(&result),
        });
        result
    }

    #[cfg(test)]
    fn filter_recomputations(&self) -> usize {
        self.filter_runs.load(Ordering::Relaxed)
    }

    #[cfg(test)]
    fn status_recomputations(&self) -> usize {
        self.status_runs.load(Ordering::Relaxed)
    }
}
