//! Application layer: state, transitions and derived views.
//!
//! This module holds the client-side source of truth for the catalog and the
//! read path out of it. Writes only happen through the named transitions on
//! [`CatalogState`]; reads go through [`Selectors`].
//!
//! # Architecture
//!
//! Data flows in one direction:
//!
//! ```text
//! Command → Coordinator → begin (pending) → GadgetService call
//!                                              │
//!            ┌─────────── complete / fail ◄────┘
//!            ▼
//!          Store → Selectors → view models
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Outcomes committed by successful operations
//! - [`catalog`]: Facade bundling store, coordinator and selectors
//! - [`form`]: Create/edit form values and submission cleanup
//! - [`selectors`]: Memoized filtered list and combined status
//! - [`state`]: Catalog state container and its transitions
//! - [`status`]: Operation kinds and lifecycle statuses
//! - [`store`]: Shared handle to the state
//!
//! # Example
//!
//! ```rust
//! use gadget_catalog::app::{CatalogState, OperationKind, OperationOutcome};
//!
//! let mut state = CatalogState::new();
//! state.begin_operation(OperationKind::Delete);
//! state.complete_operation(OperationOutcome::Deleted { id: "42".into() });
//! assert!(state.gadgets().is_empty());
//! ```

pub mod actions;
pub mod catalog;
pub mod form;
pub mod selectors;
pub mod state;
pub mod status;
pub mod store;

pub use actions::OperationOutcome;
pub use catalog::Catalog;
pub use form::GadgetForm;
pub use selectors::{filter_gadgets, Selectors};
pub use state::CatalogState;
pub use status::{OperationKind, OperationStatus, StatusBoard};
pub use store::Store;
