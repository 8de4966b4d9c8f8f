//! Domain layer for the gadget catalog.
//!
//! Holds the catalog record types and the crate's error types, independent of
//! the HTTP transport and of the store.
//!
//! # Organization
//!
//! - [`error`]: Error types, the normalized operation error, result alias
//! - [`gadget`]: Gadget record, its specs and the create/update input shape

pub mod error;
pub mod gadget;

pub use error::{CatalogError, ErrorKind, OperationError, Result};
pub use gadget::{Category, Gadget, GadgetInput, Specs};
