//! Completion payloads committed into the store.
//!
//! An [`OperationOutcome`] is what a successful remote operation hands to
//! [`CatalogState::complete_operation`](crate::app::CatalogState::complete_operation).
//! Each variant carries exactly the data its merge policy needs, so the
//! operation kind is implied by the payload and the two can never disagree.
//!
//! # Example
//!
//! ```rust
//! use gadget_catalog::app::{OperationKind, OperationOutcome};
//!
//! let outcome = OperationOutcome::Deleted { id: "1".to_string() };
//! assert_eq!(outcome.kind(), OperationKind::Delete);
//! ```

use crate::app::status::OperationKind;
use crate::domain::Gadget;

/// Successful result of one remote operation.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationOutcome {
    /// The full collection, in server order. Replaces the stored collection.
    FetchedAll(Vec<Gadget>),

    /// One gadget. Replaces the single-gadget view.
    FetchedOne(Gadget),

    /// The created gadget including its server-assigned id. Appended.
    Created(Gadget),

    /// The updated gadget. Replaces the element with the same id, if any.
    Updated(Gadget),

    /// Confirmation that the gadget with `id` was deleted. Removes it.
    Deleted {
        /// Id of the deleted gadget.
        id: String,
    },
}

impl OperationOutcome {
    /// The operation kind whose status slot this outcome resolves.
    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        match self {
            Self::FetchedAll(_) => OperationKind::FetchAll,
            Self::FetchedOne(_) => OperationKind::FetchById,
            Self::Created(_) => OperationKind::Create,
            Self::Updated(_) => OperationKind::Update,
            Self::Deleted { .. } => OperationKind::Delete,
        }
    }
}
