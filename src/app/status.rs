//! Operation kinds and lifecycle status types.
//!
//! Every remote operation the catalog can issue has its own status slot. A
//! slot moves from idle, success or error to pending when a command is
//! dispatched, and from pending to success or error when that command
//! resolves. Slots never influence one another.
//!
//! # Example
//!
//! ```rust
//! use gadget_catalog::app::{OperationKind, OperationStatus, StatusBoard};
//!
//! let mut board = StatusBoard::default();
//! board.set(OperationKind::Delete, OperationStatus::Pending);
//! assert_eq!(board.get(OperationKind::Delete), OperationStatus::Pending);
//! assert_eq!(board.get(OperationKind::FetchAll), OperationStatus::Idle);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five remote operations the catalog issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// List every gadget.
    FetchAll,
    /// Load a single gadget into the detail view.
    FetchById,
    /// Create a gadget.
    Create,
    /// Replace a gadget's fields.
    Update,
    /// Delete a gadget.
    Delete,
}

impl OperationKind {
    /// Every kind, in status-board order.
    pub const ALL: [Self; 5] = [
        Self::FetchAll,
        Self::FetchById,
        Self::Create,
        Self::Update,
        Self::Delete,
    ];

    /// Stable name used in logs and spans.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FetchAll => "fetch_all",
            Self::FetchById => "fetch_by_id",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of one operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationStatus {
    /// Never dispatched.
    #[default]
    Idle,
    /// Dispatched, not yet resolved.
    Pending,
    /// Last resolution succeeded.
    Success,
    /// Last resolution failed.
    Error,
}

impl OperationStatus {
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One status slot per operation kind.
///
/// This is also the value returned by the combined-status selector, so the
/// rendering layer can destructure the fields it cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StatusBoard {
    pub fetch_all: OperationStatus,
    pub fetch_by_id: OperationStatus,
    pub create: OperationStatus,
    pub update: OperationStatus,
    pub delete: OperationStatus,
}

impl StatusBoard {
    /// Returns the status of `kind`.
    #[must_use]
    pub const fn get(&self, kind: OperationKind) -> OperationStatus {
        match kind {
            OperationKind::FetchAll => self.fetch_all,
            OperationKind::FetchById => self.fetch_by_id,
            OperationKind::Create => self.create,
            OperationKind::Update => self.update,
            OperationKind::Delete => self.delete,
        }
    }

    /// Overwrites the status of `kind`, leaving every other slot untouched.
    pub fn set(&mut self, kind: OperationKind, status: OperationStatus) {
        let slot = match kind {
            OperationKind::FetchAll => &mut self.fetch_all,
            OperationKind::FetchById => &mut self.fetch_by_id,
            OperationKind::Create => &mut self.create,
            OperationKind::Update => &mut self.update,
            OperationKind::Delete => &mut self.delete,
        };
        *slot = status;
    }

    /// True while any operation is in flight.
    #[must_use]
    pub fn any_pending(&self) -> bool {
        OperationKind::ALL.iter().any(|kind| self.get(*kind).is_pending())
    }
}
