//! Commands accepted by the coordinator.
//!
//! A [`Command`] names one remote operation and its arguments. Commands built
//! with the constructor methods capture the trace context of the span they
//! were created in, so the operation's span joins the issuer's trace even if
//! the command is run later from somewhere else.

use crate::app::OperationKind;
use crate::domain::GadgetInput;
use crate::observability::TraceContext;

/// Generates constructors for `Command` variants that attach the current
/// trace context.
macro_rules! command_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl Command {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " command with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

command_builders! {
    fetch_all(FetchAll {}),
    fetch_by_id(FetchById { id: String }),
    create(Create { input: GadgetInput }),
    update(Update { id: String, input: GadgetInput }),
    delete(Delete { id: String }),
}

/// A remote operation request.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Load the full collection.
    FetchAll {
        /// Trace context of the issuing span.
        trace_context: Option<TraceContext>,
    },

    /// Load one gadget into the detail view.
    FetchById {
        /// Id of the gadget to load.
        id: String,

        /// Trace context of the issuing span.
        trace_context: Option<TraceContext>,
    },

    /// Create a gadget from submitted fields.
    Create {
        /// Fields of the new gadget.
        input: GadgetInput,

        /// Trace context of the issuing span.
        trace_context: Option<TraceContext>,
    },

    /// Replace the fields of an existing gadget.
    Update {
        /// Id of the gadget to update.
        id: String,

        /// New fields.
        input: GadgetInput,

        /// Trace context of the issuing span.
        trace_context: Option<TraceContext>,
    },

    /// Delete a gadget.
    Delete {
        /// Id of the gadget to delete.
        id: String,

        /// Trace context of the issuing span.
        trace_context: Option<TraceContext>,
    },
}

impl Command {
    /// The status slot this command drives.
    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        match self {
            Self::FetchAll { .. } => OperationKind::FetchAll,
            Self::FetchById { .. } => OperationKind::FetchById,
            Self::Create { .. } => OperationKind::Create,
            Self::Update { .. } => OperationKind::Update,
            Self::Delete { .. } => OperationKind::Delete,
        }
    }

    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::FetchAll { trace_context }
            | Self::FetchById { trace_context, .. }
            | Self::Create { trace_context, .. }
            | Self::Update { trace_context, .. }
            | Self::Delete { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_map_to_kinds() {
        assert_eq!(Command::fetch_all().kind(), OperationKind::FetchAll);
        assert_eq!(Command::fetch_by_id("1".into()).kind(), OperationKind::FetchById);
        assert_eq!(Command::create(GadgetInput::default()).kind(), OperationKind::Create);
        assert_eq!(
            Command::update("1".into(), GadgetInput::default()).kind(),
            OperationKind::Update
        );
        assert_eq!(Command::delete("1".into()).kind(), OperationKind::Delete);
    }

    #[test]
    fn builders_without_otel_layer_carry_no_context() {
        assert!(Command::delete("1".into()).trace_context().is_none());
    }
}
