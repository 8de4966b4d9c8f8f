//! Presentation layer.
//!
//! Turns store state into display-ready view models. Rendering itself is left
//! to the consumer; the bundled CLI prints these view models as text.
//!
//! ```text
//! Store → Selectors → ListViewModel → renderer (CLI / embedding UI)
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types for the gadget list

pub mod viewmodel;

pub use viewmodel::{GadgetCard, ListViewModel};
