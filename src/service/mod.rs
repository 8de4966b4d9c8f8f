//! Remote gadget service layer.
//!
//! The catalog core reaches the backend only through the [`GadgetService`]
//! trait. Two implementations ship with the crate.
//!
//! # Modules
//!
//! - `backend`: The service trait and collection validation
//! - `http`: REST client over `reqwest`
//! - `memory`: In-memory backend with scripted failures and delays

pub mod backend;
pub mod http;
pub mod memory;

pub use backend::{validate_collection, GadgetService};
pub use http::HttpGadgetService;
pub use memory::InMemoryGadgetService;
