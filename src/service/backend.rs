//! Remote gadget service abstraction.
//!
//! This module defines the [`GadgetService`] trait, the narrow boundary
//! between the catalog core and whatever performs the network exchange. The
//! coordinator only ever talks to a `GadgetService`, which lets the HTTP
//! client and the in-memory backend be swapped freely.
//!
//! # Contract
//!
//! Implementations must return fully validated data: every gadget handed back
//! has passed [`Gadget::validate`](crate::domain::Gadget::validate), and a
//! listed collection has unique ids. Failures are reported as
//! [`CatalogError::Transport`], [`CatalogError::Server`] or
//! [`CatalogError::Shape`].
//!
//! [`CatalogError::Transport`]: crate::domain::CatalogError::Transport
//! [`CatalogError::Server`]: crate::domain::CatalogError::Server
//! [`CatalogError::Shape`]: crate::domain::CatalogError::Shape

use crate::domain::error::{CatalogError, Result};
use crate::domain::{Gadget, GadgetInput};
use futures_util::future::BoxFuture;
use std::collections::HashSet;
use std::sync::Arc;

/// The five remote operations on the gadget collection.
///
/// Methods return boxed futures so the trait stays object-safe and the
/// coordinator can hold a `dyn GadgetService` when it needs to.
pub trait GadgetService: Send + Sync {
    /// Lists every gadget in server order.
    fn list_gadgets(&self) -> BoxFuture<'_, Result<Vec<Gadget>>>;

    /// Fetches one gadget by id.
    fn get_gadget<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Gadget>>;

    /// Creates a gadget and returns it with its server-assigned id.
    fn create_gadget<'a>(&'a self, input: &'a GadgetInput) -> BoxFuture<'a, Result<Gadget>>;

    /// Replaces the fields of gadget `id` and returns the stored result.
    fn update_gadget<'a>(
        &'a self,
        id: &'a str,
        input: &'a GadgetInput,
    ) -> BoxFuture<'a, Result<Gadget>>;

    /// Deletes gadget `id`. Success is the confirmation.
    fn delete_gadget<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>>;
}

impl<S: GadgetService + ?Sized> GadgetService for Arc<S> {
    fn list_gadgets(&self) -> BoxFuture<'_, Result<Vec<Gadget>>> {
        (**self).list_gadgets()
    }

    fn get_gadget<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Gadget>> {
        (**self).get_gadget(id)
    }

    fn create_gadget<'a>(&'a self, input: &'a GadgetInput) -> BoxFuture<'a, Result<Gadget>> {
        (**self).create_gadget(input)
    }

    fn update_gadget<'a>(
        &'a self,
        id: &'a str,
        input: &'a GadgetInput,
    ) -> BoxFuture<'a, Result<Gadget>> {
        (**self).update_gadget(id, input)
    }

    fn delete_gadget<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>> {
        (**self).delete_gadget(id)
    }
}

/// Validates a listed collection: each gadget individually, then id
/// uniqueness across the list.
///
/// # Errors
///
/// Returns [`CatalogError::Shape`] on the first invalid gadget or duplicate id.
pub fn validate_collection(gadgets: &[Gadget]) -> Result<()> {
    let mut seen = HashSet::with_capacity(gadgets.len());
    for gadget in gadgets {
        gadget.validate()?;
        if !seen.insert(gadget.id.as_str()) {
            return Err(CatalogError::Shape(format!("duplicate gadget id `{}`", gadget.id)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Specs;

    fn gadget(id: &str) -> Gadget {
        Gadget {
            id: id.to_string(),
            name: "n".into(),
            brand: "b".into(),
            description: String::new(),
            image: String::new(),
            specs: Specs::default(),
            key_features: vec![],
        }
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = validate_collection(&[gadget("1"), gadget("2"), gadget("1")]).unwrap_err();
        assert!(err.to_string().contains("duplicate gadget id `1`"));
    }

    #[test]
    fn unique_valid_collection_passes() {
        assert!(validate_collection(&[gadget("1"), gadget("2")]).is_ok());
    }
}
