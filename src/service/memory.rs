//! In-memory gadget backend.
//!
//! [`InMemoryGadgetService`] keeps an ordered list of gadgets and assigns
//! sequential string ids on create. It behaves like the REST backend for the
//! purposes of the catalog core, including 404s for unknown ids, and lets a
//! caller script failures and delays per operation kind.
//!
//! Used by tests and by local runs without a backend.

use super::backend::GadgetService;
use crate::app::OperationKind;
use crate::domain::error::{CatalogError, Result};
use crate::domain::{Gadget, GadgetInput};
use futures_util::future::BoxFuture;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Debug, Default)]
struct MemoryData {
    gadgets: Vec<Gadget>,
    next_id: u64,
    failures: HashMap<OperationKind, VecDeque<CatalogError>>,
    delays: HashMap<OperationKind, VecDeque<Duration>>,
    calls: HashMap<OperationKind, usize>,
}

impl MemoryData {
    /// Next sequential id not already held by a gadget.
    fn allocate_id(&mut self) -> String {
        loop {
            self.next_id += 1;
            let id = self.next_id.to_string();
            if !self.gadgets.iter().any(|g| g.id == id) {
                return id;
            }
        }
    }
}

/// In-memory implementation of [`GadgetService`].
///
/// # Example
///
/// ```rust
/// use gadget_catalog::service::{GadgetService, InMemoryGadgetService};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let service = InMemoryGadgetService::new();
/// assert!(service.list_gadgets().await.unwrap().is_empty());
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryGadgetService {
    data: Mutex<MemoryData>,
}

impl InMemoryGadgetService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend pre-populated with `gadgets`, in order.
    ///
    /// Ids of seeded gadgets are kept; new ids continue after the largest
    /// numeric seed id.
    #[must_use]
    pub fn with_gadgets(gadgets: Vec<Gadget>) -> Self {
        let next_id = gadgets
            .iter()
            .filter_map(|g| g.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self {
            data: Mutex::new(MemoryData {
                gadgets,
                next_id,
                ..MemoryData::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MemoryData> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Makes the next call of `kind` fail with `error`. Queued per kind.
    pub fn fail_next(&self, kind: OperationKind, error: CatalogError) {
        self.lock().failures.entry(kind).or_default().push_back(error);
    }

    /// Makes the next call of `kind` wait `delay` before answering. Queued per kind.
    pub fn delay_next(&self, kind: OperationKind, delay: Duration) {
        self.lock().delays.entry(kind).or_default().push_back(delay);
    }

    /// Number of calls received for `kind`.
    #[must_use]
    pub fn calls(&self, kind: OperationKind) -> usize {
        self.lock().calls.get(&kind).copied().unwrap_or(0)
    }

    /// Current backend contents.
    #[must_use]
    pub fn gadgets(&self) -> Vec<Gadget> {
        self.lock().gadgets.clone()
    }

    /// Records the call and pops any scripted delay and failure for `kind`.
    fn script(&self, kind: OperationKind) -> (Option<Duration>, Option<CatalogError>) {
        let mut data = self.lock();
        *data.calls.entry(kind).or_default() += 1;
        let delay = data.delays.get_mut(&kind).and_then(VecDeque::pop_front);
        let failure = data.failures.get_mut(&kind).and_then(VecDeque::pop_front);
        (delay, failure)
    }

    async fn respond<T>(
        &self,
        kind: OperationKind,
        apply: impl FnOnce(&mut MemoryData) -> Result<T>,
    ) -> Result<T> {
        let (delay, failure) = self.script(kind);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = failure {
            return Err(err);
        }
        apply(&mut self.lock())
    }
}

fn not_found() -> CatalogError {
    CatalogError::Server {
        status: 404,
        message: "Request failed with status code 404".to_string(),
    }
}

impl GadgetService for InMemoryGadgetService {
    fn list_gadgets(&self) -> BoxFuture<'_, Result<Vec<Gadget>>> {
        Box::pin(self.respond(OperationKind::FetchAll, |data| Ok(data.gadgets.clone())))
    }

    fn get_gadget<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Gadget>> {
        Box::pin(self.respond(OperationKind::FetchById, move |data| {
            data.gadgets.iter().find(|g| g.id == id).cloned().ok_or_else(not_found)
        }))
    }

    fn create_gadget<'a>(&'a self, input: &'a GadgetInput) -> BoxFuture<'a, Result<Gadget>> {
        Box::pin(self.respond(OperationKind::Create, move |data| {
            input.validate()?;
            let id = data.allocate_id();
            let gadget = Gadget::from_input(id, input.clone());
            data.gadgets.push(gadget.clone());
            Ok(gadget)
        }))
    }

    fn update_gadget<'a>(
        &'a self,
        id: &'a str,
        input: &'a GadgetInput,
    ) -> BoxFuture<'a, Result<Gadget>> {
        Box::pin(self.respond(OperationKind::Update, move |data| {
            input.validate()?;
            let slot = data.gadgets.iter_mut().find(|g| g.id == id).ok_or_else(not_found)?;
            *slot = Gadget::from_input(id, input.clone());
            Ok(slot.clone())
        }))
    }

    fn delete_gadget<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.respond(OperationKind::Delete, move |data| {
            let index = data.gadgets.iter().position(|g| g.id == id).ok_or_else(not_found)?;
            data.gadgets.remove(index);
            Ok(())
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Specs;

    fn input(name: &str) -> GadgetInput {
        GadgetInput {
            name: name.to_string(),
            brand: "Acme".to_string(),
            specs: Specs::default(),
            ..GadgetInput::default()
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let service = InMemoryGadgetService::new();
        let a = service.create_gadget(&input("A")).await.unwrap();
        let b = service.create_gadget(&input("B")).await.unwrap();
        assert_eq!((a.id.as_str(), b.id.as_str()), ("1", "2"));
        assert_eq!(service.list_gadgets().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn created_ids_skip_sparse_seed_ids() {
        let seed = |id: &str| Gadget::from_input(id, input(id));
        let service =
            InMemoryGadgetService::with_gadgets(vec![seed("1"), seed("3"), seed("legacy")]);

        let a = service.create_gadget(&input("A")).await.unwrap();
        let b = service.create_gadget(&input("B")).await.unwrap();
        assert_eq!((a.id.as_str(), b.id.as_str()), ("4", "5"));

        let ids: Vec<String> = service.gadgets().into_iter().map(|g| g.id).collect();
        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), ids.len());

        service.delete_gadget("3").await.unwrap();
        let ids: Vec<String> = service.gadgets().into_iter().map(|g| g.id).collect();
        assert_eq!(ids, vec!["1", "legacy", "4", "5"]);
    }

    #[tokio::test]
    async fn unknown_ids_are_404() {
        let service = InMemoryGadgetService::new();
        for result in [
            service.get_gadget("nope").await.map(|_| ()),
            service.update_gadget("nope", &input("x")).await.map(|_| ()),
            service.delete_gadget("nope").await,
        ] {
            assert!(matches!(result, Err(CatalogError::Server { status: 404, .. })));
        }
    }

    #[tokio::test]
    async fn scripted_failure_applies_once() {
        let service = InMemoryGadgetService::new();
        service.fail_next(OperationKind::FetchAll, CatalogError::Transport("Network Error".into()));
        assert!(service.list_gadgets().await.is_err());
        assert!(service.list_gadgets().await.is_ok());
        assert_eq!(service.calls(OperationKind::FetchAll), 2);
    }

    #[tokio::test]
    async fn update_and_delete_change_contents() {
        let service = InMemoryGadgetService::new();
        let created = service.create_gadget(&input("Old")).await.unwrap();
        let updated = service.update_gadget(&created.id, &input("New")).await.unwrap();
        assert_eq!(updated.name, "New");
        assert_eq!(updated.id, created.id);
        service.delete_gadget(&created.id).await.unwrap();
        assert!(service.gadgets().is_empty());
    }

    #[tokio::test]
    async fn invalid_input_is_rejected() {
        let service = InMemoryGadgetService::new();
        let mut bad = input("Bad");
        bad.specs.price = -5.0;
        assert!(matches!(service.create_gadget(&bad).await, Err(CatalogError::Shape(_))));
        assert!(service.gadgets().is_empty());
    }
}
