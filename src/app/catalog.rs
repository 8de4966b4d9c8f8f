//! Catalog facade.
//!
//! [`Catalog`] bundles one [`Store`], the [`Coordinator`] that writes to it
//! and the [`Selectors`] that read from it. It is what embedders and the CLI
//! hold: commands go in through the operation methods, views come out through
//! the selector methods.
//!
//! # Example
//!
//! ```rust
//! use gadget_catalog::app::{Catalog, OperationKind, OperationStatus};
//! use gadget_catalog::service::InMemoryGadgetService;
//!
//! # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
//! let catalog = Catalog::new(InMemoryGadgetService::new());
//! catalog.fetch_all().await.unwrap();
//! assert_eq!(catalog.status(OperationKind::FetchAll), OperationStatus::Success);
//! assert!(catalog.filtered_gadgets().is_empty());
//! # });
//! ```

use super::actions::OperationOutcome;
use super::selectors::Selectors;
use super::state::CatalogState;
use super::status::{OperationKind, OperationStatus, StatusBoard};
use super::store::Store;
use crate::coordinator::{Command, Coordinator};
use crate::domain::{Gadget, GadgetInput, OperationError};
use crate::service::GadgetService;
use crate::ui::ListViewModel;
use std::sync::Arc;

type OperationResult = std::result::Result<OperationOutcome, OperationError>;

/// Store, coordinator and selectors over one service.
#[derive(Debug)]
pub struct Catalog<S> {
    store: Store,
    coordinator: Coordinator<S>,
    selectors: Arc<Selectors>,
}

impl<S> Clone for Catalog<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            coordinator: self.coordinator.clone(),
            selectors: Arc::clone(&self.selectors),
        }
    }
}

impl<S: GadgetService> Catalog<S> {
    /// Creates a catalog with a fresh store over `service`.
    pub fn new(service: S) -> Self {
        Self::with_store(Arc::new(service), Store::new())
    }

    /// Creates a catalog over an existing store and shared service.
    pub fn with_store(service: Arc<S>, store: Store) -> Self {
        Self {
            coordinator: Coordinator::new(service, store.clone()),
            store,
            selectors: Arc::new(Selectors::new()),
        }
    }

    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    #[must_use]
    pub const fn coordinator(&self) -> &Coordinator<S> {
        &self.coordinator
    }

    #[must_use]
    pub fn service(&self) -> &Arc<S> {
        self.coordinator.service()
    }

    /// Runs an arbitrary command.
    ///
    /// # Errors
    ///
    /// Returns the [`OperationError`] recorded in the store on failure.
    pub async fn run(&self, command: Command) -> OperationResult {
        self.coordinator.run(command).await
    }

    /// # Errors
    ///
    /// See [`Catalog::run`].
    pub async fn fetch_all(&self) -> OperationResult {
        self.coordinator.fetch_all().await
    }

    /// # Errors
    ///
    /// See [`Catalog::run`].
    pub async fn fetch_by_id(&self, id: impl Into<String>) -> OperationResult {
        self.coordinator.fetch_by_id(id).await
    }

    /// # Errors
    ///
    /// See [`Catalog::run`].
    pub async fn create(&self, input: GadgetInput) -> OperationResult {
        self.coordinator.create(input).await
    }

    /// Replaces a gadget's fields. When the detail view shows the same
    /// gadget, it is fetched again after a successful update so list and
    /// detail agree.
    ///
    /// A failed refetch is recorded under `fetchById` and does not change
    /// the returned update result.
    ///
    /// # Errors
    ///
    /// See [`Catalog::run`].
    pub async fn update(&self, id: impl Into<String>, input: GadgetInput) -> OperationResult {
        let id = id.into();
        let outcome = self.coordinator.update(id.clone(), input).await?;

        let detail_shown = self
            .store
            .read(|state| state.single_gadget().is_some_and(|g| g.id == id));
        if detail_shown {
            if let Err(err) = self.coordinator.fetch_by_id(id).await {
                tracing::warn!(error = %err, "detail refresh after update failed");
            }
        }
        Ok(outcome)
    }

    /// # Errors
    ///
    /// See [`Catalog::run`].
    pub async fn delete(&self, id: impl Into<String>) -> OperationResult {
        self.coordinator.delete(id).await
    }
}

impl<S> Catalog<S> {
    /// Replaces the search text. Stored verbatim.
    pub fn set_search_filter(&self, text: impl Into<String>) {
        self.store.set_search_filter(text);
    }

    /// Gadgets matching the search filter. Memoized; see [`Selectors`].
    #[must_use]
    pub fn filtered_gadgets(&self) -> Arc<Vec<Gadget>> {
        self.store.read(|state| self.selectors.filtered_gadgets(state))
    }

    /// All five statuses as one value. Memoized; see [`Selectors`].
    #[must_use]
    pub fn combined_status(&self) -> Arc<StatusBoard> {
        self.store.read(|state| self.selectors.combined_status(state))
    }

    #[must_use]
    pub fn status(&self, kind: OperationKind) -> OperationStatus {
        self.store.read(|state| state.status(kind))
    }

    #[must_use]
    pub fn single_gadget(&self) -> Option<Gadget> {
        self.store.read(|state| state.single_gadget().cloned())
    }

    #[must_use]
    pub fn search_filter(&self) -> String {
        self.store.read(|state| state.search_filter().to_string())
    }

    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.store.read(|state| state.last_error().map(str::to_string))
    }

    #[must_use]
    pub fn snapshot(&self) -> CatalogState {
        self.store.snapshot()
    }

    /// View model of the list screen, built from one consistent snapshot.
    #[must_use]
    pub fn list_viewmodel(&self) -> ListViewModel {
        self.store.read(|state| {
            let gadgets = self.selectors.filtered_gadgets(state);
            let statuses = self.selectors.combined_status(state);
            ListViewModel::new(&gadgets, state.search_filter(), &statuses)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CatalogError, Category, Specs};
    use crate::service::InMemoryGadgetService;

    fn input(name: &str, brand: &str, description: &str) -> GadgetInput {
        GadgetInput {
            name: name.to_string(),
            brand: brand.to_string(),
            description: description.to_string(),
            image: String::new(),
            specs: Specs {
                dimensions: "5cm".to_string(),
                category: Category::Audio,
                price: 10.0,
                battery_life: 4.0,
            },
            key_features: vec!["Bass".to_string()],
        }
    }

    fn catalog() -> Catalog<InMemoryGadgetService> {
        Catalog::new(InMemoryGadgetService::with_gadgets(vec![
            Gadget::from_input("1", input("Speaker", "Acme", "Portable")),
            Gadget::from_input("2", input("Watch", "Fitbit", "Tracks sleep")),
            Gadget::from_input("3", input("Headphones", "Acme", "Noise cancelling")),
        ]))
    }

    #[tokio::test]
    async fn search_narrows_list_and_clearing_restores_it() {
        let catalog = catalog();
        catalog.fetch_all().await.unwrap();

        catalog.set_search_filter("acm");
        let ids: Vec<String> = catalog.filtered_gadgets().iter().map(|g| g.id.clone()).collect();
        assert_eq!(ids, vec!["1", "3"]);

        catalog.set_search_filter("ZZ");
        assert!(catalog.filtered_gadgets().is_empty());

        catalog.set_search_filter("");
        assert_eq!(catalog.filtered_gadgets().len(), 3);
    }

    #[tokio::test]
    async fn filtered_list_survives_unrelated_failures() {
        let catalog = catalog();
        catalog.fetch_all().await.unwrap();
        catalog.set_search_filter("watch");
        let before = catalog.filtered_gadgets();

        catalog
            .service()
            .fail_next(OperationKind::Create, CatalogError::Transport("Network Error".into()));
        assert!(catalog.create(input("Lamp", "Lumen", "")).await.is_err());

        assert!(Arc::ptr_eq(&before, &catalog.filtered_gadgets()));
        assert_eq!(catalog.last_error().as_deref(), Some("Network Error"));
        assert_eq!(catalog.combined_status().create, OperationStatus::Error);
    }

    #[tokio::test]
    async fn created_gadget_shows_up_in_search() {
        let catalog = catalog();
        catalog.fetch_all().await.unwrap();
        catalog.set_search_filter("lumen");
        assert!(catalog.filtered_gadgets().is_empty());

        catalog.create(input("Lamp", "Lumen", "Warm light")).await.unwrap();
        let found = catalog.filtered_gadgets();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "4");
    }

    #[tokio::test]
    async fn detail_view_and_list_viewmodel() {
        let catalog = catalog();
        catalog.fetch_all().await.unwrap();
        catalog.fetch_by_id("2").await.unwrap();
        assert_eq!(catalog.single_gadget().map(|g| g.name), Some("Watch".to_string()));

        catalog.set_search_filter("Speaker");
        let vm = catalog.list_viewmodel();
        assert_eq!(vm.search_query, "Speaker");
        assert_eq!(vm.cards.len(), 1);
        assert_eq!(vm.cards[0].details_path, "gadget-details/Speaker/1");
        assert!(!vm.is_loading);
        assert!(!vm.fetch_failed);
    }

    #[tokio::test]
    async fn update_refreshes_detail_view_of_same_gadget() {
        let catalog = catalog();
        catalog.fetch_all().await.unwrap();
        catalog.fetch_by_id("1").await.unwrap();

        catalog.update("1", input("Speaker Max", "Acme", "Louder")).await.unwrap();

        assert_eq!(catalog.filtered_gadgets()[0].name, "Speaker Max");
        assert_eq!(catalog.single_gadget().map(|g| g.name), Some("Speaker Max".to_string()));
        assert_eq!(catalog.service().calls(OperationKind::FetchById), 2);
        assert_eq!(catalog.status(OperationKind::FetchById), OperationStatus::Success);
    }

    #[tokio::test]
    async fn update_leaves_detail_view_of_other_gadget_alone() {
        let catalog = catalog();
        catalog.fetch_all().await.unwrap();
        catalog.fetch_by_id("2").await.unwrap();

        catalog.update("1", input("Speaker Max", "Acme", "Louder")).await.unwrap();

        assert_eq!(catalog.single_gadget().map(|g| g.name), Some("Watch".to_string()));
        assert_eq!(catalog.service().calls(OperationKind::FetchById), 1);
    }

    #[tokio::test]
    async fn failed_update_skips_detail_refresh() {
        let catalog = catalog();
        catalog.fetch_by_id("1").await.unwrap();
        catalog
            .service()
            .fail_next(OperationKind::Update, CatalogError::Transport("Network Error".into()));

        assert!(catalog.update("1", input("Speaker Max", "Acme", "")).await.is_err());
        assert_eq!(catalog.single_gadget().map(|g| g.name), Some("Speaker".to_string()));
        assert_eq!(catalog.service().calls(OperationKind::FetchById), 1);
    }

    #[tokio::test]
    async fn update_then_delete_flow() {
        let catalog = catalog();
        catalog.fetch_all().await.unwrap();

        let mut edited = input("Speaker Max", "Acme", "Louder");
        edited.specs.price = 20.0;
        catalog.update("1", edited).await.unwrap();
        catalog.delete("2").await.unwrap();

        let snapshot = catalog.snapshot();
        let names: Vec<&str> = snapshot.gadgets().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Speaker Max", "Headphones"]);
        assert_eq!(snapshot.gadgets()[0].specs.price, 20.0);

        let board = catalog.combined_status();
        assert_eq!(board.update, OperationStatus::Success);
        assert_eq!(board.delete, OperationStatus::Success);
        assert_eq!(board.create, OperationStatus::Idle);
    }
}
