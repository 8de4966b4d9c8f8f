//! Gadget Catalog: client-side state and synchronization core for a gadget
//! catalog served over REST.
//!
//! The crate owns the in-memory collection of gadget records, runs every
//! network operation against it, tracks a lifecycle status per operation
//! kind, and exposes memoized views (search results, combined status) to a
//! rendering layer:
//! - One explicitly constructed store, mutated only through named transitions
//! - An async coordinator wrapping each remote call in begin/complete/fail
//! - Memoized selectors keyed on collection identity and filter text
//! - A `reqwest` REST client and an in-memory backend behind one trait
//! - OpenTelemetry-aware tracing with `traceparent` propagation

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI (main.rs) / embedding UI                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Catalog facade                                   │
//! │  - Store + state transitions                        │
//! │  - Selectors, form model                            │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Coordinator   │   │ Service Layer │
//! │ (ui/)         │   │ (coordinator/)│   │ (service/)    │
//! │ - View models │   │ - Commands    │   │ - HTTP client │
//! │               │   │ - Lifecycle   │   │ - In-memory   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Config file discovery (infrastructure/)          │
//! │  - Error types (domain/error)                       │
//! │  - Gadget model (domain/gadget)                     │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing subscriber + OpenTelemetry layer         │
//! │  - traceparent propagation                          │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Store, transitions, selectors, catalog facade
//! - [`coordinator`]: Async operation lifecycle
//! - [`domain`]: Gadget types and errors
//! - [`infrastructure`]: Config file location
//! - [`observability`]: Tracing setup and context propagation
//! - [`service`]: Remote gadget service trait and implementations
//! - [`ui`]: View models
//!
//! # Configuration
//!
//! Configuration is read from TOML:
//!
//! ```toml
//! # ~/.config/gadget-catalog/config.toml
//! base_url = "https://playground-016-backend.vercel.app/api"
//! request_timeout_secs = 30
//! trace_level = "info"
//! ```
//!
//! `GADGET_CATALOG_BASE_URL`, `GADGET_CATALOG_TIMEOUT` and
//! `GADGET_CATALOG_TRACE_LEVEL` override the file.
//!
//! # Examples
//!
//! ```rust
//! use gadget_catalog::app::{Catalog, OperationKind, OperationStatus};
//! use gadget_catalog::service::InMemoryGadgetService;
//! use gadget_catalog::{Category, GadgetInput, Specs};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let catalog = Catalog::new(InMemoryGadgetService::new());
//! catalog
//!     .create(GadgetInput {
//!         name: "Echo Dot".into(),
//!         brand: "Amazon".into(),
//!         specs: Specs { category: Category::SmartHome, price: 49.99, ..Specs::default() },
//!         ..GadgetInput::default()
//!     })
//!     .await?;
//!
//! catalog.set_search_filter("echo");
//! assert_eq!(catalog.filtered_gadgets().len(), 1);
//! assert_eq!(catalog.status(OperationKind::Create), OperationStatus::Success);
//! # Ok::<(), gadget_catalog::OperationError>(())
//! # }).unwrap();
//! ```

pub mod app;
pub mod coordinator;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod service;
pub mod ui;

pub use app::{Catalog, CatalogState, GadgetForm, OperationKind, OperationOutcome, OperationStatus, Store};
pub use coordinator::{Command, Coordinator};
pub use domain::{Category, CatalogError, ErrorKind, Gadget, GadgetInput, OperationError, Result, Specs};
pub use service::{GadgetService, HttpGadgetService, InMemoryGadgetService};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Backend the catalog talks to when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://playground-016-backend.vercel.app/api";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Catalog configuration.
///
/// Every field has a default, so an empty TOML document is valid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base URL of the REST backend, without the endpoint path.
    ///
    /// Default: [`DEFAULT_BASE_URL`]
    pub base_url: String,

    /// Per-request timeout in seconds. Default: `30`
    pub request_timeout_secs: u64,

    /// Tracing filter directive.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or any `EnvFilter`
    /// directive. `RUST_LOG` takes precedence. Default: `"info"`
    pub trace_level: Option<String>,

    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            trace_level: None,
            user_agent: concat!("gadget-catalog/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    /// Parses configuration from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] on invalid TOML or unknown keys.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read and
    /// [`CatalogError::Config`] if it does not parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Self::from_toml_str(&source)
    }

    /// Applies string overrides on top of this configuration.
    ///
    /// # Parsing Rules
    ///
    /// - `base_url`: used if non-blank
    /// - `timeout`: `u64` seconds, ignored unless a positive integer
    /// - `trace_level`: used if non-blank
    ///
    /// Unknown keys are ignored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use gadget_catalog::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("base_url".to_string(), "http://localhost:3000/api".to_string());
    /// map.insert("timeout".to_string(), "soon".to_string());
    ///
    /// let config = Config::default().with_overrides(&map);
    /// assert_eq!(config.base_url, "http://localhost:3000/api");
    /// assert_eq!(config.request_timeout_secs, 30);
    /// ```
    #[must_use]
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, String>) -> Self {
        let non_blank = |key: &str| {
            overrides
                .get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        if let Some(base_url) = non_blank("base_url") {
            self.base_url = base_url;
        }
        if let Some(timeout) = non_blank("timeout")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
        {
            self.request_timeout_secs = timeout;
        }
        if let Some(level) = non_blank("trace_level") {
            self.trace_level = Some(level);
        }
        self
    }

    /// Collects `GADGET_CATALOG_*` environment overrides into the map shape
    /// accepted by [`Config::with_overrides`].
    #[must_use]
    pub fn env_overrides() -> BTreeMap<String, String> {
        [
            ("base_url", "GADGET_CATALOG_BASE_URL"),
            ("timeout", "GADGET_CATALOG_TIMEOUT"),
            ("trace_level", "GADGET_CATALOG_TRACE_LEVEL"),
        ]
        .into_iter()
        .filter_map(|(key, var)| std::env::var(var).ok().map(|value| (key.to_string(), value)))
        .collect()
    }

    /// Loads the effective configuration for this process.
    ///
    /// Reads the file located by [`infrastructure::config_file_path`] if it
    /// exists, otherwise starts from defaults, then applies environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let base = match infrastructure::config_file_path() {
            Some(path) if path.is_file() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        Ok(base.with_overrides(&Self::env_overrides()))
    }
}

/// Builds a catalog talking to the configured REST backend.
///
/// Does not install a tracing subscriber; call
/// [`observability::init_tracing`] first if logs are wanted.
///
/// # Errors
///
/// Returns [`CatalogError::Config`] for an unusable base URL or user agent.
///
/// # Example
///
/// ```rust
/// use gadget_catalog::{initialize, Config};
///
/// let catalog = initialize(&Config::default())?;
/// assert!(catalog.filtered_gadgets().is_empty());
/// # Ok::<(), gadget_catalog::CatalogError>(())
/// ```
pub fn initialize(config: &Config) -> Result<Catalog<HttpGadgetService>> {
    tracing::debug!(base_url = %config.base_url, "initializing gadget catalog");
    let service = HttpGadgetService::new(config)?;
    Ok(Catalog::new(service))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            base_url = "http://localhost:8080/api"
            trace_level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn unknown_keys_are_config_errors() {
        let err = Config::from_toml_str("scan_depth = 4").unwrap_err();
        assert!(matches!(err, CatalogError::Config(_)));
    }

    #[test]
    fn overrides_ignore_blank_and_invalid_values() {
        let map: BTreeMap<String, String> = [
            ("base_url", "   "),
            ("timeout", "0"),
            ("trace_level", "warn"),
            ("theme", "dark"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = Config::default().with_overrides(&map);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.trace_level.as_deref(), Some("warn"));
    }

    #[test]
    fn initialize_rejects_empty_base_url() {
        let config = Config {
            base_url: " / ".to_string(),
            ..Config::default()
        };
        // " / " trims to "/", then the trailing slash goes.
        assert!(matches!(initialize(&config), Err(CatalogError::Config(_))));
    }
}
