//! View model types representing renderable catalog state.
//!
//! View models are display-ready snapshots computed from the store through
//! the selectors. They carry no behavior; a rendering layer (the CLI, or a
//! UI embedding the crate) only formats them.
//!
//! # Example
//!
//! ```rust
//! use gadget_catalog::ui::viewmodel::ListViewModel;
//!
//! let vm = ListViewModel::default();
//! assert!(vm.cards.is_empty());
//! assert!(!vm.is_loading);
//! ```

use crate::app::{OperationKind, OperationStatus, StatusBoard};
use crate::domain::Gadget;

/// Everything the gadget list screen shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListViewModel {
    /// One card per gadget matching the search filter, in collection order.
    pub cards: Vec<GadgetCard>,

    /// Search text as typed.
    pub search_query: String,

    /// Whether the list fetch is in flight.
    pub is_loading: bool,

    /// Whether the last list fetch failed.
    pub fetch_failed: bool,

    /// Whether a delete is in flight.
    pub is_deleting: bool,

    /// Whether any operation is in flight.
    pub is_busy: bool,
}

impl ListViewModel {
    /// Builds the list view from filtered gadgets and the status board.
    #[must_use]
    pub fn new(gadgets: &[Gadget], search_query: &str, statuses: &StatusBoard) -> Self {
        Self {
            cards: gadgets.iter().map(GadgetCard::from).collect(),
            search_query: search_query.to_string(),
            is_loading: statuses.get(OperationKind::FetchAll).is_pending(),
            fetch_failed: statuses.get(OperationKind::FetchAll) == OperationStatus::Error,
            is_deleting: statuses.get(OperationKind::Delete).is_pending(),
            is_busy: statuses.any_pending(),
        }
    }

    /// True once a fetch has settled and nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty() && !self.is_loading && !self.fetch_failed
    }
}

/// Display strings for one gadget card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GadgetCard {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub dimensions: String,
    pub category: String,
    /// Price prefixed with `$`, e.g. `$49.99`.
    pub price: String,
    pub battery_life: String,
    /// Relative route of the detail page: `gadget-details/<name>/<id>`.
    pub details_path: String,
}

impl From<&Gadget> for GadgetCard {
    fn from(gadget: &Gadget) -> Self {
        Self {
            id: gadget.id.clone(),
            name: gadget.name.clone(),
            brand: gadget.brand.clone(),
            dimensions: gadget.specs.dimensions.clone(),
            category: gadget.specs.category.to_string(),
            price: format!("${}", gadget.specs.price),
            battery_life: gadget.specs.battery_life.to_string(),
            details_path: format!("gadget-details/{}/{}", gadget.name, gadget.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Specs};

    fn gadget() -> Gadget {
        Gadget {
            id: "abc123".to_string(),
            name: "Echo Dot".to_string(),
            brand: "Amazon".to_string(),
            description: String::new(),
            image: String::new(),
            specs: Specs {
                dimensions: "10x10".to_string(),
                category: Category::SmartHome,
                price: 49.99,
                battery_life: 0.0,
            },
            key_features: vec![],
        }
    }

    #[test]
    fn card_formats_display_fields() {
        let card = GadgetCard::from(&gadget());
        assert_eq!(card.price, "$49.99");
        assert_eq!(card.category, "Smart Home");
        assert_eq!(card.battery_life, "0");
        assert_eq!(card.details_path, "gadget-details/Echo Dot/abc123");
    }

    #[test]
    fn whole_prices_have_no_decimals() {
        let mut g = gadget();
        g.specs.price = 25.0;
        assert_eq!(GadgetCard::from(&g).price, "$25");
    }

    #[test]
    fn flags_follow_statuses() {
        let mut board = StatusBoard::default();
        board.set(OperationKind::FetchAll, OperationStatus::Pending);
        let vm = ListViewModel::new(&[], "", &board);
        assert!(vm.is_loading);
        assert!(vm.is_busy);
        assert!(!vm.is_empty());

        board.set(OperationKind::FetchAll, OperationStatus::Error);
        let vm = ListViewModel::new(&[gadget()], "echo", &board);
        assert!(vm.fetch_failed);
        assert!(!vm.is_busy);
        assert_eq!(vm.cards.len(), 1);
        assert_eq!(vm.search_query, "echo");

        board.set(OperationKind::Update, OperationStatus::Pending);
        let vm = ListViewModel::new(&[gadget()], "echo", &board);
        assert!(vm.is_busy);
        assert!(!vm.is_loading);
        assert!(!vm.is_deleting);
    }
}
