//! Gadget domain model.
//!
//! A [`Gadget`] is one catalog record as served by the backend. The wire
//! format is JSON with camelCase keys and a server-assigned `_id`; plain `id`
//! is accepted on input as well. [`GadgetInput`] is the same record without an
//! id, used for create and update requests.
//!
//! Payloads are checked with [`Gadget::validate`] before they are admitted
//! into the store, so a loaded gadget always has a non-empty id, a complete
//! `specs` block with non-negative numbers, and non-blank key features.

use crate::domain::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Product category of a gadget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    #[serde(rename = "Smart Home")]
    SmartHome,
    #[serde(rename = "Wearables")]
    Wearables,
    #[serde(rename = "Audio")]
    Audio,
    #[serde(rename = "Mobile Accessories")]
    MobileAccessories,
}

impl Category {
    /// Every category, in the order forms present them.
    pub const ALL: [Self; 4] = [
        Self::SmartHome,
        Self::Wearables,
        Self::Audio,
        Self::MobileAccessories,
    ];

    /// Display label, identical to the wire value.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SmartHome => "Smart Home",
            Self::Wearables => "Wearables",
            Self::Audio => "Audio",
            Self::MobileAccessories => "Mobile Accessories",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CatalogError::Shape(format!("unknown category `{s}`")))
    }
}

/// Technical specifications of a gadget.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specs {
    pub dimensions: String,
    pub category: Category,
    pub price: f64,
    pub battery_life: f64,
}

impl Specs {
    fn validate(&self) -> Result<()> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CatalogError::Shape(format!(
                "specs.price must be a non-negative number, got {}",
                self.price
            )));
        }
        if !self.battery_life.is_finite() || self.battery_life < 0.0 {
            return Err(CatalogError::Shape(format!(
                "specs.batteryLife must be a non-negative number, got {}",
                self.battery_life
            )));
        }
        Ok(())
    }
}

/// A catalog record as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gadget {
    /// Server-assigned identifier, immutable after creation.
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub brand: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    pub specs: Specs,
    #[serde(default)]
    pub key_features: Vec<String>,
}

impl Gadget {
    /// Builds a gadget from a server id and the submitted fields.
    #[must_use]
    pub fn from_input(id: impl Into<String>, input: GadgetInput) -> Self {
        Self {
            id: id.into(),
            name: input.name,
            brand: input.brand,
            description: input.description,
            image: input.image,
            specs: input.specs,
            key_features: input.key_features,
        }
    }

    /// Returns the editable fields of this gadget.
    #[must_use]
    pub fn to_input(&self) -> GadgetInput {
        GadgetInput {
            name: self.name.clone(),
            brand: self.brand.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            specs: self.specs.clone(),
            key_features: self.key_features.clone(),
        }
    }

    /// Checks the invariants a gadget must satisfy before entering the store.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Shape`] for an empty id, negative or
    /// non-finite spec numbers, or blank key features.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(CatalogError::Shape("gadget is missing its `_id`".to_string()));
        }
        self.specs.validate()?;
        validate_features(&self.key_features)
    }

    /// Case-insensitive substring match over name, brand and description.
    ///
    /// `needle` must already be lowercased.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.brand.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// Gadget fields without the server-assigned id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GadgetInput {
    pub name: String,
    pub brand: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    pub specs: Specs,
    #[serde(default)]
    pub key_features: Vec<String>,
}

impl GadgetInput {
    /// Checks the same field invariants as [`Gadget::validate`], minus the id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Shape`] for invalid spec numbers or blank features.
    pub fn validate(&self) -> Result<()> {
        self.specs.validate()?;
        validate_features(&self.key_features)
    }
}

fn validate_features(features: &[String]) -> Result<()> {
    match features.iter().position(|f| f.trim().is_empty()) {
        Some(index) => Err(CatalogError::Shape(format!("keyFeatures[{index}] is blank"))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_json() -> serde_json::Value {
        json!({
            "_id": "66f1",
            "name": "Echo Dot",
            "brand": "Amazon",
            "description": "Compact smart speaker",
            "image": "https://example.com/echo.png",
            "specs": {
                "dimensions": "10 x 10 x 9 cm",
                "category": "Smart Home",
                "price": 49.99,
                "batteryLife": 0
            },
            "keyFeatures": ["Voice control", "Alexa"]
        })
    }

    #[test]
    fn decodes_backend_payload() {
        let gadget: Gadget = serde_json::from_value(sample_json()).unwrap();
        assert_eq!(gadget.id, "66f1");
        assert_eq!(gadget.specs.category, Category::SmartHome);
        assert_eq!(gadget.specs.battery_life, 0.0);
        assert_eq!(gadget.key_features, vec!["Voice control", "Alexa"]);
        assert!(gadget.validate().is_ok());
    }

    #[test]
    fn accepts_plain_id_alias() {
        let mut value = sample_json();
        let id = value.as_object_mut().unwrap().remove("_id").unwrap();
        value["id"] = id;
        let gadget: Gadget = serde_json::from_value(value).unwrap();
        assert_eq!(gadget.id, "66f1");
    }

    #[test]
    fn missing_specs_is_a_decode_error() {
        let mut value = sample_json();
        value.as_object_mut().unwrap().remove("specs");
        let err = serde_json::from_value::<Gadget>(value).unwrap_err();
        assert!(err.to_string().contains("specs"));
    }

    #[test]
    fn serializes_with_wire_names() {
        let gadget: Gadget = serde_json::from_value(sample_json()).unwrap();
        let value = serde_json::to_value(&gadget).unwrap();
        assert_eq!(value["_id"], "66f1");
        assert_eq!(value["specs"]["batteryLife"], 0.0);
        assert_eq!(value["specs"]["category"], "Smart Home");
        assert!(value.get("keyFeatures").is_some());
    }

    #[test]
    fn validate_rejects_negative_price() {
        let mut gadget: Gadget = serde_json::from_value(sample_json()).unwrap();
        gadget.specs.price = -1.0;
        assert!(matches!(gadget.validate(), Err(CatalogError::Shape(_))));
    }

    #[test]
    fn validate_rejects_blank_feature_and_empty_id() {
        let mut gadget: Gadget = serde_json::from_value(sample_json()).unwrap();
        gadget.key_features.push("  ".to_string());
        assert!(gadget.validate().is_err());

        let mut gadget: Gadget = serde_json::from_value(sample_json()).unwrap();
        gadget.id = String::new();
        assert!(gadget.validate().is_err());
    }

    #[test]
    fn matches_is_case_insensitive_over_three_fields() {
        let gadget: Gadget = serde_json::from_value(sample_json()).unwrap();
        assert!(gadget.matches("echo"));
        assert!(gadget.matches("amaz"));
        assert!(gadget.matches("smart speaker"));
        assert!(!gadget.matches("alexa"));
    }

    #[test]
    fn category_parses_labels() {
        assert_eq!("mobile accessories".parse::<Category>().unwrap(), Category::MobileAccessories);
        assert!("Kitchen".parse::<Category>().is_err());
        assert_eq!(Category::Audio.to_string(), "Audio");
    }

    #[test]
    fn input_round_trips_through_gadget() {
        let gadget: Gadget = serde_json::from_value(sample_json()).unwrap();
        let rebuilt = Gadget::from_input("66f1", gadget.to_input());
        assert_eq!(rebuilt, gadget);
    }
}
