//! Editable gadget form.
//!
//! [`GadgetForm`] holds the in-progress values of a create or edit form and
//! turns them into a [`GadgetInput`] on submit. Field names follow the wire
//! names, with spec fields addressed as `specs.<field>`:
//!
//! | Name                | Parsing                                   |
//! |---------------------|-------------------------------------------|
//! | `name`, `brand`, `description`, `image`, `specs.dimensions` | verbatim |
//! | `specs.category`    | category label, case-insensitive          |
//! | `specs.price`, `specs.batteryLife` | leading float, `0` if none |
//!
//! # Example
//!
//! ```rust
//! use gadget_catalog::app::GadgetForm;
//!
//! let mut form = GadgetForm::new();
//! form.set_field("name", "Echo Dot").unwrap();
//! form.set_field("specs.price", "49.99").unwrap();
//! form.set_feature(0, "Voice control");
//! form.add_feature();
//!
//! let input = form.to_input();
//! assert_eq!(input.specs.price, 49.99);
//! assert_eq!(input.key_features, vec!["Voice control"]);
//! ```

use crate::domain::error::{CatalogError, Result};
use crate::domain::{Gadget, GadgetInput};

/// In-progress values of a gadget form.
#[derive(Debug, Clone, PartialEq)]
pub struct GadgetForm {
    values: GadgetInput,
}

impl Default for GadgetForm {
    fn default() -> Self {
        Self {
            values: GadgetInput {
                key_features: vec![String::new()],
                ..GadgetInput::default()
            },
        }
    }
}

impl GadgetForm {
    /// Blank form: empty text fields, Smart Home, zero price and battery
    /// life, one empty feature slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Form prefilled with an existing gadget's fields, for editing.
    #[must_use]
    pub fn from_gadget(gadget: &Gadget) -> Self {
        Self::from_input(gadget.to_input())
    }

    /// Form prefilled with `values`. An empty feature list gets one blank
    /// slot.
    #[must_use]
    pub fn from_input(mut values: GadgetInput) -> Self {
        if values.key_features.is_empty() {
            values.key_features.push(String::new());
        }
        Self { values }
    }

    /// Current raw values, including blank feature slots.
    #[must_use]
    pub const fn values(&self) -> &GadgetInput {
        &self.values
    }

    /// Sets one field by its form name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Shape`] for an unknown field name or an
    /// unknown category label. The form is left unchanged in that case.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        let values = &mut self.values;
        match name {
            "name" => values.name = value.to_string(),
            "brand" => values.brand = value.to_string(),
            "description" => values.description = value.to_string(),
            "image" => values.image = value.to_string(),
            "specs.dimensions" => values.specs.dimensions = value.to_string(),
            "specs.category" => values.specs.category = value.parse()?,
            "specs.price" => values.specs.price = parse_number(value),
            "specs.batteryLife" => values.specs.battery_life = parse_number(value),
            other => {
                return Err(CatalogError::Shape(format!("unknown form field `{other}`")));
            }
        }
        Ok(())
    }

    /// Replaces the feature at `index`. Out-of-range indices are ignored.
    pub fn set_feature(&mut self, index: usize, value: impl Into<String>) {
        if let Some(slot) = self.values.key_features.get_mut(index) {
            *slot = value.into();
        }
    }

    /// Appends an empty feature slot.
    pub fn add_feature(&mut self) {
        self.values.key_features.push(String::new());
    }

    /// Removes the feature at `index`. Out-of-range indices are ignored.
    pub fn remove_feature(&mut self, index: usize) {
        if index < self.values.key_features.len() {
            self.values.key_features.remove(index);
        }
    }

    /// Submission payload: the current values with whitespace-only features
    /// dropped.
    #[must_use]
    pub fn to_input(&self) -> GadgetInput {
        let mut input = self.values.clone();
        input.key_features.retain(|feature| !feature.trim().is_empty());
        input
    }

    /// Restores the blank form.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Parses the longest leading decimal number of `value`, with an optional
/// exponent, or `0.0`.
fn parse_number(value: &str) -> f64 {
    let trimmed = value.trim_start();
    let bytes = trimmed.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let mut seen_dot = false;
    while let Some(&b) = bytes.get(end) {
        match b {
            b'0'..=b'9' => end += 1,
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }

    // Shrink until the prefix parses, e.g. "5." or a lone sign.
    (1..=end)
        .rev()
        .find_map(|len| trimmed[..len].parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}
