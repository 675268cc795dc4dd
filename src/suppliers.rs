//! Suppliers

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::validation::{InputError, finite, non_empty, non_negative, parse_number};

new_key_type! {
    /// Supplier Key
    pub struct SupplierKey;
}

/// Per-unit terms a supplier offers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupplyTerms {
    /// Cost per unit
    pub cost: f64,

    /// Quality score per unit (higher is better)
    pub quality: f64,

    /// Delivery time per unit (lower is better)
    pub delivery: f64,

    /// Maximum quantity the supplier can provide
    pub capacity: f64,
}

impl SupplyTerms {
    /// Check that every term is finite, and that cost and capacity are non-negative.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] naming the first offending term.
    pub fn validate(self) -> Result<Self, InputError> {
        Ok(Self {
            cost: non_negative("cost", self.cost)?,
            quality: finite("quality", self.quality)?,
            delivery: finite("delivery", self.delivery)?,
            capacity: non_negative("capacity", self.capacity)?,
        })
    }
}

/// A candidate source of a raw material.
#[derive(Debug, Clone, PartialEq)]
pub struct Supplier {
    name: String,
    material: String,
    location: String,
    terms: SupplyTerms,
}

impl Supplier {
    /// Create a validated supplier.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if the name or material is blank, or any term is invalid.
    pub fn new(
        name: &str,
        material: &str,
        location: &str,
        terms: SupplyTerms,
    ) -> Result<Self, InputError> {
        Ok(Self {
            name: non_empty("name", name)?,
            material: non_empty("material", material)?,
            location: location.trim().to_string(),
            terms: terms.validate()?,
        })
    }

    /// Unique supplier name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw-material category supplied
    pub fn material(&self) -> &str {
        &self.material
    }

    /// Descriptive location, not used for optimisation
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Supply terms
    pub fn terms(&self) -> SupplyTerms {
        self.terms
    }

    /// Cost per unit
    pub fn cost(&self) -> f64 {
        self.terms.cost
    }

    /// Quality score per unit
    pub fn quality(&self) -> f64 {
        self.terms.quality
    }

    /// Delivery time per unit
    pub fn delivery(&self) -> f64 {
        self.terms.delivery
    }

    /// Maximum quantity
    pub fn capacity(&self) -> f64 {
        self.terms.capacity
    }
}

/// Raw text fields of an "add supplier" submission.
#[derive(Debug, Clone, Copy)]
pub struct SupplierForm<'a> {
    /// Supplier name
    pub supplier_name: &'a str,

    /// Raw-material category
    pub raw_material: &'a str,

    /// Cost per unit
    pub cost: &'a str,

    /// Quality score
    pub quality: &'a str,

    /// Delivery time
    pub delivery: &'a str,

    /// Capacity
    pub capacity: &'a str,

    /// Location
    pub location: &'a str,
}

impl TryFrom<SupplierForm<'_>> for Supplier {
    type Error = InputError;

    fn try_from(form: SupplierForm<'_>) -> Result<Self, Self::Error> {
        let terms = SupplyTerms {
            cost: parse_number("cost", form.cost)?,
            quality: parse_number("quality", form.quality)?,
            delivery: parse_number("delivery", form.delivery)?,
            capacity: parse_number("capacity", form.capacity)?,
        };

        Supplier::new(form.supplier_name, form.raw_material, form.location, terms)
    }
}
