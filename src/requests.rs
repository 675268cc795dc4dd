//! Allocation Requests

use crate::validation::{InputError, finite, non_empty, parse_number, positive};

/// One buyer's demand for a raw material.
///
/// Always valid once constructed: the material is non-empty, `total_demand` is finite
/// and strictly positive, and both bounds are finite.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationRequest {
    material: String,
    total_demand: f64,
    min_quality: f64,
    max_delivery: f64,
}

impl AllocationRequest {
    /// Create a validated request.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if the material is blank, `total_demand` is not strictly
    /// positive, or any number is NaN or infinite.
    pub fn new(
        material: &str,
        total_demand: f64,
        min_quality: f64,
        max_delivery: f64,
    ) -> Result<Self, InputError> {
        Ok(Self {
            material: non_empty("material", material)?,
            total_demand: positive("total_demand", total_demand)?,
            min_quality: finite("min_quality", min_quality)?,
            max_delivery: finite("max_delivery", max_delivery)?,
        })
    }

    /// Requested raw-material category
    pub fn material(&self) -> &str {
        &self.material
    }

    /// Required aggregate quantity
    pub fn total_demand(&self) -> f64 {
        self.total_demand
    }

    /// Minimum demand-weighted average quality
    pub fn min_quality(&self) -> f64 {
        self.min_quality
    }

    /// Maximum demand-weighted average delivery time
    pub fn max_delivery(&self) -> f64 {
        self.max_delivery
    }
}

/// Raw text fields of a customer demand submission.
#[derive(Debug, Clone, Copy)]
pub struct RequestForm<'a> {
    /// Raw-material category
    pub raw_material: &'a str,

    /// Total demand
    pub total_demand: &'a str,

    /// Minimum weighted quality
    pub min_quality: &'a str,

    /// Maximum weighted delivery time
    pub max_delivery: &'a str,
}

impl TryFrom<RequestForm<'_>> for AllocationRequest {
    type Error = InputError;

    fn try_from(form: RequestForm<'_>) -> Result<Self, Self::Error> {
        AllocationRequest::new(
            form.raw_material,
            parse_number("total_demand", form.total_demand)?,
            parse_number("min_quality", form.min_quality)?,
            parse_number("max_delivery", form.max_delivery)?,
        )
    }
}
