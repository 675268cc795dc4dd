//! Best Supplier Selection

use crate::{
    allocation::{AllocationResult, SupplierQuantity},
    solvers::scaled_tolerance,
};

/// Summary of an allocation, centred on the supplier assigned the largest quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllocationSummary<'a> {
    /// Name of the supplier with the largest order quantity
    pub best_supplier: &'a str,

    /// Quantity ordered from the best supplier
    pub order_quantity: f64,

    /// Best supplier's cost per unit
    pub cost_per_unit: f64,

    /// Best supplier's location
    pub location: &'a str,

    /// Best supplier's delivery time
    pub delivery_time: f64,

    /// Total cost of the whole allocation
    pub total_cost: f64,
}

impl<'a> AllocationResult<'a> {
    /// Summarise the allocation around the supplier assigned the largest quantity.
    ///
    /// Quantities within solver tolerance of each other are treated as equal. Among
    /// equal quantities the lowest unit cost wins, and after that the supplier that
    /// comes first in the catalog.
    ///
    /// Returns `None` only when the allocation has no suppliers.
    pub fn best_supplier(&self) -> Option<AllocationSummary<'a>> {
        let tolerance = scaled_tolerance(self.total_demand);

        let best = self
            .quantities
            .iter()
            .fold(None, |best: Option<&SupplierQuantity<'a>>, candidate| {
                match best {
                    Some(current) if !outranks(candidate, current, tolerance) => Some(current),
                    _ => Some(candidate),
                }
            })?;

        Some(AllocationSummary {
            best_supplier: best.supplier.name(),
            order_quantity: best.quantity,
            cost_per_unit: best.supplier.cost(),
            location: best.supplier.location(),
            delivery_time: best.supplier.delivery(),
            total_cost: self.total_cost,
        })
    }
}

/// Whether `candidate` should replace `current` as the best supplier.
fn outranks(
    candidate: &SupplierQuantity<'_>,
    current: &SupplierQuantity<'_>,
    tolerance: f64,
) -> bool {
    let difference = candidate.quantity - current.quantity;

    if difference.abs() > tolerance {
        return difference > 0.0;
    }

    // Strict comparison keeps the earlier supplier on equal cost.
    candidate.supplier.cost() < current.supplier.cost()
}
