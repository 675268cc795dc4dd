//! Supplier Allocation
//!
//! Formulates the supplier mix as a linear program:
//!
//! ```text
//! minimise    sum(cost_i * x_i)
//! subject to  sum(x_i)             == total_demand
//!             sum(quality_i * x_i) >= min_quality * total_demand
//!             sum(delivery_i * x_i) <= max_delivery * total_demand
//!             0 <= x_i <= capacity_i
//! ```
//!
//! The weighted-average bounds are multiplied through by `total_demand`, which is a fixed
//! parameter, so every row stays linear. Every variable has finite bounds and every cost is
//! non-negative, so the program is never unbounded; it is either infeasible or has an optimum.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    catalog::{Candidates, Catalog, filter_suppliers},
    requests::AllocationRequest,
    solvers::{GoodLpBackend, LinearProgram, LpBackend, SolverError, scaled_tolerance},
    suppliers::{Supplier, SupplierKey},
    validation::InputError,
};

pub mod selection;

pub use selection::AllocationSummary;

/// Allocation Errors
#[derive(Debug, Error)]
pub enum AllocationError {
    /// No supplier in the catalog provides the requested material.
    #[error("no matching suppliers found for raw material {material:?}")]
    NoMatchingSuppliers {
        /// Requested material
        material: String,
    },

    /// No allocation satisfies demand, capacity, quality and delivery together.
    #[error("no allocation satisfies the demand, capacity, quality and delivery constraints")]
    Infeasible,

    /// Request or supplier fields failed validation.
    #[error(transparent)]
    InvalidInput(#[from] InputError),

    /// Wrapped solver error
    #[error(transparent)]
    Solver(SolverError),

    /// The backend returned a solution that breaks the formulation (this is a bug).
    #[error("solver invariant violated: {message}")]
    InvariantViolation {
        /// What invariant was violated
        message: String,
    },
}

impl From<SolverError> for AllocationError {
    fn from(err: SolverError) -> Self {
        match err {
            SolverError::Infeasible => AllocationError::Infeasible,
            other => AllocationError::Solver(other),
        }
    }
}

/// Quantity assigned to one supplier.
#[derive(Debug, Clone, Copy)]
pub struct SupplierQuantity<'a> {
    /// Catalog key
    pub key: SupplierKey,

    /// Supplier the quantity is ordered from
    pub supplier: &'a Supplier,

    /// Order quantity, within `[0, capacity]`
    pub quantity: f64,
}

impl SupplierQuantity<'_> {
    /// Cost of this line (`quantity * cost`).
    pub fn line_cost(&self) -> f64 {
        self.quantity * self.supplier.cost()
    }
}

/// Optimal allocation of a demand across candidate suppliers.
#[derive(Debug, Clone)]
pub struct AllocationResult<'a> {
    quantities: SmallVec<[SupplierQuantity<'a>; 10]>,
    total_cost: f64,
    total_demand: f64,
}

impl<'a> AllocationResult<'a> {
    /// Per-supplier quantities, in catalog order. Suppliers assigned nothing are included.
    pub fn quantities(&self) -> &[SupplierQuantity<'a>] {
        &self.quantities
    }

    /// Quantity assigned to the named supplier, if it was a candidate.
    pub fn quantity_for(&self, name: &str) -> Option<f64> {
        self.quantities
            .iter()
            .find(|line| line.supplier.name() == name)
            .map(|line| line.quantity)
    }

    /// Quantities keyed by supplier name.
    pub fn quantities_by_name(&self) -> FxHashMap<&'a str, f64> {
        self.quantities
            .iter()
            .map(|line| (line.supplier.name(), line.quantity))
            .collect()
    }

    /// Objective value: `sum(cost_i * quantity_i)`.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Demand the allocation was solved for.
    pub fn total_demand(&self) -> f64 {
        self.total_demand
    }

    /// Sum of all assigned quantities. Equal to the demand within solver tolerance.
    pub fn allocated_total(&self) -> f64 {
        self.quantities.iter().map(|line| line.quantity).sum()
    }

    /// Demand-weighted average quality.
    pub fn weighted_quality(&self) -> f64 {
        self.weighted_average(Supplier::quality)
    }

    /// Demand-weighted average delivery time.
    pub fn weighted_delivery(&self) -> f64 {
        self.weighted_average(Supplier::delivery)
    }

    fn weighted_average(&self, attribute: fn(&Supplier) -> f64) -> f64 {
        let weighted: f64 = self
            .quantities
            .iter()
            .map(|line| attribute(line.supplier) * line.quantity)
            .sum();

        weighted / self.total_demand
    }
}

/// Build the linear program for allocating `request` across `candidates`.
///
/// Column `i` of the program is the `i`-th candidate in catalog order.
pub fn build_program(candidates: &Candidates<'_>, request: &AllocationRequest) -> LinearProgram {
    let demand = request.total_demand();
    let mut program = LinearProgram::new();

    for supplier in candidates.suppliers() {
        program.add_variable(supplier.name(), 0.0, supplier.capacity(), supplier.cost());
    }

    program.add_eq_constraint("demand", candidates.suppliers().map(|_| 1.0), demand);

    program.add_geq_constraint(
        "quality",
        candidates.suppliers().map(Supplier::quality),
        request.min_quality() * demand,
    );

    program.add_leq_constraint(
        "delivery",
        candidates.suppliers().map(Supplier::delivery),
        request.max_delivery() * demand,
    );

    program
}

/// Compute the minimum-cost allocation of `request` across `candidates`.
///
/// # Errors
///
/// - [`AllocationError::NoMatchingSuppliers`] if `candidates` is empty.
/// - [`AllocationError::Infeasible`] if no allocation satisfies every constraint.
/// - [`AllocationError::InvariantViolation`] if the backend returns values outside the
///   variable bounds or breaking a constraint.
/// - [`AllocationError::Solver`] for any other backend failure.
pub fn solve_allocation<'a, B: LpBackend + ?Sized>(
    candidates: &Candidates<'a>,
    request: &AllocationRequest,
    backend: &B,
) -> Result<AllocationResult<'a>, AllocationError> {
    if candidates.is_empty() {
        return Err(AllocationError::NoMatchingSuppliers {
            material: request.material().to_string(),
        });
    }

    let program = build_program(candidates, request);

    debug!(
        material = request.material(),
        candidates = candidates.len(),
        total_demand = request.total_demand(),
        "solving supplier allocation"
    );

    let solution = backend.solve(&program)?;

    if solution.values.len() != candidates.len() {
        return Err(AllocationError::InvariantViolation {
            message: format!(
                "backend returned {} values for {} suppliers",
                solution.values.len(),
                candidates.len()
            ),
        });
    }

    let quantities = candidates
        .iter()
        .zip(solution.values.iter().copied())
        .map(|((key, supplier), value)| {
            Ok(SupplierQuantity {
                key,
                supplier,
                quantity: clamp_to_capacity(supplier, value)?,
            })
        })
        .collect::<Result<SmallVec<[SupplierQuantity<'a>; 10]>, AllocationError>>()?;

    let values: SmallVec<[f64; 10]> = quantities.iter().map(|line| line.quantity).collect();

    for constraint in program.constraints() {
        if !constraint.is_satisfied(&values, scaled_tolerance(constraint.rhs)) {
            return Err(AllocationError::InvariantViolation {
                message: format!(
                    "{} constraint not satisfied: {} {} {}",
                    constraint.name,
                    constraint.lhs_value(&values),
                    constraint.relation.symbol(),
                    constraint.rhs
                ),
            });
        }
    }

    // Recomputed from the clamped quantities so the cost always matches what is reported.
    let total_cost = program.evaluate_objective(&values);

    debug!(
        total_cost,
        backend_objective = solution.objective,
        "supplier allocation solved"
    );

    Ok(AllocationResult {
        quantities,
        total_cost,
        total_demand: request.total_demand(),
    })
}

/// Snap solver noise back into `[0, capacity]`, rejecting anything further out.
fn clamp_to_capacity(supplier: &Supplier, value: f64) -> Result<f64, AllocationError> {
    let capacity = supplier.capacity();
    let tolerance = scaled_tolerance(capacity);

    if !value.is_finite() || value < -tolerance || value > capacity + tolerance {
        return Err(AllocationError::InvariantViolation {
            message: format!(
                "quantity {value} for supplier {:?} is outside [0, {capacity}]",
                supplier.name()
            ),
        });
    }

    Ok(value.clamp(0.0, capacity))
}

/// An allocation together with its summary.
#[derive(Debug, Clone)]
pub struct Allocation<'a> {
    /// Full per-supplier result
    pub result: AllocationResult<'a>,

    /// Supplier assigned the largest quantity
    pub summary: AllocationSummary<'a>,
}

/// Runs the filter, solve and selection steps for a request against a catalog.
#[derive(Debug, Default, Clone)]
pub struct Allocator<B = GoodLpBackend> {
    backend: B,
}

impl<B: LpBackend> Allocator<B> {
    /// Create an allocator using the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// The backend used for solving
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Allocate `request` across the suppliers of `catalog`.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::NoMatchingSuppliers`] when no supplier provides the
    /// material (the solver is not invoked), and otherwise any error of
    /// [`solve_allocation`].
    pub fn allocate<'c>(
        &self,
        catalog: &'c Catalog,
        request: &AllocationRequest,
    ) -> Result<Allocation<'c>, AllocationError> {
        let candidates = filter_suppliers(catalog, request.material()).inspect_err(|err| {
            warn!(material = request.material(), "{err}");
        })?;

        let result = solve_allocation(&candidates, request, &self.backend).inspect_err(|err| {
            warn!(material = request.material(), "{err}");
        })?;

        let summary = result
            .best_supplier()
            .ok_or_else(|| AllocationError::InvariantViolation {
                message: "allocation has no supplier to summarise".to_string(),
            })?;

        info!(
            material = request.material(),
            best_supplier = summary.best_supplier,
            order_quantity = summary.order_quantity,
            total_cost = summary.total_cost,
            "allocation complete"
        );

        Ok(Allocation { result, summary })
    }
}
