//! Procure prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    allocation::{
        Allocation, AllocationError, AllocationResult, AllocationSummary, Allocator,
        SupplierQuantity, build_program, solve_allocation,
    },
    catalog::{Candidates, Catalog, CatalogError, SharedCatalog, filter_suppliers},
    fixtures::{CatalogFixture, FixtureError, load_catalog},
    report::{AllocationReport, ReportError, write_suppliers},
    requests::{AllocationRequest, RequestForm},
    solvers::{GoodLpBackend, LinearProgram, LpBackend, LpSolution, SolverError},
    suppliers::{Supplier, SupplierForm, SupplierKey, SupplyTerms},
    validation::InputError,
};
