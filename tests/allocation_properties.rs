//! Integration tests for supplier allocation.
//!
//! Every solved allocation is checked against the formulation:
//!
//! 1. quantities sum to the demand
//! 2. each quantity lies within `[0, capacity]`
//! 3. demand-weighted quality is at least the minimum
//! 4. demand-weighted delivery is at most the maximum
//! 5. no feasible allocation is cheaper (checked by grid search on small instances)

use testresult::TestResult;

use procure::{
    allocation::{AllocationError, AllocationResult, Allocator, solve_allocation},
    catalog::{Catalog, filter_suppliers},
    requests::AllocationRequest,
    solvers::GoodLpBackend,
    suppliers::{Supplier, SupplyTerms},
    validation::InputError,
};

const EPS: f64 = 1e-6;

fn supplier(
    name: &str,
    material: &str,
    cost: f64,
    quality: f64,
    delivery: f64,
    capacity: f64,
) -> Result<Supplier, InputError> {
    Supplier::new(
        name,
        material,
        &format!("{name} depot"),
        SupplyTerms {
            cost,
            quality,
            delivery,
            capacity,
        },
    )
}

fn assert_feasible(result: &AllocationResult<'_>, request: &AllocationRequest) {
    let demand = request.total_demand();
    let tolerance = EPS * demand.max(1.0);

    assert!(
        (result.allocated_total() - demand).abs() <= tolerance,
        "allocated {} of {demand}",
        result.allocated_total()
    );

    for line in result.quantities() {
        assert!(
            line.quantity >= 0.0 && line.quantity <= line.supplier.capacity(),
            "{} assigned {} with capacity {}",
            line.supplier.name(),
            line.quantity,
            line.supplier.capacity()
        );
    }

    assert!(
        result.weighted_quality() >= request.min_quality() - EPS,
        "weighted quality {} below {}",
        result.weighted_quality(),
        request.min_quality()
    );
    assert!(
        result.weighted_delivery() <= request.max_delivery() + EPS,
        "weighted delivery {} above {}",
        result.weighted_delivery(),
        request.max_delivery()
    );

    let cost: f64 = result.quantities().iter().map(|line| line.line_cost()).sum();

    assert!(
        (cost - result.total_cost()).abs() <= EPS * cost.abs().max(1.0),
        "total cost {} does not match line costs {cost}",
        result.total_cost()
    );
}

/// Cheapest feasible point on a grid over three suppliers (the third takes the remainder).
fn grid_minimum(suppliers: &[Supplier; 3], request: &AllocationRequest, step: f64) -> Option<f64> {
    let [a, b, c] = suppliers;
    let demand = request.total_demand();
    let mut best: Option<f64> = None;

    let mut x = 0.0;
    while x <= a.capacity() + 1e-12 {
        let mut y = 0.0;

        while y <= b.capacity() + 1e-12 {
            let z = demand - x - y;

            if z >= -1e-12 && z <= c.capacity() + 1e-12 {
                let quality = a.quality() * x + b.quality() * y + c.quality() * z;
                let delivery = a.delivery() * x + b.delivery() * y + c.delivery() * z;

                if quality >= request.min_quality() * demand - 1e-9
                    && delivery <= request.max_delivery() * demand + 1e-9
                {
                    let cost = a.cost() * x + b.cost() * y + c.cost() * z;
                    best = Some(best.map_or(cost, |current| current.min(cost)));
                }
            }

            y += step;
        }

        x += step;
    }

    best
}

#[test]
fn example_scenario_mixes_both_suppliers_at_minimum_cost() -> TestResult {
    let catalog = Catalog::with_suppliers([
        supplier("A", "Crops", 5.0, 7.0, 2.0, 100.0)?,
        supplier("B", "Crops", 4.0, 9.0, 3.0, 50.0)?,
    ])?;
    let request = AllocationRequest::new("Crops", 80.0, 7.5, 2.5)?;

    let allocation = Allocator::<GoodLpBackend>::default().allocate(&catalog, &request)?;

    assert_feasible(&allocation.result, &request);
    assert!((allocation.result.total_cost() - 360.0).abs() < EPS);

    // A and B both take 40; the cheaper supplier wins the tie.
    assert_eq!(allocation.summary.best_supplier, "B");
    assert!((allocation.summary.order_quantity - 40.0).abs() < EPS);
    assert!((allocation.summary.cost_per_unit - 4.0).abs() < f64::EPSILON);
    assert_eq!(allocation.summary.location, "B depot");
    assert!((allocation.summary.delivery_time - 3.0).abs() < f64::EPSILON);

    Ok(())
}

#[test]
fn single_supplier_takes_the_whole_demand() -> TestResult {
    let catalog = Catalog::with_suppliers([
        supplier("HarvestHorizon", "Crops", 5.0, 7.0, 2.0, 100.0)?,
        supplier("IronRidge", "Ore", 1.0, 10.0, 1.0, 1000.0)?,
    ])?;
    let request = AllocationRequest::new("Crops", 60.0, 5.0, 3.0)?;

    let allocation = Allocator::<GoodLpBackend>::default().allocate(&catalog, &request)?;

    assert_feasible(&allocation.result, &request);
    assert_eq!(allocation.result.quantities().len(), 1);
    assert_eq!(allocation.summary.best_supplier, "HarvestHorizon");
    assert!((allocation.summary.order_quantity - 60.0).abs() < EPS);
    assert!((allocation.summary.total_cost - 300.0).abs() < EPS);

    Ok(())
}

#[test]
fn cheapest_supplier_is_filled_first_when_bounds_are_loose() -> TestResult {
    let catalog = Catalog::with_suppliers([
        supplier("Dear", "Crops", 9.0, 5.0, 1.0, 100.0)?,
        supplier("Cheap", "Crops", 2.0, 5.0, 1.0, 30.0)?,
        supplier("Middle", "Crops", 4.0, 5.0, 1.0, 40.0)?,
    ])?;
    let request = AllocationRequest::new("Crops", 90.0, 0.0, 10.0)?;

    let allocation = Allocator::<GoodLpBackend>::default().allocate(&catalog, &request)?;
    let result = &allocation.result;

    assert_feasible(result, &request);
    assert!((result.quantity_for("Cheap").unwrap_or_default() - 30.0).abs() < EPS);
    assert!((result.quantity_for("Middle").unwrap_or_default() - 40.0).abs() < EPS);
    assert!((result.quantity_for("Dear").unwrap_or_default() - 20.0).abs() < EPS);
    assert!((result.total_cost() - (60.0 + 160.0 + 180.0)).abs() < EPS);
    assert_eq!(allocation.summary.best_supplier, "Middle");

    Ok(())
}

#[test]
fn no_feasible_grid_point_beats_the_solver() -> TestResult {
    let instances: [([(f64, f64, f64, f64); 3], (f64, f64, f64)); 4] = [
        (
            [(5.0, 7.0, 2.0, 100.0), (4.0, 9.0, 3.0, 50.0), (6.0, 8.0, 1.0, 60.0)],
            (80.0, 7.5, 2.5),
        ),
        (
            [(3.0, 4.0, 5.0, 40.0), (7.0, 9.0, 2.0, 40.0), (5.0, 6.0, 3.0, 40.0)],
            (60.0, 6.5, 3.5),
        ),
        (
            [(1.0, 2.0, 9.0, 50.0), (8.0, 10.0, 1.0, 50.0), (4.0, 6.0, 4.0, 20.0)],
            (70.0, 6.0, 5.0),
        ),
        (
            [(2.0, 5.0, 2.0, 30.0), (2.0, 5.0, 2.0, 30.0), (3.0, 8.0, 1.0, 30.0)],
            (45.0, 6.0, 1.8),
        ),
    ];

    for (terms, (demand, min_quality, max_delivery)) in instances {
        let [(c0, q0, d0, k0), (c1, q1, d1, k1), (c2, q2, d2, k2)] = terms;

        let suppliers = [
            supplier("S0", "Crops", c0, q0, d0, k0)?,
            supplier("S1", "Crops", c1, q1, d1, k1)?,
            supplier("S2", "Crops", c2, q2, d2, k2)?,
        ];

        let catalog = Catalog::with_suppliers(suppliers.clone())?;
        let request = AllocationRequest::new("Crops", demand, min_quality, max_delivery)?;
        let candidates = filter_suppliers(&catalog, "Crops")?;

        let result = solve_allocation(&candidates, &request, &GoodLpBackend)?;

        assert_feasible(&result, &request);

        let grid_best = grid_minimum(&suppliers, &request, 0.5).ok_or("grid found no point")?;

        assert!(
            result.total_cost() <= grid_best + 1e-6,
            "solver cost {} exceeds grid cost {grid_best}",
            result.total_cost()
        );
    }

    Ok(())
}

#[test]
fn demand_above_total_capacity_is_infeasible() -> TestResult {
    let catalog = Catalog::with_suppliers([
        supplier("A", "Crops", 5.0, 7.0, 2.0, 100.0)?,
        supplier("B", "Crops", 4.0, 9.0, 3.0, 50.0)?,
    ])?;
    let request = AllocationRequest::new("Crops", 150.5, 0.0, 100.0)?;

    let result = Allocator::<GoodLpBackend>::default().allocate(&catalog, &request);

    assert!(matches!(result, Err(AllocationError::Infeasible)));

    Ok(())
}

#[test]
fn unreachable_quality_is_infeasible() -> TestResult {
    let catalog = Catalog::with_suppliers([
        supplier("A", "Crops", 5.0, 7.0, 2.0, 100.0)?,
        supplier("B", "Crops", 4.0, 9.0, 3.0, 50.0)?,
    ])?;

    // B alone cannot cover 80, so the average can never reach 9.
    let request = AllocationRequest::new("Crops", 80.0, 9.0, 10.0)?;

    let result = Allocator::<GoodLpBackend>::default().allocate(&catalog, &request);

    assert!(matches!(result, Err(AllocationError::Infeasible)));

    Ok(())
}

#[test]
fn incompatible_quality_and_delivery_are_infeasible() -> TestResult {
    let catalog = Catalog::with_suppliers([
        supplier("A", "Crops", 5.0, 7.0, 2.0, 100.0)?,
        supplier("B", "Crops", 4.0, 9.0, 3.0, 50.0)?,
    ])?;

    // Quality needs B >= 40 of 80, delivery allows B <= 16.
    let request = AllocationRequest::new("Crops", 80.0, 8.0, 2.2)?;

    let result = Allocator::<GoodLpBackend>::default().allocate(&catalog, &request);

    assert!(matches!(result, Err(AllocationError::Infeasible)));

    Ok(())
}

#[test]
fn absent_material_reports_no_matching_suppliers() -> TestResult {
    let catalog = Catalog::with_suppliers([supplier("A", "Crops", 5.0, 7.0, 2.0, 100.0)?])?;
    let request = AllocationRequest::new("Timber", 10.0, 0.0, 10.0)?;

    let result = Allocator::<GoodLpBackend>::default().allocate(&catalog, &request);

    assert!(matches!(
        result,
        Err(AllocationError::NoMatchingSuppliers { material }) if material == "Timber"
    ));

    Ok(())
}

#[test]
fn empty_catalog_reports_no_matching_suppliers() -> TestResult {
    let catalog = Catalog::new();
    let request = AllocationRequest::new("Crops", 10.0, 0.0, 10.0)?;

    let result = Allocator::<GoodLpBackend>::default().allocate(&catalog, &request);

    assert!(matches!(
        result,
        Err(AllocationError::NoMatchingSuppliers { .. })
    ));

    Ok(())
}

#[test]
fn zero_demand_is_rejected_before_solving() {
    let result = AllocationRequest::new("Crops", 0.0, 7.5, 2.5).map_err(AllocationError::from);

    assert!(matches!(
        result,
        Err(AllocationError::InvalidInput(InputError::OutOfRange {
            field: "total_demand",
            ..
        }))
    ));
}

#[test]
fn zero_capacity_supplier_is_assigned_nothing() -> TestResult {
    let catalog = Catalog::with_suppliers([
        supplier("Idle", "Crops", 0.5, 10.0, 0.5, 0.0)?,
        supplier("Busy", "Crops", 5.0, 7.0, 2.0, 100.0)?,
    ])?;
    let request = AllocationRequest::new("Crops", 25.0, 6.0, 3.0)?;

    let allocation = Allocator::<GoodLpBackend>::default().allocate(&catalog, &request)?;

    assert_feasible(&allocation.result, &request);
    assert!(allocation.result.quantity_for("Idle").unwrap_or(f64::NAN).abs() < EPS);
    assert_eq!(allocation.summary.best_supplier, "Busy");

    Ok(())
}
