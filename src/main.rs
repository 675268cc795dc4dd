//! Procure command-line front end

use std::{
    io::{self, Write},
    time::Instant,
};

use anyhow::{Context, Result};
use tracing::info;

use procure::{
    allocation::{Allocator, build_program},
    catalog::{SharedCatalog, filter_suppliers},
    fixtures::load_catalog,
    report::{AllocationReport, write_suppliers},
    requests::AllocationRequest,
    solvers::GoodLpBackend,
};

use crate::config::{AllocateArgs, Command, Config};

mod config;
mod observability;

/// Procure entry point
pub fn main() -> Result<()> {
    let config = Config::load().unwrap_or_else(|err| err.exit());

    observability::init_subscriber(&config.logging)?;

    let catalog = load_catalog(&config.catalog)
        .with_context(|| format!("failed to load catalog {}", config.catalog.display()))?;

    info!(
        path = %config.catalog.display(),
        suppliers = catalog.len(),
        "catalog loaded"
    );

    let catalog = SharedCatalog::new(catalog);

    match config.command {
        Command::Suppliers { material } => list_suppliers(&catalog, material.as_deref()),
        Command::Allocate(args) => allocate(&catalog, &args),
    }
}

fn list_suppliers(catalog: &SharedCatalog, material: Option<&str>) -> Result<()> {
    let snapshot = catalog.snapshot();
    let out = io::stdout().lock();

    match material {
        Some(material) => write_suppliers(out, snapshot.matching(material).suppliers())?,
        None => write_suppliers(out, snapshot.iter().map(|(_, supplier)| supplier))?,
    }

    Ok(())
}

fn allocate(catalog: &SharedCatalog, args: &AllocateArgs) -> Result<()> {
    let request = AllocationRequest::new(
        &args.material,
        args.demand,
        args.min_quality,
        args.max_delivery,
    )?;

    let snapshot = catalog.snapshot();
    let mut out = io::stdout().lock();

    if args.show_model {
        let candidates = filter_suppliers(&snapshot, request.material())?;

        writeln!(out, "{}", build_program(&candidates, &request))?;
    }

    let start = Instant::now();

    let allocation = Allocator::<GoodLpBackend>::default().allocate(&snapshot, &request)?;

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "solve finished"
    );

    AllocationReport::new(&allocation, &request).write_to(&mut out)?;

    Ok(())
}
