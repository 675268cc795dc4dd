//! Allocation Report

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{allocation::Allocation, requests::AllocationRequest, suppliers::Supplier};

/// Errors that can occur when writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Printable view of an allocation and the request it answers.
#[derive(Debug, Clone, Copy)]
pub struct AllocationReport<'r, 'a> {
    allocation: &'r Allocation<'a>,
    request: &'r AllocationRequest,
}

impl<'r, 'a> AllocationReport<'r, 'a> {
    /// Create a report.
    pub fn new(allocation: &'r Allocation<'a>, request: &'r AllocationRequest) -> Self {
        Self {
            allocation,
            request,
        }
    }

    /// Write the per-supplier table followed by the summary.
    ///
    /// # Errors
    ///
    /// Returns a [`ReportError`] if writing fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReportError> {
        let mut builder = Builder::default();

        builder.push_record([
            "Supplier",
            "Location",
            "Unit Cost",
            "Quality",
            "Delivery",
            "Capacity",
            "Quantity",
            "Line Cost",
        ]);

        let mut best_row = None;

        for (idx, line) in self.allocation.result.quantities().iter().enumerate() {
            if line.supplier.name() == self.allocation.summary.best_supplier {
                best_row = Some(idx + 1);
            }

            builder.push_record([
                line.supplier.name().to_string(),
                line.supplier.location().to_string(),
                format!("{:.2}", line.supplier.cost()),
                format!("{:.2}", line.supplier.quality()),
                format!("{:.2}", line.supplier.delivery()),
                format!("{:.2}", line.supplier.capacity()),
                format!("{:.2}", line.quantity),
                format!("{:.2}", line.line_cost()),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..), Alignment::right());

        if let Some(row) = best_row {
            table.modify((row, 0), Color::FG_GREEN);
        }

        writeln!(out, "\n{table}\n")?;

        self.write_summary(&mut out)
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReportError> {
        let summary = &self.allocation.summary;
        let result = &self.allocation.result;

        let lines = [
            ("Best supplier", summary.best_supplier.to_string()),
            ("Order quantity", format!("{:.2}", summary.order_quantity)),
            ("Cost per unit", format!("{:.2}", summary.cost_per_unit)),
            ("Location", summary.location.to_string()),
            ("Delivery time", format!("{:.2}", summary.delivery_time)),
            ("Total cost", format!("{:.2}", summary.total_cost)),
            (
                "Weighted quality",
                format!(
                    "{:.2} (min {:.2})",
                    result.weighted_quality(),
                    self.request.min_quality()
                ),
            ),
            (
                "Weighted delivery",
                format!(
                    "{:.2} (max {:.2})",
                    result.weighted_delivery(),
                    self.request.max_delivery()
                ),
            ),
        ];

        let width = lines
            .iter()
            .map(|(label, _)| label.len() + 1)
            .max()
            .unwrap_or_default();

        for (label, value) in lines {
            writeln!(out, " {:<width$} {value}", format!("{label}:"))?;
        }

        Ok(())
    }
}

/// Write a table of suppliers in the order given.
///
/// # Errors
///
/// Returns a [`ReportError`] if writing fails.
pub fn write_suppliers<'s>(
    mut out: impl io::Write,
    suppliers: impl IntoIterator<Item = &'s Supplier>,
) -> Result<(), ReportError> {
    let mut builder = Builder::default();

    builder.push_record([
        "Supplier", "Material", "Location", "Unit Cost", "Quality", "Delivery", "Capacity",
    ]);

    for supplier in suppliers {
        builder.push_record([
            supplier.name().to_string(),
            supplier.material().to_string(),
            supplier.location().to_string(),
            format!("{:.2}", supplier.cost()),
            format!("{:.2}", supplier.quality()),
            format!("{:.2}", supplier.delivery()),
            format!("{:.2}", supplier.capacity()),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..), Alignment::right());

    writeln!(out, "\n{table}\n")?;

    Ok(())
}
