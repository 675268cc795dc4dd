//! Procure
//!
//! Procure selects a cost-minimising mix of suppliers for a raw-material demand, subject to
//! per-supplier capacity and demand-weighted quality and delivery bounds, by solving a small
//! linear program.

pub mod allocation;
pub mod catalog;
pub mod fixtures;
pub mod prelude;
pub mod report;
pub mod requests;
pub mod solvers;
pub mod suppliers;
pub mod validation;
