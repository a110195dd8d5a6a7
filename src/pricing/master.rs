//! Parameters a column generation master needs to set up its set-cover LP,
//! and conversion of a fixed integer solution back into a schedule.

use super::column::Column;
use super::error::PricingError;
use super::exclusion::ColumnId;
use super::is_one;
use crate::checker::Certificate;
use crate::problem::{Instance, ProblemVariant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveSense {
    Minimize,
    Maximize,
}

/// Shape of the master problem: one row per job that must be covered exactly
/// once, columns in `[0, 1]`, and the cost of the artificial column that keeps
/// the first LP feasible before any batch has been generated.
#[derive(Debug, Clone, PartialEq)]
pub struct MasterParameters {
    pub objective_sense: ObjectiveSense,
    pub number_of_rows: usize,
    pub row_lower_bounds: Vec<f64>,
    pub row_upper_bounds: Vec<f64>,
    pub row_coefficient_lower_bound: f64,
    pub row_coefficient_upper_bound: f64,
    pub column_lower_bound: f64,
    pub column_upper_bound: f64,
    pub dummy_column_objective_coefficient: f64,
}

impl MasterParameters {
    /// The dummy column costs more than any single batch: `max + 1` without
    /// conflicts, `2 * max` with them.
    pub fn for_instance(instance: &Instance) -> Self {
        let rows = instance.number_of_jobs();
        let longest = instance.max_processing_time().unwrap_or(0) as f64;
        let dummy = match instance.variant() {
            ProblemVariant::Plain => longest + 1.0,
            ProblemVariant::Conflicts => 2.0 * longest,
        };

        Self {
            objective_sense: ObjectiveSense::Minimize,
            number_of_rows: rows,
            row_lower_bounds: vec![1.0; rows],
            row_upper_bounds: vec![1.0; rows],
            row_coefficient_lower_bound: 0.0,
            row_coefficient_upper_bound: 1.0,
            column_lower_bound: 0.0,
            column_upper_bound: 1.0,
            dummy_column_objective_coefficient: dummy,
        }
    }
}

/// Turns the columns fixed to 1 into a schedule, one batch per column.
///
/// Pairs with any other value are skipped.
///
/// # Errors
///
/// `UnknownColumn` if a pair names a column outside `columns`.
pub fn to_certificate(
    columns: &[Column],
    fixed_columns: &[(ColumnId, f64)],
) -> Result<Certificate, PricingError> {
    let mut batches = Vec::new();
    for &(column_id, value) in fixed_columns {
        let column = columns.get(column_id).ok_or(PricingError::UnknownColumn {
            column: column_id,
            available: columns.len(),
        })?;
        if is_one(value) {
            batches.push(column.jobs().collect());
        }
    }
    Ok(Certificate::new(batches))
}
