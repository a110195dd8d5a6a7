//! Column generation pricing for batch scheduling.
//!
//! A column is one batch. Given the master problem's dual prices, the
//! [`BatchPricingSolver`] finds a batch with negative reduced cost, or reports
//! that none exists. Columns the caller has fixed to 1 remove their jobs from
//! further pricing.
//!
//! ```text
//! initialize_pricing(columns, fixed) -> ExclusionState
//! solve_pricing(duals)
//!   -> filter::candidates        positive dual, not excluded
//!   -> knapsack (dp or search)   min max(width) - sum(profit)
//!   -> Column::from_jobs         at most one improving column
//! ```

mod column;
mod config;
mod error;
mod exclusion;
pub mod filter;
pub mod master;
mod oracle;

#[cfg(test)]
mod tests;

pub use column::Column;
pub use config::{PricingConfig, PricingStrategy};
pub use error::{ColumnError, PricingError};
pub use exclusion::{ColumnId, ExclusionState};
pub use filter::Candidate;
pub use master::{MasterParameters, ObjectiveSense};
pub use oracle::BatchPricingSolver;

/// Values within this distance of 1 count as 1 in fixed columns and coefficients.
pub const INTEGRALITY_TOLERANCE: f64 = 1e-5;

pub(crate) fn is_one(value: f64) -> bool {
    (value - 1.0).abs() < INTEGRALITY_TOLERANCE
}

/// The boundary between a column generation master and its pricing oracle.
pub trait PricingSolver {
    /// Records which columns the caller has fixed and at what value.
    ///
    /// Called before every pricing round in which the fixings may have changed.
    fn initialize_pricing(
        &mut self,
        columns: &[Column],
        fixed_columns: &[(ColumnId, f64)],
    ) -> Result<(), PricingError>;

    /// Returns improving columns for `duals`, one dual per row. An empty list
    /// means no improving column was found.
    fn solve_pricing(&mut self, duals: &[f64]) -> Result<Vec<Column>, PricingError>;
}
