use super::column::Column;
use super::error::PricingError;
use super::is_one;
use crate::JobId;
use fixedbitset::FixedBitSet;

/// Index of a column in the master problem's column list.
pub type ColumnId = usize;

/// Jobs already covered by columns the caller has fixed to 1.
///
/// One bit per job; rebuilt from scratch by every [`initialize`](Self::initialize).
#[derive(Debug, Clone, Default)]
pub struct ExclusionState {
    excluded: FixedBitSet,
}

impl ExclusionState {
    /// Creates a state of width `number_of_jobs` with nothing excluded.
    pub fn new(number_of_jobs: usize) -> Self {
        Self {
            excluded: FixedBitSet::with_capacity(number_of_jobs),
        }
    }

    /// Rebuilds the state from the fixed `(column, value)` pairs.
    ///
    /// Only pairs whose value is 1 exclude anything; they exclude every row of
    /// the column with coefficient 1. On error the state is left empty.
    ///
    /// # Errors
    ///
    /// - `UnknownColumn` if a pair names a column outside `columns`
    /// - `MalformedColumn` if a fixed column's index and coefficient lists differ in length
    /// - `RowOutOfRange` if a fixed column covers a row `>= number_of_jobs`
    pub fn initialize(
        &mut self,
        number_of_jobs: usize,
        columns: &[Column],
        fixed_columns: &[(ColumnId, f64)],
    ) -> Result<(), PricingError> {
        // Stays empty unless every pair is valid.
        self.excluded = FixedBitSet::with_capacity(number_of_jobs);
        let mut excluded = FixedBitSet::with_capacity(number_of_jobs);

        for &(column_id, value) in fixed_columns {
            let column = columns.get(column_id).ok_or(PricingError::UnknownColumn {
                column: column_id,
                available: columns.len(),
            })?;
            if !is_one(value) {
                continue;
            }
            if column.row_indices.len() != column.row_coefficients.len() {
                return Err(PricingError::MalformedColumn {
                    column: column_id,
                    indices: column.row_indices.len(),
                    coefficients: column.row_coefficients.len(),
                });
            }
            for row in column.jobs() {
                if row >= number_of_jobs {
                    return Err(PricingError::RowOutOfRange {
                        column: column_id,
                        row,
                        rows: number_of_jobs,
                    });
                }
                excluded.insert(row);
            }
        }

        self.excluded = excluded;
        Ok(())
    }

    /// O(1). Ids outside the state's width are never excluded.
    pub fn is_excluded(&self, job: JobId) -> bool {
        job < self.excluded.len() && self.excluded.contains(job)
    }

    pub fn excluded_count(&self) -> usize {
        self.excluded.count_ones(..)
    }

    pub fn excluded_jobs(&self) -> impl Iterator<Item = JobId> + '_ {
        self.excluded.ones()
    }
}
