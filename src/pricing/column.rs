use super::error::ColumnError;
use super::is_one;
use crate::problem::Instance;
use crate::JobId;
use serde::{Deserialize, Serialize};

/// A batch offered to the master problem: one unit coefficient per covered job
/// row, and the batch cost as objective coefficient.
///
/// Columns built with [`Column::from_jobs`] have strictly ascending row indices,
/// all coefficients equal to 1 and cost `max(processing_time)` of their jobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub row_indices: Vec<JobId>,
    pub row_coefficients: Vec<f64>,
    pub objective_coefficient: f64,
}

impl Column {
    /// Builds the column for batching `jobs` together.
    ///
    /// Duplicate ids are merged and the rows sorted, so the result does not
    /// depend on the order of `jobs`.
    ///
    /// # Errors
    ///
    /// - `EmptyColumn` if `jobs` is empty
    /// - `UnknownJob` if an id is not a job of `instance`
    pub fn from_jobs(instance: &Instance, jobs: &[JobId]) -> Result<Self, ColumnError> {
        if jobs.is_empty() {
            return Err(ColumnError::EmptyColumn);
        }

        let mut row_indices = jobs.to_vec();
        row_indices.sort_unstable();
        row_indices.dedup();

        let mut cost = 0u64;
        for &id in &row_indices {
            let job = instance.job(id).ok_or(ColumnError::UnknownJob(id))?;
            cost = cost.max(job.processing_time());
        }

        Ok(Self {
            row_coefficients: vec![1.0; row_indices.len()],
            row_indices,
            objective_coefficient: cost as f64,
        })
    }

    pub fn len(&self) -> usize {
        self.row_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_indices.is_empty()
    }

    /// Rows whose coefficient is 1, i.e. the jobs this batch contains.
    pub fn jobs(&self) -> impl Iterator<Item = JobId> + '_ {
        self.row_indices
            .iter()
            .zip(self.row_coefficients.iter())
            .filter(|(_, coefficient)| is_one(**coefficient))
            .map(|(&row, _)| row)
    }

    /// `cost - sum(duals of covered rows)`. Negative columns improve the master.
    ///
    /// Rows without a dual price contribute nothing.
    pub fn reduced_cost(&self, duals: &[f64]) -> f64 {
        let covered: f64 = self
            .row_indices
            .iter()
            .zip(self.row_coefficients.iter())
            .map(|(&row, &coefficient)| duals.get(row).copied().unwrap_or(0.0) * coefficient)
            .sum();
        self.objective_coefficient - covered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance() -> Instance {
        let mut instance = Instance::new(100).unwrap();
        instance.add_job(5, 10).unwrap();
        instance.add_job(9, 20).unwrap();
        instance.add_job(2, 30).unwrap();
        instance
    }

    #[test]
    fn test_column_cost_is_max_processing_time() {
        let column = Column::from_jobs(&instance(), &[2, 0]).unwrap();
        assert_eq!(column.row_indices, vec![0, 2]);
        assert_eq!(column.row_coefficients, vec![1.0, 1.0]);
        assert_eq!(column.objective_coefficient, 5.0);
    }

    #[test]
    fn test_column_is_deterministic() {
        let instance = instance();
        let a = Column::from_jobs(&instance, &[1, 2, 0, 2]).unwrap();
        let b = Column::from_jobs(&instance, &[0, 1, 2]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
        assert_eq!(a.objective_coefficient, 9.0);
    }

    #[test]
    fn test_empty_subset_is_rejected() {
        assert_eq!(
            Column::from_jobs(&instance(), &[]),
            Err(ColumnError::EmptyColumn)
        );
    }

    #[test]
    fn test_unknown_job_is_rejected() {
        assert_eq!(
            Column::from_jobs(&instance(), &[0, 3]),
            Err(ColumnError::UnknownJob(3))
        );
    }

    #[test]
    fn test_reduced_cost() {
        let column = Column::from_jobs(&instance(), &[0, 1]).unwrap();
        assert!((column.reduced_cost(&[4.0, 7.5, 100.0]) + 2.5).abs() < 1e-12);
        assert!((column.reduced_cost(&[]) - 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_jobs_skips_zero_coefficients() {
        let column = Column {
            row_indices: vec![0, 1, 2],
            row_coefficients: vec![1.0, 0.0, 1.0],
            objective_coefficient: 5.0,
        };
        assert_eq!(column.jobs().collect::<Vec<_>>(), vec![0, 2]);
    }
}
