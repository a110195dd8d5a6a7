use serde::Serialize;
use std::fmt;

/// Audit of a certificate against an instance.
///
/// Every count is computed even when an earlier one already makes the
/// certificate infeasible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Sum over batches of the longest processing time in the batch.
    pub makespan: u64,
    pub number_of_batches: usize,
    /// Distinct known jobs that appear in some batch.
    pub scheduled_job_count: usize,
    pub number_of_jobs: usize,
    /// Job id occurrences beyond the first.
    pub duplicate_count: usize,
    /// Batches whose total size exceeds the capacity.
    pub overweight_count: usize,
    /// Conflicting pairs sharing a batch.
    pub conflict_count: usize,
    /// Occurrences of ids that are not jobs of the instance.
    pub unknown_job_count: usize,
    pub is_feasible: bool,
}

impl CheckReport {
    pub fn outcome(&self) -> (bool, u64) {
        (self.is_feasible, self.makespan)
    }

    pub fn unscheduled_job_count(&self) -> usize {
        self.number_of_jobs - self.scheduled_job_count
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of batches: {}", self.number_of_batches)?;
        writeln!(
            f,
            "Number of scheduled jobs: {} / {}",
            self.scheduled_job_count, self.number_of_jobs
        )?;
        writeln!(f, "Number of duplicates: {}", self.duplicate_count)?;
        writeln!(f, "Number of overweighted batches: {}", self.overweight_count)?;
        writeln!(f, "Number of conflict violations: {}", self.conflict_count)?;
        writeln!(f, "Number of unknown jobs: {}", self.unknown_job_count)?;
        writeln!(f, "Feasible: {}", self.is_feasible)?;
        write!(f, "Makespan: {}", self.makespan)
    }
}
