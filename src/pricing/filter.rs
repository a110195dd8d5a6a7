//! Selection of the jobs worth pricing.
//!
//! A job with a non-positive dual can be dropped from any batch without
//! raising its reduced cost: its profit enters additively, while the batch cost
//! is a maximum over the remaining jobs and can only stay equal or shrink. The
//! filter is therefore exact, not a heuristic.

use super::error::PricingError;
use super::exclusion::ExclusionState;
use crate::problem::Instance;
use crate::JobId;

/// A job that may enter a new batch, with its dual price as profit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub job_id: JobId,
    pub processing_time: u64,
    pub size: u64,
    pub profit: f64,
}

/// Returns the jobs with a strictly positive dual that are not excluded, in id order.
///
/// `NaN` duals count as non-positive.
///
/// # Errors
///
/// `DualLengthMismatch` unless there is exactly one dual per job.
pub fn candidates(
    instance: &Instance,
    duals: &[f64],
    exclusion: &ExclusionState,
) -> Result<Vec<Candidate>, PricingError> {
    if duals.len() != instance.number_of_jobs() {
        return Err(PricingError::DualLengthMismatch {
            expected: instance.number_of_jobs(),
            actual: duals.len(),
        });
    }

    Ok(instance
        .jobs()
        .iter()
        .zip(duals.iter())
        .filter(|&(job, &dual)| dual > 0.0 && !exclusion.is_excluded(job.id()))
        .map(|(job, &dual)| Candidate {
            job_id: job.id(),
            processing_time: job.processing_time(),
            size: job.size(),
            profit: dual,
        })
        .collect())
}
