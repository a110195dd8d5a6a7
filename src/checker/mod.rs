//! Independent audit of a finished schedule.
//!
//! [`check`] recomputes the makespan from scratch and counts every way a
//! certificate can violate the instance. It never fails: infeasibility is part
//! of the report.

mod certificate;
mod error;
mod report;

pub use certificate::Certificate;
pub use error::CertificateError;
pub use report::CheckReport;

use crate::problem::Instance;
use fixedbitset::FixedBitSet;
use std::collections::HashSet;
use std::path::Path;

/// Checks `certificate` against `instance`.
///
/// Ids that are not jobs of the instance are counted in
/// [`CheckReport::unknown_job_count`] and otherwise ignored. An empty batch
/// costs nothing.
///
/// # Example
///
/// ```
/// use batchsched::checker::{check, Certificate};
/// use batchsched::problem::Instance;
///
/// let mut instance = Instance::new(10).unwrap();
/// instance.add_job(4, 6).unwrap();
/// instance.add_job(3, 5).unwrap();
///
/// let report = check(&instance, &Certificate::new(vec![vec![0], vec![1]]));
/// assert_eq!(report.outcome(), (true, 7));
/// ```
pub fn check(instance: &Instance, certificate: &Certificate) -> CheckReport {
    let number_of_jobs = instance.number_of_jobs();
    let mut scheduled = FixedBitSet::with_capacity(number_of_jobs);
    let mut unknown = HashSet::new();
    let mut occurrences = 0usize;
    let mut unknown_job_count = 0usize;

    let mut makespan = 0u64;
    let mut overweight_count = 0usize;
    let mut conflict_count = 0usize;

    for batch in certificate.batches() {
        let mut longest = 0u64;
        let mut size = 0u64;
        let mut known = Vec::with_capacity(batch.len());

        for &id in batch {
            occurrences += 1;
            match instance.job(id) {
                Some(job) => {
                    scheduled.insert(id);
                    longest = longest.max(job.processing_time());
                    size = size.saturating_add(job.size());
                    known.push(id);
                }
                None => {
                    unknown_job_count += 1;
                    unknown.insert(id);
                }
            }
        }

        makespan = makespan.saturating_add(longest);
        if size > instance.batch_capacity() {
            overweight_count += 1;
        }
        for (position, &first) in known.iter().enumerate() {
            conflict_count += known[position + 1..]
                .iter()
                .filter(|&&second| instance.are_conflicting(first, second))
                .count();
        }
    }

    let scheduled_job_count = scheduled.count_ones(..);
    let duplicate_count = occurrences - scheduled_job_count - unknown.len();
    let is_feasible = scheduled_job_count == number_of_jobs
        && duplicate_count == 0
        && overweight_count == 0
        && conflict_count == 0
        && unknown_job_count == 0;

    CheckReport {
        makespan,
        number_of_batches: certificate.number_of_batches(),
        scheduled_job_count,
        number_of_jobs,
        duplicate_count,
        overweight_count,
        conflict_count,
        unknown_job_count,
        is_feasible,
    }
}

/// Loads a certificate file, checks it and logs the report.
pub fn check_file(
    instance: &Instance,
    path: impl AsRef<Path>,
) -> Result<CheckReport, CertificateError> {
    let path = path.as_ref();
    let certificate = Certificate::load(path)?;
    let report = check(instance, &certificate);
    tracing::info!(
        path = %path.display(),
        feasible = report.is_feasible,
        makespan = report.makespan,
        batches = report.number_of_batches,
        duplicates = report.duplicate_count,
        overweight = report.overweight_count,
        conflicts = report.conflict_count,
        unknown = report.unknown_job_count,
        "Checked certificate"
    );
    Ok(report)
}
