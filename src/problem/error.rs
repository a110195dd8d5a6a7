use crate::JobId;
use thiserror::Error;

/// Errors raised while building, loading or writing an [`Instance`](super::Instance).
#[derive(Debug, Error)]
pub enum InstanceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Also raised for fractional capacities, processing times or sizes.
    #[error("Invalid instance JSON (capacity, times and sizes must be integers): {0}")]
    Json(#[from] serde_json::Error),

    #[error("Batch capacity must be positive, got {0}")]
    NonPositiveCapacity(i64),

    #[error("Instance lists {processing_times} processing times but {sizes} sizes")]
    LengthMismatch {
        processing_times: usize,
        sizes: usize,
    },

    #[error("Job {job} has non-positive processing time {value}")]
    NonPositiveProcessingTime { job: JobId, value: i64 },

    #[error("Job {job} has non-positive size {value}")]
    NonPositiveSize { job: JobId, value: i64 },

    #[error("Conflict ({first}, {second}) references a job outside 0..{number_of_jobs}")]
    ConflictOutOfRange {
        first: i64,
        second: i64,
        number_of_jobs: usize,
    },

    #[error("Job {0} cannot conflict with itself")]
    SelfConflict(JobId),

    #[error("Unknown job id: {0}")]
    UnknownJob(JobId),
}

impl InstanceError {
    /// Returns true for errors describing a structurally malformed instance,
    /// as opposed to I/O or syntax failures or misuse of the builder API.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            InstanceError::NonPositiveCapacity(_)
                | InstanceError::LengthMismatch { .. }
                | InstanceError::NonPositiveProcessingTime { .. }
                | InstanceError::NonPositiveSize { .. }
                | InstanceError::ConflictOutOfRange { .. }
                | InstanceError::SelfConflict(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_mismatch_display() {
        let e = InstanceError::LengthMismatch {
            processing_times: 3,
            sizes: 2,
        };
        assert_eq!(
            e.to_string(),
            "Instance lists 3 processing times but 2 sizes"
        );
        assert!(e.is_malformed());
    }

    #[test]
    fn conflict_out_of_range_display() {
        let e = InstanceError::ConflictOutOfRange {
            first: 0,
            second: 7,
            number_of_jobs: 4,
        };
        assert_eq!(
            e.to_string(),
            "Conflict (0, 7) references a job outside 0..4"
        );
    }

    #[test]
    fn unknown_job_is_not_malformed() {
        assert!(!InstanceError::UnknownJob(3).is_malformed());
        assert!(InstanceError::NonPositiveCapacity(0).is_malformed());
    }
}
