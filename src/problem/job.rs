use crate::JobId;

/// A job to be placed in exactly one batch.
///
/// Jobs are created by [`Instance::add_job`](super::Instance::add_job) and never
/// mutated afterwards. Conflicts are not stored on the job; they live in the
/// instance's conflict graph keyed by [`JobId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Job {
    id: JobId,
    processing_time: u64,
    size: u64,
}

impl Job {
    pub(crate) fn new(id: JobId, processing_time: u64, size: u64) -> Self {
        Self {
            id,
            processing_time,
            size,
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    /// Time the job keeps its batch busy. A batch costs the maximum over its jobs.
    pub fn processing_time(&self) -> u64 {
        self.processing_time
    }

    /// Capacity the job consumes in its batch.
    pub fn size(&self) -> u64 {
        self.size
    }
}
