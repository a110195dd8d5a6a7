use super::error::InstanceError;
use super::job::Job;
use crate::JobId;
use petgraph::graphmap::UnGraphMap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Which family of batch scheduling problem an instance belongs to.
///
/// The variant decides whether a `conflicts` list is written back out and how
/// large the master problem's dummy column has to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemVariant {
    /// Capacity is the only batch constraint.
    Plain,
    /// Batches must also avoid co-locating conflicting jobs.
    Conflicts,
}

/// On-disk layout of an instance file.
///
/// Capacity, processing times and sizes are JSON integers. A fractional value
/// such as `3.5` fails deserialization and surfaces as [`InstanceError::Json`].
#[derive(Debug, Serialize, Deserialize)]
struct InstanceFile {
    batch_capacity: i64,
    #[serde(alias = "job_processing_time")]
    job_processing_times: Vec<i64>,
    job_sizes: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    conflicts: Option<Vec<(i64, i64)>>,
}

/// A batch scheduling instance: a batch capacity, jobs, and an optional
/// conflict graph.
///
/// # Invariants
///
/// - Job ids are the contiguous range `0..number_of_jobs()`, matching their position
/// - Capacity, processing times and sizes are strictly positive integers
/// - The conflict relation is symmetric and irreflexive
///
/// Instances are read-only once built and can be shared between pricing calls.
///
/// # Example
///
/// ```
/// use batchsched::problem::Instance;
///
/// let mut instance = Instance::new(10).unwrap();
/// let a = instance.add_job(4, 6).unwrap();
/// let b = instance.add_job(3, 5).unwrap();
/// instance.add_conflict(a, b).unwrap();
///
/// assert!(instance.are_conflicting(b, a));
/// assert_eq!(instance.max_processing_time(), Some(4));
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    batch_capacity: u64,
    jobs: Vec<Job>,
    conflicts: UnGraphMap<JobId, ()>,
    variant: ProblemVariant,
}

impl Instance {
    /// Creates an empty plain instance.
    ///
    /// # Errors
    ///
    /// Returns `NonPositiveCapacity` if `batch_capacity` is zero.
    pub fn new(batch_capacity: u64) -> Result<Self, InstanceError> {
        if batch_capacity == 0 {
            return Err(InstanceError::NonPositiveCapacity(0));
        }
        Ok(Self {
            batch_capacity,
            jobs: Vec::new(),
            conflicts: UnGraphMap::new(),
            variant: ProblemVariant::Plain,
        })
    }

    /// Creates an empty instance of the conflict variant.
    pub fn with_conflicts(batch_capacity: u64) -> Result<Self, InstanceError> {
        let mut instance = Self::new(batch_capacity)?;
        instance.variant = ProblemVariant::Conflicts;
        Ok(instance)
    }

    /// Loads an instance from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InstanceError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, InstanceError> {
        let raw: InstanceFile = serde_json::from_reader(reader)?;
        Self::from_file(raw)
    }

    pub fn from_json_str(json: &str) -> Result<Self, InstanceError> {
        let raw: InstanceFile = serde_json::from_str(json)?;
        Self::from_file(raw)
    }

    /// Validates the raw record completely before building anything.
    fn from_file(raw: InstanceFile) -> Result<Self, InstanceError> {
        if raw.batch_capacity <= 0 {
            return Err(InstanceError::NonPositiveCapacity(raw.batch_capacity));
        }
        if raw.job_processing_times.len() != raw.job_sizes.len() {
            return Err(InstanceError::LengthMismatch {
                processing_times: raw.job_processing_times.len(),
                sizes: raw.job_sizes.len(),
            });
        }

        let number_of_jobs = raw.job_sizes.len();
        let mut jobs = Vec::with_capacity(number_of_jobs);
        for (id, (&processing_time, &size)) in raw
            .job_processing_times
            .iter()
            .zip(raw.job_sizes.iter())
            .enumerate()
        {
            if processing_time <= 0 {
                return Err(InstanceError::NonPositiveProcessingTime {
                    job: id,
                    value: processing_time,
                });
            }
            if size <= 0 {
                return Err(InstanceError::NonPositiveSize { job: id, value: size });
            }
            jobs.push(Job::new(id, processing_time as u64, size as u64));
        }

        let mut conflicts = UnGraphMap::new();
        let variant = match raw.conflicts {
            Some(pairs) => {
                for (first, second) in pairs {
                    let in_range = |id: i64| id >= 0 && (id as u64) < number_of_jobs as u64;
                    if !in_range(first) || !in_range(second) {
                        return Err(InstanceError::ConflictOutOfRange {
                            first,
                            second,
                            number_of_jobs,
                        });
                    }
                    if first == second {
                        return Err(InstanceError::SelfConflict(first as JobId));
                    }
                    conflicts.add_edge(first as JobId, second as JobId, ());
                }
                ProblemVariant::Conflicts
            }
            None => ProblemVariant::Plain,
        };

        Ok(Self {
            batch_capacity: raw.batch_capacity as u64,
            jobs,
            conflicts,
            variant,
        })
    }

    fn to_file(&self) -> InstanceFile {
        let conflicts = match self.variant {
            ProblemVariant::Plain => None,
            ProblemVariant::Conflicts => Some(
                self.conflict_pairs()
                    .into_iter()
                    .map(|(a, b)| (a as i64, b as i64))
                    .collect(),
            ),
        };
        InstanceFile {
            batch_capacity: self.batch_capacity as i64,
            job_processing_times: self
                .jobs
                .iter()
                .map(|job| job.processing_time() as i64)
                .collect(),
            job_sizes: self.jobs.iter().map(|job| job.size() as i64).collect(),
            conflicts,
        }
    }

    /// Serializes the instance into the same JSON layout [`load`](Self::load) reads.
    pub fn to_json_string(&self) -> Result<String, InstanceError> {
        Ok(serde_json::to_string(&self.to_file())?)
    }

    pub fn write_to(&self, writer: impl Write) -> Result<(), InstanceError> {
        serde_json::to_writer(writer, &self.to_file())?;
        Ok(())
    }

    /// Writes the instance as JSON to `path`, replacing any existing file.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), InstanceError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Appends a job and returns its id, which is always the previous job count.
    ///
    /// # Errors
    ///
    /// `NonPositiveProcessingTime` or `NonPositiveSize` if either value is zero.
    pub fn add_job(&mut self, processing_time: u64, size: u64) -> Result<JobId, InstanceError> {
        let id = self.jobs.len();
        if processing_time == 0 {
            return Err(InstanceError::NonPositiveProcessingTime { job: id, value: 0 });
        }
        if size == 0 {
            return Err(InstanceError::NonPositiveSize { job: id, value: 0 });
        }
        self.jobs.push(Job::new(id, processing_time, size));
        Ok(id)
    }

    /// Records that `first` and `second` may not share a batch.
    ///
    /// Adding the same pair twice has no further effect. Any conflict turns the
    /// instance into the [`ProblemVariant::Conflicts`] variant.
    pub fn add_conflict(&mut self, first: JobId, second: JobId) -> Result<(), InstanceError> {
        for id in [first, second] {
            if id >= self.jobs.len() {
                return Err(InstanceError::UnknownJob(id));
            }
        }
        if first == second {
            return Err(InstanceError::SelfConflict(first));
        }
        self.conflicts.add_edge(first, second, ());
        self.variant = ProblemVariant::Conflicts;
        Ok(())
    }

    pub fn batch_capacity(&self) -> u64 {
        self.batch_capacity
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn job(&self, id: JobId) -> Option<&Job> {
        self.jobs.get(id)
    }

    pub fn number_of_jobs(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn variant(&self) -> ProblemVariant {
        self.variant
    }

    /// Jobs that may not share a batch with `id`. Empty for unknown ids.
    pub fn conflicting_jobs(&self, id: JobId) -> impl Iterator<Item = JobId> + '_ {
        self.conflicts.neighbors(id)
    }

    pub fn are_conflicting(&self, first: JobId, second: JobId) -> bool {
        self.conflicts.contains_edge(first, second)
    }

    /// All conflicts as `(min, max)` pairs in ascending order.
    pub fn conflict_pairs(&self) -> Vec<(JobId, JobId)> {
        let mut pairs: Vec<(JobId, JobId)> = self
            .conflicts
            .all_edges()
            .map(|(a, b, _)| (a.min(b), a.max(b)))
            .collect();
        pairs.sort_unstable();
        pairs
    }

    pub fn number_of_conflicts(&self) -> usize {
        self.conflicts.edge_count()
    }

    /// Longest processing time over all jobs, `None` for an empty instance.
    pub fn max_processing_time(&self) -> Option<u64> {
        self.jobs.iter().map(|job| job.processing_time()).max()
    }
}
