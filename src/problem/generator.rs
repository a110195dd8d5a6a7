//! Random instance generation.

use super::error::InstanceError;
use super::instance::Instance;
use rand::Rng;
use std::collections::BTreeSet;
use std::ops::RangeInclusive;

/// Parameters for drawing random batch scheduling instances.
///
/// Processing times and sizes are drawn uniformly from their ranges. When
/// `conflict_density_percent` is set, a density `d` is drawn from it and
/// `n(n-1)/2 * d / 100` random job pairs are marked as conflicting (repeated
/// draws collapse, so the final count may be lower).
#[derive(Debug, Clone)]
pub struct InstanceGenerator {
    pub number_of_jobs: usize,
    pub batch_capacity: u64,
    pub processing_times: RangeInclusive<u64>,
    pub sizes: RangeInclusive<u64>,
    /// `None` generates the plain variant.
    pub conflict_density_percent: Option<RangeInclusive<u64>>,
}

impl InstanceGenerator {
    pub fn new(number_of_jobs: usize) -> Self {
        Self {
            number_of_jobs,
            ..Self::default()
        }
    }

    pub fn with_batch_capacity(mut self, batch_capacity: u64) -> Self {
        self.batch_capacity = batch_capacity;
        self
    }

    pub fn with_processing_times(mut self, range: RangeInclusive<u64>) -> Self {
        self.processing_times = range;
        self
    }

    pub fn with_sizes(mut self, range: RangeInclusive<u64>) -> Self {
        self.sizes = range;
        self
    }

    pub fn with_conflict_density(mut self, percent: Option<RangeInclusive<u64>>) -> Self {
        self.conflict_density_percent = percent;
        self
    }

    /// Draws one instance.
    ///
    /// # Errors
    ///
    /// Fails if the configured capacity, processing times or sizes can be zero.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<Instance, InstanceError> {
        let mut instance = match self.conflict_density_percent {
            Some(_) => Instance::with_conflicts(self.batch_capacity)?,
            None => Instance::new(self.batch_capacity)?,
        };

        for _ in 0..self.number_of_jobs {
            let processing_time = rng.gen_range(self.processing_times.clone());
            let size = rng.gen_range(self.sizes.clone());
            instance.add_job(processing_time, size)?;
        }

        let n = self.number_of_jobs;
        if let Some(density) = &self.conflict_density_percent {
            if n < 2 {
                return Ok(instance);
            }
            let d = rng.gen_range(density.clone()) as usize;
            let number_of_draws = n * (n - 1) / 2 * d / 100;

            let mut pairs = BTreeSet::new();
            for _ in 0..number_of_draws {
                let first = rng.gen_range(0..n);
                let mut second = rng.gen_range(0..n - 1);
                if second >= first {
                    second += 1;
                }
                pairs.insert((first.min(second), first.max(second)));
            }
            for (first, second) in pairs {
                instance.add_conflict(first, second)?;
            }
        }

        Ok(instance)
    }
}

impl Default for InstanceGenerator {
    fn default() -> Self {
        Self {
            number_of_jobs: 0,
            batch_capacity: 1000,
            processing_times: 100..=500,
            sizes: 100..=500,
            conflict_density_percent: Some(1..=25),
        }
    }
}
