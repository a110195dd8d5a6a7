use super::column::Column;
use super::config::{PricingConfig, PricingStrategy};
use super::error::{ColumnError, PricingError};
use super::exclusion::{ColumnId, ExclusionState};
use super::filter::{self, Candidate};
use super::PricingSolver;
use crate::knapsack::{dp, search, KnapsackInstance, KnapsackSolution};
use crate::problem::Instance;
use crate::JobId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Algorithm {
    DynamicProgramming,
    BeamSearch,
}

/// Pricing oracle for batch scheduling with or without conflicts.
///
/// Each [`solve_pricing`](PricingSolver::solve_pricing) call keeps the jobs with a
/// positive dual that no fixed column covers, solves the resulting bottleneck
/// knapsack, and returns at most one column: the batch with the most negative
/// reduced cost, if it is negative at all.
///
/// # Example
///
/// ```
/// use batchsched::pricing::{BatchPricingSolver, PricingConfig, PricingSolver};
/// use batchsched::problem::Instance;
///
/// let mut instance = Instance::new(10).unwrap();
/// instance.add_job(4, 6).unwrap();
/// instance.add_job(3, 4).unwrap();
///
/// let mut oracle = BatchPricingSolver::new(&instance, PricingConfig::default());
/// oracle.initialize_pricing(&[], &[]).unwrap();
///
/// let columns = oracle.solve_pricing(&[5.0, 5.0]).unwrap();
/// assert_eq!(columns[0].row_indices, vec![0, 1]);
/// assert_eq!(columns[0].objective_coefficient, 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct BatchPricingSolver<'a> {
    instance: &'a Instance,
    config: PricingConfig,
    exclusion: ExclusionState,
}

impl<'a> BatchPricingSolver<'a> {
    pub fn new(instance: &'a Instance, config: PricingConfig) -> Self {
        Self {
            instance,
            config,
            exclusion: ExclusionState::new(instance.number_of_jobs()),
        }
    }

    pub fn instance(&self) -> &Instance {
        self.instance
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    pub fn exclusion(&self) -> &ExclusionState {
        &self.exclusion
    }

    /// Pricing knapsack over `candidates`; item `i` is `candidates[i]`.
    fn knapsack_instance(&self, candidates: &[Candidate]) -> KnapsackInstance {
        let mut item_of_job: Vec<Option<usize>> = vec![None; self.instance.number_of_jobs()];
        let mut knapsack = KnapsackInstance::new(self.instance.batch_capacity());
        for candidate in candidates {
            let item = knapsack.add_item(candidate.size, candidate.processing_time, candidate.profit);
            item_of_job[candidate.job_id] = Some(item);
        }

        for (item, candidate) in candidates.iter().enumerate() {
            for other_job in self.instance.conflicting_jobs(candidate.job_id) {
                if let Some(other) = item_of_job[other_job] {
                    if other > item {
                        knapsack.add_conflict(item, other);
                    }
                }
            }
        }
        knapsack
    }

    fn algorithm_for(&self, knapsack: &KnapsackInstance) -> Result<Algorithm, PricingError> {
        match self.config.strategy {
            PricingStrategy::Auto if knapsack.has_conflicts() => Ok(Algorithm::BeamSearch),
            PricingStrategy::Auto => Ok(Algorithm::DynamicProgramming),
            PricingStrategy::DynamicProgramming if knapsack.has_conflicts() => Err(
                PricingError::ConflictsNotSupported(knapsack.number_of_conflicts()),
            ),
            PricingStrategy::DynamicProgramming => Ok(Algorithm::DynamicProgramming),
            PricingStrategy::BeamSearch => Ok(Algorithm::BeamSearch),
        }
    }

    fn solve_knapsack(
        &self,
        knapsack: &KnapsackInstance,
    ) -> Result<Option<KnapsackSolution>, PricingError> {
        let algorithm = self.algorithm_for(knapsack)?;
        let solution = match algorithm {
            Algorithm::DynamicProgramming => dp::solve(knapsack),
            Algorithm::BeamSearch => search::solve(knapsack, &self.config.search).best,
        };
        tracing::debug!(
            candidates = knapsack.len(),
            conflicts = knapsack.number_of_conflicts(),
            ?algorithm,
            reduced_cost = solution.as_ref().map(|s| s.reduced_cost()),
            "Solved pricing knapsack"
        );
        Ok(solution)
    }
}

impl PricingSolver for BatchPricingSolver<'_> {
    fn initialize_pricing(
        &mut self,
        columns: &[Column],
        fixed_columns: &[(ColumnId, f64)],
    ) -> Result<(), PricingError> {
        self.exclusion
            .initialize(self.instance.number_of_jobs(), columns, fixed_columns)?;
        tracing::debug!(
            fixed = fixed_columns.len(),
            excluded = self.exclusion.excluded_count(),
            "Initialized pricing"
        );
        Ok(())
    }

    fn solve_pricing(&mut self, duals: &[f64]) -> Result<Vec<Column>, PricingError> {
        let candidates = filter::candidates(self.instance, duals, &self.exclusion)?;
        if candidates.is_empty() {
            tracing::debug!("No job has a positive dual; no improving column");
            return Ok(Vec::new());
        }

        let knapsack = self.knapsack_instance(&candidates);
        let jobs: Vec<JobId> = match self.solve_knapsack(&knapsack)? {
            Some(solution) if solution.is_improving(self.config.tolerance) => solution
                .items
                .iter()
                .map(|&item| candidates[item].job_id)
                .collect(),
            _ => Vec::new(),
        };

        match Column::from_jobs(self.instance, &jobs) {
            Ok(column) => Ok(vec![column]),
            Err(ColumnError::EmptyColumn) => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}
