//! End-to-end pricing scenarios: oracle, exclusion and checker together.

use super::*;
use crate::checker::{check, Certificate};
use crate::knapsack::search::SearchConfig;
use crate::problem::{Instance, InstanceGenerator};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Fixes the oracle's column every round until every job is covered.
///
/// Uncovered jobs are priced at the dummy column cost, covered ones at zero.
fn greedy_schedule(instance: &Instance, config: PricingConfig) -> (Vec<Column>, Certificate) {
    let parameters = MasterParameters::for_instance(instance);
    let mut oracle = BatchPricingSolver::new(instance, config);
    let mut columns: Vec<Column> = Vec::new();
    let mut fixed: Vec<(ColumnId, f64)> = Vec::new();

    for _ in 0..=instance.number_of_jobs() {
        oracle.initialize_pricing(&columns, &fixed).unwrap();
        let duals: Vec<f64> = (0..instance.number_of_jobs())
            .map(|job| {
                if oracle.exclusion().is_excluded(job) {
                    0.0
                } else {
                    parameters.dummy_column_objective_coefficient
                }
            })
            .collect();

        let mut generated = oracle.solve_pricing(&duals).unwrap();
        match generated.pop() {
            Some(column) => {
                assert!(column.reduced_cost(&duals) < 0.0);
                columns.push(column);
                fixed.push((columns.len() - 1, 1.0));
            }
            None => break,
        }
    }

    let certificate = master::to_certificate(&columns, &fixed).unwrap();
    (columns, certificate)
}

#[cfg(test)]
mod plain_variant {
    use super::*;

    #[test]
    fn test_greedy_pricing_yields_feasible_schedule() {
        for seed in 0..5 {
            let instance = InstanceGenerator::new(40)
                .with_conflict_density(None)
                .generate(&mut StdRng::seed_from_u64(seed))
                .unwrap();
            let (columns, certificate) = greedy_schedule(&instance, PricingConfig::default());

            let report = check(&instance, &certificate);
            assert!(report.is_feasible, "seed {seed}: {report}");
            assert_eq!(report.number_of_batches, columns.len());

            let cost: f64 = columns.iter().map(|c| c.objective_coefficient).sum();
            assert_eq!(report.makespan as f64, cost);
        }
    }

    #[test]
    fn test_single_job_instance() {
        let mut instance = Instance::new(100).unwrap();
        instance.add_job(42, 100).unwrap();

        let (columns, certificate) = greedy_schedule(&instance, PricingConfig::default());
        assert_eq!(columns.len(), 1);
        assert_eq!(certificate.jobs, vec![vec![0]]);
        assert_eq!(check(&instance, &certificate).outcome(), (true, 42));
    }

    #[test]
    fn test_everything_fixed_means_no_column() {
        let mut instance = Instance::new(10).unwrap();
        instance.add_job(3, 5).unwrap();
        instance.add_job(4, 5).unwrap();

        let columns = vec![Column::from_jobs(&instance, &[0, 1]).unwrap()];
        let mut oracle = BatchPricingSolver::new(&instance, PricingConfig::default());
        oracle.initialize_pricing(&columns, &[(0, 1.0)]).unwrap();
        assert!(oracle.solve_pricing(&[100.0, 100.0]).unwrap().is_empty());

        // Unfixing the column makes its jobs available again.
        oracle.initialize_pricing(&columns, &[(0, 0.0)]).unwrap();
        assert_eq!(oracle.solve_pricing(&[100.0, 100.0]).unwrap().len(), 1);
    }

    #[test]
    fn test_generated_columns_fit_capacity() {
        let instance = InstanceGenerator::new(25)
            .with_conflict_density(None)
            .generate(&mut StdRng::seed_from_u64(11))
            .unwrap();
        let (columns, _) = greedy_schedule(&instance, PricingConfig::default());

        for column in &columns {
            let size: u64 = column
                .jobs()
                .map(|job| instance.job(job).unwrap().size())
                .sum();
            assert!(size <= instance.batch_capacity());
            assert_eq!(column.row_coefficients, vec![1.0; column.len()]);
        }
    }
}

#[cfg(test)]
mod conflict_variant {
    use super::*;

    #[test]
    fn test_greedy_pricing_never_co_locates_conflicts() {
        for seed in 0..3 {
            let instance = InstanceGenerator::new(30)
                .with_conflict_density(Some(10..=30))
                .generate(&mut StdRng::seed_from_u64(seed))
                .unwrap();
            let (_, certificate) = greedy_schedule(&instance, PricingConfig::default());

            let report = check(&instance, &certificate);
            assert_eq!(report.conflict_count, 0, "seed {seed}");
            assert!(report.is_feasible, "seed {seed}: {report}");
        }
    }

    #[test]
    fn test_narrow_beam_stays_feasible() {
        let instance = InstanceGenerator::new(30)
            .with_conflict_density(Some(40..=40))
            .generate(&mut StdRng::seed_from_u64(5))
            .unwrap();
        let config = PricingConfig::default().with_search(SearchConfig::default().with_beam_width(2));
        let (_, certificate) = greedy_schedule(&instance, config);
        assert!(check(&instance, &certificate).is_feasible);
    }

    #[test]
    fn test_dummy_cost_dominates_any_batch() {
        let instance = InstanceGenerator::new(10)
            .generate(&mut StdRng::seed_from_u64(2))
            .unwrap();
        let parameters = MasterParameters::for_instance(&instance);
        let longest = instance.max_processing_time().unwrap() as f64;
        assert!(parameters.dummy_column_objective_coefficient > longest);
    }
}
