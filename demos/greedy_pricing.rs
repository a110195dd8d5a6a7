//! Builds a schedule by fixing the pricing oracle's column every round.
//!
//! Usage: `cargo run --example greedy_pricing [instance.json] [certificate.json]`
//!
//! Without arguments a random conflict instance is generated.

use batchsched::checker::{check, Certificate};
use batchsched::pricing::master::to_certificate;
use batchsched::pricing::{
    BatchPricingSolver, Column, ColumnId, MasterParameters, PricingConfig, PricingSolver,
};
use batchsched::problem::{Instance, InstanceGenerator};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use tracing_subscriber::EnvFilter;

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

fn greedy_schedule(instance: &Instance) -> Result<Certificate, Box<dyn Error>> {
    let parameters = MasterParameters::for_instance(instance);
    let mut oracle = BatchPricingSolver::new(instance, PricingConfig::default());
    let mut columns: Vec<Column> = Vec::new();
    let mut fixed: Vec<(ColumnId, f64)> = Vec::new();

    loop {
        oracle.initialize_pricing(&columns, &fixed)?;
        let duals: Vec<f64> = (0..instance.number_of_jobs())
            .map(|job| {
                if oracle.exclusion().is_excluded(job) {
                    0.0
                } else {
                    parameters.dummy_column_objective_coefficient
                }
            })
            .collect();

        let Some(column) = oracle.solve_pricing(&duals)?.pop() else {
            break;
        };
        tracing::info!(
            round = columns.len() + 1,
            jobs = ?column.row_indices,
            cost = column.objective_coefficient,
            "Fixed batch"
        );
        columns.push(column);
        fixed.push((columns.len() - 1, 1.0));
    }

    Ok(to_certificate(&columns, &fixed)?)
}

fn main() -> Result<(), Box<dyn Error>> {
    enable_tracing();
    let mut args = std::env::args().skip(1);

    let instance = match args.next() {
        Some(path) => Instance::load(path)?,
        None => InstanceGenerator::new(40).generate(&mut StdRng::seed_from_u64(42))?,
    };
    tracing::info!(
        jobs = instance.number_of_jobs(),
        capacity = instance.batch_capacity(),
        conflicts = instance.number_of_conflicts(),
        "Loaded instance"
    );

    let certificate = greedy_schedule(&instance)?;
    let report = check(&instance, &certificate);
    println!("{report}");

    if let Some(path) = args.next() {
        certificate.write(&path)?;
        tracing::info!(path = %path, "Wrote certificate");
    }
    Ok(())
}
