//! Configuration for the pricing oracle.

use crate::knapsack::search::SearchConfig;

/// Which algorithm solves the pricing knapsack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PricingStrategy {
    /// Exact dynamic program when no two candidates conflict, beam search otherwise.
    #[default]
    Auto,
    /// Always the exact dynamic program. Fails if candidates conflict.
    DynamicProgramming,
    /// Always the beam search, even without conflicts.
    BeamSearch,
}

/// Settings for [`BatchPricingSolver`](super::BatchPricingSolver).
#[derive(Debug, Clone, PartialEq)]
pub struct PricingConfig {
    pub strategy: PricingStrategy,
    /// Used whenever the beam search runs.
    pub search: SearchConfig,
    /// A column is only returned if its reduced cost is below `-tolerance`.
    pub tolerance: f64,
}

impl PricingConfig {
    pub fn with_strategy(mut self, strategy: PricingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            strategy: PricingStrategy::Auto,
            search: SearchConfig::default(),
            tolerance: 1e-9,
        }
    }
}
