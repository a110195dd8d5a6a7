//! Configuration for the conflict-aware beam search.

use std::time::Duration;

/// Order in which items are decided, one per search depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BranchingOrder {
    /// Narrowest items first, so an inclusion fixes the batch width exactly.
    #[default]
    AscendingWidth,
    /// Most profitable items first.
    DescendingProfit,
    /// Highest profit per unit of weight first.
    DescendingProfitDensity,
}

/// Beam widths, deadline and branching order for [`iterative_beam_search`](super::iterative_beam_search).
///
/// The search runs passes with beam widths `initial_beam_width`, twice that, and
/// so on up to `maximum_beam_width`. A pass that never had to drop a state is
/// exhaustive and ends the search early.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// States kept per depth in the first pass.
    pub initial_beam_width: usize,
    /// Largest beam width tried before giving up on exhaustiveness.
    pub maximum_beam_width: usize,
    /// Wall-clock budget. The best state found so far is returned when it runs out.
    pub time_limit: Option<Duration>,
    pub branching_order: BranchingOrder,
}

impl SearchConfig {
    /// Runs a single pass with a fixed beam width.
    pub fn with_beam_width(mut self, width: usize) -> Self {
        self.initial_beam_width = width;
        self.maximum_beam_width = width;
        self
    }

    pub fn with_iterative_widths(mut self, initial: usize, maximum: usize) -> Self {
        self.initial_beam_width = initial;
        self.maximum_beam_width = maximum.max(initial);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_branching_order(mut self, order: BranchingOrder) -> Self {
        self.branching_order = order;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            initial_beam_width: 256,
            maximum_beam_width: 256,
            time_limit: None,
            branching_order: BranchingOrder::AscendingWidth,
        }
    }
}
