//! Bounded beam search for the bottleneck knapsack with pairwise conflicts.
//!
//! Conflicts make the pricing problem NP-hard in the conflict density, so it is
//! not solved by a dynamic program. Instead [`ConflictKnapsackScheme`] describes
//! the problem as a branching scheme (include or exclude one item per depth) and
//! [`iterative_beam_search`] explores it keeping only the best states per depth.
//!
//! The search is an anytime heuristic: it never returns a selection with two
//! conflicting items or exceeding the capacity, but it only proves optimality
//! when a pass completes without dropping states.

mod beam;
mod config;
mod scheme;

pub use beam::iterative_beam_search;
pub use config::{BranchingOrder, SearchConfig};
pub use scheme::{solve, ConflictKnapsackScheme, KnapsackNode};

use std::cmp::Ordering;

/// Problem-specific half of a beam search, driven by [`iterative_beam_search`].
///
/// Values and bounds are maximized.
pub trait BranchingScheme {
    type Node: Clone;

    /// State with every decision still open.
    fn root(&self) -> Self::Node;

    /// Appends the children of `node` to `out`. Terminal nodes have none.
    fn children(&self, node: &Self::Node, out: &mut Vec<Self::Node>);

    /// Upper bound on the value of any node reachable from `node`.
    fn bound(&self, node: &Self::Node) -> f64;

    /// Value of `node` read as a finished solution, or `None` if it is not usable.
    fn value(&self, node: &Self::Node) -> Option<f64>;

    fn is_terminal(&self, node: &Self::Node) -> bool;

    /// Ordering used to trim the frontier; `Less` means `a` is kept before `b`.
    fn compare(&self, a: &Self::Node, b: &Self::Node) -> Ordering;
}

/// Counters collected across all passes of one search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    pub passes: usize,
    pub nodes_expanded: u64,
    /// Children discarded because their bound could not beat the incumbent.
    pub nodes_pruned: u64,
    /// Beam width of the last pass started.
    pub final_beam_width: usize,
    /// A pass finished without trimming its frontier, so the result is optimal.
    pub exhausted: bool,
    pub timed_out: bool,
}

/// Best node found by a search, its value, and the search counters.
#[derive(Debug, Clone)]
pub struct SearchOutcome<N> {
    pub best: Option<N>,
    pub best_value: Option<f64>,
    pub statistics: SearchStatistics,
}

impl<N> SearchOutcome<N> {
    pub fn map<M>(self, f: impl FnOnce(N) -> M) -> SearchOutcome<M> {
        SearchOutcome {
            best: self.best.map(f),
            best_value: self.best_value,
            statistics: self.statistics,
        }
    }
}
