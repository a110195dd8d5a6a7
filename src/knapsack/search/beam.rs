//! Iterative beam search driver.

use super::{BranchingScheme, SearchConfig, SearchOutcome, SearchStatistics};
use crate::knapsack::dp::TIE_TOLERANCE;
use std::time::Instant;

/// Best node seen so far, shared by every pass.
struct Incumbent<N> {
    best: Option<(N, f64)>,
}

impl<N: Clone> Incumbent<N> {
    fn offer(&mut self, node: &N, value: f64) {
        let improves = match &self.best {
            Some((_, best)) => value > *best + TIE_TOLERANCE,
            None => true,
        };
        if improves {
            self.best = Some((node.clone(), value));
        }
    }

    fn can_be_beaten_by(&self, bound: f64) -> bool {
        match &self.best {
            Some((_, best)) => bound > *best + TIE_TOLERANCE,
            None => true,
        }
    }
}

enum PassEnd {
    Finished { trimmed: bool },
    TimedOut,
}

fn deadline_passed(deadline: Option<Instant>) -> bool {
    deadline.map_or(false, |deadline| Instant::now() >= deadline)
}

/// Explores `scheme` depth by depth, keeping at most `width` states per depth.
fn run_pass<S: BranchingScheme>(
    scheme: &S,
    width: usize,
    deadline: Option<Instant>,
    incumbent: &mut Incumbent<S::Node>,
    statistics: &mut SearchStatistics,
) -> PassEnd {
    let mut frontier = vec![scheme.root()];
    let mut children = Vec::new();
    let mut trimmed = false;

    while !frontier.is_empty() {
        let mut next = Vec::with_capacity(frontier.len() * 2);
        for node in &frontier {
            if deadline_passed(deadline) {
                return PassEnd::TimedOut;
            }
            if scheme.is_terminal(node) {
                continue;
            }
            statistics.nodes_expanded += 1;
            scheme.children(node, &mut children);
            for child in children.drain(..) {
                if let Some(value) = scheme.value(&child) {
                    incumbent.offer(&child, value);
                }
                if scheme.is_terminal(&child) {
                    continue;
                }
                if !incumbent.can_be_beaten_by(scheme.bound(&child)) {
                    statistics.nodes_pruned += 1;
                    continue;
                }
                next.push(child);
            }
        }

        // The incumbent may have improved after some children were queued.
        let before = next.len();
        next.retain(|node| incumbent.can_be_beaten_by(scheme.bound(node)));
        statistics.nodes_pruned += (before - next.len()) as u64;

        if next.len() > width {
            next.sort_by(|a, b| scheme.compare(a, b));
            next.truncate(width);
            trimmed = true;
        }
        frontier = next;
    }

    PassEnd::Finished { trimmed }
}

/// Runs beam passes of growing width until one is exhaustive, the maximum width
/// has been tried, or the time limit expires.
///
/// Never fails: on timeout the best node found so far (possibly none) is returned
/// with [`SearchStatistics::timed_out`] set.
pub fn iterative_beam_search<S: BranchingScheme>(
    scheme: &S,
    config: &SearchConfig,
) -> SearchOutcome<S::Node> {
    let deadline = config.time_limit.map(|limit| Instant::now() + limit);
    let maximum_width = config.maximum_beam_width.max(1);
    let mut width = config.initial_beam_width.clamp(1, maximum_width);

    let mut incumbent = Incumbent { best: None };
    let mut statistics = SearchStatistics::default();

    loop {
        statistics.passes += 1;
        statistics.final_beam_width = width;

        match run_pass(scheme, width, deadline, &mut incumbent, &mut statistics) {
            PassEnd::TimedOut => {
                statistics.timed_out = true;
                tracing::warn!(
                    "Beam search hit its time limit during pass {} (width {})",
                    statistics.passes,
                    width
                );
                break;
            }
            PassEnd::Finished { trimmed: false } => {
                statistics.exhausted = true;
                break;
            }
            PassEnd::Finished { trimmed: true } => {
                tracing::debug!(
                    width,
                    expanded = statistics.nodes_expanded,
                    "Beam pass trimmed its frontier"
                );
            }
        }

        if width >= maximum_width {
            break;
        }
        width = width.saturating_mul(2).min(maximum_width);
    }

    let (best, best_value) = match incumbent.best {
        Some((node, value)) => (Some(node), Some(value)),
        None => (None, None),
    };
    SearchOutcome {
        best,
        best_value,
        statistics,
    }
}
