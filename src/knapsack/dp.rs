//! Exact dynamic program for the conflict-free bottleneck knapsack.
//!
//! Items are swept in ascending width. When item `k` is reached it is the widest
//! item of any set drawn from the prefix `0..=k`, so the best set whose width is
//! `width(k)` is item `k` plus the most profitable 0/1 knapsack over `0..k` in the
//! remaining capacity. A single profit table is extended item by item, which
//! makes the whole sweep `O(n * C)`.
//!
//! The boundary with the smallest `width(k) - P(k)` wins; ties go to the earlier
//! boundary (smaller width, hence a cheaper batch) and then to the larger profit.
//! The winning set is recovered with a second, table-recording pass over the
//! winning prefix only.

use super::{ItemId, KnapsackInstance, KnapsackSolution};
use fixedbitset::FixedBitSet;

/// Reduced costs closer than this are treated as equal.
pub const TIE_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy)]
struct Boundary {
    /// Position of the widest item in the sorted order.
    position: usize,
    width: u64,
    profit: f64,
    reduced_cost: f64,
}

impl Boundary {
    fn is_better_than(&self, other: &Boundary) -> bool {
        if self.reduced_cost < other.reduced_cost - TIE_TOLERANCE {
            return true;
        }
        if (self.reduced_cost - other.reduced_cost).abs() <= TIE_TOLERANCE {
            return self.width < other.width
                || (self.width == other.width && self.profit > other.profit + TIE_TOLERANCE);
        }
        false
    }
}

/// Finds the non-empty item set with the smallest `max(width) - sum(profit)`.
///
/// Returns `None` only when no single item fits the capacity. The result may
/// have a non-negative reduced cost; use [`KnapsackSolution::is_improving`] to
/// compare it against the empty set.
///
/// Conflicts are ignored, so callers must only pass conflict-free instances.
pub fn solve(instance: &KnapsackInstance) -> Option<KnapsackSolution> {
    debug_assert!(
        !instance.has_conflicts(),
        "the dynamic program does not handle conflicts"
    );

    let items = instance.items();
    let total_weight = items
        .iter()
        .fold(0u64, |acc, item| acc.saturating_add(item.weight));
    let capacity = instance.capacity().min(total_weight) as usize;

    let mut order: Vec<ItemId> = (0..items.len()).collect();
    order.sort_by_key(|&id| (items[id].width, id));

    // best_profit[c]: most profit from items swept so far within weight c.
    let mut best_profit = vec![0.0f64; capacity + 1];
    let mut chosen: Option<Boundary> = None;

    for (position, &id) in order.iter().enumerate() {
        let item = &items[id];
        if item.weight as usize > capacity {
            continue;
        }
        let weight = item.weight as usize;

        let profit = item.profit + best_profit[capacity - weight];
        let boundary = Boundary {
            position,
            width: item.width,
            profit,
            reduced_cost: item.width as f64 - profit,
        };
        if chosen.map_or(true, |current| boundary.is_better_than(&current)) {
            chosen = Some(boundary);
        }

        for c in (weight..=capacity).rev() {
            let with_item = best_profit[c - weight] + item.profit;
            if with_item > best_profit[c] {
                best_profit[c] = with_item;
            }
        }
    }

    let boundary = chosen?;
    let widest = order[boundary.position];
    let remaining = capacity - items[widest].weight as usize;
    let mut selected = best_subset(instance, &order[..boundary.position], remaining);
    selected.push(widest);
    Some(instance.solution_for(selected))
}

/// Plain 0/1 knapsack over `candidates`, returning the chosen items.
fn best_subset(instance: &KnapsackInstance, candidates: &[ItemId], capacity: usize) -> Vec<ItemId> {
    let mut best_profit = vec![0.0f64; capacity + 1];
    let mut taken: Vec<FixedBitSet> = Vec::with_capacity(candidates.len());

    for &id in candidates {
        let item = instance.item(id);
        let mut row = FixedBitSet::with_capacity(capacity + 1);
        let weight = item.weight as usize;
        if weight <= capacity {
            for c in (weight..=capacity).rev() {
                let with_item = best_profit[c - weight] + item.profit;
                if with_item > best_profit[c] {
                    best_profit[c] = with_item;
                    row.insert(c);
                }
            }
        }
        taken.push(row);
    }

    let mut selected = Vec::new();
    let mut c = capacity;
    for (row, &id) in taken.iter().zip(candidates.iter()).rev() {
        if row.contains(c) {
            selected.push(id);
            c -= instance.item(id).weight as usize;
        }
    }
    selected
}
