//! Bottleneck knapsack: pick items within a capacity to minimize
//! `max(width) - sum(profit)`.
//!
//! This is the pricing subproblem of batch scheduling: an item is a job, its
//! weight is the job size, its width is the processing time and its profit is
//! the job's dual price. The batch cost is a maximum rather than a sum, so the
//! usual additive knapsack algorithms do not apply directly.
//!
//! - [`dp`] solves the conflict-free case exactly.
//! - [`search`] handles pairwise conflicts with a bounded beam search.

pub mod dp;
pub mod search;

use fixedbitset::FixedBitSet;
use petgraph::graphmap::UnGraphMap;

/// Index of an item inside a [`KnapsackInstance`].
pub type ItemId = usize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnapsackItem {
    pub weight: u64,
    pub width: u64,
    pub profit: f64,
}

/// Items, a capacity, and the pairs of items that may not be chosen together.
#[derive(Debug, Clone)]
pub struct KnapsackInstance {
    capacity: u64,
    items: Vec<KnapsackItem>,
    conflicts: UnGraphMap<ItemId, ()>,
}

impl KnapsackInstance {
    pub fn new(capacity: u64) -> Self {
        Self {
            capacity,
            items: Vec::new(),
            conflicts: UnGraphMap::new(),
        }
    }

    pub fn add_item(&mut self, weight: u64, width: u64, profit: f64) -> ItemId {
        self.items.push(KnapsackItem {
            weight,
            width,
            profit,
        });
        self.items.len() - 1
    }

    /// Forbids choosing `first` and `second` together. Both must already exist.
    pub fn add_conflict(&mut self, first: ItemId, second: ItemId) {
        debug_assert!(first < self.items.len() && second < self.items.len());
        debug_assert_ne!(first, second);
        self.conflicts.add_edge(first, second, ());
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn items(&self) -> &[KnapsackItem] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> &KnapsackItem {
        &self.items[id]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_conflicts(&self) -> bool {
        self.conflicts.edge_count() > 0
    }

    pub fn number_of_conflicts(&self) -> usize {
        self.conflicts.edge_count()
    }

    pub fn are_conflicting(&self, first: ItemId, second: ItemId) -> bool {
        self.conflicts.contains_edge(first, second)
    }

    pub fn conflicting_items(&self, id: ItemId) -> impl Iterator<Item = ItemId> + '_ {
        self.conflicts.neighbors(id)
    }

    /// Builds the solution record for a set of items.
    pub fn solution_for(&self, mut items: Vec<ItemId>) -> KnapsackSolution {
        items.sort_unstable();
        items.dedup();
        let weight = items.iter().map(|&i| self.items[i].weight).sum();
        let width = items.iter().map(|&i| self.items[i].width).max().unwrap_or(0);
        let profit = items.iter().map(|&i| self.items[i].profit).sum();
        KnapsackSolution {
            items,
            weight,
            width,
            profit,
        }
    }

    /// Returns true if `items` fits the capacity and contains no conflicting pair.
    pub fn is_feasible(&self, items: &[ItemId]) -> bool {
        let mut seen = FixedBitSet::with_capacity(self.items.len());
        let mut weight = 0u64;
        for &i in items {
            if i >= self.items.len() || seen.contains(i) {
                return false;
            }
            if self.conflicting_items(i).any(|j| seen.contains(j)) {
                return false;
            }
            seen.insert(i);
            weight = weight.saturating_add(self.items[i].weight);
        }
        weight <= self.capacity
    }
}

/// A chosen item set with its aggregate weight, width and profit.
#[derive(Debug, Clone, PartialEq)]
pub struct KnapsackSolution {
    /// Chosen items in ascending order.
    pub items: Vec<ItemId>,
    pub weight: u64,
    /// Largest width among the chosen items.
    pub width: u64,
    pub profit: f64,
}

impl KnapsackSolution {
    /// `width - profit`. Negative means the batch improves the master problem.
    pub fn reduced_cost(&self) -> f64 {
        self.width as f64 - self.profit
    }

    /// `profit - width`, the quantity the search maximizes.
    pub fn value(&self) -> f64 {
        -self.reduced_cost()
    }

    /// Returns true if this selection beats the empty one by more than `tolerance`.
    pub fn is_improving(&self, tolerance: f64) -> bool {
        !self.items.is_empty() && self.reduced_cost() < -tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solution_aggregates() {
        let mut instance = KnapsackInstance::new(10);
        instance.add_item(4, 7, 3.0);
        instance.add_item(5, 2, 6.5);
        instance.add_item(3, 9, 1.0);

        let solution = instance.solution_for(vec![1, 0, 1]);
        assert_eq!(solution.items, vec![0, 1]);
        assert_eq!(solution.weight, 9);
        assert_eq!(solution.width, 7);
        assert!((solution.profit - 9.5).abs() < 1e-12);
        assert!((solution.reduced_cost() + 2.5).abs() < 1e-12);
        assert!(solution.is_improving(1e-9));
    }

    #[test]
    fn test_empty_solution_is_not_improving() {
        let instance = KnapsackInstance::new(10);
        let solution = instance.solution_for(Vec::new());
        assert_eq!(solution.width, 0);
        assert_eq!(solution.reduced_cost(), 0.0);
        assert!(!solution.is_improving(0.0));
    }

    #[test]
    fn test_feasibility_checks_capacity_and_conflicts() {
        let mut instance = KnapsackInstance::new(10);
        instance.add_item(4, 1, 1.0);
        instance.add_item(5, 1, 1.0);
        instance.add_item(3, 1, 1.0);
        instance.add_conflict(0, 2);

        assert!(instance.is_feasible(&[0, 1]));
        assert!(!instance.is_feasible(&[0, 2]));
        assert!(!instance.is_feasible(&[0, 1, 2]));
        assert!(!instance.is_feasible(&[1, 1]));
        assert!(!instance.is_feasible(&[3]));
        assert!(instance.is_feasible(&[]));
    }
}
