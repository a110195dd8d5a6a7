//! Include/exclude branching over knapsack items with conflicts.

use super::{iterative_beam_search, BranchingOrder, BranchingScheme, SearchConfig, SearchOutcome};
use crate::knapsack::{ItemId, KnapsackInstance, KnapsackSolution};
use fixedbitset::FixedBitSet;
use std::cmp::Ordering;

/// Partial selection: the first `depth` items of the branching order are decided.
#[derive(Debug, Clone)]
pub struct KnapsackNode {
    depth: usize,
    selected: Vec<ItemId>,
    /// Items conflicting with at least one selected item.
    forbidden: FixedBitSet,
    weight: u64,
    profit: f64,
    width: u64,
}

impl KnapsackNode {
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn selected(&self) -> &[ItemId] {
        &self.selected
    }

    pub fn weight(&self) -> u64 {
        self.weight
    }

    pub fn profit(&self) -> f64 {
        self.profit
    }

    pub fn width(&self) -> u64 {
        self.width
    }
}

/// Decides items one at a time in a fixed order, branching on include/exclude.
///
/// Including an item is only offered when it fits the remaining capacity and
/// conflicts with nothing already selected, so every node is a feasible
/// selection. The bound relaxes both capacity and conflicts:
/// `profit + remaining profit - current width`.
pub struct ConflictKnapsackScheme<'a> {
    instance: &'a KnapsackInstance,
    order: Vec<ItemId>,
    /// `remaining_profit[d]`: total profit of the items decided at depth `d` and later.
    remaining_profit: Vec<f64>,
}

impl<'a> ConflictKnapsackScheme<'a> {
    pub fn new(instance: &'a KnapsackInstance, branching_order: BranchingOrder) -> Self {
        let items = instance.items();
        let mut order: Vec<ItemId> = (0..items.len()).collect();
        match branching_order {
            BranchingOrder::AscendingWidth => {
                order.sort_by_key(|&id| (items[id].width, id));
            }
            BranchingOrder::DescendingProfit => {
                order.sort_by(|&a, &b| {
                    items[b]
                        .profit
                        .total_cmp(&items[a].profit)
                        .then(a.cmp(&b))
                });
            }
            BranchingOrder::DescendingProfitDensity => {
                let density = |id: ItemId| items[id].profit / items[id].weight.max(1) as f64;
                order.sort_by(|&a, &b| density(b).total_cmp(&density(a)).then(a.cmp(&b)));
            }
        }

        let mut remaining_profit = vec![0.0; order.len() + 1];
        for depth in (0..order.len()).rev() {
            remaining_profit[depth] =
                remaining_profit[depth + 1] + items[order[depth]].profit.max(0.0);
        }

        Self {
            instance,
            order,
            remaining_profit,
        }
    }

    /// Item decided at each depth.
    pub fn order(&self) -> &[ItemId] {
        &self.order
    }

    pub fn to_solution(&self, node: &KnapsackNode) -> KnapsackSolution {
        self.instance.solution_for(node.selected.clone())
    }
}

impl BranchingScheme for ConflictKnapsackScheme<'_> {
    type Node = KnapsackNode;

    fn root(&self) -> KnapsackNode {
        KnapsackNode {
            depth: 0,
            selected: Vec::new(),
            forbidden: FixedBitSet::with_capacity(self.instance.len()),
            weight: 0,
            profit: 0.0,
            width: 0,
        }
    }

    fn children(&self, node: &KnapsackNode, out: &mut Vec<KnapsackNode>) {
        let Some(&id) = self.order.get(node.depth) else {
            return;
        };
        let item = self.instance.item(id);

        let weight = node.weight.saturating_add(item.weight);
        if !node.forbidden.contains(id) && weight <= self.instance.capacity() {
            let mut included = node.clone();
            included.depth += 1;
            included.selected.push(id);
            for other in self.instance.conflicting_items(id) {
                included.forbidden.insert(other);
            }
            included.weight = weight;
            included.profit += item.profit;
            included.width = included.width.max(item.width);
            out.push(included);
        }

        let mut excluded = node.clone();
        excluded.depth += 1;
        out.push(excluded);
    }

    fn bound(&self, node: &KnapsackNode) -> f64 {
        node.profit + self.remaining_profit[node.depth] - node.width as f64
    }

    fn value(&self, node: &KnapsackNode) -> Option<f64> {
        if node.selected.is_empty() {
            None
        } else {
            Some(node.profit - node.width as f64)
        }
    }

    fn is_terminal(&self, node: &KnapsackNode) -> bool {
        node.depth >= self.order.len()
    }

    fn compare(&self, a: &KnapsackNode, b: &KnapsackNode) -> Ordering {
        self.bound(b)
            .total_cmp(&self.bound(a))
            .then_with(|| (b.profit - b.width as f64).total_cmp(&(a.profit - a.width as f64)))
    }
}

/// Searches for the non-empty selection with the smallest reduced cost
/// `max(width) - sum(profit)` that respects capacity and conflicts.
///
/// `best` is `None` when no single item fits or the time limit expired first.
pub fn solve(instance: &KnapsackInstance, config: &SearchConfig) -> SearchOutcome<KnapsackSolution> {
    let scheme = ConflictKnapsackScheme::new(instance, config.branching_order);
    let outcome = iterative_beam_search(&scheme, config);
    tracing::debug!(
        items = instance.len(),
        passes = outcome.statistics.passes,
        expanded = outcome.statistics.nodes_expanded,
        pruned = outcome.statistics.nodes_pruned,
        exhausted = outcome.statistics.exhausted,
        "Conflict knapsack search finished"
    );
    outcome.map(|node| scheme.to_solution(&node))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knapsack::dp;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::time::Duration;

    fn random_instance(rng: &mut StdRng, n: usize, conflict_percent: u32) -> KnapsackInstance {
        let mut instance = KnapsackInstance::new(rng.gen_range(10..=40));
        for _ in 0..n {
            instance.add_item(
                rng.gen_range(1..=15),
                rng.gen_range(1..=12),
                rng.gen_range(1..=80) as f64 / 10.0,
            );
        }
        for a in 0..n {
            for b in a + 1..n {
                if rng.gen_range(0..100) < conflict_percent {
                    instance.add_conflict(a, b);
                }
            }
        }
        instance
    }

    fn brute_force(instance: &KnapsackInstance) -> Option<f64> {
        let n = instance.len();
        (1u32..(1 << n))
            .map(|mask| (0..n).filter(|i| mask & (1 << i) != 0).collect::<Vec<_>>())
            .filter(|items| instance.is_feasible(items))
            .map(|items| instance.solution_for(items).reduced_cost())
            .min_by(|a, b| a.total_cmp(b))
    }

    #[test]
    fn test_conflicting_items_are_never_chosen_together() {
        let mut instance = KnapsackInstance::new(100);
        instance.add_item(10, 5, 8.0);
        instance.add_item(10, 5, 8.0);
        instance.add_item(10, 5, 3.0);
        instance.add_conflict(0, 1);

        let outcome = solve(&instance, &SearchConfig::default());
        let solution = outcome.best.unwrap();
        assert!(instance.is_feasible(&solution.items));
        assert_eq!(solution.items.len(), 2);
        assert!(solution.items.contains(&2));
        assert!((solution.reduced_cost() + 6.0).abs() < 1e-12);
        assert!(outcome.statistics.exhausted);
    }

    #[test]
    fn test_capacity_is_respected() {
        let mut instance = KnapsackInstance::new(15);
        instance.add_item(10, 1, 5.0);
        instance.add_item(10, 1, 5.0);
        instance.add_conflict(0, 1);
        instance.add_item(5, 1, 1.0);

        let solution = solve(&instance, &SearchConfig::default()).best.unwrap();
        assert!(solution.weight <= 15);
        assert!(instance.is_feasible(&solution.items));
    }

    #[test]
    fn test_no_fitting_item_yields_nothing() {
        let mut instance = KnapsackInstance::new(5);
        instance.add_item(6, 1, 5.0);
        let outcome = solve(&instance, &SearchConfig::default());
        assert!(outcome.best.is_none());
        assert!(outcome.statistics.exhausted);

        let outcome = solve(&KnapsackInstance::new(5), &SearchConfig::default());
        assert!(outcome.best.is_none());
    }

    #[test]
    fn test_wide_beam_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(11);
        let orders = [
            BranchingOrder::AscendingWidth,
            BranchingOrder::DescendingProfit,
            BranchingOrder::DescendingProfitDensity,
        ];
        for round in 0..150 {
            let n = rng.gen_range(1..=9);
            let instance = random_instance(&mut rng, n, 30);
            let config = SearchConfig::default()
                .with_beam_width(1 << 12)
                .with_branching_order(orders[round % orders.len()]);

            let outcome = solve(&instance, &config);
            assert!(outcome.statistics.exhausted);
            match (brute_force(&instance), outcome.best) {
                (None, None) => {}
                (Some(expected), Some(solution)) => {
                    assert!(instance.is_feasible(&solution.items));
                    assert!((solution.reduced_cost() - expected).abs() < 1e-9);
                }
                (expected, found) => panic!("search {:?} vs brute force {:?}", found, expected),
            }
        }
    }

    #[test]
    fn test_narrow_beam_stays_feasible_on_dense_conflicts() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let instance = random_instance(&mut rng, 30, 40);
            let outcome = solve(&instance, &SearchConfig::default().with_beam_width(4));
            if let Some(solution) = outcome.best {
                assert!(instance.is_feasible(&solution.items));
                assert!(!solution.items.is_empty());
            }
        }
    }

    #[test]
    fn test_agrees_with_dp_without_conflicts() {
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..100 {
            let n = rng.gen_range(1..=10);
            let instance = random_instance(&mut rng, n, 0);
            let config = SearchConfig::default().with_beam_width(1 << 12);
            let searched = solve(&instance, &config).best.map(|s| s.reduced_cost());
            let exact = dp::solve(&instance).map(|s| s.reduced_cost());
            match (searched, exact) {
                (None, None) => {}
                (Some(a), Some(b)) => assert!((a - b).abs() < 1e-9),
                other => panic!("search/dp disagree: {:?}", other),
            }
        }
    }

    #[test]
    fn test_expired_deadline_is_not_an_error() {
        let mut rng = StdRng::seed_from_u64(9);
        let instance = random_instance(&mut rng, 40, 10);
        let config = SearchConfig::default().with_time_limit(Duration::ZERO);
        let outcome = solve(&instance, &config);
        assert!(outcome.statistics.timed_out);
        assert!(outcome.best.is_none());
    }

    #[test]
    fn test_search_cut_short_returns_a_feasible_selection() {
        let mut rng = StdRng::seed_from_u64(17);
        let instance = random_instance(&mut rng, 400, 60);
        let config = SearchConfig::default()
            .with_beam_width(1 << 12)
            .with_time_limit(Duration::from_millis(1));
        let outcome = solve(&instance, &config);

        assert!(outcome.statistics.timed_out);
        assert!(!outcome.statistics.exhausted);
        if let Some(solution) = outcome.best {
            assert!(!solution.items.is_empty());
            assert!(instance.is_feasible(&solution.items));
            let value = outcome.best_value.unwrap();
            assert!((value - solution.value()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_bound_never_underestimates_children() {
        let mut rng = StdRng::seed_from_u64(2);
        let instance = random_instance(&mut rng, 8, 25);
        let scheme = ConflictKnapsackScheme::new(&instance, BranchingOrder::AscendingWidth);

        let mut stack = vec![scheme.root()];
        let mut children = Vec::new();
        while let Some(node) = stack.pop() {
            let bound = scheme.bound(&node);
            scheme.children(&node, &mut children);
            for child in children.drain(..) {
                if let Some(value) = scheme.value(&child) {
                    assert!(value <= bound + 1e-9);
                }
                stack.push(child);
            }
        }
    }
}
