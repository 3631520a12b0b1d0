// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::{
    candidates::{err::CandidateError, generator::CandidateGenerator},
    explorer::{config::ExplorerConfig, stats::ExplorationStats},
    route::{
        ordering::{ByValue, RouteOrdering},
        rt::Route,
    },
    tree::contingency::ContingencyTree,
};
use reliable_hub_core::prelude::Cost;
use reliable_hub_model::prelude::NodeIdentifier;
use std::{cmp::Ordering, collections::BinaryHeap, sync::Arc};

/// Result of exploring one demand.
#[derive(Debug, Clone)]
pub struct ExplorationOutcome {
    /// Cheapest complete plan found, if any beat the initial bound.
    pub best: Option<ContingencyTree>,
    pub stats: ExplorationStats,
}

impl ExplorationOutcome {
    #[inline]
    pub fn value(&self) -> Option<Cost> {
        self.best.as_ref().map(ContingencyTree::value)
    }
}

/// Frontier entry; the heap pops the smallest value first, older entries
/// first on ties.
#[derive(Debug)]
struct Open {
    value: Cost,
    seq: u64,
    tree: ContingencyTree,
}

impl PartialEq for Open {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Open {}

impl PartialOrd for Open {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Open {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .value
            .total_cmp(&self.value)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

struct Search {
    frontier: BinaryHeap<Open>,
    incumbent: Option<ContingencyTree>,
    bound: Cost,
    seq: u64,
    stats: ExplorationStats,
}

impl Search {
    fn new(bound: Cost) -> Self {
        Self {
            frontier: BinaryHeap::new(),
            incumbent: None,
            bound,
            seq: 0,
            stats: ExplorationStats::default(),
        }
    }

    /// Files a freshly generated tree: pruned, recorded as the new
    /// incumbent, or queued for expansion.
    fn offer(&mut self, mut tree: ContingencyTree) {
        self.stats.generated += 1;
        if tree.value() >= self.bound {
            tree.prune();
            self.stats.pruned += 1;
            return;
        }
        if tree.is_complete() {
            self.stats.completed += 1;
            self.bound = tree.value();
            tracing::debug!(value = self.bound, "improved incumbent");
            self.incumbent = Some(tree);
            return;
        }
        self.seq += 1;
        self.frontier.push(Open {
            value: tree.value(),
            seq: self.seq,
            tree,
        });
    }
}

/// Best-first branch-and-bound over contingency trees of a single demand.
///
/// Every feasible route seeds one root; a tree is expanded by trying every
/// available route at its next open position. A tree's value never drops
/// when it is extended, so any tree at or above the incumbent is final.
#[derive(Debug, Clone)]
pub struct PlanExplorer<'a, O = ByValue> {
    generator: CandidateGenerator<'a>,
    config: ExplorerConfig,
    ordering: O,
}

impl<'a> PlanExplorer<'a, ByValue> {
    #[inline]
    pub fn new(generator: CandidateGenerator<'a>, config: ExplorerConfig) -> Self {
        Self::with_ordering(generator, config, ByValue)
    }
}

impl<'a, O> PlanExplorer<'a, O>
where
    O: RouteOrdering + Clone,
{
    #[inline]
    pub fn with_ordering(
        generator: CandidateGenerator<'a>,
        config: ExplorerConfig,
        ordering: O,
    ) -> Self {
        Self {
            generator,
            config,
            ordering,
        }
    }

    #[inline]
    pub fn generator(&self) -> &CandidateGenerator<'a> {
        &self.generator
    }

    #[inline]
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// Explores the demand `i -> j` over every hub of the network.
    #[inline]
    pub fn explore(
        &self,
        i: NodeIdentifier,
        j: NodeIdentifier,
    ) -> Result<ExplorationOutcome, CandidateError> {
        let network = self.generator.network();
        self.explore_with_hubs(i, j, network.hubs())
    }

    /// Explores the demand `i -> j` with `hubs` as the candidate hub list.
    #[tracing::instrument(level = "debug", skip(self, hubs), fields(origin = %i, destination = %j))]
    pub fn explore_with_hubs(
        &self,
        i: NodeIdentifier,
        j: NodeIdentifier,
        hubs: &[NodeIdentifier],
    ) -> Result<ExplorationOutcome, CandidateError> {
        let depth = self.generator.network().depth();
        let queue = self
            .generator
            .feasible_route_queue_by(i, j, hubs, self.ordering.clone())?;
        let candidates: Vec<Arc<Route>> = queue.iter().cloned().collect();

        let mut search = Search::new(self.config.upper_bound());
        for root in queue {
            search.stats.roots += 1;
            search.offer(ContingencyTree::new(root, &candidates, depth));
        }

        while let Some(Open { value, tree, .. }) = search.frontier.pop() {
            if value >= search.bound {
                search.stats.pruned += 1 + search.frontier.len();
                search.frontier.clear();
                break;
            }
            if self
                .config
                .max_expansions
                .is_some_and(|max| search.stats.expanded >= max)
            {
                search.stats.truncated = true;
                break;
            }
            search.stats.expanded += 1;

            let Some(position) = tree.next_position() else {
                continue;
            };
            let available = tree.available_routes_shared(position).unwrap_or_default();
            if available.is_empty() {
                search.stats.dead_ends += 1;
                search.offer(tree.leave_unprotected(position));
                continue;
            }
            for route in available.iter() {
                search.offer(tree.assign(position, Arc::clone(route), &candidates));
            }
        }

        tracing::debug!(
            value = ?search.incumbent.as_ref().map(ContingencyTree::value),
            stats = %search.stats,
            "exploration finished"
        );
        Ok(ExplorationOutcome {
            best: search.incumbent,
            stats: search.stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{candidates::cache::RouteCache, route::ordering::ByExpectedCost};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use reliable_hub_core::prelude::Probability;
    use reliable_hub_model::prelude::{Network, NetworkBuilder};

    #[inline]
    fn nid(n: usize) -> NodeIdentifier {
        NodeIdentifier::new(n)
    }
    #[inline]
    fn p(v: f64) -> Probability {
        Probability::new(v).unwrap()
    }

    // Spokes 0 and 4; hubs 1, 2, 3.
    fn network(depth: usize) -> Network {
        let mut b = NetworkBuilder::new().with_alpha(0.5).with_depth(depth);
        b.add_node(nid(0), p(0.0))
            .add_node(nid(1), p(0.1))
            .add_node(nid(2), p(0.2))
            .add_node(nid(3), p(0.05))
            .add_node(nid(4), p(0.0))
            .add_hub(nid(1))
            .add_hub(nid(2))
            .add_hub(nid(3));
        b.with_distances(vec![
            vec![0.0, 1.0, 8.0, 4.0, 10.0],
            vec![1.0, 0.0, 3.0, 2.0, 9.0],
            vec![8.0, 3.0, 0.0, 5.0, 2.0],
            vec![4.0, 2.0, 5.0, 0.0, 6.0],
            vec![10.0, 9.0, 2.0, 6.0, 0.0],
        ])
        .build()
        .unwrap()
    }

    fn random_network(rng: &mut ChaCha8Rng, n: usize, hubs: usize, depth: usize) -> Network {
        let pts: Vec<(f64, f64)> = (0..n)
            .map(|_| (rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
            .collect();
        let distances = pts
            .iter()
            .map(|a| {
                pts.iter()
                    .map(|b| ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt())
                    .collect()
            })
            .collect();
        let mut b = NetworkBuilder::new().with_alpha(0.3).with_depth(depth);
        for id in 0..n {
            let failure = if id < hubs { rng.random_range(0.01..0.3) } else { 0.0 };
            b.add_node(nid(id), p(failure));
            if id < hubs {
                b.add_hub(nid(id));
            }
        }
        b.with_distances(distances).build().unwrap()
    }

    fn default_explorer<'a>(net: &'a Network, cache: &'a RouteCache) -> PlanExplorer<'a> {
        PlanExplorer::new(CandidateGenerator::new(net, cache), ExplorerConfig::default())
    }

    /// Minimum value over every complete tree reachable from every root.
    fn brute_force(tree: &ContingencyTree, candidates: &[Arc<Route>]) -> Cost {
        if tree.is_complete() {
            return tree.value();
        }
        let Some(position) = tree.next_position() else {
            return tree.value();
        };
        let available = tree.available_routes(position).unwrap();
        if available.is_empty() {
            return brute_force(&tree.leave_unprotected(position), candidates);
        }
        available
            .iter()
            .map(|r| brute_force(&tree.assign(position, Arc::clone(r), candidates), candidates))
            .fold(Cost::INFINITY, Cost::min)
    }

    fn optimum(net: &Network, i: NodeIdentifier, j: NodeIdentifier) -> Cost {
        let cache = RouteCache::new();
        let gen_ = CandidateGenerator::new(net, &cache);
        let candidates = gen_.feasible_routes(i, j, net.hubs()).unwrap();
        candidates
            .iter()
            .map(|r| {
                let root = ContingencyTree::new(Arc::clone(r), &candidates, net.depth());
                brute_force(&root, &candidates)
            })
            .fold(Cost::INFINITY, Cost::min)
    }

    #[test]
    fn test_finds_optimum_on_fixed_network() {
        for depth in 0..=2 {
            let net = network(depth);
            let cache = RouteCache::new();
            let explorer = default_explorer(&net, &cache);
            let outcome = explorer.explore(nid(0), nid(4)).unwrap();
            let best = outcome.best.as_ref().unwrap();
            assert!(best.is_complete());
            assert!(!best.is_pruned());
            assert!((best.value() - optimum(&net, nid(0), nid(4))).abs() < 1e-9);
            assert_eq!(outcome.stats.roots, 6);
            assert!(outcome.stats.completed >= 1);
            assert!(!outcome.stats.truncated);
        }
    }

    #[test]
    fn test_depth_zero_picks_cheapest_expected_route() {
        let net = network(0);
        let cache = RouteCache::new();
        let gen_ = CandidateGenerator::new(&net, &cache);
        let explorer = PlanExplorer::new(gen_, ExplorerConfig::default());
        let outcome = explorer.explore(nid(0), nid(4)).unwrap();
        let expected = gen_
            .feasible_routes(nid(0), nid(4), net.hubs())
            .unwrap()
            .iter()
            .map(|r| r.exp_cost())
            .fold(Cost::INFINITY, Cost::min);
        assert!((outcome.value().unwrap() - expected).abs() < 1e-12);
        assert_eq!(outcome.stats.expanded, 0);
    }

    #[test]
    fn test_matches_brute_force_on_random_networks() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..5 {
            let net = random_network(&mut rng, 6, 3, 2);
            let cache = RouteCache::new();
            let explorer = default_explorer(&net, &cache);
            for (i, j) in net.demand_pairs() {
                let outcome = explorer.explore(i, j).unwrap();
                let got = outcome.value().unwrap();
                assert!(
                    (got - optimum(&net, i, j)).abs() < 1e-9,
                    "pair {i} -> {j}: explorer {got}"
                );
            }
        }
    }

    #[test]
    fn test_ordering_does_not_change_optimum() {
        let net = network(2);
        let cache = RouteCache::new();
        let gen_ = CandidateGenerator::new(&net, &cache);
        let by_value = PlanExplorer::new(gen_, ExplorerConfig::default())
            .explore(nid(0), nid(4))
            .unwrap();
        let by_exp = PlanExplorer::with_ordering(gen_, ExplorerConfig::default(), ByExpectedCost)
            .explore(nid(0), nid(4))
            .unwrap();
        assert!((by_value.value().unwrap() - by_exp.value().unwrap()).abs() < 1e-9);
    }

    #[test]
    fn test_tight_initial_bound_prunes_everything() {
        let net = network(1);
        let cache = RouteCache::new();
        let config = ExplorerConfig::default().with_initial_upper_bound(0.0);
        let outcome = PlanExplorer::new(CandidateGenerator::new(&net, &cache), config)
            .explore(nid(0), nid(4))
            .unwrap();
        assert!(outcome.best.is_none());
        assert_eq!(outcome.stats.pruned, outcome.stats.roots);
        assert_eq!(outcome.stats.expanded, 0);
    }

    #[test]
    fn test_expansion_budget_truncates() {
        let net = network(2);
        let cache = RouteCache::new();
        let config = ExplorerConfig::default().with_max_expansions(0);
        let outcome = PlanExplorer::new(CandidateGenerator::new(&net, &cache), config)
            .explore(nid(0), nid(4))
            .unwrap();
        assert!(outcome.stats.truncated);
        assert_eq!(outcome.stats.expanded, 0);
        assert!(outcome.best.is_none());
    }

    #[test]
    fn test_dead_ends_are_left_unprotected() {
        // Only two hubs: after both fail nothing is left.
        let mut b = NetworkBuilder::new().with_alpha(0.5).with_depth(2);
        b.add_node(nid(0), p(0.0))
            .add_node(nid(1), p(0.1))
            .add_node(nid(2), p(0.2))
            .add_node(nid(3), p(0.0))
            .add_hub(nid(1))
            .add_hub(nid(2));
        let net = b
            .with_distances(vec![
                vec![0.0, 1.0, 2.0, 5.0],
                vec![1.0, 0.0, 1.0, 2.0],
                vec![2.0, 1.0, 0.0, 1.0],
                vec![5.0, 2.0, 1.0, 0.0],
            ])
            .build()
            .unwrap();
        let cache = RouteCache::new();
        let outcome = default_explorer(&net, &cache)
            .explore(nid(0), nid(3))
            .unwrap();
        let best = outcome.best.unwrap();
        assert!(best.is_complete());
        assert!(outcome.stats.dead_ends > 0);
        assert!((best.value() - optimum(&net, nid(0), nid(3))).abs() < 1e-9);
    }

    #[test]
    fn test_reliable_hub_beats_always_failing_hub() {
        // Hub 1 always fails and costs 10 through; hub 2 never fails and costs 6.
        for depth in 0..=1 {
            let mut b = NetworkBuilder::new().with_alpha(0.5).with_depth(depth);
            b.add_node(nid(0), p(0.0))
                .add_node(nid(1), p(1.0))
                .add_node(nid(2), p(0.0))
                .add_node(nid(3), p(0.0))
                .add_hub(nid(1))
                .add_hub(nid(2));
            let net = b
                .with_distances(vec![
                    vec![0.0, 5.0, 3.0, 20.0],
                    vec![5.0, 0.0, 4.0, 5.0],
                    vec![3.0, 4.0, 0.0, 3.0],
                    vec![20.0, 5.0, 3.0, 0.0],
                ])
                .build()
                .unwrap();
            let cache = RouteCache::new();
            let explorer = default_explorer(&net, &cache);
            let best = explorer.explore(nid(0), nid(3)).unwrap().best.unwrap();
            assert_eq!(best.root().to_string(), "0-2-2-3");
            assert!((best.value() - 6.0).abs() < 1e-12, "depth {depth}: {}", best.value());
        }
    }

    #[test]
    fn test_candidate_errors_propagate() {
        let net = network(1);
        let cache = RouteCache::new();
        let explorer = default_explorer(&net, &cache);
        assert!(matches!(
            explorer.explore(nid(0), nid(0)),
            Err(CandidateError::IdenticalEndpoints(_))
        ));
        assert!(matches!(
            explorer.explore_with_hubs(nid(0), nid(4), &[]),
            Err(CandidateError::EmptyHubList(_))
        ));
    }

    #[test]
    fn test_parallel_demands_share_cache() {
        use rayon::prelude::*;

        let net = network(2);
        let cache = RouteCache::new();
        let explorer = default_explorer(&net, &cache);
        let pairs: Vec<_> = net.demand_pairs().collect();
        let values: Vec<Cost> = pairs
            .par_iter()
            .map(|&(i, j)| explorer.explore(i, j).unwrap().value().unwrap())
            .collect();
        for (&(i, j), v) in pairs.iter().zip(values) {
            assert!((v - optimum(&net, i, j)).abs() < 1e-9);
        }
    }

    mod static_assertions {
        use crate::explorer::bnb::{ExplorationOutcome, PlanExplorer};
        use ::static_assertions::assert_impl_all;

        assert_impl_all!(PlanExplorer<'static>: Send, Sync);
        assert_impl_all!(ExplorationOutcome: Send, Sync);
    }
}
