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
    candidates::filter::exclude_hubs,
    route::rt::Route,
    tree::position::{self, ROOT},
};
use reliable_hub_core::prelude::{Cost, Probability};
use reliable_hub_model::prelude::Node;
use smallvec::SmallVec;
use std::{collections::VecDeque, sync::Arc};

/// Hubs whose failure led to a position, outermost failure first.
pub type FailedHubs = SmallVec<[Node; 4]>;

/// A (partial) contingency plan for one demand, encoded as a binary tree
/// over a flat array.
///
/// Position `0` holds the primary route. The left child of a position holds
/// the backup used when that position's first-leg hub fails, the right child
/// the backup for its second-leg hub. Only positions up to
/// [`position::max_position`] of the depth limit are ever opened; deeper
/// failures are accepted unprotected.
///
/// Trees are persistent: [`ContingencyTree::assign`] returns a new tree and
/// leaves `self` untouched. Per-position collections sit behind `Arc`; an
/// extension replaces the slots it touches and shares all others.
#[derive(Debug, Clone)]
pub struct ContingencyTree {
    root: Arc<Route>,
    routes: Vec<Option<Arc<Route>>>,
    used_hubs: Vec<Option<Arc<FailedHubs>>>,
    available: Vec<Option<Arc<Vec<Arc<Route>>>>>,
    unexplored: VecDeque<usize>,
    depth_limit: usize,
    value: Cost,
    complete: bool,
    pruned: bool,
}

impl ContingencyTree {
    /// Starts a plan with `root` as the primary route. `candidates` seeds the
    /// root's available set and, filtered, those of every contingency opened.
    pub fn new(root: Arc<Route>, candidates: &[Arc<Route>], depth_limit: usize) -> Self {
        let mut tree = Self {
            root: Arc::clone(&root),
            routes: vec![None],
            used_hubs: vec![Some(Arc::new(FailedHubs::new()))],
            available: vec![Some(Arc::new(candidates.to_vec()))],
            unexplored: VecDeque::from([ROOT]),
            depth_limit,
            value: 0.0,
            complete: false,
            pruned: false,
        };
        tree.commit(ROOT, root, candidates);
        tree
    }

    /// Commits `route` at `position` in a new tree.
    ///
    /// `candidates` is the route pool of the demand; every contingency the
    /// route opens gets this pool minus the routes through any hub failed on
    /// its path.
    ///
    /// # Panics
    /// If the tree is pruned or complete, `position` lies past the depth
    /// limit or is already filled, `position` is not the next queued
    /// position, or `route` uses a hub already failed on the path to it.
    pub fn assign(&self, position: usize, route: Arc<Route>, candidates: &[Arc<Route>]) -> Self {
        assert!(!self.pruned, "cannot extend a pruned contingency tree");
        assert!(!self.complete, "cannot extend a complete contingency tree");
        let mut next = self.clone();
        next.commit(position, route, candidates);
        next
    }

    /// Closes `position` without a backup in a new tree. Used when no
    /// candidate avoids the hubs failed on its path; the scenario is then
    /// served by nothing and contributes no cost.
    ///
    /// # Panics
    /// Under the same conditions as [`ContingencyTree::assign`], except for
    /// the route check.
    pub fn leave_unprotected(&self, position: usize) -> Self {
        assert!(!self.pruned, "cannot extend a pruned contingency tree");
        assert!(!self.complete, "cannot extend a complete contingency tree");
        self.check_next(position);
        let mut next = self.clone();
        next.unexplored.pop_front();
        next.complete = next.unexplored.is_empty();
        next
    }

    fn check_next(&self, position: usize) {
        assert!(
            position <= self.max_position(),
            "position {position} exceeds the capacity of depth {}",
            self.depth_limit
        );
        assert!(
            self.routes.get(position).is_none_or(Option::is_none),
            "position {position} is already assigned"
        );
        assert_eq!(
            self.unexplored.front().copied(),
            Some(position),
            "position {position} is not the next unexplored position"
        );
    }

    fn commit(&mut self, position: usize, route: Arc<Route>, candidates: &[Arc<Route>]) {
        self.check_next(position);
        let failed = self.used_hubs[position].clone().unwrap_or_default();
        assert!(
            !route.uses_any_hub(&failed),
            "route {route} reuses a hub failed on the path to position {position}"
        );

        self.unexplored.pop_front();

        if let Some(slot) = self.available[position].as_mut() {
            if slot.iter().any(|r| **r == *route) {
                let rest: Vec<Arc<Route>> =
                    slot.iter().filter(|r| ***r != *route).cloned().collect();
                *slot = Arc::new(rest);
            }
        }

        let branching = route.branching();
        let mut opened: SmallVec<[(usize, Node); 2]> = SmallVec::new();
        if branching.has_left() {
            if let Some(c) = position::left(position) {
                opened.push((c, route.k()));
            }
        }
        if branching.has_right() {
            if let Some(c) = position::right(position) {
                opened.push((c, route.m()));
            }
        }
        self.routes[position] = Some(route);

        let max = self.max_position();
        for (child, hub) in opened.into_iter().filter(|&(c, _)| c <= max) {
            self.open(child, &failed, hub, candidates);
        }

        self.update_value();
        self.complete = self.unexplored.is_empty();
    }

    fn open(&mut self, child: usize, inherited: &FailedHubs, hub: Node, candidates: &[Arc<Route>]) {
        if self.routes.len() <= child {
            self.routes.resize(child + 1, None);
            self.used_hubs.resize(child + 1, None);
            self.available.resize(child + 1, None);
        }
        let mut path = inherited.clone();
        path.push(hub);
        self.available[child] = Some(Arc::new(exclude_hubs(candidates, &path)));
        self.used_hubs[child] = Some(Arc::new(path));
        self.unexplored.push_back(child);
    }

    /// `value = exp_cost(root) + sum over assigned p > 0 of cost(p) * P(path to p)`.
    fn update_value(&mut self) {
        let mut value = self.root.exp_cost();
        for p in 1..self.routes.len() {
            if let Some(r) = &self.routes[p] {
                value += self.failure_mass(p) * r.cost();
            }
        }
        self.value = value;
    }

    /// Probability of the failure sequence leading to `p`; `1` for the root
    /// and `0` for positions never opened.
    #[inline]
    pub fn failure_mass(&self, p: usize) -> Probability {
        match self.used_hubs.get(p) {
            Some(Some(hubs)) => hubs.iter().map(|h| h.failure()).product(),
            _ => Probability::ZERO,
        }
    }

    #[inline]
    pub fn value(&self) -> Cost {
        self.value
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    #[inline]
    pub fn is_pruned(&self) -> bool {
        self.pruned
    }

    /// Marks the tree as non-competitive; it must not be extended afterwards.
    #[inline]
    pub fn prune(&mut self) {
        self.pruned = true;
    }

    #[inline]
    pub fn depth_limit(&self) -> usize {
        self.depth_limit
    }

    #[inline]
    pub fn max_position(&self) -> usize {
        position::max_position(self.depth_limit)
    }

    #[inline]
    pub fn root(&self) -> &Arc<Route> {
        &self.root
    }

    #[inline]
    pub fn route(&self, p: usize) -> Option<&Arc<Route>> {
        self.routes.get(p).and_then(Option::as_ref)
    }

    /// Assigned positions with their routes, in position order.
    #[inline]
    pub fn routes(&self) -> impl Iterator<Item = (usize, &Arc<Route>)> + '_ {
        self.routes
            .iter()
            .enumerate()
            .filter_map(|(p, r)| r.as_ref().map(|r| (p, r)))
    }

    #[inline]
    pub fn assigned(&self) -> usize {
        self.routes.iter().filter(|r| r.is_some()).count()
    }

    #[inline]
    pub fn used_hubs(&self, p: usize) -> Option<&[Node]> {
        self.used_hubs
            .get(p)
            .and_then(Option::as_ref)
            .map(|h| h.as_slice())
    }

    #[inline]
    pub fn available_routes(&self, p: usize) -> Option<&[Arc<Route>]> {
        self.available
            .get(p)
            .and_then(Option::as_ref)
            .map(|v| v.as_slice())
    }

    /// Shared handle to the available set of `p`, for callers that keep it
    /// while extending the tree.
    #[inline]
    pub fn available_routes_shared(&self, p: usize) -> Option<Arc<Vec<Arc<Route>>>> {
        self.available.get(p).and_then(Clone::clone)
    }

    #[inline]
    pub fn next_position(&self) -> Option<usize> {
        self.unexplored.front().copied()
    }

    #[inline]
    pub fn unexplored(&self) -> impl Iterator<Item = usize> + '_ {
        self.unexplored.iter().copied()
    }
}

impl std::fmt::Display for ContingencyTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (p, r) in self.routes() {
            writeln!(f, "{p}) {r}")?;
        }
        write!(f, "value: {}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reliable_hub_model::prelude::NodeIdentifier;

    #[inline]
    fn p(v: f64) -> Probability {
        Probability::new(v).unwrap()
    }

    const X: usize = 0;
    const A: usize = 1;
    const B: usize = 2;
    const C: usize = 3;
    const Y: usize = 9;

    fn node(n: usize) -> Node {
        let id = NodeIdentifier::new(n);
        match n {
            A => Node::hub(id, p(0.1)),
            B => Node::hub(id, p(0.2)),
            C => Node::hub(id, p(0.5)),
            _ => Node::new(id, p(0.0)),
        }
    }

    fn route(i: usize, k: usize, m: usize, j: usize, cost: f64) -> Arc<Route> {
        Arc::new(Route::with_costs(
            node(i),
            node(k),
            node(m),
            node(j),
            cost,
            cost,
            cost,
        ))
    }

    fn pool() -> Vec<Arc<Route>> {
        vec![
            route(X, A, B, Y, 10.0),
            route(X, B, C, Y, 15.0),
            route(X, A, C, Y, 12.0),
            route(X, C, C, Y, 20.0),
            route(X, A, A, Y, 11.0),
        ]
    }

    fn find(pool: &[Arc<Route>], k: usize, m: usize) -> Arc<Route> {
        pool.iter()
            .find(|r| r.k().id().value() == k && r.m().id().value() == m)
            .cloned()
            .unwrap()
    }

    fn ids(hubs: &[Node]) -> Vec<usize> {
        hubs.iter().map(|h| h.id().value()).collect()
    }

    #[test]
    fn test_scenario_two_hubs_depth_one() {
        let pool = pool();
        let root = find(&pool, A, B);
        let t0 = ContingencyTree::new(root, &pool, 1);
        assert!(!t0.is_complete());
        assert_eq!(t0.unexplored().collect::<Vec<_>>(), vec![1, 2]);
        assert!((t0.value() - 10.0).abs() < 1e-12);

        // Backup for A's failure.
        let t1 = t0.assign(1, find(&pool, B, C), &pool);
        assert!((t1.value() - 11.5).abs() < 1e-12);
        assert!(!t1.is_complete());

        // Backup for B's failure.
        let t2 = t1.assign(2, find(&pool, A, C), &pool);
        assert!((t2.value() - 13.9).abs() < 1e-12);
        assert!(t2.is_complete());

        // Earlier generations are untouched.
        assert!((t0.value() - 10.0).abs() < 1e-12);
        assert_eq!(t0.assigned(), 1);
        assert_eq!(t1.assigned(), 2);
        assert_eq!(t2.assigned(), 3);
    }

    #[test]
    fn test_value_is_root_baseline_plus_weighted_child() {
        let pool = pool();
        let root = Arc::new(Route::with_costs(
            node(X),
            node(A),
            node(A),
            node(Y),
            11.0,
            7.0,
            11.0,
        ));
        let t0 = ContingencyTree::new(root, &pool, 1);
        assert_eq!(t0.unexplored().collect::<Vec<_>>(), vec![1]);
        let t1 = t0.assign(1, find(&pool, B, C), &pool);
        assert!((t1.value() - (7.0 + 15.0 * 0.1)).abs() < 1e-12);
        assert!(t1.is_complete());
    }

    #[test]
    fn test_depth_zero_is_complete_at_root() {
        let pool = pool();
        let t = ContingencyTree::new(find(&pool, A, B), &pool, 0);
        assert_eq!(t.max_position(), 0);
        assert!(t.is_complete());
        assert_eq!(t.next_position(), None);
        assert!((t.value() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_leaf_route_completes_immediately() {
        let direct = route(A, A, B, B, 4.0);
        let t = ContingencyTree::new(direct.clone(), &[direct], 3);
        assert!(t.is_complete());
        assert_eq!(t.assigned(), 1);
    }

    #[test]
    fn test_branching_enqueues_expected_children() {
        let pool = pool();
        let both = ContingencyTree::new(find(&pool, A, B), &pool, 2);
        assert_eq!(both.unexplored().collect::<Vec<_>>(), vec![1, 2]);

        let single = ContingencyTree::new(find(&pool, A, A), &pool, 2);
        assert_eq!(single.unexplored().collect::<Vec<_>>(), vec![1]);

        let from_hub = route(A, A, B, Y, 3.0);
        let t = ContingencyTree::new(from_hub.clone(), &[from_hub], 2);
        assert_eq!(t.unexplored().collect::<Vec<_>>(), vec![2]);

        let to_hub = route(X, A, B, B, 3.0);
        let t = ContingencyTree::new(to_hub.clone(), &[to_hub], 2);
        assert_eq!(t.unexplored().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_used_hubs_are_inherited_and_extended() {
        let pool = pool();
        let t0 = ContingencyTree::new(find(&pool, A, B), &pool, 2);
        assert_eq!(ids(t0.used_hubs(0).unwrap()), Vec::<usize>::new());
        assert_eq!(ids(t0.used_hubs(1).unwrap()), vec![A]);
        assert_eq!(ids(t0.used_hubs(2).unwrap()), vec![B]);

        // Position 1 (A failed) uses B -> C, opening 3 (B failed) and 4 (C failed).
        let t1 = t0.assign(1, find(&pool, B, C), &pool);
        assert_eq!(t1.unexplored().collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(ids(t1.used_hubs(3).unwrap()), vec![A, B]);
        assert_eq!(ids(t1.used_hubs(4).unwrap()), vec![A, C]);

        for p in [1, 2, 3, 4] {
            let used = t1.used_hubs(p).unwrap();
            assert_eq!(used.len(), position::depth(p));
            if let Some(parent) = position::parent(p) {
                if p > 2 {
                    let prev = t1.used_hubs(parent).unwrap();
                    assert_eq!(&used[..prev.len()], prev);
                    let r = t1.route(parent).unwrap();
                    let expected = if position::is_left(p) { r.k() } else { r.m() };
                    assert_eq!(*used.last().unwrap(), expected);
                }
            }
        }
    }

    #[test]
    fn test_available_routes_never_reuse_failed_hubs() {
        let pool = pool();
        let t0 = ContingencyTree::new(find(&pool, A, B), &pool, 2);
        let t1 = t0.assign(1, find(&pool, B, C), &pool);
        for p in t1.unexplored() {
            let used = t1.used_hubs(p).unwrap();
            let avail = t1.available_routes(p).unwrap();
            assert!(avail.iter().all(|r| !r.uses_any_hub(used)));
        }
        // Every route avoiding A passes through B or C.
        assert!(t1.available_routes(4).unwrap().is_empty());
        assert_eq!(t1.available_routes(3).unwrap().len(), 1);
    }

    #[test]
    fn test_committed_route_leaves_its_available_set() {
        let pool = pool();
        let t0 = ContingencyTree::new(find(&pool, A, B), &pool, 1);
        let root_avail = t0.available_routes(0).unwrap();
        assert_eq!(root_avail.len(), pool.len() - 1);
        assert!(!root_avail.iter().any(|r| r.key() == find(&pool, A, B).key()));

        let before = t0.available_routes_shared(1).unwrap();
        let t1 = t0.assign(1, find(&pool, B, C), &pool);
        assert!(!t1
            .available_routes(1)
            .unwrap()
            .iter()
            .any(|r| r.key() == find(&pool, B, C).key()));
        // The parent's set is not mutated.
        assert_eq!(t0.available_routes(1).unwrap().len(), before.len());
        assert!(Arc::ptr_eq(&before, &t0.available_routes_shared(1).unwrap()));
        // Untouched slots are shared between generations.
        assert!(Arc::ptr_eq(
            &t0.available_routes_shared(2).unwrap(),
            &t1.available_routes_shared(2).unwrap()
        ));
    }

    #[test]
    fn test_children_beyond_depth_limit_are_not_opened() {
        let pool = pool();
        let t0 = ContingencyTree::new(find(&pool, A, B), &pool, 1);
        let t1 = t0.assign(1, find(&pool, B, C), &pool);
        assert_eq!(t1.unexplored().collect::<Vec<_>>(), vec![2]);
        assert!(t1.route(3).is_none());
        assert!(t1.used_hubs(3).is_none());
    }

    #[test]
    fn test_display_lists_positions_and_value() {
        let pool = pool();
        let t = ContingencyTree::new(find(&pool, A, B), &pool, 1)
            .assign(1, find(&pool, B, C), &pool)
            .assign(2, find(&pool, A, C), &pool);
        let s = t.to_string();
        let lines: Vec<_> = s.lines().collect();
        assert_eq!(lines[0], "0) 0-1-2-9");
        assert_eq!(lines[1], "1) 0-2-3-9");
        assert_eq!(lines[2], "2) 0-1-3-9");
        let value: f64 = lines[3].strip_prefix("value: ").unwrap().parse().unwrap();
        assert!((value - 13.9).abs() < 1e-9);
    }

    #[test]
    fn test_leave_unprotected_closes_position() {
        let pool = pool();
        let t0 = ContingencyTree::new(find(&pool, A, B), &pool, 2);
        let t1 = t0.assign(1, find(&pool, B, C), &pool);
        let t2 = t1.assign(2, find(&pool, C, C), &pool);
        // Position 3 has {A, B} failed and keeps X-C-C-Y; position 4 has nothing.
        let t3 = t2.assign(3, find(&pool, C, C), &pool);
        assert_eq!(t3.next_position(), Some(4));
        assert!(t3.available_routes(4).unwrap().is_empty());
        let t4 = t3.leave_unprotected(4);
        assert!(t4.route(4).is_none());
        assert!((t4.value() - t3.value()).abs() < 1e-12);
        // Position 5 ({B, C} failed) is still pending.
        assert_eq!(t4.next_position(), Some(5));
        assert!(!t3.is_complete());
    }

    #[test]
    fn test_failure_mass() {
        let pool = pool();
        let t = ContingencyTree::new(find(&pool, A, B), &pool, 2)
            .assign(1, find(&pool, B, C), &pool);
        assert_eq!(t.failure_mass(0), Probability::ONE);
        assert!((t.failure_mass(3).value() - 0.1 * 0.2).abs() < 1e-12);
        assert_eq!(t.failure_mass(40), Probability::ZERO);
    }

    #[test]
    fn test_prune_flag() {
        let pool = pool();
        let mut t = ContingencyTree::new(find(&pool, A, B), &pool, 1);
        assert!(!t.is_pruned());
        t.prune();
        assert!(t.is_pruned());
    }

    #[test]
    #[should_panic(expected = "cannot extend a pruned contingency tree")]
    fn test_assign_on_pruned_tree_panics() {
        let pool = pool();
        let mut t = ContingencyTree::new(find(&pool, A, B), &pool, 1);
        t.prune();
        let _ = t.assign(1, find(&pool, B, C), &pool);
    }

    #[test]
    #[should_panic(expected = "is not the next unexplored position")]
    fn test_assign_out_of_order_panics() {
        let pool = pool();
        let t = ContingencyTree::new(find(&pool, A, B), &pool, 1);
        let _ = t.assign(2, find(&pool, A, C), &pool);
    }

    #[test]
    #[should_panic(expected = "cannot extend a complete contingency tree")]
    fn test_assign_on_complete_tree_panics() {
        let pool = pool();
        let t = ContingencyTree::new(find(&pool, A, B), &pool, 0);
        let _ = t.assign(1, find(&pool, B, C), &pool);
    }

    #[test]
    #[should_panic(expected = "exceeds the capacity of depth 1")]
    fn test_assign_past_capacity_panics() {
        let pool = pool();
        let t = ContingencyTree::new(find(&pool, A, B), &pool, 1);
        let _ = t.assign(3, find(&pool, B, C), &pool);
    }

    #[test]
    #[should_panic(expected = "position 0 is already assigned")]
    fn test_assign_filled_position_panics() {
        let pool = pool();
        let t = ContingencyTree::new(find(&pool, A, B), &pool, 1);
        let _ = t.assign(0, find(&pool, B, C), &pool);
    }

    #[test]
    #[should_panic(expected = "exceeds the capacity of depth 1")]
    fn test_leave_unprotected_past_capacity_panics() {
        let pool = pool();
        let t = ContingencyTree::new(find(&pool, A, B), &pool, 1);
        let _ = t.leave_unprotected(5);
    }

    #[test]
    #[should_panic(expected = "reuses a hub failed on the path")]
    fn test_assign_failed_hub_panics() {
        let pool = pool();
        let t = ContingencyTree::new(find(&pool, A, B), &pool, 1);
        let _ = t.assign(1, find(&pool, A, C), &pool);
    }

    mod static_assertions {
        use crate::tree::contingency::ContingencyTree;
        use ::static_assertions::assert_impl_all;

        assert_impl_all!(ContingencyTree: Send, Sync, Clone);
    }
}
