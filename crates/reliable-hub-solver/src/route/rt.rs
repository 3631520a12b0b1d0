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

use crate::route::key::RouteKey;
use reliable_hub_core::prelude::Cost;
use reliable_hub_model::prelude::{Network, Node, NodeIdentifier};
use smallvec::SmallVec;

/// Which contingencies a route opens once it is committed to a tree position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branching {
    /// Both legs end at hub endpoints; nothing can fail.
    Leaf,
    /// Only the first-leg hub `k` may fail (left child).
    FirstLeg,
    /// Only the second-leg hub `m` may fail (right child).
    SecondLeg,
    /// Both hubs may fail independently (left and right child).
    BothLegs,
}

impl Branching {
    #[inline]
    pub fn has_left(self) -> bool {
        matches!(self, Branching::FirstLeg | Branching::BothLegs)
    }

    #[inline]
    pub fn has_right(self) -> bool {
        matches!(self, Branching::SecondLeg | Branching::BothLegs)
    }
}

/// A directed route `i -> k -> m -> j` through zero, one or two hubs.
///
/// Routes are immutable and shared as `Arc<Route>`; equality and hashing use
/// the four node identifiers only, never the cost figures.
#[derive(Debug, Clone)]
pub struct Route {
    i: Node,
    k: Node,
    m: Node,
    j: Node,
    cost: Cost,
    exp_cost: Cost,
    value: Cost,
}

#[inline]
fn leg(network: &Network, from: Node, to: Node) -> Cost {
    if from == to {
        0.0
    } else {
        network.distance(from.id(), to.id())
    }
}

impl Route {
    /// Prices the route against `network`:
    /// `cost = d(i,k) + alpha * d(k,m) + d(m,j)` and `value = exp_cost = cost`.
    ///
    /// The primary route is charged in full whether or not its hubs fail;
    /// backups assigned by a contingency tree add on top of it.
    pub fn new(i: Node, k: Node, m: Node, j: Node, network: &Network) -> Self {
        let cost = leg(network, i, k) + network.alpha() * leg(network, k, m) + leg(network, m, j);
        Self::with_costs(i, k, m, j, cost, cost, cost)
    }

    /// Builds a route from externally priced figures.
    #[inline]
    pub fn with_costs(
        i: Node,
        k: Node,
        m: Node,
        j: Node,
        cost: Cost,
        exp_cost: Cost,
        value: Cost,
    ) -> Self {
        Self {
            i,
            k,
            m,
            j,
            cost,
            exp_cost,
            value,
        }
    }

    #[inline]
    pub fn i(&self) -> Node {
        self.i
    }

    #[inline]
    pub fn k(&self) -> Node {
        self.k
    }

    #[inline]
    pub fn m(&self) -> Node {
        self.m
    }

    #[inline]
    pub fn j(&self) -> Node {
        self.j
    }

    #[inline]
    pub fn key(&self) -> RouteKey {
        RouteKey::new(self.i.id(), self.k.id(), self.m.id(), self.j.id())
    }

    #[inline]
    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// Baseline charged when this route sits at the root of a tree.
    #[inline]
    pub fn exp_cost(&self) -> Cost {
        self.exp_cost
    }

    #[inline]
    pub fn value(&self) -> Cost {
        self.value
    }

    /// Whether `hub` serves either leg of the route.
    #[inline]
    pub fn uses_hub(&self, hub: NodeIdentifier) -> bool {
        self.k.id() == hub || self.m.id() == hub
    }

    #[inline]
    pub fn uses_any_hub(&self, hubs: &[Node]) -> bool {
        hubs.iter().any(|h| self.uses_hub(h.id()))
    }

    pub fn branching(&self) -> Branching {
        let first_at_origin = self.i == self.k;
        let second_at_destination = self.j == self.m;
        if self.k == self.m {
            // A single hub serves both legs; its failure is one event.
            return if !first_at_origin && !second_at_destination {
                Branching::FirstLeg
            } else {
                Branching::Leaf
            };
        }
        match (first_at_origin, second_at_destination) {
            (true, true) => Branching::Leaf,
            (true, false) => Branching::SecondLeg,
            (false, true) => Branching::FirstLeg,
            (false, false) => Branching::BothLegs,
        }
    }

    /// Hubs whose failure requires a backup, first leg first.
    #[inline]
    pub fn failable_hubs(&self) -> SmallVec<[Node; 2]> {
        let b = self.branching();
        let mut out = SmallVec::new();
        if b.has_left() {
            out.push(self.k);
        }
        if b.has_right() {
            out.push(self.m);
        }
        out
    }
}

impl PartialEq for Route {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Route {}

impl std::hash::Hash for Route {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reliable_hub_core::prelude::Probability;
    use reliable_hub_model::prelude::NetworkBuilder;

    #[inline]
    fn nid(n: usize) -> NodeIdentifier {
        NodeIdentifier::new(n)
    }
    #[inline]
    fn p(v: f64) -> Probability {
        Probability::new(v).unwrap()
    }

    // 0 = X (spoke), 1 = A (hub, 0.1), 2 = B (hub, 0.2), 3 = Y (spoke)
    fn network() -> Network {
        let mut b = NetworkBuilder::new().with_alpha(0.5);
        b.add_node(nid(0), p(0.0))
            .add_node(nid(1), p(0.1))
            .add_node(nid(2), p(0.2))
            .add_node(nid(3), p(0.0))
            .add_hub(nid(1))
            .add_hub(nid(2));
        b.with_distances(vec![
            vec![0.0, 2.0, 6.0, 9.0],
            vec![2.0, 0.0, 4.0, 7.0],
            vec![6.0, 4.0, 0.0, 3.0],
            vec![9.0, 7.0, 3.0, 0.0],
        ])
        .build()
        .unwrap()
    }

    fn route(net: &Network, i: usize, k: usize, m: usize, j: usize) -> Route {
        let n = |x: usize| *net.node(nid(x)).unwrap();
        Route::new(n(i), n(k), n(m), n(j), net)
    }

    #[test]
    fn test_cost_discounts_inter_hub_leg() {
        let net = network();
        let r = route(&net, 0, 1, 2, 3);
        // 2 + 0.5 * 4 + 3
        assert!((r.cost() - 7.0).abs() < 1e-12);
        assert_eq!(r.value(), r.cost());
    }

    #[test]
    fn test_single_hub_route_has_no_inter_hub_leg() {
        let net = network();
        let r = route(&net, 0, 1, 1, 3);
        assert!((r.cost() - 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_exp_cost_charges_full_cost_regardless_of_failures() {
        let net = network();
        for r in [
            route(&net, 0, 1, 2, 3),
            route(&net, 0, 1, 1, 3),
            route(&net, 1, 1, 2, 2),
        ] {
            assert_eq!(r.exp_cost(), r.cost());
        }
    }

    #[test]
    fn test_always_failing_hub_is_not_free() {
        let mut b = NetworkBuilder::new().with_alpha(0.5);
        b.add_node(nid(0), p(0.0))
            .add_node(nid(1), p(1.0))
            .add_node(nid(2), p(0.0))
            .add_hub(nid(1));
        let net = b
            .with_distances(vec![
                vec![0.0, 4.0, 8.0],
                vec![4.0, 0.0, 4.0],
                vec![8.0, 4.0, 0.0],
            ])
            .build()
            .unwrap();
        let r = route(&net, 0, 1, 1, 2);
        assert_eq!(r.failable_hubs().len(), 1);
        assert!((r.exp_cost() - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_branching_table() {
        let net = network();
        assert_eq!(route(&net, 1, 1, 2, 2).branching(), Branching::Leaf);
        assert_eq!(route(&net, 1, 1, 2, 3).branching(), Branching::SecondLeg);
        assert_eq!(route(&net, 0, 1, 2, 2).branching(), Branching::FirstLeg);
        assert_eq!(route(&net, 0, 1, 2, 3).branching(), Branching::BothLegs);
        assert_eq!(route(&net, 0, 1, 1, 3).branching(), Branching::FirstLeg);
        // One hub at an endpoint serving both legs.
        assert_eq!(route(&net, 1, 1, 1, 3).branching(), Branching::Leaf);
        assert_eq!(route(&net, 0, 2, 2, 2).branching(), Branching::Leaf);
    }

    #[test]
    fn test_failable_hubs_follow_branching() {
        let net = network();
        let ids = |r: Route| -> Vec<usize> {
            r.failable_hubs().iter().map(|n| n.id().value()).collect()
        };
        assert_eq!(ids(route(&net, 0, 1, 2, 3)), vec![1, 2]);
        assert_eq!(ids(route(&net, 1, 1, 2, 3)), vec![2]);
        assert_eq!(ids(route(&net, 0, 1, 1, 3)), vec![1]);
        assert!(ids(route(&net, 1, 1, 2, 2)).is_empty());
    }

    #[test]
    fn test_equality_ignores_costs() {
        let net = network();
        let n = |x: usize| *net.node(nid(x)).unwrap();
        let priced = route(&net, 0, 1, 2, 3);
        let custom = Route::with_costs(n(0), n(1), n(2), n(3), 1.0, 1.0, 1.0);
        let other = route(&net, 0, 2, 1, 3);
        assert_eq!(priced, custom);
        assert_ne!(priced, other);
    }

    #[test]
    fn test_uses_hub_checks_both_legs() {
        let net = network();
        let r = route(&net, 0, 1, 2, 3);
        assert!(r.uses_hub(nid(1)));
        assert!(r.uses_hub(nid(2)));
        assert!(!r.uses_hub(nid(0)));
        assert!(!r.uses_hub(nid(3)));
        assert!(r.uses_any_hub(&[*net.node(nid(2)).unwrap()]));
        assert!(!r.uses_any_hub(&[]));
    }

    #[test]
    fn test_display() {
        let net = network();
        assert_eq!(route(&net, 0, 1, 2, 3).to_string(), "0-1-2-3");
    }
}
