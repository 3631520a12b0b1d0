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

use crate::network::{
    config::ReliabilityConfig,
    node::{Node, NodeIdentifier},
};
use reliable_hub_core::prelude::Cost;

#[inline(always)]
fn flatten_index(num_nodes: usize, from: NodeIdentifier, to: NodeIdentifier) -> usize {
    from.index() * num_nodes + to.index()
}

/// The immutable network model a contingency search runs against.
///
/// Holds every node (indexed densely by identifier), the pairwise distance
/// matrix flattened row-major, the designated hubs in the order they were
/// added, and the reliability parameters (`alpha`, `L`).
///
/// Construct it through [`crate::network::builder::NetworkBuilder`] or
/// [`crate::network::loader::NetworkLoader`]; both validate the inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    nodes: Vec<Node>,
    distances: Vec<Cost>,
    hubs: Vec<NodeIdentifier>,
    config: ReliabilityConfig,
}

impl Network {
    #[inline]
    pub(crate) fn from_parts(
        nodes: Vec<Node>,
        distances: Vec<Cost>,
        hubs: Vec<NodeIdentifier>,
        config: ReliabilityConfig,
    ) -> Self {
        debug_assert_eq!(distances.len(), nodes.len() * nodes.len());
        Self {
            nodes,
            distances,
            hubs,
            config,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[inline]
    pub fn node(&self, id: NodeIdentifier) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn contains(&self, id: NodeIdentifier) -> bool {
        id.index() < self.nodes.len()
    }

    /// Distance between two nodes of this network.
    ///
    /// # Panics
    /// If either identifier does not belong to the network.
    #[inline]
    pub fn distance(&self, from: NodeIdentifier, to: NodeIdentifier) -> Cost {
        let n = self.nodes.len();
        assert!(
            from.index() < n && to.index() < n,
            "distance({from}, {to}) queried on a network with {n} nodes"
        );
        self.distances[flatten_index(n, from, to)]
    }

    #[inline]
    pub fn hubs(&self) -> &[NodeIdentifier] {
        &self.hubs
    }

    #[inline]
    pub fn hub_nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.hubs.iter().map(|h| &self.nodes[h.index()])
    }

    #[inline]
    pub fn alpha(&self) -> f64 {
        self.config.alpha
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.config.depth
    }

    #[inline]
    pub fn config(&self) -> &ReliabilityConfig {
        &self.config
    }

    /// All ordered demand pairs `(i, j)` with `i != j`.
    #[inline]
    pub fn demand_pairs(&self) -> impl Iterator<Item = (NodeIdentifier, NodeIdentifier)> + '_ {
        let n = self.nodes.len();
        (0..n).flat_map(move |i| {
            (0..n)
                .filter(move |&j| j != i)
                .map(move |j| (NodeIdentifier::new(i), NodeIdentifier::new(j)))
        })
    }
}
