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
    err::{
        DistanceMatrixShapeError, EmptyNetworkError, InvalidAlphaError, InvalidDistanceError,
        MissingNodeError, NetworkError, UnknownHubError,
    },
    net::Network,
    node::{Node, NodeIdentifier},
};
use reliable_hub_core::prelude::{Cost, Probability};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct NetworkBuilder {
    failures: BTreeMap<NodeIdentifier, Probability>,
    hubs: Vec<NodeIdentifier>,
    distances: Vec<Vec<Cost>>,
    config: ReliabilityConfig,
}

impl NetworkBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_config(mut self, config: ReliabilityConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.config.alpha = alpha;
        self
    }

    #[inline]
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.config.depth = depth;
        self
    }

    #[inline]
    pub fn with_distances(mut self, distances: Vec<Vec<Cost>>) -> Self {
        self.distances = distances;
        self
    }

    #[inline]
    pub fn with_hubs<I>(mut self, hubs: I) -> Self
    where
        I: IntoIterator<Item = NodeIdentifier>,
    {
        self.hubs.clear();
        for h in hubs {
            self.add_hub(h);
        }
        self
    }

    #[inline]
    pub fn add_node(&mut self, id: NodeIdentifier, failure: Probability) -> &mut Self {
        self.failures.insert(id, failure);
        self
    }

    #[inline]
    pub fn extend_nodes<I>(&mut self, nodes: I) -> &mut Self
    where
        I: IntoIterator<Item = (NodeIdentifier, Probability)>,
    {
        self.failures.extend(nodes);
        self
    }

    /// Designates `id` as a hub. Duplicates are ignored; the first insertion
    /// fixes the position of the hub in the candidate order.
    #[inline]
    pub fn add_hub(&mut self, id: NodeIdentifier) -> &mut Self {
        if !self.hubs.contains(&id) {
            self.hubs.push(id);
        }
        self
    }

    pub fn build(self) -> Result<Network, NetworkError> {
        let n = self.failures.len();
        if n == 0 {
            return Err(EmptyNetworkError.into());
        }

        let alpha = self.config.alpha;
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(InvalidAlphaError::new(alpha).into());
        }

        // BTreeMap iteration is ordered, so contiguity means key == position.
        let mut nodes = Vec::with_capacity(n);
        for (expected, (&id, &failure)) in self.failures.iter().enumerate() {
            if id.index() != expected {
                return Err(MissingNodeError::new(NodeIdentifier::new(expected)).into());
            }
            nodes.push(Node::new(id, failure));
        }

        for &h in &self.hubs {
            if h.index() >= n {
                return Err(UnknownHubError::new(h).into());
            }
            nodes[h.index()] = nodes[h.index()].designated(true);
        }

        if self.distances.len() != n {
            return Err(DistanceMatrixShapeError::rows(n, self.distances.len()).into());
        }
        let mut flat = Vec::with_capacity(n * n);
        for (r, row) in self.distances.iter().enumerate() {
            if row.len() != n {
                return Err(DistanceMatrixShapeError::columns(n, r, row.len()).into());
            }
            for (c, &d) in row.iter().enumerate() {
                if !d.is_finite() || d < 0.0 {
                    return Err(InvalidDistanceError::new(
                        NodeIdentifier::new(r),
                        NodeIdentifier::new(c),
                        d,
                    )
                    .into());
                }
                flat.push(d);
            }
        }

        Ok(Network::from_parts(nodes, flat, self.hubs, self.config))
    }
}
