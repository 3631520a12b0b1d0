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
    candidates::{
        cache::RouteCache,
        err::{
            CandidateError, EmptyHubListError, IdenticalEndpointsError, NotAHubError,
            UnknownNodeError,
        },
        queue::CandidateQueue,
    },
    route::{
        key::RouteKey,
        ordering::{ByValue, RouteOrdering},
        rt::Route,
    },
};
use reliable_hub_model::prelude::{Network, Node, NodeIdentifier};
use smallvec::SmallVec;
use std::sync::Arc;

/// Builds the feasible routes of an endpoint pair over a hub list, memoizing
/// every route in a caller-owned [`RouteCache`].
///
/// The generator is a pair of shared references and is cheap to copy into
/// worker threads; all of them may share one cache.
#[derive(Debug, Clone, Copy)]
pub struct CandidateGenerator<'a> {
    network: &'a Network,
    cache: &'a RouteCache,
}

impl<'a> CandidateGenerator<'a> {
    #[inline]
    pub fn new(network: &'a Network, cache: &'a RouteCache) -> Self {
        Self { network, cache }
    }

    #[inline]
    pub fn network(&self) -> &'a Network {
        self.network
    }

    #[inline]
    pub fn cache(&self) -> &'a RouteCache {
        self.cache
    }

    #[inline]
    fn node(&self, id: NodeIdentifier) -> Result<Node, CandidateError> {
        self.network
            .node(id)
            .copied()
            .ok_or_else(|| UnknownNodeError::new(id).into())
    }

    fn hub_nodes(&self, hubs: &[NodeIdentifier]) -> Result<SmallVec<[Node; 16]>, CandidateError> {
        let mut out: SmallVec<[Node; 16]> = SmallVec::with_capacity(hubs.len());
        for &h in hubs {
            let node = self.node(h)?;
            if !node.is_hub() {
                return Err(NotAHubError::new(h).into());
            }
            if !out.contains(&node) {
                out.push(node);
            }
        }
        Ok(out)
    }

    /// Cached route for `(i, k, m, j)` exactly as given, built on a miss.
    #[inline]
    fn cached(&self, i: Node, k: Node, m: Node, j: Node) -> Arc<Route> {
        let key = RouteKey::new(i.id(), k.id(), m.id(), j.id());
        self.cache
            .get_or_insert_with(key, || Route::new(i, k, m, j, self.network))
    }

    /// The dominant ordering of the hub pair `{u, v}` between two spokes.
    ///
    /// Either cached ordering is returned as is; otherwise both are priced,
    /// the one with the smaller `value` is cached and the other dropped. Equal
    /// values keep the smaller key so concurrent callers agree on the winner.
    fn dominant(&self, i: Node, u: Node, v: Node, j: Node) -> Arc<Route> {
        let key = RouteKey::new(i.id(), u.id(), v.id(), j.id());
        if let Some(r) = self.cache.get_either(&key) {
            return r;
        }
        if u == v {
            return self.cached(i, u, u, j);
        }

        let forward = Route::new(i, u, v, j, self.network);
        let backward = Route::new(i, v, u, j, self.network);
        self.cache.record_build(2);
        let keep = match forward.value().total_cmp(&backward.value()) {
            std::cmp::Ordering::Less => forward,
            std::cmp::Ordering::Greater => backward,
            std::cmp::Ordering::Equal if forward.key() <= backward.key() => forward,
            std::cmp::Ordering::Equal => backward,
        };
        tracing::trace!(route = %keep, value = keep.value(), "cached dominant ordering");
        self.cache.insert(keep)
    }

    /// Feasible routes from `i` to `j` over `hubs`, unordered.
    ///
    /// - both endpoints hubs: `(i, i, j, j)` only;
    /// - origin hub: `(i, i, h, j)` per candidate `h`;
    /// - destination hub: `(i, h, j, j)` per candidate `h`;
    /// - neither: the dominant of `(i, u, v, j)` / `(i, v, u, j)` for every
    ///   unordered pair `{u, v}`, `u = v` included.
    pub fn feasible_routes(
        &self,
        i: NodeIdentifier,
        j: NodeIdentifier,
        hubs: &[NodeIdentifier],
    ) -> Result<Vec<Arc<Route>>, CandidateError> {
        if i == j {
            return Err(IdenticalEndpointsError::new(i).into());
        }
        let origin = self.node(i)?;
        let destination = self.node(j)?;
        let hubs = self.hub_nodes(hubs)?;

        let routes = match (origin.is_hub(), destination.is_hub()) {
            (true, true) => vec![self.cached(origin, origin, destination, destination)],
            (true, false) => hubs
                .iter()
                .map(|&h| self.cached(origin, origin, h, destination))
                .collect(),
            (false, true) => hubs
                .iter()
                .map(|&h| self.cached(origin, h, destination, destination))
                .collect(),
            (false, false) => {
                if hubs.is_empty() {
                    return Err(EmptyHubListError::new(i, j).into());
                }
                let mut out = Vec::with_capacity(hubs.len() * (hubs.len() + 1) / 2);
                for (a, &u) in hubs.iter().enumerate() {
                    for &v in &hubs[a..] {
                        out.push(self.dominant(origin, u, v, destination));
                    }
                }
                out
            }
        };

        tracing::debug!(
            origin = %i,
            destination = %j,
            candidates = routes.len(),
            cached = self.cache.len(),
            "generated feasible routes"
        );
        Ok(routes)
    }

    /// Feasible routes ordered by ascending `value`.
    #[inline]
    pub fn feasible_route_queue(
        &self,
        i: NodeIdentifier,
        j: NodeIdentifier,
        hubs: &[NodeIdentifier],
    ) -> Result<CandidateQueue<ByValue>, CandidateError> {
        self.feasible_route_queue_by(i, j, hubs, ByValue)
    }

    /// Feasible routes ordered by `ordering`.
    #[inline]
    pub fn feasible_route_queue_by<O: RouteOrdering>(
        &self,
        i: NodeIdentifier,
        j: NodeIdentifier,
        hubs: &[NodeIdentifier],
        ordering: O,
    ) -> Result<CandidateQueue<O>, CandidateError> {
        let routes = self.feasible_routes(i, j, hubs)?;
        Ok(CandidateQueue::from_routes(routes, ordering))
    }
}
