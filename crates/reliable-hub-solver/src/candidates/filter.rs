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

use crate::route::rt::Route;
use reliable_hub_model::prelude::{Node, NodeIdentifier};
use std::sync::Arc;

/// Every route that uses `hub` on neither leg, in input order.
#[inline]
pub fn exclude_hub(routes: &[Arc<Route>], hub: NodeIdentifier) -> Vec<Arc<Route>> {
    routes
        .iter()
        .filter(|r| !r.uses_hub(hub))
        .cloned()
        .collect()
}

/// Every route that uses none of `hubs`, in input order.
#[inline]
pub fn exclude_hubs(routes: &[Arc<Route>], hubs: &[Node]) -> Vec<Arc<Route>> {
    routes
        .iter()
        .filter(|r| !r.uses_any_hub(hubs))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reliable_hub_core::prelude::Probability;

    fn node(n: usize) -> Node {
        Node::hub(NodeIdentifier::new(n), Probability::ZERO)
    }

    fn route(k: usize, m: usize) -> Arc<Route> {
        Arc::new(Route::with_costs(node(0), node(k), node(m), node(9), 1.0, 1.0, 1.0))
    }

    #[test]
    fn test_exclude_hub_removes_either_leg() {
        let routes = vec![route(1, 2), route(2, 3), route(3, 3), route(4, 1)];
        let kept = exclude_hub(&routes, NodeIdentifier::new(1));
        let keys: Vec<_> = kept.iter().map(|r| r.to_string()).collect();
        assert_eq!(keys, vec!["0-2-3-9", "0-3-3-9"]);
    }

    #[test]
    fn test_exclude_hub_shares_instances() {
        let routes = vec![route(1, 2), route(2, 3)];
        let kept = exclude_hub(&routes, NodeIdentifier::new(7));
        assert_eq!(kept.len(), 2);
        assert!(Arc::ptr_eq(&kept[0], &routes[0]));
        assert!(Arc::ptr_eq(&kept[1], &routes[1]));
    }

    #[test]
    fn test_exclude_hubs_removes_all_listed() {
        let routes = vec![route(1, 2), route(2, 3), route(3, 3), route(4, 4)];
        let kept = exclude_hubs(&routes, &[node(1), node(3)]);
        let keys: Vec<_> = kept.iter().map(|r| r.to_string()).collect();
        assert_eq!(keys, vec!["0-4-4-9"]);
        assert_eq!(exclude_hubs(&routes, &[]).len(), 4);
    }
}
