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

use crate::route::{key::RouteKey, rt::Route};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

/// Append-only memo of every route built so far, keyed by `(i, k, m, j)`.
///
/// The cache owns the canonical `Arc<Route>` of a key; callers only ever
/// receive clones pointing to that allocation. Insertion goes through the
/// entry API under the write lock, so when two workers race on the same key
/// the first insert wins and the loser's route is dropped.
#[derive(Debug, Default)]
pub struct RouteCache {
    routes: RwLock<FxHashMap<RouteKey, Arc<Route>>>,
    builds: AtomicUsize,
}

impl RouteCache {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            routes: RwLock::new(FxHashMap::with_capacity_and_hasher(
                capacity,
                Default::default(),
            )),
            builds: AtomicUsize::new(0),
        }
    }

    #[inline]
    pub fn get(&self, key: &RouteKey) -> Option<Arc<Route>> {
        self.routes.read().get(key).cloned()
    }

    /// Looks up `key` and then its opposite hub ordering.
    #[inline]
    pub fn get_either(&self, key: &RouteKey) -> Option<Arc<Route>> {
        let guard = self.routes.read();
        guard
            .get(key)
            .or_else(|| guard.get(&key.swapped()))
            .cloned()
    }

    #[inline]
    pub fn contains(&self, key: &RouteKey) -> bool {
        self.routes.read().contains_key(key)
    }

    /// Inserts `route` unless its key is already present and returns the
    /// canonical instance either way.
    pub fn insert(&self, route: Route) -> Arc<Route> {
        let key = route.key();
        let mut guard = self.routes.write();
        guard.entry(key).or_insert_with(|| Arc::new(route)).clone()
    }

    /// Returns the cached route for `key`, building it with `build` on a miss.
    /// `build` runs outside of any lock.
    pub fn get_or_insert_with<F>(&self, key: RouteKey, build: F) -> Arc<Route>
    where
        F: FnOnce() -> Route,
    {
        if let Some(r) = self.get(&key) {
            return r;
        }
        let route = build();
        debug_assert_eq!(route.key(), key, "builder produced a route for another key");
        self.record_build(1);
        self.insert(route)
    }

    #[inline]
    pub(crate) fn record_build(&self, n: usize) {
        self.builds.fetch_add(n, Ordering::Relaxed);
    }

    /// Number of routes constructed on behalf of the cache, including
    /// dominated orderings that were built only to be compared and dropped.
    #[inline]
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.routes.read().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.routes.read().is_empty()
    }

    pub fn clear(&mut self) {
        self.routes.get_mut().clear();
        *self.builds.get_mut() = 0;
    }
}
