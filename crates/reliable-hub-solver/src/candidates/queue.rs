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

use crate::route::{
    ordering::{ByValue, RouteOrdering},
    rt::Route,
};
use std::{cmp::Ordering, sync::Arc};

/// Candidate routes kept sorted under a [`RouteOrdering`]; `pop` yields the
/// best untried candidate first.
///
/// Internally the routes are stored worst-first so that popping is `O(1)`.
#[derive(Debug, Clone)]
pub struct CandidateQueue<O = ByValue> {
    routes: Vec<Arc<Route>>,
    ordering: O,
}

impl<O: RouteOrdering + Default> Default for CandidateQueue<O> {
    fn default() -> Self {
        Self::new(O::default())
    }
}

impl<O: RouteOrdering> CandidateQueue<O> {
    #[inline]
    pub fn new(ordering: O) -> Self {
        Self {
            routes: Vec::new(),
            ordering,
        }
    }

    pub fn from_routes<I>(routes: I, ordering: O) -> Self
    where
        I: IntoIterator<Item = Arc<Route>>,
    {
        let mut routes: Vec<Arc<Route>> = routes.into_iter().collect();
        routes.sort_by(|a, b| ordering.compare(b, a));
        Self { routes, ordering }
    }

    #[inline]
    fn worst_first(&self, a: &Route, b: &Route) -> Ordering {
        self.ordering.compare(b, a)
    }

    pub fn push(&mut self, route: Arc<Route>) {
        let at = self
            .routes
            .partition_point(|r| self.worst_first(r, &route) != Ordering::Greater);
        self.routes.insert(at, route);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<Arc<Route>> {
        self.routes.pop()
    }

    #[inline]
    pub fn peek(&self) -> Option<&Arc<Route>> {
        self.routes.last()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Best-first iteration without consuming the queue.
    #[inline]
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Arc<Route>> + '_ {
        self.routes.iter().rev()
    }

    #[inline]
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Route) -> bool,
    {
        self.routes.retain(|r| keep(r));
    }

    #[inline]
    pub fn ordering(&self) -> &O {
        &self.ordering
    }

    /// Consumes the queue into a best-first `Vec`.
    #[inline]
    pub fn into_sorted_vec(mut self) -> Vec<Arc<Route>> {
        self.routes.reverse();
        self.routes
    }
}

impl<O: RouteOrdering> Iterator for CandidateQueue<O> {
    type Item = Arc<Route>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.pop()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.routes.len(), Some(self.routes.len()))
    }
}
