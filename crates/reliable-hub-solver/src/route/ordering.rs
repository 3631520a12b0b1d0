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
use std::cmp::Ordering;

/// Ranks candidate routes for best-first expansion. `Less` means "try first".
pub trait RouteOrdering: Send + Sync {
    fn compare(&self, a: &Route, b: &Route) -> Ordering;
}

/// Ascending comparison `value`, ties broken by route key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByValue;

impl RouteOrdering for ByValue {
    #[inline]
    fn compare(&self, a: &Route, b: &Route) -> Ordering {
        a.value()
            .total_cmp(&b.value())
            .then_with(|| a.key().cmp(&b.key()))
    }
}

/// Ascending root baseline `exp_cost`, ties broken by `value`, then key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByExpectedCost;

impl RouteOrdering for ByExpectedCost {
    #[inline]
    fn compare(&self, a: &Route, b: &Route) -> Ordering {
        a.exp_cost()
            .total_cmp(&b.exp_cost())
            .then_with(|| ByValue.compare(a, b))
    }
}

impl<F> RouteOrdering for F
where
    F: Fn(&Route, &Route) -> Ordering + Send + Sync,
{
    #[inline]
    fn compare(&self, a: &Route, b: &Route) -> Ordering {
        self(a, b)
    }
}
