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

use reliable_hub_core::prelude::Cost;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExplorerConfig {
    /// Stop after this many tree expansions; `None` runs to optimality.
    pub max_expansions: Option<usize>,
    /// Trees whose value reaches this bound are pruned from the start.
    pub initial_upper_bound: Option<Cost>,
}

impl ExplorerConfig {
    #[inline]
    pub fn new(max_expansions: Option<usize>, initial_upper_bound: Option<Cost>) -> Self {
        Self {
            max_expansions,
            initial_upper_bound,
        }
    }

    #[inline]
    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    #[inline]
    pub fn with_initial_upper_bound(mut self, bound: Cost) -> Self {
        self.initial_upper_bound = Some(bound);
        self
    }

    #[inline]
    pub(crate) fn upper_bound(&self) -> Cost {
        self.initial_upper_bound.unwrap_or(Cost::INFINITY)
    }
}
