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

use reliable_hub_model::prelude::NodeIdentifier;

/// Identity of a route: origin, first-leg hub, second-leg hub, destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteKey {
    pub i: NodeIdentifier,
    pub k: NodeIdentifier,
    pub m: NodeIdentifier,
    pub j: NodeIdentifier,
}

impl RouteKey {
    #[inline]
    pub fn new(i: NodeIdentifier, k: NodeIdentifier, m: NodeIdentifier, j: NodeIdentifier) -> Self {
        Self { i, k, m, j }
    }

    /// The same endpoints with the two hubs in opposite leg order.
    #[inline]
    pub fn swapped(&self) -> Self {
        Self {
            i: self.i,
            k: self.m,
            m: self.k,
            j: self.j,
        }
    }
}

impl std::fmt::Display for RouteKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}",
            self.i.value(),
            self.k.value(),
            self.m.value(),
            self.j.value()
        )
    }
}
