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

use reliable_hub_core::prelude::Probability;
use serde::Serialize;

#[repr(transparent)]
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeIdentifier(usize);

impl NodeIdentifier {
    #[inline]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    #[inline]
    pub fn value(&self) -> usize {
        self.0
    }

    /// Position of the node in the dense node table of its network.
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for NodeIdentifier {
    #[inline]
    fn from(id: usize) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for NodeIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// An immutable network location.
///
/// Nodes compare and hash by identifier only; two nodes with the same id are
/// the same location regardless of the attributes they were built with.
#[derive(Debug, Clone, Copy)]
pub struct Node {
    id: NodeIdentifier,
    is_hub: bool,
    failure: Probability,
}

impl Node {
    #[inline]
    pub fn new(id: NodeIdentifier, failure: Probability) -> Self {
        Self {
            id,
            is_hub: false,
            failure,
        }
    }

    #[inline]
    pub fn hub(id: NodeIdentifier, failure: Probability) -> Self {
        Self {
            id,
            is_hub: true,
            failure,
        }
    }

    #[inline]
    pub fn id(&self) -> NodeIdentifier {
        self.id
    }

    #[inline]
    pub fn is_hub(&self) -> bool {
        self.is_hub
    }

    #[inline]
    pub fn failure(&self) -> Probability {
        self.failure
    }

    #[inline]
    pub fn survival(&self) -> Probability {
        self.failure.complement()
    }

    #[inline]
    pub(crate) fn designated(self, is_hub: bool) -> Self {
        Self { is_hub, ..self }
    }
}

impl PartialEq for Node {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id.value())
    }
}
