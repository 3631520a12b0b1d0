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

//! Contingency routing plans for reliable hub networks.
//!
//! For one origin–destination demand the crate builds plans that assign a
//! primary route (through at most two hubs) and, recursively, backup routes
//! for every hub on it that may fail, up to `L` nested failures.
//!
//! Module map
//! - `route`: the immutable route entity, its identity key and orderings.
//! - `candidates`: memoized generation of feasible routes per endpoint pair.
//! - `tree`: the index-encoded contingency tree and its expected value.
//! - `explorer`: a best-first branch-and-bound over trees for one demand.

pub mod candidates;
pub mod explorer;
pub mod route;
pub mod tree;

pub mod prelude {
    pub use crate::candidates::{
        cache::RouteCache,
        err::CandidateError,
        filter::{exclude_hub, exclude_hubs},
        generator::CandidateGenerator,
        queue::CandidateQueue,
    };
    pub use crate::explorer::{
        bnb::{ExplorationOutcome, PlanExplorer},
        config::ExplorerConfig,
        stats::ExplorationStats,
    };
    pub use crate::route::{
        key::RouteKey,
        ordering::{ByExpectedCost, ByValue, RouteOrdering},
        rt::{Branching, Route},
    };
    pub use crate::tree::{contingency::ContingencyTree, position};
}
