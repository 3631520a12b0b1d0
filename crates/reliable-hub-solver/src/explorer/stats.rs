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

/// Counters of one exploration run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExplorationStats {
    /// root trees seeded, one per feasible primary route
    pub roots: usize,
    /// trees created, roots included
    pub generated: usize,
    /// trees popped from the frontier and extended
    pub expanded: usize,
    /// trees discarded because their value reached the incumbent
    pub pruned: usize,
    /// complete trees found (each one improved the incumbent)
    pub completed: usize,
    /// positions closed without a backup because no candidate was left
    pub dead_ends: usize,
    /// the expansion budget ran out before the frontier was exhausted
    pub truncated: bool,
}

impl std::fmt::Display for ExplorationStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "roots={} generated={} expanded={} pruned={} completed={} dead_ends={}{}",
            self.roots,
            self.generated,
            self.expanded,
            self.pruned,
            self.completed,
            self.dead_ends,
            if self.truncated { " (truncated)" } else { "" }
        )
    }
}
