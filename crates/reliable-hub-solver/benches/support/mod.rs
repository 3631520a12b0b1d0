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

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use reliable_hub_core::prelude::Probability;
use reliable_hub_model::prelude::{Network, NetworkBuilder, NodeIdentifier};

#[inline]
pub fn nid(n: usize) -> NodeIdentifier {
    NodeIdentifier::new(n)
}

/// Euclidean network on random points; the first `hubs` nodes are hubs.
pub fn random_network(seed: u64, n: usize, hubs: usize, alpha: f64, depth: usize) -> Network {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let pts: Vec<(f64, f64)> = (0..n)
        .map(|_| (rng.random_range(0.0..1000.0), rng.random_range(0.0..1000.0)))
        .collect();
    let distances = pts
        .iter()
        .map(|a| {
            pts.iter()
                .map(|b| ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt())
                .collect()
        })
        .collect();

    let mut b = NetworkBuilder::new().with_alpha(alpha).with_depth(depth);
    for id in 0..n {
        let f = if id < hubs {
            rng.random_range(0.01..0.2)
        } else {
            0.0
        };
        b.add_node(nid(id), Probability::new(f).expect("valid failure probability"));
        if id < hubs {
            b.add_hub(nid(id));
        }
    }
    b.with_distances(distances).build().expect("network ok")
}
