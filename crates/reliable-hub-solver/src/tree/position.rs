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

//! Index arithmetic of the implicit binary tree: the root is `0` and the
//! children of `p` are `2p + 1` (left, first-leg hub failed) and `2p + 2`
//! (right, second-leg hub failed).

pub const ROOT: usize = 0;

#[inline]
pub fn left(p: usize) -> Option<usize> {
    p.checked_mul(2)?.checked_add(1)
}

#[inline]
pub fn right(p: usize) -> Option<usize> {
    p.checked_mul(2)?.checked_add(2)
}

#[inline]
pub fn parent(p: usize) -> Option<usize> {
    if p == ROOT { None } else { Some((p - 1) / 2) }
}

#[inline]
pub fn is_left(p: usize) -> bool {
    p % 2 == 1
}

/// Number of edges between `p` and the root.
#[inline]
pub fn depth(p: usize) -> usize {
    match p.checked_add(1) {
        Some(n) => (usize::BITS - 1 - n.leading_zeros()) as usize,
        None => usize::BITS as usize,
    }
}

/// Largest position a tree protecting `depth_limit` nested failures may use,
/// `2^(L+1) - 2`. This is also the number of non-root positions.
#[inline]
pub fn max_position(depth_limit: usize) -> usize {
    u32::try_from(depth_limit.saturating_add(1))
        .ok()
        .and_then(|shift| 1usize.checked_shl(shift))
        .map_or(usize::MAX - 1, |full| full - 2)
}
