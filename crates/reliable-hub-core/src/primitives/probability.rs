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

use num_traits::{Float, One};
use std::ops::Mul;

/// Error type for a probability outside of `0.0..=1.0` (or not finite).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidProbabilityError {
    value: f64,
}

impl InvalidProbabilityError {
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl std::fmt::Display for InvalidProbabilityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invalid probability {:?}. Allowed range is 0.0..=1.0.",
            self.value
        )
    }
}

impl std::error::Error for InvalidProbabilityError {}

/// A probability in `[0, 1]`.
///
/// Products of probabilities stay in range, which is all the failure
/// bookkeeping needs: the mass of a failure sequence is the product of the
/// individual hub failure probabilities.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Probability(f64);

impl Probability {
    pub const ZERO: Self = Self(0.0);
    pub const ONE: Self = Self(1.0);

    #[inline]
    pub fn new<F: Float>(value: F) -> Result<Self, InvalidProbabilityError> {
        let v = value.to_f64().unwrap_or(f64::NAN);
        if !v.is_finite() || !(0.0..=1.0).contains(&v) {
            return Err(InvalidProbabilityError::new(v));
        }
        Ok(Self(v))
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Probability of the complementary event, `1 - p`.
    #[inline]
    pub fn complement(self) -> Self {
        Self(1.0 - self.0)
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }

    #[inline]
    pub fn is_certain(self) -> bool {
        self.0 == 1.0
    }
}

impl Mul for Probability {
    type Output = Probability;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Mul<f64> for Probability {
    type Output = f64;

    #[inline]
    fn mul(self, rhs: f64) -> Self::Output {
        self.0 * rhs
    }
}

impl One for Probability {
    #[inline]
    fn one() -> Self {
        Self::ONE
    }
}

impl std::iter::Product for Probability {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::one(), |acc, p| acc * p)
    }
}

impl<'a> std::iter::Product<&'a Probability> for Probability {
    fn product<I: Iterator<Item = &'a Probability>>(iter: I) -> Self {
        iter.copied().product()
    }
}

impl TryFrom<f64> for Probability {
    type Error = InvalidProbabilityError;

    #[inline]
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Probability> for f64 {
    #[inline]
    fn from(p: Probability) -> Self {
        p.0
    }
}

impl std::fmt::Display for Probability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[inline]
    fn p(v: f64) -> Probability {
        Probability::new(v).unwrap()
    }

    #[test]
    fn test_accepts_closed_unit_interval() {
        assert_eq!(p(0.0), Probability::ZERO);
        assert_eq!(p(1.0), Probability::ONE);
        assert_eq!(p(0.25).value(), 0.25);
        assert!(Probability::new(0.5f32).is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_and_non_finite() {
        for v in [-0.01, 1.0001, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = Probability::new(v).unwrap_err();
            if v.is_nan() {
                assert!(err.value().is_nan());
            } else {
                assert_eq!(err.value(), v);
            }
        }
    }

    #[test]
    fn test_complement_and_flags() {
        assert!((p(0.3).complement().value() - 0.7).abs() < 1e-12);
        assert!(Probability::ZERO.is_zero());
        assert!(Probability::ONE.is_certain());
        assert!(!p(0.5).is_zero());
    }

    #[test]
    fn test_product_of_empty_sequence_is_one() {
        let none: Vec<Probability> = Vec::new();
        assert_eq!(none.iter().product::<Probability>(), Probability::ONE);
    }

    #[test]
    fn test_product_multiplies_masses() {
        let masses = [p(0.1), p(0.2), p(0.5)];
        let prod: Probability = masses.iter().product();
        assert!((prod.value() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_scales_cost() {
        assert!((p(0.2) * 12.0 - 2.4).abs() < 1e-12);
    }

    #[test]
    fn test_display_error_mentions_range() {
        let msg = Probability::new(2.0).unwrap_err().to_string();
        assert!(msg.contains("0.0..=1.0"));
    }

    mod static_assertions {
        use crate::primitives::probability::Probability;
        use ::static_assertions::assert_impl_all;

        assert_impl_all!(Probability: Send, Sync, Copy);
    }
}
