//! A Domain represents the set of points where a function is defined.
//!
//! In this library we use it for the pmf of the discrete distributions (see
//! [crate::distribution_trait]). The populations this crate reasons about are
//! counts, so only integer valued domains are needed.
//!

use core::f64;

/// A [domain](https://en.wikipedia.org/wiki/Domain_of_a_function) composed of
/// integers.
///
/// [DiscreteDomain] assumes that discrete domains only include integers. This is
/// enough for counting supports: the number of cells in a sample or the number of
/// colonies on a plate are always non-negative integers.
#[derive(Debug, Clone, PartialEq)]
pub enum DiscreteDomain {
    /// All the integers in the range [.0, .1] (**both** inclusive).
    /// The first number is the minimum, and the last is the maximum.
    ///
    /// Has the **invariant** that `min <= max`.
    Range(i64, i64),
    /// All the integers from the given value onwards. The value **is** included.
    From(i64),
}

impl DiscreteDomain {
    /// Returns true if `x` belongs to the domain.
    #[must_use]
    pub fn contains(&self, x: f64) -> bool {
        if x.fract() != 0.0 {
            // the value is fractional (or non-finite), but the domain only includes integers
            return false;
        }

        let x_int: i64 = x as i64;

        match self {
            DiscreteDomain::Range(min, max) => (*min <= x_int) && (x_int <= *max),
            DiscreteDomain::From(min) => *min <= x_int,
        }
    }

    /// Returns the upper and lower bounds of the domain.
    ///
    /// Take into account that the upper bound can be positive infinity. It is
    /// guaranteed that return.0 <= return.1. If the bounds are finite, the values
    /// themselves are included.
    #[must_use]
    pub fn get_bounds(&self) -> (f64, f64) {
        match &self {
            DiscreteDomain::Range(min, max) => (*min as f64, *max as f64),
            DiscreteDomain::From(min) => (*min as f64, f64::INFINITY),
        }
    }

    /// Returns an iteratior that iterates trough all the elements in the domain
    /// in ascending order.
    ///
    /// Warning: the iterator may be infinite.
    #[must_use]
    pub fn iter(&self) -> DiscreteDomainIterator {
        // current_value being a NaN sybmolyzes that no values have been given yet
        DiscreteDomainIterator {
            domain: self,
            current_value: f64::NAN,
        }
    }
}

pub struct DiscreteDomainIterator<'a> {
    domain: &'a DiscreteDomain,

    current_value: f64,
}

impl Iterator for DiscreteDomainIterator<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        match self.domain {
            DiscreteDomain::Range(min, max) => {
                if self.current_value.is_nan() {
                    self.current_value = *min as f64;
                    return Some(self.current_value);
                }
                self.current_value = self.current_value + 1.0;
                if (*max as f64) < self.current_value {
                    return None;
                }
                return Some(self.current_value);
            }
            DiscreteDomain::From(min) => {
                if self.current_value.is_nan() {
                    self.current_value = *min as f64;
                    return Some(self.current_value);
                }

                self.current_value = self.current_value + 1.0;
                return Some(self.current_value);
            }
        }
    }
}
