//! Empirical discrete distributions over arbitrary `f64` values.
//!
//! The distributions of [crate::distributions] have an analytical pmf. The ones
//! in this module do not: they are plain lists of `(value, probability)` atoms,
//! the product of the population scan in [crate::inference] and of the fitness
//! convolution in [crate::fitness].
//!
//! There are 2 containers:
//!  - [Distribution]: normalized atoms with stricly ascending values. This is
//!    what the population inference produces.
//!  - [CumulativeDistribution]: atoms annotated with their running cumulative
//!    probability, sorted by value but allowing exact ties (the Cartesian
//!    product of the convolution can produce the exact same ratio twice; the
//!    tied atoms are kept separate, each with its own mass). This is the form
//!    the quantile interpolation works on.
//!
//! Both are immutable once built and both are validated at construction, never
//! trusted.

use crate::configuration;
use crate::errors::AssayError;

/// A single atom of an empirical distribution: a value and the probability mass
/// assigned to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedValue {
    pub value: f64,
    pub probability: f64,
}

/// A normalized discrete probability distribution over finitely many values.
///
/// **Invariants** (checked at construction):
///  - There is at least 1 atom.
///  - All the values are finite and stricly ascending (no duplicates).
///  - All the probabilities are finite and stricly positive.
///  - The probabilities add up to `1.0`, within
///    [configuration::PROBABILITY_SUM_TOLERANCE].
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    atoms: Vec<WeightedValue>,
}

/// A [WeightedValue] annotated with the probability mass accumulated up to and
/// including itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CumulativeWeightedValue {
    pub value: f64,
    pub probability: f64,
    pub cumulative: f64,
}

/// A normalized discrete distribution in cumulative form, ready for quantile
/// interpolation.
///
/// **Invariants** (checked at construction):
///  - There is at least 1 atom.
///  - All the values are finite and sorted ascending (exact ties are allowed
///    and kept as separate atoms).
///  - All the probabilities are finite and stricly positive, therefore the
///    cumulative probabilities are stricly increasing.
///  - The cumulative probability of the last atom is exactly `1.0` (the
///    normalization residue is checked against a tolerance and then snapped).
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeDistribution {
    entries: Vec<CumulativeWeightedValue>,
}

/// Checks the requirements on raw (not yet normalized) atoms: finite values and
/// stricly positive, finite weights.
fn validate_raw_atoms(atoms: &[WeightedValue]) -> Result<(), AssayError> {
    if atoms.is_empty() {
        return Err(AssayError::InvalidInput {
            argument: "atoms (empty)",
            value: 0.0,
        });
    }

    for atom in atoms {
        if !atom.value.is_finite() {
            return Err(AssayError::InvalidInput {
                argument: "atom value",
                value: atom.value,
            });
        }

        #[allow(clippy::nonminimal_bool)]
        if !atom.probability.is_finite() || !(0.0 < atom.probability) {
            return Err(AssayError::InvalidInput {
                argument: "atom probability",
                value: atom.probability,
            });
        }
    }

    return Ok(());
}

impl Distribution {
    /// Creates a new [Distribution] from atoms that are already sorted and
    /// normalized. All the invariants of the type are checked; if the atoms are
    /// raw weights in arbitrary order, use [Distribution::from_unnormalized]
    /// instead.
    pub fn new(atoms: Vec<WeightedValue>) -> Result<Distribution, AssayError> {
        validate_raw_atoms(&atoms)?;

        let mut previous_value: f64 = f64::NEG_INFINITY;
        let mut sum: f64 = 0.0;
        for atom in &atoms {
            if atom.value <= previous_value {
                return Err(AssayError::InvalidInput {
                    argument: "atom value (not stricly ascending)",
                    value: atom.value,
                });
            }
            previous_value = atom.value;
            sum += atom.probability;
        }

        if configuration::PROBABILITY_SUM_TOLERANCE < (sum - 1.0).abs() {
            return Err(AssayError::InvalidInput {
                argument: "probability sum",
                value: sum,
            });
        }

        return Ok(Distribution { atoms });
    }

    /// Creates a new [Distribution] from raw weighted atoms: sorts them by
    /// value, tallies the weights and divides everything by the tally.
    pub fn from_unnormalized(mut atoms: Vec<WeightedValue>) -> Result<Distribution, AssayError> {
        validate_raw_atoms(&atoms)?;

        atoms.sort_unstable_by(|a, b| a.value.partial_cmp(&b.value).unwrap());
        // ^unwrap is safe: the values were just checked to be finite

        let mut tally: f64 = 0.0;
        for atom in &atoms {
            tally += atom.probability;
        }

        #[allow(clippy::nonminimal_bool)]
        if !tally.is_finite() || !(0.0 < tally) {
            return Err(AssayError::InvalidInput {
                argument: "weight tally",
                value: tally,
            });
        }

        for atom in &mut atoms {
            atom.probability = atom.probability / tally;
        }

        return Distribution::new(atoms);
    }

    /// Returns the atoms, sorted ascending by value.
    #[must_use]
    pub fn atoms(&self) -> &[WeightedValue] {
        return &self.atoms;
    }

    /// The number of atoms. Never 0.
    #[must_use]
    pub fn cardinality(&self) -> usize {
        return self.atoms.len();
    }

    /// The smallest value with non-zero probability.
    #[must_use]
    pub fn min_value(&self) -> f64 {
        return self.atoms[0].value;
    }

    /// The largest value with non-zero probability.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        return self.atoms[self.atoms.len() - 1].value;
    }

    /// Propagates the distribution trough a deterministic transfer: a known
    /// `fraction` of the population is carried over, so every value is scaled
    /// by it while the probabilities stay untouched.
    ///
    ///  - `fraction` must be finite and in `(0.0, 1.0]`, otherwise an
    ///    [AssayError::InvalidInput] is returned.
    ///
    /// The scaled atoms go trough the full validation again: the scaling could
    /// collapse 2 neighbouring values into the same float, wich would break the
    /// stricly-ascending invariant and must be rejected rather than assumed away.
    pub fn transfer(&self, fraction: f64) -> Result<Distribution, AssayError> {
        /*
            The transfer is assumed to be perfect: exactly `fraction` of every
            plausible population is carried over.

            Todo: model the transfer itself as a sampling step (the carried
            cells are a random draw from the tube, not an exact fraction).
        */
        #[allow(clippy::nonminimal_bool)]
        if !fraction.is_finite() || !(0.0 < fraction && fraction <= 1.0) {
            return Err(AssayError::InvalidInput {
                argument: "transfer fraction",
                value: fraction,
            });
        }

        let scaled: Vec<WeightedValue> = self
            .atoms
            .iter()
            .map(|atom| WeightedValue {
                value: atom.value * fraction,
                probability: atom.probability,
            })
            .collect::<Vec<WeightedValue>>();

        return Distribution::new(scaled);
    }

    /// Computes the cumulative form of the distribution (the prefix sums of the
    /// probabilities). The cumulative probability of the last atom is snapped to
    /// exactly `1.0`: the invariants of [Distribution] already guarantee that it
    /// is within tolerance of it.
    #[must_use]
    pub fn cumulative(&self) -> CumulativeDistribution {
        let mut entries: Vec<CumulativeWeightedValue> = Vec::with_capacity(self.atoms.len());

        let mut running: f64 = 0.0;
        for atom in &self.atoms {
            running += atom.probability;
            entries.push(CumulativeWeightedValue {
                value: atom.value,
                probability: atom.probability,
                cumulative: running,
            });
        }

        entries.last_mut().unwrap().cumulative = 1.0;
        // ^unwrap is safe: a Distribution contains at least 1 atom

        return CumulativeDistribution { entries };
    }
}

impl CumulativeDistribution {
    /// Creates a new [CumulativeDistribution] from raw weighted atoms: sorts
    /// them by value (keeping exact ties as separate atoms), divides every
    /// weight by the tally and accumulates the prefix sums.
    ///
    /// After the normalization the last cumulative probability must be `1.0` up
    /// to rounding. The rounding of a sum of `n` positive terms grows linearly
    /// with `n`, so the tolerance is scaled accordingly before the final value
    /// is snapped to exactly `1.0`.
    pub fn from_unnormalized(
        mut atoms: Vec<WeightedValue>,
    ) -> Result<CumulativeDistribution, AssayError> {
        validate_raw_atoms(&atoms)?;

        atoms.sort_by(|a, b| a.value.partial_cmp(&b.value).unwrap());
        // ^unwrap is safe: the values were just checked to be finite

        let mut tally: f64 = 0.0;
        for atom in &atoms {
            tally += atom.probability;
        }

        #[allow(clippy::nonminimal_bool)]
        if !tally.is_finite() || !(0.0 < tally) {
            return Err(AssayError::InvalidInput {
                argument: "weight tally",
                value: tally,
            });
        }

        let mut entries: Vec<CumulativeWeightedValue> = Vec::with_capacity(atoms.len());

        let mut running: f64 = 0.0;
        for atom in &atoms {
            let probability: f64 = atom.probability / tally;
            running += probability;
            entries.push(CumulativeWeightedValue {
                value: atom.value,
                probability,
                cumulative: running,
            });
        }

        let tolerance: f64 =
            configuration::PROBABILITY_SUM_TOLERANCE.max(entries.len() as f64 * f64::EPSILON);
        let terminal: f64 = entries[entries.len() - 1].cumulative;
        if tolerance < (terminal - 1.0).abs() {
            return Err(AssayError::InvalidInput {
                argument: "cumulative probability terminal",
                value: terminal,
            });
        }

        entries.last_mut().unwrap().cumulative = 1.0;
        // ^unwrap is safe: emptiness was already rejected

        return Ok(CumulativeDistribution { entries });
    }

    /// Returns the annotated atoms, sorted ascending by value.
    #[must_use]
    pub fn entries(&self) -> &[CumulativeWeightedValue] {
        return &self.entries;
    }

    /// The number of atoms. Never 0.
    #[must_use]
    pub fn cardinality(&self) -> usize {
        return self.entries.len();
    }

    /// The [expected value](https://en.wikipedia.org/wiki/Expected_value) of the
    /// distribution: `sum(value * probability)`.
    #[must_use]
    pub fn mean(&self) -> f64 {
        let mut accumulator: f64 = 0.0;
        for entry in &self.entries {
            accumulator += entry.value * entry.probability;
        }
        return accumulator;
    }

    /// The standard deviation of the distribution around the given `mean`:
    /// `sqrt(sum((value - mean)^2 * probability))`.
    ///
    /// The mean is taken as an argument (instead of recomputed) because the
    /// caller always has it already.
    #[must_use]
    pub fn standard_deviation(&self, mean: f64) -> f64 {
        let mut accumulator: f64 = 0.0;
        for entry in &self.entries {
            let deviation: f64 = entry.value - mean;
            accumulator += deviation * deviation * entry.probability;
        }
        return accumulator.sqrt();
    }

    /// Evaluates the quantile function at the cumulative probability `quantile`
    /// by linear interpolation between the 2 neighbouring atoms that stricly
    /// bracket it: the last atom with `cumulative < quantile` and the first one
    /// with `quantile < cumulative`.
    ///
    ///  - Returns [AssayError::InvalidInput] if `quantile` is not finite.
    ///  - Returns [AssayError::QuantileNotBracketed] if `quantile` falls at or
    ///    outside the cumulative probability of the first or last atom (there
    ///    is no pair to interpolate between). In particular `0.0` and `1.0` are
    ///    never bracketed.
    pub fn interpolated_quantile(&self, quantile: f64) -> Result<f64, AssayError> {
        if !quantile.is_finite() {
            return Err(AssayError::InvalidInput {
                argument: "quantile",
                value: quantile,
            });
        }

        let lowest_cumulative: f64 = self.entries[0].cumulative;
        let highest_cumulative: f64 = self.entries[self.entries.len() - 1].cumulative;

        // index of the first entry with `quantile <= cumulative` (the
        // cumulative probabilities are stricly increasing)
        let idx: usize = self
            .entries
            .partition_point(|entry| entry.cumulative < quantile);

        if idx == 0 || idx == self.entries.len() {
            return Err(AssayError::QuantileNotBracketed {
                quantile,
                lowest_cumulative,
                highest_cumulative,
            });
        }

        let below: &CumulativeWeightedValue = &self.entries[idx - 1];
        let above: &CumulativeWeightedValue = &self.entries[idx];

        if above.cumulative <= quantile {
            // the quantile falls exactly on an atom: no stricly bracketing pair
            return Err(AssayError::QuantileNotBracketed {
                quantile,
                lowest_cumulative,
                highest_cumulative,
            });
        }

        let fraction: f64 = (quantile - below.cumulative) / (above.cumulative - below.cumulative);
        return Ok(below.value + fraction * (above.value - below.value));
    }

    /// The 2 sided confidence interval of the distribution: the interpolated
    /// quantiles at the cumulative probabilities `lower_tail` and `upper_tail`
    /// (for a 95% interval those are `0.025` and `0.975`).
    ///
    /// Shares the error conditions of
    /// [interpolated_quantile](CumulativeDistribution::interpolated_quantile).
    pub fn confidence_interval(
        &self,
        lower_tail: f64,
        upper_tail: f64,
    ) -> Result<(f64, f64), AssayError> {
        let lower_bound: f64 = self.interpolated_quantile(lower_tail)?;
        let upper_bound: f64 = self.interpolated_quantile(upper_tail)?;

        return Ok((lower_bound, upper_bound));
    }
}
