//! The competitive fitness ratio and its convolution over population
//! distributions.
//!
//! The fitness of the wild type strain relative to the fluorescent reference is
//! the ratio of the log growths over the competition window:
//!
//! ```text
//! fitness = ln(t24_wild / t0_wild) / ln(t24_fluo / t0_fluo)
//! ```
//!
//! A fitness of 1 means both strains grew by the same factor. Above 1 the wild
//! type outcompetes the reference.
//!
//! The populations at `t(0)` and `t(24)` are not known exactly, only as
//! empirical distributions from [crate::inference]. [convolve_fitness_ratio]
//! pushes the 4 distributions trough the ratio by full enumeration of the
//! Cartesian product, wich is exact (no sampling) but grows with the 4th power
//! of the scan resolution. The [combination_count] is therefore checked against
//! a ceiling before any work is done.

use rayon::prelude::*;

use crate::empirical::{CumulativeDistribution, Distribution, WeightedValue};
use crate::errors::AssayError;

/// Rejects values outside `(0.0, inf)`, where the log growths are undefined.
fn require_positive(input: &'static str, value: f64) -> Result<(), AssayError> {
    #[allow(clippy::nonminimal_bool)]
    if !value.is_finite() || !(0.0 < value) {
        return Err(AssayError::UndefinedRatio { input, value });
    }

    return Ok(());
}

/// Evaluates the fitness ratio at a single point: 4 exact population sizes.
///
///  - All 4 populations must be stricly positive and finite, otherwise the
///    logarithms are undefined and an [AssayError::UndefinedRatio] is returned.
///  - If the fluorescent reference did not grow at all (`t0_fluo == t24_fluo`),
///    the denominator is `ln(1) = 0` and the ratio is undefined too.
pub fn fitness_ratio(
    t0_wild: f64,
    t24_wild: f64,
    t0_fluo: f64,
    t24_fluo: f64,
) -> Result<f64, AssayError> {
    require_positive("t0_wild", t0_wild)?;
    require_positive("t24_wild", t24_wild)?;
    require_positive("t0_fluo", t0_fluo)?;
    require_positive("t24_fluo", t24_fluo)?;

    let numerator: f64 = (t24_wild / t0_wild).ln();
    let denominator: f64 = (t24_fluo / t0_fluo).ln();

    if denominator == 0.0 {
        return Err(AssayError::UndefinedRatio {
            input: "ln(t24_fluo / t0_fluo)",
            value: 0.0,
        });
    }

    return Ok(numerator / denominator);
}

/// The number of 4-tuples that [convolve_fitness_ratio] would enumerate for the
/// given population distributions: the product of the 4 cardinalities.
/// Saturates at `u128::MAX` instead of overflowing.
#[must_use]
pub fn combination_count(
    t0_wild: &Distribution,
    t24_wild: &Distribution,
    t0_fluo: &Distribution,
    t24_fluo: &Distribution,
) -> u128 {
    let mut count: u128 = t0_wild.cardinality() as u128;
    count = count.saturating_mul(t24_wild.cardinality() as u128);
    count = count.saturating_mul(t0_fluo.cardinality() as u128);
    count = count.saturating_mul(t24_fluo.cardinality() as u128);

    return count;
}

/// Precomputes, for 1 strain, the table of `(ln(t24 / t0), p_t0 * p_t24)` over
/// all the pairs of its 2 population distributions. The outer loop runs over
/// `t(0)`, the inner one over `t(24)`, so the table order is deterministic.
fn growth_pairs(t0: &Distribution, t24: &Distribution) -> Vec<(f64, f64)> {
    let mut pairs: Vec<(f64, f64)> = Vec::with_capacity(t0.cardinality() * t24.cardinality());

    for initial in t0.atoms() {
        for terminal in t24.atoms() {
            pairs.push((
                (terminal.value / initial.value).ln(),
                initial.probability * terminal.probability,
            ));
        }
    }

    return pairs;
}

/// Convolves the 4 population distributions trough [fitness_ratio] by exact
/// enumeration, producing the [CumulativeDistribution] of the fitness.
///
/// The enumeration visits every combination of the 4 supports, evaluates the
/// ratio and assigns it the product of the 4 probabilities. Combinations with
/// the exact same ratio are NOT merged (they stay as separate atoms of the
/// cumulative distribution), so the output cardinality is exactly
/// [combination_count].
///
///  - If [combination_count] exceeds `combination_ceiling`, the whole
///    enumeration is refused upfront with [AssayError::ExcessiveCombinations].
///  - If any support reaches 0 or below, or any fluorescent pair has a log
///    growth of exactly 0, the ratio is undefined somewhere in the product and
///    an [AssayError::UndefinedRatio] is returned. A single degenerate
///    combination poisons the whole convolution: silently skipping it would
///    redistribute its mass without the caller ever knowing.
///
/// The ratio of a combination only depends on its wild pair trough
/// `ln(t24_wild / t0_wild)` and on its fluorescent pair trough
/// `ln(t24_fluo / t0_fluo)`, so the 2 log growth tables are precomputed with
/// [growth_pairs] and the enumeration itself is a cheap 2 way product, wich
/// [rayon] splits over the wild pairs. The output order does not depend on the
/// number of threads.
pub fn convolve_fitness_ratio(
    t0_wild: &Distribution,
    t24_wild: &Distribution,
    t0_fluo: &Distribution,
    t24_fluo: &Distribution,
    combination_ceiling: u128,
) -> Result<CumulativeDistribution, AssayError> {
    let combinations: u128 = combination_count(t0_wild, t24_wild, t0_fluo, t24_fluo);
    if combination_ceiling < combinations {
        return Err(AssayError::ExcessiveCombinations {
            combinations,
            ceiling: combination_ceiling,
        });
    }

    require_positive("t0_wild support", t0_wild.min_value())?;
    require_positive("t24_wild support", t24_wild.min_value())?;
    require_positive("t0_fluo support", t0_fluo.min_value())?;
    require_positive("t24_fluo support", t24_fluo.min_value())?;

    let wild_pairs: Vec<(f64, f64)> = growth_pairs(t0_wild, t24_wild);
    let fluo_pairs: Vec<(f64, f64)> = growth_pairs(t0_fluo, t24_fluo);

    for &(log_growth, _) in &fluo_pairs {
        if log_growth == 0.0 {
            return Err(AssayError::UndefinedRatio {
                input: "ln(t24_fluo / t0_fluo)",
                value: 0.0,
            });
        }
    }

    let atoms: Vec<WeightedValue> = wild_pairs
        .par_iter()
        .flat_map_iter(|&(wild_growth, wild_probability)| {
            fluo_pairs
                .iter()
                .map(move |&(fluo_growth, fluo_probability)| WeightedValue {
                    value: wild_growth / fluo_growth,
                    probability: wild_probability * fluo_probability,
                })
        })
        .collect::<Vec<WeightedValue>>();

    return CumulativeDistribution::from_unnormalized(atoms);
}
