//! Inference of the population size in the original vessel from a single
//! colony count on a plate.
//!
//! The sampling model: when a vessel with `N` cells goes trough dilution and
//! plating with a combined [DilutionVolumeFactor] `f`, the number of colonies
//! on the plate is `Poisson(N * f)` distributed. Plating gives us 1 draw from
//! that distribution (the observed count) and we want the plausible values of
//! `N`.
//!
//! Instead of a posterior over all of `0..`, [infer_population] scans a grid of
//! candidate populations around the naive point estimate `observed / f` and
//! keeps the candidates wich pass a 2 sided plausibility gate
//! ([could_be_in_sample]), weighted by the likelihood of the observation. The
//! result is an [empirical::Distribution](crate::empirical::Distribution) over
//! the candidate populations.

use crate::dilution::DilutionVolumeFactor;
use crate::distribution_trait::DiscreteDistribution;
use crate::distributions::Poisson::Poisson;
use crate::empirical::{Distribution, WeightedValue};
use crate::errors::AssayError;

/// Decides if the population `candidate` could plausibly have produced the
/// `observed_count` colonies: the observation must fall inside the 2 sided,
/// equal tailed `confidence_alpha` interval of the sampling distribution
/// `Poisson(candidate * factor)` (both endpoints included).
///
/// A `candidate` of `0` has a degenerate sampling distribution with all the
/// mass at 0 colonies, so it is plausible exactly when `observed_count` is `0`.
pub fn could_be_in_sample(
    candidate: u64,
    observed_count: u64,
    factor: DilutionVolumeFactor,
    confidence_alpha: f64,
) -> Result<bool, AssayError> {
    if candidate == 0 {
        return Ok(observed_count == 0);
    }

    let sampling: Poisson = Poisson::new(factor.expected_sample_mean(candidate))?;
    let (lower, upper): (f64, f64) = sampling.interval(confidence_alpha);

    let observed: f64 = observed_count as f64;
    return Ok(lower <= observed && observed <= upper);
}

/// The unnormalized weight of an accepted candidate: the likelihood of drawing
/// `observed_count` colonies from `Poisson(candidate * factor)`. For the
/// degenerate `candidate == 0` the weight is `1.0` (the gate only lets it
/// trough when the observation is also 0, where the degenerate pmf is 1).
fn acceptance_weight(
    candidate: u64,
    observed_count: u64,
    factor: DilutionVolumeFactor,
) -> Result<f64, AssayError> {
    if candidate == 0 {
        return Ok(1.0);
    }

    let sampling: Poisson = Poisson::new(factor.expected_sample_mean(candidate))?;
    return Ok(sampling.pmf(observed_count as f64));
}

/// Estimates the population in the original vessel given the `observed_count`
/// colonies on the plate and the [DilutionVolumeFactor] of the plating.
///
/// The scan is anchored at the naive point estimate
/// [perfect_point_estimate](DilutionVolumeFactor::perfect_point_estimate) and
/// moves in steps of `relative_step_size * anchor` cells (at least 1):
/// downwards from the anchor itself and upwards from 1 step above it, in both
/// directions until the first candidate that fails [could_be_in_sample]. Every
/// accepted candidate gets its likelihood as weight and the accepted set is
/// normalized into a [Distribution].
///
///  - `confidence_alpha` is the coverage of the plausibility gate and must be
///    in `(0.0, 1.0)` (`0.95` rejects candidates for wich the observation is
///    outside the central 95% of the sampling distribution).
///  - `relative_step_size` must be in `(0.0, 1.0)`. Smaller steps give a finer
///    grid. Keep in mind that the costs multiply once distributions are
///    convolved: see
///    [DEFAULT_RELATIVE_STEP_SIZE](crate::configuration::DEFAULT_RELATIVE_STEP_SIZE).
///  - If no candidate at all passes the gate (possible when the factor is so
///    coarse that even the anchor is implausible, or so small that the anchor
///    saturates at `u64::MAX` and falls short of the count), an
///    [AssayError::EmptyDistribution] is returned.
pub fn infer_population(
    observed_count: u64,
    factor: DilutionVolumeFactor,
    confidence_alpha: f64,
    relative_step_size: f64,
) -> Result<Distribution, AssayError> {
    #[allow(clippy::nonminimal_bool)]
    if !confidence_alpha.is_finite() || !(0.0 < confidence_alpha && confidence_alpha < 1.0) {
        return Err(AssayError::InvalidInput {
            argument: "confidence_alpha",
            value: confidence_alpha,
        });
    }

    #[allow(clippy::nonminimal_bool)]
    if !relative_step_size.is_finite() || !(0.0 < relative_step_size && relative_step_size < 1.0) {
        return Err(AssayError::InvalidInput {
            argument: "relative_step_size",
            value: relative_step_size,
        });
    }

    /* Plan: anchor the scan at the deterministic inversion of the observation.
       Walk down (anchor included) and then up, 1 step at a time, pushing every
       candidate that passes the gate. Both walks stop at the first rejection,
       so the support is a contiguous grid. Then normalize the likelihoods.
    */

    let anchor: u64 = factor.perfect_point_estimate(observed_count);
    let step_size: u64 = ((relative_step_size * anchor as f64) as u64).max(1);

    let mut atoms: Vec<WeightedValue> = Vec::new();

    // downward walk, anchor included
    let mut candidate: u64 = anchor;
    loop {
        if !could_be_in_sample(candidate, observed_count, factor, confidence_alpha)? {
            break;
        }
        atoms.push(WeightedValue {
            value: candidate as f64,
            probability: acceptance_weight(candidate, observed_count, factor)?,
        });
        if candidate <= step_size {
            // the next step would leave the non-negative integers
            break;
        }
        candidate = candidate - step_size;
    }

    // upward walk, starting 1 step above the anchor. The steps are checked
    // additions: for extreme factors the anchor saturates at `u64::MAX` and
    // the grid ends at the last representable population.
    let mut next_up: Option<u64> = anchor.checked_add(step_size);
    while let Some(candidate) = next_up {
        if !could_be_in_sample(candidate, observed_count, factor, confidence_alpha)? {
            break;
        }
        atoms.push(WeightedValue {
            value: candidate as f64,
            probability: acceptance_weight(candidate, observed_count, factor)?,
        });
        next_up = candidate.checked_add(step_size);
    }

    if atoms.is_empty() {
        return Err(AssayError::EmptyDistribution {
            observed_count,
            anchor,
        });
    }

    return Distribution::from_unnormalized(atoms);
}
