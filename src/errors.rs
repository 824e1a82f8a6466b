use thiserror::Error;

/// An enum with everything that can go wrong in the assay pipeline.
///
/// All variants are fatal: the pipeline is deterministic and offline, so a failure
/// means either bad input or a parameter choice that the caller must correct
/// (there is nothing to retry). Every variant carries the offending quantity so
/// the caller can report something actionable.
#[derive(Error, Debug)]
pub enum AssayError {
    /// A number did not fullfill the preconditions of the function. Maybe it was
    /// non-positive when positivity was requiered, was infinite or NaN, or was
    /// outside `(0.0, 1.0)` when a probability was asked for.
    #[error(
        "The argument `{argument}` (= {value}) did not fullfill the preconditions of the function. "
    )]
    InvalidInput {
        /// Name of the rejected argument.
        argument: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The population scan accepted no candidate at all, not even the anchor
    /// point estimate. The observed count and the dilution are mutually
    /// incompatible (or the step size is far too coarse).
    #[error(
        "No plausible population was found for the observed count {observed_count} (scan anchor: {anchor}). The count and the dilution are incompatible, or the step size is too coarse. "
    )]
    EmptyDistribution {
        /// The colony count that the scan tried to explain.
        observed_count: u64,
        /// The point estimate the scan started from.
        anchor: u64,
    },
    /// The fitness ratio `ln(t24_wild / t0_wild) / ln(t24_fluo / t0_fluo)` was
    /// evaluated at a point where it is not defined: a non-positive population
    /// inside a logarithm or a fluorescent population with no net growth
    /// (`ln(1) = 0` in the denominator).
    #[error("The fitness ratio is undefined for `{input}` = {value}. ")]
    UndefinedRatio {
        /// Wich input made the ratio undefined.
        input: &'static str,
        /// The offending value.
        value: f64,
    },
    /// The requested quantile is not stricly bracketed by the cumulative
    /// probabilities of the distribution, so there is no pair of atoms to
    /// interpolate between.
    #[error(
        "The quantile {quantile} is not bracketed by the cumulative distribution (wich covers {lowest_cumulative} to {highest_cumulative}). "
    )]
    QuantileNotBracketed {
        /// The requested cumulative probability.
        quantile: f64,
        /// Cumulative probability of the first atom.
        lowest_cumulative: f64,
        /// Cumulative probability of the last atom.
        highest_cumulative: f64,
    },
    /// The Cartesian product of the 4 population distributions is larger than
    /// the configured ceiling. Use a coarser `relative_step_size` or raise the
    /// ceiling.
    #[error(
        "Refusing to enumerate {combinations} fitness ratio combinations (the ceiling is {ceiling}). Use a coarser step size or raise the ceiling. "
    )]
    ExcessiveCombinations {
        /// The number of 4-tuples the convolution would have to visit.
        combinations: u128,
        /// The configured maximum.
        ceiling: u128,
    },
}
