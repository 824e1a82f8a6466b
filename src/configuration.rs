
//! This file contains the deafult values and other value choices used trough the library.
//!


/// Maximum allowed deviation between `1.0` and the sum of the probabilities of a
/// normalized distribution.
///
/// The distributions of this crate are built by dividing a list of raw weights by
/// their tally, so mathematically they always add up to exactly `1.0`. This
/// tolerance only absorbs the floating point rounding of that normalization.
/// Anything beyond it is treated as a logic error and rejected.
pub static PROBABILITY_SUM_TOLERANCE: f64 = 1e-9;

/// The deafult confidence level for the plausibility test of the population scan
/// and for the final confidence interval of the fitness ratio.
///
/// `0.95` means that a candidate population is kept if the observed colony count
/// falls within the central 95% interval of its sampling distribution, and that
/// the reported confidence interval covers the central 95% of the fitness ratio
/// distribution.
pub static DEFAULT_CONFIDENCE_ALPHA: f64 = 0.95;

/// The deafult step of the population scan, relative to the anchor point estimate.
///
/// The scan walks away from the anchor in steps of
/// `max(floor(relative_step_size * anchor), 1)` candidates. Smaller values give
/// finer distributions but the cost of the final convolution grows with the 4th
/// power of the resolution, so be careful: values in the `0.005..=0.02` range
/// fullfill most needs.
pub static DEFAULT_RELATIVE_STEP_SIZE: f64 = 0.005;

/// The deafult ceiling on the number of 4-tuples that the fitness convolution is
/// allowed to enumerate.
///
/// The convolution materializes the full Cartesian product of the 4 population
/// distributions, wich for very fine scans can explode combinatorially. Requests
/// above the ceiling are rejected with
/// [ExcessiveCombinations](crate::errors::AssayError::ExcessiveCombinations)
/// before allocating anything. `100 000 000` tuples correspond to roughly 1.6 GB
/// of atoms, a deliberately generous limit for a workstation.
pub static DEFAULT_COMBINATION_CEILING: u128 = 100_000_000;

/// Maximum number of domain elements visited by the deafult implementations of
/// the moments (mean, variance) and of the mode in
/// [DiscreteDistribution](crate::distribution_trait::DiscreteDistribution).
///
/// For unbounded domains the walk has to stop somewhere. `1 << 16 = 65 536`
/// elements cover essentially all the mass of every distribution this crate
/// works with. Distributions with an analytical solution (such as
/// [Poisson](crate::distributions::Poisson::Poisson)) override the deafults and
/// never pay this cost.
pub static MOMENT_MAXIMUM_STEPS: u64 = 1 << 16;
