#![allow(
    non_snake_case,
    clippy::needless_return,
    clippy::assign_op_pattern,
    clippy::excessive_precision
)]

#![warn(
    clippy::all,
    clippy::restriction,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
)]
// ^Disable warning "crate `CompetitiveFitness` should have a snake case name convert the identifier to snake case: `competitive_fitness`"
// The rest of the names will follow the snake_case convention.

//! # Competitive Fitness
//!
//!
//! This library estimates the relative fitness of 2 microbial populations that
//! competed in the same flask, using only dilution plated colony counts taken
//! before and after the competition. A colony count is a very noisy measurement:
//! it is (aproximately) a Poisson sample of a much larger true population. Instead
//! of pretending that the point estimate is exact, this crate inverts the sampling
//! process and carries a full discrete probability distribution for every
//! population trough the whole computation.
//!
//! The pipeline:
//!
//! - [x] Invert the Poisson sampling: 1 observed colony count becomes a normalized
//!   distribution over all the plausible true population sizes
//!   ([infer_population](inference::infer_population)).
//! - [x] Propagate the populations trough the deterministic liquid transfer into
//!   the competition flask ([transfer](empirical::Distribution::transfer)).
//! - [x] Combine the 4 population distributions with the fitness ratio
//!   `ln(t24_wild / t0_wild) / ln(t24_fluo / t0_fluo)` over their full Cartesian
//!   product ([convolve_fitness_ratio](fitness::convolve_fitness_ratio)).
//! - [x] Extract the mean, the standard deviation and a 2 sided confidence
//!   interval by linear interpolation of the cumulative probabilities
//!   ([CumulativeDistribution](empirical::CumulativeDistribution)).
//!
//! The computation is deterministic and the library does no I/O: results come back
//! as plain structs (see [AssayOutcome](report::AssayOutcome), wich implements
//! [Display](std::fmt::Display) for a human readable report) and every failure is
//! a typed [AssayError](errors::AssayError). The entry point for a full experiment
//! is [CompetitionAssay](assay::CompetitionAssay).
//!
//! ***
//!

pub mod assay;
pub mod configuration;
pub mod dilution;
pub mod distribution_trait;
pub mod distributions;
pub mod domain;
pub mod empirical;
pub mod errors;
pub mod euclid;
pub mod fitness;
pub mod inference;
pub mod report;
