//! The full competition assay, from colony counts to a fitness estimate.
//!
//! The wet lab protocol behind the numbers:
//!  1. The wild type strain and a fluorescent reference strain are grown
//!     overnight in separate tubes. Each tube is diluted and plated, giving 1
//!     colony count per strain.
//!  2. A small volume from each tube is transfered into a shared competition
//!     flask. This is `t(0)` of the competition.
//!  3. After 24 hours of competition the flask is diluted and plated, giving
//!     again 1 colony count per strain. This is `t(24)`.
//!
//! [CompetitionAssay] holds the protocol parameters (volumes, dilutions) and
//! the 4 colony counts, and [CompetitionAssay::evaluate] runs the whole
//! pipeline: population inference for each count, the deterministic transfer,
//! the fitness convolution and the final summary statistics.

use crate::configuration;
use crate::dilution::DilutionVolumeFactor;
use crate::empirical::{CumulativeDistribution, Distribution};
use crate::errors::AssayError;
use crate::fitness;
use crate::inference;
use crate::report::{AssayOutcome, DistributionSummary, FitnessSummary};

/// Rejects protocol parameters outside `(0.0, inf)`.
fn require_positive_argument(argument: &'static str, value: f64) -> Result<(), AssayError> {
    #[allow(clippy::nonminimal_bool)]
    if !value.is_finite() || !(0.0 < value) {
        return Err(AssayError::InvalidInput { argument, value });
    }

    return Ok(());
}

/// A single competition assay: the protocol parameters and the 4 observed
/// colony counts. Built with [CompetitionAssay::builder], evaluated with
/// [CompetitionAssay::evaluate].
///
/// ```
/// use CompetitiveFitness::assay::CompetitionAssay;
///
/// let assay: CompetitionAssay = CompetitionAssay::builder()
///     .tube_volume(1.0)
///     .tube_sample_volume(0.1)
///     .tube_dilution(10_000.0)
///     .transfer_volume(0.1)
///     .flask_volume(10.0)
///     .flask_sample_volume(0.2)
///     .flask_dilution(10_000.0)
///     .tube_count_wild(350)
///     .tube_count_fluo(250)
///     .flask_count_wild(600)
///     .flask_count_fluo(500)
///     .relative_step_size(0.02)
///     .build()?;
///
/// let outcome = assay.evaluate()?;
/// assert!(outcome.fitness.lower_bound < outcome.fitness.upper_bound);
/// # Ok::<(), CompetitiveFitness::errors::AssayError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CompetitionAssay {
    /// Total volume of each overnight tube.
    tube_volume: f64,
    /// Volume taken from a tube for its dilution series.
    tube_sample_volume: f64,
    /// Fold dilution applied to the tube sample before plating.
    tube_dilution: f64,
    /// Volume moved from each tube into the competition flask.
    transfer_volume: f64,
    /// Total volume of the competition flask.
    flask_volume: f64,
    /// Volume taken from the flask for its dilution series.
    flask_sample_volume: f64,
    /// Fold dilution applied to the flask sample before plating.
    flask_dilution: f64,
    tube_count_wild: u64,
    tube_count_fluo: u64,
    flask_count_wild: u64,
    flask_count_fluo: u64,
    confidence_alpha: f64,
    relative_step_size: f64,
    combination_ceiling: u128,
}

#[bon::bon]
impl CompetitionAssay {
    /// Validates the protocol parameters and assembles the assay.
    ///
    ///  - Every volume and dilution must be finite and stricly positive.
    ///  - `transfer_volume` must fit inside `flask_volume`.
    ///  - `confidence_alpha` (deafult
    ///    [configuration::DEFAULT_CONFIDENCE_ALPHA]) and `relative_step_size`
    ///    (deafult [configuration::DEFAULT_RELATIVE_STEP_SIZE]) must be in
    ///    `(0.0, 1.0)`.
    ///  - `combination_ceiling` (deafult
    ///    [configuration::DEFAULT_COMBINATION_CEILING]) caps the enumeration in
    ///    [fitness::convolve_fitness_ratio].
    #[builder]
    pub fn new(
        tube_volume: f64,
        tube_sample_volume: f64,
        tube_dilution: f64,
        transfer_volume: f64,
        flask_volume: f64,
        flask_sample_volume: f64,
        flask_dilution: f64,
        tube_count_wild: u64,
        tube_count_fluo: u64,
        flask_count_wild: u64,
        flask_count_fluo: u64,
        #[builder(default = configuration::DEFAULT_CONFIDENCE_ALPHA)] confidence_alpha: f64,
        #[builder(default = configuration::DEFAULT_RELATIVE_STEP_SIZE)] relative_step_size: f64,
        #[builder(default = configuration::DEFAULT_COMBINATION_CEILING)] combination_ceiling: u128,
    ) -> Result<CompetitionAssay, AssayError> {
        require_positive_argument("tube_volume", tube_volume)?;
        require_positive_argument("tube_sample_volume", tube_sample_volume)?;
        require_positive_argument("tube_dilution", tube_dilution)?;
        require_positive_argument("transfer_volume", transfer_volume)?;
        require_positive_argument("flask_volume", flask_volume)?;
        require_positive_argument("flask_sample_volume", flask_sample_volume)?;
        require_positive_argument("flask_dilution", flask_dilution)?;

        if flask_volume < transfer_volume {
            return Err(AssayError::InvalidInput {
                argument: "transfer_volume (larger than flask_volume)",
                value: transfer_volume,
            });
        }

        #[allow(clippy::nonminimal_bool)]
        if !confidence_alpha.is_finite() || !(0.0 < confidence_alpha && confidence_alpha < 1.0) {
            return Err(AssayError::InvalidInput {
                argument: "confidence_alpha",
                value: confidence_alpha,
            });
        }

        #[allow(clippy::nonminimal_bool)]
        if !relative_step_size.is_finite() || !(0.0 < relative_step_size && relative_step_size < 1.0)
        {
            return Err(AssayError::InvalidInput {
                argument: "relative_step_size",
                value: relative_step_size,
            });
        }

        return Ok(CompetitionAssay {
            tube_volume,
            tube_sample_volume,
            tube_dilution,
            transfer_volume,
            flask_volume,
            flask_sample_volume,
            flask_dilution,
            tube_count_wild,
            tube_count_fluo,
            flask_count_wild,
            flask_count_fluo,
            confidence_alpha,
            relative_step_size,
            combination_ceiling,
        });
    }
}

impl CompetitionAssay {
    /// Runs the whole pipeline and returns the [AssayOutcome].
    ///
    /// Shares the error conditions of all its stages:
    /// [AssayError::EmptyDistribution] when a colony count and its dilution are
    /// incompatible, [AssayError::ExcessiveCombinations] when the step size is
    /// too fine for the ceiling and [AssayError::UndefinedRatio] when a
    /// population distribution reaches 0 or the fluorescent reference shows no
    /// net growth.
    pub fn evaluate(&self) -> Result<AssayOutcome, AssayError> {
        /* Plan: infer the 2 tube populations from the tube platings, scale them
           by the transfered fraction to get the t(0) populations, infer the 2
           t(24) populations from the flask platings, then push the 4 of them
           trough the fitness ratio and summarize.
        */

        let tube_factor: DilutionVolumeFactor = DilutionVolumeFactor::new(
            self.tube_dilution,
            self.tube_volume,
            self.tube_sample_volume,
        )?;
        let tube_wild: Distribution = inference::infer_population(
            self.tube_count_wild,
            tube_factor,
            self.confidence_alpha,
            self.relative_step_size,
        )?;
        let tube_fluo: Distribution = inference::infer_population(
            self.tube_count_fluo,
            tube_factor,
            self.confidence_alpha,
            self.relative_step_size,
        )?;

        // the transfer carries `transfer_volume / flask_volume` of the final
        // flask, so each tube population is scaled by that fraction
        let transfer_fraction: f64 = self.transfer_volume / self.flask_volume;
        let t0_wild: Distribution = tube_wild.transfer(transfer_fraction)?;
        let t0_fluo: Distribution = tube_fluo.transfer(transfer_fraction)?;

        let flask_factor: DilutionVolumeFactor = DilutionVolumeFactor::new(
            self.flask_dilution,
            self.flask_volume,
            self.flask_sample_volume,
        )?;
        let t24_wild: Distribution = inference::infer_population(
            self.flask_count_wild,
            flask_factor,
            self.confidence_alpha,
            self.relative_step_size,
        )?;
        let t24_fluo: Distribution = inference::infer_population(
            self.flask_count_fluo,
            flask_factor,
            self.confidence_alpha,
            self.relative_step_size,
        )?;

        let combinations: u128 =
            fitness::combination_count(&t0_wild, &t24_wild, &t0_fluo, &t24_fluo);

        let population_summaries: Vec<DistributionSummary> = vec![
            DistributionSummary::describe("tube distribution for wild type", &tube_wild),
            DistributionSummary::describe("tube distribution for fluorescent", &tube_fluo),
            DistributionSummary::describe("t(0) distribution for wild type", &t0_wild),
            DistributionSummary::describe("t(0) distribution for fluorescent", &t0_fluo),
            DistributionSummary::describe("t(24) distribution for wild type", &t24_wild),
            DistributionSummary::describe("t(24) distribution for fluorescent", &t24_fluo),
        ];

        let fitness_distribution: CumulativeDistribution = fitness::convolve_fitness_ratio(
            &t0_wild,
            &t24_wild,
            &t0_fluo,
            &t24_fluo,
            self.combination_ceiling,
        )?;

        let mean: f64 = fitness_distribution.mean();
        let standard_deviation: f64 = fitness_distribution.standard_deviation(mean);

        let lower_tail: f64 = 0.5 * (1.0 - self.confidence_alpha);
        let upper_tail: f64 = 0.5 * (1.0 + self.confidence_alpha);
        let (lower_bound, upper_bound): (f64, f64) =
            fitness_distribution.confidence_interval(lower_tail, upper_tail)?;

        return Ok(AssayOutcome {
            population_summaries,
            combinations,
            fitness_distribution,
            fitness: FitnessSummary {
                mean,
                standard_deviation,
                lower_bound,
                upper_bound,
                confidence_alpha: self.confidence_alpha,
            },
        });
    }
}
