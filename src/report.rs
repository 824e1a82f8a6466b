//! Plain text reporting of an assay run.
//!
//! [crate::assay::CompetitionAssay::evaluate] returns an [AssayOutcome], wich
//! bundles the numeric results with small summary types. Everything here
//! implements [std::fmt::Display] so a caller can just print the outcome; the
//! raw [CumulativeDistribution] stays avaliable for callers that want to do
//! their own postprocessing.

use std::fmt;

use crate::empirical::{CumulativeDistribution, Distribution};

/// The footprint of 1 intermediate population distribution: how many candidate
/// populations it holds and the range they span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionSummary {
    /// Wich pipeline stage the distribution belongs to.
    pub label: &'static str,
    /// Number of atoms in the support.
    pub cardinality: usize,
    /// Smallest population in the support.
    pub minimum: f64,
    /// Largest population in the support.
    pub maximum: f64,
}

/// The headline numbers of the fitness estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessSummary {
    pub mean: f64,
    pub standard_deviation: f64,
    /// Lower endpoint of the confidence interval.
    pub lower_bound: f64,
    /// Upper endpoint of the confidence interval.
    pub upper_bound: f64,
    /// Coverage of the interval, in `(0.0, 1.0)`.
    pub confidence_alpha: f64,
}

/// Everything an assay evaluation produces: the summaries of the 6 intermediate
/// population distributions, the size of the enumeration and the fitness
/// estimate (both the full distribution and its [FitnessSummary]).
#[derive(Debug, Clone, PartialEq)]
pub struct AssayOutcome {
    /// Summaries of the intermediate populations, in pipeline order: tube,
    /// t(0) and t(24), wild type before fluorescent.
    pub population_summaries: Vec<DistributionSummary>,
    /// How many 4-tuples the fitness convolution enumerated.
    pub combinations: u128,
    /// The full distribution of the fitness ratio.
    pub fitness_distribution: CumulativeDistribution,
    /// The headline numbers extracted from `fitness_distribution`.
    pub fitness: FitnessSummary,
}

impl DistributionSummary {
    /// Takes the footprint of `distribution` under the given stage `label`.
    #[must_use]
    pub fn describe(label: &'static str, distribution: &Distribution) -> DistributionSummary {
        return DistributionSummary {
            label,
            cardinality: distribution.cardinality(),
            minimum: distribution.min_value(),
            maximum: distribution.max_value(),
        };
    }
}

impl fmt::Display for DistributionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(
            f,
            "{}: {} values ranging from {:.0} to {:.0}",
            self.label, self.cardinality, self.minimum, self.maximum
        );
    }
}

impl fmt::Display for FitnessSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "mean: {:.6}, standard deviation: {:.6}",
            self.mean, self.standard_deviation
        )?;
        return write!(
            f,
            "Confidence interval ({:.0} percent): {:.6} to {:.6}",
            self.confidence_alpha * 100.0,
            self.lower_bound,
            self.upper_bound
        );
    }
}

impl fmt::Display for AssayOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for summary in &self.population_summaries {
            writeln!(f, "{}", summary)?;
        }
        writeln!(
            f,
            "Processing all combinations took {} steps",
            self.combinations
        )?;
        writeln!(f)?;
        return write!(f, "{}", self.fitness);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::empirical::{Distribution, WeightedValue};

    fn toy_distribution() -> Distribution {
        return Distribution::new(vec![
            WeightedValue {
                value: 100.0,
                probability: 0.25,
            },
            WeightedValue {
                value: 200.0,
                probability: 0.75,
            },
        ])
        .unwrap();
    }

    fn toy_fitness() -> FitnessSummary {
        return FitnessSummary {
            mean: 0.978123,
            standard_deviation: 0.015625,
            lower_bound: 0.95,
            upper_bound: 1.0,
            confidence_alpha: 0.95,
        };
    }

    #[test]
    fn distribution_summary_display() {
        let summary: DistributionSummary =
            DistributionSummary::describe("tube distribution for wild type", &toy_distribution());

        assert_eq!(summary.cardinality, 2);
        assert_eq!(summary.minimum, 100.0);
        assert_eq!(summary.maximum, 200.0);
        assert_eq!(
            summary.to_string(),
            "tube distribution for wild type: 2 values ranging from 100 to 200"
        );
    }

    #[test]
    fn fitness_summary_display() {
        let text: String = toy_fitness().to_string();

        assert!(text.contains("mean: 0.978123"));
        assert!(text.contains("standard deviation: 0.015625"));
        assert!(text.contains("Confidence interval (95 percent): 0.950000 to 1.000000"));
    }

    #[test]
    fn outcome_display_lists_every_stage() {
        let outcome: AssayOutcome = AssayOutcome {
            population_summaries: vec![
                DistributionSummary::describe(
                    "tube distribution for wild type",
                    &toy_distribution(),
                ),
                DistributionSummary::describe(
                    "tube distribution for fluorescent",
                    &toy_distribution(),
                ),
            ],
            combinations: 16,
            fitness_distribution: toy_distribution().cumulative(),
            fitness: toy_fitness(),
        };

        let text: String = outcome.to_string();

        assert!(text.contains("tube distribution for wild type"));
        assert!(text.contains("tube distribution for fluorescent"));
        assert!(text.contains("Processing all combinations took 16 steps"));
        assert!(text.ends_with("Confidence interval (95 percent): 0.950000 to 1.000000"));
    }
}
