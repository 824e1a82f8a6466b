use CompetitiveFitness::empirical::{CumulativeDistribution, Distribution, WeightedValue};
use CompetitiveFitness::errors::AssayError;
use CompetitiveFitness::fitness::{combination_count, convolve_fitness_ratio, fitness_ratio};
use assert_approx_eq::assert_approx_eq;

fn distribution(pairs: &[(f64, f64)]) -> Distribution {
    let atoms: Vec<WeightedValue> = pairs
        .iter()
        .map(|&(value, probability)| WeightedValue { value, probability })
        .collect::<Vec<WeightedValue>>();

    return Distribution::new(atoms).expect("Atoms should be valid. ");
}

fn single(value: f64) -> Distribution {
    return distribution(&[(value, 1.0)]);
}

#[cfg(test)]
mod ratio_tests {
    use super::*;

    #[test]
    fn pointwise_ratio() {
        // the wild type doubled while the reference grew by half
        let ratio: f64 = fitness_ratio(100.0, 200.0, 100.0, 150.0)
            .expect("The ratio should be defined. ");
        assert_eq!(ratio, 2.0_f64.ln() / 1.5_f64.ln());

        // identical growths give a fitness of exactly 1
        let even: f64 =
            fitness_ratio(100.0, 200.0, 50.0, 100.0).expect("The ratio should be defined. ");
        assert_eq!(even, 1.0);
    }

    #[test]
    fn shrinking_populations_are_still_defined() {
        // both strains shrank; the reference shrank, so the denominator is negative
        let ratio: f64 =
            fitness_ratio(200.0, 100.0, 200.0, 50.0).expect("The ratio should be defined. ");
        assert!(0.0 < ratio);
        assert!(ratio < 1.0);
    }

    #[test]
    fn rejects_non_positive_populations() {
        assert!(matches!(
            fitness_ratio(0.0, 200.0, 100.0, 150.0),
            Err(AssayError::UndefinedRatio {
                input: "t0_wild",
                ..
            })
        ));
        assert!(fitness_ratio(100.0, -5.0, 100.0, 150.0).is_err());
        assert!(fitness_ratio(100.0, 200.0, f64::NAN, 150.0).is_err());
        assert!(fitness_ratio(100.0, 200.0, 100.0, f64::INFINITY).is_err());
    }

    #[test]
    fn rejects_a_reference_with_no_net_growth() {
        let result = fitness_ratio(100.0, 200.0, 150.0, 150.0);
        assert!(matches!(
            result,
            Err(AssayError::UndefinedRatio {
                input: "ln(t24_fluo / t0_fluo)",
                ..
            })
        ));
    }
}

#[cfg(test)]
mod convolution_tests {
    use super::*;

    fn two_by_two_inputs() -> (Distribution, Distribution, Distribution, Distribution) {
        let t0_wild: Distribution = distribution(&[(100.0, 0.5), (200.0, 0.5)]);
        let t24_wild: Distribution = distribution(&[(100.0, 0.5), (200.0, 0.5)]);
        let t0_fluo: Distribution = distribution(&[(90.0, 0.5), (110.0, 0.5)]);
        let t24_fluo: Distribution = distribution(&[(200.0, 0.5), (240.0, 0.5)]);
        return (t0_wild, t24_wild, t0_fluo, t24_fluo);
    }

    #[test]
    fn counting_combinations() {
        let (t0_wild, t24_wild, t0_fluo, t24_fluo) = two_by_two_inputs();
        assert_eq!(
            combination_count(&t0_wild, &t24_wild, &t0_fluo, &t24_fluo),
            16
        );
        assert_eq!(
            combination_count(&single(1.0), &single(2.0), &single(3.0), &single(4.0)),
            1
        );
    }

    #[test]
    fn single_combination_reproduces_the_pointwise_ratio() {
        let fitness: CumulativeDistribution = convolve_fitness_ratio(
            &single(100.0),
            &single(200.0),
            &single(100.0),
            &single(150.0),
            10,
        )
        .expect("The convolution should succeed. ");

        assert_eq!(fitness.cardinality(), 1);
        assert_eq!(
            fitness.entries()[0].value,
            fitness_ratio(100.0, 200.0, 100.0, 150.0).unwrap()
        );
        assert_eq!(fitness.entries()[0].probability, 1.0);
        assert_eq!(fitness.entries()[0].cumulative, 1.0);
    }

    #[test]
    fn full_enumeration_keeps_every_combination() {
        let (t0_wild, t24_wild, t0_fluo, t24_fluo) = two_by_two_inputs();

        let fitness: CumulativeDistribution =
            convolve_fitness_ratio(&t0_wild, &t24_wild, &t0_fluo, &t24_fluo, 1_000)
                .expect("The convolution should succeed. ");

        // combinations with the exact same ratio stay as separate atoms
        assert_eq!(fitness.cardinality(), 16);

        // the 2 zero growth wild pairs give a ratio of 0 against all 4
        // fluorescent pairs
        let zeros: usize = fitness
            .entries()
            .iter()
            .filter(|entry| entry.value == 0.0)
            .count();
        assert_eq!(zeros, 8);

        // sorted ascending (ties allowed) and properly normalized
        for pair in fitness.entries().windows(2) {
            assert!(pair[0].value <= pair[1].value);
            assert!(pair[0].cumulative < pair[1].cumulative);
        }
        assert_eq!(fitness.entries().last().unwrap().cumulative, 1.0);
    }

    #[test]
    fn convolution_mean_matches_the_direct_enumeration() {
        let (t0_wild, t24_wild, t0_fluo, t24_fluo) = two_by_two_inputs();

        let fitness: CumulativeDistribution =
            convolve_fitness_ratio(&t0_wild, &t24_wild, &t0_fluo, &t24_fluo, 1_000)
                .expect("The convolution should succeed. ");

        let mut expectation: f64 = 0.0;
        for a in t0_wild.atoms() {
            for b in t24_wild.atoms() {
                for c in t0_fluo.atoms() {
                    for d in t24_fluo.atoms() {
                        let ratio: f64 = fitness_ratio(a.value, b.value, c.value, d.value)
                            .expect("The ratio should be defined. ");
                        expectation +=
                            ratio * a.probability * b.probability * c.probability * d.probability;
                    }
                }
            }
        }

        assert_approx_eq!(fitness.mean(), expectation, 1.0e-12);
    }

    #[test]
    fn refuses_to_enumerate_beyond_the_ceiling() {
        let (t0_wild, t24_wild, t0_fluo, t24_fluo) = two_by_two_inputs();

        let result = convolve_fitness_ratio(&t0_wild, &t24_wild, &t0_fluo, &t24_fluo, 10);
        assert!(matches!(
            result,
            Err(AssayError::ExcessiveCombinations {
                combinations: 16,
                ceiling: 10
            })
        ));
    }

    #[test]
    fn refuses_supports_that_reach_zero() {
        let degenerate: Distribution = distribution(&[(0.0, 0.5), (100.0, 0.5)]);

        let result = convolve_fitness_ratio(
            &degenerate,
            &single(200.0),
            &single(100.0),
            &single(150.0),
            1_000,
        );
        assert!(matches!(
            result,
            Err(AssayError::UndefinedRatio {
                input: "t0_wild support",
                ..
            })
        ));
    }

    #[test]
    fn refuses_a_reference_pair_with_no_net_growth() {
        // only the (200.0, 200.0) pair is degenerate, but 1 bad combination
        // poisons the whole convolution
        let t0_fluo: Distribution = distribution(&[(100.0, 0.5), (200.0, 0.5)]);
        let t24_fluo: Distribution = distribution(&[(200.0, 0.5), (400.0, 0.5)]);

        let result = convolve_fitness_ratio(
            &single(100.0),
            &single(200.0),
            &t0_fluo,
            &t24_fluo,
            1_000,
        );
        assert!(matches!(
            result,
            Err(AssayError::UndefinedRatio {
                input: "ln(t24_fluo / t0_fluo)",
                ..
            })
        ));
    }
}
