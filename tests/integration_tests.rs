use CompetitiveFitness::assay::CompetitionAssay;
use CompetitiveFitness::errors::AssayError;
use CompetitiveFitness::report::AssayOutcome;

/// The running example of the crate: 350/250 colonies from the overnight tubes
/// and 600/500 colonies from the competition flask. Every parameter except the
/// ones exposed as arguments is fixed to the protocol of that experiment.
fn build_assay(
    tube_volume: f64,
    transfer_volume: f64,
    confidence_alpha: f64,
    relative_step_size: f64,
) -> Result<CompetitionAssay, AssayError> {
    return CompetitionAssay::builder()
        .tube_volume(tube_volume)
        .tube_sample_volume(0.1)
        .tube_dilution(10_000.0)
        .transfer_volume(transfer_volume)
        .flask_volume(10.0)
        .flask_sample_volume(0.2)
        .flask_dilution(10_000.0)
        .tube_count_wild(350)
        .tube_count_fluo(250)
        .flask_count_wild(600)
        .flask_count_fluo(500)
        .confidence_alpha(confidence_alpha)
        .relative_step_size(relative_step_size)
        .build();
}

#[test]
fn full_pipeline_with_the_deafult_tuning() {
    let assay: CompetitionAssay = CompetitionAssay::builder()
        .tube_volume(1.0)
        .tube_sample_volume(0.1)
        .tube_dilution(10_000.0)
        .transfer_volume(0.1)
        .flask_volume(10.0)
        .flask_sample_volume(0.2)
        .flask_dilution(10_000.0)
        .tube_count_wild(350)
        .tube_count_fluo(250)
        .flask_count_wild(600)
        .flask_count_fluo(500)
        .build()
        .expect("The assay parameters should be valid. ");

    let outcome: AssayOutcome = assay.evaluate().expect("The evaluation should succeed. ");

    // every pipeline stage is reported, in order
    let labels: Vec<&'static str> = outcome
        .population_summaries
        .iter()
        .map(|summary| summary.label)
        .collect::<Vec<&'static str>>();
    assert_eq!(
        labels,
        vec![
            "tube distribution for wild type",
            "tube distribution for fluorescent",
            "t(0) distribution for wild type",
            "t(0) distribution for fluorescent",
            "t(24) distribution for wild type",
            "t(24) distribution for fluorescent",
        ]
    );
    for summary in &outcome.population_summaries {
        assert!(1 < summary.cardinality);
        assert!(0.0 < summary.minimum);
        assert!(summary.minimum < summary.maximum);
    }

    // the transfer moves 0.1 ml into 10.0 ml, so the t(0) populations are the
    // tube populations scaled by exactly 0.01
    assert_eq!(
        outcome.population_summaries[2].minimum,
        outcome.population_summaries[0].minimum * 0.01
    );
    assert_eq!(
        outcome.population_summaries[2].maximum,
        outcome.population_summaries[0].maximum * 0.01
    );
    assert_eq!(
        outcome.population_summaries[3].minimum,
        outcome.population_summaries[1].minimum * 0.01
    );
    assert_eq!(
        outcome.population_summaries[2].cardinality,
        outcome.population_summaries[0].cardinality
    );

    // the convolution enumerates the full Cartesian product and keeps every
    // combination as its own atom
    let product: u128 = outcome.population_summaries[2].cardinality as u128
        * outcome.population_summaries[4].cardinality as u128
        * outcome.population_summaries[3].cardinality as u128
        * outcome.population_summaries[5].cardinality as u128;
    assert_eq!(outcome.combinations, product);
    assert_eq!(outcome.fitness_distribution.cardinality() as u128, product);

    // the wild type grew from ~350_000 to ~300_000_000 (a factor of ~857) while
    // the reference grew from ~250_000 to ~250_000_000 (a factor of ~1000), so
    // the fitness is slightly below 1
    assert!((outcome.fitness.mean - 0.9777).abs() < 0.01);
    assert!(0.005 < outcome.fitness.standard_deviation);
    assert!(outcome.fitness.standard_deviation < 0.05);

    assert!(outcome.fitness.lower_bound < outcome.fitness.mean);
    assert!(outcome.fitness.mean < outcome.fitness.upper_bound);
    let width: f64 = outcome.fitness.upper_bound - outcome.fitness.lower_bound;
    assert!(0.02 < width);
    assert!(width < 0.15);
    assert_eq!(outcome.fitness.confidence_alpha, 0.95);

    // the rendered report mentions every stage and the interval
    let text: String = outcome.to_string();
    assert!(text.contains("tube distribution for wild type"));
    assert!(text.contains("t(24) distribution for fluorescent"));
    assert!(text.contains("Processing all combinations took"));
    assert!(text.contains("Confidence interval (95 percent)"));
}

#[test]
fn identical_strains_have_a_fitness_of_one() {
    let assay: CompetitionAssay = CompetitionAssay::builder()
        .tube_volume(1.0)
        .tube_sample_volume(0.1)
        .tube_dilution(10_000.0)
        .transfer_volume(0.1)
        .flask_volume(10.0)
        .flask_sample_volume(0.2)
        .flask_dilution(10_000.0)
        .tube_count_wild(300)
        .tube_count_fluo(300)
        .flask_count_wild(600)
        .flask_count_fluo(600)
        .relative_step_size(0.01)
        .build()
        .expect("The assay parameters should be valid. ");

    let outcome: AssayOutcome = assay.evaluate().expect("The evaluation should succeed. ");

    // same counts, same dilutions: both strains have the exact same evidence
    assert_eq!(
        outcome.population_summaries[0].cardinality,
        outcome.population_summaries[1].cardinality
    );
    assert_eq!(
        outcome.population_summaries[0].minimum,
        outcome.population_summaries[1].minimum
    );
    assert_eq!(
        outcome.population_summaries[0].maximum,
        outcome.population_summaries[1].maximum
    );

    // the fitness estimate is centered on 1 and the interval straddles it
    assert!((outcome.fitness.mean - 1.0).abs() < 0.01);
    assert!(outcome.fitness.lower_bound < 1.0);
    assert!(1.0 < outcome.fitness.upper_bound);
}

#[test]
fn builder_rejects_bad_protocol_parameters() {
    assert!(matches!(
        build_assay(-1.0, 0.1, 0.95, 0.005),
        Err(AssayError::InvalidInput {
            argument: "tube_volume",
            ..
        })
    ));
    assert!(build_assay(f64::NAN, 0.1, 0.95, 0.005).is_err());

    // the transfered volume cannot exceed the flask it goes into
    assert!(matches!(
        build_assay(1.0, 20.0, 0.95, 0.005),
        Err(AssayError::InvalidInput { .. })
    ));

    assert!(build_assay(1.0, 0.1, 1.0, 0.005).is_err());
    assert!(build_assay(1.0, 0.1, 0.0, 0.005).is_err());
    assert!(build_assay(1.0, 0.1, 0.95, 0.0).is_err());
    assert!(build_assay(1.0, 0.1, 0.95, 1.5).is_err());
}

#[test]
fn ceiling_stops_the_evaluation_upfront() {
    let assay: CompetitionAssay = CompetitionAssay::builder()
        .tube_volume(1.0)
        .tube_sample_volume(0.1)
        .tube_dilution(10_000.0)
        .transfer_volume(0.1)
        .flask_volume(10.0)
        .flask_sample_volume(0.2)
        .flask_dilution(10_000.0)
        .tube_count_wild(350)
        .tube_count_fluo(250)
        .flask_count_wild(600)
        .flask_count_fluo(500)
        .combination_ceiling(1_000)
        .build()
        .expect("The assay parameters should be valid. ");

    let result = assay.evaluate();
    assert!(matches!(
        result,
        Err(AssayError::ExcessiveCombinations { ceiling: 1_000, .. })
    ));
}
