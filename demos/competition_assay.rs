//! This file contains a complete example of a competition assay: from the 4
//! colony counts of the protocol to the final fitness estimate.
//!
//!
//!

use CompetitiveFitness::assay::CompetitionAssay;
use CompetitiveFitness::report::AssayOutcome;
use std::time::Instant;

fn main() {
    println!("Evaluating a competition assay: **********************************\n");

    println!(
        "The wild type strain and the fluorescent reference strain grew overnight in \
        separate 1.0 ml tubes. We plated 0.1 ml of a 10000 fold dilution of each tube \
        and counted 350 (wild type) and 250 (fluorescent) colonies. \n"
    );

    println!(
        "We then transfered 0.1 ml of each tube into a shared 10.0 ml competition \
        flask. After 24 hours of competition we plated 0.2 ml of a 10000 fold \
        dilution of the flask and counted 600 (wild type) and 500 (fluorescent) \
        colonies. \n"
    );

    let start: Instant = Instant::now();

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
        .confidence_alpha(0.95)
        .relative_step_size(0.005)
        .build()
        .expect("The assay parameters should be valid. ");

    println!(
        "Each colony count is a single Poisson draw, so each population is only known \
        as a distribution of plausible values. We enumerate every combination of the \
        plausible populations to get the distribution of the fitness ratio. \n"
    );

    println!("Processing... \n");

    let outcome: AssayOutcome = assay.evaluate().expect("The evaluation should succeed. ");

    println!("{outcome}");

    println!(
        "\nA fitness of 1 means both strains grew by the same factor during the \
        competition. If the whole confidence interval is below 1, the wild type \
        was outcompeted by the reference. "
    );

    let elapsed: f64 = start.elapsed().as_secs_f64();
    println!("\nScript took {:.6} seconds. ", elapsed);
}
