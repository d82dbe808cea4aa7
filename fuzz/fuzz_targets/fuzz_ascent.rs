#![no_main]

use arbitrary::Arbitrary;
use evoscape::GenotypeSpace;
use evoscape::landscape::{FitnessTable, INVALID_FITNESS, Landscape};
use libfuzzer_sys::fuzz_target;

/// Fitness for the 64 genotypes of a single codon; `None` marks invalid.
#[derive(Arbitrary, Debug)]
struct AscentInput {
    values: [Option<u8>; 64],
}

fuzz_target!(|input: AscentInput| {
    let Ok(space) = GenotypeSpace::new(1) else {
        return;
    };
    let values = input
        .values
        .iter()
        .map(|v| v.map_or(INVALID_FITNESS, |x| f64::from(x % 8)))
        .collect();
    let Ok(fitness) = FitnessTable::from_values(space, values) else {
        return;
    };
    let landscape = Landscape::from_fitness(fitness);
    let ascent = landscape.greedy_ascent();

    let violations = ascent.check_invariants(landscape.fitness());
    assert!(violations.is_empty(), "invariant violations: {violations:?}");
    let summary = ascent.summarize(landscape.fitness()).unwrap();

    let peaks = landscape.count_peaks();
    for peak in summary.reach.keys() {
        assert!(peaks.peaks.iter().any(|p| p.genotypes.contains(peak)));
    }
});
