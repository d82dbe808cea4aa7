#![no_main]

use arbitrary::Arbitrary;
use evoscape::{PhenotypeTable, infer_space};
use libfuzzer_sys::fuzz_target;

/// Raw table text plus an optional codon count override.
#[derive(Arbitrary, Debug)]
struct TableInput {
    text: String,
    codons: Option<u8>,
}

fuzz_target!(|input: TableInput| {
    let Ok(table) = PhenotypeTable::parse(&input.text, "fuzz") else {
        return;
    };
    assert!(!table.is_empty());
    for (sequence, value) in table.iter() {
        assert!(value.is_finite());
        assert_eq!(sequence.len(), table.sequence_len());
        assert!(value >= table.min_fitness());
    }

    // Inferring a space never panics, whatever the override
    let _ = infer_space(&table, input.codons.map(usize::from));
});
