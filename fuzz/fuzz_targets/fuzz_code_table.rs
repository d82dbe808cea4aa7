#![no_main]

use evoscape::code::{GeneticCode, robustness};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(code) = GeneticCode::parse(text, "fuzz") else {
        return;
    };

    // A parsed code assigns every codon and survives its own output format
    let mut written = Vec::new();
    code.write_table(&mut written).unwrap();
    let reparsed = GeneticCode::parse(std::str::from_utf8(&written).unwrap(), "fuzz").unwrap();
    assert_eq!(reparsed, code);

    let r = robustness(&code);
    assert!((0.0..=1.0).contains(&r), "robustness {r} out of range");
});
