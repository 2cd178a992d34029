#![no_main]
use libfuzzer_sys::fuzz_target;
use std::path::Path;

use buildstamp::stamp::patterns::PatternSet;
use buildstamp::stamp::resolver::Resolver;

fuzz_target!(|data: &str| {
    // Status parsing and derivation should never panic on arbitrary input
    if let Ok(set) = PatternSet::general() {
        let _ = Resolver::new(set).resolve([(Path::new("fuzz"), data)]);
    }
});
