#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use std::collections::BTreeMap;

use buildstamp::stamp::format::{render_template, VarFormat};

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    var_format: &'a str,
    template: &'a str,
    key: &'a str,
    value: &'a str,
}

fuzz_target!(|input: Input<'_>| {
    let mut vars = BTreeMap::new();
    vars.insert(input.key.to_string(), input.value.to_string());
    if let Ok(fmt) = VarFormat::parse(input.var_format) {
        let block = fmt.render(input.key, input.value);
        let _ = render_template(input.template, &block, &vars);
    }
});
