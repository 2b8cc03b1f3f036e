#![no_main]

use libfuzzer_sys::fuzz_target;

// Parsing must never panic, and anything it accepts must round-trip
// through Display byte-for-byte.
fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(expr) = fieldcheck::parse_expression(input) {
        let rendered = expr.to_string();
        if !expr.is_empty() {
            assert_eq!(rendered, input, "round-trip changed the expression");
        }
        let reparsed =
            fieldcheck::parse_expression(&rendered).expect("display output must reparse");
        assert_eq!(reparsed, expr);
    }
});
