#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::LazyLock;

use fieldcheck::{FieldContext, Registry};

static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::with_builtins);

// The digits rule over arbitrary parameters and subjects: config errors
// and failures are fine, panics are not. A pass implies the stringified
// subject really is all digits within the advertised bounds.
fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(parameter) = Option::<String>::arbitrary(&mut u) else {
        return;
    };
    let Ok(subject) = String::arbitrary(&mut u) else {
        return;
    };

    let value = Value::String(subject.clone());
    let siblings = Map::new();
    let enums = HashMap::new();
    let ctx = FieldContext {
        path: "field",
        name: "field",
        value: &value,
        siblings: &siblings,
        enums: &enums,
    };

    let rule = REGISTRY.resolve("digits").expect("digits is built in");
    if let Ok(None) = rule.check(&ctx, parameter.as_deref()) {
        assert!(
            !subject.is_empty() && subject.bytes().all(|b| b.is_ascii_digit()),
            "digits passed a non-digit subject: {:?}",
            subject
        );
    }
});
