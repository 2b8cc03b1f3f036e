#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

/// Build an arbitrary JSON value from fuzzer bytes, depth-limited.
fn arbitrary_value(u: &mut Unstructured<'_>, depth: usize) -> arbitrary::Result<Value> {
    if depth == 0 {
        return Ok(Value::Null);
    }
    Ok(match u.int_in_range(0u8..=5)? {
        0 => Value::Null,
        1 => Value::Bool(bool::arbitrary(u)?),
        2 => Value::from(i64::arbitrary(u)?),
        3 => Value::String(String::arbitrary(u)?),
        4 => {
            let len = u.int_in_range(0usize..=4)?;
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(arbitrary_value(u, depth - 1)?);
            }
            Value::Array(items)
        }
        _ => {
            let len = u.int_in_range(0usize..=4)?;
            let mut map = serde_json::Map::new();
            for _ in 0..len {
                map.insert(String::arbitrary(u)?, arbitrary_value(u, depth - 1)?);
            }
            Value::Object(map)
        }
    })
}

// Any expression over any value: the engine may reject, but never panic.
fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(expression) = String::arbitrary(&mut u) else {
        return;
    };
    let Ok(value) = arbitrary_value(&mut u, 3) else {
        return;
    };

    let _ = fieldcheck::check_value("field", &value, &expression);
});
