use super::common::{assert_fails, assert_passes, config_error, fail_message};
use fieldcheck::{CheckError, ConfigErrorKind, Validator};
use serde_json::{Value, json};

/// Check a field with explicit siblings, for the sibling-comparison rules.
fn sibling_message(value: Value, expression: &str, siblings: Value) -> Option<String> {
    let map = siblings.as_object().cloned().expect("siblings object");
    Validator::new()
        .check_field("value", &value, expression, &map)
        .expect("well-formed expression")
        .map(|e| e.message)
}

fn expect_invalid_parameter(err: CheckError) {
    match err {
        CheckError::Config(e) => assert_eq!(e.kind, ConfigErrorKind::InvalidParameter),
        other => panic!("expected a config error, got: {:?}", other),
    }
}

// ─── required ───────────────────────────────────────────────────────────────

#[test]
fn required_rejects_null_empty_string_and_empty_list() {
    assert_fails(&json!(null), "required", Some("The value is required."));
    assert_fails(&json!(""), "required", Some("The value is required."));
    assert_fails(&json!([]), "required", Some("The value is required."));
}

#[test]
fn required_accepts_present_values() {
    assert_passes(&json!("x"), "required");
    assert_passes(&json!(0), "required");
    assert_passes(&json!(false), "required");
    assert_passes(&json!([0]), "required");
}

// ─── min / max ──────────────────────────────────────────────────────────────

#[test]
fn min_branches_on_shape() {
    assert_fails(
        &json!("ab"),
        "min:3",
        Some("The value must be at least 3 characters."),
    );
    assert_passes(&json!("abc"), "min:3");
    assert_fails(
        &json!([1, 2]),
        "min:3",
        Some("The value must have at least 3 items."),
    );
    assert_fails(&json!(2), "min:3", Some("The value must be at least 3."));
    assert_passes(&json!(3), "min:3");
}

#[test]
fn max_branches_on_shape() {
    assert_fails(
        &json!("abcd"),
        "max:3",
        Some("The value may not be greater than 3 characters."),
    );
    assert_passes(&json!("abc"), "max:3");
    assert_fails(
        &json!([1, 2, 3, 4]),
        "max:3",
        Some("The value may not have more than 3 items."),
    );
    assert_fails(
        &json!(4),
        "max:3",
        Some("The value may not be greater than 3."),
    );
}

#[test]
fn min_counts_characters_not_bytes() {
    assert_passes(&json!("héllo"), "min:5");
    assert_fails(&json!("héll"), "min:5", None);
}

#[test]
fn min_on_unmeasurable_shape_fails() {
    assert_fails(
        &json!({"a": 1}),
        "min:3",
        Some("The value must be a string, number, or list."),
    );
}

#[test]
fn min_requires_a_numeric_parameter() {
    expect_invalid_parameter(config_error(&json!("abc"), "min"));
    expect_invalid_parameter(config_error(&json!("abc"), "min:"));
    expect_invalid_parameter(config_error(&json!("abc"), "min:three"));
}

// ─── size ───────────────────────────────────────────────────────────────────

#[test]
fn size_is_exact() {
    assert_passes(&json!("abc"), "size:3");
    assert_fails(
        &json!("ab"),
        "size:3",
        Some("The value must be exactly 3 characters."),
    );
    assert_passes(&json!([1, 2, 3]), "size:3");
    assert_fails(
        &json!([1, 2]),
        "size:3",
        Some("The value must contain exactly 3 items."),
    );
    assert_passes(&json!(3), "size:3");
    assert_fails(&json!(4), "size:3", Some("The value must equal 3."));
}

// ─── between ────────────────────────────────────────────────────────────────

#[test]
fn between_is_inclusive() {
    assert_passes(&json!(18), "between:18,65");
    assert_passes(&json!(65), "between:18,65");
    assert_fails(
        &json!(17),
        "between:18,65",
        Some("The value must be between 18 and 65."),
    );
    assert_fails(&json!(66), "between:18,65", None);
}

#[test]
fn between_measures_strings_and_lists() {
    assert_passes(&json!("abcd"), "between:3,5");
    assert_fails(
        &json!("ab"),
        "between:3,5",
        Some("The value must be between 3 and 5 characters."),
    );
    assert_fails(
        &json!([1]),
        "between:2,4",
        Some("The value must have between 2 and 4 items."),
    );
}

#[test]
fn between_rejects_bad_bounds() {
    expect_invalid_parameter(config_error(&json!(20), "between:18"));
    expect_invalid_parameter(config_error(&json!(20), "between:18,65,99"));
    expect_invalid_parameter(config_error(&json!(20), "between:65,18"));
    expect_invalid_parameter(config_error(&json!(20), "between:a,b"));
}

// ─── gt / gte / lt / lte ────────────────────────────────────────────────────

#[test]
fn numeric_comparisons() {
    assert_passes(&json!(5), "gt:4");
    assert_fails(&json!(4), "gt:4", Some("The value must be greater than 4."));
    assert_passes(&json!(4), "gte:4");
    assert_fails(
        &json!(3),
        "gte:4",
        Some("The value must be greater than or equal to 4."),
    );
    assert_passes(&json!(3), "lt:4");
    assert_fails(&json!(4), "lt:4", Some("The value must be less than 4."));
    assert_passes(&json!(4), "lte:4");
    assert_fails(
        &json!(5),
        "lte:4",
        Some("The value must be less than or equal to 4."),
    );
}

#[test]
fn comparisons_coerce_numeric_strings() {
    assert_passes(&json!("10"), "gt:9");
    assert_fails(&json!("8"), "gt:9", None);
}

#[test]
fn comparisons_need_a_numeric_subject() {
    assert_fails(&json!("abc"), "gt:4", Some("The value must be a number."));
    assert_fails(&json!([1]), "lte:4", Some("The value must be a number."));
}

#[test]
fn comparisons_need_a_numeric_bound() {
    expect_invalid_parameter(config_error(&json!(5), "gt:four"));
    expect_invalid_parameter(config_error(&json!(5), "lte"));
}

// ─── numeric ────────────────────────────────────────────────────────────────

#[test]
fn numeric_accepts_numbers_and_numeric_strings() {
    assert_passes(&json!(42), "numeric");
    assert_passes(&json!(-1.5), "numeric");
    assert_passes(&json!("42"), "numeric");
    assert_passes(&json!(" 3.14 "), "numeric");
    assert_fails(&json!("4x2"), "numeric", Some("The value must be a number."));
    assert_fails(&json!(true), "numeric", None);
}

// ─── email ──────────────────────────────────────────────────────────────────

#[test]
fn email_checks_shape() {
    assert_passes(&json!("user@example.com"), "email");
    assert_fails(
        &json!("not-an-email"),
        "email",
        Some("The value must be a valid email address."),
    );
    assert_fails(&json!("a@b"), "email", None);
    assert_fails(&json!("a b@example.com"), "email", None);
    assert_fails(&json!(42), "email", None);
}

// ─── url ────────────────────────────────────────────────────────────────────

#[test]
fn url_checks_scheme_and_body() {
    assert_passes(&json!("https://example.com/path?q=1"), "url");
    assert_passes(&json!("http://example.com"), "url");
    assert_passes(&json!("ftp://files.example.com"), "url");
    assert_fails(
        &json!("example.com"),
        "url",
        Some("The value must be a valid URL."),
    );
    assert_fails(&json!("https://exa mple.com"), "url", None);
}

// ─── ip ─────────────────────────────────────────────────────────────────────

#[test]
fn ip_accepts_v4_and_v6() {
    assert_passes(&json!("192.168.1.1"), "ip");
    assert_passes(&json!("::1"), "ip");
    assert_passes(&json!("2001:db8::ff00:42:8329"), "ip");
    assert_fails(
        &json!("256.1.1.1"),
        "ip",
        Some("The value must be a valid IP address."),
    );
    assert_fails(&json!("1.2.3"), "ip", None);
}

// ─── uuid ───────────────────────────────────────────────────────────────────

#[test]
fn uuid_checks_canonical_form() {
    assert_passes(&json!("550e8400-e29b-41d4-a716-446655440000"), "uuid");
    assert_passes(&json!("550E8400-E29B-41D4-A716-446655440000"), "uuid");
    assert_fails(
        &json!("550e8400e29b41d4a716446655440000"),
        "uuid",
        Some("The value must be a valid UUID."),
    );
    assert_fails(&json!("550e8400-e29b-41d4-a716-44665544000g"), "uuid", None);
}

// ─── json ───────────────────────────────────────────────────────────────────

#[test]
fn json_requires_a_parseable_string() {
    assert_passes(&json!(r#"{"a": [1, 2]}"#), "json");
    assert_passes(&json!("42"), "json");
    assert_fails(
        &json!("{not json}"),
        "json",
        Some("The value must be a valid JSON string."),
    );
    // An already-structured value is not a JSON *string*.
    assert_fails(&json!({"a": 1}), "json", None);
}

// ─── regex ──────────────────────────────────────────────────────────────────

#[test]
fn regex_matches_against_the_raw_parameter() {
    assert_passes(&json!("abc-123"), r"regex:^[a-z]+-\d+$");
    assert_fails(
        &json!("abc123"),
        r"regex:^[a-z]+-\d+$",
        Some("The value format is invalid."),
    );
}

#[test]
fn regex_pattern_may_contain_colons() {
    assert_passes(&json!("12:34"), r"regex:^\d{2}:\d{2}$");
}

#[test]
fn regex_applies_to_stringified_numbers() {
    assert_passes(&json!(123), r"regex:^\d+$");
}

#[test]
fn invalid_regex_is_a_config_error() {
    expect_invalid_parameter(config_error(&json!("x"), "regex:["));
    expect_invalid_parameter(config_error(&json!("x"), "regex"));
}

// ─── in ─────────────────────────────────────────────────────────────────────

#[test]
fn in_checks_membership() {
    assert_passes(&json!("admin"), "in:admin,user,guest");
    assert_fails(
        &json!("root"),
        "in:admin,user,guest",
        Some("The value must be one of: admin, user, guest."),
    );
}

#[test]
fn in_compares_stringified_values() {
    assert_passes(&json!(2), "in:1,2,3");
    assert_passes(&json!(true), "in:true,false");
}

#[test]
fn in_requires_a_parameter() {
    expect_invalid_parameter(config_error(&json!("x"), "in"));
}

// ─── enum ───────────────────────────────────────────────────────────────────

#[test]
fn enum_uses_registered_sets() {
    let mut validator = Validator::new();
    validator.register_enum("role", ["admin", "user", "guest"]);

    let ok = validator
        .check_value("role", &json!("admin"), "enum:role")
        .unwrap();
    assert!(ok.is_none());

    let err = validator
        .check_value("role", &json!("root"), "enum:role")
        .unwrap()
        .expect("should fail");
    assert_eq!(err.message, "The role must be one of: admin, user, guest.");
}

#[test]
fn enum_with_unknown_set_is_a_config_error() {
    let validator = Validator::new();
    let err = validator
        .check_value("role", &json!("admin"), "enum:role")
        .unwrap_err();
    expect_invalid_parameter(err);
}

// ─── alpha / alpha_num ──────────────────────────────────────────────────────

#[test]
fn alpha_allows_letters_only() {
    assert_passes(&json!("Hello"), "alpha");
    assert_fails(
        &json!("Hello1"),
        "alpha",
        Some("The value may only contain letters."),
    );
    assert_fails(&json!("he llo"), "alpha", None);
}

#[test]
fn alpha_num_allows_letters_and_digits() {
    assert_passes(&json!("abc123"), "alpha_num");
    assert_passes(&json!(12345), "alpha_num");
    assert_fails(
        &json!("abc-123"),
        "alpha_num",
        Some("The value may only contain letters and numbers."),
    );
}

// ─── digits ─────────────────────────────────────────────────────────────────

#[test]
fn digits_exact_count() {
    assert_passes(&json!("1234"), "digits:4");
    assert_passes(&json!(1234), "digits:4");
    assert_fails(
        &json!("123"),
        "digits:4",
        Some("The value must be exactly 4 digits."),
    );
}

#[test]
fn digits_rejects_non_digit_characters() {
    assert_fails(
        &json!("12a4"),
        "digits:4",
        Some("The value must contain only digits."),
    );
    // Hyphen is a non-digit: negative numbers fail.
    assert_fails(
        &json!("-123"),
        "digits:4",
        Some("The value must contain only digits."),
    );
    assert_fails(&json!(-123), "digits:3", None);
    // Decimal point is a non-digit.
    assert_fails(&json!(12.5), "digits:3", None);
    // Formatted strings fail.
    assert_fails(&json!("12 34"), "digits:4", None);
}

#[test]
fn digits_range() {
    assert_passes(&json!("1234"), "digits:3,5");
    assert_passes(&json!("123"), "digits:3,5");
    assert_passes(&json!("12345"), "digits:3,5");
    assert_fails(
        &json!("12"),
        "digits:3,5",
        Some("The value must be between 3 and 5 digits."),
    );
    assert_fails(&json!("123456"), "digits:3,5", None);
}

#[test]
fn digits_parameter_must_be_positive() {
    expect_invalid_parameter(config_error(&json!("123"), "digits:0"));
    expect_invalid_parameter(config_error(&json!("123"), "digits:-2"));
    expect_invalid_parameter(config_error(&json!("123"), "digits:0,5"));
}

#[test]
fn digits_range_must_be_ordered_and_binary() {
    expect_invalid_parameter(config_error(&json!("123"), "digits:5,3"));
    expect_invalid_parameter(config_error(&json!("123"), "digits:1,2,3"));
    expect_invalid_parameter(config_error(&json!("123"), "digits:a,b"));
    expect_invalid_parameter(config_error(&json!("123"), "digits"));
}

// ─── date / before / after / future / past ──────────────────────────────────

#[test]
fn date_accepts_default_formats() {
    assert_passes(&json!("2024-06-01"), "date");
    assert_passes(&json!("2024-06-01T12:30:00"), "date");
    assert_passes(&json!("2024-06-01T12:30:00Z"), "date");
    assert_fails(
        &json!("June 1st"),
        "date",
        Some("The value must be a valid date."),
    );
    // Calendar-invalid dates fail.
    assert_fails(&json!("2024-02-30"), "date", None);
    assert_fails(&json!(20240601), "date", None);
}

#[test]
fn date_with_explicit_format() {
    assert_passes(&json!("01/06/2024"), "date:%d/%m/%Y");
    assert_fails(
        &json!("2024-06-01"),
        "date:%d/%m/%Y",
        Some("The value does not match the format %d/%m/%Y."),
    );
}

#[test]
fn date_with_invalid_format_is_a_config_error() {
    expect_invalid_parameter(config_error(&json!("2024-06-01"), "date:%Q"));
}

#[test]
fn before_and_after_compare_against_the_bound() {
    assert_passes(&json!("2020-01-01"), "before:2024-06-01");
    assert_fails(
        &json!("2024-06-01"),
        "before:2024-06-01",
        Some("The value must be a date before 2024-06-01."),
    );
    assert_passes(&json!("2024-06-02"), "after:2024-06-01");
    assert_fails(
        &json!("2024-06-01"),
        "after:2024-06-01",
        Some("The value must be a date after 2024-06-01."),
    );
    assert_fails(
        &json!("nonsense"),
        "after:2024-06-01",
        Some("The value must be a valid date."),
    );
}

#[test]
fn before_bound_must_be_a_date() {
    expect_invalid_parameter(config_error(&json!("2024-01-01"), "before:soon"));
    expect_invalid_parameter(config_error(&json!("2024-01-01"), "after"));
}

#[test]
fn future_and_past_compare_against_now() {
    assert_passes(&json!("2990-01-01"), "future");
    assert_fails(
        &json!("1990-01-01"),
        "future",
        Some("The value must be a date in the future."),
    );
    assert_passes(&json!("1990-01-01"), "past");
    assert_fails(
        &json!("2990-01-01"),
        "past",
        Some("The value must be a date in the past."),
    );
}

// ─── required_if / required_unless ──────────────────────────────────────────

#[test]
fn required_if_triggers_on_matching_sibling() {
    let msg = sibling_message(json!(null), "required_if:role,admin", json!({"role": "admin"}));
    assert_eq!(
        msg.as_deref(),
        Some("The value is required when role is admin.")
    );

    let msg = sibling_message(json!(null), "required_if:role,admin", json!({"role": "user"}));
    assert!(msg.is_none());

    let msg = sibling_message(json!("set"), "required_if:role,admin", json!({"role": "admin"}));
    assert!(msg.is_none());
}

#[test]
fn required_if_stringifies_the_sibling() {
    let msg = sibling_message(json!(null), "required_if:count,3", json!({"count": 3}));
    assert!(msg.is_some());
}

#[test]
fn required_unless_triggers_on_non_matching_sibling() {
    let msg = sibling_message(json!(null), "required_unless:role,admin", json!({"role": "user"}));
    assert_eq!(
        msg.as_deref(),
        Some("The value is required unless role is admin.")
    );

    let msg = sibling_message(json!(null), "required_unless:role,admin", json!({"role": "admin"}));
    assert!(msg.is_none());
}

#[test]
fn required_if_missing_sibling_counts_as_null() {
    let msg = sibling_message(json!(null), "required_if:role,admin", json!({}));
    assert!(msg.is_none());
}

#[test]
fn required_if_needs_field_and_value() {
    expect_invalid_parameter(config_error(&json!("x"), "required_if:role"));
    expect_invalid_parameter(config_error(&json!("x"), "required_if"));
}

// ─── same / different ───────────────────────────────────────────────────────

#[test]
fn same_compares_sibling_deeply() {
    let msg = sibling_message(json!("secret"), "same:password", json!({"password": "secret"}));
    assert!(msg.is_none());

    let msg = sibling_message(json!("secret"), "same:password", json!({"password": "other"}));
    assert_eq!(msg.as_deref(), Some("The value must match password."));
}

#[test]
fn same_treats_int_and_float_as_equal() {
    let msg = sibling_message(json!(42.0), "same:count", json!({"count": 42}));
    assert!(msg.is_none());
}

#[test]
fn different_rejects_equal_sibling() {
    let msg = sibling_message(json!("alice"), "different:username", json!({"username": "alice"}));
    assert_eq!(
        msg.as_deref(),
        Some("The value must be different from username.")
    );

    let msg = sibling_message(json!("bob"), "different:username", json!({"username": "alice"}));
    assert!(msg.is_none());
}

// ─── distinct ───────────────────────────────────────────────────────────────

#[test]
fn distinct_checks_pairwise_uniqueness() {
    assert_passes(&json!(["a", "b", "c"]), "distinct");
    assert_fails(
        &json!(["a", "a", "b"]),
        "distinct",
        Some("The value must not contain duplicate values."),
    );
}

#[test]
fn distinct_uses_semantic_equality() {
    assert_fails(&json!([42, 42.0]), "distinct", None);
    assert_fails(
        &json!([{"a": 1, "b": 2}, {"b": 2, "a": 1}]),
        "distinct",
        None,
    );
    assert_passes(&json!([{"a": 1}, {"a": 2}]), "distinct");
}

#[test]
fn distinct_requires_a_list() {
    assert_fails(&json!("aa"), "distinct", Some("The value must be a list."));
}

// ─── Null policy ────────────────────────────────────────────────────────────

#[test]
fn every_non_required_rule_passes_on_null() {
    let expressions = [
        "min:3",
        "max:3",
        "size:3",
        "between:1,5",
        "gt:1",
        "gte:1",
        "lt:1",
        "lte:1",
        "numeric",
        "email",
        "url",
        "ip",
        "uuid",
        "json",
        "regex:^x$",
        "in:a,b",
        "alpha",
        "alpha_num",
        "digits:4",
        "date",
        "before:2024-01-01",
        "after:2024-01-01",
        "future",
        "past",
        "same:other",
        "different:other",
        "distinct",
    ];
    for expression in &expressions {
        assert!(
            fail_message(&json!(null), expression).is_none(),
            "'{}' should pass on null",
            expression
        );
    }
}
