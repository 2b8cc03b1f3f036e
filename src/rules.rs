//! Built-in rule implementations.
//!
//! One section per rule. Every rule is a stateless unit struct; the full
//! set is handed to [`Registry::with_builtins`](crate::registry::Registry)
//! via [`builtins`]. Parameter problems surface as `ConfigError`s at
//! invocation time, never as validation failures.

use crate::error::ConfigError;
use crate::registry::Rule;
use crate::types::FieldContext;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use regex::Regex;
use serde_json::Value;
use std::net::IpAddr;
use std::sync::{Arc, LazyLock};

static NULL: Value = Value::Null;

// ─── Cached regexes ─────────────────────────────────────────────────────────

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(https?|ftp)://[^\s/$.?#][^\s]*$").unwrap());

static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .unwrap()
});

static ALPHA_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z]+$").unwrap());

static ALPHA_NUM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());

static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());

// ─── Shared coercion helpers ────────────────────────────────────────────────

/// Stringify a value: scalars to their natural representation, non-scalars
/// to compact JSON.
pub(crate) fn value_to_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        _ => serde_json::to_string(v).unwrap_or_default(),
    }
}

/// Numeric coercion: numbers directly, strings when they parse as a number.
pub(crate) fn numeric_value(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Deep equality: integer 42 equals float 42.0; object key order is
/// irrelevant; arrays compare element-wise by position and length.
pub(crate) fn values_deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(fa), Some(fb)) => fa == fb,
            _ => a == b,
        },
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(a, b)| values_deep_equal(a, b))
        }
        (Value::Object(a), Value::Object(b)) => {
            if a.len() != b.len() {
                return false;
            }
            a.iter()
                .all(|(k, v)| b.get(k).is_some_and(|bv| values_deep_equal(v, bv)))
        }
        _ => false,
    }
}

/// What required / required_if / required_unless treat as "not present":
/// null, the empty string, or an empty collection.
fn is_absent(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        _ => false,
    }
}

/// The measurable shape of a value for min/max/size/between.
enum Measure {
    Chars(usize),
    Items(usize),
    Magnitude(f64),
    Other,
}

fn measure(v: &Value) -> Measure {
    match v {
        Value::String(s) => Measure::Chars(s.chars().count()),
        Value::Array(a) => Measure::Items(a.len()),
        Value::Number(n) => n.as_f64().map(Measure::Magnitude).unwrap_or(Measure::Other),
        _ => Measure::Other,
    }
}

fn require_param<'a>(rule: &str, parameter: Option<&'a str>) -> Result<&'a str, ConfigError> {
    match parameter {
        Some(p) if !p.trim().is_empty() => Ok(p),
        _ => Err(ConfigError::invalid_parameter(
            rule,
            format!("the '{}' rule requires a parameter", rule),
        )),
    }
}

fn numeric_param(rule: &str, parameter: Option<&str>) -> Result<(f64, String), ConfigError> {
    let raw = require_param(rule, parameter)?.trim().to_string();
    let n = raw.parse::<f64>().map_err(|_| {
        ConfigError::invalid_parameter(
            rule,
            format!("the '{}' rule parameter must be numeric, got '{}'", rule, raw),
        )
    })?;
    Ok((n, raw))
}

/// Parse a `min,max` pair: exactly two comma-separated numeric parts with
/// min <= max.
fn numeric_range_param(
    rule: &str,
    parameter: Option<&str>,
) -> Result<(f64, f64, String, String), ConfigError> {
    let raw = require_param(rule, parameter)?;
    let parts: Vec<&str> = raw.split(',').collect();
    if parts.len() != 2 {
        return Err(ConfigError::invalid_parameter(
            rule,
            format!(
                "the '{}' rule requires exactly two comma-separated values, got '{}'",
                rule, raw
            ),
        ));
    }
    let lo_raw = parts[0].trim().to_string();
    let hi_raw = parts[1].trim().to_string();
    let lo = lo_raw.parse::<f64>().map_err(|_| {
        ConfigError::invalid_parameter(
            rule,
            format!("the '{}' rule bounds must be numeric, got '{}'", rule, raw),
        )
    })?;
    let hi = hi_raw.parse::<f64>().map_err(|_| {
        ConfigError::invalid_parameter(
            rule,
            format!("the '{}' rule bounds must be numeric, got '{}'", rule, raw),
        )
    })?;
    if lo > hi {
        return Err(ConfigError::invalid_parameter(
            rule,
            format!("the '{}' rule minimum ({}) cannot be greater than maximum ({})", rule, lo_raw, hi_raw),
        ));
    }
    Ok((lo, hi, lo_raw, hi_raw))
}

/// Split an `other,value` parameter on the FIRST comma only — the
/// comparison value may itself contain commas.
fn sibling_pair_param<'a>(
    rule: &str,
    parameter: Option<&'a str>,
) -> Result<(&'a str, &'a str), ConfigError> {
    let raw = require_param(rule, parameter)?;
    match raw.find(',') {
        Some(pos) => Ok((&raw[..pos], &raw[pos + 1..])),
        None => Err(ConfigError::invalid_parameter(
            rule,
            format!(
                "the '{}' rule requires 'field,value' (e.g. '{}:role,admin'), got '{}'",
                rule, rule, raw
            ),
        )),
    }
}

// ─── Date helpers ───────────────────────────────────────────────────────────

/// Default date coercion: RFC 3339, `%Y-%m-%dT%H:%M:%S`, or `%Y-%m-%d`.
fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d.and_time(NaiveTime::MIN));
    }
    None
}

fn parse_datetime_with_format(s: &str, format: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
        return Some(dt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, format) {
        return Some(d.and_time(NaiveTime::MIN));
    }
    None
}

/// Reject chrono format strings that contain invalid specifiers.
fn validate_format(rule: &str, format: &str) -> Result<(), ConfigError> {
    use chrono::format::{Item, StrftimeItems};
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ConfigError::invalid_parameter(
            rule,
            format!("invalid date format: '{}'", format),
        ));
    }
    Ok(())
}

/// Parse a date bound given as a rule parameter (default formats only).
fn bound_param(rule: &str, parameter: Option<&str>) -> Result<(NaiveDateTime, String), ConfigError> {
    let raw = require_param(rule, parameter)?.trim().to_string();
    match parse_datetime(&raw) {
        Some(dt) => Ok((dt, raw)),
        None => Err(ConfigError::invalid_parameter(
            rule,
            format!("the '{}' rule bound must be a date, got '{}'", rule, raw),
        )),
    }
}

// ─── required ───────────────────────────────────────────────────────────────

/// The only rule responsible for null values. Everything else passes on
/// null so that `nullable|email` composes as "skip if null, else email".
pub struct Required;

impl Rule for Required {
    fn name(&self) -> &str {
        "required"
    }

    fn check(
        &self,
        ctx: &FieldContext<'_>,
        _parameter: Option<&str>,
    ) -> Result<Option<String>, ConfigError> {
        if is_absent(ctx.value) {
            return Ok(Some(format!("The {} is required.", ctx.name)));
        }
        Ok(None)
    }
}

// ─── required_if ────────────────────────────────────────────────────────────

/// `required_if:other,value` — required when the sibling `other`
/// stringifies to `value`. Consults raw sibling values only.
pub struct RequiredIf;

impl Rule for RequiredIf {
    fn name(&self) -> &str {
        "required_if"
    }

    fn check(
        &self,
        ctx: &FieldContext<'_>,
        parameter: Option<&str>,
    ) -> Result<Option<String>, ConfigError> {
        let (other, expected) = sibling_pair_param("required_if", parameter)?;
        let sibling = ctx.siblings.get(other).unwrap_or(&NULL);
        if value_to_string(sibling) == expected && is_absent(ctx.value) {
            return Ok(Some(format!(
                "The {} is required when {} is {}.",
                ctx.name, other, expected
            )));
        }
        Ok(None)
    }
}

// ─── required_unless ────────────────────────────────────────────────────────

pub struct RequiredUnless;

impl Rule for RequiredUnless {
    fn name(&self) -> &str {
        "required_unless"
    }

    fn check(
        &self,
        ctx: &FieldContext<'_>,
        parameter: Option<&str>,
    ) -> Result<Option<String>, ConfigError> {
        let (other, expected) = sibling_pair_param("required_unless", parameter)?;
        let sibling = ctx.siblings.get(other).unwrap_or(&NULL);
        if value_to_string(sibling) != expected && is_absent(ctx.value) {
            return Ok(Some(format!(
                "The {} is required unless {} is {}.",
                ctx.name, other, expected
            )));
        }
        Ok(None)
    }
}

// ─── min ────────────────────────────────────────────────────────────────────

/// Lower bound on character count, item count, or numeric magnitude,
/// branching on the value's shape.
pub struct Min;

impl Rule for Min {
    fn name(&self) -> &str {
        "min"
    }

    fn check(
        &self,
        ctx: &FieldContext<'_>,
        parameter: Option<&str>,
    ) -> Result<Option<String>, ConfigError> {
        let (n, raw) = numeric_param("min", parameter)?;
        if ctx.value.is_null() {
            return Ok(None);
        }
        let message = match measure(ctx.value) {
            Measure::Chars(count) if (count as f64) < n => {
                format!("The {} must be at least {} characters.", ctx.name, raw)
            }
            Measure::Items(count) if (count as f64) < n => {
                format!("The {} must have at least {} items.", ctx.name, raw)
            }
            Measure::Magnitude(v) if v < n => {
                format!("The {} must be at least {}.", ctx.name, raw)
            }
            Measure::Other => {
                format!("The {} must be a string, number, or list.", ctx.name)
            }
            _ => return Ok(None),
        };
        Ok(Some(message))
    }
}

// ─── max ────────────────────────────────────────────────────────────────────

pub struct Max;

impl Rule for Max {
    fn name(&self) -> &str {
        "max"
    }

    fn check(
        &self,
        ctx: &FieldContext<'_>,
        parameter: Option<&str>,
    ) -> Result<Option<String>, ConfigError> {
        let (n, raw) = numeric_param("max", parameter)?;
        if ctx.value.is_null() {
            return Ok(None);
        }
        let message = match measure(ctx.value) {
            Measure::Chars(count) if (count as f64) > n => {
                format!("The {} may not be greater than {} characters.", ctx.name, raw)
            }
            Measure::Items(count) if (count as f64) > n => {
                format!("The {} may not have more than {} items.", ctx.name, raw)
            }
            Measure::Magnitude(v) if v > n => {
                format!("The {} may not be greater than {}.", ctx.name, raw)
            }
            Measure::Other => {
                format!("The {} must be a string, number, or list.", ctx.name)
            }
            _ => return Ok(None),
        };
        Ok(Some(message))
    }
}

// ─── size ───────────────────────────────────────────────────────────────────

/// Exact character count, item count, or numeric equality.
pub struct Size;

impl Rule for Size {
    fn name(&self) -> &str {
        "size"
    }

    fn check(
        &self,
        ctx: &FieldContext<'_>,
        parameter: Option<&str>,
    ) -> Result<Option<String>, ConfigError> {
        let (n, raw) = numeric_param("size", parameter)?;
        if ctx.value.is_null() {
            return Ok(None);
        }
        let message = match measure(ctx.value) {
            Measure::Chars(count) if (count as f64) != n => {
                format!("The {} must be exactly {} characters.", ctx.name, raw)
            }
            Measure::Items(count) if (count as f64) != n => {
                format!("The {} must contain exactly {} items.", ctx.name, raw)
            }
            Measure::Magnitude(v) if v != n => {
                format!("The {} must equal {}.", ctx.name, raw)
            }
            Measure::Other => {
                format!("The {} must be a string, number, or list.", ctx.name)
            }
            _ => return Ok(None),
        };
        Ok(Some(message))
    }
}

// ─── between ────────────────────────────────────────────────────────────────

/// `between:min,max` — inclusive range on the measured shape.
pub struct Between;

impl Rule for Between {
    fn name(&self) -> &str {
        "between"
    }

    fn check(
        &self,
        ctx: &FieldContext<'_>,
        parameter: Option<&str>,
    ) -> Result<Option<String>, ConfigError> {
        let (lo, hi, lo_raw, hi_raw) = numeric_range_param("between", parameter)?;
        if ctx.value.is_null() {
            return Ok(None);
        }
        let message = match measure(ctx.value) {
            Measure::Chars(count) if ((count as f64) < lo || (count as f64) > hi) => format!(
                "The {} must be between {} and {} characters.",
                ctx.name, lo_raw, hi_raw
            ),
            Measure::Items(count) if ((count as f64) < lo || (count as f64) > hi) => format!(
                "The {} must have between {} and {} items.",
                ctx.name, lo_raw, hi_raw
            ),
            Measure::Magnitude(v) if (v < lo || v > hi) => {
                format!("The {} must be between {} and {}.", ctx.name, lo_raw, hi_raw)
            }
            Measure::Other => {
                format!("The {} must be a string, number, or list.", ctx.name)
            }
            _ => return Ok(None),
        };
        Ok(Some(message))
    }
}

// ─── gt / gte / lt / lte ────────────────────────────────────────────────────

/// Shared comparison body: the value must be numeric-coercible, else a
/// type-mismatch failure.
fn compare_numeric(
    rule: &'static str,
    ctx: &FieldContext<'_>,
    parameter: Option<&str>,
    op: fn(f64, f64) -> bool,
    describe: &str,
) -> Result<Option<String>, ConfigError> {
    let (bound, raw) = numeric_param(rule, parameter)?;
    if ctx.value.is_null() {
        return Ok(None);
    }
    let Some(v) = numeric_value(ctx.value) else {
        return Ok(Some(format!("The {} must be a number.", ctx.name)));
    };
    if op(v, bound) {
        Ok(None)
    } else {
        Ok(Some(format!("The {} must be {} {}.", ctx.name, describe, raw)))
    }
}

pub struct GreaterThan;

impl Rule for GreaterThan {
    fn name(&self) -> &str {
        "gt"
    }

    fn check(
        &self,
        ctx: &FieldContext<'_>,
        parameter: Option<&str>,
    ) -> Result<Option<String>, ConfigError> {
        compare_numeric("gt", ctx, parameter, |v, b| v > b, "greater than")
    }
}

pub struct GreaterOrEqual;

impl Rule for GreaterOrEqual {
    fn name(&self) -> &str {
        "gte"
    }

    fn check(
        &self,
        ctx: &FieldContext<'_>,
        parameter: Option<&str>,
    ) -> Result<Option<String>, ConfigError> {
        compare_numeric("gte", ctx, parameter, |v, b| v >= b, "greater than or equal to")
    }
}

pub struct LessThan;

impl Rule for LessThan {
    fn name(&self) -> &str {
        "lt"
    }

    fn check(
        &self,
        ctx: &FieldContext<'_>,
        parameter: Option<&str>,
    ) -> Result<Option<String>, ConfigError> {
        compare_numeric("lt", ctx, parameter, |v, b| v < b, "less than")
    }
}

pub struct LessOrEqual;

impl Rule for LessOrEqual {
    fn name(&self) -> &str {
        "lte"
    }

    fn check(
        &self,
        ctx: &FieldContext<'_>,
        parameter: Option<&str>,
    ) -> Result<Option<String>, ConfigError> {
        compare_numeric("lte", ctx, parameter, |v, b| v <= b, "less than or equal to")
    }
}

// ─── numeric ────────────────────────────────────────────────────────────────

pub struct Numeric;

impl Rule for Numeric {
    fn name(&self) -> &str {
        "numeric"
    }

    fn check(
        &self,
        ctx: &FieldContext<'_>,
        _parameter: Option<&str>,
    ) -> Result<Option<String>, ConfigError> {
        if ctx.value.is_null() {
            return Ok(None);
        }
        if numeric_value(ctx.value).is_none() {
            return Ok(Some(format!("The {} must be a number.", ctx.name)));
        }
        Ok(None)
    }
}

// ─── email ──────────────────────────────────────────────────────────────────

pub struct Email;

impl Rule for Email {
    fn name(&self) -> &str {
        "email"
    }

    fn check(
        &self,
        ctx: &FieldContext<'_>,
        _parameter: Option<&str>,
    ) -> Result<Option<String>, ConfigError> {
        if ctx.value.is_null() {
            return Ok(None);
        }
        match ctx.value.as_str() {
            Some(s) if EMAIL_RE.is_match(s) => Ok(None),
            _ => Ok(Some(format!(
                "The {} must be a valid email address.",
                ctx.name
            ))),
        }
    }
}

// ─── url ────────────────────────────────────────────────────────────────────

pub struct Url;

impl Rule for Url {
    fn name(&self) -> &str {
        "url"
    }

    fn check(
        &self,
        ctx: &FieldContext<'_>,
        _parameter: Option<&str>,
    ) -> Result<Option<String>, ConfigError> {
        if ctx.value.is_null() {
            return Ok(None);
        }
        match ctx.value.as_str() {
            Some(s) if URL_RE.is_match(s) => Ok(None),
            _ => Ok(Some(format!("The {} must be a valid URL.", ctx.name))),
        }
    }
}

// ─── ip ─────────────────────────────────────────────────────────────────────

/// Accepts both IPv4 and IPv6 textual forms.
pub struct Ip;

impl Rule for Ip {
    fn name(&self) -> &str {
        "ip"
    }

    fn check(
        &self,
        ctx: &FieldContext<'_>,
        _parameter: Option<&str>,
    ) -> Result<Option<String>, ConfigError> {
        if ctx.value.is_null() {
            return Ok(None);
        }
        match ctx.value.as_str() {
            Some(s) if s.parse::<IpAddr>().is_ok() => Ok(None),
            _ => Ok(Some(format!("The {} must be a valid IP address.", ctx.name))),
        }
    }
}

// ─── uuid ───────────────────────────────────────────────────────────────────

pub struct Uuid;

impl Rule for Uuid {
    fn name(&self) -> &str {
        "uuid"
    }

    fn check(
        &self,
        ctx: &FieldContext<'_>,
        _parameter: Option<&str>,
    ) -> Result<Option<String>, ConfigError> {
        if ctx.value.is_null() {
            return Ok(None);
        }
        match ctx.value.as_str() {
            Some(s) if UUID_RE.is_match(s) => Ok(None),
            _ => Ok(Some(format!("The {} must be a valid UUID.", ctx.name))),
        }
    }
}

// ─── json ───────────────────────────────────────────────────────────────────

/// The value must be a string that parses as JSON.
pub struct Json;

impl Rule for Json {
    fn name(&self) -> &str {
        "json"
    }

    fn check(
        &self,
        ctx: &FieldContext<'_>,
        _parameter: Option<&str>,
    ) -> Result<Option<String>, ConfigError> {
        if ctx.value.is_null() {
            return Ok(None);
        }
        match ctx.value.as_str() {
            Some(s) if serde_json::from_str::<Value>(s).is_ok() => Ok(None),
            _ => Ok(Some(format!("The {} must be a valid JSON string.", ctx.name))),
        }
    }
}

// ─── regex ──────────────────────────────────────────────────────────────────

/// `regex:pattern` — the raw parameter remainder is the pattern, so
/// patterns may contain colons and commas freely.
pub struct Pattern;

impl Rule for Pattern {
    fn name(&self) -> &str {
        "regex"
    }

    fn check(
        &self,
        ctx: &FieldContext<'_>,
        parameter: Option<&str>,
    ) -> Result<Option<String>, ConfigError> {
        let pattern = require_param("regex", parameter)?;
        let re = Regex::new(pattern).map_err(|e| {
            ConfigError::invalid_parameter("regex", format!("invalid pattern: {}", e))
        })?;
        if ctx.value.is_null() {
            return Ok(None);
        }
        if re.is_match(&value_to_string(ctx.value)) {
            Ok(None)
        } else {
            Ok(Some(format!("The {} format is invalid.", ctx.name)))
        }
    }
}

// ─── in ─────────────────────────────────────────────────────────────────────

/// `in:a,b,c` — membership in an inline, comma-separated list.
pub struct OneOf;

impl Rule for OneOf {
    fn name(&self) -> &str {
        "in"
    }

    fn check(
        &self,
        ctx: &FieldContext<'_>,
        parameter: Option<&str>,
    ) -> Result<Option<String>, ConfigError> {
        let raw = require_param("in", parameter)?;
        let allowed: Vec<&str> = raw.split(',').map(str::trim).collect();
        if ctx.value.is_null() {
            return Ok(None);
        }
        let v = value_to_string(ctx.value);
        if allowed.iter().any(|a| *a == v) {
            Ok(None)
        } else {
            Ok(Some(format!(
                "The {} must be one of: {}.",
                ctx.name,
                allowed.join(", ")
            )))
        }
    }
}

// ─── enum ───────────────────────────────────────────────────────────────────

/// `enum:set_name` — membership in a named constant set registered on the
/// validator. An unregistered set name is a configuration error.
pub struct Enumerated;

impl Rule for Enumerated {
    fn name(&self) -> &str {
        "enum"
    }

    fn check(
        &self,
        ctx: &FieldContext<'_>,
        parameter: Option<&str>,
    ) -> Result<Option<String>, ConfigError> {
        let set_name = require_param("enum", parameter)?.trim();
        let Some(allowed) = ctx.enums.get(set_name) else {
            return Err(ConfigError::invalid_parameter(
                "enum",
                format!("unknown enum set: '{}'", set_name),
            ));
        };
        if ctx.value.is_null() {
            return Ok(None);
        }
        let v = value_to_string(ctx.value);
        if allowed.iter().any(|a| *a == v) {
            Ok(None)
        } else {
            Ok(Some(format!(
                "The {} must be one of: {}.",
                ctx.name,
                allowed.join(", ")
            )))
        }
    }
}

// ─── alpha ──────────────────────────────────────────────────────────────────

pub struct Alpha;

impl Rule for Alpha {
    fn name(&self) -> &str {
        "alpha"
    }

    fn check(
        &self,
        ctx: &FieldContext<'_>,
        _parameter: Option<&str>,
    ) -> Result<Option<String>, ConfigError> {
        if ctx.value.is_null() {
            return Ok(None);
        }
        if ALPHA_RE.is_match(&value_to_string(ctx.value)) {
            Ok(None)
        } else {
            Ok(Some(format!("The {} may only contain letters.", ctx.name)))
        }
    }
}

// ─── alpha_num ──────────────────────────────────────────────────────────────

pub struct AlphaNum;

impl Rule for AlphaNum {
    fn name(&self) -> &str {
        "alpha_num"
    }

    fn check(
        &self,
        ctx: &FieldContext<'_>,
        _parameter: Option<&str>,
    ) -> Result<Option<String>, ConfigError> {
        if ctx.value.is_null() {
            return Ok(None);
        }
        if ALPHA_NUM_RE.is_match(&value_to_string(ctx.value)) {
            Ok(None)
        } else {
            Ok(Some(format!(
                "The {} may only contain letters and numbers.",
                ctx.name
            )))
        }
    }
}

// ─── digits ─────────────────────────────────────────────────────────────────

/// `digits:n` (exact) or `digits:min,max` (inclusive range). The
/// stringified value must consist solely of `0-9` — negative numbers,
/// decimals, and formatted strings (spaces, hyphens) all fail.
pub struct Digits;

impl Digits {
    fn parse_bounds(parameter: Option<&str>) -> Result<(u64, u64), ConfigError> {
        let raw = require_param("digits", parameter)?;

        let parse_count = |part: &str| -> Result<u64, ConfigError> {
            let n = part.trim().parse::<i64>().map_err(|_| {
                ConfigError::invalid_parameter(
                    "digits",
                    format!("the 'digits' rule parameters must be integers, got '{}'", raw),
                )
            })?;
            if n < 1 {
                return Err(ConfigError::invalid_parameter(
                    "digits",
                    format!("the 'digits' rule parameters must be positive, got '{}'", raw),
                ));
            }
            Ok(n as u64)
        };

        if raw.contains(',') {
            let parts: Vec<&str> = raw.split(',').collect();
            if parts.len() != 2 {
                return Err(ConfigError::invalid_parameter(
                    "digits",
                    format!(
                        "the 'digits' rule range must have exactly two values, got '{}'",
                        raw
                    ),
                ));
            }
            let min = parse_count(parts[0])?;
            let max = parse_count(parts[1])?;
            if min > max {
                return Err(ConfigError::invalid_parameter(
                    "digits",
                    format!(
                        "the 'digits' rule minimum ({}) cannot be greater than maximum ({})",
                        min, max
                    ),
                ));
            }
            Ok((min, max))
        } else {
            let n = parse_count(raw)?;
            Ok((n, n))
        }
    }
}

impl Rule for Digits {
    fn name(&self) -> &str {
        "digits"
    }

    fn check(
        &self,
        ctx: &FieldContext<'_>,
        parameter: Option<&str>,
    ) -> Result<Option<String>, ConfigError> {
        let (min, max) = Digits::parse_bounds(parameter)?;
        if ctx.value.is_null() {
            return Ok(None);
        }

        let s = value_to_string(ctx.value);
        if !DIGITS_RE.is_match(&s) {
            return Ok(Some(format!("The {} must contain only digits.", ctx.name)));
        }

        let count = s.len() as u64;
        if min == max {
            if count != min {
                return Ok(Some(format!(
                    "The {} must be exactly {} digits.",
                    ctx.name, min
                )));
            }
        } else if count < min || count > max {
            return Ok(Some(format!(
                "The {} must be between {} and {} digits.",
                ctx.name, min, max
            )));
        }

        Ok(None)
    }
}

// ─── date ───────────────────────────────────────────────────────────────────

/// `date` accepts RFC 3339 or `%Y-%m-%d`; `date:format` parses with an
/// explicit chrono format string instead.
pub struct Date;

impl Rule for Date {
    fn name(&self) -> &str {
        "date"
    }

    fn check(
        &self,
        ctx: &FieldContext<'_>,
        parameter: Option<&str>,
    ) -> Result<Option<String>, ConfigError> {
        if let Some(format) = parameter {
            if format.trim().is_empty() {
                return Err(ConfigError::invalid_parameter(
                    "date",
                    "the 'date' rule format must not be empty",
                ));
            }
            validate_format("date", format)?;
            if ctx.value.is_null() {
                return Ok(None);
            }
            let ok = ctx
                .value
                .as_str()
                .is_some_and(|s| parse_datetime_with_format(s, format).is_some());
            if ok {
                return Ok(None);
            }
            return Ok(Some(format!(
                "The {} does not match the format {}.",
                ctx.name, format
            )));
        }

        if ctx.value.is_null() {
            return Ok(None);
        }
        let ok = ctx.value.as_str().is_some_and(|s| parse_datetime(s).is_some());
        if ok {
            Ok(None)
        } else {
            Ok(Some(format!("The {} must be a valid date.", ctx.name)))
        }
    }
}

// ─── before ─────────────────────────────────────────────────────────────────

pub struct Before;

impl Rule for Before {
    fn name(&self) -> &str {
        "before"
    }

    fn check(
        &self,
        ctx: &FieldContext<'_>,
        parameter: Option<&str>,
    ) -> Result<Option<String>, ConfigError> {
        let (bound, raw) = bound_param("before", parameter)?;
        if ctx.value.is_null() {
            return Ok(None);
        }
        match ctx.value.as_str().and_then(parse_datetime) {
            Some(dt) if dt < bound => Ok(None),
            Some(_) => Ok(Some(format!(
                "The {} must be a date before {}.",
                ctx.name, raw
            ))),
            None => Ok(Some(format!("The {} must be a valid date.", ctx.name))),
        }
    }
}

// ─── after ──────────────────────────────────────────────────────────────────

pub struct After;

impl Rule for After {
    fn name(&self) -> &str {
        "after"
    }

    fn check(
        &self,
        ctx: &FieldContext<'_>,
        parameter: Option<&str>,
    ) -> Result<Option<String>, ConfigError> {
        let (bound, raw) = bound_param("after", parameter)?;
        if ctx.value.is_null() {
            return Ok(None);
        }
        match ctx.value.as_str().and_then(parse_datetime) {
            Some(dt) if dt > bound => Ok(None),
            Some(_) => Ok(Some(format!(
                "The {} must be a date after {}.",
                ctx.name, raw
            ))),
            None => Ok(Some(format!("The {} must be a valid date.", ctx.name))),
        }
    }
}

// ─── future ─────────────────────────────────────────────────────────────────

pub struct Future;

impl Rule for Future {
    fn name(&self) -> &str {
        "future"
    }

    fn check(
        &self,
        ctx: &FieldContext<'_>,
        _parameter: Option<&str>,
    ) -> Result<Option<String>, ConfigError> {
        if ctx.value.is_null() {
            return Ok(None);
        }
        match ctx.value.as_str().and_then(parse_datetime) {
            Some(dt) if dt > Utc::now().naive_utc() => Ok(None),
            Some(_) => Ok(Some(format!(
                "The {} must be a date in the future.",
                ctx.name
            ))),
            None => Ok(Some(format!("The {} must be a valid date.", ctx.name))),
        }
    }
}

// ─── past ───────────────────────────────────────────────────────────────────

pub struct Past;

impl Rule for Past {
    fn name(&self) -> &str {
        "past"
    }

    fn check(
        &self,
        ctx: &FieldContext<'_>,
        _parameter: Option<&str>,
    ) -> Result<Option<String>, ConfigError> {
        if ctx.value.is_null() {
            return Ok(None);
        }
        match ctx.value.as_str().and_then(parse_datetime) {
            Some(dt) if dt < Utc::now().naive_utc() => Ok(None),
            Some(_) => Ok(Some(format!("The {} must be a date in the past.", ctx.name))),
            None => Ok(Some(format!("The {} must be a valid date.", ctx.name))),
        }
    }
}

// ─── same ───────────────────────────────────────────────────────────────────

/// `same:other` — deep equality against the raw sibling value at the same
/// nesting level. Never triggers rule evaluation on the sibling.
pub struct Same;

impl Rule for Same {
    fn name(&self) -> &str {
        "same"
    }

    fn check(
        &self,
        ctx: &FieldContext<'_>,
        parameter: Option<&str>,
    ) -> Result<Option<String>, ConfigError> {
        let other = require_param("same", parameter)?.trim();
        if ctx.value.is_null() {
            return Ok(None);
        }
        let sibling = ctx.siblings.get(other).unwrap_or(&NULL);
        if values_deep_equal(ctx.value, sibling) {
            Ok(None)
        } else {
            Ok(Some(format!("The {} must match {}.", ctx.name, other)))
        }
    }
}

// ─── different ──────────────────────────────────────────────────────────────

pub struct Different;

impl Rule for Different {
    fn name(&self) -> &str {
        "different"
    }

    fn check(
        &self,
        ctx: &FieldContext<'_>,
        parameter: Option<&str>,
    ) -> Result<Option<String>, ConfigError> {
        let other = require_param("different", parameter)?.trim();
        if ctx.value.is_null() {
            return Ok(None);
        }
        let sibling = ctx.siblings.get(other).unwrap_or(&NULL);
        if values_deep_equal(ctx.value, sibling) {
            Ok(Some(format!(
                "The {} must be different from {}.",
                ctx.name, other
            )))
        } else {
            Ok(None)
        }
    }
}

// ─── distinct ───────────────────────────────────────────────────────────────

/// Pairwise uniqueness over a list, by semantic (deep) equality — 42 and
/// 42.0 count as duplicates.
pub struct Distinct;

impl Rule for Distinct {
    fn name(&self) -> &str {
        "distinct"
    }

    fn check(
        &self,
        ctx: &FieldContext<'_>,
        _parameter: Option<&str>,
    ) -> Result<Option<String>, ConfigError> {
        if ctx.value.is_null() {
            return Ok(None);
        }
        let Some(items) = ctx.value.as_array() else {
            return Ok(Some(format!("The {} must be a list.", ctx.name)));
        };
        for (i, a) in items.iter().enumerate() {
            for b in &items[i + 1..] {
                if values_deep_equal(a, b) {
                    return Ok(Some(format!(
                        "The {} must not contain duplicate values.",
                        ctx.name
                    )));
                }
            }
        }
        Ok(None)
    }
}

// ─── Built-in set ───────────────────────────────────────────────────────────

/// Every built-in rule, in registration order. `nullable` is deliberately
/// absent: it is a marker consumed by the orchestrator, not a rule.
pub(crate) fn builtins() -> Vec<Arc<dyn Rule>> {
    vec![
        Arc::new(Required),
        Arc::new(RequiredIf),
        Arc::new(RequiredUnless),
        Arc::new(Min),
        Arc::new(Max),
        Arc::new(Size),
        Arc::new(Between),
        Arc::new(GreaterThan),
        Arc::new(GreaterOrEqual),
        Arc::new(LessThan),
        Arc::new(LessOrEqual),
        Arc::new(Numeric),
        Arc::new(Email),
        Arc::new(Url),
        Arc::new(Ip),
        Arc::new(Uuid),
        Arc::new(Json),
        Arc::new(Pattern),
        Arc::new(OneOf),
        Arc::new(Enumerated),
        Arc::new(Alpha),
        Arc::new(AlphaNum),
        Arc::new(Digits),
        Arc::new(Date),
        Arc::new(Before),
        Arc::new(After),
        Arc::new(Future),
        Arc::new(Past),
        Arc::new(Same),
        Arc::new(Different),
        Arc::new(Distinct),
    ]
}
