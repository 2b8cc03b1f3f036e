//! Declarative field validation driven by pipe-delimited rule expressions.
//!
//! Hosts annotate fields with short rule strings (`"required|min:3|max:20"`)
//! through an explicit [`Schema`], and the engine evaluates each rule
//! against the field's runtime value:
//!
//! ```text
//! parse(expr) → RuleExpression → resolve(name) → Rule → check(value)
//!                              → walk(graph)  → ValidationResult
//! ```
//!
//! Failures come back as a flat, ordered list of path-qualified messages
//! (`address.zipCode`, `alternateAddresses[1].sku`); an empty list means
//! the graph is valid. Broken annotations (unknown rule names, bad
//! parameters) are configuration errors and abort loudly instead.
//!
//! # Quick Start
//!
//! ```rust
//! use fieldcheck::Schema;
//! use serde_json::json;
//!
//! let schema = Schema::new()
//!     .field("username", "required|min:3|max:20")
//!     .field("email", "required|email")
//!     .nested("address", Schema::new().field("zipCode", "required|digits:5"));
//!
//! let value = json!({
//!     "username": "al",
//!     "email": "al@example.com",
//!     "address": { "zipCode": "1234" },
//! });
//!
//! let result = fieldcheck::check(&value, &schema).expect("well-formed schema");
//! assert_eq!(result.errors.len(), 2);
//! assert_eq!(result.errors[0].path, "username");
//! assert_eq!(result.errors[1].path, "address.zipCode");
//! ```
//!
//! Custom rules and named enum sets hang off an owned [`Validator`]:
//!
//! ```rust
//! use fieldcheck::{Schema, Validator};
//! use serde_json::json;
//!
//! let mut validator = Validator::new();
//! validator.register_enum("role", ["admin", "user", "guest"]);
//!
//! let schema = Schema::new().field("role", "required|enum:role");
//! let result = validator.check(&json!({ "role": "root" }), &schema).unwrap();
//! assert!(!result.is_valid());
//! ```

pub mod check;
pub mod error;
pub mod parse;
pub mod registry;
pub mod rules;
pub mod types;

pub use check::Validator;
pub use error::*;
pub use parse::{RuleExpression, RuleInvocation};
pub use registry::{FnRule, Registry, Rule};
pub use types::{Cascade, FieldContext, FieldSpec, Schema};

use serde_json::Value;
use std::sync::LazyLock;

// Process-wide default: built-ins only, populated once, never mutated.
// Custom rules and enum sets require an owned Validator.
static DEFAULT_VALIDATOR: LazyLock<Validator> = LazyLock::new(Validator::new);

/// Validate an object graph against a schema using the built-in rules.
///
/// # Errors
///
/// Returns `Err(CheckError)` when the schema itself is broken: a
/// malformed expression, an unknown rule name, or an invalid parameter.
/// Validation failures are data, collected in the `Ok` result.
pub fn check(root: &Value, schema: &Schema) -> Result<ValidationResult, CheckError> {
    DEFAULT_VALIDATOR.check(root, schema)
}

/// Validate a single standalone value against a rule expression.
///
/// # Errors
///
/// Returns `Err(CheckError)` when the expression is malformed or names an
/// unknown rule or invalid parameter.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
///
/// let error = fieldcheck::check_value("pin", &json!("12a4"), "required|digits:4")
///     .expect("well-formed expression")
///     .expect("validation fails");
/// assert_eq!(error.message, "The pin must contain only digits.");
/// ```
pub fn check_value(
    name: &str,
    value: &Value,
    expression: &str,
) -> Result<Option<ValidationError>, CheckError> {
    DEFAULT_VALIDATOR.check_value(name, value, expression)
}

/// Parse a rule-expression string without evaluating it.
///
/// # Errors
///
/// Returns `Err(ParseError)` for empty segments or missing rule names.
pub fn parse_expression(expression: &str) -> Result<RuleExpression, ParseError> {
    parse::parse(expression)
}
