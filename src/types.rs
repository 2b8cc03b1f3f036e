//! Schema and per-field context types.
//!
//! The engine never inspects objects by reflection: the host supplies an
//! explicit [`Schema`] mapping field names to rule expressions and cascade
//! markers, and the walker hands each rule an already-extracted
//! [`FieldContext`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

// ─── Schema ─────────────────────────────────────────────────────────────────

/// An ordered set of field specifications for one object level.
///
/// Declaration order is evaluation order and error-emission order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new() -> Self {
        Schema::default()
    }

    /// Add a field validated by a rule expression.
    pub fn field(mut self, name: &str, rules: &str) -> Self {
        self.fields.push(FieldSpec {
            name: name.to_string(),
            rules: Some(rules.to_string()),
            message: None,
            cascade: None,
        });
        self
    }

    /// Add a field validated by a rule expression, with an
    /// externally-supplied message that overrides the rule defaults.
    /// `{field}` in the message is replaced with the field name.
    pub fn field_with_message(mut self, name: &str, rules: &str, message: &str) -> Self {
        self.fields.push(FieldSpec {
            name: name.to_string(),
            rules: Some(rules.to_string()),
            message: Some(message.to_string()),
            cascade: None,
        });
        self
    }

    /// Add a field whose value is a nested object validated by `schema`.
    /// Null values are skipped — cascade does not imply required.
    pub fn nested(mut self, name: &str, schema: Schema) -> Self {
        self.fields.push(FieldSpec {
            name: name.to_string(),
            rules: None,
            message: None,
            cascade: Some(Cascade::Object(schema)),
        });
        self
    }

    /// Add a field whose value is a collection of objects, each validated
    /// by `schema` with an `[index]` path suffix.
    pub fn each(mut self, name: &str, schema: Schema) -> Self {
        self.fields.push(FieldSpec {
            name: name.to_string(),
            rules: None,
            message: None,
            cascade: Some(Cascade::List(schema)),
        });
        self
    }

    /// Attach a rule expression to the most recently added field. Lets a
    /// cascade field also carry its own rules (`required` then recurse).
    pub fn rules(mut self, rules: &str) -> Self {
        if let Some(last) = self.fields.last_mut() {
            last.rules = Some(rules.to_string());
        }
        self
    }
}

/// One field's validation spec: an optional rule expression, an optional
/// message override, and an optional cascade into nested values.
///
/// When both `rules` and `cascade` are present, the expression runs first
/// and the cascade follows (its errors are emitted immediately after).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cascade: Option<Cascade>,
}

/// Cascade marker: recurse into a single nested object or into each
/// element of a collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cascade {
    Object(Schema),
    List(Schema),
}

// ─── FieldContext ───────────────────────────────────────────────────────────

/// Everything a rule may consult about the field under validation.
///
/// `siblings` reflects the enclosing object's other fields at the same
/// nesting level; only the sibling-comparison rules (`same`, `different`,
/// `required_if`, `required_unless`) read it. `enums` holds host-registered
/// named constant sets; only the `enum` rule reads it.
pub struct FieldContext<'a> {
    /// Full dot/index-qualified path, used for error reporting.
    pub path: &'a str,
    /// Leaf field name, used in message text.
    pub name: &'a str,
    pub value: &'a Value,
    pub siblings: &'a Map<String, Value>,
    pub enums: &'a HashMap<String, Vec<String>>,
}
