//! Per-field orchestration and cascade walking.
//!
//! A field produces at most one reported error — first-failure-wins in
//! authored order. The walker is depth-first over the schema's declaration
//! order, so the result list is deterministic: a field's own error comes
//! first, its nested errors immediately after, then the next field.

use crate::error::{CheckError, ValidationError, ValidationResult};
use crate::parse::{self, RuleExpression};
use crate::registry::{FnRule, Registry, Rule};
use crate::types::{Cascade, FieldContext, Schema};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

static NULL: Value = Value::Null;

/// The validation engine: a rule registry plus host-registered enum sets.
///
/// Populate it before validating; `&Validator` is freely shareable across
/// threads and every check is pure and call-local.
pub struct Validator {
    registry: Registry,
    enums: HashMap<String, Vec<String>>,
}

impl Default for Validator {
    fn default() -> Self {
        Validator::new()
    }
}

impl Validator {
    /// A validator with every built-in rule and no enum sets.
    pub fn new() -> Self {
        Validator {
            registry: Registry::with_builtins(),
            enums: HashMap::new(),
        }
    }

    /// A validator over a caller-assembled registry.
    pub fn with_registry(registry: Registry) -> Self {
        Validator {
            registry,
            enums: HashMap::new(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Register a custom rule. Last registration for a name wins, so this
    /// can also replace a built-in.
    pub fn register_rule(&mut self, rule: Arc<dyn Rule>) {
        self.registry.register(rule);
    }

    /// Register a closure as a rule.
    pub fn register_fn<F>(&mut self, name: &str, check: F)
    where
        F: Fn(&FieldContext<'_>, Option<&str>) -> Result<Option<String>, crate::error::ConfigError>
            + Send
            + Sync
            + 'static,
    {
        self.registry.register(Arc::new(FnRule::new(name, check)));
    }

    /// Register a named constant set for the `enum` rule.
    pub fn register_enum<I, S>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enums
            .insert(name.to_string(), values.into_iter().map(Into::into).collect());
    }

    /// Validate one field against a rule expression, with the enclosing
    /// object's fields as siblings. Returns at most one error.
    pub fn check_field(
        &self,
        path: &str,
        value: &Value,
        expression: &str,
        siblings: &Map<String, Value>,
    ) -> Result<Option<ValidationError>, CheckError> {
        let expr = parse::parse(expression)?;
        let name = leaf_name(path);
        self.run_expression(path, name, value, &expr, siblings, None)
    }

    /// Single-value convenience: no siblings, path equals name.
    pub fn check_value(
        &self,
        name: &str,
        value: &Value,
        expression: &str,
    ) -> Result<Option<ValidationError>, CheckError> {
        let empty = Map::new();
        self.check_field(name, value, expression, &empty)
    }

    /// Validate an object graph against a schema: the top-level entry.
    ///
    /// Validation failures are collected in the result; configuration
    /// errors abort the whole walk — a broken annotation must not
    /// masquerade as a pass.
    pub fn check(&self, root: &Value, schema: &Schema) -> Result<ValidationResult, CheckError> {
        let mut errors = Vec::new();
        self.walk(root, schema, "", &mut errors)?;
        Ok(ValidationResult { errors })
    }

    /// Run a parsed expression against one field value.
    ///
    /// The `nullable` marker short-circuits null values and is skipped
    /// during iteration; rule names resolve at evaluation time, so an
    /// unknown name after an earlier failure is never reached.
    fn run_expression(
        &self,
        path: &str,
        name: &str,
        value: &Value,
        expr: &RuleExpression,
        siblings: &Map<String, Value>,
        message_override: Option<&str>,
    ) -> Result<Option<ValidationError>, CheckError> {
        if expr.is_nullable() && value.is_null() {
            return Ok(None);
        }

        let ctx = FieldContext {
            path,
            name,
            value,
            siblings,
            enums: &self.enums,
        };

        for inv in &expr.invocations {
            if inv.name == "nullable" {
                continue;
            }
            let rule = self
                .registry
                .resolve(&inv.name)
                .map_err(|e| e.at_field(path))?;
            let outcome = rule
                .check(&ctx, inv.parameter.as_deref())
                .map_err(|e| e.at_field(path))?;
            if let Some(default_message) = outcome {
                let message = match message_override {
                    Some(template) => template.replace("{field}", name),
                    None => default_message,
                };
                return Ok(Some(ValidationError {
                    rule: inv.name.clone(),
                    path: path.to_string(),
                    message,
                }));
            }
        }

        Ok(None)
    }

    fn walk(
        &self,
        value: &Value,
        schema: &Schema,
        prefix: &str,
        errors: &mut Vec<ValidationError>,
    ) -> Result<(), CheckError> {
        let empty = Map::new();
        let fields = value.as_object().unwrap_or(&empty);

        for spec in &schema.fields {
            let field_value = fields.get(&spec.name).unwrap_or(&NULL);
            let path = join_path(prefix, &spec.name);

            if let Some(expression) = &spec.rules {
                let expr = parse::parse(expression)?;
                if let Some(error) = self.run_expression(
                    &path,
                    &spec.name,
                    field_value,
                    &expr,
                    fields,
                    spec.message.as_deref(),
                )? {
                    errors.push(error);
                }
            }

            match &spec.cascade {
                None => {}
                // Cascade does not imply required: null skips.
                Some(Cascade::Object(child)) => match field_value {
                    Value::Null => {}
                    Value::Object(_) => self.walk(field_value, child, &path, errors)?,
                    _ => errors.push(shape_error(&path, &spec.name, "an object")),
                },
                Some(Cascade::List(child)) => match field_value {
                    Value::Null => {}
                    Value::Array(items) => {
                        for (i, item) in items.iter().enumerate() {
                            let item_path = format!("{}[{}]", path, i);
                            self.walk(item, child, &item_path, errors)?;
                        }
                    }
                    _ => errors.push(shape_error(&path, &spec.name, "a list")),
                },
            }
        }

        Ok(())
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

/// Last `.`-separated segment, index suffix stripped: the name used in
/// message text.
fn leaf_name(path: &str) -> &str {
    let leaf = path.rsplit('.').next().unwrap_or(path);
    match leaf.find('[') {
        Some(pos) => &leaf[..pos],
        None => leaf,
    }
}

fn shape_error(path: &str, name: &str, expected: &str) -> ValidationError {
    ValidationError {
        rule: "cascade".to_string(),
        path: path.to_string(),
        message: format!("The {} must be {}.", name, expected),
    }
}
