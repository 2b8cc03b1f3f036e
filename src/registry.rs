//! Rule registry: the mapping from rule name to implementation.
//!
//! Built-ins are registered once at construction; hosts may add custom
//! rules through the same mechanism. Name collision overwrites — last
//! registration wins. The registry is read-mostly: populate it before
//! validating and never mutate it during active validation (`&Registry`
//! is freely shareable across threads).

use crate::error::ConfigError;
use crate::rules;
use crate::types::FieldContext;
use std::collections::HashMap;
use std::sync::Arc;

/// A single validation rule: a stable unique name plus a pure check.
///
/// `Ok(None)` means pass, `Ok(Some(message))` a validation failure, and
/// `Err` a configuration error (bad parameter). Implementations must be
/// stateless and side-effect-free; every rule except `required` and the
/// `required_if`/`required_unless` family must pass immediately on null —
/// null values are the `required` rule's sole responsibility.
pub trait Rule: Send + Sync {
    fn name(&self) -> &str;

    fn check(
        &self,
        ctx: &FieldContext<'_>,
        parameter: Option<&str>,
    ) -> Result<Option<String>, ConfigError>;
}

/// Adapter turning a closure into a [`Rule`], for host-registered rules.
pub struct FnRule<F> {
    name: String,
    check: F,
}

impl<F> FnRule<F>
where
    F: Fn(&FieldContext<'_>, Option<&str>) -> Result<Option<String>, ConfigError> + Send + Sync,
{
    pub fn new(name: &str, check: F) -> Self {
        FnRule {
            name: name.to_string(),
            check,
        }
    }
}

impl<F> Rule for FnRule<F>
where
    F: Fn(&FieldContext<'_>, Option<&str>) -> Result<Option<String>, ConfigError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn check(
        &self,
        ctx: &FieldContext<'_>,
        parameter: Option<&str>,
    ) -> Result<Option<String>, ConfigError> {
        (self.check)(ctx, parameter)
    }
}

/// Name → implementation mapping with lookup and registration.
#[derive(Clone, Default)]
pub struct Registry {
    rules: HashMap<String, Arc<dyn Rule>>,
}

impl Registry {
    /// An empty registry with no rules at all.
    pub fn empty() -> Self {
        Registry::default()
    }

    /// A registry holding every built-in rule.
    ///
    /// `nullable` is deliberately absent: it is a marker consumed by the
    /// orchestrator, not a functioning rule.
    pub fn with_builtins() -> Self {
        let mut registry = Registry::default();
        for rule in rules::builtins() {
            registry.register(rule);
        }
        registry
    }

    /// Register a rule under its own name. Last registration wins.
    pub fn register(&mut self, rule: Arc<dyn Rule>) {
        self.rules.insert(rule.name().to_string(), rule);
    }

    /// Resolve a rule name, failing with an `UnknownRule` configuration
    /// error when absent.
    pub fn resolve(&self, name: &str) -> Result<&dyn Rule, ConfigError> {
        self.rules
            .get(name)
            .map(|r| r.as_ref())
            .ok_or_else(|| ConfigError::unknown_rule(name))
    }

    /// Whether a rule with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
