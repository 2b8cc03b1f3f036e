use serde::{Deserialize, Serialize};
use std::fmt;

/// Produced by `parse` when a rule-expression string is malformed.
///
/// A wholly empty expression is NOT an error (it parses to an empty,
/// always-passing [`RuleExpression`](crate::parse::RuleExpression)); an
/// empty segment between pipes or an empty rule name is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    pub message: String,
    /// Zero-based index of the offending `|`-delimited segment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<usize>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.segment {
            Some(i) => write!(f, "segment {}: {}", i, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ParseError {}

/// Error kind for configuration errors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigErrorKind {
    /// The expression names a rule the registry does not know.
    UnknownRule,
    /// A rule parameter is missing, empty, malformed, or semantically
    /// invalid (non-numeric bound, min greater than max, …).
    InvalidParameter,
}

/// A broken schema annotation: a programmer mistake, not bad user data.
///
/// Configuration errors are raised (`Err`), never folded into a
/// [`ValidationResult`] — a misconfigured field must not masquerade as a
/// passing one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigError {
    pub kind: ConfigErrorKind,
    /// Name of the rule whose invocation is broken.
    pub rule: String,
    /// Path of the field carrying the broken annotation, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

impl ConfigError {
    pub fn unknown_rule(name: &str) -> Self {
        ConfigError {
            kind: ConfigErrorKind::UnknownRule,
            rule: name.to_string(),
            field: None,
            message: format!("unknown rule: '{}'", name),
        }
    }

    pub fn invalid_parameter(rule: &str, message: impl Into<String>) -> Self {
        ConfigError {
            kind: ConfigErrorKind::InvalidParameter,
            rule: rule.to_string(),
            field: None,
            message: message.into(),
        }
    }

    /// Attach the field path where the broken annotation lives.
    pub(crate) fn at_field(mut self, path: &str) -> Self {
        self.field = Some(path.to_string());
        self
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "rule '{}' on field '{}': {}", self.rule, field, self.message),
            None => write!(f, "rule '{}': {}", self.rule, self.message),
        }
    }
}

impl std::error::Error for ConfigError {}

/// A single validation failure: expected, data-dependent, collected —
/// never raised.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Name of the rule that failed.
    pub rule: String,
    /// Dot/index-qualified field path, e.g. `alternateAddresses[1].zipCode`.
    pub path: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.rule, self.path, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Result of a graph check: a flat, ordered list of path-qualified
/// failures. Empty list = valid. Constructed fresh per call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Combined error type for the orchestrator entry points.
///
/// Both variants indicate a broken schema, not bad input data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckError {
    Parse(ParseError),
    Config(ConfigError),
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckError::Parse(e) => write!(f, "expression parse error: {}", e),
            CheckError::Config(e) => write!(f, "configuration error: {}", e),
        }
    }
}

impl std::error::Error for CheckError {}

impl From<ParseError> for CheckError {
    fn from(e: ParseError) -> Self {
        CheckError::Parse(e)
    }
}

impl From<ConfigError> for CheckError {
    fn from(e: ConfigError) -> Self {
        CheckError::Config(e)
    }
}
