//! Rule-expression parsing.
//!
//! An expression is a `|`-delimited list of rule invocations, each a bare
//! name (`required`, `numeric`) or `name:parameter` (`min:3`,
//! `between:18,65`). Parsing splits on the FIRST `:` only — parameters may
//! legitimately contain further colons (regex patterns, time formats) and
//! reach the rule unparsed.
//!
//! Parsing does not check that rule names exist; that is deferred to
//! dispatch so one field's bad rule name cannot block parsing siblings.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single rule invocation: a name and the raw parameter remainder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleInvocation {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

/// An ordered sequence of rule invocations. Order is preserved and
/// determines evaluation order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleExpression {
    pub invocations: Vec<RuleInvocation>,
}

impl RuleExpression {
    pub fn is_empty(&self) -> bool {
        self.invocations.is_empty()
    }

    /// Whether the expression carries the `nullable` marker.
    pub fn is_nullable(&self) -> bool {
        self.invocations.iter().any(|inv| inv.name == "nullable")
    }
}

impl fmt::Display for RuleInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parameter {
            Some(p) => write!(f, "{}:{}", self.name, p),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Re-serializes byte-for-byte: parsing then formatting a well-formed
/// expression preserves order and parameter strings exactly.
impl fmt::Display for RuleExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, inv) in self.invocations.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            write!(f, "{}", inv)?;
        }
        Ok(())
    }
}

/// Parse a rule-expression string into an ordered [`RuleExpression`].
///
/// An empty expression parses to an empty (always-passing) expression.
/// Empty segments (`"a||b"`, leading or trailing `|`) and empty rule
/// names (`":x"`) are [`ParseError`]s carrying the segment index.
pub fn parse(expression: &str) -> Result<RuleExpression, ParseError> {
    if expression.is_empty() {
        return Ok(RuleExpression::default());
    }

    let mut invocations = Vec::new();
    for (i, segment) in expression.split('|').enumerate() {
        if segment.is_empty() {
            return Err(ParseError {
                message: "empty rule segment".to_string(),
                segment: Some(i),
            });
        }
        let (name, parameter) = match segment.find(':') {
            Some(pos) => (&segment[..pos], Some(segment[pos + 1..].to_string())),
            None => (segment, None),
        };
        if name.is_empty() {
            return Err(ParseError {
                message: format!(
                    "missing rule name before ':{}'",
                    parameter.as_deref().unwrap_or_default()
                ),
                segment: Some(i),
            });
        }
        invocations.push(RuleInvocation {
            name: name.to_string(),
            parameter,
        });
    }

    Ok(RuleExpression { invocations })
}
