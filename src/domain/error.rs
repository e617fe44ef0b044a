use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

/// Boxed underlying error carried as a failure cause.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Identifier of the rule that produced a failure. Closed set.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    Contains,
    NotContains,
    Matches,
    NotMatches,
    ValidJson,
    MaxLength,
    MinLength,
    NotEmpty,
    Equals,
    IsType,
    Satisfies,
}

impl Rule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::NotContains => "not_contains",
            Self::Matches => "matches",
            Self::NotMatches => "not_matches",
            Self::ValidJson => "valid_json",
            Self::MaxLength => "max_length",
            Self::MinLength => "min_length",
            Self::NotEmpty => "not_empty",
            Self::Equals => "equals",
            Self::IsType => "is_type",
            Self::Satisfies => "satisfies",
        }
    }
}

/// Single failure type covering every rule violation.
///
/// Lower-level errors (regex compilation, JSON parsing, predicate errors)
/// are caught at the point of occurrence and re-wrapped here with the
/// original preserved as `source()`; they never propagate in native form.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ValidationFailure {
    /// Human-readable description of the violation.
    pub message: String,
    /// The offending value, in its original form.
    pub value: Value,
    /// Which rule failed. `None` only for failures raised outside rule
    /// evaluation.
    pub rule: Option<Rule>,
    /// Underlying error, when the failure wraps one.
    #[source]
    pub cause: Option<BoxedError>,
}

impl ValidationFailure {
    pub fn new(message: impl Into<String>, value: Value, rule: Rule) -> Self {
        Self {
            message: message.into(),
            value,
            rule: Some(rule),
            cause: None,
        }
    }

    pub fn with_cause(
        message: impl Into<String>,
        value: Value,
        rule: Rule,
        cause: BoxedError,
    ) -> Self {
        Self {
            cause: Some(cause),
            ..Self::new(message, value, rule)
        }
    }

    /// Structured rendering of the failure.
    pub fn report(&self) -> Value {
        json!({
            "message": self.message,
            "rule": self.rule,
            "value": self.value,
        })
    }
}

/// Outcome boundary for fallible wrapped callables.
#[derive(Debug, Error)]
pub enum CheckError<E> {
    /// The wrapped callable itself failed; no rule evaluation occurred.
    #[error("{0}")]
    Call(E),
    /// The callable succeeded but its output failed validation.
    #[error("{0}")]
    Validation(ValidationFailure),
}
