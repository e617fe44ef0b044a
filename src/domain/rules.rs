use regex::Regex;
use serde_json::Value;

/// Expected value kind for `is_type` checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Null,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::Null => "null",
        }
    }

    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => value.as_i64().is_some() || value.as_u64().is_some(),
            Self::Boolean => value.is_boolean(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
            Self::Null => value.is_null(),
        }
    }

    /// The kind a value actually has, for failure messages.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => Self::Integer,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }
}

/// Regex input for `matches`/`not_matches`: a raw source string compiled at
/// evaluation time, or a precompiled regex used as-is.
#[derive(Debug, Clone)]
pub enum Pattern {
    Source(String),
    Compiled(Regex),
}

impl Pattern {
    /// Pattern source text, used in failure messages.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Source(source) => source,
            Self::Compiled(regex) => regex.as_str(),
        }
    }

    pub(crate) fn compile(&self) -> Result<Regex, regex::Error> {
        match self {
            Self::Source(source) => Regex::new(source),
            Self::Compiled(regex) => Ok(regex.clone()),
        }
    }
}

impl From<&str> for Pattern {
    fn from(source: &str) -> Self {
        Self::Source(source.to_string())
    }
}

impl From<String> for Pattern {
    fn from(source: String) -> Self {
        Self::Source(source)
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Self::Compiled(regex)
    }
}

/// One pattern or several; rule configuration accepts either form and a
/// single pattern is treated as a one-element list.
#[derive(Debug, Clone, Default)]
pub struct Patterns(pub Vec<Pattern>);

impl From<&str> for Patterns {
    fn from(source: &str) -> Self {
        Self(vec![Pattern::from(source)])
    }
}

impl From<String> for Patterns {
    fn from(source: String) -> Self {
        Self(vec![Pattern::from(source)])
    }
}

impl From<Regex> for Patterns {
    fn from(regex: Regex) -> Self {
        Self(vec![Pattern::from(regex)])
    }
}

impl From<Pattern> for Patterns {
    fn from(pattern: Pattern) -> Self {
        Self(vec![pattern])
    }
}

impl<T: Into<Pattern>> From<Vec<T>> for Patterns {
    fn from(patterns: Vec<T>) -> Self {
        Self(patterns.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Pattern>, const N: usize> From<[T; N]> for Patterns {
    fn from(patterns: [T; N]) -> Self {
        Self(patterns.into_iter().map(Into::into).collect())
    }
}
