use regex::Regex;
use serde_json::Value;

use crate::domain::error::{BoxedError, Rule, ValidationFailure};
use crate::domain::rules::{Pattern, ValueKind};

/// Fluent rule evaluator over a single value.
///
/// Every rule method consumes and returns the builder, so a chain reads as
/// one expression:
///
/// ```
/// use evalguard::expect;
///
/// # fn main() -> Result<(), evalguard::ValidationFailure> {
/// expect("SELECT * FROM users")
///     .contains("SELECT")?
///     .not_contains("DROP")?
///     .max_length(100)?;
/// # Ok(())
/// # }
/// ```
///
/// String-based rules run against the textual projection of the value,
/// computed once at construction: the empty string for `Null`, the string
/// itself for `String`, compact JSON for everything else.
#[derive(Debug, Clone)]
pub struct Expectation {
    value: Value,
    text: String,
}

/// Wraps a value for fluent validation.
pub fn expect(value: impl Into<Value>) -> Expectation {
    Expectation::new(value.into())
}

impl Expectation {
    pub fn new(value: Value) -> Self {
        let text = render_text(&value);
        Self { value, text }
    }

    /// Fails unless the textual projection contains `substring`.
    pub fn contains(self, substring: &str) -> Result<Self, ValidationFailure> {
        if !self.text.contains(substring) {
            let message = format!("expected value to contain {substring:?}");
            return Err(self.fail(message, Rule::Contains));
        }
        Ok(self)
    }

    /// Fails if the textual projection contains `substring`.
    pub fn not_contains(self, substring: &str) -> Result<Self, ValidationFailure> {
        if self.text.contains(substring) {
            let message = format!("expected value to not contain {substring:?}");
            return Err(self.fail(message, Rule::NotContains));
        }
        Ok(self)
    }

    /// Fails unless the pattern finds a match anywhere in the textual
    /// projection. A raw source string that does not compile fails with the
    /// compile error as cause.
    pub fn matches(self, pattern: impl Into<Pattern>) -> Result<Self, ValidationFailure> {
        let (this, regex) = self.compile_pattern(pattern.into(), Rule::Matches)?;
        if !regex.is_match(&this.text) {
            let message = format!("expected value to match pattern {:?}", regex.as_str());
            return Err(this.fail(message, Rule::Matches));
        }
        Ok(this)
    }

    /// Fails if the pattern finds a match in the textual projection. Same
    /// compilation rule as [`Expectation::matches`].
    pub fn not_matches(self, pattern: impl Into<Pattern>) -> Result<Self, ValidationFailure> {
        let (this, regex) = self.compile_pattern(pattern.into(), Rule::NotMatches)?;
        if regex.is_match(&this.text) {
            let message = format!("expected value to not match pattern {:?}", regex.as_str());
            return Err(this.fail(message, Rule::NotMatches));
        }
        Ok(this)
    }

    /// Fails unless the textual projection parses as well-formed JSON. The
    /// parse error is wrapped, never propagated raw.
    pub fn valid_json(self) -> Result<Self, ValidationFailure> {
        if let Err(error) = serde_json::from_str::<Value>(&self.text) {
            let message = format!("expected valid JSON: {error}");
            return Err(self.fail_with(message, Rule::ValidJson, Box::new(error)));
        }
        Ok(self)
    }

    /// Fails unless the projection's character count is at most `limit`.
    pub fn max_length(self, limit: usize) -> Result<Self, ValidationFailure> {
        let length = self.text.chars().count();
        if length > limit {
            let message = format!("expected length <= {limit}, got {length}");
            return Err(self.fail(message, Rule::MaxLength));
        }
        Ok(self)
    }

    /// Fails unless the projection's character count is at least `limit`.
    pub fn min_length(self, limit: usize) -> Result<Self, ValidationFailure> {
        let length = self.text.chars().count();
        if length < limit {
            let message = format!("expected length >= {limit}, got {length}");
            return Err(self.fail(message, Rule::MinLength));
        }
        Ok(self)
    }

    /// Fails for `Null`, whitespace-only strings, zero-cardinality
    /// collections, `false`, and numeric zero. Everything else passes.
    pub fn not_empty(self) -> Result<Self, ValidationFailure> {
        let message = match &self.value {
            Value::Null => Some("expected non-empty value, got null"),
            Value::String(text) if text.trim().is_empty() => Some("expected non-empty string"),
            Value::Array(items) if items.is_empty() => Some("expected non-empty array"),
            Value::Object(entries) if entries.is_empty() => Some("expected non-empty object"),
            Value::Bool(false) => Some("expected non-empty value, got false"),
            Value::Number(number) if is_zero(number) => Some("expected non-empty value, got 0"),
            _ => None,
        };
        match message {
            Some(message) => Err(self.fail(message.to_string(), Rule::NotEmpty)),
            None => Ok(self),
        }
    }

    /// Fails unless the wrapped value structurally equals `expected`.
    pub fn equals(self, expected: impl Into<Value>) -> Result<Self, ValidationFailure> {
        let expected = expected.into();
        if self.value != expected {
            let message = format!("expected {expected}, got {}", self.value);
            return Err(self.fail(message, Rule::Equals));
        }
        Ok(self)
    }

    /// Fails unless the wrapped value has the expected kind.
    pub fn is_type(self, expected: ValueKind) -> Result<Self, ValidationFailure> {
        if !expected.matches(&self.value) {
            let message = format!(
                "expected type {}, got {}",
                expected.as_str(),
                ValueKind::of(&self.value).as_str()
            );
            return Err(self.fail(message, Rule::IsType));
        }
        Ok(self)
    }

    /// Fails unless the predicate holds, described as "custom predicate".
    pub fn satisfies<F>(self, predicate: F) -> Result<Self, ValidationFailure>
    where
        F: FnOnce(&Value) -> bool,
    {
        self.satisfies_as(predicate, "custom predicate")
    }

    /// Fails unless the predicate holds, with an explicit description in the
    /// failure message.
    pub fn satisfies_as<F>(self, predicate: F, description: &str) -> Result<Self, ValidationFailure>
    where
        F: FnOnce(&Value) -> bool,
    {
        if !predicate(&self.value) {
            let message = format!("value did not satisfy {description}");
            return Err(self.fail(message, Rule::Satisfies));
        }
        Ok(self)
    }

    /// Fallible-predicate form: a predicate error is wrapped as the cause of
    /// a `satisfies`-tagged failure whose message carries the error text.
    pub fn try_satisfies<F>(self, predicate: F, description: &str) -> Result<Self, ValidationFailure>
    where
        F: FnOnce(&Value) -> Result<bool, BoxedError>,
    {
        match predicate(&self.value) {
            Ok(true) => Ok(self),
            Ok(false) => {
                let message = format!("value did not satisfy {description}");
                Err(self.fail(message, Rule::Satisfies))
            }
            Err(error) => {
                let message = format!("predicate '{description}' failed: {error}");
                Err(self.fail_with(message, Rule::Satisfies, error))
            }
        }
    }

    /// The originally wrapped value, unchanged.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    fn compile_pattern(
        self,
        pattern: Pattern,
        rule: Rule,
    ) -> Result<(Self, Regex), ValidationFailure> {
        match pattern.compile() {
            Ok(regex) => Ok((self, regex)),
            Err(error) => {
                let message = format!("invalid regex pattern: {error}");
                Err(self.fail_with(message, rule, Box::new(error)))
            }
        }
    }

    fn fail(self, message: String, rule: Rule) -> ValidationFailure {
        ValidationFailure::new(message, self.value, rule)
    }

    fn fail_with(self, message: String, rule: Rule, cause: BoxedError) -> ValidationFailure {
        ValidationFailure::with_cause(message, self.value, rule, cause)
    }
}

fn render_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn is_zero(number: &serde_json::Number) -> bool {
    number.as_i64() == Some(0) || number.as_u64() == Some(0) || number.as_f64() == Some(0.0)
}
