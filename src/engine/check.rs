use std::fmt;

use serde_json::Value;

use crate::domain::error::{BoxedError, CheckError, ValidationFailure};
use crate::domain::rules::{Pattern, Patterns};
use crate::engine::expectation::Expectation;

type Predicate = Box<dyn Fn(&Value) -> Result<bool, BoxedError> + Send + Sync>;
type FailHandler = Box<dyn Fn(ValidationFailure) -> Value + Send + Sync>;

/// Immutable rule specification applied to a callable's output.
///
/// Rules left unset are skipped. Configured rules run in a fixed order
/// (`not_empty`, `contains`, `not_contains`, `matches`, `not_matches`,
/// `valid_json`, `max_length`, `min_length`, `satisfies`), short-circuiting
/// at the first failure. A configured-but-empty list passes vacuously.
///
/// ```
/// use evalguard::Check;
/// use serde_json::Value;
///
/// let sql_agent = Check::new()
///     .contains(["SELECT"])
///     .not_contains(["DROP", "DELETE"])
///     .max_length(1000)
///     .wrap(|table: &str| Value::from(format!("SELECT * FROM {table}")));
///
/// assert!(sql_agent("users").is_ok());
/// ```
#[derive(Default)]
pub struct Check {
    not_empty: bool,
    contains: Option<Vec<String>>,
    not_contains: Option<Vec<String>>,
    matches: Option<Vec<Pattern>>,
    not_matches: Option<Vec<Pattern>>,
    valid_json: bool,
    max_length: Option<usize>,
    min_length: Option<usize>,
    satisfies: Option<Predicate>,
    on_fail: Option<FailHandler>,
}

impl Check {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require the output to be non-empty.
    pub fn not_empty(mut self) -> Self {
        self.not_empty = true;
        self
    }

    /// Substrings that must all be present, checked in order.
    pub fn contains<I, S>(mut self, substrings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.contains = Some(substrings.into_iter().map(Into::into).collect());
        self
    }

    /// Substrings that must all be absent, checked in order.
    pub fn not_contains<I, S>(mut self, substrings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.not_contains = Some(substrings.into_iter().map(Into::into).collect());
        self
    }

    /// Pattern or patterns that must all match.
    pub fn matches(mut self, patterns: impl Into<Patterns>) -> Self {
        self.matches = Some(patterns.into().0);
        self
    }

    /// Pattern or patterns that must all fail to match.
    pub fn not_matches(mut self, patterns: impl Into<Patterns>) -> Self {
        self.not_matches = Some(patterns.into().0);
        self
    }

    /// Require the output to parse as well-formed JSON.
    pub fn valid_json(mut self) -> Self {
        self.valid_json = true;
        self
    }

    pub fn max_length(mut self, limit: usize) -> Self {
        self.max_length = Some(limit);
        self
    }

    pub fn min_length(mut self, limit: usize) -> Self {
        self.min_length = Some(limit);
        self
    }

    /// Custom predicate over the output value.
    pub fn satisfies<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.satisfies = Some(Box::new(move |value| Ok(predicate(value))));
        self
    }

    /// Fallible custom predicate; its error becomes the failure cause.
    pub fn try_satisfies<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Value) -> Result<bool, BoxedError> + Send + Sync + 'static,
    {
        self.satisfies = Some(Box::new(predicate));
        self
    }

    /// Handler invoked with the failure instead of propagating it; the
    /// handler's return value becomes the result and the candidate value is
    /// discarded.
    pub fn on_fail<F>(mut self, handler: F) -> Self
    where
        F: Fn(ValidationFailure) -> Value + Send + Sync + 'static,
    {
        self.on_fail = Some(Box::new(handler));
        self
    }

    /// Runs the configured rules against `candidate`.
    ///
    /// Returns the candidate unchanged when every rule passes. On the first
    /// failure the `on_fail` handler, when configured, supplies the result
    /// instead; otherwise the failure propagates.
    pub fn apply(&self, candidate: Value) -> Result<Value, ValidationFailure> {
        match self.evaluate(candidate) {
            Ok(expectation) => Ok(expectation.into_value()),
            Err(failure) => match &self.on_fail {
                Some(handler) => Ok(handler(failure)),
                None => Err(failure),
            },
        }
    }

    /// Wraps an infallible callable; the wrapper forwards its argument,
    /// validates the returned value, and yields it unchanged on success.
    pub fn wrap<A, F>(self, callable: F) -> impl Fn(A) -> Result<Value, ValidationFailure>
    where
        F: Fn(A) -> Value,
    {
        move |args| self.apply(callable(args))
    }

    /// Wraps a fallible callable. The callable's own error propagates
    /// unmodified as [`CheckError::Call`] with no rule evaluation; rules run
    /// only on a successful return.
    pub fn wrap_fallible<A, E, F>(self, callable: F) -> impl Fn(A) -> Result<Value, CheckError<E>>
    where
        F: Fn(A) -> Result<Value, E>,
    {
        move |args| match callable(args) {
            Ok(candidate) => self.apply(candidate).map_err(CheckError::Validation),
            Err(error) => Err(CheckError::Call(error)),
        }
    }

    fn evaluate(&self, candidate: Value) -> Result<Expectation, ValidationFailure> {
        let mut expectation = Expectation::new(candidate);

        if self.not_empty {
            expectation = expectation.not_empty()?;
        }
        if let Some(substrings) = &self.contains {
            for substring in substrings {
                expectation = expectation.contains(substring)?;
            }
        }
        if let Some(substrings) = &self.not_contains {
            for substring in substrings {
                expectation = expectation.not_contains(substring)?;
            }
        }
        if let Some(patterns) = &self.matches {
            for pattern in patterns {
                expectation = expectation.matches(pattern.clone())?;
            }
        }
        if let Some(patterns) = &self.not_matches {
            for pattern in patterns {
                expectation = expectation.not_matches(pattern.clone())?;
            }
        }
        if self.valid_json {
            expectation = expectation.valid_json()?;
        }
        if let Some(limit) = self.max_length {
            expectation = expectation.max_length(limit)?;
        }
        if let Some(limit) = self.min_length {
            expectation = expectation.min_length(limit)?;
        }
        if let Some(predicate) = &self.satisfies {
            expectation = expectation.try_satisfies(|value| predicate(value), "custom check")?;
        }

        Ok(expectation)
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Check")
            .field("not_empty", &self.not_empty)
            .field("contains", &self.contains)
            .field("not_contains", &self.not_contains)
            .field("matches", &self.matches)
            .field("not_matches", &self.not_matches)
            .field("valid_json", &self.valid_json)
            .field("max_length", &self.max_length)
            .field("min_length", &self.min_length)
            .field("satisfies", &self.satisfies.is_some())
            .field("on_fail", &self.on_fail.is_some())
            .finish()
    }
}
