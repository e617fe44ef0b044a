//! Fluent validation for automated agent outputs.
//!
//! Two entry points over one fixed rule set:
//! - [`expect`] wraps a single value in an [`Expectation`] for immediate,
//!   chainable rule evaluation.
//! - [`Check`] holds an immutable rule specification and wraps callables so
//!   their return values are validated on every invocation, optionally
//!   diverting to a fallback handler on failure.
//!
//! Every rule failure surfaces as the same structured [`ValidationFailure`];
//! regex compile errors, JSON parse errors, and predicate errors are wrapped
//! with the original preserved as the cause.

pub mod domain;
pub mod engine;

pub use domain::error::{BoxedError, CheckError, Rule, ValidationFailure};
pub use domain::rules::{Pattern, Patterns, ValueKind};
pub use engine::check::Check;
pub use engine::expectation::{Expectation, expect};
