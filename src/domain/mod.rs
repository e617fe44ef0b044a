pub mod error;
pub mod rules;
