pub mod check;
pub mod expectation;
