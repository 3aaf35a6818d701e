//! Error types for the dose calculator.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NuclideError {
    #[error("nuclide table is empty")] EmptyTable,
    #[error("duplicate nuclide code: {0}")] DuplicateCode(String),
    #[error("invalid half-life for {code}: {half_life} min")] InvalidHalfLife { code: String, half_life: String },
}

/// Bad-input errors raised while turning a submitted form into a request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("time data {value:?} does not match format HH:MM")] InvalidTime { value: String },
    #[error("could not convert {field} to a number: {value:?}")] InvalidNumber { field: &'static str, value: String },
    #[error("{field} must not be negative: {value}")] NegativeValue { field: &'static str, value: f64 },
    #[error("{field} must be a finite number")] NonFiniteValue { field: &'static str },
    #[error("{field} is out of range for these inputs")] NonFiniteResult { field: &'static str },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("snapshot io: {0}")] Io(String),
    #[error("snapshot serialization: {0}")] Serialization(String),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}
