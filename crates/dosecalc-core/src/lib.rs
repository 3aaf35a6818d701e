//! # dosecalc-core
//! Foundation types and traits for the radiotracer dose calculator.
//!
//! - [`nuclide::NuclideTable`] — immutable nuclide/half-life table
//! - [`types`] — request, result, wire form and snapshot types
//! - [`traits`] — the calculator, storage and clock seams
//! - [`error`] — error enums shared across crates

pub mod constants;
pub mod error;
pub mod nuclide;
pub mod traits;
pub mod types;

pub use error::{CalcError, NuclideError, StoreError};
pub use nuclide::{Nuclide, NuclideTable};
pub use types::{CalculationForm, CalculationRequest, CalculationResult, InputSnapshot, TimeOfDay};
