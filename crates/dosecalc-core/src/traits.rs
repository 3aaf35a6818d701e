//! Trait interfaces between crates.
//!
//! - [`DoseCalculator`] — decay and dose math (dosecalc-decay implements)
//! - [`SnapshotStore`] — best-effort storage of the last submitted form
//! - [`Clock`] — wall-clock time in a fixed, named zone

use chrono::{DateTime, FixedOffset};

use crate::error::{CalcError, StoreError};
use crate::types::{CalculationForm, CalculationRequest, CalculationResult, InputSnapshot, TimeOfDay};

/// Pure decay and dose-volume computation.
///
/// Implementations hold no mutable state; every method is deterministic.
pub trait DoseCalculator: Send + Sync {
    /// Minutes from `init` to `target`. A target earlier than `init` is taken
    /// to be on the following day.
    fn elapsed_minutes(&self, init: TimeOfDay, target: TimeOfDay) -> f64;

    /// Activity left after `elapsed_minutes` of decay.
    fn decayed_activity(&self, initial_activity: f64, elapsed_minutes: f64, half_life_minutes: f64) -> f64;

    /// Activity per unit volume; 0 when `volume` is not positive.
    fn concentration(&self, activity: f64, volume: f64) -> f64;

    /// Volume to draw for `desired_dose`; 0 when `concentration` is not positive.
    fn required_volume(&self, desired_dose: f64, concentration: f64) -> f64;

    /// Full calculation for a parsed request, rounded for reporting.
    ///
    /// Fails with [`CalcError::NonFiniteResult`] when valid inputs overflow
    /// an output (e.g. a vanishingly small volume).
    fn calculate(&self, request: &CalculationRequest) -> Result<CalculationResult, CalcError>;

    /// Calculation for a submitted form.
    ///
    /// Without a desired dose the zero result is returned and no other field
    /// is parsed.
    fn evaluate(&self, form: &CalculationForm) -> Result<CalculationResult, CalcError> {
        if !form.has_desired_dose() {
            return Ok(CalculationResult::zero());
        }
        let request = form.to_request()?;
        self.calculate(&request)
    }
}

/// Storage for the most recent [`InputSnapshot`]. Last write wins.
pub trait SnapshotStore: Send + Sync {
    fn save(&self, snapshot: &InputSnapshot) -> Result<(), StoreError>;

    /// The stored snapshot, or `None` if nothing has been saved yet.
    fn load(&self) -> Result<Option<InputSnapshot>, StoreError>;
}

/// Source of "now" in a fixed UTC offset.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;

    /// Zone label reported alongside times, e.g. `Asia/Shanghai`.
    fn zone_name(&self) -> &str;
}
