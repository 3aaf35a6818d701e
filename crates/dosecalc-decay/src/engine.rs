//! Decay engine implementing the [`DoseCalculator`] trait.
//!
//! Evaluates the decay law between two times of day and derives the
//! concentration and draw volume from the decayed activity. Half-lives come
//! from a shared [`NuclideTable`] fixed at construction.

use std::sync::Arc;

use dosecalc_core::constants::MINUTES_PER_DAY;
use dosecalc_core::error::CalcError;
use dosecalc_core::nuclide::NuclideTable;
use dosecalc_core::traits::DoseCalculator;
use dosecalc_core::types::{CalculationRequest, CalculationResult, TimeOfDay};
use tracing::{debug, warn};

/// The production dose calculator.
#[derive(Debug, Clone)]
pub struct DecayEngine {
    nuclides: Arc<NuclideTable>,
}

impl DecayEngine {
    pub fn new(nuclides: Arc<NuclideTable>) -> Self {
        Self { nuclides }
    }

    /// Half-life for `code`, logging when the default policy is applied.
    fn resolve_half_life(&self, code: &str) -> f64 {
        match self.nuclides.get(code) {
            Some(n) => n.half_life_minutes,
            None => {
                let fallback = self.nuclides.default_half_life_minutes();
                warn!(nuclide = %code, fallback_half_life = fallback, "Unknown nuclide, using default half-life");
                fallback
            }
        }
    }
}

impl Default for DecayEngine {
    fn default() -> Self {
        Self::new(Arc::new(NuclideTable::builtin()))
    }
}

/// `numerator / denominator`, or 0 when the denominator is not positive.
fn safe_divide(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

impl DoseCalculator for DecayEngine {
    fn elapsed_minutes(&self, init: TimeOfDay, target: TimeOfDay) -> f64 {
        let diff = target.minutes_since_midnight() - init.minutes_since_midnight();
        if diff < 0.0 { diff + MINUTES_PER_DAY } else { diff }
    }

    fn decayed_activity(&self, initial_activity: f64, elapsed_minutes: f64, half_life_minutes: f64) -> f64 {
        initial_activity * 0.5f64.powf(elapsed_minutes / half_life_minutes)
    }

    fn concentration(&self, activity: f64, volume: f64) -> f64 {
        safe_divide(activity, volume)
    }

    fn required_volume(&self, desired_dose: f64, concentration: f64) -> f64 {
        safe_divide(desired_dose, concentration)
    }

    fn calculate(&self, request: &CalculationRequest) -> Result<CalculationResult, CalcError> {
        let Some(desired_dose) = request.desired_dose else {
            return Ok(CalculationResult::zero());
        };

        let half_life = self.resolve_half_life(&request.nuclide);
        let elapsed = self.elapsed_minutes(request.init_time, request.target_time);
        let activity = self.decayed_activity(request.init_activity, elapsed, half_life);
        let concentration = self.concentration(activity, request.init_volume);
        let volume = self.required_volume(desired_dose, concentration);

        debug!(
            nuclide = %request.nuclide,
            elapsed_minutes = elapsed,
            current_activity = activity,
            required_volume = volume,
            "Dose calculated"
        );

        for (field, value) in [
            ("current_activity", activity),
            ("current_concentration", concentration),
            ("required_volume", volume),
        ] {
            if !value.is_finite() {
                warn!(field, value, "Calculation overflowed");
                return Err(CalcError::NonFiniteResult { field });
            }
        }

        // Rounded only here; intermediate values keep full precision.
        Ok(CalculationResult {
            current_activity: activity,
            current_concentration: concentration,
            required_volume: volume,
            elapsed_minutes: elapsed,
        }
        .rounded())
    }
}
