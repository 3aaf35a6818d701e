//! Property tests over the form-to-result path.
//!
//! These go through `CalculationForm` exactly as the HTTP layer does, so the
//! parsing, defaulting and rounding rules are covered together.

use dosecalc_core::traits::DoseCalculator;
use dosecalc_core::types::{CalculationForm, CalculationResult, NumberField};
use dosecalc_decay::DecayEngine;
use proptest::prelude::*;

fn hhmm(h: u32, m: u32) -> String {
    format!("{h:02}:{m:02}")
}

fn form(nuclide: &str, init: String, target: String, activity: f64, volume: f64, dose: f64) -> CalculationForm {
    CalculationForm {
        nuclide: Some(nuclide.to_string()),
        init_time: Some(init),
        target_time: Some(target),
        init_activity: Some(NumberField::Text(activity.to_string())),
        init_volume: Some(NumberField::Text(volume.to_string())),
        desired_dose: Some(NumberField::Text(dose.to_string())),
    }
}

proptest! {
    /// With no dose, nothing else in the form matters.
    #[test]
    fn blank_dose_ignores_everything_else(
        nuclide in ".{0,8}",
        init in ".{0,8}",
        target in ".{0,8}",
        activity in ".{0,8}",
        volume in ".{0,8}",
        blank in "[ \t]{0,3}",
    ) {
        let f = CalculationForm {
            nuclide: Some(nuclide),
            init_time: Some(init),
            target_time: Some(target),
            init_activity: Some(NumberField::Text(activity)),
            init_volume: Some(NumberField::Text(volume)),
            desired_dose: Some(NumberField::Text(blank)),
        };
        prop_assert_eq!(DecayEngine::default().evaluate(&f).unwrap(), CalculationResult::zero());
    }

    /// Outputs are non-negative and the activity never grows.
    #[test]
    fn outputs_are_bounded(
        h1 in 0u32..24, m1 in 0u32..60,
        h2 in 0u32..24, m2 in 0u32..60,
        activity in 0.0f64..5_000.0,
        volume in 0.0f64..100.0,
        dose in 0.01f64..100.0,
        c11 in any::<bool>(),
    ) {
        let nuclide = if c11 { "C11" } else { "F18" };
        let f = form(nuclide, hhmm(h1, m1), hhmm(h2, m2), activity, volume, dose);
        let r = DecayEngine::default().evaluate(&f).unwrap();
        prop_assert!(r.current_activity >= 0.0);
        prop_assert!(r.current_activity <= activity + 0.005);
        prop_assert!(r.current_concentration >= 0.0);
        prop_assert!(r.required_volume >= 0.0);
        prop_assert!((0.0..1440.0).contains(&r.elapsed_minutes));
    }

    /// Outputs carry at most their reporting precision.
    #[test]
    fn outputs_are_rounded(
        activity in 1.0f64..5_000.0,
        volume in 0.5f64..100.0,
        dose in 0.01f64..100.0,
        m in 0u32..60,
    ) {
        let f = form("F18", "07:00".into(), hhmm(8, m), activity, volume, dose);
        let r = DecayEngine::default().evaluate(&f).unwrap();
        let on_grid = |v: f64, dp: i32| {
            let scaled = v * 10f64.powi(dp);
            (scaled - scaled.round()).abs() < 1e-6
        };
        prop_assert!(on_grid(r.current_activity, 2));
        prop_assert!(on_grid(r.current_concentration, 3));
        prop_assert!(on_grid(r.required_volume, 3));
        prop_assert!(on_grid(r.elapsed_minutes, 1));
    }

    /// Negative quantities are rejected, never computed.
    #[test]
    fn negative_inputs_rejected(v in 0.001f64..1_000.0) {
        let f = form("F18", "07:00".into(), "07:30".into(), -v, 10.0, 1.0);
        prop_assert!(DecayEngine::default().evaluate(&f).is_err());
    }
}
