//! Request, result and wire types.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::constants::{
    ACTIVITY_DECIMALS, CONCENTRATION_DECIMALS, DEFAULT_INIT_ACTIVITY, DEFAULT_INIT_TIME,
    DEFAULT_INIT_VOLUME, DEFAULT_NUCLIDE, DEFAULT_TARGET_TIME, ELAPSED_DECIMALS, VOLUME_DECIMALS,
};
use crate::error::CalcError;

// ---------------------------------------------------------------------------
// TimeOfDay
// ---------------------------------------------------------------------------

/// A wall-clock time with no date, parsed from `HH:MM` or `HH:MM:SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    pub fn from_hms(hour: u32, min: u32, sec: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, min, sec).map(Self)
    }

    /// Minutes since 00:00, fractional when seconds are present.
    pub fn minutes_since_midnight(&self) -> f64 {
        self.0.num_seconds_from_midnight() as f64 / 60.0
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(t: NaiveTime) -> Self {
        Self(t)
    }
}

impl FromStr for TimeOfDay {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
            .map(Self)
            .map_err(|_| CalcError::InvalidTime {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.second() == 0 {
            write!(f, "{}", self.0.format("%H:%M"))
        } else {
            write!(f, "{}", self.0.format("%H:%M:%S"))
        }
    }
}

// ---------------------------------------------------------------------------
// Wire form
// ---------------------------------------------------------------------------

/// A numeric form field. Browsers post numeric strings; scripted clients
/// often post plain JSON numbers. Both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberField {
    Number(f64),
    Text(String),
}

impl NumberField {
    /// Empty for the purpose of the "nothing to compute" check.
    ///
    /// A numeric zero counts as empty, a string `"0"` does not.
    pub fn is_blank(&self) -> bool {
        match self {
            NumberField::Number(v) => *v == 0.0,
            NumberField::Text(s) => s.trim().is_empty(),
        }
    }

    /// Parse as a finite, non-negative quantity.
    pub fn to_quantity(&self, field: &'static str) -> Result<f64, CalcError> {
        let value = match self {
            NumberField::Number(v) => *v,
            NumberField::Text(s) => {
                s.trim()
                    .parse::<f64>()
                    .map_err(|_| CalcError::InvalidNumber {
                        field,
                        value: s.clone(),
                    })?
            }
        };
        if !value.is_finite() {
            return Err(CalcError::NonFiniteValue { field });
        }
        if value < 0.0 {
            return Err(CalcError::NegativeValue { field, value });
        }
        Ok(value)
    }

    /// Flat string form, as stored in an [`InputSnapshot`].
    pub fn as_text(&self) -> String {
        match self {
            NumberField::Number(v) => v.to_string(),
            NumberField::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for NumberField {
    fn from(v: f64) -> Self {
        NumberField::Number(v)
    }
}

impl From<&str> for NumberField {
    fn from(s: &str) -> Self {
        NumberField::Text(s.to_string())
    }
}

/// The body of a calculation request as submitted. Every field is optional;
/// a JSON `null` is the same as leaving the field out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationForm {
    pub nuclide: Option<String>,
    pub init_time: Option<String>,
    pub target_time: Option<String>,
    pub init_activity: Option<NumberField>,
    pub init_volume: Option<NumberField>,
    pub desired_dose: Option<NumberField>,
}

impl CalculationForm {
    /// Whether a desired dose was supplied. Without one there is nothing to compute.
    pub fn has_desired_dose(&self) -> bool {
        self.desired_dose.as_ref().is_some_and(|d| !d.is_blank())
    }

    /// Apply defaults and parse every field.
    pub fn to_request(&self) -> Result<CalculationRequest, CalcError> {
        let nuclide = self
            .nuclide
            .clone()
            .unwrap_or_else(|| DEFAULT_NUCLIDE.to_string());
        let init_time = self.init_time.as_deref().unwrap_or(DEFAULT_INIT_TIME).parse()?;
        let target_time = self
            .target_time
            .as_deref()
            .unwrap_or(DEFAULT_TARGET_TIME)
            .parse()?;
        let init_activity = match &self.init_activity {
            Some(f) => f.to_quantity("init_activity")?,
            None => DEFAULT_INIT_ACTIVITY,
        };
        let init_volume = match &self.init_volume {
            Some(f) => f.to_quantity("init_volume")?,
            None => DEFAULT_INIT_VOLUME,
        };
        let desired_dose = match &self.desired_dose {
            Some(f) if !f.is_blank() => Some(f.to_quantity("desired_dose")?),
            _ => None,
        };

        Ok(CalculationRequest {
            nuclide,
            init_time,
            target_time,
            init_activity,
            init_volume,
            desired_dose,
        })
    }
}

// ---------------------------------------------------------------------------
// Request / result
// ---------------------------------------------------------------------------

/// A fully parsed calculation request.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationRequest {
    pub nuclide: String,
    pub init_time: TimeOfDay,
    pub target_time: TimeOfDay,
    /// Activity measured at `init_time`.
    pub init_activity: f64,
    /// Volume the initial activity is dissolved in.
    pub init_volume: f64,
    /// Dose to draw at `target_time`. `None` means nothing was requested.
    pub desired_dose: Option<f64>,
}

/// Outputs of one calculation, rounded for display.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CalculationResult {
    pub current_activity: f64,
    pub current_concentration: f64,
    pub required_volume: f64,
    pub elapsed_minutes: f64,
}

impl CalculationResult {
    /// The "nothing to compute yet" result.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Round each field to its reporting precision.
    pub fn rounded(self) -> Self {
        Self {
            current_activity: round_dp(self.current_activity, ACTIVITY_DECIMALS),
            current_concentration: round_dp(self.current_concentration, CONCENTRATION_DECIMALS),
            required_volume: round_dp(self.required_volume, VOLUME_DECIMALS),
            elapsed_minutes: round_dp(self.elapsed_minutes, ELAPSED_DECIMALS),
        }
    }
}

/// Round to `decimals` places on the exact binary value, ties to even.
///
/// Values too large to scale are returned unchanged.
pub fn round_dp(value: f64, decimals: i32) -> f64 {
    if !(value * 10f64.powi(decimals)).is_finite() {
        return value;
    }
    let places = decimals.max(0) as usize;
    format!("{value:.places$}").parse().unwrap_or(value)
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Flat record of the last submitted form, used to prefill the web UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nuclide: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_activity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_volume: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_dose: Option<String>,
    /// RFC 3339 time the snapshot was taken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,
}

impl InputSnapshot {
    pub fn from_form(form: &CalculationForm, saved_at: impl Into<String>) -> Self {
        Self {
            nuclide: form.nuclide.clone(),
            init_time: form.init_time.clone(),
            target_time: form.target_time.clone(),
            init_activity: form.init_activity.as_ref().map(NumberField::as_text),
            init_volume: form.init_volume.as_ref().map(NumberField::as_text),
            desired_dose: form.desired_dose.as_ref().map(NumberField::as_text),
            saved_at: Some(saved_at.into()),
        }
    }
}
