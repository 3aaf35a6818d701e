//! Calculator constants. Activities and volumes are unit-agnostic; the web UI
//! labels them mCi and mL.

/// Minutes in one calendar day, used for the midnight rollover.
pub const MINUTES_PER_DAY: f64 = 1440.0;

/// F-18 half-life in minutes.
pub const F18_HALF_LIFE_MINUTES: f64 = 109.7;

/// C-11 half-life in minutes.
pub const C11_HALF_LIFE_MINUTES: f64 = 20.3;

// Form defaults applied when a field is absent from the request body.
pub const DEFAULT_NUCLIDE: &str = "F18";
pub const DEFAULT_INIT_TIME: &str = "07:00";
pub const DEFAULT_TARGET_TIME: &str = "07:30";
pub const DEFAULT_INIT_ACTIVITY: f64 = 0.0;
pub const DEFAULT_INIT_VOLUME: f64 = 0.0;

/// Decimal places kept on each reported output.
pub const ACTIVITY_DECIMALS: i32 = 2;
pub const CONCENTRATION_DECIMALS: i32 = 3;
pub const VOLUME_DECIMALS: i32 = 3;
pub const ELAPSED_DECIMALS: i32 = 1;

/// Zone reported by the current-time endpoint unless overridden.
pub const DEFAULT_TZ_NAME: &str = "Asia/Shanghai";

/// UTC offset of [`DEFAULT_TZ_NAME`], in hours.
pub const DEFAULT_TZ_OFFSET_HOURS: i32 = 8;
