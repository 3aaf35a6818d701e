//! Wall clocks implementing [`Clock`].

use chrono::{DateTime, FixedOffset, Offset, Utc};
use dosecalc_core::traits::Clock;

/// System time viewed in one fixed UTC offset.
#[derive(Debug, Clone)]
pub struct FixedOffsetClock {
    offset: FixedOffset,
    name: String,
}

impl FixedOffsetClock {
    /// `None` if `hours` is not a valid offset.
    pub fn from_hours(hours: i32, name: impl Into<String>) -> Option<Self> {
        FixedOffset::east_opt(hours * 3600).map(|offset| Self {
            offset,
            name: name.into(),
        })
    }

    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
            name: "UTC".to_string(),
        }
    }

    pub fn offset_seconds(&self) -> i32 {
        self.offset.local_minus_utc()
    }
}

impl Clock for FixedOffsetClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }

    fn zone_name(&self) -> &str {
        &self.name
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone)]
pub struct FrozenClock {
    at: DateTime<FixedOffset>,
    name: String,
}

impl FrozenClock {
    pub fn new(at: DateTime<FixedOffset>, name: impl Into<String>) -> Self {
        Self { at, name: name.into() }
    }
}

impl Clock for FrozenClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.at
    }

    fn zone_name(&self) -> &str {
        &self.name
    }
}
