//! Nuclide lookup table.
//!
//! The table is built once at startup and shared immutably (usually behind an
//! `Arc`). Lookups for codes that are not in the table resolve to the first
//! entry's half-life through [`NuclideTable::default_half_life_minutes`].

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::constants::{C11_HALF_LIFE_MINUTES, F18_HALF_LIFE_MINUTES};
use crate::error::NuclideError;

/// A radionuclide the calculator knows the half-life of.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nuclide {
    /// Short code used on the wire, e.g. `F18`.
    pub code: String,
    /// Human-readable label, e.g. `F-18 (FDG)`.
    pub name: String,
    /// Physical half-life in minutes. Always finite and positive.
    pub half_life_minutes: f64,
}

impl Nuclide {
    pub fn new(code: impl Into<String>, name: impl Into<String>, half_life_minutes: f64) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            half_life_minutes,
        }
    }
}

/// Ordered, non-empty set of nuclides with unique codes.
#[derive(Debug, Clone, PartialEq)]
pub struct NuclideTable {
    entries: Vec<Nuclide>,
}

impl NuclideTable {
    /// Build a table from explicit entries.
    ///
    /// The first entry becomes the fallback for unknown codes.
    pub fn new(entries: Vec<Nuclide>) -> Result<Self, NuclideError> {
        if entries.is_empty() {
            return Err(NuclideError::EmptyTable);
        }
        let mut seen = HashSet::with_capacity(entries.len());
        for n in &entries {
            if !(n.half_life_minutes.is_finite() && n.half_life_minutes > 0.0) {
                return Err(NuclideError::InvalidHalfLife {
                    code: n.code.clone(),
                    half_life: n.half_life_minutes.to_string(),
                });
            }
            if !seen.insert(n.code.as_str()) {
                return Err(NuclideError::DuplicateCode(n.code.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// The two tracers the radiopharmacy prepares: F-18 first, then C-11.
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                Nuclide::new("F18", "F-18 (FDG)", F18_HALF_LIFE_MINUTES),
                Nuclide::new("C11", "C-11 (Choline)", C11_HALF_LIFE_MINUTES),
            ],
        }
    }

    pub fn get(&self, code: &str) -> Option<&Nuclide> {
        self.entries.iter().find(|n| n.code == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Nuclide> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Half-life applied to codes missing from the table: the first entry's.
    ///
    /// Kept for compatibility with existing clients. Silently mapping an
    /// unknown tracer to F-18 is probably wrong; see DESIGN.md.
    pub fn default_half_life_minutes(&self) -> f64 {
        self.entries[0].half_life_minutes
    }

    /// Half-life for `code`, falling back to [`Self::default_half_life_minutes`].
    pub fn half_life_minutes(&self, code: &str) -> f64 {
        self.get(code)
            .map(|n| n.half_life_minutes)
            .unwrap_or_else(|| self.default_half_life_minutes())
    }

    /// `code -> display name`, as served by the nuclides endpoint.
    pub fn display_names(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|n| (n.code.clone(), n.name.clone()))
            .collect()
    }

    /// `code -> half-life in minutes`.
    pub fn half_lives(&self) -> BTreeMap<String, f64> {
        self.entries
            .iter()
            .map(|n| (n.code.clone(), n.half_life_minutes))
            .collect()
    }
}

impl Default for NuclideTable {
    fn default() -> Self {
        Self::builtin()
    }
}
