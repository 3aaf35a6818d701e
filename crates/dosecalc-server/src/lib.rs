//! # dosecalc-server — HTTP service around the decay engine.
//!
//! - [`routes::router`] — Axum router: calculation, nuclides, clock, health
//! - [`config::Config`] — environment-driven configuration
//! - [`storage`] — [`SnapshotStore`] implementations for the last submitted form
//! - [`clock::FixedOffsetClock`] — wall clock pinned to one UTC offset

use std::sync::Arc;

use dosecalc_core::nuclide::NuclideTable;
use dosecalc_core::traits::{Clock, DoseCalculator, SnapshotStore};
use dosecalc_decay::DecayEngine;

pub mod clock;
pub mod config;
pub mod routes;
pub mod storage;

pub use clock::FixedOffsetClock;
pub use config::Config;
pub use routes::router;
pub use storage::{FileSnapshotStore, MemorySnapshotStore};

/// Shared application state passed to every Axum handler.
#[derive(Clone)]
pub struct AppState {
    /// Decay and dose math.
    pub calculator: Arc<dyn DoseCalculator>,
    /// Nuclide table the calculator was built with (served by `/api/nuclides`).
    pub nuclides: Arc<NuclideTable>,
    /// Source of the current time for `/api/current-time` and `/health`.
    pub clock: Arc<dyn Clock>,
    /// Last-input storage; `None` when persistence is disabled.
    pub store: Option<Arc<dyn SnapshotStore>>,
}

impl AppState {
    /// Wire the production components described by `config`.
    pub fn from_config(config: &Config) -> Self {
        let nuclides = Arc::new(NuclideTable::builtin());
        let store: Option<Arc<dyn SnapshotStore>> = if config.persist {
            Some(Arc::new(FileSnapshotStore::new(config.data_file.clone())))
        } else {
            None
        };
        Self {
            calculator: Arc::new(DecayEngine::new(nuclides.clone())),
            nuclides,
            clock: Arc::new(config.clock()),
            store,
        }
    }
}
