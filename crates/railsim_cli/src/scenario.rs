//! Scenario files: JSON descriptions of a launcher and the work to do
//! with it. Either section may be omitted; physics defaults come from
//! the core crate.

use railsim_core::integrator::{EulerSettings, ModelKind};
use railsim_core::railgun::Railgun;
use railsim_core::search::{SearchSettings, GROWTH_FACTOR, MAX_TRIALS};
use serde::{Deserialize, Serialize};

/// Search section of a scenario file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SearchScenario {
    pub initial_current: f64,
    pub target_velocity: f64,
    #[serde(default = "default_growth_factor")]
    pub growth_factor: f64,
    #[serde(default = "default_max_trials")]
    pub max_trials: usize,
}

fn default_growth_factor() -> f64 {
    GROWTH_FACTOR
}

fn default_max_trials() -> usize {
    MAX_TRIALS
}

impl From<SearchScenario> for SearchSettings {
    fn from(section: SearchScenario) -> Self {
        Self {
            initial_current: section.initial_current,
            target_velocity: section.target_velocity,
            growth_factor: section.growth_factor,
            max_trials: section.max_trials,
        }
    }
}

/// A complete scenario: one launcher, one model, an optional single shot
/// and an optional current search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub railgun: Railgun,
    #[serde(default)]
    pub euler: EulerSettings,
    #[serde(default)]
    pub model: ModelKind,
    #[serde(default)]
    pub drive_current: Option<f64>,
    /// Record the trajectory every this many steps during the single shot.
    #[serde(default)]
    pub sample_stride: Option<usize>,
    #[serde(default)]
    pub search: Option<SearchScenario>,
}

impl Scenario {
    /// The canonical 10 m, 1 kg launcher: one 10 kA shot plus the search
    /// for the current that reaches 2733 m/s.
    pub fn reference() -> Self {
        Self {
            railgun: Railgun::new(0.15, 0.1, 10.0, 1.0),
            euler: EulerSettings::default(),
            model: ModelKind::Bare,
            drive_current: Some(1.0e4),
            sample_stride: None,
            search: Some(SearchScenario {
                initial_current: 1.0e5,
                target_velocity: 2733.0,
                growth_factor: GROWTH_FACTOR,
                max_trials: MAX_TRIALS,
            }),
        }
    }
}
