//! Geometric ladder search for the minimum drive current.
//!
//! Trial currents grow by a fixed factor until a run beats the target exit
//! velocity. Underpowered trials, including ones that stall outright, are
//! expected on the low rungs and escalate; every other failure aborts the
//! search.

use crate::error::SimError;
use crate::integrator::{simulate, EulerSettings, ModelKind};
use crate::railgun::Railgun;
use log::debug;
use serde::{Deserialize, Serialize};

/// Conventional growth factor between consecutive trial currents.
pub const GROWTH_FACTOR: f64 = 1.01;

/// Default ladder length before the search gives up.
pub const MAX_TRIALS: usize = 4_000;

/// Ladder parameters for [`find_minimum_current`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SearchSettings {
    /// First trial current (A).
    pub initial_current: f64,
    /// Exit velocity a winning run must exceed (m/s).
    pub target_velocity: f64,
    /// Multiplier between consecutive trials; must be greater than one.
    pub growth_factor: f64,
    /// Give up with `SearchExhausted` after this many trials.
    pub max_trials: usize,
}

impl SearchSettings {
    /// Ladder with the conventional 1 % growth and the default trial cap.
    pub fn new(initial_current: f64, target_velocity: f64) -> Self {
        Self {
            initial_current,
            target_velocity,
            growth_factor: GROWTH_FACTOR,
            max_trials: MAX_TRIALS,
        }
    }
}

/// The winning rung of the ladder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Smallest tested current whose run beat the target (A).
    pub required_current: f64,
    /// Exit velocity of the winning run (m/s).
    pub achieved_velocity: f64,
    /// Loop current at exit for the winning run (A).
    pub exit_current: f64,
    /// Simulated flight time of the winning run (s).
    pub elapsed_time: f64,
    /// Trials spent, winner included.
    pub trials: usize,
}

/// Walks the trial ladder until a run exceeds the target exit velocity.
///
/// Reports the succeeding trial itself, not the rung above or below it.
/// Only the most recent run's outcome is held at any point; no per-trial
/// history accumulates.
pub fn find_minimum_current(
    railgun: &Railgun,
    settings: &EulerSettings,
    search: &SearchSettings,
    model: ModelKind,
) -> Result<SearchResult, SimError> {
    if !(search.initial_current.is_finite() && search.initial_current > 0.0) {
        return Err(SimError::InvalidParameter {
            name: "initial_current",
            value: search.initial_current,
        });
    }
    if !(search.target_velocity.is_finite() && search.target_velocity > 0.0) {
        return Err(SimError::InvalidParameter {
            name: "target_velocity",
            value: search.target_velocity,
        });
    }
    if !(search.growth_factor.is_finite() && search.growth_factor > 1.0) {
        return Err(SimError::InvalidParameter {
            name: "growth_factor",
            value: search.growth_factor,
        });
    }
    if search.max_trials == 0 {
        return Err(SimError::InvalidParameter {
            name: "max_trials",
            value: 0.0,
        });
    }

    let mut trial_current = search.initial_current;
    for trial in 1..=search.max_trials {
        match simulate(railgun, settings, trial_current, model) {
            Ok(run) if run.exit_velocity > search.target_velocity => {
                debug!(
                    "trial {trial}: {trial_current} A exits at {} m/s, beats target {} m/s",
                    run.exit_velocity, search.target_velocity
                );
                return Ok(SearchResult {
                    required_current: trial_current,
                    achieved_velocity: run.exit_velocity,
                    exit_current: run.exit_current,
                    elapsed_time: run.elapsed_time,
                    trials: trial,
                });
            }
            Ok(run) => {
                debug!(
                    "trial {trial}: {trial_current} A exits at {} m/s, short of {} m/s",
                    run.exit_velocity, search.target_velocity
                );
            }
            Err(SimError::NonTerminatingRun { steps, .. }) => {
                debug!("trial {trial}: {trial_current} A stalled after {steps} steps");
            }
            Err(err) => return Err(err),
        }
        trial_current *= search.growth_factor;
    }

    Err(SimError::SearchExhausted {
        trials: search.max_trials,
        last_current: trial_current / search.growth_factor,
    })
}
