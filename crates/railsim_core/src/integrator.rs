//! Fixed-step explicit Euler integration of a single launch.
//!
//! One run owns a fresh [`BarState`] and advances it until the bar clears
//! the muzzle, fails to make progress, or the step cap runs out. The update
//! order inside a step is observable through the reference values in the
//! validation suite and must not be rearranged.

use crate::error::SimError;
use crate::physics::{induced_current, magnetic_force, LOOP_RESISTANCE, STANDARD_GRAVITY};
use crate::railgun::Railgun;
use serde::{Deserialize, Serialize};

/// Which physical effects act on the bar during a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ModelKind {
    /// Magnetic rail force only; the supply holds the current constant.
    Bare,
    /// Adds gravity opposing the launch direction and back-EMF depletion
    /// of the loop current.
    Augmented { gravity: f64, loop_resistance: f64 },
}

impl ModelKind {
    /// The standard augmented variant: 9.8 m/s^2 against a 1 ohm loop.
    pub fn augmented() -> Self {
        ModelKind::Augmented {
            gravity: STANDARD_GRAVITY,
            loop_resistance: LOOP_RESISTANCE,
        }
    }
}

impl Default for ModelKind {
    fn default() -> Self {
        ModelKind::Bare
    }
}

/// Step size and run-length cap for the Euler loop.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EulerSettings {
    /// Fixed timestep in seconds.
    pub dt: f64,
    /// Give up and report the run as non-terminating after this many steps.
    pub max_steps: usize,
}

impl Default for EulerSettings {
    fn default() -> Self {
        Self {
            dt: 1e-5,
            max_steps: 10_000_000,
        }
    }
}

/// Full mutable state of one launch. Built fresh per run; nothing survives
/// between runs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BarState {
    /// Distance from the breech (m).
    pub position: f64,
    /// Velocity toward the muzzle (m/s).
    pub velocity: f64,
    /// Simulated time since launch (s).
    pub time: f64,
    /// Loop current (A); constant in the bare variant.
    pub current: f64,
}

impl BarState {
    /// Bar at rest at the breech with the supply just switched on.
    pub fn at_launch(drive_current: f64) -> Self {
        Self {
            position: 0.0,
            velocity: 0.0,
            time: 0.0,
            current: drive_current,
        }
    }
}

/// Terminal report of a run that reached the muzzle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Bar velocity when it cleared the muzzle (m/s).
    pub exit_velocity: f64,
    /// Loop current at exit (A); equals the drive current in the bare
    /// variant, the depleted current in the augmented one.
    pub exit_current: f64,
    /// Simulated flight time (s).
    pub elapsed_time: f64,
    /// Number of executed steps, exit step included.
    pub steps: usize,
}

/// Trajectory record from [`simulate_sampled`]: one entry per sample, in
/// step order, launch state first and exit state last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunTrace {
    pub times: Vec<f64>,
    pub positions: Vec<f64>,
    pub velocities: Vec<f64>,
    pub currents: Vec<f64>,
    pub result: RunResult,
}

/// Integrates one launch and reports the exit state.
///
/// Fails fast on invalid inputs, reports `NonTerminatingRun` when the bar
/// cannot reach the muzzle (at step zero when it cannot even launch), and
/// `NegativeCurrent` when augmented feedback collapses the loop current
/// within a single step.
pub fn simulate(
    railgun: &Railgun,
    settings: &EulerSettings,
    drive_current: f64,
    model: ModelKind,
) -> Result<RunResult, SimError> {
    run(railgun, settings, drive_current, model, 0).map(|trace| trace.result)
}

/// Same dynamics as [`simulate`], additionally recording the trajectory at
/// launch, every `sample_stride`-th step, and at exit.
pub fn simulate_sampled(
    railgun: &Railgun,
    settings: &EulerSettings,
    drive_current: f64,
    model: ModelKind,
    sample_stride: usize,
) -> Result<RunTrace, SimError> {
    if sample_stride == 0 {
        return Err(SimError::InvalidParameter {
            name: "sample_stride",
            value: 0.0,
        });
    }
    run(railgun, settings, drive_current, model, sample_stride)
}

/// Shared run loop. `sample_stride == 0` disables sampling; the returned
/// trace then carries empty sample vectors.
fn run(
    railgun: &Railgun,
    settings: &EulerSettings,
    drive_current: f64,
    model: ModelKind,
    sample_stride: usize,
) -> Result<RunTrace, SimError> {
    railgun.validate()?;
    if !(settings.dt.is_finite() && settings.dt > 0.0) {
        return Err(SimError::InvalidTimestep { dt: settings.dt });
    }
    if settings.max_steps == 0 {
        return Err(SimError::InvalidParameter {
            name: "max_steps",
            value: 0.0,
        });
    }
    if !(drive_current.is_finite() && drive_current >= 0.0) {
        return Err(SimError::InvalidParameter {
            name: "drive_current",
            value: drive_current,
        });
    }
    if let ModelKind::Augmented {
        gravity,
        loop_resistance,
    } = model
    {
        if !(gravity.is_finite() && gravity >= 0.0) {
            return Err(SimError::InvalidParameter {
                name: "gravity",
                value: gravity,
            });
        }
        if !(loop_resistance.is_finite() && loop_resistance > 0.0) {
            return Err(SimError::InvalidParameter {
                name: "loop_resistance",
                value: loop_resistance,
            });
        }
    }

    // A bar that feels no forward force at rest never launches; report it
    // as non-terminating at step zero instead of spinning down the cap.
    if net_force(railgun, model, drive_current) <= 0.0 {
        return Err(SimError::NonTerminatingRun {
            steps: 0,
            position: 0.0,
            velocity: 0.0,
        });
    }

    let mut state = BarState::at_launch(drive_current);
    let mut times = Vec::new();
    let mut positions = Vec::new();
    let mut velocities = Vec::new();
    let mut currents = Vec::new();
    if sample_stride > 0 {
        times.push(state.time);
        positions.push(state.position);
        velocities.push(state.velocity);
        currents.push(state.current);
    }

    for step in 1..=settings.max_steps {
        if let ModelKind::Augmented {
            loop_resistance, ..
        } = model
        {
            // Integrated back-EMF effect for this step; the unit-resistance
            // convention makes the induced EMF and counter-current
            // numerically interchangeable before the division.
            let induced = induced_current(
                state.current,
                railgun.separation,
                railgun.width,
                railgun.coupling,
                state.velocity,
            );
            state.current += induced / loop_resistance;
            if state.current <= 0.0 {
                return Err(SimError::NegativeCurrent {
                    time: state.time,
                    current: state.current,
                });
            }
        }

        let force = net_force(railgun, model, state.current);
        state.velocity += force / railgun.mass * settings.dt;
        state.position += state.velocity * settings.dt;
        state.time += settings.dt;

        let exited = state.position >= railgun.length;
        if sample_stride > 0 && (exited || step % sample_stride == 0) {
            times.push(state.time);
            positions.push(state.position);
            velocities.push(state.velocity);
            currents.push(state.current);
        }

        if exited {
            return Ok(RunTrace {
                times,
                positions,
                velocities,
                currents,
                result: RunResult {
                    exit_velocity: state.velocity,
                    exit_current: state.current,
                    elapsed_time: state.time,
                    steps: step,
                },
            });
        }
        if state.position < 0.0 {
            // The bar slid back past the breech; only the augmented
            // variant can push it there.
            return Err(SimError::NonTerminatingRun {
                steps: step,
                position: state.position,
                velocity: state.velocity,
            });
        }
    }

    Err(SimError::NonTerminatingRun {
        steps: settings.max_steps,
        position: state.position,
        velocity: state.velocity,
    })
}

fn net_force(railgun: &Railgun, model: ModelKind, current: f64) -> f64 {
    let drive = magnetic_force(
        current,
        railgun.separation,
        railgun.width,
        railgun.coupling,
    );
    match model {
        ModelKind::Bare => drive,
        ModelKind::Augmented { gravity, .. } => drive - gravity * railgun.mass,
    }
}
