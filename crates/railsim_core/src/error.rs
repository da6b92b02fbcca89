use thiserror::Error;

/// Everything that can go wrong while running or sizing a launch.
///
/// Validation failures and `NegativeCurrent` abort whatever operation is
/// in flight. `NonTerminatingRun` is terminal for a single run but the
/// current search treats it as an underpowered trial and escalates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("Railgun geometry invalid: {name} = {value}; every field must be positive and finite.")]
    InvalidGeometry { name: &'static str, value: f64 },

    #[error("Step size dt = {dt} must be positive and finite.")]
    InvalidTimestep { dt: f64 },

    #[error("Parameter {name} = {value} is outside its valid range.")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("Run never reached the muzzle: stopped after {steps} steps at x = {position} m, v = {velocity} m/s.")]
    NonTerminatingRun {
        steps: usize,
        position: f64,
        velocity: f64,
    },

    #[error("Induced feedback drove the loop current to {current} A at t = {time} s; dt is too coarse for this circuit.")]
    NegativeCurrent { time: f64, current: f64 },

    #[error("No trial reached the target velocity in {trials} trials; last tested {last_current} A.")]
    SearchExhausted { trials: usize, last_current: f64 },
}
