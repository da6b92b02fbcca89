//! Field kernels shared by both model variants.
//!
//! The launcher is idealized as two long parallel rails carrying the loop
//! current in opposite directions, bridged by the sliding bar. Integrating
//! the field of both rails across the bar gives every quantity below a
//! common geometric factor, `flux_factor`.

use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// Magnetic coupling constant k = mu0 / 2pi (T·m/A).
pub const MU0_OVER_2PI: f64 = 2.0e-7;

/// Gravitational acceleration opposing the launch direction (m/s^2).
pub const STANDARD_GRAVITY: f64 = 9.8;

/// Rail-circuit loop resistance (ohm).
pub const LOOP_RESISTANCE: f64 = 1.0;

/// A trait for types the kernels accept as scalars.
/// Must support float arithmetic, debug printing, and conversion from f64.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// Geometric log factor ln(D + w/2) - ln(w/2).
///
/// `separation` is the clear gap D between the rails and `width` the rail
/// width w; field contributions are evaluated from each rail's centerline,
/// hence the half-width offsets.
pub fn flux_factor<T: Scalar>(separation: T, width: T) -> T {
    let half_width = T::from_f64(0.5).unwrap() * width;
    (separation + half_width).ln() - half_width.ln()
}

/// Lorentz force on the bar in newtons: F = 2 k I^2 (ln(D + w/2) - ln(w/2)).
///
/// Quadratic in the current and independent of its sign; never negative
/// for a valid geometry.
pub fn magnetic_force<T: Scalar>(current: T, separation: T, width: T, coupling: T) -> T {
    let two = T::from_f64(2.0).unwrap();
    two * coupling * current * current * flux_factor(separation, width)
}

/// Counter-current induced by the moving bar over one step, per unit loop
/// resistance: -2 k I (ln(D + w/2) - ln(w/2)) v.
///
/// Negative while the bar moves toward the muzzle (Lenz's law); the
/// integrator divides by the configured loop resistance before applying it.
pub fn induced_current<T: Scalar>(
    current: T,
    separation: T,
    width: T,
    coupling: T,
    velocity: T,
) -> T {
    let two = T::from_f64(2.0).unwrap();
    -(two * coupling * current * flux_factor(separation, width) * velocity)
}
