//! Deterministic railgun launch simulation and drive-current sizing.
//!
//! Two entry points cover the whole crate: [`integrator::simulate`] runs a
//! single fixed-step launch and [`search::find_minimum_current`] walks a
//! geometric ladder of drive currents until one clears a target exit
//! velocity. Everything is plain `f64` arithmetic in a fixed evaluation
//! order, so identical inputs give bit-identical outputs.

pub mod error;
pub mod integrator;
pub mod physics;
pub mod railgun;
pub mod search;
