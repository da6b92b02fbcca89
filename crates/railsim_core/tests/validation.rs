//! Reference-scenario checks for the integrator and the current search.
//!
//! The launcher here is the canonical one used throughout the docs:
//! D = 0.15 m, w = 0.1 m, L = 10 m, m = 1 kg, physical coupling, dt = 1e-5.
//! Expected numbers come from the closed-form constant-acceleration
//! solution (bare) and the continuum limit of the depletion recurrence
//! (augmented), so every tolerance below has analytic slack built in.

use railsim_core::error::SimError;
use railsim_core::integrator::{simulate, simulate_sampled, EulerSettings, ModelKind};
use railsim_core::railgun::Railgun;
use railsim_core::search::{find_minimum_current, SearchSettings};

const REFERENCE_TARGET: f64 = 2733.0;

fn reference_railgun() -> Railgun {
    Railgun::new(0.15, 0.1, 10.0, 1.0)
}

fn rel_err(value: f64, reference: f64) -> f64 {
    ((value - reference) / reference).abs()
}

#[test]
fn bare_reference_shot_exits_near_the_handbook_velocity() {
    let result = simulate(
        &reference_railgun(),
        &EulerSettings::default(),
        1.0e4,
        ModelKind::Bare,
    )
    .expect("reference shot should exit");

    assert!(
        rel_err(result.exit_velocity, 33.3) < 0.005,
        "expected about 33.3 m/s, got {} m/s",
        result.exit_velocity
    );
    // Bare runs never touch the current.
    assert_eq!(result.exit_current, 1.0e4);
    assert!(
        result.steps > 59_000 && result.steps < 61_000,
        "expected about 60k steps, got {}",
        result.steps
    );
    assert!(rel_err(result.elapsed_time, result.steps as f64 * 1e-5) < 1e-9);
}

#[test]
fn halving_the_timestep_barely_moves_the_bare_exit_velocity() {
    let coarse = simulate(
        &reference_railgun(),
        &EulerSettings::default(),
        1.0e4,
        ModelKind::Bare,
    )
    .expect("coarse run should exit");
    let fine = simulate(
        &reference_railgun(),
        &EulerSettings {
            dt: 5e-6,
            ..EulerSettings::default()
        },
        1.0e4,
        ModelKind::Bare,
    )
    .expect("fine run should exit");

    assert!(
        rel_err(fine.exit_velocity, coarse.exit_velocity) < 0.01,
        "halving dt moved the exit velocity from {} to {} m/s",
        coarse.exit_velocity,
        fine.exit_velocity
    );
}

#[test]
fn more_current_means_more_exit_velocity() {
    let settings = EulerSettings::default();
    let low = simulate(&reference_railgun(), &settings, 1.0e4, ModelKind::Bare)
        .expect("low-current run should exit");
    let high = simulate(&reference_railgun(), &settings, 1.2e4, ModelKind::Bare)
        .expect("high-current run should exit");
    assert!(
        high.exit_velocity > low.exit_velocity,
        "{} A gave {} m/s but {} A gave {} m/s",
        1.2e4,
        high.exit_velocity,
        1.0e4,
        low.exit_velocity
    );
}

#[test]
fn bare_current_search_matches_the_reference_threshold() {
    let railgun = reference_railgun();
    let euler = EulerSettings::default();
    let settings = SearchSettings::new(1.0e5, REFERENCE_TARGET);
    let result = find_minimum_current(&railgun, &euler, &settings, ModelKind::Bare)
        .expect("bare search should converge");

    assert!(
        rel_err(result.required_current, 824_000.0) < 0.02,
        "expected about 824 kA, got {} A",
        result.required_current
    );
    assert!(result.achieved_velocity > REFERENCE_TARGET);
    // Never more than two growth steps past the target velocity.
    assert!(
        result.achieved_velocity < REFERENCE_TARGET * settings.growth_factor.powi(2),
        "winner overshoots: {} m/s",
        result.achieved_velocity
    );
    // The winner sits on the accumulated ladder for its trial index.
    let rung = settings.initial_current * settings.growth_factor.powi(result.trials as i32 - 1);
    assert!(rel_err(result.required_current, rung) < 1e-9);
    // The rung below must not clear the target.
    let below = simulate(
        &railgun,
        &euler,
        result.required_current / settings.growth_factor,
        ModelKind::Bare,
    )
    .expect("rung below should still exit");
    assert!(below.exit_velocity <= REFERENCE_TARGET);
    // Re-running the winner reproduces the reported exit bit for bit.
    let rerun = simulate(&railgun, &euler, result.required_current, ModelKind::Bare)
        .expect("winner should exit");
    assert_eq!(rerun.exit_velocity, result.achieved_velocity);
    assert_eq!(rerun.elapsed_time, result.elapsed_time);
}

#[test]
fn augmented_search_needs_more_current_than_bare() {
    let railgun = reference_railgun();
    let euler = EulerSettings::default();
    let settings = SearchSettings::new(1.0e5, REFERENCE_TARGET);

    let bare = find_minimum_current(&railgun, &euler, &settings, ModelKind::Bare)
        .expect("bare search should converge");
    let augmented = find_minimum_current(&railgun, &euler, &settings, ModelKind::augmented())
        .expect("augmented search should converge");

    assert!(
        rel_err(augmented.required_current, 1_057_000.0) < 0.02,
        "expected about 1.057 MA, got {} A",
        augmented.required_current
    );
    assert!(
        augmented.required_current > bare.required_current,
        "augmented {} A should exceed bare {} A",
        augmented.required_current,
        bare.required_current
    );
    assert!(augmented.achieved_velocity > REFERENCE_TARGET);
    assert!(
        augmented.achieved_velocity < REFERENCE_TARGET * settings.growth_factor.powi(2)
    );
    // Back-EMF leaves roughly 57 % of the drive current at the muzzle.
    assert!(
        augmented.exit_current > 0.5 * augmented.required_current
            && augmented.exit_current < 0.65 * augmented.required_current,
        "expected a depleted exit current, got {} A of {} A",
        augmented.exit_current,
        augmented.required_current
    );
}

#[test]
fn degenerate_drive_currents_are_reported_not_spun_on() {
    let railgun = reference_railgun();
    let euler = EulerSettings::default();

    match simulate(&railgun, &euler, 0.0, ModelKind::Bare) {
        Err(SimError::NonTerminatingRun { steps, .. }) => assert_eq!(steps, 0),
        other => panic!("expected NonTerminatingRun at step 0, got {other:?}"),
    }
    // 4 kA of drive force sits just under the bar's 9.8 N weight.
    match simulate(&railgun, &euler, 4_000.0, ModelKind::augmented()) {
        Err(SimError::NonTerminatingRun { steps, .. }) => assert_eq!(steps, 0),
        other => panic!("expected NonTerminatingRun at step 0, got {other:?}"),
    }
    assert!(matches!(
        simulate(&railgun, &euler, -1.0, ModelKind::Bare),
        Err(SimError::InvalidParameter {
            name: "drive_current",
            ..
        })
    ));
}

#[test]
fn reference_trace_brackets_the_run() {
    let railgun = reference_railgun();
    let euler = EulerSettings::default();
    let trace = simulate_sampled(&railgun, &euler, 1.0e4, ModelKind::Bare, 10_000)
        .expect("reference shot should exit");

    // Launch, six strides before the muzzle, and the exit step.
    assert_eq!(trace.times.len(), 8);
    assert_eq!(trace.times[0], 0.0);
    assert!(trace.positions.windows(2).all(|pair| pair[1] > pair[0]));
    assert!(*trace.positions.last().expect("samples") >= railgun.length);
    assert_eq!(
        *trace.velocities.last().expect("samples"),
        trace.result.exit_velocity
    );

    let unsampled = simulate(&railgun, &euler, 1.0e4, ModelKind::Bare)
        .expect("reference shot should exit");
    assert_eq!(trace.result, unsampled);
}
