mod stepper;
mod params;

// Re-export public API
pub use stepper::step_discrete;
pub use params::SystemParameters;

use crate::error::{AttractorError, AttractorResult};
use crate::state::State;

/// Absorbs representation error in `duration / dt` (80 / 0.0001 must give
/// 800000, not 799999).
const COUNT_EPSILON: f64 = 1e-9;

/// Upper bound on samples per trajectory. A full table at this size is
/// 2.4 GB of states.
pub const MAX_SAMPLES: usize = 100_000_000;

/// Number of samples a trajectory of `duration` simulated time units holds at
/// step `dt`: `floor(duration / dt)`.
pub fn sample_count(dt: f64, duration: f64) -> AttractorResult<usize> {
    if !(dt.is_finite() && dt > 0.0) {
        return Err(AttractorError::parameter(format!("dt must be positive and finite, got {dt}")));
    }
    if !(duration.is_finite() && duration > 0.0) {
        return Err(AttractorError::parameter(format!(
            "duration must be positive and finite, got {duration}"
        )));
    }
    let n = (duration / dt + COUNT_EPSILON).floor();
    if !n.is_finite() || n > MAX_SAMPLES as f64 {
        return Err(AttractorError::parameter(format!(
            "duration {duration} at dt {dt} needs {n} samples, more than {MAX_SAMPLES}"
        )));
    }
    Ok(n as usize)
}

/// Integrate the Lorenz system ahead of time with fixed-step RK4.
///
/// Sample `k` is the state at time `(k + 1) * dt`: the initial condition is
/// not part of the table, playback starts from it. A step size that makes the
/// integration blow up to non-finite values is rejected.
pub fn solve(
    initial: State,
    params: &SystemParameters,
    dt: f64,
    duration: f64,
) -> AttractorResult<Vec<State>> {
    params.validate()?;
    if !initial.is_finite() {
        return Err(AttractorError::parameter(format!("initial state must be finite, got {initial:?}")));
    }
    let n = sample_count(dt, duration)?;

    let mut samples = Vec::with_capacity(n);
    let mut s = initial;
    for k in 0..n {
        s = stepper::rk4_step(s, params, dt);
        if !s.is_finite() {
            return Err(AttractorError::parameter(format!(
                "integration diverged at sample {k} with dt {dt}"
            )));
        }
        samples.push(s);
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 0.0001;

    #[test]
    fn test_sample_count_reference_run() {
        assert_eq!(sample_count(0.0001, 80.0).unwrap(), 800_000);
        assert_eq!(sample_count(0.00009999, 80.0).unwrap(), 800_080);
    }

    #[test]
    fn test_sample_count_truncates() {
        assert_eq!(sample_count(0.3, 1.0).unwrap(), 3);
        assert_eq!(sample_count(2.0, 1.0).unwrap(), 0);
    }

    #[test]
    fn test_sample_count_rejects_bad_input() {
        assert!(matches!(sample_count(0.0, 1.0), Err(AttractorError::InvalidParameter(_))));
        assert!(sample_count(-1e-4, 1.0).is_err());
        assert!(sample_count(f64::NAN, 1.0).is_err());
        assert!(sample_count(1e-4, 0.0).is_err());
        assert!(sample_count(1e-4, f64::INFINITY).is_err());
    }

    #[test]
    fn test_sample_count_rejects_oversized_tables() {
        assert!(matches!(sample_count(1e-300, 1.0), Err(AttractorError::InvalidParameter(_))));
        assert!(sample_count(1e-300, 1e300).is_err());
        assert!(sample_count(1.0, (MAX_SAMPLES + 1) as f64).is_err());
        assert_eq!(sample_count(1.0, MAX_SAMPLES as f64).unwrap(), MAX_SAMPLES);
    }

    #[test]
    fn test_solve_rejects_tiny_dt() {
        let p = SystemParameters::default();
        let result = solve(State::new(0.1, 0.0, 0.0), &p, 1e-300, 1.0);
        assert!(matches!(result, Err(AttractorError::InvalidParameter(_))));
    }

    #[test]
    fn test_solve_rejects_divergence() {
        let p = SystemParameters::default();
        let result = solve(State::new(0.1, 0.0, 0.0), &p, 0.2, 100.0);
        assert!(matches!(result, Err(AttractorError::InvalidParameter(_))));
    }

    #[test]
    fn test_solve_length() {
        let p = SystemParameters::default();
        let samples = solve(State::new(0.1, 0.0, 0.0), &p, 0.001, 2.5).unwrap();
        assert_eq!(samples.len(), 2500);
    }

    #[test]
    fn test_solve_full_reference_length() {
        let p = SystemParameters::default();
        let samples = solve(State::new(0.1, 0.0, 0.0), &p, DT, 80.0).unwrap();
        assert_eq!(samples.len(), 800_000);
        assert!(samples.iter().all(State::is_finite));
    }

    #[test]
    fn test_solve_deterministic() {
        let p = SystemParameters::default();
        let a = solve(State::new(0.1, 0.0, 0.0), &p, DT, 5.0).unwrap();
        let b = solve(State::new(0.1, 0.0, 0.0), &p, DT, 5.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_solve_sample_zero_is_first_step() {
        let p = SystemParameters::default();
        let init = State::new(0.1, 0.0, 0.0);
        let samples = solve(init, &p, DT, 1.0).unwrap();
        assert_ne!(samples[0], init);
        assert_eq!(samples[0], stepper::rk4_step(init, &p, DT));
    }

    #[test]
    fn test_solve_first_samples_match_discrete_trace() {
        // Reference trace from the direct update x += dt*a*(y-x), ...
        let p = SystemParameters::default();
        let (a, b, c) = (10.0, 28.0, 8.0 / 3.0);
        let (mut x, mut y, mut z) = (0.1_f64, 0.0_f64, 0.0_f64);
        let mut trace = Vec::new();
        for _ in 0..5 {
            x += DT * a * (y - x);
            y += DT * (x * (b - z) - y);
            z += DT * (x * y - c * z);
            trace.push(State::new(x, y, z));
        }

        let mut s = State::new(0.1, 0.0, 0.0);
        for expected in &trace {
            s = step_discrete(s, &p, DT);
            assert!((s.x - expected.x).abs() < 1e-9);
            assert!((s.y - expected.y).abs() < 1e-9);
            assert!((s.z - expected.z).abs() < 1e-9);
        }

        // RK4 differs from the first-order trace only by its truncation error.
        let table = solve(State::new(0.1, 0.0, 0.0), &p, DT, 80.0).unwrap();
        assert_eq!(table.len(), 800_000);
        for (got, expected) in table.iter().zip(&trace) {
            assert!(got.distance(expected) < 1e-5, "{got:?} vs {expected:?}");
        }
    }

    #[test]
    fn test_sensitive_to_initial_conditions() {
        let p = SystemParameters::default();
        let a = solve(State::new(0.1, 0.0, 0.0), &p, DT, 30.0).unwrap();
        let b = solve(State::new(0.101, 0.0, 0.0), &p, DT, 30.0).unwrap();
        let diverged = a
            .iter()
            .zip(&b)
            .take(300_000)
            .any(|(s1, s2)| s1.distance(s2) > 1.0);
        assert!(diverged, "trajectories 0.001 apart should separate by more than 1.0");
    }

    #[test]
    fn test_solve_rejects_invalid_parameters() {
        let init = State::new(0.1, 0.0, 0.0);
        let bad = SystemParameters { a: f64::INFINITY, ..SystemParameters::default() };
        assert!(matches!(solve(init, &bad, DT, 1.0), Err(AttractorError::InvalidParameter(_))));
        let p = SystemParameters::default();
        assert!(solve(init, &p, 0.0, 1.0).is_err());
        assert!(solve(init, &p, DT, -1.0).is_err());
        assert!(solve(State::new(f64::NAN, 0.0, 0.0), &p, DT, 1.0).is_err());
    }
}
