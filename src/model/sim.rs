//! Discrete-time simulation of the change-level model:
//!
//!   s_t = a·s_{t-1} + b·x_{t-1}
//!   x_t = s_t + x_{t-1}
//!
//! x is the accumulated error against the target w* = 1 (so x starts at -1)
//! and s is the per-step change. A step input is represented entirely by
//! that initial offset; an impulse pins x_{t-1} to -1 at t = 0 and 0 after.

use rand::Rng;

use super::{coeff, InputKind, Mode};

/// Injected noise level. Held at zero: the generator below is carried as a
/// utility but the simulated system is deterministic.
const NOISE_STD: f64 = 0.0;

/// One Gaussian draw (mean 0, std 1) via Box-Muller.
fn randn<R: Rng>(rng: &mut R) -> f64 {
    let mut u = 0.0;
    let mut v = 0.0;
    while u == 0.0 {
        u = rng.gen::<f64>();
    }
    while v == 0.0 {
        v = rng.gen::<f64>();
    }
    (-2.0 * u.ln()).sqrt() * (2.0 * std::f64::consts::PI * v).cos()
}

/// Gaussian noise with the given mean and std.
pub fn gaussian_noise(mean: f64, std: f64) -> f64 {
    randn(&mut rand::thread_rng()) * std + mean
}

/// Simulation output: the error and change sequences plus the coefficients
/// they were produced with.
#[derive(Clone, Debug)]
pub struct Response {
    pub xs: Vec<f64>,
    pub ss: Vec<f64>,
    pub a: f64,
    pub b: f64,
}

/// Run the recurrence for `steps` iterations. Pure: identical inputs give
/// identical output, and each call starts from the fixed initial state.
pub fn simulate(
    beta: f64,
    gamma: f64,
    eigval: f64,
    alpha: f64,
    input: InputKind,
    steps: usize,
    mode: Mode,
) -> Response {
    let a = coeff::pole(alpha, beta, gamma, eigval, mode);
    let b = coeff::gain(alpha, beta, gamma, eigval, mode);

    let w_star = 1.0;
    let mut s_prev = 0.0;
    let mut x_prev = -w_star;
    let mut xs = Vec::with_capacity(steps);
    let mut ss = Vec::with_capacity(steps);

    for t in 0..steps {
        if input == InputKind::Impulse {
            x_prev = if t == 0 { -w_star } else { 0.0 };
        }
        let n_t = if NOISE_STD > 0.0 {
            gaussian_noise(0.0, NOISE_STD)
        } else {
            0.0
        };
        let s_t = a * s_prev + b * (x_prev + n_t);
        let x_t = s_t + x_prev;
        xs.push(x_t);
        ss.push(s_t);
        s_prev = s_t;
        x_prev = x_t;
    }

    Response { xs, ss, a, b }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_alpha_has_no_dynamics() {
        let r = simulate(0.0, 0.0, 1.0, 0.0, InputKind::Step, 5, Mode::Free);
        assert_eq!(r.a, 0.0);
        assert_eq!(r.b, 0.0);
        assert_eq!(r.xs, vec![-1.0; 5]);
        assert_eq!(r.ss, vec![0.0; 5]);
    }

    #[test]
    fn lengths_match_step_count() {
        let r = simulate(0.9, 0.3, 1.0, 0.05, InputKind::Step, 220, Mode::Free);
        assert_eq!(r.xs.len(), 220);
        assert_eq!(r.ss.len(), 220);
    }

    #[test]
    fn stable_step_response_decays() {
        // well inside the stable lowpass region: the error shrinks from -1
        let r = simulate(0.9, 0.0, 1.0, 0.05, InputKind::Step, 220, Mode::Free);
        assert!(r.a.abs() < 1.0);
        let tail = r.xs[219].abs();
        assert!(tail < 0.05, "error failed to decay: tail={tail}");
    }

    #[test]
    fn impulse_pins_prior_state_after_t0() {
        // once x_{t-1} is pinned to 0 the change decays geometrically by the
        // pole, and the error tracks the change exactly
        let r = simulate(0.0, 0.0, 1.0, 0.1, InputKind::Impulse, 6, Mode::Free);
        assert!((r.ss[0] - (-r.b)).abs() < 1e-15);
        for t in 1..6 {
            assert!((r.ss[t] - r.a * r.ss[t - 1]).abs() < 1e-15, "t={t}");
            assert_eq!(r.xs[t], r.ss[t], "t={t}");
        }
    }

    #[test]
    fn repeated_runs_are_identical() {
        let a = simulate(0.8, 0.2, 1.5, 0.07, InputKind::Step, 120, Mode::Free);
        let b = simulate(0.8, 0.2, 1.5, 0.07, InputKind::Step, 120, Mode::Free);
        assert_eq!(a.xs, b.xs);
        assert_eq!(a.ss, b.ss);
    }

    #[test]
    fn raw_mode_uses_uncorrected_coefficients() {
        let r = simulate(0.0, 0.0, 1.0, 0.2, InputKind::Step, 10, Mode::Raw);
        assert_eq!(r.a, -0.2);
        assert_eq!(r.b, -0.2);
    }
}
