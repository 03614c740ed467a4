//! Admissible step-size range and the lowpass/highpass crossover.

use super::{coeff, Mode};

/// α = 0 is disallowed: zero gain makes the forcing path degenerate.
const ALPHA_FLOOR: f64 = 1e-10;

/// Raw mode's crossover is a fixed tuning constant, not derived.
const RAW_CROSSOVER: f64 = 0.33;

/// Safety margin keeping sweeps off the exact pole = -1 boundary.
const HP_SAFETY: f64 = 0.99;

/// Collapse guard threshold for a zero-width range.
const COLLAPSE_EPS: f64 = 1e-8;

/// Step-size bounds for the current (β, γ, λ, mode).
///
/// `a_max_lp` is where the pole changes sign (lowpass below, highpass above);
/// `a_max` is the theoretical stability boundary (pole = -1) and
/// `a_max_hp_safe` the margined bound used for slider ranges and sweeps.
#[derive(Clone, Copy, Debug)]
pub struct StabilityRange {
    pub a_min: f64,
    pub a_max: f64,
    pub eta: f64,
    pub a_max_lp: f64,
    pub a_max_hp_safe: f64,
}

pub fn stability_range(beta: f64, gamma: f64, eigval: f64, mode: Mode) -> StabilityRange {
    let eta = coeff::eta(beta, gamma, mode);
    let a_min = ALPHA_FLOOR;
    let a_max_lp = if mode.is_raw() {
        RAW_CROSSOVER / eigval
    } else {
        beta / (eta * eigval)
    };
    let mut a_max = (1.0 + beta) / (eta * eigval);
    let a_max_hp_safe = HP_SAFETY * a_max;
    if (a_max - a_min).abs() < COLLAPSE_EPS {
        a_max = a_min + 1.0;
    }
    StabilityRange {
        a_min,
        a_max,
        eta,
        a_max_lp,
        a_max_hp_safe,
    }
}
