//! Parameter-to-coefficient mapping for the momentum recurrence.
//!
//! The change-level signal follows a single-pole linear recurrence
//! `s_t = a·s_{t-1} + b·x_{t-1}` with `a = β - η·α·λ` and `b = -η·α·λ·(1-γ)`.
//! Raw mode drops the correction entirely (η = 1, β and γ held at 0), which
//! collapses both formulas to the same uncorrected step term.

use super::Mode;

// ── Correction factor ────────────────────────────────────────────────────────

/// η = (1-β)/(1-γ), or 1 in raw mode.
///
/// Unbounded as γ → 1; the non-finite value is propagated, not trapped, and
/// consumers clip or skip what they cannot plot.
pub fn eta(beta: f64, gamma: f64, mode: Mode) -> f64 {
    if mode.is_raw() {
        1.0
    } else {
        (1.0 - beta) / (1.0 - gamma)
    }
}

// ── Closed-loop pole and forcing gain ────────────────────────────────────────

/// The system pole β - η·α·λ. Single source of truth: classification, the
/// readout panel, and the locus sweep all go through here.
pub fn pole(alpha: f64, beta: f64, gamma: f64, eigval: f64, mode: Mode) -> f64 {
    beta - eta(beta, gamma, mode) * alpha * eigval
}

/// Forcing gain on the accumulated error term.
pub fn gain(alpha: f64, beta: f64, gamma: f64, eigval: f64, mode: Mode) -> f64 {
    let eal = eta(beta, gamma, mode) * alpha * eigval;
    if mode.is_raw() {
        -eal
    } else {
        -eal * (1.0 - gamma)
    }
}

// ── Classification ───────────────────────────────────────────────────────────

/// Qualitative labels for the single-pole view: |pole| < 1 decays, and a
/// negative pole alternates sign step to step (highpass).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Classification {
    pub stable: bool,
    pub highpass: bool,
}

pub fn classify(pole: f64) -> Classification {
    Classification {
        stable: pole.abs() < 1.0,
        highpass: pole < 0.0,
    }
}

// ── Second-order (Jury) coefficients ─────────────────────────────────────────

/// Coefficients (a1, a0) of the characteristic polynomial z² - a1·z + a0 of
/// the coupled (s, x) system: a1 = 1 + pole, a0 = pole + η·α·λ·(1-γ).
///
/// With β = γ = 0 in raw mode the pole is exactly -η·α·λ and a0 cancels to 0.
pub fn jury_coeffs(pole: f64, eta: f64, alpha: f64, eigval: f64, gamma: f64) -> (f64, f64) {
    let a1 = 1.0 + pole;
    let a0 = pole + eta * alpha * eigval * (1.0 - gamma);
    (a1, a0)
}

// ── Preset γ formulas ────────────────────────────────────────────────────────

/// β → γ for the β-pure presets. `None` for modes where γ is not a function
/// of β alone (free editing, the closed-loop optimal value, raw's forced 0).
///
/// The SFUN formula leaves the real line for β > 1; the NaN is the caller's
/// signal that no valid preset value exists there.
pub fn preset_gamma(beta: f64, mode: Mode) -> Option<f64> {
    match mode {
        Mode::HeavyBall => Some(0.0),
        Mode::Nesterov => Some(beta / (1.0 + beta)),
        Mode::Sfun => Some(1.0 - (2.0 * (1.0 - beta)).sqrt()),
        _ => None,
    }
}

/// The closed-loop "optimal" γ = -0.9·(1-β)/(η·α·λ). Unlike the presets
/// above this depends on the current α, so it is applied inside the update
/// cycle (with one follow-up bounds/α recompute), not at selection time.
pub fn optimal_gamma(beta: f64, eta: f64, alpha: f64, eigval: f64) -> f64 {
    -0.9 * (1.0 - beta) / (eta * alpha * eigval)
}
