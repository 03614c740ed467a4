//! Root-locus sweep: sample α across its admissible range and track the
//! single pole and the second-order characteristic roots at each sample.

use num_complex::Complex64;

use super::bounds::{stability_range, StabilityRange};
use super::roots::solve_characteristic;
use super::{coeff, Mode};

pub const DEFAULT_SAMPLES: usize = 360;

/// Parallel trajectories over one α sweep.
#[derive(Clone, Debug, Default)]
pub struct Trajectories {
    pub alphas: Vec<f64>,
    pub poles: Vec<f64>,
    pub root1: Vec<Complex64>,
    pub root2: Vec<Complex64>,
}

/// Full sweep plus the highpass sub-sweep (samples with α above the
/// crossover, filtered by value: contiguity is not assumed).
#[derive(Clone, Debug)]
pub struct Locus {
    pub full: Trajectories,
    pub highpass: Trajectories,
    pub range: StabilityRange,
}

fn trajectories(
    alphas: Vec<f64>,
    beta: f64,
    gamma: f64,
    eigval: f64,
    eta: f64,
    mode: Mode,
) -> Trajectories {
    let poles: Vec<f64> = alphas
        .iter()
        .map(|&a| coeff::pole(a, beta, gamma, eigval, mode))
        .collect();
    let mut root1 = Vec::with_capacity(alphas.len());
    let mut root2 = Vec::with_capacity(alphas.len());
    for (&alpha, &pole) in alphas.iter().zip(&poles) {
        let (a1, a0) = coeff::jury_coeffs(pole, eta, alpha, eigval, gamma);
        let r = solve_characteristic(a1, a0);
        root1.push(r.root1);
        root2.push(r.root2);
    }
    Trajectories { alphas, poles, root1, root2 }
}

/// Build the locus for the current (β, γ, λ, mode) with `samples` evenly
/// spaced α values in [a_min, a_max_hp_safe].
pub fn build_locus(beta: f64, gamma: f64, eigval: f64, mode: Mode, samples: usize) -> Locus {
    let range = stability_range(beta, gamma, eigval, mode);
    let n = samples.max(2);
    let span = range.a_max_hp_safe - range.a_min;
    let alphas: Vec<f64> = (0..n)
        .map(|i| range.a_min + span * i as f64 / (n - 1) as f64)
        .collect();
    let hp_alphas: Vec<f64> = alphas
        .iter()
        .copied()
        .filter(|&a| a > range.a_max_lp)
        .collect();

    let full = trajectories(alphas, beta, gamma, eigval, range.eta, mode);
    let highpass = trajectories(hp_alphas, beta, gamma, eigval, range.eta, mode);
    Locus { full, highpass, range }
}
