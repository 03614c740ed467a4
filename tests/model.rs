//! End-to-end checks of the numeric pipeline: coefficient mapping, bounds,
//! simulation, root solving, and the locus sweep feeding each other.

use polescope::app::App;
use polescope::model::bounds::stability_range;
use polescope::model::locus::build_locus;
use polescope::model::roots::{jury_stable, solve_characteristic};
use polescope::model::sim::simulate;
use polescope::model::{coeff, InputKind, Mode};

#[test]
fn bounds_gate_the_sweep() {
    for &(beta, gamma, eigval) in &[(0.9, 0.0, 1.0), (0.5, 0.2, 2.0), (0.99, 0.4, 0.5)] {
        let l = build_locus(beta, gamma, eigval, Mode::Free, 360);
        let r = &l.range;
        for &a in &l.full.alphas {
            assert!(a >= r.a_min && a <= r.a_max_hp_safe + 1e-12);
        }
        // poles stay strictly inside the stability disc across the safe sweep
        for &p in &l.full.poles {
            assert!(p > -1.0 && p <= beta, "pole {p} escaped for beta={beta}");
        }
    }
}

#[test]
fn locus_roots_reconstruct_their_polynomial() {
    let l = build_locus(0.9, 0.3, 1.0, Mode::Free, 120);
    for i in 0..l.full.alphas.len() {
        let (a1, a0) = coeff::jury_coeffs(
            l.full.poles[i],
            l.range.eta,
            l.full.alphas[i],
            1.0,
            0.3,
        );
        let sum = l.full.root1[i] + l.full.root2[i];
        let prod = l.full.root1[i] * l.full.root2[i];
        assert!(sum.im.abs() < 1e-12);
        assert!((sum.re - a1).abs() < 1e-9, "sample {i}: trace mismatch");
        assert!((prod.re - a0).abs() < 1e-9, "sample {i}: det mismatch");
    }
}

#[test]
fn single_pole_and_jury_views_can_disagree() {
    // strongly negative γ keeps the single pole inside the unit circle while
    // pushing the second-order constant term past the Jury |a0| < 1 bound
    let (beta, gamma, eigval, alpha) = (0.9, -5.0, 1.0, 2.0);
    let eta = coeff::eta(beta, gamma, Mode::Free);
    let pole = coeff::pole(alpha, beta, gamma, eigval, Mode::Free);
    assert!(coeff::classify(pole).stable);

    let (a1, a0) = coeff::jury_coeffs(pole, eta, alpha, eigval, gamma);
    assert!(a0 > 1.0);
    assert!(!jury_stable(a1, a0));
    assert!(!solve_characteristic(a1, a0).stable);
}

#[test]
fn raw_is_the_corrected_formula_set_at_zero_coefficients() {
    let l = build_locus(0.0, 0.0, 1.5, Mode::Raw, 90);
    for &alpha in &l.full.alphas {
        assert_eq!(
            coeff::pole(alpha, 0.0, 0.0, 1.5, Mode::Raw),
            coeff::pole(alpha, 0.0, 0.0, 1.5, Mode::Free)
        );
        assert_eq!(
            coeff::gain(alpha, 0.0, 0.0, 1.5, Mode::Raw),
            coeff::gain(alpha, 0.0, 0.0, 1.5, Mode::Free)
        );
    }
    let raw = simulate(0.0, 0.0, 1.5, 0.2, InputKind::Step, 60, Mode::Raw);
    let free = simulate(0.0, 0.0, 1.5, 0.2, InputKind::Step, 60, Mode::Free);
    assert_eq!(raw.xs, free.xs);
    assert_eq!(raw.ss, free.ss);
}

#[test]
fn preset_gamma_reference_values() {
    let nag = coeff::preset_gamma(0.9, Mode::Nesterov).unwrap();
    assert!((nag - 0.47368421052631576).abs() < 1e-12);
    assert_eq!(coeff::preset_gamma(0.9, Mode::HeavyBall), Some(0.0));
}

#[test]
fn stable_step_response_settles() {
    // default-style operating point: α below the crossover, pole in (0, 1)
    let r = stability_range(0.9, 0.0, 1.0, Mode::Free);
    let alpha = 0.99 * r.a_max_lp;
    let sim = simulate(0.9, 0.0, 1.0, alpha, InputKind::Step, 220, Mode::Free);
    assert!(sim.a.abs() < 1.0);
    assert!(
        sim.xs.last().unwrap().abs() < 1e-2,
        "error did not settle: {}",
        sim.xs.last().unwrap()
    );
}

#[test]
fn optimal_mode_yields_a_stable_operating_point() {
    let mut app = App::new();
    app.set_mode(Mode::Optimal);
    let p = app.params;
    let pole = coeff::pole(p.alpha, p.beta, p.gamma, p.eigval, p.mode);
    assert!(coeff::classify(pole).stable, "pole {pole} outside unit circle");
    let sim = simulate(p.beta, p.gamma, p.eigval, p.alpha, p.input, 220, p.mode);
    assert!(sim.xs.last().unwrap().abs() < 0.5);
}

#[test]
fn gamma_at_one_degenerates_without_panicking() {
    let eta = coeff::eta(0.5, 1.0, Mode::Free);
    assert!(!eta.is_finite());

    let r = stability_range(0.5, 1.0, 1.0, Mode::Free);
    assert!(!r.a_max.is_finite() || !r.a_max_lp.is_finite() || r.a_max == r.a_min + 1.0);

    // the sweep and the simulator absorb the non-finite values as data
    let l = build_locus(0.5, 1.0, 1.0, Mode::Free, 30);
    assert_eq!(l.full.alphas.len(), 30);
    let sim = simulate(0.5, 1.0, 1.0, 0.1, InputKind::Step, 10, Mode::Free);
    assert_eq!(sim.xs.len(), 10);
}

#[test]
fn compute_functions_are_idempotent() {
    let args = (0.8, 0.25, 1.3, 0.07);
    let (beta, gamma, eigval, alpha) = args;

    let r1 = stability_range(beta, gamma, eigval, Mode::Free);
    let r2 = stability_range(beta, gamma, eigval, Mode::Free);
    assert_eq!(r1.a_max, r2.a_max);
    assert_eq!(r1.a_max_lp, r2.a_max_lp);

    assert_eq!(
        coeff::pole(alpha, beta, gamma, eigval, Mode::Free),
        coeff::pole(alpha, beta, gamma, eigval, Mode::Free)
    );

    let s1 = simulate(beta, gamma, eigval, alpha, InputKind::Impulse, 80, Mode::Free);
    let s2 = simulate(beta, gamma, eigval, alpha, InputKind::Impulse, 80, Mode::Free);
    assert_eq!(s1.xs, s2.xs);
    assert_eq!(s1.ss, s2.ss);
}
