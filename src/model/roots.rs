//! Characteristic-polynomial root solver for z² - a1·z + a0.

use num_complex::Complex64;

/// The two roots plus the Jury verdict. Root 1 takes the + branch of the
/// discriminant; for a negative discriminant the pair is conjugate with
/// root 1 carrying the positive imaginary part.
#[derive(Clone, Copy, Debug)]
pub struct CharRoots {
    pub root1: Complex64,
    pub root2: Complex64,
    pub stable: bool,
}

pub fn solve_characteristic(a1: f64, a0: f64) -> CharRoots {
    let disc = a1 * a1 - 4.0 * a0;
    let (root1, root2) = if disc >= 0.0 {
        let sq = disc.sqrt();
        (
            Complex64::new((a1 + sq) / 2.0, 0.0),
            Complex64::new((a1 - sq) / 2.0, 0.0),
        )
    } else {
        let re = a1 / 2.0;
        let im = (-disc).sqrt() / 2.0;
        (Complex64::new(re, im), Complex64::new(re, -im))
    };
    CharRoots {
        root1,
        root2,
        stable: jury_stable(a1, a0),
    }
}

/// Jury test for a 2nd-order discrete system, necessary and sufficient for
/// both roots of z² - a1·z + a0 to lie inside the unit circle.
///
/// Stricter than the single-pole |pole| < 1 check: the two views model the
/// same physical system at different orders and are allowed to disagree.
pub fn jury_stable(a1: f64, a0: f64) -> bool {
    (1.0 + a1 + a0) > 0.0 && (1.0 - a1 + a0) > 0.0 && a0.abs() < 1.0
}
