pub mod bounds;
pub mod coeff;
pub mod locus;
pub mod roots;
pub mod sim;

/// Coefficient regime. Exactly one is active at a time; the β-pure presets
/// (`HeavyBall`, `Nesterov`, `Sfun`) lock γ to a function of β, `Optimal`
/// locks γ to the closed-loop value recomputed in the update cycle, and
/// `Raw` forces β = γ = 0 and switches to the uncorrected formula set.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    Free,
    HeavyBall,
    Nesterov,
    Sfun,
    Optimal,
    Raw,
}

impl Mode {
    pub fn all() -> &'static [Mode] {
        &[
            Mode::Free,
            Mode::HeavyBall,
            Mode::Nesterov,
            Mode::Sfun,
            Mode::Optimal,
            Mode::Raw,
        ]
    }

    pub fn title(&self) -> &str {
        match self {
            Mode::Free => " Free ",
            Mode::HeavyBall => " Heavy-ball ",
            Mode::Nesterov => " Nesterov ",
            Mode::Sfun => " SFUN ",
            Mode::Optimal => " Optimal ",
            Mode::Raw => " Raw ",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Mode::Free => 0,
            Mode::HeavyBall => 1,
            Mode::Nesterov => 2,
            Mode::Sfun => 3,
            Mode::Optimal => 4,
            Mode::Raw => 5,
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Mode::Raw)
    }
}

/// Input driving the recurrence: a unit step held from t = 0, or a unit
/// impulse at t = 0 only.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputKind {
    Step,
    Impulse,
}

impl InputKind {
    pub fn label(&self) -> &str {
        match self {
            InputKind::Step => "step",
            InputKind::Impulse => "impulse",
        }
    }

    pub fn toggle(&self) -> InputKind {
        match self {
            InputKind::Step => InputKind::Impulse,
            InputKind::Impulse => InputKind::Step,
        }
    }
}

/// The full parameter state. Everything downstream (coefficients, bounds,
/// simulation, locus) is a pure function of one of these.
#[derive(Clone, Copy, Debug)]
pub struct Params {
    pub beta: f64,
    pub gamma: f64,
    pub eigval: f64,
    pub alpha: f64,
    pub input: InputKind,
    pub mode: Mode,
}

impl Params {
    pub fn new() -> Self {
        Self {
            beta: 0.9,
            gamma: 0.0,
            eigval: 1.0,
            alpha: 0.05,
            input: InputKind::Step,
            mode: Mode::Free,
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new()
    }
}
