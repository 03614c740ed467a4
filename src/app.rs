use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::bounds::stability_range;
use crate::model::{coeff, InputKind, Mode, Params};

/// Frames in one full α sweep of the animation.
pub const SWEEP_FRAMES: usize = 360;

/// Fraction of the lowpass crossover used as the "stable + fast" default α
/// after any β/γ/λ/mode edit.
const ALPHA_DEFAULT_FRAC: f64 = 0.99;

// ── Display mode ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum View {
    Overview,
    Response,
    RootLocus,
    PoleAxis,
}

impl View {
    pub fn all() -> &'static [View] {
        &[View::Overview, View::Response, View::RootLocus, View::PoleAxis]
    }

    pub fn title(&self) -> &str {
        match self {
            View::Overview => " Overview ",
            View::Response => " Response ",
            View::RootLocus => " Root locus ",
            View::PoleAxis => " Pole axis ",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            View::Overview => 0,
            View::Response => 1,
            View::RootLocus => 2,
            View::PoleAxis => 3,
        }
    }
}

// ── Parameter cursor ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ParamSelect {
    Beta,
    Gamma,
    Eigval,
    Alpha,
}

impl ParamSelect {
    pub fn label(&self) -> &str {
        match self {
            ParamSelect::Beta => "β",
            ParamSelect::Gamma => "γ",
            ParamSelect::Eigval => "λ",
            ParamSelect::Alpha => "α",
        }
    }

    fn next(&self) -> ParamSelect {
        match self {
            ParamSelect::Beta => ParamSelect::Gamma,
            ParamSelect::Gamma => ParamSelect::Eigval,
            ParamSelect::Eigval => ParamSelect::Alpha,
            ParamSelect::Alpha => ParamSelect::Beta,
        }
    }

    fn prev(&self) -> ParamSelect {
        match self {
            ParamSelect::Beta => ParamSelect::Alpha,
            ParamSelect::Gamma => ParamSelect::Beta,
            ParamSelect::Eigval => ParamSelect::Gamma,
            ParamSelect::Alpha => ParamSelect::Eigval,
        }
    }
}

// ── Animation ────────────────────────────────────────────────────────────────

/// Cyclic α sweep. Bounds are captured when the sweep starts and held for
/// its whole lifetime, so a running sweep is unaffected by the re-derived
/// range of the parameters it is mutating.
struct Sweep {
    frame: usize,
    a_lo: f64,
    a_hi: f64,
}

// ── App ──────────────────────────────────────────────────────────────────────

pub struct App {
    pub should_quit: bool,
    pub params: Params,
    pub view: View,
    pub selected: ParamSelect,
    sweep: Option<Sweep>,
}

impl App {
    pub fn new() -> Self {
        let mut app = Self {
            should_quit: false,
            params: Params::new(),
            view: View::Overview,
            selected: ParamSelect::Alpha,
            sweep: None,
        };
        app.refresh();
        app
    }

    pub fn playing(&self) -> bool {
        self.sweep.is_some()
    }

    /// Editable γ range in the current state: the lower bound coincides with
    /// the closed-loop optimal value, the upper bound with β.
    pub fn gamma_limits(&self) -> (f64, f64) {
        let p = &self.params;
        let eta = coeff::eta(p.beta, p.gamma, p.mode);
        let lo = coeff::optimal_gamma(p.beta, eta, p.alpha, p.eigval);
        (lo, p.beta)
    }

    /// Re-derive the dependent parts of the state after a β/γ/λ/mode edit:
    /// raw forcing, preset γ, the default α, and the optimal mode's γ with
    /// its one follow-up recompute.
    fn refresh(&mut self) {
        let p = &mut self.params;
        if p.mode.is_raw() {
            p.beta = 0.0;
            p.gamma = 0.0;
        } else if let Some(g) = coeff::preset_gamma(p.beta, p.mode) {
            p.gamma = g;
        }

        let mut range = stability_range(p.beta, p.gamma, p.eigval, p.mode);
        p.alpha = ALPHA_DEFAULT_FRAC * range.a_max_lp;

        if p.mode == Mode::Optimal {
            p.gamma = coeff::optimal_gamma(p.beta, range.eta, p.alpha, p.eigval);
            range = stability_range(p.beta, p.gamma, p.eigval, p.mode);
            p.alpha = ALPHA_DEFAULT_FRAC * range.a_max_lp;
        }
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.params.mode == mode {
            return;
        }
        self.params.mode = mode;
        // entering free mode keeps every value as it was
        if mode != Mode::Free {
            self.refresh();
        }
    }

    fn adjust(&mut self, up: bool) {
        let sign = if up { 1.0 } else { -1.0 };
        match self.selected {
            ParamSelect::Beta => {
                if self.params.mode.is_raw() {
                    return;
                }
                self.params.beta = (self.params.beta + sign * 0.01).clamp(0.0, 0.99);
                self.refresh();
            }
            ParamSelect::Gamma => {
                if self.params.mode != Mode::Free {
                    return;
                }
                let (lo, hi) = self.gamma_limits();
                self.params.gamma = (self.params.gamma + sign * 0.01).clamp(lo, hi);
                self.refresh();
            }
            ParamSelect::Eigval => {
                self.params.eigval = (self.params.eigval + sign * 0.05).clamp(0.05, 10.0);
                self.refresh();
            }
            ParamSelect::Alpha => {
                // α edits clamp against the current range without touching it
                let p = &self.params;
                let range = stability_range(p.beta, p.gamma, p.eigval, p.mode);
                let step = (range.a_max_hp_safe - range.a_min) / 200.0;
                self.params.alpha =
                    (p.alpha + sign * step).clamp(range.a_min, range.a_max_hp_safe);
            }
        }
    }

    pub fn start_sweep(&mut self) {
        if self.sweep.is_some() {
            return;
        }
        let p = &self.params;
        let range = stability_range(p.beta, p.gamma, p.eigval, p.mode);
        self.sweep = Some(Sweep {
            frame: 0,
            a_lo: range.a_min,
            a_hi: range.a_max_hp_safe,
        });
    }

    pub fn stop_sweep(&mut self) {
        self.sweep = None;
    }

    pub fn on_tick(&mut self) {
        if let Some(sweep) = &mut self.sweep {
            let i = sweep.frame % SWEEP_FRAMES;
            self.params.alpha =
                sweep.a_lo + (sweep.a_hi - sweep.a_lo) * i as f64 / (SWEEP_FRAMES - 1) as f64;
            sweep.frame += 1;
        }
    }

    pub fn reset(&mut self) {
        self.stop_sweep();
        self.params.beta = 0.9;
        self.params.eigval = 1.0;
        self.params.input = InputKind::Step;
        self.refresh();
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => self.next_view(),
            KeyCode::BackTab => self.prev_view(),
            KeyCode::Char('1') => self.set_mode(Mode::Free),
            KeyCode::Char('2') => self.set_mode(Mode::HeavyBall),
            KeyCode::Char('3') => self.set_mode(Mode::Nesterov),
            KeyCode::Char('4') => self.set_mode(Mode::Sfun),
            KeyCode::Char('5') => self.set_mode(Mode::Optimal),
            KeyCode::Char('6') => self.set_mode(Mode::Raw),
            KeyCode::Char('i') | KeyCode::Char('I') => {
                self.params.input = self.params.input.toggle();
            }
            KeyCode::Char(' ') => {
                if self.playing() {
                    self.stop_sweep();
                } else {
                    self.start_sweep();
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.reset(),
            KeyCode::Left => self.selected = self.selected.prev(),
            KeyCode::Right => self.selected = self.selected.next(),
            KeyCode::Up => self.adjust(true),
            KeyCode::Down => self.adjust(false),
            _ => {}
        }
    }

    fn next_view(&mut self) {
        let views = View::all();
        self.view = views[(self.view.index() + 1) % views.len()];
    }

    fn prev_view(&mut self) {
        let views = View::all();
        self.view = views[(self.view.index() + views.len() - 1) % views.len()];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_mode_forces_zero_coefficients() {
        let mut app = App::new();
        app.params.beta = 0.9;
        app.set_mode(Mode::Raw);
        assert_eq!(app.params.beta, 0.0);
        assert_eq!(app.params.gamma, 0.0);
    }

    #[test]
    fn preset_recomputes_gamma_from_beta() {
        let mut app = App::new();
        app.set_mode(Mode::Nesterov);
        let expect = app.params.beta / (1.0 + app.params.beta);
        assert!((app.params.gamma - expect).abs() < 1e-12);
    }

    #[test]
    fn entering_free_mode_keeps_values() {
        let mut app = App::new();
        app.set_mode(Mode::Nesterov);
        let before = app.params;
        app.set_mode(Mode::Free);
        assert_eq!(app.params.beta, before.beta);
        assert_eq!(app.params.gamma, before.gamma);
        assert_eq!(app.params.alpha, before.alpha);
    }

    #[test]
    fn refresh_defaults_alpha_below_crossover() {
        let app = App::new();
        let p = &app.params;
        let range = stability_range(p.beta, p.gamma, p.eigval, p.mode);
        assert!((p.alpha - 0.99 * range.a_max_lp).abs() < 1e-12);
        assert!(p.alpha < range.a_max_lp);
    }

    #[test]
    fn optimal_mode_runs_second_pass() {
        let mut app = App::new();
        app.set_mode(Mode::Optimal);
        let p = &app.params;
        // α sits at its default under the range re-derived from the final γ
        let range = stability_range(p.beta, p.gamma, p.eigval, p.mode);
        assert!((p.alpha - 0.99 * range.a_max_lp).abs() < 1e-12);
        assert!(p.gamma < 0.0, "optimal γ is negative, got {}", p.gamma);
    }

    #[test]
    fn sweep_start_stop_idempotent() {
        let mut app = App::new();
        app.start_sweep();
        assert!(app.playing());
        app.on_tick();
        app.on_tick();
        let alpha_mid = app.params.alpha;
        app.start_sweep(); // no-op: does not rewind the frame counter
        app.on_tick();
        assert!(app.params.alpha > alpha_mid);
        app.stop_sweep();
        assert!(!app.playing());
        app.stop_sweep(); // no-op
        assert!(!app.playing());
    }

    #[test]
    fn sweep_covers_captured_range() {
        let mut app = App::new();
        app.start_sweep();
        app.on_tick();
        let p = &app.params;
        let range = stability_range(p.beta, p.gamma, p.eigval, p.mode);
        assert_eq!(p.alpha, range.a_min);
        for _ in 0..(SWEEP_FRAMES - 1) {
            app.on_tick();
        }
        assert!((app.params.alpha - range.a_max_hp_safe).abs() < 1e-12);
    }
}
