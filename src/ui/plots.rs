//! Character-grid plots: time-domain response, the second-order root locus
//! in the complex plane, and the single-pole real-axis view.

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use crate::model::locus::{build_locus, Locus, DEFAULT_SAMPLES};
use crate::model::roots::solve_characteristic;
use crate::model::sim::simulate;
use crate::model::coeff;

/// Steps shown in the time-domain plot.
const PLOT_STEPS: usize = 120;

const PLOT_BG: Color = Color::Rgb(10, 10, 18);
const GRID_LINE: Color = Color::Rgb(25, 25, 40);
const TICK: Color = Color::Rgb(70, 70, 100);
const TICK_LABEL: Color = Color::Rgb(55, 65, 90);
const CIRCLE: Color = Color::Rgb(70, 70, 80);
const ERROR_TRACE: Color = Color::Rgb(210, 105, 30); // chocolate
const CHANGE_TRACE: Color = Color::Rgb(255, 127, 80); // coral
const TRAJECTORY: Color = Color::Rgb(154, 205, 50); // yellowgreen
const HP_TRAJECTORY: Color = Color::Rgb(220, 20, 60); // crimson
const ROOT1_MARK: Color = Color::Rgb(255, 69, 0); // orangered
const ROOT2_MARK: Color = Color::Rgb(80, 120, 255);
const STABLE_MARK: Color = Color::Rgb(80, 255, 80);
const UNSTABLE_MARK: Color = Color::Rgb(255, 60, 60);

// ── Plot grid ────────────────────────────────────────────────────────────────

/// A data-space to character-cell mapping over a rectangular region.
/// Non-finite and out-of-range points are dropped, never drawn or panicked
/// on, so degenerate parameter values just thin out the trace.
struct PlotGrid {
    cells: Vec<Vec<(char, Style)>>,
    w: usize,
    h: usize,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl PlotGrid {
    fn new(w: usize, h: usize, x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            cells: vec![vec![(' ', Style::default().bg(PLOT_BG)); w]; h],
            w,
            h,
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    fn col(&self, x: f64) -> Option<usize> {
        if !x.is_finite() {
            return None;
        }
        let f = (x - self.x_min) / (self.x_max - self.x_min);
        if !(0.0..=1.0).contains(&f) {
            return None;
        }
        Some(((f * (self.w - 1) as f64).round() as usize).min(self.w - 1))
    }

    fn row(&self, y: f64) -> Option<usize> {
        if !y.is_finite() {
            return None;
        }
        let f = (y - self.y_min) / (self.y_max - self.y_min);
        if !(0.0..=1.0).contains(&f) {
            return None;
        }
        // y grows upward, rows grow downward
        Some((((1.0 - f) * (self.h - 1) as f64).round() as usize).min(self.h - 1))
    }

    fn put(&mut self, x: f64, y: f64, ch: char, color: Color) {
        if let (Some(px), Some(py)) = (self.col(x), self.row(y)) {
            self.cells[py][px] = (ch, Style::default().fg(color).bg(PLOT_BG));
        }
    }

    /// Faint dot that yields to anything already drawn.
    fn put_soft(&mut self, x: f64, y: f64, ch: char, color: Color) {
        if let (Some(px), Some(py)) = (self.col(x), self.row(y)) {
            if matches!(self.cells[py][px].0, ' ' | '-' | '|' | '+') {
                self.cells[py][px] = (ch, Style::default().fg(color).bg(PLOT_BG));
            }
        }
    }

    /// Crosshair through the data-space origin (only the axes in range).
    fn crosshair(&mut self) {
        let style = Style::default().fg(GRID_LINE).bg(PLOT_BG);
        if let Some(cy) = self.row(0.0) {
            for x in 0..self.w {
                self.cells[cy][x] = ('-', style);
            }
        }
        if let Some(cx) = self.col(0.0) {
            for y in 0..self.h {
                self.cells[y][cx] = ('|', style);
            }
        }
        if let (Some(cx), Some(cy)) = (self.col(0.0), self.row(0.0)) {
            self.cells[cy][cx] = ('+', style);
        }
    }

    /// Tick marks and labels along the crosshair axes. Call after
    /// `crosshair`, before data, so traces draw over the labels.
    fn ticks(&mut self) {
        let tick_style = Style::default().fg(TICK).bg(PLOT_BG);
        let label_style = Style::default().fg(TICK_LABEL).bg(PLOT_BG);
        let (Some(cx), Some(cy)) = (self.col(0.0), self.row(0.0)) else {
            return;
        };

        let x_tick = nice_tick_interval((self.x_max - self.x_min) / 2.0);
        let mut val = self.x_min - self.x_min.rem_euclid(x_tick);
        while val <= self.x_max {
            if val != 0.0 {
                if let Some(px) = self.col(val) {
                    self.cells[cy][px] = ('+', tick_style);
                    if cy + 1 < self.h {
                        let label = format_tick_value(val);
                        let start = px.saturating_sub(label.len() / 2);
                        for (i, c) in label.chars().enumerate() {
                            let col = start + i;
                            if col < self.w && col != cx {
                                self.cells[cy + 1][col] = (c, label_style);
                            }
                        }
                    }
                }
            }
            val += x_tick;
        }

        let y_tick = nice_tick_interval((self.y_max - self.y_min) / 2.0);
        let mut val = self.y_min - self.y_min.rem_euclid(y_tick);
        while val <= self.y_max {
            if val != 0.0 {
                if let Some(py) = self.row(val) {
                    self.cells[py][cx] = ('+', tick_style);
                    let label = format_tick_value(val);
                    for (i, c) in label.chars().enumerate() {
                        let col = cx + 1 + i;
                        if col < self.w {
                            self.cells[py][col] = (c, label_style);
                        }
                    }
                }
            }
            val += y_tick;
        }
    }

    /// Unit circle reference, drawn softly so data overwrites it.
    fn unit_circle(&mut self) {
        for k in 0..=360 {
            let t = (k as f64).to_radians();
            self.put_soft(t.cos(), t.sin(), '·', CIRCLE);
        }
    }

    fn into_lines(self) -> Vec<Line<'static>> {
        self.cells
            .into_iter()
            .map(|row| {
                Line::from(
                    row.into_iter()
                        .map(|(ch, s)| Span::styled(String::from(ch), s))
                        .collect::<Vec<_>>(),
                )
            })
            .collect()
    }
}

/// Pick a "nice" tick interval (1, 2, or 5 × 10^n) yielding ~2-3 ticks per
/// half-axis.
fn nice_tick_interval(half_range: f64) -> f64 {
    if half_range <= 0.0 {
        return 1.0;
    }
    let rough = half_range / 3.0;
    let mag = 10.0_f64.powf(rough.log10().floor());
    let norm = rough / mag;
    let nice = if norm < 1.5 {
        1.0
    } else if norm < 3.5 {
        2.0
    } else if norm < 7.5 {
        5.0
    } else {
        10.0
    };
    nice * mag
}

/// Format a tick value: integers when whole, one decimal otherwise.
fn format_tick_value(v: f64) -> String {
    if (v - v.round()).abs() < 0.01 {
        format!("{:.0}", v)
    } else {
        format!("{:.1}", v)
    }
}

fn plot_block(title: String, border: Color, title_color: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(title)
        .title_style(Style::default().fg(title_color))
}

// ── Time-domain response ─────────────────────────────────────────────────────

pub fn render_response(frame: &mut Frame, app: &App, area: Rect) {
    let p = &app.params;
    let sim = simulate(p.beta, p.gamma, p.eigval, p.alpha, p.input, PLOT_STEPS, p.mode);

    let block = plot_block(
        format!(" iteration domain ({}) ", p.input.label()),
        Color::Rgb(120, 80, 40),
        Color::Rgb(255, 180, 120),
    );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (w, h) = (inner.width as usize, inner.height as usize);
    if w < 3 || h < 3 {
        return;
    }

    let peak = sim
        .xs
        .iter()
        .chain(&sim.ss)
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, |m, v| m.max(v.abs()));
    let ylim = (peak * 1.2).max(1.0);

    let mut grid = PlotGrid::new(w, h, 0.0, (PLOT_STEPS - 1) as f64, -ylim, ylim);
    grid.crosshair();
    grid.ticks();

    for (t, &s) in sim.ss.iter().enumerate() {
        grid.put_soft(t as f64, s, '·', CHANGE_TRACE);
    }
    for (t, &x) in sim.xs.iter().enumerate() {
        grid.put(t as f64, x, 'o', ERROR_TRACE);
    }

    frame.render_widget(Paragraph::new(grid.into_lines()), inner);
}

// ── Second-order root locus ──────────────────────────────────────────────────

pub fn render_root_plane(frame: &mut Frame, app: &App, area: Rect) {
    let p = &app.params;
    let locus = build_locus(p.beta, p.gamma, p.eigval, p.mode, DEFAULT_SAMPLES);
    let pole = coeff::pole(p.alpha, p.beta, p.gamma, p.eigval, p.mode);
    let (a1, a0) = coeff::jury_coeffs(pole, locus.range.eta, p.alpha, p.eigval, p.gamma);
    let current = solve_characteristic(a1, a0);

    let a0_prec = if p.mode.is_raw() { 0 } else { 3 };
    let block = plot_block(
        format!(" overall dynamics  z² - {:.3}z + {:.*} ", a1, a0_prec, a0),
        Color::Rgb(80, 80, 120),
        Color::Rgb(255, 200, 80),
    );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (w, h) = (inner.width as usize, inner.height as usize);
    if w < 3 || h < 3 {
        return;
    }

    let mut grid = PlotGrid::new(w, h, -1.0, 1.0, -1.2, 1.2);
    grid.crosshair();
    grid.ticks();
    grid.unit_circle();

    draw_root_trajectories(&mut grid, &locus, p.mode.is_raw());

    let mark = if current.stable { STABLE_MARK } else { UNSTABLE_MARK };
    grid.put(current.root1.re, current.root1.im, 'x', mark);
    grid.put(current.root2.re, current.root2.im, 'x', mark);

    frame.render_widget(Paragraph::new(grid.into_lines()), inner);
}

fn draw_root_trajectories(grid: &mut PlotGrid, locus: &Locus, raw: bool) {
    // raw mode plots the root paths flattened onto the real axis
    let im = |v: f64| if raw { 0.0 } else { v };

    for (r1, r2) in locus.full.root1.iter().zip(&locus.full.root2) {
        grid.put_soft(r1.re, im(r1.im), '.', TRAJECTORY);
        grid.put_soft(r2.re, im(r2.im), '.', TRAJECTORY);
    }
    for (r1, r2) in locus.highpass.root1.iter().zip(&locus.highpass.root2) {
        grid.put(r1.re, im(r1.im), '.', HP_TRAJECTORY);
        grid.put(r2.re, im(r2.im), '.', HP_TRAJECTORY);
    }

    // sweep endpoints for each root branch
    if let (Some(first), Some(last)) = (locus.full.root1.first(), locus.full.root1.last()) {
        grid.put(first.re, im(first.im), 'o', ROOT1_MARK);
        grid.put(last.re, im(last.im), 'o', ROOT1_MARK);
    }
    if let (Some(first), Some(last)) = (locus.full.root2.first(), locus.full.root2.last()) {
        grid.put(first.re, im(first.im), 'o', ROOT2_MARK);
        grid.put(last.re, im(last.im), 'o', ROOT2_MARK);
    }
}

// ── Single-pole axis ─────────────────────────────────────────────────────────

pub fn render_pole_axis(frame: &mut Frame, app: &App, area: Rect) {
    let p = &app.params;
    let locus = build_locus(p.beta, p.gamma, p.eigval, p.mode, DEFAULT_SAMPLES);
    let pole = coeff::pole(p.alpha, p.beta, p.gamma, p.eigval, p.mode);
    let class = coeff::classify(pole);

    let block = plot_block(
        " change-level single-pole dynamics ".to_string(),
        Color::Rgb(80, 80, 120),
        Color::Rgb(200, 120, 255),
    );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (w, h) = (inner.width as usize, inner.height as usize);
    if w < 3 || h < 3 {
        return;
    }

    let mut grid = PlotGrid::new(w, h, -2.0, 2.0, -1.0, 1.0);
    grid.crosshair();
    grid.ticks();
    grid.unit_circle();

    for &pl in &locus.full.poles {
        grid.put_soft(pl, 0.0, '.', TRAJECTORY);
    }
    for &pl in &locus.highpass.poles {
        grid.put(pl, 0.0, '.', HP_TRAJECTORY);
    }
    if let Some(&first) = locus.full.poles.first() {
        grid.put(first, 0.0, 'o', TRAJECTORY);
    }
    if let Some(&last) = locus.full.poles.last() {
        grid.put(last, 0.0, 'o', HP_TRAJECTORY);
    }

    let mark = if class.stable && !class.highpass {
        STABLE_MARK
    } else {
        UNSTABLE_MARK
    };
    grid.put(pole, 0.0, 'x', mark);

    frame.render_widget(Paragraph::new(grid.into_lines()), inner);
}
