use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, ParamSelect};
use crate::model::bounds::stability_range;
use crate::model::roots::jury_stable;
use crate::model::{coeff, Mode};

const LABEL: Color = Color::Rgb(120, 120, 140);
const VALUE: Color = Color::Rgb(220, 220, 230);
const SELECTED: Color = Color::Rgb(255, 220, 80);
const LOWPASS: Color = Color::Rgb(154, 205, 50);
const HIGHPASS: Color = Color::Rgb(220, 20, 60);

fn param_span(app: &App, which: ParamSelect, text: String) -> Vec<Span<'static>> {
    let style = if app.selected == which {
        Style::default().fg(SELECTED).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(VALUE)
    };
    vec![
        Span::styled(
            format!(" {} ", which.label()),
            Style::default().fg(LABEL),
        ),
        Span::styled(text, style),
    ]
}

pub fn render_panel(frame: &mut Frame, app: &App, area: Rect) {
    let p = &app.params;
    let range = stability_range(p.beta, p.gamma, p.eigval, p.mode);
    let pole = coeff::pole(p.alpha, p.beta, p.gamma, p.eigval, p.mode);
    let gain = coeff::gain(p.alpha, p.beta, p.gamma, p.eigval, p.mode);
    let class = coeff::classify(pole);
    let (a1, a0) = coeff::jury_coeffs(pole, range.eta, p.alpha, p.eigval, p.gamma);
    let jury = jury_stable(a1, a0);
    let (g_lo, g_hi) = app.gamma_limits();

    let mut line1: Vec<Span> = Vec::new();
    line1.extend(param_span(app, ParamSelect::Beta, format!("{:.2}", p.beta)));
    line1.extend(param_span(app, ParamSelect::Gamma, format!("{:.2}", p.gamma)));
    if p.mode == Mode::Free {
        line1.push(Span::styled(
            format!(" [{:.2}, {:.2}]", g_lo, g_hi),
            Style::default().fg(LABEL),
        ));
    }
    line1.extend(param_span(app, ParamSelect::Eigval, format!("{:.2}", p.eigval)));
    line1.extend(param_span(app, ParamSelect::Alpha, format!("{:.3}", p.alpha)));
    line1.push(Span::styled(
        format!("  α∈(0, {:.3})", range.a_max_lp),
        Style::default().fg(LABEL),
    ));

    let pole_color = if class.highpass { HIGHPASS } else { LOWPASS };
    let pole_range = if p.mode.is_raw() {
        "(-0.5, 0)".to_string()
    } else {
        format!("(0, {:.3})", p.beta)
    };
    let a0_prec = if p.mode.is_raw() { 0 } else { 3 };
    let line2 = vec![
        Span::styled(" pole ", Style::default().fg(LABEL)),
        Span::styled(
            format!("{:.3}", pole),
            Style::default().fg(pole_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {}", pole_range), Style::default().fg(LABEL)),
        Span::styled("  gain ", Style::default().fg(LABEL)),
        Span::styled(format!("{:.3}", gain), Style::default().fg(VALUE)),
        Span::styled("  ", Style::default()),
        Span::styled(
            if class.highpass { "Highpass" } else { "Lowpass" },
            Style::default().fg(pole_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  z² - ", Style::default().fg(LABEL)),
        Span::styled(format!("{:.3}", a1), Style::default().fg(VALUE)),
        Span::styled("z + ", Style::default().fg(LABEL)),
        Span::styled(format!("{:.*}", a0_prec, a0), Style::default().fg(VALUE)),
        Span::styled("  Jury ", Style::default().fg(LABEL)),
        Span::styled(
            if jury { "stable" } else { "unstable" },
            Style::default()
                .fg(if jury { LOWPASS } else { HIGHPASS })
                .add_modifier(Modifier::BOLD),
        ),
    ];

    let line3 = vec![
        Span::styled(" input ", Style::default().fg(LABEL)),
        Span::styled(p.input.label().to_string(), Style::default().fg(VALUE)),
        Span::styled("  sweep ", Style::default().fg(LABEL)),
        Span::styled(
            if app.playing() { "▶ running" } else { "■ stopped" },
            Style::default().fg(if app.playing() { LOWPASS } else { LABEL }),
        ),
        Span::styled("  view ", Style::default().fg(LABEL)),
        Span::styled(
            app.view.title().trim().to_string(),
            Style::default().fg(VALUE),
        ),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 60, 80)));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(
        Paragraph::new(vec![Line::from(line1), Line::from(line2), Line::from(line3)]),
        inner,
    );
}
