pub mod panel;
pub mod plots;
pub mod tabs;

use ratatui::prelude::*;

use crate::app::{App, View};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Mode bar
            Constraint::Length(5), // Readouts
            Constraint::Min(8),    // Plots
            Constraint::Length(1), // Help
        ])
        .split(frame.area());

    tabs::render_tabs(frame, app, chunks[0]);
    panel::render_panel(frame, app, chunks[1]);

    match app.view {
        View::Overview => {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(chunks[2]);
            let right = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(cols[1]);
            plots::render_response(frame, app, cols[0]);
            plots::render_root_plane(frame, app, right[0]);
            plots::render_pole_axis(frame, app, right[1]);
        }
        View::Response => plots::render_response(frame, app, chunks[2]),
        View::RootLocus => plots::render_root_plane(frame, app, chunks[2]),
        View::PoleAxis => plots::render_pole_axis(frame, app, chunks[2]),
    }

    render_help(frame, chunks[3]);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let help = Line::from(vec![
        Span::styled(
            " ←→ param  ↑↓ adjust  1-6 mode  i input  space sweep  r reset  Tab view  q quit",
            Style::default().fg(Color::Rgb(100, 100, 130)),
        ),
    ]);
    frame.render_widget(ratatui::widgets::Paragraph::new(help), area);
}
