//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, Gauge, Paragraph};

use super::runtime::App;
use super::style;
use crate::lot::Level;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let level_rows = u16::try_from(app.lot().levels().len()).unwrap_or(u16::MAX);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                           // header
            Constraint::Length(level_rows.saturating_add(2)), // spot grid
            Constraint::Min(8),                              // chart
            Constraint::Length(3),                           // gauge
            Constraint::Length(4),                           // status panel
            Constraint::Length(1),                           // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_levels(frame, app, chunks[1]);
    render_chart(frame, app, chunks[2]);
    render_gauge(frame, app, chunks[3]);
    render_status(frame, app, chunks[4]);
    render_footer(frame, chunks[5]);
}

/// Header bar: preset name, timestep progress, speed, run state.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let (state_icon, state_label) = if app.is_finished() {
        ("■", "DONE")
    } else if app.paused {
        ("‖", "PAUSED")
    } else {
        ("▶", "RUNNING")
    };

    let header = Line::from(vec![
        Span::styled(
            " PARKING-SIM ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            &app.lot_name,
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" ({})", app.preset_name)),
        Span::raw(format!(
            " │ t={}/{} │ {}ms │ {} {} ",
            app.timestep,
            app.total_steps,
            app.tick_interval_ms(),
            state_icon,
            state_label,
        )),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// One row per level; occupied spots show their type letter, free ones a dot.
fn render_levels(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app.lot().levels().iter().map(level_line).collect();
    let block = Block::default().title(" Levels ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn level_line(level: &Level) -> Line<'static> {
    let mut spans = vec![Span::raw(format!(
        " L{:<3}{:>3}/{:<3} ",
        level.floor(),
        level.occupied_count(),
        level.capacity()
    ))];
    for spot in level.spots() {
        let (glyph, color) = style::spot_style(spot.accepted_type());
        let span = if spot.is_available() {
            Span::styled(
                glyph.to_ascii_lowercase().to_string(),
                Style::default().fg(style::FREE_FG),
            )
        } else {
            Span::styled(
                glyph.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )
        };
        spans.push(span);
    }
    Line::from(spans)
}

/// Occupancy percentage over the rolling history.
fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let data: Vec<(f64, f64)> = app
        .history
        .iter()
        .map(|r| (r.timestep as f64, r.occupancy_pct()))
        .collect();

    let x_lo = data.first().map_or(0.0, |p| p.0);
    let x_hi = data.last().map_or(1.0, |p| p.0).max(x_lo + 1.0);

    let datasets = vec![
        Dataset::default()
            .name("Occupied %")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(style::OCCUPANCY_COLOR))
            .data(&data),
    ];

    let chart = Chart::new(datasets)
        .block(Block::default().title(" Occupancy ").borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .title("step")
                .bounds([x_lo, x_hi])
                .labels(vec![format!("{}", x_lo as u64), format!("{}", x_hi as u64)]),
        )
        .y_axis(
            Axis::default()
                .title("%")
                .bounds([0.0, 100.0])
                .labels(vec!["0".to_string(), "100".to_string()]),
        );

    frame.render_widget(chart, area);
}

/// Whole-lot occupancy gauge.
fn render_gauge(frame: &mut Frame, app: &App, area: Rect) {
    let ratio = app.occupancy_ratio().clamp(0.0, 1.0);
    let lot = app.lot();
    let gauge = Gauge::default()
        .block(Block::default().title(" Lot ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(style::occupancy_color(ratio)))
        .ratio(ratio)
        .label(format!(
            "{}/{} ({:.0}%)",
            lot.occupied_count(),
            lot.capacity(),
            ratio * 100.0
        ));
    frame.render_widget(gauge, area);
}

/// Latest step counters plus the running rejection total.
fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let lines = if let Some(r) = app.last_result() {
        let rejected_style = if app.total_rejected > 0 {
            Style::default().fg(style::REJECTED_FG)
        } else {
            Style::default()
        };
        vec![
            Line::from(format!(
                "  arrivals={:>2}  parked={:>2}  rejected={:>2}  departures={:>2}",
                r.arrivals, r.parked, r.rejected, r.departures,
            )),
            Line::from(vec![
                Span::raw("  total rejected="),
                Span::styled(app.total_rejected.to_string(), rejected_style),
            ]),
        ]
    } else {
        vec![Line::from("  Waiting for first step...")]
    };

    let block = Block::default().title(" Status ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q:Quit  Space:Pause  +/-:Speed  1/2/3:Preset  r:Restart",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::lot::SpotLayout;
    use crate::vehicle::Car;

    #[test]
    fn level_line_marks_occupied_spots() {
        let mut level = Level::with_layout(1, &SpotLayout::new(2, 1, 0));
        level.park_vehicle(&Car::new("ABC123")).ok();
        let text: String = level_line(&level)
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert!(text.ends_with("Ccm"), "got {text:?}");
    }

    #[test]
    fn render_draws_without_panicking() {
        let mut app = App::from_preset("demo");
        app.tick();
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();
    }

    #[test]
    fn header_shows_lot_name() {
        let app = App::from_preset("truck_stop");
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Truck Stop (truck_stop)"), "{screen}");
    }
}
