use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
    Frame,
};

use crate::catalog::SessionTime;
use crate::menu::Menu;
use crate::session::{Boundary, TimerView};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;
const BAR_WIDTH: u16 = 40;

/// Filled fraction of the progress bar: elapsed over total, saturating to
/// full once the countdown has run out, empty for a zero-length session.
pub fn progress_ratio(total_seconds: u32, remaining_seconds: u32) -> f64 {
    if total_seconds == 0 {
        return 0.0;
    }
    let elapsed = total_seconds.saturating_sub(remaining_seconds);
    if remaining_seconds == 0 && elapsed > 0 {
        return 1.0;
    }
    f64::from(elapsed) / f64::from(total_seconds)
}

fn format_mmss(minutes: u32, seconds: u32) -> String {
    format!("{minutes:02}:{seconds:02}")
}

fn padded(area: Rect) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([Constraint::Min(0)])
        .split(area);
    chunks[0]
}

/// Full timer screen: title, countdown, progress bar, control legend, status.
/// Pure presentation of controller-computed values.
pub fn draw_timer(f: &mut Frame, view: &TimerView) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::Gray);

    let area = padded(f.area());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(1),
            Constraint::Length(1), // time
            Constraint::Length(1), // progress bar
            Constraint::Length(1),
            Constraint::Length(1), // control legend
            Constraint::Length(1),
            Constraint::Length(1), // status
            Constraint::Min(0),
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(Span::styled("Pomodoro Timer", bold)),
        chunks[0],
    );
    f.render_widget(
        Paragraph::new(format!(
            "Time: {}",
            format_mmss(view.minutes, view.seconds)
        )),
        chunks[2],
    );

    let bar_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(BAR_WIDTH), Constraint::Min(0)])
        .split(chunks[3])[0];
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Green).bg(Color::DarkGray))
        .ratio(progress_ratio(view.total_seconds, view.remaining_seconds))
        .label("");
    f.render_widget(gauge, bar_area);

    f.render_widget(
        Paragraph::new(Span::styled(
            "[s] Start/Pause  [r] Reset  [q] Quit",
            dim,
        )),
        chunks[5],
    );
    f.render_widget(
        Paragraph::new(format!("Status: {}", view.status)),
        chunks[7],
    );
}

/// Duration menu: prompt, options with the highlighted row reversed, the
/// trailing Quit slot when allowed, and the navigation help line.
pub fn draw_menu(f: &mut Frame, menu: &Menu) {
    let reversed = Style::default().add_modifier(Modifier::REVERSED);
    let dim = Style::default().fg(Color::Gray);

    let mut lines = vec![Line::from(menu.prompt().to_string()), Line::default()];
    for (i, label) in menu.labels().iter().enumerate() {
        let style = if i == menu.highlighted() {
            reversed
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(format!("  {label}"), style)));
    }
    if menu.allow_quit() {
        let style = if menu.highlighted() == menu.labels().len() {
            reversed
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled("  Quit", style)));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Use UP/DOWN to select, ENTER to confirm",
        dim,
    )));

    f.render_widget(Paragraph::new(lines), padded(f.area()));
}

/// Phase-boundary prompt, blocking the loop until dismissed or declined
pub fn draw_confirm(f: &mut Frame, boundary: Boundary, study: SessionTime, brk: SessionTime) {
    let (message, detail) = match boundary {
        Boundary::StudyComplete => (
            "Study session complete! Time for a break.",
            format!("Break time: {}", format_mmss(brk.minutes, brk.seconds)),
        ),
        Boundary::BreakComplete => (
            "Break complete! Press any key to start a new study session.",
            format!("Study time: {}", format_mmss(study.minutes, study.seconds)),
        ),
    };

    let lines = vec![
        Line::from(message),
        Line::default(),
        Line::from(detail),
        Line::default(),
        Line::from(Span::styled(
            "Press any key to continue, or 'q' to exit...",
            Style::default().fg(Color::Gray),
        )),
    ];
    f.render_widget(Paragraph::new(lines), padded(f.area()));
}
