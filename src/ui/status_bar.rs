use crate::app::AppState;
use crate::ui::styles::{enabled_style, hint_style};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Duration;

/// Format a reminder interval as "2h", "30m", "45s" or "1h 30m"
pub fn format_interval(interval: Duration) -> String {
    let secs = interval.as_secs();
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    match (hours, minutes, seconds) {
        (0, 0, s) => format!("{}s", s),
        (0, m, 0) => format!("{}m", m),
        (h, 0, 0) => format!("{}h", h),
        (0, m, s) => format!("{}m {}s", m, s),
        (h, m, _) => format!("{}h {}m", h, m),
    }
}

/// Render the status line: last message on the left, notification toggle on the right
pub fn render_status_bar(f: &mut Frame, app: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(40)])
        .split(area);

    let message = app.status_message.clone().unwrap_or_default();
    f.render_widget(Paragraph::new(Line::styled(format!(" {}", message), hint_style())), chunks[0]);

    let toggle = if app.notifications_enabled() {
        Line::from(vec![
            Span::styled(app.notification_label(), enabled_style()),
            Span::styled(
                format!(" (every {}) ", format_interval(app.reminders.interval())),
                hint_style(),
            ),
        ])
    } else {
        Line::from(Span::styled(app.notification_label(), hint_style()))
    };
    f.render_widget(Paragraph::new(toggle).alignment(Alignment::Right), chunks[1]);
}
