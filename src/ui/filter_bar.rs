use crate::domain::Filter;
use crate::ui::styles::{active_filter_style, hint_style};
use ratatui::{layout::Rect, text::Line, widgets::Tabs, Frame};

/// Labels for the filter controls, in bar order
pub fn filter_titles() -> Vec<String> {
    Filter::ALL
        .iter()
        .enumerate()
        .map(|(i, filter)| format!("{} {}", i + 1, filter.label()))
        .collect()
}

/// Render the filter bar with exactly one control highlighted
pub fn render_filter_bar(f: &mut Frame, filter: Filter, area: Rect) {
    let titles: Vec<Line> = filter_titles().into_iter().map(Line::from).collect();

    let tabs = Tabs::new(titles)
        .select(filter.index())
        .style(hint_style())
        .highlight_style(active_filter_style())
        .divider(" ");

    f.render_widget(tabs, area);
}
