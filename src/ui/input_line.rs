use crate::app::AppState;
use crate::domain::UiMode;
use crate::ui::styles::{border_style, focused_border_style, hint_style, modal_title_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the new-task input line
pub fn render_input_line(f: &mut Frame, app: &AppState, area: Rect) {
    let editing = app.ui_mode == UiMode::EditingInput;

    let line = if editing {
        Line::from(vec![
            Span::raw("> "),
            Span::raw(app.input.clone()),
            Span::styled("█", modal_title_style()), // Cursor
        ])
    } else if app.input.is_empty() {
        Line::styled("  What needs to be done? (press a)", hint_style())
    } else {
        Line::from(vec![Span::raw("  "), Span::raw(app.input.clone())])
    };

    let border = if editing {
        focused_border_style()
    } else {
        border_style()
    };

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(Span::styled(" New task ", title_style())),
    );
    f.render_widget(paragraph, area);
}
