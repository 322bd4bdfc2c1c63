use crate::domain::UiMode;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar for the current mode
pub fn render_keybindings(f: &mut Frame, mode: UiMode, area: Rect) {
    let hints = match mode {
        UiMode::Normal => Line::from(vec![
            Span::raw(" a add   "),
            Span::raw("↑/↓ select   "),
            Span::raw("Space toggle   "),
            Span::raw("1/2/3 filter   "),
            Span::raw("Tab next filter   "),
            Span::raw("n notifications   "),
            Span::raw("q quit"),
        ]),
        UiMode::EditingInput => Line::from(vec![
            Span::raw(" type a task   "),
            Span::raw("Enter add   "),
            Span::raw("Esc back to list"),
        ]),
        UiMode::PermissionPrompt => Line::from(vec![
            Span::raw(" y allow   "),
            Span::raw("n block   "),
            Span::raw("Esc not now"),
        ]),
    };

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}
