use crate::app::AppState;
use crate::domain::{check_glyph, count_incomplete, TaskRow};
use crate::ui::styles::{border_style, default_style, done_style, hint_style, selected_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Render the task list pane
pub fn render_list_pane(f: &mut Frame, app: &mut AppState, area: Rect) {
    let title = format!(" Tasks ({} open) ", count_incomplete(&app.tasks));
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()));

    app.list_area = area;

    let rows = app.visible_rows();
    let row_count = rows.len();

    if rows.is_empty() {
        let hint = if app.tasks.is_empty() {
            "No tasks yet. Press a to add one."
        } else {
            "Nothing matches this filter."
        };
        let paragraph = Paragraph::new(Line::styled(hint, hint_style())).block(block);
        f.render_widget(paragraph, area);
        app.list_offset = 0;
        return;
    }

    let items: Vec<ListItem> = rows.iter().map(|row| ListItem::new(create_task_line(row))).collect();

    let list = List::new(items)
        .block(block)
        .style(default_style())
        .highlight_style(selected_style());

    let mut state = ListState::default()
        .with_selected(Some(app.selected_index.min(row_count - 1)))
        .with_offset(app.list_offset);
    f.render_stateful_widget(list, area, &mut state);
    app.list_offset = state.offset();
}

/// Create a single line for a task
/// Format: [x] Buy milk
fn create_task_line(row: &TaskRow) -> Line<'static> {
    let style = if row.completed {
        done_style()
    } else {
        default_style()
    };

    Line::from(vec![
        Span::raw(format!("{} ", check_glyph(row.completed))),
        Span::styled(row.text.to_string(), style),
    ])
}

/// Map a screen position to the index of the visible row drawn there.
///
/// `area` is the bordered list pane and `offset` the first row shown.
/// Positions on the border or below the last row map to nothing.
pub fn row_at(area: Rect, offset: usize, rows: usize, column: u16, row: u16) -> Option<usize> {
    let left = area.x.saturating_add(1);
    let right = area.x.saturating_add(area.width).saturating_sub(1);
    let top = area.y.saturating_add(1);
    let bottom = area.y.saturating_add(area.height).saturating_sub(1);

    if column < left || column >= right || row < top || row >= bottom {
        return None;
    }

    let index = offset + (row - top) as usize;
    (index < rows).then_some(index)
}
