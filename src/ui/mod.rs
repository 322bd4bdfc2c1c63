pub mod filter_bar;
pub mod input_line;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod modal;
pub mod status_bar;
pub mod styles;

use crate::app::AppState;
use crate::domain::UiMode;
use filter_bar::render_filter_bar;
use input_line::render_input_line;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use modal::render_permission_prompt;
use ratatui::Frame;
use status_bar::render_status_bar;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &mut AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, app.ui_mode, layout.keybindings_area);
    render_input_line(f, app, layout.input_area);
    render_filter_bar(f, app.filter, layout.filter_area);
    render_list_pane(f, app, layout.list_area);
    render_status_bar(f, app, layout.status_area);

    if app.ui_mode == UiMode::PermissionPrompt {
        render_permission_prompt(f, size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Filter;
    use crate::notifications::RecordingNotifier;
    use crate::persistence::MemoryStorage;
    use crate::reminder::ReminderScheduler;
    use crate::ticker::ManualClock;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn create_test_app() -> AppState {
        AppState::load(
            Box::new(MemoryStorage::default()),
            Box::new(RecordingNotifier::new()),
            Box::new(ManualClock::new()),
            ReminderScheduler::new(Duration::from_secs(60)),
        )
    }

    fn draw(app: &mut AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut screen = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                screen.push_str(buffer.get(x, y).symbol());
            }
            screen.push('\n');
        }
        screen
    }

    #[test]
    fn test_render_shows_visible_tasks() {
        let mut app = create_test_app();
        app.add_task("Buy milk").unwrap();
        app.add_task("Call mom").unwrap();
        let id = app.tasks[1].id;
        app.toggle_task(id).unwrap();

        let screen = draw(&mut app);
        assert!(screen.contains("[ ] Buy milk"));
        assert!(screen.contains("[x] Call mom"));
        assert!(screen.contains("Tasks (1 open)"));

        app.set_filter(Filter::Active);
        let screen = draw(&mut app);
        assert!(screen.contains("Buy milk"));
        assert!(!screen.contains("Call mom"));
    }

    #[test]
    fn test_render_records_list_area() {
        let mut app = create_test_app();
        draw(&mut app);
        assert_eq!(app.list_area.y, 5);
        assert_eq!(app.list_area.width, 80);
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut app = create_test_app();
        app.add_task("Buy milk").unwrap();

        let first = draw(&mut app);
        let second = draw(&mut app);
        assert_eq!(first, second);
        assert_eq!(app.tasks.len(), 1);
    }

    #[test]
    fn test_render_permission_prompt() {
        let mut app = create_test_app();
        app.toggle_notifications().unwrap();

        let screen = draw(&mut app);
        assert!(screen.contains("[y]"));
        assert!(screen.contains("Not now"));
    }

    #[test]
    fn test_render_empty_hint() {
        let mut app = create_test_app();
        let screen = draw(&mut app);
        assert!(screen.contains("No tasks yet"));
    }
}
