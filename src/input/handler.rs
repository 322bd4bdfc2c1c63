use crate::app::{AppEvent, AppState};
use crate::domain::{Filter, PermissionResponse, UiMode};
use crate::ui::list_pane::row_at;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::EditingInput => handle_input_mode(app, key),
        UiMode::PermissionPrompt => handle_permission_prompt(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_selection_up();
            Ok(false)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection_down();
            Ok(false)
        }

        // Toggle selected task
        KeyCode::Char(' ') | KeyCode::Enter => {
            if let Some(id) = app.selected_task_id() {
                app.dispatch(AppEvent::ToggleTask(id))?;
            }
            Ok(false)
        }

        // Focus the input line
        KeyCode::Char('a') | KeyCode::Char('i') => {
            app.start_input();
            Ok(false)
        }

        // Filters
        KeyCode::Char('1') => {
            app.dispatch(AppEvent::SetFilter(Filter::All))?;
            Ok(false)
        }
        KeyCode::Char('2') => {
            app.dispatch(AppEvent::SetFilter(Filter::Active))?;
            Ok(false)
        }
        KeyCode::Char('3') => {
            app.dispatch(AppEvent::SetFilter(Filter::Completed))?;
            Ok(false)
        }
        KeyCode::Tab => {
            app.dispatch(AppEvent::SetFilter(app.filter.next()))?;
            Ok(false)
        }

        // Notifications on/off
        KeyCode::Char('n') | KeyCode::Char('N') => {
            app.dispatch(AppEvent::ToggleNotifications)?;
            Ok(false)
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Ok(true),

        _ => Ok(false),
    }
}

/// Handle keys while typing into the input line
fn handle_input_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Submit
        KeyCode::Enter => {
            let text = app.input.clone();
            app.dispatch(AppEvent::AddTask(text))?;
            Ok(false)
        }

        // Leave the input line, keeping its text
        KeyCode::Esc => {
            app.stop_input();
            Ok(false)
        }

        KeyCode::Backspace => {
            app.input_backspace();
            Ok(false)
        }

        KeyCode::Char(c) => {
            app.input_add_char(c);
            Ok(false)
        }

        _ => Ok(false),
    }
}

/// Handle keys while the permission prompt is open
fn handle_permission_prompt(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    let response = match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => PermissionResponse::Granted,
        KeyCode::Char('n') | KeyCode::Char('N') => PermissionResponse::Denied,
        KeyCode::Esc => PermissionResponse::Dismissed,
        _ => return Ok(false),
    };
    app.dispatch(AppEvent::PermissionAnswered(response))?;
    Ok(false)
}

/// Handle mouse events: a left click on a list row toggles that task
pub fn handle_mouse(app: &mut AppState, mouse: MouseEvent) -> Result<()> {
    if app.ui_mode == UiMode::PermissionPrompt {
        return Ok(());
    }
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return Ok(());
    }

    let rows = app.visible_rows().len();
    let Some(index) = row_at(app.list_area, app.list_offset, rows, mouse.column, mouse.row) else {
        return Ok(());
    };

    app.selected_index = index;
    if let Some(id) = app.selected_task_id() {
        app.dispatch(AppEvent::ToggleTask(id))?;
    }
    Ok(())
}
