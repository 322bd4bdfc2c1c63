use crate::domain::{
    visible_rows, Filter, IdGenerator, Permission, PermissionResponse, Task, TaskId, TaskRow, UiMode,
};
use crate::notifications::{Notification, Notifier};
use crate::persistence::{load_metadata, load_tasks, save_permission, save_tasks, Storage};
use crate::reminder::ReminderScheduler;
use crate::ticker::Clock;
use anyhow::{Context, Result};
use ratatui::layout::Rect;

pub const ENABLE_LABEL: &str = "🔔 Enable notifications";
pub const DISABLE_LABEL: &str = "🔕 Disable notifications";

/// Everything that can change application state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Submit the given input text as a new task
    AddTask(String),
    ToggleTask(TaskId),
    SetFilter(Filter),
    ToggleNotifications,
    /// The user answered the permission prompt
    PermissionAnswered(PermissionResponse),
    /// Periodic wake-up from the event loop
    Tick,
}

/// Main application state
pub struct AppState {
    pub tasks: Vec<Task>,
    pub filter: Filter,
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub input: String,
    pub permission: Permission,
    pub reminders: ReminderScheduler,
    pub status_message: Option<String>,

    // Where the list was last drawn, for mouse hit-testing
    pub list_area: Rect,
    pub list_offset: usize,

    ids: IdGenerator,
    storage: Box<dyn Storage>,
    notifier: Box<dyn Notifier>,
    clock: Box<dyn Clock>,
}

impl AppState {
    /// Load tasks and the remembered permission from storage
    pub fn load(
        mut storage: Box<dyn Storage>,
        notifier: Box<dyn Notifier>,
        clock: Box<dyn Clock>,
        reminders: ReminderScheduler,
    ) -> Self {
        let tasks = load_tasks(storage.as_mut());
        let permission = load_metadata(storage.as_ref()).notification_permission;
        tracing::info!(tasks = tasks.len(), %permission, "state loaded");

        Self {
            ids: IdGenerator::seeded_from(&tasks),
            tasks,
            filter: Filter::All,
            selected_index: 0,
            ui_mode: UiMode::Normal,
            input: String::new(),
            permission,
            reminders,
            status_message: None,
            list_area: Rect::default(),
            list_offset: 0,
            storage,
            notifier,
            clock,
        }
    }

    /// Re-arm reminders left on by a previous session
    pub fn resume_notifications(&mut self) {
        if self.permission.is_granted() && self.notifier.is_supported() {
            self.reminders.start(self.clock.now());
        }
    }

    /// Apply one event
    pub fn dispatch(&mut self, event: AppEvent) -> Result<()> {
        tracing::trace!(?event, "dispatch");
        match event {
            AppEvent::AddTask(text) => self.add_task(&text).map(|_| ()),
            AppEvent::ToggleTask(id) => self.toggle_task(id),
            AppEvent::SetFilter(filter) => {
                self.set_filter(filter);
                Ok(())
            }
            AppEvent::ToggleNotifications => self.toggle_notifications(),
            AppEvent::PermissionAnswered(response) => self.resolve_permission(response),
            AppEvent::Tick => {
                self.tick();
                Ok(())
            }
        }
    }

    /// Add a task from raw input text; returns its id, or `None` for blank input
    pub fn add_task(&mut self, text: &str) -> Result<Option<TaskId>> {
        let Some(task) = Task::new(self.ids.next_id(), text) else {
            return Ok(None);
        };
        let id = task.id;
        let body = task.text.clone();

        let mut tasks = self.tasks.clone();
        tasks.push(task);
        self.commit(tasks)?;
        self.input.clear();
        tracing::info!(%id, "task added");

        if self.permission.is_granted() {
            self.show(&Notification::new_task(&body));
        }

        Ok(Some(id))
    }

    /// Flip completion of a task. Unknown ids are ignored.
    pub fn toggle_task(&mut self, id: TaskId) -> Result<()> {
        let Some(index) = self.tasks.iter().position(|t| t.id == id) else {
            tracing::debug!(%id, "toggle for unknown task ignored");
            return Ok(());
        };

        let mut tasks = self.tasks.clone();
        tasks[index] = tasks[index].toggled();
        self.commit(tasks)?;
        self.clamp_selection();
        Ok(())
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.clamp_selection();
    }

    /// Rows currently shown in the list
    pub fn visible_rows(&self) -> Vec<TaskRow<'_>> {
        visible_rows(&self.tasks, self.filter)
    }

    pub fn notifications_enabled(&self) -> bool {
        self.reminders.is_running()
    }

    /// Label for the notification toggle
    pub fn notification_label(&self) -> &'static str {
        if self.notifications_enabled() {
            DISABLE_LABEL
        } else {
            ENABLE_LABEL
        }
    }

    /// Enable or disable reminders.
    ///
    /// Enabling asks for permission first; with no stored answer this opens
    /// the permission prompt and the rest happens in [`Self::resolve_permission`].
    pub fn toggle_notifications(&mut self) -> Result<()> {
        if self.permission.is_granted() && self.reminders.is_running() {
            self.reminders.stop();
            self.status_message = Some("Reminders off".to_string());
            return Ok(());
        }

        if !self.notifier.is_supported() {
            self.status_message = Some("Notifications are not available on this platform".to_string());
            return Ok(());
        }

        match self.permission {
            Permission::Granted => self.resolve_permission(PermissionResponse::Granted),
            Permission::Denied => self.resolve_permission(PermissionResponse::Denied),
            Permission::Default => {
                self.ui_mode = UiMode::PermissionPrompt;
                Ok(())
            }
        }
    }

    /// Finish a permission request
    pub fn resolve_permission(&mut self, response: PermissionResponse) -> Result<()> {
        if self.ui_mode == UiMode::PermissionPrompt {
            self.ui_mode = UiMode::Normal;
        }

        let permission = match response {
            PermissionResponse::Granted => Permission::Granted,
            PermissionResponse::Denied => Permission::Denied,
            PermissionResponse::Dismissed => return Ok(()),
        };

        if permission != self.permission {
            save_permission(self.storage.as_mut(), permission)
                .context("Failed to save notification permission")?;
            self.permission = permission;
            tracing::info!(%permission, "notification permission changed");
        }

        if permission.is_granted() {
            self.reminders.start(self.clock.now());
            self.status_message = Some("Reminders on".to_string());
        } else {
            self.status_message =
                Some("Notifications are blocked (run `taskpad permission reset`)".to_string());
        }
        Ok(())
    }

    /// Let the reminder timer fire if it is due
    pub fn tick(&mut self) {
        let now = self.clock.now();
        if let Some(reminder) = self.reminders.poll(now, &self.tasks, self.permission) {
            self.show(&reminder);
        }
    }

    fn show(&self, notification: &Notification) {
        if let Err(e) = self.notifier.show(notification) {
            tracing::warn!(error = %e, kind = ?notification.kind, "failed to show notification");
        }
    }

    /// Write the full list through to storage, then make it current.
    /// On failure `self.tasks` keeps its previous contents.
    fn commit(&mut self, tasks: Vec<Task>) -> Result<()> {
        save_tasks(self.storage.as_mut(), &tasks).context("Failed to save tasks")?;
        self.tasks = tasks;
        Ok(())
    }

    /// Id of the selected visible row
    pub fn selected_task_id(&self) -> Option<TaskId> {
        self.visible_rows().get(self.selected_index).map(|row| row.id)
    }

    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_selection_down(&mut self) {
        let count = self.visible_rows().len();
        if self.selected_index + 1 < count {
            self.selected_index += 1;
        }
    }

    /// Keep the selection inside the visible rows
    fn clamp_selection(&mut self) {
        let count = self.visible_rows().len();
        if self.selected_index >= count {
            self.selected_index = count.saturating_sub(1);
        }
    }

    pub fn start_input(&mut self) {
        self.ui_mode = UiMode::EditingInput;
    }

    pub fn stop_input(&mut self) {
        self.ui_mode = UiMode::Normal;
    }

    pub fn input_add_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn input_backspace(&mut self) {
        self.input.pop();
    }
}
