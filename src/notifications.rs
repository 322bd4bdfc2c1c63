//! Desktop notification support
//! Uses osascript on macOS and notify-send on Linux

use anyhow::Result;
#[cfg(any(target_os = "macos", target_os = "linux"))]
use anyhow::Context;
#[cfg(any(target_os = "macos", target_os = "linux"))]
use std::process::Command;

/// Icon shared by every notification
pub const NOTIFICATION_ICON: &str = "appointment-soon";

pub const NEW_TASK_TITLE: &str = "✅ New task";
pub const REMINDER_TITLE: &str = "⏰ Reminder";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    NewTask,
    Reminder,
}

/// A notification ready to be shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub icon: &'static str,
}

impl Notification {
    /// Announces a task that was just added
    pub fn new_task(text: &str) -> Self {
        Self {
            kind: NotificationKind::NewTask,
            title: NEW_TASK_TITLE.to_string(),
            body: text.to_string(),
            icon: NOTIFICATION_ICON,
        }
    }

    /// Summarizes how many tasks are still open
    pub fn reminder(incomplete: usize) -> Self {
        Self {
            kind: NotificationKind::Reminder,
            title: REMINDER_TITLE.to_string(),
            body: format!("You have {} incomplete tasks!", incomplete),
            icon: NOTIFICATION_ICON,
        }
    }
}

/// Something that can put a notification in front of the user
pub trait Notifier {
    /// Whether this platform can show notifications at all
    fn is_supported(&self) -> bool;

    fn show(&self, notification: &Notification) -> Result<()>;
}

/// Shows notifications through the desktop's notification service
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn is_supported(&self) -> bool {
        cfg!(any(target_os = "macos", target_os = "linux"))
    }

    fn show(&self, notification: &Notification) -> Result<()> {
        #[cfg(target_os = "macos")]
        {
            let script = format!(
                r#"display notification "{}" with title "{}""#,
                escape_applescript(&notification.body),
                escape_applescript(&notification.title),
            );

            run_captured(
                Command::new("osascript")
                    .arg("-e")
                    .arg(&script),
                "osascript",
            )?;
        }

        #[cfg(target_os = "linux")]
        {
            run_captured(
                Command::new("notify-send")
                    .arg("--icon")
                    .arg(notification.icon)
                    .arg(&notification.title)
                    .arg(&notification.body),
                "notify-send",
            )?;
        }

        #[cfg(not(any(target_os = "macos", target_os = "linux")))]
        {
            // No notification service on other platforms
            let _ = notification;
        }

        Ok(())
    }
}

/// Run a notification helper with its output captured, so nothing it prints
/// lands on the terminal screen
#[cfg(any(target_os = "macos", target_os = "linux"))]
fn run_captured(command: &mut Command, name: &str) -> Result<()> {
    let output = command
        .output()
        .with_context(|| format!("Failed to run {}", name))?;
    if !output.status.success() {
        anyhow::bail!(
            "{} exited with {}: {}",
            name,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(())
}

#[cfg(target_os = "macos")]
fn escape_applescript(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
pub use recording::RecordingNotifier;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_notification() {
        let n = Notification::new_task("Buy milk");
        assert_eq!(n.kind, NotificationKind::NewTask);
        assert_eq!(n.title, NEW_TASK_TITLE);
        assert_eq!(n.body, "Buy milk");
        assert_eq!(n.icon, NOTIFICATION_ICON);
    }

    #[test]
    fn test_reminder_notification() {
        let n = Notification::reminder(3);
        assert_eq!(n.kind, NotificationKind::Reminder);
        assert_eq!(n.title, REMINDER_TITLE);
        assert_eq!(n.body, "You have 3 incomplete tasks!");
    }

    #[test]
    fn test_recording_notifier() {
        let notifier = RecordingNotifier::new();
        let view = notifier.clone();
        notifier.show(&Notification::reminder(1)).unwrap();

        assert_eq!(view.shown().len(), 1);
        view.clear();
        assert!(notifier.shown().is_empty());
        assert!(!RecordingNotifier::unsupported().is_supported());
    }

    #[cfg(any(target_os = "macos", target_os = "linux"))]
    #[test]
    fn test_helper_stderr_is_captured_into_error() {
        let err = run_captured(
            Command::new("sh").arg("-c").arg("echo 'no dbus session' >&2; exit 3"),
            "notify-send",
        )
        .unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("notify-send exited with"));
        assert!(message.ends_with("no dbus session"));
    }

    #[cfg(any(target_os = "macos", target_os = "linux"))]
    #[test]
    fn test_missing_helper_is_an_error() {
        let mut command = Command::new("taskpad-no-such-helper");
        let err = run_captured(&mut command, "helper").unwrap_err();
        assert!(err.to_string().contains("Failed to run helper"));
    }
}
