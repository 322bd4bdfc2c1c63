use crate::domain::{count_incomplete, Permission, Task};
use crate::notifications::Notification;
use crate::ticker::IntervalTimer;
use std::time::{Duration, Instant};

/// Default time between reminders (two hours)
pub const DEFAULT_REMINDER_SECS: u64 = 2 * 60 * 60;

/// Periodic reminder about open tasks.
///
/// Holds at most one [`IntervalTimer`]; the scheduler is enabled exactly
/// when that timer exists.
#[derive(Debug, Clone)]
pub struct ReminderScheduler {
    interval: Duration,
    timer: Option<IntervalTimer>,
}

impl ReminderScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            timer: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Start (or restart) the timer. Any running timer is replaced, never duplicated.
    pub fn start(&mut self, now: Instant) {
        if self.timer.is_some() {
            tracing::debug!("replacing running reminder timer");
        }
        let timer = IntervalTimer::start(now, self.interval);
        tracing::info!(period_secs = timer.period().as_secs(), "reminder timer started");
        self.timer = Some(timer);
    }

    pub fn stop(&mut self) {
        if self.timer.take().is_some() {
            tracing::info!("reminder timer stopped");
        }
    }

    /// Advance the timer; returns the reminder to raise for this firing, if any.
    ///
    /// A firing with nothing open, or without permission, does nothing and
    /// leaves the timer running.
    pub fn poll(&mut self, now: Instant, tasks: &[Task], permission: Permission) -> Option<Notification> {
        let timer = self.timer.as_mut()?;
        if !timer.poll(now) {
            return None;
        }
        reminder_for(tasks, permission)
    }
}

/// The reminder a firing should raise given current state
pub fn reminder_for(tasks: &[Task], permission: Permission) -> Option<Notification> {
    let incomplete = count_incomplete(tasks);
    if incomplete > 0 && permission.is_granted() {
        Some(Notification::reminder(incomplete))
    } else {
        None
    }
}
