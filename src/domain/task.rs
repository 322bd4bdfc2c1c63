use serde::{Deserialize, Serialize};
use std::fmt;

/// Task identifier: a millisecond timestamp taken at creation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Trimmed, never empty, never edited after creation
    pub text: String,
    pub completed: bool,
}

impl Task {
    /// Build a new incomplete task. Returns `None` if the trimmed text is empty.
    pub fn new(id: TaskId, text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        Some(Self {
            id,
            text: text.to_string(),
            completed: false,
        })
    }

    /// Copy of this task with the completion flag flipped
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }
}

/// Hands out timestamp-shaped ids that never repeat within a process.
///
/// Two tasks created in the same millisecond would share a raw timestamp,
/// so each id is `max(now_ms, last + 1)`.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    /// Seed from existing tasks so new ids stay above anything already stored
    pub fn seeded_from(tasks: &[Task]) -> Self {
        Self {
            last: tasks.iter().map(|t| t.id.0).max().unwrap_or(0),
        }
    }

    pub fn next_id(&mut self) -> TaskId {
        self.next_at(chrono::Utc::now().timestamp_millis())
    }

    fn next_at(&mut self, now_ms: i64) -> TaskId {
        self.last = now_ms.max(self.last + 1);
        TaskId(self.last)
    }
}

/// Number of tasks not yet completed
pub fn count_incomplete(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| !t.completed).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_trims_text() {
        let task = Task::new(TaskId(1), "  Buy milk \n").unwrap();
        assert_eq!(task.text, "Buy milk");
        assert!(!task.completed);
    }

    #[test]
    fn test_new_task_rejects_blank_text() {
        assert!(Task::new(TaskId(1), "").is_none());
        assert!(Task::new(TaskId(1), "   ").is_none());
        assert!(Task::new(TaskId(1), "\t\n").is_none());
    }

    #[test]
    fn test_toggled_only_changes_completion() {
        let task = Task::new(TaskId(7), "Write report").unwrap();
        let toggled = task.toggled();

        assert_eq!(toggled.id, task.id);
        assert_eq!(toggled.text, task.text);
        assert!(toggled.completed);
        assert_eq!(toggled.toggled(), task);
    }

    #[test]
    fn test_ids_unique_within_same_millisecond() {
        let mut ids = IdGenerator::default();
        let a = ids.next_at(1_000);
        let b = ids.next_at(1_000);
        let c = ids.next_at(999);

        assert_eq!(a, TaskId(1_000));
        assert_eq!(b, TaskId(1_001));
        assert_eq!(c, TaskId(1_002));
    }

    #[test]
    fn test_ids_follow_clock_when_ahead() {
        let mut ids = IdGenerator::default();
        assert_eq!(ids.next_at(5_000), TaskId(5_000));
        assert_eq!(ids.next_at(9_000), TaskId(9_000));
    }

    #[test]
    fn test_seeded_generator_stays_above_existing() {
        let existing = vec![
            Task::new(TaskId(10), "a").unwrap(),
            Task::new(TaskId(50), "b").unwrap(),
        ];
        let mut ids = IdGenerator::seeded_from(&existing);
        assert_eq!(ids.next_at(20), TaskId(51));
    }

    #[test]
    fn test_count_incomplete() {
        let mut tasks = vec![
            Task::new(TaskId(1), "a").unwrap(),
            Task::new(TaskId(2), "b").unwrap(),
            Task::new(TaskId(3), "c").unwrap(),
        ];
        tasks[1].completed = true;
        assert_eq!(count_incomplete(&tasks), 2);
        assert_eq!(count_incomplete(&[]), 0);
    }

    #[test]
    fn test_json_shape() {
        let task = Task::new(TaskId(1700000000000), "Buy milk").unwrap();
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(json, r#"{"id":1700000000000,"text":"Buy milk","completed":false}"#);
    }
}
