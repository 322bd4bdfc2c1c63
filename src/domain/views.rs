use super::enums::Filter;
use super::task::{Task, TaskId};

/// One visible row of the task list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskRow<'a> {
    pub id: TaskId,
    pub text: &'a str,
    pub completed: bool,
}

/// Compute the rows shown for a filter, in stored order.
///
/// Pure: calling it repeatedly on the same input gives the same rows.
pub fn visible_rows(tasks: &[Task], filter: Filter) -> Vec<TaskRow<'_>> {
    tasks
        .iter()
        .filter(|task| filter.matches(task.completed))
        .map(|task| TaskRow {
            id: task.id,
            text: &task.text,
            completed: task.completed,
        })
        .collect()
}

/// Checkbox glyph for a row
pub fn check_glyph(completed: bool) -> &'static str {
    if completed {
        "[x]"
    } else {
        "[ ]"
    }
}
