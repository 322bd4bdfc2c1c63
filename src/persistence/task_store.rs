use super::storage::{Storage, StoreError};
use crate::domain::Task;
use std::io::ErrorKind;

/// Storage key holding the task list
pub const TASKS_KEY: &str = "tasks";

/// Write the full task list under [`TASKS_KEY`]
pub fn save_tasks(storage: &mut dyn Storage, tasks: &[Task]) -> Result<(), StoreError> {
    let json = serde_json::to_string(tasks).map_err(|source| StoreError::Encode {
        key: TASKS_KEY.to_string(),
        source,
    })?;
    storage.set(TASKS_KEY, &json)
}

/// What the tasks key currently holds
enum Stored {
    Tasks(Vec<Task>),
    /// Could not be read at all; nothing to preserve
    Unreadable(StoreError),
    /// Present but not a task list (bad JSON, wrong shape, not UTF-8)
    Corrupt(String),
}

fn read_stored(storage: &dyn Storage) -> Stored {
    let raw = match storage.get(TASKS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Stored::Tasks(Vec::new()),
        Err(StoreError::Io { source, .. }) if source.kind() == ErrorKind::InvalidData => {
            return Stored::Corrupt(source.to_string());
        }
        Err(e) => return Stored::Unreadable(e),
    };

    match serde_json::from_str::<Option<Vec<Task>>>(&raw) {
        Ok(tasks) => Stored::Tasks(tasks.unwrap_or_default()),
        Err(e) => Stored::Corrupt(e.to_string()),
    }
}

/// Read the task list, falling back to an empty list.
///
/// A missing key, a read failure, or a value that is not an array of tasks
/// all yield `[]`. Corrupt values are backed up first so the bytes
/// survive the next save.
pub fn load_tasks(storage: &mut dyn Storage) -> Vec<Task> {
    match read_stored(storage) {
        Stored::Tasks(tasks) => {
            tracing::debug!(count = tasks.len(), "loaded tasks");
            tasks
        }
        Stored::Unreadable(e) => {
            tracing::warn!(error = %e, "could not read stored tasks, starting empty");
            Vec::new()
        }
        Stored::Corrupt(error) => {
            match storage.backup(TASKS_KEY) {
                Ok(Some(backup)) => tracing::warn!(
                    %error,
                    backup = %backup,
                    "stored tasks are corrupt, starting empty"
                ),
                Ok(None) => tracing::warn!(%error, "stored tasks are corrupt, starting empty"),
                Err(backup_err) => tracing::warn!(
                    %error,
                    backup_error = %backup_err,
                    "stored tasks are corrupt and could not be backed up, starting empty"
                ),
            }
            Vec::new()
        }
    }
}

/// Like [`load_tasks`] but never writes; corrupt values are left in place.
///
/// For read-only callers that will not save over the stored list.
pub fn read_tasks(storage: &dyn Storage) -> Vec<Task> {
    match read_stored(storage) {
        Stored::Tasks(tasks) => tasks,
        Stored::Unreadable(e) => {
            tracing::warn!(error = %e, "could not read stored tasks");
            Vec::new()
        }
        Stored::Corrupt(error) => {
            tracing::warn!(%error, "stored tasks are corrupt, leaving them untouched");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskId;
    use crate::persistence::storage::{FileStorage, MemoryStorage};
    use pretty_assertions::assert_eq;

    fn sample_tasks() -> Vec<Task> {
        let mut tasks = vec![
            Task::new(TaskId(1700000000001), "Buy milk").unwrap(),
            Task::new(TaskId(1700000000002), "Call \"mom\"").unwrap(),
        ];
        tasks[1].completed = true;
        tasks
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let mut storage = MemoryStorage::default();
        let tasks = sample_tasks();

        save_tasks(&mut storage, &tasks).unwrap();
        assert_eq!(load_tasks(&mut storage), tasks);
    }

    #[test]
    fn test_round_trip_through_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::open(temp_dir.path()).unwrap();
        let tasks = sample_tasks();

        save_tasks(&mut storage, &tasks).unwrap();

        let mut reopened = FileStorage::open(temp_dir.path()).unwrap();
        assert_eq!(load_tasks(&mut reopened), tasks);
    }

    #[test]
    fn test_missing_key_is_empty() {
        let mut storage = MemoryStorage::default();
        assert!(load_tasks(&mut storage).is_empty());
    }

    #[test]
    fn test_null_is_empty() {
        let mut storage = MemoryStorage::with_value(TASKS_KEY, "null");
        assert!(load_tasks(&mut storage).is_empty());
        assert_eq!(storage.value("tasks.bak"), None);
    }

    #[test]
    fn test_reads_any_field_order() {
        let raw = r#"[{"text":"Buy milk","completed":true,"id":1700000000000}]"#;
        let mut storage = MemoryStorage::with_value(TASKS_KEY, raw);

        let tasks = load_tasks(&mut storage);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, TaskId(1700000000000));
        assert!(tasks[0].completed);
    }

    #[test]
    fn test_corrupt_value_is_empty_and_backed_up() {
        let mut storage = MemoryStorage::with_value(TASKS_KEY, "{not json");

        assert!(load_tasks(&mut storage).is_empty());
        assert_eq!(storage.value("tasks.bak").as_deref(), Some("{not json"));
    }

    #[test]
    fn test_partially_valid_records_are_rejected_whole() {
        let raw = r#"[{"id":1,"text":"ok","completed":false},{"id":2,"text":"missing flag"}]"#;
        let mut storage = MemoryStorage::with_value(TASKS_KEY, raw);

        assert!(load_tasks(&mut storage).is_empty());
    }

    #[test]
    fn test_non_array_is_rejected() {
        let mut storage = MemoryStorage::with_value(TASKS_KEY, r#"{"id":1}"#);
        assert!(load_tasks(&mut storage).is_empty());
    }

    #[test]
    fn test_non_utf8_file_is_backed_up() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("tasks.json");
        let bytes = b"[{\"id\":1,\"text\":\"caf\xe9\",\"completed\":false}]";
        std::fs::write(&path, bytes).unwrap();
        let mut storage = FileStorage::open(temp_dir.path()).unwrap();

        assert!(load_tasks(&mut storage).is_empty());
        save_tasks(&mut storage, &[]).unwrap();

        let backups: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|p| p.to_string_lossy().contains("tasks.bak."))
            .collect();
        assert_eq!(backups.len(), 1);
        assert_eq!(std::fs::read(&backups[0]).unwrap(), bytes.to_vec());
    }

    #[test]
    fn test_read_tasks_leaves_corrupt_value_alone() {
        let storage = MemoryStorage::with_value(TASKS_KEY, "{not json");

        assert!(read_tasks(&storage).is_empty());
        assert_eq!(storage.value("tasks.bak"), None);
        assert_eq!(storage.value(TASKS_KEY).as_deref(), Some("{not json"));
    }

    #[test]
    fn test_read_tasks() {
        let mut storage = MemoryStorage::default();
        save_tasks(&mut storage, &sample_tasks()).unwrap();
        assert_eq!(read_tasks(&storage), sample_tasks());
    }

    #[test]
    fn test_saved_json_is_compact_array() {
        let mut storage = MemoryStorage::default();
        save_tasks(&mut storage, &sample_tasks()[..1]).unwrap();

        assert_eq!(
            storage.value(TASKS_KEY).unwrap(),
            r#"[{"id":1700000000001,"text":"Buy milk","completed":false}]"#
        );
    }
}
