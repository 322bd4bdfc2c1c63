pub mod files;
pub mod metadata;
pub mod storage;
pub mod task_store;

pub use files::{ensure_dir, get_data_dir, init_local_data_dir};
pub use metadata::{load_metadata, save_permission};
pub use storage::{FileStorage, Storage};
pub use task_store::{load_tasks, read_tasks, save_tasks};

#[cfg(test)]
pub use storage::MemoryStorage;
