pub mod enums;
pub mod task;
pub mod views;

pub use enums::{Filter, Permission, PermissionResponse, UiMode};
pub use task::{count_incomplete, IdGenerator, Task, TaskId};
pub use views::{check_glyph, visible_rows, TaskRow};
