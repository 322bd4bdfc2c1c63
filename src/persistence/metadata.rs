use super::storage::{Storage, StoreError};
use crate::domain::Permission;
use serde::{Deserialize, Serialize};

/// Storage key holding [`AppMetadata`]
pub const META_KEY: &str = "meta";

/// App metadata stored in meta.json
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMetadata {
    #[serde(default)]
    pub notification_permission: Permission,
}

/// Load app metadata; anything unreadable counts as "never asked"
pub fn load_metadata(storage: &dyn Storage) -> AppMetadata {
    match storage.get(META_KEY) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring unreadable metadata");
            AppMetadata::default()
        }),
        Ok(None) => AppMetadata::default(),
        Err(e) => {
            tracing::warn!(error = %e, "could not read metadata");
            AppMetadata::default()
        }
    }
}

/// Save app metadata
pub fn save_metadata(storage: &mut dyn Storage, metadata: &AppMetadata) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(metadata).map_err(|source| StoreError::Encode {
        key: META_KEY.to_string(),
        source,
    })?;
    storage.set(META_KEY, &json)
}

/// Persist a new notification permission
pub fn save_permission(storage: &mut dyn Storage, permission: Permission) -> Result<(), StoreError> {
    let mut metadata = load_metadata(storage);
    metadata.notification_permission = permission;
    save_metadata(storage, &metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::storage::{FileStorage, MemoryStorage};
    use tempfile::tempdir;

    #[test]
    fn test_load_nonexistent_metadata() {
        let storage = MemoryStorage::default();
        let metadata = load_metadata(&storage);
        assert_eq!(metadata.notification_permission, Permission::Default);
    }

    #[test]
    fn test_save_and_load_metadata() {
        let temp_dir = tempdir().unwrap();
        let mut storage = FileStorage::open(temp_dir.path()).unwrap();

        let metadata = AppMetadata {
            notification_permission: Permission::Granted,
        };
        save_metadata(&mut storage, &metadata).unwrap();

        assert_eq!(load_metadata(&storage), metadata);
    }

    #[test]
    fn test_save_permission() {
        let mut storage = MemoryStorage::default();
        save_permission(&mut storage, Permission::Denied).unwrap();
        assert_eq!(load_metadata(&storage).notification_permission, Permission::Denied);
    }

    #[test]
    fn test_unknown_fields_and_garbage() {
        let storage = MemoryStorage::with_value(META_KEY, r#"{"other": 1}"#);
        assert_eq!(load_metadata(&storage), AppMetadata::default());

        let storage = MemoryStorage::with_value(META_KEY, "???");
        assert_eq!(load_metadata(&storage), AppMetadata::default());
    }
}
