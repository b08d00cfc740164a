use contracts::shared::storage::{KeyValueStore, StorageError};
use web_sys::window;

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// `localStorage`, looked up on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        get_local_storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = get_local_storage().ok_or(StorageError::Unavailable)?;
        storage.set_item(key, value).map_err(|e| {
            // the browser reports quota overflow as a DOMException
            let message = format!("{:?}", e);
            if message.contains("Quota") {
                StorageError::QuotaExceeded {
                    key: key.to_string(),
                    size: value.len(),
                }
            } else {
                StorageError::WriteFailed {
                    key: key.to_string(),
                    message,
                }
            }
        })
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = get_local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}
