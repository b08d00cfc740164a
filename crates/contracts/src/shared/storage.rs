//! Хранение дашборда в key/value хранилище.
//!
//! Адаптер браузера живёт во frontend, [`MemoryStore`] используется в тестах.
//! Каждая запись сериализует значение целиком и перезаписывает ключ.

use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use thiserror::Error;

use super::background::BackgroundSettings;
use super::config::{DashboardConfig, StorageKeys};
use crate::domain::a004_document::aggregate::Document;

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum StorageError {
    #[error("Local storage is not available")]
    Unavailable,

    #[error("Value for '{key}' is too large ({size} bytes)")]
    QuotaExceeded { key: String, size: usize },

    #[error("Failed to write '{key}': {message}")]
    WriteFailed { key: String, message: String },
}

/// Хранилище строк по ключу (localStorage или память)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str);
}

/// Хранилище в памяти с необязательным общим лимитом в байтах
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    capacity: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            entries: RefCell::default(),
            capacity: Some(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.borrow_mut();
        if let Some(capacity) = self.capacity {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if others + key.len() + value.len() > capacity {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    size: value.len(),
                });
            }
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

/// Типизированный доступ ко всем ключам хранилища
#[derive(Debug)]
pub struct DocumentRepository<S> {
    store: S,
    keys: StorageKeys,
    limit: usize,
}

impl<S: KeyValueStore> DocumentRepository<S> {
    pub fn new(store: S, config: &DashboardConfig) -> Self {
        Self {
            store,
            keys: config.storage_keys.clone(),
            limit: config.storage_limit_bytes,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if value.len() > self.limit {
            return Err(StorageError::QuotaExceeded {
                key: key.to_string(),
                size: value.len(),
            });
        }
        self.store.set(key, value)
    }

    fn write_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value).map_err(|e| StorageError::WriteFailed {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.write(key, &json)
    }

    /// Нет данных или они нечитаемы: документ по умолчанию. Результат всегда
    /// удовлетворяет инвариантам документа.
    pub fn load_document(&self) -> Document {
        let Some(raw) = self.store.get(&self.keys.document) else {
            return Document::default();
        };
        let mut document = match serde_json::from_str::<Document>(&raw) {
            Ok(document) => document,
            Err(e) => {
                log::warn!("Stored document is malformed, starting from default: {}", e);
                return Document::default();
            }
        };
        if document.normalize() {
            log::warn!("Stored document violated structural invariants and was repaired");
        }
        document
    }

    pub fn save_document(&self, document: &Document) -> Result<(), StorageError> {
        self.write_json(&self.keys.document, document)
    }

    /// Сырое сохранённое значение документа
    pub fn document_snapshot(&self) -> Option<String> {
        self.store.get(&self.keys.document)
    }

    /// Вернуть значение, снятое [`Self::document_snapshot`]
    pub fn restore_document(&self, snapshot: Option<String>) {
        match snapshot {
            Some(raw) => {
                if let Err(e) = self.store.set(&self.keys.document, &raw) {
                    log::error!("Failed to restore the previous document: {}", e);
                }
            }
            None => self.store.remove(&self.keys.document),
        }
    }

    pub fn load_title(&self) -> Option<String> {
        self.store
            .get(&self.keys.display_title)
            .filter(|t| !t.trim().is_empty())
    }

    pub fn save_title(&self, title: &str) -> Result<(), StorageError> {
        self.write(&self.keys.display_title, title)
    }

    pub fn load_edit_mode(&self) -> bool {
        self.store.get(&self.keys.edit_mode).as_deref() == Some("true")
    }

    pub fn save_edit_mode(&self, enabled: bool) -> Result<(), StorageError> {
        self.write(&self.keys.edit_mode, if enabled { "true" } else { "false" })
    }

    /// Пользовательский фон, только если выставлен флаг
    pub fn load_background(&self) -> Option<BackgroundSettings> {
        if self.store.get(&self.keys.background_enabled).as_deref() != Some("true") {
            return None;
        }
        let raw = self.store.get(&self.keys.background)?;
        match serde_json::from_str::<BackgroundSettings>(&raw) {
            Ok(settings) => Some(settings.clamped()),
            Err(e) => {
                log::warn!("Stored background is malformed: {}", e);
                None
            }
        }
    }

    pub fn save_background(&self, settings: &BackgroundSettings) -> Result<(), StorageError> {
        self.write_json(&self.keys.background, settings)?;
        self.write(&self.keys.background_enabled, "true")
    }

    pub fn clear_background(&self) {
        self.store.remove(&self.keys.background);
        self.store.remove(&self.keys.background_enabled);
    }

    pub fn clear_all(&self) {
        for key in self.keys.all() {
            self.store.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::background::BackgroundKind;

    fn repo(store: &MemoryStore) -> DocumentRepository<&MemoryStore> {
        DocumentRepository::new(store, &DashboardConfig::default())
    }

    #[test]
    fn test_duplicate_groups_are_merged_on_load() {
        let store = MemoryStore::new();
        store
            .set(
                "document",
                r#"{"navigation":[{"id":"home","name":"Home","isActive":true}],
                    "cards":{"home":[
                        {"groupName":"G","items":[{"url":"https://a.test","title":"A"}]},
                        {"groupName":"G","items":[{"url":"https://b.test","title":"B"}]}
                    ]}}"#,
            )
            .unwrap();
        let doc = repo(&store).load_document();
        assert!(doc.check_invariants().is_ok());
        let groups = doc.groups("home").unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].items.len(), 2);
    }

    #[test]
    fn test_empty_storage_loads_default() {
        let store = MemoryStore::new();
        assert_eq!(repo(&store).load_document(), Document::default());
        assert!(!repo(&store).load_edit_mode());
        assert_eq!(repo(&store).load_title(), None);
    }

    #[test]
    fn test_malformed_document_falls_back() {
        let store = MemoryStore::new();
        store.set("document", "{\"navigation\": 3}").unwrap();
        assert_eq!(repo(&store).load_document(), Document::default());
    }

    #[test]
    fn test_document_is_repaired_on_load() {
        let store = MemoryStore::new();
        store
            .set(
                "document",
                r#"{"navigation":[{"id":"a","name":"A","isActive":false}],"cards":{}}"#,
            )
            .unwrap();
        let doc = repo(&store).load_document();
        assert!(doc.check_invariants().is_ok());
        assert_eq!(doc.active_id(), Some("a"));
    }

    #[test]
    fn test_save_and_reload_document() {
        let store = MemoryStore::new();
        let mut doc = Document::default();
        doc.add_navigation("tools", "Tools").unwrap();
        repo(&store).save_document(&doc).unwrap();
        assert_eq!(repo(&store).load_document(), doc);
    }

    #[test]
    fn test_edit_mode_is_stored_as_text() {
        let store = MemoryStore::new();
        repo(&store).save_edit_mode(true).unwrap();
        assert_eq!(store.get("editModeEnabled").as_deref(), Some("true"));
        assert!(repo(&store).load_edit_mode());
    }

    #[test]
    fn test_capacity_exceeded_is_reported() {
        let store = MemoryStore::with_capacity_limit(16);
        let err = repo(&store).save_title("a title that is far too long").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_background_requires_flag() {
        let store = MemoryStore::new();
        let settings = BackgroundSettings::new(BackgroundKind::Image, "data:image/png;base64,AA", 80);
        repo(&store).save_background(&settings).unwrap();
        assert_eq!(repo(&store).load_background(), Some(settings));

        store.set("customBackgroundEnabled", "false").unwrap();
        assert_eq!(repo(&store).load_background(), None);

        repo(&store).clear_background();
        assert!(store.get("customBackground").is_none());
    }

    #[test]
    fn test_clear_all_removes_every_key() {
        let store = MemoryStore::new();
        let r = repo(&store);
        r.save_document(&Document::default()).unwrap();
        r.save_title("T").unwrap();
        r.save_edit_mode(false).unwrap();
        r.clear_all();
        assert!(store.is_empty());
    }
}
