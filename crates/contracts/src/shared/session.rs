//! Транзакционный доступ к документу.
//!
//! Изменение выполняется над копией; копия сохраняется и только потом
//! становится текущим документом. Неудачная запись не меняет память.

use super::background::BackgroundSettings;
use super::config::DashboardConfig;
use super::error::DashboardError;
use super::storage::{DocumentRepository, KeyValueStore, StorageError};
use crate::domain::a004_document::aggregate::Document;
use crate::domain::common::{required, DocumentError};

#[derive(Debug)]
pub struct DashboardSession<S> {
    repository: DocumentRepository<S>,
    document: Document,
    title: String,
    edit_mode: bool,
    default_title: String,
}

impl<S: KeyValueStore> DashboardSession<S> {
    pub fn open(store: S, config: &DashboardConfig) -> Self {
        let repository = DocumentRepository::new(store, config);
        let document = repository.load_document();
        let title = repository
            .load_title()
            .unwrap_or_else(|| config.default_title.clone());
        let edit_mode = repository.load_edit_mode();
        log::info!(
            "Dashboard loaded: {} navigation entries, {} cards",
            document.navigation().len(),
            document.item_count()
        );
        Self {
            repository,
            document,
            title,
            edit_mode,
            default_title: config.default_title.clone(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn repository(&self) -> &DocumentRepository<S> {
        &self.repository
    }

    /// Выполнить `op` над копией документа, сохранить и зафиксировать
    pub fn apply<T, F>(&mut self, op: F) -> Result<T, DashboardError>
    where
        F: FnOnce(&mut Document) -> Result<T, DocumentError>,
    {
        let mut draft = self.document.clone();
        let output = op(&mut draft)?;
        self.repository.save_document(&draft)?;
        self.document = draft;
        Ok(output)
    }

    /// Заменить документ целиком (импорт JSON) и, если задан, заголовок.
    /// Память меняется только после обеих записей; при ошибке записи
    /// заголовка в хранилище возвращается прежний документ.
    pub fn replace_document(
        &mut self,
        mut document: Document,
        title: Option<String>,
    ) -> Result<(), DashboardError> {
        document.normalize();
        let title = match title.filter(|t| !t.trim().is_empty()) {
            Some(t) => Some(required("title", &t)?),
            None => None,
        };

        let snapshot = self.repository.document_snapshot();
        self.repository.save_document(&document)?;
        if let Some(title) = &title {
            if let Err(e) = self.repository.save_title(title) {
                self.repository.restore_document(snapshot);
                return Err(e.into());
            }
        }

        self.document = document;
        if let Some(title) = title {
            self.title = title;
        }
        Ok(())
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), DashboardError> {
        let title = required("title", title)?;
        self.repository.save_title(&title)?;
        self.title = title;
        Ok(())
    }

    pub fn set_edit_mode(&mut self, enabled: bool) -> Result<(), StorageError> {
        self.repository.save_edit_mode(enabled)?;
        self.edit_mode = enabled;
        Ok(())
    }

    pub fn background(&self) -> Option<BackgroundSettings> {
        self.repository.load_background()
    }

    pub fn save_background(&self, settings: &BackgroundSettings) -> Result<(), StorageError> {
        self.repository.save_background(settings)
    }

    pub fn clear_background(&self) {
        self.repository.clear_background();
    }

    /// Удалить все ключи и вернуться к состоянию по умолчанию
    pub fn clear_all(&mut self) {
        self.repository.clear_all();
        self.document = Document::default();
        self.title = self.default_title.clone();
        self.edit_mode = false;
    }
}
