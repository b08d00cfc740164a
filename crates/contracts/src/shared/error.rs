use serde::Serialize;
use thiserror::Error;

use super::storage::StorageError;
use crate::domain::common::{DocumentError, ErrorKind};

/// Ошибки уровня приложения: домен, хранилище, формат импорта, сеть
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum DashboardError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("Changes were not saved and may not survive a reload: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid import format: {0}")]
    Format(String),

    #[error("External resource unavailable: {0}")]
    NetworkDegraded(String),
}

impl DashboardError {
    pub fn format(message: impl Into<String>) -> Self {
        DashboardError::Format(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DashboardError::Document(e) => e.kind(),
            DashboardError::Storage(_) => ErrorKind::Storage,
            DashboardError::Format(_) => ErrorKind::Format,
            DashboardError::NetworkDegraded(_) => ErrorKind::NetworkDegraded,
        }
    }

    /// Пользователю показываются ошибки хранилища и отклонённый ввод;
    /// сетевые сбои только пишутся в лог.
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, DashboardError::NetworkDegraded(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_passes_through_document_errors() {
        let err: DashboardError = DocumentError::DuplicateGroup("Work".into()).into();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.to_string(), "Group 'Work' already exists");
    }

    #[test]
    fn test_network_degraded_is_silent() {
        let err = DashboardError::NetworkDegraded("favicon".into());
        assert_eq!(err.kind(), ErrorKind::NetworkDegraded);
        assert!(!err.is_user_visible());
        assert!(DashboardError::format("x").is_user_visible());
    }

    #[test]
    fn test_storage_error_serializes_with_code() {
        let err: DashboardError = StorageError::Unavailable.into();
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "Storage");
    }
}
