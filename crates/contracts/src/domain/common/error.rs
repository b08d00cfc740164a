use serde::Serialize;
use thiserror::Error;

/// Категория ошибки для слоя представления.
///
/// По ней контроллер решает, как показать сбой: диалог, уведомление или
/// только лог.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    Validation,
    Conflict,
    NotFound,
    Storage,
    Format,
    NetworkDegraded,
}

/// Ошибки операций над документом
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum DocumentError {
    #[error("Field '{0}' must not be empty")]
    EmptyField(&'static str),

    #[error("Invalid navigation id '{0}': only letters, digits and '_' are allowed")]
    InvalidId(String),

    #[error("Invalid color index {0}: expected 1..=6")]
    InvalidColor(u8),

    #[error("Navigation id '{0}' already exists")]
    DuplicateId(String),

    #[error("Group '{0}' already exists")]
    DuplicateGroup(String),

    #[error("Navigation '{0}' not found")]
    NotFound(String),

    #[error("Group '{0}' not found")]
    GroupNotFound(String),

    #[error("Item {item_index} in group {group_index} not found")]
    ItemNotFound { group_index: usize, item_index: usize },

    #[error("Navigation position {0} is out of range")]
    NavIndexOutOfRange(usize),

    #[error("The last navigation entry cannot be deleted")]
    LastItem,
}

impl DocumentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DocumentError::EmptyField(_)
            | DocumentError::InvalidId(_)
            | DocumentError::InvalidColor(_)
            | DocumentError::LastItem => ErrorKind::Validation,
            DocumentError::DuplicateId(_) | DocumentError::DuplicateGroup(_) => {
                ErrorKind::Conflict
            }
            DocumentError::NotFound(_)
            | DocumentError::GroupNotFound(_)
            | DocumentError::ItemNotFound { .. }
            | DocumentError::NavIndexOutOfRange(_) => ErrorKind::NotFound,
        }
    }
}

/// Проверка обязательного текстового поля, возвращает обрезанное значение
pub fn required(field: &'static str, value: &str) -> Result<String, DocumentError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DocumentError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflicts_are_classified() {
        assert_eq!(DocumentError::DuplicateId("a".into()).kind(), ErrorKind::Conflict);
        assert_eq!(DocumentError::DuplicateGroup("a".into()).kind(), ErrorKind::Conflict);
        assert_eq!(DocumentError::LastItem.kind(), ErrorKind::Validation);
        assert_eq!(
            DocumentError::ItemNotFound { group_index: 0, item_index: 3 }.kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_required_trims() {
        assert_eq!(required("title", "  X "), Ok("X".to_string()));
        assert_eq!(required("title", "   "), Err(DocumentError::EmptyField("title")));
    }
}
