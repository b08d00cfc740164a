use super::DocumentError;

/// Трейт для типов идентификаторов агрегатов
pub trait AggregateId: Sized + Clone + PartialEq + Eq + std::fmt::Debug {
    /// Преобразовать ID в строку
    fn as_str(&self) -> &str;

    /// Создать ID из пользовательского ввода
    fn parse(s: &str) -> Result<Self, DocumentError>;
}

/// Идентификатор пункта навигации: `[A-Za-z0-9_]+`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NavId(String);

impl NavId {
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AggregateId for NavId {
    fn as_str(&self) -> &str {
        &self.0
    }

    fn parse(s: &str) -> Result<Self, DocumentError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DocumentError::EmptyField("id"));
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(DocumentError::InvalidId(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}
