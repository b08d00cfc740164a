use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateId, NavId};

/// Пункт навигации (вкладка дашборда)
///
/// `id` служит ключом группы карточек в документе. Id, созданные через UI,
/// всегда проходят [`NavId`]; импортированным достаточно быть непустыми.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationEntry {
    pub id: String,
    pub name: String,
    pub is_active: bool,
}

impl NavigationEntry {
    /// Новый пункт всегда создаётся неактивным
    pub fn new(id: NavId, name: String) -> Self {
        Self {
            id: id.as_str().to_string(),
            name,
            is_active: false,
        }
    }

    /// Валидация формы при импорте
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("navigation id must not be empty".into());
        }
        if self.name.trim().is_empty() {
            return Err(format!("navigation '{}' has an empty name", self.id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let entry = NavigationEntry::new(NavId::parse("tools").unwrap(), "Tools".into());
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"id":"tools","name":"Tools","isActive":false}"#);
    }

    #[test]
    fn test_is_active_must_be_boolean() {
        let parsed: Result<NavigationEntry, _> =
            serde_json::from_str(r#"{"id":"a","name":"A","isActive":"yes"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let entry = NavigationEntry {
            id: "a".into(),
            name: "  ".into(),
            is_active: true,
        };
        assert!(entry.validate().is_err());
    }
}
