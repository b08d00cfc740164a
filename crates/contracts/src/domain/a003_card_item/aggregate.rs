use serde::{Deserialize, Serialize};

use super::icon::{resolve_icon, IconChoice, IconSource};
use crate::domain::common::{required, DocumentError};

pub const DEFAULT_CARD_TYPE: &str = "card1";

fn default_card_type() -> String {
    DEFAULT_CARD_TYPE.to_string()
}

/// Карточка-закладка
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardItem {
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Local icon file name (or the "use site icon" sentinel)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Resolved external icon, wins over `icon` when rendering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(default = "default_card_type")]
    pub card_type: String,
}

/// Данные формы карточки до разрешения иконки
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDraft {
    pub url: String,
    pub title: String,
    pub description: String,
    pub icon: IconChoice,
    pub card_type: String,
}

impl CardDraft {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            description: String::new(),
            icon: IconChoice::UseSiteIcon,
            card_type: default_card_type(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_icon(mut self, icon: IconChoice) -> Self {
        self.icon = icon;
        self
    }

    pub fn with_card_type(mut self, card_type: impl Into<String>) -> Self {
        self.card_type = card_type.into();
        self
    }

    /// Заполнить форму из существующей карточки (режим редактирования)
    pub fn from_item(item: &CardItem, sentinel: &str) -> Self {
        Self {
            url: item.url.clone(),
            title: item.title.clone(),
            description: item.description.clone(),
            icon: IconChoice::from_selection(item.icon.as_deref().unwrap_or(""), sentinel),
            card_type: item.card_type.clone(),
        }
    }

    /// Проверить форму и получить карточку для хранения. `previous` —
    /// заменяемая карточка при редактировании.
    pub fn into_item(
        self,
        source: &IconSource,
        previous: Option<&CardItem>,
    ) -> Result<CardItem, DocumentError> {
        let url = required("url", &self.url)?;
        let title = required("title", &self.title)?;
        let (icon, icon_url) = resolve_icon(&self.icon, &url, source, previous);
        let card_type = if self.card_type.trim().is_empty() {
            default_card_type()
        } else {
            self.card_type
        };
        Ok(CardItem {
            url,
            title,
            description: self.description.trim().to_string(),
            icon,
            icon_url,
            card_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> IconSource {
        IconSource::new("https://icons.test/?domain=", "use-website-icon.png")
    }

    #[test]
    fn test_draft_requires_url_and_title() {
        let err = CardDraft::new("", "X").into_item(&source(), None).unwrap_err();
        assert_eq!(err, DocumentError::EmptyField("url"));
        let err = CardDraft::new("https://x.test", " ").into_item(&source(), None).unwrap_err();
        assert_eq!(err, DocumentError::EmptyField("title"));
    }

    #[test]
    fn test_missing_optional_fields_get_defaults() {
        let item: CardItem = serde_json::from_str(r#"{"url":"u","title":"t","iconUrl":null}"#).unwrap();
        assert_eq!(item.card_type, "card1");
        assert_eq!(item.description, "");
        assert_eq!(item.icon_url, None);
    }

    #[test]
    fn test_blank_card_type_falls_back() {
        let item = CardDraft::new("https://x.test", "X")
            .with_card_type("")
            .into_item(&source(), None)
            .unwrap();
        assert_eq!(item.card_type, DEFAULT_CARD_TYPE);
    }
}
