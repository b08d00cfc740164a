use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::a003_card_item::aggregate::CardItem;
use crate::domain::common::DocumentError;

/// Цвет заголовка группы, 1..=6
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ColorIndex(u8);

impl ColorIndex {
    pub const COUNT: u8 = 6;

    pub fn new(value: u8) -> Result<Self, DocumentError> {
        if (1..=Self::COUNT).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DocumentError::InvalidColor(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Цвет `counter`-й группы без явно заданного цвета
    pub fn rotation(counter: usize) -> Self {
        Self((counter % Self::COUNT as usize) as u8 + 1)
    }

    pub fn all() -> impl Iterator<Item = ColorIndex> {
        (1..=Self::COUNT).map(ColorIndex)
    }
}

/// Старые данные хранят цвет строкой ("3"); нечитаемое значение означает
/// «цвет не задан».
fn lenient_color<'de, D>(deserializer: D) -> Result<Option<ColorIndex>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let number = match raw {
        Some(serde_json::Value::Number(n)) => n.as_u64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    Ok(number
        .and_then(|n| u8::try_from(n).ok())
        .and_then(|n| ColorIndex::new(n).ok()))
}

/// Бизнес-группа карточек («папка»)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessGroup {
    pub group_name: String,
    #[serde(
        default,
        deserialize_with = "lenient_color",
        skip_serializing_if = "Option::is_none"
    )]
    pub color_index: Option<ColorIndex>,
    #[serde(default)]
    pub items: Vec<CardItem>,
}

impl BusinessGroup {
    pub fn new(group_name: String, color_index: ColorIndex) -> Self {
        Self {
            group_name,
            color_index: Some(color_index),
            items: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_bounds() {
        assert!(ColorIndex::new(0).is_err());
        assert!(ColorIndex::new(7).is_err());
        assert_eq!(ColorIndex::new(6).map(ColorIndex::value), Ok(6));
    }

    #[test]
    fn test_rotation_wraps() {
        let colors: Vec<u8> = (0..8).map(|i| ColorIndex::rotation(i).value()).collect();
        assert_eq!(colors, vec![1, 2, 3, 4, 5, 6, 1, 2]);
    }

    #[test]
    fn test_lenient_color_index() {
        let g: BusinessGroup =
            serde_json::from_str(r#"{"groupName":"A","colorIndex":"3","items":[]}"#).unwrap();
        assert_eq!(g.color_index.map(ColorIndex::value), Some(3));

        let g: BusinessGroup = serde_json::from_str(r#"{"groupName":"A","colorIndex":9}"#).unwrap();
        assert_eq!(g.color_index, None);

        let g: BusinessGroup = serde_json::from_str(r#"{"groupName":"A"}"#).unwrap();
        assert_eq!(g.color_index, None);
        assert!(g.items.is_empty());
    }
}
