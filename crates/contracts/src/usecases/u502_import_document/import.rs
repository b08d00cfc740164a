use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

use crate::domain::a001_navigation::aggregate::NavigationEntry;
use crate::domain::a002_business_group::aggregate::BusinessGroup;
use crate::domain::a004_document::aggregate::Document;
use crate::shared::error::DashboardError;

/// Результат разбора файла импорта (ещё не применён)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedDocument {
    pub document: Document,
    pub website_title: Option<String>,
}

fn parse_navigation(items: &[Value]) -> Result<Vec<NavigationEntry>, DashboardError> {
    if items.is_empty() {
        return Err(DashboardError::format("'navigation' must not be empty"));
    }
    items
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            let entry: NavigationEntry = serde_json::from_value(raw.clone())
                .map_err(|e| DashboardError::format(format!("navigation[{}]: {}", i, e)))?;
            entry
                .validate()
                .map_err(|e| DashboardError::format(format!("navigation[{}]: {}", i, e)))?;
            Ok(entry)
        })
        .collect()
}

fn first_duplicate(groups: &[BusinessGroup]) -> Option<&str> {
    let mut names = HashSet::new();
    groups
        .iter()
        .map(|g| g.group_name.as_str())
        .find(|name| !names.insert(*name))
}

fn parse_cards(cards: &Map<String, Value>) -> Result<HashMap<String, Vec<BusinessGroup>>, DashboardError> {
    cards
        .iter()
        .map(|(nav_id, raw)| {
            let groups: Vec<BusinessGroup> = serde_json::from_value(raw.clone())
                .map_err(|e| DashboardError::format(format!("cards['{}']: {}", nav_id, e)))?;
            if let Some(dup) = first_duplicate(&groups) {
                return Err(DashboardError::format(format!(
                    "cards['{}']: duplicate group '{}'",
                    nav_id, dup
                )));
            }
            Ok((nav_id.clone(), groups))
        })
        .collect()
}

/// Разбор и проверка выгруженного документа. Здесь ничего не применяется:
/// вызывающий код запрашивает подтверждение и затем заменяет документ.
pub fn import_document(raw: &str) -> Result<ImportedDocument, DashboardError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| DashboardError::format(format!("not valid JSON: {}", e)))?;
    let root = value
        .as_object()
        .ok_or_else(|| DashboardError::format("top level must be an object"))?;
    let navigation = root
        .get("navigation")
        .and_then(Value::as_array)
        .ok_or_else(|| DashboardError::format("'navigation' must be an array"))?;
    let cards = root
        .get("cards")
        .and_then(Value::as_object)
        .ok_or_else(|| DashboardError::format("'cards' must be an object"))?;

    let navigation = parse_navigation(navigation)?;
    let cards = parse_cards(cards)?;

    let mut document = Document::from_parts(navigation, cards);
    if document.normalize() {
        log::warn!("Imported document was repaired to satisfy structural invariants");
    }
    document
        .check_invariants()
        .map_err(DashboardError::Format)?;

    let website_title = root
        .get("websiteTitle")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from);

    Ok(ImportedDocument {
        document,
        website_title,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_business_group::aggregate::ColorIndex;
    use crate::domain::a003_card_item::aggregate::CardDraft;
    use crate::domain::a003_card_item::icon::{IconChoice, IconSource};
    use crate::domain::common::ErrorKind;
    use crate::usecases::u501_export_document::export_document;

    fn assert_format_error(raw: &str) {
        let err = import_document(raw).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format, "{raw}: {err}");
    }

    #[test]
    fn test_export_then_import_round_trip() {
        let icons = IconSource::new("https://fav.test/?d=", "use-website-icon.png");
        let mut doc = Document::default();
        doc.add_navigation("dev", "Dev").unwrap();
        doc.add_group("dev", "Code", ColorIndex::new(3).unwrap()).unwrap();
        doc.add_card_item(
            "dev",
            "Code",
            CardDraft::new("https://gh.test", "GitHub")
                .with_description("hosting")
                .with_icon(IconChoice::Local("a-hua5.png".into()))
                .with_card_type("card4"),
            &icons,
        )
        .unwrap();
        doc.add_card_item("dev", "Code", CardDraft::new("https://gl.test", "GitLab"), &icons)
            .unwrap();
        doc.reorder_navigation(1, 0).unwrap();

        let json = export_document(&doc, "Links").unwrap();
        let imported = import_document(&json).unwrap();
        assert_eq!(imported.document, doc);
        assert_eq!(imported.website_title.as_deref(), Some("Links"));
    }

    #[test]
    fn test_shape_violations_are_format_errors() {
        assert_format_error("not json");
        assert_format_error("[]");
        assert_format_error(r#"{"navigation": {}, "cards": {}}"#);
        assert_format_error(r#"{"navigation": [], "cards": []}"#);
        assert_format_error(r#"{"navigation": [], "cards": {}}"#);
        assert_format_error(r#"{"navigation": [{"id": "a", "name": "A"}], "cards": {}}"#);
        assert_format_error(r#"{"navigation": [{"id": "", "name": "A", "isActive": true}], "cards": {}}"#);
        assert_format_error(r#"{"navigation": [{"id": "a", "name": " ", "isActive": true}], "cards": {}}"#);
        assert_format_error(r#"{"navigation": [{"id": "a", "name": "A", "isActive": "yes"}], "cards": {}}"#);
    }

    #[test]
    fn test_duplicate_group_names_are_rejected() {
        let raw = r#"{
            "navigation": [{"id": "a", "name": "A", "isActive": true}],
            "cards": {"a": [{"groupName": "G", "items": []}, {"groupName": "G", "items": []}]}
        }"#;
        assert_format_error(raw);
    }

    #[test]
    fn test_missing_cards_and_active_are_repaired() {
        let raw = r#"{
            "navigation": [
                {"id": "a", "name": "A", "isActive": false},
                {"id": "b", "name": "B", "isActive": false}
            ],
            "cards": {"a": [{"groupName": "G", "colorIndex": "2", "items": [
                {"url": "https://x.test", "title": "X"}
            ]}], "ghost": []}
        }"#;
        let imported = import_document(raw).unwrap();
        let doc = &imported.document;
        assert!(doc.check_invariants().is_ok());
        assert_eq!(doc.active_id(), Some("a"));
        assert!(doc.groups("b").unwrap().is_empty());
        assert!(doc.groups("ghost").is_none());
        assert_eq!(doc.group("a", 0).unwrap().color_index, ColorIndex::new(2).ok());
        assert_eq!(doc.item("a", 0, 0).unwrap().card_type, "card1");
        assert_eq!(imported.website_title, None);
    }
}
