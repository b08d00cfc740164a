use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{HashMap, HashSet};

use crate::domain::a001_navigation::aggregate::NavigationEntry;
use crate::domain::a002_business_group::aggregate::BusinessGroup;
use crate::domain::a003_card_item::aggregate::CardItem;
use crate::domain::common::DocumentError;

pub const DEFAULT_NAV_ID: &str = "home";
pub const DEFAULT_NAV_NAME: &str = "Home";

/// Корень документа: навигация и карточки по пунктам навигации
///
/// Порядок хранения `cards` ничего не значит: группы карточек всегда
/// обходятся через [`Document::sections`], в порядке навигации.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Document {
    pub(crate) navigation: Vec<NavigationEntry>,
    pub(crate) cards: HashMap<String, Vec<BusinessGroup>>,
}

impl Default for Document {
    fn default() -> Self {
        let entry = NavigationEntry {
            id: DEFAULT_NAV_ID.to_string(),
            name: DEFAULT_NAV_NAME.to_string(),
            is_active: true,
        };
        let mut cards = HashMap::new();
        cards.insert(entry.id.clone(), Vec::new());
        Self {
            navigation: vec![entry],
            cards,
        }
    }
}

impl Document {
    pub fn from_parts(
        navigation: Vec<NavigationEntry>,
        cards: HashMap<String, Vec<BusinessGroup>>,
    ) -> Self {
        Self { navigation, cards }
    }

    pub fn navigation(&self) -> &[NavigationEntry] {
        &self.navigation
    }

    pub fn active(&self) -> Option<&NavigationEntry> {
        self.navigation.iter().find(|n| n.is_active)
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active().map(|n| n.id.as_str())
    }

    pub fn entry(&self, nav_id: &str) -> Option<&NavigationEntry> {
        self.navigation.iter().find(|n| n.id == nav_id)
    }

    pub(crate) fn position(&self, nav_id: &str) -> Option<usize> {
        self.navigation.iter().position(|n| n.id == nav_id)
    }

    pub fn groups(&self, nav_id: &str) -> Option<&[BusinessGroup]> {
        self.cards.get(nav_id).map(Vec::as_slice)
    }

    pub(crate) fn groups_mut(
        &mut self,
        nav_id: &str,
    ) -> Result<&mut Vec<BusinessGroup>, DocumentError> {
        self.cards
            .get_mut(nav_id)
            .ok_or_else(|| DocumentError::NotFound(nav_id.to_string()))
    }

    pub fn group(&self, nav_id: &str, group_index: usize) -> Option<&BusinessGroup> {
        self.groups(nav_id)?.get(group_index)
    }

    pub fn item(&self, nav_id: &str, group_index: usize, item_index: usize) -> Option<&CardItem> {
        self.group(nav_id, group_index)?.items.get(item_index)
    }

    /// Группы карточек в порядке навигации
    pub fn sections(&self) -> impl Iterator<Item = (&NavigationEntry, &[BusinessGroup])> {
        self.navigation.iter().map(move |entry| {
            let groups = self.cards.get(&entry.id).map(Vec::as_slice).unwrap_or(&[]);
            (entry, groups)
        })
    }

    pub fn item_count(&self) -> usize {
        self.cards
            .values()
            .flat_map(|groups| groups.iter())
            .map(|g| g.items.len())
            .sum()
    }

    /// Восстановить структурные инварианты документа, прочитанного извне.
    ///
    /// Повторяющиеся id навигации сохраняют первое вхождение, активным
    /// остаётся ровно один пункт, у каждого пункта есть группа карточек,
    /// осиротевшие группы удаляются, группы с одинаковым именем сливаются
    /// в первую. Возвращает `true`, если что-то изменилось.
    pub fn normalize(&mut self) -> bool {
        let mut changed = false;

        let mut seen = HashSet::new();
        let before = self.navigation.len();
        self.navigation.retain(|n| seen.insert(n.id.clone()));
        changed |= before != self.navigation.len();

        if self.navigation.is_empty() {
            *self = Document::default();
            return true;
        }

        let first_active = self.navigation.iter().position(|n| n.is_active).unwrap_or(0);
        for (i, entry) in self.navigation.iter_mut().enumerate() {
            let should = i == first_active;
            if entry.is_active != should {
                entry.is_active = should;
                changed = true;
            }
        }

        for entry in &self.navigation {
            if !self.cards.contains_key(&entry.id) {
                self.cards.insert(entry.id.clone(), Vec::new());
                changed = true;
            }
        }

        let before = self.cards.len();
        self.cards.retain(|id, _| seen.contains(id));
        changed |= before != self.cards.len();

        for groups in self.cards.values_mut() {
            changed |= merge_duplicate_groups(groups);
        }

        changed
    }

    /// Проверка инвариантов документа; описывает первое нарушение
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.navigation.is_empty() {
            return Err("navigation is empty".into());
        }
        let active = self.navigation.iter().filter(|n| n.is_active).count();
        if active != 1 {
            return Err(format!("{} active navigation entries", active));
        }
        let ids: HashSet<&str> = self.navigation.iter().map(|n| n.id.as_str()).collect();
        if ids.len() != self.navigation.len() {
            return Err("duplicate navigation id".into());
        }
        let keys: HashSet<&str> = self.cards.keys().map(String::as_str).collect();
        if ids != keys {
            return Err("navigation ids and card keys diverge".into());
        }
        for (entry, groups) in self.sections() {
            let mut names = HashSet::new();
            for group in groups {
                if !names.insert(group.group_name.as_str()) {
                    return Err(format!(
                        "duplicate group '{}' in '{}'",
                        group.group_name, entry.id
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Карточки повторной группы дописываются в первую группу с тем же именем
fn merge_duplicate_groups(groups: &mut Vec<BusinessGroup>) -> bool {
    let mut merged: Vec<BusinessGroup> = Vec::with_capacity(groups.len());
    let mut changed = false;
    for group in groups.drain(..) {
        match merged.iter_mut().find(|g| g.group_name == group.group_name) {
            Some(first) => {
                first.items.extend(group.items);
                changed = true;
            }
            None => merged.push(group),
        }
    }
    *groups = merged;
    changed
}

struct CardsInNavOrder<'a>(&'a Document);

impl Serialize for CardsInNavOrder<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.navigation.len()))?;
        for entry in &self.0.navigation {
            if let Some(groups) = self.0.cards.get(&entry.id) {
                map.serialize_entry(&entry.id, groups)?;
            }
        }
        map.end()
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Document", 2)?;
        state.serialize_field("navigation", &self.navigation)?;
        state.serialize_field("cards", &CardsInNavOrder(self))?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_business_group::aggregate::ColorIndex;

    fn entry(id: &str, active: bool) -> NavigationEntry {
        NavigationEntry {
            id: id.into(),
            name: id.to_uppercase(),
            is_active: active,
        }
    }

    #[test]
    fn test_default_document_holds_invariants() {
        let doc = Document::default();
        assert!(doc.check_invariants().is_ok());
        assert_eq!(doc.active_id(), Some(DEFAULT_NAV_ID));
    }

    #[test]
    fn test_cards_serialize_in_navigation_order() {
        let mut cards = HashMap::new();
        for id in ["zeta", "alpha", "mid"] {
            cards.insert(id.to_string(), Vec::new());
        }
        let doc = Document::from_parts(
            vec![entry("zeta", true), entry("alpha", false), entry("mid", false)],
            cards,
        );
        let json = serde_json::to_string(&doc).unwrap();
        let z = json.find("\"zeta\":[]").unwrap();
        let a = json.find("\"alpha\":[]").unwrap();
        let m = json.find("\"mid\":[]").unwrap();
        assert!(z < a && a < m, "{json}");
    }

    #[test]
    fn test_normalize_repairs_lockstep_and_active() {
        let mut cards = HashMap::new();
        cards.insert("orphan".to_string(), Vec::new());
        cards.insert("a".to_string(), Vec::new());
        let mut doc = Document::from_parts(
            vec![entry("a", false), entry("b", true), entry("c", true), entry("a", true)],
            cards,
        );
        assert!(doc.normalize());
        assert!(doc.check_invariants().is_ok());
        assert_eq!(doc.active_id(), Some("b"));
        assert_eq!(doc.navigation().len(), 3);
        assert!(doc.groups("orphan").is_none());
        assert!(doc.groups("c").is_some());
        assert!(!doc.normalize());
    }

    #[test]
    fn test_normalize_merges_duplicate_group_names() {
        let item = |t: &str| CardItem {
            url: format!("https://{t}.test"),
            title: t.into(),
            description: String::new(),
            icon: None,
            icon_url: None,
            card_type: "card1".into(),
        };
        let mut first = BusinessGroup::new("Work".into(), ColorIndex::rotation(0));
        first.items.push(item("A"));
        let mut other = BusinessGroup::new("Other".into(), ColorIndex::rotation(1));
        other.items.push(item("B"));
        let mut repeat = BusinessGroup::new("Work".into(), ColorIndex::rotation(2));
        repeat.items.push(item("C"));

        let mut cards = HashMap::new();
        cards.insert("a".to_string(), vec![first, other, repeat]);
        let mut doc = Document::from_parts(vec![entry("a", true)], cards);
        assert!(doc.check_invariants().is_err());

        assert!(doc.normalize());
        assert!(doc.check_invariants().is_ok());
        let groups = doc.groups("a").unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].color_index, Some(ColorIndex::rotation(0)));
        let titles: Vec<&str> = groups[0].items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
        assert!(!doc.normalize());
    }

    #[test]
    fn test_normalize_empty_navigation_yields_default() {
        let mut doc = Document::from_parts(Vec::new(), HashMap::new());
        doc.normalize();
        assert_eq!(doc, Document::default());
    }
}
