//! Операции изменения [`Document`], сохраняющие инварианты.
//!
//! Каждая операция проверяет всё до изменения дерева: ошибка означает, что
//! документ не изменился.

use super::aggregate::Document;
use crate::domain::a001_navigation::aggregate::NavigationEntry;
use crate::domain::a002_business_group::aggregate::{BusinessGroup, ColorIndex};
use crate::domain::a003_card_item::aggregate::{CardDraft, CardItem};
use crate::domain::a003_card_item::icon::IconSource;
use crate::domain::common::{required, AggregateId, DocumentError, NavId};

/// Итог слияния импортированных групп
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub groups_created: usize,
    pub groups_merged: usize,
    pub items_added: usize,
}

impl Document {
    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    pub fn add_navigation(&mut self, id: &str, name: &str) -> Result<(), DocumentError> {
        let id = NavId::parse(id)?;
        let name = required("name", name)?;
        if self.position(id.as_str()).is_some() || self.cards.contains_key(id.as_str()) {
            return Err(DocumentError::DuplicateId(id.into_string()));
        }
        let entry = NavigationEntry::new(id, name);
        self.cards.insert(entry.id.clone(), Vec::new());
        self.navigation.push(entry);
        Ok(())
    }

    pub fn rename_navigation(&mut self, id: &str, new_name: &str) -> Result<(), DocumentError> {
        let position = self
            .position(id)
            .ok_or_else(|| DocumentError::NotFound(id.to_string()))?;
        let name = required("name", new_name)?;
        self.navigation[position].name = name;
        Ok(())
    }

    /// Удаляет пункт вместе с его группой карточек. Если пункт был активным,
    /// активным становится первый оставшийся.
    pub fn delete_navigation(&mut self, id: &str) -> Result<NavigationEntry, DocumentError> {
        let position = self
            .position(id)
            .ok_or_else(|| DocumentError::NotFound(id.to_string()))?;
        if self.navigation.len() <= 1 {
            return Err(DocumentError::LastItem);
        }
        let removed = self.navigation.remove(position);
        self.cards.remove(&removed.id);
        if removed.is_active {
            self.navigation[0].is_active = true;
        }
        Ok(removed)
    }

    pub fn set_active_navigation(&mut self, id: &str) -> Result<(), DocumentError> {
        let position = self
            .position(id)
            .ok_or_else(|| DocumentError::NotFound(id.to_string()))?;
        if self.navigation[position].is_active {
            return Ok(());
        }
        for (i, entry) in self.navigation.iter_mut().enumerate() {
            entry.is_active = i == position;
        }
        Ok(())
    }

    /// Переносит пункт с `source_index` на место пункта `target_index`
    /// (`target_index == len` переносит в конец). Группы карточек следуют
    /// сами, так как обходятся в порядке навигации.
    pub fn reorder_navigation(
        &mut self,
        source_index: usize,
        target_index: usize,
    ) -> Result<(), DocumentError> {
        let len = self.navigation.len();
        if source_index >= len {
            return Err(DocumentError::NavIndexOutOfRange(source_index));
        }
        if target_index > len {
            return Err(DocumentError::NavIndexOutOfRange(target_index));
        }
        let entry = self.navigation.remove(source_index);
        let target = if target_index > source_index {
            target_index - 1
        } else {
            target_index
        };
        self.navigation.insert(target.min(self.navigation.len()), entry);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Groups
    // ------------------------------------------------------------------

    pub fn add_group(
        &mut self,
        nav_id: &str,
        group_name: &str,
        color: ColorIndex,
    ) -> Result<(), DocumentError> {
        let name = required("groupName", group_name)?;
        let groups = self.groups_mut(nav_id)?;
        if groups.iter().any(|g| g.group_name == name) {
            return Err(DocumentError::DuplicateGroup(name));
        }
        groups.push(BusinessGroup::new(name, color));
        Ok(())
    }

    /// То же имя: меняется только цвет. Новое имя не должно совпадать с
    /// другой группой того же пункта.
    pub fn rename_group(
        &mut self,
        nav_id: &str,
        old_name: &str,
        new_name: &str,
        color: ColorIndex,
    ) -> Result<(), DocumentError> {
        let new_name = required("groupName", new_name)?;
        let groups = self.groups_mut(nav_id)?;
        let index = groups
            .iter()
            .position(|g| g.group_name == old_name)
            .ok_or_else(|| DocumentError::GroupNotFound(old_name.to_string()))?;
        if new_name != old_name && groups.iter().any(|g| g.group_name == new_name) {
            return Err(DocumentError::DuplicateGroup(new_name));
        }
        let group = &mut groups[index];
        group.group_name = new_name;
        group.color_index = Some(color);
        Ok(())
    }

    pub fn delete_group(
        &mut self,
        nav_id: &str,
        group_name: &str,
    ) -> Result<BusinessGroup, DocumentError> {
        let groups = self.groups_mut(nav_id)?;
        let index = groups
            .iter()
            .position(|g| g.group_name == group_name)
            .ok_or_else(|| DocumentError::GroupNotFound(group_name.to_string()))?;
        Ok(groups.remove(index))
    }

    /// Переносит группу целиком (с карточками по порядку) в конец другого
    /// пункта навигации.
    pub fn move_group(
        &mut self,
        source_nav_id: &str,
        group_name: &str,
        target_nav_id: &str,
    ) -> Result<(), DocumentError> {
        let target = self
            .groups(target_nav_id)
            .ok_or_else(|| DocumentError::NotFound(target_nav_id.to_string()))?;
        if target.iter().any(|g| g.group_name == group_name) {
            return Err(DocumentError::DuplicateGroup(group_name.to_string()));
        }
        let group = self.delete_group(source_nav_id, group_name)?;
        self.groups_mut(target_nav_id)?.push(group);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Card items
    // ------------------------------------------------------------------

    /// Добавляет карточку в конец группы, возвращает её индекс
    pub fn add_card_item(
        &mut self,
        nav_id: &str,
        group_name: &str,
        draft: CardDraft,
        icons: &IconSource,
    ) -> Result<usize, DocumentError> {
        let groups = self.groups_mut(nav_id)?;
        let group = groups
            .iter_mut()
            .find(|g| g.group_name == group_name)
            .ok_or_else(|| DocumentError::GroupNotFound(group_name.to_string()))?;
        let item = draft.into_item(icons, None)?;
        group.items.push(item);
        Ok(group.items.len() - 1)
    }

    pub fn edit_card_item(
        &mut self,
        nav_id: &str,
        group_index: usize,
        item_index: usize,
        draft: CardDraft,
        icons: &IconSource,
    ) -> Result<(), DocumentError> {
        let slot = self.item_mut(nav_id, group_index, item_index)?;
        let item = draft.into_item(icons, Some(&*slot))?;
        *slot = item;
        Ok(())
    }

    /// Прямое удаление: опустевшая группа удаляется тоже.
    /// Возвращает карточку и признак удаления группы.
    pub fn delete_card_item(
        &mut self,
        nav_id: &str,
        group_index: usize,
        item_index: usize,
    ) -> Result<(CardItem, bool), DocumentError> {
        self.item_mut(nav_id, group_index, item_index)?;
        let groups = self.groups_mut(nav_id)?;
        let removed = groups[group_index].items.remove(item_index);
        let group_removed = groups[group_index].items.is_empty();
        if group_removed {
            groups.remove(group_index);
        }
        Ok((removed, group_removed))
    }

    /// Перенос перетаскиванием. Целевой индекс ограничивается границами
    /// группы после удаления; опустевшая исходная группа остаётся.
    pub fn move_card_item(
        &mut self,
        source_nav_id: &str,
        source_group_index: usize,
        source_item_index: usize,
        target_nav_id: &str,
        target_group_index: usize,
        target_item_index: usize,
    ) -> Result<usize, DocumentError> {
        self.item_mut(source_nav_id, source_group_index, source_item_index)?;
        if self.group(target_nav_id, target_group_index).is_none() {
            return Err(DocumentError::ItemNotFound {
                group_index: target_group_index,
                item_index: target_item_index,
            });
        }

        let item = self.groups_mut(source_nav_id)?[source_group_index]
            .items
            .remove(source_item_index);
        let target = &mut self.groups_mut(target_nav_id)?[target_group_index].items;
        let index = target_item_index.min(target.len());
        target.insert(index, item);
        Ok(index)
    }

    /// Слияние импортированных групп: при совпадении имени карточки
    /// дописываются в существующую группу, остальные группы добавляются.
    pub fn merge_groups(
        &mut self,
        nav_id: &str,
        incoming: Vec<BusinessGroup>,
    ) -> Result<MergeSummary, DocumentError> {
        let incoming = incoming
            .into_iter()
            .map(|mut group| {
                group.group_name = required("groupName", &group.group_name)?;
                Ok(group)
            })
            .collect::<Result<Vec<_>, DocumentError>>()?;
        let groups = self.groups_mut(nav_id)?;
        let mut summary = MergeSummary::default();
        for group in incoming {
            summary.items_added += group.items.len();
            match groups.iter_mut().find(|g| g.group_name == group.group_name) {
                Some(existing) => {
                    existing.items.extend(group.items);
                    summary.groups_merged += 1;
                }
                None => {
                    groups.push(group);
                    summary.groups_created += 1;
                }
            }
        }
        Ok(summary)
    }

    fn item_mut(
        &mut self,
        nav_id: &str,
        group_index: usize,
        item_index: usize,
    ) -> Result<&mut CardItem, DocumentError> {
        self.groups_mut(nav_id)?
            .get_mut(group_index)
            .and_then(|g| g.items.get_mut(item_index))
            .ok_or(DocumentError::ItemNotFound {
                group_index,
                item_index,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icons() -> IconSource {
        IconSource::new("https://fav.test/?d=", "use-website-icon.png")
    }

    fn color(n: u8) -> ColorIndex {
        ColorIndex::new(n).unwrap()
    }

    fn titles(doc: &Document, nav: &str, group: usize) -> Vec<String> {
        doc.group(nav, group)
            .unwrap()
            .items
            .iter()
            .map(|i| i.title.clone())
            .collect()
    }

    /// home: "Work" [A, B, C, D]; tools: empty
    fn sample() -> Document {
        let mut doc = Document::default();
        doc.add_navigation("tools", "Tools").unwrap();
        doc.add_group("home", "Work", color(1)).unwrap();
        for t in ["A", "B", "C", "D"] {
            doc.add_card_item("home", "Work", CardDraft::new(format!("https://{t}.test"), t), &icons())
                .unwrap();
        }
        doc
    }

    #[test]
    fn test_scenario_add_nav_group_item() {
        let mut doc = Document::default();
        doc.add_navigation("tools", "Tools").unwrap();
        doc.add_group("tools", "Utilities", color(1)).unwrap();
        doc.add_card_item("tools", "Utilities", CardDraft::new("https://x.test", "X"), &icons())
            .unwrap();

        let groups = doc.groups("tools").unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].group_name, "Utilities");
        assert_eq!(titles(&doc, "tools", 0), vec!["X"]);
        assert!(!doc.entry("tools").unwrap().is_active);
        assert!(doc.check_invariants().is_ok());
    }

    #[test]
    fn test_add_navigation_rejections() {
        let mut doc = Document::default();
        assert_eq!(
            doc.add_navigation("home", "Again"),
            Err(DocumentError::DuplicateId("home".into()))
        );
        assert_eq!(
            doc.add_navigation("bad id!", "Bad"),
            Err(DocumentError::InvalidId("bad id!".into()))
        );
        assert_eq!(doc.add_navigation("ok", " "), Err(DocumentError::EmptyField("name")));
        assert_eq!(doc, Document::default());
    }

    #[test]
    fn test_rename_navigation() {
        let mut doc = sample();
        doc.rename_navigation("tools", "Toolbox").unwrap();
        assert_eq!(doc.entry("tools").unwrap().name, "Toolbox");
        assert_eq!(
            doc.rename_navigation("nope", "X"),
            Err(DocumentError::NotFound("nope".into()))
        );
    }

    #[test]
    fn test_delete_last_navigation_is_rejected() {
        let mut doc = Document::default();
        let before = doc.clone();
        assert_eq!(doc.delete_navigation("home"), Err(DocumentError::LastItem));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_delete_active_navigation_activates_first() {
        let mut doc = sample();
        doc.add_navigation("misc", "Misc").unwrap();
        doc.set_active_navigation("tools").unwrap();
        doc.delete_navigation("tools").unwrap();
        assert_eq!(doc.active_id(), Some("home"));
        assert!(doc.groups("tools").is_none());
        assert!(doc.check_invariants().is_ok());

        doc.delete_navigation("home").unwrap();
        assert_eq!(doc.active_id(), Some("misc"));
        assert!(doc.check_invariants().is_ok());
    }

    #[test]
    fn test_set_active_is_idempotent() {
        let mut doc = sample();
        doc.set_active_navigation("tools").unwrap();
        doc.set_active_navigation("tools").unwrap();
        assert_eq!(doc.active_id(), Some("tools"));
        assert!(doc.check_invariants().is_ok());
        assert!(doc.set_active_navigation("nope").is_err());
    }

    #[test]
    fn test_group_names_unique_per_card_group() {
        let mut doc = sample();
        assert_eq!(
            doc.add_group("home", "Work", color(2)),
            Err(DocumentError::DuplicateGroup("Work".into()))
        );
        doc.add_group("tools", "Work", color(2)).unwrap();
        doc.add_group("home", "Play", color(3)).unwrap();
        assert_eq!(
            doc.rename_group("home", "Play", "Work", color(3)),
            Err(DocumentError::DuplicateGroup("Work".into()))
        );
        assert!(doc.check_invariants().is_ok());
    }

    #[test]
    fn test_rename_group_same_name_updates_color_only() {
        let mut doc = sample();
        doc.rename_group("home", "Work", "Work", color(5)).unwrap();
        let group = doc.group("home", 0).unwrap();
        assert_eq!(group.group_name, "Work");
        assert_eq!(group.color_index, Some(color(5)));
        assert_eq!(group.items.len(), 4);

        doc.rename_group("home", "Work", "Office", color(2)).unwrap();
        assert_eq!(doc.group("home", 0).unwrap().group_name, "Office");
        assert_eq!(
            doc.rename_group("home", "Work", "X", color(2)),
            Err(DocumentError::GroupNotFound("Work".into()))
        );
    }

    #[test]
    fn test_delete_group_drops_items() {
        let mut doc = sample();
        let removed = doc.delete_group("home", "Work").unwrap();
        assert_eq!(removed.items.len(), 4);
        assert!(doc.groups("home").unwrap().is_empty());
        assert_eq!(doc.item_count(), 0);
    }

    #[test]
    fn test_move_group_conflict_leaves_both_unchanged() {
        let mut doc = sample();
        doc.add_group("tools", "Work", color(4)).unwrap();
        let before = doc.clone();
        let err = doc.move_group("home", "Work", "tools").unwrap_err();
        assert_eq!(err, DocumentError::DuplicateGroup("Work".into()));
        assert_eq!(err.kind(), crate::domain::common::ErrorKind::Conflict);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_move_group_keeps_item_order() {
        let mut doc = sample();
        doc.move_group("home", "Work", "tools").unwrap();
        assert!(doc.groups("home").unwrap().is_empty());
        assert_eq!(titles(&doc, "tools", 0), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_add_card_to_missing_group() {
        let mut doc = sample();
        assert_eq!(
            doc.add_card_item("home", "Nope", CardDraft::new("https://x.test", "X"), &icons()),
            Err(DocumentError::GroupNotFound("Nope".into()))
        );
    }

    #[test]
    fn test_edit_card_keeps_previous_site_icon() {
        let mut doc = sample();
        let original = doc.item("home", 0, 1).unwrap().icon_url.clone();
        doc.edit_card_item("home", 0, 1, CardDraft::new("https://b2.test", "B2"), &icons())
            .unwrap();
        let edited = doc.item("home", 0, 1).unwrap();
        assert_eq!(edited.title, "B2");
        assert_eq!(edited.icon_url, original);
        assert_eq!(
            doc.edit_card_item("home", 0, 9, CardDraft::new("u", "t"), &icons()),
            Err(DocumentError::ItemNotFound { group_index: 0, item_index: 9 })
        );
    }

    #[test]
    fn test_delete_sole_item_cascades_but_move_does_not() {
        let mut doc = Document::default();
        doc.add_group("home", "Solo", color(1)).unwrap();
        doc.add_group("home", "Other", color(2)).unwrap();
        doc.add_card_item("home", "Solo", CardDraft::new("https://a.test", "A"), &icons())
            .unwrap();
        doc.add_card_item("home", "Other", CardDraft::new("https://b.test", "B"), &icons())
            .unwrap();

        let mut moved = doc.clone();
        moved.move_card_item("home", 0, 0, "home", 1, 0).unwrap();
        assert_eq!(moved.groups("home").unwrap().len(), 2);
        assert!(moved.group("home", 0).unwrap().items.is_empty());
        assert_eq!(titles(&moved, "home", 1), vec!["A", "B"]);

        let (_, group_removed) = doc.delete_card_item("home", 0, 0).unwrap();
        assert!(group_removed);
        let groups = doc.groups("home").unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].group_name, "Other");
    }

    #[test]
    fn test_move_within_group_shifts_by_one() {
        let mut doc = sample();
        doc.move_card_item("home", 0, 2, "home", 0, 0).unwrap();
        assert_eq!(titles(&doc, "home", 0), vec!["C", "A", "B", "D"]);
        assert_eq!(doc.item_count(), 4);
    }

    #[test]
    fn test_move_clamps_target_index() {
        let mut doc = sample();
        doc.add_group("tools", "Dest", color(1)).unwrap();
        let index = doc.move_card_item("home", 0, 0, "tools", 0, 42).unwrap();
        assert_eq!(index, 0);
        assert_eq!(titles(&doc, "tools", 0), vec!["A"]);
        assert_eq!(titles(&doc, "home", 0), vec!["B", "C", "D"]);
    }

    #[test]
    fn test_move_with_stale_address_is_noop() {
        let mut doc = sample();
        let before = doc.clone();
        assert!(doc.move_card_item("home", 0, 7, "home", 0, 0).is_err());
        assert!(doc.move_card_item("home", 0, 0, "tools", 3, 0).is_err());
        assert_eq!(doc, before);
    }

    #[test]
    fn test_reorder_navigation() {
        let mut doc = sample();
        doc.add_navigation("misc", "Misc").unwrap();
        // drop "home" onto "misc": lands in front of it
        doc.reorder_navigation(0, 2).unwrap();
        let ids: Vec<&str> = doc.navigation().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["tools", "home", "misc"]);

        doc.reorder_navigation(2, 0).unwrap();
        let ids: Vec<&str> = doc.sections().map(|(n, _)| n.id.as_str()).collect();
        assert_eq!(ids, vec!["misc", "tools", "home"]);
        assert!(doc.reorder_navigation(5, 0).is_err());
        assert!(doc.check_invariants().is_ok());
    }

    #[test]
    fn test_merge_groups_concatenates_collisions() {
        let mut doc = sample();
        let mut incoming = BusinessGroup::new("Work".into(), color(3));
        incoming.items.push(CardDraft::new("https://e.test", "E").into_item(&icons(), None).unwrap());
        let mut fresh = BusinessGroup::new("New".into(), color(4));
        fresh.items.push(CardDraft::new("https://f.test", "F").into_item(&icons(), None).unwrap());

        let summary = doc.merge_groups("home", vec![incoming, fresh]).unwrap();
        assert_eq!(
            summary,
            MergeSummary { groups_created: 1, groups_merged: 1, items_added: 2 }
        );
        assert_eq!(titles(&doc, "home", 0), vec!["A", "B", "C", "D", "E"]);
        assert_eq!(doc.group("home", 0).unwrap().color_index, Some(color(1)));
        assert_eq!(titles(&doc, "home", 1), vec!["F"]);
    }

    #[test]
    fn test_merge_groups_rejects_blank_name() {
        let mut doc = sample();
        let before = doc.clone();
        let blank = BusinessGroup::new("  ".into(), color(2));
        let named = BusinessGroup::new("Fresh".into(), color(2));
        assert_eq!(
            doc.merge_groups("home", vec![named, blank]),
            Err(DocumentError::EmptyField("groupName"))
        );
        assert_eq!(doc, before);
    }

    #[test]
    fn test_invariants_hold_over_operation_sequence() {
        let mut doc = Document::default();
        let ops: Vec<Box<dyn Fn(&mut Document) -> Result<(), DocumentError>>> = vec![
            Box::new(|d: &mut Document| d.add_navigation("a", "A")),
            Box::new(|d: &mut Document| d.add_navigation("b", "B")),
            Box::new(|d: &mut Document| d.set_active_navigation("b")),
            Box::new(|d: &mut Document| d.add_group("b", "G", color(1))),
            Box::new(|d: &mut Document| d.add_group("b", "G", color(1))),
            Box::new(|d: &mut Document| d.move_group("b", "G", "a")),
            Box::new(|d: &mut Document| d.delete_navigation("b").map(|_| ())),
            Box::new(|d: &mut Document| d.reorder_navigation(1, 0)),
            Box::new(|d: &mut Document| d.delete_navigation("home").map(|_| ())),
            Box::new(|d: &mut Document| d.delete_navigation("a").map(|_| ())),
        ];
        for op in ops {
            let _ = op(&mut doc);
            assert!(doc.check_invariants().is_ok(), "{:?}", doc.check_invariants());
        }
        assert_eq!(doc.navigation().len(), 1);
    }
}
