use serde::Serialize;

/// Фрагмент текста; `highlighted` отмечает совпадение с поиском
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    pub highlighted: bool,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlighted: false,
        }
    }

    pub fn mark(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlighted: true,
        }
    }
}

/// Пункт навигации в боковой панели
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntryView {
    pub id: String,
    pub name: String,
    pub index: usize,
    pub active: bool,
    pub draggable: bool,
}

/// Карточка; поля адреса служат данными для правки, удаления и перетаскивания
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub nav_id: String,
    pub group_index: usize,
    pub item_index: usize,
    pub url: String,
    pub title: Vec<Segment>,
    pub description: Vec<Segment>,
    pub tooltip: String,
    pub icon_src: String,
    pub card_type: String,
    pub draggable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupView {
    pub nav_id: String,
    pub group_index: usize,
    pub name: String,
    /// Итоговый цвет 1..=6
    pub color: u8,
    pub items: Vec<CardView>,
}

/// Карточки одного пункта навигации
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionView {
    pub nav_id: String,
    pub nav_name: String,
    pub visible: bool,
    pub groups: Vec<GroupView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub navigation: Vec<NavEntryView>,
    pub sections: Vec<SectionView>,
    pub searching: bool,
    pub edit_mode: bool,
}

impl DashboardView {
    pub fn visible_sections(&self) -> impl Iterator<Item = &SectionView> {
        self.sections.iter().filter(|s| s.visible)
    }

    pub fn card_count(&self) -> usize {
        self.visible_sections()
            .flat_map(|s| s.groups.iter())
            .map(|g| g.items.len())
            .sum()
    }
}
