//! Чистая проекция документа в данные для отображения.
//!
//! Дерево строится заново при каждом вызове, frontend отбрасывает прежнее.
//! Для одного документа и состояния UI результат всегда один и тот же.

use super::dto::{CardView, DashboardView, GroupView, NavEntryView, SectionView};
use super::search::{highlight, matches};
use crate::domain::a002_business_group::aggregate::ColorIndex;
use crate::domain::a003_card_item::aggregate::CardItem;
use crate::domain::a004_document::aggregate::Document;
use crate::shared::config::DashboardConfig;

/// Состояние интерфейса, влияющее на отрисовку
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub search: String,
    pub edit_mode: bool,
}

impl UiState {
    pub fn new(search: impl Into<String>, edit_mode: bool) -> Self {
        Self {
            search: search.into(),
            edit_mode,
        }
    }

    /// Строка поиска без пробелов по краям; `None`, если пустая
    pub fn search_term(&self) -> Option<&str> {
        let term = self.search.trim();
        (!term.is_empty()).then_some(term)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered(DashboardView),
    /// Поиск ничего не нашёл; содержит нефильтрованное представление
    NoResults(DashboardView),
}

impl RenderOutcome {
    pub fn view(&self) -> &DashboardView {
        match self {
            RenderOutcome::Rendered(view) | RenderOutcome::NoResults(view) => view,
        }
    }

    pub fn into_view(self) -> DashboardView {
        match self {
            RenderOutcome::Rendered(view) | RenderOutcome::NoResults(view) => view,
        }
    }

    pub fn is_no_results(&self) -> bool {
        matches!(self, RenderOutcome::NoResults(_))
    }
}

/// Icon priority: resolved `iconUrl`, then a local `.png`, then the default
pub fn icon_src(item: &CardItem, config: &DashboardConfig) -> String {
    if let Some(url) = item.icon_url.as_deref().filter(|u| !u.is_empty()) {
        return url.to_string();
    }
    match item.icon.as_deref() {
        Some(icon) if icon.ends_with(".png") => config.local_icon_path(icon),
        _ => config.default_icon_path(),
    }
}

fn tooltip(item: &CardItem) -> String {
    if item.description.is_empty() {
        item.title.clone()
    } else {
        format!("{}\n{}", item.title, item.description)
    }
}

fn card_view(
    nav_id: &str,
    group_index: usize,
    item_index: usize,
    item: &CardItem,
    term: Option<&str>,
    ui: &UiState,
    config: &DashboardConfig,
) -> CardView {
    let term = term.unwrap_or("");
    CardView {
        nav_id: nav_id.to_string(),
        group_index,
        item_index,
        url: item.url.clone(),
        title: highlight(&item.title, term),
        description: highlight(&item.description, term),
        tooltip: tooltip(item),
        icon_src: icon_src(item, config),
        card_type: item.card_type.clone(),
        draggable: ui.edit_mode,
    }
}

fn item_matches(item: &CardItem, term: &str) -> bool {
    matches(&item.title, term) || matches(&item.description, term)
}

fn build(document: &Document, ui: &UiState, term: Option<&str>, config: &DashboardConfig) -> DashboardView {
    let navigation = document
        .navigation()
        .iter()
        .enumerate()
        .map(|(index, entry)| NavEntryView {
            id: entry.id.clone(),
            name: entry.name.clone(),
            index,
            active: entry.is_active,
            draggable: ui.edit_mode,
        })
        .collect();

    // one counter across the whole pass, advanced only by uncolored groups
    let mut rotation = 0usize;
    let mut sections = Vec::with_capacity(document.navigation().len());

    for (entry, groups) in document.sections() {
        let mut group_views = Vec::with_capacity(groups.len());
        for (group_index, group) in groups.iter().enumerate() {
            let color = match group.color_index {
                Some(color) => color,
                None => {
                    let color = ColorIndex::rotation(rotation);
                    rotation += 1;
                    color
                }
            };

            let items: Vec<CardView> = group
                .items
                .iter()
                .enumerate()
                .filter(|(_, item)| term.map_or(true, |t| item_matches(item, t)))
                .map(|(item_index, item)| {
                    card_view(&entry.id, group_index, item_index, item, term, ui, config)
                })
                .collect();

            if term.is_some() && items.is_empty() {
                continue;
            }
            group_views.push(GroupView {
                nav_id: entry.id.clone(),
                group_index,
                name: group.group_name.clone(),
                color: color.value(),
                items,
            });
        }

        let visible = match term {
            Some(_) => !group_views.is_empty(),
            None => entry.is_active,
        };
        sections.push(SectionView {
            nav_id: entry.id.clone(),
            nav_name: entry.name.clone(),
            visible,
            groups: group_views,
        });
    }

    DashboardView {
        navigation,
        sections,
        searching: term.is_some(),
        edit_mode: ui.edit_mode,
    }
}

pub fn render(document: &Document, ui: &UiState, config: &DashboardConfig) -> RenderOutcome {
    let Some(term) = ui.search_term() else {
        return RenderOutcome::Rendered(build(document, ui, None, config));
    };
    let view = build(document, ui, Some(term), config);
    if view.card_count() == 0 {
        return RenderOutcome::NoResults(build(document, ui, None, config));
    }
    RenderOutcome::Rendered(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_business_group::aggregate::BusinessGroup;
    use crate::domain::a003_card_item::aggregate::CardDraft;
    use crate::projections::p900_dashboard_view::dto::Segment;

    fn config() -> DashboardConfig {
        DashboardConfig::default()
    }

    fn sample() -> Document {
        let icons = config().icon_source();
        let mut doc = Document::default();
        doc.add_navigation("dev", "Dev").unwrap();
        doc.add_group("home", "News", ColorIndex::new(4).unwrap()).unwrap();
        doc.add_card_item("home", "News", CardDraft::new("https://n.test", "Daily News"), &icons)
            .unwrap();
        doc.merge_groups(
            "home",
            vec![BusinessGroup {
                group_name: "Plain".into(),
                color_index: None,
                items: Vec::new(),
            }],
        )
        .unwrap();
        doc.merge_groups(
            "dev",
            vec![
                BusinessGroup {
                    group_name: "Code".into(),
                    color_index: None,
                    items: vec![CardDraft::new("https://gh.test", "GitHub")
                        .with_description("code hosting")
                        .into_item(&icons, None)
                        .unwrap()],
                },
                BusinessGroup {
                    group_name: "Docs".into(),
                    color_index: None,
                    items: vec![CardDraft::new("https://docs.test", "Rust Docs")
                        .into_item(&icons, None)
                        .unwrap()],
                },
            ],
        )
        .unwrap();
        doc
    }

    fn colors(view: &DashboardView) -> Vec<(String, u8)> {
        view.sections
            .iter()
            .flat_map(|s| s.groups.iter())
            .map(|g| (g.name.clone(), g.color))
            .collect()
    }

    #[test]
    fn test_color_rotation_spans_sections() {
        let outcome = render(&sample(), &UiState::default(), &config());
        assert_eq!(
            colors(outcome.view()),
            vec![
                ("News".to_string(), 4),
                ("Plain".to_string(), 1),
                ("Code".to_string(), 2),
                ("Docs".to_string(), 3),
            ]
        );
    }

    #[test]
    fn test_only_active_section_visible() {
        let view = render(&sample(), &UiState::default(), &config()).into_view();
        let visible: Vec<&str> = view.visible_sections().map(|s| s.nav_id.as_str()).collect();
        assert_eq!(visible, vec!["home"]);
        assert_eq!(view.sections.len(), 2);
        assert!(!view.searching);
    }

    #[test]
    fn test_render_is_idempotent() {
        let doc = sample();
        let ui = UiState::new("rust", true);
        assert_eq!(render(&doc, &ui, &config()), render(&doc, &ui, &config()));
    }

    #[test]
    fn test_search_filters_across_sections() {
        let view = render(&sample(), &UiState::new("CODE", false), &config()).into_view();
        assert!(view.searching);
        let visible: Vec<&SectionView> = view.visible_sections().collect();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].nav_id, "dev");
        assert_eq!(visible[0].groups.len(), 1);

        let card = &visible[0].groups[0].items[0];
        assert_eq!(card.title, vec![Segment::plain("GitHub")]);
        assert!(card.description.iter().any(|s| s.highlighted && s.text == "code"));
        // colors are assigned before filtering
        assert_eq!(visible[0].groups[0].color, 2);
    }

    #[test]
    fn test_search_keeps_original_addressing() {
        let view = render(&sample(), &UiState::new("rust", false), &config()).into_view();
        let group = &view.visible_sections().next().unwrap().groups[0];
        assert_eq!(group.name, "Docs");
        assert_eq!(group.group_index, 1);
        assert_eq!(group.items[0].item_index, 0);
    }

    #[test]
    fn test_no_results_clears_filter() {
        let outcome = render(&sample(), &UiState::new("zzz", false), &config());
        assert!(outcome.is_no_results());
        let expected = render(&sample(), &UiState::default(), &config()).into_view();
        assert_eq!(outcome.into_view(), expected);
    }

    #[test]
    fn test_blank_search_is_no_search() {
        let outcome = render(&sample(), &UiState::new("   ", false), &config());
        assert!(!outcome.is_no_results());
        assert!(!outcome.view().searching);
    }

    #[test]
    fn test_icon_priority() {
        let config = config();
        let mut item = CardItem {
            url: "https://x.test".into(),
            title: "X".into(),
            description: String::new(),
            icon: Some("logo.png".into()),
            icon_url: Some("https://cdn.test/x.ico".into()),
            card_type: "card1".into(),
        };
        assert_eq!(icon_src(&item, &config), "https://cdn.test/x.ico");
        item.icon_url = None;
        assert_eq!(icon_src(&item, &config), "images/web-icon/logo.png");
        item.icon = Some("emoji".into());
        assert_eq!(icon_src(&item, &config), "images/web-icon/a-hua1.png");
    }

    #[test]
    fn test_edit_mode_makes_entries_draggable() {
        let view = render(&sample(), &UiState::new("", true), &config()).into_view();
        assert!(view.navigation.iter().all(|n| n.draggable));
        assert!(view.sections[0].groups[0].items.iter().all(|c| c.draggable));
    }
}
