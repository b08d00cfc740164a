use super::parser::ParsedBookmarks;
use crate::domain::a002_business_group::aggregate::{BusinessGroup, ColorIndex};
use crate::domain::a003_card_item::aggregate::{CardItem, DEFAULT_CARD_TYPE};
use crate::shared::config::DashboardConfig;

/// Как раскладывать закладки по группам
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupingMode {
    /// Каждая папка становится группой с именем папки
    #[default]
    FoldersAsGroups,
    /// Все ссылки в одну группу с именем из настроек
    Flatten,
}

/// Cycles the configured card styles and icons over imported links
struct Decorator<'a> {
    config: &'a DashboardConfig,
    counter: usize,
}

impl<'a> Decorator<'a> {
    fn new(config: &'a DashboardConfig) -> Self {
        Self { config, counter: 0 }
    }

    fn card(&mut self, title: &str, url: &str) -> CardItem {
        let n = self.counter;
        self.counter += 1;
        let styles = &self.config.card_styles;
        let icons = &self.config.icon_catalog;
        CardItem {
            url: url.to_string(),
            title: if title.is_empty() { url.to_string() } else { title.to_string() },
            description: String::new(),
            icon: (!icons.is_empty()).then(|| icons[n % icons.len()].clone()),
            icon_url: None,
            card_type: if styles.is_empty() {
                DEFAULT_CARD_TYPE.to_string()
            } else {
                styles[n % styles.len()].clone()
            },
        }
    }
}

impl ParsedBookmarks {
    /// Groups ready to be merged into the active navigation entry
    pub fn into_groups(&self, mode: GroupingMode, config: &DashboardConfig) -> Vec<BusinessGroup> {
        let mut decorator = Decorator::new(config);
        match mode {
            GroupingMode::FoldersAsGroups => self
                .folders
                .iter()
                .filter(|f| !f.links.is_empty())
                .enumerate()
                .map(|(i, folder)| BusinessGroup {
                    group_name: if folder.name.trim().is_empty() {
                        config.bookmarks_group_name.clone()
                    } else {
                        folder.name.trim().to_string()
                    },
                    color_index: Some(ColorIndex::rotation(i)),
                    items: folder
                        .links
                        .iter()
                        .map(|l| decorator.card(&l.title, &l.url))
                        .collect(),
                })
                .collect(),
            GroupingMode::Flatten => {
                let items: Vec<CardItem> = self
                    .folders
                    .iter()
                    .flat_map(|f| f.links.iter())
                    .map(|l| decorator.card(&l.title, &l.url))
                    .collect();
                if items.is_empty() {
                    return Vec::new();
                }
                vec![BusinessGroup {
                    group_name: config.bookmarks_group_name.clone(),
                    color_index: Some(ColorIndex::rotation(0)),
                    items,
                }]
            }
        }
    }
}
