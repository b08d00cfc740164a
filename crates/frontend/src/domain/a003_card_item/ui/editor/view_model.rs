use super::model;
use crate::layout::global_context::DashboardContext;
use crate::layout::modal_service::CardTarget;
use contracts::domain::a003_card_item::aggregate::CardDraft;
use contracts::domain::a003_card_item::icon::IconChoice;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;

const ICON_CHECK_DELAY_MS: u32 = 600;

/// ViewModel для формы карточки
#[derive(Clone)]
pub struct CardEditorViewModel {
    pub target: CardTarget,
    pub url: RwSignal<String>,
    pub title: RwSignal<String>,
    pub description: RwSignal<String>,
    /// Icon picker value: a catalog file name or the site-icon sentinel
    pub icon: RwSignal<String>,
    pub card_type: RwSignal<String>,
    /// Выбранная группа; пусто означает «создать новую группу»
    pub group: RwSignal<String>,
    pub new_group: RwSignal<String>,
    /// Site icon confirmed reachable during this editor session
    pub session_icon: RwSignal<Option<String>>,
    /// Имена групп целевого пункта навигации
    pub groups: Vec<String>,
    pub sentinel: String,
}

impl CardEditorViewModel {
    pub fn new(target: CardTarget, ctx: &DashboardContext) -> Self {
        let sentinel = ctx.config.with_value(|c| c.site_icon_sentinel.clone());

        let (draft, groups, group) = ctx.document.with_untracked(|d| match &target {
            CardTarget::New { nav_id, group_name } => {
                let groups: Vec<String> = d
                    .groups(nav_id)
                    .unwrap_or(&[])
                    .iter()
                    .map(|g| g.group_name.clone())
                    .collect();
                let group = group_name
                    .clone()
                    .or_else(|| groups.first().cloned())
                    .unwrap_or_default();
                (CardDraft::new("", ""), groups, group)
            }
            CardTarget::Existing {
                nav_id,
                group_index,
                item_index,
            } => {
                let draft = d
                    .item(nav_id, *group_index, *item_index)
                    .map(|item| CardDraft::from_item(item, &sentinel))
                    .unwrap_or_else(|| CardDraft::new("", ""));
                let group = d
                    .group(nav_id, *group_index)
                    .map(|g| g.group_name.clone())
                    .unwrap_or_default();
                (draft, Vec::new(), group)
            }
        });

        let icon = match &draft.icon {
            IconChoice::UseSiteIcon => sentinel.clone(),
            IconChoice::Local(name) => name.clone(),
        };

        Self {
            target,
            url: RwSignal::new(draft.url),
            title: RwSignal::new(draft.title),
            description: RwSignal::new(draft.description),
            icon: RwSignal::new(icon),
            card_type: RwSignal::new(draft.card_type),
            group: RwSignal::new(group),
            new_group: RwSignal::new(String::new()),
            session_icon: RwSignal::new(None),
            groups,
            sentinel,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self.target, CardTarget::New { .. })
    }

    pub fn is_form_valid(&self) -> bool {
        !self.url.get().trim().is_empty() && !self.title.get().trim().is_empty()
    }

    fn draft(&self) -> CardDraft {
        CardDraft::new(self.url.get_untracked(), self.title.get_untracked())
            .with_description(self.description.get_untracked())
            .with_icon(IconChoice::from_selection(
                &self.icon.get_untracked(),
                &self.sentinel,
            ))
            .with_card_type(self.card_type.get_untracked())
    }

    /// Check the site icon whenever the url settles on a new value. Never
    /// blocks saving: until the check answers, the favicon URL itself is used.
    pub fn watch_url(&self, ctx: &DashboardContext) {
        let url = self.url;
        let session_icon = self.session_icon;
        let config = ctx.config;
        let initial = url.get_untracked();

        Effect::new(move |_| {
            let current = url.get();
            session_icon.set(None);
            if current.trim().is_empty() || current == initial {
                return;
            }
            let icon_url = config.with_value(|c| c.icon_source().favicon_url(current.trim()));
            wasm_bindgen_futures::spawn_local(async move {
                TimeoutFuture::new(ICON_CHECK_DELAY_MS).await;
                if url.get_untracked() != current {
                    return;
                }
                match model::check_favicon(&icon_url).await {
                    Ok(()) => {
                        log::debug!("site icon resolved: {}", icon_url);
                        session_icon.set(Some(icon_url));
                    }
                    Err(e) => log::warn!("{}", e),
                }
            });
        });
    }

    /// Returns `true` when the dialog can close
    pub fn save_command(&self, ctx: &DashboardContext) -> bool {
        let draft = self.draft();
        let session_icon = self.session_icon.get_untracked();
        match &self.target {
            CardTarget::Existing {
                nav_id,
                group_index,
                item_index,
            } => ctx.edit_card(nav_id, *group_index, *item_index, draft, session_icon),
            CardTarget::New { nav_id, .. } => {
                let group = self.group.get_untracked();
                if group.is_empty() {
                    ctx.add_card_in_new_group(
                        nav_id,
                        &self.new_group.get_untracked(),
                        draft,
                        session_icon,
                    )
                } else {
                    ctx.add_card(nav_id, &group, draft, session_icon)
                }
            }
        }
    }
}
