//! Dashboard controller.
//!
//! Owns the session (document + storage) and the reactive copies the views
//! read. Every mutation goes through [`DashboardContext::commit`]: the
//! session persists first, then the document signal is replaced and the
//! view memo rebuilds the whole render tree.

use contracts::domain::a002_business_group::aggregate::{BusinessGroup, ColorIndex};
use contracts::domain::a003_card_item::aggregate::CardDraft;
use contracts::domain::a003_card_item::icon::IconSource;
use contracts::domain::a004_document::aggregate::Document;
use contracts::domain::a004_document::MergeSummary;
use contracts::domain::common::{DocumentError, ErrorKind};
use contracts::projections::p900_dashboard_view::{render, RenderOutcome, UiState};
use contracts::shared::background::BackgroundSettings;
use contracts::shared::config::DashboardConfig;
use contracts::shared::drag_drop::{
    card_target_index, CardDragMachine, CardDragPayload, CardDropTarget, DropOutcome,
    NavDragMachine, NavDragPayload,
};
use contracts::shared::error::DashboardError;
use contracts::shared::session::DashboardSession;
use contracts::usecases::u502_import_document::ImportedDocument;
use leptos::prelude::*;

use crate::shared::dom::confirm;
use crate::shared::notice::NoticeService;
use crate::shared::storage::BrowserStorage;

#[derive(Clone, Copy)]
pub struct DashboardContext {
    pub config: StoredValue<DashboardConfig>,
    session: StoredValue<DashboardSession<BrowserStorage>>,
    pub document: RwSignal<Document>,
    pub title: RwSignal<String>,
    pub edit_mode: RwSignal<bool>,
    /// Committed search term (the header input keeps its own draft)
    pub search: RwSignal<String>,
    pub background: RwSignal<Option<BackgroundSettings>>,
    pub card_drag: RwSignal<CardDragMachine>,
    pub nav_drag: RwSignal<NavDragMachine>,
    pub view: Memo<RenderOutcome>,
    notices: NoticeService,
}

impl DashboardContext {
    pub fn new(config: DashboardConfig, notices: NoticeService) -> Self {
        let session = DashboardSession::open(BrowserStorage, &config);

        let document = RwSignal::new(session.document().clone());
        let title = RwSignal::new(session.title().to_string());
        let edit_mode = RwSignal::new(session.edit_mode());
        let background = RwSignal::new(session.background());
        let search = RwSignal::new(String::new());
        let config = StoredValue::new(config);

        let view = Memo::new(move |_| {
            let ui = UiState::new(search.get(), edit_mode.get());
            config.with_value(|c| document.with(|d| render(d, &ui, c)))
        });

        Self {
            config,
            session: StoredValue::new(session),
            document,
            title,
            edit_mode,
            search,
            background,
            card_drag: RwSignal::new(CardDragMachine::new()),
            nav_drag: RwSignal::new(NavDragMachine::new()),
            view,
            notices,
        }
    }

    /// Side effects that follow state: the browser tab title and clearing
    /// a search that found nothing.
    pub fn init_effects(&self) {
        let this = *self;
        Effect::new(move |_| {
            let title = this.title.get();
            if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
                doc.set_title(&title);
            }
        });

        Effect::new(move |_| {
            if this.view.with(|v| v.is_no_results()) {
                log::info!("search '{}' found nothing", this.search.get_untracked());
                this.notices.info("No matching cards found");
                this.search.set(String::new());
            }
        });
    }

    pub fn notices(&self) -> NoticeService {
        self.notices
    }

    pub fn report(&self, action: &str, err: &DashboardError) {
        match err.kind() {
            ErrorKind::Storage => log::error!("{}: {}", action, err),
            _ => log::warn!("{} rejected: {}", action, err),
        }
        if err.is_user_visible() {
            self.notices.error(err.to_string());
        }
    }

    /// Транзакционно применить операцию к документу
    fn commit<T>(
        &self,
        action: &str,
        op: impl FnOnce(&mut Document) -> Result<T, DocumentError>,
    ) -> Option<T> {
        let result = self.session.try_update_value(|s| -> Result<_, DashboardError> {
            let output = s.apply(op)?;
            Ok((output, s.document().clone()))
        })?;
        match result {
            Ok((output, document)) => {
                log::info!("{}: committed", action);
                self.document.set(document);
                Some(output)
            }
            Err(e) => {
                self.report(action, &e);
                None
            }
        }
    }

    pub fn require_edit_mode(&self) -> bool {
        if self.edit_mode.get_untracked() {
            return true;
        }
        self.notices.warning("Enable edit mode first");
        false
    }

    pub fn icon_source(&self, session_icon: Option<String>) -> IconSource {
        self.config
            .with_value(|c| c.icon_source())
            .with_session_icon(session_icon)
    }

    pub fn active_nav_id(&self) -> Option<String> {
        self.document
            .with_untracked(|d| d.active_id().map(String::from))
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    pub fn activate(&self, nav_id: &str) {
        self.search.set(String::new());
        let id = nav_id.to_string();
        self.commit("activate navigation", |d| d.set_active_navigation(&id));
    }

    pub fn add_navigation(&self, id: &str, name: &str) -> bool {
        self.commit("add navigation", |d| d.add_navigation(id, name))
            .is_some()
    }

    pub fn rename_navigation(&self, id: &str, name: &str) -> bool {
        self.commit("rename navigation", |d| d.rename_navigation(id, name))
            .is_some()
    }

    pub fn delete_navigation(&self, id: &str) {
        let name = self
            .document
            .with_untracked(|d| d.entry(id).map(|e| e.name.clone()))
            .unwrap_or_else(|| id.to_string());
        if !confirm(&format!("Delete \"{}\" together with all its groups and cards?", name)) {
            return;
        }
        if let Some(removed) = self.commit("delete navigation", |d| d.delete_navigation(id)) {
            self.notices.success(format!("\"{}\" deleted", removed.name));
        }
    }

    // ------------------------------------------------------------------
    // Groups
    // ------------------------------------------------------------------

    pub fn add_group(&self, nav_id: &str, name: &str, color: ColorIndex) -> bool {
        self.commit("add group", |d| d.add_group(nav_id, name, color))
            .is_some()
    }

    pub fn rename_group(&self, nav_id: &str, old: &str, new: &str, color: ColorIndex) -> bool {
        self.commit("edit group", |d| d.rename_group(nav_id, old, new, color))
            .is_some()
    }

    pub fn delete_group(&self, nav_id: &str, name: &str) -> bool {
        if !confirm(&format!("Delete group \"{}\" and all its cards?", name)) {
            return false;
        }
        self.commit("delete group", |d| d.delete_group(nav_id, name))
            .is_some()
    }

    pub fn move_group(&self, source: &str, name: &str, target: &str) -> bool {
        self.commit("move group", |d| d.move_group(source, name, target))
            .is_some()
    }

    // ------------------------------------------------------------------
    // Cards
    // ------------------------------------------------------------------

    pub fn add_card(
        &self,
        nav_id: &str,
        group: &str,
        draft: CardDraft,
        session_icon: Option<String>,
    ) -> bool {
        let icons = self.icon_source(session_icon);
        self.commit("add card", |d| d.add_card_item(nav_id, group, draft, &icons))
            .is_some()
    }

    /// Создать группу и её первую карточку одной записью
    pub fn add_card_in_new_group(
        &self,
        nav_id: &str,
        group: &str,
        draft: CardDraft,
        session_icon: Option<String>,
    ) -> bool {
        let icons = self.icon_source(session_icon);
        let group = group.trim();
        let color = self
            .document
            .with_untracked(|d| ColorIndex::rotation(d.groups(nav_id).map_or(0, <[_]>::len)));
        self.commit("add card", |d| {
            d.add_group(nav_id, group, color)?;
            d.add_card_item(nav_id, group, draft, &icons)
        })
        .is_some()
    }

    pub fn edit_card(
        &self,
        nav_id: &str,
        group_index: usize,
        item_index: usize,
        draft: CardDraft,
        session_icon: Option<String>,
    ) -> bool {
        let icons = self.icon_source(session_icon);
        self.commit("edit card", |d| {
            d.edit_card_item(nav_id, group_index, item_index, draft, &icons)
        })
        .is_some()
    }

    pub fn delete_card(&self, nav_id: &str, group_index: usize, item_index: usize) {
        let title = self
            .document
            .with_untracked(|d| d.item(nav_id, group_index, item_index).map(|i| i.title.clone()));
        let Some(title) = title else {
            self.report(
                "delete card",
                &DocumentError::ItemNotFound {
                    group_index,
                    item_index,
                }
                .into(),
            );
            return;
        };
        if !confirm(&format!("Delete card \"{}\"?", title)) {
            return;
        }
        if let Some((_, group_removed)) = self.commit("delete card", |d| {
            d.delete_card_item(nav_id, group_index, item_index)
        }) {
            if group_removed {
                log::info!("group emptied by delete was removed");
            }
        }
    }

    // ------------------------------------------------------------------
    // Drag and drop
    // ------------------------------------------------------------------

    pub fn begin_card_drag(&self, payload: CardDragPayload) -> bool {
        let edit_mode = self.edit_mode.get_untracked();
        self.card_drag
            .try_update(|m| m.begin(edit_mode, payload))
            .unwrap_or(false)
    }

    /// `raw_index` is the insertion index among the container's items as
    /// they are laid out, before the same-container adjustment.
    pub fn drop_card(&self, target: CardDropTarget, raw_index: usize) {
        let Some(outcome) = self.card_drag.try_update(|m| m.drop_on(target)) else {
            return;
        };
        let DropOutcome::Accepted { payload, target } = outcome else {
            return;
        };
        let index = card_target_index(&payload, &target, raw_index);
        self.commit("move card", |d| {
            d.move_card_item(
                &payload.nav_id,
                payload.group_index,
                payload.item_index,
                &target.nav_id,
                target.group_index,
                index,
            )
        });
    }

    pub fn end_card_drag(&self) {
        self.card_drag.update(|m| {
            if m.end() {
                log::debug!("card drag cancelled");
            }
        });
    }

    pub fn begin_nav_drag(&self, payload: NavDragPayload) -> bool {
        let edit_mode = self.edit_mode.get_untracked();
        self.nav_drag
            .try_update(|m| m.begin(edit_mode, payload))
            .unwrap_or(false)
    }

    pub fn drop_nav(&self, target_index: usize) {
        let Some(DropOutcome::Accepted { payload, target }) =
            self.nav_drag.try_update(|m| m.drop_on(target_index))
        else {
            return;
        };
        let fresh = self.document.with_untracked(|d| {
            d.navigation()
                .get(payload.index)
                .is_some_and(|e| e.id == payload.nav_id)
        });
        if !fresh {
            log::warn!("navigation drag payload is stale: {:?}", payload);
            return;
        }
        self.commit("reorder navigation", |d| {
            d.reorder_navigation(payload.index, target)
        });
    }

    pub fn end_nav_drag(&self) {
        self.nav_drag.update(|m| {
            if m.end() {
                log::debug!("navigation drag cancelled");
            }
        });
    }

    // ------------------------------------------------------------------
    // Title, edit mode, search
    // ------------------------------------------------------------------

    pub fn set_title(&self, title: &str) -> bool {
        let result = self
            .session
            .try_update_value(|s| s.set_title(title).map(|_| s.title().to_string()));
        match result {
            Some(Ok(title)) => {
                log::info!("title changed");
                self.title.set(title);
                true
            }
            Some(Err(e)) => {
                self.report("set title", &e);
                false
            }
            None => false,
        }
    }

    pub fn set_edit_mode(&self, enabled: bool) {
        match self.session.try_update_value(|s| s.set_edit_mode(enabled)) {
            Some(Ok(())) => {
                log::info!("edit mode {}", if enabled { "on" } else { "off" });
                self.edit_mode.set(enabled);
            }
            Some(Err(e)) => self.report("toggle edit mode", &e.into()),
            None => {}
        }
    }

    pub fn run_search(&self, term: &str) {
        self.search.set(term.trim().to_string());
    }

    // ------------------------------------------------------------------
    // Import, background, cache
    // ------------------------------------------------------------------

    /// Заменить всё импортированным документом после подтверждения
    pub fn replace_document(&self, imported: ImportedDocument) -> bool {
        if !confirm("Importing replaces all current navigation entries and cards. Continue?") {
            return false;
        }
        let ImportedDocument {
            document,
            website_title,
        } = imported;
        let result = self.session.try_update_value(|s| {
            s.replace_document(document, website_title)
                .map(|_| (s.document().clone(), s.title().to_string()))
        });
        match result {
            Some(Ok((document, title))) => {
                log::info!("document imported");
                self.search.set(String::new());
                self.document.set(document);
                self.title.set(title);
                true
            }
            Some(Err(e)) => {
                self.report("import document", &e);
                false
            }
            None => false,
        }
    }

    /// Слить группы закладок в активный пункт навигации
    pub fn merge_bookmarks(&self, groups: Vec<BusinessGroup>) -> Option<MergeSummary> {
        let nav_id = self.active_nav_id()?;
        self.commit("import bookmarks", |d| d.merge_groups(&nav_id, groups))
    }

    pub fn save_background(&self, settings: BackgroundSettings) -> bool {
        match self.session.with_value(|s| s.save_background(&settings)) {
            Ok(()) => {
                log::info!("background saved");
                self.background.set(Some(settings));
                true
            }
            Err(e) => {
                self.report("save background", &e.into());
                false
            }
        }
    }

    pub fn clear_background(&self) {
        self.session.with_value(|s| s.clear_background());
        self.background.set(None);
    }

    pub fn clear_cache(&self) {
        if !confirm("Clear all saved data? Navigation, cards, title and background will be reset.") {
            return;
        }
        self.session.update_value(|s| s.clear_all());
        let (document, title) = self
            .session
            .with_value(|s| (s.document().clone(), s.title().to_string()));
        log::info!("local data cleared");
        self.search.set(String::new());
        self.document.set(document);
        self.title.set(title);
        self.edit_mode.set(false);
        self.background.set(None);
        self.notices.success("Saved data cleared");
    }
}

pub fn use_dashboard() -> DashboardContext {
    use_context::<DashboardContext>().expect("DashboardContext not provided in context")
}
