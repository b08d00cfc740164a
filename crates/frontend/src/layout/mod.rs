pub mod center;
pub mod global_context;
pub mod header;
pub mod left;
pub mod modal_service;

use crate::domain::a001_navigation::ui::NavigationManager;
use crate::domain::a002_business_group::ui::GroupEditor;
use crate::domain::a003_card_item::ui::CardEditor;
use crate::domain::a004_document::ui::TitleEditor;
use crate::shared::background::{BackgroundDialog, BackgroundLayer};
use crate::shared::notice::NoticeHost;
use crate::usecases::u502_import_document::ImportDocumentDialog;
use crate::usecases::u503_import_bookmarks::ImportBookmarksDialog;
use leptos::prelude::*;
use modal_service::use_dialogs;

pub use global_context::{use_dashboard, DashboardContext};
pub use modal_service::DialogService;

/// Main application shell.
///
/// ```text
/// +------------------------------------------+
/// |                 Header                   |
/// +------------------------------------------+
/// |  Navigation  |          Cards            |
/// |   (Left)     |         (Center)          |
/// +------------------------------------------+
/// ```
///
/// Dialogs are mounted only while open.
#[component]
pub fn Shell() -> impl IntoView {
    let ctx = use_dashboard();
    let dialogs = use_dialogs();

    view! {
        <BackgroundLayer />
        <div class="app-layout" class:edit-mode=move || ctx.edit_mode.get()>
            <header::Header />
            <div class="app-body">
                <left::Left>
                    <left::Navbar />
                </left::Left>
                <div class="app-main">
                    <center::Center />
                </div>
            </div>
        </div>
        <NoticeHost />

        {move || dialogs.card.get().map(|target| view! { <CardEditor target=target /> })}
        {move || dialogs.group.get().map(|target| view! { <GroupEditor target=target /> })}
        <Show when=move || dialogs.navigation.get()>
            <NavigationManager />
        </Show>
        <Show when=move || dialogs.title.get()>
            <TitleEditor />
        </Show>
        <Show when=move || dialogs.import_document.get()>
            <ImportDocumentDialog />
        </Show>
        <Show when=move || dialogs.import_bookmarks.get()>
            <ImportBookmarksDialog />
        </Show>
        <Show when=move || dialogs.background.get()>
            <BackgroundDialog />
        </Show>
    }
}
