use crate::layout::global_context::use_dashboard;
use crate::layout::modal_service::{use_dialogs, CardTarget, GroupTarget};
use crate::shared::icons::icon;
use crate::usecases::u501_export_document::export_current;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_export_document::ExportDocument;
use contracts::usecases::u502_import_document::ImportDocument;
use contracts::usecases::u503_import_bookmarks::ImportBookmarks;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn Header() -> impl IntoView {
    let ctx = use_dashboard();
    let dialogs = use_dialogs();

    // черновик поиска; применяется по Enter или кнопке
    let draft = RwSignal::new(String::new());
    Effect::new(move |_| {
        if ctx.search.get().is_empty() {
            draft.set(String::new());
        }
    });

    let submit_search = move || ctx.run_search(&draft.get_untracked());

    let edit_switch = RwSignal::new(ctx.edit_mode.get_untracked());
    Effect::new(move |_| {
        let wanted = edit_switch.get();
        if wanted != ctx.edit_mode.get_untracked() {
            ctx.set_edit_mode(wanted);
        }
    });
    Effect::new(move |_| {
        let actual = ctx.edit_mode.get();
        if edit_switch.get_untracked() != actual {
            edit_switch.set(actual);
        }
    });

    let is_editing = move || ctx.edit_mode.get();

    let open_title = move |_| {
        if ctx.require_edit_mode() {
            dialogs.title.set(true);
        }
    };

    let add_card = move |_| {
        if !ctx.require_edit_mode() {
            return;
        }
        if let Some(nav_id) = ctx.active_nav_id() {
            dialogs.edit_card(CardTarget::New {
                nav_id,
                group_name: None,
            });
        }
    };

    let add_group = move |_| {
        if !ctx.require_edit_mode() {
            return;
        }
        if let Some(nav_id) = ctx.active_nav_id() {
            dialogs.edit_group(GroupTarget::New { nav_id });
        }
    };

    view! {
        <header data-zone="header" class="header">
            <div class="header__content">
                <span
                    class="header__title"
                    class:header__title--editable=is_editing
                    title=move || if is_editing() { "Click to rename" } else { "" }
                    on:click=open_title
                >
                    {move || ctx.title.get()}
                </span>
            </div>

            <form
                class="header__search"
                on:submit=move |ev| {
                    ev.prevent_default();
                    submit_search();
                }
            >
                <Input value=draft placeholder="Search cards..." />
                <Button appearance=ButtonAppearance::Primary on_click=move |_| submit_search()>
                    {icon("search")}
                </Button>
            </form>

            <div class="header__actions">
                <Switch checked=edit_switch label="Edit mode" />

                <Show when=is_editing>
                    <button class="header__icon-btn" title="Add card" on:click=add_card>
                        {icon("plus")}
                        <span>"Card"</span>
                    </button>
                    <button class="header__icon-btn" title="Add group" on:click=add_group>
                        {icon("plus")}
                        <span>"Group"</span>
                    </button>
                    <button
                        class="header__icon-btn"
                        title="Manage navigation"
                        on:click=move |_| dialogs.navigation.set(true)
                    >
                        {icon("menu")}
                    </button>
                </Show>

                <button class="header__icon-btn" title=ExportDocument::display_name() on:click=move |_| export_current(&ctx)>
                    {icon("download")}
                </button>
                <button
                    class="header__icon-btn"
                    title=ImportDocument::display_name()
                    on:click=move |_| {
                        if ctx.require_edit_mode() {
                            dialogs.import_document.set(true);
                        }
                    }
                >
                    {icon("upload")}
                </button>
                <button
                    class="header__icon-btn"
                    title=ImportBookmarks::display_name()
                    on:click=move |_| {
                        if ctx.require_edit_mode() {
                            dialogs.import_bookmarks.set(true);
                        }
                    }
                >
                    {icon("bookmark")}
                </button>
                <button
                    class="header__icon-btn"
                    title="Background"
                    on:click=move |_| dialogs.background.set(true)
                >
                    {icon("image")}
                </button>
                <button class="header__icon-btn" title="Clear saved data" on:click=move |_| ctx.clear_cache()>
                    {icon("trash")}
                </button>
            </div>
        </header>
    }
}
