use crate::layout::global_context::use_dashboard;
use crate::layout::modal_service::use_dialogs;
use crate::shared::dom::read_selected_file;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u503_import_bookmarks::{
    parse_bookmarks_html, GroupingMode, ImportBookmarks, ParsedBookmarks,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Импорт закладок браузера в активный пункт навигации
#[component]
pub fn ImportBookmarksDialog() -> impl IntoView {
    let ctx = use_dashboard();
    let dialogs = use_dialogs();

    let parsed = RwSignal::new(None::<ParsedBookmarks>);
    let error = RwSignal::new(None::<String>);
    let flatten = RwSignal::new(false);

    let target_name = move || {
        ctx.document
            .with(|d| d.active().map(|e| e.name.clone()))
            .unwrap_or_default()
    };

    let on_file = move |ev: web_sys::Event| {
        parsed.set(None);
        error.set(None);
        spawn_local(async move {
            match read_selected_file(ev).await {
                Ok(Some((name, html))) => match parse_bookmarks_html(&html) {
                    Ok(bookmarks) => {
                        log::info!(
                            "{}: {} links in {} folders",
                            name,
                            bookmarks.total(),
                            bookmarks.folders.len()
                        );
                        parsed.set(Some(bookmarks));
                    }
                    Err(e) => {
                        log::warn!("bookmark import rejected: {}", e);
                        error.set(Some(e.to_string()));
                    }
                },
                Ok(None) => {}
                Err(e) => error.set(Some(e)),
            }
        });
    };

    let mode = move || {
        if flatten.get() {
            GroupingMode::Flatten
        } else {
            GroupingMode::FoldersAsGroups
        }
    };

    let preview = move || {
        parsed.with(|p| {
            p.as_ref().map(|b| {
                let folders = b
                    .folders
                    .iter()
                    .map(|f| view! { <li>{format!("{} ({})", f.name, f.links.len())}</li> })
                    .collect_view();
                view! {
                    <div class="bookmark-preview">
                        <div>{format!("{} links in {} folders", b.total(), b.folders.len())}</div>
                        <ul>{folders}</ul>
                    </div>
                }
            })
        })
    };

    let apply = move |_| {
        let groups = parsed.with_untracked(|p| {
            p.as_ref()
                .map(|b| ctx.config.with_value(|c| b.into_groups(mode(), c)))
        });
        let Some(groups) = groups else {
            return;
        };
        if let Some(summary) = ctx.merge_bookmarks(groups) {
            ctx.notices().success(format!(
                "Imported {} cards: {} new groups, {} merged",
                summary.items_added, summary.groups_created, summary.groups_merged
            ));
            dialogs.import_bookmarks.set(false);
        }
    };

    view! {
        <Dialog open=dialogs.import_bookmarks>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>{ImportBookmarks::display_name()}</DialogTitle>
                    <DialogContent>
                        <Flex vertical=true gap=FlexGap::Medium>
                            <div>{move || format!("Bookmarks are added to \"{}\".", target_name())}</div>
                            <input type="file" accept=".html,.htm,text/html" on:change=on_file />
                            <Checkbox checked=flatten label="Put all links into one group" />
                            {preview}
                            {move || error.get().map(|e| view! {
                                <MessageBar intent=MessageBarIntent::Error>{e}</MessageBar>
                            })}
                        </Flex>
                    </DialogContent>
                    <DialogActions>
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=Signal::derive(move || parsed.with(|p| p.is_none()))
                            on_click=apply
                        >
                            "Import"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Subtle
                            on_click=move |_| dialogs.import_bookmarks.set(false)
                        >
                            "Cancel"
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}
